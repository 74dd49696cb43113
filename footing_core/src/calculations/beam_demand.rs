//! # Beam Demand Extraction
//!
//! Each plan axis of the footing is idealized as a beam spanning the footing
//! dimension along that axis:
//!
//! - supports at the column positions (one position: fixed; two or more:
//!   pinned at each)
//! - upward trapezoidal line load from the ULS edge pressures
//! - downward uniform self-weight and surcharge, γG·w·(orthogonal dimension),
//!   when the self-weight model contributes anything
//! - downward ULS column loads at each column position, combined footings
//!   only
//!
//! Design values are read off the solved beam at the critical sections:
//! bending at the column faces and shear one effective depth beyond each
//! face.

use serde::{Deserialize, Serialize};

use super::analysis::FootingAnalysis;
use super::beam_solver::{Beam, BeamLoad, BeamSolution, SupportType};
use crate::errors::CalcResult;
use crate::geometry::Axis;
use crate::loads::{LimitState, LoadEffect};
use crate::units::round_to;

/// Positions closer than this (m) share one support
const SUPPORT_MERGE_TOLERANCE: f64 = 1e-6;

/// Build the idealized beam for one axis.
pub fn axis_beam(analysis: &FootingAnalysis, axis: Axis) -> CalcResult<Beam> {
    let footing = analysis.footing();
    let length = footing.extent(axis);
    let orthogonal = footing.extent(axis.orthogonal());
    let factors = analysis.factors();

    let mut beam = Beam::new(length)?;

    let mut positions: Vec<f64> = analysis.columns().iter().map(|c| c.geometry.position(axis)).collect();
    positions.sort_by(|a, b| a.total_cmp(b));
    positions.dedup_by(|a, b| (*a - *b).abs() < SUPPORT_MERGE_TOLERANCE);
    let support_type = if positions.len() == 1 {
        SupportType::Fixed
    } else {
        SupportType::Pinned
    };
    for position in positions {
        beam.add_support(position, support_type);
    }

    let (start, end) = analysis.edge_line_loads().along(axis);
    beam.add_load(BeamLoad::trapezoidal(0.0, length, start, end));

    let self_weight = analysis.self_weight();
    if self_weight.contributes() {
        let intensity = factors.permanent(LimitState::Ultimate) * self_weight.total() * orthogonal;
        beam.add_load(BeamLoad::uniform(0.0, length, -intensity));
    }

    // A pad's column load goes straight into its fixed support
    if analysis.columns().len() > 1 {
        for column in analysis.columns() {
            let axial = column.combined(factors, LimitState::Ultimate, LoadEffect::Axial);
            beam.add_load(BeamLoad::point(column.geometry.position(axis), -axial));
        }
    }

    Ok(beam)
}

/// Design bending and shear along one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisDemand {
    pub axis: Axis,
    /// Effective depth used for the shear sections (m)
    pub effective_depth: f64,
    /// Largest moment at any column face (kN·m), bottom steel
    pub sagging_moment: f64,
    /// Largest hogging moment anywhere on the beam (kN·m, ≥ 0), top steel
    pub hogging_moment: f64,
    /// Largest |V| one effective depth beyond a face (kN)
    pub design_shear: f64,
    /// Shear sections that fell on the beam (m)
    pub shear_sections: Vec<f64>,
    /// (min, max) moment over the beam (kN·m)
    pub moment_extrema: (f64, f64),
}

impl AxisDemand {
    /// Solve the axis beam and read off the design values.
    pub fn evaluate(analysis: &FootingAnalysis, axis: Axis, effective_depth: f64) -> CalcResult<Self> {
        let solution = axis_beam(analysis, axis)?.solve()?;
        Ok(Self::from_solution(analysis, axis, effective_depth, &solution))
    }

    pub fn from_solution(
        analysis: &FootingAnalysis,
        axis: Axis,
        effective_depth: f64,
        solution: &BeamSolution,
    ) -> Self {
        let length = solution.length;

        let faces: Vec<f64> = analysis
            .columns()
            .iter()
            .flat_map(|c| {
                let (a, b) = c.geometry.faces(axis);
                [a, b]
            })
            .map(|x| x.clamp(0.0, length))
            .collect();
        let sagging = faces
            .iter()
            .map(|x| solution.moment_at(*x))
            .fold(f64::NEG_INFINITY, f64::max);

        let moment_extrema = solution.moment_extrema();
        let hogging = (-moment_extrema.0).max(0.0);

        let shear_sections: Vec<f64> = analysis
            .columns()
            .iter()
            .flat_map(|c| {
                let (a, b) = c.geometry.faces(axis);
                [a - effective_depth, b + effective_depth]
            })
            .filter(|x| (0.0..=length).contains(x))
            .collect();
        let design_shear = if shear_sections.is_empty() {
            tracing::warn!(%axis, effective_depth, "every shear section falls outside the footing, design shear taken as zero");
            0.0
        } else {
            shear_sections
                .iter()
                .map(|x| solution.shear_at(*x).abs())
                .fold(0.0, f64::max)
        };

        tracing::debug!(%axis, sagging, hogging, design_shear, "axis demand");

        AxisDemand {
            axis,
            effective_depth,
            sagging_moment: round_to(sagging, 3),
            hogging_moment: round_to(hogging, 3),
            design_shear: round_to(design_shear, 3),
            shear_sections,
            moment_extrema,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{ColumnGeometry, FootingGeometry};
    use crate::loads::{LoadVector, SelfWeight};

    fn pad() -> FootingAnalysis {
        let footing = FootingGeometry::from_mm(3600.0, 3000.0).unwrap();
        let mut analysis = FootingAnalysis::new(footing, 200.0).unwrap();
        let column = ColumnGeometry::from_mm(450.0, 450.0, 1800.0, 1500.0, &footing).unwrap();
        analysis.add_column(column).unwrap();
        analysis.set_self_weight(SelfWeight::from_mm(550.0, 0.0, 18.0, 24.0).unwrap()).unwrap();
        analysis.set_column_load(0, LoadEffect::Axial, LoadVector::new(770.0, 330.0, 0.0)).unwrap();
        analysis.set_column_load(0, LoadEffect::HorizontalX, LoadVector::new(35.0, 15.0, 0.0)).unwrap();
        analysis.set_column_load(0, LoadEffect::MomentX, LoadVector::new(78.0, 34.0, 0.0)).unwrap();
        analysis
    }

    #[test]
    fn test_pad_beam_layout() {
        let beam = axis_beam(&pad(), Axis::X).unwrap();
        assert_eq!(beam.supports.len(), 1);
        assert_eq!(beam.supports[0].support_type, SupportType::Fixed);
        // edge pressure and self-weight, no column point load
        assert_eq!(beam.loads.len(), 2);
        assert!(!beam.loads.iter().any(|l| matches!(l, BeamLoad::Point { .. })));
    }

    #[test]
    fn test_pad_demand_x() {
        let demand = AxisDemand::evaluate(&pad(), Axis::X, 0.512).unwrap();
        assert!((demand.sagging_moment - 607.861).abs() < 2e-3);
        assert!((demand.design_shear - 520.616).abs() < 2e-3);
        assert!(demand.hogging_moment.abs() < 1e-3);
        assert!((demand.moment_extrema.1 - 787.857).abs() < 1e-2);
    }

    #[test]
    fn test_pad_demand_y() {
        let demand = AxisDemand::evaluate(&pad(), Axis::Y, 0.496).unwrap();
        assert!((demand.sagging_moment - 415.754).abs() < 2e-3);
        assert!((demand.design_shear - 398.459).abs() < 2e-3);
    }

    #[test]
    fn test_no_self_weight_term_when_nothing_contributes() {
        let mut analysis = pad();
        let sw = SelfWeight::from_mm(550.0, 0.0, 18.0, 24.0).unwrap().with_self_weight(false);
        analysis.set_self_weight(sw).unwrap();
        let beam = axis_beam(&analysis, Axis::X).unwrap();
        assert_eq!(beam.loads.len(), 1);
    }

    #[test]
    fn test_shear_sections_outside_beam_dropped() {
        let demand = AxisDemand::evaluate(&pad(), Axis::X, 1.7).unwrap();
        assert!(demand.shear_sections.is_empty());
        assert_eq!(demand.design_shear, 0.0);
    }

    #[test]
    fn test_two_columns_pinned() {
        let footing = FootingGeometry::from_mm(5000.0, 2000.0).unwrap();
        let mut analysis = FootingAnalysis::new(footing, 200.0).unwrap();
        for x in [1000.0, 4000.0] {
            let column = ColumnGeometry::from_mm(300.0, 300.0, x, 1000.0, &footing).unwrap();
            let i = analysis.add_column(column).unwrap();
            analysis.set_column_load(i, LoadEffect::Axial, LoadVector::new(400.0, 100.0, 0.0)).unwrap();
        }
        let beam_x = axis_beam(&analysis, Axis::X).unwrap();
        assert_eq!(beam_x.supports.len(), 2);
        assert!(beam_x.supports.iter().all(|s| s.support_type == SupportType::Pinned));
        let points = beam_x.loads.iter().filter(|l| matches!(l, BeamLoad::Point { .. })).count();
        assert_eq!(points, 2);

        // Both columns share y, so the Y beam has a single fixed support
        let beam_y = axis_beam(&analysis, Axis::Y).unwrap();
        assert_eq!(beam_y.supports.len(), 1);
        assert_eq!(beam_y.supports[0].support_type, SupportType::Fixed);

        let demand = AxisDemand::evaluate(&analysis, Axis::X, 0.4).unwrap();
        assert!(demand.hogging_moment > 0.0);
    }
}
