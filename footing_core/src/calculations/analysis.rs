//! # Footing Analysis Aggregate
//!
//! [`FootingAnalysis`] is the shared state behind both footing types: the
//! footing plan, its columns with their load ledgers, the self-weight model,
//! the presumed bearing capacity and the partial factors.
//!
//! Every derived quantity (resultants, eccentricities, base pressures) is a
//! pure function of the current state and is recomputed on each query, so a
//! setter call is visible to every later query.
//!
//! ## Resultants
//!
//! Moments are taken about the footing origin (the −X,−Y corner):
//!
//! ```text
//! Fz = Σ N + γ·A·w
//! Mx = γ·A·w·L/2 + Σ (N·x + Mx + Hx·t)
//! My = γ·A·w·W/2 + Σ (N·y + My + Hy·t)
//! ex = Mx/Fz − L/2      ey = My/Fz − W/2
//! ```
//!
//! with `w` the self-weight plus surcharge pressure, `t` the footing
//! thickness and γ = 1 at SLS, γG at ULS.

use serde::{Deserialize, Serialize};

use super::base_pressure::{self, CornerPressures, EdgeLineLoads};
use super::checks::CheckVerdict;
use crate::errors::{CalcError, CalcResult};
use crate::geometry::{Axis, ColumnGeometry, FootingGeometry};
use crate::loads::{
    ColumnLoads, LimitState, LimitStateFactors, LoadEffect, LoadSource, LoadVector, SelfWeight,
};
use crate::units::{m_to_mm, round_to};
use crate::validation;

/// Characteristic base friction angle used by the sliding check (degrees)
pub const BASE_FRICTION_ANGLE_DEG: f64 = 20.0;

/// Partial factor on tan δ for the sliding check
pub const BASE_FRICTION_PARTIAL_FACTOR: f64 = 1.0;

/// Eccentricities below this (mm) count as concentric
pub const CONCENTRIC_TOLERANCE_MM: f64 = 0.0005;

/// A column on the footing and the loads it transfers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub geometry: ColumnGeometry,
    #[serde(default)]
    pub loads: ColumnLoads,
}

impl Column {
    pub fn new(geometry: ColumnGeometry) -> Self {
        Column {
            geometry,
            loads: ColumnLoads::default(),
        }
    }

    /// One load effect combined at a limit state
    pub fn combined(&self, factors: &LimitStateFactors, state: LimitState, effect: LoadEffect) -> f64 {
        factors.combine(state, self.loads.get(effect))
    }
}

/// Derived resultant of all loads at one limit state.
///
/// Forces and moments are rounded to 3 dp. Eccentricities are in mm,
/// rounded to whole millimetres at SLS and to 3 dp at ULS.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResultantState {
    pub limit_state: LimitState,
    /// kN
    pub force_x: f64,
    /// kN
    pub force_y: f64,
    /// kN
    pub force_z: f64,
    /// kN·m about the origin
    pub moment_x: f64,
    /// kN·m about the origin
    pub moment_y: f64,
    /// mm
    pub eccentricity_x: f64,
    /// mm
    pub eccentricity_y: f64,
    pub pressures: CornerPressures,
}

impl ResultantState {
    /// Eccentricity along an axis (mm)
    pub fn eccentricity(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.eccentricity_x,
            Axis::Y => self.eccentricity_y,
        }
    }

    pub fn is_concentric(&self) -> bool {
        self.eccentricity_x.abs() < CONCENTRIC_TOLERANCE_MM && self.eccentricity_y.abs() < CONCENTRIC_TOLERANCE_MM
    }
}

/// Unrounded totals, used where rounding would bias a search
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ResultantTotals {
    pub force_x: f64,
    pub force_y: f64,
    pub force_z: f64,
    pub moment_x: f64,
    pub moment_y: f64,
}

impl ResultantTotals {
    /// Unrounded eccentricities (m)
    pub fn eccentricities(&self, footing: &FootingGeometry) -> (f64, f64) {
        (
            base_pressure::eccentricity(self.moment_x, self.force_z, footing.length),
            base_pressure::eccentricity(self.moment_y, self.force_z, footing.width),
        )
    }
}

/// Footing, columns, self-weight, bearing capacity and factors.
///
/// # Example
/// ```
/// use footing_core::calculations::analysis::FootingAnalysis;
/// use footing_core::geometry::{ColumnGeometry, FootingGeometry};
/// use footing_core::loads::{LimitState, LoadEffect, LoadVector, SelfWeight};
///
/// let footing = FootingGeometry::from_mm(3600.0, 3000.0).unwrap();
/// let mut analysis = FootingAnalysis::new(footing, 200.0).unwrap();
/// let column = ColumnGeometry::from_mm(450.0, 450.0, 1800.0, 1500.0, &footing).unwrap();
/// let index = analysis.add_column(column).unwrap();
/// analysis.set_column_load(index, LoadEffect::Axial, LoadVector::new(770.0, 330.0, 0.0)).unwrap();
/// analysis.set_self_weight(SelfWeight::from_mm(550.0, 0.0, 18.0, 24.0).unwrap()).unwrap();
///
/// let sls = analysis.resultant(LimitState::Serviceability);
/// assert!((sls.force_z - 1242.56).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootingAnalysis {
    footing: FootingGeometry,
    columns: Vec<Column>,
    self_weight: SelfWeight,
    bearing_capacity: f64,
    factors: LimitStateFactors,
}

impl FootingAnalysis {
    pub fn new(footing: FootingGeometry, bearing_capacity: f64) -> CalcResult<Self> {
        validation::strictly_positive("presumed_bearing_capacity", bearing_capacity)?;
        Ok(FootingAnalysis {
            footing,
            columns: Vec::new(),
            self_weight: SelfWeight::default(),
            bearing_capacity,
            factors: LimitStateFactors::default(),
        })
    }

    /// Use a non-default set of partial factors
    pub fn with_factors(mut self, factors: LimitStateFactors) -> CalcResult<Self> {
        self.set_factors(factors)?;
        Ok(self)
    }

    // ---- accessors ----

    pub fn footing(&self) -> &FootingGeometry {
        &self.footing
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> CalcResult<&Column> {
        self.columns
            .get(index)
            .ok_or_else(|| CalcError::invalid_input("column", index.to_string(), "No column with this index"))
    }

    pub fn self_weight(&self) -> &SelfWeight {
        &self.self_weight
    }

    /// Presumed bearing capacity (kN/m²)
    pub fn bearing_capacity(&self) -> f64 {
        self.bearing_capacity
    }

    pub fn factors(&self) -> &LimitStateFactors {
        &self.factors
    }

    // ---- setters (validate first, then replace) ----

    pub fn set_factors(&mut self, factors: LimitStateFactors) -> CalcResult<()> {
        factors.validate()?;
        self.factors = factors;
        Ok(())
    }

    pub fn set_bearing_capacity(&mut self, bearing_capacity: f64) -> CalcResult<()> {
        validation::strictly_positive("presumed_bearing_capacity", bearing_capacity)?;
        self.bearing_capacity = bearing_capacity;
        Ok(())
    }

    pub fn set_self_weight(&mut self, self_weight: SelfWeight) -> CalcResult<()> {
        self_weight.validate()?;
        self.self_weight = self_weight;
        Ok(())
    }

    /// Register a column with an empty load ledger and return its index.
    pub fn add_column(&mut self, geometry: ColumnGeometry) -> CalcResult<usize> {
        self.check_on_footing(&geometry)?;
        self.columns.push(Column::new(geometry));
        Ok(self.columns.len() - 1)
    }

    /// Replace a column's footprint and position, keeping its loads.
    pub fn set_column_geometry(&mut self, index: usize, geometry: ColumnGeometry) -> CalcResult<()> {
        self.check_on_footing(&geometry)?;
        let column = self.column_mut(index)?;
        column.geometry = geometry;
        Ok(())
    }

    /// Replace one load effect of a column.
    pub fn set_column_load(&mut self, index: usize, effect: LoadEffect, vector: LoadVector) -> CalcResult<()> {
        self.column_mut(index)?.loads.set(effect, vector)
    }

    /// Replace a column's whole ledger.
    pub fn set_column_loads(&mut self, index: usize, loads: ColumnLoads) -> CalcResult<()> {
        loads.validate()?;
        self.column_mut(index)?.loads = loads;
        Ok(())
    }

    fn column_mut(&mut self, index: usize) -> CalcResult<&mut Column> {
        self.columns
            .get_mut(index)
            .ok_or_else(|| CalcError::invalid_input("column", index.to_string(), "No column with this index"))
    }

    fn check_on_footing(&self, geometry: &ColumnGeometry) -> CalcResult<()> {
        validation::at_least("column_length", m_to_mm(geometry.length), ColumnGeometry::MIN_DIMENSION_MM)?;
        validation::at_least("column_width", m_to_mm(geometry.width), ColumnGeometry::MIN_DIMENSION_MM)?;
        validation::non_negative("col_pos_xdir", geometry.x)?;
        validation::non_negative("col_pos_ydir", geometry.y)?;
        validation::at_most("col_pos_xdir", geometry.x, self.footing.length)?;
        validation::at_most("col_pos_ydir", geometry.y, self.footing.width)?;
        Ok(())
    }

    /// Same loads and columns on a different plan, with the columns moved.
    ///
    /// Positions pair up with columns in order; unpaired columns stay put.
    pub(crate) fn with_layout(&self, footing: FootingGeometry, positions: &[(f64, f64)]) -> Self {
        let mut layout = self.clone();
        layout.footing = footing;
        for (column, (x, y)) in layout.columns.iter_mut().zip(positions) {
            column.geometry = column.geometry.moved_to(*x, *y);
        }
        layout
    }

    // ---- derived quantities ----

    /// `[concrete, soil]` self-weight pressures (kN/m²)
    pub fn foundation_loads(&self) -> [f64; 2] {
        self.self_weight.pressures()
    }

    /// Combined axial load of one column
    pub fn column_axial(&self, index: usize, state: LimitState) -> CalcResult<f64> {
        Ok(self.column(index)?.combined(&self.factors, state, LoadEffect::Axial))
    }

    /// Sum of one load source over every column for an effect
    pub fn source_total(&self, effect: LoadEffect, source: LoadSource) -> f64 {
        self.columns.iter().map(|c| c.loads.get(effect).get(source)).sum()
    }

    pub(crate) fn raw_totals(&self, state: LimitState) -> ResultantTotals {
        let gamma = self.factors.permanent(state);
        let weight = gamma * self.footing.area() * self.self_weight.total();
        let t = self.self_weight.thickness;

        let mut totals = ResultantTotals {
            force_x: 0.0,
            force_y: 0.0,
            force_z: weight,
            moment_x: weight * self.footing.length / 2.0,
            moment_y: weight * self.footing.width / 2.0,
        };
        for column in &self.columns {
            let f = |effect| column.combined(&self.factors, state, effect);
            let n = f(LoadEffect::Axial);
            let hx = f(LoadEffect::HorizontalX);
            let hy = f(LoadEffect::HorizontalY);
            totals.force_x += hx;
            totals.force_y += hy;
            totals.force_z += n;
            totals.moment_x += n * column.geometry.x + f(LoadEffect::MomentX) + hx * t;
            totals.moment_y += n * column.geometry.y + f(LoadEffect::MomentY) + hy * t;
        }
        totals
    }

    /// Resultant forces, moments, eccentricities and corner pressures.
    pub fn resultant(&self, state: LimitState) -> ResultantState {
        let raw = self.raw_totals(state);
        let force_z = round_to(raw.force_z, 3);
        let moment_x = round_to(raw.moment_x, 3);
        let moment_y = round_to(raw.moment_y, 3);

        let decimals = match state {
            LimitState::Serviceability => 0,
            LimitState::Ultimate => 3,
        };
        let ex = round_to(m_to_mm(base_pressure::eccentricity(moment_x, force_z, self.footing.length)), decimals);
        let ey = round_to(m_to_mm(base_pressure::eccentricity(moment_y, force_z, self.footing.width)), decimals);
        let pressures = CornerPressures::from_resultant(force_z, ex / 1000.0, ey / 1000.0, &self.footing);

        let state = ResultantState {
            limit_state: state,
            force_x: round_to(raw.force_x, 3),
            force_y: round_to(raw.force_y, 3),
            force_z,
            moment_x,
            moment_y,
            eccentricity_x: ex,
            eccentricity_y: ey,
            pressures,
        };
        tracing::debug!(
            limit_state = %state.limit_state,
            fz = state.force_z,
            ex = state.eccentricity_x,
            ey = state.eccentricity_y,
            "resultant"
        );
        state
    }

    pub fn base_pressures(&self, state: LimitState) -> CornerPressures {
        self.resultant(state).pressures
    }

    /// Edge line loads from the ULS base pressures (kN/m)
    pub fn edge_line_loads(&self) -> EdgeLineLoads {
        EdgeLineLoads::from_pressures(&self.base_pressures(LimitState::Ultimate), &self.footing)
    }

    /// SLS corner pressures against the presumed bearing capacity.
    pub fn bearing_check(&self) -> CheckVerdict {
        let q = self.base_pressures(LimitState::Serviceability);
        if q.has_uplift() {
            tracing::warn!(min_pressure = q.min(), "negative corner pressure, part of the base lifts off");
        }
        let capacity = self.bearing_capacity;
        CheckVerdict::new(
            "Bearing pressure",
            q.max(),
            capacity,
            "kN/m²",
            q.max() <= capacity && q.min() <= capacity,
        )
    }

    /// Base friction against the resultant ULS horizontal force.
    pub fn sliding_check(&self) -> CheckVerdict {
        let uls = self.raw_totals(LimitState::Ultimate);
        let horizontal = uls.force_x.hypot(uls.force_y);

        let delta = (BASE_FRICTION_ANGLE_DEG.to_radians().tan() / BASE_FRICTION_PARTIAL_FACTOR).atan();
        let vertical = self.footing.area() * self.self_weight.total()
            + self.source_total(LoadEffect::Axial, LoadSource::Permanent);
        let resistance = vertical * delta.tan();

        CheckVerdict::new(
            "Sliding resistance",
            round_to(horizontal, 3),
            round_to(resistance, 3),
            "kN",
            resistance > horizontal,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3600 × 3000 pad, 450 square column at the centre, 550 thick
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
    fn test_sls_resultant() {
        let sls = pad().resultant(LimitState::Serviceability);
        assert!((sls.force_x - 50.0).abs() < 1e-9);
        assert!((sls.force_z - 1242.56).abs() < 1e-9);
        assert!((sls.moment_x - 2376.108).abs() < 1e-9);
        assert_eq!(sls.eccentricity_x, 112.0);
        assert_eq!(sls.eccentricity_y, 0.0);
        assert_eq!(sls.pressures.as_array(), [93.576, 93.576, 136.528, 136.528]);
    }

    #[test]
    fn test_uls_resultant() {
        let uls = pad().resultant(LimitState::Ultimate);
        assert!((uls.force_z - 1726.956).abs() < 1e-9);
        assert!((uls.moment_x - 3303.183).abs() < 1e-9);
        assert!((uls.moment_y - 2590.434).abs() < 1e-9);
        assert!((uls.eccentricity_x - 112.72).abs() < 1e-9);
        assert_eq!(uls.pressures.as_array(), [129.863, 129.863, 189.944, 189.944]);
        assert!(!uls.is_concentric());
    }

    #[test]
    fn test_column_axial() {
        let analysis = pad();
        assert!((analysis.column_axial(0, LimitState::Ultimate).unwrap() - 1534.5).abs() < 1e-9);
        assert!((analysis.column_axial(0, LimitState::Serviceability).unwrap() - 1100.0).abs() < 1e-9);
        assert!(analysis.column_axial(1, LimitState::Ultimate).is_err());
    }

    #[test]
    fn test_uls_axial_identity_after_repeated_setters() {
        let mut analysis = pad();
        for _ in 0..3 {
            analysis.set_column_load(0, LoadEffect::Axial, LoadVector::new(770.0, 330.0, 20.0)).unwrap();
        }
        let uls = analysis.resultant(LimitState::Ultimate);
        let expected = 1.35 * (770.0 + 10.8 * 13.2) + 1.5 * 330.0 + 1.5 * 20.0;
        assert!((uls.force_z - expected).abs() < 1e-3);
    }

    #[test]
    fn test_concentric_pressures_equal() {
        let mut analysis = pad();
        analysis.set_column_load(0, LoadEffect::HorizontalX, LoadVector::ZERO).unwrap();
        analysis.set_column_load(0, LoadEffect::MomentX, LoadVector::ZERO).unwrap();
        let sls = analysis.resultant(LimitState::Serviceability);
        assert!(sls.is_concentric());
        let q = sls.pressures;
        let expected = round_to(sls.force_z / 10.8, 3);
        for value in q.as_array() {
            assert!((value - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_edge_line_loads() {
        let lines = pad().edge_line_loads();
        assert!((lines.left - 389.589).abs() < 1e-9);
        assert!((lines.right - 569.832).abs() < 1e-9);
        assert!((lines.bottom - 575.653).abs() < 1e-9);
        assert!((lines.top - 575.653).abs() < 1e-9);
    }

    #[test]
    fn test_bearing_check() {
        let mut analysis = pad();
        assert!(analysis.bearing_check().passes);
        analysis.set_bearing_capacity(130.0).unwrap();
        let verdict = analysis.bearing_check();
        assert!(!verdict.passes);
        assert!((verdict.demand - 136.528).abs() < 1e-9);
    }

    #[test]
    fn test_sliding_check() {
        let verdict = pad().sliding_check();
        assert!((verdict.demand - 69.75).abs() < 1e-9);
        assert!((verdict.capacity - 332.145).abs() < 1e-3);
        assert!(verdict.passes);
    }

    #[test]
    fn test_rejected_setter_leaves_state() {
        let mut analysis = pad();
        let before = analysis.clone();
        assert!(analysis.set_column_load(0, LoadEffect::Axial, LoadVector::new(-5.0, 0.0, 0.0)).is_err());
        assert!(analysis.set_column_load(3, LoadEffect::Axial, LoadVector::ZERO).is_err());
        assert!(analysis.set_bearing_capacity(0.0).is_err());
        assert_eq!(analysis, before);
    }

    #[test]
    fn test_column_must_sit_on_footing() {
        let mut analysis = pad();
        let mut moved = analysis.columns()[0].geometry;
        moved.x = 3.7;
        assert!(analysis.set_column_geometry(0, moved).is_err());
    }

    #[test]
    fn test_with_layout_moves_columns() {
        let analysis = pad();
        let bigger = FootingGeometry::from_mm(4000.0, 4000.0).unwrap();
        let layout = analysis.with_layout(bigger, &[(2.0, 2.0)]);
        assert_eq!(layout.columns()[0].geometry.x, 2.0);
        assert_eq!(layout.columns()[0].loads, analysis.columns()[0].loads);
        assert_eq!(analysis.footing().length, 3.6);
    }
}
