//! # Footing Design
//!
//! [`FootingDesign`] borrows a [`FootingAnalysis`] and adds the material and
//! detailing parameters. It owns no derived state: every method recomputes
//! from the analysis it points at.
//!
//! ## Pipeline
//!
//! ```text
//! analysis ─► edge line loads ─► axis beam ─► AxisDemand
//!                                               │
//!                     RequiredSteel ◄───────────┤
//!                          │                    │
//!               ReinforcementProvision ─► TransverseShear
//!                          │
//!                  PunchingResistances ─► PunchingCheck per column
//! ```

use serde::{Deserialize, Serialize};

use super::analysis::FootingAnalysis;
use super::beam_demand::AxisDemand;
use super::punching::{
    check_perimeter, column_face_check, PunchingCheck, PunchingPerimeter, PunchingResistances,
};
use super::reinforcement::{bending_reinforcement, ReinforcementProvision, RequiredSteel};
use super::shear::TransverseShear;
use crate::errors::CalcResult;
use crate::geometry::Axis;
use crate::materials::{DesignParameters, EffectiveDepths};
use crate::units::m_to_mm;

/// Face of the footing a layer of steel sits at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SteelFace {
    /// Resists sagging
    Bottom,
    /// Resists hogging between columns
    Top,
}

/// Required and provided steel in one layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteelDesign {
    pub face: SteelFace,
    pub required: RequiredSteel,
    pub provision: ReinforcementProvision,
}

/// Bending, steel and one-way shear along one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisDesign {
    pub axis: Axis,
    pub demand: AxisDemand,
    pub bottom: SteelDesign,
    /// Only for footings with more than one column
    pub top: Option<SteelDesign>,
    pub transverse_shear: TransverseShear,
}

/// Punching verdicts of one column.
///
/// An offset perimeter is `None` when it is larger than the column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnPunching {
    pub column: usize,
    pub column_face: PunchingCheck,
    pub one_depth: Option<PunchingCheck>,
    pub two_depths: Option<PunchingCheck>,
}

impl ColumnPunching {
    /// Every perimeter that applies passes
    pub fn passes(&self) -> bool {
        self.checks().all(|c| c.verdict.passes)
    }

    pub fn checks(&self) -> impl Iterator<Item = &PunchingCheck> {
        std::iter::once(&self.column_face)
            .chain(self.one_depth.as_ref())
            .chain(self.two_depths.as_ref())
    }
}

/// Everything the design adds on top of the analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignOutcome {
    pub effective_depths: EffectiveDepths,
    pub x: AxisDesign,
    pub y: AxisDesign,
    pub punching_resistances: PunchingResistances,
    pub punching: Vec<ColumnPunching>,
}

impl DesignOutcome {
    pub fn axis(&self, axis: Axis) -> &AxisDesign {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }
}

/// Design view over an analysis.
///
/// # Example
/// ```
/// use footing_core::calculations::analysis::FootingAnalysis;
/// use footing_core::calculations::design::FootingDesign;
/// use footing_core::geometry::{Axis, ColumnGeometry, FootingGeometry};
/// use footing_core::loads::{LoadEffect, LoadVector, SelfWeight};
/// use footing_core::materials::DesignParameters;
///
/// let footing = FootingGeometry::from_mm(3600.0, 3000.0).unwrap();
/// let mut analysis = FootingAnalysis::new(footing, 200.0).unwrap();
/// let column = ColumnGeometry::from_mm(450.0, 450.0, 1800.0, 1500.0, &footing).unwrap();
/// analysis.add_column(column).unwrap();
/// analysis.set_self_weight(SelfWeight::from_mm(550.0, 0.0, 18.0, 24.0).unwrap()).unwrap();
/// analysis.set_column_load(0, LoadEffect::Axial, LoadVector::new(770.0, 330.0, 0.0)).unwrap();
///
/// let params = DesignParameters::new(30.0, 500.0, 30.0, 16.0, 16.0).unwrap();
/// let design = FootingDesign::new(&analysis, params).unwrap();
/// let x = design.axis_design(Axis::X).unwrap();
/// assert!(x.bottom.provision.area_provided >= x.bottom.required.per_metre);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FootingDesign<'a> {
    analysis: &'a FootingAnalysis,
    params: DesignParameters,
}

impl<'a> FootingDesign<'a> {
    pub fn new(analysis: &'a FootingAnalysis, params: DesignParameters) -> CalcResult<Self> {
        params.validate()?;
        params.checked_effective_depths(analysis.self_weight().thickness)?;
        Ok(FootingDesign { analysis, params })
    }

    pub fn analysis(&self) -> &'a FootingAnalysis {
        self.analysis
    }

    pub fn params(&self) -> &DesignParameters {
        &self.params
    }

    pub fn effective_depths(&self) -> EffectiveDepths {
        self.params.effective_depths(self.analysis.self_weight().thickness)
    }

    /// Design moment and shear along an axis
    pub fn axis_demand(&self, axis: Axis) -> CalcResult<AxisDemand> {
        AxisDemand::evaluate(self.analysis, axis, self.effective_depths().along(axis))
    }

    /// Strip width resisting bending along an axis (mm)
    fn strip_width(&self, axis: Axis) -> f64 {
        m_to_mm(self.analysis.footing().extent(axis.orthogonal()))
    }

    fn steel_design(&self, axis: Axis, face: SteelFace, moment: f64) -> CalcResult<SteelDesign> {
        let required = bending_reinforcement(
            moment,
            self.effective_depths().along(axis),
            self.strip_width(axis),
            self.params.fck,
            self.params.fyk,
        );
        let provision = ReinforcementProvision::select(required.per_metre, self.params.fyk)?;
        Ok(SteelDesign {
            face,
            required,
            provision,
        })
    }

    /// Required steel in one face for an axis
    pub fn required_steel(&self, axis: Axis, face: SteelFace) -> CalcResult<RequiredSteel> {
        let demand = self.axis_demand(axis)?;
        let moment = match face {
            SteelFace::Bottom => demand.sagging_moment,
            SteelFace::Top => demand.hogging_moment,
        };
        Ok(self.steel_design(axis, face, moment)?.required)
    }

    /// Full design along one axis.
    pub fn axis_design(&self, axis: Axis) -> CalcResult<AxisDesign> {
        let demand = self.axis_demand(axis)?;
        let bottom = self.steel_design(axis, SteelFace::Bottom, demand.sagging_moment)?;
        let top = if self.analysis.columns().len() > 1 {
            Some(self.steel_design(axis, SteelFace::Top, demand.hogging_moment)?)
        } else {
            None
        };
        let transverse_shear = TransverseShear::evaluate(
            axis,
            demand.design_shear,
            bottom.provision.area_provided,
            demand.effective_depth,
            self.analysis.footing().extent(axis.orthogonal()),
            self.params.fck,
        );
        Ok(AxisDesign {
            axis,
            demand,
            bottom,
            top,
            transverse_shear,
        })
    }

    /// Punching resistances from the bottom steel of both axes
    pub fn punching_resistances(&self) -> CalcResult<PunchingResistances> {
        let x = self.axis_design(Axis::X)?;
        let y = self.axis_design(Axis::Y)?;
        self.resistances_from(&x, &y)
    }

    fn resistances_from(&self, x: &AxisDesign, y: &AxisDesign) -> CalcResult<PunchingResistances> {
        let depths = self.effective_depths();
        Ok(PunchingResistances::new(
            self.params.concrete()?,
            x.bottom.provision.ratio(depths.dx),
            y.bottom.provision.ratio(depths.dy),
            depths.d_avg,
        ))
    }

    fn column_punching(&self, column: usize, resistances: &PunchingResistances) -> CalcResult<ColumnPunching> {
        let d_avg = self.effective_depths().d_avg;
        let beta = self.params.beta_override;
        let check = |perimeter| check_perimeter(self.analysis, column, perimeter, d_avg, resistances, beta);
        Ok(ColumnPunching {
            column,
            column_face: column_face_check(self.analysis, column, d_avg, resistances, beta)?,
            one_depth: check(PunchingPerimeter::OneDepth)?,
            two_depths: check(PunchingPerimeter::TwoDepths)?,
        })
    }

    /// Punching checks for every column
    pub fn punching_checks(&self) -> CalcResult<Vec<ColumnPunching>> {
        let resistances = self.punching_resistances()?;
        (0..self.analysis.columns().len())
            .map(|i| self.column_punching(i, &resistances))
            .collect()
    }

    /// Run the whole design.
    pub fn evaluate(&self) -> CalcResult<DesignOutcome> {
        let x = self.axis_design(Axis::X)?;
        let y = self.axis_design(Axis::Y)?;
        let punching_resistances = self.resistances_from(&x, &y)?;
        let punching = (0..self.analysis.columns().len())
            .map(|i| self.column_punching(i, &punching_resistances))
            .collect::<CalcResult<Vec<_>>>()?;

        tracing::info!(
            columns = punching.len(),
            bottom_x = %x.bottom.provision.bar_mark(),
            bottom_y = %y.bottom.provision.bar_mark(),
            "footing design complete"
        );

        Ok(DesignOutcome {
            effective_depths: self.effective_depths(),
            x,
            y,
            punching_resistances,
            punching,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{ColumnGeometry, FootingGeometry};
    use crate::loads::{LoadEffect, LoadVector, SelfWeight};

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

    fn params() -> DesignParameters {
        DesignParameters::new(30.0, 500.0, 30.0, 16.0, 16.0).unwrap()
    }

    #[test]
    fn test_pad_design() {
        let analysis = pad();
        let outcome = FootingDesign::new(&analysis, params()).unwrap().evaluate().unwrap();

        assert!((outcome.effective_depths.d_avg - 0.504).abs() < 1e-9);
        assert_eq!(outcome.x.bottom.required.per_metre, 958.0);
        assert_eq!(outcome.x.bottom.provision.bar_mark(), "H16@200");
        assert_eq!(outcome.y.bottom.required.per_metre, 747.0);
        assert_eq!(outcome.y.bottom.provision.bar_mark(), "H12@150");
        assert!(outcome.x.top.is_none());

        assert!((outcome.x.transverse_shear.resistance - 609.792).abs() < 1e-9);
        assert!((outcome.y.transverse_shear.resistance - 716.026).abs() < 1e-9);

        assert!((outcome.punching_resistances.vrd_c - 0.399).abs() < 1e-12);
        let punching = &outcome.punching[0];
        assert!((punching.column_face.stress - 1.691468).abs() < 1e-5);
        assert!(punching.one_depth.is_none());
        assert!(punching.two_depths.is_none());
        assert!(punching.passes());
    }

    #[test]
    fn test_design_sees_later_mutation() {
        let mut analysis = pad();
        let before = FootingDesign::new(&analysis, params()).unwrap().axis_demand(Axis::X).unwrap();
        analysis.set_column_load(0, LoadEffect::Axial, LoadVector::new(1000.0, 400.0, 0.0)).unwrap();
        let after = FootingDesign::new(&analysis, params()).unwrap().axis_demand(Axis::X).unwrap();
        assert!(after.sagging_moment > before.sagging_moment);
    }

    #[test]
    fn test_thin_section_rejected() {
        let mut analysis = pad();
        analysis.set_self_weight(SelfWeight::from_mm(40.0, 0.0, 18.0, 24.0).unwrap()).unwrap();
        assert!(FootingDesign::new(&analysis, params()).is_err());
    }

    #[test]
    fn test_required_steel_faces() {
        let analysis = pad();
        let design = FootingDesign::new(&analysis, params()).unwrap();
        let bottom = design.required_steel(Axis::X, SteelFace::Bottom).unwrap();
        let top = design.required_steel(Axis::X, SteelFace::Top).unwrap();
        assert_eq!(bottom.bending_area, 2873.0);
        assert_eq!(top.per_metre, (top.minimum_area / 3.0).round());
    }
}
