//! # Footing Report
//!
//! Input pieces shared by the pad and combined footing calculations, and the
//! report both of them produce.

use serde::{Deserialize, Serialize};

use super::analysis::{FootingAnalysis, ResultantState};
use super::base_pressure::EdgeLineLoads;
use super::checks::CheckVerdict;
use super::design::{DesignOutcome, FootingDesign};
use crate::errors::CalcResult;
use crate::geometry::{ColumnGeometry, FootingGeometry};
use crate::loads::{ColumnLoads, LimitState, LoadCombination, SelfWeight};
use crate::materials::DesignParameters;

fn default_soil_unit_weight() -> f64 {
    18.0
}

fn default_concrete_unit_weight() -> f64 {
    24.0
}

fn default_true() -> bool {
    true
}

/// A column as entered: millimetre geometry plus its load ledger.
///
/// ## JSON Example
///
/// ```json
/// {
///   "length_mm": 450.0,
///   "width_mm": 450.0,
///   "x_mm": 1800.0,
///   "y_mm": 1500.0,
///   "loads": {
///     "axial": { "permanent": 770.0, "imposed": 330.0, "wind": 0.0 }
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnInput {
    pub length_mm: f64,
    pub width_mm: f64,
    /// Centroid position along X, measured from the left edge
    pub x_mm: f64,
    /// Centroid position along Y, measured from the bottom edge
    pub y_mm: f64,
    #[serde(default)]
    pub loads: ColumnLoads,
}

impl ColumnInput {
    pub fn geometry(&self, footing: &FootingGeometry) -> CalcResult<ColumnGeometry> {
        ColumnGeometry::from_mm(self.length_mm, self.width_mm, self.x_mm, self.y_mm, footing)
    }
}

/// Thickness, surcharge and unit weights as entered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelfWeightInput {
    pub thickness_mm: f64,
    #[serde(default)]
    pub soil_depth_mm: f64,
    /// kN/m³
    #[serde(default = "default_soil_unit_weight")]
    pub soil_unit_weight: f64,
    /// kN/m³
    #[serde(default = "default_concrete_unit_weight")]
    pub concrete_unit_weight: f64,
    #[serde(default = "default_true")]
    pub consider_self_weight: bool,
}

impl SelfWeightInput {
    pub fn to_self_weight(&self) -> CalcResult<SelfWeight> {
        Ok(SelfWeight::from_mm(
            self.thickness_mm,
            self.soil_depth_mm,
            self.soil_unit_weight,
            self.concrete_unit_weight,
        )?
        .with_self_weight(self.consider_self_weight))
    }
}

/// Every derived quantity and verdict of one footing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootingReport {
    /// SLS then ULS
    pub combinations: Vec<LoadCombination>,
    /// `[concrete, soil]` pressures (kN/m²)
    pub foundation_loads: [f64; 2],
    pub sls: ResultantState,
    pub uls: ResultantState,
    pub edge_line_loads: EdgeLineLoads,
    pub bearing: CheckVerdict,
    pub sliding: CheckVerdict,
    pub design: DesignOutcome,
}

impl FootingReport {
    /// Run the analysis and the design over `analysis`.
    pub fn evaluate(analysis: &FootingAnalysis, params: DesignParameters) -> CalcResult<Self> {
        let design = FootingDesign::new(analysis, params)?.evaluate()?;
        let combinations = [LimitState::Serviceability, LimitState::Ultimate]
            .into_iter()
            .map(|state| analysis.factors().combination(state))
            .collect();
        Ok(FootingReport {
            combinations,
            foundation_loads: analysis.foundation_loads(),
            sls: analysis.resultant(LimitState::Serviceability),
            uls: analysis.resultant(LimitState::Ultimate),
            edge_line_loads: analysis.edge_line_loads(),
            bearing: analysis.bearing_check(),
            sliding: analysis.sliding_check(),
            design,
        })
    }

    /// Every verdict, in report order. Punching perimeters that do not
    /// apply are left out.
    pub fn verdicts(&self) -> Vec<&CheckVerdict> {
        let mut verdicts = vec![
            &self.bearing,
            &self.sliding,
            &self.design.x.transverse_shear.verdict,
            &self.design.y.transverse_shear.verdict,
        ];
        for column in &self.design.punching {
            verdicts.extend(column.checks().map(|c| &c.verdict));
        }
        verdicts
    }

    pub fn failures(&self) -> Vec<&CheckVerdict> {
        self.verdicts().into_iter().filter(|v| !v.passes).collect()
    }

    pub fn passes(&self) -> bool {
        self.verdicts().iter().all(|v| v.passes)
    }

    pub fn status(&self) -> &'static str {
        if self.passes() {
            "PASS"
        } else {
            "FAIL"
        }
    }

    /// Any steel layer whose k exceeded the singly reinforced limit
    pub fn needs_compression_steel(&self) -> bool {
        [&self.design.x, &self.design.y].iter().any(|axis| {
            axis.bottom.required.compression_steel_required
                || axis.top.is_some_and(|t| t.required.compression_steel_required)
        })
    }
}
