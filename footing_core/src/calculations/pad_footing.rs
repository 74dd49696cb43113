//! # Pad Footing
//!
//! A single column on a rectangular pad. [`PadFoundation`] is the mutable
//! object model: build it, set loads and self-weight in any order, then query
//! any derived quantity. [`calculate`] is the one-shot form over a
//! serializable [`PadFootingInput`].
//!
//! ## Example
//!
//! ```rust
//! use footing_core::calculations::pad_footing::PadFoundation;
//! use footing_core::loads::LimitState;
//!
//! let mut pad = PadFoundation::new(3600.0, 3000.0, 450.0, 450.0, 1800.0, 1500.0, 200.0).unwrap();
//! pad.foundation_loads(550.0, 0.0, 18.0, 24.0).unwrap();
//! pad.column_axial_loads(770.0, 330.0, 0.0).unwrap();
//! pad.column_horizontal_loads_xdir(35.0, 15.0, 0.0).unwrap();
//! pad.column_moments_xdir(78.0, 34.0, 0.0).unwrap();
//!
//! let sls = pad.analysis().resultant(LimitState::Serviceability);
//! assert_eq!(sls.eccentricity_x, 112.0);
//! assert!(pad.analysis().bearing_check().passes);
//! ```

use serde::{Deserialize, Serialize};

use super::analysis::FootingAnalysis;
use super::design::FootingDesign;
use super::optimizer::{self, CancellationToken, OptimizationOutcome, TrialLayout};
use super::report::{ColumnInput, FootingReport, SelfWeightInput};
use crate::errors::CalcResult;
use crate::geometry::{ColumnGeometry, FootingGeometry};
use crate::loads::{LimitStateFactors, LoadEffect, LoadVector, SelfWeight};
use crate::materials::DesignParameters;

/// Index of the only column
const COLUMN: usize = 0;

/// Pad footing with one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PadFoundation {
    analysis: FootingAnalysis,
}

impl PadFoundation {
    /// Plan, column footprint and position in mm; bearing capacity in kN/m².
    pub fn new(
        length_mm: f64,
        width_mm: f64,
        column_length_mm: f64,
        column_width_mm: f64,
        column_x_mm: f64,
        column_y_mm: f64,
        bearing_capacity: f64,
    ) -> CalcResult<Self> {
        let footing = FootingGeometry::from_mm(length_mm, width_mm)?;
        let column = ColumnGeometry::from_mm(column_length_mm, column_width_mm, column_x_mm, column_y_mm, &footing)?;
        let mut analysis = FootingAnalysis::new(footing, bearing_capacity)?;
        analysis.add_column(column)?;
        Ok(PadFoundation { analysis })
    }

    pub fn with_factors(mut self, factors: LimitStateFactors) -> CalcResult<Self> {
        self.analysis.set_factors(factors)?;
        Ok(self)
    }

    pub fn analysis(&self) -> &FootingAnalysis {
        &self.analysis
    }

    /// Move or resize the column (mm).
    pub fn update_column_geometry(&mut self, length_mm: f64, width_mm: f64, x_mm: f64, y_mm: f64) -> CalcResult<()> {
        let geometry = ColumnGeometry::from_mm(length_mm, width_mm, x_mm, y_mm, self.analysis.footing())?;
        self.analysis.set_column_geometry(COLUMN, geometry)
    }

    /// Set thickness and soil cover (mm) with unit weights (kN/m³).
    ///
    /// Returns the `[concrete, soil]` pressures in kN/m².
    pub fn foundation_loads(
        &mut self,
        thickness_mm: f64,
        soil_depth_mm: f64,
        soil_unit_weight: f64,
        concrete_unit_weight: f64,
    ) -> CalcResult<[f64; 2]> {
        let self_weight = SelfWeight::from_mm(thickness_mm, soil_depth_mm, soil_unit_weight, concrete_unit_weight)?;
        self.analysis.set_self_weight(self_weight)?;
        Ok(self.analysis.foundation_loads())
    }

    fn set(&mut self, effect: LoadEffect, permanent: f64, imposed: f64, wind: f64) -> CalcResult<()> {
        self.analysis
            .set_column_load(COLUMN, effect, LoadVector::new(permanent, imposed, wind))
    }

    pub fn column_axial_loads(&mut self, permanent: f64, imposed: f64, wind: f64) -> CalcResult<()> {
        self.set(LoadEffect::Axial, permanent, imposed, wind)
    }

    pub fn column_horizontal_loads_xdir(&mut self, permanent: f64, imposed: f64, wind: f64) -> CalcResult<()> {
        self.set(LoadEffect::HorizontalX, permanent, imposed, wind)
    }

    pub fn column_horizontal_loads_ydir(&mut self, permanent: f64, imposed: f64, wind: f64) -> CalcResult<()> {
        self.set(LoadEffect::HorizontalY, permanent, imposed, wind)
    }

    pub fn column_moments_xdir(&mut self, permanent: f64, imposed: f64, wind: f64) -> CalcResult<()> {
        self.set(LoadEffect::MomentX, permanent, imposed, wind)
    }

    pub fn column_moments_ydir(&mut self, permanent: f64, imposed: f64, wind: f64) -> CalcResult<()> {
        self.set(LoadEffect::MomentY, permanent, imposed, wind)
    }

    /// Smallest square pad, column centred, that keeps the SLS peak pressure
    /// just under the bearing capacity (m²).
    pub fn minimum_area_required(&self, cancel: &CancellationToken) -> OptimizationOutcome<f64> {
        optimizer::minimum_area_with_moment(&self.analysis, TrialLayout::Centred, cancel)
    }

    pub fn design(&self, params: DesignParameters) -> CalcResult<FootingDesign<'_>> {
        FootingDesign::new(&self.analysis, params)
    }
}

/// Serializable pad footing description.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "F-1",
///   "length_mm": 3600.0,
///   "width_mm": 3000.0,
///   "column": {
///     "length_mm": 450.0, "width_mm": 450.0, "x_mm": 1800.0, "y_mm": 1500.0,
///     "loads": { "axial": { "permanent": 770.0, "imposed": 330.0, "wind": 0.0 } }
///   },
///   "self_weight": { "thickness_mm": 550.0 },
///   "bearing_capacity": 200.0,
///   "design": { "fck": 30.0, "fyk": 500.0, "concrete_cover": 30.0,
///               "bar_diameter_x": 16.0, "bar_diameter_y": 16.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PadFootingInput {
    /// User label (e.g., "F-1", "Pad at Grid B2")
    pub label: String,
    pub length_mm: f64,
    pub width_mm: f64,
    pub column: ColumnInput,
    pub self_weight: SelfWeightInput,
    /// Presumed bearing capacity (kN/m²)
    pub bearing_capacity: f64,
    #[serde(default)]
    pub factors: LimitStateFactors,
    #[serde(default)]
    pub design: DesignParameters,
}

impl PadFootingInput {
    /// Build the object model, validating every field on the way.
    pub fn to_foundation(&self) -> CalcResult<PadFoundation> {
        let c = &self.column;
        let mut pad = PadFoundation::new(
            self.length_mm,
            self.width_mm,
            c.length_mm,
            c.width_mm,
            c.x_mm,
            c.y_mm,
            self.bearing_capacity,
        )?
        .with_factors(self.factors)?;
        pad.analysis.set_self_weight(self.self_weight.to_self_weight()?)?;
        pad.analysis.set_column_loads(COLUMN, c.loads)?;
        Ok(pad)
    }

    pub fn validate(&self) -> CalcResult<()> {
        let pad = self.to_foundation()?;
        self.design.validate()?;
        self.design.checked_effective_depths(pad.analysis.self_weight().thickness)?;
        Ok(())
    }
}

/// Pad footing report plus the suggested minimum area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PadFootingResult {
    #[serde(flatten)]
    pub report: FootingReport,
    /// m²
    pub minimum_area: OptimizationOutcome<f64>,
}

impl PadFootingResult {
    pub fn passes(&self) -> bool {
        self.report.passes()
    }

    pub fn status(&self) -> &'static str {
        self.report.status()
    }
}

/// Analyse and design a pad footing.
///
/// # Example
///
/// ```rust
/// use footing_core::calculations::pad_footing::{calculate, PadFootingInput};
///
/// let json = r#"{
///   "label": "F-1",
///   "length_mm": 3600.0, "width_mm": 3000.0,
///   "column": { "length_mm": 450.0, "width_mm": 450.0, "x_mm": 1800.0, "y_mm": 1500.0,
///               "loads": { "axial": { "permanent": 770.0, "imposed": 330.0, "wind": 0.0 } } },
///   "self_weight": { "thickness_mm": 550.0 },
///   "bearing_capacity": 200.0
/// }"#;
/// let input: PadFootingInput = serde_json::from_str(json).unwrap();
/// let result = calculate(&input).unwrap();
/// assert!(result.passes());
/// ```
pub fn calculate(input: &PadFootingInput) -> CalcResult<PadFootingResult> {
    input.validate()?;
    let pad = input.to_foundation()?;
    let report = FootingReport::evaluate(pad.analysis(), input.design)?;
    let minimum_area = pad.minimum_area_required(&CancellationToken::new());
    tracing::info!(label = %input.label, status = report.status(), "pad footing calculated");
    Ok(PadFootingResult { report, minimum_area })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::LimitState;

    fn pad() -> PadFoundation {
        let mut pad = PadFoundation::new(3600.0, 3000.0, 450.0, 450.0, 1800.0, 1500.0, 150.0).unwrap();
        pad.foundation_loads(550.0, 0.0, 18.0, 24.0).unwrap();
        pad.column_axial_loads(770.0, 330.0, 0.0).unwrap();
        pad.column_horizontal_loads_xdir(35.0, 15.0, 0.0).unwrap();
        pad.column_moments_xdir(78.0, 34.0, 0.0).unwrap();
        pad
    }

    fn input() -> PadFootingInput {
        let loads = crate::loads::ColumnLoads::default()
            .with_load(LoadEffect::Axial, LoadVector::new(770.0, 330.0, 0.0))
            .with_load(LoadEffect::HorizontalX, LoadVector::new(35.0, 15.0, 0.0))
            .with_load(LoadEffect::MomentX, LoadVector::new(78.0, 34.0, 0.0));
        PadFootingInput {
            label: "F-1".to_string(),
            length_mm: 3600.0,
            width_mm: 3000.0,
            column: ColumnInput {
                length_mm: 450.0,
                width_mm: 450.0,
                x_mm: 1800.0,
                y_mm: 1500.0,
                loads,
            },
            self_weight: SelfWeightInput {
                thickness_mm: 550.0,
                soil_depth_mm: 0.0,
                soil_unit_weight: 18.0,
                concrete_unit_weight: 24.0,
                consider_self_weight: true,
            },
            bearing_capacity: 150.0,
            factors: LimitStateFactors::default(),
            design: DesignParameters::new(30.0, 500.0, 30.0, 16.0, 16.0).unwrap(),
        }
    }

    #[test]
    fn test_round_trip_values() {
        let pad = pad();
        let sls = pad.analysis().resultant(LimitState::Serviceability);
        assert!((sls.force_x - 50.0).abs() < 1e-9);
        assert!((sls.force_z - 1242.56).abs() < 1e-9);
        assert_eq!(sls.eccentricity_x, 112.0);
        let q = sls.pressures.as_array();
        let expected = [93.576, 93.576, 136.528, 136.528];
        for (a, b) in q.iter().zip(expected) {
            assert!((a - b).abs() < 1e-9, "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_foundation_loads() {
        let mut pad = pad();
        assert_eq!(pad.foundation_loads(550.0, 0.0, 18.0, 24.0).unwrap(), [13.2, 0.0]);
        assert!(pad.foundation_loads(-1.0, 0.0, 18.0, 24.0).is_err());
        // rejected call keeps the previous self-weight
        assert_eq!(pad.analysis().foundation_loads(), [13.2, 0.0]);
    }

    #[test]
    fn test_setters_replace() {
        let mut pad = pad();
        pad.column_axial_loads(770.0, 330.0, 0.0).unwrap();
        pad.column_axial_loads(770.0, 330.0, 0.0).unwrap();
        let uls = pad.analysis().resultant(LimitState::Ultimate);
        let expected = 1.35 * (770.0 + 10.8 * 13.2) + 1.5 * 330.0;
        assert!((uls.force_z - expected).abs() < 1e-3);
    }

    #[test]
    fn test_y_direction_loads() {
        let mut pad = pad();
        pad.column_horizontal_loads_ydir(10.0, 0.0, 0.0).unwrap();
        pad.column_moments_ydir(20.0, 0.0, 0.0).unwrap();
        let sls = pad.analysis().resultant(LimitState::Serviceability);
        assert!((sls.force_y - 10.0).abs() < 1e-9);
        // (20 + 10 × 0.55) / 1242.56
        assert_eq!(sls.eccentricity_y, 21.0);
    }

    #[test]
    fn test_column_off_footing_rejected() {
        assert!(PadFoundation::new(3600.0, 3000.0, 450.0, 450.0, 3700.0, 1500.0, 150.0).is_err());
        let mut pad = pad();
        assert!(pad.update_column_geometry(50.0, 450.0, 1800.0, 1500.0).is_err());
        assert_eq!(pad.analysis().columns()[0].geometry.length, 0.45);
    }

    #[test]
    fn test_minimum_area_required() {
        let outcome = pad().minimum_area_required(&CancellationToken::new());
        assert_eq!(outcome, OptimizationOutcome::Found(10.24));
    }

    #[test]
    fn test_calculate() {
        let result = calculate(&input()).unwrap();
        assert!(result.passes());
        assert_eq!(result.minimum_area, OptimizationOutcome::Found(10.24));
        assert_eq!(result.report.design.x.bottom.provision.bar_mark(), "H16@200");
        assert_eq!(result.report.design.y.bottom.provision.bar_mark(), "H12@150");
    }

    #[test]
    fn test_calculate_rejects_thin_section() {
        let mut input = input();
        input.self_weight.thickness_mm = 50.0;
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_input_json_round_trip() {
        let input = input();
        let json = serde_json::to_string(&input).unwrap();
        let back: PadFootingInput = serde_json::from_str(&json).unwrap();
        assert_eq!(back, input);
    }
}
