//! # Combined Footing
//!
//! Two columns on one rectangular footing. Along each axis the footing is a
//! beam pinned at the column centroids, so the design reports top steel for
//! the hogging between the columns as well as bottom steel.
//!
//! ## Example
//!
//! ```rust
//! use footing_core::calculations::combined_footing::{ColumnId, CombinedFooting};
//! use footing_core::calculations::optimizer::CancellationToken;
//!
//! let mut footing = CombinedFooting::new(4600.0, 2300.0, 300.0, 3000.0).unwrap();
//! footing.update_column_geometry(ColumnId::Column1, 300.0, 300.0, 540.0, 1145.0).unwrap();
//! footing.update_column_geometry(ColumnId::Column2, 400.0, 400.0, 3540.0, 1145.0).unwrap();
//! footing.column_axial_loads(ColumnId::Column1, 1000.0, 200.0, 0.0).unwrap();
//! footing.column_axial_loads(ColumnId::Column2, 1400.0, 300.0, 0.0).unwrap();
//! footing.foundation_loads(850.0, 0.0, 18.0, 24.0, false).unwrap();
//!
//! assert!((footing.minimum_area_required().unwrap() - 9.667).abs() < 1e-9);
//! let layout = footing.optimize_column_positions(&CancellationToken::new()).found().unwrap();
//! assert!((layout.column_1_x - 0.54).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use super::analysis::FootingAnalysis;
use super::design::FootingDesign;
use super::optimizer::{self, CancellationToken, ColumnLayout, OptimizationOutcome, TrialLayout};
use super::report::{ColumnInput, FootingReport, SelfWeightInput};
use crate::errors::CalcResult;
use crate::geometry::{ColumnGeometry, FootingGeometry};
use crate::loads::{LimitStateFactors, LoadEffect, LoadVector, SelfWeight};
use crate::materials::DesignParameters;
use crate::units::{m_to_mm, mm_to_m};
use crate::validation;

/// Column footprint used until a real one is set (mm)
const DEFAULT_COLUMN_SIZE_MM: f64 = 100.0;

/// Centre-to-centre spacing used by the optimizers when none is given (mm)
pub const DEFAULT_COLUMN_SPACING_MM: f64 = 1500.0;

/// Which of the two columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnId {
    Column1,
    Column2,
}

impl ColumnId {
    pub const BOTH: [ColumnId; 2] = [ColumnId::Column1, ColumnId::Column2];

    pub fn index(&self) -> usize {
        match self {
            ColumnId::Column1 => 0,
            ColumnId::Column2 => 1,
        }
    }
}

impl std::fmt::Display for ColumnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnId::Column1 => write!(f, "Column 1"),
            ColumnId::Column2 => write!(f, "Column 2"),
        }
    }
}

/// Combined footing carrying two columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedFooting {
    analysis: FootingAnalysis,
    /// Centre-to-centre spacing along X (m)
    spacing: f64,
}

impl CombinedFooting {
    /// Plan in mm, bearing capacity in kN/m², column spacing in mm.
    ///
    /// Both columns start as 100 mm squares on the Y centreline, placed
    /// symmetrically about the footing centre at the given spacing.
    pub fn new(length_mm: f64, width_mm: f64, bearing_capacity: f64, spacing_mm: f64) -> CalcResult<Self> {
        let footing = FootingGeometry::from_mm(length_mm, width_mm)?;
        validation::strictly_positive("column_spacing", spacing_mm)?;
        validation::at_most("column_spacing", spacing_mm, length_mm)?;

        let mut analysis = FootingAnalysis::new(footing, bearing_capacity)?;
        let x1 = (length_mm - spacing_mm) / 2.0;
        let y = width_mm / 2.0;
        for x in [x1, x1 + spacing_mm] {
            let column = ColumnGeometry::from_mm(DEFAULT_COLUMN_SIZE_MM, DEFAULT_COLUMN_SIZE_MM, x, y, &footing)?;
            analysis.add_column(column)?;
        }
        Ok(CombinedFooting {
            analysis,
            spacing: mm_to_m(spacing_mm),
        })
    }

    pub fn with_factors(mut self, factors: LimitStateFactors) -> CalcResult<Self> {
        self.analysis.set_factors(factors)?;
        Ok(self)
    }

    pub fn analysis(&self) -> &FootingAnalysis {
        &self.analysis
    }

    /// Column spacing used by the optimizers (m)
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn set_spacing(&mut self, spacing_mm: f64) -> CalcResult<()> {
        validation::strictly_positive("column_spacing", spacing_mm)?;
        validation::at_most("column_spacing", spacing_mm, m_to_mm(self.analysis.footing().length))?;
        self.spacing = mm_to_m(spacing_mm);
        Ok(())
    }

    /// Resize or move one column (mm).
    pub fn update_column_geometry(
        &mut self,
        column: ColumnId,
        length_mm: f64,
        width_mm: f64,
        x_mm: f64,
        y_mm: f64,
    ) -> CalcResult<()> {
        let geometry = ColumnGeometry::from_mm(length_mm, width_mm, x_mm, y_mm, self.analysis.footing())?;
        self.analysis.set_column_geometry(column.index(), geometry)
    }

    /// Set thickness and soil cover (mm) with unit weights (kN/m³).
    ///
    /// With `consider_self_weight` false only the soil term remains.
    /// Returns the `[concrete, soil]` pressures in kN/m².
    pub fn foundation_loads(
        &mut self,
        thickness_mm: f64,
        soil_depth_mm: f64,
        soil_unit_weight: f64,
        concrete_unit_weight: f64,
        consider_self_weight: bool,
    ) -> CalcResult<[f64; 2]> {
        let self_weight = SelfWeight::from_mm(thickness_mm, soil_depth_mm, soil_unit_weight, concrete_unit_weight)?
            .with_self_weight(consider_self_weight);
        self.analysis.set_self_weight(self_weight)?;
        Ok(self.analysis.foundation_loads())
    }

    fn set(&mut self, column: ColumnId, effect: LoadEffect, permanent: f64, imposed: f64, wind: f64) -> CalcResult<()> {
        self.analysis
            .set_column_load(column.index(), effect, LoadVector::new(permanent, imposed, wind))
    }

    pub fn column_axial_loads(&mut self, column: ColumnId, permanent: f64, imposed: f64, wind: f64) -> CalcResult<()> {
        self.set(column, LoadEffect::Axial, permanent, imposed, wind)
    }

    pub fn column_horizontal_loads_xdir(
        &mut self,
        column: ColumnId,
        permanent: f64,
        imposed: f64,
        wind: f64,
    ) -> CalcResult<()> {
        self.set(column, LoadEffect::HorizontalX, permanent, imposed, wind)
    }

    pub fn column_horizontal_loads_ydir(
        &mut self,
        column: ColumnId,
        permanent: f64,
        imposed: f64,
        wind: f64,
    ) -> CalcResult<()> {
        self.set(column, LoadEffect::HorizontalY, permanent, imposed, wind)
    }

    pub fn column_moments_xdir(&mut self, column: ColumnId, permanent: f64, imposed: f64, wind: f64) -> CalcResult<()> {
        self.set(column, LoadEffect::MomentX, permanent, imposed, wind)
    }

    pub fn column_moments_ydir(&mut self, column: ColumnId, permanent: f64, imposed: f64, wind: f64) -> CalcResult<()> {
        self.set(column, LoadEffect::MomentY, permanent, imposed, wind)
    }

    /// Plan area that keeps the mean SLS pressure at the bearing capacity (m²)
    pub fn minimum_area_required(&self) -> CalcResult<f64> {
        optimizer::minimum_area_without_moment(&self.analysis)
    }

    /// Smallest square footing, columns symmetric at the current spacing,
    /// whose SLS peak pressure sits just under the bearing capacity (m²).
    pub fn minimum_area_required_with_moment(&self, cancel: &CancellationToken) -> OptimizationOutcome<f64> {
        let layout = TrialLayout::Symmetric { spacing: self.spacing };
        optimizer::minimum_area_with_moment(&self.analysis, layout, cancel)
    }

    /// Column positions on the current plan that keep the resultant just
    /// behind the centre in both directions.
    pub fn optimize_column_positions(&self, cancel: &CancellationToken) -> OptimizationOutcome<ColumnLayout> {
        optimizer::optimize_column_positions(&self.analysis, self.spacing, cancel)
    }

    /// Move both columns to a layout, keeping their footprints.
    pub fn apply_layout(&mut self, layout: &ColumnLayout) -> CalcResult<()> {
        let mut moved = self.analysis.clone();
        for (column, x) in ColumnId::BOTH.iter().zip([layout.column_1_x, layout.column_2_x]) {
            let geometry = moved.column(column.index())?.geometry.moved_to(x, layout.y);
            moved.set_column_geometry(column.index(), geometry)?;
        }
        self.analysis = moved;
        Ok(())
    }

    pub fn design(&self, params: DesignParameters) -> CalcResult<FootingDesign<'_>> {
        FootingDesign::new(&self.analysis, params)
    }
}

fn default_spacing() -> f64 {
    DEFAULT_COLUMN_SPACING_MM
}

/// Serializable combined footing description.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "CF-1",
///   "length_mm": 4600.0,
///   "width_mm": 2300.0,
///   "column_spacing_mm": 3000.0,
///   "columns": [
///     { "length_mm": 300.0, "width_mm": 300.0, "x_mm": 540.0, "y_mm": 1145.0,
///       "loads": { "axial": { "permanent": 1000.0, "imposed": 200.0, "wind": 0.0 } } },
///     { "length_mm": 400.0, "width_mm": 400.0, "x_mm": 3540.0, "y_mm": 1145.0,
///       "loads": { "axial": { "permanent": 1400.0, "imposed": 300.0, "wind": 0.0 } } }
///   ],
///   "self_weight": { "thickness_mm": 850.0, "consider_self_weight": false },
///   "bearing_capacity": 300.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedFootingInput {
    pub label: String,
    pub length_mm: f64,
    pub width_mm: f64,
    /// Spacing the optimizers keep between the columns
    #[serde(default = "default_spacing")]
    pub column_spacing_mm: f64,
    pub columns: [ColumnInput; 2],
    pub self_weight: SelfWeightInput,
    /// kN/m²
    pub bearing_capacity: f64,
    #[serde(default)]
    pub factors: LimitStateFactors,
    #[serde(default)]
    pub design: DesignParameters,
}

impl CombinedFootingInput {
    pub fn to_footing(&self) -> CalcResult<CombinedFooting> {
        let mut footing = CombinedFooting::new(
            self.length_mm,
            self.width_mm,
            self.bearing_capacity,
            self.column_spacing_mm,
        )?
        .with_factors(self.factors)?;
        for (id, column) in ColumnId::BOTH.iter().zip(&self.columns) {
            footing.update_column_geometry(*id, column.length_mm, column.width_mm, column.x_mm, column.y_mm)?;
            footing.analysis.set_column_loads(id.index(), column.loads)?;
        }
        footing.analysis.set_self_weight(self.self_weight.to_self_weight()?)?;
        Ok(footing)
    }

    pub fn validate(&self) -> CalcResult<()> {
        let footing = self.to_footing()?;
        self.design.validate()?;
        self.design.checked_effective_depths(footing.analysis.self_weight().thickness)?;
        Ok(())
    }
}

/// Combined footing report plus the sizing and layout suggestions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedFootingResult {
    #[serde(flatten)]
    pub report: FootingReport,
    /// Mean-pressure minimum area (m²)
    pub minimum_area: f64,
    /// Square footing minimum area including moments (m²)
    pub minimum_area_with_moment: OptimizationOutcome<f64>,
    pub suggested_layout: OptimizationOutcome<ColumnLayout>,
}

impl CombinedFootingResult {
    pub fn passes(&self) -> bool {
        self.report.passes()
    }

    pub fn status(&self) -> &'static str {
        self.report.status()
    }
}

/// Analyse and design a combined footing.
pub fn calculate(input: &CombinedFootingInput) -> CalcResult<CombinedFootingResult> {
    input.validate()?;
    let footing = input.to_footing()?;
    let report = FootingReport::evaluate(footing.analysis(), input.design)?;
    let cancel = CancellationToken::new();
    let result = CombinedFootingResult {
        report,
        minimum_area: footing.minimum_area_required()?,
        minimum_area_with_moment: footing.minimum_area_required_with_moment(&cancel),
        suggested_layout: footing.optimize_column_positions(&cancel),
    };
    tracing::info!(label = %input.label, status = result.status(), "combined footing calculated");
    Ok(result)
}
