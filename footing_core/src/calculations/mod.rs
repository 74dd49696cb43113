//! # Footing Calculations
//!
//! Each footing type follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable, millimetre geometry)
//! - `*Result` - Report with every verdict (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - One-shot calculation
//!
//! The object models behind them ([`PadFoundation`], [`CombinedFooting`])
//! can also be driven directly: set geometry and loads in any order and
//! query any derived value.
//!
//! ## Pipeline
//!
//! - [`analysis`] - Load combination, resultants, base pressures, bearing and sliding
//! - [`base_pressure`] - Eccentricity and corner pressures
//! - [`beam_demand`] - Beam per axis and the design moment/shear at critical sections
//! - [`beam_solver`] - Statically indeterminate 1-D beam solver
//! - [`reinforcement`] - Required and provided flexural steel
//! - [`shear`] - One-way shear
//! - [`punching`] - Punching shear at the column face, 1d and 2d
//! - [`design`] - Design view that chains the above
//! - [`optimizer`] - Area and column-position searches
//!
//! ## Footings
//!
//! - [`pad_footing`] - One column
//! - [`combined_footing`] - Two columns

pub mod analysis;
pub mod base_pressure;
pub mod beam_demand;
pub mod beam_solver;
pub mod checks;
pub mod combined_footing;
pub mod design;
pub mod optimizer;
pub mod pad_footing;
pub mod punching;
pub mod reinforcement;
pub mod report;
pub mod shear;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;

// Re-export commonly used types
pub use analysis::{FootingAnalysis, ResultantState};
pub use checks::CheckVerdict;
pub use combined_footing::{CombinedFooting, CombinedFootingInput, CombinedFootingResult};
pub use design::{DesignOutcome, FootingDesign};
pub use optimizer::{CancellationToken, OptimizationOutcome};
pub use pad_footing::{PadFootingInput, PadFootingResult, PadFoundation};
pub use report::FootingReport;

/// Enum wrapper for all footing types.
///
/// This allows storing heterogeneous footings in a single project while
/// keeping clean, tagged serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Single column pad footing
    PadFooting(PadFootingInput),
    /// Two column combined footing
    CombinedFooting(CombinedFootingInput),
}

/// Result of running a [`CalculationItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationResult {
    PadFooting(PadFootingResult),
    CombinedFooting(CombinedFootingResult),
}

impl CalculationResult {
    pub fn report(&self) -> &FootingReport {
        match self {
            CalculationResult::PadFooting(r) => &r.report,
            CalculationResult::CombinedFooting(r) => &r.report,
        }
    }

    pub fn passes(&self) -> bool {
        self.report().passes()
    }
}

impl CalculationItem {
    /// Get the user-provided label for this footing
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::PadFooting(p) => &p.label,
            CalculationItem::CombinedFooting(c) => &c.label,
        }
    }

    /// Get the footing type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::PadFooting(_) => "PadFooting",
            CalculationItem::CombinedFooting(_) => "CombinedFooting",
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        match self {
            CalculationItem::PadFooting(p) => p.validate(),
            CalculationItem::CombinedFooting(c) => c.validate(),
        }
    }

    /// Run the calculation for this item.
    pub fn calculate(&self) -> CalcResult<CalculationResult> {
        match self {
            CalculationItem::PadFooting(p) => pad_footing::calculate(p).map(CalculationResult::PadFooting),
            CalculationItem::CombinedFooting(c) => {
                combined_footing::calculate(c).map(CalculationResult::CombinedFooting)
            }
        }
    }
}
