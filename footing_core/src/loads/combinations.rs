//! Eurocode limit-state combinations
//!
//! Two combinations drive the whole pipeline:
//!
//! - **SLS** (characteristic): `G + Q + W`, every factor 1.0
//! - **ULS** (EN 1990 Exp. 6.10): `γG·G + γQ·Q + γQ·W`
//!
//! Wind takes the imposed factor γQ at ULS rather than a separate wind
//! factor. The factors live in [`LimitStateFactors`], which every analysis
//! owns a copy of; nothing here is global.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use super::load_types::LoadSource;
use super::LoadVector;
use crate::errors::CalcResult;
use crate::validation;

/// Limit state a resultant is evaluated at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LimitState {
    /// Serviceability: unfactored sum
    Serviceability,
    /// Ultimate: partial factors applied
    Ultimate,
}

impl LimitState {
    pub fn code(&self) -> &'static str {
        match self {
            LimitState::Serviceability => "SLS",
            LimitState::Ultimate => "ULS",
        }
    }
}

impl std::fmt::Display for LimitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Partial factors for the ultimate limit state.
///
/// ## JSON Example
///
/// ```json
/// { "gamma_g": 1.35, "gamma_q": 1.5, "gamma_q_unfavourable": 0.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LimitStateFactors {
    /// γG, permanent actions
    pub gamma_g: f64,
    /// γQ, imposed and wind actions
    pub gamma_q: f64,
    /// Carried for completeness; no combination applies it
    pub gamma_q_unfavourable: f64,
}

impl Default for LimitStateFactors {
    fn default() -> Self {
        LimitStateFactors {
            gamma_g: 1.35,
            gamma_q: 1.5,
            gamma_q_unfavourable: 0.0,
        }
    }
}

impl LimitStateFactors {
    /// Build a validated factor set.
    pub fn new(gamma_g: f64, gamma_q: f64, gamma_q_unfavourable: f64) -> CalcResult<Self> {
        let factors = LimitStateFactors {
            gamma_g,
            gamma_q,
            gamma_q_unfavourable,
        };
        factors.validate()?;
        Ok(factors)
    }

    pub fn validate(&self) -> CalcResult<()> {
        validation::strictly_positive("gamma_g", self.gamma_g)?;
        validation::strictly_positive("gamma_q", self.gamma_q)?;
        validation::non_negative("gamma_q_unfavourable", self.gamma_q_unfavourable)?;
        Ok(())
    }

    /// Factor applied to one source at a limit state
    pub fn factor(&self, state: LimitState, source: LoadSource) -> f64 {
        match state {
            LimitState::Serviceability => 1.0,
            LimitState::Ultimate => match source {
                LoadSource::Permanent => self.gamma_g,
                LoadSource::Imposed | LoadSource::Wind => self.gamma_q,
            },
        }
    }

    /// Factor applied to permanent weight terms (footing self-weight, surcharge)
    pub fn permanent(&self, state: LimitState) -> f64 {
        self.factor(state, LoadSource::Permanent)
    }

    /// The combination used at a limit state
    pub fn combination(&self, state: LimitState) -> LoadCombination {
        let equation = match state {
            LimitState::Serviceability => "G + Q + W".to_string(),
            LimitState::Ultimate => format!("{}G + {}Q + {}W", self.gamma_g, self.gamma_q, self.gamma_q),
        };
        LoadSource::ALL.iter().fold(
            LoadCombination::new(state.code(), equation),
            |combo, source| combo.with_factor(*source, self.factor(state, *source)),
        )
    }

    /// Combine one load vector at a limit state
    pub fn combine(&self, state: LimitState, loads: &LoadVector) -> f64 {
        LoadSource::ALL
            .iter()
            .map(|source| self.factor(state, *source) * loads.get(*source))
            .sum()
    }
}

/// A named combination with a factor per load source.
///
/// # Example
/// ```
/// use footing_core::loads::{LoadCombination, LoadSource, LoadVector};
///
/// let combo = LoadCombination::new("ULS", "1.35G + 1.5Q")
///     .with_factor(LoadSource::Permanent, 1.35)
///     .with_factor(LoadSource::Imposed, 1.5);
///
/// let axial = LoadVector::new(770.0, 330.0, 0.0);
/// assert!((combo.apply(&axial) - 1534.5).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCombination {
    /// Combination identifier (e.g., "SLS", "ULS")
    pub name: String,

    /// Human-readable equation for display
    pub equation: String,

    /// Factors keyed by source
    pub factors: HashMap<LoadSource, f64>,
}

impl LoadCombination {
    pub fn new(name: impl Into<String>, equation: impl Into<String>) -> Self {
        LoadCombination {
            name: name.into(),
            equation: equation.into(),
            factors: HashMap::new(),
        }
    }

    /// Add a factor (builder pattern)
    pub fn with_factor(mut self, source: LoadSource, factor: f64) -> Self {
        self.factors.insert(source, factor);
        self
    }

    /// Apply to a load vector. Sources missing from the combination contribute nothing.
    pub fn apply(&self, loads: &LoadVector) -> f64 {
        self.factors
            .iter()
            .map(|(source, factor)| factor * loads.get(*source))
            .sum()
    }

    /// Factor for one source (0.0 if absent)
    pub fn get_factor(&self, source: LoadSource) -> f64 {
        self.factors.get(&source).copied().unwrap_or(0.0)
    }
}
