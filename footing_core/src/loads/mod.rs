//! Column load ledger and limit-state combinations
//!
//! # Overview
//!
//! - [`LoadSource`] - Permanent, imposed and wind actions
//! - [`LoadEffect`] - The five force/moment components a column transfers
//! - [`LoadVector`] - One characteristic value per source
//! - [`ColumnLoads`] - The full ledger for one column
//! - [`LimitStateFactors`] - Partial factors for SLS/ULS combination
//! - [`SelfWeight`] - Footing self-weight and soil surcharge pressures
//!
//! # Example
//!
//! ```
//! use footing_core::loads::{ColumnLoads, LimitState, LimitStateFactors, LoadEffect, LoadVector};
//!
//! let mut loads = ColumnLoads::default();
//! loads.set(LoadEffect::Axial, LoadVector::new(770.0, 330.0, 0.0)).unwrap();
//!
//! let factors = LimitStateFactors::default();
//! let n_uls = factors.combine(LimitState::Ultimate, loads.get(LoadEffect::Axial));
//! assert!((n_uls - 1534.5).abs() < 1e-9);
//! ```

pub mod load_types;
pub mod combinations;
pub mod self_weight;

pub use load_types::{LoadEffect, LoadSource};
pub use combinations::{LimitState, LimitStateFactors, LoadCombination};
pub use self_weight::SelfWeight;

use serde::{Deserialize, Serialize};
use crate::errors::{CalcError, CalcResult};
use crate::validation;

/// Characteristic values of one load effect, one per [`LoadSource`].
///
/// # JSON Format
/// ```json
/// { "permanent": 770.0, "imposed": 330.0, "wind": 0.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LoadVector {
    pub permanent: f64,
    pub imposed: f64,
    pub wind: f64,
}

impl LoadVector {
    pub const ZERO: LoadVector = LoadVector {
        permanent: 0.0,
        imposed: 0.0,
        wind: 0.0,
    };

    pub fn new(permanent: f64, imposed: f64, wind: f64) -> Self {
        LoadVector {
            permanent,
            imposed,
            wind,
        }
    }

    /// Value for one source
    pub fn get(&self, source: LoadSource) -> f64 {
        match source {
            LoadSource::Permanent => self.permanent,
            LoadSource::Imposed => self.imposed,
            LoadSource::Wind => self.wind,
        }
    }

    /// Unfactored sum of all sources
    pub fn sum(&self) -> f64 {
        self.permanent + self.imposed + self.wind
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.permanent, self.imposed, self.wind]
    }

    /// Check the vector for use as a given effect.
    ///
    /// All values must be finite. Axial permanent and imposed loads are
    /// downward positive, so a negative value there is a sign-convention
    /// error. Wind may act either way.
    pub fn validate(&self, effect: LoadEffect) -> CalcResult<()> {
        for source in LoadSource::ALL {
            let field = field_name(effect, source);
            let value = self.get(source);
            validation::finite(&field, value)?;
            if effect == LoadEffect::Axial && !source.is_reversible() && value < 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    format!("{} axial load must be given as a positive (downward) value", source.description()),
                ));
            }
        }
        Ok(())
    }
}

fn field_name(effect: LoadEffect, source: LoadSource) -> String {
    let effect_code = match effect {
        LoadEffect::Axial => "axial",
        LoadEffect::HorizontalX => "horizontal_x",
        LoadEffect::HorizontalY => "horizontal_y",
        LoadEffect::MomentX => "moment_x",
        LoadEffect::MomentY => "moment_y",
    };
    format!("{}_{}", source.description().split(' ').next().unwrap_or("load").to_lowercase(), effect_code)
}

/// Every load a single column transfers to the footing.
///
/// Setting an effect replaces its vector; it never accumulates.
///
/// # Example
/// ```
/// use footing_core::loads::{ColumnLoads, LoadEffect, LoadVector};
///
/// let mut loads = ColumnLoads::default();
/// loads.set(LoadEffect::MomentX, LoadVector::new(78.0, 34.0, 0.0)).unwrap();
/// loads.set(LoadEffect::MomentX, LoadVector::new(78.0, 34.0, 0.0)).unwrap();
/// assert_eq!(loads.get(LoadEffect::MomentX).sum(), 112.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ColumnLoads {
    pub axial: LoadVector,
    pub horizontal_x: LoadVector,
    pub horizontal_y: LoadVector,
    pub moment_x: LoadVector,
    pub moment_y: LoadVector,
}

impl ColumnLoads {
    /// Vector for one effect
    pub fn get(&self, effect: LoadEffect) -> &LoadVector {
        match effect {
            LoadEffect::Axial => &self.axial,
            LoadEffect::HorizontalX => &self.horizontal_x,
            LoadEffect::HorizontalY => &self.horizontal_y,
            LoadEffect::MomentX => &self.moment_x,
            LoadEffect::MomentY => &self.moment_y,
        }
    }

    fn slot_mut(&mut self, effect: LoadEffect) -> &mut LoadVector {
        match effect {
            LoadEffect::Axial => &mut self.axial,
            LoadEffect::HorizontalX => &mut self.horizontal_x,
            LoadEffect::HorizontalY => &mut self.horizontal_y,
            LoadEffect::MomentX => &mut self.moment_x,
            LoadEffect::MomentY => &mut self.moment_y,
        }
    }

    /// Replace the vector for one effect. A rejected vector leaves the ledger untouched.
    pub fn set(&mut self, effect: LoadEffect, vector: LoadVector) -> CalcResult<()> {
        vector.validate(effect)?;
        *self.slot_mut(effect) = vector;
        Ok(())
    }

    /// Builder form of [`set`](Self::set), unchecked until [`validate`](Self::validate)
    pub fn with_load(mut self, effect: LoadEffect, vector: LoadVector) -> Self {
        *self.slot_mut(effect) = vector;
        self
    }

    pub fn validate(&self) -> CalcResult<()> {
        for effect in LoadEffect::ALL {
            self.get(effect).validate(effect)?;
        }
        Ok(())
    }
}
