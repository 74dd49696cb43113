//! Load source and load effect definitions
//!
//! Every column load is recorded as a triple of characteristic values, one per
//! [`LoadSource`], for each [`LoadEffect`] the column transfers to the footing.

use serde::{Deserialize, Serialize};

/// Characteristic load source.
///
/// # Example
/// ```
/// use footing_core::loads::LoadSource;
///
/// assert_eq!(LoadSource::Permanent.code(), "G");
/// assert!(LoadSource::Wind.is_variable());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadSource {
    /// G - Permanent action (self-weight of structure, finishes)
    Permanent,
    /// Q - Imposed action (occupancy)
    Imposed,
    /// W - Wind action
    Wind,
}

impl LoadSource {
    /// All sources in ledger order
    pub const ALL: [LoadSource; 3] = [LoadSource::Permanent, LoadSource::Imposed, LoadSource::Wind];

    /// Standard symbol used in combination equations
    pub fn code(&self) -> &'static str {
        match self {
            LoadSource::Permanent => "G",
            LoadSource::Imposed => "Q",
            LoadSource::Wind => "W",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            LoadSource::Permanent => "Permanent action",
            LoadSource::Imposed => "Imposed action",
            LoadSource::Wind => "Wind action",
        }
    }

    /// Variable actions take the imposed partial factor at ULS
    pub fn is_variable(&self) -> bool {
        !matches!(self, LoadSource::Permanent)
    }

    /// Wind may legitimately act in either sense (uplift or downforce)
    pub fn is_reversible(&self) -> bool {
        matches!(self, LoadSource::Wind)
    }
}

impl std::fmt::Display for LoadSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A force or moment component a column transfers to the footing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadEffect {
    /// Vertical force (kN), downward positive
    Axial,
    /// Horizontal force along X (kN)
    HorizontalX,
    /// Horizontal force along Y (kN)
    HorizontalY,
    /// Moment producing eccentricity along X (kN·m)
    MomentX,
    /// Moment producing eccentricity along Y (kN·m)
    MomentY,
}

impl LoadEffect {
    pub const ALL: [LoadEffect; 5] = [
        LoadEffect::Axial,
        LoadEffect::HorizontalX,
        LoadEffect::HorizontalY,
        LoadEffect::MomentX,
        LoadEffect::MomentY,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            LoadEffect::Axial => "Axial load",
            LoadEffect::HorizontalX => "Horizontal load in X direction",
            LoadEffect::HorizontalY => "Horizontal load in Y direction",
            LoadEffect::MomentX => "Moment in X direction",
            LoadEffect::MomentY => "Moment in Y direction",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            LoadEffect::MomentX | LoadEffect::MomentY => "kN·m",
            _ => "kN",
        }
    }
}

impl std::fmt::Display for LoadEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_source_codes() {
        assert_eq!(LoadSource::Permanent.code(), "G");
        assert_eq!(LoadSource::Imposed.code(), "Q");
        assert_eq!(LoadSource::Wind.code(), "W");
        assert_eq!(LoadSource::Wind.to_string(), "W");
    }

    #[test]
    fn test_variable_sources() {
        assert!(!LoadSource::Permanent.is_variable());
        assert!(LoadSource::Imposed.is_variable());
        assert!(LoadSource::Wind.is_variable());
        assert!(LoadSource::Wind.is_reversible());
        assert!(!LoadSource::Imposed.is_reversible());
    }

    #[test]
    fn test_effect_units() {
        assert_eq!(LoadEffect::MomentY.unit(), "kN·m");
        assert_eq!(LoadEffect::Axial.unit(), "kN");
        assert_eq!(LoadEffect::ALL.len(), 5);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&LoadSource::Imposed).unwrap();
        assert_eq!(json, "\"Imposed\"");

        let parsed: LoadEffect = serde_json::from_str("\"HorizontalX\"").unwrap();
        assert_eq!(parsed, LoadEffect::HorizontalX);
    }
}
