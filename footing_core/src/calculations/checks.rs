//! Pass/fail verdicts.
//!
//! A failing check is a valid engineering answer, not an error. Every
//! verdict carries the two numbers it compared so a caller can report or
//! branch on them.

use serde::{Deserialize, Serialize};

/// Outcome of comparing a design effect against a resistance or limit.
///
/// ## JSON Example
///
/// ```json
/// {
///   "name": "Punching shear at column face",
///   "demand": 1.691,
///   "capacity": 4.488,
///   "unit": "N/mm²",
///   "passes": true,
///   "message": "Punching shear at column face: 1.691 N/mm² against 4.488 N/mm² - PASS"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckVerdict {
    pub name: String,
    /// Design effect (stress, force or pressure)
    pub demand: f64,
    /// Resistance or allowable value
    pub capacity: f64,
    pub unit: String,
    pub passes: bool,
    pub message: String,
}

impl CheckVerdict {
    /// Build a verdict from an explicit pass flag.
    pub fn new(
        name: impl Into<String>,
        demand: f64,
        capacity: f64,
        unit: impl Into<String>,
        passes: bool,
    ) -> Self {
        let name = name.into();
        let unit = unit.into();
        let message = format!(
            "{}: {:.3} {} against {:.3} {} - {}",
            name,
            demand,
            unit,
            capacity,
            unit,
            if passes { "PASS" } else { "FAIL" }
        );
        CheckVerdict {
            name,
            demand,
            capacity,
            unit,
            passes,
            message,
        }
    }

    /// Passes when the demand does not exceed the capacity.
    ///
    /// # Example
    /// ```
    /// use footing_core::calculations::checks::CheckVerdict;
    ///
    /// let v = CheckVerdict::within_limit("Bearing pressure", 136.528, 150.0, "kN/m²");
    /// assert!(v.passes);
    /// assert_eq!(v.status(), "PASS");
    /// ```
    pub fn within_limit(name: impl Into<String>, demand: f64, capacity: f64, unit: impl Into<String>) -> Self {
        CheckVerdict::new(name, demand, capacity, unit, demand <= capacity)
    }

    pub fn status(&self) -> &'static str {
        if self.passes {
            "PASS"
        } else {
            "FAIL"
        }
    }

    /// Demand over capacity
    pub fn utilization(&self) -> f64 {
        if self.capacity.abs() < f64::EPSILON {
            f64::INFINITY
        } else {
            self.demand / self.capacity
        }
    }
}

impl std::fmt::Display for CheckVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_limit() {
        assert!(CheckVerdict::within_limit("x", 1.0, 1.0, "kN").passes);
        assert!(!CheckVerdict::within_limit("x", 1.01, 1.0, "kN").passes);
    }

    #[test]
    fn test_message_carries_values() {
        let v = CheckVerdict::within_limit("Punching shear at 2d", 0.205, 0.399, "N/mm²");
        assert!(v.message.contains("0.205"));
        assert!(v.message.contains("0.399"));
        assert!(v.message.ends_with("PASS"));
        assert!((v.utilization() - 0.205 / 0.399).abs() < 1e-12);
    }

    #[test]
    fn test_serialization() {
        let v = CheckVerdict::new("Sliding", 69.75, 332.145, "kN", true);
        let json = serde_json::to_string(&v).unwrap();
        let parsed: CheckVerdict = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, v);
    }
}
