//! Reinforcing bar sizes and steel grade labels.

use std::f64::consts::PI;
use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::validation;

/// Standard bar diameters (mm)
pub const BAR_DIAMETERS: [f64; 8] = [8.0, 10.0, 12.0, 16.0, 20.0, 25.0, 32.0, 40.0];

/// Cross-sectional area of one bar (mm²)
pub fn bar_area(diameter_mm: f64) -> f64 {
    PI * diameter_mm * diameter_mm / 4.0
}

/// Check a bar diameter against the standard list.
pub fn validate_bar_diameter(field: &str, diameter_mm: f64) -> CalcResult<f64> {
    validation::one_of(field, diameter_mm, &BAR_DIAMETERS)
}

/// Steel grade designation used in bar marks (e.g. `H16@200`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SteelClass {
    /// Mild steel, fy ≤ 250
    R,
    /// fy ≤ 410
    Y,
    /// fy ≤ 460
    T,
    /// High yield, fy > 460
    H,
}

impl SteelClass {
    /// # Example
    /// ```
    /// use footing_core::materials::SteelClass;
    ///
    /// assert_eq!(SteelClass::from_yield_strength(460.0), SteelClass::T);
    /// assert_eq!(SteelClass::from_yield_strength(500.0), SteelClass::H);
    /// ```
    pub fn from_yield_strength(fyk: f64) -> Self {
        if fyk <= 250.0 {
            SteelClass::R
        } else if fyk <= 410.0 {
            SteelClass::Y
        } else if fyk <= 460.0 {
            SteelClass::T
        } else {
            SteelClass::H
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SteelClass::R => "R",
            SteelClass::Y => "Y",
            SteelClass::T => "T",
            SteelClass::H => "H",
        }
    }

    pub fn is_mild(&self) -> bool {
        matches!(self, SteelClass::R)
    }

    /// Largest spacing allowed for the grade (mm)
    pub fn max_spacing(&self) -> f64 {
        if self.is_mild() {
            200.0
        } else {
            250.0
        }
    }
}

impl std::fmt::Display for SteelClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_area() {
        assert!((bar_area(16.0) - 201.0619).abs() < 1e-3);
        assert!((bar_area(12.0) - 113.0973).abs() < 1e-3);
    }

    #[test]
    fn test_steel_class_boundaries() {
        assert_eq!(SteelClass::from_yield_strength(250.0), SteelClass::R);
        assert_eq!(SteelClass::from_yield_strength(251.0), SteelClass::Y);
        assert_eq!(SteelClass::from_yield_strength(410.0), SteelClass::Y);
        assert_eq!(SteelClass::from_yield_strength(460.0), SteelClass::T);
        assert_eq!(SteelClass::from_yield_strength(460.5), SteelClass::H);
        assert_eq!(SteelClass::R.max_spacing(), 200.0);
        assert_eq!(SteelClass::H.max_spacing(), 250.0);
    }

    #[test]
    fn test_bar_validation() {
        assert!(validate_bar_diameter("bar_diameter_x", 16.0).is_ok());
        assert!(validate_bar_diameter("bar_diameter_x", 14.0).is_err());
    }
}
