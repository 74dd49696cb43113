//! # Unit Types
//!
//! Length wrappers for the millimetre/metre boundary, plus the rounding used
//! for reported values. The wrappers are plain f64 newtypes with transparent
//! serialization, so JSON stays just numbers.
//!
//! ## Conventions
//!
//! - Geometry arrives in millimetres and is held internally in metres
//! - Forces in kN, moments in kN·m, line loads in kN/m
//! - Soil/base pressures in kN/m² (kPa)
//! - Concrete and steel stresses in N/mm² (MPa)
//! - Reinforcement areas in mm² (or mm²/m per metre strip)
//!
//! ## Example
//!
//! ```rust
//! use footing_core::units::{Meters, Millimeters};
//!
//! let length: Meters = Millimeters(3600.0).into();
//! assert_eq!(length.0, 3.6);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Millimeters);
impl_arithmetic!(Meters);

/// Convert a millimetre input to metres.
pub fn mm_to_m(value_mm: f64) -> f64 {
    Meters::from(Millimeters(value_mm)).value()
}

/// Convert metres to millimetres.
pub fn m_to_mm(value_m: f64) -> f64 {
    Millimeters::from(Meters(value_m)).value()
}

/// Round to a fixed number of decimal places (half away from zero).
///
/// Reported quantities follow fixed precisions: forces, moments and
/// pressures to 3 dp, SLS eccentricity to whole millimetres.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mm_to_m() {
        let mm = Millimeters(550.0);
        let m: Meters = mm.into();
        assert!((m.0 - 0.55).abs() < 1e-12);
        assert!((mm_to_m(3600.0) - 3.6).abs() < 1e-12);
        assert!((m_to_mm(0.112) - 112.0).abs() < 1e-9);
    }

    #[test]
    fn test_arithmetic() {
        let a = Millimeters(3600.0);
        let b = Millimeters(450.0);
        assert_eq!((a - b).0, 3150.0);
        assert_eq!((a + b).0, 4050.0);
        assert_eq!((b * 2.0).0, 900.0);
        assert_eq!((a / 2.0).value(), 1800.0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(93.57551, 3), 93.576);
        assert_eq!(round_to(112.27, 0), 112.0);
        assert_eq!(round_to(-0.0004, 3), 0.0);
    }

    #[test]
    fn test_serialization() {
        let t = Millimeters(550.0);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "550.0");

        let roundtrip: Millimeters = serde_json::from_str(&json).unwrap();
        assert_eq!(t, roundtrip);
    }
}
