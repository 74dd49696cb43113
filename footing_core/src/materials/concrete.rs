//! Concrete strength classes (EN 1992-1-1 Table 3.1).

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::validation;

/// Characteristic cylinder strengths fck (N/mm²) accepted for design
pub const CONCRETE_STRENGTHS: [f64; 10] = [16.0, 20.0, 25.0, 30.0, 32.0, 35.0, 37.0, 40.0, 45.0, 55.0];

/// A concrete class identified by its characteristic cylinder strength.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConcreteClass {
    fck: f64,
}

impl ConcreteClass {
    /// # Example
    /// ```
    /// use footing_core::materials::ConcreteClass;
    ///
    /// let c25 = ConcreteClass::new(25.0).unwrap();
    /// assert_eq!(c25.label(), "C25");
    /// assert!(ConcreteClass::new(28.0).is_err());
    /// ```
    pub fn new(fck: f64) -> CalcResult<Self> {
        validation::one_of("fck", fck, &CONCRETE_STRENGTHS)?;
        Ok(ConcreteClass { fck })
    }

    /// fck (N/mm²)
    pub fn fck(&self) -> f64 {
        self.fck
    }

    pub fn label(&self) -> String {
        format!("C{}", self.fck)
    }

    /// Strength reduction factor for concrete cracked in shear, 0.6(1 - fck/250)
    pub fn shear_strength_reduction(&self) -> f64 {
        0.6 * (1.0 - self.fck / 250.0)
    }

    /// Design compressive strength with αcc = 0.85, γc = 1.5
    pub fn design_strength(&self) -> f64 {
        0.85 * self.fck / 1.5
    }
}

impl Default for ConcreteClass {
    fn default() -> Self {
        ConcreteClass { fck: 25.0 }
    }
}
