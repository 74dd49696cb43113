//! Footing self-weight and soil surcharge.

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::units::{mm_to_m, round_to};
use crate::validation;

/// Self-weight parameters of a footing.
///
/// Both contributions are uniform pressures (kN/m²) over the footing plan.
///
/// # Example
/// ```
/// use footing_core::loads::SelfWeight;
///
/// let sw = SelfWeight::from_mm(550.0, 0.0, 18.0, 24.0).unwrap();
/// assert_eq!(sw.pressures(), [13.2, 0.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelfWeight {
    /// Footing thickness (m)
    pub thickness: f64,
    /// Depth of soil resting on the footing (m)
    pub soil_depth: f64,
    /// kN/m³
    pub soil_unit_weight: f64,
    /// kN/m³
    pub concrete_unit_weight: f64,
    /// When false the concrete term is zero and only the soil term remains
    pub consider_self_weight: bool,
}

impl Default for SelfWeight {
    fn default() -> Self {
        SelfWeight {
            thickness: 0.3,
            soil_depth: 0.5,
            soil_unit_weight: 18.0,
            concrete_unit_weight: 24.0,
            consider_self_weight: true,
        }
    }
}

impl SelfWeight {
    pub fn from_mm(
        thickness_mm: f64,
        soil_depth_mm: f64,
        soil_unit_weight: f64,
        concrete_unit_weight: f64,
    ) -> CalcResult<Self> {
        validation::non_negative("foundation_thickness", thickness_mm)?;
        validation::non_negative("soil_depth_abv_foundation", soil_depth_mm)?;
        validation::non_negative("soil_unit_weight", soil_unit_weight)?;
        validation::non_negative("concrete_unit_weight", concrete_unit_weight)?;
        Ok(SelfWeight {
            thickness: mm_to_m(thickness_mm),
            soil_depth: mm_to_m(soil_depth_mm),
            soil_unit_weight,
            concrete_unit_weight,
            consider_self_weight: true,
        })
    }

    pub fn with_self_weight(mut self, consider: bool) -> Self {
        self.consider_self_weight = consider;
        self
    }

    pub fn validate(&self) -> CalcResult<()> {
        validation::non_negative("foundation_thickness", self.thickness)?;
        validation::non_negative("soil_depth_abv_foundation", self.soil_depth)?;
        validation::non_negative("soil_unit_weight", self.soil_unit_weight)?;
        validation::non_negative("concrete_unit_weight", self.concrete_unit_weight)?;
        Ok(())
    }

    /// `[concrete, soil]` pressures in kN/m², rounded to 3 dp
    pub fn pressures(&self) -> [f64; 2] {
        let concrete = if self.consider_self_weight {
            self.concrete_unit_weight * self.thickness
        } else {
            0.0
        };
        let soil = self.soil_unit_weight * self.soil_depth;
        [round_to(concrete, 3), round_to(soil, 3)]
    }

    /// Combined uniform pressure (kN/m²)
    pub fn total(&self) -> f64 {
        let [concrete, soil] = self.pressures();
        concrete + soil
    }

    /// Whether any weight acts at all, decided from the inputs rather than the derived sum
    pub fn contributes(&self) -> bool {
        let concrete = self.consider_self_weight && self.thickness > 0.0 && self.concrete_unit_weight > 0.0;
        let soil = self.soil_depth > 0.0 && self.soil_unit_weight > 0.0;
        concrete || soil
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_example_pressures() {
        let sw = SelfWeight::from_mm(550.0, 0.0, 18.0, 24.0).unwrap();
        let [c, s] = sw.pressures();
        assert!((c - 13.2).abs() < 1e-12);
        assert_eq!(s, 0.0);
        assert!((sw.total() - 13.2).abs() < 1e-12);
        assert!(sw.contributes());
    }

    #[test]
    fn test_defaults() {
        let sw = SelfWeight::default();
        assert!((sw.pressures()[0] - 7.2).abs() < 1e-12);
        assert!((sw.pressures()[1] - 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_switch_keeps_soil() {
        let sw = SelfWeight::from_mm(600.0, 500.0, 18.0, 24.0).unwrap().with_self_weight(false);
        assert_eq!(sw.pressures(), [0.0, 9.0]);
        assert!(sw.contributes());

        let none = SelfWeight::from_mm(600.0, 0.0, 18.0, 24.0).unwrap().with_self_weight(false);
        assert!(!none.contributes());
        assert_eq!(none.total(), 0.0);
    }

    #[test]
    fn test_rejects_negative() {
        assert!(SelfWeight::from_mm(-1.0, 0.0, 18.0, 24.0).is_err());
        assert!(SelfWeight::from_mm(500.0, 0.0, -18.0, 24.0).is_err());
    }
}
