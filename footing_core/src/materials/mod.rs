//! # Materials and Design Parameters
//!
//! Concrete classes, reinforcing bars and the per-design parameter set.
//!
//! ## Example
//!
//! ```rust
//! use footing_core::materials::DesignParameters;
//!
//! let params = DesignParameters::new(30.0, 500.0, 30.0, 16.0, 16.0).unwrap();
//! let depths = params.effective_depths(0.55);
//! assert!((depths.dx - 0.512).abs() < 1e-9);
//! assert!((depths.dy - 0.496).abs() < 1e-9);
//! ```

pub mod concrete;
pub mod rebar;

pub use concrete::{ConcreteClass, CONCRETE_STRENGTHS};
pub use rebar::{bar_area, SteelClass, BAR_DIAMETERS};

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::geometry::Axis;
use crate::units::mm_to_m;
use crate::validation;

/// Punching β values a designer may impose instead of the computed factor
pub const BETA_OVERRIDES: [f64; 3] = [1.5, 1.4, 1.15];

/// Material and detailing parameters for a footing design.
///
/// ## JSON Example
///
/// ```json
/// {
///   "fck": 25.0,
///   "fyk": 460.0,
///   "concrete_cover": 30.0,
///   "bar_diameter_x": 16.0,
///   "bar_diameter_y": 16.0,
///   "beta_override": null
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignParameters {
    /// Characteristic concrete strength (N/mm²)
    pub fck: f64,
    /// Characteristic steel yield strength (N/mm²)
    pub fyk: f64,
    /// Nominal cover (mm)
    pub concrete_cover: f64,
    /// Bottom bars running along X (mm), laid first
    pub bar_diameter_x: f64,
    /// Bottom bars running along Y (mm), laid on top of the X bars
    pub bar_diameter_y: f64,
    /// Fixed punching β; `None` computes it from the column moments
    #[serde(default)]
    pub beta_override: Option<f64>,
}

impl Default for DesignParameters {
    fn default() -> Self {
        DesignParameters {
            fck: 25.0,
            fyk: 460.0,
            concrete_cover: 30.0,
            bar_diameter_x: 16.0,
            bar_diameter_y: 16.0,
            beta_override: None,
        }
    }
}

impl DesignParameters {
    pub fn new(
        fck: f64,
        fyk: f64,
        concrete_cover: f64,
        bar_diameter_x: f64,
        bar_diameter_y: f64,
    ) -> CalcResult<Self> {
        let params = DesignParameters {
            fck,
            fyk,
            concrete_cover,
            bar_diameter_x,
            bar_diameter_y,
            beta_override: None,
        };
        params.validate()?;
        Ok(params)
    }

    /// Impose a punching β from the allowed set.
    pub fn with_beta_override(mut self, beta: f64) -> CalcResult<Self> {
        validation::one_of("beta", beta, &BETA_OVERRIDES)?;
        self.beta_override = Some(beta);
        Ok(self)
    }

    pub fn validate(&self) -> CalcResult<()> {
        validation::one_of("fck", self.fck, &CONCRETE_STRENGTHS)?;
        validation::strictly_positive("fyk", self.fyk)?;
        validation::strictly_positive("concrete_cover", self.concrete_cover)?;
        rebar::validate_bar_diameter("bar_diameter_x", self.bar_diameter_x)?;
        rebar::validate_bar_diameter("bar_diameter_y", self.bar_diameter_y)?;
        if let Some(beta) = self.beta_override {
            validation::one_of("beta", beta, &BETA_OVERRIDES)?;
        }
        Ok(())
    }

    pub fn concrete(&self) -> CalcResult<ConcreteClass> {
        ConcreteClass::new(self.fck)
    }

    pub fn steel_class(&self) -> SteelClass {
        SteelClass::from_yield_strength(self.fyk)
    }

    /// Bar diameter running along an axis (mm)
    pub fn bar_diameter(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.bar_diameter_x,
            Axis::Y => self.bar_diameter_y,
        }
    }

    /// Effective depths for a footing of the given thickness (m).
    pub fn effective_depths(&self, thickness: f64) -> EffectiveDepths {
        let cover = mm_to_m(self.concrete_cover);
        let phi_x = mm_to_m(self.bar_diameter_x);
        let phi_y = mm_to_m(self.bar_diameter_y);
        let dx = thickness - cover - phi_x / 2.0;
        let dy = thickness - cover - phi_y / 2.0 - phi_x;
        EffectiveDepths {
            dx,
            dy,
            d_avg: (dx + dy) / 2.0,
        }
    }

    /// Like [`effective_depths`](Self::effective_depths) but rejects a section
    /// too thin to hold the cover and both bar layers.
    pub fn checked_effective_depths(&self, thickness: f64) -> CalcResult<EffectiveDepths> {
        let depths = self.effective_depths(thickness);
        if depths.dy <= 0.0 {
            return Err(CalcError::invalid_input(
                "foundation_thickness",
                (thickness * 1000.0).to_string(),
                "Thickness must exceed the cover plus both reinforcement layers",
            ));
        }
        Ok(depths)
    }
}

/// Depths to the tension steel (m).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectiveDepths {
    pub dx: f64,
    pub dy: f64,
    pub d_avg: f64,
}

impl EffectiveDepths {
    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.dx,
            Axis::Y => self.dy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        let p = DesignParameters::default();
        assert!(p.validate().is_ok());
        assert_eq!(p.steel_class(), SteelClass::T);
        assert_eq!(p.beta_override, None);
    }

    #[test]
    fn test_effective_depths() {
        let p = DesignParameters::new(30.0, 500.0, 30.0, 16.0, 16.0).unwrap();
        let d = p.effective_depths(0.55);
        assert!((d.dx - 0.512).abs() < 1e-9);
        assert!((d.dy - 0.496).abs() < 1e-9);
        assert!((d.d_avg - 0.504).abs() < 1e-9);
        assert!((d.along(Axis::Y) - 0.496).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(DesignParameters::new(28.0, 500.0, 30.0, 16.0, 16.0).is_err());
        assert!(DesignParameters::new(30.0, 500.0, 30.0, 14.0, 16.0).is_err());
        assert!(DesignParameters::new(30.0, 0.0, 30.0, 16.0, 16.0).is_err());
        assert!(DesignParameters::new(30.0, 500.0, 0.0, 16.0, 16.0).is_err());
    }

    #[test]
    fn test_beta_override() {
        let p = DesignParameters::default().with_beta_override(1.15).unwrap();
        assert_eq!(p.beta_override, Some(1.15));
        assert!(DesignParameters::default().with_beta_override(1.2).is_err());
    }

    #[test]
    fn test_thin_section_rejected() {
        let p = DesignParameters::default();
        assert!(p.checked_effective_depths(0.05).is_err());
        assert!(p.checked_effective_depths(0.3).is_ok());
    }

    #[test]
    fn test_serialization_defaults_beta() {
        let json = r#"{"fck":30.0,"fyk":500.0,"concrete_cover":30.0,"bar_diameter_x":16.0,"bar_diameter_y":12.0}"#;
        let p: DesignParameters = serde_json::from_str(json).unwrap();
        assert_eq!(p.beta_override, None);
        assert_eq!(p.bar_diameter(Axis::Y), 12.0);
    }
}
