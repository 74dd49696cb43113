//! # Flexural Reinforcement
//!
//! Singly reinforced rectangular section (EN 1992-1-1 simplified stress
//! block):
//!
//! ```text
//! k  = M / (fck·b·d²)
//! z  = d·(0.5 + √(0.25 − 0.882k)) ≤ 0.95d
//! As = M / (0.87·fyk·z)
//! ```
//!
//! bounded below by the minimum steel of 9.2.1.1 and bucketed into a
//! standard bar and spacing.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::{bar_area, SteelClass};
use crate::units::{m_to_mm, round_to};

/// Above this k the section needs compression steel
pub const COMPRESSION_STEEL_K_LIMIT: f64 = 0.167;

/// Upper bound on the lever-arm factor z/d
pub const LEVER_ARM_CAP: f64 = 0.95;

/// Spacings are multiples of this (mm)
pub const SPACING_INCREMENT: f64 = 25.0;

/// Bars tried in order; each covers areas up to its area at the densest spacing
const BAR_SELECTION: [f64; 7] = [8.0, 10.0, 12.0, 16.0, 20.0, 25.0, 32.0];

/// Bar used above the last threshold
const LARGEST_BAR: f64 = 40.0;

/// Closest spacing a bar is used at before moving up a size (mm)
const DENSEST_SPACING: f64 = 125.0;

/// Slack on the spacing floor so an area exactly at a threshold keeps 125 mm
const SPACING_FLOOR_TOLERANCE: f64 = 1e-9;

/// Largest area per metre (mm²/m) a bar diameter is selected for
pub fn selection_limit(bar_diameter: f64) -> f64 {
    bar_area(bar_diameter) * 1000.0 / DENSEST_SPACING
}

/// Minimum area, max(0.078·fck^⅔/fyk, 0.0013)·b·d (mm²), unrounded
pub fn minimum_steel(fck: f64, fyk: f64, width_mm: f64, depth_mm: f64) -> f64 {
    (0.078 * fck.powf(2.0 / 3.0) / fyk * width_mm * depth_mm).max(0.0013 * width_mm * depth_mm)
}

/// Maximum area, 0.04·b·d (mm²)
pub fn maximum_steel(width_mm: f64, depth_mm: f64) -> f64 {
    0.04 * width_mm * depth_mm
}

/// Required bending steel over a strip of the footing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RequiredSteel {
    /// Design moment (kN·m)
    pub moment: f64,
    /// Effective depth (m)
    pub effective_depth: f64,
    /// Strip width (mm)
    pub width: f64,
    pub k: f64,
    /// z/d
    pub lever_arm: f64,
    /// mm²
    pub bending_area: f64,
    /// mm²
    pub minimum_area: f64,
    /// mm²
    pub maximum_area: f64,
    /// Governing area per metre width (mm²/m)
    pub per_metre: f64,
    pub compression_steel_required: bool,
}

impl RequiredSteel {
    /// Governing total area over the strip (mm²)
    pub fn governing_area(&self) -> f64 {
        self.bending_area.max(self.minimum_area)
    }
}

/// Required steel for a moment over a strip `width_mm` wide.
///
/// # Example
/// ```
/// use footing_core::calculations::reinforcement::bending_reinforcement;
///
/// let steel = bending_reinforcement(607.861, 0.512, 3000.0, 30.0, 500.0);
/// assert_eq!(steel.bending_area, 2873.0);
/// assert_eq!(steel.per_metre, 958.0);
/// ```
pub fn bending_reinforcement(moment: f64, effective_depth: f64, width_mm: f64, fck: f64, fyk: f64) -> RequiredSteel {
    let moment = moment.max(0.0);
    let d = m_to_mm(effective_depth);
    let k = moment * 1e6 / (fck * width_mm * d * d);
    let compression_steel_required = k > COMPRESSION_STEEL_K_LIMIT;
    if compression_steel_required {
        tracing::warn!(k, moment, "k exceeds 0.167, compression reinforcement required");
    }

    let lever_arm = (0.5 + (0.25 - 0.882 * k).max(0.0).sqrt()).min(LEVER_ARM_CAP);
    let bending_area = (moment * 1e6 / (0.87 * fyk * lever_arm * d)).round();
    let minimum_area = minimum_steel(fck, fyk, width_mm, d).round();
    let per_metre = (bending_area.max(minimum_area) / (width_mm / 1000.0)).round();

    RequiredSteel {
        moment,
        effective_depth,
        width: width_mm,
        k,
        lever_arm,
        bending_area,
        minimum_area,
        maximum_area: maximum_steel(width_mm, d),
        per_metre,
        compression_steel_required,
    }
}

/// Bars chosen to cover a required area per metre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReinforcementProvision {
    pub steel_class: SteelClass,
    /// mm
    pub bar_diameter: f64,
    /// mm
    pub spacing: f64,
    /// mm²/m
    pub area_provided: f64,
    /// mm²/m
    pub area_required: f64,
}

impl ReinforcementProvision {
    /// Pick a bar and the coarsest 25 mm spacing that covers `required` (mm²/m).
    ///
    /// # Example
    /// ```
    /// use footing_core::calculations::reinforcement::ReinforcementProvision;
    ///
    /// let provision = ReinforcementProvision::select(958.0, 500.0).unwrap();
    /// assert_eq!(provision.bar_mark(), "H16@200");
    /// assert_eq!(provision.area_provided, 1005.0);
    /// ```
    pub fn select(required: f64, fyk: f64) -> CalcResult<Self> {
        let steel_class = SteelClass::from_yield_strength(fyk);
        let bar_diameter = BAR_SELECTION
            .iter()
            .copied()
            .find(|diameter| required <= selection_limit(*diameter))
            .unwrap_or(LARGEST_BAR);
        let area = bar_area(bar_diameter);

        let spacing = if required > 0.0 {
            let steps = (1000.0 * area / required / SPACING_INCREMENT + SPACING_FLOOR_TOLERANCE).floor();
            (steps * SPACING_INCREMENT).min(steel_class.max_spacing())
        } else {
            steel_class.max_spacing()
        };
        if spacing < SPACING_INCREMENT {
            return Err(CalcError::calculation_failed(
                "Reinforcement provision",
                format!("{:.0} mm²/m cannot be provided by a single layer of standard bars", required),
            ));
        }

        Ok(ReinforcementProvision {
            steel_class,
            bar_diameter,
            spacing,
            area_provided: (area * 1000.0 / spacing).round(),
            area_required: required,
        })
    }

    /// e.g. `H16@200`
    pub fn bar_mark(&self) -> String {
        format!("{}{}@{}", self.steel_class, self.bar_diameter, self.spacing)
    }

    /// Reinforcement ratio over an effective depth, As/(1000·d), to 5 dp
    pub fn ratio(&self, effective_depth: f64) -> f64 {
        round_to(self.area_provided / (1000.0 * m_to_mm(effective_depth)), 5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_x_direction() {
        let steel = bending_reinforcement(607.861, 0.512, 3000.0, 30.0, 500.0);
        assert_eq!(steel.bending_area, 2873.0);
        assert_eq!(steel.minimum_area, 2313.0);
        assert_eq!(steel.per_metre, 958.0);
        assert!(!steel.compression_steel_required);
        assert!((steel.maximum_area - 0.04 * 3000.0 * 512.0).abs() < 1e-6);
    }

    #[test]
    fn test_pad_y_direction_minimum_governs() {
        let steel = bending_reinforcement(415.754, 0.496, 3600.0, 30.0, 500.0);
        assert_eq!(steel.bending_area, 2028.0);
        assert_eq!(steel.minimum_area, 2689.0);
        assert_eq!(steel.governing_area(), 2689.0);
        assert_eq!(steel.per_metre, 747.0);
    }

    #[test]
    fn test_negligible_moment_converges_to_minimum() {
        let steel = bending_reinforcement(0.5, 0.5, 1000.0, 25.0, 460.0);
        let minimum = minimum_steel(25.0, 460.0, 1000.0, 500.0).round();
        assert!(steel.bending_area < minimum);
        assert_eq!(steel.per_metre, minimum);
        assert_eq!(steel.lever_arm, LEVER_ARM_CAP);
    }

    #[test]
    fn test_compression_steel_flag() {
        let steel = bending_reinforcement(2000.0, 0.3, 1000.0, 25.0, 460.0);
        assert!(steel.k > COMPRESSION_STEEL_K_LIMIT);
        assert!(steel.compression_steel_required);
        assert!(steel.bending_area.is_finite());
    }

    #[test]
    fn test_provision_y_direction() {
        let p = ReinforcementProvision::select(747.0, 500.0).unwrap();
        assert_eq!(p.bar_diameter, 12.0);
        assert_eq!(p.spacing, 150.0);
        assert_eq!(p.area_provided, 754.0);
        assert!((p.ratio(0.496) - 0.00152).abs() < 1e-12);
    }

    #[test]
    fn test_mild_steel_spacing_cap() {
        let p = ReinforcementProvision::select(100.0, 250.0).unwrap();
        assert_eq!(p.steel_class, SteelClass::R);
        assert_eq!(p.spacing, 200.0);
        let h = ReinforcementProvision::select(100.0, 500.0).unwrap();
        assert_eq!(h.spacing, 250.0);
    }

    #[test]
    fn test_selection_is_monotonic() {
        let mut last = ReinforcementProvision::select(50.0, 460.0).unwrap();
        let mut required = 50.0;
        while required < 20000.0 {
            required += 7.0;
            let next = ReinforcementProvision::select(required, 460.0).unwrap();
            assert!(next.bar_diameter >= last.bar_diameter, "diameter dropped at {}", required);
            assert!(next.area_provided >= last.area_provided, "area dropped at {}", required);
            assert!(next.area_provided >= required);
            last = next;
        }
    }

    #[test]
    fn test_selection_limits() {
        assert!((selection_limit(16.0) - 1608.5).abs() < 0.01);
        assert!((selection_limit(32.0) - 6434.0).abs() < 0.05);
        let at_limit = ReinforcementProvision::select(selection_limit(12.0), 460.0).unwrap();
        assert_eq!(at_limit.bar_diameter, 12.0);
        assert_eq!(at_limit.spacing, 125.0);
    }

    #[test]
    fn test_unprovidable_area() {
        assert!(ReinforcementProvision::select(60000.0, 460.0).is_err());
    }
}
