//! One-way (transverse) shear without shear reinforcement, EN 1992-1-1 6.2.2.

use serde::{Deserialize, Serialize};

use super::checks::CheckVerdict;
use crate::geometry::Axis;
use crate::units::{m_to_mm, round_to};

/// Upper bound on the longitudinal reinforcement ratio ρl
pub const MAX_REINFORCEMENT_RATIO: f64 = 0.02;

/// Size factor k = 1 + √(200/d) ≤ 2, with d in mm
pub fn size_factor(depth_mm: f64) -> f64 {
    (1.0 + (200.0 / depth_mm).sqrt()).min(2.0)
}

/// Shear stress resistance v_Rd,c (N/mm²), rounded to 3 dp.
///
/// `max(0.12·k·(100·ρl·fck)^⅓, 0.035·k^1.5·√fck)` with ρl capped at 0.02.
///
/// # Example
/// ```
/// use footing_core::calculations::shear::{shear_resistance_stress, size_factor};
///
/// let v = shear_resistance_stress(size_factor(512.0), 0.00196, 30.0);
/// assert!((v - 0.397).abs() < 1e-12);
/// ```
pub fn shear_resistance_stress(k: f64, rho: f64, fck: f64) -> f64 {
    let rho = rho.min(MAX_REINFORCEMENT_RATIO);
    let strength_term = 0.12 * k * (100.0 * rho * fck).cbrt();
    let minimum = 0.035 * k.powf(1.5) * fck.sqrt();
    round_to(strength_term.max(minimum), 3)
}

/// One-way shear check across the full footing width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransverseShear {
    pub axis: Axis,
    /// Provided bottom steel ratio
    pub rho: f64,
    /// N/mm²
    pub vrd_c: f64,
    /// kN
    pub resistance: f64,
    pub verdict: CheckVerdict,
}

impl TransverseShear {
    /// Check a design shear (kN) on a strip `width` (m) wide with the given
    /// provided steel (mm²/m) at `effective_depth` (m).
    pub fn evaluate(
        axis: Axis,
        design_shear: f64,
        provided_per_metre: f64,
        effective_depth: f64,
        width: f64,
        fck: f64,
    ) -> Self {
        let d = m_to_mm(effective_depth);
        let rho = round_to(provided_per_metre / (1000.0 * d), 5);
        let vrd_c = shear_resistance_stress(size_factor(d), rho, fck);
        let resistance = round_to(vrd_c * m_to_mm(width) * d / 1000.0, 3);
        let verdict = CheckVerdict::within_limit(
            format!("Transverse shear, {}", axis),
            design_shear,
            resistance,
            "kN",
        );
        TransverseShear {
            axis,
            rho,
            vrd_c,
            resistance,
            verdict,
        }
    }
}
