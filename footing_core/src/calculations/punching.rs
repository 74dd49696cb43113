//! # Punching Shear
//!
//! Punching around each column is checked at three perimeters
//! (EN 1992-1-1 6.4):
//!
//! | Perimeter | Offset | Resistance |
//! |-----------|--------|------------|
//! | Column face | 0 | v_Rd,max (6.4.5(3)) |
//! | 1d | d_avg | v_Rd,c,1d |
//! | 2d | 2·d_avg | v_Rd,c (exp. 6.47) |
//!
//! At an offset `o` the control perimeter is the column rectangle with
//! quarter-circle corners of radius `o`:
//!
//! ```text
//! u    = 2·(c1 + c2 + π·o)
//! A    = c1·c2 + 2·(c1 + c2)·o + π·o²
//! V    = N + (γG·w − p)·A
//! Veff = V + m·(|Mx|·c2 + |My|·c1)
//! v    = β·Veff / (u·d)
//! ```
//!
//! The moment amplifier `m` is 1, except on the 2d perimeter of a single
//! column pad where it is 2.
//!
//! `p` is the ULS base pressure under the perimeter from the linear pressure
//! gradient across the footing. β follows exp. 6.51 with the k of Table 6.1
//! unless a fixed value is imposed through the design parameters.
//!
//! An offset perimeter larger than the column footprint in either direction
//! does not apply and yields `None`.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::analysis::FootingAnalysis;
use super::checks::CheckVerdict;
use super::shear::{shear_resistance_stress, MAX_REINFORCEMENT_RATIO};
use crate::errors::{CalcError, CalcResult};
use crate::loads::{LimitState, LoadEffect};
use crate::materials::ConcreteClass;
use crate::units::round_to;

/// Table 6.1: column ratio c1/c2 against k
pub const PUNCHING_K_TABLE: [(f64, f64); 4] = [(0.5, 0.45), (1.0, 0.6), (2.0, 0.7), (3.0, 0.8)];

const MIN_COLUMN_RATIO: f64 = 0.5;
const MAX_COLUMN_RATIO: f64 = 3.0;

fn lerp_k_table(ratio: f64) -> f64 {
    PUNCHING_K_TABLE
        .windows(2)
        .find(|w| ratio <= w[1].0)
        .map(|w| {
            let (r0, k0) = w[0];
            let (r1, k1) = w[1];
            k0 + (k1 - k0) * (ratio - r0) / (r1 - r0)
        })
        .unwrap_or(PUNCHING_K_TABLE[PUNCHING_K_TABLE.len() - 1].1)
}

/// Linear interpolation of Table 6.1.
///
/// Ratios outside [0.5, 3] are rejected; see [`punching_k`] for the clamped form.
///
/// # Example
/// ```
/// use footing_core::calculations::punching::interpolate_punching_k;
///
/// assert!((interpolate_punching_k(1.5).unwrap() - 0.65).abs() < 1e-12);
/// assert!(interpolate_punching_k(4.0).is_err());
/// ```
pub fn interpolate_punching_k(ratio: f64) -> CalcResult<f64> {
    if !(MIN_COLUMN_RATIO..=MAX_COLUMN_RATIO).contains(&ratio) {
        return Err(CalcError::out_of_domain("column ratio c1/c2", ratio.to_string(), "[0.5, 3]"));
    }
    Ok(lerp_k_table(ratio))
}

/// Table 6.1 k for a column, with c1/c2 clamped to [0.5, 3]
pub fn punching_k(c1: f64, c2: f64) -> f64 {
    lerp_k_table((c1 / c2).clamp(MIN_COLUMN_RATIO, MAX_COLUMN_RATIO))
}

/// Punching resistances (N/mm²), each rounded to 3 dp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PunchingResistances {
    /// Column face limit
    pub vrd_max: f64,
    /// 2d perimeter
    pub vrd_c: f64,
    /// 1d perimeter
    pub vrd_c_1d: f64,
    /// Mean bottom steel ratio √(ρx·ρy), capped at 0.02
    pub rho: f64,
    /// Size factor 1 + √(0.2/d) ≤ 2
    pub k: f64,
}

impl PunchingResistances {
    /// Resistances for a concrete class, the bottom steel ratios of both axes
    /// and the average effective depth (m).
    pub fn new(concrete: ConcreteClass, rho_x: f64, rho_y: f64, average_depth: f64) -> Self {
        let fck = concrete.fck();
        let vrd_max = round_to(0.5 * concrete.shear_strength_reduction() * concrete.design_strength(), 3);
        let rho = (rho_x * rho_y).sqrt().min(MAX_REINFORCEMENT_RATIO);
        let k = (1.0 + (0.2 / average_depth).sqrt()).min(2.0);
        let vrd_c = shear_resistance_stress(k, rho, fck);
        PunchingResistances {
            vrd_max,
            vrd_c,
            vrd_c_1d: vrd_c,
            rho,
            k,
        }
    }
}

/// Critical perimeter around a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PunchingPerimeter {
    ColumnFace,
    OneDepth,
    TwoDepths,
}

impl PunchingPerimeter {
    pub const ALL: [PunchingPerimeter; 3] = [
        PunchingPerimeter::ColumnFace,
        PunchingPerimeter::OneDepth,
        PunchingPerimeter::TwoDepths,
    ];

    /// Offset from the column face (m)
    pub fn offset(&self, average_depth: f64) -> f64 {
        match self {
            PunchingPerimeter::ColumnFace => 0.0,
            PunchingPerimeter::OneDepth => average_depth,
            PunchingPerimeter::TwoDepths => 2.0 * average_depth,
        }
    }

    /// Multiplier on the column moment term of the effective shear force
    pub fn moment_amplification(&self, single_column: bool) -> f64 {
        match self {
            PunchingPerimeter::TwoDepths if single_column => 2.0,
            _ => 1.0,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PunchingPerimeter::ColumnFace => "column face",
            PunchingPerimeter::OneDepth => "1d",
            PunchingPerimeter::TwoDepths => "2d",
        }
    }

    /// Resistance the stress on this perimeter is compared against
    pub fn resistance(&self, resistances: &PunchingResistances) -> f64 {
        match self {
            PunchingPerimeter::ColumnFace => resistances.vrd_max,
            PunchingPerimeter::OneDepth => resistances.vrd_c_1d,
            PunchingPerimeter::TwoDepths => resistances.vrd_c,
        }
    }
}

impl std::fmt::Display for PunchingPerimeter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Intermediate values of the stress on an offset perimeter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PunchingStress {
    /// m
    pub offset: f64,
    /// ULS base pressure under the perimeter (kN/m²)
    pub pressure: f64,
    /// Enclosed area (m²)
    pub area: f64,
    /// Perimeter length u (m)
    pub perimeter_length: f64,
    /// kN
    pub shear_force: f64,
    /// kN
    pub effective_shear_force: f64,
    pub beta: f64,
    /// N/mm²
    pub stress: f64,
}

/// Stress on one offset perimeter around one column, without checking
/// whether the perimeter applies.
pub fn punching_stress_at(
    analysis: &FootingAnalysis,
    column_index: usize,
    perimeter: PunchingPerimeter,
    average_depth: f64,
    beta_override: Option<f64>,
) -> CalcResult<PunchingStress> {
    let column = analysis.column(column_index)?;
    let offset = perimeter.offset(average_depth);
    let amplification = perimeter.moment_amplification(analysis.columns().len() == 1);
    let footing = analysis.footing();
    let factors = analysis.factors();
    let (length, width) = (footing.length, footing.width);
    let (c1, c2) = (column.geometry.length, column.geometry.width);

    let uls = analysis.resultant(LimitState::Ultimate);
    let lines = analysis.edge_line_loads();
    let cx = (lines.right - lines.left) / length;
    let cy = (lines.bottom - lines.top) / width;
    let ecc_x = column.geometry.x - length / 2.0;
    let ecc_y = column.geometry.y - width / 2.0;
    let pressure = uls.pressures.q1
        + (length / 2.0 + ecc_x - c1 / 2.0 - offset + 0.5 * (length + 2.0 * offset)) * cx / width
        - (width / 2.0 + ecc_y - c2 / 2.0 - offset + 0.5 * (width + 2.0 * offset)) * cy / length;

    let area = c1 * c2 + 2.0 * (c1 + c2) * offset + PI * offset * offset;
    let perimeter_length = 2.0 * (c1 + c2 + PI * offset);

    let f = |effect| column.combined(factors, LimitState::Ultimate, effect);
    let axial = f(LoadEffect::Axial);
    let moment_x = f(LoadEffect::MomentX);
    let moment_y = f(LoadEffect::MomentY);

    let self_weight = factors.permanent(LimitState::Ultimate) * analysis.self_weight().total();
    let shear_force = axial + (self_weight - pressure) * area;
    let effective_shear_force = shear_force + amplification * (moment_x.abs() * c2 + moment_y.abs() * c1);
    let stress = effective_shear_force * 1000.0 / (perimeter_length * average_depth * 1e6);

    let beta = if uls.is_concentric() {
        1.0
    } else {
        beta_override.unwrap_or_else(|| {
            let k = punching_k(c1, c2);
            let modulus = c1 * c2 + 2.0 * c2 * offset + 0.5 * c1 * c1 + 4.0 * offset * offset + PI * c1 * offset;
            1.0 + k * (moment_x + moment_y).abs() / effective_shear_force * perimeter_length / modulus
        })
    };

    Ok(PunchingStress {
        offset,
        pressure,
        area,
        perimeter_length,
        shear_force,
        effective_shear_force,
        beta,
        stress: beta * stress,
    })
}

/// Verdict for one column and perimeter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PunchingCheck {
    pub column: usize,
    pub perimeter: PunchingPerimeter,
    /// N/mm²
    pub stress: f64,
    /// N/mm²
    pub resistance: f64,
    pub beta: f64,
    pub verdict: CheckVerdict,
}

impl PunchingCheck {
    fn new(column: usize, perimeter: PunchingPerimeter, stress: f64, resistance: f64, beta: f64) -> Self {
        let verdict = CheckVerdict::within_limit(
            format!("Column {} punching shear at {}", column + 1, perimeter),
            stress,
            resistance,
            "N/mm²",
        );
        PunchingCheck {
            column,
            perimeter,
            stress,
            resistance,
            beta,
            verdict,
        }
    }
}

/// Column face check against v_Rd,max.
///
/// The stress is the ULS column load over the column perimeter, scaled by
/// an imposed β when one is given.
pub fn column_face_check(
    analysis: &FootingAnalysis,
    column_index: usize,
    average_depth: f64,
    resistances: &PunchingResistances,
    beta_override: Option<f64>,
) -> CalcResult<PunchingCheck> {
    let column = analysis.column(column_index)?;
    let axial = column.combined(analysis.factors(), LimitState::Ultimate, LoadEffect::Axial);
    let beta = beta_override.unwrap_or(1.0);
    let stress = beta * axial / (column.geometry.perimeter() * average_depth * 1000.0);
    Ok(PunchingCheck::new(column_index, PunchingPerimeter::ColumnFace, stress, resistances.vrd_max, beta))
}

/// Check one perimeter of one column.
///
/// Returns `Ok(None)` for an offset perimeter that is larger than the column
/// footprint in either direction.
pub fn check_perimeter(
    analysis: &FootingAnalysis,
    column_index: usize,
    perimeter: PunchingPerimeter,
    average_depth: f64,
    resistances: &PunchingResistances,
    beta_override: Option<f64>,
) -> CalcResult<Option<PunchingCheck>> {
    if perimeter == PunchingPerimeter::ColumnFace {
        return column_face_check(analysis, column_index, average_depth, resistances, beta_override).map(Some);
    }

    let column = analysis.column(column_index)?;
    let offset = perimeter.offset(average_depth);
    if offset > column.geometry.length || offset > column.geometry.width {
        tracing::debug!(column = column_index, %perimeter, offset, "perimeter exceeds the column footprint");
        return Ok(None);
    }
    let raw = punching_stress_at(analysis, column_index, perimeter, average_depth, beta_override)?;
    Ok(Some(PunchingCheck::new(
        column_index,
        perimeter,
        raw.stress,
        perimeter.resistance(resistances),
        raw.beta,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{ColumnGeometry, FootingGeometry};
    use crate::loads::{LoadVector, SelfWeight};

    fn pad() -> FootingAnalysis {
        let footing = FootingGeometry::from_mm(3600.0, 3000.0).unwrap();
        let mut analysis = FootingAnalysis::new(footing, 200.0).unwrap();
        let column = ColumnGeometry::from_mm(450.0, 450.0, 1800.0, 1500.0, &footing).unwrap();
        analysis.add_column(column).unwrap();
        analysis.set_self_weight(SelfWeight::from_mm(550.0, 0.0, 18.0, 24.0).unwrap()).unwrap();
        analysis.set_column_load(0, LoadEffect::Axial, LoadVector::new(770.0, 330.0, 0.0)).unwrap();
        analysis.set_column_load(0, LoadEffect::HorizontalX, LoadVector::new(35.0, 15.0, 0.0)).unwrap();
        analysis.set_column_load(0, LoadEffect::MomentX, LoadVector::new(78.0, 34.0, 0.0)).unwrap();
        analysis
    }

    fn resistances() -> PunchingResistances {
        PunchingResistances::new(ConcreteClass::new(30.0).unwrap(), 0.00196, 0.00152, 0.504)
    }

    #[test]
    fn test_k_table_interpolation() {
        assert!((interpolate_punching_k(0.5).unwrap() - 0.45).abs() < 1e-12);
        assert!((interpolate_punching_k(1.0).unwrap() - 0.6).abs() < 1e-12);
        assert!((interpolate_punching_k(2.5).unwrap() - 0.75).abs() < 1e-12);
        assert!((interpolate_punching_k(3.0).unwrap() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_k_table_out_of_domain() {
        let err = interpolate_punching_k(0.4).unwrap_err();
        assert_eq!(err.error_code(), "OUT_OF_DOMAIN");
        assert!(interpolate_punching_k(3.01).is_err());
    }

    #[test]
    fn test_clamped_k() {
        assert!((punching_k(0.2, 1.0) - 0.45).abs() < 1e-12);
        assert!((punching_k(2.0, 0.5) - 0.8).abs() < 1e-12);
        assert!((punching_k(0.45, 0.45) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_resistances() {
        let r = resistances();
        assert!((r.vrd_max - 4.488).abs() < 1e-12);
        assert!((r.vrd_c - 0.399).abs() < 1e-12);
        assert_eq!(r.vrd_c_1d, r.vrd_c);
    }

    #[test]
    fn test_column_face() {
        let analysis = pad();
        let check = check_perimeter(&analysis, 0, PunchingPerimeter::ColumnFace, 0.504, &resistances(), None)
            .unwrap()
            .unwrap();
        assert!((check.stress - 1.691468).abs() < 1e-5);
        assert!(check.verdict.passes);

        let with_beta = check_perimeter(&analysis, 0, PunchingPerimeter::ColumnFace, 0.504, &resistances(), Some(1.15))
            .unwrap()
            .unwrap();
        assert!((with_beta.stress - 1.15 * check.stress).abs() < 1e-9);
    }

    #[test]
    fn test_raw_one_depth() {
        let raw = punching_stress_at(&pad(), 0, PunchingPerimeter::OneDepth, 0.504, None).unwrap();
        assert!((raw.pressure - 186.189).abs() < 1e-3);
        assert!((raw.shear_force - 1213.300).abs() < 1e-3);
        assert!((raw.effective_shear_force - 1283.635).abs() < 1e-3);
        assert!((raw.stress - 0.5876415).abs() < 1e-6);
        assert!(raw.beta > 1.0);
    }

    #[test]
    fn test_raw_two_depths_doubles_pad_moments() {
        let raw = punching_stress_at(&pad(), 0, PunchingPerimeter::TwoDepths, 0.504, None).unwrap();
        assert!((raw.offset - 1.008).abs() < 1e-12);
        assert!((raw.shear_force - 657.473).abs() < 1e-3);
        // 657.473 + 2 × 156.3 × 0.45
        assert!((raw.effective_shear_force - 798.143).abs() < 1e-3);
        assert!((raw.stress - 0.2224751).abs() < 1e-6);
    }

    #[test]
    fn test_moment_amplification() {
        assert_eq!(PunchingPerimeter::TwoDepths.moment_amplification(true), 2.0);
        assert_eq!(PunchingPerimeter::TwoDepths.moment_amplification(false), 1.0);
        assert_eq!(PunchingPerimeter::OneDepth.moment_amplification(true), 1.0);
        assert_eq!(PunchingPerimeter::ColumnFace.moment_amplification(true), 1.0);
    }

    #[test]
    fn test_raw_two_depths_single_moments_on_combined() {
        let footing = FootingGeometry::from_mm(4600.0, 2300.0).unwrap();
        let mut analysis = FootingAnalysis::new(footing, 300.0).unwrap();
        for (size, x) in [(300.0, 540.0), (400.0, 3540.0)] {
            let column = ColumnGeometry::from_mm(size, size, x, 1145.0, &footing).unwrap();
            analysis.add_column(column).unwrap();
        }
        analysis.set_self_weight(SelfWeight::from_mm(850.0, 0.0, 18.0, 24.0).unwrap()).unwrap();
        analysis.set_column_load(0, LoadEffect::Axial, LoadVector::new(1000.0, 200.0, 0.0)).unwrap();
        analysis.set_column_load(1, LoadEffect::Axial, LoadVector::new(1400.0, 300.0, 0.0)).unwrap();
        analysis.set_column_load(0, LoadEffect::MomentX, LoadVector::new(40.0, 20.0, 0.0)).unwrap();
        analysis.set_column_load(0, LoadEffect::MomentY, LoadVector::new(10.0, 0.0, 0.0)).unwrap();

        let raw = punching_stress_at(&analysis, 0, PunchingPerimeter::TwoDepths, 0.4, None).unwrap();
        // 84 kN·m × 0.3 + 13.5 kN·m × 0.3, counted once
        let moment_term = 84.0 * 0.3 + 13.5 * 0.3;
        assert!((raw.effective_shear_force - raw.shear_force - moment_term).abs() < 1e-9);
        let one = punching_stress_at(&analysis, 0, PunchingPerimeter::OneDepth, 0.4, None).unwrap();
        assert!((one.effective_shear_force - one.shear_force - moment_term).abs() < 1e-9);
    }

    #[test]
    fn test_offset_larger_than_column_is_none() {
        let analysis = pad();
        for perimeter in [PunchingPerimeter::OneDepth, PunchingPerimeter::TwoDepths] {
            let check = check_perimeter(&analysis, 0, perimeter, 0.504, &resistances(), None).unwrap();
            assert!(check.is_none());
        }
    }

    #[test]
    fn test_beta_override_replaces_computed() {
        let raw = punching_stress_at(&pad(), 0, PunchingPerimeter::OneDepth, 0.504, Some(1.4)).unwrap();
        assert_eq!(raw.beta, 1.4);
        let plain = raw.effective_shear_force * 1000.0 / (raw.perimeter_length * 0.504 * 1e6);
        assert!((raw.stress - 1.4 * plain).abs() < 1e-12);
    }

    #[test]
    fn test_concentric_beta_is_one() {
        let mut analysis = pad();
        analysis.set_column_load(0, LoadEffect::HorizontalX, LoadVector::ZERO).unwrap();
        analysis.set_column_load(0, LoadEffect::MomentX, LoadVector::ZERO).unwrap();
        let raw = punching_stress_at(&analysis, 0, PunchingPerimeter::OneDepth, 0.504, Some(1.5)).unwrap();
        assert_eq!(raw.beta, 1.0);
    }

    #[test]
    fn test_applies_on_large_column() {
        let footing = FootingGeometry::from_mm(3000.0, 3000.0).unwrap();
        let mut analysis = FootingAnalysis::new(footing, 300.0).unwrap();
        let column = ColumnGeometry::from_mm(600.0, 600.0, 1500.0, 1500.0, &footing).unwrap();
        analysis.add_column(column).unwrap();
        analysis.set_self_weight(SelfWeight::from_mm(400.0, 0.0, 18.0, 24.0).unwrap()).unwrap();
        analysis.set_column_load(0, LoadEffect::Axial, LoadVector::new(800.0, 300.0, 0.0)).unwrap();

        let r = PunchingResistances::new(ConcreteClass::new(30.0).unwrap(), 0.002, 0.002, 0.354);
        let one = check_perimeter(&analysis, 0, PunchingPerimeter::OneDepth, 0.354, &r, None).unwrap();
        let two = check_perimeter(&analysis, 0, PunchingPerimeter::TwoDepths, 0.354, &r, None).unwrap();
        let one = one.unwrap();
        assert!(two.is_none());
        assert_eq!(one.beta, 1.0);
        assert!(one.stress > 0.0);
        assert_eq!(one.verdict.passes, one.stress <= r.vrd_c_1d);
    }
}
