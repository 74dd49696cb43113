//! # Geometry Optimizer
//!
//! Grid searches that suggest a footing size or column layout. They are
//! independent of the design pipeline and never mutate the analysis they
//! are given: each trial runs on a moved copy.
//!
//! Every search takes a [`CancellationToken`] and checks it once per trial.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

use super::analysis::FootingAnalysis;
use super::base_pressure::{self, peak_pressure};
use crate::errors::{CalcError, CalcResult};
use crate::geometry::FootingGeometry;
use crate::loads::{LimitState, LoadEffect};
use crate::units::round_to;

/// Reported when a search exhausts its range
pub const NOT_OPTIMIZABLE: &str = "The geometry cannot be optimized by this algorithm.";

/// Square trial sizes start here (m)
const AREA_SEARCH_START: f64 = 1.0;

/// Square trial size increment (m)
const AREA_SEARCH_STEP: f64 = 0.05;

/// Column position increment (m)
const POSITION_SEARCH_STEP: f64 = 0.005;

/// Pressure band below the bearing capacity an accepted size must fall in (kN/m²)
const PRESSURE_BAND: f64 = 10.0;

/// Cooperative stop flag for long searches.
#[derive(Debug, Default)]
pub struct CancellationToken {
    cancelled: AtomicBool,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Result of a grid search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "value")]
pub enum OptimizationOutcome<T> {
    Found(T),
    NotFound,
    Cancelled,
}

impl<T> OptimizationOutcome<T> {
    pub fn found(self) -> Option<T> {
        match self {
            OptimizationOutcome::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            OptimizationOutcome::Found(_) => None,
            OptimizationOutcome::NotFound => Some(NOT_OPTIMIZABLE),
            OptimizationOutcome::Cancelled => Some("The search was cancelled."),
        }
    }
}

/// How columns sit on a square trial footing of side `x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TrialLayout {
    /// One column at the centre
    Centred,
    /// Two columns `spacing` apart along X, symmetric about the centre
    Symmetric { spacing: f64 },
}

impl TrialLayout {
    /// Exclusive upper bound on the trial side (m)
    pub fn search_limit(&self) -> f64 {
        match self {
            TrialLayout::Centred => 20.5,
            TrialLayout::Symmetric { .. } => 40.5,
        }
    }

    fn positions(&self, side: f64) -> Vec<(f64, f64)> {
        match *self {
            TrialLayout::Centred => vec![(side / 2.0, side / 2.0)],
            TrialLayout::Symmetric { spacing } => {
                let x1 = (side - spacing) / 2.0;
                vec![(x1, side / 2.0), (x1 + spacing, side / 2.0)]
            }
        }
    }
}

fn grid(start: f64, step: f64, limit: f64) -> impl Iterator<Item = f64> {
    (0u32..)
        .map(move |i| start + f64::from(i) * step)
        .take_while(move |v| *v < limit)
}

fn report<T: std::fmt::Debug>(search: &str, outcome: &OptimizationOutcome<T>) {
    match outcome {
        OptimizationOutcome::Found(value) => tracing::debug!(search, ?value, "optimizer found a candidate"),
        OptimizationOutcome::NotFound => tracing::warn!(search, "{}", NOT_OPTIMIZABLE),
        OptimizationOutcome::Cancelled => tracing::warn!(search, "optimizer cancelled"),
    }
}

/// Smallest square footing whose SLS peak pressure lands in
/// `[q − 10, q)`, with the loads and self-weight of `analysis`.
///
/// Returns the plan area (m²) to 3 dp.
pub fn minimum_area_with_moment(
    analysis: &FootingAnalysis,
    layout: TrialLayout,
    cancel: &CancellationToken,
) -> OptimizationOutcome<f64> {
    let capacity = analysis.bearing_capacity();
    let mut outcome = OptimizationOutcome::NotFound;

    for side in grid(AREA_SEARCH_START, AREA_SEARCH_STEP, layout.search_limit()) {
        if cancel.is_cancelled() {
            outcome = OptimizationOutcome::Cancelled;
            break;
        }
        let side = round_to(side, 3);
        let footing = FootingGeometry {
            length: side,
            width: side,
        };
        let trial = analysis.with_layout(footing, &layout.positions(side));
        let totals = trial.raw_totals(LimitState::Serviceability);
        let (ex, ey) = totals.eccentricities(&footing);
        let pressure = peak_pressure(totals.force_z, ex, ey, side, side);
        if (capacity - PRESSURE_BAND..capacity).contains(&pressure) {
            outcome = OptimizationOutcome::Found(round_to(side * side, 3));
            break;
        }
    }

    report("minimum area with moment", &outcome);
    outcome
}

/// Plan area that keeps the mean SLS pressure at the bearing capacity,
/// ignoring moments: `ΣN / (q − w)`, to 3 dp.
pub fn minimum_area_without_moment(analysis: &FootingAnalysis) -> CalcResult<f64> {
    let self_weight = analysis.self_weight().total();
    let net = analysis.bearing_capacity() - self_weight;
    if net <= 0.0 {
        return Err(CalcError::calculation_failed(
            "Minimum area",
            format!(
                "bearing capacity {} kN/m² does not exceed the self-weight pressure {} kN/m²",
                analysis.bearing_capacity(),
                self_weight
            ),
        ));
    }
    let axial: f64 = analysis
        .columns()
        .iter()
        .map(|c| c.combined(analysis.factors(), LimitState::Serviceability, LoadEffect::Axial))
        .sum();
    Ok(round_to(axial / net, 3))
}

/// Suggested positions of a two-column layout (m, 4 dp).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnLayout {
    pub column_1_x: f64,
    pub column_2_x: f64,
    /// Shared by both columns
    pub y: f64,
}

/// Slide two columns `spacing` apart across a fixed footing.
///
/// Picks the largest column 1 position that keeps the SLS eccentricity along
/// X negative, then the largest shared Y position that keeps it negative
/// along Y.
pub fn optimize_column_positions(
    analysis: &FootingAnalysis,
    spacing: f64,
    cancel: &CancellationToken,
) -> OptimizationOutcome<ColumnLayout> {
    let outcome = search_column_positions(analysis, spacing, cancel);
    report("column positions", &outcome);
    outcome
}

fn search_column_positions(
    analysis: &FootingAnalysis,
    spacing: f64,
    cancel: &CancellationToken,
) -> OptimizationOutcome<ColumnLayout> {
    let footing = *analysis.footing();
    let current_y: Vec<f64> = analysis.columns().iter().map(|c| c.geometry.y).collect();
    let y1 = current_y.first().copied().unwrap_or(footing.width / 2.0);
    let y2 = current_y.get(1).copied().unwrap_or(y1);

    let mut best_x = None;
    for x1 in grid(0.0, POSITION_SEARCH_STEP, footing.length - spacing) {
        if cancel.is_cancelled() {
            return OptimizationOutcome::Cancelled;
        }
        let trial = analysis.with_layout(footing, &[(x1, y1), (x1 + spacing, y2)]);
        let totals = trial.raw_totals(LimitState::Serviceability);
        if base_pressure::eccentricity(totals.moment_x, totals.force_z, footing.length) < 0.0 {
            best_x = Some(x1);
        }
    }
    let Some(x1) = best_x else {
        return OptimizationOutcome::NotFound;
    };
    let x2 = x1 + spacing;

    let mut best_y = None;
    for y in grid(0.0, POSITION_SEARCH_STEP, footing.width) {
        if cancel.is_cancelled() {
            return OptimizationOutcome::Cancelled;
        }
        let trial = analysis.with_layout(footing, &[(x1, y), (x2, y)]);
        let totals = trial.raw_totals(LimitState::Serviceability);
        if base_pressure::eccentricity(totals.moment_y, totals.force_z, footing.width) < 0.0 {
            best_y = Some(y);
        }
    }
    match best_y {
        Some(y) => OptimizationOutcome::Found(ColumnLayout {
            column_1_x: round_to(x1, 4),
            column_2_x: round_to(x2, 4),
            y: round_to(y, 4),
        }),
        None => OptimizationOutcome::NotFound,
    }
}
