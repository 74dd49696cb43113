//! # Idealized Beam Solver
//!
//! One-dimensional beam analysis used to turn the base-pressure field of a
//! footing into bending moment and shear force along each plan axis.
//!
//! ## Method
//!
//! 1. Nodes are placed at both ends, every support, every point load and the
//!    ends of every distributed load
//! 2. Each element is an Euler-Bernoulli beam (two DOF per node: deflection,
//!    rotation) with uniform EI; EI cancels out of the reactions, so it is 1
//! 3. Distributed loads become consistent nodal forces, the restrained system
//!    is solved by Gaussian elimination and reactions recovered as `K·u - F`
//! 4. Shear and moment at any x follow from statics on the left free body
//!
//! ## Sign Convention
//!
//! - Loads and reactions: upward positive
//! - Bending moment: sagging positive (tension at the bottom face)
//! - Shear: sum of upward forces left of the section
//!
//! ## Example
//!
//! ```rust
//! use footing_core::calculations::beam_solver::{Beam, BeamLoad, SupportType};
//!
//! // 4 m simple span, 10 kN/m downward
//! let beam = Beam::new(4.0).unwrap()
//!     .with_support(0.0, SupportType::Pinned)
//!     .with_support(4.0, SupportType::Pinned)
//!     .with_load(BeamLoad::uniform(0.0, 4.0, -10.0));
//!
//! let solution = beam.solve().unwrap();
//! assert!((solution.moment_at(2.0) - 20.0).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::validation;

/// Nodes closer than this are merged (m)
const NODE_TOLERANCE: f64 = 1e-9;

/// Pivot magnitude, relative to the largest diagonal term, treated as singular
const SINGULAR_PIVOT_RATIO: f64 = 1e-12;

/// Sample count used for whole-beam extrema
const EXTREMA_SAMPLES: usize = 2000;

// =============================================================================
// SUPPORTS AND LOADS
// =============================================================================

/// Support condition at a point on the beam
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupportType {
    /// Restrains deflection only
    Pinned,
    /// Restrains deflection and rotation
    Fixed,
}

impl SupportType {
    pub fn restrains_rotation(&self) -> bool {
        matches!(self, SupportType::Fixed)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SupportType::Pinned => "Pinned",
            SupportType::Fixed => "Fixed",
        }
    }
}

impl std::fmt::Display for SupportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Support {
    /// Distance from the left end (m)
    pub position: f64,
    pub support_type: SupportType,
}

/// A load entry on the beam. Magnitudes are upward positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BeamLoad {
    /// Concentrated force (kN)
    Point { position: f64, force: f64 },
    /// Linearly varying line load (kN/m)
    Trapezoidal {
        start: f64,
        end: f64,
        start_intensity: f64,
        end_intensity: f64,
    },
}

impl BeamLoad {
    pub fn point(position: f64, force: f64) -> Self {
        BeamLoad::Point { position, force }
    }

    pub fn uniform(start: f64, end: f64, intensity: f64) -> Self {
        BeamLoad::trapezoidal(start, end, intensity, intensity)
    }

    pub fn trapezoidal(start: f64, end: f64, start_intensity: f64, end_intensity: f64) -> Self {
        BeamLoad::Trapezoidal {
            start,
            end,
            start_intensity,
            end_intensity,
        }
    }

    /// Resultant force of the load (kN)
    pub fn total_force(&self) -> f64 {
        match *self {
            BeamLoad::Point { force, .. } => force,
            BeamLoad::Trapezoidal {
                start,
                end,
                start_intensity,
                end_intensity,
            } => (start_intensity + end_intensity) / 2.0 * (end - start),
        }
    }

    fn validate(&self, length: f64) -> CalcResult<()> {
        match *self {
            BeamLoad::Point { position, force } => {
                validation::finite("point_load", force)?;
                validation::non_negative("point_load_position", position)?;
                validation::at_most("point_load_position", position, length)?;
            }
            BeamLoad::Trapezoidal {
                start,
                end,
                start_intensity,
                end_intensity,
            } => {
                validation::finite("load_start_intensity", start_intensity)?;
                validation::finite("load_end_intensity", end_intensity)?;
                validation::non_negative("load_start", start)?;
                validation::at_most("load_end", end, length)?;
                if end <= start {
                    return Err(CalcError::invalid_input(
                        "load_end",
                        end.to_string(),
                        "Distributed load must end after it starts",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Shear and moment contribution at `x` of the part of this load left of `x`
    fn left_effects(&self, x: f64) -> (f64, f64) {
        match *self {
            BeamLoad::Point { position, force } => {
                if position <= x + NODE_TOLERANCE {
                    (force, force * (x - position))
                } else {
                    (0.0, 0.0)
                }
            }
            BeamLoad::Trapezoidal {
                start,
                end,
                start_intensity,
                end_intensity,
            } => {
                if x <= start {
                    return (0.0, 0.0);
                }
                let slope = (end_intensity - start_intensity) / (end - start);
                let t = x.min(end) - start;
                let arm = x - start;
                let force = start_intensity * t + slope * t * t / 2.0;
                let moment = start_intensity * (arm * t - t * t / 2.0)
                    + slope * (arm * t * t / 2.0 - t * t * t / 3.0);
                (force, moment)
            }
        }
    }
}

// =============================================================================
// BEAM
// =============================================================================

/// A statically determinate or indeterminate beam ready to solve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beam {
    /// Total length (m)
    pub length: f64,
    pub supports: Vec<Support>,
    pub loads: Vec<BeamLoad>,
}

impl Beam {
    pub fn new(length: f64) -> CalcResult<Self> {
        validation::strictly_positive("beam_length", length)?;
        Ok(Beam {
            length,
            supports: Vec::new(),
            loads: Vec::new(),
        })
    }

    pub fn with_support(mut self, position: f64, support_type: SupportType) -> Self {
        self.add_support(position, support_type);
        self
    }

    pub fn with_load(mut self, load: BeamLoad) -> Self {
        self.loads.push(load);
        self
    }

    pub fn add_support(&mut self, position: f64, support_type: SupportType) {
        self.supports.push(Support {
            position,
            support_type,
        });
    }

    pub fn add_load(&mut self, load: BeamLoad) {
        self.loads.push(load);
    }

    pub fn validate(&self) -> CalcResult<()> {
        validation::strictly_positive("beam_length", self.length)?;
        if self.supports.is_empty() {
            return Err(CalcError::unstable("Beam has no supports"));
        }
        for support in &self.supports {
            validation::non_negative("support_position", support.position)?;
            validation::at_most("support_position", support.position, self.length)?;
        }
        for load in &self.loads {
            load.validate(self.length)?;
        }
        Ok(())
    }

    /// Sorted, de-duplicated node coordinates
    fn node_positions(&self) -> Vec<f64> {
        let mut xs = vec![0.0, self.length];
        xs.extend(self.supports.iter().map(|s| s.position));
        for load in &self.loads {
            match *load {
                BeamLoad::Point { position, .. } => xs.push(position),
                BeamLoad::Trapezoidal { start, end, .. } => {
                    xs.push(start);
                    xs.push(end);
                }
            }
        }
        xs.sort_by(|a, b| a.total_cmp(b));
        xs.dedup_by(|a, b| (*a - *b).abs() < NODE_TOLERANCE);
        xs
    }

    /// Solve for reactions.
    ///
    /// Returns [`CalcError::UnstableStructure`] when the supports do not
    /// prevent rigid-body motion (e.g. a single pin).
    pub fn solve(&self) -> CalcResult<BeamSolution> {
        self.validate()?;

        let nodes = self.node_positions();
        let n_dof = nodes.len() * 2;
        let node_index = |x: f64| -> CalcResult<usize> {
            nodes
                .iter()
                .position(|n| (n - x).abs() < NODE_TOLERANCE)
                .ok_or_else(|| CalcError::Internal {
                    message: format!("No beam node at x = {}", x),
                })
        };

        let mut stiffness = vec![vec![0.0; n_dof]; n_dof];
        let mut forces = vec![0.0; n_dof];

        for (e, pair) in nodes.windows(2).enumerate() {
            let (xa, xb) = (pair[0], pair[1]);
            let h = xb - xa;
            let k = element_stiffness(h);
            let dofs = [2 * e, 2 * e + 1, 2 * e + 2, 2 * e + 3];
            for (i, gi) in dofs.iter().enumerate() {
                for (j, gj) in dofs.iter().enumerate() {
                    stiffness[*gi][*gj] += k[i][j];
                }
            }

            for load in &self.loads {
                if let BeamLoad::Trapezoidal {
                    start,
                    end,
                    start_intensity,
                    end_intensity,
                } = *load
                {
                    if xa < start - NODE_TOLERANCE || xb > end + NODE_TOLERANCE {
                        continue;
                    }
                    let slope = (end_intensity - start_intensity) / (end - start);
                    let qa = start_intensity + slope * (xa - start);
                    let qb = start_intensity + slope * (xb - start);
                    forces[dofs[0]] += h * (7.0 * qa + 3.0 * qb) / 20.0;
                    forces[dofs[1]] += h * h * (3.0 * qa + 2.0 * qb) / 60.0;
                    forces[dofs[2]] += h * (3.0 * qa + 7.0 * qb) / 20.0;
                    forces[dofs[3]] -= h * h * (2.0 * qa + 3.0 * qb) / 60.0;
                }
            }
        }

        for load in &self.loads {
            if let BeamLoad::Point { position, force } = *load {
                forces[2 * node_index(position)?] += force;
            }
        }

        let mut restrained = vec![false; n_dof];
        for support in &self.supports {
            let node = node_index(support.position)?;
            restrained[2 * node] = true;
            if support.support_type.restrains_rotation() {
                restrained[2 * node + 1] = true;
            }
        }

        let free: Vec<usize> = (0..n_dof).filter(|d| !restrained[*d]).collect();
        let reduced_k: Vec<Vec<f64>> = free
            .iter()
            .map(|&i| free.iter().map(|&j| stiffness[i][j]).collect())
            .collect();
        let reduced_f: Vec<f64> = free.iter().map(|&i| forces[i]).collect();
        let reduced_u = solve_linear_system(reduced_k, reduced_f)?;

        let mut displacements = vec![0.0; n_dof];
        for (slot, dof) in free.iter().enumerate() {
            displacements[*dof] = reduced_u[slot];
        }

        let mut reactions: Vec<SupportReaction> = Vec::new();
        for support in &self.supports {
            let node = node_index(support.position)?;
            if reactions.iter().any(|r| (r.position - nodes[node]).abs() < NODE_TOLERANCE) {
                continue;
            }
            let residual = |dof: usize| -> f64 {
                let ku: f64 = (0..n_dof).map(|j| stiffness[dof][j] * displacements[j]).sum();
                ku - forces[dof]
            };
            let rotation_fixed = restrained[2 * node + 1];
            reactions.push(SupportReaction {
                position: nodes[node],
                force: residual(2 * node),
                moment: if rotation_fixed { residual(2 * node + 1) } else { 0.0 },
            });
        }

        let solution = BeamSolution {
            length: self.length,
            loads: self.loads.clone(),
            reactions,
        };
        tracing::debug!(
            length = self.length,
            supports = self.supports.len(),
            loads = self.loads.len(),
            "beam solved"
        );
        Ok(solution)
    }
}

/// Euler-Bernoulli element stiffness with EI = 1
fn element_stiffness(h: f64) -> [[f64; 4]; 4] {
    let c = 1.0 / (h * h * h);
    [
        [12.0 * c, 6.0 * h * c, -12.0 * c, 6.0 * h * c],
        [6.0 * h * c, 4.0 * h * h * c, -6.0 * h * c, 2.0 * h * h * c],
        [-12.0 * c, -6.0 * h * c, 12.0 * c, -6.0 * h * c],
        [6.0 * h * c, 2.0 * h * h * c, -6.0 * h * c, 4.0 * h * h * c],
    ]
}

/// Gaussian elimination with partial pivoting.
fn solve_linear_system(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> CalcResult<Vec<f64>> {
    let n = b.len();
    if n == 0 {
        return Ok(Vec::new());
    }
    let scale = (0..n).map(|i| a[i][i].abs()).fold(0.0f64, f64::max).max(1.0);

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);
        if a[pivot_row][col].abs() < SINGULAR_PIVOT_RATIO * scale {
            return Err(CalcError::unstable(
                "Supports do not restrain rigid-body motion of the beam",
            ));
        }
        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        for row in (col + 1)..n {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = ((row + 1)..n).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Ok(x)
}

// =============================================================================
// SOLUTION
// =============================================================================

/// Reaction at a support, upward force and counter-clockwise moment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupportReaction {
    pub position: f64,
    /// kN, upward positive
    pub force: f64,
    /// kN·m, counter-clockwise positive (zero at pins)
    pub moment: f64,
}

/// Solved beam exposing continuous shear and moment fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamSolution {
    pub length: f64,
    pub loads: Vec<BeamLoad>,
    pub reactions: Vec<SupportReaction>,
}

impl BeamSolution {
    /// Shear force at x (kN)
    pub fn shear_at(&self, x: f64) -> f64 {
        let applied: f64 = self.loads.iter().map(|l| l.left_effects(x).0).sum();
        let reacted: f64 = self
            .reactions
            .iter()
            .filter(|r| r.position <= x + NODE_TOLERANCE)
            .map(|r| r.force)
            .sum();
        applied + reacted
    }

    /// Bending moment at x (kN·m), sagging positive
    pub fn moment_at(&self, x: f64) -> f64 {
        let applied: f64 = self.loads.iter().map(|l| l.left_effects(x).1).sum();
        let reacted: f64 = self
            .reactions
            .iter()
            .filter(|r| r.position <= x + NODE_TOLERANCE)
            .map(|r| r.force * (x - r.position) - r.moment)
            .sum();
        applied + reacted
    }

    /// Sample positions over the whole beam, including every reaction point
    fn sample_positions(&self) -> Vec<f64> {
        let step = self.length / EXTREMA_SAMPLES as f64;
        let mut xs: Vec<f64> = (0..=EXTREMA_SAMPLES).map(|i| i as f64 * step).collect();
        xs.extend(self.reactions.iter().map(|r| r.position));
        xs
    }

    /// (minimum, maximum) bending moment over the beam
    pub fn moment_extrema(&self) -> (f64, f64) {
        self.sample_positions()
            .into_iter()
            .map(|x| self.moment_at(x))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), m| (lo.min(m), hi.max(m)))
    }

    /// Largest shear magnitude over the beam
    pub fn max_abs_shear(&self) -> f64 {
        self.sample_positions()
            .into_iter()
            .map(|x| self.shear_at(x).abs())
            .fold(0.0, f64::max)
    }

    /// Sum of reactions (kN)
    pub fn total_reaction(&self) -> f64 {
        self.reactions.iter().map(|r| r.force).sum()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_span_uniform() {
        let beam = Beam::new(4.0).unwrap()
            .with_support(0.0, SupportType::Pinned)
            .with_support(4.0, SupportType::Pinned)
            .with_load(BeamLoad::uniform(0.0, 4.0, -10.0));
        let s = beam.solve().unwrap();

        assert_eq!(s.reactions.len(), 2);
        assert!((s.reactions[0].force - 20.0).abs() < 1e-6);
        assert!((s.reactions[1].force - 20.0).abs() < 1e-6);
        assert!((s.moment_at(2.0) - 20.0).abs() < 1e-6);
        assert!(s.shear_at(2.0).abs() < 1e-6);
        assert!((s.shear_at(1.0) - 10.0).abs() < 1e-6);
        assert!((s.max_abs_shear() - 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_cantilever_tip_load() {
        let beam = Beam::new(3.0).unwrap()
            .with_support(0.0, SupportType::Fixed)
            .with_load(BeamLoad::point(3.0, -5.0));
        let s = beam.solve().unwrap();

        assert!((s.reactions[0].force - 5.0).abs() < 1e-6);
        assert!((s.reactions[0].moment - 15.0).abs() < 1e-6);
        assert!((s.moment_at(0.0) + 15.0).abs() < 1e-6);
        assert!((s.moment_at(1.5) + 7.5).abs() < 1e-6);
        assert!(s.moment_at(3.0).abs() < 1e-6);
    }

    #[test]
    fn test_centre_fixed_under_upward_pressure() {
        // Pad analogy: uniform upward pressure reacted by one central column
        let beam = Beam::new(3.6).unwrap()
            .with_support(1.8, SupportType::Fixed)
            .with_load(BeamLoad::uniform(0.0, 3.6, 100.0));
        let s = beam.solve().unwrap();

        assert!((s.total_reaction() + 360.0).abs() < 1e-6);
        assert!((s.moment_at(1.8) - 100.0 * 1.8 * 1.8 / 2.0).abs() < 1e-6);
        assert!((s.shear_at(1.0) - 100.0).abs() < 1e-6);
        assert!((s.shear_at(2.6) + 100.0).abs() < 1e-6);
        let (lo, hi) = s.moment_extrema();
        assert!(lo > -1e-6);
        assert!((hi - 162.0).abs() < 1e-6);
    }

    #[test]
    fn test_trapezoidal_cantilever() {
        // Linear load 0 -> 6 kN/m over a 3 m cantilever fixed at the right end
        let beam = Beam::new(3.0).unwrap()
            .with_support(3.0, SupportType::Fixed)
            .with_load(BeamLoad::trapezoidal(0.0, 3.0, 0.0, 6.0));
        let s = beam.solve().unwrap();

        // Resultant 9 kN acting 1 m from the support
        assert!((s.total_reaction() + 9.0).abs() < 1e-6);
        assert!((s.reactions[0].moment - 9.0).abs() < 1e-6);
        assert!((s.moment_at(2.9) - 2.9f64.powi(3) / 3.0).abs() < 1e-6);
        assert!((s.shear_at(1.5) - 2.25).abs() < 1e-6);
    }

    #[test]
    fn test_two_span_continuous() {
        // Equal spans, UDL: interior reaction 1.25 qL
        let beam = Beam::new(8.0).unwrap()
            .with_support(0.0, SupportType::Pinned)
            .with_support(4.0, SupportType::Pinned)
            .with_support(8.0, SupportType::Pinned)
            .with_load(BeamLoad::uniform(0.0, 8.0, -10.0));
        let s = beam.solve().unwrap();

        assert!((s.reactions[1].force - 50.0).abs() < 1e-6);
        assert!((s.reactions[0].force - 15.0).abs() < 1e-6);
        assert!((s.moment_at(4.0) + 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_combined_footing_equilibrium() {
        let beam = Beam::new(6.0).unwrap()
            .with_support(1.5, SupportType::Pinned)
            .with_support(4.5, SupportType::Pinned)
            .with_load(BeamLoad::trapezoidal(0.0, 6.0, 300.0, 400.0))
            .with_load(BeamLoad::uniform(0.0, 6.0, -50.0))
            .with_load(BeamLoad::point(1.5, -900.0))
            .with_load(BeamLoad::point(4.5, -900.0));
        let s = beam.solve().unwrap();

        let applied: f64 = s.loads.iter().map(|l| l.total_force()).sum();
        assert!((applied + s.total_reaction()).abs() < 1e-6);
        assert!(s.shear_at(6.0).abs() < 1e-6);
        assert!(s.moment_at(6.0).abs() < 1e-6);
    }

    #[test]
    fn test_single_pin_is_unstable() {
        let beam = Beam::new(4.0).unwrap()
            .with_support(2.0, SupportType::Pinned)
            .with_load(BeamLoad::uniform(0.0, 4.0, 10.0));
        match beam.solve() {
            Err(CalcError::UnstableStructure { .. }) => {}
            other => panic!("expected unstable structure, got {:?}", other),
        }
    }

    #[test]
    fn test_no_supports_rejected() {
        let beam = Beam::new(4.0).unwrap().with_load(BeamLoad::uniform(0.0, 4.0, 10.0));
        assert!(beam.solve().is_err());
    }

    #[test]
    fn test_load_outside_beam_rejected() {
        let beam = Beam::new(4.0).unwrap()
            .with_support(0.0, SupportType::Fixed)
            .with_load(BeamLoad::point(4.5, -1.0));
        assert!(matches!(beam.solve(), Err(CalcError::InvalidInput { .. })));
    }
}
