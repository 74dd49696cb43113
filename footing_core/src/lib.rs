//! # footing_core - Eurocode Footing Design Engine
//!
//! `footing_core` designs concrete pad and combined two-column footings to
//! EN 1992-1-1. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Live object model**: set geometry and loads in any order; every derived
//!   value is recomputed from current state when asked for
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Verdicts are data**: a failing check is a result, not an error
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use footing_core::calculations::pad_footing::PadFoundation;
//! use footing_core::loads::LimitState;
//!
//! let mut pad = PadFoundation::new(3600.0, 3000.0, 450.0, 450.0, 1800.0, 1500.0, 200.0).unwrap();
//! pad.foundation_loads(550.0, 0.0, 18.0, 24.0).unwrap();
//! pad.column_axial_loads(770.0, 330.0, 0.0).unwrap();
//!
//! let q = pad.analysis().base_pressures(LimitState::Serviceability);
//! assert!(q.max() < 200.0);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Analysis, design and the footing types
//! - [`geometry`] - Footing and column geometry
//! - [`loads`] - Column load ledger, partial factors, self-weight
//! - [`materials`] - Concrete, reinforcement and design parameters
//! - [`project`] - Project container, metadata, and settings
//! - [`file_io`] - Atomic project saves and version checks
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod geometry;
pub mod loads;
pub mod materials;
pub mod project;
pub mod units;

mod validation;

// Re-export commonly used types at crate root for convenience
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_project, save_project};
pub use project::{FootingSettings, Project, ProjectMetadata};
