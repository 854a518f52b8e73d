//! # casing_core - Casing Design Verification Engine
//!
//! `casing_core` checks a proposed oil-well casing program before drilling:
//! burst, collapse and tension design factors, cement placement, and
//! maximum anticipated pressures, from standard hydrostatic and pipe
//! strength formulas. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Pure calculations**: per-section and burst results are plain functions
//! - **Owned assembly**: a [`Well`] owns its section chain and runs the pass once
//! - **Rich Errors**: missing fields are reported together, by name
//! - **No surprises**: a design factor with no load is `+∞`, never an error
//!
//! ## Quick Start
//!
//! ```rust
//! use casing_core::program::CasingProgram;
//!
//! let program = CasingProgram::example();
//! let design = program.build_well().unwrap().calculate().unwrap();
//!
//! let surface = design.get("surface").unwrap();
//! println!("Surface collapse DF: {:.2}", surface.mechanics.collapse_df);
//!
//! let json = serde_json::to_string_pretty(&design).unwrap();
//! assert!(json.contains("\"surface\""));
//! ```
//!
//! ## Modules
//!
//! - [`well`] - Well bounds, build method and section assembly
//! - [`calculations`] - Per-section and inter-section (burst) calculations
//! - [`design`] - Label-keyed results table
//! - [`equations`] - Casing design formulas
//! - [`program`] - Casing program file model
//! - [`settings`] - Tunable calculation constants
//! - [`units`] - Unit conversion factors and the design-factor sentinel
//! - [`errors`] - Structured error types
//! - [`file_io`] - Atomic file saves and schema checks

pub mod calculations;
pub mod design;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod program;
pub mod settings;
pub mod units;
pub mod well;

// Re-export commonly used types at crate root for convenience
pub use calculations::{RawSection, SectionInput};
pub use design::{CasingDesign, CheckKind, DesignedSection, GoverningCheck};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_program, save_design, save_program};
pub use program::{CasingProgram, SectionRecord};
pub use settings::CalcSettings;
pub use well::{BuildMethod, Section, SectionCollection, Well, WellParameters};
