//! # Casing Calculations
//!
//! Each calculation follows the same shape:
//!
//! - an input type (JSON-serializable)
//! - a result type (JSON-serializable)
//! - a pure function from one to the other
//!
//! ## Available Calculations
//!
//! - [`section`] - Cement, MASP, collapse, neutral point and tension for one section
//! - [`burst`] - MAPS and burst load between adjacent sections, or standalone
//!
//! Sequencing across a whole well is done by [`crate::well::Well::calculate`].

pub mod burst;
pub mod section;

pub use burst::{analyze_pair, compute_burst_load, compute_maps, compute_solo, BurstCheck, BurstInput};
pub use section::{calculate, RawSection, SectionInput, SectionMechanics};
