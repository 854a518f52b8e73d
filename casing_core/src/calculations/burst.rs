//! # Inter-Section Burst Analysis
//!
//! Burst on a casing string is driven by the section drilled below it: a
//! kick taken at the next section's depth pushes pressure up to this
//! section's shoe (MAPS). The deepest section has no neighbour below and is
//! checked against its own bottomhole pressure instead ("solo" mode).
//!
//! ## Example
//!
//! ```rust
//! use casing_core::calculations::burst::{compute_solo, BurstInput};
//!
//! let section = BurstInput {
//!     mud_weight: 15.0,
//!     backup_mud: 8.6,
//!     tvd: 10_000.0,
//!     frac_init_pressure: 8000.0,
//!     int_gradient: 0.1,
//!     burst_strength: 10_000.0,
//! };
//!
//! let check = compute_solo(&section);
//! assert!((check.maps - 7792.21).abs() < 0.01);
//! assert!(check.burst_df.is_finite());
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::section::{SectionInput, SectionMechanics};
use crate::equations::burst as eq;
use crate::units::{design_factor, hydrostatic_psi, unbounded};

/// The subset of a section's data that burst analysis needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BurstInput {
    /// Drilling mud weight (ppg)
    pub mud_weight: f64,
    /// Backup mud weight (ppg)
    pub backup_mud: f64,
    /// True vertical depth of the shoe (ft)
    pub tvd: f64,
    /// Fracture initiation pressure at the shoe (psi)
    pub frac_init_pressure: f64,
    /// Internal pressure gradient (psi/ft)
    pub int_gradient: f64,
    /// Rated burst strength (psi)
    pub burst_strength: f64,
}

impl BurstInput {
    /// Assemble from a section's input and its per-section results.
    pub fn from_section(input: &SectionInput, mechanics: &SectionMechanics) -> Self {
        BurstInput {
            mud_weight: input.mud_weight,
            backup_mud: input.backup_mud,
            tvd: input.tvd,
            frac_init_pressure: mechanics.frac_init_pressure,
            int_gradient: input.int_gradient,
            burst_strength: input.burst_strength,
        }
    }
}

/// Burst results for one section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BurstCheck {
    /// Maximum anticipated pressure at the shoe (psi)
    pub maps: f64,
    /// Governing burst load (psi)
    pub burst_load: f64,
    /// Burst design factor, `+∞` when the load is not positive
    #[serde(with = "unbounded")]
    pub burst_df: f64,
}

impl BurstCheck {
    fn new(maps: f64, burst_load: f64, burst_strength: f64) -> Self {
        BurstCheck {
            maps,
            burst_load,
            burst_df: design_factor(burst_strength, burst_load),
        }
    }
}

/// MAPS at `upper`'s shoe from a kick at `lower`'s depth (psi).
pub fn compute_maps(upper: &BurstInput, lower: &BurstInput) -> f64 {
    eq::maps_at_shoe_psi(upper.tvd, lower.mud_weight, lower.tvd, lower.int_gradient)
}

/// Burst load on `upper` given the MAPS from the section below (psi).
///
/// The fracture ceiling uses the lower section's internal gradient and the
/// MAPS ceiling the upper one's; both are applied over a zero depth span
/// (`upper.tvd` to `upper.tvd`).
pub fn compute_burst_load(upper: &BurstInput, lower: &BurstInput, maps: f64) -> f64 {
    let differential = eq::mud_differential_psi(upper.mud_weight, upper.backup_mud, upper.tvd);
    let fracture_ceiling = eq::fracture_ceiling_psi(
        upper.frac_init_pressure,
        upper.tvd,
        upper.tvd,
        lower.int_gradient,
        upper.backup_mud,
    );
    let maps_ceiling = eq::maps_ceiling_psi(maps, upper.tvd, upper.tvd, upper.int_gradient, upper.backup_mud);
    eq::burst_load_psi(differential, fracture_ceiling, maps_ceiling)
}

/// Full burst check for `upper` against the next section down.
pub fn analyze_pair(upper: &BurstInput, lower: &BurstInput) -> BurstCheck {
    let maps = compute_maps(upper, lower);
    let burst_load = compute_burst_load(upper, lower, maps);
    BurstCheck::new(maps, burst_load, upper.burst_strength)
}

/// Burst check for a section with no deeper neighbour.
pub fn compute_solo(section: &BurstInput) -> BurstCheck {
    let maps = hydrostatic_psi(section.mud_weight, section.tvd);
    let differential = eq::mud_differential_psi(section.mud_weight, section.backup_mud, section.tvd);
    let fracture_ceiling = eq::fracture_ceiling_psi(
        section.frac_init_pressure,
        section.tvd,
        section.tvd,
        0.0,
        section.backup_mud,
    );
    let maps_ceiling = eq::maps_ceiling_psi(
        maps,
        section.tvd,
        section.tvd,
        section.int_gradient,
        section.backup_mud,
    );
    let burst_load = eq::burst_load_psi(differential, fracture_ceiling, maps_ceiling);
    BurstCheck::new(maps, burst_load, section.burst_strength)
}
