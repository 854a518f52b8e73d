//! # Casing Design Equations
//!
//! All petroleum-engineering formulas used by the calculators live here, as
//! plain `f64` functions. Keeping them in one place makes them easy to check
//! against a hand calculation and keeps the calculators free of arithmetic
//! details.
//!
//! ## Modules
//!
//! - [`casing`] - Per-section geometry, cement, collapse and tension formulas
//! - [`burst`] - Shoe pressure (MAPS) and burst-load formulas
//!
//! ## Conventions
//!
//! - Depths in feet, diameters in inches, mud weights in ppg
//! - Pressures in psi, positive when acting outward (burst) or inward (collapse)
//! - Tensions in kips, positive in tension
//!
//! ## References
//!
//! - API TR 5C3: Calculating Performance Properties of Pipe Used as Casing or Tubing
//! - Bourgoyne et al., Applied Drilling Engineering, Chapter 7

pub mod burst;
pub mod casing;

pub use casing::{
    annular_area_sq_ft,
    annular_capacity_cu_ft_per_ft,
    barlow_burst_psi,
    cement_height_ft,
    collapse_load_psi,
    frac_init_pressure_psi,
    masp_psi,
    neutral_point_ft,
    steel_area_sq_in,
    tension_air_kips,
    tension_buoyed_kips,
    top_of_cement_ft,
};

pub use burst::{
    burst_load_psi,
    fracture_ceiling_psi,
    maps_ceiling_psi,
    maps_at_shoe_psi,
    mud_differential_psi,
};
