//! # Burst Formulas
//!
//! Pressure at a casing shoe when the next (deeper) hole section takes a
//! kick, and the resulting burst load on the casing above it.
//!
//! ```text
//!   ┌── upper casing shoe (TVD_u) ── MAPS acts here
//!   │
//!   │   open hole, next section, mud MW_l
//!   │
//!   └── lower section TD (TVD_l) ─── BHP = 0.05194806 × MW_l × TVD_l
//! ```
//!
//! The burst load is the larger of the plain mud differential and the
//! smaller of two ceilings (formation fracture, MAPS), each net of the
//! backup mud column behind the casing.

use crate::units::hydrostatic_psi;

/// Maximum anticipated pressure at the upper shoe (psi)
///
/// # Formula
/// MAPS = 0.05194806 × MW_l × TVD_l − (TVD_l − TVD_u) × g_i,l
///
/// # Example
/// ```rust
/// use casing_core::equations::burst::maps_at_shoe_psi;
///
/// let maps = maps_at_shoe_psi(5000.0, 15.0, 10_000.0, 0.1);
/// assert!((maps - 7292.2).abs() < 0.1);
/// ```
#[inline]
pub fn maps_at_shoe_psi(upper_tvd_ft: f64, lower_mud_weight_ppg: f64, lower_tvd_ft: f64, lower_int_gradient_psi_ft: f64) -> f64 {
    let next_bhp = hydrostatic_psi(lower_mud_weight_ppg, lower_tvd_ft);
    next_bhp - (lower_tvd_ft - upper_tvd_ft) * lower_int_gradient_psi_ft
}

/// Differential between the inside mud and the backup mud at the shoe (psi)
///
/// # Formula
/// ΔP = 0.05194806 × (MW − MW_backup) × TVD
#[inline]
pub fn mud_differential_psi(mud_weight_ppg: f64, backup_mud_ppg: f64, tvd_ft: f64) -> f64 {
    hydrostatic_psi(mud_weight_ppg - backup_mud_ppg, tvd_ft)
}

/// Fracture-limited burst ceiling (psi)
///
/// # Formula
/// P = P_frac − (TVD_ref − TVD_shoe) × g − 0.05194806 × MW_backup × TVD_shoe
///
/// The depth-differential term is carried as written in the reference
/// method. Callers currently pass the shoe depth as `reference_tvd_ft`, so
/// the term evaluates to zero.
#[inline]
pub fn fracture_ceiling_psi(
    frac_init_pressure_psi: f64,
    shoe_tvd_ft: f64,
    reference_tvd_ft: f64,
    gradient_psi_ft: f64,
    backup_mud_ppg: f64,
) -> f64 {
    frac_init_pressure_psi
        - (reference_tvd_ft - shoe_tvd_ft) * gradient_psi_ft
        - hydrostatic_psi(backup_mud_ppg, shoe_tvd_ft)
}

/// MAPS-limited burst ceiling (psi)
///
/// # Formula
/// P = MAPS − g × (TVD_ref − TVD_shoe) − 0.05194806 × MW_backup × TVD_shoe
///
/// Same depth-differential convention as [`fracture_ceiling_psi`].
#[inline]
pub fn maps_ceiling_psi(
    maps_psi: f64,
    shoe_tvd_ft: f64,
    reference_tvd_ft: f64,
    gradient_psi_ft: f64,
    backup_mud_ppg: f64,
) -> f64 {
    maps_psi
        - gradient_psi_ft * (reference_tvd_ft - shoe_tvd_ft)
        - hydrostatic_psi(backup_mud_ppg, shoe_tvd_ft)
}

/// Governing burst load (psi)
///
/// # Formula
/// P_burst = max(ΔP_mud, min(P_frac_ceiling, P_maps_ceiling))
#[inline]
pub fn burst_load_psi(mud_differential_psi: f64, fracture_ceiling_psi: f64, maps_ceiling_psi: f64) -> f64 {
    mud_differential_psi.max(fracture_ceiling_psi.min(maps_ceiling_psi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_without_gap_is_bottomhole_pressure() {
        let maps = maps_at_shoe_psi(10_000.0, 15.0, 10_000.0, 0.1);
        assert!((maps - 7792.21).abs() < 0.01);
    }

    #[test]
    fn test_zero_depth_differential_leaves_ceiling_unchanged() {
        let with_gradient = fracture_ceiling_psi(8000.0, 10_000.0, 10_000.0, 0.25, 8.6);
        let without = fracture_ceiling_psi(8000.0, 10_000.0, 10_000.0, 0.0, 8.6);
        assert_eq!(with_gradient, without);
        assert!((without - 3532.47).abs() < 0.01);
    }

    #[test]
    fn test_depth_differential_reduces_ceiling() {
        let ceiling = maps_ceiling_psi(7000.0, 5000.0, 6000.0, 0.1, 0.0);
        assert!((ceiling - 6900.0).abs() < 1e-9);
    }

    #[test]
    fn test_burst_load_three_way_pattern() {
        // min(3000, 2500) = 2500 beats the 1000 differential
        assert_eq!(burst_load_psi(1000.0, 3000.0, 2500.0), 2500.0);
        // Differential governs when both ceilings are lower
        assert_eq!(burst_load_psi(1000.0, 800.0, 900.0), 1000.0);
    }

    #[test]
    fn test_mud_differential() {
        let dp = mud_differential_psi(15.0, 8.6, 10_000.0);
        assert!((dp - 3324.68).abs() < 0.01);
    }
}
