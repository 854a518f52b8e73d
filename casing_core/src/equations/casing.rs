//! # Per-Section Casing Formulas
//!
//! Geometry, cement placement, pressure and axial-load formulas for a single
//! casing section.
//!
//! ## Notation
//!
//! - `OD` = Casing outer diameter (in)
//! - `ID` = Casing internal diameter (in)
//! - `H` = Hole (bit) size (in)
//! - `w` = Washout, percent enlargement of the hole diameter
//! - `MW` = Mud weight (ppg)
//! - `TVD` = True vertical depth of the shoe (ft)
//! - `D` = Set depth, measured depth of the shoe (ft)
//! - `g_i` = Internal (gas/evacuation) gradient (psi/ft)
//!
//! ## Reference Sketch
//!
//! ```text
//!          surface / hanger
//!      │  │               │  │
//!      │  │ ← casing (OD) │  │ ← hole (H, washed out by w%)
//!      │  │               │  │
//!      │▒▒│  TOC ─────────│▒▒│  ← top of cement
//!      │▒▒│               │▒▒│
//!      │▒▒│               │▒▒│  cement height
//!      └──┴── shoe (D, TVD)┴──┘
//! ```

use std::f64::consts::PI;

use crate::units::{
    hydrostatic_psi, inches_to_feet, ANNULAR_CAPACITY_DIVISOR, COLLAPSE_PPG_FACTOR, LB_PER_KIP,
};

// =============================================================================
// GEOMETRY AND CEMENT
// =============================================================================

/// Gross annular area between hole wall and casing, per foot of depth (ft²)
///
/// # Formula
/// A = π/4 × [(H/12)² − (OD/12)²]
///
/// # Example
/// ```rust
/// use casing_core::equations::casing::annular_area_sq_ft;
///
/// // 9-5/8" casing in a 12-1/4" hole
/// let area = annular_area_sq_ft(12.25, 9.625);
/// assert!((area - 0.3132).abs() < 0.001);
/// ```
#[inline]
pub fn annular_area_sq_ft(hole_size_in: f64, od_in: f64) -> f64 {
    let hole_area = PI * inches_to_feet(hole_size_in).powi(2) / 4.0;
    let casing_area = PI * inches_to_feet(od_in).powi(2) / 4.0;
    hole_area - casing_area
}

/// Annular capacity including washout (ft³/ft)
///
/// # Formula
/// C = [(H × (1 + w/100))² − OD²] / 183.35
#[inline]
pub fn annular_capacity_cu_ft_per_ft(hole_size_in: f64, od_in: f64, washout_pct: f64) -> f64 {
    let effective_hole = hole_size_in * (1.0 + washout_pct / 100.0);
    (effective_hole.powi(2) - od_in.powi(2)) / ANNULAR_CAPACITY_DIVISOR
}

/// Height of the cement column in the annulus (ft)
///
/// # Formula
/// h = V_cement / C
///
/// Returns 0 when there is no casing (OD ≤ 0) or no annulus to fill
/// (capacity ≤ 0).
#[inline]
pub fn cement_height_ft(cement_cu_ft: f64, hole_size_in: f64, od_in: f64, washout_pct: f64) -> f64 {
    if od_in <= 0.0 {
        return 0.0;
    }
    let capacity = annular_capacity_cu_ft_per_ft(hole_size_in, od_in, washout_pct);
    if capacity <= 0.0 {
        return 0.0;
    }
    cement_cu_ft / capacity
}

/// Top of cement measured from surface, floored at surface (ft)
#[inline]
pub fn top_of_cement_ft(set_depth_ft: f64, cement_height_ft: f64) -> f64 {
    (set_depth_ft - cement_height_ft).max(0.0)
}

// =============================================================================
// PRESSURES
// =============================================================================

/// Formation fracture initiation pressure at the shoe (psi)
///
/// # Formula
/// P_frac = FG × TVD
#[inline]
pub fn frac_init_pressure_psi(frac_gradient_psi_ft: f64, tvd_ft: f64) -> f64 {
    frac_gradient_psi_ft * tvd_ft
}

/// Maximum anticipated surface pressure (psi)
///
/// The larger of the pore-pressure and mud-hydrostatic kicks, each less an
/// internal gradient column, floored at zero.
///
/// # Formula
/// MASP = max(g_p × TVD − g_i × TVD, 0.05194806 × MW × TVD − g_i × TVD, 0)
#[inline]
pub fn masp_psi(tvd_ft: f64, mud_weight_ppg: f64, int_gradient_psi_ft: f64, pore_gradient_psi_ft: f64) -> f64 {
    let internal = int_gradient_psi_ft * tvd_ft;
    let from_pore = pore_gradient_psi_ft * tvd_ft - internal;
    let from_mud = hydrostatic_psi(mud_weight_ppg, tvd_ft) - internal;
    from_pore.max(from_mud).max(0.0)
}

/// Collapse load at the shoe assuming fully evacuated casing (psi)
///
/// # Formula
/// P_c = D × MW × 0.052 − 0
///
/// Uses the set (measured) depth, not TVD.
#[inline]
pub fn collapse_load_psi(set_depth_ft: f64, mud_weight_ppg: f64) -> f64 {
    let external = set_depth_ft * mud_weight_ppg * COLLAPSE_PPG_FACTOR;
    let internal = 0.0;
    external - internal
}

/// Barlow internal-yield pressure (psi)
///
/// # Formula
/// P = 2 × S × t / OD
///
/// Returns 0 for a non-positive OD.
#[inline]
pub fn barlow_burst_psi(strength_psi: f64, wall_thickness_in: f64, od_in: f64) -> f64 {
    if od_in <= 0.0 {
        return 0.0;
    }
    2.0 * strength_psi * wall_thickness_in / od_in
}

// =============================================================================
// AXIAL LOADS
// =============================================================================

/// Depth of the neutral point (ft)
///
/// # Formula
/// NP = TVD × (1 − MW / ρ_steel)
///
/// # Example
/// ```rust
/// use casing_core::equations::casing::neutral_point_ft;
///
/// let np = neutral_point_ft(10_000.0, 9.5, 65.4);
/// assert!((np - 8547.4).abs() < 1.0);
/// ```
#[inline]
pub fn neutral_point_ft(tvd_ft: f64, mud_weight_ppg: f64, buoyancy_density_ppg: f64) -> f64 {
    tvd_ft * (1.0 - mud_weight_ppg / buoyancy_density_ppg)
}

/// Steel cross-sectional area of the pipe body (in²)
///
/// # Formula
/// A_s = π/4 × (OD² − ID²)
#[inline]
pub fn steel_area_sq_in(od_in: f64, id_in: f64) -> f64 {
    PI / 4.0 * (od_in.powi(2) - id_in.powi(2))
}

/// Length of pipe hanging from the hanger (ft).
///
/// For the string set at total depth the hanging length runs from the top of
/// liner; otherwise the full set depth hangs from surface.
#[inline]
fn hanging_length_ft(set_depth_ft: f64, tol_ft: f64, max_md_ft: f64) -> f64 {
    if set_depth_ft == max_md_ft {
        (set_depth_ft - tol_ft).abs()
    } else {
        set_depth_ft
    }
}

/// Hook load in air (kips)
///
/// # Formula
/// T_air = w × L / 1000, where L is the hanging length
#[inline]
pub fn tension_air_kips(weight_lb_ft: f64, set_depth_ft: f64, tol_ft: f64, max_md_ft: f64) -> f64 {
    weight_lb_ft * hanging_length_ft(set_depth_ft, tol_ft, max_md_ft) / LB_PER_KIP
}

/// Buoyed hook load (kips)
///
/// # Formula
/// T_b = (w × L − P_shoe × A_s) / 1000
///
/// where `P_shoe` is the mud hydrostatic at the shoe. For the string set at
/// total depth the hydrostatic column is `|TVD − TVD_max|`.
#[allow(clippy::too_many_arguments)]
#[inline]
pub fn tension_buoyed_kips(
    weight_lb_ft: f64,
    set_depth_ft: f64,
    tvd_ft: f64,
    od_in: f64,
    id_in: f64,
    mud_weight_ppg: f64,
    tol_ft: f64,
    max_md_ft: f64,
    max_tvd_ft: f64,
) -> f64 {
    let steel_area = steel_area_sq_in(od_in, id_in);
    let buoyancy_column = if set_depth_ft == max_md_ft {
        (tvd_ft - max_tvd_ft).abs()
    } else {
        tvd_ft
    };
    let buoyancy = hydrostatic_psi(mud_weight_ppg, buoyancy_column);
    let weight = weight_lb_ft * hanging_length_ft(set_depth_ft, tol_ft, max_md_ft);
    (weight - buoyancy * steel_area) / LB_PER_KIP
}
