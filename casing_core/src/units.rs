//! # Units and Conversion Factors
//!
//! casing_core works in oilfield units throughout:
//! - Depth: feet (ft), both measured (MD) and true vertical (TVD)
//! - Diameter: inches (in)
//! - Mud weight / density: pounds per gallon (ppg)
//! - Pressure: pounds per square inch (psi)
//! - Pressure gradient: psi per foot (psi/ft)
//! - Pipe weight: pounds per foot (lb/ft)
//! - Tension: kips (1000 lb)
//! - Cement volume: cubic feet (ft³)
//!
//! Values are plain `f64`; the field names carry the unit.
//!
//! ## Design Factor Sentinel
//!
//! A design factor with no effective load is `f64::INFINITY`. JSON has no
//! infinity, so fields holding a design factor serialize through
//! [`unbounded`], which writes `"inf"` and reads it back.
//!
//! ```rust
//! use casing_core::units::{design_factor, PPG_TO_PSI_PER_FT};
//!
//! let hydrostatic = PPG_TO_PSI_PER_FT * 10.0 * 1000.0;
//! assert!((hydrostatic - 519.48).abs() < 0.01);
//!
//! assert_eq!(design_factor(7000.0, 0.0), f64::INFINITY);
//! assert!((design_factor(7000.0, 3500.0) - 2.0).abs() < 1e-12);
//! ```

use serde::{Deserialize, Deserializer, Serializer};

/// Hydrostatic gradient of 1 ppg fluid (psi/ft); 1 / 19.25
pub const PPG_TO_PSI_PER_FT: f64 = 0.05194806;

/// Rounded hydrostatic factor used for the collapse load (psi/ft per ppg)
pub const COLLAPSE_PPG_FACTOR: f64 = 0.052;

/// Annular capacity divisor: (D² - d²) / 183.35 gives ft³/ft with D, d in inches
pub const ANNULAR_CAPACITY_DIVISOR: f64 = 183.35;

/// Inches per foot
pub const INCHES_PER_FOOT: f64 = 12.0;

/// Pounds per kip
pub const LB_PER_KIP: f64 = 1000.0;

/// Default pore-pressure gradient (psi/ft), normally pressured formation
pub const DEFAULT_PORE_GRADIENT: f64 = 0.465;

/// Default reference density for buoyancy (ppg), density of steel
pub const DEFAULT_BUOYANCY_DENSITY: f64 = 65.4;

/// Hydrostatic pressure (psi) of a `mud_weight_ppg` column at `tvd_ft`
#[inline]
pub fn hydrostatic_psi(mud_weight_ppg: f64, tvd_ft: f64) -> f64 {
    PPG_TO_PSI_PER_FT * mud_weight_ppg * tvd_ft
}

/// Convert inches to feet
#[inline]
pub fn inches_to_feet(inches: f64) -> f64 {
    inches / INCHES_PER_FOOT
}

/// Ratio `strength / load`, or `f64::INFINITY` when the load is not positive.
///
/// Collapse and tension factors in the reference method only guard against
/// an exactly zero load; see [`design_factor_nonzero`].
#[inline]
pub fn design_factor(strength: f64, load: f64) -> f64 {
    if load > 0.0 {
        strength / load
    } else {
        f64::INFINITY
    }
}

/// Ratio `strength / load`, or `f64::INFINITY` when the load is exactly zero.
///
/// A negative load (e.g. buoyed tension below the neutral point) still
/// yields a negative ratio.
#[inline]
pub fn design_factor_nonzero(strength: f64, load: f64) -> f64 {
    if load != 0.0 {
        strength / load
    } else {
        f64::INFINITY
    }
}

/// Serde adapter for design factors: `+∞` <-> `"inf"`.
pub mod unbounded {
    use super::*;
    use serde::de::Error as _;

    const INF: &str = "inf";

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if *value == f64::INFINITY {
            serializer.serialize_str(INF)
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(v) => Ok(v),
            Repr::Text(text) if text == INF => Ok(f64::INFINITY),
            Repr::Text(text) => Err(D::Error::custom(format!(
                "expected a number or \"{INF}\", got \"{text}\""
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Check {
        #[serde(with = "unbounded")]
        df: f64,
    }

    #[test]
    fn test_hydrostatic() {
        // 15 ppg at 10,000 ft
        assert!((hydrostatic_psi(15.0, 10_000.0) - 7792.209).abs() < 0.001);
    }

    #[test]
    fn test_design_factor_guards() {
        assert_eq!(design_factor(100.0, 0.0), f64::INFINITY);
        assert_eq!(design_factor(100.0, -5.0), f64::INFINITY);
        assert_eq!(design_factor_nonzero(100.0, 0.0), f64::INFINITY);
        assert!((design_factor_nonzero(100.0, -50.0) + 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_unbounded_writes_inf_string() {
        let json = serde_json::to_string(&Check { df: f64::INFINITY }).unwrap();
        assert_eq!(json, r#"{"df":"inf"}"#);
        let back: Check = serde_json::from_str(&json).unwrap();
        assert_eq!(back.df, f64::INFINITY);
    }

    #[test]
    fn test_unbounded_finite_and_rejects_garbage() {
        let back: Check = serde_json::from_str(r#"{"df":1.25}"#).unwrap();
        assert_eq!(back.df, 1.25);
        assert!(serde_json::from_str::<Check>(r#"{"df":"nan"}"#).is_err());
    }
}
