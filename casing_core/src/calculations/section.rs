//! # Per-Section Mechanical Calculation
//!
//! Turns one casing section's geometry, material, strength and mud data,
//! plus the well-wide parameters, into its cement, pressure and tension
//! results. Burst is handled separately in [`super::burst`] because it
//! depends on the next section down.
//!
//! ## Example
//!
//! ```rust
//! use casing_core::calculations::section::{calculate, SectionInput};
//! use casing_core::settings::CalcSettings;
//! use casing_core::well::WellParameters;
//!
//! let well = WellParameters::new(0.0, 12_000.0, 11_500.0).with_frac_gradient(0.8);
//! let input = SectionInput::example_intermediate();
//!
//! let result = calculate(&input, &well, &CalcSettings::default());
//! assert!(result.collapse_load > 0.0);
//! assert!(result.toc < input.bottom);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::casing as eq;
use crate::errors::{CalcError, CalcResult};
use crate::settings::CalcSettings;
use crate::units::{design_factor_nonzero, unbounded};
use crate::well::WellParameters;

/// A section record as handed over by a loader, before validation.
///
/// Every field is optional so that a partially filled record can be
/// reported in one go. [`RawSection::validate`] turns it into a
/// [`SectionInput`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSection {
    pub id: Option<String>,
    pub tvd: Option<f64>,
    pub od: Option<f64>,
    pub bottom: Option<f64>,
    pub casing_type: Option<String>,
    pub weight: Option<f64>,
    pub grade: Option<String>,
    pub connection: Option<String>,
    pub hole_size: Option<f64>,
    pub washout: Option<f64>,
    pub int_gradient: Option<f64>,
    pub mud_weight: Option<f64>,
    pub backup_mud: Option<f64>,
    pub cement_cu_ft: Option<f64>,
    pub body_yield: Option<f64>,
    pub burst_strength: Option<f64>,
    pub wall_thickness: Option<f64>,
    #[serde(alias = "csg_internal_diameter")]
    pub internal_diameter: Option<f64>,
    pub collapse_pressure: Option<f64>,
    pub tension_strength: Option<f64>,

    /// Requested top (bottom-up staging only)
    pub top: Option<f64>,
    /// Requested length (bottom-up staging only, wins over `top`)
    pub length: Option<f64>,
    /// Measured-depth top for liners
    pub md_top: Option<f64>,
    /// Measured-depth bottom for liners
    pub md_bottom: Option<f64>,
}

impl RawSection {
    /// Names of required fields that are absent, in declaration order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let checks = [
            ("id", self.id.is_none()),
            ("tvd", self.tvd.is_none()),
            ("od", self.od.is_none()),
            ("bottom", self.bottom.is_none()),
            ("casing_type", self.casing_type.is_none()),
            ("weight", self.weight.is_none()),
            ("grade", self.grade.is_none()),
            ("connection", self.connection.is_none()),
            ("hole_size", self.hole_size.is_none()),
            ("washout", self.washout.is_none()),
            ("int_gradient", self.int_gradient.is_none()),
            ("mud_weight", self.mud_weight.is_none()),
            ("backup_mud", self.backup_mud.is_none()),
            ("cement_cu_ft", self.cement_cu_ft.is_none()),
            ("body_yield", self.body_yield.is_none()),
            ("burst_strength", self.burst_strength.is_none()),
            ("wall_thickness", self.wall_thickness.is_none()),
            ("internal_diameter", self.internal_diameter.is_none()),
            ("collapse_pressure", self.collapse_pressure.is_none()),
            ("tension_strength", self.tension_strength.is_none()),
        ];
        checks
            .into_iter()
            .filter_map(|(name, missing)| missing.then_some(name))
            .collect()
    }

    /// Check that every required field is present.
    ///
    /// # Errors
    ///
    /// `CalcError::MissingFields` naming every absent field.
    pub fn validate(self) -> CalcResult<SectionInput> {
        let missing = self.missing_fields();
        let (
            Some(id),
            Some(tvd),
            Some(od),
            Some(bottom),
            Some(casing_type),
            Some(weight),
            Some(grade),
            Some(connection),
            Some(hole_size),
            Some(washout),
            Some(int_gradient),
            Some(mud_weight),
            Some(backup_mud),
            Some(cement_cu_ft),
            Some(body_yield),
            Some(burst_strength),
            Some(wall_thickness),
            Some(internal_diameter),
            Some(collapse_pressure),
            Some(tension_strength),
        ) = (
            self.id,
            self.tvd,
            self.od,
            self.bottom,
            self.casing_type,
            self.weight,
            self.grade,
            self.connection,
            self.hole_size,
            self.washout,
            self.int_gradient,
            self.mud_weight,
            self.backup_mud,
            self.cement_cu_ft,
            self.body_yield,
            self.burst_strength,
            self.wall_thickness,
            self.internal_diameter,
            self.collapse_pressure,
            self.tension_strength,
        )
        else {
            return Err(CalcError::missing_fields(missing));
        };

        Ok(SectionInput {
            id,
            casing_type,
            tvd,
            od,
            bottom,
            weight,
            grade,
            connection,
            hole_size,
            washout,
            int_gradient,
            mud_weight,
            backup_mud,
            cement_cu_ft,
            body_yield,
            burst_strength,
            wall_thickness,
            internal_diameter,
            collapse_pressure,
            tension_strength,
            top: self.top,
            length: self.length,
            md_top: self.md_top,
            md_bottom: self.md_bottom,
        })
    }
}

impl From<SectionInput> for RawSection {
    fn from(input: SectionInput) -> Self {
        RawSection {
            id: Some(input.id),
            tvd: Some(input.tvd),
            od: Some(input.od),
            bottom: Some(input.bottom),
            casing_type: Some(input.casing_type),
            weight: Some(input.weight),
            grade: Some(input.grade),
            connection: Some(input.connection),
            hole_size: Some(input.hole_size),
            washout: Some(input.washout),
            int_gradient: Some(input.int_gradient),
            mud_weight: Some(input.mud_weight),
            backup_mud: Some(input.backup_mud),
            cement_cu_ft: Some(input.cement_cu_ft),
            body_yield: Some(input.body_yield),
            burst_strength: Some(input.burst_strength),
            wall_thickness: Some(input.wall_thickness),
            internal_diameter: Some(input.internal_diameter),
            collapse_pressure: Some(input.collapse_pressure),
            tension_strength: Some(input.tension_strength),
            top: input.top,
            length: input.length,
            md_top: input.md_top,
            md_bottom: input.md_bottom,
        }
    }
}

/// Validated input for one casing section.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "2",
///   "casing_type": "intermediate",
///   "tvd": 9500.0,
///   "od": 9.625,
///   "bottom": 9800.0,
///   "weight": 47.0,
///   "grade": "N-80",
///   "connection": "BTC",
///   "hole_size": 12.25,
///   "washout": 10.0,
///   "int_gradient": 0.1,
///   "mud_weight": 10.5,
///   "backup_mud": 8.6,
///   "cement_cu_ft": 1500.0,
///   "body_yield": 1086.0,
///   "burst_strength": 6870.0,
///   "wall_thickness": 0.472,
///   "internal_diameter": 8.681,
///   "collapse_pressure": 4750.0,
///   "tension_strength": 1122.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionInput {
    /// Loader-assigned identifier
    pub id: String,
    /// Casing-type label (e.g. "surface", "intermediate", "production")
    pub casing_type: String,

    /// True vertical depth of the shoe (ft)
    pub tvd: f64,
    /// Outer diameter (in)
    pub od: f64,
    /// Set depth, measured depth of the shoe (ft)
    pub bottom: f64,
    /// Nominal weight (lb/ft)
    pub weight: f64,
    /// Steel grade (e.g. "N-80")
    pub grade: String,
    /// Connection type (e.g. "BTC")
    pub connection: String,
    /// Hole (bit) size (in)
    pub hole_size: f64,
    /// Hole washout (% of diameter)
    pub washout: f64,
    /// Internal pressure gradient (psi/ft)
    pub int_gradient: f64,
    /// Drilling mud weight (ppg)
    pub mud_weight: f64,
    /// Backup (annulus) mud weight (ppg)
    pub backup_mud: f64,
    /// Total cement volume, lead plus tail (ft³)
    pub cement_cu_ft: f64,
    /// Pipe body yield (kips)
    pub body_yield: f64,
    /// Rated internal yield / burst (psi)
    pub burst_strength: f64,
    /// Wall thickness (in)
    pub wall_thickness: f64,
    /// Internal diameter (in)
    pub internal_diameter: f64,
    /// Rated collapse resistance (psi)
    pub collapse_pressure: f64,
    /// Joint strength (kips)
    pub tension_strength: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md_top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md_bottom: Option<f64>,
}

impl SectionInput {
    /// A 9-5/8" 47# N-80 intermediate string at 9,800 ft, for docs and tests.
    pub fn example_intermediate() -> Self {
        SectionInput {
            id: "2".to_string(),
            casing_type: "intermediate".to_string(),
            tvd: 9500.0,
            od: 9.625,
            bottom: 9800.0,
            weight: 47.0,
            grade: "N-80".to_string(),
            connection: "BTC".to_string(),
            hole_size: 12.25,
            washout: 10.0,
            int_gradient: 0.1,
            mud_weight: 10.5,
            backup_mud: 8.6,
            cement_cu_ft: 1500.0,
            body_yield: 1086.0,
            burst_strength: 6870.0,
            wall_thickness: 0.472,
            internal_diameter: 8.681,
            collapse_pressure: 4750.0,
            tension_strength: 1122.0,
            top: None,
            length: None,
            md_top: None,
            md_bottom: None,
        }
    }
}

/// Results of the per-section calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionMechanics {
    /// Cement volume carried through from the input (ft³)
    pub cement_cu_ft: f64,
    /// Gross annular area per foot, no washout (ft²)
    pub annular_area: f64,
    /// Cement column height (ft)
    pub cement_height: f64,
    /// Top of cement (ft MD)
    pub toc: f64,
    /// Maximum anticipated surface pressure (psi)
    pub masp: f64,

    pub collapse_strength: f64,
    /// Evacuated-casing collapse load at the shoe (psi)
    pub collapse_load: f64,
    #[serde(with = "unbounded")]
    pub collapse_df: f64,

    pub burst_strength: f64,
    /// Barlow internal-yield pressure from wall and OD (psi)
    pub barlow_burst: f64,

    /// Neutral point depth (ft)
    pub neutral_point: f64,

    pub tension_strength: f64,
    #[serde(with = "unbounded")]
    pub tension_df: f64,
    /// Hook load in air (kips)
    pub tension_air: f64,
    /// Buoyed hook load (kips)
    pub tension_buoyed: f64,

    /// Fracture initiation pressure at the shoe (psi)
    pub frac_init_pressure: f64,
}

/// Run the per-section calculation.
///
/// Pure: depends only on its arguments. The section's `bottom` is taken as
/// the set depth, so callers pass the staged (boundary-derived) record.
pub fn calculate(input: &SectionInput, well: &WellParameters, settings: &CalcSettings) -> SectionMechanics {
    let set_depth = input.bottom;

    let frac_init_pressure = eq::frac_init_pressure_psi(well.frac_gradient, input.tvd);
    let annular_area = eq::annular_area_sq_ft(input.hole_size, input.od);
    let cement_height = eq::cement_height_ft(input.cement_cu_ft, input.hole_size, input.od, input.washout);
    let toc = eq::top_of_cement_ft(set_depth, cement_height);
    let masp = eq::masp_psi(input.tvd, input.mud_weight, input.int_gradient, settings.pore_gradient_psi_ft);

    let collapse_load = eq::collapse_load_psi(set_depth, input.mud_weight);
    let collapse_df = design_factor_nonzero(input.collapse_pressure, collapse_load);

    let neutral_point = eq::neutral_point_ft(input.tvd, input.mud_weight, settings.buoyancy_density_ppg);

    let tension_air = eq::tension_air_kips(input.weight, set_depth, well.tol, well.max_md_depth);
    let tension_buoyed = eq::tension_buoyed_kips(
        input.weight,
        set_depth,
        input.tvd,
        input.od,
        input.internal_diameter,
        input.mud_weight,
        well.tol,
        well.max_md_depth,
        well.max_tvd_depth,
    );
    let tension_df = design_factor_nonzero(input.tension_strength, tension_buoyed);

    SectionMechanics {
        cement_cu_ft: input.cement_cu_ft,
        annular_area,
        cement_height,
        toc,
        masp,
        collapse_strength: input.collapse_pressure,
        collapse_load,
        collapse_df,
        burst_strength: input.burst_strength,
        barlow_burst: eq::barlow_burst_psi(input.burst_strength, input.wall_thickness, input.od),
        neutral_point,
        tension_strength: input.tension_strength,
        tension_df,
        tension_air,
        tension_buoyed,
        frac_init_pressure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_well() -> WellParameters {
        WellParameters::new(0.0, 12_000.0, 11_500.0)
            .with_tol(9000.0)
            .with_frac_gradient(0.8)
    }

    #[test]
    fn test_validate_complete_record() {
        let raw = RawSection::from(SectionInput::example_intermediate());
        assert!(raw.missing_fields().is_empty());
        let input = raw.validate().unwrap();
        assert_eq!(input, SectionInput::example_intermediate());
    }

    #[test]
    fn test_validate_names_every_missing_field() {
        let mut raw = RawSection::from(SectionInput::example_intermediate());
        raw.tvd = None;
        raw.grade = None;
        raw.tension_strength = None;

        let err = raw.validate().unwrap_err();
        assert_eq!(
            err,
            CalcError::missing_fields(["tvd", "grade", "tension_strength"])
        );
    }

    #[test]
    fn test_empty_record_reports_all_twenty_fields() {
        match RawSection::default().validate() {
            Err(CalcError::MissingFields { fields }) => {
                assert_eq!(fields.len(), 20);
                assert_eq!(fields.first().map(String::as_str), Some("id"));
            }
            other => panic!("expected MissingFields, got {:?}", other),
        }
    }

    #[test]
    fn test_raw_accepts_legacy_internal_diameter_key() {
        let raw: RawSection = serde_json::from_str(r#"{"csg_internal_diameter": 8.681}"#).unwrap();
        assert_eq!(raw.internal_diameter, Some(8.681));
    }

    #[test]
    fn test_intermediate_results() {
        let input = SectionInput::example_intermediate();
        let r = calculate(&input, &test_well(), &CalcSettings::default());

        // 0.8 psi/ft × 9500 ft
        assert!((r.frac_init_pressure - 7600.0).abs() < 1e-9);

        // C = ((12.25 × 1.1)² − 9.625²) / 183.35 = 0.48506
        assert!((r.cement_height - 3092.4).abs() < 0.5);
        assert!((r.toc - (9800.0 - r.cement_height)).abs() < 1e-9);

        // 9800 × 10.5 × 0.052
        assert!((r.collapse_load - 5350.8).abs() < 1e-6);
        assert!((r.collapse_df - 4750.0 / 5350.8).abs() < 1e-9);

        // Not at TD: air weight hangs from surface
        assert!((r.tension_air - 460.6).abs() < 1e-9);
        assert!(r.tension_buoyed < r.tension_air);
        assert!((r.tension_df - 1122.0 / r.tension_buoyed).abs() < 1e-6);
    }

    #[test]
    fn test_neutral_point_default_density() {
        let mut input = SectionInput::example_intermediate();
        input.tvd = 10_000.0;
        input.mud_weight = 9.5;
        let r = calculate(&input, &test_well(), &CalcSettings::default());
        assert!((r.neutral_point - 8547.4).abs() < 1.0);
    }

    #[test]
    fn test_settings_change_masp_and_neutral_point() {
        let input = SectionInput::example_intermediate();
        let base = calculate(&input, &test_well(), &CalcSettings::default());
        let tuned = calculate(
            &input,
            &test_well(),
            &CalcSettings {
                pore_gradient_psi_ft: 0.9,
                buoyancy_density_ppg: 60.0,
            },
        );
        assert!(tuned.masp > base.masp);
        assert!(tuned.neutral_point < base.neutral_point);
    }

    #[test]
    fn test_zero_loads_give_infinite_design_factors() {
        let mut input = SectionInput::example_intermediate();
        input.mud_weight = 0.0;
        input.weight = 0.0;
        let r = calculate(&input, &test_well(), &CalcSettings::default());
        assert_eq!(r.collapse_load, 0.0);
        assert_eq!(r.collapse_df, f64::INFINITY);
        assert_eq!(r.tension_buoyed, 0.0);
        assert_eq!(r.tension_df, f64::INFINITY);
    }

    #[test]
    fn test_liner_at_td_hangs_from_tol() {
        let mut input = SectionInput::example_intermediate();
        input.bottom = 12_000.0;
        input.tvd = 11_500.0;
        input.weight = 29.0;
        let r = calculate(&input, &test_well(), &CalcSettings::default());
        // (12000 − 9000) × 29 / 1000, no buoyancy with TVD at max TVD
        assert!((r.tension_air - 87.0).abs() < 1e-9);
        assert!((r.tension_buoyed - 87.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_casing_means_no_cement_column() {
        let mut input = SectionInput::example_intermediate();
        input.od = 0.0;
        let r = calculate(&input, &test_well(), &CalcSettings::default());
        assert_eq!(r.cement_height, 0.0);
        assert_eq!(r.toc, input.bottom);
    }

    #[test]
    fn test_result_serializes_infinite_df_as_string() {
        let mut input = SectionInput::example_intermediate();
        input.mud_weight = 0.0;
        let r = calculate(&input, &test_well(), &CalcSettings::default());
        let json = serde_json::to_value(r).unwrap();
        assert_eq!(json["collapse_df"], "inf");
        let back: SectionMechanics = serde_json::from_value(json).unwrap();
        assert_eq!(back.collapse_df, f64::INFINITY);
    }
}
