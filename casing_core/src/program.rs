//! # Casing Program Files
//!
//! A [`CasingProgram`] is the on-disk description of a planned well: bounds,
//! build method, settings and one record per casing string. It serializes
//! to `.csg` files as human-readable JSON (see [`crate::file_io`]).
//!
//! ## Structure
//!
//! ```text
//! CasingProgram
//! ├── meta: ProgramMetadata (schema version, well name, engineer, timestamps)
//! ├── well: WellParameters
//! ├── method: BuildMethod
//! ├── settings: CalcSettings
//! └── sections: Vec<SectionRecord> (raw section fields + cement slurries)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use casing_core::program::CasingProgram;
//!
//! let program = CasingProgram::example();
//! let well = program.build_well().unwrap();
//! assert!(well.is_complete());
//!
//! let design = well.calculate().unwrap();
//! let labels: Vec<_> = design.labels().collect();
//! assert_eq!(labels, ["surface", "intermediate", "production"]);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::section::{RawSection, SectionInput};
use crate::errors::CalcResult;
use crate::settings::CalcSettings;
use crate::well::{BuildMethod, Well, WellParameters};

/// Current schema version for .csg files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root container of a casing program file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CasingProgram {
    pub meta: ProgramMetadata,

    pub well: WellParameters,

    #[serde(default)]
    pub method: BuildMethod,

    #[serde(default)]
    pub settings: CalcSettings,

    /// Section records in staging order
    #[serde(default)]
    pub sections: Vec<SectionRecord>,
}

/// Program metadata stored in the file header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Well name (e.g. "Wellbore (Planned)")
    pub well_name: String,

    /// Responsible engineer
    #[serde(default)]
    pub engineer: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

/// One casing string as stored in a program file.
///
/// Cement volume may be given directly as `cement_cu_ft`, or as lead and
/// tail slurries: `lead_qty × lead_yield + tail_qty × tail_yield` (sacks ×
/// ft³/sack).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionRecord {
    #[serde(flatten)]
    pub raw: RawSection,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_qty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_yield: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tail_qty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tail_yield: Option<f64>,
}

impl SectionRecord {
    pub fn new(raw: RawSection) -> Self {
        SectionRecord {
            raw,
            ..Default::default()
        }
    }

    /// Attach lead and tail slurries (sacks, ft³/sack).
    pub fn with_slurries(mut self, lead: (f64, f64), tail: (f64, f64)) -> Self {
        self.lead_qty = Some(lead.0);
        self.lead_yield = Some(lead.1);
        self.tail_qty = Some(tail.0);
        self.tail_yield = Some(tail.1);
        self
    }

    /// Cement volume (ft³): the direct value if given, else the slurry sum.
    ///
    /// A slurry contributes only when both its quantity and yield are set.
    /// `None` when neither a direct value nor any slurry is available.
    pub fn cement_volume(&self) -> Option<f64> {
        if let Some(direct) = self.raw.cement_cu_ft {
            return Some(direct);
        }
        let lead = self.lead_qty.zip(self.lead_yield).map(|(q, y)| q * y);
        let tail = self.tail_qty.zip(self.tail_yield).map(|(q, y)| q * y);
        match (lead, tail) {
            (None, None) => None,
            (lead, tail) => Some(lead.unwrap_or(0.0) + tail.unwrap_or(0.0)),
        }
    }

    /// The raw record handed to the well, with cement volume resolved and
    /// the list position used as id when none is set.
    pub fn to_raw(&self, position: usize) -> RawSection {
        let mut raw = self.raw.clone();
        raw.cement_cu_ft = self.cement_volume();
        if raw.id.is_none() {
            raw.id = Some(position.to_string());
        }
        raw
    }
}

impl CasingProgram {
    /// Create an empty program.
    pub fn new(well_name: impl Into<String>, engineer: impl Into<String>, well: WellParameters, method: BuildMethod) -> Self {
        let now = Utc::now();
        CasingProgram {
            meta: ProgramMetadata {
                version: SCHEMA_VERSION.to_string(),
                well_name: well_name.into(),
                engineer: engineer.into(),
                created: now,
                modified: now,
            },
            well,
            method,
            settings: CalcSettings::default(),
            sections: Vec::new(),
        }
    }

    /// Append a section record.
    pub fn add_section(&mut self, record: SectionRecord) {
        self.sections.push(record);
        self.touch();
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Create the well and stage every section in file order.
    ///
    /// # Errors
    ///
    /// Any bound, settings or missing-field error from the well.
    pub fn build_well(&self) -> CalcResult<Well> {
        let mut well = Well::new(self.well, self.method)?.with_settings(self.settings)?;
        for (position, record) in self.sections.iter().enumerate() {
            debug!(position, well = %self.meta.well_name, "staging program section");
            well.add_section(record.to_raw(position))?;
        }
        Ok(well)
    }

    /// A three-string vertical well used by the CLI demo and tests.
    pub fn example() -> Self {
        let well = WellParameters::new(120.0, 12_000.0, 11_500.0)
            .with_tol(0.0)
            .with_frac_gradient(0.85);
        let mut program = CasingProgram::new("Wellbore (Planned)", "Demo Engineer", well, BuildMethod::TopDown);

        let surface = SectionInput {
            id: "0".to_string(),
            casing_type: "surface".to_string(),
            tvd: 2500.0,
            od: 13.375,
            bottom: 2500.0,
            weight: 54.5,
            grade: "J-55".to_string(),
            connection: "STC".to_string(),
            hole_size: 17.5,
            washout: 15.0,
            int_gradient: 0.1,
            mud_weight: 9.0,
            backup_mud: 8.6,
            cement_cu_ft: 0.0,
            body_yield: 853.0,
            burst_strength: 2730.0,
            wall_thickness: 0.380,
            internal_diameter: 12.615,
            collapse_pressure: 1130.0,
            tension_strength: 514.0,
            top: None,
            length: None,
            md_top: None,
            md_bottom: None,
        };
        let intermediate = SectionInput {
            id: "1".to_string(),
            bottom: 8500.0,
            tvd: 8300.0,
            mud_weight: 10.5,
            ..SectionInput::example_intermediate()
        };
        let production = SectionInput {
            id: "2".to_string(),
            casing_type: "production".to_string(),
            tvd: 11_500.0,
            od: 7.0,
            bottom: 12_000.0,
            weight: 29.0,
            grade: "P-110".to_string(),
            hole_size: 8.5,
            mud_weight: 12.5,
            body_yield: 929.0,
            burst_strength: 11_220.0,
            wall_thickness: 0.408,
            internal_diameter: 6.184,
            collapse_pressure: 8530.0,
            tension_strength: 955.0,
            ..SectionInput::example_intermediate()
        };

        let slurries = [((800.0, 1.8), (400.0, 1.18)), ((600.0, 1.9), (300.0, 1.15)), ((300.0, 1.6), (250.0, 1.2))];
        for (input, (lead, tail)) in [surface, intermediate, production].into_iter().zip(slurries) {
            let mut raw = RawSection::from(input);
            raw.cement_cu_ft = None;
            program.add_section(SectionRecord::new(raw).with_slurries(lead, tail));
        }
        program
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;

    #[test]
    fn test_program_creation() {
        let program = CasingProgram::new("Well-1", "Jane Engineer", WellParameters::new(0.0, 10_000.0, 9500.0), BuildMethod::BottomUp);
        assert_eq!(program.meta.version, SCHEMA_VERSION);
        assert_eq!(program.meta.well_name, "Well-1");
        assert!(program.sections.is_empty());
    }

    #[test]
    fn test_cement_volume_from_slurries() {
        let record = SectionRecord::default().with_slurries((800.0, 1.8), (400.0, 1.18));
        assert!((record.cement_volume().unwrap() - 1912.0).abs() < 1e-9);
    }

    #[test]
    fn test_direct_cement_volume_wins() {
        let mut record = SectionRecord::default().with_slurries((800.0, 1.8), (400.0, 1.18));
        record.raw.cement_cu_ft = Some(1000.0);
        assert_eq!(record.cement_volume(), Some(1000.0));
    }

    #[test]
    fn test_no_cement_source_is_reported_missing() {
        let mut program = CasingProgram::example();
        let record = &mut program.sections[1];
        record.lead_qty = None;
        record.tail_yield = None;

        let err = program.build_well().unwrap_err();
        assert_eq!(err, CalcError::missing_fields(["cement_cu_ft"]));
    }

    #[test]
    fn test_position_becomes_id() {
        let mut record = SectionRecord::new(RawSection::from(SectionInput::example_intermediate()));
        record.raw.id = None;
        assert_eq!(record.to_raw(4).id.as_deref(), Some("4"));
    }

    #[test]
    fn test_program_json_roundtrip() {
        let program = CasingProgram::example();
        let json = serde_json::to_string_pretty(&program).unwrap();
        assert!(json.contains("\"lead_yield\""));
        assert!(json.contains("\"top_down\""));

        let roundtrip: CasingProgram = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.meta, program.meta);
        assert_eq!(roundtrip.method, BuildMethod::TopDown);
        assert_eq!(roundtrip.sections.len(), 3);
        assert_eq!(roundtrip.sections[2].raw.casing_type.as_deref(), Some("production"));
        assert_eq!(roundtrip.sections[0].lead_qty, Some(800.0));
    }

    #[test]
    fn test_minimal_json_uses_defaults() {
        let json = r#"{
            "meta": {
                "version": "0.1.0",
                "well_name": "Minimal",
                "created": "2025-01-01T00:00:00Z",
                "modified": "2025-01-01T00:00:00Z"
            },
            "well": { "top": 0.0, "max_md_depth": 5000.0, "max_tvd_depth": 5000.0 }
        }"#;
        let program: CasingProgram = serde_json::from_str(json).unwrap();
        assert_eq!(program.method, BuildMethod::BottomUp);
        assert_eq!(program.settings, CalcSettings::default());
        assert_eq!(program.well.frac_gradient, 1.0);
    }

    #[test]
    fn test_example_program_designs_cleanly() {
        let design = CasingProgram::example().build_well().unwrap().calculate().unwrap();
        assert!(design.is_complete());
        let production = design.get("production").unwrap();
        // Deepest string is checked on its own
        assert!((production.burst.maps - 0.05194806 * 12.5 * 11_500.0).abs() < 1e-6);
        assert!(design.governing().is_some());
    }
}
