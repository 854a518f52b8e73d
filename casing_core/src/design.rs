//! # Casing Design Results
//!
//! [`CasingDesign`] is the output of [`crate::well::Well::calculate`]: every
//! section's input and results, in assembled order, plus a lookup by
//! casing-type label built once the calculation has finished.
//!
//! Serialized, the sections appear as a JSON object keyed by label, in
//! assembled order:
//!
//! ```json
//! {
//!   "well": { "top": 100.0, "max_md_depth": 12000.0, ... },
//!   "method": "top_down",
//!   "complete": true,
//!   "sections": {
//!     "surface": { "index": 0, "top": 100.0, "input": {...}, "mechanics": {...}, "burst": {...} },
//!     "intermediate": { ... }
//!   }
//! }
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Deserialize, Serialize, Serializer};

use crate::calculations::burst::BurstCheck;
use crate::calculations::section::{SectionInput, SectionMechanics};
use crate::well::{BuildMethod, WellParameters};

/// Which design check a design factor belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckKind {
    Burst,
    Collapse,
    Tension,
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckKind::Burst => write!(f, "burst"),
            CheckKind::Collapse => write!(f, "collapse"),
            CheckKind::Tension => write!(f, "tension"),
        }
    }
}

/// A section together with all of its calculated results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignedSection {
    /// Position in the assembled order
    pub index: usize,
    /// Staged top (ft MD)
    pub top: f64,
    pub input: SectionInput,
    pub mechanics: SectionMechanics,
    pub burst: BurstCheck,
}

impl DesignedSection {
    pub fn label(&self) -> &str {
        &self.input.casing_type
    }

    pub fn bottom(&self) -> f64 {
        self.input.bottom
    }

    /// Burst, collapse and tension design factors.
    pub fn design_factors(&self) -> [(CheckKind, f64); 3] {
        [
            (CheckKind::Burst, self.burst.burst_df),
            (CheckKind::Collapse, self.mechanics.collapse_df),
            (CheckKind::Tension, self.mechanics.tension_df),
        ]
    }

    /// Lowest positive, finite design factor of this section.
    pub fn governing(&self) -> Option<(CheckKind, f64)> {
        self.design_factors()
            .into_iter()
            .filter(|(_, df)| df.is_finite() && *df > 0.0)
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}

/// The lowest design factor across a whole casing program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoverningCheck {
    pub label: String,
    pub kind: CheckKind,
    pub design_factor: f64,
}

/// Results table for a whole well.
#[derive(Debug, Clone, PartialEq)]
pub struct CasingDesign {
    well: WellParameters,
    method: BuildMethod,
    complete: bool,
    sections: Vec<DesignedSection>,
    positions: HashMap<String, usize>,
}

impl CasingDesign {
    /// Build the table. The label lookup is created here and never changed;
    /// when two sections share a label the later one is found.
    pub fn new(well: WellParameters, method: BuildMethod, complete: bool, sections: Vec<DesignedSection>) -> Self {
        let positions = sections
            .iter()
            .enumerate()
            .map(|(i, s)| (s.label().to_string(), i))
            .collect();
        CasingDesign {
            well,
            method,
            complete,
            sections,
            positions,
        }
    }

    pub fn well(&self) -> &WellParameters {
        &self.well
    }

    pub fn method(&self) -> BuildMethod {
        self.method
    }

    /// Whether the section chain spanned the full well when calculated.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Sections in assembled order.
    pub fn sections(&self) -> &[DesignedSection] {
        &self.sections
    }

    /// Look up a section by casing-type label.
    pub fn get(&self, label: &str) -> Option<&DesignedSection> {
        self.positions.get(label).map(|&i| &self.sections[i])
    }

    /// Casing-type labels in assembled order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(DesignedSection::label)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DesignedSection)> {
        self.sections.iter().map(|s| (s.label(), s))
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Lowest positive, finite design factor across all sections.
    ///
    /// `None` when every check is unconstrained.
    pub fn governing(&self) -> Option<GoverningCheck> {
        self.sections
            .iter()
            .filter_map(|s| s.governing().map(|(kind, df)| (s.label(), kind, df)))
            .min_by(|a, b| a.2.total_cmp(&b.2))
            .map(|(label, kind, design_factor)| GoverningCheck {
                label: label.to_string(),
                kind,
                design_factor,
            })
    }
}

struct LabelKeyed<'a>(&'a [DesignedSection]);

impl Serialize for LabelKeyed<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for section in self.0 {
            map.serialize_entry(section.label(), section)?;
        }
        map.end()
    }
}

impl Serialize for CasingDesign {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CasingDesign", 4)?;
        state.serialize_field("well", &self.well)?;
        state.serialize_field("method", &self.method)?;
        state.serialize_field("complete", &self.complete)?;
        state.serialize_field("sections", &LabelKeyed(&self.sections))?;
        state.end()
    }
}
