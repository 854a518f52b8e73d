//! # Well and Section Assembly
//!
//! A [`Well`] owns the ordered chain of casing sections for one wellbore and
//! runs the design calculation over it.
//!
//! ## Structure
//!
//! ```text
//! Well
//! ├── params: WellParameters (depth bounds, top of liner, frac gradient)
//! ├── method: BuildMethod (top-down or bottom-up, fixed at creation)
//! ├── settings: CalcSettings
//! └── stack: SectionStack (ordered sections + completion flag)
//! ```
//!
//! Sections are staged one raw record at a time. Each new section's
//! boundary comes from the section staged before it:
//!
//! - **Top-down**: top = previous section's bottom (or the well top);
//!   stored shallow to deep; complete when the deepest bottom reaches the
//!   well bottom.
//! - **Bottom-up**: bottom = shallowest section's MD top (or the well
//!   bottom); stored deep to shallow; complete when the shallowest top
//!   reaches the well top.
//!
//! ## Example
//!
//! ```rust
//! use casing_core::calculations::{RawSection, SectionInput};
//! use casing_core::well::{BuildMethod, Well, WellParameters};
//!
//! let params = WellParameters::new(0.0, 9800.0, 9500.0).with_frac_gradient(0.8);
//! let mut well = Well::new(params, BuildMethod::TopDown).unwrap();
//!
//! well.add_section(RawSection::from(SectionInput::example_intermediate())).unwrap();
//! assert!(well.is_complete());
//!
//! let design = well.calculate().unwrap();
//! assert!(design.get("intermediate").is_some());
//! ```

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::burst::{analyze_pair, compute_solo, BurstCheck, BurstInput};
use crate::calculations::section::{self, RawSection, SectionInput};
use crate::design::{CasingDesign, DesignedSection};
use crate::errors::{CalcError, CalcResult};
use crate::settings::CalcSettings;

/// Well-wide bounds and parameters shared by every section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WellParameters {
    /// Top of the casing chain (ft MD), e.g. conductor shoe
    pub top: f64,
    /// Total measured depth (ft); also the well bottom
    pub max_md_depth: f64,
    /// Total true vertical depth (ft)
    pub max_tvd_depth: f64,
    /// Top of liner (ft MD)
    #[serde(default)]
    pub tol: f64,
    /// Formation fracture gradient (psi/ft)
    #[serde(default = "default_frac_gradient")]
    pub frac_gradient: f64,
}

fn default_frac_gradient() -> f64 {
    1.0
}

impl WellParameters {
    /// Create parameters with no liner and a 1.0 psi/ft fracture gradient.
    pub fn new(top: f64, max_md_depth: f64, max_tvd_depth: f64) -> Self {
        WellParameters {
            top,
            max_md_depth,
            max_tvd_depth,
            tol: 0.0,
            frac_gradient: default_frac_gradient(),
        }
    }

    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    pub fn with_frac_gradient(mut self, frac_gradient: f64) -> Self {
        self.frac_gradient = frac_gradient;
        self
    }

    /// Bottom of the casing chain (ft MD)
    pub fn bottom(&self) -> f64 {
        self.max_md_depth
    }

    /// Validate the well bounds.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.max_md_depth > 0.0) {
            return Err(CalcError::invalid_input(
                "max_md_depth",
                self.max_md_depth.to_string(),
                "max_md_depth must be a positive number",
            ));
        }
        if !(self.max_tvd_depth > 0.0) {
            return Err(CalcError::invalid_input(
                "max_tvd_depth",
                self.max_tvd_depth.to_string(),
                "max_tvd_depth must be a positive number",
            ));
        }
        if !(self.tol >= 0.0) {
            return Err(CalcError::invalid_input(
                "tol",
                self.tol.to_string(),
                "tol (top of liner) must be a non-negative number",
            ));
        }
        if !(self.top < self.bottom()) {
            return Err(CalcError::invalid_input(
                "top",
                self.top.to_string(),
                "Well top must be shallower than max_md_depth",
            ));
        }
        Ok(())
    }
}

/// How sections are chained together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildMethod {
    /// Surface first; each section hangs below the previous one
    TopDown,
    /// Total depth first; each section sits above the previous one
    #[default]
    BottomUp,
}

impl fmt::Display for BuildMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildMethod::TopDown => write!(f, "top-down"),
            BuildMethod::BottomUp => write!(f, "bottom-up"),
        }
    }
}

/// One staged casing section.
///
/// `input.bottom` holds the staged bottom, which for bottom-up wells is the
/// derived boundary rather than the value the loader supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Position in the assembled order (0-based)
    pub index: usize,
    /// Staged top (ft MD)
    pub top: f64,
    pub input: SectionInput,
}

impl Section {
    pub fn bottom(&self) -> f64 {
        self.input.bottom
    }

    /// Casing-type label
    pub fn label(&self) -> &str {
        &self.input.casing_type
    }

    /// Length of the section (ft MD)
    pub fn span(&self) -> f64 {
        self.bottom() - self.top
    }

    /// Depth the next shallower section hangs down to.
    fn link_top(&self) -> f64 {
        self.input.md_top.unwrap_or(self.top)
    }

    /// Depth used to order bottom-up wells.
    fn sort_bottom(&self) -> f64 {
        self.input.md_bottom.unwrap_or_else(|| self.bottom())
    }
}

/// Capabilities the assembler needs from its section store.
pub trait SectionCollection {
    /// Append a section at the end.
    fn push(&mut self, section: Section);

    /// Stable-sort the sections.
    fn reorder_by<F>(&mut self, compare: F)
    where
        F: FnMut(&Section, &Section) -> Ordering;

    /// Renumber `index` to match position, 0..n−1.
    fn reindex(&mut self);

    /// Flag the chain as spanning the whole well. Never cleared.
    fn mark_complete(&mut self);

    fn is_complete(&self) -> bool;

    fn sections(&self) -> &[Section];

    fn len(&self) -> usize {
        self.sections().len()
    }

    fn is_empty(&self) -> bool {
        self.sections().is_empty()
    }
}

/// Vec-backed section store owned by a [`Well`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionStack {
    sections: Vec<Section>,
    complete: bool,
}

impl SectionStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_sections(self) -> Vec<Section> {
        self.sections
    }
}

impl SectionCollection for SectionStack {
    fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    fn reorder_by<F>(&mut self, compare: F)
    where
        F: FnMut(&Section, &Section) -> Ordering,
    {
        self.sections.sort_by(compare);
    }

    fn reindex(&mut self) {
        for (i, section) in self.sections.iter_mut().enumerate() {
            section.index = i;
        }
    }

    fn mark_complete(&mut self) {
        self.complete = true;
    }

    fn is_complete(&self) -> bool {
        self.complete
    }

    fn sections(&self) -> &[Section] {
        &self.sections
    }
}

/// A wellbore and its casing program.
#[derive(Debug, Clone, PartialEq)]
pub struct Well {
    params: WellParameters,
    method: BuildMethod,
    settings: CalcSettings,
    stack: SectionStack,
}

impl Well {
    /// Create an empty well.
    ///
    /// # Errors
    ///
    /// `CalcError::InvalidInput` for non-positive depth bounds, a negative
    /// top of liner, or a top at or below the bottom.
    pub fn new(params: WellParameters, method: BuildMethod) -> CalcResult<Self> {
        params.validate()?;
        Ok(Well {
            params,
            method,
            settings: CalcSettings::default(),
            stack: SectionStack::new(),
        })
    }

    /// Replace the calculation settings.
    pub fn with_settings(mut self, settings: CalcSettings) -> CalcResult<Self> {
        settings.validate()?;
        self.settings = settings;
        Ok(self)
    }

    pub fn parameters(&self) -> &WellParameters {
        &self.params
    }

    pub fn method(&self) -> BuildMethod {
        self.method
    }

    pub fn settings(&self) -> &CalcSettings {
        &self.settings
    }

    /// Staged sections in assembled order.
    pub fn sections(&self) -> &[Section] {
        self.stack.sections()
    }

    pub fn is_complete(&self) -> bool {
        self.stack.is_complete()
    }

    /// Validate and stage one section.
    ///
    /// # Errors
    ///
    /// `CalcError::MissingFields` if any required field is absent.
    pub fn add_section(&mut self, raw: RawSection) -> CalcResult<()> {
        let input = raw.validate()?;
        if self.stack.is_complete() {
            warn!(
                casing_type = %input.casing_type,
                "adding a section to a well that already spans its full depth"
            );
        }
        match self.method {
            BuildMethod::TopDown => self.stage_top_down(input),
            BuildMethod::BottomUp => self.stage_bottom_up(input),
        }
        Ok(())
    }

    fn stage_top_down(&mut self, input: SectionInput) {
        let top = self
            .stack
            .sections()
            .last()
            .map_or(self.params.top, Section::bottom);

        if let Some(requested) = input.top {
            if requested != top {
                warn!(
                    casing_type = %input.casing_type,
                    requested,
                    derived = top,
                    "ignoring supplied top; top-down sections start at the previous bottom"
                );
            }
        }

        debug!(casing_type = %input.casing_type, top, bottom = input.bottom, "staging section top-down");
        let index = self.stack.len();
        self.stack.push(Section { index, top, input });
        self.stack.reorder_by(|a, b| a.top.total_cmp(&b.top));
        self.stack.reindex();

        let reaches_bottom = self
            .stack
            .sections()
            .last()
            .is_some_and(|s| s.bottom() == self.params.bottom());
        if reaches_bottom {
            self.stack.mark_complete();
        }
    }

    fn stage_bottom_up(&mut self, mut input: SectionInput) {
        let bottom = self
            .shallowest()
            .map_or(self.params.bottom(), Section::link_top);

        if input.bottom != bottom {
            warn!(
                casing_type = %input.casing_type,
                supplied = input.bottom,
                derived = bottom,
                "replacing supplied bottom with the boundary of the section below"
            );
            input.bottom = bottom;
        }

        let top = match (input.length, input.top) {
            (Some(length), _) => (bottom - length).max(self.params.top),
            (None, Some(top)) => top,
            (None, None) => self.params.top,
        };

        debug!(casing_type = %input.casing_type, top, bottom, "staging section bottom-up");
        let index = self.stack.len();
        self.stack.push(Section { index, top, input });
        self.stack
            .reorder_by(|a, b| b.sort_bottom().total_cmp(&a.sort_bottom()));
        self.stack.reindex();

        let reaches_top = self.shallowest().is_some_and(|s| s.top == self.params.top);
        if reaches_top {
            self.stack.mark_complete();
        }
    }

    /// The section with the smallest top.
    fn shallowest(&self) -> Option<&Section> {
        self.stack
            .sections()
            .iter()
            .min_by(|a, b| a.top.total_cmp(&b.top))
    }

    /// Positions of the staged sections ordered shallow to deep.
    fn depth_order(&self) -> Vec<usize> {
        let n = self.stack.len();
        match self.method {
            BuildMethod::TopDown => (0..n).collect(),
            BuildMethod::BottomUp => (0..n).rev().collect(),
        }
    }

    /// Run the design calculation over every staged section.
    ///
    /// Each section gets its per-section results; every section except the
    /// deepest gets a burst check against the section below it, and the
    /// deepest is checked on its own. Consumes the well: the pass runs once.
    ///
    /// # Errors
    ///
    /// `CalcError::CalculationFailed` when no sections have been staged.
    pub fn calculate(self) -> CalcResult<CasingDesign> {
        if self.stack.is_empty() {
            return Err(CalcError::calculation_failed(
                "casing design",
                "no sections have been added to the well",
            ));
        }
        if !self.stack.is_complete() {
            warn!(
                method = %self.method,
                "calculating a casing program that does not span the full well"
            );
        }

        let mechanics: Vec<_> = self
            .stack
            .sections()
            .iter()
            .map(|s| {
                let result = section::calculate(&s.input, &self.params, &self.settings);
                debug!(
                    casing_type = %s.label(),
                    collapse_df = result.collapse_df,
                    tension_df = result.tension_df,
                    "per-section calculation"
                );
                result
            })
            .collect();

        let burst_inputs: Vec<BurstInput> = self
            .stack
            .sections()
            .iter()
            .zip(&mechanics)
            .map(|(s, m)| BurstInput::from_section(&s.input, m))
            .collect();

        let order = self.depth_order();
        let mut checks: Vec<(usize, BurstCheck)> = order
            .iter()
            .enumerate()
            .map(|(k, &pos)| {
                let check = match order.get(k + 1) {
                    Some(&below) => analyze_pair(&burst_inputs[pos], &burst_inputs[below]),
                    None => compute_solo(&burst_inputs[pos]),
                };
                debug!(position = pos, maps = check.maps, burst_df = check.burst_df, "burst check");
                (pos, check)
            })
            .collect();
        checks.sort_by_key(|(pos, _)| *pos);

        let complete = self.stack.is_complete();
        let designed = self
            .stack
            .into_sections()
            .into_iter()
            .zip(mechanics)
            .zip(checks)
            .map(|((section, mechanics), (_, burst))| DesignedSection {
                index: section.index,
                top: section.top,
                input: section.input,
                mechanics,
                burst,
            })
            .collect();

        Ok(CasingDesign::new(self.params, self.method, complete, designed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(casing_type: &str, bottom: f64, tvd: f64) -> RawSection {
        let mut input = SectionInput::example_intermediate();
        input.id = casing_type.to_string();
        input.casing_type = casing_type.to_string();
        input.bottom = bottom;
        input.tvd = tvd;
        RawSection::from(input)
    }

    fn params() -> WellParameters {
        WellParameters::new(100.0, 12_000.0, 11_000.0).with_frac_gradient(0.8)
    }

    #[test]
    fn test_rejects_bad_bounds() {
        let err = Well::new(WellParameters::new(0.0, 0.0, 100.0), BuildMethod::TopDown).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "max_md_depth"));

        let err = Well::new(WellParameters::new(0.0, 100.0, -1.0), BuildMethod::TopDown).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "max_tvd_depth"));

        let err = Well::new(params().with_tol(-5.0), BuildMethod::BottomUp).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "tol"));
    }

    #[test]
    fn test_missing_fields_leave_well_untouched() {
        let mut well = Well::new(params(), BuildMethod::TopDown).unwrap();
        let mut bad = raw("surface", 2000.0, 2000.0);
        bad.od = None;
        bad.mud_weight = None;

        let err = well.add_section(bad).unwrap_err();
        assert_eq!(err, CalcError::missing_fields(["od", "mud_weight"]));
        assert!(well.sections().is_empty());
    }

    #[test]
    fn test_top_down_chains_and_completes() {
        let mut well = Well::new(params(), BuildMethod::TopDown).unwrap();
        well.add_section(raw("surface", 2000.0, 2000.0)).unwrap();
        assert!(!well.is_complete());
        well.add_section(raw("intermediate", 8000.0, 7600.0)).unwrap();
        assert!(!well.is_complete());
        well.add_section(raw("production", 12_000.0, 11_000.0)).unwrap();
        assert!(well.is_complete());

        let sections = well.sections();
        assert_eq!(sections[0].top, 100.0);
        assert_eq!(sections[1].top, 2000.0);
        assert_eq!(sections[2].top, 8000.0);
        for (i, s) in sections.iter().enumerate() {
            assert_eq!(s.index, i);
        }

        let total: f64 = sections.iter().map(Section::span).sum();
        assert!((total - (12_000.0 - 100.0)).abs() < 1e-9);
    }

    #[test]
    fn test_top_down_ignores_supplied_top() {
        let mut well = Well::new(params(), BuildMethod::TopDown).unwrap();
        let mut first = raw("surface", 2000.0, 2000.0);
        first.top = Some(500.0);
        well.add_section(first).unwrap();
        assert_eq!(well.sections()[0].top, 100.0);
    }

    #[test]
    fn test_bottom_up_chains_from_td() {
        let mut well = Well::new(params(), BuildMethod::BottomUp).unwrap();

        let mut liner = raw("liner", 0.0, 11_000.0);
        liner.length = Some(3000.0);
        well.add_section(liner).unwrap();
        assert_eq!(well.sections()[0].bottom(), 12_000.0);
        assert_eq!(well.sections()[0].top, 9000.0);
        assert!(!well.is_complete());

        let mut intermediate = raw("intermediate", 0.0, 8500.0);
        intermediate.top = Some(2000.0);
        well.add_section(intermediate).unwrap();
        assert!(!well.is_complete());

        well.add_section(raw("surface", 0.0, 2000.0)).unwrap();
        assert!(well.is_complete());

        let labels: Vec<_> = well.sections().iter().map(Section::label).collect();
        assert_eq!(labels, ["liner", "intermediate", "surface"]);

        let sections = well.sections();
        assert_eq!(sections[1].bottom(), 9000.0);
        assert_eq!(sections[1].top, 2000.0);
        assert_eq!(sections[2].bottom(), 2000.0);
        assert_eq!(sections[2].top, 100.0);
    }

    #[test]
    fn test_bottom_up_length_clamped_to_well_top() {
        let mut well = Well::new(params(), BuildMethod::BottomUp).unwrap();
        let mut long = raw("production", 0.0, 11_000.0);
        long.length = Some(50_000.0);
        well.add_section(long).unwrap();
        assert_eq!(well.sections()[0].top, 100.0);
        assert!(well.is_complete());
    }

    #[test]
    fn test_bottom_up_links_to_md_top() {
        let mut well = Well::new(params(), BuildMethod::BottomUp).unwrap();
        let mut liner = raw("liner", 0.0, 11_000.0);
        liner.length = Some(3000.0);
        liner.md_top = Some(8800.0);
        well.add_section(liner).unwrap();

        well.add_section(raw("intermediate", 0.0, 8500.0)).unwrap();
        let intermediate = &well.sections()[1];
        assert_eq!(intermediate.label(), "intermediate");
        assert_eq!(intermediate.bottom(), 8800.0);
    }

    #[test]
    fn test_bottom_up_orders_by_md_bottom() {
        let mut well = Well::new(params(), BuildMethod::BottomUp).unwrap();

        let mut liner = raw("liner", 0.0, 11_000.0);
        liner.length = Some(3000.0);
        liner.md_top = Some(9000.0);
        liner.md_bottom = Some(12_000.0);
        well.add_section(liner).unwrap();

        let mut intermediate = raw("intermediate", 0.0, 8500.0);
        intermediate.length = Some(4000.0);
        intermediate.md_top = Some(5000.0);
        intermediate.md_bottom = Some(9000.0);
        well.add_section(intermediate).unwrap();

        let mut surface = raw("surface", 0.0, 5000.0);
        surface.md_bottom = Some(5000.0);
        well.add_section(surface).unwrap();

        let staged: Vec<_> = well
            .sections()
            .iter()
            .map(|s| (s.label(), s.top, s.bottom(), s.index))
            .collect();
        assert_eq!(
            staged,
            [
                ("liner", 9000.0, 12_000.0, 0),
                ("intermediate", 5000.0, 9000.0, 1),
                ("surface", 100.0, 5000.0, 2),
            ]
        );
        assert!(well.is_complete());
    }

    #[test]
    fn test_calculate_requires_sections() {
        let well = Well::new(params(), BuildMethod::TopDown).unwrap();
        let err = well.calculate().unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
    }

    #[test]
    fn test_single_section_gets_solo_burst() {
        let mut well = Well::new(params(), BuildMethod::TopDown).unwrap();
        well.add_section(raw("production", 12_000.0, 11_000.0)).unwrap();
        let design = well.calculate().unwrap();

        let section = &design.sections()[0];
        let expected = compute_solo(&BurstInput::from_section(&section.input, &section.mechanics));
        assert_eq!(section.burst, expected);
    }

    #[test]
    fn test_pairs_then_solo_for_deepest() {
        let mut well = Well::new(params(), BuildMethod::TopDown).unwrap();
        well.add_section(raw("surface", 2000.0, 2000.0)).unwrap();
        well.add_section(raw("intermediate", 8000.0, 7600.0)).unwrap();
        well.add_section(raw("production", 12_000.0, 11_000.0)).unwrap();
        let design = well.calculate().unwrap();

        let inputs: Vec<_> = design
            .sections()
            .iter()
            .map(|s| BurstInput::from_section(&s.input, &s.mechanics))
            .collect();
        assert_eq!(design.sections()[0].burst, analyze_pair(&inputs[0], &inputs[1]));
        assert_eq!(design.sections()[1].burst, analyze_pair(&inputs[1], &inputs[2]));
        assert_eq!(design.sections()[2].burst, compute_solo(&inputs[2]));
    }

    #[test]
    fn test_bottom_up_burst_pairs_follow_depth() {
        let mut well = Well::new(params(), BuildMethod::BottomUp).unwrap();
        let mut production = raw("production", 0.0, 11_000.0);
        production.length = Some(4000.0);
        well.add_section(production).unwrap();
        well.add_section(raw("surface", 0.0, 7600.0)).unwrap();
        let design = well.calculate().unwrap();

        let production = design.get("production").unwrap();
        let surface = design.get("surface").unwrap();
        let deep = BurstInput::from_section(&production.input, &production.mechanics);
        let shallow = BurstInput::from_section(&surface.input, &surface.mechanics);
        assert_eq!(production.burst, compute_solo(&deep));
        assert_eq!(surface.burst, analyze_pair(&shallow, &deep));
    }
}
