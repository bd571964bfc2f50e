//! Scenario replay.
//!
//! A scenario describes a page as named elements, a `[stick]` section and a
//! list of steps. [`run_scenario`] lays the page out in a [`SimHost`],
//! attaches a [`Stick`] and reports the target's state after every step.

pub mod report;

pub use report::{
    render, render_json, render_text, InvalidFormat, OutputFormat, StepAction, TickReport,
};

use crate::config::ResolvedConfig;
use crate::host::{Host, SimHost};
use crate::model::{Direction, ElementId, HostError, StickError, StickOptions, TopSpacing};
use crate::stick::{Stick, Tick};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors from loading or replaying a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// Scenario file could not be read.
    #[error("Failed to read scenario at {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Scenario file is not valid TOML or JSON, or has the wrong shape.
    #[error("Invalid scenario in {path}: {reason}")]
    Parse {
        /// Offending file.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// Extension is neither `.toml` nor `.json`.
    #[error("Unsupported scenario format `.{0}` (expected .toml or .json)")]
    UnsupportedFormat(String),

    /// A name does not match any element defined so far.
    #[error("Unknown element `{0}`")]
    UnknownElement(String),

    /// Two elements share a name.
    #[error("Duplicate element `{0}`")]
    DuplicateElement(String),

    /// Stick lifecycle failure.
    #[error(transparent)]
    Stick(#[from] StickError),

    /// Host query or command failure.
    #[error(transparent)]
    Host(#[from] HostError),
}

/// A page element in a scenario.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ElementSpec {
    /// Unique name.
    pub name: String,
    /// Parent element name; must be defined earlier.
    #[serde(default)]
    pub parent: Option<String>,
    /// Document-space top edge in px.
    pub top: f64,
    /// Layout height in px.
    pub height: f64,
    /// Initial inline style.
    #[serde(default)]
    pub style: Option<String>,
}

/// `top_spacing` as written in a scenario: px or an element name.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SpacingSpec {
    /// Fixed distance in px.
    Px(f64),
    /// Element whose bottom edge is the stick line.
    Element(String),
}

/// The `[stick]` section. Unset options fall back to the resolved config.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StickSpec {
    /// Element to make sticky.
    pub target: String,
    /// Container bounding the stick.
    #[serde(default)]
    pub stick_within: Option<String>,
    /// Distance from the viewport top.
    #[serde(default)]
    pub top_spacing: Option<SpacingSpec>,
    /// Element that must reach the stick line first.
    #[serde(default)]
    pub stick_after: Option<String>,
    /// Minimum scroll velocity.
    #[serde(default)]
    pub delta: Option<f64>,
    /// Direction filter.
    #[serde(default)]
    pub direction: Option<Direction>,
    /// Class added while stuck.
    #[serde(default)]
    pub sticky_class: Option<String>,
    /// Wrap the target in a height guard.
    #[serde(default)]
    pub guard_height: Option<bool>,
}

/// Lifecycle steps named by a bare string.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleStep {
    /// Resize notification without layout changes.
    Resize,
    /// Explicit (re-)initialization.
    Init,
    /// Teardown.
    Destroy,
}

/// One scenario step.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Step {
    /// Scroll the window to this offset.
    Scroll(f64),
    /// Lifecycle call.
    Lifecycle(LifecycleStep),
    /// Change an element's height, then send a resize notification.
    Reflow {
        /// Element to resize.
        resize: String,
        /// New layout height in px.
        height: f64,
    },
}

/// A parsed scenario.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Scroll offset when the page loads.
    #[serde(default)]
    pub initial_scroll: f64,
    /// Page elements, parents before children.
    pub elements: Vec<ElementSpec>,
    /// Sticky target and options.
    pub stick: StickSpec,
    /// Steps to replay.
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Parse scenario text, choosing TOML or JSON from the extension of `path`.
/// Paths without an extension are read as TOML.
///
/// # Errors
///
/// [`ScenarioError::UnsupportedFormat`] or [`ScenarioError::Parse`].
pub fn parse_scenario(path: &Path, contents: &str) -> Result<Scenario, ScenarioError> {
    let parse_error = |reason: String| ScenarioError::Parse {
        path: path.to_path_buf(),
        reason,
    };

    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => {
            serde_json::from_str(contents).map_err(|e| parse_error(e.to_string()))
        }
        Some(ext) if ext.eq_ignore_ascii_case("toml") => {
            toml::from_str(contents).map_err(|e| parse_error(e.to_string()))
        }
        None => toml::from_str(contents).map_err(|e| parse_error(e.to_string())),
        Some(other) => Err(ScenarioError::UnsupportedFormat(other.to_string())),
    }
}

/// Read and parse a scenario file.
///
/// # Errors
///
/// Read failures plus everything [`parse_scenario`] reports.
pub fn load_scenario(path: &Path) -> Result<Scenario, ScenarioError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ScenarioError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_scenario(path, &contents)
}

struct Page {
    host: SimHost,
    names: HashMap<String, ElementId>,
}

impl Page {
    fn build(elements: &[ElementSpec]) -> Result<Self, ScenarioError> {
        let mut host = SimHost::new();
        let mut names = HashMap::new();

        for spec in elements {
            if names.contains_key(&spec.name) {
                return Err(ScenarioError::DuplicateElement(spec.name.clone()));
            }
            let parent = spec
                .parent
                .as_deref()
                .map(|name| lookup(&names, name))
                .transpose()?;
            let id = host.add_element(spec.name.clone(), parent, spec.top, spec.height);
            if let Some(style) = &spec.style {
                host.set_css_text(id, style)?;
            }
            names.insert(spec.name.clone(), id);
        }
        host.take_commands();

        Ok(Self { host, names })
    }

    fn element(&self, name: &str) -> Result<ElementId, ScenarioError> {
        lookup(&self.names, name)
    }

    fn options(
        &self,
        spec: &StickSpec,
        config: &ResolvedConfig,
    ) -> Result<StickOptions, ScenarioError> {
        let top_spacing = match &spec.top_spacing {
            None => TopSpacing::default(),
            Some(SpacingSpec::Px(px)) => TopSpacing::Fixed(*px),
            Some(SpacingSpec::Element(name)) => TopSpacing::Element(self.element(name)?),
        };

        Ok(StickOptions {
            sticky_class: spec
                .sticky_class
                .clone()
                .unwrap_or_else(|| config.sticky_class.clone()),
            guard_height: spec.guard_height.unwrap_or(config.guard_height),
            stick_within: spec
                .stick_within
                .as_deref()
                .map(|name| self.element(name))
                .transpose()?,
            top_spacing,
            stick_after: spec
                .stick_after
                .as_deref()
                .map(|name| self.element(name))
                .transpose()?,
            delta: spec.delta.unwrap_or(config.delta),
            direction: spec.direction.unwrap_or(config.direction),
        })
    }

    fn report(
        &mut self,
        stick: &Stick,
        step: usize,
        action: StepAction,
        tick: Option<Tick>,
    ) -> Result<TickReport, ScenarioError> {
        let target = stick.target();
        let (transition, position, top) = match tick {
            Some(tick) => (
                Some(tick.transition),
                Some(tick.evaluation.position),
                Some(tick.evaluation.top),
            ),
            None => (None, None, None),
        };

        Ok(TickReport {
            step,
            action,
            scroll_y: self.host.scroll_y(),
            stuck: stick.is_sticky(),
            transition,
            position,
            top,
            style: self.host.css_text(target)?,
            classes: self.host.classes(target)?.to_vec(),
            events: self.host.take_event_names(),
        })
    }
}

fn lookup(names: &HashMap<String, ElementId>, name: &str) -> Result<ElementId, ScenarioError> {
    names
        .get(name)
        .copied()
        .ok_or_else(|| ScenarioError::UnknownElement(name.to_string()))
}

/// Replay `scenario` against a simulated page.
///
/// Returns an attach row (step 0) followed by one row per step.
///
/// # Errors
///
/// Unknown or duplicate element names and any stick or host failure.
pub fn run_scenario(
    scenario: &Scenario,
    config: &ResolvedConfig,
) -> Result<Vec<TickReport>, ScenarioError> {
    let mut page = Page::build(&scenario.elements)?;
    let target = page.element(&scenario.stick.target)?;
    let options = page.options(&scenario.stick, config)?;

    info!(
        target_name = %scenario.stick.target,
        elements = scenario.elements.len(),
        steps = scenario.steps.len(),
        "running scenario"
    );

    page.host.scroll_to(scenario.initial_scroll);
    let mut stick = Stick::attach(&mut page.host, target, options)?;

    let mut reports = Vec::with_capacity(scenario.steps.len() + 1);
    let attach_tick = stick.initial_tick().cloned();
    reports.push(page.report(&stick, 0, StepAction::Attach, attach_tick)?);

    for (index, step) in scenario.steps.iter().enumerate() {
        let (action, tick) = match step {
            Step::Scroll(y) => {
                page.host.scroll_to(*y);
                (StepAction::Scroll, stick.on_scroll(&mut page.host)?)
            }
            Step::Lifecycle(LifecycleStep::Resize) => {
                (StepAction::Resize, stick.on_resize(&mut page.host)?)
            }
            Step::Reflow { resize, height } => {
                let element = page.element(resize)?;
                page.host.resize_element(element, *height)?;
                (StepAction::Resize, stick.on_resize(&mut page.host)?)
            }
            Step::Lifecycle(LifecycleStep::Init) => {
                (StepAction::Init, stick.init(&mut page.host)?)
            }
            Step::Lifecycle(LifecycleStep::Destroy) => {
                stick.destroy(&mut page.host)?;
                (StepAction::Destroy, None)
            }
        };

        let report = page.report(&stick, index + 1, action, tick)?;
        debug!(
            step = report.step,
            action = %report.action,
            stuck = report.stuck,
            listening = stick.is_initialized(),
            "step replayed"
        );
        reports.push(report);
    }

    Ok(reports)
}

#[cfg(test)]
#[path = "scenario_tests.rs"]
mod tests;
