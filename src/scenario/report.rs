//! Per-step scenario reports and their renderings.

use crate::model::CssPosition;
use crate::stick::Transition;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How reports are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned table.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl OutputFormat {
    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

/// Unrecognized output format name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown output format `{0}` (expected text or json)")]
pub struct InvalidFormat(pub String);

impl FromStr for OutputFormat {
    type Err = InvalidFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a scenario step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepAction {
    /// Stick attached to its target.
    Attach,
    /// Window scrolled.
    Scroll,
    /// Resize notification, optionally after an element reflow.
    Resize,
    /// Explicit (re-)initialization.
    Init,
    /// Teardown.
    Destroy,
}

impl fmt::Display for StepAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Attach => "attach",
            Self::Scroll => "scroll",
            Self::Resize => "resize",
            Self::Init => "init",
            Self::Destroy => "destroy",
        })
    }
}

/// State of the sticky target after one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickReport {
    /// Step index; the attach row is 0.
    pub step: usize,
    /// What the step did.
    pub action: StepAction,
    /// Window scroll offset.
    pub scroll_y: f64,
    /// Whether the target is stuck afterwards.
    pub stuck: bool,
    /// Stuck-state change, when the step evaluated.
    pub transition: Option<Transition>,
    /// Evaluated position, when the step evaluated.
    pub position: Option<CssPosition>,
    /// Evaluated top offset, when the step evaluated.
    pub top: Option<f64>,
    /// Target's inline style afterwards.
    pub style: String,
    /// Target's classes afterwards.
    pub classes: Vec<String>,
    /// Event names dispatched during the step.
    pub events: Vec<&'static str>,
}

const HEADERS: [&str; 9] = [
    "step",
    "action",
    "scroll",
    "stuck",
    "transition",
    "position",
    "top",
    "classes",
    "style",
];

fn or_dash(text: String) -> String {
    if text.is_empty() {
        "-".to_string()
    } else {
        text
    }
}

fn cells(report: &TickReport) -> [String; 9] {
    [
        report.step.to_string(),
        report.action.to_string(),
        report.scroll_y.to_string(),
        if report.stuck { "yes" } else { "no" }.to_string(),
        match report.transition {
            Some(Transition::Stuck) => "stuck".to_string(),
            Some(Transition::Unstuck) => "unstuck".to_string(),
            Some(Transition::Unchanged) | None => "-".to_string(),
        },
        report
            .position
            .as_ref()
            .map_or_else(|| "-".to_string(), ToString::to_string),
        report.top.map_or_else(|| "-".to_string(), |top| top.to_string()),
        or_dash(report.classes.join(" ")),
        or_dash(report.style.clone()),
    ]
}

/// Render reports as a table with left-aligned columns separated by two
/// spaces. Trailing whitespace is trimmed from every line.
pub fn render_text(reports: &[TickReport]) -> String {
    let rows: Vec<[String; 9]> = reports.iter().map(cells).collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let header = HEADERS.map(str::to_string);
    let mut out = String::new();
    for row in std::iter::once(&header).chain(&rows) {
        let line = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Render reports as JSON lines.
///
/// # Errors
///
/// Propagates serialization failures.
pub fn render_json(reports: &[TickReport]) -> Result<String, serde_json::Error> {
    let mut out = String::new();
    for report in reports {
        out.push_str(&serde_json::to_string(report)?);
        out.push('\n');
    }
    Ok(out)
}

/// Render reports in `format`.
///
/// # Errors
///
/// Propagates JSON serialization failures.
pub fn render(reports: &[TickReport], format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_text(reports)),
        OutputFormat::Json => render_json(reports),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(step: usize, action: StepAction) -> TickReport {
        TickReport {
            step,
            action,
            scroll_y: 0.0,
            stuck: false,
            transition: None,
            position: None,
            top: None,
            style: String::new(),
            classes: Vec::new(),
            events: Vec::new(),
        }
    }

    mod format {
        use super::*;

        #[test]
        fn parses_case_insensitively() {
            assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
            assert_eq!(" text ".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        }

        #[test]
        fn rejects_unknown_names() {
            assert_eq!(
                "yaml".parse::<OutputFormat>(),
                Err(InvalidFormat("yaml".to_string()))
            );
        }

        #[test]
        fn default_is_text() {
            assert_eq!(OutputFormat::default(), OutputFormat::Text);
            assert_eq!(OutputFormat::Json.to_string(), "json");
        }
    }

    mod text {
        use super::*;

        #[test]
        fn empty_report_list_prints_only_header() {
            assert_eq!(
                render_text(&[]),
                "step  action  scroll  stuck  transition  position  top  classes  style\n"
            );
        }

        #[test]
        fn columns_widen_to_fit_cells() {
            let stuck = TickReport {
                scroll_y: 130.0,
                stuck: true,
                transition: Some(Transition::Stuck),
                position: Some(CssPosition::Fixed),
                top: Some(20.0),
                style: "position: fixed; top: 20px;".to_string(),
                classes: vec!["is-sticky".to_string()],
                ..report(1, StepAction::Scroll)
            };

            let text = render_text(&[report(0, StepAction::Attach), stuck]);
            let lines: Vec<&str> = text.lines().collect();

            assert_eq!(
                lines,
                vec![
                    "step  action  scroll  stuck  transition  position  top  classes    style",
                    "0     attach  0       no     -           -         -    -          -",
                    "1     scroll  130     yes    stuck       fixed     20   is-sticky  position: fixed; top: 20px;",
                ]
            );
        }

        #[test]
        fn unchanged_transition_prints_dash() {
            let row = TickReport {
                transition: Some(Transition::Unchanged),
                ..report(2, StepAction::Resize)
            };
            assert_eq!(cells(&row)[4], "-");
        }
    }

    mod json {
        use super::*;

        #[test]
        fn one_object_per_line() {
            let rows = [report(0, StepAction::Attach), report(1, StepAction::Destroy)];
            let text = render_json(&rows).unwrap();
            assert_eq!(text.lines().count(), 2);
            assert!(text.ends_with('\n'));
        }

        #[test]
        fn fields_use_lowercase_names() {
            let row = TickReport {
                stuck: true,
                transition: Some(Transition::Stuck),
                position: Some(CssPosition::Fixed),
                top: Some(20.0),
                events: vec!["stick:before-stick", "stick:after-stick"],
                ..report(1, StepAction::Scroll)
            };
            let value: serde_json::Value =
                serde_json::from_str(render_json(&[row]).unwrap().trim()).unwrap();

            assert_eq!(value["action"], "scroll");
            assert_eq!(value["transition"], "stuck");
            assert_eq!(value["position"], "fixed");
            assert_eq!(value["top"], 20.0);
            assert_eq!(value["events"][1], "stick:after-stick");
        }

        #[test]
        fn missing_evaluation_serializes_as_null() {
            let value: serde_json::Value = serde_json::from_str(
                render_json(&[report(0, StepAction::Init)]).unwrap().trim(),
            )
            .unwrap();
            assert!(value["transition"].is_null());
            assert!(value["position"].is_null());
            assert!(value["top"].is_null());
        }
    }
}
