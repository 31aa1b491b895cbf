//! Scenario definition for headless sheet runs.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use swipe_core::{Measurement, SheetState};

/// Page layout a scenario starts from.
///
/// Either give the viewport budget directly, or the window height plus the
/// page element the sheet must stay below.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeasurementSpec {
    pub viewport: Option<f32>,
    pub window_height: Option<f32>,
    #[serde(default)]
    pub anchor_top: f32,
    #[serde(default)]
    pub anchor_height: f32,
    #[serde(default)]
    pub header: f32,
    #[serde(default)]
    pub content: f32,
}

impl MeasurementSpec {
    pub fn to_measurement(&self) -> Result<Measurement> {
        match (self.viewport, self.window_height) {
            (Some(viewport), None) => Ok(Measurement::new(viewport, self.header, self.content)),
            (None, Some(window_height)) => Ok(Measurement::below_anchor(
                window_height,
                self.anchor_top,
                self.anchor_height,
                self.header,
                self.content,
            )),
            (Some(_), Some(_)) => bail!("measurement sets both viewport and window_height"),
            (None, None) => bail!("measurement needs either viewport or window_height"),
        }
    }
}

/// Sequence of sheet interactions and checks.
#[derive(Debug, Clone, Deserialize)]
pub struct HeadlessScenario {
    pub measurement: MeasurementSpec,
    #[serde(default = "default_initial_state")]
    pub initial_state: String,
    pub steps: Vec<ScenarioStep>,
}

fn default_initial_state() -> String {
    SheetState::Hidden.as_str().to_string()
}

impl HeadlessScenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        let scenario: Self = serde_json::from_str(input)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("invalid scenario {}", path.display()))
    }

    pub fn initial_state(&self) -> Result<SheetState> {
        Ok(self.initial_state.parse()?)
    }

    /// Reject names and layouts the runner could not act on.
    pub fn validate(&self) -> Result<()> {
        self.measurement.to_measurement()?;
        self.initial_state()?;
        for (index, step) in self.steps.iter().enumerate() {
            match step {
                ScenarioStep::SetState { state } | ScenarioStep::AssertState { state } => {
                    state
                        .parse::<SheetState>()
                        .with_context(|| format!("step {index}"))?;
                }
                ScenarioStep::Drag { deltas, .. } if deltas.iter().any(|d| !d.is_finite()) => {
                    bail!("step {index}: drag deltas must be finite");
                }
                _ => {}
            }
        }
        Ok(())
    }
}

fn default_release() -> bool {
    true
}

fn default_tolerance() -> f32 {
    0.5
}

/// One scenario step.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Press, move through `deltas` (px from the press point, one per frame),
    /// and lift unless `release` is false.
    Drag {
        deltas: Vec<f32>,
        #[serde(default = "default_release")]
        release: bool,
    },
    /// Content scroll reading; omit or null `scroll_top` for an unknown position.
    Scroll {
        #[serde(default)]
        scroll_top: Option<f32>,
    },
    SetState { state: String },
    Toggle,
    TapHeader,
    /// Change any part of the layout; omitted fields keep their value.
    Resize {
        viewport: Option<f32>,
        header: Option<f32>,
        content: Option<f32>,
    },
    Tick { frames: u32 },
    Wait { ms: u64 },
    AssertState { state: String },
    AssertOffset {
        value: f32,
        #[serde(default = "default_tolerance")]
        tolerance: f32,
    },
    AssertLocked { locked: bool },
    AssertScrollable { scrollable: bool },
}

impl ScenarioStep {
    /// Name used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioStep::Drag { .. } => "drag",
            ScenarioStep::Scroll { .. } => "scroll",
            ScenarioStep::SetState { .. } => "set_state",
            ScenarioStep::Toggle => "toggle",
            ScenarioStep::TapHeader => "tap_header",
            ScenarioStep::Resize { .. } => "resize",
            ScenarioStep::Tick { .. } => "tick",
            ScenarioStep::Wait { .. } => "wait",
            ScenarioStep::AssertState { .. } => "assert_state",
            ScenarioStep::AssertOffset { .. } => "assert_offset",
            ScenarioStep::AssertLocked { .. } => "assert_locked",
            ScenarioStep::AssertScrollable { .. } => "assert_scrollable",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_steps() {
        let scenario = HeadlessScenario::from_json(
            r#"{
                "measurement": { "viewport": 500, "header": 40, "content": 800 },
                "initial_state": "half",
                "steps": [
                    { "type": "drag", "deltas": [-40, -80, -120] },
                    { "type": "scroll" },
                    { "type": "scroll", "scroll_top": 12.5 },
                    { "type": "resize", "content": 300 },
                    { "type": "assert_offset", "value": -300 }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(scenario.initial_state().unwrap(), SheetState::Half);
        assert!(matches!(
            &scenario.steps[0],
            ScenarioStep::Drag { deltas, release: true } if deltas.len() == 3
        ));
        assert!(matches!(scenario.steps[1], ScenarioStep::Scroll { scroll_top: None }));
        assert!(matches!(
            scenario.steps[4],
            ScenarioStep::AssertOffset { tolerance, .. } if tolerance == 0.5
        ));
    }

    #[test]
    fn test_anchor_measurement() {
        let spec: MeasurementSpec = serde_json::from_str(
            r#"{ "window_height": 800, "anchor_top": 100, "anchor_height": 60, "header": 40 }"#,
        )
        .unwrap();
        let measurement = spec.to_measurement().unwrap();
        assert_eq!(measurement.viewport_available_height, 640.0);
    }

    #[test]
    fn test_rejects_unknown_state_names() {
        let err = HeadlessScenario::from_json(
            r#"{
                "measurement": { "viewport": 500 },
                "steps": [ { "type": "assert_state", "state": "open" } ]
            }"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("open"));
    }

    #[test]
    fn test_rejects_ambiguous_measurement() {
        assert!(HeadlessScenario::from_json(
            r#"{ "measurement": { "viewport": 500, "window_height": 800 }, "steps": [] }"#
        )
        .is_err());
        assert!(HeadlessScenario::from_json(r#"{ "measurement": {}, "steps": [] }"#).is_err());
    }
}
