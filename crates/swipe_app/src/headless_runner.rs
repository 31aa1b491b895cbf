//! Scenario runner that drives a headless page through its steps.

use crate::headless_assert::{
    evaluate_assert_locked, evaluate_assert_offset, evaluate_assert_scrollable,
    evaluate_assert_state, AssertionResult,
};
use crate::headless_page::HeadlessPage;
use crate::headless_report::{HeadlessReport, RunSummary, TransitionRecord};
use crate::headless_runtime::{HeadlessClock, HeadlessRunConfig};
use crate::headless_scenario::{HeadlessScenario, ScenarioStep};
use anyhow::Result;
use swipe_animation::SpringConfig;
use swipe_core::{ChangeSource, Measurement, SheetConfig, SheetState};

/// Final outcome of a scenario run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Passed { report: HeadlessReport },
    Failed { report: HeadlessReport },
}

impl RunOutcome {
    pub fn report(&self) -> &HeadlessReport {
        match self {
            RunOutcome::Passed { report } => report,
            RunOutcome::Failed { report } => report,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunOutcome::Failed { .. })
    }
}

/// Sheet behavior and motion used for a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunSettings {
    pub sheet: SheetConfig,
    pub spring: SpringConfig,
    pub runtime: HeadlessRunConfig,
}

/// Execute scenario JSON with default settings.
pub fn run_scenario(input: &str) -> Result<RunOutcome> {
    let scenario = HeadlessScenario::from_json(input)?;
    run_loaded_scenario(&scenario, RunSettings::default())
}

/// Execute a pre-loaded scenario.
pub fn run_loaded_scenario(scenario: &HeadlessScenario, settings: RunSettings) -> Result<RunOutcome> {
    settings.runtime.validate()?;
    let measurement = scenario.measurement.to_measurement()?;
    let mut page = HeadlessPage::new(
        settings.sheet,
        settings.spring,
        scenario.initial_state()?,
        measurement,
    )?;
    let mut clock = HeadlessClock::default();
    let runtime = settings.runtime;

    tracing::info!(steps = scenario.steps.len(), ?measurement, "running scenario");

    for (step_index, step) in scenario.steps.iter().enumerate() {
        tracing::debug!(step_index, step = step.name(), "step");
        let verdict = match step {
            ScenarioStep::Drag { deltas, release } => {
                page.pointer_down();
                for &delta in deltas {
                    if page.pointer_move(delta).is_none() {
                        break;
                    }
                    advance(&mut page, &mut clock, &runtime, runtime.frames_per_drag_move)?;
                }
                if *release {
                    page.pointer_up();
                }
                AssertionResult::Passed
            }
            ScenarioStep::Scroll { scroll_top } => {
                page.scroll_content(*scroll_top);
                AssertionResult::Passed
            }
            ScenarioStep::SetState { state } => {
                page.set_state(state.parse()?);
                AssertionResult::Passed
            }
            ScenarioStep::Toggle => {
                page.toggle();
                AssertionResult::Passed
            }
            ScenarioStep::TapHeader => {
                page.tap_header();
                AssertionResult::Passed
            }
            ScenarioStep::Resize {
                viewport,
                header,
                content,
            } => {
                let current = *page.measurement();
                page.resize(Measurement::new(
                    viewport.unwrap_or(current.viewport_available_height),
                    header.unwrap_or(current.header_height),
                    content.unwrap_or(current.content_height),
                ));
                AssertionResult::Passed
            }
            ScenarioStep::Tick { frames } => {
                advance(&mut page, &mut clock, &runtime, *frames)?;
                AssertionResult::Passed
            }
            ScenarioStep::Wait { ms } => {
                advance(&mut page, &mut clock, &runtime, runtime.frames_for(*ms))?;
                AssertionResult::Passed
            }
            ScenarioStep::AssertState { state } => {
                evaluate_assert_state(state.parse::<SheetState>()?, &page.snapshot())
            }
            ScenarioStep::AssertOffset { value, tolerance } => {
                evaluate_assert_offset(*value, *tolerance, &page.snapshot())
            }
            ScenarioStep::AssertLocked { locked } => {
                evaluate_assert_locked(*locked, &page.snapshot())
            }
            ScenarioStep::AssertScrollable { scrollable } => {
                evaluate_assert_scrollable(*scrollable, &page.snapshot())
            }
        };

        if let AssertionResult::Failed { code, message } = verdict {
            tracing::warn!(step_index, assertion = step.name(), %message, "assertion failed");
            let report =
                HeadlessReport::failed(step.name(), step_index, code, message, summarize(&page, &clock));
            return Ok(RunOutcome::Failed { report });
        }
    }

    let report = HeadlessReport::passed(summarize(&page, &clock));
    tracing::info!(
        frames = report.elapsed_frames,
        final_state = %report.final_state,
        "scenario passed"
    );
    Ok(RunOutcome::Passed { report })
}

fn advance(
    page: &mut HeadlessPage,
    clock: &mut HeadlessClock,
    runtime: &HeadlessRunConfig,
    frames: u32,
) -> Result<()> {
    clock.run(runtime, frames, |frame| page.advance(frame.dt))
}

fn summarize(page: &HeadlessPage, clock: &HeadlessClock) -> RunSummary {
    let snapshot = page.snapshot();
    RunSummary {
        elapsed_frames: clock.elapsed_frames,
        elapsed_ms: clock.elapsed_ms,
        final_state: snapshot.state.to_string(),
        final_offset: snapshot.offset,
        transitions: page
            .transitions()
            .iter()
            .map(|(from, to, source)| TransitionRecord {
                from: from.to_string(),
                to: to.to_string(),
                source: match source {
                    ChangeSource::Gesture => "gesture",
                    ChangeSource::External => "external",
                }
                .to_string(),
            })
            .collect(),
    }
}
