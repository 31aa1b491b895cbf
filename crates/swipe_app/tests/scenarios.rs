//! Scenario-level tests for the headless sheet harness

use swipe_app::{
    run_loaded_scenario, run_scenario, HeadlessRunConfig, HeadlessScenario, ReportStatus,
    RunOutcome, RunSettings,
};
use swipe_core::SheetConfig;

fn assert_passes(name: &str, json: &str) {
    let outcome = run_scenario(json).unwrap();
    if let RunOutcome::Failed { report } = &outcome {
        panic!(
            "{name} failed at step {:?} ({:?}): {:?}",
            report.failed_step_index, report.assertion, report.message
        );
    }
}

#[test]
fn test_bundled_scenarios_pass() {
    let scenarios = [
        ("open_full", include_str!("../scenarios/open_full.json")),
        (
            "collapse_on_scroll_top",
            include_str!("../scenarios/collapse_on_scroll_top.json"),
        ),
        (
            "scrolled_content_keeps_sheet",
            include_str!("../scenarios/scrolled_content_keeps_sheet.json"),
        ),
        ("adaptive_height", include_str!("../scenarios/adaptive_height.json")),
        ("header_and_toggle", include_str!("../scenarios/header_and_toggle.json")),
    ];
    for (name, json) in scenarios {
        assert_passes(name, json);
    }
}

#[test]
fn test_failed_assertion_reports_step() {
    let outcome = run_scenario(
        r#"{
            "measurement": { "viewport": 500, "header": 40, "content": 800 },
            "initial_state": "half",
            "steps": [
                { "type": "wait", "ms": 1000 },
                { "type": "drag", "deltas": [30, 60] },
                { "type": "assert_state", "state": "hidden" }
            ]
        }"#,
    )
    .unwrap();

    assert!(outcome.is_failed());
    let report = outcome.report();
    assert_eq!(report.status, ReportStatus::Failed);
    assert_eq!(report.failed_step_index, Some(2));
    assert_eq!(report.assertion.as_deref(), Some("assert_state"));
    assert_eq!(report.code.as_deref(), Some("state_mismatch"));
    assert_eq!(report.final_state, "half");
    assert!(report.transitions.is_empty());
    assert_eq!(report.elapsed_frames, 63 + 2);
}

#[test]
fn test_report_lists_transitions() {
    let outcome = run_scenario(
        r#"{
            "measurement": { "viewport": 500, "header": 40, "content": 800 },
            "initial_state": "hidden",
            "steps": [
                { "type": "tap_header" },
                { "type": "set_state", "state": "full" },
                { "type": "wait", "ms": 1500 }
            ]
        }"#,
    )
    .unwrap();

    let report = outcome.report();
    assert_eq!(report.status, ReportStatus::Passed);
    assert_eq!(report.final_offset, -500.0);
    let sources: Vec<_> = report
        .transitions
        .iter()
        .map(|t| (t.from.as_str(), t.to.as_str(), t.source.as_str()))
        .collect();
    assert_eq!(
        sources,
        vec![("hidden", "half", "gesture"), ("half", "full", "external")]
    );
}

#[test]
fn test_settings_change_commit_distance() {
    let scenario = HeadlessScenario::from_json(
        r#"{
            "measurement": { "viewport": 500, "header": 40, "content": 800 },
            "initial_state": "half",
            "steps": [
                { "type": "wait", "ms": 1000 },
                { "type": "drag", "deltas": [-50, -100] },
                { "type": "assert_state", "state": "half" }
            ]
        }"#,
    )
    .unwrap();

    let strict = RunSettings {
        sheet: SheetConfig::new().commit_threshold(150.0),
        ..Default::default()
    };
    assert!(!run_loaded_scenario(&scenario, strict).unwrap().is_failed());
    assert!(run_loaded_scenario(&scenario, RunSettings::default())
        .unwrap()
        .is_failed());
}

#[test]
fn test_invalid_runtime_is_an_error() {
    let scenario = HeadlessScenario::from_json(
        r#"{ "measurement": { "viewport": 500 }, "steps": [] }"#,
    )
    .unwrap();
    let settings = RunSettings {
        runtime: HeadlessRunConfig {
            tick_ms: 0,
            ..Default::default()
        },
        ..Default::default()
    };
    assert!(run_loaded_scenario(&scenario, settings).is_err());
}
