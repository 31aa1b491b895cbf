//! Assertion helpers for headless sheet runs.

use crate::headless_page::SheetSnapshot;
use swipe_core::SheetState;

/// Assertion result with structured failure details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionResult {
    Passed,
    Failed { code: String, message: String },
}

impl AssertionResult {
    fn failed(code: &str, message: String) -> Self {
        AssertionResult::Failed {
            code: code.to_string(),
            message,
        }
    }
}

pub fn evaluate_assert_state(expected: SheetState, snapshot: &SheetSnapshot) -> AssertionResult {
    if snapshot.state == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "state_mismatch",
            format!("expected state {expected}, got {}", snapshot.state),
        )
    }
}

pub fn evaluate_assert_offset(
    expected: f32,
    tolerance: f32,
    snapshot: &SheetSnapshot,
) -> AssertionResult {
    let diff = (snapshot.offset - expected).abs();
    if diff <= tolerance.abs() {
        AssertionResult::Passed
    } else if snapshot.animating {
        AssertionResult::failed(
            "offset_in_flight",
            format!(
                "expected offset {expected} (±{tolerance}), sheet still moving at {:.2} towards {:?}",
                snapshot.offset, snapshot.target
            ),
        )
    } else {
        AssertionResult::failed(
            "offset_mismatch",
            format!(
                "expected offset {expected} (±{tolerance}), got {:.2}",
                snapshot.offset
            ),
        )
    }
}

pub fn evaluate_assert_locked(expected: bool, snapshot: &SheetSnapshot) -> AssertionResult {
    let locked = snapshot.body.is_locked();
    if locked == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "lock_mismatch",
            format!(
                "expected page scroll {}, body has overflow {:?} and overscroll {:?}",
                if expected { "locked" } else { "unlocked" },
                snapshot.body.overflow,
                snapshot.body.overscroll_behavior
            ),
        )
    }
}

pub fn evaluate_assert_scrollable(expected: bool, snapshot: &SheetSnapshot) -> AssertionResult {
    if snapshot.scrollable == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "scroll_class_mismatch",
            format!(
                "expected content {}scrollable in state {}",
                if expected { "" } else { "not " },
                snapshot.state
            ),
        )
    }
}
