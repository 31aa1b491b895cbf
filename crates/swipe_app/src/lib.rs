//! Swipe Headless Harness
//!
//! Runs a bottom sheet against a model page without a renderer: the page body
//! that gets scroll-locked, the sheet surface that gains or loses its scroll
//! class, and a spring scheduler stepped by a deterministic frame clock.
//!
//! # Example
//!
//! ```rust
//! use swipe_app::run_scenario;
//!
//! let outcome = run_scenario(r#"{
//!     "measurement": { "viewport": 500, "header": 40, "content": 800 },
//!     "initial_state": "half",
//!     "steps": [
//!         { "type": "wait", "ms": 1500 },
//!         { "type": "drag", "deltas": [-40, -80, -120] },
//!         { "type": "wait", "ms": 2000 },
//!         { "type": "assert_state", "state": "full" },
//!         { "type": "assert_offset", "value": -500 }
//!     ]
//! }"#).unwrap();
//!
//! assert!(!outcome.is_failed());
//! ```

pub mod headless_assert;
pub mod headless_page;
pub mod headless_report;
pub mod headless_runner;
pub mod headless_runtime;
pub mod headless_scenario;

pub use headless_assert::AssertionResult;
pub use headless_page::{
    BodyStyle, HeadlessPage, Overflow, OverscrollBehavior, PageArbiter, SheetSnapshot,
    SurfaceClasses, SCROLL_CLASS,
};
pub use headless_report::{HeadlessReport, ReportStatus, RunSummary, TransitionRecord};
pub use headless_runner::{run_loaded_scenario, run_scenario, RunOutcome, RunSettings};
pub use headless_runtime::{FrameContext, HeadlessClock, HeadlessRunConfig};
pub use headless_scenario::{HeadlessScenario, MeasurementSpec, ScenarioStep};
