//! Headless page model hosting one bottom sheet.
//!
//! Stands in for the document around the sheet: a body whose scroll style the
//! sheet locks, a sheet surface whose class list toggles native content
//! scrolling, and a pointer that feeds drag ticks. Motion runs through a real
//! spring scheduler advanced by explicit frame steps.

use anyhow::{anyhow, Result};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use swipe_animation::{AnimationScheduler, SpringAnimator, SpringConfig};
use swipe_core::{
    ChangeSource, DetachedGesture, DragEvent, DragOutcome, GestureArbiter, Measurement,
    PageScrollLock, ScrollEvent, ScrollPermission, SheetAnimator, SheetConfig, SheetState,
    SheetStateContainer,
};

/// Class that lets the sheet content scroll natively.
pub const SCROLL_CLASS: &str = "swipe_scroll";

/// CSS-like `overflow` of the page body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Overflow {
    #[default]
    Auto,
    Hidden,
}

/// CSS-like `overscroll-behavior` of the page body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverscrollBehavior {
    #[default]
    Auto,
    None,
}

/// Scroll-related style of the page body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BodyStyle {
    pub overflow: Overflow,
    pub overscroll_behavior: OverscrollBehavior,
    /// Number of style writes, for checking that redundant locks are skipped.
    #[serde(skip)]
    pub writes: u32,
}

impl BodyStyle {
    pub fn is_locked(&self) -> bool {
        self.overflow == Overflow::Hidden && self.overscroll_behavior == OverscrollBehavior::None
    }
}

impl PageScrollLock for BodyStyle {
    fn set_locked(&mut self, locked: bool) {
        if locked {
            self.overflow = Overflow::Hidden;
            self.overscroll_behavior = OverscrollBehavior::None;
        } else {
            self.overflow = Overflow::Auto;
            self.overscroll_behavior = OverscrollBehavior::Auto;
        }
        self.writes = self.writes.saturating_add(1);
    }
}

/// Class list of the sheet surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurfaceClasses {
    classes: Vec<String>,
}

impl SurfaceClasses {
    pub fn contains(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add(&mut self, class: &str) {
        if !self.contains(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }
}

impl ScrollPermission for SurfaceClasses {
    fn set_scrollable(&mut self, scrollable: bool) {
        if scrollable {
            self.add(SCROLL_CLASS);
        } else {
            self.remove(SCROLL_CLASS);
        }
    }
}

/// Arbiter wired to the page's body, surface and spring.
pub type PageArbiter = GestureArbiter<SpringAnimator, BodyStyle, SurfaceClasses>;

/// Observable page state at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetSnapshot {
    pub state: SheetState,
    /// Offset the sheet is currently drawn at.
    pub offset: f32,
    /// Offset the spring is heading to.
    pub target: Option<f32>,
    pub body: BodyStyle,
    pub scrollable: bool,
    pub dragging: bool,
    pub animating: bool,
}

/// Pointer gesture in progress.
#[derive(Debug, Clone, Copy)]
struct Pointer {
    origin: f32,
    delta_y: f32,
}

/// One sheet mounted on a headless page.
pub struct HeadlessPage {
    host: SheetStateContainer,
    arbiter: PageArbiter,
    scheduler: Arc<Mutex<AnimationScheduler>>,
    measurement: Measurement,
    pointer: Option<Pointer>,
}

impl HeadlessPage {
    /// Mount a sheet in `initial` state; it springs in from the bottom edge.
    pub fn new(
        config: SheetConfig,
        spring: SpringConfig,
        initial: SheetState,
        measurement: Measurement,
    ) -> Result<Self> {
        config.validate()?;
        let scheduler = Arc::new(Mutex::new(AnimationScheduler::new()));
        let animator = SpringAnimator::new(spring, 0.0, &scheduler);
        let mut arbiter = GestureArbiter::new(
            config,
            initial,
            animator,
            BodyStyle::default(),
            SurfaceClasses::default(),
        );
        arbiter.mount(&measurement);

        Ok(Self {
            host: SheetStateContainer::new(initial),
            arbiter,
            scheduler,
            measurement,
            pointer: None,
        })
    }

    /// Let the page veto gesture-driven transitions.
    pub fn with_guard<F>(mut self, guard: F) -> Self
    where
        F: FnMut(SheetState, SheetState) -> bool + 'static,
    {
        self.host = std::mem::take(&mut self.host).with_guard(guard);
        self
    }

    pub fn state(&self) -> SheetState {
        self.host.current()
    }

    pub fn measurement(&self) -> &Measurement {
        &self.measurement
    }

    pub fn arbiter(&self) -> &PageArbiter {
        &self.arbiter
    }

    pub fn body(&self) -> &BodyStyle {
        self.arbiter.scroll_lock().primitive()
    }

    pub fn surface(&self) -> &SurfaceClasses {
        self.arbiter.permission()
    }

    pub fn transitions(&self) -> &[(SheetState, SheetState, ChangeSource)] {
        self.host.history()
    }

    pub fn is_pointer_down(&self) -> bool {
        self.pointer.is_some()
    }

    /// Press on the sheet; a press while already down restarts the gesture.
    ///
    /// Scrolled content can claim the gesture right away, in which case the
    /// release is delivered immediately.
    pub fn pointer_down(&mut self) -> DragOutcome {
        let origin = self.arbiter.animator().value();
        self.pointer = Some(Pointer {
            origin,
            delta_y: 0.0,
        });
        let outcome = self.dispatch(DragEvent::start(origin));
        if outcome.cancelled {
            return self.pointer_up().unwrap_or(outcome);
        }
        outcome
    }

    /// Move the pressed pointer to `delta_y` from where it went down.
    ///
    /// Returns `None` when no gesture is in progress. A tick that cancels the
    /// native gesture also delivers its release.
    pub fn pointer_move(&mut self, delta_y: f32) -> Option<DragOutcome> {
        let pointer = self.pointer.as_mut()?;
        pointer.delta_y = delta_y;
        let offset = pointer.origin + delta_y;

        let outcome = self.dispatch(DragEvent::moving(delta_y, offset));
        if outcome.cancelled {
            tracing::debug!(delta_y, "native drag cancelled");
            return self.pointer_up();
        }
        Some(outcome)
    }

    /// Lift the pointer.
    pub fn pointer_up(&mut self) -> Option<DragOutcome> {
        let pointer = self.pointer.take()?;
        Some(self.dispatch(DragEvent::release(
            pointer.delta_y,
            pointer.origin + pointer.delta_y,
        )))
    }

    /// Scroll the sheet content; `None` is a reading without a position.
    pub fn scroll_content(&mut self, scroll_top: Option<f32>) -> bool {
        self.arbiter
            .on_scroll(&ScrollEvent { scroll_top }, &mut self.host, &self.measurement)
    }

    /// Write the state from outside the gesture path.
    pub fn set_state(&mut self, state: SheetState) -> bool {
        if !self.host.set_state(state) {
            return false;
        }
        self.arbiter
            .sync_from_host(self.host.current(), &self.measurement);
        true
    }

    /// Cycle Hidden → Half → Full → Hidden.
    pub fn toggle(&mut self) -> SheetState {
        let state = self.host.toggle();
        self.arbiter.sync_from_host(state, &self.measurement);
        state
    }

    pub fn tap_header(&mut self) -> bool {
        self.arbiter
            .on_header_tap(&mut self.host, &self.measurement)
    }

    /// Replace the layout measurement (content or viewport changed).
    pub fn resize(&mut self, measurement: Measurement) {
        if measurement == self.measurement {
            return;
        }
        tracing::debug!(?measurement, "page resized");
        self.measurement = measurement;
        self.arbiter.on_measurement_changed(&self.measurement);
    }

    /// Advance the animation clock by `dt` seconds.
    pub fn advance(&mut self, dt: f32) -> Result<()> {
        let mut scheduler = self
            .scheduler
            .lock()
            .map_err(|_| anyhow!("animation scheduler poisoned"))?;
        scheduler.tick_by(dt);
        Ok(())
    }

    pub fn is_animating(&self) -> bool {
        self.scheduler
            .lock()
            .map(|scheduler| scheduler.has_active_animations())
            .unwrap_or(false)
    }

    pub fn snapshot(&self) -> SheetSnapshot {
        let animator = self.arbiter.animator();
        SheetSnapshot {
            state: self.host.current(),
            offset: animator.value(),
            target: animator.target(),
            body: *self.body(),
            scrollable: self.surface().contains(SCROLL_CLASS),
            dragging: self.arbiter.is_dragging(),
            animating: self.is_animating(),
        }
    }

    fn dispatch(&mut self, event: DragEvent) -> DragOutcome {
        let mut gesture = DetachedGesture::new();
        self.arbiter
            .on_drag(&event, &mut gesture, &mut self.host, &self.measurement)
    }
}

impl std::fmt::Debug for HeadlessPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessPage")
            .field("host", &self.host)
            .field("arbiter", &self.arbiter)
            .field("measurement", &self.measurement)
            .field("pointer", &self.pointer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(initial: SheetState) -> HeadlessPage {
        HeadlessPage::new(
            SheetConfig::default(),
            SpringConfig::sheet(),
            initial,
            Measurement::new(500.0, 40.0, 800.0),
        )
        .unwrap()
    }

    fn settle(page: &mut HeadlessPage) {
        for _ in 0..600 {
            if !page.is_animating() {
                return;
            }
            page.advance(1.0 / 60.0).unwrap();
        }
        panic!("sheet never settled");
    }

    #[test]
    fn test_mount_applies_lock_and_scroll_class() {
        let mut full = page(SheetState::Full);
        settle(&mut full);
        assert!(full.body().is_locked());
        assert!(full.surface().contains(SCROLL_CLASS));
        assert_eq!(full.snapshot().offset, -500.0);

        let hidden = page(SheetState::Hidden);
        assert!(!hidden.body().is_locked());
        assert_eq!(hidden.surface().iter().count(), 0);
    }

    #[test]
    fn test_pointer_swipe_opens_full() {
        let mut page = page(SheetState::Half);
        settle(&mut page);

        page.pointer_down();
        for delta in [-30.0, -60.0, -90.0, -120.0] {
            page.pointer_move(delta);
            page.advance(1.0 / 60.0).unwrap();
        }
        page.pointer_up();
        settle(&mut page);

        assert_eq!(page.state(), SheetState::Full);
        assert_eq!(page.snapshot().offset, -500.0);
        assert_eq!(
            page.transitions(),
            &[(SheetState::Half, SheetState::Full, ChangeSource::Gesture)]
        );
    }

    #[test]
    fn test_scrolled_content_ends_the_drag() {
        let mut page = page(SheetState::Full);
        settle(&mut page);
        page.scroll_content(Some(120.0));

        let outcome = page.pointer_down();
        assert!(outcome.cancelled);
        assert!(!page.is_pointer_down());
        assert!(page.pointer_move(80.0).is_none());

        settle(&mut page);
        assert_eq!(page.state(), SheetState::Full);
        assert_eq!(page.snapshot().offset, -500.0);
    }

    #[test]
    fn test_external_writes_resync_arbiter() {
        let mut page = page(SheetState::Hidden);
        assert!(page.set_state(SheetState::Full));
        assert!(!page.set_state(SheetState::Full));
        assert_eq!(page.arbiter().state(), SheetState::Full);
        assert!(page.body().is_locked());

        assert_eq!(page.toggle(), SheetState::Hidden);
        settle(&mut page);
        assert!(!page.body().is_locked());
        assert_eq!(page.snapshot().offset, -40.0);
    }

    #[test]
    fn test_guard_keeps_sheet_open() {
        let mut page = page(SheetState::Half).with_guard(|_, to| to != SheetState::Hidden);
        settle(&mut page);

        page.pointer_down();
        page.pointer_move(150.0);
        page.pointer_up();
        settle(&mut page);

        assert_eq!(page.state(), SheetState::Half);
        assert_eq!(page.snapshot().offset, -250.0);
    }

    #[test]
    fn test_redundant_locks_are_not_rewritten() {
        let mut page = page(SheetState::Half);
        let writes = page.body().writes;

        page.pointer_down();
        page.pointer_move(-10.0);
        page.pointer_move(-20.0);
        page.pointer_up();
        assert_eq!(page.body().writes, writes);
    }
}
