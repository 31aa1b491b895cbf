//! Gesture arbitration between sheet drags and content scrolling
//!
//! The arbiter turns a stream of drag ticks and content scroll readings into
//! discrete sheet states. Drags commit a state change once they travel past
//! the commit threshold; which state they land in depends on whether the live
//! offset has crossed the half-open line. Content scrolling and sheet dragging
//! are kept from fighting each other through [`GestureMemory`]:
//!
//! - a drag on content that is already scrolled down is cancelled, so the
//!   content keeps scrolling natively;
//! - a downward swipe on a full sheet whose content sits at its top collapses
//!   the sheet to half, from either event path.
//!
//! All handlers run to completion synchronously and never fail. Malformed
//! input is ignored and the previous state is kept.

use crate::capability::{DragGesture, PageScrollLock, ScrollPermission, SheetAnimator};
use crate::config::SheetConfig;
use crate::container::SheetHost;
use crate::gesture::{DragEvent, GestureMemory, ScrollEvent};
use crate::measure::{HeightResolver, Measurement};
use crate::scroll_lock::ScrollLockController;
use crate::state::{sheet_events, SheetState};

/// Result of handling one drag tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOutcome {
    /// State after the tick
    pub state: SheetState,
    /// State the swipe resolved to, if it passed the commit threshold
    pub committed: Option<SheetState>,
    /// Offset handed to the animator
    pub target: f32,
    /// The native gesture was cancelled during this tick
    pub cancelled: bool,
}

/// Gesture state machine for one mounted sheet
pub struct GestureArbiter<A, L, P>
where
    A: SheetAnimator,
    L: PageScrollLock,
    P: ScrollPermission,
{
    config: SheetConfig,
    resolver: HeightResolver,
    /// Mirror of the host's state, resynchronised via `sync_from_host`
    state: SheetState,
    memory: GestureMemory,
    dragging: bool,
    resting_target: Option<f32>,
    animator: A,
    scroll_lock: ScrollLockController<L>,
    permission: P,
}

impl<A, L, P> GestureArbiter<A, L, P>
where
    A: SheetAnimator,
    L: PageScrollLock,
    P: ScrollPermission,
{
    pub fn new(config: SheetConfig, state: SheetState, animator: A, lock: L, permission: P) -> Self {
        Self {
            resolver: HeightResolver::new(&config),
            config,
            state,
            memory: GestureMemory::new(),
            dragging: false,
            resting_target: None,
            animator,
            scroll_lock: ScrollLockController::new(lock),
            permission,
        }
    }

    pub fn state(&self) -> SheetState {
        self.state
    }

    pub fn memory(&self) -> &GestureMemory {
        &self.memory
    }

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }

    pub fn scroll_lock(&self) -> &ScrollLockController<L> {
        &self.scroll_lock
    }

    pub fn permission(&self) -> &P {
        &self.permission
    }

    /// Resting offset for `state` under the current measurement
    pub fn offset_for(&self, state: SheetState, measurement: &Measurement) -> f32 {
        self.resolver.offset_for(state, measurement)
    }

    /// Place the sheet at its current state when first shown
    pub fn mount(&mut self, measurement: &Measurement) {
        tracing::debug!(state = %self.state, ?measurement, "mounting sheet");
        self.settle(measurement);
        self.scroll_lock.set_locked(self.state.is_open());
        self.permission
            .set_scrollable(self.state.allows_content_scroll());
    }

    /// Handle one drag tick
    pub fn on_drag(
        &mut self,
        drag: &DragEvent,
        gesture: &mut dyn DragGesture,
        host: &mut dyn SheetHost,
        measurement: &Measurement,
    ) -> DragOutcome {
        if !drag.is_well_formed() {
            tracing::trace!(?drag, "ignoring malformed drag event");
            return DragOutcome {
                state: self.state,
                committed: None,
                target: self.animator.value(),
                cancelled: false,
            };
        }

        if drag.first {
            self.memory.begin_drag();
        }
        self.dragging = drag.active;
        self.memory.record_drag(drag.delta_y);

        let mut cancelled = false;
        if self
            .memory
            .content_scrolled_past(self.config.scroll_cancel_threshold)
        {
            tracing::trace!(
                scroll_top = ?self.memory.last_scroll_top,
                "content scrolled, yielding drag to native scroll"
            );
            gesture.cancel();
            cancelled = true;
        }

        let committed = self.resolve_swipe(drag, measurement);
        if let Some(next) = committed {
            self.propose(next, host);
            if self.config.cancel_on_commit && !cancelled {
                gesture.cancel();
                cancelled = true;
            }
        }

        self.scroll_lock.set_locked(self.state.is_open());
        self.close_on_swipe(host, measurement, false);
        self.permission
            .set_scrollable(self.state.allows_content_scroll());

        let target = if drag.active {
            self.update_bounds(measurement);
            self.resting_target = None;
            self.animator.start(drag.offset_y, false);
            drag.offset_y
        } else {
            self.settle(measurement)
        };

        tracing::trace!(
            delta_y = drag.delta_y,
            offset_y = drag.offset_y,
            active = drag.active,
            state = %self.state,
            target_offset = target,
            "drag tick"
        );

        DragOutcome {
            state: self.state,
            committed,
            target,
            cancelled,
        }
    }

    /// Handle a content scroll reading; returns true if it collapsed the sheet
    pub fn on_scroll(
        &mut self,
        scroll: &ScrollEvent,
        host: &mut dyn SheetHost,
        measurement: &Measurement,
    ) -> bool {
        self.memory.record_scroll(scroll.scroll_top);

        let closed = self.close_on_swipe(host, measurement, true);

        // Content away from its top absorbs downward motion itself
        if !scroll.is_at_origin() {
            self.memory.clear_drag();
        }

        tracing::trace!(
            scroll_top = ?scroll.scroll_top,
            remembered = ?self.memory.last_scroll_top,
            closed,
            "scroll"
        );
        closed
    }

    /// Open a hidden sheet to half when its header is tapped
    pub fn on_header_tap(&mut self, host: &mut dyn SheetHost, measurement: &Measurement) -> bool {
        let Some(next) = self.state.on_event(sheet_events::HEADER_TAP) else {
            return false;
        };
        if !self.propose(next, host) {
            return false;
        }
        self.settle(measurement);
        self.scroll_lock.set_locked(self.state.is_open());
        self.permission
            .set_scrollable(self.state.allows_content_scroll());
        true
    }

    /// Adopt a state the host changed on its own
    ///
    /// Returns false (and touches nothing) when the state is already known.
    pub fn sync_from_host(&mut self, state: SheetState, measurement: &Measurement) -> bool {
        if state == self.state {
            return false;
        }
        tracing::debug!(from = %self.state, to = %state, "resynchronising from host");
        self.state = state;
        self.settle(measurement);
        self.scroll_lock.set_locked(self.state.is_open());
        self.permission
            .set_scrollable(self.state.allows_content_scroll());
        true
    }

    /// Re-target the resting offset after content or viewport size changed
    pub fn on_measurement_changed(&mut self, measurement: &Measurement) {
        if self.dragging {
            self.update_bounds(measurement);
            return;
        }
        self.settle(measurement);
    }

    /// Which state a drag past the commit threshold lands in
    fn resolve_swipe(&self, drag: &DragEvent, measurement: &Measurement) -> Option<SheetState> {
        let threshold = self.config.commit_threshold;
        let half = self.offset_for(SheetState::Half, measurement);

        if drag.delta_y < -threshold {
            // Above the half line means the sheet was pulled towards full
            Some(if drag.offset_y > half {
                SheetState::Half
            } else {
                SheetState::Full
            })
        } else if drag.delta_y > threshold {
            Some(if drag.offset_y < half {
                SheetState::Half
            } else {
                SheetState::Hidden
            })
        } else {
            None
        }
    }

    /// Collapse a full sheet on a downward swipe once its content is at the top
    fn close_on_swipe(
        &mut self,
        host: &mut dyn SheetHost,
        measurement: &Measurement,
        drive_animator: bool,
    ) -> bool {
        if !self.memory.swiping_down() || !self.memory.content_at_top() {
            return false;
        }
        let Some(next) = self.state.on_event(sheet_events::SWIPE_CLOSE) else {
            return false;
        };
        if !self.propose(next, host) {
            return false;
        }

        self.permission.set_scrollable(false);
        if drive_animator {
            self.settle(measurement);
        }
        true
    }

    /// Offer `next` to the host, keeping the mirror in step with its answer
    fn propose(&mut self, next: SheetState, host: &mut dyn SheetHost) -> bool {
        if next == self.state {
            return false;
        }
        if host.propose(next) {
            tracing::debug!(from = %self.state, to = %next, "sheet transition");
            self.state = next;
            true
        } else {
            self.state = host.state();
            false
        }
    }

    /// Animate to the resting offset of the current state
    fn settle(&mut self, measurement: &Measurement) -> f32 {
        self.update_bounds(measurement);
        let target = self.offset_for(self.state, measurement);
        if self.resting_target != Some(target) {
            self.animator.start(target, false);
            self.resting_target = Some(target);
        }
        target
    }

    fn update_bounds(&mut self, measurement: &Measurement) {
        let (min, max) = self.resolver.bounds(measurement);
        self.animator.set_bounds(min, max);
    }
}

impl<A, L, P> std::fmt::Debug for GestureArbiter<A, L, P>
where
    A: SheetAnimator,
    L: PageScrollLock,
    P: ScrollPermission,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureArbiter")
            .field("state", &self.state)
            .field("memory", &self.memory)
            .field("dragging", &self.dragging)
            .field("config", &self.config)
            .finish()
    }
}
