//! Authoritative sheet state, owned by the host page
//!
//! The arbiter only ever *proposes* a state. Whatever owns the sheet decides
//! whether to take it, which lets a host veto or log transitions and change
//! the state on its own (close buttons, deep links).

use smallvec::SmallVec;

use crate::state::{sheet_events, SheetState};

/// Guard deciding whether a proposed transition is accepted
pub type Guard = Box<dyn FnMut(SheetState, SheetState) -> bool>;

/// Listener notified after the state changed
pub type Listener = Box<dyn FnMut(SheetState, SheetState)>;

/// Where a state change originated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeSource {
    /// Proposed by the gesture arbiter
    Gesture,
    /// Written directly by the host
    External,
}

/// The write path from the arbiter into the owner of the sheet state
pub trait SheetHost {
    /// Current authoritative state
    fn state(&self) -> SheetState;

    /// Offer a new state; returns whether it was accepted
    fn propose(&mut self, state: SheetState) -> bool;
}

/// Default state owner with optional veto, listeners and history
pub struct SheetStateContainer {
    state: SheetState,
    guard: Option<Guard>,
    listeners: SmallVec<[Listener; 2]>,
    /// History of state changes (for diagnostics)
    history: Vec<(SheetState, SheetState, ChangeSource)>,
}

impl SheetStateContainer {
    pub fn new(initial: SheetState) -> Self {
        Self {
            state: initial,
            guard: None,
            listeners: SmallVec::new(),
            history: Vec::new(),
        }
    }

    /// Install a guard that can veto gesture proposals
    pub fn with_guard<F>(mut self, guard: F) -> Self
    where
        F: FnMut(SheetState, SheetState) -> bool + 'static,
    {
        self.guard = Some(Box::new(guard));
        self
    }

    /// Register a listener for state changes
    pub fn on_change<F>(&mut self, listener: F)
    where
        F: FnMut(SheetState, SheetState) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn current(&self) -> SheetState {
        self.state
    }

    /// Write the state directly, bypassing the guard
    ///
    /// Returns true if the state changed.
    pub fn set_state(&mut self, state: SheetState) -> bool {
        self.apply(state, ChangeSource::External)
    }

    /// Advance through Hidden → Half → Full → Hidden
    pub fn toggle(&mut self) -> SheetState {
        if let Some(next) = self.state.on_event(sheet_events::TOGGLE) {
            self.apply(next, ChangeSource::External);
        }
        self.state
    }

    pub fn history(&self) -> &[(SheetState, SheetState, ChangeSource)] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn apply(&mut self, state: SheetState, source: ChangeSource) -> bool {
        let previous = self.state;
        if previous == state {
            return false;
        }
        self.state = state;
        self.history.push((previous, state, source));
        tracing::debug!(from = %previous, to = %state, ?source, "sheet state changed");
        for listener in self.listeners.iter_mut() {
            listener(previous, state);
        }
        true
    }
}

impl Default for SheetStateContainer {
    fn default() -> Self {
        Self::new(SheetState::default())
    }
}

impl std::fmt::Debug for SheetStateContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetStateContainer")
            .field("state", &self.state)
            .field("guarded", &self.guard.is_some())
            .field("listeners", &self.listeners.len())
            .field("history", &self.history)
            .finish()
    }
}

impl SheetHost for SheetStateContainer {
    fn state(&self) -> SheetState {
        self.state
    }

    fn propose(&mut self, state: SheetState) -> bool {
        if state == self.state {
            return true;
        }
        let from = self.state;
        if let Some(guard) = self.guard.as_mut() {
            if !guard(from, state) {
                tracing::warn!(%from, to = %state, "sheet state proposal vetoed");
                return false;
            }
        }
        self.apply(state, ChangeSource::Gesture)
    }
}
