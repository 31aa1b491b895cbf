//! Discrete sheet states
//!
//! The sheet always rests in exactly one of three states. Swipe commits are
//! resolved against live offsets by the arbiter; the event-driven transitions
//! here cover everything that does not depend on geometry.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SheetError};

/// Event identifier for geometry-free sheet transitions
pub type SheetEvent = u32;

/// Sheet events that map directly onto state transitions
pub mod sheet_events {
    use super::SheetEvent;

    /// Downward swipe on a full sheet whose content sits at its top
    pub const SWIPE_CLOSE: SheetEvent = 1;
    /// Tap on the sheet header
    pub const HEADER_TAP: SheetEvent = 2;
    /// Programmatic "next state" request from the host page
    pub const TOGGLE: SheetEvent = 3;
}

/// Presentation state of the sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum SheetState {
    /// Collapsed down to the header (or fully off-screen)
    #[default]
    Hidden,
    /// Open to half of the available viewport
    Half,
    /// Open as far as the content needs, capped at the viewport
    Full,
}

impl SheetState {
    /// All states, ordered from closed to open
    pub const ALL: [SheetState; 3] = [SheetState::Hidden, SheetState::Half, SheetState::Full];

    /// Numeric id (0 = hidden, 1 = half, 2 = full)
    pub fn to_id(&self) -> u32 {
        match self {
            SheetState::Hidden => 0,
            SheetState::Half => 1,
            SheetState::Full => 2,
        }
    }

    /// Convert from a numeric id, if valid
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            0 => Some(SheetState::Hidden),
            1 => Some(SheetState::Half),
            2 => Some(SheetState::Full),
            _ => None,
        }
    }

    /// Whether the sheet covers any of the page (locks page scrolling)
    pub fn is_open(&self) -> bool {
        *self > SheetState::Hidden
    }

    /// Whether the sheet content may scroll natively
    pub fn allows_content_scroll(&self) -> bool {
        *self == SheetState::Full
    }

    /// Next state in the host page's toggle cycle
    pub fn next_cyclic(&self) -> Self {
        match self {
            SheetState::Hidden => SheetState::Half,
            SheetState::Half => SheetState::Full,
            SheetState::Full => SheetState::Hidden,
        }
    }

    /// Handle a geometry-free event and return the new state, or None if no transition
    pub fn on_event(&self, event: SheetEvent) -> Option<Self> {
        use sheet_events::*;
        match (self, event) {
            (SheetState::Full, SWIPE_CLOSE) => Some(SheetState::Half),
            (SheetState::Hidden, HEADER_TAP) => Some(SheetState::Half),
            (_, TOGGLE) => Some(self.next_cyclic()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SheetState::Hidden => "hidden",
            SheetState::Half => "half",
            SheetState::Full => "full",
        }
    }
}

impl TryFrom<u32> for SheetState {
    type Error = SheetError;

    fn try_from(id: u32) -> Result<Self> {
        SheetState::from_id(id).ok_or(SheetError::InvalidState(id))
    }
}

impl From<SheetState> for u32 {
    fn from(state: SheetState) -> u32 {
        state.to_id()
    }
}

impl FromStr for SheetState {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hidden" => Ok(SheetState::Hidden),
            "half" => Ok(SheetState::Half),
            "full" => Ok(SheetState::Full),
            other => Err(SheetError::UnknownStateName(other.to_string())),
        }
    }
}

impl fmt::Display for SheetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
