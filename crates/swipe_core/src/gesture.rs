//! Gesture input and per-interaction memory

/// One tick of a drag gesture
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragEvent {
    /// Cumulative vertical movement since the gesture started (negative = up)
    pub delta_y: f32,
    /// Live sheet offset the gesture has dragged to
    pub offset_y: f32,
    /// Pointer still down
    pub active: bool,
    /// First tick of a new gesture
    pub first: bool,
}

impl DragEvent {
    /// A tick in the middle of an active drag
    pub fn moving(delta_y: f32, offset_y: f32) -> Self {
        Self {
            delta_y,
            offset_y,
            active: true,
            first: false,
        }
    }

    /// The opening tick of a drag
    pub fn start(offset_y: f32) -> Self {
        Self {
            delta_y: 0.0,
            offset_y,
            active: true,
            first: true,
        }
    }

    /// The pointer-up tick
    pub fn release(delta_y: f32, offset_y: f32) -> Self {
        Self {
            delta_y,
            offset_y,
            active: false,
            first: false,
        }
    }

    pub(crate) fn is_well_formed(&self) -> bool {
        self.delta_y.is_finite() && self.offset_y.is_finite()
    }
}

/// A scroll reading from the sheet content
///
/// `scroll_top` is `None` when the platform reports no position, which
/// happens on some touch devices once deceleration stops. That is not the
/// same as being at the top.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollEvent {
    pub scroll_top: Option<f32>,
}

impl ScrollEvent {
    pub fn at(scroll_top: f32) -> Self {
        Self {
            scroll_top: Some(scroll_top),
        }
    }

    pub fn unknown() -> Self {
        Self { scroll_top: None }
    }

    /// Whether this reading is exactly the content top
    pub fn is_at_origin(&self) -> bool {
        self.scroll_top == Some(0.0)
    }
}

/// What the arbiter remembers between drag and scroll events
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GestureMemory {
    /// Last cumulative drag delta seen (positive = downward)
    pub last_drag_delta_y: f32,
    /// Last defined content scroll position, if any was ever reported
    pub last_scroll_top: Option<f32>,
}

impl GestureMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh drag begins a new interaction
    pub fn begin_drag(&mut self) {
        self.last_drag_delta_y = 0.0;
    }

    pub fn record_drag(&mut self, delta_y: f32) {
        self.last_drag_delta_y = delta_y;
    }

    /// Remember a scroll reading; undefined readings keep the last known value
    pub fn record_scroll(&mut self, scroll_top: Option<f32>) {
        if let Some(top) = scroll_top.filter(|top| top.is_finite()) {
            self.last_scroll_top = Some(top);
        }
    }

    /// Forget residual drag movement once the content leaves its top
    pub fn clear_drag(&mut self) {
        self.last_drag_delta_y = 0.0;
    }

    /// Content is at (or above) its top, or was never scrolled
    pub fn content_at_top(&self) -> bool {
        self.last_scroll_top.map_or(true, |top| top <= 0.0)
    }

    /// Content has scrolled further than `threshold`
    pub fn content_scrolled_past(&self, threshold: f32) -> bool {
        self.last_scroll_top.is_some_and(|top| top > threshold)
    }

    /// Net downward drag was recorded
    pub fn swiping_down(&self) -> bool {
        self.last_drag_delta_y > 0.0
    }
}
