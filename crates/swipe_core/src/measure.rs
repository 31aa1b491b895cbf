//! Layout measurements and state-to-offset resolution
//!
//! Offsets are vertical displacements of the sheet from its closed
//! position. They are non-positive: 0 is closed, more negative is more open.

use crate::config::SheetConfig;
use crate::state::SheetState;

/// Layout measurements supplied by the host on every call
///
/// A measurement taken before the sheet is mounted is simply all zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Measurement {
    /// Vertical space the sheet may occupy (px)
    pub viewport_available_height: f32,
    /// Height of the sheet header (px)
    pub header_height: f32,
    /// Height of the sheet content including the header (px)
    pub content_height: f32,
}

impl Measurement {
    pub fn new(viewport_available_height: f32, header_height: f32, content_height: f32) -> Self {
        Self {
            viewport_available_height,
            header_height,
            content_height,
        }
    }

    /// Derive the viewport budget from the page element the sheet must not cover
    ///
    /// The sheet may use everything below the anchor's bottom edge.
    pub fn below_anchor(
        window_height: f32,
        anchor_top: f32,
        anchor_height: f32,
        header_height: f32,
        content_height: f32,
    ) -> Self {
        let available = sanitize(window_height) - sanitize(anchor_top) - sanitize(anchor_height);
        Self::new(available.max(0.0), header_height, content_height)
    }

    pub fn with_content_height(mut self, content_height: f32) -> Self {
        self.content_height = content_height;
        self
    }

    pub fn with_viewport(mut self, viewport_available_height: f32) -> Self {
        self.viewport_available_height = viewport_available_height;
        self
    }

    fn viewport(&self) -> f32 {
        sanitize(self.viewport_available_height)
    }

    fn header(&self) -> f32 {
        sanitize(self.header_height)
    }

    fn content(&self) -> f32 {
        sanitize(self.content_height)
    }
}

/// Non-finite and negative readings count as zero
fn sanitize(px: f32) -> f32 {
    if px.is_finite() && px > 0.0 {
        px
    } else {
        0.0
    }
}

/// Maps discrete states onto pixel offsets
#[derive(Debug, Clone, Copy, Default)]
pub struct HeightResolver {
    reserve_header: bool,
    adaptive_height: bool,
    full_floor_at_half: bool,
}

impl HeightResolver {
    pub fn new(config: &SheetConfig) -> Self {
        Self {
            reserve_header: config.reserve_header,
            adaptive_height: config.adaptive_height,
            full_floor_at_half: config.full_floor_at_half,
        }
    }

    /// Offset the sheet rests at in `state`
    pub fn offset_for(&self, state: SheetState, measurement: &Measurement) -> f32 {
        let viewport = measurement.viewport();
        let height = match state {
            SheetState::Hidden => {
                if self.reserve_header {
                    measurement.header()
                } else {
                    0.0
                }
            }
            SheetState::Half => viewport / 2.0,
            SheetState::Full => {
                let open = if self.adaptive_height {
                    measurement.content().min(viewport)
                } else {
                    viewport
                };
                if self.full_floor_at_half {
                    open.max(viewport / 2.0)
                } else {
                    open
                }
            }
        };
        // Avoid handing out -0.0
        if height > 0.0 {
            -height
        } else {
            0.0
        }
    }

    /// Most-open and most-closed resting offsets, as `(min, max)`
    pub fn bounds(&self, measurement: &Measurement) -> (f32, f32) {
        let offsets = SheetState::ALL.map(|state| self.offset_for(state, measurement));
        let min = offsets.iter().copied().fold(0.0_f32, f32::min);
        let max = offsets.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> HeightResolver {
        HeightResolver::new(&SheetConfig::default())
    }

    #[test]
    fn test_full_is_capped_at_viewport() {
        let m = Measurement::new(500.0, 40.0, 800.0);
        assert_eq!(resolver().offset_for(SheetState::Full, &m), -500.0);
    }

    #[test]
    fn test_full_adapts_to_content() {
        let m = Measurement::new(500.0, 40.0, 300.0);
        assert_eq!(resolver().offset_for(SheetState::Full, &m), -300.0);
    }

    #[test]
    fn test_hidden_and_half() {
        let m = Measurement::new(500.0, 40.0, 300.0);
        assert_eq!(resolver().offset_for(SheetState::Hidden, &m), -40.0);
        assert_eq!(resolver().offset_for(SheetState::Half, &m), -250.0);

        let no_header = HeightResolver::new(&SheetConfig::new().reserve_header(false));
        assert_eq!(no_header.offset_for(SheetState::Hidden, &m), 0.0);
    }

    #[test]
    fn test_non_adaptive_and_floor() {
        let m = Measurement::new(500.0, 40.0, 100.0);

        let fixed = HeightResolver::new(&SheetConfig::new().adaptive_height(false));
        assert_eq!(fixed.offset_for(SheetState::Full, &m), -500.0);

        let floored = HeightResolver::new(&SheetConfig::new().full_floor_at_half(true));
        assert_eq!(floored.offset_for(SheetState::Full, &m), -250.0);
    }

    #[test]
    fn test_degenerate_measurements_resolve_to_zero() {
        let r = resolver();
        for state in SheetState::ALL {
            assert_eq!(r.offset_for(state, &Measurement::default()), 0.0);
        }

        let bad = Measurement::new(f32::NAN, -10.0, f32::INFINITY);
        for state in SheetState::ALL {
            assert_eq!(r.offset_for(state, &bad), 0.0);
        }
    }

    #[test]
    fn test_below_anchor() {
        let m = Measurement::below_anchor(800.0, 0.0, 120.0, 40.0, 0.0);
        assert_eq!(m.viewport_available_height, 680.0);

        let clipped = Measurement::below_anchor(100.0, 50.0, 120.0, 40.0, 0.0);
        assert_eq!(clipped.viewport_available_height, 0.0);
    }

    #[test]
    fn test_bounds() {
        let m = Measurement::new(500.0, 40.0, 800.0);
        assert_eq!(resolver().bounds(&m), (-500.0, -40.0));
    }
}
