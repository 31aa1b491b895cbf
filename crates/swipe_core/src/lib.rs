//! Swipe Core
//!
//! State resolution and gesture arbitration for a three-state bottom sheet:
//!
//! - **Height Resolver**: maps hidden/half/full onto pixel offsets
//! - **Gesture Arbiter**: turns drag and content-scroll streams into state
//!   transitions without letting the two fight
//! - **Scroll Lock**: keeps the page from overscrolling while the sheet is open
//! - **State Container**: the host-owned source of truth the arbiter proposes to
//!
//! Side effects go through the capability traits in [`capability`], so the
//! state machine runs unchanged against a real surface or a headless model.
//!
//! # Example
//!
//! ```rust
//! use swipe_core::{
//!     DetachedGesture, DragEvent, GestureArbiter, Measurement, PageScrollLock,
//!     ScrollPermission, SheetAnimator, SheetConfig, SheetState, SheetStateContainer,
//! };
//!
//! #[derive(Default)]
//! struct Jump(f32);
//! impl SheetAnimator for Jump {
//!     fn start(&mut self, target: f32, _immediate: bool) { self.0 = target; }
//!     fn value(&self) -> f32 { self.0 }
//! }
//!
//! struct Nothing;
//! impl PageScrollLock for Nothing { fn set_locked(&mut self, _: bool) {} }
//! impl ScrollPermission for Nothing { fn set_scrollable(&mut self, _: bool) {} }
//!
//! let measurement = Measurement::new(500.0, 40.0, 800.0);
//! let mut host = SheetStateContainer::new(SheetState::Half);
//! let mut arbiter = GestureArbiter::new(
//!     SheetConfig::default(),
//!     SheetState::Half,
//!     Jump::default(),
//!     Nothing,
//!     Nothing,
//! );
//!
//! // Swipe up past the half line and let go
//! let mut gesture = DetachedGesture::new();
//! arbiter.on_drag(&DragEvent::release(-120.0, -300.0), &mut gesture, &mut host, &measurement);
//!
//! assert_eq!(host.current(), SheetState::Full);
//! assert_eq!(arbiter.animator().value(), -500.0);
//! ```

pub mod arbiter;
pub mod capability;
pub mod config;
pub mod container;
pub mod error;
pub mod gesture;
pub mod measure;
pub mod scroll_lock;
pub mod state;

pub use arbiter::{DragOutcome, GestureArbiter};
pub use capability::{DetachedGesture, DragGesture, PageScrollLock, ScrollPermission, SheetAnimator};
pub use config::SheetConfig;
pub use container::{ChangeSource, SheetHost, SheetStateContainer};
pub use error::{Result, SheetError};
pub use gesture::{DragEvent, GestureMemory, ScrollEvent};
pub use measure::{HeightResolver, Measurement};
pub use scroll_lock::ScrollLockController;
pub use state::{sheet_events, SheetEvent, SheetState};
