//! Sheet motion driven by the gesture arbiter through scheduled springs

use std::sync::{Arc, Mutex};

use swipe_animation::{AnimationScheduler, SpringAnimator, SpringConfig};
use swipe_core::{
    DetachedGesture, DragEvent, GestureArbiter, Measurement, PageScrollLock, ScrollPermission,
    SheetAnimator, SheetConfig, SheetState, SheetStateContainer,
};

struct Ignore;

impl PageScrollLock for Ignore {
    fn set_locked(&mut self, _locked: bool) {}
}

impl ScrollPermission for Ignore {
    fn set_scrollable(&mut self, _scrollable: bool) {}
}

fn settle(scheduler: &Arc<Mutex<AnimationScheduler>>) -> usize {
    let mut frames = 0;
    while scheduler.lock().unwrap().has_active_animations() {
        scheduler.lock().unwrap().tick_by(1.0 / 60.0);
        frames += 1;
        assert!(frames < 600, "spring never settled");
    }
    frames
}

fn arbiter(
    scheduler: &Arc<Mutex<AnimationScheduler>>,
    state: SheetState,
) -> GestureArbiter<SpringAnimator, Ignore, Ignore> {
    GestureArbiter::new(
        SheetConfig::default(),
        state,
        SpringAnimator::new(SpringConfig::sheet(), 0.0, scheduler),
        Ignore,
        Ignore,
    )
}

#[test]
fn test_mount_springs_to_resting_offset() {
    let scheduler = Arc::new(Mutex::new(AnimationScheduler::new()));
    let measurement = Measurement::new(500.0, 40.0, 800.0);
    let mut arbiter = arbiter(&scheduler, SheetState::Half);

    arbiter.mount(&measurement);
    assert_eq!(arbiter.animator().value(), 0.0);

    assert!(settle(&scheduler) > 1);
    assert_eq!(arbiter.animator().value(), -250.0);
}

#[test]
fn test_release_after_swipe_settles_on_full() {
    let scheduler = Arc::new(Mutex::new(AnimationScheduler::new()));
    let measurement = Measurement::new(500.0, 40.0, 800.0);
    let mut arbiter = arbiter(&scheduler, SheetState::Half);
    let mut host = SheetStateContainer::new(SheetState::Half);
    arbiter.mount(&measurement);
    settle(&scheduler);

    let mut gesture = DetachedGesture::new();
    arbiter.on_drag(&DragEvent::start(-250.0), &mut gesture, &mut host, &measurement);
    for step in 1..=6 {
        let delta = -20.0 * step as f32;
        arbiter.on_drag(
            &DragEvent::moving(delta, -250.0 + delta),
            &mut gesture,
            &mut host,
            &measurement,
        );
        scheduler.lock().unwrap().tick_by(1.0 / 60.0);
    }
    arbiter.on_drag(
        &DragEvent::release(-120.0, -370.0),
        &mut gesture,
        &mut host,
        &measurement,
    );

    settle(&scheduler);
    assert_eq!(host.current(), SheetState::Full);
    assert_eq!(arbiter.animator().value(), -500.0);
}

#[test]
fn test_drag_past_full_is_resisted() {
    let scheduler = Arc::new(Mutex::new(AnimationScheduler::new()));
    let measurement = Measurement::new(500.0, 40.0, 800.0);
    let mut arbiter = arbiter(&scheduler, SheetState::Full);
    let mut host = SheetStateContainer::new(SheetState::Full);
    arbiter.mount(&measurement);
    settle(&scheduler);

    let mut gesture = DetachedGesture::new();
    arbiter.on_drag(&DragEvent::start(-500.0), &mut gesture, &mut host, &measurement);
    arbiter.on_drag(
        &DragEvent::moving(-60.0, -560.0),
        &mut gesture,
        &mut host,
        &measurement,
    );

    let target = arbiter.animator().target().unwrap();
    assert!(target < -500.0 && target > -560.0, "target {target}");

    arbiter.on_drag(
        &DragEvent::release(-60.0, -560.0),
        &mut gesture,
        &mut host,
        &measurement,
    );
    settle(&scheduler);
    assert_eq!(arbiter.animator().value(), -500.0);
}

#[test]
fn test_content_growth_moves_full_sheet() {
    let scheduler = Arc::new(Mutex::new(AnimationScheduler::new()));
    let short = Measurement::new(500.0, 40.0, 300.0);
    let mut arbiter = arbiter(&scheduler, SheetState::Full);
    arbiter.mount(&short);
    settle(&scheduler);
    assert_eq!(arbiter.animator().value(), -300.0);

    arbiter.on_measurement_changed(&short.with_content_height(450.0));
    settle(&scheduler);
    assert_eq!(arbiter.animator().value(), -450.0);
}
