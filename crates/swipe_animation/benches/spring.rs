use criterion::{black_box, criterion_group, criterion_main, Criterion};
use swipe_animation::{AnimationScheduler, Spring, SpringConfig};

fn spring_to_rest(c: &mut Criterion) {
    c.bench_function("sheet spring to rest", |b| {
        b.iter(|| {
            let mut spring = Spring::new(SpringConfig::sheet(), 0.0);
            spring.set_target(black_box(-500.0));
            while !spring.is_settled() {
                spring.step(1.0 / 60.0);
            }
            spring.value()
        })
    });
}

fn scheduler_frame(c: &mut Criterion) {
    let mut scheduler = AnimationScheduler::new();
    let ids: Vec<_> = (0..64)
        .map(|i| scheduler.add_spring(Spring::new(SpringConfig::gentle(), i as f32)))
        .collect();

    c.bench_function("scheduler frame, 64 springs", |b| {
        b.iter(|| {
            for (i, id) in ids.iter().enumerate() {
                scheduler.with_spring_mut(*id, |s| s.set_target(-(i as f32) * 8.0));
            }
            scheduler.tick_by(black_box(1.0 / 120.0));
        })
    });
}

criterion_group!(benches, spring_to_rest, scheduler_frame);
criterion_main!(benches);
