// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Point, Vec2};
use understory_pan_zoom::{
    ManualClock, MomentumStep, PanZoomConfig, PanZoomModel, VelocityTracker,
};

fn fresh_model() -> (PanZoomModel<ManualClock>, ManualClock) {
    let clock = ManualClock::new(0.0);
    (PanZoomModel::new(PanZoomConfig::default(), clock.clone()), clock)
}

fn bench_gesture_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("pan_zoom/gesture_stream");

    // One frame of input per move event, as a host would forward it.
    for moves in [60usize, 600, 6_000] {
        group.throughput(Throughput::Elements(moves as u64));

        group.bench_with_input(BenchmarkId::new("drag", moves), &moves, |b, &moves| {
            b.iter_batched(
                fresh_model,
                |(mut model, clock)| {
                    model.touch_start(&[Point::new(0.0, 0.0)]);
                    for i in 0..moves {
                        clock.advance(16.0);
                        let t = i as f64;
                        model.touch_move(&[Point::new(t, t * 0.5)]);
                    }
                    model.touch_end();
                    black_box(model.pan());
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("pinch", moves), &moves, |b, &moves| {
            b.iter_batched(
                fresh_model,
                |(mut model, clock)| {
                    model.touch_start(&[Point::new(100.0, 100.0), Point::new(200.0, 100.0)]);
                    for i in 0..moves {
                        clock.advance(16.0);
                        let spread = (i % 200) as f64;
                        model.touch_move(&[
                            Point::new(100.0 - spread, 100.0),
                            Point::new(200.0 + spread, 100.0),
                        ]);
                    }
                    model.touch_end();
                    black_box(model.state());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_wheel(c: &mut Criterion) {
    c.bench_function("pan_zoom/wheel_zoom", |b| {
        let (mut model, _) = fresh_model();
        let mut delta = 10.0;
        b.iter(|| {
            delta = -delta;
            model.wheel_zoom(black_box(delta), Point::new(320.0, 240.0));
            black_box(model.scale());
        });
    });
}

fn bench_velocity(c: &mut Criterion) {
    let mut group = c.benchmark_group("pan_zoom/velocity_tracker");

    // Sample interval relative to a 100 ms window controls how many samples
    // are retained.
    for interval_ms in [1.0_f64, 4.0, 16.0] {
        group.bench_with_input(
            BenchmarkId::new("add_and_estimate", interval_ms),
            &interval_ms,
            |b, &interval_ms| {
                let clock = ManualClock::new(0.0);
                let mut tracker = VelocityTracker::new(100.0, clock.clone());
                let mut x = 0.0;
                b.iter(|| {
                    clock.advance(interval_ms);
                    x += 1.0;
                    tracker.add_tracking_point(Point::new(x, 0.0));
                    black_box(tracker.velocity());
                });
            },
        );
    }

    group.finish();
}

fn bench_momentum(c: &mut Criterion) {
    let mut group = c.benchmark_group("pan_zoom/momentum");

    for speed in [0.5_f64, 2.0, 8.0] {
        group.bench_with_input(BenchmarkId::new("run_to_rest", speed), &speed, |b, &speed| {
            b.iter_batched(
                fresh_model,
                |(mut model, _)| {
                    let mut step =
                        MomentumStep::new(Vec2::new(speed, -speed), 0.0, 0.995, 0.1);
                    let mut now = 0.0;
                    while !step.advance_at(&mut model, now) {
                        now += 16.0;
                    }
                    black_box(model.pan());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_gesture_stream,
    bench_wheel,
    bench_velocity,
    bench_momentum
);
criterion_main!(benches);
