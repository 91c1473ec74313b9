// Copyright 2026 the Driftglass Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use driftglass_view2d::{
    AffineTransform, Correspondence, GestureResolver, Mat2, PointerId, ResolverMode,
    ViewportEngine,
};
use kurbo::{Point, Vec2};

fn correspondences(n: usize) -> Vec<Correspondence> {
    (0..n)
        .map(|i| {
            let angle = i as f64 * 2.1;
            let world = Point::ORIGIN + Vec2::from_angle(angle) * 80.0;
            Correspondence {
                world,
                screen: Point::new(world.x * 1.3 + 0.2 * world.y + 5.0, world.y * 0.9 - 7.0),
            }
        })
        .collect()
}

fn bench_resolver(c: &mut Criterion) {
    let mut group = c.benchmark_group("driftglass_resolver");
    let base = AffineTransform::from_parts(Mat2::rotation_scale(0.2, 1.1), Vec2::new(3.0, 4.0));

    for (name, mode) in [
        ("affine", ResolverMode::Affine),
        ("similarity", ResolverMode::similarity()),
    ] {
        let resolver = GestureResolver::new(mode, driftglass_view2d::EPSILON);
        for n in [1_usize, 2, 3, 5] {
            let pairs = correspondences(n);
            group.bench_function(format!("{name}(n={n})"), |b| {
                b.iter(|| black_box(resolver.resolve(&base, black_box(&pairs))));
            });
        }
    }

    group.finish();
}

fn bench_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("driftglass_session");

    group.bench_function("pinch_stream(moves=240)", |b| {
        b.iter(|| {
            let mut engine = ViewportEngine::default();
            engine.pointer_down(PointerId(1), Point::new(-40.0, 0.0));
            engine.pointer_down(PointerId(2), Point::new(40.0, 0.0));
            for step in 0..120 {
                let spread = 40.0 + f64::from(step);
                engine.pointer_move(PointerId(1), Point::new(-spread, 0.0));
                engine.pointer_move(PointerId(2), Point::new(spread, 0.5 * f64::from(step)));
            }
            engine.pointer_up(PointerId(1));
            engine.pointer_up(PointerId(2));
            black_box(engine.frame())
        });
    });

    group.bench_function("frame_warp_decay", |b| {
        let mut engine = ViewportEngine::default();
        engine.set_transform(AffineTransform::from_parts(
            Mat2::new(1.0, 0.4, 0.0, 1.2),
            Vec2::ZERO,
        ));
        b.iter(|| black_box(engine.frame()));
    });

    group.finish();
}

criterion_group!(benches, bench_resolver, bench_session);
criterion_main!(benches);
