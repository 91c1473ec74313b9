// Copyright 2026 the Driftglass Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use driftglass_scene::{HexGrid, Mover, Scene, TrailSampler};
use kurbo::Point;

fn bench_trail(c: &mut Criterion) {
    let mut group = c.benchmark_group("driftglass_trail");
    let movers = Mover::defaults();
    let mut sampler = TrailSampler::default();
    let mut time = 0.0;

    group.bench_function("sample(n=120)", |b| {
        b.iter(|| {
            time += 1.0 / 60.0;
            black_box(sampler.sample(&movers[0], time).len())
        });
    });

    group.finish();
}

fn bench_scene(c: &mut Criterion) {
    let mut group = c.benchmark_group("driftglass_scene");

    group.bench_function("frame_follow(movers=3)", |b| {
        let mut scene = Scene::default();
        let mut time = 0.0;
        b.iter(|| {
            time += 1.0 / 60.0;
            black_box(scene.frame(time, Some(1)))
        });
    });

    group.bench_function("grid_covers(64x64)", |b| {
        let grid = HexGrid::default();
        let mut scene = Scene::default();
        let uniforms = scene.frame(1.0, None).uniforms;
        b.iter(|| {
            let mut covered = 0_u32;
            for y in -32..32 {
                for x in -32..32 {
                    let p = Point::new(f64::from(x) * 3.0, f64::from(y) * 3.0);
                    covered += u32::from(grid.covers(p, &uniforms));
                }
            }
            black_box(covered)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_trail, bench_scene);
criterion_main!(benches);
