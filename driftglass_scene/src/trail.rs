// Copyright 2026 the Driftglass Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::Point;

use crate::mover::Trajectory;

/// Seconds of history a trail covers.
pub const TRAIL_DURATION: f64 = 5.0;
/// Samples per trail.
pub const TRAIL_SAMPLES: usize = 120;

/// Trail window shape.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrailConfig {
    /// Length of the window, in seconds.
    pub duration: f64,
    /// Number of evenly spaced samples in the window.
    pub samples: usize,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            duration: TRAIL_DURATION,
            samples: TRAIL_SAMPLES,
        }
    }
}

impl TrailConfig {
    /// Time between consecutive samples.
    #[must_use]
    pub fn step(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.duration / self.samples as f64
        }
    }
}

/// Samples a trajectory's recent past into reusable buffers.
///
/// Sample `i` is taken at `time - duration + i * step`, so the last sample
/// (the head) trails `time` by one step. Both buffers keep their capacity
/// across frames.
#[derive(Clone, Debug)]
pub struct TrailSampler {
    config: TrailConfig,
    points: Vec<Point>,
    flat: Vec<f32>,
}

impl Default for TrailSampler {
    fn default() -> Self {
        Self::new(TrailConfig::default())
    }
}

impl TrailSampler {
    /// Creates a sampler with buffers sized for `config`.
    #[must_use]
    pub fn new(config: TrailConfig) -> Self {
        Self {
            config,
            points: Vec::with_capacity(config.samples),
            flat: Vec::with_capacity(config.samples * 2),
        }
    }

    /// Window configuration.
    #[must_use]
    pub fn config(&self) -> &TrailConfig {
        &self.config
    }

    /// Re-samples `trajectory` ending at `time`, returning the polyline oldest first.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "vertex buffers are single precision"
    )]
    pub fn sample<T: Trajectory + ?Sized>(&mut self, trajectory: &T, time: f64) -> &[Point] {
        self.points.clear();
        self.flat.clear();
        let step = self.config.step();
        let start = time - self.config.duration;
        for i in 0..self.config.samples {
            let p = trajectory.evaluate(start + i as f64 * step);
            self.points.push(p);
            self.flat.push(p.x as f32);
            self.flat.push(p.y as f32);
        }
        &self.points
    }

    /// Last sampled polyline, oldest first.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Last sampled polyline as interleaved `x, y` pairs for vertex upload.
    #[must_use]
    pub fn flat(&self) -> &[f32] {
        &self.flat
    }

    /// Most recent sample.
    #[must_use]
    pub fn head(&self) -> Option<Point> {
        self.points.last().copied()
    }
}
