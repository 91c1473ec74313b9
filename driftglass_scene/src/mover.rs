// Copyright 2026 the Driftglass Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mover trajectories.
//!
//! A mover drifts right at a constant speed while its height is the mean of
//! several sine waves, each with its own frequency, amplitude, and phase.

use alloc::vec;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;

/// World-space x offset applied to every mover.
pub const MOVER_X_OFFSET: f64 = -300.0;

/// RGBA colour with channels in `[0, 1]`.
pub type Rgba = [f32; 4];

/// Anything with a deterministic world position over time.
pub trait Trajectory {
    /// World position at `time` seconds. Must be pure.
    fn evaluate(&self, time: f64) -> Point;
}

impl<F: Fn(f64) -> Point> Trajectory for F {
    fn evaluate(&self, time: f64) -> Point {
        self(time)
    }
}

/// Amplitude and phase of one frequency component.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FreqVector {
    /// Amplitude in world units.
    pub amp: f64,
    /// Phase in radians.
    pub phase: f64,
}

impl FreqVector {
    /// Creates a component.
    #[must_use]
    pub const fn new(amp: f64, phase: f64) -> Self {
        Self { amp, phase }
    }
}

/// A multi-frequency sine mover.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mover {
    /// Horizontal speed in world units per second.
    pub speed: f64,
    /// Angular frequencies, radians per second.
    pub freqs: Vec<f64>,
    /// Per-frequency amplitude/phase; cycled when shorter than `freqs`.
    pub vectors: Vec<FreqVector>,
    /// Amplitude used when `vectors` is empty.
    pub amp: f64,
    /// Phase used when `vectors` is empty.
    pub phase: f64,
    /// Head and trail colour.
    pub color: Rgba,
}

impl Mover {
    /// The stock set of three movers.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self {
                speed: 90.0,
                freqs: vec![1.1, 1.6],
                vectors: vec![FreqVector::new(50.0, 0.0); 2],
                amp: 50.0,
                phase: 0.0,
                color: [0.5, 0.1, 0.1, 1.0],
            },
            Self {
                speed: 70.0,
                freqs: vec![0.9, 1.3],
                vectors: vec![FreqVector::new(70.0, 1.2); 2],
                amp: 70.0,
                phase: 1.2,
                color: [0.1, 0.3, 0.5, 1.0],
            },
            Self {
                speed: 110.0,
                freqs: vec![1.4, 2.2],
                vectors: vec![FreqVector::new(60.0, -0.8); 2],
                amp: 60.0,
                phase: -0.8,
                color: [0.05, 0.45, 0.25, 1.0],
            },
        ]
    }

    /// Amplitude/phase for frequency `index`.
    #[must_use]
    pub fn component(&self, index: usize) -> FreqVector {
        if self.vectors.is_empty() {
            FreqVector::new(self.amp, self.phase)
        } else {
            self.vectors[index % self.vectors.len()]
        }
    }

    /// One component per frequency, with cycling and fallback resolved.
    #[must_use]
    pub fn resolved_vectors(&self) -> Vec<FreqVector> {
        (0..self.freqs.len()).map(|i| self.component(i)).collect()
    }
}

impl Trajectory for Mover {
    fn evaluate(&self, time: f64) -> Point {
        let x = time * self.speed + MOVER_X_OFFSET;
        if self.freqs.is_empty() {
            return Point::new(x, 0.0);
        }
        let sum: f64 = self
            .freqs
            .iter()
            .enumerate()
            .map(|(i, f)| {
                let c = self.component(i);
                c.amp * (time * f + c.phase).sin()
            })
            .sum();
        Point::new(x, sum / self.freqs.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::Point;

    use super::{FreqVector, MOVER_X_OFFSET, Mover, Trajectory};

    fn single(freq: f64, amp: f64, phase: f64) -> Mover {
        Mover {
            speed: 10.0,
            freqs: vec![freq],
            vectors: vec![FreqVector::new(amp, phase)],
            amp: 0.0,
            phase: 0.0,
            color: [1.0; 4],
        }
    }

    #[test]
    fn x_advances_linearly() {
        let m = single(1.0, 5.0, 0.0);
        assert_eq!(m.evaluate(0.0).x, MOVER_X_OFFSET);
        assert!((m.evaluate(3.0).x - (30.0 + MOVER_X_OFFSET)).abs() < 1e-12);
    }

    #[test]
    fn single_component_is_plain_sine() {
        let m = single(2.0, 5.0, 0.5);
        let t = 0.7_f64;
        assert!((m.evaluate(t).y - 5.0 * (2.0 * t + 0.5).sin()).abs() < 1e-12);
    }

    #[test]
    fn components_are_averaged_and_cycled() {
        let m = Mover {
            speed: 0.0,
            freqs: vec![1.0, 2.0, 3.0],
            vectors: vec![FreqVector::new(3.0, 0.0), FreqVector::new(6.0, 1.0)],
            amp: 0.0,
            phase: 0.0,
            color: [1.0; 4],
        };
        assert_eq!(m.component(2), FreqVector::new(3.0, 0.0));
        let t = 1.3_f64;
        let expected =
            (3.0 * (t).sin() + 6.0 * (2.0 * t + 1.0).sin() + 3.0 * (3.0 * t).sin()) / 3.0;
        assert!((m.evaluate(t).y - expected).abs() < 1e-12);
    }

    #[test]
    fn empty_vectors_fall_back_to_scalars() {
        let mut m = single(1.0, 0.0, 0.0);
        m.vectors.clear();
        m.amp = 4.0;
        m.phase = 0.25;
        assert_eq!(m.resolved_vectors(), vec![FreqVector::new(4.0, 0.25)]);
    }

    #[test]
    fn no_frequencies_stays_on_axis() {
        let mut m = single(1.0, 5.0, 0.0);
        m.freqs.clear();
        assert_eq!(m.evaluate(2.0), Point::new(20.0 + MOVER_X_OFFSET, 0.0));
    }

    #[test]
    fn closures_are_trajectories() {
        let line = |t: f64| Point::new(t, 2.0 * t);
        assert_eq!(line.evaluate(3.0), Point::new(3.0, 6.0));
    }

    #[test]
    fn stock_movers() {
        let movers = Mover::defaults();
        assert_eq!(movers.len(), 3);
        assert!(movers.iter().all(|m| m.freqs.len() == m.vectors.len()));
    }
}
