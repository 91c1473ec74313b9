// Copyright 2026 the Driftglass Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Editor panel interface.
//!
//! The panel itself lives in the host UI. This module defines what the scene
//! needs from it ([`EditorPanel`]) and the plain-data edit it exchanges
//! ([`MoverEdit`]), plus the small conversions the panel fields use.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::f64::consts::{FRAC_PI_2, TAU};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Vec2};

use crate::mover::{FreqVector, Mover, Rgba};

/// Amplitude at the rim of a vector pad.
pub const PAD_MAX_AMP: f64 = 150.0;

/// Errors from applying an edit.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditError {
    /// The colour field is not `#rrggbb`.
    #[error("invalid colour {0:?}, expected `#rrggbb`")]
    InvalidColor(String),
    /// The edit targets a mover that does not exist.
    #[error("no mover at index {index} (have {len})")]
    NoSuchMover {
        /// Requested index.
        index: usize,
        /// Number of movers.
        len: usize,
    },
}

/// Host-side editing panel.
pub trait EditorPanel {
    /// Index of the mover being edited, if the panel is open.
    fn active_mover(&self) -> Option<usize>;

    /// Opens the panel on mover `index` and fills its fields from `edit`.
    fn set_from_mover(&mut self, index: usize, edit: &MoverEdit);

    /// Moves the panel next to `screen`, the followed mover's screen anchor.
    fn place_at(&mut self, screen: Point);

    /// Takes the pending user edit, if the fields changed since the last call.
    fn take_edit(&mut self) -> Option<MoverEdit>;
}

/// The panel's fields for one mover.
#[derive(Clone, Debug, PartialEq)]
pub struct MoverEdit {
    /// Colour as `#rrggbb`.
    pub color: String,
    /// Comma-separated frequencies.
    pub frequencies: String,
    /// One amplitude/phase vector per frequency, in order.
    pub vectors: Vec<FreqVector>,
}

impl MoverEdit {
    /// Captures `mover`'s current parameters.
    #[must_use]
    pub fn from_mover(mover: &Mover) -> Self {
        let frequencies = mover
            .freqs
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        Self {
            color: color_to_hex(mover.color),
            frequencies,
            vectors: mover.resolved_vectors(),
        }
    }

    /// Parses the frequency field.
    ///
    /// Tokens that are not finite positive numbers are dropped; if nothing
    /// survives the result is `[1.0]`.
    #[must_use]
    pub fn parse_frequencies(text: &str) -> Vec<f64> {
        let freqs: Vec<f64> = text
            .split(',')
            .filter_map(|token| token.trim().parse::<f64>().ok())
            .filter(|f| f.is_finite() && *f > 0.0)
            .collect();
        if freqs.is_empty() {
            alloc::vec![1.0]
        } else {
            freqs
        }
    }

    /// Writes the edit into `mover`.
    ///
    /// Missing vectors are filled with the mover's scalar `amp`/`phase`.
    /// Afterwards `amp` is the mean vector amplitude and `phase` the first
    /// vector's phase. On error the mover is left untouched.
    pub fn apply_to(&self, mover: &mut Mover) -> Result<(), EditError> {
        let color = hex_to_color(&self.color)?;
        let freqs = Self::parse_frequencies(&self.frequencies);
        let fallback = FreqVector::new(mover.amp, mover.phase);
        let vectors: Vec<FreqVector> = (0..freqs.len())
            .map(|i| self.vectors.get(i).copied().unwrap_or(fallback))
            .collect();

        mover.color = color;
        mover.amp = vectors.iter().map(|v| v.amp).sum::<f64>() / vectors.len() as f64;
        mover.phase = vectors[0].phase;
        mover.freqs = freqs;
        mover.vectors = vectors;
        tracing::debug!(freqs = mover.freqs.len(), "mover parameters edited");
        Ok(())
    }
}

/// Formats a colour as `#rrggbb`, clamping channels into `[0, 1]`.
#[must_use]
pub fn color_to_hex(color: Rgba) -> String {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "value is clamped into 0..=255 first"
    )]
    fn byte(v: f32) -> u8 {
        (f64::from(v).clamp(0.0, 1.0) * 255.0).round() as u8
    }
    format!(
        "#{:02x}{:02x}{:02x}",
        byte(color[0]),
        byte(color[1]),
        byte(color[2])
    )
}

/// Parses `#rrggbb` (the `#` is optional) into an opaque colour.
pub fn hex_to_color(hex: &str) -> Result<Rgba, EditError> {
    let digits = hex.trim().trim_start_matches('#');
    let invalid = || EditError::InvalidColor(hex.into());
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let value = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
    let [_, r, g, b] = value.to_be_bytes();
    let channel = |byte: u8| f32::from(byte) / 255.0;
    Ok([channel(r), channel(g), channel(b), 1.0])
}

impl FreqVector {
    /// Reads a vector pad: `offset` from the pad centre in screen pixels.
    ///
    /// Phase runs clockwise from straight up in `[0, 2π)`. Amplitude is the
    /// offset length relative to `radius`, scaled to `max_amp` and clamped.
    #[must_use]
    pub fn from_pad_offset(offset: Vec2, radius: f64, max_amp: f64) -> Self {
        let mut phase = offset.atan2() + FRAC_PI_2;
        if phase < 0.0 {
            phase += TAU;
        }
        let reach = offset.hypot().min(radius);
        let amp = if radius > 0.0 {
            (reach / radius * max_amp).clamp(0.0, max_amp.max(0.0))
        } else {
            0.0
        };
        Self { amp, phase }
    }

    /// Screen offset of the pad handle for this vector; inverse of
    /// [`FreqVector::from_pad_offset`] inside the pad.
    #[must_use]
    pub fn pad_offset(&self, radius: f64, max_amp: f64) -> Vec2 {
        let fraction = if max_amp > 0.0 {
            (self.amp / max_amp).clamp(0.0, 1.0)
        } else {
            0.0
        };
        Vec2::from_angle(self.phase - FRAC_PI_2) * (fraction * radius)
    }
}
