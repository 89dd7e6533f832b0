//! Trail decay: older segments get thinner and fainter
//!
//! Segment `i` joins `history[i]` and `history[i + 1]` for `i` in
//! `1..=window - 2`, where `window = min(history.len(), cap)`. The recency
//! ratio `(window - i) / window` drives both width and opacity.

use crate::body::Body;
use crate::state::MacroState;
use glam::DVec2;
use isaac_core::constants::TRAIL_WINDOW_CAP;
use isaac_core::Projection;
use serde::{Deserialize, Serialize};

/// Width and opacity multipliers for one segment
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Decay {
    /// Relative to 1 from [`decay`]; [`TrailStyle::decay`] applies the base opacity
    pub opacity: f64,
    pub width_factor: f64,
}

/// Recency ratio of a segment, `1` for the newest and toward `0` for the oldest
pub fn recency_ratio(age_index: usize, window_length: usize) -> f64 {
    if window_length == 0 {
        return 0.0;
    }
    let remaining = window_length.saturating_sub(age_index);
    remaining as f64 / window_length as f64
}

/// `ratio^width_exponent` and `ratio^opacity_exponent`
pub fn decay(
    age_index: usize,
    window_length: usize,
    width_exponent: f64,
    opacity_exponent: f64,
) -> Decay {
    let ratio = recency_ratio(age_index, window_length);
    Decay {
        opacity: ratio.powf(opacity_exponent),
        width_factor: ratio.powf(width_exponent),
    }
}

/// Number of snapshots a trail may span
pub fn trail_window(history_len: usize, cap: usize) -> usize {
    history_len.min(cap)
}

/// Age indices that produce a segment
pub fn segment_indices(window_length: usize) -> std::ops::Range<usize> {
    1..window_length.saturating_sub(1)
}

/// Per-body trail presentation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrailStyle {
    pub base_opacity: f64,
    pub width_exponent: f64,
    pub opacity_exponent: f64,
}

impl Default for TrailStyle {
    fn default() -> Self {
        Self {
            base_opacity: 0.1,
            width_exponent: 0.3,
            opacity_exponent: 1.5,
        }
    }
}

impl TrailStyle {
    /// Decay with the base opacity applied; `width_factor` stays relative
    pub fn decay(&self, age_index: usize, window_length: usize) -> Decay {
        let d = decay(age_index, window_length, self.width_exponent, self.opacity_exponent);
        Decay {
            opacity: self.base_opacity * d.opacity,
            width_factor: d.width_factor,
        }
    }

    /// Absolute opacity and stroke width for a body of pixel diameter `thickness`
    pub fn segment_style(&self, age_index: usize, window_length: usize, thickness: f64) -> (f64, f64) {
        let d = self.decay(age_index, window_length);
        (d.opacity, thickness * d.width_factor)
    }
}

/// One drawable piece of trail
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrailSegment {
    pub body: Body,
    pub age_index: usize,
    pub start: DVec2,
    pub end: DVec2,
    /// Fraction of the body diameter
    pub width_factor: f64,
    /// Stroke width in pixels
    pub width: f64,
    pub opacity: f64,
}

/// Trail segments for `body` drawn at full width `2 * radius`, newest first.
///
/// Endpoints are shifted by half the stroke width, matching how the body
/// itself is anchored. Histories shorter than three snapshots yield nothing.
pub fn trail_segments(
    history: &[MacroState],
    body: Body,
    radius: f64,
    projection: &Projection,
    style: &TrailStyle,
    window_cap: usize,
) -> Vec<TrailSegment> {
    let window = trail_window(history.len(), window_cap);
    let thickness = projection.length(radius) * 2.0;

    segment_indices(window)
        .map(|i| {
            let d = style.decay(i, window);
            let width = thickness * d.width_factor;
            let shift = DVec2::splat(width / 2.0);

            TrailSegment {
                body,
                age_index: i,
                start: projection.center(history[i].position(body)) - shift,
                end: projection.center(history[i + 1].position(body)) - shift,
                width_factor: d.width_factor,
                width,
                opacity: d.opacity,
            }
        })
        .collect()
}

/// [`trail_segments`] with the body's own radius and the default window cap
pub fn default_trail(history: &[MacroState], body: Body, projection: &Projection, style: &TrailStyle) -> Vec<TrailSegment> {
    trail_segments(history, body, body.radius(), projection, style, TRAIL_WINDOW_CAP)
}
