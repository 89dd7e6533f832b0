//! Impulse deltas, markers and tooltips
//!
//! An impulse is compared against the planet's velocity in the tick it was
//! applied. Velocity comes from the exact position difference between the
//! matching snapshot and the one before it.

use crate::body::Body;
use crate::state::{find_block, Impulse, MacroState};
use glam::DVec2;
use isaac_core::{Projection, SignedReal};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn label(&self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
        }
    }
}

/// Why velocity-relative figures are unavailable
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum InsufficientReason {
    /// No snapshot shares the impulse's block number
    ImpulseNotFound,
    /// The matching snapshot is the oldest one
    NoPriorState,
}

/// Impulse compared with velocity along one axis
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AxisDelta {
    pub axis: Axis,
    pub delta_v: f64,
    pub velocity: f64,
    /// `delta_v / velocity`, or `delta_v * tick_duration` when velocity is exactly zero
    pub relative_change: f64,
    pub uses_absolute_fallback: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DeltaResult {
    pub delta_v: DVec2,
    pub velocity: DVec2,
    pub magnitude: f64,
    pub axes: [AxisDelta; 2],
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImpulseDelta {
    Resolved(DeltaResult),
    /// `delta_v` is still known; only the velocity comparison is missing
    InsufficientData {
        reason: InsufficientReason,
        delta_v: DVec2,
        magnitude: f64,
    },
}

impl ImpulseDelta {
    pub fn delta_v(&self) -> DVec2 {
        match self {
            Self::Resolved(result) => result.delta_v,
            Self::InsufficientData { delta_v, .. } => *delta_v,
        }
    }

    pub fn magnitude(&self) -> f64 {
        self.delta_v().length()
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

fn axis_delta(axis: Axis, delta_v: f64, displacement: &SignedReal, tick_duration: f64) -> AxisDelta {
    let velocity = displacement.to_f64() / tick_duration;

    // Exact zero is tested on the big-integer displacement, not the float
    if displacement.is_zero() {
        AxisDelta {
            axis,
            delta_v,
            velocity: 0.0,
            relative_change: delta_v * tick_duration,
            uses_absolute_fallback: true,
        }
    } else {
        AxisDelta {
            axis,
            delta_v,
            velocity,
            relative_change: delta_v / velocity,
            uses_absolute_fallback: false,
        }
    }
}

/// Compare an impulse with the planet velocity at its block.
///
/// `tick_duration` must be positive.
pub fn compute_delta(
    impulse: &Impulse,
    history: &[MacroState],
    tick_duration: f64,
    impulse_scale: f64,
) -> ImpulseDelta {
    let delta_v = impulse.applied_delta_v.to_dvec2() / impulse_scale;
    let magnitude = delta_v.length();

    let idx = match find_block(history, impulse.block_number) {
        Some(idx) => idx,
        None => {
            return ImpulseDelta::InsufficientData {
                reason: InsufficientReason::ImpulseNotFound,
                delta_v,
                magnitude,
            }
        }
    };

    let Some(previous) = history.get(idx + 1) else {
        return ImpulseDelta::InsufficientData {
            reason: InsufficientReason::NoPriorState,
            delta_v,
            magnitude,
        };
    };

    let displacement = history[idx].position(Body::Planet).delta(previous.position(Body::Planet));

    let x = axis_delta(Axis::X, delta_v.x, &displacement.x, tick_duration);
    let y = axis_delta(Axis::Y, delta_v.y, &displacement.y, tick_duration);

    ImpulseDelta::Resolved(DeltaResult {
        delta_v,
        velocity: DVec2::new(x.velocity, y.velocity),
        magnitude,
        axes: [x, y],
    })
}

/// Concentric rings drawn where an impulse was applied
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ImpulseMarker {
    pub block_number: u64,
    pub center: DVec2,
    pub ring_radii: Vec<f64>,
    pub ring_opacities: Vec<f64>,
}

/// Ring `i` has radius `spacing * (i + 1)` and opacity `(rings - i) / rings`
pub fn impulse_marker(impulse: &Impulse, projection: &Projection, rings: usize, spacing: f64) -> ImpulseMarker {
    let ring_radii = (0..rings)
        .map(|i| projection.length(spacing * (i + 1) as f64))
        .collect();
    let ring_opacities = (0..rings)
        .map(|i| (rings - i) as f64 / rings as f64)
        .collect();

    ImpulseMarker {
        block_number: impulse.block_number,
        center: projection.center(&impulse.position_at_application),
        ring_radii,
        ring_opacities,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arrow {
    Up,
    Down,
    Flat,
}

impl Arrow {
    fn of(value: f64) -> Self {
        if value > 0.0 {
            Self::Up
        } else if value < 0.0 {
            Self::Down
        } else {
            Self::Flat
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Up => "↑",
            Self::Down => "↓",
            Self::Flat => "→",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DeltaLine {
    pub axis: Axis,
    pub arrow: Arrow,
    pub magnitude_text: String,
    pub is_percentage: bool,
}

impl DeltaLine {
    fn from_axis(delta: &AxisDelta) -> Self {
        let magnitude = delta.relative_change.abs();
        let magnitude_text = if delta.uses_absolute_fallback {
            format!("{:.4} per tick", magnitude)
        } else {
            format!("{:.2}%", magnitude * 100.0)
        };

        Self {
            axis: delta.axis,
            arrow: Arrow::of(delta.relative_change),
            magnitude_text,
            is_percentage: !delta.uses_absolute_fallback,
        }
    }
}

/// Hover text for an impulse marker
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tooltip {
    pub block_number: u64,
    pub title: String,
    pub delta_lines: Option<Vec<DeltaLine>>,
}

impl Tooltip {
    pub fn new(impulse: &Impulse, delta: &ImpulseDelta) -> Self {
        let title = format!(
            "Impulse at block {} (|Δv| = {:.4})",
            impulse.block_number,
            delta.magnitude()
        );

        let delta_lines = match delta {
            ImpulseDelta::Resolved(result) => Some(result.axes.iter().map(DeltaLine::from_axis).collect()),
            ImpulseDelta::InsufficientData { .. } => None,
        };

        Self { block_number: impulse.block_number, title, delta_lines }
    }

    /// Plain-text rendering, one line per axis
    pub fn lines(&self) -> Vec<String> {
        let mut out = vec![self.title.clone()];
        if let Some(lines) = &self.delta_lines {
            for line in lines {
                out.push(format!("Δv{} {} {}", line.axis.label(), line.arrow.glyph(), line.magnitude_text));
            }
        }
        out
    }
}
