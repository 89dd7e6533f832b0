//! Frame composition (platform-agnostic)
//!
//! A frame is everything the drawing layer needs for one redraw. It is rebuilt
//! from scratch whenever either feed changes or the viewport is resized; nothing
//! is carried over between frames.

use crate::config::ViewConfig;
use anyhow::Result;
use glam::DVec2;
use isaac_core::{DecodeResult, Projection, Viewport};
use isaac_data::{decode_history, decode_impulses, ImpulseFeed, MacroStateFeed, RawImpulse, RawMacroState};
use isaac_sim::{
    compute_delta, impulse_marker, trail_segments, universe_age, Body, HistoryDepth, Impulse,
    ImpulseDelta, ImpulseMarker, MacroState, Tooltip, TrailSegment,
};
use serde::Serialize;

/// One body as it should be drawn
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BodyPlacement {
    pub body: Body,
    pub name: &'static str,
    pub center: DVec2,
    /// Top-left of the bounding box, rotated with the body
    pub top_left: DVec2,
    pub pixel_radius: f64,
    pub rotation_degrees: f64,
    pub fill: String,
    pub stroke_width: f64,
    /// `(x, y)` with each coordinate truncated
    pub label: String,
    /// Top-left of the label box, pinned to a viewport edge
    pub label_anchor: DVec2,
    /// Grid line joining the body to its label box
    pub guide: HelperVector,
}

/// A line segment in pixels
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct HelperVector {
    pub start: DVec2,
    pub end: DVec2,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ActiveFrame {
    pub block_number: u64,
    pub age: usize,
    pub max_age: usize,
    pub viewport: Viewport,
    pub origin: DVec2,
    pub depth: HistoryDepth,
    pub orientation_degrees: f64,
    pub bodies: Vec<BodyPlacement>,
    /// Facing direction, then its perpendicular
    pub orientation_helpers: [HelperVector; 2],
    pub trails: Vec<TrailSegment>,
    pub impulse_markers: Vec<ImpulseMarker>,
    pub tooltips: Vec<Tooltip>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Frame {
    /// The universe has no history yet
    Idle { message: String },
    Active(Box<ActiveFrame>),
}

impl Frame {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle { .. })
    }

    pub fn active(&self) -> Option<&ActiveFrame> {
        match self {
            Self::Active(frame) => Some(frame),
            Self::Idle { .. } => None,
        }
    }
}

/// Label box and guide line for a body centered at `center`.
///
/// Each body owns one viewport edge: ORTA the top, BÖYÜK the left, BALACA the
/// right and EV the bottom. The box slides along that edge to stay level with
/// the body.
fn label_box(body: Body, center: DVec2, viewport: Viewport, size: DVec2) -> (DVec2, HelperVector) {
    let (w, h) = (size.x, size.y);
    let line = |start: DVec2, end: DVec2| HelperVector { start, end };

    match body {
        Body::Sun0 => (
            DVec2::new(center.x - w / 2.0, 0.0),
            line(DVec2::new(center.x, h), center),
        ),
        Body::Sun1 => (
            DVec2::new(0.0, center.y - h / 2.0),
            line(DVec2::new(w, center.y), center),
        ),
        Body::Sun2 => (
            DVec2::new(viewport.width - w, center.y - h / 2.0),
            line(center, DVec2::new(viewport.width - w, center.y)),
        ),
        Body::Planet => (
            DVec2::new(center.x - w / 2.0, viewport.height - h),
            line(center, DVec2::new(center.x, viewport.height - h)),
        ),
    }
}

/// Rotate `point` about `pivot` by `degrees`
fn rotate_about(point: DVec2, pivot: DVec2, degrees: f64) -> DVec2 {
    pivot + DVec2::from_angle(degrees.to_radians()).rotate(point - pivot)
}

/// Builds frames from decoded feeds
pub struct SceneComposer {
    config: ViewConfig,
}

impl SceneComposer {
    pub fn new(config: ViewConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(ViewConfig::default())
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// `None` until both feeds have arrived
    pub fn compose(
        &self,
        history: Option<&[MacroState]>,
        impulses: Option<&[Impulse]>,
        viewport: Viewport,
    ) -> Option<Frame> {
        let (history, impulses) = (history?, impulses?);

        let Some(latest) = history.first() else {
            tracing::info!("Idle universe");
            return Some(Frame::Idle { message: "This universe is not active.".to_string() });
        };

        let projection = Projection::for_viewport(viewport, self.config.display_scale);
        let orientation_degrees = latest.orientation_degrees();

        let bodies = Body::all()
            .iter()
            .map(|&body| self.place_body(latest, body, &projection, viewport, orientation_degrees))
            .collect();

        let trails = self.trails(history, &projection);

        let impulse_markers = impulses
            .iter()
            .map(|impulse| {
                impulse_marker(impulse, &projection, self.config.impulse_rings, self.config.impulse_ring_spacing)
            })
            .collect();

        let tooltips = impulses.iter().map(|impulse| self.tooltip(impulse, history)).collect();

        let planet_center = projection.center(latest.position(Body::Planet));
        let orientation_helpers = [
            DVec2::new(self.config.helper_length, 0.0),
            DVec2::new(0.0, self.config.helper_length),
        ]
        .map(|offset| HelperVector {
            start: planet_center,
            end: rotate_about(planet_center + offset, planet_center, orientation_degrees),
        });

        let age = universe_age(history).unwrap_or(0);
        tracing::debug!(
            block = latest.block_number,
            age,
            impulses = impulses.len(),
            "Composed frame"
        );

        Some(Frame::Active(Box::new(ActiveFrame {
            block_number: latest.block_number,
            age,
            max_age: self.config.max_universe_age,
            viewport,
            origin: projection.origin,
            depth: HistoryDepth::of(history),
            orientation_degrees,
            bodies,
            orientation_helpers,
            trails,
            impulse_markers,
            tooltips,
        })))
    }

    /// Decode both feeds and compose. A malformed value fails the whole frame.
    pub fn compose_raw(
        &self,
        history: Option<&[RawMacroState]>,
        impulses: Option<&[RawImpulse]>,
        viewport: Viewport,
    ) -> DecodeResult<Option<Frame>> {
        let (Some(history), Some(impulses)) = (history, impulses) else {
            return Ok(None);
        };

        let history = decode_history(history)?;
        let impulses = decode_impulses(impulses)?;
        Ok(self.compose(Some(&history), Some(&impulses), viewport))
    }

    fn place_body(
        &self,
        state: &MacroState,
        body: Body,
        projection: &Projection,
        viewport: Viewport,
        orientation_degrees: f64,
    ) -> BodyPlacement {
        let style = self.config.bodies.get(body);
        let position = state.position(body);
        let center = projection.center(position);

        // Only the planet turns; suns are circles
        let rotation_degrees = if body.is_sun() { 0.0 } else { orientation_degrees };
        let top_left = rotate_about(projection.top_left(position, style.radius), center, rotation_degrees);

        let width = self.config.label_width;
        let label = format!("({}, {})", position.x.truncated(width), position.y.truncated(width));
        let box_size = DVec2::new(self.config.label_box_width, self.config.label_box_height);
        let (label_anchor, guide) = label_box(body, center, viewport, box_size);

        BodyPlacement {
            body,
            name: body.name(),
            center,
            top_left,
            pixel_radius: projection.length(style.radius),
            rotation_degrees,
            fill: style.fill.clone(),
            stroke_width: style.stroke_width,
            label,
            label_anchor,
            guide,
        }
    }

    fn trails(&self, history: &[MacroState], projection: &Projection) -> Vec<TrailSegment> {
        if HistoryDepth::of(history) != HistoryDepth::Sufficient {
            return Vec::new();
        }

        Body::all()
            .iter()
            .flat_map(|&body| {
                let style = self.config.bodies.get(body);
                trail_segments(history, body, style.radius, projection, &style.trail, self.config.trail_window_cap)
            })
            .collect()
    }

    fn tooltip(&self, impulse: &Impulse, history: &[MacroState]) -> Tooltip {
        let delta = compute_delta(impulse, history, self.config.tick_duration, self.config.impulse_scale);

        if let ImpulseDelta::InsufficientData { reason, .. } = &delta {
            tracing::warn!(block = impulse.block_number, ?reason, "Impulse without velocity context");
        }

        Tooltip::new(impulse, &delta)
    }
}

impl Default for SceneComposer {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Holds the latest decoded feeds and viewport, and rebuilds frames on demand
pub struct Viewer {
    composer: SceneComposer,
    history: Option<Vec<MacroState>>,
    impulses: Option<Vec<Impulse>>,
    viewport: Viewport,
}

impl Viewer {
    pub fn new(config: ViewConfig, viewport: Viewport) -> Self {
        Self {
            composer: SceneComposer::new(config),
            history: None,
            impulses: None,
            viewport,
        }
    }

    /// Replace the history. On a decode error the previous history is kept.
    pub fn set_history(&mut self, raw: &[RawMacroState]) -> Result<()> {
        self.history = Some(decode_history(raw)?);
        Ok(())
    }

    pub fn set_impulses(&mut self, raw: &[RawImpulse]) -> Result<()> {
        self.impulses = Some(decode_impulses(raw)?);
        Ok(())
    }

    pub fn set_history_json(&mut self, json: &str) -> Result<()> {
        let raw = MacroStateFeed::from_json(json)?.history();
        self.set_history(&raw)
    }

    pub fn set_impulses_json(&mut self, json: &str) -> Result<()> {
        let raw = ImpulseFeed::from_json(json)?.current();
        self.set_impulses(&raw)
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_ready(&self) -> bool {
        self.history.is_some() && self.impulses.is_some()
    }

    pub fn frame(&self) -> Option<Frame> {
        self.composer.compose(self.history.as_deref(), self.impulses.as_deref(), self.viewport)
    }
}
