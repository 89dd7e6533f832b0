//! Presentation constants, overridable from a JSON file

use anyhow::Result;
use isaac_core::constants::{DISPLAY_SCALE, IMPULSE_SCALE, MAX_UNIVERSE_AGE, TRAIL_WINDOW_CAP};
use isaac_sim::{Body, TrailStyle};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How one body is drawn
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyStyle {
    /// Radius in simulation units
    pub radius: f64,
    pub fill: String,
    pub stroke_width: f64,
    pub trail: TrailStyle,
}

impl BodyStyle {
    fn for_body(body: Body, fill: &str, stroke_width: f64) -> Self {
        Self {
            radius: body.radius(),
            fill: fill.to_string(),
            stroke_width,
            trail: TrailStyle::default(),
        }
    }

    /// Trails must fade with age, never brighten or widen
    fn validate(&self, body: Body) -> Result<()> {
        let name = body.name();
        if !(self.radius > 0.0 && self.radius.is_finite()) {
            anyhow::bail!("{}: radius must be positive, got {}", name, self.radius);
        }

        let trail = &self.trail;
        if !(0.0..=1.0).contains(&trail.base_opacity) {
            anyhow::bail!("{}: trail base_opacity must be within [0, 1], got {}", name, trail.base_opacity);
        }
        for (field, exponent) in [("width_exponent", trail.width_exponent), ("opacity_exponent", trail.opacity_exponent)] {
            if !(exponent >= 0.0 && exponent.is_finite()) {
                anyhow::bail!("{}: trail {} must be finite and non-negative, got {}", name, field, exponent);
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyStyles {
    pub sun0: BodyStyle,
    pub sun1: BodyStyle,
    pub sun2: BodyStyle,
    pub planet: BodyStyle,
}

impl BodyStyles {
    pub fn get(&self, body: Body) -> &BodyStyle {
        match body {
            Body::Sun0 => &self.sun0,
            Body::Sun1 => &self.sun1,
            Body::Sun2 => &self.sun2,
            Body::Planet => &self.planet,
        }
    }
}

impl Default for BodyStyles {
    fn default() -> Self {
        Self {
            sun0: BodyStyle::for_body(Body::Sun0, "#f0e3d0", 2.0),
            sun1: BodyStyle::for_body(Body::Sun1, "#e3bab4", 3.0),
            sun2: BodyStyle::for_body(Body::Sun2, "#b9e3f3", 3.0),
            planet: BodyStyle::for_body(Body::Planet, "#7777AA", 1.5),
        }
    }
}

/// Viewer configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Pixels per simulation unit
    pub display_scale: f64,
    pub trail_window_cap: usize,
    /// Divisor for the on-chain impulse vector
    pub impulse_scale: f64,
    /// Simulation time per tick
    pub tick_duration: f64,
    pub max_universe_age: usize,
    pub impulse_rings: usize,
    /// Ring spacing in simulation units
    pub impulse_ring_spacing: f64,
    /// Characters of each coordinate shown in body labels
    pub label_width: usize,
    /// Length of the planet orientation helpers, in pixels
    pub helper_length: f64,
    /// Coordinate label box, in pixels
    pub label_box_width: f64,
    pub label_box_height: f64,
    pub bodies: BodyStyles,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            display_scale: DISPLAY_SCALE,
            trail_window_cap: TRAIL_WINDOW_CAP,
            impulse_scale: IMPULSE_SCALE,
            tick_duration: 0.005,
            max_universe_age: MAX_UNIVERSE_AGE,
            impulse_rings: 5,
            impulse_ring_spacing: 0.05,
            label_width: 6,
            helper_length: 30.0,
            label_box_width: 120.0,
            label_box_height: 55.0,
            bodies: BodyStyles::default(),
        }
    }
}

impl ViewConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.display_scale > 0.0) {
            anyhow::bail!("display_scale must be positive, got {}", self.display_scale);
        }
        if !(self.tick_duration > 0.0) {
            anyhow::bail!("tick_duration must be positive, got {}", self.tick_duration);
        }
        if !(self.impulse_scale > 0.0) {
            anyhow::bail!("impulse_scale must be positive, got {}", self.impulse_scale);
        }
        if self.trail_window_cap == 0 {
            anyhow::bail!("trail_window_cap must be at least 1");
        }
        if self.impulse_rings == 0 {
            anyhow::bail!("impulse_rings must be at least 1");
        }
        if !(self.impulse_ring_spacing > 0.0) {
            anyhow::bail!("impulse_ring_spacing must be positive, got {}", self.impulse_ring_spacing);
        }
        if !(self.label_box_width >= 0.0 && self.label_box_height >= 0.0) {
            anyhow::bail!("label box must not be negative");
        }
        for &body in Body::all() {
            self.bodies.get(body).validate(body)?;
        }
        Ok(())
    }
}
