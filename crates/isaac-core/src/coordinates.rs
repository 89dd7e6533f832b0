use crate::constants::{DISPLAY_SCALE, FALLBACK_VIEWPORT};
use crate::field::SignedReal;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Simulation-space position, exact
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Vector2Real {
    pub x: SignedReal,
    pub y: SignedReal,
}

impl Vector2Real {
    pub fn new(x: SignedReal, y: SignedReal) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self::new(SignedReal::zero(), SignedReal::zero())
    }

    /// Exact componentwise difference
    pub fn delta(&self, other: &Vector2Real) -> Vector2Real {
        Vector2Real::new(&self.x - &other.x, &self.y - &other.y)
    }

    /// Lossy conversion for the render boundary
    pub fn to_dvec2(&self) -> DVec2 {
        DVec2::new(self.x.to_f64(), self.y.to_f64())
    }
}

/// Window size in pixels
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Simulation origin sits at the viewport center
    pub fn origin(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(FALLBACK_VIEWPORT.0, FALLBACK_VIEWPORT.1)
    }
}

/// `origin + (sim - anchor_offset) * scale`, per axis.
///
/// `anchor_offset` is in simulation units; passing a body radius turns its
/// center into the top-left corner of its bounding box. It is a float offset
/// rather than a [`Vector2Real`]: `sim` is rounded to `f64` first and the
/// subtraction happens in pixel precision, which is all the output carries.
/// Exact differences belong in [`Vector2Real::delta`].
pub fn project(sim: &Vector2Real, origin: DVec2, scale: f64, anchor_offset: DVec2) -> DVec2 {
    origin + (sim.to_dvec2() - anchor_offset) * scale
}

/// Origin and scale for one redraw
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub origin: DVec2,
    pub scale: f64,
}

impl Projection {
    pub fn new(origin: DVec2, scale: f64) -> Self {
        Self { origin, scale }
    }

    pub fn for_viewport(viewport: Viewport, scale: f64) -> Self {
        Self::new(viewport.origin(), scale)
    }

    /// Center position in pixels
    pub fn center(&self, sim: &Vector2Real) -> DVec2 {
        project(sim, self.origin, self.scale, DVec2::ZERO)
    }

    /// Top-left of a square bounding box of half-size `radius`
    pub fn top_left(&self, sim: &Vector2Real, radius: f64) -> DVec2 {
        project(sim, self.origin, self.scale, DVec2::splat(radius))
    }

    /// Simulation length in pixels
    pub fn length(&self, sim_length: f64) -> f64 {
        sim_length * self.scale
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::for_viewport(Viewport::default(), DISPLAY_SCALE)
    }
}
