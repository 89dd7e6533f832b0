//! Decoded macro-state history

use crate::body::Body;
use isaac_core::{EncodedAngle, Vector2Real};

/// Position of one body at a tick
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BodyState {
    pub q: Vector2Real,
}

impl BodyState {
    pub fn new(q: Vector2Real) -> Self {
        Self { q }
    }
}

/// All four bodies at a tick
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dynamics {
    pub sun0: BodyState,
    pub sun1: BodyState,
    pub sun2: BodyState,
    pub planet: BodyState,
}

impl Dynamics {
    pub fn get(&self, body: Body) -> &BodyState {
        match body {
            Body::Sun0 => &self.sun0,
            Body::Sun1 => &self.sun1,
            Body::Sun2 => &self.sun2,
            Body::Planet => &self.planet,
        }
    }

    /// Every body at the same position, handy for building fixtures
    pub fn uniform(q: Vector2Real) -> Self {
        Self {
            sun0: BodyState::new(q.clone()),
            sun1: BodyState::new(q.clone()),
            sun2: BodyState::new(q.clone()),
            planet: BodyState::new(q),
        }
    }
}

/// One snapshot. Histories are newest-first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MacroState {
    pub block_number: u64,
    pub dynamics: Dynamics,
    pub orientation: EncodedAngle,
}

impl MacroState {
    pub fn position(&self, body: Body) -> &Vector2Real {
        &self.dynamics.get(body).q
    }

    /// Planet rotation in degrees
    pub fn orientation_degrees(&self) -> f64 {
        self.orientation.degrees()
    }
}

/// A velocity change applied to the planet at `block_number`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Impulse {
    pub block_number: u64,
    pub position_at_application: Vector2Real,
    pub applied_delta_v: Vector2Real,
}

/// Index of the snapshot recorded at `block_number`
pub fn find_block(history: &[MacroState], block_number: u64) -> Option<usize> {
    history.iter().position(|state| state.block_number == block_number)
}

/// Ticks elapsed; the first snapshot is emitted at age 0
pub fn universe_age(history: &[MacroState]) -> Option<usize> {
    history.len().checked_sub(1)
}

/// How much history is usable for derived outputs
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryDepth {
    /// Nothing to draw; idle universe
    Empty,
    /// A current position but no trail or velocity
    InsufficientHistory,
    /// Two or more snapshots
    Sufficient,
}

impl HistoryDepth {
    pub fn of(history: &[MacroState]) -> Self {
        match history.len() {
            0 => Self::Empty,
            1 => Self::InsufficientHistory,
            _ => Self::Sufficient,
        }
    }
}
