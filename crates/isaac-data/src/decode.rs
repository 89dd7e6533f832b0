//! Raw records into decoded history
//!
//! A malformed value anywhere in a batch fails the whole batch; callers never
//! see a partially decoded history.

use crate::records::{RawBody, RawImpulse, RawMacroState, RawVec2};
use isaac_core::{decode, DecodeResult, EncodedAngle, Vector2Real};
use isaac_sim::{BodyState, Dynamics, Impulse, MacroState};

#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;

pub fn decode_vec2(raw: &RawVec2) -> DecodeResult<Vector2Real> {
    let x = decode(&raw.x.to_field_element()?);
    let y = decode(&raw.y.to_field_element()?);
    Ok(Vector2Real::new(x, y))
}

fn decode_body(raw: &RawBody) -> DecodeResult<BodyState> {
    Ok(BodyState::new(decode_vec2(&raw.q)?))
}

pub fn decode_macro_state(raw: &RawMacroState) -> DecodeResult<MacroState> {
    let dynamics = Dynamics {
        sun0: decode_body(&raw.dynamics.sun0)?,
        sun1: decode_body(&raw.dynamics.sun1)?,
        sun2: decode_body(&raw.dynamics.sun2)?,
        planet: decode_body(&raw.dynamics.planet)?,
    };

    Ok(MacroState {
        block_number: raw.block_number,
        dynamics,
        orientation: EncodedAngle::from_base64(&raw.phi)?,
    })
}

pub fn decode_impulse(raw: &RawImpulse) -> DecodeResult<Impulse> {
    Ok(Impulse {
        block_number: raw.block_number,
        position_at_application: decode_vec2(&raw.most_recent_planet_q)?,
        applied_delta_v: decode_vec2(&raw.impulse_applied)?,
    })
}

/// Decode a whole history, preserving order
#[cfg(not(target_arch = "wasm32"))]
pub fn decode_history(raw: &[RawMacroState]) -> DecodeResult<Vec<MacroState>> {
    let history = raw.par_iter().map(decode_macro_state).collect::<DecodeResult<Vec<_>>>()?;
    tracing::info!("Decoded {} macro states", history.len());
    Ok(history)
}

#[cfg(target_arch = "wasm32")]
pub fn decode_history(raw: &[RawMacroState]) -> DecodeResult<Vec<MacroState>> {
    raw.iter().map(decode_macro_state).collect()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn decode_impulses(raw: &[RawImpulse]) -> DecodeResult<Vec<Impulse>> {
    let impulses = raw.par_iter().map(decode_impulse).collect::<DecodeResult<Vec<_>>>()?;
    tracing::info!("Decoded {} impulses", impulses.len());
    Ok(impulses)
}

#[cfg(target_arch = "wasm32")]
pub fn decode_impulses(raw: &[RawImpulse]) -> DecodeResult<Vec<Impulse>> {
    raw.iter().map(decode_impulse).collect()
}
