//! Planet orientation decoding
//!
//! Orientation is stored as raw big-endian bytes holding `radians * 10^20`.
//! Unlike positions it is never sign-corrected: a rotation is read modulo a
//! full turn, so the residue is taken at face value.

use crate::constants::{scale, SCALE_F64};
use crate::error::{DecodeError, DecodeResult};
use base64::Engine as _;
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use std::f64::consts::TAU;
use std::hash::{Hash, Hasher};

/// Orientation bytes as carried by a macro state, validated on construction
#[derive(Clone, Debug)]
pub struct EncodedAngle {
    bytes: Vec<u8>,
    degrees: f64,
}

impl EncodedAngle {
    /// Rejects empty input and magnitudes with no finite rotation
    pub fn new(bytes: Vec<u8>) -> DecodeResult<Self> {
        let degrees = decode_angle(&bytes)?;
        Ok(Self { bytes, degrees })
    }

    /// Decode the standard base64 text form used by the feed
    pub fn from_base64(text: &str) -> DecodeResult<Self> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(text.trim())
            .map_err(|_| DecodeError::MalformedAngleEncoding("invalid base64"))?;
        Self::new(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Always finite
    pub fn degrees(&self) -> f64 {
        self.degrees
    }
}

impl PartialEq for EncodedAngle {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for EncodedAngle {}

impl Hash for EncodedAngle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

/// Raw radian value `bytes / 10^20`
fn radians(bytes: &[u8]) -> DecodeResult<f64> {
    if bytes.is_empty() {
        return Err(DecodeError::MalformedAngleEncoding("empty byte string"));
    }

    let magnitude = BigUint::from_bytes_be(bytes);
    let whole = (&magnitude / scale()).to_f64();
    let frac = (&magnitude % scale()).to_f64();

    match (whole, frac) {
        (Some(w), Some(f)) if w.is_finite() => Ok(w + f / SCALE_F64),
        _ => Err(DecodeError::MalformedAngleEncoding("magnitude exceeds f64 range")),
    }
}

/// Rotation in degrees: `bytes / 10^20 / 2π * 360`
pub fn decode_angle(bytes: &[u8]) -> DecodeResult<f64> {
    let degrees = radians(bytes)? / TAU * 360.0;
    if !degrees.is_finite() {
        return Err(DecodeError::MalformedAngleEncoding("magnitude exceeds f64 range"));
    }
    Ok(degrees)
}

/// [`decode_angle`] on base64 text
pub fn decode_angle_base64(text: &str) -> DecodeResult<f64> {
    Ok(EncodedAngle::from_base64(text)?.degrees())
}
