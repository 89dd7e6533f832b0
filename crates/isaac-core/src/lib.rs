//! Numeric core of the universe viewer
//!
//! Turns ledger encodings into exact reals and projects them onto the screen.
//! Everything here is a pure function of its inputs.

pub mod angle;
pub mod constants;
pub mod coordinates;
pub mod error;
pub mod field;

#[cfg(test)]
mod tests;

pub use angle::{decode_angle, decode_angle_base64, EncodedAngle};
pub use coordinates::{project, Projection, Vector2Real, Viewport};
pub use error::{DecodeError, DecodeResult};
pub use field::{decode, decode_str, encode, FieldElement, SignedReal};
