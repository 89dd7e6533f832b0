//! Feed records for the viewer
//!
//! The indexer exposes two JSON documents: every macro state of the universe
//! and every impulse applied to the planet. This crate parses them, filters
//! out superseded revisions, and decodes them into `isaac-sim` types.

pub mod decode;
pub mod feed;
pub mod records;

#[cfg(test)]
mod tests;

pub use decode::{decode_history, decode_impulse, decode_impulses, decode_macro_state, decode_vec2};
pub use feed::{ImpulseFeed, MacroStateFeed};
pub use records::{ChainMeta, RawBody, RawDynamics, RawFelt, RawImpulse, RawMacroState, RawVec2, Revisioned};
