//! Viewer engine shared by the native CLI and the web build
//!
//! Holds the two decoded feeds and the viewport, and turns them into a
//! [`Frame`]: body placements, trails, impulse markers and tooltips in pixel
//! space. Drawing itself is left to the host.

#![cfg_attr(target_arch = "wasm32", allow(clippy::unused_unit))]

pub mod config;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod wasm;


pub use config::{BodyStyle, BodyStyles, ViewConfig};
pub use scene::{ActiveFrame, BodyPlacement, Frame, HelperVector, SceneComposer, Viewer};
