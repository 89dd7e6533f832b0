pub mod body;
pub mod impulse;
pub mod state;
pub mod trail;


pub use body::Body;
pub use impulse::{
    compute_delta, impulse_marker, Arrow, Axis, AxisDelta, DeltaLine, DeltaResult, ImpulseDelta,
    ImpulseMarker, InsufficientReason, Tooltip,
};
pub use state::{find_block, universe_age, BodyState, Dynamics, HistoryDepth, Impulse, MacroState};
pub use trail::{decay, default_trail, recency_ratio, trail_segments, trail_window, Decay, TrailSegment, TrailStyle};
