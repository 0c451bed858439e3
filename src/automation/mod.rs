//! # Automation Module
//!
//! Parameter automation lanes: control points with per-segment curves, curve
//! evaluation, SVG drawing and two-way conversion with `fade(...)` source code.
//!
//! ## Sub-modules
//! - `types` - AutomationPoint, AutomationLane, AutomationTarget, CurveType, EntityKind
//! - `curve` - interpolation, lane evaluation, value normalization
//! - `path` - SVG path for the lane editor
//! - `fade_code` - generate and read back `fade` calls
//!
//! ## Curves
//! The curve of the earlier point shapes each segment:
//!
//! | Curve | Value at `t` |
//! |---|---|
//! | `linear` | `v1 + (v2 - v1) t` |
//! | `exponential` | `v1 + (v2 - v1)(1 - (1 - t)^3)` |
//! | `smooth` | `v1 + (v2 - v1) t^2 (3 - 2t)` |
//! | `step` | `v1` until the next point |
//! | `bezier` | cubic Bezier through the handles, `smooth` without handles |
//!
//! ## Example
//! ```rust
//! use notegrid::automation::{AutomationLane, AutomationTarget, CurveType, EntityKind};
//!
//! let target = AutomationTarget::new(EntityKind::Voice, "lead", "cutoff");
//! let mut lane = AutomationLane::new(target, 200.0, 2200.0);
//! lane.add_point(0.0, 0.0, CurveType::Linear);
//! lane.add_point(4.0, 1.0, CurveType::Linear);
//!
//! assert_eq!(lane.value_at_beat(2.0), 0.5);
//! assert_eq!(lane.param_value_at_beat(2.0), 1200.0);
//! assert_eq!(
//!     notegrid::automation::generate_fade_code(&lane),
//!     "voice(\"lead\").fade(\"cutoff\", 200.000, 2200.000, 4.00)"
//! );
//! ```

mod curve;
mod fade_code;
mod path;
mod types;


pub use curve::{
    ease, interpolate, normalized_to_param_value, param_value_to_normalized, value_at_beat,
    EMPTY_LANE_VALUE,
};
pub use fade_code::{
    fade_code_edits, find_fade_calls, generate_fade_code, parse_fade_code, FadeCall, DEDUP_EPSILON,
};
pub use path::generate_curve_path;
pub use types::{
    AutomationLane, AutomationPoint, AutomationTarget, BezierHandle, CurveType, EntityKind,
};
