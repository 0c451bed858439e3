//! Curve evaluation and value normalization.

use super::types::{AutomationLane, AutomationPoint, BezierHandle, CurveType};

/// Value of a lane without points.
pub const EMPTY_LANE_VALUE: f64 = 0.5;

/// Shape a normalized position `t` in `[0, 1]` for the non-Bezier curves.
pub fn ease(curve: CurveType, t: f64) -> f64 {
    match curve {
        CurveType::Linear => t,
        CurveType::Exponential => 1.0 - (1.0 - t).powi(3),
        CurveType::Smooth | CurveType::Bezier => t * t * (3.0 - 2.0 * t),
        CurveType::Step => {
            if t >= 1.0 {
                1.0
            } else {
                0.0
            }
        }
    }
}

/// Value between two points at `beat`, using the earlier point's curve.
pub fn interpolate(from: &AutomationPoint, to: &AutomationPoint, beat: f64) -> f64 {
    let span = to.beat - from.beat;
    if span <= 0.0 {
        return to.value;
    }
    let t = ((beat - from.beat) / span).clamp(0.0, 1.0);

    if from.curve_type == CurveType::Bezier && (from.bezier_out.is_some() || to.bezier_in.is_some()) {
        return bezier_value(from, to, beat);
    }
    from.value + (to.value - from.value) * ease(from.curve_type, t)
}

/// Absolute control points of the Bezier segment between two points.
pub(crate) fn bezier_controls(from: &AutomationPoint, to: &AutomationPoint) -> [(f64, f64); 4] {
    let handle = |anchor: &AutomationPoint, offset: Option<BezierHandle>| {
        let offset = offset.unwrap_or(BezierHandle { beat: 0.0, value: 0.0 });
        // Beat offsets stay inside the segment so x(u) is monotonic.
        let beat = (anchor.beat + offset.beat).clamp(from.beat, to.beat);
        (beat, anchor.value + offset.value)
    };
    [
        (from.beat, from.value),
        handle(from, from.bezier_out),
        handle(to, to.bezier_in),
        (to.beat, to.value),
    ]
}

fn cubic(p0: f64, p1: f64, p2: f64, p3: f64, u: f64) -> f64 {
    let v = 1.0 - u;
    v * v * v * p0 + 3.0 * v * v * u * p1 + 3.0 * v * u * u * p2 + u * u * u * p3
}

fn bezier_value(from: &AutomationPoint, to: &AutomationPoint, beat: f64) -> f64 {
    let [p0, p1, p2, p3] = bezier_controls(from, to);

    // Solve x(u) = beat by bisection.
    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    for _ in 0..40 {
        let mid = 0.5 * (lo + hi);
        if cubic(p0.0, p1.0, p2.0, p3.0, mid) < beat {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    let u = 0.5 * (lo + hi);
    cubic(p0.1, p1.1, p2.1, p3.1, u).clamp(0.0, 1.0)
}

/// Normalized value of a lane at `beat`.
///
/// Points are sorted first. Before the first point and after the last the
/// boundary value holds; an empty lane is [`EMPTY_LANE_VALUE`].
pub fn value_at_beat(lane: &AutomationLane, beat: f64) -> f64 {
    let points = lane.sorted_points();
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return EMPTY_LANE_VALUE;
    };
    if beat.is_nan() || beat <= first.beat {
        return first.value;
    }
    if beat >= last.beat {
        return last.value;
    }

    let next = points.partition_point(|p| p.beat <= beat);
    interpolate(&points[next - 1], &points[next], beat)
}

/// Map a normalized value onto a parameter range.
pub fn normalized_to_param_value(normalized: f64, min: f64, max: f64) -> f64 {
    min + normalized * (max - min)
}

/// Map a parameter value into `[0, 1]`. A degenerate range maps to 0.5.
pub fn param_value_to_normalized(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return 0.5;
    }
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

impl AutomationLane {
    pub fn value_at_beat(&self, beat: f64) -> f64 {
        value_at_beat(self, beat)
    }

    /// Lane value at `beat` in parameter units.
    pub fn param_value_at_beat(&self, beat: f64) -> f64 {
        normalized_to_param_value(self.value_at_beat(beat), self.min_value, self.max_value)
    }
}
