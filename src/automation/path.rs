//! SVG path for drawing a lane.

use super::curve::{bezier_controls, interpolate};
use super::types::{AutomationLane, CurveType};

/// Line segments used to approximate eased curves.
const SEGMENT_SAMPLES: usize = 16;

/// Build an SVG path (`M`/`L`/`C` commands) for a lane drawn in a
/// `width` × `height` box spanning `total_beats`. Value 1 is at the top.
///
/// The line holds the first value from x = 0 and the last value to x = width.
/// Returns an empty string for a lane without points or an empty box.
pub fn generate_curve_path(lane: &AutomationLane, width: f64, height: f64, total_beats: f64) -> String {
    let points = lane.sorted_points();
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return String::new();
    };
    if total_beats <= 0.0 || width <= 0.0 {
        return String::new();
    }

    let x = |beat: f64| beat / total_beats * width;
    let y = |value: f64| (1.0 - value) * height;

    let mut path = String::new();
    path.push_str(&format!("M 0.00 {:.2}", y(first.value)));
    path.push_str(&format!(" L {:.2} {:.2}", x(first.beat), y(first.value)));

    for pair in points.windows(2) {
        let (from, to) = (&pair[0], &pair[1]);
        let has_handles = from.bezier_out.is_some() || to.bezier_in.is_some();
        match from.curve_type {
            CurveType::Linear => {
                path.push_str(&format!(" L {:.2} {:.2}", x(to.beat), y(to.value)));
            }
            CurveType::Step => {
                path.push_str(&format!(
                    " L {:.2} {:.2} L {:.2} {:.2}",
                    x(to.beat),
                    y(from.value),
                    x(to.beat),
                    y(to.value)
                ));
            }
            CurveType::Bezier if has_handles => {
                let [_, c1, c2, end] = bezier_controls(from, to);
                path.push_str(&format!(
                    " C {:.2} {:.2} {:.2} {:.2} {:.2} {:.2}",
                    x(c1.0),
                    y(c1.1),
                    x(c2.0),
                    y(c2.1),
                    x(end.0),
                    y(end.1)
                ));
            }
            _ => {
                for k in 1..=SEGMENT_SAMPLES {
                    let beat = from.beat + (to.beat - from.beat) * k as f64 / SEGMENT_SAMPLES as f64;
                    let value = if k == SEGMENT_SAMPLES {
                        to.value
                    } else {
                        interpolate(from, to, beat)
                    };
                    path.push_str(&format!(" L {:.2} {:.2}", x(beat), y(value)));
                }
            }
        }
    }

    path.push_str(&format!(" L {:.2} {:.2}", width, y(last.value)));
    path
}
