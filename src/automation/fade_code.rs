//! Automation ↔ source code.
//!
//! A lane is written as one `fade` call per pair of consecutive points:
//!
//! ```text
//! group("drums").fade("gain", 0.200, 0.800, 4.00)
//! // from beat 4.00
//! group("drums").fade("gain", 0.800, 0.500, 4.00)
//! ```
//!
//! Values are in parameter units (start and end with three decimals, duration
//! in beats with two). A `// from beat N` comment precedes every call that does
//! not start at beat 0.
//!
//! Reading code back uses a small explicit grammar rather than pattern matching:
//!
//! ```text
//! call   := kind "(" string ")" "." "fade" "(" string "," number "," number "," number ","? ")"
//! kind   := "group" | "voice" | "effect"
//! string := '"' ... '"' | "'" ... "'"
//! ```
//!
//! Whitespace (including newlines) is allowed between any two tokens. Calls
//! follow each other on a running beat cursor; an anchor comment resets it.
//! An anchor applies to the next call only when nothing but whitespace and
//! comments separates them.

use std::ops::Range;

use log::trace;

use super::curve::{normalized_to_param_value, param_value_to_normalized};
use super::types::{AutomationLane, AutomationPoint, AutomationTarget, CurveType, EntityKind};
use crate::sync::SourceEdit;

/// Points closer than this many beats are considered duplicates.
pub const DEDUP_EPSILON: f64 = 0.001;

const ANCHOR_PREFIX: &str = "from beat";

/// One `fade` call found in source code.
#[derive(Debug, Clone, PartialEq)]
pub struct FadeCall {
    /// Byte span of the call expression
    pub span: Range<usize>,
    pub start_value: f64,
    pub end_value: f64,
    pub duration: f64,
    /// Beat from a preceding `// from beat N` comment
    pub anchor_beat: Option<f64>,
    /// Byte span of that comment
    pub anchor_span: Option<Range<usize>>,
}

/// Generate one `fade` call per consecutive point pair. Empty for fewer than two points.
pub fn generate_fade_code(lane: &AutomationLane) -> String {
    let points = lane.sorted_points();
    if points.len() < 2 {
        return String::new();
    }

    let target = &lane.target;
    let call = format!("{}(\"{}\")", target.kind.call_name(), target.name);

    let mut lines = Vec::new();
    for pair in points.windows(2) {
        let (from, to) = (&pair[0], &pair[1]);
        if from.beat.abs() > DEDUP_EPSILON {
            lines.push(format!("// {} {:.2}", ANCHOR_PREFIX, from.beat));
        }
        lines.push(format!(
            "{}.fade(\"{}\", {:.3}, {:.3}, {:.2})",
            call,
            target.parameter,
            normalized_to_param_value(from.value, lane.min_value, lane.max_value),
            normalized_to_param_value(to.value, lane.min_value, lane.max_value),
            to.beat - from.beat
        ));
    }
    lines.join("\n")
}

/// All `fade` calls on `target` in `code`, in source order.
pub fn find_fade_calls(code: &str, target: &AutomationTarget) -> Vec<FadeCall> {
    scan(code)
        .into_iter()
        .filter(|call| {
            call.kind == target.kind && call.name == target.name && call.parameter == target.parameter
        })
        .map(|call| call.fade)
        .collect()
}

/// Rebuild lane points from the `fade` calls on `target`.
///
/// Each call contributes a start and an end point (linear curves), values
/// normalized against `min_value`/`max_value`. Points within
/// [`DEDUP_EPSILON`] beats of an earlier point are dropped. Returns an empty
/// list when nothing matches.
pub fn parse_fade_code(
    code: &str,
    target: &AutomationTarget,
    min_value: f64,
    max_value: f64,
) -> Vec<AutomationPoint> {
    let mut cursor = 0.0;
    let mut points: Vec<AutomationPoint> = Vec::new();

    for call in find_fade_calls(code, target) {
        if let Some(anchor) = call.anchor_beat {
            cursor = anchor;
        }
        let duration = call.duration.max(0.0);
        let candidates = [
            (cursor, call.start_value),
            (cursor + duration, call.end_value),
        ];
        for (beat, value) in candidates {
            if points.iter().any(|p| (p.beat - beat).abs() < DEDUP_EPSILON) {
                continue;
            }
            let normalized = param_value_to_normalized(value, min_value, max_value);
            points.push(AutomationPoint::new(beat, normalized, CurveType::Linear));
        }
        cursor += duration;
    }

    points.sort_by(|a, b| a.beat.total_cmp(&b.beat));
    trace!("read {} automation points for {:?}", points.len(), target);
    points
}

impl AutomationLane {
    /// Replace this lane's points with those read from `code`. Leaves the lane
    /// untouched and returns false when no call matches.
    pub fn sync_from_code(&mut self, code: &str) -> bool {
        let points = parse_fade_code(code, &self.target, self.min_value, self.max_value);
        if points.is_empty() {
            return false;
        }
        self.points = points;
        true
    }
}

/// Edits replacing the `fade` calls on the lane's target with freshly
/// generated code.
///
/// Matching calls separated only by whitespace (and their anchor comments)
/// form a run. The first run is replaced by the generated code and later runs
/// are removed, so code between runs, including calls on other targets, is
/// left untouched. Empty when the source has no matching call.
pub fn fade_code_edits(source: &str, lane: &AutomationLane) -> Vec<SourceEdit> {
    let mut runs: Vec<Range<usize>> = Vec::new();
    for call in find_fade_calls(source, &lane.target) {
        let start = call
            .anchor_span
            .as_ref()
            .map_or(call.span.start, |anchor| anchor.start.min(call.span.start));
        match runs.last_mut() {
            Some(run) if source[run.end..start].trim().is_empty() => run.end = call.span.end,
            _ => runs.push(start..call.span.end),
        }
    }

    let mut edits = Vec::with_capacity(runs.len());
    for (i, run) in runs.into_iter().enumerate() {
        if i == 0 {
            edits.push(SourceEdit {
                span: run,
                replacement: generate_fade_code(lane),
            });
        } else {
            // Take the line break before a removed run with it.
            let start = source[..run.start].trim_end().len();
            edits.push(SourceEdit {
                span: start..run.end,
                replacement: String::new(),
            });
        }
    }
    edits
}

struct ScannedCall {
    kind: EntityKind,
    name: String,
    parameter: String,
    fade: FadeCall,
}

/// Find every well-formed `fade` call, whatever its target.
fn scan(code: &str) -> Vec<ScannedCall> {
    let mut calls = Vec::new();
    let mut anchor: Option<(f64, Range<usize>)> = None;
    let mut pos = 0;

    while let Some(c) = code[pos..].chars().next() {
        let rest = &code[pos..];
        if rest.starts_with("//") {
            let end = rest.find('\n').map_or(code.len(), |i| pos + i);
            if let Some(beat) = parse_anchor(&code[pos + 2..end]) {
                anchor = Some((beat, pos..end));
            }
            pos = end;
            continue;
        }

        let word_start = c.is_ascii_alphabetic()
            && !code[..pos]
                .chars()
                .next_back()
                .is_some_and(|prev| prev.is_alphanumeric() || prev == '_');
        if word_start {
            if let Some(mut call) = Scanner::new(code, pos).call() {
                if let Some((beat, span)) = anchor.take() {
                    call.fade.anchor_beat = Some(beat);
                    call.fade.anchor_span = Some(span);
                }
                pos = call.fade.span.end;
                calls.push(call);
                continue;
            }
        }
        // Any other code detaches a pending anchor.
        if !c.is_whitespace() {
            anchor = None;
        }
        pos += c.len_utf8();
    }
    calls
}

fn parse_anchor(comment: &str) -> Option<f64> {
    comment
        .trim()
        .strip_prefix(ANCHOR_PREFIX)?
        .trim()
        .parse()
        .ok()
        .filter(|beat: &f64| beat.is_finite())
}

/// Cursor over source text for the `fade` call grammar.
struct Scanner<'a> {
    input: &'a str,
    start: usize,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str, start: usize) -> Self {
        Self { input, start, pos: start }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn take_while(&mut self, accept: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest.find(|c: char| !accept(c)).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    fn eat(&mut self, literal: &str) -> Option<()> {
        self.skip_whitespace();
        if self.rest().starts_with(literal) {
            self.pos += literal.len();
            Some(())
        } else {
            None
        }
    }

    fn identifier(&mut self) -> &'a str {
        self.skip_whitespace();
        self.take_while(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    fn string(&mut self) -> Option<&'a str> {
        self.skip_whitespace();
        let quote = self.rest().chars().next().filter(|&c| c == '"' || c == '\'')?;
        self.pos += 1;
        let body = self.take_while(|c| c != quote && c != '\n');
        if !self.rest().starts_with(quote) {
            return None;
        }
        self.pos += 1;
        Some(body)
    }

    fn number(&mut self) -> Option<f64> {
        self.skip_whitespace();
        let text = self.take_while(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
        text.parse().ok().filter(|value: &f64| value.is_finite())
    }

    fn call(&mut self) -> Option<ScannedCall> {
        let kind: EntityKind = self.identifier().parse().ok()?;
        self.eat("(")?;
        let name = self.string()?;
        self.eat(")")?;
        self.eat(".")?;
        if self.identifier() != "fade" {
            return None;
        }
        self.eat("(")?;
        let parameter = self.string()?;
        self.eat(",")?;
        let start_value = self.number()?;
        self.eat(",")?;
        let end_value = self.number()?;
        self.eat(",")?;
        let duration = self.number()?;
        let _ = self.eat(",");
        self.eat(")")?;

        Some(ScannedCall {
            kind,
            name: name.to_string(),
            parameter: parameter.to_string(),
            fade: FadeCall {
                span: self.start..self.pos,
                start_value,
                end_value,
                duration,
                anchor_beat: None,
                anchor_span: None,
            },
        })
    }
}
