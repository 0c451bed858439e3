//! # Editor Synchronization
//!
//! Glue between the codecs and an editor host that owns the source file and
//! the transport:
//! - [`SourceEdit`] - a span of the source plus its replacement text, the only
//!   form in which the crate proposes changes to a file
//! - [`TransportSnapshot`] - the playhead position used to place cursors
//! - [`SyncedModel`] - a parsed model tied to the source it came from, with a
//!   locally-modified flag so external edits never overwrite unsaved work

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::pitch::MelodyGrid;
use crate::rhythm::PatternGrid;

/// Replace `span` (byte offsets) of a source text with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEdit {
    pub span: Range<usize>,
    pub replacement: String,
}

impl SourceEdit {
    /// Apply the edit, or `None` if the span does not fit `source`.
    ///
    /// # Example
    /// ```
    /// use notegrid::sync::SourceEdit;
    ///
    /// let edit = SourceEdit { span: 6..14, replacement: "x.x.x.x.".to_string() };
    /// assert_eq!(edit.apply("beat(\"x..x..x.\")").as_deref(), Some("beat(\"x.x.x.x.\")"));
    /// ```
    pub fn apply(&self, source: &str) -> Option<String> {
        if self.span.start > self.span.end {
            return None;
        }
        let before = source.get(..self.span.start)?;
        let after = source.get(self.span.end..)?;
        Some(format!("{}{}{}", before, self.replacement, after))
    }
}

/// Apply several edits to the same source. Spans refer to the original text.
///
/// `None` if any span does not fit `source` or two spans overlap.
pub fn apply_edits(source: &str, edits: &[SourceEdit]) -> Option<String> {
    let mut ordered: Vec<&SourceEdit> = edits.iter().collect();
    ordered.sort_by_key(|edit| edit.span.start);

    let mut out = String::with_capacity(source.len());
    let mut pos = 0;
    for edit in ordered {
        if edit.span.start < pos || edit.span.start > edit.span.end {
            return None;
        }
        out.push_str(source.get(pos..edit.span.start)?);
        source.get(edit.span.clone())?;
        out.push_str(&edit.replacement);
        pos = edit.span.end;
    }
    out.push_str(source.get(pos..)?);
    Some(out)
}

/// Transport state reported by the audio runtime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransportSnapshot {
    pub beat: f64,
    pub running: bool,
}

/// Step under the playhead, looping over the pattern. `None` while stopped.
pub fn pattern_cursor(grid: &PatternGrid, snapshot: &TransportSnapshot) -> Option<usize> {
    if !snapshot.running {
        return None;
    }
    grid.step_at_beat(snapshot.beat)
}

/// Beat under the playhead within the melody's loop. `None` while stopped.
pub fn melody_cursor_beat(grid: &MelodyGrid, snapshot: &TransportSnapshot) -> Option<f64> {
    if !snapshot.running || grid.total_beats <= 0.0 || !snapshot.beat.is_finite() {
        return None;
    }
    Some(snapshot.beat.rem_euclid(grid.total_beats))
}

/// Result of offering an external source change to a [`SyncedModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The text is what the model was parsed from
    Unchanged,
    /// The model was re-derived from the new text
    Reparsed,
    /// Local edits are pending; the external change was ignored
    KeptLocalEdits,
}

/// A model derived from source text, tracking unsaved local edits.
#[derive(Debug, Clone)]
pub struct SyncedModel<T> {
    model: T,
    source: String,
    locally_modified: bool,
}

impl<T> SyncedModel<T> {
    pub fn new(source: impl Into<String>, parse: impl FnOnce(&str) -> T) -> Self {
        let source = source.into();
        let model = parse(&source);
        Self {
            model,
            source,
            locally_modified: false,
        }
    }

    pub fn model(&self) -> &T {
        &self.model
    }

    /// Source text the model was last parsed from or saved to.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_locally_modified(&self) -> bool {
        self.locally_modified
    }

    /// Mutate the model; marks it locally modified.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        self.locally_modified = true;
        f(&mut self.model)
    }

    pub fn mark_modified(&mut self) {
        self.locally_modified = true;
    }

    /// Record that the model was written back as `source`.
    pub fn mark_saved(&mut self, source: impl Into<String>) {
        self.source = source.into();
        self.locally_modified = false;
    }

    /// Offer text that changed outside the editor.
    pub fn external_change(&mut self, source: &str, parse: impl FnOnce(&str) -> T) -> SyncOutcome {
        if self.locally_modified {
            return SyncOutcome::KeptLocalEdits;
        }
        if source == self.source {
            return SyncOutcome::Unchanged;
        }
        self.model = parse(source);
        self.source = source.to_string();
        SyncOutcome::Reparsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NotationConfig;
    use crate::rhythm::{generate_pattern, parse_pattern, toggle_step};

    fn parse(text: &str) -> PatternGrid {
        parse_pattern(text, &NotationConfig::default())
    }

    #[test]
    fn test_source_edit_apply() {
        let edit = SourceEdit {
            span: 0..3,
            replacement: "x.x.".to_string(),
        };
        assert_eq!(edit.apply("x..|rest").as_deref(), Some("x.x.|rest"));
        let past_end = SourceEdit {
            span: 5..9,
            replacement: String::new(),
        };
        assert_eq!(past_end.apply("abc"), None);
    }

    #[test]
    fn test_source_edit_rejects_split_characters() {
        let edit = SourceEdit {
            span: 1..2,
            replacement: "a".to_string(),
        };
        assert_eq!(edit.apply("é"), None);
    }

    #[test]
    fn test_apply_edits_in_any_order() {
        let source = "abc def ghi";
        let edits = [
            SourceEdit { span: 8..11, replacement: "G".to_string() },
            SourceEdit { span: 0..3, replacement: "A".to_string() },
        ];
        assert_eq!(apply_edits(source, &edits).as_deref(), Some("A def G"));
        assert_eq!(apply_edits(source, &[]).as_deref(), Some(source));

        let overlapping = [
            SourceEdit { span: 0..5, replacement: String::new() },
            SourceEdit { span: 4..6, replacement: String::new() },
        ];
        assert_eq!(apply_edits(source, &overlapping), None);
    }

    #[test]
    fn test_pattern_cursor() {
        let grid = parse("x...|x...");
        let running = |beat| TransportSnapshot { beat, running: true };
        assert_eq!(pattern_cursor(&grid, &running(0.0)), Some(0));
        assert_eq!(pattern_cursor(&grid, &running(5.5)), Some(5));
        assert_eq!(pattern_cursor(&grid, &running(9.0)), Some(1));
        let stopped = TransportSnapshot { beat: 2.0, running: false };
        assert_eq!(pattern_cursor(&grid, &stopped), None);
    }

    #[test]
    fn test_melody_cursor_loops() {
        let grid = MelodyGrid::empty(2, 4.0);
        let snapshot = TransportSnapshot { beat: 11.5, running: true };
        assert_eq!(melody_cursor_beat(&grid, &snapshot), Some(3.5));
    }

    #[test]
    fn test_external_change_reparses_clean_model() {
        let mut synced = SyncedModel::new("x...", parse);
        assert_eq!(synced.external_change("x...", parse), SyncOutcome::Unchanged);
        assert_eq!(synced.external_change("xx..", parse), SyncOutcome::Reparsed);
        assert_eq!(synced.model().hit_indices(0), vec![0, 1]);
        assert_eq!(synced.source(), "xx..");
    }

    #[test]
    fn test_local_edits_win_over_external_changes() {
        let mut synced = SyncedModel::new("x...", parse);
        synced.edit(|grid| *grid = toggle_step(grid, 3));
        assert!(synced.is_locally_modified());

        assert_eq!(synced.external_change("....", parse), SyncOutcome::KeptLocalEdits);
        assert_eq!(generate_pattern(synced.model()), "x..x");

        let saved = generate_pattern(synced.model());
        synced.mark_saved(saved);
        assert!(!synced.is_locally_modified());
        assert_eq!(synced.external_change("....", parse), SyncOutcome::Reparsed);
        assert!(synced.model().hit_indices(0).is_empty());
    }
}
