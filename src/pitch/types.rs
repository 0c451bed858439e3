//! Melody grid type definitions

use serde::{Deserialize, Serialize};

/// Velocity given to notes parsed from notation, which carries no dynamics.
pub const DEFAULT_VELOCITY: f64 = 0.8;

/// One note of a piano roll.
///
/// # Fields
/// - `start_beat`: position from the start of the grid, in beats
/// - `duration`: length in beats, always positive
/// - `midi_note`: MIDI note number; 60 is C4
/// - `velocity`: 0.0-1.0
/// - `is_chord_tone`: the note came from a chord token together with others
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MelodyNote {
    pub start_beat: f64,
    pub duration: f64,
    pub midi_note: u8,
    pub velocity: f64,
    pub is_chord_tone: bool,
}

impl MelodyNote {
    pub fn new(start_beat: f64, duration: f64, midi_note: u8) -> Self {
        Self {
            start_beat,
            duration,
            midi_note,
            velocity: DEFAULT_VELOCITY,
            is_chord_tone: false,
        }
    }

    pub fn end_beat(&self) -> f64 {
        self.start_beat + self.duration
    }

    /// Open-interval overlap test.
    pub fn overlaps(&self, other: &MelodyNote) -> bool {
        self.start_beat < other.end_beat() && other.start_beat < self.end_beat()
    }
}

/// A parsed melodic line (or several merged lanes).
///
/// Notes are unordered. `start_beat + duration <= total_beats` is expected but
/// not enforced, since editors may violate it while dragging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MelodyGrid {
    pub notes: Vec<MelodyNote>,
    pub total_beats: f64,
    pub num_bars: usize,
    pub beats_per_bar: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub scale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub root: Option<String>,
}

impl MelodyGrid {
    pub fn empty(num_bars: usize, beats_per_bar: f64) -> Self {
        Self {
            notes: Vec::new(),
            total_beats: num_bars as f64 * beats_per_bar,
            num_bars,
            beats_per_bar,
            scale: None,
            root: None,
        }
    }

    /// A grid with the same dimensions and scale context but other notes.
    pub fn with_notes(&self, notes: Vec<MelodyNote>) -> Self {
        Self {
            notes,
            total_beats: self.total_beats,
            num_bars: self.num_bars,
            beats_per_bar: self.beats_per_bar,
            scale: self.scale.clone(),
            root: self.root.clone(),
        }
    }

    pub fn add_note(&mut self, note: MelodyNote) {
        self.notes.push(note);
    }

    pub fn remove_note(&mut self, index: usize) -> Option<MelodyNote> {
        if index < self.notes.len() {
            Some(self.notes.remove(index))
        } else {
            None
        }
    }

    /// Change the bar count, keeping `total_beats` consistent. Notes are kept
    /// even if they now extend past the end.
    pub fn set_num_bars(&mut self, num_bars: usize) {
        self.num_bars = num_bars;
        self.total_beats = num_bars as f64 * self.beats_per_bar;
    }

    /// Notes ordered by start beat, then pitch.
    pub fn notes_sorted(&self) -> Vec<MelodyNote> {
        let mut notes = self.notes.clone();
        sort_notes(&mut notes);
        notes
    }
}

pub(crate) fn sort_notes(notes: &mut [MelodyNote]) {
    notes.sort_by(|a, b| {
        a.start_beat
            .total_cmp(&b.start_beat)
            .then(a.midi_note.cmp(&b.midi_note))
    });
}
