//! Melody parse (notation → piano roll) and generate (piano roll → notation).

use log::{debug, trace};

use super::chord::{detect_chord, resolve_chord};
use super::lexer::{tokenize_bar, MelodyToken};
use super::note_name::{midi_to_note_name, note_name_to_midi};
use super::scale::resolve_degree;
use super::types::{MelodyGrid, MelodyNote};
use crate::bars::split_into_bars;
use crate::config::NotationConfig;

/// Tolerance for comparing beat positions.
pub const BEAT_EPSILON: f64 = 0.001;

/// Parse melody notation such as `"C4 - - . | E4 - - ."`.
///
/// Each bar spans `beats_per_bar` beats, divided equally among its tokens. A
/// note (or chord) stays pending while ties follow it, so ties may continue a
/// note across a bar line; a rest, the next note or the end of input commits
/// it. Scale-degree tokens resolve only when the config has both scale and
/// root, and are treated as rests otherwise.
///
/// # Example
/// ```
/// use notegrid::pitch::parse_melody;
/// use notegrid::NotationConfig;
///
/// let grid = parse_melody("C4 - - . | E4 - - .", &NotationConfig::default());
/// assert_eq!(grid.notes.len(), 2);
/// assert_eq!(grid.notes[0].midi_note, 60);
/// assert_eq!(grid.notes[0].duration, 3.0);
/// assert_eq!(grid.notes[1].start_beat, 4.0);
/// ```
pub fn parse_melody(text: &str, config: &NotationConfig) -> MelodyGrid {
    let bars = split_into_bars(text);
    let beats_per_bar = config.beats_per_bar;
    let scale_root = config
        .scale_context()
        .and_then(|(scale, root)| note_name_to_midi(root).map(|root| (scale, root)));

    let mut notes = Vec::new();
    let mut pending: Vec<MelodyNote> = Vec::new();

    for (bar_index, bar) in bars.iter().enumerate() {
        let tokens = tokenize_bar(bar);
        if tokens.is_empty() {
            continue;
        }
        let slot = beats_per_bar / tokens.len() as f64;
        let bar_start = bar_index as f64 * beats_per_bar;

        for (i, token) in tokens.into_iter().enumerate() {
            let start = bar_start + i as f64 * slot;
            match token {
                MelodyToken::Tie => {
                    for note in pending.iter_mut() {
                        note.duration += slot;
                    }
                }
                MelodyToken::Rest => notes.append(&mut pending),
                MelodyToken::Note { midi } => {
                    notes.append(&mut pending);
                    pending = open_notes(&midi, start, slot);
                }
                MelodyToken::Degree { degree, quality } => {
                    notes.append(&mut pending);
                    let Some((scale, root)) = scale_root else {
                        debug!(
                            "degree {} in bar {} has no scale context, treating as rest",
                            degree,
                            bar_index + 1
                        );
                        continue;
                    };
                    let Some(tone) = resolve_degree(degree, scale, root) else {
                        debug!("degree {} of {} resolves out of range", degree, scale);
                        continue;
                    };
                    let midi = match quality {
                        Some(quality) => resolve_chord(tone, &quality),
                        None => vec![tone],
                    };
                    pending = open_notes(&midi, start, slot);
                }
            }
        }
    }
    notes.append(&mut pending);

    let num_bars = bars.len().max(1);
    trace!("parsed {} notes over {} bars", notes.len(), num_bars);
    MelodyGrid {
        notes,
        total_beats: num_bars as f64 * beats_per_bar,
        num_bars,
        beats_per_bar,
        scale: config.scale.clone(),
        root: config.root.clone(),
    }
}

fn open_notes(midi: &[u8], start: f64, duration: f64) -> Vec<MelodyNote> {
    let is_chord_tone = midi.len() > 1;
    midi.iter()
        .map(|&midi_note| MelodyNote {
            is_chord_tone,
            ..MelodyNote::new(start, duration, midi_note)
        })
        .collect()
}

/// Render a grid as notation with `steps_per_bar` tokens per bar.
///
/// For each step: notes starting in it are written as a note name, or as
/// `root:quality` when several start together with equal durations and form a
/// known chord; a note sounding through the step is written `-`; otherwise `.`.
/// Bars are joined with `" | "`.
pub fn generate_melody(grid: &MelodyGrid, steps_per_bar: usize) -> String {
    let steps_per_bar = steps_per_bar.max(1);
    let step_width = grid.beats_per_bar / steps_per_bar as f64;

    let mut bars = Vec::with_capacity(grid.num_bars);
    for bar in 0..grid.num_bars {
        let mut tokens = Vec::with_capacity(steps_per_bar);
        for step in 0..steps_per_bar {
            let step_start = (bar * steps_per_bar + step) as f64 * step_width;
            tokens.push(step_token(grid, step_start, step_start + step_width));
        }
        bars.push(tokens.join(" "));
    }
    bars.join(" | ")
}

fn step_token(grid: &MelodyGrid, step_start: f64, step_end: f64) -> String {
    let starting: Vec<&MelodyNote> = grid
        .notes
        .iter()
        .filter(|n| n.start_beat >= step_start - BEAT_EPSILON && n.start_beat < step_end - BEAT_EPSILON)
        .collect();

    if let Some(lowest) = starting.iter().min_by_key(|n| n.midi_note) {
        if starting.len() > 1 {
            let equal_durations = starting
                .iter()
                .all(|n| (n.duration - lowest.duration).abs() < BEAT_EPSILON);
            if equal_durations {
                let midi: Vec<u8> = starting.iter().map(|n| n.midi_note).collect();
                if let Some(chord) = detect_chord(&midi) {
                    return format!("{}:{}", midi_to_note_name(chord.root), chord.quality);
                }
            }
        }
        return midi_to_note_name(lowest.midi_note);
    }

    let sustained = grid
        .notes
        .iter()
        .any(|n| n.start_beat < step_start - BEAT_EPSILON && n.end_beat() > step_start + BEAT_EPSILON);
    if sustained {
        "-".to_string()
    } else {
        ".".to_string()
    }
}
