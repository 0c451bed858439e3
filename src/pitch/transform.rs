//! Melody transforms: transposition and quantization.

use super::types::MelodyGrid;

/// Shift a MIDI note by `semitones`, folding back by octaves at the edges.
fn transpose_note(midi: u8, semitones: i32) -> u8 {
    let shifted = midi as i64 + semitones as i64;
    let folded = if shifted > 127 {
        let top = 120 + shifted.rem_euclid(12);
        if top > 127 {
            top - 12
        } else {
            top
        }
    } else if shifted < 0 {
        shifted.rem_euclid(12)
    } else {
        shifted
    };
    folded as u8
}

/// Transpose every note of a grid.
///
/// Notes that would leave the MIDI range are moved by whole octaves until they
/// fit, so the pitch class is always transposed correctly.
pub fn transpose_grid(grid: &MelodyGrid, semitones: i32) -> MelodyGrid {
    let notes = grid
        .notes
        .iter()
        .map(|note| {
            let mut note = *note;
            note.midi_note = transpose_note(note.midi_note, semitones);
            note
        })
        .collect();
    grid.with_notes(notes)
}

/// Snap note starts to the nearest step and durations to whole steps (at least one).
pub fn quantize_grid(grid: &MelodyGrid, steps_per_bar: usize) -> MelodyGrid {
    let step_width = grid.beats_per_bar / steps_per_bar.max(1) as f64;
    let notes = grid
        .notes
        .iter()
        .map(|note| {
            let mut note = *note;
            note.start_beat = ((note.start_beat / step_width).round() * step_width).max(0.0);
            note.duration = (note.duration / step_width).round().max(1.0) * step_width;
            note
        })
        .collect();
    grid.with_notes(notes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::MelodyNote;

    fn grid(notes: Vec<MelodyNote>) -> MelodyGrid {
        MelodyGrid::empty(1, 4.0).with_notes(notes)
    }

    #[test]
    fn test_transpose() {
        let up = transpose_grid(&grid(vec![MelodyNote::new(0.0, 1.0, 60)]), 7);
        assert_eq!(up.notes[0].midi_note, 67);
        let down = transpose_grid(&up, -19);
        assert_eq!(down.notes[0].midi_note, 48);
    }

    #[test]
    fn test_transpose_folds_at_edges() {
        let high = transpose_grid(&grid(vec![MelodyNote::new(0.0, 1.0, 120)]), 10);
        assert_eq!(high.notes[0].midi_note, 118);
        let low = transpose_grid(&grid(vec![MelodyNote::new(0.0, 1.0, 2)]), -5);
        assert_eq!(low.notes[0].midi_note, 9);
    }

    #[test]
    fn test_transpose_extreme_shifts() {
        let base = grid(vec![MelodyNote::new(0.0, 1.0, 60)]);
        // 60 + i32::MAX has pitch class 7 (G)
        assert_eq!(transpose_grid(&base, i32::MAX).notes[0].midi_note, 127);
        // 60 + i32::MIN has pitch class 4 (E)
        assert_eq!(transpose_grid(&base, i32::MIN).notes[0].midi_note, 4);
        assert_eq!(transpose_grid(&base, 1200).notes[0].midi_note, 120);
        assert_eq!(transpose_grid(&base, -1200).notes[0].midi_note, 0);
    }

    #[test]
    fn test_quantize() {
        let q = quantize_grid(
            &grid(vec![MelodyNote::new(0.9, 0.2, 60), MelodyNote::new(2.1, 1.6, 62)]),
            4,
        );
        assert_eq!(q.notes[0].start_beat, 1.0);
        assert_eq!(q.notes[0].duration, 1.0);
        assert_eq!(q.notes[1].start_beat, 2.0);
        assert_eq!(q.notes[1].duration, 2.0);
    }
}
