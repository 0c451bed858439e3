//! Polyphonic lane splitting.
//!
//! The notation holds one note or chord per time slot, so a polyphonic grid is
//! written as several lanes, each free of overlaps.

use super::codec::{generate_melody, parse_melody, BEAT_EPSILON};
use super::types::{sort_notes, MelodyGrid, MelodyNote};
use crate::config::NotationConfig;

/// Split notes into the fewest non-overlapping lanes for their order.
///
/// Notes are sorted by `(start_beat, midi_note)` and each goes into the first
/// lane whose last note has ended by its start (within [`BEAT_EPSILON`]);
/// otherwise a new lane is opened.
pub fn split_into_lanes(notes: &[MelodyNote]) -> Vec<Vec<MelodyNote>> {
    let mut sorted = notes.to_vec();
    sort_notes(&mut sorted);

    let mut lanes: Vec<Vec<MelodyNote>> = Vec::new();
    for note in sorted {
        let free_lane = lanes.iter_mut().find(|lane| {
            lane.last()
                .is_some_and(|last| last.end_beat() <= note.start_beat + BEAT_EPSILON)
        });
        match free_lane {
            Some(lane) => lane.push(note),
            None => lanes.push(vec![note]),
        }
    }
    lanes
}

/// One notation string per lane. A grid without notes yields a single lane of rests.
pub fn generate_multi_lane_melody_strings(grid: &MelodyGrid, steps_per_bar: usize) -> Vec<String> {
    let lanes = split_into_lanes(&grid.notes);
    if lanes.is_empty() {
        return vec![generate_melody(grid, steps_per_bar)];
    }
    lanes
        .into_iter()
        .map(|lane| generate_melody(&grid.with_notes(lane), steps_per_bar))
        .collect()
}

/// Parse every lane and merge the notes into one grid spanning the longest lane.
pub fn parse_multi_lane_melody_strings<S: AsRef<str>>(
    lanes: &[S],
    config: &NotationConfig,
) -> MelodyGrid {
    let mut merged = MelodyGrid::empty(1, config.beats_per_bar);
    merged.scale = config.scale.clone();
    merged.root = config.root.clone();

    for lane in lanes {
        let grid = parse_melody(lane.as_ref(), config);
        if grid.num_bars > merged.num_bars {
            merged.set_num_bars(grid.num_bars);
        }
        merged.notes.extend(grid.notes);
    }
    merged
}
