//! Pure grid transforms used by the pattern editor.
//!
//! Every transform returns a new grid and keeps
//! `steps.len() == steps_per_bar * num_bars`. Step indices are flat
//! (`bar * steps_per_bar + step`); out-of-range indices leave the grid unchanged.

use log::debug;

use super::proportional_index;
use super::types::{PatternGrid, PatternStep, MAX_VELOCITY};

/// Flip a step between rest and a plain hit.
pub fn toggle_step(grid: &PatternGrid, index: usize) -> PatternGrid {
    edit_step(grid, index, |step| {
        if step.is_hit() {
            PatternStep::REST
        } else {
            PatternStep::HIT
        }
    })
}

/// Flip the accent of a hit. Accenting a rest turns it into an accented hit.
pub fn toggle_accent(grid: &PatternGrid, index: usize) -> PatternGrid {
    edit_step(grid, index, |step| {
        if step.is_hit() {
            PatternStep {
                velocity: step.velocity,
                accent: !step.accent,
            }
        } else {
            PatternStep::ACCENT
        }
    })
}

/// Set a step's velocity, clamped to `[0, 1.2]`. Zero makes the step a rest.
pub fn set_step_velocity(grid: &PatternGrid, index: usize, velocity: f64) -> PatternGrid {
    let velocity = if velocity.is_nan() {
        0.0
    } else {
        velocity.clamp(0.0, MAX_VELOCITY)
    };
    edit_step(grid, index, |step| {
        if velocity > 0.0 {
            PatternStep {
                velocity,
                accent: step.accent,
            }
        } else {
            PatternStep::REST
        }
    })
}

fn edit_step(
    grid: &PatternGrid,
    index: usize,
    edit: impl FnOnce(&PatternStep) -> PatternStep,
) -> PatternGrid {
    let mut next = grid.clone();
    match next.steps.get_mut(index) {
        Some(step) => *step = edit(step),
        None => debug!("step index {} out of range ({} steps)", index, grid.steps.len()),
    }
    next
}

/// Change the grid dimensions, remapping each bar's steps proportionally.
///
/// Bars beyond the old bar count are filled with rests; bars beyond the new
/// count are dropped.
pub fn resize_grid(grid: &PatternGrid, steps_per_bar: usize, num_bars: usize) -> PatternGrid {
    let steps_per_bar = steps_per_bar.max(1);
    let num_bars = num_bars.max(1);
    let mut next = PatternGrid::empty(steps_per_bar, num_bars, grid.beats_per_bar);

    for bar in 0..num_bars.min(grid.num_bars) {
        let old = grid.bar(bar);
        if old.is_empty() {
            continue;
        }
        for step in 0..steps_per_bar {
            next.steps[bar * steps_per_bar + step] =
                old[proportional_index(step, old.len(), steps_per_bar)];
        }
    }
    next
}

/// Distribute `hits` as evenly as possible over `steps`.
///
/// Uses a running bucket: each step adds `hits`, and whenever the bucket
/// reaches `steps` a hit is emitted and `steps` subtracted. The bucket starts
/// primed so the first step is always a hit.
///
/// # Example
/// ```
/// use notegrid::rhythm::generate_euclidean;
///
/// assert_eq!(
///     generate_euclidean(3, 8),
///     vec![true, false, false, true, false, false, true, false]
/// );
/// ```
pub fn generate_euclidean(hits: usize, steps: usize) -> Vec<bool> {
    if hits == 0 || steps == 0 {
        return vec![false; steps];
    }
    let hits = hits.min(steps);
    let mut bucket = steps - hits;
    let mut pattern = Vec::with_capacity(steps);
    for _ in 0..steps {
        bucket += hits;
        if bucket >= steps {
            bucket -= steps;
            pattern.push(true);
        } else {
            pattern.push(false);
        }
    }
    pattern
}

/// Rotate every bar independently. Positive offsets move hits later.
pub fn shift_pattern(grid: &PatternGrid, offset: i64) -> PatternGrid {
    let mut next = grid.clone();
    let len = grid.steps_per_bar;
    if len == 0 {
        return next;
    }
    let shift = offset.rem_euclid(len as i64) as usize;
    for bar in 0..grid.num_bars {
        let old = grid.bar(bar);
        if old.len() != len {
            continue;
        }
        for (step, value) in old.iter().enumerate() {
            next.steps[bar * len + (step + shift) % len] = *value;
        }
    }
    next
}

/// Swap hits and rests. Accents and velocities are not preserved: new hits
/// have velocity 1.0.
pub fn invert_pattern(grid: &PatternGrid) -> PatternGrid {
    PatternGrid {
        steps: grid
            .steps
            .iter()
            .map(|step| {
                if step.is_hit() {
                    PatternStep::REST
                } else {
                    PatternStep::HIT
                }
            })
            .collect(),
        ..grid.clone()
    }
}

impl PatternGrid {
    /// A single-bar grid filled with a Euclidean distribution.
    pub fn from_euclidean(hits: usize, steps: usize, beats_per_bar: f64) -> Self {
        let steps_per_bar = steps.max(1);
        let mut grid = PatternGrid::empty(steps_per_bar, 1, beats_per_bar);
        for (slot, hit) in grid.steps.iter_mut().zip(generate_euclidean(hits, steps)) {
            if hit {
                *slot = PatternStep::HIT;
            }
        }
        grid
    }
}
