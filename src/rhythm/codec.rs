//! Character-level rhythm parse and generate

use log::{debug, trace};

use super::proportional_index;
use super::types::{PatternGrid, PatternStep};
use crate::bars::split_into_bars;
use crate::config::NotationConfig;

/// Steps per bar when neither the config nor the input determines it.
pub const DEFAULT_STEPS_PER_BAR: usize = 16;

/// Parse a rhythm pattern such as `"x..x..x.|x.x.x.x."`.
///
/// Never fails: unknown characters are rests, and bars of the wrong length are
/// resampled onto `steps_per_bar` slots. Empty input yields one bar of rests.
pub fn parse_pattern(text: &str, config: &NotationConfig) -> PatternGrid {
    let bars = split_into_bars(text);

    let steps_per_bar = config
        .steps_per_bar
        .filter(|&steps| steps > 0)
        .or_else(|| bars.first().map(|bar| bar.chars().count()))
        .unwrap_or(DEFAULT_STEPS_PER_BAR);

    if bars.is_empty() {
        return PatternGrid::empty(steps_per_bar, 1, config.beats_per_bar);
    }

    let mut steps = Vec::with_capacity(steps_per_bar * bars.len());
    for (bar_index, bar) in bars.iter().enumerate() {
        let cells: Vec<PatternStep> = bar.chars().map(step_from_char).collect();
        if cells.len() != steps_per_bar {
            debug!(
                "resampling bar {} from {} to {} steps",
                bar_index + 1,
                cells.len(),
                steps_per_bar
            );
        }
        for step in 0..steps_per_bar {
            steps.push(cells[proportional_index(step, cells.len(), steps_per_bar)]);
        }
    }

    trace!("parsed {} bars of {} steps", bars.len(), steps_per_bar);
    PatternGrid {
        steps,
        steps_per_bar,
        num_bars: bars.len(),
        beats_per_bar: config.beats_per_bar,
    }
}

/// Render a grid back to pattern text, bars joined by `|`.
pub fn generate_pattern(grid: &PatternGrid) -> String {
    let mut bars = Vec::with_capacity(grid.num_bars);
    for bar in 0..grid.num_bars {
        bars.push(grid.bar(bar).iter().map(char_for_step).collect::<String>());
    }
    bars.join("|")
}

fn step_from_char(c: char) -> PatternStep {
    match c {
        'x' => PatternStep::HIT,
        'X' | 'o' | 'O' => PatternStep::ACCENT,
        '1'..='9' => {
            let digit = c as u32 - '0' as u32;
            PatternStep {
                velocity: 0.1 + digit as f64 / 9.0 * 0.9,
                accent: false,
            }
        }
        _ => PatternStep::REST,
    }
}

fn char_for_step(step: &PatternStep) -> char {
    if !step.is_hit() {
        '.'
    } else if step.accent {
        'X'
    } else if step.velocity >= 0.95 {
        'x'
    } else {
        let digit = ((step.velocity - 0.1) / 0.9 * 9.0).round().clamp(1.0, 9.0) as u32;
        char::from_digit(digit, 10).unwrap_or('x')
    }
}
