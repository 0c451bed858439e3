//! Pattern grid type definitions

use serde::{Deserialize, Serialize};

/// Upper bound for step velocity. Values above 1.0 are allowed for emphasis.
pub const MAX_VELOCITY: f64 = 1.2;

/// One slot of a step sequencer.
///
/// A velocity of 0 is a rest; any positive velocity is a hit.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternStep {
    pub velocity: f64,
    pub accent: bool,
}

impl PatternStep {
    pub const REST: PatternStep = PatternStep { velocity: 0.0, accent: false };
    pub const HIT: PatternStep = PatternStep { velocity: 1.0, accent: false };
    pub const ACCENT: PatternStep = PatternStep { velocity: 1.0, accent: true };

    pub fn is_hit(&self) -> bool {
        self.velocity > 0.0
    }
}

/// A parsed rhythm pattern.
///
/// Steps are stored bar after bar; `steps.len() == steps_per_bar * num_bars`
/// holds for every grid produced by this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternGrid {
    pub steps: Vec<PatternStep>,
    pub steps_per_bar: usize,
    pub num_bars: usize,
    pub beats_per_bar: f64,
}

impl PatternGrid {
    /// An all-rest grid.
    pub fn empty(steps_per_bar: usize, num_bars: usize, beats_per_bar: f64) -> Self {
        Self {
            steps: vec![PatternStep::REST; steps_per_bar * num_bars],
            steps_per_bar,
            num_bars,
            beats_per_bar,
        }
    }

    pub fn total_steps(&self) -> usize {
        self.steps_per_bar * self.num_bars
    }

    pub fn total_beats(&self) -> f64 {
        self.num_bars as f64 * self.beats_per_bar
    }

    /// Steps of one bar, or an empty slice past the end.
    pub fn bar(&self, bar: usize) -> &[PatternStep] {
        let start = bar * self.steps_per_bar;
        self.steps
            .get(start..start + self.steps_per_bar)
            .unwrap_or(&[])
    }

    /// Indices within `bar` that hold a hit.
    pub fn hit_indices(&self, bar: usize) -> Vec<usize> {
        self.bar(bar)
            .iter()
            .enumerate()
            .filter(|(_, step)| step.is_hit())
            .map(|(i, _)| i)
            .collect()
    }

    /// Flat step index under `beat`, wrapping around the pattern length.
    pub fn step_at_beat(&self, beat: f64) -> Option<usize> {
        let total_beats = self.total_beats();
        if self.total_steps() == 0 || total_beats <= 0.0 || !beat.is_finite() {
            return None;
        }
        let looped = beat.rem_euclid(total_beats);
        let step_width = self.beats_per_bar / self.steps_per_bar as f64;
        let index = (looped / step_width).floor() as usize;
        Some(index.min(self.total_steps() - 1))
    }
}
