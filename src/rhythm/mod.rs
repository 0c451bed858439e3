//! # Rhythm Module
//!
//! Step-sequencer patterns: parse compact character grids into [`PatternGrid`]s,
//! regenerate the text, and transform grids for the editor.
//!
//! ## Sub-modules
//! - `types` - PatternStep and PatternGrid
//! - `codec` - character-level parse and generate
//! - `transform` - toggles, velocity edits, resize, Euclidean fill, rotation, inversion
//!
//! ## Character Set
//!
//! | Character | Meaning |
//! |---|---|
//! | `x` | hit, velocity 1.0 |
//! | `X` `o` `O` | accented hit, velocity 1.0 |
//! | `1`-`9` | hit, velocity `0.1 + d/9 * 0.9` |
//! | `.` `_` `0` `-` | rest |
//! | anything else | rest |
//!
//! ## Example
//! ```rust
//! use notegrid::rhythm::{parse_pattern, generate_pattern};
//! use notegrid::NotationConfig;
//!
//! let grid = parse_pattern("x..x..x.|x.x.x.x.", &NotationConfig::default());
//! assert_eq!(grid.steps_per_bar, 8);
//! assert_eq!(grid.num_bars, 2);
//! assert_eq!(grid.hit_indices(0), vec![0, 3, 6]);
//! assert_eq!(generate_pattern(&grid), "x..x..x.|x.x.x.x.");
//! ```
//!
//! ## Resampling
//! Bars whose length differs from `steps_per_bar` are resampled by nearest-index
//! proportional mapping (`floor(step * bar_len / steps_per_bar)`), never by
//! interpolation. `resize_grid` uses the same mapping.

mod codec;
mod transform;
mod types;

#[cfg(test)]
mod tests;

pub use codec::{generate_pattern, parse_pattern, DEFAULT_STEPS_PER_BAR};
pub use transform::{
    generate_euclidean, invert_pattern, resize_grid, set_step_velocity, shift_pattern,
    toggle_accent, toggle_step,
};
pub use types::{PatternGrid, PatternStep, MAX_VELOCITY};

/// Map `index` in a sequence of `new_len` slots onto a sequence of `old_len` slots.
pub(crate) fn proportional_index(index: usize, old_len: usize, new_len: usize) -> usize {
    index * old_len / new_len
}
