//! # Pitch Module
//!
//! Melody notation: tokenize bars of note names, scale degrees, chords, ties and
//! rests into a piano-roll [`MelodyGrid`], and regenerate notation from one.
//!
//! ## Sub-modules
//! - `types` - MelodyNote and MelodyGrid
//! - `note_name` - note name ↔ MIDI conversion
//! - `chord` - chord suffix table and chord-quality detection
//! - `scale` - scale tables for degree tokens
//! - `lexer` - per-bar tokenizer
//! - `codec` - parse and generate
//! - `lanes` - polyphonic lane splitting and multi-lane round trip
//! - `transform` - transposition and quantization
//!
//! ## Token Grammar
//! - Note: `[A-Ga-g][#b]*[-]?[0-9]*(:[a-zA-Z0-9]+)?`, e.g. `C4`, `f#3`, `Bb:m7`
//! - Scale degree: `[1-7](:[a-zA-Z0-9]+)?`, e.g. `5`, `2:m7`
//! - Tie: `-`
//! - Rest: `.` or `_`
//!
//! ## Example
//! ```rust
//! use notegrid::pitch::{parse_melody, generate_melody};
//! use notegrid::NotationConfig;
//!
//! let config = NotationConfig {
//!     scale: Some("minor".to_string()),
//!     root: Some("A3".to_string()),
//!     ..NotationConfig::default()
//! };
//! let grid = parse_melody("1 3 5:m -", &config);
//! assert_eq!(generate_melody(&grid, 4), "A3 C4 E4:m -");
//! ```

mod chord;
mod codec;
mod lanes;
mod lexer;
mod note_name;
mod scale;
mod transform;
mod types;


pub use chord::{chord_intervals, detect_chord, resolve_chord, ChordMatch};
pub use codec::{generate_melody, parse_melody, BEAT_EPSILON};
pub use lanes::{generate_multi_lane_melody_strings, parse_multi_lane_melody_strings, split_into_lanes};
pub use lexer::{tokenize_bar, Lexer, MelodyToken};
pub use note_name::{midi_to_note_name, note_name_to_midi, parse_note_name, pitch_class, DEFAULT_OCTAVE};
pub use scale::{resolve_degree, scale_intervals};
pub use transform::{quantize_grid, transpose_grid};
pub use types::{MelodyGrid, MelodyNote, DEFAULT_VELOCITY};
