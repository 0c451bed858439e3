//! Chord suffix resolution and chord-quality detection.
//!
//! Suffixes are the part after `:` in a melody token (`C4:maj7`, `2:m`). The
//! same interval table drives both directions: resolving a suffix to MIDI notes
//! while parsing, and naming a set of simultaneous notes while generating.

use log::debug;
use serde::Serialize;

/// Intervals above the root for a chord quality or one of its aliases.
///
/// # Supported Qualities
/// - **Triads**: `maj` (`M`, `major`), `m` (`min`, `minor`), `dim`, `aug` (`+`)
/// - **Suspended**: `sus2`, `sus4` (`sus`)
/// - **Sixths**: `6`, `m6`
/// - **Sevenths**: `7` (`dom7`), `maj7` (`M7`), `m7` (`min7`), `dim7`, `m7b5`, `mmaj7`, `aug7`
/// - **Extended**: `9`, `maj9`, `m9`, `add9`
/// - **Power chord**: `5`
///
/// Lookup is case-sensitive because `M7` and `m7` differ.
///
/// # Examples
/// ```
/// use notegrid::pitch::chord_intervals;
///
/// assert_eq!(chord_intervals("m7"), Some(&[0, 3, 7, 10][..]));
/// assert_eq!(chord_intervals("M7"), Some(&[0, 4, 7, 11][..]));
/// assert_eq!(chord_intervals("nope"), None);
/// ```
pub fn chord_intervals(quality: &str) -> Option<&'static [u8]> {
    let intervals: &'static [u8] = match quality {
        // Triads
        "maj" | "M" | "major" => &[0, 4, 7],
        "m" | "min" | "minor" => &[0, 3, 7],
        "dim" => &[0, 3, 6],
        "aug" | "+" => &[0, 4, 8],

        // Suspended
        "sus2" => &[0, 2, 7],
        "sus4" | "sus" => &[0, 5, 7],

        // Sixths
        "6" | "maj6" => &[0, 4, 7, 9],
        "m6" | "min6" => &[0, 3, 7, 9],

        // Sevenths
        "7" | "dom7" => &[0, 4, 7, 10],
        "maj7" | "M7" => &[0, 4, 7, 11],
        "m7" | "min7" => &[0, 3, 7, 10],
        "dim7" => &[0, 3, 6, 9],
        "m7b5" => &[0, 3, 6, 10],
        "mmaj7" | "mM7" => &[0, 3, 7, 11],
        "aug7" => &[0, 4, 8, 10],

        // Extended
        "9" => &[0, 4, 7, 10, 14],
        "maj9" | "M9" => &[0, 4, 7, 11, 14],
        "m9" | "min9" => &[0, 3, 7, 10, 14],
        "add9" => &[0, 4, 7, 14],

        // Power chord
        "5" => &[0, 7],

        _ => return None,
    };
    Some(intervals)
}

/// MIDI notes of `quality` built on `root`.
///
/// Unknown qualities fall back to the root alone; chord tones above 127 are dropped.
pub fn resolve_chord(root: u8, quality: &str) -> Vec<u8> {
    match chord_intervals(quality) {
        Some(intervals) => intervals
            .iter()
            .filter_map(|&interval| {
                let note = root as u16 + interval as u16;
                u8::try_from(note).ok().filter(|&n| n <= 127)
            })
            .collect(),
        None => {
            debug!("unknown chord quality '{}', using root only", quality);
            vec![root]
        }
    }
}

/// Detection order: most specific shapes first so that, for example, a dominant
/// seventh is never reported as its major triad. Residues are mod 12, sorted.
const DETECTION_TABLE: &[(&str, &[u8])] = &[
    // Extended
    ("9", &[0, 2, 4, 7, 10]),
    ("maj9", &[0, 2, 4, 7, 11]),
    ("m9", &[0, 2, 3, 7, 10]),
    // Sevenths and sixths
    ("maj7", &[0, 4, 7, 11]),
    ("7", &[0, 4, 7, 10]),
    ("m7", &[0, 3, 7, 10]),
    ("mmaj7", &[0, 3, 7, 11]),
    ("m7b5", &[0, 3, 6, 10]),
    ("dim7", &[0, 3, 6, 9]),
    ("aug7", &[0, 4, 8, 10]),
    ("add9", &[0, 2, 4, 7]),
    ("6", &[0, 4, 7, 9]),
    ("m6", &[0, 3, 7, 9]),
    // Triads
    ("maj", &[0, 4, 7]),
    ("m", &[0, 3, 7]),
    ("dim", &[0, 3, 6]),
    ("aug", &[0, 4, 8]),
    ("sus2", &[0, 2, 7]),
    ("sus4", &[0, 5, 7]),
    // Dyads
    ("5", &[0, 7]),
];

/// A detected chord: the MIDI note acting as root and the quality suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChordMatch {
    pub root: u8,
    pub quality: &'static str,
}

/// Name a set of simultaneous notes.
///
/// The lowest note is tried as root first; if no shape matches, each higher
/// note is tried in turn so inversions are recognized. Returns `None` for
/// fewer than two distinct pitch classes or an unknown shape.
///
/// # Examples
/// ```
/// use notegrid::pitch::detect_chord;
///
/// let c_major = detect_chord(&[64, 67, 60]).unwrap();
/// assert_eq!((c_major.root, c_major.quality), (60, "maj"));
///
/// // First inversion: E G C still names C major
/// let inverted = detect_chord(&[64, 67, 72]).unwrap();
/// assert_eq!((inverted.root, inverted.quality), (72, "maj"));
/// ```
pub fn detect_chord(notes: &[u8]) -> Option<ChordMatch> {
    let mut sorted = notes.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    for &root in &sorted {
        let residues = residues_from(&sorted, root);
        if residues.len() < 2 {
            return None;
        }
        if let Some(quality) = match_shape(&residues) {
            return Some(ChordMatch { root, quality });
        }
    }
    None
}

fn residues_from(notes: &[u8], root: u8) -> Vec<u8> {
    let mut residues: Vec<u8> = notes
        .iter()
        .map(|&note| (note as i16 - root as i16).rem_euclid(12) as u8)
        .collect();
    residues.sort_unstable();
    residues.dedup();
    residues
}

fn match_shape(residues: &[u8]) -> Option<&'static str> {
    DETECTION_TABLE
        .iter()
        .find(|(_, shape)| *shape == residues)
        .map(|(quality, _)| *quality)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_chord() {
        assert_eq!(resolve_chord(60, "maj"), vec![60, 64, 67]);
        assert_eq!(resolve_chord(62, "m"), vec![62, 65, 69]);
        assert_eq!(resolve_chord(67, "7"), vec![67, 71, 74, 77]);
        assert_eq!(resolve_chord(60, "maj7"), vec![60, 64, 67, 71]);
        assert_eq!(resolve_chord(48, "5"), vec![48, 55]);
        assert_eq!(resolve_chord(60, "m9"), vec![60, 63, 67, 70, 74]);
    }

    #[test]
    fn test_unknown_quality_is_root_only() {
        assert_eq!(resolve_chord(60, "lydian13"), vec![60]);
    }

    #[test]
    fn test_high_chord_tones_are_dropped() {
        assert_eq!(resolve_chord(124, "maj"), vec![124]);
        assert_eq!(resolve_chord(120, "maj"), vec![120, 124, 127]);
    }

    #[test]
    fn test_detect_triads_and_sevenths() {
        let detect = |notes: &[u8]| detect_chord(notes).map(|m| (m.root, m.quality));
        assert_eq!(detect(&[60, 64, 67]), Some((60, "maj")));
        assert_eq!(detect(&[64, 67, 60]), Some((60, "maj")));
        assert_eq!(detect(&[60, 63, 67, 70]), Some((60, "m7")));
        assert_eq!(detect(&[67, 71, 74, 77]), Some((67, "7")));
        assert_eq!(detect(&[60, 63, 66]), Some((60, "dim")));
        assert_eq!(detect(&[60, 67]), Some((60, "5")));
    }

    #[test]
    fn test_detect_prefers_seventh_over_triad() {
        let m = detect_chord(&[60, 64, 67, 71]).unwrap();
        assert_eq!(m.quality, "maj7");
    }

    #[test]
    fn test_detect_inversions() {
        // A minor in first inversion: C E A
        let m = detect_chord(&[60, 64, 69]).unwrap();
        assert_eq!((m.root, m.quality), (69, "m"));
        // Octave doubling does not change the shape
        let m = detect_chord(&[48, 60, 64, 67]).unwrap();
        assert_eq!((m.root, m.quality), (48, "maj"));
    }

    #[test]
    fn test_detect_gives_up() {
        assert_eq!(detect_chord(&[]), None);
        assert_eq!(detect_chord(&[60]), None);
        assert_eq!(detect_chord(&[60, 72]), None);
        assert_eq!(detect_chord(&[60, 61, 62]), None);
    }

    #[test]
    fn test_every_detected_shape_resolves_back() {
        for (quality, _) in DETECTION_TABLE {
            let notes = resolve_chord(48, quality);
            let m = detect_chord(&notes).unwrap();
            assert_eq!((m.root, m.quality), (48, *quality));
        }
    }
}
