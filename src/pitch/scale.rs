//! Scale tables for scale-degree tokens.

use log::debug;

const MAJOR: &[u8] = &[0, 2, 4, 5, 7, 9, 11];

/// Semitone intervals of a named scale.
///
/// Names are matched case-insensitively with spaces and hyphens treated as
/// underscores (`"Harmonic Minor"`, `"harmonic-minor"` and `"harmonic_minor"`
/// are the same scale). Unknown names fall back to major.
pub fn scale_intervals(name: &str) -> &'static [u8] {
    let key = name.trim().to_ascii_lowercase().replace([' ', '-'], "_");
    match key.as_str() {
        "major" | "ionian" => MAJOR,
        "minor" | "natural_minor" | "aeolian" => &[0, 2, 3, 5, 7, 8, 10],
        "harmonic_minor" => &[0, 2, 3, 5, 7, 8, 11],
        "melodic_minor" => &[0, 2, 3, 5, 7, 9, 11],
        "dorian" => &[0, 2, 3, 5, 7, 9, 10],
        "phrygian" => &[0, 1, 3, 5, 7, 8, 10],
        "lydian" => &[0, 2, 4, 6, 7, 9, 11],
        "mixolydian" => &[0, 2, 4, 5, 7, 9, 10],
        "locrian" => &[0, 1, 3, 5, 6, 8, 10],
        "pentatonic" | "major_pentatonic" => &[0, 2, 4, 7, 9],
        "minor_pentatonic" => &[0, 3, 5, 7, 10],
        "blues" => &[0, 3, 5, 6, 7, 10],
        "whole_tone" => &[0, 2, 4, 6, 8, 10],
        _ => {
            debug!("unknown scale '{}', falling back to major", name);
            MAJOR
        }
    }
}

/// MIDI note for a 1-based scale degree above `root`.
///
/// Degrees index the scale table modulo its length, so degree 6 of a
/// pentatonic scale is its first tone again.
///
/// # Example
/// ```
/// use notegrid::pitch::resolve_degree;
///
/// // Degree 5 of D dorian is A4
/// assert_eq!(resolve_degree(5, "dorian", 62), Some(69));
/// ```
pub fn resolve_degree(degree: u8, scale: &str, root: u8) -> Option<u8> {
    if degree == 0 {
        return None;
    }
    let intervals = scale_intervals(scale);
    let interval = intervals[(degree as usize - 1) % intervals.len()];
    u8::try_from(root as u16 + interval as u16)
        .ok()
        .filter(|&note| note <= 127)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_major_degrees() {
        let notes: Vec<u8> = (1..=7).filter_map(|d| resolve_degree(d, "major", 60)).collect();
        assert_eq!(notes, vec![60, 62, 64, 65, 67, 69, 71]);
    }

    #[test]
    fn test_name_normalization() {
        assert_eq!(scale_intervals("Harmonic Minor"), scale_intervals("harmonic_minor"));
        assert_eq!(scale_intervals("melodic-minor")[5], 9);
    }

    #[test]
    fn test_pentatonic_wraps() {
        assert_eq!(resolve_degree(6, "pentatonic", 60), Some(60));
        assert_eq!(resolve_degree(7, "minor pentatonic", 57), Some(60));
    }

    #[test]
    fn test_unknown_scale_is_major() {
        assert_eq!(scale_intervals("klingon"), MAJOR);
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(resolve_degree(0, "major", 60), None);
        assert_eq!(resolve_degree(7, "major", 120), None);
    }
}
