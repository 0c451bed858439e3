//! Note name ↔ MIDI conversion.
//!
//! Grammar: `[A-Ga-g][#b]*[-]?[0-9]*`. Letters are case-normalized, so a `B`
//! after the first character is always a flat marker and a leading `B` is the
//! note. Octave defaults to 4; `C4` is MIDI 60.

use crate::error::NotationError;

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Octave used when a note name carries none.
pub const DEFAULT_OCTAVE: i32 = 4;

/// Semitone offset of a natural note from C.
fn base_semitone(letter: char) -> Option<i32> {
    match letter {
        'C' => Some(0),
        'D' => Some(2),
        'E' => Some(4),
        'F' => Some(5),
        'G' => Some(7),
        'A' => Some(9),
        'B' => Some(11),
        _ => None,
    }
}

/// Resolve a note name such as `"C4"`, `"f#3"`, `"Bb"` or `"C-1"` to a MIDI note.
///
/// Returns `None` for malformed names and for notes outside 0..=127.
///
/// # Examples
/// ```
/// use notegrid::pitch::note_name_to_midi;
///
/// assert_eq!(note_name_to_midi("C4"), Some(60));
/// assert_eq!(note_name_to_midi("Bb3"), Some(58));
/// assert_eq!(note_name_to_midi("b"), Some(71));
/// assert_eq!(note_name_to_midi("C-1"), Some(0));
/// assert_eq!(note_name_to_midi("G9"), Some(127));
/// assert_eq!(note_name_to_midi("G#9"), None);
/// ```
pub fn note_name_to_midi(name: &str) -> Option<u8> {
    let upper = name.trim().to_ascii_uppercase();
    let mut chars = upper.chars().peekable();

    let mut semitone = base_semitone(chars.next()?)?;

    // Accidentals
    while let Some(&c) = chars.peek() {
        match c {
            '#' => semitone += 1,
            'B' => semitone -= 1,
            _ => break,
        }
        chars.next();
    }

    // Signed octave
    let negative = chars.peek() == Some(&'-');
    if negative {
        chars.next();
    }
    let mut digits = String::new();
    while let Some(c) = chars.next_if(|c| c.is_ascii_digit()) {
        digits.push(c);
    }
    if chars.next().is_some() {
        return None;
    }
    let octave = if digits.is_empty() {
        if negative {
            return None;
        }
        DEFAULT_OCTAVE
    } else {
        let value: i32 = digits.parse().ok()?;
        if negative {
            -value
        } else {
            value
        }
    };

    let midi = (octave + 1) * 12 + semitone;
    u8::try_from(midi).ok().filter(|&m| m <= 127)
}

/// Strict form of [`note_name_to_midi`] for callers that report errors.
pub fn parse_note_name(name: &str) -> Result<u8, NotationError> {
    note_name_to_midi(name).ok_or_else(|| NotationError::InvalidNote {
        token: name.to_string(),
    })
}

/// Spell a MIDI note with sharps, e.g. `61 → "C#4"`, `0 → "C-1"`.
pub fn midi_to_note_name(midi: u8) -> String {
    let octave = midi as i32 / 12 - 1;
    format!("{}{}", NOTE_NAMES[midi as usize % 12], octave)
}

/// Pitch class (0-11) of a note name with or without octave.
pub fn pitch_class(name: &str) -> Option<u8> {
    note_name_to_midi(name).map(|midi| midi % 12)
}
