//! Melody bar tokenizer.
//!
//! Scans one bar character by character. Tokens are normally separated by
//! whitespace, but ties and rests may also be written flush against a note
//! (`C4--.` is `C4 - - .`). Anything unrecognized is skipped up to the next
//! whitespace.

use log::debug;

use super::chord::resolve_chord;
use super::note_name::note_name_to_midi;

/// A resolved melody token.
#[derive(Debug, Clone, PartialEq)]
pub enum MelodyToken {
    /// `-`: extend the pending note by one slot
    Tie,
    /// `.` or `_`
    Rest,
    /// `1`-`7`, resolved later against the scale context
    Degree { degree: u8, quality: Option<String> },
    /// A note name, already resolved; several notes for a chord suffix
    Note { midi: Vec<u8> },
}

/// Lexer for a single bar of melody notation
pub struct Lexer<'a> {
    input: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn position(&mut self) -> usize {
        self.chars.peek().map(|&(i, _)| i).unwrap_or(self.input.len())
    }

    fn advance(&mut self) -> Option<char> {
        self.chars.next().map(|(_, c)| c)
    }

    /// Consume characters while `accept` holds and return the consumed slice.
    fn take_while(&mut self, accept: impl Fn(char) -> bool) -> &'a str {
        let start = self.position();
        while self.peek().is_some_and(&accept) {
            self.advance();
        }
        let end = self.position();
        &self.input[start..end]
    }

    fn skip_word(&mut self) -> &'a str {
        self.take_while(|c| !c.is_ascii_whitespace())
    }

    /// Optional `:quality` suffix.
    fn chord_suffix(&mut self) -> Option<String> {
        if self.peek() != Some(':') {
            return None;
        }
        self.advance();
        let quality = self.take_while(|c| c.is_ascii_alphanumeric());
        if quality.is_empty() {
            None
        } else {
            Some(quality.to_string())
        }
    }

    /// True if the token just read ends cleanly (whitespace, tie, rest or end).
    fn at_token_boundary(&mut self) -> bool {
        match self.peek() {
            None => true,
            Some(c) => c.is_ascii_whitespace() || matches!(c, '-' | '.' | '_'),
        }
    }

    fn note(&mut self) -> Option<MelodyToken> {
        let start = self.position();
        self.advance(); // letter
        self.take_while(|c| matches!(c, '#' | 'b' | 'B'));
        // A '-' is an octave sign only when digits follow; otherwise it is a tie.
        let mut lookahead = self.chars.clone();
        lookahead.next();
        if self.peek() == Some('-') && lookahead.peek().is_some_and(|&(_, c)| c.is_ascii_digit()) {
            self.advance();
        }
        self.take_while(|c| c.is_ascii_digit());
        let name = &self.input[start..self.position()];
        let quality = self.chord_suffix();

        if !self.at_token_boundary() {
            let rest = self.skip_word();
            debug!("skipping malformed note token '{}{}'", name, rest);
            return None;
        }

        let Some(root) = note_name_to_midi(name) else {
            debug!("skipping unresolvable note '{}'", name);
            return None;
        };
        let midi = match quality {
            Some(quality) => resolve_chord(root, &quality),
            None => vec![root],
        };
        Some(MelodyToken::Note { midi })
    }

    fn degree(&mut self, digit: char) -> Option<MelodyToken> {
        self.advance();
        let quality = self.chord_suffix();
        if !self.at_token_boundary() {
            let rest = self.skip_word();
            debug!("skipping malformed degree token '{}{}'", digit, rest);
            return None;
        }
        Some(MelodyToken::Degree {
            degree: digit as u8 - b'0',
            quality,
        })
    }

    /// Tokenize the whole bar, dropping unrecognized input.
    pub fn tokenize(&mut self) -> Vec<MelodyToken> {
        let mut tokens = Vec::new();

        while let Some(c) = self.peek() {
            let token = match c {
                c if c.is_ascii_whitespace() => {
                    self.advance();
                    continue;
                }
                '-' => {
                    self.advance();
                    Some(MelodyToken::Tie)
                }
                '.' | '_' => {
                    self.advance();
                    Some(MelodyToken::Rest)
                }
                '1'..='7' => self.degree(c),
                'A'..='G' | 'a'..='g' => self.note(),
                _ => {
                    let word = self.skip_word();
                    debug!("skipping unrecognized token '{}'", word);
                    None
                }
            };
            if let Some(token) = token {
                tokens.push(token);
            }
        }

        tokens
    }
}

/// Tokenize one bar of melody notation.
pub fn tokenize_bar(bar: &str) -> Vec<MelodyToken> {
    Lexer::new(bar).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(midi: &[u8]) -> MelodyToken {
        MelodyToken::Note { midi: midi.to_vec() }
    }

    #[test]
    fn test_basic_tokens() {
        assert_eq!(
            tokenize_bar("C4 - - ."),
            vec![note(&[60]), MelodyToken::Tie, MelodyToken::Tie, MelodyToken::Rest]
        );
        assert_eq!(tokenize_bar("_ e b3"), vec![MelodyToken::Rest, note(&[64]), note(&[59])]);
    }

    #[test]
    fn test_compact_ties_and_rests() {
        assert_eq!(
            tokenize_bar("C4--."),
            vec![note(&[60]), MelodyToken::Tie, MelodyToken::Tie, MelodyToken::Rest]
        );
    }

    #[test]
    fn test_negative_octave_versus_tie() {
        assert_eq!(tokenize_bar("C-1"), vec![note(&[0])]);
        assert_eq!(tokenize_bar("C-"), vec![note(&[60]), MelodyToken::Tie]);
    }

    #[test]
    fn test_chords() {
        assert_eq!(tokenize_bar("C4:maj7"), vec![note(&[60, 64, 67, 71])]);
        assert_eq!(tokenize_bar("A3:m"), vec![note(&[57, 60, 64])]);
        assert_eq!(tokenize_bar("C4:wat"), vec![note(&[60])]);
    }

    #[test]
    fn test_degrees() {
        assert_eq!(
            tokenize_bar("1 5:7 -"),
            vec![
                MelodyToken::Degree { degree: 1, quality: None },
                MelodyToken::Degree { degree: 5, quality: Some("7".to_string()) },
                MelodyToken::Tie,
            ]
        );
    }

    #[test]
    fn test_unrecognized_tokens_are_skipped() {
        assert_eq!(tokenize_bar("H4 C4 9 Cx4 8 G#9 E4"), vec![note(&[60]), note(&[64])]);
    }
}
