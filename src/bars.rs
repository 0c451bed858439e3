//! Bar splitting shared by the rhythm and melody codecs.
//!
//! Notation text is a sequence of bars separated by `|`. Leading, trailing and
//! repeated separators carry no meaning, so `"x|x|"`, `"|x|x"` and `"x||x"` all
//! describe the same two bars.

/// Split `|`-delimited text into trimmed, non-empty bars.
///
/// # Examples
/// ```
/// use notegrid::bars::split_into_bars;
///
/// assert_eq!(split_into_bars(" x.x. | x... |"), vec!["x.x.", "x..."]);
/// assert!(split_into_bars("").is_empty());
/// ```
pub fn split_into_bars(text: &str) -> Vec<&str> {
    text.split('|')
        .map(str::trim)
        .filter(|bar| !bar.is_empty())
        .collect()
}

/// Rejoin the bars of `text` with single `|` separators. Idempotent.
pub fn normalize_bars(text: &str) -> String {
    split_into_bars(text).join("|")
}
