//! # Notation Configuration
//!
//! Parse settings shared by the rhythm and melody codecs, loaded from YAML.
//!
//! A notation document may start with a YAML frontmatter block:
//!
//! ```text
//! ---
//! steps-per-bar: 8
//! beats-per-bar: 4
//! scale: dorian
//! root: D
//! ---
//! 1 3 5 - | 4:m7 - . .
//! ```
//!
//! All keys are optional. `scale` and `root` are only needed when the melody uses
//! scale-degree tokens. Unknown scale names are accepted and resolved leniently by
//! the codec; structurally invalid values are reported as
//! [`NotationError::ConfigError`].

use serde::Deserialize;

use crate::error::NotationError;
use crate::pitch::note_name_to_midi;

/// Raw configuration for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case")]
pub struct RawConfig {
    pub steps_per_bar: Option<usize>,
    pub beats_per_bar: Option<f64>,
    pub scale: Option<String>,
    pub root: Option<String>,
}

/// Validated parse settings.
///
/// `steps_per_bar` is only consulted by the rhythm codec; when absent it is
/// inferred from the first bar.
#[derive(Debug, Clone, PartialEq)]
pub struct NotationConfig {
    pub steps_per_bar: Option<usize>,
    pub beats_per_bar: f64,
    pub scale: Option<String>,
    pub root: Option<String>,
}

impl Default for NotationConfig {
    fn default() -> Self {
        Self {
            steps_per_bar: None,
            beats_per_bar: 4.0,
            scale: None,
            root: None,
        }
    }
}

impl NotationConfig {
    /// Load and validate a configuration from YAML.
    ///
    /// # Example
    /// ```
    /// use notegrid::NotationConfig;
    ///
    /// let config = NotationConfig::from_yaml("steps-per-bar: 8\nroot: F#").unwrap();
    /// assert_eq!(config.steps_per_bar, Some(8));
    /// assert_eq!(config.beats_per_bar, 4.0);
    /// assert_eq!(config.root.as_deref(), Some("F#"));
    /// ```
    pub fn from_yaml(content: &str) -> Result<Self, NotationError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawConfig = serde_yaml::from_str(content)
            .map_err(|e| NotationError::ConfigError(e.to_string()))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, NotationError> {
        if let Some(steps) = raw.steps_per_bar {
            if steps == 0 {
                return Err(NotationError::ConfigError(
                    "steps-per-bar must be at least 1".to_string(),
                ));
            }
        }

        let beats_per_bar = raw.beats_per_bar.unwrap_or(4.0);
        if !beats_per_bar.is_finite() || beats_per_bar <= 0.0 {
            return Err(NotationError::ConfigError(format!(
                "beats-per-bar must be a positive number, got {}",
                beats_per_bar
            )));
        }

        if let Some(root) = &raw.root {
            if note_name_to_midi(root).is_none() {
                return Err(NotationError::ConfigError(format!(
                    "Invalid root note: {}",
                    root
                )));
            }
        }

        Ok(Self {
            steps_per_bar: raw.steps_per_bar,
            beats_per_bar,
            scale: raw.scale,
            root: raw.root,
        })
    }

    /// Both scale and root, if the melody codec can resolve degree tokens.
    pub fn scale_context(&self) -> Option<(&str, &str)> {
        match (&self.scale, &self.root) {
            (Some(scale), Some(root)) => Some((scale.as_str(), root.as_str())),
            _ => None,
        }
    }
}

/// Split an optional `---` YAML frontmatter block from a notation document.
///
/// Returns the parsed configuration (default when there is no frontmatter) and
/// the remaining notation body.
pub fn split_frontmatter(source: &str) -> Result<(NotationConfig, &str), NotationError> {
    let trimmed = source.trim_start();
    let Some(rest) = trimmed.strip_prefix("---") else {
        return Ok((NotationConfig::default(), source));
    };

    let Some(end) = rest.find("\n---") else {
        return Err(NotationError::ConfigError(
            "Frontmatter opened with '---' is never closed".to_string(),
        ));
    };

    let config = NotationConfig::from_yaml(&rest[..end])?;
    let body = &rest[end + "\n---".len()..];
    let body = body.strip_prefix("\r\n").or_else(|| body.strip_prefix('\n')).unwrap_or(body);
    Ok((config, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(NotationConfig::from_yaml("").unwrap(), NotationConfig::default());
        assert_eq!(NotationConfig::from_yaml("  \n").unwrap(), NotationConfig::default());
    }

    #[test]
    fn test_full_config() {
        let config = NotationConfig::from_yaml(
            "steps-per-bar: 12\nbeats-per-bar: 3\nscale: harmonic minor\nroot: Bb3\n",
        )
        .unwrap();
        assert_eq!(config.steps_per_bar, Some(12));
        assert_eq!(config.beats_per_bar, 3.0);
        assert_eq!(config.scale_context(), Some(("harmonic minor", "Bb3")));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            NotationConfig::from_yaml("steps-per-bar: 0"),
            Err(NotationError::ConfigError(_))
        ));
        assert!(matches!(
            NotationConfig::from_yaml("beats-per-bar: -2"),
            Err(NotationError::ConfigError(_))
        ));
        assert!(matches!(
            NotationConfig::from_yaml("root: H"),
            Err(NotationError::ConfigError(_))
        ));
        assert!(matches!(
            NotationConfig::from_yaml("steps-per-bar: [1, 2]"),
            Err(NotationError::ConfigError(_))
        ));
    }

    #[test]
    fn test_split_frontmatter() {
        let source = "---\nsteps-per-bar: 8\n---\nx..x..x.\n";
        let (config, body) = split_frontmatter(source).unwrap();
        assert_eq!(config.steps_per_bar, Some(8));
        assert_eq!(body, "x..x..x.\n");
    }

    #[test]
    fn test_no_frontmatter_passes_source_through() {
        let (config, body) = split_frontmatter("C4 D4 E4 F4").unwrap();
        assert_eq!(config, NotationConfig::default());
        assert_eq!(body, "C4 D4 E4 F4");
    }

    #[test]
    fn test_unterminated_frontmatter() {
        assert!(split_frontmatter("---\nroot: C\nC4 D4").is_err());
    }
}
