//! # Error Types
//!
//! The notation codecs are total: malformed notation is reinterpreted, never rejected.
//! `NotationError` is only produced by the strict entry points, i.e. configuration
//! loading, strict note-name parsing and entity-kind parsing.
//!
//! ## Usage
//! ```rust
//! use notegrid::{NotationConfig, NotationError};
//!
//! match NotationConfig::from_yaml("steps-per-bar: 0") {
//!     Ok(config) => println!("{:?}", config),
//!     Err(NotationError::ConfigError(message)) => eprintln!("bad config: {}", message),
//!     Err(e) => eprintln!("error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NotationError {
    /// Invalid configuration or frontmatter.
    ///
    /// # Example
    /// ```
    /// # use notegrid::NotationError;
    /// let err = NotationError::ConfigError("beats-per-bar must be positive".to_string());
    /// assert_eq!(err.to_string(), "Invalid configuration: beats-per-bar must be positive");
    /// ```
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// A note name that does not resolve to a MIDI note in 0..=127.
    ///
    /// # Example
    /// ```
    /// # use notegrid::NotationError;
    /// let err = NotationError::InvalidNote { token: "H4".to_string() };
    /// assert_eq!(err.to_string(), "Invalid note name 'H4'");
    /// ```
    #[error("Invalid note name '{token}'")]
    InvalidNote { token: String },

    /// An automation entity kind other than group, voice or effect.
    #[error("Unknown entity kind '{0}' (expected group, voice or effect)")]
    UnknownEntityKind(String),
}
