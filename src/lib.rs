pub mod automation;
pub mod bars;
pub mod config;
pub mod error;
pub mod pitch;
pub mod rhythm;
pub mod sync;

pub use automation::{AutomationLane, AutomationPoint, AutomationTarget, CurveType, EntityKind};
pub use bars::{normalize_bars, split_into_bars};
pub use config::{split_frontmatter, NotationConfig};
pub use error::*;
pub use pitch::{MelodyGrid, MelodyNote};
pub use rhythm::{PatternGrid, PatternStep};
pub use sync::{apply_edits, SourceEdit, SyncOutcome, SyncedModel, TransportSnapshot};

/// Parse a rhythm document: optional `---` frontmatter followed by a pattern.
///
/// # Example
/// ```
/// let grid = notegrid::parse_rhythm_document("---\nsteps-per-bar: 4\n---\nx.x.x.x.").unwrap();
/// assert_eq!(grid.steps_per_bar, 4);
/// assert_eq!(notegrid::rhythm::generate_pattern(&grid), "xxxx");
/// ```
pub fn parse_rhythm_document(source: &str) -> Result<PatternGrid, NotationError> {
    let (config, body) = split_frontmatter(source)?;
    Ok(rhythm::parse_pattern(body, &config))
}

/// Parse a melody document: optional `---` frontmatter followed by melody bars.
///
/// Scale and root from the frontmatter are carried onto the grid so degree
/// tokens resolve.
pub fn parse_melody_document(source: &str) -> Result<MelodyGrid, NotationError> {
    let (config, body) = split_frontmatter(source)?;
    Ok(pitch::parse_melody(body, &config))
}
