use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator for the rendered identity form. The unit separator control
/// character cannot appear in tab-delimited cell text, so rendered
/// identities stay unambiguous even for artists or titles containing
/// hyphens.
const ID_SEPARATOR: char = '\u{1f}';

/// Natural composite key of a release: (artist, title, year).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReleaseId {
    pub artist: String,
    pub title: String,
    pub year: Option<i32>,
}

impl ReleaseId {
    pub fn new(artist: impl Into<String>, title: impl Into<String>, year: Option<i32>) -> Self {
        ReleaseId {
            artist: artist.into(),
            title: title.into(),
            year,
        }
    }
}

impl fmt::Display for ReleaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{ID_SEPARATOR}{}{ID_SEPARATOR}", self.artist, self.title)?;
        match self.year {
            Some(year) => write!(f, "{year}"),
            None => write!(f, "null"),
        }
    }
}

/// One canonical album entry in the catalog.
///
/// Immutable once constructed; "updating" a release means replacing the
/// entry at its identity with a value from a later batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub id: ReleaseId,
    pub artist: String,
    pub title: String,
    /// `None` when the source year cell was empty.
    pub year: Option<i32>,
    /// May be empty.
    pub label: String,
    /// May be empty.
    pub cover_url: String,
    /// Raw comma-separated track list as imported. Display consumers strip
    /// the optional `"N. "` ordinal prefixes, the core does not.
    pub tracks: String,
    pub track_count: usize,
}
