//! Row-level validation and coercion of parsed records into releases.
//!
//! Normalization is tolerant where the parser is strict: an invalid row is
//! silently dropped and the batch continues. Expected data hygiene, never an
//! error.

use super::{Release, ReleaseId};
use crate::tabular::RawRecord;
use std::collections::HashSet;
use tracing::debug;

/// Outcome counters for one normalized batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub accepted: usize,
    /// Rows dropped by validation (missing artist/title, bad year).
    pub skipped: usize,
    /// Rows dropped because an earlier row in the same batch had the same
    /// identity.
    pub duplicates: usize,
}

/// Validate and coerce one raw record. `None` means skip, never an error.
///
/// Recognized headers, case-sensitive: `Artist`, `Album`, `Year`, `Label`,
/// `Cover_URL`, `Tracks`. A row is skipped when artist or album is empty
/// after trimming, or when a non-empty year cell fails base-10 integer
/// parsing. An empty year cell means the year is unknown, not invalid.
/// Year parsing is strict: the whole cell must be an integer, so values
/// like `"1975 LP"` are rejected rather than truncated to a leading
/// numeric prefix.
pub fn normalize_record(record: &RawRecord) -> Option<Release> {
    let artist = record.field("Artist").trim();
    let title = record.field("Album").trim();
    if artist.is_empty() || title.is_empty() {
        return None;
    }

    let year_raw = record.field("Year").trim();
    let year = if year_raw.is_empty() {
        None
    } else {
        match year_raw.parse::<i32>() {
            Ok(year) => Some(year),
            Err(_) => return None,
        }
    };

    let tracks = record.field("Tracks").trim().to_owned();
    // every comma-delimited segment counts, even whitespace-only ones
    let track_count = if tracks.is_empty() {
        0
    } else {
        tracks.split(',').count()
    };

    Some(Release {
        id: ReleaseId::new(artist, title, year),
        artist: artist.to_owned(),
        title: title.to_owned(),
        year,
        label: record.field("Label").trim().to_owned(),
        cover_url: record.field("Cover_URL").trim().to_owned(),
        tracks,
        track_count,
    })
}

/// Normalize a parsed batch, dropping invalid rows and within-batch
/// duplicates. The first occurrence of an identity wins within a batch.
pub fn normalize_batch(records: &[RawRecord]) -> (Vec<Release>, BatchSummary) {
    let mut releases: Vec<Release> = Vec::new();
    let mut seen: HashSet<ReleaseId> = HashSet::new();
    let mut summary = BatchSummary::default();

    for record in records {
        match normalize_record(record) {
            Some(release) => {
                if seen.insert(release.id.clone()) {
                    summary.accepted += 1;
                    releases.push(release);
                } else {
                    debug!("dropping duplicate row at line {}", record.line);
                    summary.duplicates += 1;
                }
            }
            None => {
                debug!("skipping invalid row at line {}", record.line);
                summary.skipped += 1;
            }
        }
    }

    (releases, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tabular::{parse, FIELD_DELIMITER};

    const HEADER: &str = "Artist\tAlbum\tYear\tLabel\tCover_URL\tTracks";

    fn records(rows: &[&str]) -> Vec<RawRecord> {
        let text = format!("{HEADER}\n{}", rows.join("\n"));
        parse(&text, FIELD_DELIMITER).unwrap()
    }

    #[test]
    fn normalizes_a_full_row() {
        let records = records(&["Tabou Combo\t8e Sacrement\t1975\tIbo\t\tIntro,Mabouya"]);
        let release = normalize_record(&records[0]).unwrap();
        assert_eq!(release.artist, "Tabou Combo");
        assert_eq!(release.title, "8e Sacrement");
        assert_eq!(release.year, Some(1975));
        assert_eq!(release.label, "Ibo");
        assert_eq!(release.cover_url, "");
        assert_eq!(release.track_count, 2);
        assert_eq!(
            release.id,
            ReleaseId::new("Tabou Combo", "8e Sacrement", Some(1975))
        );
    }

    #[test]
    fn trims_all_fields() {
        let records = records(&[" Zin \t O Pa \t 1988 \t Zin Productions \t \t A, B "]);
        let release = normalize_record(&records[0]).unwrap();
        assert_eq!(release.artist, "Zin");
        assert_eq!(release.title, "O Pa");
        assert_eq!(release.label, "Zin Productions");
        assert_eq!(release.tracks, "A, B");
    }

    #[test]
    fn skips_missing_artist_or_title() {
        let records = records(&[
            "\t8e Sacrement\t1975\tIbo\t\t",
            "Tabou Combo\t\t1975\tIbo\t\t",
            "  \t  \t\t\t\t",
        ]);
        for record in &records {
            assert!(normalize_record(record).is_none());
        }
    }

    #[test]
    fn non_numeric_year_skips_the_row() {
        let records = records(&[
            "Tabou Combo\t8e Sacrement\tabc\tIbo\t\t",
            "Tabou Combo\t8e Sacrement\t1975 LP\tIbo\t\t",
        ]);
        for record in &records {
            assert!(normalize_record(record).is_none());
        }
    }

    #[test]
    fn empty_year_means_unknown() {
        let records = records(&["Tabou Combo\t8e Sacrement\t\tIbo\t\t"]);
        let release = normalize_record(&records[0]).unwrap();
        assert_eq!(release.year, None);
        assert_eq!(release.id.year, None);
    }

    #[test]
    fn track_counts() {
        let cases = [
            ("A,B,C", 3),
            ("", 0),
            ("1. Intro, 2. Song", 2),
            ("A,,C", 3),
        ];
        for (tracks, expected) in cases {
            let row = format!("Zin\tO Pa\t1988\t\t\t{tracks}");
            let parsed = records(&[row.as_str()]);
            let release = normalize_record(&parsed[0]).unwrap();
            assert_eq!(release.track_count, expected, "tracks: {tracks:?}");
        }
    }

    #[test]
    fn batch_keeps_first_occurrence_of_an_identity() {
        let records = records(&[
            "Zin\tO Pa\t1988\tZin Productions\t\t",
            "Zin\tO Pa\t1988\tOther Label\t\t",
        ]);
        let (releases, summary) = normalize_batch(&records);
        assert_eq!(releases.len(), 1);
        assert_eq!(releases[0].label, "Zin Productions");
        assert_eq!(summary.accepted, 1);
        assert_eq!(summary.duplicates, 1);
        assert_eq!(summary.skipped, 0);
    }

    #[test]
    fn batch_counts_skipped_rows() {
        let records = records(&[
            "Zin\tO Pa\t1988\t\t\t",
            "\tNo Artist\t1990\t\t\t",
            "Scorpio\tMoin Fache\tnot-a-year\t\t\t",
        ]);
        let (releases, summary) = normalize_batch(&records);
        assert_eq!(releases.len(), 1);
        assert_eq!(summary.accepted, 1);
        assert_eq!(summary.skipped, 2);
    }
}
