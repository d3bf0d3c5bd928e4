//! Derived indexes over the release collection.
//!
//! Recomputed in full on every change. Fine at catalog scale, and it keeps
//! the collection the single source of truth.

use super::merge::ReleaseSet;
use super::Release;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Inclusive [min, max] known release year across the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearSpan {
    pub min: i32,
    pub max: i32,
}

/// Aggregate counts over the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total_releases: usize,
    pub total_artists: usize,
    /// Absent when no release has a known year.
    pub year_span: Option<YearSpan>,
}

/// Secondary indexes recomputed from the release collection.
#[derive(Debug, Clone, Default)]
pub struct DerivedIndexes {
    /// Releases sorted by year descending, unknown years last, collection
    /// order as tiebreak.
    pub releases_by_year: Vec<Release>,
    /// Unique artist names, code-point ascending.
    pub artists: Vec<String>,
    /// Unique non-empty labels, code-point ascending.
    pub labels: Vec<String>,
    pub year_span: Option<YearSpan>,
}

impl DerivedIndexes {
    pub fn build(set: &ReleaseSet) -> Self {
        let mut releases_by_year: Vec<Release> = set.iter().cloned().collect();
        // sort_by is stable, so equal keys keep collection order
        releases_by_year.sort_by(|a, b| match (a.year, b.year) {
            (Some(year_a), Some(year_b)) => year_b.cmp(&year_a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        let artists: BTreeSet<&str> = set.iter().map(|release| release.artist.as_str()).collect();
        let labels: BTreeSet<&str> = set
            .iter()
            .map(|release| release.label.as_str())
            .filter(|label| !label.is_empty())
            .collect();

        let mut years = set.iter().filter_map(|release| release.year);
        let year_span = match years.next() {
            Some(first) => Some(years.fold(
                YearSpan { min: first, max: first },
                |span, year| YearSpan {
                    min: span.min.min(year),
                    max: span.max.max(year),
                },
            )),
            None => None,
        };

        DerivedIndexes {
            releases_by_year,
            artists: artists.into_iter().map(str::to_owned).collect(),
            labels: labels.into_iter().map(str::to_owned).collect(),
            year_span,
        }
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            total_releases: self.releases_by_year.len(),
            total_artists: self.artists.len(),
            year_span: self.year_span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ReleaseId;

    fn release(artist: &str, title: &str, year: Option<i32>, label: &str) -> Release {
        Release {
            id: ReleaseId::new(artist, title, year),
            artist: artist.to_owned(),
            title: title.to_owned(),
            year,
            label: label.to_owned(),
            cover_url: String::new(),
            tracks: String::new(),
            track_count: 0,
        }
    }

    fn sample_set() -> ReleaseSet {
        let mut set = ReleaseSet::new();
        set.apply(vec![
            release("Tabou Combo", "8e Sacrement", Some(1975), "Ibo"),
            release("Zin", "O Pa", Some(1988), "Zin Productions"),
            release("Septentrional", "Vieux Temps", None, ""),
            release("Scorpio", "Moin Fache", Some(2001), "Superstar"),
            release("Tabou Combo", "New York City", Some(1975), "Mini Records"),
        ]);
        set
    }

    #[test]
    fn sorts_by_year_descending_with_unknown_last() {
        let indexes = DerivedIndexes::build(&sample_set());
        let titles: Vec<&str> = indexes
            .releases_by_year
            .iter()
            .map(|release| release.title.as_str())
            .collect();
        assert_eq!(
            titles,
            ["Moin Fache", "O Pa", "8e Sacrement", "New York City", "Vieux Temps"]
        );
    }

    #[test]
    fn artist_list_is_unique_and_sorted() {
        let indexes = DerivedIndexes::build(&sample_set());
        assert_eq!(
            indexes.artists,
            ["Scorpio", "Septentrional", "Tabou Combo", "Zin"]
        );
    }

    #[test]
    fn label_list_drops_empty_labels() {
        let indexes = DerivedIndexes::build(&sample_set());
        assert_eq!(
            indexes.labels,
            ["Ibo", "Mini Records", "Superstar", "Zin Productions"]
        );
    }

    #[test]
    fn year_span_ignores_unknown_years() {
        let indexes = DerivedIndexes::build(&sample_set());
        assert_eq!(indexes.year_span, Some(YearSpan { min: 1975, max: 2001 }));
    }

    #[test]
    fn year_span_absent_when_no_year_is_known() {
        let mut set = ReleaseSet::new();
        set.apply(vec![
            release("Septentrional", "Vieux Temps", None, ""),
            release("Zin", "O Pa", None, ""),
        ]);
        let indexes = DerivedIndexes::build(&set);
        assert_eq!(indexes.year_span, None);
    }

    #[test]
    fn stats_counts_releases_and_artists() {
        let stats = DerivedIndexes::build(&sample_set()).stats();
        assert_eq!(stats.total_releases, 5);
        assert_eq!(stats.total_artists, 4);
        assert_eq!(stats.year_span, Some(YearSpan { min: 1975, max: 2001 }));
    }

    #[test]
    fn empty_collection_yields_empty_indexes() {
        let indexes = DerivedIndexes::build(&ReleaseSet::new());
        assert!(indexes.releases_by_year.is_empty());
        assert!(indexes.artists.is_empty());
        assert!(indexes.labels.is_empty());
        assert_eq!(indexes.year_span, None);
    }
}
