//! Read-side helpers for catalog consumers.
//!
//! Everything here is a pure function over snapshots the catalog hands out;
//! nothing feeds back into catalog state.

use crate::catalog::Release;
use std::collections::BTreeMap;

/// Default page size used by the browsing surfaces.
pub const DEFAULT_PAGE_SIZE: usize = 24;

/// Criteria for narrowing a release listing. Empty criteria match
/// everything.
#[derive(Debug, Clone, Default)]
pub struct ReleaseFilter {
    /// Exact artist names; empty means any artist.
    pub artists: Vec<String>,
    /// Exact label match.
    pub label: Option<String>,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
}

impl ReleaseFilter {
    pub fn matches(&self, release: &Release) -> bool {
        let artist_ok = self.artists.is_empty()
            || self.artists.iter().any(|artist| *artist == release.artist);
        let label_ok = self
            .label
            .as_deref()
            .map_or(true, |label| release.label == label);
        // a release with no known year fails any set year bound
        let min_ok = self
            .min_year
            .map_or(true, |min| release.year.is_some_and(|year| year >= min));
        let max_ok = self
            .max_year
            .map_or(true, |max| release.year.is_some_and(|year| year <= max));
        artist_ok && label_ok && min_ok && max_ok
    }

    pub fn apply<'a>(&self, releases: &'a [Release]) -> Vec<&'a Release> {
        releases.iter().filter(|release| self.matches(release)).collect()
    }
}

/// Case-insensitive substring match over artist, title and label.
pub fn matches_query(release: &Release, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    release.artist.to_lowercase().contains(&needle)
        || release.title.to_lowercase().contains(&needle)
        || release.label.to_lowercase().contains(&needle)
}

/// Free-text search over a release listing.
pub fn search<'a>(releases: &'a [Release], query: &str) -> Vec<&'a Release> {
    releases
        .iter()
        .filter(|release| matches_query(release, query))
        .collect()
}

/// "Load more" style windowing: the first `visible` items.
pub fn paginate<T>(items: &[T], visible: usize) -> &[T] {
    &items[..visible.min(items.len())]
}

/// One page of a listing, 1-based page numbers.
pub fn page<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(per_page).min(items.len());
    let end = (start + per_page).min(items.len());
    &items[start..end]
}

/// Known-year releases grouped by year, most recent year first. Releases
/// with an unknown year are left out.
pub fn group_by_year(releases: &[Release]) -> Vec<(i32, Vec<&Release>)> {
    let mut by_year: BTreeMap<i32, Vec<&Release>> = BTreeMap::new();
    for release in releases {
        if let Some(year) = release.year {
            by_year.entry(year).or_default().push(release);
        }
    }
    by_year.into_iter().rev().collect()
}

/// Artists whose name starts with `letter`, case-insensitively.
pub fn artists_with_initial<'a>(artists: &'a [String], letter: char) -> Vec<&'a str> {
    artists
        .iter()
        .map(String::as_str)
        .filter(|artist| {
            artist
                .chars()
                .next()
                .is_some_and(|first| first.to_uppercase().eq(letter.to_uppercase()))
        })
        .collect()
}

/// Featured picks for the landing carousel: cover art present, released
/// between 1980 and 2000, at least 8 tracks; richest track lists first.
pub fn spotlight(releases: &[Release], limit: usize) -> Vec<&Release> {
    let mut picks: Vec<&Release> = releases
        .iter()
        .filter(|release| {
            !release.cover_url.is_empty()
                && release.year.is_some_and(|year| (1980..=2000).contains(&year))
                && release.track_count >= 8
        })
        .collect();
    picks.sort_by(|a, b| b.track_count.cmp(&a.track_count));
    picks.truncate(limit);
    picks
}

/// Track titles ready for display: split on commas, trimmed, optional
/// `"N. "` ordinal prefix removed. Counting stays on the raw comma
/// segments, this is display-only.
pub fn display_track_titles(release: &Release) -> Vec<String> {
    if release.tracks.is_empty() {
        return Vec::new();
    }
    release
        .tracks
        .split(',')
        .map(|segment| {
            let segment = segment.trim();
            match segment.split_once(". ") {
                Some((ordinal, rest))
                    if !ordinal.is_empty()
                        && ordinal.chars().all(|c| c.is_ascii_digit()) =>
                {
                    rest.trim().to_owned()
                }
                _ => segment.to_owned(),
            }
        })
        .collect()
}
