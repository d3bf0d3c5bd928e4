//! Identity-keyed release collection with last-writer-wins merging.

use super::{Release, ReleaseId};
use std::collections::HashMap;

/// The authoritative release collection: one release per identity, with
/// stable insertion order.
///
/// Applying a batch replaces colliding entries in place, so an identity
/// keeps the position it was first inserted at. The derived sort relies on
/// this for its stable tiebreak.
#[derive(Debug, Clone, Default)]
pub struct ReleaseSet {
    releases: Vec<Release>,
    positions: HashMap<ReleaseId, usize>,
}

impl ReleaseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from batches in precedence order: a later batch's release
    /// fully replaces an earlier one with the same identity.
    pub fn from_batches<I>(batches: I) -> Self
    where
        I: IntoIterator<Item = Vec<Release>>,
    {
        let mut set = Self::new();
        for batch in batches {
            set.apply(batch);
        }
        set
    }

    /// Merge one batch into the set. Colliding identities are fully
    /// replaced, there is no field-level merging.
    pub fn apply(&mut self, batch: Vec<Release>) {
        for release in batch {
            match self.positions.get(&release.id) {
                Some(&position) => self.releases[position] = release,
                None => {
                    self.positions.insert(release.id.clone(), self.releases.len());
                    self.releases.push(release);
                }
            }
        }
    }

    pub fn get(&self, id: &ReleaseId) -> Option<&Release> {
        self.positions.get(id).map(|&position| &self.releases[position])
    }

    pub fn contains(&self, id: &ReleaseId) -> bool {
        self.positions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.releases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    /// Releases in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Release> {
        self.releases.iter()
    }
}
