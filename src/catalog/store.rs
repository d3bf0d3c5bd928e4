//! The catalog orchestrator.
//!
//! Owns the release collection and its derived indexes, and runs the
//! parse -> normalize -> merge -> re-derive pipeline for the baseline
//! dataset at startup and for every appended batch. Single writer,
//! synchronous; `&mut self` on [`Catalog::append`] enforces exclusive
//! mutation at compile time.

use super::index::{CatalogStats, DerivedIndexes};
use super::merge::ReleaseSet;
use super::normalize::{normalize_batch, BatchSummary};
use super::{Release, ReleaseId};
use crate::persistence::{AppendStore, APPENDED_RELEASES_KEY};
use crate::tabular::{self, ParseError, FIELD_DELIMITER};
use anyhow::Result;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Built-in baseline dataset shipped with the application.
pub const BASELINE_TSV: &str = include_str!("../../assets/baseline.tsv");

/// Errors an append batch can fail with. Any of these leaves the catalog
/// untouched.
#[derive(Debug, Error)]
pub enum AppendError {
    #[error("invalid tabular data: {0}")]
    Parse(#[from] ParseError),
}

/// Result of a successful [`Catalog::append`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendOutcome {
    /// Input was empty or whitespace-only; nothing happened.
    Noop,
    /// Input parsed but no row survived validation; nothing happened and
    /// nothing was persisted.
    NothingAccepted { summary: BatchSummary },
    /// The batch was merged into the catalog.
    Merged {
        summary: BatchSummary,
        /// False when the in-memory merge succeeded but the storage write
        /// failed; the appended data will not survive a reload.
        persisted: bool,
    },
}

/// The stateful catalog: release collection, derived indexes and the
/// injected append store.
pub struct Catalog {
    releases: ReleaseSet,
    indexes: DerivedIndexes,
    append_store: Arc<dyn AppendStore>,
}

impl Catalog {
    /// Build a catalog from the embedded baseline dataset plus whatever the
    /// append store holds.
    pub fn initialize_builtin(append_store: Arc<dyn AppendStore>) -> Result<Catalog> {
        Self::initialize(BASELINE_TSV, append_store)
    }

    /// Build a catalog from `baseline_text` merged with previously appended
    /// data read from `append_store`. Persisted entries win over baseline
    /// entries on identity collisions.
    ///
    /// A malformed baseline is fatal. Malformed or unreadable persisted data
    /// is logged and dropped, so a bad local store can never block startup.
    pub fn initialize(baseline_text: &str, append_store: Arc<dyn AppendStore>) -> Result<Catalog> {
        let baseline_records = tabular::parse(baseline_text, FIELD_DELIMITER)?;
        let (baseline, summary) = normalize_batch(&baseline_records);
        info!(
            "Loaded baseline dataset: {} releases ({} rows skipped)",
            summary.accepted, summary.skipped
        );

        let persisted = match append_store.read(APPENDED_RELEASES_KEY) {
            Ok(Some(text)) => match tabular::parse(&text, FIELD_DELIMITER) {
                Ok(records) => {
                    let (releases, summary) = normalize_batch(&records);
                    info!("Loaded {} previously appended releases", summary.accepted);
                    releases
                }
                Err(err) => {
                    warn!("Dropping malformed persisted append data: {err}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!("Failed to read persisted append data, starting baseline-only: {err:#}");
                Vec::new()
            }
        };

        let releases = ReleaseSet::from_batches([baseline, persisted]);
        let indexes = DerivedIndexes::build(&releases);
        Ok(Catalog {
            releases,
            indexes,
            append_store,
        })
    }

    /// Merge a new batch of tabular text into the catalog.
    ///
    /// Either the whole batch is applied (merged, re-indexed, persisted) or
    /// nothing changes. New entries win over colliding existing identities.
    /// A storage write failure does not roll back the in-memory merge; it is
    /// reported through [`AppendOutcome::Merged::persisted`] instead.
    pub fn append(&mut self, raw_text: &str) -> Result<AppendOutcome, AppendError> {
        if raw_text.trim().is_empty() {
            return Ok(AppendOutcome::Noop);
        }

        let records = tabular::parse(raw_text, FIELD_DELIMITER)?;
        let (batch, summary) = normalize_batch(&records);
        if batch.is_empty() {
            info!("Append batch had no valid rows ({} skipped)", summary.skipped);
            return Ok(AppendOutcome::NothingAccepted { summary });
        }

        // compute the next state first, persist second
        self.releases.apply(batch);
        self.indexes = DerivedIndexes::build(&self.releases);
        let persisted = self.persist_append(raw_text);

        info!(
            "Appended {} releases ({} skipped, {} in-batch duplicates, persisted: {persisted})",
            summary.accepted, summary.skipped, summary.duplicates
        );
        Ok(AppendOutcome::Merged { summary, persisted })
    }

    fn persist_append(&self, raw_text: &str) -> bool {
        // writing without the prior accumulation would clobber it, so a
        // failed read skips persistence for this batch entirely
        let prior = match self.append_store.read(APPENDED_RELEASES_KEY) {
            Ok(prior) => prior,
            Err(err) => {
                warn!("Failed to read prior appended data, skipping persistence for this batch: {err:#}");
                return false;
            }
        };
        let accumulated = match prior {
            Some(prior) if !prior.is_empty() => format!("{prior}\n{raw_text}"),
            _ => raw_text.to_owned(),
        };
        match self.append_store.write(APPENDED_RELEASES_KEY, &accumulated) {
            Ok(()) => true,
            Err(err) => {
                warn!("Failed to persist appended data, it will not survive a reload: {err:#}");
                false
            }
        }
    }

    /// Releases sorted by year descending, unknown years last.
    pub fn releases(&self) -> &[Release] {
        &self.indexes.releases_by_year
    }

    pub fn release(&self, id: &ReleaseId) -> Option<&Release> {
        self.releases.get(id)
    }

    /// Unique artist names, sorted.
    pub fn artists(&self) -> &[String] {
        &self.indexes.artists
    }

    /// Unique non-empty labels, sorted.
    pub fn labels(&self) -> &[String] {
        &self.indexes.labels
    }

    pub fn stats(&self) -> CatalogStats {
        self.indexes.stats()
    }

    pub fn len(&self) -> usize {
        self.releases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }
}
