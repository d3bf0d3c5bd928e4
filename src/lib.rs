//! Konpa discography catalog core.
//!
//! Turns flat tab-delimited imports into a deduplicated, indexed release
//! collection, merged with locally persisted append batches across sessions.
//! The [`catalog::Catalog`] orchestrator owns the pipeline; consumers read
//! snapshots and derive their own views through [`query`].

pub mod catalog;
pub mod config;
pub mod persistence;
pub mod query;
pub mod tabular;
