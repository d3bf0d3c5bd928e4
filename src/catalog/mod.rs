mod index;
mod merge;
mod normalize;
mod release;
mod store;

pub use index::{CatalogStats, DerivedIndexes, YearSpan};
pub use merge::ReleaseSet;
pub use normalize::{normalize_batch, normalize_record, BatchSummary};
pub use release::{Release, ReleaseId};
pub use store::{AppendError, AppendOutcome, Catalog, BASELINE_TSV};
