//! Release feed processing
//!
//! - **model**: feed, registry and report records
//! - **properties**: `key=value` payload parsing
//! - **enrich**: per-release `release.properties` fetch and merge
//! - **classify**: product / version-family buckets

pub mod classify;
pub mod enrich;
pub mod model;
pub mod properties;

pub use classify::{Bucket, ClassifiedReleases, Product, ProductReleases, VERSION_FAMILIES};
pub use enrich::{EnrichOutcome, EnrichSummary, MetadataEnricher};
pub use model::{DockerTagEntry, DockerTagPage, QuarterlyRelease, Release, ReleaseMetadata};
pub use properties::Properties;
