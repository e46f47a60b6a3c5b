/// Data model for MetaSleuth.
///
/// Re-exports the normalised record type and the per-directory index
/// that the aggregator builds from it.
pub mod directory;
pub mod record;

pub use directory::{DirectoryGroup, DirectoryIndex};
pub use record::{split_path, Exclusion, MetadataRecord};
