pub mod clock;
pub mod error;
pub mod fetcher;
pub mod store;

pub use clock::{Clock, SystemClock};
pub use error::CacheError;
pub use fetcher::{CacheDecision, MemoizingFetcher};
pub use store::{ArtifactStore, ArtifactTimestamps, FileArtifactStore};
