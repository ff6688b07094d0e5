// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod partition;
pub mod ranking;
pub mod scoring;

pub use filters::{accepts, apply_compatibility_filter, mutually_compatible, FORBIDDEN_SCORE};
pub use matcher::{MatchError, MatchResult, Matcher};
pub use partition::{partition, Partition, PartitionPolicy};
pub use ranking::{build_preference_lists, PreferenceList};
pub use scoring::{compatibility_score, score_matrix};
