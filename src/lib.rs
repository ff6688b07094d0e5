//! Duet Algo - stable-matching engine for the Duet matchmaking service
//!
//! This library assigns monogamous partners to a whole population at once.
//! It implements a constrained, multi-orientation variant of Gale-Shapley
//! deferred acceptance: the population is split into proposer and receiver
//! pools, gender-incompatible pairs are pushed to the bottom of every
//! preference list, and free proposers propose down their ranked lists until
//! the assignment is stable.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{MatchError, MatchResult, Matcher, Partition, PartitionPolicy, FORBIDDEN_SCORE};
pub use crate::models::{Gender, GenderPref, Pairing, Profile, ScoreMatrix};
