use crate::core::{
    filters::apply_compatibility_filter,
    partition::{partition, Partition, PartitionPolicy},
    ranking::build_preference_lists,
};
use crate::models::{Gender, GenderPref, Pairing, ScoreMatrix};
use std::collections::VecDeque;
use thiserror::Error;
use tracing::{debug, trace};

/// Errors that can abort a matching run before the loop starts
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("score matrix is {matrix}x{matrix} but {participants} gender identities were supplied")]
    MatrixSizeMismatch { participants: usize, matrix: usize },

    #[error("{participants} gender identities but {preferences} gender preferences")]
    PreferenceCountMismatch {
        participants: usize,
        preferences: usize,
    },

    #[error("at least 2 participants are required, got {0}")]
    NotEnoughParticipants(usize),

    #[error("partition does not cover every participant exactly once")]
    InvalidPartition,
}

/// Result of one full matching run
#[derive(Debug, Clone)]
pub struct MatchResult {
    /// One entry per participant; stable couples appear twice, once from
    /// each side
    pub pairings: Vec<Pairing>,
    /// Proposals made before the free list drained
    pub proposals: usize,
    pub total_participants: usize,
}

impl MatchResult {
    /// De-duplicated couples, lower index first
    pub fn couples(&self) -> Vec<(usize, usize)> {
        self.pairings
            .iter()
            .filter_map(|p| p.partner.map(|q| (p.participant, q)))
            .filter(|&(a, b)| a < b)
            .collect()
    }

    pub fn partner_of(&self, participant: usize) -> Option<usize> {
        self.pairings[participant].partner
    }

    pub fn matched_count(&self) -> usize {
        self.pairings.iter().filter(|p| p.partner.is_some()).count()
    }
}

/// Main matching orchestrator - runs the full deferred-acceptance pipeline
///
/// # Pipeline Stages
/// 1. Partition the population into proposer and receiver pools
/// 2. Overwrite gender-incompatible pairs with the forbidden sentinel
/// 3. Build each participant's ranked preference list
/// 4. Propose/accept/reject until no proposer is free
#[derive(Debug, Clone)]
pub struct Matcher {
    policy: PartitionPolicy,
}

impl Matcher {
    pub fn new(policy: PartitionPolicy) -> Self {
        Self { policy }
    }

    pub fn with_default_policy() -> Self {
        Self {
            policy: PartitionPolicy::default(),
        }
    }

    /// Run one matching over the whole population.
    ///
    /// All three inputs are indexed by the same participant ordering; shape
    /// mismatches fail fast before anything is partitioned.
    ///
    /// # Returns
    /// A [`MatchResult`] with one [`Pairing`] per participant. A participant
    /// that finished the run without a partner carries `None`.
    pub fn run(
        &self,
        scores: &ScoreMatrix,
        genders: &[Gender],
        prefs: &[GenderPref],
    ) -> Result<MatchResult, MatchError> {
        let n = validate_inputs(scores, genders, prefs)?;
        let part = partition(n, self.policy);
        Ok(self.deferred_acceptance(scores, genders, prefs, &part))
    }

    /// Run with an explicit proposer/receiver split instead of the
    /// configured policy. The split must cover 0..n exactly once.
    pub fn run_with_partition(
        &self,
        scores: &ScoreMatrix,
        genders: &[Gender],
        prefs: &[GenderPref],
        part: &Partition,
    ) -> Result<MatchResult, MatchError> {
        let n = validate_inputs(scores, genders, prefs)?;
        validate_partition(n, part)?;
        Ok(self.deferred_acceptance(scores, genders, prefs, part))
    }

    fn deferred_acceptance(
        &self,
        scores: &ScoreMatrix,
        genders: &[Gender],
        prefs: &[GenderPref],
        part: &Partition,
    ) -> MatchResult {
        let n = genders.len();

        // Stages 2 and 3
        let filtered = apply_compatibility_filter(scores, genders, prefs, part);
        let mut lists = build_preference_lists(&filtered, part);

        for &id in part.proposers.iter().chain(part.receivers.iter()) {
            debug!(
                "participant {} ({}, seeking {}) ranks {:?}",
                id,
                genders[id],
                prefs[id],
                lists[id].ranked().collect::<Vec<_>>()
            );
        }

        // Receiver-side rank lookups; lower rank means more preferred
        let mut rank_of: Vec<Vec<usize>> = vec![Vec::new(); n];
        for &r in &part.receivers {
            rank_of[r] = lists[r].rank_table(n);
        }

        // Stage 4: free proposers propose down their lists, FIFO
        let mut matched: Vec<Option<usize>> = vec![None; n];
        let mut free: VecDeque<usize> = part.proposers.iter().copied().collect();
        let mut proposals = 0usize;

        while let Some(p) = free.pop_front() {
            let (r, score) = match lists[p].pop() {
                Some(next) => next,
                None => {
                    // Every candidate rejected this proposer; terminal
                    trace!("proposer {} exhausted all candidates", p);
                    continue;
                }
            };
            proposals += 1;

            match matched[r] {
                None => {
                    trace!("receiver {} accepts {} (score {})", r, p, score);
                    matched[r] = Some(p);
                    matched[p] = Some(r);
                }
                Some(incumbent) => {
                    if rank_of[r][p] < rank_of[r][incumbent] {
                        trace!("receiver {} trades {} for {}", r, incumbent, p);
                        matched[incumbent] = None;
                        free.push_back(incumbent);
                        matched[r] = Some(p);
                        matched[p] = Some(r);
                    } else {
                        // Rejected; p re-queues and will offer its next
                        // candidate on a later turn
                        trace!("receiver {} keeps {} over {}", r, incumbent, p);
                        free.push_back(p);
                    }
                }
            }
        }

        debug!("matching settled after {} proposals", proposals);

        let pairings = matched
            .iter()
            .enumerate()
            .map(|(participant, &partner)| Pairing {
                participant,
                partner,
            })
            .collect();

        MatchResult {
            pairings,
            proposals,
            total_participants: n,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_policy()
    }
}

fn validate_inputs(
    scores: &ScoreMatrix,
    genders: &[Gender],
    prefs: &[GenderPref],
) -> Result<usize, MatchError> {
    let n = genders.len();
    if scores.n() != n {
        return Err(MatchError::MatrixSizeMismatch {
            participants: n,
            matrix: scores.n(),
        });
    }
    if prefs.len() != n {
        return Err(MatchError::PreferenceCountMismatch {
            participants: n,
            preferences: prefs.len(),
        });
    }
    if n < 2 {
        return Err(MatchError::NotEnoughParticipants(n));
    }
    Ok(n)
}

fn validate_partition(n: usize, part: &Partition) -> Result<(), MatchError> {
    if part.total() != n {
        return Err(MatchError::InvalidPartition);
    }
    let mut seen = vec![false; n];
    for &id in part.proposers.iter().chain(part.receivers.iter()) {
        if id >= n || seen[id] {
            return Err(MatchError::InvalidPartition);
        }
        seen[id] = true;
    }
    Ok(())
}
