use crate::core::partition::Partition;
use crate::models::ScoreMatrix;
use std::cmp::Ordering;

/// A participant's ranked candidates over the opposite pool.
///
/// Entries are fixed at build time and consumed front-to-back through a
/// cursor, so popping the head is O(1) and a popped candidate can never be
/// offered again, even if the owner is freed later in the run.
#[derive(Debug, Clone)]
pub struct PreferenceList {
    entries: Vec<(usize, f64)>,
    cursor: usize,
}

impl PreferenceList {
    /// Rank candidates by score descending, ties broken by candidate index
    /// ascending.
    pub fn new(mut entries: Vec<(usize, f64)>) -> Self {
        entries.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        Self { entries, cursor: 0 }
    }

    /// Next-best candidate not yet offered, advancing the cursor
    pub fn pop(&mut self) -> Option<(usize, f64)> {
        let entry = self.entries.get(self.cursor).copied();
        if entry.is_some() {
            self.cursor += 1;
        }
        entry
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.entries.len()
    }

    pub fn remaining(&self) -> usize {
        self.entries.len() - self.cursor
    }

    /// Full ranked order, ignoring the cursor
    pub fn ranked(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|&(id, _)| id)
    }

    /// Rank lookup table sized for a population of n: `table[id]` is the
    /// candidate's position in this list, `usize::MAX` for non-candidates.
    /// Lower is better.
    pub fn rank_table(&self, n: usize) -> Vec<usize> {
        let mut table = vec![usize::MAX; n];
        for (rank, &(id, _)) in self.entries.iter().enumerate() {
            table[id] = rank;
        }
        table
    }
}

/// Stage 3 of the pipeline: one ranked preference list per participant,
/// proposers over receivers and vice versa. Must run on the filtered matrix
/// so forbidden pairs are already carrying their sentinel.
pub fn build_preference_lists(
    filtered: &ScoreMatrix,
    partition: &Partition,
) -> Vec<PreferenceList> {
    let n = filtered.n();
    let mut lists: Vec<PreferenceList> = vec![PreferenceList::new(Vec::new()); n];

    for &p in &partition.proposers {
        let candidates = partition
            .receivers
            .iter()
            .map(|&r| (r, filtered.get(p, r)))
            .collect();
        lists[p] = PreferenceList::new(candidates);
    }

    for &r in &partition.receivers {
        let candidates = partition
            .proposers
            .iter()
            .map(|&p| (p, filtered.get(r, p)))
            .collect();
        lists[r] = PreferenceList::new(candidates);
    }

    lists
}
