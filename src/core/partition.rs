use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// How the population is split into the two proposal pools.
///
/// The split is an algorithmic device, not a gender split. Whichever policy
/// is used, the proposer pool gets the first half of the (possibly shuffled)
/// index order and the receiver pool the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartitionPolicy {
    /// Participants 0..floor(n/2) propose, the rest receive
    IndexOrder,
    /// Seeded Fisher-Yates shuffle before splitting, reproducible per seed
    Shuffle { seed: u64 },
}

impl Default for PartitionPolicy {
    fn default() -> Self {
        PartitionPolicy::IndexOrder
    }
}

/// The two disjoint proposal pools for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub proposers: Vec<usize>,
    pub receivers: Vec<usize>,
}

impl Partition {
    pub fn total(&self) -> usize {
        self.proposers.len() + self.receivers.len()
    }
}

/// Split participants 0..n into proposer and receiver pools.
///
/// Pool sizes are floor(n/2) and n - floor(n/2); an odd population leaves
/// the receiver side one larger, so one receiver can finish the run
/// unmatched.
pub fn partition(n: usize, policy: PartitionPolicy) -> Partition {
    let mut ids: Vec<usize> = (0..n).collect();

    if let PartitionPolicy::Shuffle { seed } = policy {
        let mut rng = StdRng::seed_from_u64(seed);
        ids.shuffle(&mut rng);
    }

    let receivers = ids.split_off(n / 2);
    Partition {
        proposers: ids,
        receivers,
    }
}
