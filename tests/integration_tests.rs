// Integration tests for Duet Algo

use duet_algo::core::{
    apply_compatibility_filter, partition, score_matrix, MatchResult, Matcher, Partition,
    PartitionPolicy,
};
use duet_algo::models::{Gender, GenderPref, Profile, ScoreMatrix};

/// Whether `who` strictly prefers `candidate` over its current partner under
/// the filtered scores (ties broken by lower index, matching the engine)
fn prefers(
    filtered: &ScoreMatrix,
    who: usize,
    candidate: usize,
    current: Option<usize>,
) -> bool {
    match current {
        None => true,
        Some(cur) => {
            let a = filtered.get(who, candidate);
            let b = filtered.get(who, cur);
            a > b || (a == b && candidate < cur)
        }
    }
}

/// Gale-Shapley stability over the filtered graph: no proposer-receiver pair
/// exists where both would rather have each other than their assigned match
fn assert_stable(result: &MatchResult, filtered: &ScoreMatrix, part: &Partition) {
    for &p in &part.proposers {
        for &r in &part.receivers {
            if result.partner_of(p) == Some(r) {
                continue;
            }
            let blocking = prefers(filtered, p, r, result.partner_of(p))
                && prefers(filtered, r, p, result.partner_of(r));
            assert!(!blocking, "blocking pair ({}, {})", p, r);
        }
    }
}

fn assert_monogamous(result: &MatchResult) {
    for pairing in &result.pairings {
        if let Some(partner) = pairing.partner {
            assert_ne!(partner, pairing.participant, "self-pairing");
            assert_eq!(
                result.partner_of(partner),
                Some(pairing.participant),
                "match references are not symmetric"
            );
        }
    }
}

fn mixed_population(n: usize) -> (ScoreMatrix, Vec<Gender>, Vec<GenderPref>) {
    let genders: Vec<Gender> = (0..n)
        .map(|i| match i % 3 {
            0 => Gender::Male,
            1 => Gender::Female,
            _ => Gender::NonBinary,
        })
        .collect();
    let prefs: Vec<GenderPref> = (0..n)
        .map(|i| match i % 4 {
            0 => GenderPref::Women,
            1 => GenderPref::Men,
            _ => GenderPref::Bisexual,
        })
        .collect();

    let mut scores = ScoreMatrix::zeroed(n);
    for i in 0..n {
        for j in 0..n {
            if i != j {
                scores.set(i, j, ((i * 31 + j * 17) % 23) as f64);
            }
        }
    }
    (scores, genders, prefs)
}

#[test]
fn test_end_to_end_stability() {
    let (scores, genders, prefs) = mixed_population(20);
    let policy = PartitionPolicy::IndexOrder;

    let result = Matcher::new(policy).run(&scores, &genders, &prefs).unwrap();

    let part = partition(20, policy);
    let filtered = apply_compatibility_filter(&scores, &genders, &prefs, &part);
    assert_stable(&result, &filtered, &part);
    assert_monogamous(&result);
}

#[test]
fn test_end_to_end_stability_with_shuffled_pools() {
    let (scores, genders, prefs) = mixed_population(21);
    let policy = PartitionPolicy::Shuffle { seed: 1234 };

    let result = Matcher::new(policy).run(&scores, &genders, &prefs).unwrap();

    // The partitioner is a pure function of (n, policy), so the split the
    // run used can be reproduced for the stability check
    let part = partition(21, policy);
    let filtered = apply_compatibility_filter(&scores, &genders, &prefs, &part);
    assert_stable(&result, &filtered, &part);
    assert_monogamous(&result);
}

#[test]
fn test_runs_are_deterministic() {
    let (scores, genders, prefs) = mixed_population(16);
    let matcher = Matcher::new(PartitionPolicy::Shuffle { seed: 5 });

    let first = matcher.run(&scores, &genders, &prefs).unwrap();
    let second = matcher.run(&scores, &genders, &prefs).unwrap();

    assert_eq!(first.pairings, second.pairings);
    assert_eq!(first.proposals, second.proposals);
}

#[test]
fn test_proposers_get_optimal_stable_partners() {
    // Cyclic rankings where every proposer's first choice also works out:
    // the proposer-optimal matching assigns each proposer its top pick
    let genders = vec![Gender::NonBinary; 6];
    let prefs = vec![GenderPref::Bisexual; 6];
    let scores = ScoreMatrix::from_rows(vec![
        vec![0.0, 0.0, 0.0, 9.0, 8.0, 7.0],
        vec![0.0, 0.0, 0.0, 7.0, 9.0, 8.0],
        vec![0.0, 0.0, 0.0, 8.0, 7.0, 9.0],
        vec![7.0, 9.0, 8.0, 0.0, 0.0, 0.0],
        vec![8.0, 7.0, 9.0, 0.0, 0.0, 0.0],
        vec![9.0, 8.0, 7.0, 0.0, 0.0, 0.0],
    ])
    .unwrap();
    let part = Partition {
        proposers: vec![0, 1, 2],
        receivers: vec![3, 4, 5],
    };

    let result = Matcher::with_default_policy()
        .run_with_partition(&scores, &genders, &prefs, &part)
        .unwrap();

    assert_eq!(result.partner_of(0), Some(3));
    assert_eq!(result.partner_of(1), Some(4));
    assert_eq!(result.partner_of(2), Some(5));

    let filtered = apply_compatibility_filter(&scores, &genders, &prefs, &part);
    assert_stable(&result, &filtered, &part);
}

#[test]
fn test_compatible_candidate_beats_higher_scoring_forbidden_one() {
    // Proposer 0's raw scores favor receiver 2, but that pair is forbidden;
    // the compatible receiver 3 must win whenever one exists
    let genders = vec![Gender::Male, Gender::Female, Gender::Male, Gender::Female];
    let prefs = vec![
        GenderPref::Women,
        GenderPref::Men,
        GenderPref::Men,
        GenderPref::Men,
    ];
    let scores = ScoreMatrix::from_rows(vec![
        vec![0.0, 0.0, 100.0, 1.0],
        vec![0.0, 0.0, 100.0, 100.0],
        vec![100.0, 100.0, 0.0, 0.0],
        vec![1.0, 100.0, 0.0, 0.0],
    ])
    .unwrap();

    let result = Matcher::with_default_policy()
        .run(&scores, &genders, &prefs)
        .unwrap();

    assert_eq!(result.partner_of(0), Some(3));
    // Proposer 1 has no compatible receiver left and pairs as a last resort
    assert_eq!(result.partner_of(1), Some(2));
    assert_monogamous(&result);
}

#[test]
fn test_odd_population_leaves_single_leftover() {
    let (scores, genders, prefs) = mixed_population(9);

    let result = Matcher::with_default_policy()
        .run(&scores, &genders, &prefs)
        .unwrap();

    let unmatched: Vec<usize> = result
        .pairings
        .iter()
        .filter(|p| p.partner.is_none())
        .map(|p| p.participant)
        .collect();
    assert_eq!(unmatched.len(), 1);
    // The leftover is always on the receiver side
    let part = partition(9, PartitionPolicy::IndexOrder);
    assert!(part.receivers.contains(&unmatched[0]));
    assert_monogamous(&result);
}

#[test]
fn test_proposal_count_within_quadratic_bound() {
    for n in [4, 10, 16, 30] {
        let (scores, genders, prefs) = mixed_population(n);
        let result = Matcher::with_default_policy()
            .run(&scores, &genders, &prefs)
            .unwrap();
        assert!(
            result.proposals <= n * n / 4,
            "n={}: {} proposals",
            n,
            result.proposals
        );
    }
}

#[test]
fn test_roster_to_pairings_pipeline() {
    let roster: Vec<Profile> = (0..6)
        .map(|i| Profile {
            name: format!("User {}", i),
            gender: if i % 2 == 0 {
                Gender::Male
            } else {
                Gender::Female
            },
            preferences: if i % 2 == 0 {
                vec![Gender::Female]
            } else {
                vec![Gender::Male]
            },
            grad_year: 2024 + (i as i32 % 2),
            responses: vec![(i as u32) % 3, 1, 2],
        })
        .collect();

    let scores = score_matrix(&roster);
    let genders: Vec<Gender> = roster.iter().map(|p| p.gender).collect();
    let prefs: Vec<GenderPref> = roster
        .iter()
        .map(|p| GenderPref::from_attraction(&p.preferences))
        .collect();

    let result = Matcher::with_default_policy()
        .run(&scores, &genders, &prefs)
        .unwrap();

    assert_eq!(result.total_participants, 6);
    assert_monogamous(&result);

    // Every couple that formed is straight and mutually attracted here
    for (a, b) in result.couples() {
        assert_ne!(genders[a], genders[b]);
    }
}
