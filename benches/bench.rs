// Criterion benchmarks for Duet Algo

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use duet_algo::core::{
    apply_compatibility_filter, build_preference_lists, partition, score_matrix, Matcher,
    PartitionPolicy,
};
use duet_algo::models::{Gender, GenderPref, Profile, ScoreMatrix};

fn synthetic_population(n: usize) -> (ScoreMatrix, Vec<Gender>, Vec<GenderPref>) {
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
                scores.set(i, j, ((i * 31 + j * 17) % 97) as f64);
            }
        }
    }
    (scores, genders, prefs)
}

fn synthetic_roster(n: usize) -> Vec<Profile> {
    (0..n)
        .map(|i| Profile {
            name: format!("User {}", i),
            gender: if i % 2 == 0 {
                Gender::Male
            } else {
                Gender::Female
            },
            preferences: vec![Gender::Male, Gender::Female],
            grad_year: 2020 + (i as i32 % 6),
            responses: (0..10).map(|q| ((i + q) % 4) as u32).collect(),
        })
        .collect()
}

fn bench_compatibility_filter(c: &mut Criterion) {
    let (scores, genders, prefs) = synthetic_population(500);
    let part = partition(500, PartitionPolicy::IndexOrder);

    c.bench_function("compatibility_filter_500", |b| {
        b.iter(|| {
            apply_compatibility_filter(
                black_box(&scores),
                black_box(&genders),
                black_box(&prefs),
                black_box(&part),
            )
        });
    });
}

fn bench_preference_lists(c: &mut Criterion) {
    let (scores, genders, prefs) = synthetic_population(500);
    let part = partition(500, PartitionPolicy::IndexOrder);
    let filtered = apply_compatibility_filter(&scores, &genders, &prefs, &part);

    c.bench_function("preference_lists_500", |b| {
        b.iter(|| build_preference_lists(black_box(&filtered), black_box(&part)));
    });
}

fn bench_matching(c: &mut Criterion) {
    let matcher = Matcher::with_default_policy();

    let mut group = c.benchmark_group("matching");

    for population in [10, 50, 100, 500, 1000].iter() {
        let (scores, genders, prefs) = synthetic_population(*population);

        group.bench_with_input(
            BenchmarkId::new("run", population),
            population,
            |b, _| {
                b.iter(|| {
                    matcher.run(
                        black_box(&scores),
                        black_box(&genders),
                        black_box(&prefs),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_roster_scoring(c: &mut Criterion) {
    let roster = synthetic_roster(200);

    c.bench_function("score_matrix_200_profiles", |b| {
        b.iter(|| score_matrix(black_box(&roster)));
    });
}

criterion_group!(
    benches,
    bench_compatibility_filter,
    bench_preference_lists,
    bench_matching,
    bench_roster_scoring
);

criterion_main!(benches);
