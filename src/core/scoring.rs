use crate::models::{Profile, ScoreMatrix};

/// Calculate a raw compatibility score for a pair of questionnaire profiles
///
/// Scoring formula:
/// score = gate * (
///     year_score * 0.5 +        # smaller grad-year gap = higher
///     response_score * 0.5      # more identical answers = higher
/// )
/// where gate is 1 only when each side is attracted to the other's gender,
/// floored at 0 so a wide year gap cannot push the result negative.
pub fn compatibility_score(a: &Profile, b: &Profile) -> f64 {
    // Mutual-attraction gate (0 or 1)
    let gate = if a.attracted_to(b.gender) && b.attracted_to(a.gender) {
        1.0
    } else {
        0.0
    };

    let year_score = calculate_year_score(a.grad_year, b.grad_year);
    let response_score = calculate_response_score(&a.responses, &b.responses);

    (gate * (0.5 * year_score + 0.5 * response_score)).max(0.0)
}

/// Grad-year proximity score (1 for the same year, -0.5 per year apart
/// before the caller's floor kicks in)
#[inline]
fn calculate_year_score(a: i32, b: i32) -> f64 {
    let gap = (a - b).abs() as f64;
    1.0 - 0.5 * gap
}

/// Fraction of questionnaire answers the two profiles share (0-1).
/// Compared position by position over the shorter questionnaire; empty
/// questionnaires contribute nothing.
#[inline]
fn calculate_response_score(a: &[u32], b: &[u32]) -> f64 {
    let len = a.len().min(b.len());
    if len == 0 {
        return 0.0;
    }

    let same = a.iter().zip(b.iter()).filter(|(x, y)| x == y).count();
    same as f64 / len as f64
}

/// Score every pair in a roster into a symmetric matrix with a zero
/// diagonal, ready for the matching engine.
pub fn score_matrix(profiles: &[Profile]) -> ScoreMatrix {
    let n = profiles.len();
    let mut scores = ScoreMatrix::zeroed(n);

    for i in 0..n {
        for j in (i + 1)..n {
            let score = compatibility_score(&profiles[i], &profiles[j]);
            scores.set(i, j, score);
            scores.set(j, i, score);
        }
    }

    scores
}
