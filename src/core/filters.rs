use crate::core::partition::Partition;
use crate::models::{Gender, GenderPref, ScoreMatrix};

/// Sentinel written over the score of a pair that can never be mutually
/// acceptable. Legitimate scores are >= 0, so forbidden pairs sort strictly
/// last in every preference list. They are suppressed, not banned: a
/// forbidden pair can still form as a last resort once a proposer has
/// exhausted every compatible candidate.
pub const FORBIDDEN_SCORE: f64 = -1.0;

/// Whether a preference accepts a gender identity.
///
/// Non-binary participants are accepted by every preference; a bisexual
/// preference accepts everyone.
#[inline]
pub fn accepts(pref: GenderPref, gender: Gender) -> bool {
    match (pref, gender) {
        (_, Gender::NonBinary) => true,
        (GenderPref::Bisexual, _) => true,
        (GenderPref::Men, Gender::Male) => true,
        (GenderPref::Women, Gender::Female) => true,
        _ => false,
    }
}

/// Whether two participants could ever accept each other.
///
/// Checked in both directions: each side's preference against the other
/// side's gender identity. One failed direction makes the pair incompatible.
#[inline]
pub fn mutually_compatible(
    a_gender: Gender,
    a_pref: GenderPref,
    b_gender: Gender,
    b_pref: GenderPref,
) -> bool {
    accepts(a_pref, b_gender) && accepts(b_pref, a_gender)
}

/// Stage 2 of the pipeline: derive a filtered copy of the score matrix with
/// every incompatible proposer-receiver pair overwritten by
/// [`FORBIDDEN_SCORE`] on both sides.
///
/// The input matrix is never mutated. Pure in all inputs, so re-applying the
/// filter to its own output changes nothing.
pub fn apply_compatibility_filter(
    scores: &ScoreMatrix,
    genders: &[Gender],
    prefs: &[GenderPref],
    partition: &Partition,
) -> ScoreMatrix {
    let mut filtered = scores.clone();

    for &p in &partition.proposers {
        for &r in &partition.receivers {
            if !mutually_compatible(genders[p], prefs[p], genders[r], prefs[r]) {
                filtered.set(p, r, FORBIDDEN_SCORE);
                filtered.set(r, p, FORBIDDEN_SCORE);
            }
        }
    }

    filtered
}
