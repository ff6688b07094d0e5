use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Gender identity of a participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    #[serde(rename = "Non-binary")]
    NonBinary,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
            Gender::NonBinary => write!(f, "Non-binary"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("unrecognized gender identity {0:?}")]
pub struct ParseGenderError(pub String);

impl FromStr for Gender {
    type Err = ParseGenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            "Non-binary" => Ok(Gender::NonBinary),
            other => Err(ParseGenderError(other.to_string())),
        }
    }
}

/// Who a participant is open to being matched with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenderPref {
    Men,
    Women,
    Bisexual,
}

impl GenderPref {
    /// Collapse an attracted-to set from a questionnaire profile into the
    /// ternary preference model the matching engine works with. An empty or
    /// non-binary-only set maps to `Bisexual` (the most permissive bucket).
    pub fn from_attraction(attracted_to: &[Gender]) -> Self {
        let men = attracted_to.contains(&Gender::Male);
        let women = attracted_to.contains(&Gender::Female);
        match (men, women) {
            (true, true) => GenderPref::Bisexual,
            (true, false) => GenderPref::Men,
            (false, true) => GenderPref::Women,
            (false, false) => GenderPref::Bisexual,
        }
    }
}

impl fmt::Display for GenderPref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenderPref::Men => write!(f, "Men"),
            GenderPref::Women => write!(f, "Women"),
            GenderPref::Bisexual => write!(f, "Bisexual"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("unrecognized gender preference {0:?}")]
pub struct ParseGenderPrefError(pub String);

impl FromStr for GenderPref {
    type Err = ParseGenderPrefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Men" => Ok(GenderPref::Men),
            "Women" => Ok(GenderPref::Women),
            "Bisexual" => Ok(GenderPref::Bisexual),
            other => Err(ParseGenderPrefError(other.to_string())),
        }
    }
}

/// Questionnaire profile consumed by the pairwise scorer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub gender: Gender,
    /// Gender identities this person is open to matching with
    pub preferences: Vec<Gender>,
    #[serde(rename = "gradYear")]
    pub grad_year: i32,
    #[serde(default)]
    pub responses: Vec<u32>,
}

impl Profile {
    pub fn attracted_to(&self, gender: Gender) -> bool {
        self.preferences.contains(&gender)
    }
}

/// Square matrix of raw compatibility scores, row-major.
///
/// Entry (i, j) is the raw compatibility of participant i proposing to
/// participant j. The input may be asymmetric; the engine never mutates a
/// matrix it was handed and derives filtered copies instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreMatrix {
    n: usize,
    values: Vec<f64>,
}

#[derive(Debug, Error)]
pub enum MatrixError {
    #[error("matrix has {rows} rows but row {row} has {len} entries")]
    RaggedRow { rows: usize, row: usize, len: usize },
}

impl ScoreMatrix {
    /// All-zero n x n matrix
    pub fn zeroed(n: usize) -> Self {
        Self {
            n,
            values: vec![0.0; n * n],
        }
    }

    /// Build from row vectors, rejecting ragged input
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, MatrixError> {
        let n = rows.len();
        let mut values = Vec::with_capacity(n * n);
        for (row, entries) in rows.into_iter().enumerate() {
            if entries.len() != n {
                return Err(MatrixError::RaggedRow {
                    rows: n,
                    row,
                    len: entries.len(),
                });
            }
            values.extend(entries);
        }
        Ok(Self { n, values })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// Score of i proposing to j. Panics if either index is out of range.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.n + j]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.values[i * self.n + j] = value;
    }
}

/// One participant's side of the final assignment.
///
/// `partner` is `None` when the participant finished the run unmatched; a
/// participant is never paired with itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub participant: usize,
    pub partner: Option<usize>,
}
