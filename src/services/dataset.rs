use crate::models::{
    Gender, GenderPref, MatrixError, ParseGenderError, ParseGenderPrefError, ScoreMatrix,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading the engine's input files
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: invalid score {value:?}", path.display())]
    InvalidScore {
        path: PathBuf,
        line: usize,
        value: String,
    },

    #[error("{}: {source}", path.display())]
    Shape {
        path: PathBuf,
        #[source]
        source: MatrixError,
    },

    #[error("{}:{line}: {source}", path.display())]
    UnknownGender {
        path: PathBuf,
        line: usize,
        #[source]
        source: ParseGenderError,
    },

    #[error("{}:{line}: {source}", path.display())]
    UnknownPreference {
        path: PathBuf,
        line: usize,
        #[source]
        source: ParseGenderPrefError,
    },
}

/// Load a raw score matrix: one row per line, whitespace-separated floats.
/// Blank lines are skipped; ragged rows are rejected.
pub fn load_score_matrix<P: AsRef<Path>>(path: P) -> Result<ScoreMatrix, DatasetError> {
    let path = path.as_ref();
    let text = read_file(path)?;

    let mut rows = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let mut row = Vec::new();
        for token in line.split_whitespace() {
            let value = token.parse::<f64>().map_err(|_| DatasetError::InvalidScore {
                path: path.to_path_buf(),
                line: idx + 1,
                value: token.to_string(),
            })?;
            row.push(value);
        }
        rows.push(row);
    }

    let matrix = ScoreMatrix::from_rows(rows).map_err(|source| DatasetError::Shape {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("loaded {}x{} score matrix from {}", matrix.n(), matrix.n(), path.display());
    Ok(matrix)
}

/// Load gender identities, one per line
pub fn load_gender_identities<P: AsRef<Path>>(path: P) -> Result<Vec<Gender>, DatasetError> {
    let path = path.as_ref();
    let text = read_file(path)?;

    let mut genders = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let gender = Gender::from_str(line).map_err(|source| DatasetError::UnknownGender {
            path: path.to_path_buf(),
            line: idx + 1,
            source,
        })?;
        genders.push(gender);
    }

    debug!("loaded {} gender identities from {}", genders.len(), path.display());
    Ok(genders)
}

/// Load gender preferences, one per line
pub fn load_gender_preferences<P: AsRef<Path>>(path: P) -> Result<Vec<GenderPref>, DatasetError> {
    let path = path.as_ref();
    let text = read_file(path)?;

    let mut prefs = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let pref = GenderPref::from_str(line).map_err(|source| DatasetError::UnknownPreference {
            path: path.to_path_buf(),
            line: idx + 1,
            source,
        })?;
        prefs.push(pref);
    }

    debug!("loaded {} gender preferences from {}", prefs.len(), path.display());
    Ok(prefs)
}

fn read_file(path: &Path) -> Result<String, DatasetError> {
    fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })
}
