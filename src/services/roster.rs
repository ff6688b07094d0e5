use crate::models::Profile;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading a questionnaire roster
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk roster document
#[derive(Debug, Deserialize)]
struct RosterFile {
    users: Vec<Profile>,
}

/// Load a JSON roster of questionnaire profiles (`{"users": [...]}`)
pub fn load_roster<P: AsRef<Path>>(path: P) -> Result<Vec<Profile>, RosterError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| RosterError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let roster: RosterFile = serde_json::from_str(&text).map_err(|source| RosterError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("loaded {} profiles from {}", roster.users.len(), path.display());
    Ok(roster.users)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;
    use std::env;

    #[test]
    fn test_load_roster() {
        let path = env::temp_dir().join(format!("duet-algo-{}-roster.json", std::process::id()));
        fs::write(
            &path,
            r#"{
                "users": [
                    {
                        "name": "Alex",
                        "gender": "Male",
                        "preferences": ["Female", "Non-binary"],
                        "gradYear": 2024,
                        "responses": [1, 2, 3]
                    },
                    {
                        "name": "Blair",
                        "gender": "Non-binary",
                        "preferences": ["Male"],
                        "gradYear": 2025
                    }
                ]
            }"#,
        )
        .unwrap();

        let roster = load_roster(&path).unwrap();

        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].name, "Alex");
        assert!(roster[0].attracted_to(Gender::NonBinary));
        assert_eq!(roster[1].gender, Gender::NonBinary);
        assert!(roster[1].responses.is_empty());
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_reject_malformed_roster() {
        let path = env::temp_dir().join(format!("duet-algo-{}-bad.json", std::process::id()));
        fs::write(&path, r#"{"users": [{"name": "Nope"}]}"#).unwrap();

        let err = load_roster(&path).unwrap_err();
        assert!(matches!(err, RosterError::Json { .. }));
        fs::remove_file(path).ok();
    }
}
