// Input boundary exports
pub mod dataset;
pub mod roster;

pub use dataset::{load_gender_identities, load_gender_preferences, load_score_matrix, DatasetError};
pub use roster::{load_roster, RosterError};
