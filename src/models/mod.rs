// Model exports
pub mod domain;

pub use domain::{
    Gender, GenderPref, MatrixError, Pairing, ParseGenderError, ParseGenderPrefError, Profile,
    ScoreMatrix,
};
