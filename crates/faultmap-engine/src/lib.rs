#![deny(unsafe_code)]

pub mod classify;
pub mod filter;
pub mod matcher;
pub mod project;
pub mod score;

pub use classify::{Classification, classify, rank};
pub use filter::FilterSpec;
pub use matcher::{MatchOptions, MatchResult, match_all};
pub use project::{OutputColumn, OutputSpec, Provenance};
pub use score::{Metric, Score, ScoreSet, score_pair};
