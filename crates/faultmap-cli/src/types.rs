//! Result types shared between commands and the summary printer.

use std::path::PathBuf;

/// Outcome of one match run.
#[derive(Debug, Clone)]
pub struct MatchRunResult {
    pub source_rows: usize,
    pub relation_rows: usize,
    pub matched: usize,
    pub min_score: u8,
    /// Mean winning score; `None` when nothing matched.
    pub mean_score: Option<f64>,
    pub output: Option<PathBuf>,
}

/// Outcome of one classify run.
#[derive(Debug, Clone)]
pub struct ClassifyRunResult {
    /// Rows selected by the filter.
    pub rows: usize,
    /// Rows with both taxonomy levels resolved.
    pub classified: usize,
    /// Rows with only the level-1 category resolved.
    pub category_only: usize,
    /// Rows below the threshold at level 1.
    pub unclassified: usize,
    pub min_score: u8,
    pub output: Option<PathBuf>,
}
