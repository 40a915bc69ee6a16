//! Multi-metric similarity scoring.
//!
//! The underlying edit-distance primitives come from `rapidfuzz`
//! (`fuzz::ratio` and `fuzz::partial_ratio`); the token-based variants are
//! orchestrated on top of those primitives by whitespace tokenization. No
//! similarity algorithm is defined here.

use std::collections::BTreeSet;
use std::fmt;

use rapidfuzz::fuzz;

/// An integer similarity score in `0..=100`; 100 means identical under the
/// metric's normalization.
pub type Score = u8;

/// The similarity metrics computed for every candidate pair.
///
/// Declaration order is the canonical tie-break order: when two metrics tie
/// at the maximum qualifying score, the earlier variant wins.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Global edit-distance ratio over the whole strings.
    LevRatio,
    /// Best-window ratio of the shorter string against the longer.
    PartialRatio,
    /// Order- and duplicate-insensitive ratio over token sets.
    SetRatio,
    /// Order-insensitive, duplicate-sensitive partial ratio over sorted tokens.
    SortRatio,
}

impl Metric {
    /// All metrics in canonical order.
    pub const ALL: [Metric; 4] = [
        Metric::LevRatio,
        Metric::PartialRatio,
        Metric::SetRatio,
        Metric::SortRatio,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Metric::LevRatio => "lev_ratio",
            Metric::PartialRatio => "partial_ratio",
            Metric::SetRatio => "set_ratio",
            Metric::SortRatio => "sort_ratio",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Scores of one candidate pair under every metric. Never mutated after
/// creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreSet {
    scores: [Score; 4],
}

impl ScoreSet {
    pub fn get(&self, metric: Metric) -> Score {
        self.scores[metric as usize]
    }

    /// Metrics and scores in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, Score)> + '_ {
        Metric::ALL.into_iter().map(|m| (m, self.get(m)))
    }

    /// The metric with the maximum score among those meeting `min_score`.
    ///
    /// Returns `None` iff no metric clears the threshold (inclusive lower
    /// bound). Ties at the maximum resolve to the earliest metric in
    /// canonical order because only a strictly higher score replaces the
    /// running best.
    pub fn best(&self, min_score: Score) -> Option<(Metric, Score)> {
        let mut best: Option<(Metric, Score)> = None;
        for (metric, score) in self.iter() {
            if score < min_score {
                continue;
            }
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((metric, score));
            }
        }
        best
    }

    /// The maximum score across all metrics, threshold-free.
    pub fn max_score(&self) -> Score {
        self.scores.into_iter().max().unwrap_or(0)
    }
}

/// Score a candidate pair under all four metrics.
pub fn score_pair(a: &str, b: &str) -> ScoreSet {
    ScoreSet {
        scores: [
            ratio(a, b),
            partial_ratio(a, b),
            token_set_ratio(a, b),
            partial_token_sort_ratio(a, b),
        ],
    }
}

fn ratio(a: &str, b: &str) -> Score {
    to_score(fuzz::ratio(a.chars(), b.chars()))
}

fn partial_ratio(a: &str, b: &str) -> Score {
    to_score(fuzz::partial_ratio(a.chars(), b.chars()))
}

/// Token-set ratio: the best ratio among the sorted intersection and the
/// two intersection-plus-difference strings.
fn token_set_ratio(a: &str, b: &str) -> Score {
    let set_a: BTreeSet<String> = tokens(a).into_iter().collect();
    let set_b: BTreeSet<String> = tokens(b).into_iter().collect();

    let intersection = join_sorted(set_a.intersection(&set_b));
    let only_a = join_sorted(set_a.difference(&set_b));
    let only_b = join_sorted(set_b.difference(&set_a));

    let combined_a = combine(&intersection, &only_a);
    let combined_b = combine(&intersection, &only_b);

    let candidates = [
        ratio(&intersection, &combined_a),
        ratio(&intersection, &combined_b),
        ratio(&combined_a, &combined_b),
    ];
    candidates.into_iter().max().unwrap_or(0)
}

/// Partial token-sort ratio: partial ratio over the sorted token joins,
/// duplicates kept.
fn partial_token_sort_ratio(a: &str, b: &str) -> Score {
    let mut tokens_a = tokens(a);
    let mut tokens_b = tokens(b);
    tokens_a.sort_unstable();
    tokens_b.sort_unstable();
    partial_ratio(&tokens_a.join(" "), &tokens_b.join(" "))
}

/// Lowercased whitespace tokens, non-alphanumerics mapped to separators.
fn tokens(s: &str) -> Vec<String> {
    s.chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

fn join_sorted<'a>(tokens: impl Iterator<Item = &'a String>) -> String {
    tokens.cloned().collect::<Vec<_>>().join(" ")
}

fn combine(base: &str, rest: &str) -> String {
    match (base.is_empty(), rest.is_empty()) {
        (true, _) => rest.to_string(),
        (_, true) => base.to_string(),
        _ => format!("{base} {rest}"),
    }
}

fn to_score(raw: f64) -> Score {
    raw.round().clamp(0.0, 100.0) as Score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_100_everywhere() {
        let scores = score_pair("pump failure", "pump failure");
        for (_, score) in scores.iter() {
            assert_eq!(score, 100);
        }
    }

    #[test]
    fn set_ratio_ignores_order_and_duplicates() {
        let scores = score_pair("seal leak seal", "leak seal");
        assert_eq!(scores.get(Metric::SetRatio), 100);
    }

    #[test]
    fn sort_ratio_ignores_order() {
        let scores = score_pair("high temp alarm", "alarm temp high");
        assert_eq!(scores.get(Metric::SortRatio), 100);
    }

    #[test]
    fn token_processing_is_case_insensitive() {
        let scores = score_pair("Bearing Seizure", "bearing seizure");
        assert_eq!(scores.get(Metric::SetRatio), 100);
        assert_eq!(scores.get(Metric::SortRatio), 100);
    }

    #[test]
    fn best_returns_none_below_threshold() {
        let scores = score_pair("pump", "valve");
        assert!(scores.best(90).is_none());
    }

    #[test]
    fn best_ties_resolve_in_canonical_order() {
        // Identical strings score 100 on every metric; the earliest metric
        // in canonical order must win.
        let scores = score_pair("pump", "pump");
        assert_eq!(scores.best(50), Some((Metric::LevRatio, 100)));
    }

    #[test]
    fn best_is_inclusive_at_the_threshold() {
        let scores = score_pair("pump", "pump");
        assert_eq!(scores.best(100), Some((Metric::LevRatio, 100)));
    }

    #[test]
    fn dissimilar_strings_score_low() {
        let scores = score_pair("Pump A failed on high temp", "Valve B stuck closed");
        assert!(scores.max_score() < 40, "scores: {scores:?}");
    }

    #[test]
    fn related_strings_clear_a_60_threshold() {
        let scores = score_pair("Pump A failed on high temp", "Pump A high temperature trip");
        assert!(
            scores.best(60).is_some(),
            "expected a qualifying metric, scores: {scores:?}"
        );
    }

    #[test]
    fn metric_names_are_stable() {
        let names: Vec<&str> = Metric::ALL.iter().map(|m| m.name()).collect();
        assert_eq!(
            names,
            ["lev_ratio", "partial_ratio", "set_ratio", "sort_ratio"]
        );
    }
}
