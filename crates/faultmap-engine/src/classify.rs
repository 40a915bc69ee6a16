//! Two-level taxonomy classification.

use faultmap_model::TaxonomyTree;

use crate::score::{Score, score_pair};

/// Outcome of classifying one input string.
///
/// `l2_score`/`l2_match` stay zeroed when the matched category has no
/// sub-categories or none meets the threshold; that is a valid partial
/// classification, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub l1_score: Score,
    pub l1_match: String,
    pub l2_score: Score,
    pub l2_match: String,
}

impl Classification {
    /// The fail-closed result: all scores zero, all matches empty.
    pub fn unclassified() -> Self {
        Self::default()
    }

    pub fn is_classified(&self) -> bool {
        !self.l1_match.is_empty()
    }
}

/// Rank candidates against `text`, returning the top candidate and its
/// best metric score.
///
/// Each candidate is scored with every metric and keeps the maximum. Only a
/// strictly higher score replaces the running best, so ties resolve to the
/// earliest candidate in sequence order. Returns `None` for an empty
/// candidate sequence.
pub fn rank<'a, I>(text: &str, candidates: I) -> Option<(&'a str, Score)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&str, Score)> = None;
    for candidate in candidates {
        let score = score_pair(text, candidate).max_score();
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((candidate, score));
        }
    }
    best
}

/// Classify `text` against a two-level taxonomy.
///
/// A level-1 category is represented by its own name together with its
/// sub-category names: its score is the best over all of them, so an input
/// that names a sub-category ("bearing seizure") still lands in the right
/// category even when the category name itself ("Mechanical") is textually
/// distant. If the best level-1 score misses `min_score` (inclusive lower
/// bound) the classification fails closed to the all-zero result. Otherwise
/// the matched category's sub-categories are ranked; a level-2 best below
/// threshold leaves the level-2 fields zeroed.
pub fn classify(text: &str, tree: &TaxonomyTree, min_score: Score) -> Classification {
    let mut best: Option<(usize, Score)> = None;
    for (position, node) in tree.nodes().iter().enumerate() {
        let candidates = std::iter::once(node.name.as_str())
            .chain(node.children.iter().map(String::as_str));
        let Some((_, score)) = rank(text, candidates) else {
            continue;
        };
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((position, score));
        }
    }

    let Some((position, l1_score)) = best else {
        return Classification::unclassified();
    };
    if l1_score < min_score {
        return Classification::unclassified();
    }

    let node = &tree.nodes()[position];
    let mut classification = Classification {
        l1_score,
        l1_match: node.name.clone(),
        l2_score: 0,
        l2_match: String::new(),
    };

    if let Some((child, l2_score)) = rank(text, node.children.iter().map(String::as_str))
        && l2_score >= min_score
    {
        classification.l2_score = l2_score;
        classification.l2_match = child.to_string();
    }

    classification
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> TaxonomyTree {
        let mut tree = TaxonomyTree::new();
        tree.insert_child("Mechanical", "Bearing");
        tree.insert_child("Mechanical", "Seal");
        tree.insert_category("Electrical");
        tree
    }

    #[test]
    fn classifies_both_levels() {
        let result = classify("bearing seizure", &sample_tree(), 50);

        assert_eq!(result.l1_match, "Mechanical");
        assert!(result.l1_score >= 50, "l1_score: {}", result.l1_score);
        assert_eq!(result.l2_match, "Bearing");
        assert!(result.l2_score >= 50, "l2_score: {}", result.l2_score);
    }

    #[test]
    fn fails_closed_below_threshold() {
        let result = classify("zzzz qqqq", &sample_tree(), 80);
        assert_eq!(result, Classification::unclassified());
        assert!(!result.is_classified());
    }

    #[test]
    fn empty_level_two_is_a_valid_partial_classification() {
        let result = classify("electrical", &sample_tree(), 50);

        assert_eq!(result.l1_match, "Electrical");
        assert!(result.l1_score >= 50);
        assert_eq!(result.l2_score, 0);
        assert_eq!(result.l2_match, "");
    }

    #[test]
    fn weak_level_two_is_zeroed_but_level_one_kept() {
        let mut tree = TaxonomyTree::new();
        tree.insert_child("Mechanical", "Gearbox backlash");

        let result = classify("mechanical", &tree, 60);

        assert_eq!(result.l1_match, "Mechanical");
        assert_eq!(result.l2_score, 0);
        assert_eq!(result.l2_match, "");
    }

    #[test]
    fn empty_tree_is_unclassified() {
        let result = classify("anything", &TaxonomyTree::new(), 0);
        assert_eq!(result, Classification::unclassified());
    }

    #[test]
    fn rank_ties_resolve_to_the_first_candidate() {
        // Both candidates score 100; only a strictly higher score replaces
        // the running best, so the first one wins.
        let first = String::from("pump");
        let second = String::from("pump");
        let (winner, score) = rank("pump", [first.as_str(), second.as_str()].into_iter()).unwrap();
        assert_eq!(score, 100);
        assert!(std::ptr::eq(winner, first.as_str()));
    }

    #[test]
    fn rank_of_empty_candidates_is_none() {
        assert_eq!(rank("pump", std::iter::empty()), None);
    }
}
