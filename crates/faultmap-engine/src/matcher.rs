//! Relational matcher: best fuzzy match per source row against a relation
//! dataset.

use faultmap_model::{AliasTable, Result, Table};
use tracing::debug;

use crate::filter::FilterSpec;
use crate::score::{Metric, Score, score_pair};

/// Configuration for one matching run.
#[derive(Debug, Clone, Default)]
pub struct MatchOptions {
    /// Source columns joined (single space, trimmed) into the query string.
    pub source_text: Vec<String>,
    /// Relation columns joined into the candidate string.
    pub relation_text: Vec<String>,
    /// Row filter on the source dataset; `None` passes everything.
    pub source_filter: Option<FilterSpec>,
    /// Row filter on the relation dataset; `None` passes everything.
    pub relation_filter: Option<FilterSpec>,
    /// Alias table applied to the query string before scoring.
    pub alias: Option<AliasTable>,
    /// Relation rows whose text contains any of these substrings are skipped.
    pub ignore: Vec<String>,
    /// Inclusive minimum qualifying score.
    pub min_score: Score,
}

/// Best-known match for one source row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub source_index: usize,
    pub relation_index: usize,
    pub score: Score,
    pub metric: Metric,
    /// The scored query string (after alias normalization).
    pub query_text: String,
    /// The winning relation text.
    pub matched_text: String,
}

/// Match every qualifying source row against the full relation dataset.
///
/// Per source row this is a fold over all relation candidates into an
/// immutable best-so-far: a candidate replaces the running best only when
/// its best qualifying metric score is strictly higher. Source rows whose
/// final best misses `min_score` produce no result; that is not an error.
///
/// A full O(|source| x |relation|) cross-scan; filters and ignore
/// substrings prune candidates but no indexing is attempted.
pub fn match_all(
    source: &Table,
    relation: &Table,
    options: &MatchOptions,
) -> Result<Vec<MatchResult>> {
    let mut results = Vec::new();

    for (source_index, source_row) in source.rows.iter().enumerate() {
        if let Some(filter) = &options.source_filter
            && !filter.matches(source_row)?
        {
            continue;
        }

        let raw_query = source_row.join_columns(&options.source_text)?;
        let query = match &options.alias {
            Some(table) => table.apply(&raw_query),
            None => raw_query,
        };

        let mut best: Option<MatchResult> = None;
        for (relation_index, relation_row) in relation.rows.iter().enumerate() {
            if let Some(filter) = &options.relation_filter
                && !filter.matches(relation_row)?
            {
                continue;
            }

            let candidate = relation_row.join_columns(&options.relation_text)?;
            if options.ignore.iter().any(|s| candidate.contains(s.as_str())) {
                continue;
            }

            let Some((metric, score)) = score_pair(&query, &candidate).best(options.min_score)
            else {
                continue;
            };
            if best.as_ref().is_none_or(|b| score > b.score) {
                best = Some(MatchResult {
                    source_index,
                    relation_index,
                    score,
                    metric,
                    query_text: query.clone(),
                    matched_text: candidate,
                });
            }
        }

        match best {
            Some(result) => results.push(result),
            None => debug!(row = source_index, "no candidate met the minimum score"),
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use faultmap_model::{EngineError, Row};

    use super::*;

    fn source_table(rows: &[(&str, &str)]) -> Table {
        let mut table = Table::new(vec!["Area".to_string(), "Description".to_string()]);
        for (area, text) in rows {
            table.push_row(Row::from_pairs([("Area", *area), ("Description", *text)]));
        }
        table
    }

    fn relation_table(rows: &[&str]) -> Table {
        let mut table = Table::new(vec!["Cause".to_string()]);
        for text in rows {
            table.push_row(Row::from_pairs([("Cause", *text)]));
        }
        table
    }

    fn options(min_score: Score) -> MatchOptions {
        MatchOptions {
            source_text: vec!["Description".to_string()],
            relation_text: vec!["Cause".to_string()],
            min_score,
            ..MatchOptions::default()
        }
    }

    #[test]
    fn selects_the_best_relation_row() {
        let source = source_table(&[("Line1", "Pump A failed on high temp")]);
        let relation = relation_table(&["Valve B stuck closed", "Pump A high temperature trip"]);

        let results = match_all(&source, &relation, &options(60)).unwrap();

        assert_eq!(results.len(), 1);
        let result = &results[0];
        assert_eq!(result.relation_index, 1);
        assert_eq!(result.matched_text, "Pump A high temperature trip");
        assert!(result.score >= 60, "score: {}", result.score);
    }

    #[test]
    fn rows_below_threshold_are_silently_dropped() {
        let source = source_table(&[("Line1", "Pump A failed on high temp")]);
        let relation = relation_table(&["Valve B stuck closed"]);

        let results = match_all(&source, &relation, &options(60)).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn source_filter_skips_rows() {
        let source = source_table(&[
            ("Line1", "Pump A failed on high temp"),
            ("Line2", "Pump A failed on high temp"),
        ]);
        let relation = relation_table(&["Pump A high temperature trip"]);

        let mut opts = options(60);
        opts.source_filter = Some(FilterSpec::parse("Area=Line2").unwrap());

        let results = match_all(&source, &relation, &opts).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].source_index, 1);
    }

    #[test]
    fn ignore_substrings_prune_relation_rows() {
        let source = source_table(&[("Line1", "Pump A failed on high temp")]);
        let relation = relation_table(&["Pump A high temperature trip"]);

        let mut opts = options(60);
        opts.ignore = vec!["temperature".to_string()];

        let results = match_all(&source, &relation, &opts).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn alias_normalization_applies_to_the_query() {
        let source = source_table(&[("Line1", "Pump A failed on high temperature")]);
        let relation = relation_table(&["Pump A failed on high temp"]);

        let mut alias = AliasTable::new();
        alias.insert("temp", "temperature");
        let mut opts = options(90);
        opts.alias = Some(alias);

        let results = match_all(&source, &relation, &opts).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].score, 100);
        assert_eq!(results[0].query_text, "Pump A failed on high temp");
    }

    #[test]
    fn filter_on_unknown_column_aborts_the_run() {
        let source = source_table(&[("Line1", "Pump A failed")]);
        let relation = relation_table(&["Pump A trip"]);

        let mut opts = options(60);
        opts.source_filter = Some(FilterSpec::parse("Plant=North").unwrap());

        let err = match_all(&source, &relation, &opts).unwrap_err();
        assert_eq!(err, EngineError::Schema("Plant".to_string()));
    }

    #[test]
    fn missing_text_column_aborts_the_run() {
        let source = source_table(&[("Line1", "Pump A failed")]);
        let relation = relation_table(&["Pump A trip"]);

        let mut opts = options(60);
        opts.relation_text = vec!["Remedy".to_string()];

        let err = match_all(&source, &relation, &opts).unwrap_err();
        assert_eq!(err, EngineError::Schema("Remedy".to_string()));
    }
}
