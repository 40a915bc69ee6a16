//! Command implementations.

use std::fs;

use anyhow::Context;
use tracing::{info, info_span};

use faultmap_engine::{FilterSpec, MatchOptions, OutputSpec, classify, match_all};
use faultmap_ingest::{
    SkeletonFilter, build_alias_skeleton, load_alias_table, load_match_config, load_taxonomy_tree,
    read_table,
};

use crate::cli::{BuildAliasArgs, ClassifyArgs, MatchArgs};
use crate::output::{ensure_writable, write_rows};
use crate::types::{ClassifyRunResult, MatchRunResult};

pub fn run_match(args: &MatchArgs) -> anyhow::Result<MatchRunResult> {
    if let Some(path) = &args.output {
        ensure_writable(path, args.force)?;
    }

    let config = load_match_config(&args.config)
        .with_context(|| format!("failed to load configuration [{}]", args.config.display()))?;
    let source = read_table(&args.source)
        .with_context(|| format!("failed to read source CSV [{}]", args.source.display()))?;
    let relation = read_table(&args.relation)
        .with_context(|| format!("failed to read relation CSV [{}]", args.relation.display()))?;

    let spec = if config.output.is_empty() {
        OutputSpec::default_console()
    } else {
        OutputSpec::from_declarations(
            config
                .output
                .iter()
                .map(|c| (c.header.as_str(), c.from.as_str(), c.field.as_str())),
        )?
    };

    let options = MatchOptions {
        source_text: config.source.text,
        relation_text: config.relation.text,
        source_filter: FilterSpec::parse_opt(&config.source.filter)?,
        relation_filter: FilterSpec::parse_opt(&config.relation.filter)?,
        alias: config.relation.alias,
        ignore: config.relation.ignore,
        min_score: args.score,
    };

    let results = {
        let span = info_span!(
            "match",
            source_rows = source.len(),
            relation_rows = relation.len(),
            min_score = args.score
        );
        let _guard = span.enter();
        match_all(&source, &relation, &options)?
    };

    let mut rows = Vec::with_capacity(results.len());
    for result in &results {
        let source_row = &source.rows[result.source_index];
        let relation_row = &relation.rows[result.relation_index];
        rows.push(spec.project(source_row, Some(relation_row), result)?);
    }
    write_rows(args.output.as_deref(), &spec.header(), &rows)?;

    let mean_score = if results.is_empty() {
        None
    } else {
        let total: f64 = results.iter().map(|r| f64::from(r.score)).sum();
        Some(total / results.len() as f64)
    };
    info!(matched = results.len(), "match run complete");

    Ok(MatchRunResult {
        source_rows: source.len(),
        relation_rows: relation.len(),
        matched: results.len(),
        min_score: args.score,
        mean_score,
        output: args.output.clone(),
    })
}

pub fn run_classify(args: &ClassifyArgs) -> anyhow::Result<ClassifyRunResult> {
    if let Some(path) = &args.output {
        ensure_writable(path, args.force)?;
    }

    let table = read_table(&args.csv)
        .with_context(|| format!("failed to read input CSV [{}]", args.csv.display()))?;
    let tree = load_taxonomy_tree(&args.tree)
        .with_context(|| format!("failed to load taxonomy tree [{}]", args.tree.display()))?;
    let alias = match &args.alias {
        Some(path) => Some(
            load_alias_table(path)
                .with_context(|| format!("failed to load alias table [{}]", path.display()))?,
        ),
        None => None,
    };
    let filter = match &args.filter {
        Some(expr) => FilterSpec::parse_opt(expr)?,
        None => None,
    };

    let span = info_span!("classify", rows = table.len(), min_score = args.score);
    let _guard = span.enter();

    let mut result = ClassifyRunResult {
        rows: 0,
        classified: 0,
        category_only: 0,
        unclassified: 0,
        min_score: args.score,
        output: args.output.clone(),
    };
    let mut rows = Vec::new();
    for row in &table.rows {
        if let Some(filter) = &filter
            && !filter.matches(row)?
        {
            continue;
        }
        result.rows += 1;

        let raw = row.require(&args.column)?;
        let text = match &alias {
            Some(table) => table.apply(raw),
            None => raw.to_string(),
        };
        if args.test {
            println!("{text}");
            continue;
        }

        let classification = classify(&text, &tree, args.score);
        if !classification.is_classified() {
            result.unclassified += 1;
        } else if classification.l2_match.is_empty() {
            result.category_only += 1;
        } else {
            result.classified += 1;
        }

        if args.output.is_some() {
            rows.push(vec![
                text,
                classification.l1_match,
                classification.l1_score.to_string(),
                classification.l2_match,
                classification.l2_score.to_string(),
            ]);
        } else {
            println!(
                "[Score: {}/{}][Causality: {}/{}] {}",
                classification.l1_score,
                classification.l2_score,
                classification.l1_match,
                classification.l2_match,
                text
            );
        }
    }

    if let Some(path) = &args.output
        && !args.test
    {
        write_rows(
            Some(path),
            &["text", "category", "category_score", "cause", "cause_score"],
            &rows,
        )?;
    }
    info!(
        rows = result.rows,
        classified = result.classified,
        "classify run complete"
    );

    Ok(result)
}

pub fn run_build_alias(args: &BuildAliasArgs) -> anyhow::Result<()> {
    if let Some(path) = &args.output {
        ensure_writable(path, args.force)?;
    }

    let table = read_table(&args.tree)
        .with_context(|| format!("failed to read causality CSV [{}]", args.tree.display()))?;
    let filter = SkeletonFilter {
        model: args.model.clone(),
        c1name: args.c1name.clone(),
    };
    let skeleton = build_alias_skeleton(&table, &args.tree, &filter)?;
    let yaml = serde_yaml::to_string(&skeleton.to_yaml())
        .context("failed to render the alias skeleton")?;

    match &args.output {
        Some(path) => {
            fs::write(path, &yaml)
                .with_context(|| format!("failed to write [{}]", path.display()))?;
            info!(path = %path.display(), models = skeleton.models.len(), "wrote alias skeleton");
        }
        None => print!("{yaml}"),
    }
    Ok(())
}
