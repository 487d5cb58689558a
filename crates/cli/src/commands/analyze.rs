//! CLI handler for the `analyze` command.

use super::{load_store, print_json, resolve_language};
use crate::cli::{AnalyzeCommand, OutputFormat, SourceArgs};
use crate::config::Config;
use anyhow::{anyhow, Result};
use primehomes_intelligence::analysis::{StageCounts, TopicSummary};
use primehomes_intelligence::{
    analyze_funnel, find_bottlenecks, find_duplicate_candidates, suggest_topic_targets,
    topic_alignment, topic_distribution, AnalysisIssue, ArticleSource, DuplicateCandidate,
    FunnelBottleneck, FunnelReport, Severity, TopicAlignment, TopicTargets,
};

/// Handle the `analyze` command.
pub(crate) fn handle_analyze_command(
    config: &Config,
    source: &SourceArgs,
    check: AnalyzeCommand,
    format: OutputFormat,
) -> Result<()> {
    let store = load_store(source)?;
    let language = resolve_language(source, config);
    let articles = store.articles(&language)?;

    let json = format == OutputFormat::Json;
    if articles.is_empty() && !json {
        println!("No articles found for language '{}'.", language);
        return Ok(());
    }

    match check {
        AnalyzeCommand::Alignment => {
            let alignment = topic_alignment(&articles);
            if json {
                return print_json(&alignment);
            }
            print_alignment(&alignment);
        }
        AnalyzeCommand::Bottlenecks => {
            let bottlenecks = find_bottlenecks(&articles);
            if json {
                return print_json(&bottlenecks);
            }
            print_bottlenecks(&bottlenecks);
        }
        AnalyzeCommand::Topics => {
            let topics = topic_distribution(&articles);
            if json {
                return print_json(&topics);
            }
            print_topics(&topics);
        }
        AnalyzeCommand::Duplicates {
            title,
            topic,
            stage,
        } => {
            let candidates = find_duplicate_candidates(&title, &topic, stage, &articles);
            if json {
                return print_json(&candidates);
            }
            print_duplicates(&title, &candidates);
        }
        AnalyzeCommand::Targets { topic, stage } => {
            let targets = suggest_topic_targets(&topic, stage, &articles)
                .ok_or_else(|| anyhow!("{stage} is the last funnel stage; nothing follows it"))?;
            if json {
                return print_json(&targets);
            }
            print_targets(&topic, &targets);
        }
        AnalyzeCommand::Report => {
            let report = analyze_funnel(&articles);
            if json {
                return print_json(&report);
            }
            print_report(articles.len(), &report);
        }
    }
    Ok(())
}

fn print_alignment(alignment: &TopicAlignment) {
    println!(
        "Topic alignment: {}% ({} of {} links aligned)",
        alignment.alignment_score, alignment.aligned_links, alignment.total_links
    );
    for path in &alignment.misaligned_paths {
        match &path.to {
            Some(to) => println!(
                "  {} {} ({}) -> {} ({})",
                path.kind, path.from.slug, path.from.topic, to.slug, to.topic
            ),
            None => println!(
                "  {} {} ({}) -> missing article",
                path.kind, path.from.slug, path.from.topic
            ),
        }
    }
}

fn print_bottlenecks(bottlenecks: &[FunnelBottleneck]) {
    if bottlenecks.is_empty() {
        println!("No funnel bottlenecks found.");
        return;
    }
    println!("Funnel bottlenecks ({}):", bottlenecks.len());
    for b in bottlenecks {
        println!(
            "  {} {} <- {} articles",
            b.kind, b.target_article.slug, b.source_count
        );
    }
}

fn format_counts(counts: &StageCounts) -> String {
    format!(
        "TOFU {}, MOFU {}, BOFU {}",
        counts.tofu, counts.mofu, counts.bofu
    )
}

fn print_topics(topics: &[TopicSummary]) {
    for topic in topics {
        print!("{}: {}", topic.topic, format_counts(&topic.stages));
        if !topic.missing_stages.is_empty() {
            let missing: Vec<&str> = topic.missing_stages.iter().map(|s| s.as_str()).collect();
            print!(" (missing {})", missing.join(", "));
        }
        if !topic.bottlenecks.is_empty() {
            print!(" [{} bottleneck(s)]", topic.bottlenecks.len());
        }
        println!();
    }
}

fn print_duplicates(title: &str, candidates: &[DuplicateCandidate]) {
    if candidates.is_empty() {
        println!("No similar articles found for \"{}\".", title);
        return;
    }
    println!("Similar articles for \"{}\":", title);
    for c in candidates {
        println!(
            "  {:.0}% {} ({}) -> {:?}",
            c.similarity * 100.0,
            c.existing.title,
            c.existing.slug,
            c.suggested_action
        );
    }
}

fn print_targets(topic: &str, targets: &TopicTargets) {
    println!("{} targets for {}:", targets.stage, topic);
    for existing in &targets.existing {
        println!("  {} ({})", existing.title, existing.slug);
    }
    for suggested in &targets.suggested {
        println!("  suggested: {}", suggested.title);
    }
}

fn print_report(article_count: usize, report: &FunnelReport) {
    println!("Analyzed {} articles", article_count);
    println!(
        "Topic alignment: {}% across {} links",
        report.alignment.alignment_score, report.alignment.total_links
    );
    println!(
        "{} bottleneck(s), {} topic(s)",
        report.bottlenecks.len(),
        report.topics.len()
    );

    print_issues("Errors", Severity::Error, &report.issues);
    print_issues("Warnings", Severity::Warning, &report.issues);
    print_issues("Info", Severity::Info, &report.issues);
}

fn print_issues(heading: &str, severity: Severity, issues: &[AnalysisIssue]) {
    let matching: Vec<&AnalysisIssue> = issues.iter().filter(|i| i.severity == severity).collect();
    if matching.is_empty() {
        return;
    }
    println!("\n{} ({}):", heading, matching.len());
    for issue in matching {
        println!("  - {}", issue.message);
    }
}
