use clap::{Args, Parser, Subcommand, ValueEnum};
use primehomes_intelligence::FunnelStage;
use std::path::PathBuf;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Command-line interface for the `primehomes` application.
#[derive(Debug, Parser)]
#[command(
    name = "primehomes",
    about = "Funnel-aware related-article recommendations for the Q&A library"
)]
pub struct Cli {
    /// Config file (default: `~/.primehomes/config.toml`).
    #[arg(long, global = true, env = "PRIMEHOMES_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    #[command(subcommand)]
    pub command: Commands,
}

/// Where articles come from.
#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// JSON article export or markdown content directory.
    #[arg(long, env = "PRIMEHOMES_SOURCE", value_name = "PATH")]
    pub source: PathBuf,
    /// Content language (overrides `[recommend].language`).
    #[arg(long, value_name = "CODE")]
    pub language: Option<String>,
}

/// Available `primehomes` commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Recommends related articles for one or more articles (slug or id).
    Recommend {
        #[command(flatten)]
        source: SourceArgs,
        /// Article slugs or ids.
        #[arg(required = true)]
        articles: Vec<String>,
        /// Maximum recommendations per article (overrides `[recommend].max_results`).
        #[arg(long = "max", value_name = "N")]
        max_results: Option<usize>,
        /// Candidates fetched before scoring (overrides `[recommend].candidate_limit`).
        #[arg(long, value_name = "N")]
        candidate_limit: Option<usize>,
        /// Shows scores and the signals behind each recommendation.
        #[arg(long, default_value_t = false)]
        explain: bool,
    },
    /// Resolves the next-step call-to-action for an article.
    NextStep {
        #[command(flatten)]
        source: SourceArgs,
        /// Article slug or id.
        article: String,
    },
    /// Shows funnel progress and the generic next step for a stage.
    Funnel {
        /// Funnel stage (TOFU, MOFU or BOFU).
        #[arg(value_parser = parse_stage)]
        stage: FunnelStage,
    },
    /// Analyzes funnel health across the article set.
    Analyze {
        #[command(flatten)]
        source: SourceArgs,
        #[command(subcommand)]
        check: AnalyzeCommand,
    },
}

/// Funnel analysis reports.
#[derive(Debug, Subcommand)]
pub enum AnalyzeCommand {
    /// Topic alignment of curated funnel links.
    Alignment,
    /// Targets with too many linking articles.
    Bottlenecks,
    /// Stage coverage per topic.
    Topics,
    /// Existing articles resembling a proposed title.
    Duplicates {
        /// Proposed title.
        #[arg(long)]
        title: String,
        /// Proposed topic.
        #[arg(long)]
        topic: String,
        /// Proposed funnel stage.
        #[arg(long, value_parser = parse_stage)]
        stage: FunnelStage,
    },
    /// Same-topic follow-up articles for a topic and stage.
    Targets {
        /// Topic to look up.
        #[arg(long)]
        topic: String,
        /// Stage the reader is leaving (TOFU or MOFU).
        #[arg(long, value_parser = parse_stage)]
        stage: FunnelStage,
    },
    /// Full funnel report with graded issues.
    Report,
}

fn parse_stage(s: &str) -> Result<FunnelStage, String> {
    s.parse().map_err(|e: primehomes_intelligence::UnknownStageError| e.to_string())
}
