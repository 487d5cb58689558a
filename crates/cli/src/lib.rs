//! Command-line front end for funnel-aware article recommendations.
//!
//! The main entry point is [`run`], which parses arguments, loads the
//! configuration file and dispatches to a command handler. Articles are read
//! from a JSON export or a markdown content directory on every invocation.

use anyhow::Result;
use clap::Parser;

pub mod cli;
pub mod config;
mod commands;

use crate::cli::{Cli, Commands};
use crate::commands::{
    handle_analyze_command, handle_funnel_command, handle_next_step_command,
    handle_recommend_command,
};
use crate::config::load_config;

/// Parses the command line and runs the selected command.
pub fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let format = cli.format;

    match cli.command {
        Commands::Recommend {
            source,
            articles,
            max_results,
            candidate_limit,
            explain,
        } => handle_recommend_command(
            &config,
            &source,
            &articles,
            max_results,
            candidate_limit,
            explain,
            format,
        ),
        Commands::NextStep { source, article } => {
            handle_next_step_command(&config, &source, &article, format)
        }
        Commands::Funnel { stage } => handle_funnel_command(stage, format),
        Commands::Analyze { source, check } => {
            handle_analyze_command(&config, &source, check, format)
        }
    }
}
