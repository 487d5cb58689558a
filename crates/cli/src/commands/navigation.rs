//! CLI handlers for the `next-step` and `funnel` commands.

use super::{load_store, print_json, require_article, resolve_language};
use crate::cli::{OutputFormat, SourceArgs};
use crate::config::Config;
use anyhow::Result;
use primehomes_intelligence::{
    generic_next_step, resolve_next_step, FunnelInfo, FunnelStage, NextStep, ResolvedNextStep,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NextStepReport {
    slug: String,
    funnel: FunnelInfo,
    next_step: ResolvedNextStep,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StageReport {
    funnel: FunnelInfo,
    next_step: NextStep,
}

/// Handle the `next-step` command.
pub(crate) fn handle_next_step_command(
    config: &Config,
    source: &SourceArgs,
    key: &str,
    format: OutputFormat,
) -> Result<()> {
    let store = load_store(source)?;
    let language = resolve_language(source, config);
    let current = require_article(&store, &language, key)?;

    let report = NextStepReport {
        funnel: FunnelInfo::for_stage(current.funnel_stage),
        next_step: resolve_next_step(&current, store.all()),
        slug: current.slug,
    };

    match format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Text => {
            print_funnel_info(&report.funnel);
            println!("Source: {:?}", report.next_step.source);
            print_next_step(&report.next_step.step);
            Ok(())
        }
    }
}

/// Handle the `funnel` command.
pub(crate) fn handle_funnel_command(stage: FunnelStage, format: OutputFormat) -> Result<()> {
    let report = StageReport {
        funnel: FunnelInfo::for_stage(stage),
        next_step: generic_next_step(stage),
    };

    match format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Text => {
            print_funnel_info(&report.funnel);
            print_next_step(&report.next_step);
            Ok(())
        }
    }
}

fn print_funnel_info(info: &FunnelInfo) {
    let next = info
        .next_stage
        .map(|s| s.to_string())
        .unwrap_or_else(|| "none".to_string());
    println!(
        "Stage: {} ({}) {}% complete, next: {}",
        info.stage, info.label, info.progress_percentage, next
    );
}

fn print_next_step(step: &NextStep) {
    println!("Next step: {}", step.title);
    if let Some(slug) = &step.slug {
        println!("  slug: {}", slug);
    }
    if let Some(url) = &step.url {
        println!("  url: {}", url);
    }
    if let Some(cta) = &step.cta {
        println!("  cta: {}", cta);
    }
    if let Some(preview) = &step.preview {
        println!("  preview: {}", preview);
    }
}
