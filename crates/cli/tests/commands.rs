//! CLI integration tests for the `primehomes` binary.
//!
//! Each test seeds a temporary article export, runs the real binary with
//! `HOME` pointed at the fixture, and checks stdout.

use std::path::Path;
use std::process::{Command, Output};

use anyhow::{Context, Result};
use primehomes_test_utils::ContentFixture;
use serde_json::Value;

const EXPORT: &str = r#"[
  {"id": "1", "slug": "buying-guide", "title": "Buying property in Spain as a foreigner",
   "topic": "Legal", "funnel_stage": "TOFU", "tags": ["visa", "NIE"], "language": "en",
   "points_to_mofu_id": "2"},
  {"id": "2", "slug": "lawyers", "title": "Comparing conveyancing lawyers",
   "topic": "Legal", "funnelStage": "MOFU", "tags": ["visa"], "language": "en",
   "pointsToBofuId": "3"},
  {"id": "3", "slug": "consult", "title": "Book a legal consultation",
   "topic": "Legal", "funnel_stage": "BOFU", "language": "en"},
  {"id": "4", "slug": "golf", "title": "Golf courses on the coast",
   "topic": "Lifestyle", "funnel_stage": "MOFU", "tags": [], "language": "en"},
  {"id": "5", "slug": "abogados", "title": "Comparar abogados",
   "topic": "Legal", "funnel_stage": "MOFU", "language": "es"}
]"#;

fn primehomes(home: &Path, args: &[&str]) -> Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_primehomes"))
        .env("HOME", home)
        .env_remove("PRIMEHOMES_CONFIG")
        .env_remove("PRIMEHOMES_SOURCE")
        .args(args)
        .output()
        .context("failed to execute primehomes")
}

fn run_json(home: &Path, args: &[&str]) -> Result<Value> {
    let output = primehomes(home, args)?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        output.status.success(),
        "command {:?} failed\nSTDOUT:\n{}\nSTDERR:\n{}",
        args,
        stdout,
        stderr
    );
    serde_json::from_str(&stdout).with_context(|| format!("stdout is not JSON: {stdout}"))
}

fn slugs(recommendations: &Value) -> Vec<String> {
    recommendations
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|a| a["slug"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn recommend_orders_by_relevance_and_respects_language() -> Result<()> {
    let fixture = ContentFixture::new()?;
    let export = fixture.write_json("articles.json", EXPORT)?;
    let export = export.to_str().context("utf-8 path")?;

    let results = run_json(
        fixture.root(),
        &["recommend", "--source", export, "buying-guide", "--format", "json"],
    )?;

    assert_eq!(results[0]["slug"], "buying-guide");
    assert_eq!(
        slugs(&results[0]["recommendations"]),
        vec!["lawyers", "consult", "golf"]
    );
    Ok(())
}

#[test]
fn recommend_max_flag_overrides_config() -> Result<()> {
    let fixture = ContentFixture::new()?;
    let export = fixture.write_json("articles.json", EXPORT)?;
    let export = export.to_str().context("utf-8 path")?;
    fixture.write_config("[recommend]\nmax_results = 1")?;

    let from_config = run_json(
        fixture.root(),
        &["recommend", "--source", export, "1", "--format", "json"],
    )?;
    assert_eq!(slugs(&from_config[0]["recommendations"]), vec!["lawyers"]);

    let from_flag = run_json(
        fixture.root(),
        &["recommend", "--source", export, "1", "--max", "2", "--format", "json"],
    )?;
    assert_eq!(
        slugs(&from_flag[0]["recommendations"]),
        vec!["lawyers", "consult"]
    );
    Ok(())
}

#[test]
fn recommend_explain_includes_scores() -> Result<()> {
    let fixture = ContentFixture::new()?;
    let export = fixture.write_json("articles.json", EXPORT)?;
    let export = export.to_str().context("utf-8 path")?;

    let results = run_json(
        fixture.root(),
        &[
            "recommend", "--source", export, "buying-guide", "--explain", "--format", "json",
        ],
    )?;

    let first = &results[0]["recommendations"][0];
    assert_eq!(first["article"]["slug"], "lawyers");
    let score = first["score"].as_f64().context("score")?;
    assert!((score - 0.8).abs() < 1e-9);
    assert!(first["explanation"]
        .as_str()
        .unwrap_or_default()
        .contains("Same topic: Legal"));
    Ok(())
}

#[test]
fn recommend_unknown_article_fails() -> Result<()> {
    let fixture = ContentFixture::new()?;
    let export = fixture.write_json("articles.json", EXPORT)?;
    let export = export.to_str().context("utf-8 path")?;

    let output = primehomes(fixture.root(), &["recommend", "--source", export, "nope"])?;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("article not found"));
    Ok(())
}

#[test]
fn invalid_config_is_reported() -> Result<()> {
    let fixture = ContentFixture::new()?;
    let export = fixture.write_json("articles.json", EXPORT)?;
    let export = export.to_str().context("utf-8 path")?;
    let config = fixture.write_json("bad.toml", "[scoring]\ntopic_match = -1.0")?;
    let config = config.to_str().context("utf-8 path")?;

    let output = primehomes(
        fixture.root(),
        &["recommend", "--config", config, "--source", export, "1"],
    )?;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("topic_match"));
    Ok(())
}

#[test]
fn next_step_follows_curated_link() -> Result<()> {
    let fixture = ContentFixture::new()?;
    let export = fixture.write_json("articles.json", EXPORT)?;
    let export = export.to_str().context("utf-8 path")?;

    let report = run_json(
        fixture.root(),
        &["next-step", "--source", export, "buying-guide", "--format", "json"],
    )?;

    assert_eq!(report["funnel"]["progressPercentage"], 33);
    assert_eq!(report["nextStep"]["source"], "funnel-link");
    assert_eq!(report["nextStep"]["step"]["slug"], "lawyers");
    assert_eq!(report["nextStep"]["step"]["cta"], "Learn More");
    Ok(())
}

#[test]
fn funnel_shows_generic_next_step() -> Result<()> {
    let fixture = ContentFixture::new()?;
    let report = run_json(fixture.root(), &["funnel", "mofu", "--format", "json"])?;

    assert_eq!(report["funnel"]["label"], "Compare");
    assert_eq!(report["funnel"]["nextStage"], "BOFU");
    assert_eq!(report["nextStep"]["title"], "Book a Property Viewing");
    Ok(())
}

#[test]
fn analyze_report_and_duplicates() -> Result<()> {
    let fixture = ContentFixture::new()?;
    let export = fixture.write_json("articles.json", EXPORT)?;
    let export = export.to_str().context("utf-8 path")?;

    let report = run_json(
        fixture.root(),
        &["analyze", "--source", export, "report", "--format", "json"],
    )?;
    assert_eq!(report["alignment"]["alignmentScore"], 100);
    assert_eq!(report["alignment"]["totalLinks"], 2);
    let topics: Vec<&str> = report["topics"]
        .as_array()
        .context("topics")?
        .iter()
        .filter_map(|t| t["topic"].as_str())
        .collect();
    assert_eq!(topics, vec!["Legal", "Lifestyle"]);

    let duplicates = run_json(
        fixture.root(),
        &[
            "analyze",
            "--source",
            export,
            "duplicates",
            "--title",
            "Comparing conveyancing lawyers",
            "--topic",
            "Legal",
            "--stage",
            "MOFU",
            "--format",
            "json",
        ],
    )?;
    assert_eq!(duplicates[0]["existing"]["slug"], "lawyers");
    assert_eq!(duplicates[0]["suggestedAction"], "update");
    Ok(())
}

#[test]
fn analyze_json_with_no_articles_stays_json() -> Result<()> {
    let fixture = ContentFixture::new()?;
    let export = fixture.write_json("articles.json", EXPORT)?;
    let export = export.to_str().context("utf-8 path")?;

    let bottlenecks = run_json(
        fixture.root(),
        &[
            "analyze", "--source", export, "--language", "de", "bottlenecks", "--format", "json",
        ],
    )?;
    assert_eq!(bottlenecks, Value::Array(Vec::new()));

    let report = run_json(
        fixture.root(),
        &["analyze", "--source", export, "--language", "de", "report", "--format", "json"],
    )?;
    assert_eq!(report["alignment"]["totalLinks"], 0);
    assert!(report["issues"].as_array().context("issues")?.is_empty());

    let output = primehomes(
        fixture.root(),
        &["analyze", "--source", export, "--language", "de", "report"],
    )?;
    assert!(String::from_utf8_lossy(&output.stdout).contains("No articles found"));
    Ok(())
}

#[test]
fn markdown_directory_source() -> Result<()> {
    let fixture = ContentFixture::new()?;
    fixture.write_article(
        "qa/villa.md",
        "slug: villa\ntitle: Choosing a villa\ntopic: Lifestyle\nfunnelStage: TOFU",
    )?;
    fixture.write_article(
        "qa/schools.md",
        "slug: schools\ntitle: International schools compared\ntopic: Education\nfunnelStage: MOFU",
    )?;
    let content = fixture.content_dir().to_str().context("utf-8 path")?;

    let results = run_json(
        fixture.root(),
        &["recommend", "--source", content, "villa", "--format", "json"],
    )?;
    assert_eq!(slugs(&results[0]["recommendations"]), vec!["schools"]);

    let output = primehomes(fixture.root(), &["recommend", "--source", content, "villa"])?;
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Choosing a villa [TOFU | Lifestyle]"));
    Ok(())
}
