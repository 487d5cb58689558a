//! YAML frontmatter extraction for markdown articles.
//!
//! Articles exported to the content repository look like:
//!
//! ```markdown
//! ---
//! slug: nie-number-spain
//! title: What is an NIE number?
//! topic: Legal
//! funnelStage: TOFU
//! tags: [nie, paperwork]
//! nextStep:
//!   slug: nie-appointment
//!   title: Booking your NIE appointment
//! ---
//! Body...
//! ```

use super::record::ArticleRecord;
use crate::error::LoadError;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static FRONTMATTER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\x{FEFF}?---\r?\n([\s\S]*?)\r?\n---").expect("valid regex"));

/// Returns the raw YAML between the leading `---` fences, if any.
pub fn extract_frontmatter(content: &str) -> Option<&str> {
    FRONTMATTER_REGEX
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Parse the frontmatter of a markdown file into a record.
///
/// Returns `Ok(None)` for files without frontmatter. When the frontmatter has
/// no `slug`, the file stem is used.
pub fn parse_markdown_article(
    path: &Path,
    content: &str,
) -> Result<Option<ArticleRecord>, LoadError> {
    let Some(yaml) = extract_frontmatter(content) else {
        return Ok(None);
    };

    let mut record: ArticleRecord =
        serde_yaml::from_str(yaml).map_err(|source| LoadError::Frontmatter {
            path: path.to_path_buf(),
            source,
        })?;

    if record.slug.as_deref().map_or(true, |s| s.trim().is_empty()) {
        record.slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string);
    }

    Ok(Some(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FunnelStage;

    const SAMPLE: &str = "---\nslug: nie-number-spain\ntitle: What is an NIE number?\ntopic: Legal\nfunnelStage: TOFU\ntags: [nie, paperwork]\nnextStep:\n  slug: nie-appointment\n  title: Booking your NIE appointment\n---\n# Body\n";

    #[test]
    fn test_extract_frontmatter() {
        let yaml = extract_frontmatter(SAMPLE).unwrap();
        assert!(yaml.starts_with("slug: nie-number-spain"));
        assert!(!yaml.contains("# Body"));
    }

    #[test]
    fn test_extract_handles_crlf_and_bom() {
        let content = "\u{feff}---\r\ntitle: X\r\n---\r\nbody";
        assert_eq!(extract_frontmatter(content), Some("title: X"));
    }

    #[test]
    fn test_no_frontmatter() {
        assert!(extract_frontmatter("# Just a heading\n").is_none());
        let parsed = parse_markdown_article(Path::new("a.md"), "plain").unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn test_parse_markdown_article() {
        let record = parse_markdown_article(Path::new("content/qa/x.md"), SAMPLE)
            .unwrap()
            .unwrap();
        let article = record.into_article().unwrap();
        assert_eq!(article.slug, "nie-number-spain");
        assert_eq!(article.funnel_stage, FunnelStage::Tofu);
        assert_eq!(article.tags, vec!["nie", "paperwork"]);
        let link = article.frontmatter_next_step.unwrap();
        assert_eq!(link.slug, "nie-appointment");
    }

    #[test]
    fn test_slug_falls_back_to_file_stem() {
        let content = "---\ntitle: Golden visa\n---\n";
        let record = parse_markdown_article(Path::new("qa/golden-visa.md"), content)
            .unwrap()
            .unwrap();
        assert_eq!(record.slug.as_deref(), Some("golden-visa"));
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let content = "---\ntitle: [unclosed\n---\n";
        let err = parse_markdown_article(Path::new("bad.md"), content).unwrap_err();
        assert!(matches!(err, LoadError::Frontmatter { .. }));
        assert!(err.to_string().contains("bad.md"));
    }
}
