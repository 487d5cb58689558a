//! Shared test utilities for primehomes crates.
//!
//! This crate provides common test fixtures and utilities used across
//! multiple crates in the primehomes workspace.

use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};

/// Serialize tests that mutate process-global state (env vars, cwd, etc).
///
/// Acquire this guard at the start of any test that modifies environment
/// variables to prevent race conditions between parallel tests.
pub fn env_guard() -> MutexGuard<'static, ()> {
    static TEST_SERIAL: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    TEST_SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

/// RAII guard for environment variables - restores original value on drop.
pub struct EnvVarGuard {
    key: &'static str,
    previous: Option<String>,
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        if let Some(v) = &self.previous {
            std::env::set_var(self.key, v);
        } else {
            std::env::remove_var(self.key);
        }
    }
}

/// Set an environment variable and return a guard that restores the original on drop.
///
/// # Example
/// ```
/// let _guard = primehomes_test_utils::set_env_var("MY_VAR", Some("value"));
/// // MY_VAR is set to "value"
/// // When _guard drops, MY_VAR is restored to its original value
/// ```
pub fn set_env_var(key: &'static str, value: Option<&str>) -> EnvVarGuard {
    let previous = std::env::var(key).ok();
    if let Some(val) = value {
        std::env::set_var(key, val);
    } else {
        std::env::remove_var(key);
    }
    EnvVarGuard { key, previous }
}

/// Temporary content tree for loader and CLI tests.
///
/// Layout under the temp root:
/// - `content/` for markdown articles
/// - JSON exports and config files written directly under the root
///
/// The tempdir is removed when the fixture drops.
pub struct ContentFixture {
    tempdir: tempfile::TempDir,
    content_dir: PathBuf,
}

impl ContentFixture {
    /// Create a fixture with an empty `content/` directory.
    pub fn new() -> std::io::Result<Self> {
        let tempdir = tempfile::tempdir()?;
        let content_dir = tempdir.path().join("content");
        std::fs::create_dir_all(&content_dir)?;
        Ok(Self {
            tempdir,
            content_dir,
        })
    }

    /// Temp root. Also usable as `HOME`.
    pub fn root(&self) -> &Path {
        self.tempdir.path()
    }

    /// Markdown content directory.
    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// Write a JSON export under the root and return its path.
    pub fn write_json(&self, name: &str, content: &str) -> std::io::Result<PathBuf> {
        let path = self.root().join(name);
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Write a markdown article with the given YAML frontmatter.
    pub fn write_article(&self, rel: &str, frontmatter: &str) -> std::io::Result<PathBuf> {
        self.write_file(rel, &format!("---\n{frontmatter}\n---\n# body\n"))
    }

    /// Write an arbitrary file under the content directory.
    pub fn write_file(&self, rel: &str, content: &str) -> std::io::Result<PathBuf> {
        let path = self.content_dir.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Write `~/.primehomes/config.toml` relative to the fixture root.
    pub fn write_config(&self, content: &str) -> std::io::Result<PathBuf> {
        let dir = self.root().join(".primehomes");
        std::fs::create_dir_all(&dir)?;
        let path = dir.join("config.toml");
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Create an RAII guard that sets HOME to this fixture's root.
    pub fn home_guard(&self) -> EnvVarGuard {
        set_env_var("HOME", Some(self.root().to_str().unwrap()))
    }
}
