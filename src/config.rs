use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::DEFAULT_NO_LOCALIZE_COMMENT;

pub const CONFIG_FILE_NAME: &str = ".locscanrc.json";

pub const GENERATED_FILE_PATTERNS: &[&str] = &["**/*.Designer.cs", "**/*.designer.vb"];

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    /// Default namespace of the project, prepended to resource namespaces.
    #[serde(default)]
    pub root_namespace: String,
    #[serde(default = "default_no_localize_comment")]
    pub no_localize_comment: String,
    #[serde(default = "default_generated_file_patterns")]
    pub generated_file_patterns: Vec<String>,
    #[serde(default)]
    pub ignore_generated_files: bool,
    #[serde(default)]
    pub ignore_texts: Vec<String>,
}

fn default_ignores() -> Vec<String> {
    ["**/bin/**", "**/obj/**"].map(String::from).to_vec()
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_no_localize_comment() -> String {
    DEFAULT_NO_LOCALIZE_COMMENT.to_string()
}

fn default_generated_file_patterns() -> Vec<String> {
    GENERATED_FILE_PATTERNS.iter().map(|p| p.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignores: default_ignores(),
            includes: Vec::new(),
            source_root: default_source_root(),
            root_namespace: String::new(),
            no_localize_comment: default_no_localize_comment(),
            generated_file_patterns: default_generated_file_patterns(),
            ignore_generated_files: false,
            ignore_texts: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if a glob pattern is invalid or the no-localize
    /// comment is not a block comment.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Patterns without wildcards are literal directory paths.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        for pattern in &self.generated_file_patterns {
            Pattern::new(pattern).with_context(|| {
                format!(
                    "Invalid glob pattern in 'generatedFilePatterns': \"{}\"",
                    pattern
                )
            })?;
        }

        let marker = &self.no_localize_comment;
        if !(marker.starts_with("/*") && marker.ends_with("*/") && marker.len() >= 4) {
            anyhow::bail!(
                "'noLocalizeComment' must be a block comment such as \"{}\", got \"{}\"",
                DEFAULT_NO_LOCALIZE_COMMENT,
                marker
            );
        }

        Ok(())
    }

    /// Compiled `generatedFilePatterns`. Invalid patterns are skipped; they
    /// are rejected earlier by [`Config::validate`].
    pub fn generated_patterns(&self) -> Vec<Pattern> {
        self.generated_file_patterns
            .iter()
            .filter_map(|p| Pattern::new(p).ok())
            .collect()
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            tracing::debug!(path = %path.display(), "loaded config");
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
