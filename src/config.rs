use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::report::DEFAULT_REPORT_FILE;

/// Where an installed copy keeps its keyword and label files.
pub const LIB_DIR: &str = "/usr/lib/pdforganizer";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub organizer: OrganizerConfig,
    #[serde(default)]
    pub data: DataConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OrganizerConfig {
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_documents: usize,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    /// Parent of the category folders. Defaults to the source directory.
    #[serde(default)]
    pub destination_root: Option<PathBuf>,
    #[serde(default = "default_report_file")]
    pub report_file: String,
}

impl Default for OrganizerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_documents: default_max_concurrent(),
            include_globs: default_include_globs(),
            destination_root: None,
            report_file: default_report_file(),
        }
    }
}

pub(crate) fn default_max_concurrent() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

fn default_include_globs() -> Vec<String> {
    vec!["*.pdf".to_string()]
}

fn default_report_file() -> String {
    DEFAULT_REPORT_FILE.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    #[serde(default = "default_keywords_path")]
    pub keywords: PathBuf,
    #[serde(default = "default_ground_truth_path")]
    pub ground_truth: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            keywords: default_keywords_path(),
            ground_truth: default_ground_truth_path(),
        }
    }
}

fn default_keywords_path() -> PathBuf {
    Path::new(LIB_DIR).join("keywords.json")
}

fn default_ground_truth_path() -> PathBuf {
    Path::new(LIB_DIR).join("correct_categorizations.json")
}

impl Config {
    /// Settings used when no config file is present.
    pub fn minimal() -> Self {
        Self::default()
    }

    fn validate(&self) -> Result<()> {
        if self.organizer.max_concurrent_documents == 0 {
            anyhow::bail!("organizer.max_concurrent_documents must be >= 1");
        }
        if self.organizer.include_globs.is_empty() {
            anyhow::bail!("organizer.include_globs must not be empty");
        }
        let report = Path::new(&self.organizer.report_file);
        if report.file_name().map(|n| n != report.as_os_str()).unwrap_or(true) {
            anyhow::bail!(
                "organizer.report_file must be a plain file name, got '{}'",
                self.organizer.report_file
            );
        }
        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config: Config =
        toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    // Relative data paths are relative to the config file, not the cwd.
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    config.data.keywords = resolve_with_base(base, &config.data.keywords);
    config.data.ground_truth = resolve_with_base(base, &config.data.ground_truth);
    if let Some(root) = config.organizer.destination_root.take() {
        config.organizer.destination_root = Some(resolve_with_base(base, &root));
    }

    config.validate()?;
    Ok(config)
}

/// Loads `path` when it was given explicitly or exists; otherwise falls back
/// to [`Config::minimal`].
pub fn load_or_default(path: &Path, explicit: bool) -> Result<Config> {
    if explicit || path.exists() {
        load_config(path)
    } else {
        Ok(Config::minimal())
    }
}

fn resolve_with_base(base: &Path, p: &Path) -> PathBuf {
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base.join(p)
    }
}
