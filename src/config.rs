//! Session configuration: where catalogs and templates live and how sheets are produced.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub roles: PathBuf,
    pub professions: PathBuf,
    pub templates: TemplateConfig,
    pub output_dir: PathBuf,
    pub seed: Option<u64>,
    pub compile: CompileConfig,
    pub logging: LoggingConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            roles: PathBuf::from("data/roles.json"),
            professions: PathBuf::from("data/professions.json"),
            templates: TemplateConfig::default(),
            output_dir: PathBuf::from("out"),
            seed: None,
            compile: CompileConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub player: PathBuf,
    pub narrator: PathBuf,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            player: PathBuf::from("templates/character_template.tex"),
            narrator: PathBuf::from("templates/narrator_template.tex"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileConfig {
    pub enabled: bool,
    pub program: String,
    pub args: Vec<String>,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            program: "pdflatex".to_string(),
            args: vec![
                "-interaction=nonstopmode".to_string(),
                "-halt-on-error".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl SessionConfig {
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read session config {}", path.display()))?;
        let config: SessionConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Directory that catalog and template paths in a config file resolve against:
    /// the file's own folder, or the working directory without a file.
    pub fn base_dir(config_path: Option<&Path>) -> PathBuf {
        config_path
            .and_then(Path::parent)
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf()
    }

    pub fn to_yaml(&self, path: impl AsRef<Path>) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write {}", path.as_ref().display()))?;
        Ok(())
    }
}
