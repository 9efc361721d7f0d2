// src/config.rs
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::id::{DEFAULT_START, DEFAULT_WIDTH};
use crate::types::OutputFormat;

/// Digits in `u64::MAX`; wider padding can never be needed.
pub const MAX_WIDTH: usize = 20;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ids: IdsCfg,
    #[serde(default)]
    pub logging: LoggingCfg,
    #[serde(default)]
    pub output: OutputCfg,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let s = fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        Self::from_yaml(&s)
    }

    pub fn from_yaml(s: &str) -> Result<Self> {
        let cfg: AppConfig = serde_yaml::from_str(s).context("parsing YAML config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load `path` if given, otherwise fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Apply command-line overrides; `None` keeps the loaded value.
    pub fn apply_overrides(&mut self, start: Option<u64>, format: Option<OutputFormat>) {
        if let Some(start) = start {
            self.ids.start = start;
        }
        if let Some(format) = format {
            self.output.format = format;
        }
    }

    fn validate(&self) -> Result<()> {
        if self.ids.width == 0 || self.ids.width > MAX_WIDTH {
            return Err(anyhow!(
                "ids.width must be between 1 and {MAX_WIDTH}, got {}",
                self.ids.width
            ));
        }
        Ok(())
    }
}

/* ===== identifier sequence ===== */

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Let identifiers grow past the pad width.
    #[default]
    Widen,
    /// Refuse to issue identifiers that do not fit.
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdsCfg {
    #[serde(default = "default_start")]
    pub start: u64,
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default)]
    pub overflow: OverflowPolicy,
}

impl Default for IdsCfg {
    fn default() -> Self {
        Self {
            start: DEFAULT_START,
            width: DEFAULT_WIDTH,
            overflow: OverflowPolicy::Widen,
        }
    }
}

fn default_start() -> u64 {
    DEFAULT_START
}

fn default_width() -> usize {
    DEFAULT_WIDTH
}

/* ===== logging ===== */

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingCfg {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String, // "text" | "json"
    /// Optional log file; stderr only when unset.
    #[serde(default)]
    pub path: Option<String>,
    /// Mirror to stderr when a file is configured.
    #[serde(default)]
    pub also_stderr: Option<bool>,
}

impl Default for LoggingCfg {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_log_format(),
            path: None,
            also_stderr: None,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

/* ===== output ===== */

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputCfg {
    #[serde(default)]
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = AppConfig::from_yaml("{}").unwrap();
        assert_eq!(cfg.ids.start, 100_000);
        assert_eq!(cfg.ids.width, 10);
        assert_eq!(cfg.ids.overflow, OverflowPolicy::Widen);
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.logging.path.is_none());
        assert_eq!(cfg.output.format, OutputFormat::Json);
    }

    #[test]
    fn full_document() {
        let yaml = r#"
ids:
  start: 5
  width: 6
  overflow: fail
logging:
  level: debug
  format: json
  path: logs/ids.log
  also_stderr: true
output:
  format: text
"#;
        let cfg = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(cfg.ids.start, 5);
        assert_eq!(cfg.ids.width, 6);
        assert_eq!(cfg.ids.overflow, OverflowPolicy::Fail);
        assert_eq!(cfg.logging.format, "json");
        assert_eq!(cfg.logging.path.as_deref(), Some("logs/ids.log"));
        assert_eq!(cfg.logging.also_stderr, Some(true));
        assert_eq!(cfg.output.format, OutputFormat::Text);
    }

    #[test]
    fn zero_width_rejected() {
        let err = AppConfig::from_yaml("ids:\n  width: 0\n").unwrap_err();
        assert!(err.to_string().contains("width"), "{err}");
    }

    #[test]
    fn oversized_width_rejected() {
        let err = AppConfig::from_yaml("ids:\n  width: 1000000000\n").unwrap_err();
        assert!(err.to_string().contains("between 1 and 20"), "{err}");
        assert!(AppConfig::from_yaml("ids:\n  width: 20\n").is_ok());
        assert!(AppConfig::from_yaml("ids:\n  width: 21\n").is_err());
    }

    #[test]
    fn flags_override_file_values() {
        let mut cfg =
            AppConfig::from_yaml("ids:\n  start: 500\noutput:\n  format: json\n").unwrap();
        cfg.apply_overrides(Some(9), Some(OutputFormat::Text));
        assert_eq!(cfg.ids.start, 9);
        assert_eq!(cfg.output.format, OutputFormat::Text);
    }

    #[test]
    fn absent_flags_keep_file_values() {
        let mut cfg =
            AppConfig::from_yaml("ids:\n  start: 500\noutput:\n  format: text\n").unwrap();
        cfg.apply_overrides(None, None);
        assert_eq!(cfg.ids.start, 500);
        assert_eq!(cfg.output.format, OutputFormat::Text);
    }

    #[test]
    fn unknown_policy_rejected() {
        assert!(AppConfig::from_yaml("ids:\n  overflow: wrap\n").is_err());
    }

    #[test]
    fn load_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "ids:\n  start: 42").unwrap();
        let cfg = AppConfig::load(f.path()).unwrap();
        assert_eq!(cfg.ids.start, 42);
        assert_eq!(cfg.ids.width, 10);
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("nope.yaml");
        let err = AppConfig::load(&p).unwrap_err();
        assert!(format!("{err:#}").contains("nope.yaml"));
    }

    #[test]
    fn no_path_means_defaults() {
        let cfg = AppConfig::load_or_default(None).unwrap();
        assert_eq!(cfg.ids.start, 100_000);
    }
}
