use rung_cards::House;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";
const HANDS_PER_ROUND: usize = 13;

/// Root simulation configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SimConfig {
    pub run_id: String,
    pub rounds: RoundsConfig,
    #[serde(default)]
    pub trump: TrumpConfig,
    #[serde(default)]
    pub rules: RulesConfig,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: SimConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        self.rounds.validate()?;
        self.trump.validate()?;
        self.rules.validate()?;
        self.outputs.validate(&self.run_id)?;
        self.logging.normalize();
        Ok(())
    }

    /// Resolve output templates (e.g., `{run_id}` placeholders) into concrete paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: resolve_template(&self.run_id, &self.outputs.jsonl),
            summary_md: resolve_template(&self.run_id, &self.outputs.summary_md),
        }
    }
}

/// Round sampling configuration block.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RoundsConfig {
    pub seed: Option<u64>,
    pub count: usize,
    #[serde(default)]
    pub shuffle_passes: usize,
}

impl RoundsConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.count == 0 {
            return Err(ValidationError::InvalidField {
                field: "rounds.count".to_string(),
                message: "number of rounds must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Trump designation per round.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct TrumpConfig {
    #[serde(default)]
    pub mode: TrumpMode,
    #[serde(default)]
    pub house: Option<House>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TrumpMode {
    #[default]
    None,
    Fixed,
    Rotate,
}

impl TrumpConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.mode == TrumpMode::Fixed && self.house.is_none() {
            return Err(ValidationError::InvalidField {
                field: "trump.house".to_string(),
                message: "fixed trump mode requires a house".to_string(),
            });
        }
        Ok(())
    }
}

/// Engine rule knobs passed through to game construction.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RulesConfig {
    #[serde(default = "default_null_hands")]
    pub null_hands: Vec<usize>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            null_hands: default_null_hands(),
        }
    }
}

impl RulesConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        for index in &self.null_hands {
            if *index >= HANDS_PER_ROUND {
                return Err(ValidationError::InvalidField {
                    field: "rules.null_hands".to_string(),
                    message: format!("hand index {index} is outside a {HANDS_PER_ROUND}-trick round"),
                });
            }
        }
        Ok(())
    }
}

fn default_null_hands() -> Vec<usize> {
    vec![11]
}

/// Output artifact configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    pub summary_md: String,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        for (label, value) in [
            ("outputs.jsonl", &self.jsonl),
            ("outputs.summary_md", &self.summary_md),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "path must not be empty".to_string(),
                });
            }

            let resolved = resolve_template(run_id, value);
            if resolved.components().count() == 0 {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "resolved path is invalid".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id must not be empty".to_string(),
        });
    }

    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id may only contain alphanumeric characters, '.', '_' or '-'".to_string(),
        });
    }

    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    let replaced = template.replace("{run_id}", run_id);
    PathBuf::from(replaced)
}

/// Fully resolved output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub summary_md: PathBuf,
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC_YAML: &str = r#"
run_id: "stage0_smoke"
rounds:
  seed: 123
  count: 16
  shuffle_passes: 2
trump:
  mode: "fixed"
  house: Spade
rules:
  null_hands: [11]
outputs:
  jsonl: "sim/out/{run_id}/tricks.jsonl"
  summary_md: "sim/out/{run_id}/summary.md"
logging:
  enable_structured: true
  tracing_level: "debug"
"#;

    #[test]
    fn loads_and_validates_basic_config() {
        let mut cfg: SimConfig = serde_yaml::from_str(BASIC_YAML).expect("parse yaml");
        cfg.validate().expect("validate");

        assert_eq!(cfg.rounds.count, 16);
        assert_eq!(cfg.trump.mode, TrumpMode::Fixed);
        assert_eq!(cfg.trump.house, Some(House::Spade));
        assert!(cfg.logging.enable_structured);

        let outputs = cfg.resolved_outputs();
        assert_eq!(
            outputs.jsonl,
            PathBuf::from("sim/out/stage0_smoke/tricks.jsonl")
        );
    }

    #[test]
    fn defaults_apply_when_sections_omitted() {
        let yaml = r#"
run_id: "defaults"
rounds:
  seed: 1
  count: 2
outputs:
  jsonl: "out/tricks.jsonl"
  summary_md: "out/summary.md"
"#;
        let mut cfg: SimConfig = serde_yaml::from_str(yaml).expect("parse");
        cfg.validate().expect("validate");
        assert_eq!(cfg.trump.mode, TrumpMode::None);
        assert_eq!(cfg.rules.null_hands, vec![11]);
        assert_eq!(cfg.rounds.shuffle_passes, 0);
        assert!(!cfg.logging.enable_structured);
    }

    #[test]
    fn rejects_zero_rounds() {
        let yaml = BASIC_YAML.replace("count: 16", "count: 0");
        let mut cfg: SimConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("should fail");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "rounds.count"
        ));
    }

    #[test]
    fn rejects_fixed_trump_without_house() {
        let yaml = BASIC_YAML.replace("  house: Spade\n", "");
        let mut cfg: SimConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("should fail");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "trump.house"
        ));
    }

    #[test]
    fn rejects_null_hand_index_outside_round() {
        let yaml = BASIC_YAML.replace("null_hands: [11]", "null_hands: [13]");
        let mut cfg: SimConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("should fail");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "rules.null_hands"
        ));
    }

    #[test]
    fn rejects_invalid_run_id() {
        let yaml = BASIC_YAML.replace("stage0_smoke", "stage 0 smoke");
        let mut cfg: SimConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("invalid run id");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "run_id"
        ));
    }

    #[test]
    fn outputs_resolve_template_multiple_occurrences() {
        let yaml = BASIC_YAML.replace(
            "sim/out/{run_id}/summary.md",
            "sim/out/{run_id}/{run_id}/summary.md",
        );
        let mut cfg: SimConfig = serde_yaml::from_str(&yaml).expect("parse");
        cfg.validate().expect("valid");
        let outputs = cfg.resolved_outputs();
        assert_eq!(
            outputs.summary_md,
            PathBuf::from("sim/out/stage0_smoke/stage0_smoke/summary.md")
        );
    }
}
