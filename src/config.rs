//! Configuration handling for the form runner

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::forms::FormMode;
use crate::state::FormValues;

/// Default simulated persistence latency
const DEFAULT_SUBMIT_DELAY_MS: u64 = 1000;

/// User configuration for the form runner
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FormConfig {
    /// Create a new user or edit the prefilled one
    pub mode: Option<FormMode>,
    /// Simulated latency of the user store, in milliseconds
    pub submit_delay_ms: Option<u64>,
    /// Reset the form after a successful create
    pub reset_after_create: Option<bool>,
    /// Initial data for edit mode
    pub prefill: Option<FormValues>,
    /// Make every submission fail
    pub fail_submissions: Option<bool>,
}

impl FormConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "formstate", "formstate")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file, defaulting when it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: FormConfig = serde_json::from_str(&content)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        match Self::config_path() {
            Some(path) => self.save_to(&path),
            None => Ok(()),
        }
    }

    /// Save configuration to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn mode(&self) -> FormMode {
        self.mode.unwrap_or_default()
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms.unwrap_or(DEFAULT_SUBMIT_DELAY_MS))
    }

    pub fn reset_after_create(&self) -> bool {
        self.reset_after_create.unwrap_or(true)
    }

    pub fn fail_submissions(&self) -> bool {
        self.fail_submissions.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FieldValue;

    #[test]
    fn test_default_config() {
        let config = FormConfig::default();
        assert!(config.mode.is_none());
        assert!(config.submit_delay_ms.is_none());
        assert!(config.reset_after_create.is_none());
        assert!(config.prefill.is_none());
        assert!(config.fail_submissions.is_none());
    }

    #[test]
    fn test_default_accessors() {
        let config = FormConfig::default();
        assert_eq!(config.mode(), FormMode::Create);
        assert_eq!(config.submit_delay(), Duration::from_millis(1000));
        assert!(config.reset_after_create());
        assert!(!config.fail_submissions());
    }

    #[test]
    fn test_serialization() {
        let config = FormConfig {
            mode: Some(FormMode::Edit),
            submit_delay_ms: Some(250),
            reset_after_create: Some(false),
            prefill: Some(
                [("firstName".to_string(), FieldValue::text("Jane"))]
                    .into_iter()
                    .collect(),
            ),
            fail_submissions: Some(true),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: FormConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.mode, Some(FormMode::Edit));
        assert_eq!(parsed.submit_delay_ms, Some(250));
        assert_eq!(parsed.reset_after_create, Some(false));
        assert_eq!(
            parsed.prefill.unwrap()["firstName"],
            FieldValue::text("Jane")
        );
        assert_eq!(parsed.fail_submissions, Some(true));
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: FormConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.mode.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"mode": "edit", "unknown_field": "value"}"#;
        let parsed: FormConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.mode(), FormMode::Edit);
    }

    #[test]
    fn test_prefill_accepts_numbers() {
        let json = r#"{"prefill": {"age": 34, "firstName": "Jane"}}"#;
        let parsed: FormConfig = serde_json::from_str(json).unwrap();
        let prefill = parsed.prefill.unwrap();
        assert_eq!(prefill["age"], FieldValue::Number(34.0));
    }

    fn temp_config_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("formstate-test-{}", uuid::Uuid::new_v4()))
            .join("config.json")
    }

    #[test]
    fn test_config_path_is_json_file() {
        if let Some(path) = FormConfig::config_path() {
            assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("config.json"));
        }
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let config = FormConfig::load_from(&temp_config_path()).unwrap();
        assert!(config.mode.is_none());
        assert!(config.prefill.is_none());
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_config_path();
        let config = FormConfig {
            mode: Some(FormMode::Edit),
            submit_delay_ms: Some(10),
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let loaded = FormConfig::load_from(&path).unwrap();
        assert_eq!(loaded.mode(), FormMode::Edit);
        assert_eq!(loaded.submit_delay(), Duration::from_millis(10));

        if let Some(dir) = path.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_load_malformed_file_is_error() {
        let path = temp_config_path();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).unwrap();
        }
        fs::write(&path, "{ not json").unwrap();

        assert!(FormConfig::load_from(&path).is_err());

        if let Some(dir) = path.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }
}
