// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Portal configuration loaded from JSON, with built-in defaults for every field.
//!
//! Lookup order: `$TRANSCRIPT_PORTAL_CONFIG`, then `portal.json` in the working
//! directory, then defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

use crate::models::policy::ValidationPolicy;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "TRANSCRIPT_PORTAL_CONFIG";
/// Config file picked up from the working directory when the env var is unset.
pub const DEFAULT_CONFIG_FILE: &str = "portal.json";

/// Timing of the simulated transfer.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SubmissionSettings {
    pub step_delay_ms: u64,
    pub step_percent: u8,
    pub completion_delay_ms: u64,
}

impl Default for SubmissionSettings {
    fn default() -> Self {
        Self {
            step_delay_ms: 200,
            step_percent: 10,
            completion_delay_ms: 500,
        }
    }
}

impl SubmissionSettings {
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    pub fn completion_delay(&self) -> Duration {
        Duration::from_millis(self.completion_delay_ms)
    }
}

/// Top-level portal configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub policy: ValidationPolicy,
    /// Checkbox labels the client must tick before submitting.
    pub acknowledgements: Vec<String>,
    pub submission: SubmissionSettings,
    pub notification_timeout_secs: u64,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            policy: ValidationPolicy::default(),
            acknowledgements: vec![
                "I confirm I have the right to share these recordings.".into(),
                "I agree to the terms of service and privacy policy.".into(),
            ],
            submission: SubmissionSettings::default(),
            notification_timeout_secs: 7,
        }
    }
}

impl PortalConfig {
    /// Resolve and load configuration following the documented lookup order.
    pub fn load() -> Result<Self> {
        if let Ok(explicit) = std::env::var(CONFIG_ENV) {
            info!("{CONFIG_ENV} set, loading {explicit}");
            return Self::from_file(Path::new(&explicit));
        }

        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            info!("Loading configuration from {}", local.display());
            return Self::from_file(&local);
        }

        info!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Invalid config file: {:?}", path))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: PortalConfig =
            serde_json::from_str(content).context("Failed to parse portal configuration JSON")?;
        Ok(raw.normalized())
    }

    fn normalized(mut self) -> Self {
        self.policy = self.policy.normalized();
        if self.policy.max_total_size_bytes < self.policy.max_file_size_bytes {
            warn!(
                "max_total_size_bytes ({}) is below max_file_size_bytes ({}); single files may be refused as over the total",
                self.policy.max_total_size_bytes, self.policy.max_file_size_bytes
            );
        }
        self.submission.step_percent = self.submission.step_percent.clamp(1, 100);
        self.acknowledgements.retain(|label| !label.trim().is_empty());
        self
    }
}
