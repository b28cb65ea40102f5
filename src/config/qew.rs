//! Qew configuration structures.

use serde::{Deserialize, Serialize};

use crate::core::{AdmissionOrder, Delay};

/// Environment variable holding the concurrency limit.
pub const ENV_MAX_CONCURRENT: &str = "QEW_MAX_CONCURRENT";
/// Environment variable holding the cooldown in milliseconds.
pub const ENV_DELAY_MS: &str = "QEW_DELAY_MS";
/// Environment variable holding the admission order (`fifo` or `lifo`).
pub const ENV_ADMISSION_ORDER: &str = "QEW_ADMISSION_ORDER";

/// Serializable qew configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QewConfig {
    /// How many operations may run simultaneously.
    pub max_concurrent: usize,
    /// Milliseconds to wait between an operation settling and the next one
    /// taking its place.
    pub delay_ms: u64,
    /// Order in which pending work is admitted.
    pub admission_order: AdmissionOrder,
}

impl Default for QewConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 1,
            delay_ms: 0,
            admission_order: AdmissionOrder::Fifo,
        }
    }
}

impl QewConfig {
    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_concurrent == 0 {
            return Err("max_concurrent has to be 1 or higher".into());
        }
        Ok(())
    }

    /// Cooldown described by this configuration.
    #[must_use]
    pub const fn delay(&self) -> Delay {
        Delay::from_millis(self.delay_ms)
    }

    /// Parse configuration from a JSON string and validate.
    ///
    /// # Errors
    ///
    /// Returns a description of the parse or validation failure.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read configuration from `QEW_*` environment variables, loading a `.env`
    /// file first if one exists. Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns a description of the first malformed variable or invalid value.
    pub fn from_env() -> Result<Self, String> {
        // A missing .env is fine; the process environment still applies.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup using the `QEW_*`
    /// variable names.
    ///
    /// # Errors
    ///
    /// Returns a description of the first malformed value or invalid setting.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(raw) = lookup(ENV_MAX_CONCURRENT) {
            cfg.max_concurrent = raw
                .trim()
                .parse()
                .map_err(|e| format!("{ENV_MAX_CONCURRENT}={raw:?}: {e}"))?;
        }
        if let Some(raw) = lookup(ENV_DELAY_MS) {
            cfg.delay_ms = raw
                .trim()
                .parse()
                .map_err(|e| format!("{ENV_DELAY_MS}={raw:?}: {e}"))?;
        }
        if let Some(raw) = lookup(ENV_ADMISSION_ORDER) {
            cfg.admission_order = match raw.trim().to_ascii_lowercase().as_str() {
                "fifo" => AdmissionOrder::Fifo,
                "lifo" => AdmissionOrder::Lifo,
                other => return Err(format!("{ENV_ADMISSION_ORDER}: unknown order `{other}`")),
            };
        }
        cfg.validate()?;
        Ok(cfg)
    }
}
