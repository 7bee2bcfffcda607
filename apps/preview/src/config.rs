//! # Preview Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--json`, `--strict`), applied in [`crate::run`]
//! 2. Environment variables (`FOLIO_*`)
//! 3. Defaults (this file)
//!
//! ## Environment Variables
//! - `FOLIO_DEFAULT_CURRENCY`: used when a document has no currency code
//! - `FOLIO_STRICT`: `true`/`false`, reject inputs the engine would coerce
//! - `FOLIO_OUTPUT`: `text` or `json`
//! - `FOLIO_COMPANY_NAME`: shown when the document has no company name

use std::env;
use std::fmt;
use std::str::FromStr;

use folio_core::document::DEFAULT_CURRENCY;
use serde::{Deserialize, Serialize};

/// What the tool writes to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable document preview.
    #[default]
    Text,
    /// The computed totals as JSON.
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidValue("FOLIO_OUTPUT".to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Preview tool configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewConfig {
    /// Currency applied to documents with an empty currency code.
    pub default_currency: String,

    /// Validate inputs strictly before rendering.
    pub strict: bool,

    /// Output format.
    pub output: OutputFormat,

    /// Fallback company name for documents that leave it blank.
    pub company_name: Option<String>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        PreviewConfig {
            default_currency: DEFAULT_CURRENCY.to_string(),
            strict: false,
            output: OutputFormat::Text,
            company_name: None,
        }
    }
}

impl PreviewConfig {
    /// Loads configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Loads configuration from any key lookup.
    ///
    /// Unset keys fall back to defaults; set-but-invalid keys are errors.
    pub fn from_source<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = PreviewConfig::default();

        if let Some(code) = get("FOLIO_DEFAULT_CURRENCY") {
            let code = code.trim().to_ascii_uppercase();
            if code.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "FOLIO_DEFAULT_CURRENCY".to_string(),
                ));
            }
            config.default_currency = code;
        }

        if let Some(strict) = get("FOLIO_STRICT") {
            config.strict = parse_bool(&strict)
                .ok_or_else(|| ConfigError::InvalidValue("FOLIO_STRICT".to_string()))?;
        }

        if let Some(output) = get("FOLIO_OUTPUT") {
            config.output = output.parse()?;
        }

        config.company_name = get("FOLIO_COMPANY_NAME")
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        Ok(config)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = PreviewConfig::from_source(source(&[])).unwrap();
        assert_eq!(config, PreviewConfig::default());
        assert_eq!(config.default_currency, "USD");
        assert_eq!(config.output, OutputFormat::Text);
    }

    #[test]
    fn test_overrides() {
        let config = PreviewConfig::from_source(source(&[
            ("FOLIO_DEFAULT_CURRENCY", " eur "),
            ("FOLIO_STRICT", "yes"),
            ("FOLIO_OUTPUT", "JSON"),
            ("FOLIO_COMPANY_NAME", "Acme Studio"),
        ]))
        .unwrap();

        assert_eq!(config.default_currency, "EUR");
        assert!(config.strict);
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.company_name.as_deref(), Some("Acme Studio"));
    }

    #[test]
    fn test_invalid_values() {
        let err = PreviewConfig::from_source(source(&[("FOLIO_STRICT", "maybe")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for FOLIO_STRICT");

        assert!(PreviewConfig::from_source(source(&[("FOLIO_OUTPUT", "pdf")])).is_err());
        assert!(PreviewConfig::from_source(source(&[("FOLIO_DEFAULT_CURRENCY", "  ")])).is_err());
    }

    #[test]
    fn test_blank_company_name_is_ignored() {
        let config = PreviewConfig::from_source(source(&[("FOLIO_COMPANY_NAME", "   ")])).unwrap();
        assert_eq!(config.company_name, None);
    }
}
