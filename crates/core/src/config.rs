use std::path::Path;

use serde::Deserialize;

use crate::error::MatrixOutcome;

/// Root application configuration. Loaded from an optional TOML file and
/// environment variables with the prefix `ASSET_MATRIX__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub naming: NamingConfig,
    #[serde(default)]
    pub languages: LanguageRuleConfig,
    #[serde(default)]
    pub sizes: SizeConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Delimiters used when building creative names.
#[derive(Debug, Clone, Deserialize)]
pub struct NamingConfig {
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    #[serde(default = "default_campaign_delimiter")]
    pub campaign_delimiter: String,
}

/// Region/language availability rule.
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageRuleConfig {
    /// The one region where every selected language is eligible.
    #[serde(default = "default_bilingual_region")]
    pub bilingual_region: String,
    /// The only language eligible everywhere else.
    #[serde(default = "default_language")]
    pub default_language: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SizeConfig {
    #[serde(default = "default_fallback_size")]
    pub fallback_size: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

// Default functions
fn default_delimiter() -> String {
    "_".to_string()
}
fn default_campaign_delimiter() -> String {
    "-".to_string()
}
fn default_bilingual_region() -> String {
    "QC".to_string()
}
fn default_language() -> String {
    "EN".to_string()
}
fn default_fallback_size() -> String {
    "16x9".to_string()
}
fn default_output_dir() -> String {
    ".".to_string()
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            campaign_delimiter: default_campaign_delimiter(),
        }
    }
}

impl Default for LanguageRuleConfig {
    fn default() -> Self {
        Self {
            bilingual_region: default_bilingual_region(),
            default_language: default_language(),
        }
    }
}

impl Default for SizeConfig {
    fn default() -> Self {
        Self {
            fallback_size: default_fallback_size(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            naming: NamingConfig::default(),
            languages: LanguageRuleConfig::default(),
            sizes: SizeConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from an optional config file, then environment
    /// variables. Environment values win over the file.
    pub fn load(file: Option<&Path>) -> MatrixOutcome<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let builder = builder.add_source(
            config::Environment::with_prefix("ASSET_MATRIX")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        tracing::debug!(file = ?file, "configuration sources loaded");
        Ok(config.try_deserialize()?)
    }
}
