//! Creative naming convention.
//!
//! A name is the delimited join of: start year, client code, product code,
//! language, the cleaned `title-funnel-region-language` token, the cleaned
//! offer name, the size code, the start date as `Mon.DD.YYYY` and the cleaned
//! duration. A custom suffix and the offer price are appended when present.

use chrono::{Datelike, NaiveDate};

use matrix_core::config::NamingConfig;
use matrix_core::{CampaignMetadata, Offer};

/// Replace underscores with spaces and trim.
pub fn clean_value(value: &str) -> String {
    value.replace('_', " ").trim().to_string()
}

/// Leading token of a size label, up to its first space.
pub fn size_code(size_label: &str) -> &str {
    size_label.split(' ').next().unwrap_or(size_label)
}

/// `Mar.10.2025` style date.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b.%d.%Y").to_string()
}

/// The per-tuple fields that vary inside a matrix.
#[derive(Debug, Clone, Copy)]
pub struct NameParts<'a> {
    pub funnel: &'a str,
    pub offer: &'a Offer,
    pub region: &'a str,
    pub language: &'a str,
    pub duration: &'a str,
    pub size_label: &'a str,
}

/// Builds creative names for one campaign.
#[derive(Debug, Clone)]
pub struct CreativeNamer {
    delimiter: String,
    campaign_delimiter: String,
}

impl CreativeNamer {
    pub fn new(config: &NamingConfig) -> Self {
        Self {
            delimiter: config.delimiter.clone(),
            campaign_delimiter: config.campaign_delimiter.clone(),
        }
    }

    /// Deterministic name for one tuple.
    pub fn name(&self, meta: &CampaignMetadata, parts: NameParts<'_>) -> String {
        let full_campaign = [
            meta.campaign_title.as_str(),
            parts.funnel,
            parts.region,
            parts.language,
        ]
        .join(self.campaign_delimiter.as_str());

        let mut segments = vec![
            meta.start_date.year().to_string(),
            meta.client_code.clone(),
            meta.product_code.clone(),
            parts.language.to_string(),
            clean_value(&full_campaign),
            clean_value(&parts.offer.name),
            size_code(parts.size_label).to_string(),
            format_date(meta.start_date),
            clean_value(parts.duration),
        ];

        if !meta.custom_suffix.is_empty() {
            segments.push(clean_value(&meta.custom_suffix));
        }
        if !parts.offer.price.is_empty() {
            segments.push(clean_value(&parts.offer.price));
        }

        segments.join(self.delimiter.as_str())
    }
}

impl Default for CreativeNamer {
    fn default() -> Self {
        Self::new(&NamingConfig::default())
    }
}
