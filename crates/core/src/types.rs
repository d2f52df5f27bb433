use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{LineOfBusiness, MatrixType};

/// Fixed leading columns of every pivoted row.
pub const KEY_COLUMNS: [&str; 5] = ["FUNNEL", "MESSAGING", "REGION", "LANGUAGE", "DURATION"];

/// Fixed trailing columns of every pivoted row.
pub const TRAILING_COLUMNS: [&str; 4] = ["DELIVERY DATE", "START DATE", "END DATE", "URL"];

/// True when `name` collides with a fixed column header, ignoring case.
pub fn is_reserved_column(name: &str) -> bool {
    let name = name.trim();
    KEY_COLUMNS
        .iter()
        .chain(TRAILING_COLUMNS.iter())
        .any(|c| c.eq_ignore_ascii_case(name))
}

/// The dimensions crossed to build a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Funnel,
    Messaging,
    Region,
    Language,
    Duration,
    Size,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::Funnel => "funnels",
            Dimension::Messaging => "offers",
            Dimension::Region => "regions",
            Dimension::Language => "languages",
            Dimension::Duration => "durations",
            Dimension::Size => "sizes",
        };
        f.write_str(name)
    }
}

/// A messaging offer. The price is free text and may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub name: String,
    #[serde(default)]
    pub price: String,
}

impl Offer {
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            price: price.into().trim().to_string(),
        }
    }

    /// Offers without a name never take part in generation.
    pub fn is_usable(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// Campaign-level fields shared by every creative in a matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignMetadata {
    #[serde(default)]
    pub campaign_title: String,
    #[serde(default)]
    pub client_code: String,
    #[serde(default)]
    pub product_code: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub delivery_date: NaiveDate,
    #[serde(default)]
    pub custom_suffix: String,
}

impl CampaignMetadata {
    /// Metadata for a line of business with the planner's default dates:
    /// start and delivery today, end two months out.
    pub fn for_line_of_business(
        lob: LineOfBusiness,
        campaign_title: impl Into<String>,
        today: NaiveDate,
    ) -> Self {
        let codes = lob.codes();
        Self {
            campaign_title: campaign_title.into(),
            client_code: codes.client.to_string(),
            product_code: codes.product.to_string(),
            start_date: today,
            end_date: default_end_date(today),
            delivery_date: today,
            custom_suffix: String::new(),
        }
    }

    /// Overwrite the client/product codes from a line of business.
    pub fn apply_line_of_business(&mut self, lob: LineOfBusiness) {
        let codes = lob.codes();
        self.client_code = codes.client.to_string();
        self.product_code = codes.product.to_string();
    }
}

/// Two calendar months after `start`, clamped to the end of the month.
pub fn default_end_date(start: NaiveDate) -> NaiveDate {
    start.checked_add_months(Months::new(2)).unwrap_or(start)
}

/// Everything the generator needs for one matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixRequest {
    #[serde(default)]
    pub matrix_type: MatrixType,
    pub funnels: Vec<String>,
    pub offers: Vec<Offer>,
    pub regions: Vec<String>,
    pub languages: Vec<String>,
    pub durations: Vec<String>,
    pub sizes: Vec<String>,
    pub meta: CampaignMetadata,
}

impl MatrixRequest {
    /// Offers with a non-empty name, trimmed.
    pub fn usable_offers(&self) -> Vec<Offer> {
        self.offers
            .iter()
            .filter(|o| o.is_usable())
            .map(|o| Offer::new(o.name.as_str(), o.price.as_str()))
            .collect()
    }

    /// Drop repeated values from every selection, keeping first occurrences.
    /// Returns how many entries were removed.
    pub fn dedup_selections(&mut self) -> usize {
        let before = self.selection_total();
        for values in [
            &mut self.funnels,
            &mut self.regions,
            &mut self.languages,
            &mut self.durations,
            &mut self.sizes,
        ] {
            dedup_in_order(values);
        }
        dedup_in_order(&mut self.offers);
        before - self.selection_total()
    }

    fn selection_total(&self) -> usize {
        self.funnels.len()
            + self.offers.len()
            + self.regions.len()
            + self.languages.len()
            + self.durations.len()
            + self.sizes.len()
    }

    pub fn selection_count(&self, dimension: Dimension) -> usize {
        match dimension {
            Dimension::Funnel => self.funnels.len(),
            Dimension::Messaging => self.usable_offers().len(),
            Dimension::Region => self.regions.len(),
            Dimension::Language => self.languages.len(),
            Dimension::Duration => self.durations.len(),
            Dimension::Size => self.sizes.len(),
        }
    }
}

fn dedup_in_order<T: PartialEq>(values: &mut Vec<T>) {
    let mut kept: Vec<T> = Vec::with_capacity(values.len());
    for value in values.drain(..) {
        if !kept.contains(&value) {
            kept.push(value);
        }
    }
    *values = kept;
}

/// One enumerated (funnel, offer, region, language, duration, size) tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRow {
    pub funnel: String,
    pub messaging: String,
    pub region: String,
    pub language: String,
    pub duration: String,
    pub size_label: String,
    pub creative_name: String,
}

impl FlatRow {
    pub fn key(&self) -> PivotKey {
        PivotKey {
            funnel: self.funnel.clone(),
            messaging: self.messaging.clone(),
            region: self.region.clone(),
            language: self.language.clone(),
            duration: self.duration.clone(),
        }
    }
}

/// The non-size dimensions identifying a pivoted row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PivotKey {
    pub funnel: String,
    pub messaging: String,
    pub region: String,
    pub language: String,
    pub duration: String,
}

/// A wide row: one creative name per size label, plus the schedule fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotRow {
    pub key: PivotKey,
    /// Size label → creative name.
    pub creatives: BTreeMap<String, String>,
    pub delivery_date: String,
    pub start_date: String,
    pub end_date: String,
    /// Filled in by hand after generation.
    pub url: String,
}

impl PivotRow {
    pub fn new(key: PivotKey) -> Self {
        Self {
            key,
            creatives: BTreeMap::new(),
            delivery_date: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            url: String::new(),
        }
    }

    /// Value of a named column. Fixed columns take precedence over a size
    /// label with the same text.
    pub fn field(&self, column: &str) -> Option<&str> {
        match column {
            "FUNNEL" => Some(&self.key.funnel),
            "MESSAGING" => Some(&self.key.messaging),
            "REGION" => Some(&self.key.region),
            "LANGUAGE" => Some(&self.key.language),
            "DURATION" => Some(&self.key.duration),
            "DELIVERY DATE" => Some(&self.delivery_date),
            "START DATE" => Some(&self.start_date),
            "END DATE" => Some(&self.end_date),
            "URL" => Some(&self.url),
            size => self.creatives.get(size).map(String::as_str),
        }
    }
}

/// A generated asset matrix. Replaced wholesale on regeneration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixResult {
    pub id: Uuid,
    pub matrix_type: MatrixType,
    pub rows: Vec<PivotRow>,
    /// Distinct size labels across all rows, ascending.
    pub size_columns: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl MatrixResult {
    /// Key columns, sorted size columns, then the schedule columns.
    pub fn columns(&self) -> Vec<String> {
        KEY_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(self.size_columns.iter().cloned())
            .chain(TRAILING_COLUMNS.iter().map(|c| c.to_string()))
            .collect()
    }

    pub fn summary(&self) -> MatrixSummary {
        MatrixSummary {
            matrix_type: self.matrix_type,
            total_rows: self.rows.len(),
            size_columns: self.size_columns.len(),
        }
    }
}

/// Headline figures shown after generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatrixSummary {
    pub matrix_type: MatrixType,
    pub total_rows: usize,
    pub size_columns: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_end_date_clamps() {
        assert_eq!(default_end_date(date(2025, 3, 10)), date(2025, 5, 10));
        assert_eq!(default_end_date(date(2025, 12, 31)), date(2026, 2, 28));
    }

    #[test]
    fn test_metadata_from_lob() {
        let meta =
            CampaignMetadata::for_line_of_business(LineOfBusiness::RogersBank, "Spring", date(2025, 1, 15));
        assert_eq!(meta.client_code, "RBG");
        assert_eq!(meta.product_code, "RBK");
        assert_eq!(meta.start_date, meta.delivery_date);
        assert_eq!(meta.end_date, date(2025, 3, 15));
    }

    #[test]
    fn test_usable_offers_filters_blank_names() {
        let request = MatrixRequest {
            matrix_type: MatrixType::Display,
            funnels: vec![],
            offers: vec![Offer::new("  Save Big ", " $65 "), Offer::new("   ", "$10")],
            regions: vec![],
            languages: vec![],
            durations: vec![],
            sizes: vec![],
            meta: CampaignMetadata::for_line_of_business(
                LineOfBusiness::ConnectedHome,
                "",
                date(2025, 1, 1),
            ),
        };
        let offers = request.usable_offers();
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].name, "Save Big");
        assert_eq!(offers[0].price, "$65");
        assert_eq!(request.selection_count(Dimension::Messaging), 1);
    }

    #[test]
    fn test_dedup_selections_keeps_first_occurrence() {
        let mut request = MatrixRequest {
            matrix_type: MatrixType::Display,
            funnels: vec!["AWR".into(), "CON".into(), "AWR".into()],
            offers: vec![Offer::new("Save", "$5"), Offer::new("Save", "$5"), Offer::new("Save", "$9")],
            regions: vec!["ON".into(), "ON".into()],
            languages: vec!["EN".into()],
            durations: vec!["15s".into(), "15s".into()],
            sizes: vec!["300x250".into()],
            meta: CampaignMetadata::for_line_of_business(
                LineOfBusiness::ConnectedHome,
                "",
                date(2025, 1, 1),
            ),
        };
        assert_eq!(request.dedup_selections(), 4);
        assert_eq!(request.funnels, vec!["AWR".to_string(), "CON".to_string()]);
        assert_eq!(request.regions, vec!["ON".to_string()]);
        assert_eq!(request.durations, vec!["15s".to_string()]);
        assert_eq!(request.offers.len(), 2);
        assert_eq!(request.dedup_selections(), 0);
    }

    #[test]
    fn test_reserved_columns() {
        assert!(is_reserved_column("URL"));
        assert!(is_reserved_column(" url "));
        assert!(is_reserved_column("Delivery Date"));
        assert!(!is_reserved_column("300x250"));
    }

    #[test]
    fn test_pivot_row_field_lookup() {
        let mut row = PivotRow::new(PivotKey {
            funnel: "AWR".into(),
            messaging: "Save".into(),
            region: "ON".into(),
            language: "EN".into(),
            duration: "15s".into(),
        });
        row.creatives.insert("300x250".into(), "name-a".into());
        assert_eq!(row.field("FUNNEL"), Some("AWR"));
        assert_eq!(row.field("300x250"), Some("name-a"));
        assert_eq!(row.field("728x90"), None);
        assert_eq!(row.field("URL"), Some(""));
    }
}
