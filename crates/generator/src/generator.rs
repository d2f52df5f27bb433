use std::collections::{BTreeSet, HashMap};
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use matrix_core::config::LanguageRuleConfig;
use matrix_core::{
    AppConfig, CampaignMetadata, Dimension, FlatRow, MatrixError, MatrixOutcome, MatrixRequest,
    MatrixResult, MatrixType, PivotKey, PivotRow,
};

use crate::naming::{format_date, CreativeNamer, NameParts};

/// Which languages a region may be produced in.
#[derive(Debug, Clone)]
pub struct LanguageRule {
    bilingual_region: String,
    default_language: String,
}

impl LanguageRule {
    pub fn new(config: &LanguageRuleConfig) -> Self {
        Self {
            bilingual_region: config.bilingual_region.clone(),
            default_language: config.default_language.clone(),
        }
    }

    /// The bilingual region gets every selected language; any other region
    /// only the default language, if it was selected at all.
    pub fn eligible<'a>(&self, region: &str, languages: &'a [String]) -> Vec<&'a String> {
        if region == self.bilingual_region {
            languages.iter().collect()
        } else {
            languages
                .iter()
                .filter(|l| **l == self.default_language)
                .collect()
        }
    }
}

impl Default for LanguageRule {
    fn default() -> Self {
        Self::new(&LanguageRuleConfig::default())
    }
}

/// Enumerates the campaign cross-product and pivots it into the asset matrix.
#[derive(Debug, Clone, Default)]
pub struct MatrixGenerator {
    namer: CreativeNamer,
    language_rule: LanguageRule,
}

impl MatrixGenerator {
    pub fn new(namer: CreativeNamer, language_rule: LanguageRule) -> Self {
        Self {
            namer,
            language_rule,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            CreativeNamer::new(&config.naming),
            LanguageRule::new(&config.languages),
        )
    }

    /// Every dimension needs at least one selection.
    pub fn validate(&self, request: &MatrixRequest) -> MatrixOutcome<()> {
        let dimensions = [
            Dimension::Funnel,
            Dimension::Region,
            Dimension::Language,
            Dimension::Duration,
            Dimension::Size,
            Dimension::Messaging,
        ];
        match dimensions
            .into_iter()
            .find(|d| request.selection_count(*d) == 0)
        {
            Some(empty) => Err(MatrixError::EmptyDimension(empty)),
            None => Ok(()),
        }
    }

    /// Validate, enumerate and pivot in one step.
    pub fn generate(&self, request: &MatrixRequest) -> MatrixOutcome<MatrixResult> {
        let start = Instant::now();
        self.validate(request)?;

        let flat = self.enumerate(request);
        let result = self.pivot(&flat, &request.meta, request.matrix_type);

        info!(
            matrix_type = %result.matrix_type,
            flat_rows = flat.len(),
            rows = result.rows.len(),
            size_columns = result.size_columns.len(),
            latency_us = start.elapsed().as_micros() as u64,
            "asset matrix generated"
        );
        Ok(result)
    }

    /// Walk funnel → offer → region → language → duration → size and name
    /// every surviving tuple. Regions with no eligible language are skipped.
    pub fn enumerate(&self, request: &MatrixRequest) -> Vec<FlatRow> {
        let offers = request.usable_offers();
        let mut flat = Vec::new();

        for funnel in &request.funnels {
            for offer in &offers {
                for region in &request.regions {
                    let languages = self.language_rule.eligible(region, &request.languages);
                    if languages.is_empty() {
                        debug!(region = %region, "no eligible language, skipping region");
                        continue;
                    }

                    for language in languages {
                        for duration in &request.durations {
                            for size in &request.sizes {
                                let creative_name = self.namer.name(
                                    &request.meta,
                                    NameParts {
                                        funnel,
                                        offer,
                                        region,
                                        language,
                                        duration,
                                        size_label: size,
                                    },
                                );
                                flat.push(FlatRow {
                                    funnel: funnel.clone(),
                                    messaging: offer.name.clone(),
                                    region: region.clone(),
                                    language: language.clone(),
                                    duration: duration.clone(),
                                    size_label: size.clone(),
                                    creative_name,
                                });
                            }
                        }
                    }
                }
            }
        }

        flat
    }

    /// Group flat rows by their non-size key, one column per size label.
    ///
    /// Rows keep the order in which their key first appeared. Should two flat
    /// rows share a key and size label the later name wins; enumeration never
    /// produces that.
    pub fn pivot(
        &self,
        flat: &[FlatRow],
        meta: &CampaignMetadata,
        matrix_type: MatrixType,
    ) -> MatrixResult {
        let mut rows: Vec<PivotRow> = Vec::new();
        let mut index: HashMap<PivotKey, usize> = HashMap::new();
        let mut sizes: BTreeSet<&str> = BTreeSet::new();

        for row in flat {
            let key = row.key();
            let slot = match index.get(&key) {
                Some(&slot) => slot,
                None => {
                    rows.push(PivotRow::new(key.clone()));
                    index.insert(key, rows.len() - 1);
                    rows.len() - 1
                }
            };
            rows[slot]
                .creatives
                .insert(row.size_label.clone(), row.creative_name.clone());
            sizes.insert(&row.size_label);
        }

        let delivery = format_date(meta.delivery_date);
        let start = format_date(meta.start_date);
        let end = format_date(meta.end_date);
        for row in &mut rows {
            row.delivery_date = delivery.clone();
            row.start_date = start.clone();
            row.end_date = end.clone();
            row.url = String::new();
        }

        MatrixResult {
            id: Uuid::new_v4(),
            matrix_type,
            rows,
            size_columns: sizes.into_iter().map(str::to_string).collect(),
            generated_at: Utc::now(),
        }
    }
}
