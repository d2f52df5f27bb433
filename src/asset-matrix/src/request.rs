//! Turns command-line selections into a `MatrixRequest`.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::Args;
use tracing::{debug, warn};

use matrix_core::catalog::STOCK_DURATIONS;
use matrix_core::types::default_end_date;
use matrix_core::{
    is_reserved_column, CampaignMetadata, LineOfBusiness, MatrixRequest, MatrixType, Platform,
};
use matrix_generator::{resolve_sizes, OfferSheet, OptionSet, SizeCatalog};

#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// JSON request file used as the starting point; flags below override it
    #[arg(long)]
    pub request: Option<PathBuf>,

    /// Line of business, e.g. "Connected Home" [default: Connected Home]
    #[arg(long)]
    pub lob: Option<String>,

    /// Matrix type: display or social [default: display]
    #[arg(long)]
    pub matrix_type: Option<String>,

    /// Platform for social matrices (repeatable)
    #[arg(long = "platform")]
    pub platforms: Vec<String>,

    /// Funnel stage (repeatable)
    #[arg(long = "funnel")]
    pub funnels: Vec<String>,

    /// Region code (repeatable)
    #[arg(long = "region")]
    pub regions: Vec<String>,

    /// Language code (repeatable)
    #[arg(long = "language")]
    pub languages: Vec<String>,

    /// Duration; values not in the stock list are added as custom (repeatable)
    #[arg(long = "duration")]
    pub durations: Vec<String>,

    /// Size label; values not in the catalog are added as custom (repeatable)
    #[arg(long = "size")]
    pub sizes: Vec<String>,

    /// Select every size the catalog offers
    #[arg(long, default_value_t = false)]
    pub all_sizes: bool,

    /// Offer as NAME or NAME=PRICE (repeatable)
    #[arg(long = "offer")]
    pub offers: Vec<String>,

    /// Campaign title
    #[arg(long)]
    pub title: Option<String>,

    /// Start date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// End date (YYYY-MM-DD), defaults to two months after today
    #[arg(long)]
    pub end_date: Option<NaiveDate>,

    /// Delivery date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub delivery_date: Option<NaiveDate>,

    /// Extra segment appended to every creative name
    #[arg(long)]
    pub suffix: Option<String>,
}

impl SelectionArgs {
    /// The `--lob` flag, if given.
    pub fn line_of_business(&self) -> Result<Option<LineOfBusiness>> {
        Ok(self
            .lob
            .as_deref()
            .map(str::parse::<LineOfBusiness>)
            .transpose()?)
    }

    /// The `--matrix-type` flag, if given.
    pub fn matrix_type(&self) -> Result<Option<MatrixType>> {
        Ok(self
            .matrix_type
            .as_deref()
            .map(str::parse::<MatrixType>)
            .transpose()?)
    }

    /// Line of business naming an export: the `--lob` flag, else the one
    /// whose codes the request carries.
    pub fn export_line_of_business(&self, meta: &CampaignMetadata) -> Result<LineOfBusiness> {
        if let Some(lob) = self.line_of_business()? {
            return Ok(lob);
        }
        LineOfBusiness::from_codes(&meta.client_code, &meta.product_code).ok_or_else(|| {
            anyhow!(
                "codes {}/{} match no line of business; pass --lob to name the export",
                meta.client_code,
                meta.product_code
            )
        })
    }

    pub fn platforms(&self) -> Result<Vec<Platform>> {
        self.platforms
            .iter()
            .map(|p| p.parse::<Platform>().map_err(Into::into))
            .collect()
    }

    pub fn size_catalog(&self, matrix_type: MatrixType, fallback_size: &str) -> Result<SizeCatalog> {
        Ok(resolve_sizes(matrix_type, &self.platforms()?, fallback_size))
    }

    /// Assemble the request: base file (if any), then flags on top.
    pub fn build(&self, fallback_size: &str, today: NaiveDate) -> Result<MatrixRequest> {
        let lob = self.line_of_business()?;

        let mut request = match &self.request {
            Some(path) => load_request(path)?,
            None => MatrixRequest {
                matrix_type: MatrixType::default(),
                funnels: Vec::new(),
                offers: Vec::new(),
                regions: Vec::new(),
                languages: Vec::new(),
                durations: Vec::new(),
                sizes: Vec::new(),
                meta: CampaignMetadata::for_line_of_business(
                    lob.unwrap_or(LineOfBusiness::ConnectedHome),
                    "",
                    today,
                ),
            },
        };

        if let Some(matrix_type) = self.matrix_type()? {
            request.matrix_type = matrix_type;
        }
        if let Some(lob) = lob {
            request.meta.apply_line_of_business(lob);
        }

        replace_if_given(&mut request.funnels, &self.funnels);
        replace_if_given(&mut request.regions, &self.regions);
        replace_if_given(&mut request.languages, &self.languages);

        if !self.durations.is_empty() {
            request.durations = self.duration_options().selected();
        }
        if !self.sizes.is_empty() || self.all_sizes || request.sizes.is_empty() {
            request.sizes = self
                .size_options(request.matrix_type, fallback_size)?
                .selected();
        }
        if !self.offers.is_empty() {
            request.offers = self.offer_sheet().offers();
        }

        if let Some(title) = &self.title {
            request.meta.campaign_title = title.clone();
        }
        if let Some(start) = self.start_date {
            request.meta.start_date = start;
            if self.end_date.is_none() && self.request.is_none() {
                request.meta.end_date = default_end_date(start);
            }
        }
        if let Some(end) = self.end_date {
            request.meta.end_date = end;
        }
        if let Some(delivery) = self.delivery_date {
            request.meta.delivery_date = delivery;
        }
        if let Some(suffix) = &self.suffix {
            request.meta.custom_suffix = suffix.trim().to_string();
        }

        request.sizes.retain(|size| {
            let reserved = is_reserved_column(size);
            if reserved {
                warn!(size = %size, "size matches a fixed column name, dropped");
            }
            !reserved
        });
        let removed = request.dedup_selections();
        if removed > 0 {
            debug!(removed, "repeated selections collapsed");
        }

        Ok(request)
    }

    fn duration_options(&self) -> OptionSet {
        let mut options = OptionSet::new(STOCK_DURATIONS.iter().copied());
        select_or_add(&mut options, &self.durations);
        options
    }

    fn size_options(&self, matrix_type: MatrixType, fallback_size: &str) -> Result<OptionSet> {
        let catalog = self.size_catalog(matrix_type, fallback_size)?;
        let mut options = OptionSet::for_sizes(catalog.sizes.iter().cloned());

        if self.all_sizes {
            options.select_all();
        } else if self.sizes.is_empty() {
            for size in catalog.default_selection() {
                options.set_selected(&size, true);
            }
        }
        select_or_add(&mut options, &self.sizes);
        Ok(options)
    }

    fn offer_sheet(&self) -> OfferSheet {
        let mut sheet = OfferSheet::new();
        for raw in &self.offers {
            let (name, price) = raw.split_once('=').unwrap_or((raw.as_str(), ""));
            sheet.push(name, price);
        }
        sheet
    }
}

fn load_request(path: &Path) -> Result<MatrixRequest> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading request file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing request file {}", path.display()))
}

fn replace_if_given(target: &mut Vec<String>, given: &[String]) {
    if !given.is_empty() {
        *target = given.iter().map(|v| v.trim().to_string()).collect();
    }
}

/// Tick offered values; anything else goes in as a custom value.
fn select_or_add(options: &mut OptionSet, values: &[String]) {
    for value in values {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        if options.available().iter().any(|v| v == value) {
            options.set_selected(value, true);
        } else if !options.add_custom(value) {
            warn!(value, "custom value duplicates an existing option, ignored");
        }
    }
}
