//! Editable option lists feeding the generator: per-dimension option sets with
//! custom values, and the offer sheet.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use matrix_core::types::{KEY_COLUMNS, TRAILING_COLUMNS};
use matrix_core::Offer;

/// Available values for one dimension and which of them are selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSet {
    available: Vec<String>,
    selected: Vec<String>,
    /// Names `add_custom` refuses, compared case-insensitively.
    #[serde(default)]
    reserved: Vec<String>,
}

impl OptionSet {
    /// A set offering `available`, none selected.
    pub fn new<I, S>(available: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for value in available {
            let value = value.into();
            if !set.contains(&value) {
                set.available.push(value);
            }
        }
        set
    }

    /// Refuse these names as custom values.
    pub fn with_reserved<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved.extend(names.into_iter().map(|n| n.into().to_lowercase()));
        self
    }

    /// Size options: custom sizes may not shadow a fixed column header.
    pub fn for_sizes<I, S>(available: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(available).with_reserved(KEY_COLUMNS.into_iter().chain(TRAILING_COLUMNS))
    }

    pub fn available(&self) -> &[String] {
        &self.available
    }

    /// Selected values, in the order they are offered.
    pub fn selected(&self) -> Vec<String> {
        self.available
            .iter()
            .filter(|v| self.selected.contains(v))
            .cloned()
            .collect()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Case-insensitive membership.
    pub fn contains(&self, value: &str) -> bool {
        let wanted = value.to_lowercase();
        self.available.iter().any(|v| v.to_lowercase() == wanted)
    }

    /// Tick or untick an offered value. Unknown values are ignored.
    pub fn set_selected(&mut self, value: &str, on: bool) {
        let Some(known) = self.available.iter().find(|v| v.as_str() == value) else {
            return;
        };
        let is_on = self.selected.iter().any(|v| v == known);
        if on && !is_on {
            self.selected.push(known.clone());
        } else if !on && is_on {
            self.selected.retain(|v| v != value);
        }
    }

    pub fn select_all(&mut self) {
        self.selected = self.available.clone();
    }

    /// Add a user-supplied value, ticked. Blank input, reserved names and
    /// values matching an existing one case-insensitively are ignored.
    /// Returns whether the set changed.
    pub fn add_custom(&mut self, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return false;
        }
        if self.reserved.contains(&value.to_lowercase()) {
            warn!(value, "custom option matches a reserved name, ignored");
            return false;
        }
        if self.contains(value) {
            debug!(value, "ignoring duplicate custom option");
            return false;
        }
        self.available.push(value.to_string());
        self.selected.push(value.to_string());
        true
    }
}

/// One editable offer row as typed by the planner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferRow {
    pub name: String,
    pub price: String,
}

/// The offer editor. Always keeps at least one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferSheet {
    rows: Vec<OfferRow>,
}

impl OfferSheet {
    pub fn new() -> Self {
        Self {
            rows: vec![OfferRow::default()],
        }
    }

    pub fn rows(&self) -> &[OfferRow] {
        &self.rows
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut OfferRow> {
        self.rows.get_mut(index)
    }

    /// Append an empty row and return its index.
    pub fn add_row(&mut self) -> usize {
        self.rows.push(OfferRow::default());
        self.rows.len() - 1
    }

    /// Append a filled row and return its index.
    pub fn push(&mut self, name: impl Into<String>, price: impl Into<String>) -> usize {
        let index = self.add_row();
        self.rows[index] = OfferRow {
            name: name.into(),
            price: price.into(),
        };
        index
    }

    /// Remove a row. The last remaining row cannot be removed.
    pub fn remove_row(&mut self, index: usize) -> bool {
        if self.rows.len() <= 1 || index >= self.rows.len() {
            return false;
        }
        self.rows.remove(index);
        true
    }

    /// Rows with a non-blank name, trimmed.
    pub fn offers(&self) -> Vec<Offer> {
        self.rows
            .iter()
            .map(|row| Offer::new(row.name.as_str(), row.price.as_str()))
            .filter(Offer::is_usable)
            .collect()
    }
}

impl Default for OfferSheet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_custom_is_case_insensitive() {
        let mut durations = OptionSet::new(["6s", "15s", "30s"]);
        assert!(!durations.add_custom("15S"));
        assert!(!durations.add_custom("   "));
        assert_eq!(durations.available().len(), 3);

        assert!(durations.add_custom(" 60s "));
        assert_eq!(durations.available().len(), 4);
        assert_eq!(durations.selected(), vec!["60s".to_string()]);
        assert!(!durations.add_custom("60S"));
        assert_eq!(durations.available().len(), 4);
    }

    #[test]
    fn test_custom_size_cannot_shadow_fixed_column() {
        let mut sizes = OptionSet::for_sizes(["300x250", "728x90"]);
        assert!(!sizes.add_custom("URL"));
        assert!(!sizes.add_custom("funnel"));
        assert!(!sizes.add_custom(" End Date "));
        assert_eq!(sizes.available().len(), 2);
        assert!(sizes.selected().is_empty());

        assert!(sizes.add_custom("URL Banner"));
        assert_eq!(sizes.selected(), vec!["URL Banner".to_string()]);
    }

    #[test]
    fn test_selection_keeps_offered_order() {
        let mut regions = OptionSet::new(["ON", "QC", "BC"]);
        regions.set_selected("BC", true);
        regions.set_selected("ON", true);
        regions.set_selected("XX", true);
        assert_eq!(regions.selected(), vec!["ON".to_string(), "BC".to_string()]);

        regions.set_selected("ON", false);
        assert_eq!(regions.selected_count(), 1);

        regions.select_all();
        assert_eq!(regions.selected_count(), 3);
    }

    #[test]
    fn test_offer_sheet_keeps_one_row() {
        let mut sheet = OfferSheet::new();
        assert!(!sheet.remove_row(0));
        assert_eq!(sheet.rows().len(), 1);

        sheet.add_row();
        assert!(sheet.remove_row(1));
        assert!(!sheet.remove_row(0));
    }

    #[test]
    fn test_offer_sheet_skips_blank_names() {
        let mut sheet = OfferSheet::new();
        if let Some(row) = sheet.row_mut(0) {
            row.name = "  ".into();
            row.price = "$10".into();
        }
        sheet.push(" Save Big ", " $65 ");
        sheet.push("Bundle", "");

        let offers = sheet.offers();
        assert_eq!(offers.len(), 2);
        assert_eq!(offers[0], Offer::new("Save Big", "$65"));
        assert_eq!(offers[1].price, "");
    }
}
