//! Projected asset count shown before generation.
//!
//! The total is a plain product of the selection counts. It does not apply
//! the region/language rule, so it can overstate the rows actually produced.

use serde::Serialize;

use matrix_core::MatrixRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AssetProjection {
    pub funnels: usize,
    pub messages: usize,
    pub regions: usize,
    pub languages: usize,
    pub durations: usize,
    pub sizes: usize,
    pub total: u64,
}

impl AssetProjection {
    pub fn from_counts(
        funnels: usize,
        messages: usize,
        regions: usize,
        languages: usize,
        durations: usize,
        sizes: usize,
    ) -> Self {
        let total = [funnels, messages, regions, languages, durations, sizes]
            .iter()
            .fold(1u64, |acc, &n| acc.saturating_mul(n as u64));
        Self {
            funnels,
            messages,
            regions,
            languages,
            durations,
            sizes,
            total,
        }
    }

    /// Factor-by-factor description of the total.
    pub fn breakdown(&self) -> String {
        format!(
            "{} funnels × {} messages × {} regions × {} languages × {} durations × {} sizes",
            self.funnels, self.messages, self.regions, self.languages, self.durations, self.sizes
        )
    }

    /// Some dimension has nothing selected.
    pub fn is_warning(&self) -> bool {
        self.total == 0
    }
}

/// Project the asset count for the current selections.
pub fn project_assets(request: &MatrixRequest) -> AssetProjection {
    AssetProjection::from_counts(
        request.funnels.len(),
        request.usable_offers().len(),
        request.regions.len(),
        request.languages.len(),
        request.durations.len(),
        request.sizes.len(),
    )
}
