//! Size catalog resolution: which size labels a matrix type makes available.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use matrix_core::{MatrixType, Platform};

/// Resolved size labels for one matrix type and platform selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizeCatalog {
    pub matrix_type: MatrixType,
    /// Sorted ascending, deduplicated, fallback included.
    pub sizes: Vec<String>,
    /// Distinct sizes contributed by the catalog branch, before the fallback.
    pub catalog_count: usize,
}

impl SizeCatalog {
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Human-readable note on where the sizes came from.
    pub fn message(&self) -> String {
        match self.matrix_type {
            MatrixType::Social => {
                format!("{} sizes available from selected platforms", self.catalog_count)
            }
            MatrixType::Display => {
                format!("{} standard display sizes available", self.catalog_count)
            }
        }
    }

    /// Sizes ticked by default: social matrices start with every size except
    /// the widescreen ones; display matrices start empty.
    pub fn default_selection(&self) -> Vec<String> {
        match self.matrix_type {
            MatrixType::Social => self
                .sizes
                .iter()
                .filter(|s| !s.contains("16x9"))
                .cloned()
                .collect(),
            MatrixType::Display => Vec::new(),
        }
    }
}

/// Resolve the eligible sizes. Platform-based matrices union the sizes of the
/// selected platforms; standard ones use the display catalog and ignore the
/// platforms. The fallback size is always included.
pub fn resolve_sizes(
    matrix_type: MatrixType,
    platforms: &[Platform],
    fallback_size: &str,
) -> SizeCatalog {
    let mut sizes: BTreeSet<String> = if matrix_type.is_platform_based() {
        platforms
            .iter()
            .flat_map(|p| p.sizes().iter())
            .map(|s| s.to_string())
            .collect()
    } else {
        Platform::Display.sizes().iter().map(|s| s.to_string()).collect()
    };
    let catalog_count = sizes.len();

    sizes.insert(fallback_size.to_string());

    debug!(
        matrix_type = %matrix_type,
        platforms = platforms.len(),
        sizes = sizes.len(),
        "resolved size catalog"
    );

    SizeCatalog {
        matrix_type,
        sizes: sizes.into_iter().collect(),
        catalog_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_ignores_platforms() {
        let catalog = resolve_sizes(MatrixType::Display, &[Platform::Meta], "16x9");
        assert_eq!(
            catalog.sizes,
            vec!["160x600", "16x9", "300x250", "300x600", "728x90", "970x250"]
        );
        assert_eq!(catalog.catalog_count, 5);
        assert_eq!(catalog.message(), "5 standard display sizes available");
        assert!(catalog.default_selection().is_empty());
    }

    #[test]
    fn test_social_unions_platforms() {
        let catalog = resolve_sizes(
            MatrixType::Social,
            &[Platform::Meta, Platform::Reddit, Platform::Meta],
            "16x9",
        );
        assert_eq!(catalog.len(), 7);
        assert_eq!(catalog.sizes.first().map(String::as_str), Some("16x9"));
        assert!(catalog.sizes.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(catalog.message(), "6 sizes available from selected platforms");

        let selected = catalog.default_selection();
        assert!(!selected.iter().any(|s| s.contains("16x9")));
        assert_eq!(selected.len(), 5);
    }

    #[test]
    fn test_social_without_platforms_yields_fallback() {
        let catalog = resolve_sizes(MatrixType::Social, &[], "16x9");
        assert_eq!(catalog.sizes, vec!["16x9"]);
        assert_eq!(catalog.catalog_count, 0);
    }

    #[test]
    fn test_ordinal_sort_is_case_sensitive() {
        let catalog = resolve_sizes(MatrixType::Social, &[Platform::Pinterest], "Square");
        assert_eq!(catalog.sizes.last().map(String::as_str), Some("Square"));
        assert_eq!(catalog.sizes[0], "1x1 Pinterest");
    }
}
