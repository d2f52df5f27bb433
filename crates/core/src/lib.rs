//! Shared domain model for the creative asset matrix: dimensions, offers,
//! campaign metadata, flat and pivoted rows, static catalogs and configuration.

pub mod catalog;
pub mod config;
pub mod error;
pub mod types;

pub use catalog::{LineOfBusiness, LobCodes, MatrixType, Platform};
pub use config::AppConfig;
pub use error::{MatrixError, MatrixOutcome};
pub use types::{
    is_reserved_column, CampaignMetadata, Dimension, FlatRow, MatrixRequest, MatrixResult,
    MatrixSummary, Offer, PivotKey, PivotRow,
};
