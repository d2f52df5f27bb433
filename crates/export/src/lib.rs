//! Output formats for a generated asset matrix: table view, CSV, TSV and
//! JSON, plus the download filename convention.

pub mod delimited;
pub mod filename;
pub mod json;
pub mod table;

pub use delimited::{to_csv, to_tsv};
pub use filename::export_filename;
pub use json::to_json;
pub use table::TableView;
