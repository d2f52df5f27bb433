use chrono::NaiveDate;

use matrix_core::{LineOfBusiness, MatrixType};

/// `Asset_Matrix_<lob>_<type>_<YYYYMMDD>.csv`, spaces in the line of
/// business replaced by underscores.
pub fn export_filename(lob: LineOfBusiness, matrix_type: MatrixType, today: NaiveDate) -> String {
    format!(
        "Asset_Matrix_{}_{}_{}.csv",
        lob.display_name().replace(' ', "_"),
        matrix_type.label(),
        today.format("%Y%m%d")
    )
}
