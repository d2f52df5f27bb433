use serde_json::{Map, Value};

use matrix_core::{MatrixOutcome, MatrixResult};

use crate::table::TableView;

/// One JSON object per row keyed by column name, every column present.
pub fn to_json(result: &MatrixResult) -> MatrixOutcome<String> {
    let view = TableView::from_result(result);
    let records: Vec<Map<String, Value>> = view
        .rows
        .iter()
        .map(|row| {
            view.columns
                .iter()
                .zip(row)
                .map(|(col, val)| (col.clone(), Value::String(val.clone())))
                .collect()
        })
        .collect();
    Ok(serde_json::to_string_pretty(&records)?)
}
