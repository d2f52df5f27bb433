//! CSV and TSV serialisation of a matrix, in table column order.

use tracing::debug;

use matrix_core::MatrixResult;

use crate::table::TableView;

/// Wrap a value in double quotes, doubling embedded quotes.
pub fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Header cells are written bare unless they need quoting to survive.
fn header_cell(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        quote(value)
    } else {
        value.to_string()
    }
}

/// CSV with a bare header line and every data field quoted.
pub fn to_csv(result: &MatrixResult) -> String {
    let view = TableView::from_result(result);
    let mut lines = Vec::with_capacity(view.rows.len() + 1);

    lines.push(
        view.columns
            .iter()
            .map(|c| header_cell(c))
            .collect::<Vec<_>>()
            .join(","),
    );
    for row in &view.rows {
        lines.push(row.iter().map(|v| quote(v)).collect::<Vec<_>>().join(","));
    }

    debug!(rows = view.rows.len(), columns = view.columns.len(), "matrix serialised as CSV");
    lines.join("\n")
}

/// Tab-separated text for pasting into a spreadsheet. Values are not quoted.
pub fn to_tsv(result: &MatrixResult) -> String {
    let view = TableView::from_result(result);
    std::iter::once(view.columns.join("\t"))
        .chain(view.rows.iter().map(|row| row.join("\t")))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use matrix_core::{MatrixType, PivotKey, PivotRow};

    fn result_with(messaging: &str, size: &str) -> MatrixResult {
        let mut row = PivotRow::new(PivotKey {
            funnel: "AWR".into(),
            messaging: messaging.into(),
            region: "QC".into(),
            language: "FR".into(),
            duration: "15s".into(),
        });
        row.creatives.insert(size.into(), "creative".into());
        MatrixResult {
            id: Default::default(),
            matrix_type: MatrixType::Social,
            rows: vec![row],
            size_columns: vec![size.into()],
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(quote(""), "\"\"");
    }

    #[test]
    fn test_csv_layout() {
        let csv = to_csv(&result_with("Save, Big", "1x1 Meta"));
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("FUNNEL,MESSAGING,REGION,LANGUAGE,DURATION,1x1 Meta,DELIVERY DATE,START DATE,END DATE,URL")
        );
        assert_eq!(
            lines.next(),
            Some("\"AWR\",\"Save, Big\",\"QC\",\"FR\",\"15s\",\"creative\",\"\",\"\",\"\",\"\"")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_csv_quotes_awkward_header() {
        let csv = to_csv(&result_with("Save", "300x250, mobile"));
        assert!(csv.starts_with("FUNNEL,MESSAGING,REGION,LANGUAGE,DURATION,\"300x250, mobile\",DELIVERY DATE"));
    }

    #[test]
    fn test_tsv_is_unquoted() {
        let tsv = to_tsv(&result_with("Say \"hi\"", "728x90"));
        let lines: Vec<&str> = tsv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("FUNNEL\tMESSAGING\t"));
        assert_eq!(lines[1].split('\t').nth(1), Some("Say \"hi\""));
        assert_eq!(lines[1].split('\t').count(), 10);
    }
}
