use serde::Serialize;

use matrix_core::MatrixResult;

/// A rectangular rendering of a matrix: one cell per column, missing values
/// rendered as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    pub fn from_result(result: &MatrixResult) -> Self {
        let columns = result.columns();
        let rows = result
            .rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|col| row.field(col).unwrap_or_default().to_string())
                    .collect()
            })
            .collect();
        Self { columns, rows }
    }

    /// Plain-text grid with padded columns, for terminal output.
    pub fn render(&self) -> String {
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                self.rows
                    .iter()
                    .map(|r| r[i].chars().count())
                    .chain(std::iter::once(col.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let line = |cells: &[String]| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, &w)| format!("{cell:<w$}"))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        let mut out = line(&self.columns);
        out.push('\n');
        out.push_str(
            &widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
        for row in &self.rows {
            out.push('\n');
            out.push_str(&line(row));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use matrix_core::{MatrixType, PivotKey, PivotRow};

    fn sample_result() -> MatrixResult {
        let mut a = PivotRow::new(PivotKey {
            funnel: "AWR".into(),
            messaging: "Save".into(),
            region: "ON".into(),
            language: "EN".into(),
            duration: "15s".into(),
        });
        a.creatives.insert("300x250".into(), "name-300".into());
        a.start_date = "Mar.10.2025".into();

        let mut b = a.clone();
        b.key.duration = "30s".into();
        b.creatives.clear();
        b.creatives.insert("728x90".into(), "name-728".into());

        MatrixResult {
            id: Default::default(),
            matrix_type: MatrixType::Display,
            rows: vec![a, b],
            size_columns: vec!["300x250".into(), "728x90".into()],
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_columns_and_missing_cells() {
        let view = TableView::from_result(&sample_result());
        assert_eq!(view.columns.len(), 5 + 2 + 4);
        assert_eq!(view.columns[5], "300x250");
        assert_eq!(view.columns[7], "DELIVERY DATE");
        assert_eq!(view.rows[0][5], "name-300");
        assert_eq!(view.rows[0][6], "");
        assert_eq!(view.rows[1][5], "");
        assert_eq!(view.rows[1][6], "name-728");
        assert_eq!(view.rows[0][8], "Mar.10.2025");
    }

    #[test]
    fn test_render_aligns_columns() {
        let text = TableView::from_result(&sample_result()).render();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("FUNNEL | MESSAGING"));
        assert!(lines[1].starts_with("------"));
        assert!(lines[2].contains("name-300"));
    }
}
