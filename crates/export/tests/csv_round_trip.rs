//! Generated matrices survive CSV export and re-parsing unchanged.

mod common;

use chrono::NaiveDate;
use matrix_core::{CampaignMetadata, LineOfBusiness, MatrixRequest, MatrixType, Offer};
use matrix_export::{to_csv, to_tsv, TableView};
use matrix_generator::{MatrixGenerator, MatrixSession};

fn request() -> MatrixRequest {
    let mut meta = CampaignMetadata::for_line_of_business(
        LineOfBusiness::CorporateBrand,
        "Holiday \"Big\" Push",
        NaiveDate::from_ymd_opt(2025, 11, 24).unwrap(),
    );
    meta.custom_suffix = "v1, draft".into();

    MatrixRequest {
        matrix_type: MatrixType::Display,
        funnels: vec!["AWR".into(), "CNV".into()],
        offers: vec![
            Offer::new("Save 20%, today", "$65"),
            Offer::new("Say \"yes\"", ""),
        ],
        regions: vec!["QC".into(), "ON".into()],
        languages: vec!["EN".into(), "FR".into()],
        durations: vec!["15s".into()],
        sizes: vec!["300x250".into(), "728x90".into(), "16x9".into()],
        meta,
    }
}

#[test]
fn csv_round_trip_preserves_every_field() {
    let result = MatrixGenerator::default().generate(&request()).unwrap();
    let view = TableView::from_result(&result);

    let parsed = common::parse_csv(&to_csv(&result));
    assert_eq!(parsed.len(), result.rows.len() + 1);
    assert_eq!(parsed[0], view.columns);
    assert_eq!(&parsed[1..], view.rows.as_slice());
}

#[test]
fn csv_values_carry_commas_and_quotes() {
    let result = MatrixGenerator::default().generate(&request()).unwrap();
    let parsed = common::parse_csv(&to_csv(&result));

    assert!(parsed.iter().any(|r| r[1] == "Say \"yes\""));
    let name = &parsed[1][5];
    assert!(name.contains("Holiday \"Big\" Push-AWR-QC-EN"));
    assert!(name.ends_with("_v1, draft_$65"));
}

#[test]
fn tsv_matches_table_view() {
    let result = MatrixGenerator::default().generate(&request()).unwrap();
    let view = TableView::from_result(&result);
    let tsv = to_tsv(&result);

    let rows: Vec<Vec<&str>> = tsv.lines().map(|l| l.split('\t').collect()).collect();
    assert_eq!(rows.len(), view.rows.len() + 1);
    assert_eq!(rows[1], view.rows[0].iter().map(String::as_str).collect::<Vec<_>>());
}

#[test]
fn export_before_generation_is_a_no_op() {
    let mut session = MatrixSession::default();
    assert!(session.current().map(to_csv).is_none());

    session.generate(&request()).unwrap();
    assert!(session.current().map(to_csv).is_some());

    session.clear();
    assert!(session.current().map(to_tsv).is_none());
}
