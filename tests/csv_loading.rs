use rust_data_cleaning::CleaningError;
use rust_data_cleaning::ingestion::{load_csv_from_path, load_csv_from_reader, LoadOptions};
use rust_data_cleaning::types::{Field, RowFailure, Schema};

#[test]
fn load_csv_from_path_partitions_fixture() {
    let report = load_csv_from_path("tests/fixtures/iris_mixed.csv", &LoadOptions::default()).unwrap();

    assert_eq!(report.rows_read, 9);
    assert_eq!(report.records.len(), 5);
    assert_eq!(report.diagnostics.len(), 4);
    assert_eq!(report.rows_read, report.records.len() + report.diagnostics.len());

    let labels: Vec<&str> = report.records.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["setosa", "setosa", "versicolor", "virginica", "virginica"]);
    assert_eq!(report.records[0].measurements, [5.1, 3.5, 1.4, 0.2]);

    let dropped: Vec<(usize, usize)> = report.diagnostics.iter().map(|d| (d.line, d.column)).collect();
    assert_eq!(dropped, vec![(3, 1), (5, 4), (6, 4), (7, 0)]);
    assert_eq!(report.diagnostics[1].cause, RowFailure::EmptyLabel);
    assert_eq!(
        report.diagnostics[2].cause,
        RowFailure::WrongFieldCount { expected: 5, found: 4 }
    );
}

#[test]
fn load_csv_missing_file_is_fatal() {
    let err = load_csv_from_path("tests/fixtures/does_not_exist.csv", &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, CleaningError::Open { .. }));
    assert!(err.to_string().contains("does_not_exist.csv"));
}

#[test]
fn load_csv_empty_input_yields_empty_report() {
    let report = load_csv_from_reader(&b""[..], &LoadOptions::default()).unwrap();
    assert_eq!(report.rows_read, 0);
    assert!(report.records.is_empty());
    assert!(report.diagnostics.is_empty());
}

#[test]
fn load_csv_only_first_failure_per_row_is_reported() {
    let report = load_csv_from_reader(&b"a,b,c,d,\n"[..], &LoadOptions::default()).unwrap();
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].column, 0);
    assert_eq!(
        report.diagnostics[0].cause,
        RowFailure::NonNumeric { raw: "a".to_string() }
    );
}

#[test]
fn load_csv_with_custom_schema_order() {
    let schema = Schema::new(vec![
        Field::label("species"),
        Field::measurement("sepal_length", 0),
        Field::measurement("sepal_width", 1),
        Field::measurement("petal_length", 2),
        Field::measurement("petal_width", 3),
    ])
    .unwrap();
    let options = LoadOptions {
        schema,
        ..Default::default()
    };

    let report = load_csv_from_reader(&b"setosa,5.1,3.5,1.4,0.2\n,1,2,3,4\n"[..], &options).unwrap();
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].measurements, [5.1, 3.5, 1.4, 0.2]);
    assert_eq!(report.diagnostics[0].column, 0);
    assert_eq!(report.diagnostics[0].cause, RowFailure::EmptyLabel);
}

#[test]
fn load_csv_quoted_label_with_comma() {
    let report = load_csv_from_reader(&b"1,2,3,4,\"iris, setosa\"\n"[..], &LoadOptions::default()).unwrap();
    assert_eq!(report.records[0].label, "iris, setosa");
}

#[test]
fn load_csv_drops_values_that_overflow_f64() {
    let report = load_csv_from_reader(&b"1e400,1,1,1,a\n1,1,1,1,b\n"[..], &LoadOptions::default()).unwrap();

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].label, "b");
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].to_string(), "line 1: unexpected value in column 0");
}
