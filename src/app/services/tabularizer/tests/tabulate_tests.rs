use crate::app::models::{AttrValue, Value, VariableData, VariableMeta};
use crate::app::services::csv_writer::serialize;
use crate::app::services::tabularizer::tabularize;
use crate::app::source::MemoryDataset;
use crate::config::ConverterConfig;

fn numbers(values: &[f64]) -> VariableData {
    VariableData::Array(values.iter().map(|&n| Value::Number(n)).collect())
}

fn var(name: &str, dimensions: &[&str], declared_type: &str) -> VariableMeta {
    VariableMeta::new(
        name,
        dimensions.iter().map(|d| d.to_string()).collect(),
        declared_type,
    )
}

#[test]
fn test_single_dimension_with_coordinate_variable() {
    let dataset = MemoryDataset::new()
        .with_dimension("x", 3)
        .with_variable(var("x", &["x"], "int"), numbers(&[0.0, 1.0, 2.0]))
        .with_variable(var("temp", &["x"], "double"), numbers(&[10.0, 20.0, 30.0]));

    let rows = tabularize(&dataset, &ConverterConfig::default());

    assert_eq!(rows.len(), 3);
    assert_eq!(serialize(&rows), "x,temp\n0,10\n1,20\n2,30");
}

#[test]
fn test_single_dimension_without_coordinate_variable() {
    let dataset = MemoryDataset::new()
        .with_dimension("x", 3)
        .with_variable(var("temp", &["x"], "double"), numbers(&[10.0, 20.0, 30.0]));

    let rows = tabularize(&dataset, &ConverterConfig::default());
    assert_eq!(serialize(&rows), "x,temp\n0,10\n1,20\n2,30");
}

#[test]
fn test_missing_coordinate_variable_synthesizes_indices() {
    let dataset = MemoryDataset::new()
        .with_dimension("x", 2)
        .with_variable(var("v", &["x"], "float"), numbers(&[7.0, 8.0]));

    let rows = tabularize(&dataset, &ConverterConfig::default());

    assert_eq!(rows[0].get("x"), Some(&Value::Number(0.0)));
    assert_eq!(rows[1].get("x"), Some(&Value::Number(1.0)));
}

#[test]
fn test_two_dimensions_enumerate_row_major() {
    let dataset = MemoryDataset::new()
        .with_dimension("y", 2)
        .with_dimension("x", 3)
        .with_variable(
            var("v", &["y", "x"], "double"),
            numbers(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
        );

    let rows = tabularize(&dataset, &ConverterConfig::default());

    assert_eq!(rows.len(), 6);
    assert_eq!(
        serialize(&rows),
        "y,x,v\n0,0,1\n0,1,2\n0,2,3\n1,0,4\n1,1,5\n1,2,6"
    );
}

#[test]
fn test_row_count_is_product_of_dimension_sizes() {
    let dataset = MemoryDataset::new()
        .with_dimension("a", 4)
        .with_dimension("b", 5)
        .with_dimension("c", 3)
        .with_variable(
            var("v", &["a", "b", "c"], "double"),
            numbers(&vec![0.0; 60]),
        );

    let rows = tabularize(&dataset, &ConverterConfig::default());
    assert_eq!(rows.len(), 60);
}

#[test]
fn test_multiple_variables_append_in_declaration_order() {
    let dataset = MemoryDataset::new()
        .with_dimension("x", 2)
        .with_variable(var("first", &["x"], "double"), numbers(&[1.0, 2.0]))
        .with_variable(var("second", &["x"], "double"), numbers(&[3.0, 4.0]));

    let rows = tabularize(&dataset, &ConverterConfig::default());

    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].get("first"), Some(&Value::Number(1.0)));
    assert_eq!(rows[2].get("second"), Some(&Value::Number(3.0)));
    // Header comes from the first row, so the serialized file keeps the
    // first variable's columns; later rows fill what they share.
    assert_eq!(serialize(&rows), "x,first\n0,1\n1,2\n0,\n1,");
}

#[test]
fn test_scalar_variables_are_skipped() {
    let dataset = MemoryDataset::new()
        .with_dimension("x", 2)
        .with_variable(var("note", &[], "char"), VariableData::Scalar(Value::Text("hi".into())))
        .with_variable(var("v", &["x"], "double"), numbers(&[1.0, 2.0]));

    let rows = tabularize(&dataset, &ConverterConfig::default());

    assert_eq!(rows.len(), 2);
    assert!(rows[0].get("note").is_none());
}

#[test]
fn test_all_scalars_produce_no_rows() {
    let dataset = MemoryDataset::new()
        .with_variable(var("a", &[], "int"), VariableData::Scalar(Value::Number(1.0)))
        .with_variable(var("b", &[], "int"), VariableData::Scalar(Value::Number(2.0)));

    assert!(tabularize(&dataset, &ConverterConfig::default()).is_empty());
}

#[test]
fn test_unreadable_variable_is_skipped_not_fatal() {
    let dataset = MemoryDataset::new()
        .with_dimension("x", 2)
        .with_unreadable_variable(var("broken", &["x"], "double"))
        .with_variable(var("ok", &["x"], "double"), numbers(&[1.0, 2.0]));

    let rows = tabularize(&dataset, &ConverterConfig::default());

    assert_eq!(rows.len(), 2);
    assert!(rows[0].get("broken").is_none());
    assert_eq!(rows[0].get("ok"), Some(&Value::Number(1.0)));
}

#[test]
fn test_zero_size_dimension_yields_no_rows() {
    let dataset = MemoryDataset::new()
        .with_dimension("t", 0)
        .with_variable(var("v", &["t"], "double"), numbers(&[]));

    assert!(tabularize(&dataset, &ConverterConfig::default()).is_empty());
}

#[test]
fn test_row_budget_stops_exactly_at_limit() {
    let dataset = MemoryDataset::new()
        .with_dimension("x", 10)
        .with_variable(var("v", &["x"], "double"), numbers(&vec![1.0; 10]))
        .with_variable(var("w", &["x"], "double"), numbers(&vec![2.0; 10]));

    let config = ConverterConfig {
        max_rows: 13,
        ..ConverterConfig::default()
    };
    let rows = tabularize(&dataset, &config);

    // Truncation keeps everything collected so far, mid-variable included
    assert_eq!(rows.len(), 13);
    assert_eq!(rows[12].get("w"), Some(&Value::Number(2.0)));
}

#[test]
fn test_undeclared_dimension_degrades_to_raw_index() {
    let dataset = MemoryDataset::new()
        .with_variable(var("v", &["ghost"], "double"), numbers(&[5.0]));

    let rows = tabularize(&dataset, &ConverterConfig::default());

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("ghost"), Some(&Value::Number(0.0)));
    assert_eq!(rows[0].get("v"), Some(&Value::Number(5.0)));
}

#[test]
fn test_short_coordinate_array_fills_missing() {
    let dataset = MemoryDataset::new()
        .with_dimension("x", 3)
        .with_variable(var("x", &["x"], "int"), numbers(&[0.0, 1.0]))
        .with_variable(var("v", &["x"], "double"), numbers(&[1.0, 2.0, 3.0]));

    let rows = tabularize(&dataset, &ConverterConfig::default());

    assert_eq!(rows[2].get("x"), Some(&Value::Missing));
}

#[test]
fn test_non_finite_data_normalizes_to_missing() {
    let dataset = MemoryDataset::new()
        .with_dimension("x", 3)
        .with_variable(
            var("v", &["x"], "double"),
            numbers(&[1.0, f64::NAN, f64::INFINITY]),
        );

    let rows = tabularize(&dataset, &ConverterConfig::default());

    assert_eq!(rows[1].get("v"), Some(&Value::Missing));
    assert_eq!(rows[2].get("v"), Some(&Value::Missing));
    assert_eq!(serialize(&rows), "x,v\n0,1\n1,\n2,");
}

#[test]
fn test_coordinate_variable_over_own_dimension_collapses_to_one_column() {
    let dataset = MemoryDataset::new()
        .with_dimension("x", 2)
        .with_variable(var("x", &["x"], "double"), numbers(&[10.0, 20.0]));

    let rows = tabularize(&dataset, &ConverterConfig::default());

    // The value write lands on the coordinate column in place
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].len(), 1);
    assert_eq!(serialize(&rows), "x\n10\n20");
}

#[test]
fn test_time_coordinate_decodes_when_enabled() {
    let mut time_var = var("time", &["time"], "double");
    time_var.attributes.push((
        "units".to_string(),
        AttrValue::Text("days since 2024-01-01".to_string()),
    ));

    let dataset = MemoryDataset::new()
        .with_dimension("time", 2)
        .with_variable(time_var, numbers(&[0.0, 1.0]))
        .with_variable(var("v", &["time"], "double"), numbers(&[5.0, 6.0]));

    let decoded = tabularize(
        &dataset,
        &ConverterConfig {
            decode_times: true,
            ..ConverterConfig::default()
        },
    );
    assert_eq!(
        decoded[0].get("time"),
        Some(&Value::Text("2024-01-01T00:00:00.000Z".to_string()))
    );

    // Off by default: the raw offsets pass through
    let raw = tabularize(&dataset, &ConverterConfig::default());
    assert_eq!(raw[0].get("time"), Some(&Value::Number(0.0)));
}
