use crate::app::models::Value;
use crate::app::services::tabularizer::time::TimeEncoding;

fn decode_text(encoding: &TimeEncoding, offset: f64) -> String {
    match encoding.decode(offset).normalize() {
        Value::Text(s) => s,
        other => panic!("expected decoded text, got {:?}", other),
    }
}

#[test]
fn test_parses_common_unit_forms() {
    assert!(TimeEncoding::parse("seconds since 1970-01-01").is_some());
    assert!(TimeEncoding::parse("minutes since 2000-01-01 00:00:00").is_some());
    assert!(TimeEncoding::parse("Hours since 1990-01-01T00:00:00Z").is_some());
    assert!(TimeEncoding::parse("  days since 2020-06-15  ").is_some());
}

#[test]
fn test_rejects_non_time_units() {
    assert!(TimeEncoding::parse("degC").is_none());
    assert!(TimeEncoding::parse("m s-1").is_none());
    assert!(TimeEncoding::parse("months since 2000-01-01").is_none());
    assert!(TimeEncoding::parse("since 2000-01-01").is_none());
    assert!(TimeEncoding::parse("days since not-a-date").is_none());
}

#[test]
fn test_decodes_day_offsets() {
    let encoding = TimeEncoding::parse("days since 2024-01-01").unwrap();
    assert_eq!(decode_text(&encoding, 0.0), "2024-01-01T00:00:00.000Z");
    assert_eq!(decode_text(&encoding, 1.5), "2024-01-02T12:00:00.000Z");
}

#[test]
fn test_decodes_hour_offsets_from_datetime_epoch() {
    let encoding = TimeEncoding::parse("hours since 1990-01-01 06:00:00").unwrap();
    assert_eq!(decode_text(&encoding, 18.0), "1990-01-02T00:00:00.000Z");
}

#[test]
fn test_decodes_second_offsets() {
    let encoding = TimeEncoding::parse("seconds since 1970-01-01").unwrap();
    assert_eq!(decode_text(&encoding, 86_400.0), "1970-01-02T00:00:00.000Z");
}

#[test]
fn test_non_finite_offsets_decode_to_missing() {
    let encoding = TimeEncoding::parse("days since 2024-01-01").unwrap();
    assert_eq!(encoding.decode(f64::NAN), Value::Missing);
    assert_eq!(encoding.decode(f64::INFINITY), Value::Missing);
}

#[test]
fn test_out_of_range_offsets_decode_to_missing() {
    let encoding = TimeEncoding::parse("days since 2024-01-01").unwrap();
    assert_eq!(encoding.decode(1e18), Value::Missing);
    assert_eq!(encoding.decode(-1e18), Value::Missing);
}
