use crate::{
    db::query::{CoercionError, coerce_list, coerce_scalar},
    model::{FieldKind, FieldType},
    test_fixtures::Status,
    traits::FieldValue,
    value::{Value, ValueEnum},
};
use chrono::{NaiveDate, TimeZone, Utc};

const fn ty(kind: FieldKind) -> FieldType {
    FieldType::new(kind, false)
}

const fn nullable(kind: FieldKind) -> FieldType {
    FieldType::new(kind, true)
}

#[test]
fn bool_accepts_words_and_digits() {
    let target = ty(FieldKind::Bool);

    assert_eq!(coerce_scalar("TRUE", &target), Ok(Value::Bool(true)));
    assert_eq!(coerce_scalar("0", &target), Ok(Value::Bool(false)));
    assert!(coerce_scalar("yes", &target).is_err());
}

#[test]
fn integer_widths_are_range_checked() {
    assert_eq!(coerce_scalar("-128", &ty(FieldKind::Int8)), Ok(Value::Int(-128)));
    assert!(coerce_scalar("128", &ty(FieldKind::Int8)).is_err());
    assert_eq!(coerce_scalar("65535", &ty(FieldKind::Uint16)), Ok(Value::Uint(65535)));
    assert!(coerce_scalar("-1", &ty(FieldKind::Uint64)).is_err());
    assert!(coerce_scalar("1.5", &ty(FieldKind::Int32)).is_err());
}

#[test]
fn dates_and_timestamps_parse_iso_forms() {
    assert_eq!(
        coerce_scalar("2024-02-29", &ty(FieldKind::Date)),
        Ok(Value::Date(
            NaiveDate::from_ymd_opt(2024, 2, 29).expect("valid date")
        ))
    );
    assert!(coerce_scalar("2023-02-29", &ty(FieldKind::Date)).is_err());

    let expected = Utc
        .with_ymd_and_hms(2024, 1, 2, 1, 4, 5)
        .single()
        .expect("valid timestamp");
    assert_eq!(
        coerce_scalar("2024-01-02T03:04:05+02:00", &ty(FieldKind::Timestamp)),
        Ok(Value::Timestamp(expected))
    );
}

#[test]
fn enums_accept_names_case_insensitively_and_ordinals() {
    let target = ty(<Status as FieldValue>::KIND);
    let published = Value::Enum(ValueEnum::new("Published", 1));

    assert_eq!(coerce_scalar("published", &target), Ok(published.clone()));
    assert_eq!(coerce_scalar("1", &target), Ok(published));
    assert!(coerce_scalar("3", &target).is_err());
    assert!(coerce_scalar("Deleted", &target).is_err());
}

#[test]
fn nullable_non_text_reads_empty_and_null_as_null() {
    let target = nullable(FieldKind::Float64);

    assert_eq!(coerce_scalar("", &target), Ok(Value::Null));
    assert_eq!(coerce_scalar("NULL", &target), Ok(Value::Null));
    assert_eq!(coerce_scalar("2.5", &target), Ok(Value::Float(2.5)));
    assert!(coerce_scalar("", &ty(FieldKind::Float64)).is_err());
}

#[test]
fn text_keeps_empty_literal() {
    assert_eq!(
        coerce_scalar("", &nullable(FieldKind::Text)),
        Ok(Value::Text(String::new()))
    );
}

#[test]
fn failure_names_literal_and_target() {
    let err = coerce_scalar("abc", &nullable(FieldKind::Int32)).expect_err("not a number");

    assert_eq!(
        err,
        CoercionError {
            literal: "abc".to_string(),
            target: nullable(FieldKind::Int32),
        }
    );
    assert_eq!(err.to_string(), "could not convert 'abc' to Option<i32>");
}

#[test]
fn list_keeps_empty_segments() {
    let text = ty(FieldKind::Text);

    assert_eq!(
        coerce_list("a,,b", ',', &text),
        Ok(vec![Value::from("a"), Value::from(""), Value::from("b")])
    );
    assert_eq!(coerce_list("", ',', &text), Ok(vec![Value::from("")]));
    assert_eq!(
        coerce_list("", ',', &nullable(FieldKind::Int64)),
        Ok(vec![Value::Null])
    );
    assert!(coerce_list("", ',', &ty(FieldKind::Int64)).is_err());
    assert!(coerce_list("1,,2", ',', &ty(FieldKind::Int64)).is_err());
    assert_eq!(
        coerce_list("1;2", ';', &ty(FieldKind::Int64)),
        Ok(vec![Value::Int(1), Value::Int(2)])
    );
}
