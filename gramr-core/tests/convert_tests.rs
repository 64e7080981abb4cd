use std::sync::Arc;

use gramr_core::convert::{
    ConverterRegistry, DateLongConverter, DateStringConverter, NumberStringConverter,
    PropertyConverter,
};
use gramr_core::{DomainValue, GramrError, Value};

fn midnight(y: i32, m: u32, d: u32) -> chrono::NaiveDateTime {
    chrono::NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

#[test]
fn test_date_long_to_graph() {
    let val = DateLongConverter
        .to_graph(DomainValue::Date(midnight(2020, 1, 1)))
        .unwrap();
    match val {
        Value::Integer(i) => assert_eq!(i.value, 1_577_836_800_000),
        other => panic!("expected Integer, got: {other:?}"),
    }
}

#[test]
fn test_date_long_round_trip() {
    let date = midnight(1999, 12, 31);
    let graph = DateLongConverter.to_graph(DomainValue::Date(date)).unwrap();
    let back = DateLongConverter.from_graph(graph).unwrap();
    assert_eq!(back, DomainValue::Date(date));
}

#[test]
fn test_date_long_rejects_non_temporal() {
    let err = DateLongConverter
        .to_graph(DomainValue::Text("not a date".into()))
        .unwrap_err();
    match &err {
        GramrError::Conversion(detail) => assert!(detail.contains("Text")),
        other => panic!("expected Conversion, got: {other}"),
    }
}

#[test]
fn test_date_long_rejects_non_integer_graph_value() {
    let err = DateLongConverter
        .from_graph(Value::from("1577836800000"))
        .unwrap_err();
    match &err {
        GramrError::Conversion(detail) => assert!(detail.contains("String")),
        other => panic!("expected Conversion, got: {other}"),
    }
}

#[test]
fn test_date_string_iso_round_trip() {
    let date = midnight(2020, 6, 15);
    let converter = DateStringConverter::iso8601();
    let graph = converter.to_graph(DomainValue::Date(date)).unwrap();
    match &graph {
        Value::String(s) => assert_eq!(s.value, "2020-06-15T00:00:00"),
        other => panic!("expected String, got: {other:?}"),
    }
    assert_eq!(converter.from_graph(graph).unwrap(), DomainValue::Date(date));
}

#[test]
fn test_date_string_unparseable() {
    let err = DateStringConverter::iso8601()
        .from_graph(Value::from("tomorrow-ish"))
        .unwrap_err();
    match &err {
        GramrError::Conversion(detail) => assert!(detail.contains("tomorrow-ish")),
        other => panic!("expected Conversion, got: {other}"),
    }
}

#[test]
fn test_number_string_integer() {
    let graph = NumberStringConverter.to_graph(DomainValue::Integer(42)).unwrap();
    match &graph {
        Value::String(s) => assert_eq!(s.value, "42"),
        other => panic!("expected String, got: {other:?}"),
    }
    assert_eq!(
        NumberStringConverter.from_graph(graph).unwrap(),
        DomainValue::Integer(42)
    );
}

#[test]
fn test_number_string_float() {
    assert_eq!(
        NumberStringConverter.from_graph(Value::from("2.5")).unwrap(),
        DomainValue::Float(2.5)
    );
}

#[test]
fn test_number_string_rejects_garbage() {
    let err = NumberStringConverter.from_graph(Value::from("abc")).unwrap_err();
    assert!(matches!(err, GramrError::Conversion(_)));
}

// --- Registry ---

#[test]
fn test_registry_has_builtins() {
    let registry = ConverterRegistry::new();
    assert!(registry.resolve("date_long").is_ok());
    assert!(registry.resolve("date_string").is_ok());
    assert!(registry.resolve("number_string").is_ok());
}

#[test]
fn test_registry_unknown_converter() {
    let registry = ConverterRegistry::new();
    let err = registry.resolve("no_such_converter").unwrap_err();
    match &err {
        GramrError::UnknownConverter { name } => assert_eq!(name, "no_such_converter"),
        other => panic!("expected UnknownConverter, got: {other}"),
    }
}

struct UppercaseConverter;

impl PropertyConverter for UppercaseConverter {
    fn to_graph(&self, value: DomainValue) -> Result<Value, GramrError> {
        match value {
            DomainValue::Text(s) => Ok(Value::from(s.to_uppercase())),
            other => Err(GramrError::conversion(format!("expected Text, got {}", other.kind()))),
        }
    }

    fn from_graph(&self, value: Value) -> Result<DomainValue, GramrError> {
        match value {
            Value::String(s) => Ok(DomainValue::Text(s.value.to_lowercase())),
            other => Err(GramrError::conversion(format!(
                "expected String, got {}",
                gramr_core::value::type_name(&other)
            ))),
        }
    }
}

#[test]
fn test_registry_custom_converter() {
    let mut registry = ConverterRegistry::new();
    registry.register("uppercase", Arc::new(UppercaseConverter));
    let converter = registry.resolve("uppercase").unwrap();
    let graph = converter.to_graph(DomainValue::Text("loud".into())).unwrap();
    match graph {
        Value::String(s) => assert_eq!(s.value, "LOUD"),
        other => panic!("expected String, got: {other:?}"),
    }
}

// --- DomainValue::into_value ---

#[test]
fn test_domain_value_scalars() {
    match DomainValue::Text("hi".into()).into_value().unwrap() {
        Value::String(s) => assert_eq!(s.value, "hi"),
        other => panic!("expected String, got: {other:?}"),
    }
    match DomainValue::Integer(7).into_value().unwrap() {
        Value::Integer(i) => assert_eq!(i.value, 7),
        other => panic!("expected Integer, got: {other:?}"),
    }
    match DomainValue::Boolean(true).into_value().unwrap() {
        Value::Boolean(b) => assert!(b.value),
        other => panic!("expected Boolean, got: {other:?}"),
    }
}

#[test]
fn test_domain_value_list() {
    let list = DomainValue::List(vec![DomainValue::Integer(1), DomainValue::Integer(2)]);
    match list.into_value().unwrap() {
        Value::List(xs) => assert_eq!(xs.value.len(), 2),
        other => panic!("expected List, got: {other:?}"),
    }
}

#[test]
fn test_domain_value_bytes() {
    match DomainValue::Bytes(vec![1, 2, 3]).into_value().unwrap() {
        Value::Bytes(b) => assert_eq!(&b.value[..], &[1, 2, 3]),
        other => panic!("expected Bytes, got: {other:?}"),
    }
}

#[test]
fn test_domain_value_date_needs_converter() {
    let err = DomainValue::Date(midnight(2020, 1, 1)).into_value().unwrap_err();
    assert!(matches!(err, GramrError::Conversion(_)));
}
