
//! The graph-side value model and the domain-side scalar set.
//!
//! Statement parameters are [`neo4rs::BoltType`] values, aliased as [`Value`]
//! throughout the crate so that everything a compiled statement carries is
//! directly bindable by a Bolt-speaking executor. [`DomainValue`] is the
//! small set of domain-side scalars that property converters accept before a
//! value becomes a [`Value`].
//!
//! The row-construction helpers at the bottom isolate the `neo4rs` map/list
//! API to a single location so that statement builders only depend on this
//! module.

use crate::error::GramrError;

/// The graph-side value of a property or statement parameter.
pub type Value = neo4rs::BoltType;

/// Returns a human-readable name for a [`Value`] variant.
///
/// Used in error messages to describe the actual type received when a
/// conversion fails.
pub fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null(_) => "Null",
        Value::Boolean(_) => "Boolean",
        Value::Integer(_) => "Integer",
        Value::Float(_) => "Float",
        Value::String(_) => "String",
        Value::Bytes(_) => "Bytes",
        Value::List(_) => "List",
        Value::Map(_) => "Map",
        Value::Node(_) => "Node",
        Value::Relation(_) => "Relationship",
        Value::UnboundedRelation(_) => "UnboundedRelationship",
        Value::Path(_) => "Path",
        Value::Point2D(_) => "Point2D",
        Value::Point3D(_) => "Point3D",
        Value::Duration(_) => "Duration",
        Value::Date(_) => "Date",
        Value::Time(_) => "Time",
        Value::LocalTime(_) => "LocalTime",
        Value::LocalDateTime(_) => "LocalDateTime",
        Value::DateTime(_) => "DateTime",
        Value::DateTimeZoneId(_) => "DateTimeZoneId",
    }
}

// ---------------------------------------------------------------------------
// Domain-side values
// ---------------------------------------------------------------------------

/// A domain-side scalar before property conversion.
///
/// Change-set providers hand these to an entity schema, which applies the
/// field's converter (if any) and produces the storable [`Value`]. Temporal
/// values have no direct storable form and must go through a converter.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Bytes(Vec<u8>),
    /// A timestamp without timezone, converted by `date_long` or `date_string`.
    Date(chrono::NaiveDateTime),
    /// A homogeneous list of scalars.
    List(Vec<DomainValue>),
}

impl DomainValue {
    /// Returns the variant name, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainValue::Text(_) => "Text",
            DomainValue::Integer(_) => "Integer",
            DomainValue::Float(_) => "Float",
            DomainValue::Boolean(_) => "Boolean",
            DomainValue::Bytes(_) => "Bytes",
            DomainValue::Date(_) => "Date",
            DomainValue::List(_) => "List",
        }
    }

    /// Convert into a storable [`Value`] without a converter.
    ///
    /// Temporal values fail here — they only become storable through a
    /// registered converter.
    pub fn into_value(self) -> Result<Value, GramrError> {
        match self {
            DomainValue::Text(s) => Ok(Value::from(s)),
            DomainValue::Integer(i) => Ok(Value::from(i)),
            DomainValue::Float(f) => Ok(Value::from(f)),
            DomainValue::Boolean(b) => Ok(Value::from(b)),
            DomainValue::Bytes(b) => Ok(Value::Bytes(neo4rs::BoltBytes::new(
                bytes::Bytes::from(b),
            ))),
            DomainValue::Date(_) => Err(GramrError::conversion(
                "temporal values need a converter (date_long or date_string)",
            )),
            DomainValue::List(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(item.into_value()?);
                }
                Ok(Value::List(out.into()))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Row construction
// ---------------------------------------------------------------------------

/// Create an empty parameter row.
pub fn empty_row() -> neo4rs::BoltMap {
    neo4rs::BoltMap::new()
}

/// Insert an entry into a parameter row.
pub fn put(row: &mut neo4rs::BoltMap, key: &str, value: Value) {
    row.put(neo4rs::BoltString::from(key), value);
}

/// Close a row into a map [`Value`].
pub fn row_value(row: neo4rs::BoltMap) -> Value {
    Value::Map(row)
}

/// Collect per-entity rows into the list [`Value`] bound to `$rows`.
pub fn rows_value(rows: Vec<Value>) -> Value {
    Value::List(rows.into())
}
