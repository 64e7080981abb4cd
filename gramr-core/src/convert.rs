
//! Property converters and the converter registry.
//!
//! A converter turns a [`DomainValue`] into its storable graph form and back.
//! Converters are looked up by a string identifier in a [`ConverterRegistry`]
//! built once at startup; schemas resolve their converter references at
//! registration time, so an unknown identifier fails configuration loading
//! instead of surfacing later during a flush.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::GramrError;
use crate::value::{type_name, DomainValue, Value};

/// Converts a property value between its domain form and its graph form.
///
/// Implementations are stateless (or hold only configuration like a date
/// format) and are shared behind [`Arc`] by every schema that references them.
pub trait PropertyConverter: Send + Sync {
    /// Convert a domain-side value into its storable graph form.
    fn to_graph(&self, value: DomainValue) -> Result<Value, GramrError>;

    /// Convert a graph-side value back into its domain form.
    fn from_graph(&self, value: Value) -> Result<DomainValue, GramrError>;
}

impl std::fmt::Debug for dyn PropertyConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn PropertyConverter")
    }
}

// ---------------------------------------------------------------------------
// Built-in converters
// ---------------------------------------------------------------------------

/// Stores a timestamp as epoch milliseconds. Registered as `date_long`.
pub struct DateLongConverter;

impl PropertyConverter for DateLongConverter {
    fn to_graph(&self, value: DomainValue) -> Result<Value, GramrError> {
        match value {
            DomainValue::Date(dt) => Ok(Value::from(dt.and_utc().timestamp_millis())),
            other => Err(GramrError::conversion(format!(
                "expected a temporal value, got {}",
                other.kind()
            ))),
        }
    }

    fn from_graph(&self, value: Value) -> Result<DomainValue, GramrError> {
        match value {
            Value::Integer(ms) => chrono::DateTime::from_timestamp_millis(ms.value)
                .map(|dt| DomainValue::Date(dt.naive_utc()))
                .ok_or_else(|| {
                    GramrError::conversion(format!("{} is out of range for a timestamp", ms.value))
                }),
            other => Err(GramrError::conversion(format!(
                "expected Integer epoch milliseconds, got {}",
                type_name(&other)
            ))),
        }
    }
}

/// Stores a timestamp as a formatted string. Registered as `date_string`
/// with an ISO 8601 format; custom formats can be registered under their own
/// identifiers.
pub struct DateStringConverter {
    format: String,
}

impl DateStringConverter {
    /// A converter using the given `chrono` format string.
    pub fn new(format: impl Into<String>) -> Self {
        Self { format: format.into() }
    }

    /// The ISO 8601 variant used by the `date_string` registration.
    pub fn iso8601() -> Self {
        Self::new("%Y-%m-%dT%H:%M:%S%.f")
    }
}

impl PropertyConverter for DateStringConverter {
    fn to_graph(&self, value: DomainValue) -> Result<Value, GramrError> {
        match value {
            DomainValue::Date(dt) => Ok(Value::from(dt.format(&self.format).to_string())),
            other => Err(GramrError::conversion(format!(
                "expected a temporal value, got {}",
                other.kind()
            ))),
        }
    }

    fn from_graph(&self, value: Value) -> Result<DomainValue, GramrError> {
        match value {
            Value::String(s) => chrono::NaiveDateTime::parse_from_str(&s.value, &self.format)
                .map(DomainValue::Date)
                .map_err(|e| {
                    GramrError::conversion(format!("'{}' is not a '{}' date: {e}", s.value, self.format))
                }),
            other => Err(GramrError::conversion(format!(
                "expected a String date, got {}",
                type_name(&other)
            ))),
        }
    }
}

/// Stores a number as its decimal string form. Registered as `number_string`.
pub struct NumberStringConverter;

impl PropertyConverter for NumberStringConverter {
    fn to_graph(&self, value: DomainValue) -> Result<Value, GramrError> {
        match value {
            DomainValue::Integer(i) => Ok(Value::from(i.to_string())),
            DomainValue::Float(f) => Ok(Value::from(f.to_string())),
            other => Err(GramrError::conversion(format!(
                "expected a numeric value, got {}",
                other.kind()
            ))),
        }
    }

    fn from_graph(&self, value: Value) -> Result<DomainValue, GramrError> {
        match value {
            Value::String(s) => {
                if let Ok(i) = s.value.parse::<i64>() {
                    return Ok(DomainValue::Integer(i));
                }
                s.value
                    .parse::<f64>()
                    .map(DomainValue::Float)
                    .map_err(|_| GramrError::conversion(format!("'{}' is not a number", s.value)))
            }
            other => Err(GramrError::conversion(format!(
                "expected a String number, got {}",
                type_name(&other)
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Maps converter identifiers to shared converter instances.
///
/// The built-ins `date_long`, `date_string`, and `number_string` are
/// pre-registered. Custom converters are added with [`register`](Self::register)
/// before any schema referencing them is loaded.
///
/// ```rust
/// # use gramr_core::convert::{ConverterRegistry, DateStringConverter};
/// # use std::sync::Arc;
/// let mut converters = ConverterRegistry::new();
/// converters.register("compact_date", Arc::new(DateStringConverter::new("%Y%m%d")));
/// assert!(converters.resolve("compact_date").is_ok());
/// assert!(converters.resolve("no_such_converter").is_err());
/// ```
pub struct ConverterRegistry {
    converters: HashMap<String, Arc<dyn PropertyConverter>>,
}

impl ConverterRegistry {
    /// A registry holding the built-in converters.
    pub fn new() -> Self {
        let mut converters: HashMap<String, Arc<dyn PropertyConverter>> = HashMap::new();
        converters.insert("date_long".to_owned(), Arc::new(DateLongConverter));
        converters.insert("date_string".to_owned(), Arc::new(DateStringConverter::iso8601()));
        converters.insert("number_string".to_owned(), Arc::new(NumberStringConverter));
        Self { converters }
    }

    /// Register a converter under an identifier, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, converter: Arc<dyn PropertyConverter>) {
        self.converters.insert(name.into(), converter);
    }

    /// Look up a converter by identifier.
    ///
    /// Returns [`GramrError::UnknownConverter`] if the identifier was never
    /// registered.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn PropertyConverter>, GramrError> {
        self.converters
            .get(name)
            .cloned()
            .ok_or_else(|| GramrError::unknown_converter(name))
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
