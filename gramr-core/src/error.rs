
//! Error types for gramr compilation and conversion.

use thiserror::Error;

/// Unified error type for all gramr operations.
///
/// Constructor helpers exist for the variants with fields, and any error can
/// be wrapped with [`Context`](GramrError::Context) via
/// [`with_context`](GramrError::with_context), producing chained messages like:
///
/// ```text
/// Person::born (prop 'born_at'): conversion failed: expected a temporal value, got Text
/// ```
#[derive(Error, Debug)]
pub enum GramrError {
    /// A property was declared or constructed with an empty key.
    #[error("property key must not be empty")]
    EmptyPropertyKey,

    /// An update or delete descriptor reached a builder without a database id.
    #[error("cannot compile {kind} change without a database id")]
    MissingIdentity { kind: String },

    /// A batched statement mixed descriptors that disagree on versioning.
    #[error("inconsistent versioning in one {kind} batch: {detail}")]
    InconsistentVersioning { kind: String, detail: String },

    /// A schema referenced a converter id that was never registered.
    #[error("unknown converter '{name}'")]
    UnknownConverter { name: String },

    /// A schema lookup referenced a field that was never declared.
    #[error("unknown field '{field}' on '{entity}'")]
    UnknownField { entity: String, field: String },

    /// A property value could not be converted to or from its graph form.
    #[error("conversion failed: {0}")]
    Conversion(String),

    /// A statement touched fewer rows than its locking config expected,
    /// meaning at least one entity was concurrently modified.
    #[error("stale write: expected {expected} affected rows, got {actual} (types {types:?}, version '{version_key}')")]
    StaleWrite {
        expected: usize,
        actual: usize,
        types: Vec<String>,
        version_key: String,
    },

    /// Wraps an inner error with additional context (entity, field, property).
    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<GramrError>,
    },
}

impl GramrError {
    /// Create a [`MissingIdentity`](GramrError::MissingIdentity) error.
    pub fn missing_identity(kind: &str) -> Self {
        GramrError::MissingIdentity { kind: kind.to_owned() }
    }

    /// Create an [`InconsistentVersioning`](GramrError::InconsistentVersioning) error.
    pub fn inconsistent_versioning(kind: &str, detail: impl Into<String>) -> Self {
        GramrError::InconsistentVersioning {
            kind: kind.to_owned(),
            detail: detail.into(),
        }
    }

    /// Create an [`UnknownConverter`](GramrError::UnknownConverter) error.
    pub fn unknown_converter(name: &str) -> Self {
        GramrError::UnknownConverter { name: name.to_owned() }
    }

    /// Create an [`UnknownField`](GramrError::UnknownField) error.
    pub fn unknown_field(entity: &str, field: &str) -> Self {
        GramrError::UnknownField {
            entity: entity.to_owned(),
            field: field.to_owned(),
        }
    }

    /// Create a [`Conversion`](GramrError::Conversion) error.
    pub fn conversion(detail: impl Into<String>) -> Self {
        GramrError::Conversion(detail.into())
    }

    /// Wrap this error with additional context, producing a [`Context`](GramrError::Context) variant.
    ///
    /// ```rust
    /// # use gramr_core::GramrError;
    /// let err = GramrError::conversion("not a number");
    /// let wrapped = err.with_context("Person::age (prop 'age')");
    /// assert!(wrapped.to_string().contains("Person::age"));
    /// ```
    pub fn with_context(self, ctx: impl Into<String>) -> Self {
        GramrError::Context {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}
