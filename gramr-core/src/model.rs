
//! Change descriptors: what a unit of work knows about each touched entity.
//!
//! A [`NodeChange`] or [`EdgeChange`] describes one node or relationship that
//! was created, updated, or deleted since the last flush. Descriptors are
//! immutable once handed to a statement builder and are consumed exactly once
//! per compile.

use crate::error::GramrError;
use crate::value::Value;

/// A typed key/value pair on a node or relationship.
///
/// The key is never empty — [`Property::new`] rejects empty keys.
///
/// ```rust
/// # use gramr_core::{Property, GramrError};
/// # fn main() -> Result<(), GramrError> {
/// let p = Property::new("name", "Alice")?;
/// assert_eq!(p.key(), "name");
/// assert!(Property::new("", "oops").is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Property {
    key: String,
    value: Value,
}

impl Property {
    /// Create a property, rejecting empty keys.
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Result<Self, GramrError> {
        let key = key.into();
        if key.is_empty() {
            return Err(GramrError::EmptyPropertyKey);
        }
        Ok(Self { key, value: value.into() })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// A changed node: identity, labels, property delta, optional version.
///
/// For a node that already exists in the database, [`reference`](Self::reference)
/// equals the database id. For a newly created node there is no database id
/// yet; the reference is a caller-supplied temporary id (negative by
/// convention) that the create statement projects back as `ref` so the
/// executor can map the assigned database id to the in-memory object.
#[derive(Debug, Clone)]
pub struct NodeChange {
    id: Option<i64>,
    reference: i64,
    labels: Vec<String>,
    properties: Vec<Property>,
    version: Option<Property>,
}

impl NodeChange {
    /// A node not yet present in the database, keyed by a temporary reference.
    pub fn created(reference: i64, labels: Vec<String>) -> Self {
        Self {
            id: None,
            reference,
            labels,
            properties: Vec::new(),
            version: None,
        }
    }

    /// A node already present in the database.
    pub fn existing(id: i64, labels: Vec<String>) -> Self {
        Self {
            id: Some(id),
            reference: id,
            labels,
            properties: Vec::new(),
            version: None,
        }
    }

    /// Append a property to the delta.
    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    /// Attach the version property with its expected current value.
    pub fn with_version(mut self, version: Property) -> Self {
        self.version = Some(version);
        self
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn reference(&self) -> i64 {
        self.reference
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn version(&self) -> Option<&Property> {
        self.version.as_ref()
    }

    /// True iff a property tagged as the version field is present.
    pub fn has_version(&self) -> bool {
        self.version.is_some()
    }
}

/// A changed relationship: identity, type, endpoints, property delta,
/// optional version.
///
/// Endpoint ids are node *references* — database ids for existing nodes, or
/// temporary reference ids for nodes created in the same unit of work (the
/// executor resolves those before binding the statement).
#[derive(Debug, Clone)]
pub struct EdgeChange {
    id: Option<i64>,
    reference: i64,
    rel_type: String,
    start_node: i64,
    end_node: i64,
    properties: Vec<Property>,
    version: Option<Property>,
}

impl EdgeChange {
    /// A relationship not yet present in the database.
    pub fn created(reference: i64, rel_type: impl Into<String>, start_node: i64, end_node: i64) -> Self {
        Self {
            id: None,
            reference,
            rel_type: rel_type.into(),
            start_node,
            end_node,
            properties: Vec::new(),
            version: None,
        }
    }

    /// A relationship already present in the database.
    pub fn existing(id: i64, rel_type: impl Into<String>, start_node: i64, end_node: i64) -> Self {
        Self {
            id: Some(id),
            reference: id,
            rel_type: rel_type.into(),
            start_node,
            end_node,
            properties: Vec::new(),
            version: None,
        }
    }

    /// Append a property to the delta.
    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    /// Attach the version property with its expected current value.
    pub fn with_version(mut self, version: Property) -> Self {
        self.version = Some(version);
        self
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn reference(&self) -> i64 {
        self.reference
    }

    pub fn rel_type(&self) -> &str {
        &self.rel_type
    }

    pub fn start_node(&self) -> i64 {
        self.start_node
    }

    pub fn end_node(&self) -> i64 {
        self.end_node
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn version(&self) -> Option<&Property> {
        self.version.as_ref()
    }

    /// True iff a property tagged as the version field is present.
    pub fn has_version(&self) -> bool {
        self.version.is_some()
    }
}
