
//! Statically-declared mapping configuration.
//!
//! Instead of scanning annotations at runtime, entity and relationship
//! mappings are declared explicitly and registered once at startup. A
//! mapping names the graph labels (or relationship type), the field
//! descriptors with their graph property keys, optional converter
//! references, and an optional version field. Converter references are
//! resolved against the [`ConverterRegistry`] when the mapping is
//! registered, so a typo fails configuration loading with
//! [`GramrError::UnknownConverter`] rather than surfacing mid-flush.
//!
//! ```rust
//! # use gramr::schema::{SchemaRegistry, EntityMapping, FieldMapping};
//! # use gramr::{DomainValue, GramrError};
//! # fn main() -> Result<(), GramrError> {
//! let mut registry = SchemaRegistry::new();
//! registry.register_entity(
//!     EntityMapping::new("Person")
//!         .label("Person")
//!         .field(FieldMapping::new("name"))
//!         .field(FieldMapping::new("born").prop("born_at").converter("date_long"))
//!         .version(FieldMapping::new("version")),
//! )?;
//!
//! let person = registry.entity("Person").unwrap();
//! let name = person.property("name", DomainValue::Text("Alice".into()))?;
//! assert_eq!(name.key(), "name");
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use gramr_core::convert::{ConverterRegistry, PropertyConverter};
use gramr_core::model::Property;
use gramr_core::value::DomainValue;
use gramr_core::GramrError;

// ---------------------------------------------------------------------------
// Declarations
// ---------------------------------------------------------------------------

/// Declares one domain field: its name, graph property key, and optional
/// converter reference.
///
/// The property key defaults to the field name; [`prop`](Self::prop)
/// overrides it.
pub struct FieldMapping {
    field: String,
    prop_key: Option<String>,
    converter: Option<String>,
}

impl FieldMapping {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            prop_key: None,
            converter: None,
        }
    }

    /// Override the graph property key.
    pub fn prop(mut self, key: impl Into<String>) -> Self {
        self.prop_key = Some(key.into());
        self
    }

    /// Reference a converter by its registry identifier.
    pub fn converter(mut self, id: impl Into<String>) -> Self {
        self.converter = Some(id.into());
        self
    }
}

/// Declares the mapping of one entity type onto graph nodes.
pub struct EntityMapping {
    name: String,
    labels: Vec<String>,
    fields: Vec<FieldMapping>,
    version: Option<FieldMapping>,
}

impl EntityMapping {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            labels: Vec::new(),
            fields: Vec::new(),
            version: None,
        }
    }

    /// Add a node label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Declare a field.
    pub fn field(mut self, field: FieldMapping) -> Self {
        self.fields.push(field);
        self
    }

    /// Declare the optimistic-locking version field.
    pub fn version(mut self, field: FieldMapping) -> Self {
        self.version = Some(field);
        self
    }
}

/// Declares the mapping of one relationship type onto graph relationships.
///
/// `from`/`to` name the endpoint entity types; like the relationship type
/// itself they default from the mapping name and exist for declaration-site
/// clarity.
pub struct RelationshipMapping {
    name: String,
    rel_type: Option<String>,
    from: Option<String>,
    to: Option<String>,
    fields: Vec<FieldMapping>,
    version: Option<FieldMapping>,
}

impl RelationshipMapping {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rel_type: None,
            from: None,
            to: None,
            fields: Vec::new(),
            version: None,
        }
    }

    /// Override the graph relationship type (defaults to the mapping name).
    pub fn rel_type(mut self, rel_type: impl Into<String>) -> Self {
        self.rel_type = Some(rel_type.into());
        self
    }

    /// Name the start-entity type.
    pub fn from(mut self, entity: impl Into<String>) -> Self {
        self.from = Some(entity.into());
        self
    }

    /// Name the end-entity type.
    pub fn to(mut self, entity: impl Into<String>) -> Self {
        self.to = Some(entity.into());
        self
    }

    /// Declare a field.
    pub fn field(mut self, field: FieldMapping) -> Self {
        self.fields.push(field);
        self
    }

    /// Declare the optimistic-locking version field.
    pub fn version(mut self, field: FieldMapping) -> Self {
        self.version = Some(field);
        self
    }
}

// ---------------------------------------------------------------------------
// Resolved schemas
// ---------------------------------------------------------------------------

struct ResolvedField {
    prop_key: String,
    converter: Option<Arc<dyn PropertyConverter>>,
}

/// A registered entity mapping with its converters resolved.
pub struct EntitySchema {
    name: String,
    labels: Vec<String>,
    fields: HashMap<String, ResolvedField>,
    version_key: Option<String>,
}

impl EntitySchema {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The graph property key of the version field, if one was declared.
    pub fn version_key(&self) -> Option<&str> {
        self.version_key.as_deref()
    }

    /// Convert a domain value into the [`Property`] for one declared field.
    ///
    /// Applies the field's converter if it has one; errors are wrapped with
    /// the entity, field, and property key for traceability.
    pub fn property(&self, field: &str, value: DomainValue) -> Result<Property, GramrError> {
        convert_property(&self.name, &self.fields, field, value)
    }

    /// The version property carrying the expected current value, if a
    /// version field was declared.
    pub fn version_property(&self, value: i64) -> Result<Option<Property>, GramrError> {
        self.version_key
            .as_ref()
            .map(|key| Property::new(key.clone(), value))
            .transpose()
    }
}

/// A registered relationship mapping with its converters resolved.
pub struct RelationshipSchema {
    name: String,
    rel_type: String,
    from: Option<String>,
    to: Option<String>,
    fields: HashMap<String, ResolvedField>,
    version_key: Option<String>,
}

impl RelationshipSchema {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rel_type(&self) -> &str {
        &self.rel_type
    }

    pub fn from_entity(&self) -> Option<&str> {
        self.from.as_deref()
    }

    pub fn to_entity(&self) -> Option<&str> {
        self.to.as_deref()
    }

    /// The graph property key of the version field, if one was declared.
    pub fn version_key(&self) -> Option<&str> {
        self.version_key.as_deref()
    }

    /// Convert a domain value into the [`Property`] for one declared field.
    pub fn property(&self, field: &str, value: DomainValue) -> Result<Property, GramrError> {
        convert_property(&self.name, &self.fields, field, value)
    }

    /// The version property carrying the expected current value, if a
    /// version field was declared.
    pub fn version_property(&self, value: i64) -> Result<Option<Property>, GramrError> {
        self.version_key
            .as_ref()
            .map(|key| Property::new(key.clone(), value))
            .transpose()
    }
}

fn convert_property(
    owner: &str,
    fields: &HashMap<String, ResolvedField>,
    field: &str,
    value: DomainValue,
) -> Result<Property, GramrError> {
    let resolved = fields
        .get(field)
        .ok_or_else(|| GramrError::unknown_field(owner, field))?;
    let converted = match &resolved.converter {
        Some(converter) => converter.to_graph(value),
        None => value.into_value(),
    }
    .map_err(|e| e.with_context(format!("{owner}::{field} (prop '{}')", resolved.prop_key)))?;
    Property::new(resolved.prop_key.clone(), converted)
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Holds every registered entity and relationship schema plus the converter
/// registry they resolve against. Built once at startup, then read-only.
pub struct SchemaRegistry {
    converters: ConverterRegistry,
    entities: HashMap<String, EntitySchema>,
    relationships: HashMap<String, RelationshipSchema>,
}

impl SchemaRegistry {
    /// A registry with the built-in converters.
    pub fn new() -> Self {
        Self::with_converters(ConverterRegistry::new())
    }

    /// A registry resolving against a caller-populated converter registry.
    pub fn with_converters(converters: ConverterRegistry) -> Self {
        Self {
            converters,
            entities: HashMap::new(),
            relationships: HashMap::new(),
        }
    }

    /// Access the converter registry, e.g. to add custom converters before
    /// registering the schemas referencing them.
    pub fn converters_mut(&mut self) -> &mut ConverterRegistry {
        &mut self.converters
    }

    /// Register an entity mapping, resolving its converter references.
    pub fn register_entity(&mut self, mapping: EntityMapping) -> Result<(), GramrError> {
        let fields = self.resolve_fields(mapping.fields)?;
        let version_key = resolve_version(mapping.version)?;
        log::debug!(
            "registered entity '{}' ({} labels, {} fields)",
            mapping.name,
            mapping.labels.len(),
            fields.len()
        );
        self.entities.insert(
            mapping.name.clone(),
            EntitySchema {
                name: mapping.name,
                labels: mapping.labels,
                fields,
                version_key,
            },
        );
        Ok(())
    }

    /// Register a relationship mapping, resolving its converter references.
    pub fn register_relationship(&mut self, mapping: RelationshipMapping) -> Result<(), GramrError> {
        let fields = self.resolve_fields(mapping.fields)?;
        let version_key = resolve_version(mapping.version)?;
        let rel_type = mapping.rel_type.unwrap_or_else(|| mapping.name.clone());
        log::debug!("registered relationship '{}' as '{rel_type}'", mapping.name);
        self.relationships.insert(
            mapping.name.clone(),
            RelationshipSchema {
                name: mapping.name,
                rel_type,
                from: mapping.from,
                to: mapping.to,
                fields,
                version_key,
            },
        );
        Ok(())
    }

    pub fn entity(&self, name: &str) -> Option<&EntitySchema> {
        self.entities.get(name)
    }

    pub fn relationship(&self, name: &str) -> Option<&RelationshipSchema> {
        self.relationships.get(name)
    }

    fn resolve_fields(
        &self,
        fields: Vec<FieldMapping>,
    ) -> Result<HashMap<String, ResolvedField>, GramrError> {
        let mut resolved = HashMap::with_capacity(fields.len());
        for mapping in fields {
            let prop_key = mapping.prop_key.unwrap_or_else(|| mapping.field.clone());
            if mapping.field.is_empty() || prop_key.is_empty() {
                return Err(GramrError::EmptyPropertyKey);
            }
            let converter = mapping
                .converter
                .map(|id| self.converters.resolve(&id))
                .transpose()?;
            resolved.insert(mapping.field, ResolvedField { prop_key, converter });
        }
        Ok(resolved)
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_version(version: Option<FieldMapping>) -> Result<Option<String>, GramrError> {
    match version {
        None => Ok(None),
        Some(mapping) => {
            let key = mapping.prop_key.unwrap_or(mapping.field);
            if key.is_empty() {
                return Err(GramrError::EmptyPropertyKey);
            }
            Ok(Some(key))
        }
    }
}
