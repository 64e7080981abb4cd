
//! Statement builders, one per change category.
//!
//! Each builder is a stateless transformer constructed per-invocation with
//! the exact slice of descriptors it must compile and a factory to construct
//! the resulting [`Statement`]. An empty input yields a no-op statement
//! (empty query, no parameters) rather than an error.

use std::collections::{BTreeSet, HashMap};

use gramr_core::model::Property;
use gramr_core::{GramrError, Statement, StatementFactory};

mod created_node;
mod created_relationship;
mod deleted_node;
mod deleted_relationship;
mod updated_node;
mod updated_relationship;

pub use created_node::CreatedNodeBuilder;
pub use created_relationship::CreatedRelationshipBuilder;
pub use deleted_node::DeletedNodeBuilder;
pub use deleted_relationship::DeletedRelationshipBuilder;
pub use updated_node::UpdatedNodeBuilder;
pub use updated_relationship::UpdatedRelationshipBuilder;

/// Compiles one category of changes into one batched statement.
pub trait StatementBuilder {
    /// Produce the statement for this builder's change set.
    fn build(&self) -> Result<Statement, GramrError>;
}

/// Backtick-quote an identifier for safe inclusion in query text.
fn escaped(ident: &str) -> String {
    format!("`{}`", ident.replace('`', "``"))
}

/// Render a label set as a colon-joined fragment of backticked labels.
fn label_fragment(labels: &[String]) -> String {
    labels
        .iter()
        .map(|l| format!(":{}", escaped(l)))
        .collect::<String>()
}

/// The harmless empty statement for an empty change category.
fn no_op(factory: &dyn StatementFactory) -> Statement {
    factory.statement(String::new(), HashMap::new())
}

/// Collect the distinct type names (or labels) of a batch, sorted.
fn distinct_types<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    names
        .into_iter()
        .map(str::to_owned)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Determine the version key governing a whole batch.
///
/// Every descriptor must agree on version presence and version key;
/// otherwise a single version predicate in the query text would silently
/// mis-handle part of the batch, so compilation fails instead.
fn batch_version_key<'a>(
    versions: impl IntoIterator<Item = Option<&'a Property>>,
    kind: &str,
) -> Result<Option<&'a str>, GramrError> {
    fn describe(key: Option<&str>) -> String {
        match key {
            Some(k) => format!("version property '{k}'"),
            None => "no version property".to_owned(),
        }
    }

    let mut iter = versions.into_iter();
    let first = match iter.next() {
        None => return Ok(None),
        Some(v) => v.map(Property::key),
    };
    for version in iter {
        let key = version.map(Property::key);
        if key != first {
            return Err(GramrError::inconsistent_versioning(
                kind,
                format!("one entry has {}, another has {}", describe(first), describe(key)),
            ));
        }
    }
    Ok(first)
}
