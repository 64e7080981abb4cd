
//! The statement compiler: one unit of work in, an ordered statement list out.

use std::collections::BTreeMap;

use gramr_core::model::{EdgeChange, NodeChange};
use gramr_core::{GramrError, RowStatementFactory, Statement, StatementFactory};

use crate::builders::{
    CreatedNodeBuilder, CreatedRelationshipBuilder, DeletedNodeBuilder,
    DeletedRelationshipBuilder, StatementBuilder, UpdatedNodeBuilder, UpdatedRelationshipBuilder,
};
use crate::changeset::ChangeSet;

/// Compiles a [`ChangeSet`] into the ordered list of batched write statements
/// representing one complete unit of work.
///
/// Statement order is fixed: created nodes, created relationships, updated
/// nodes, updated relationships, deleted relationships, deleted nodes.
/// Relationships are deleted before their end-nodes to avoid
/// dangling-reference failures, and nodes are created before relationships
/// that reference them (relationship endpoints may also defer resolution via
/// temporary reference ids).
///
/// Created nodes are grouped by label set and created relationships by type,
/// because labels and types are part of the query text; each group compiles
/// to its own statement. Compilation is all-or-nothing — a builder failure
/// propagates and no partial list is returned.
///
/// Compilation is synchronous and runs on the calling thread. A compiler
/// holds no per-unit-of-work state and may be reused across change sets.
pub struct StatementCompiler {
    factory: Box<dyn StatementFactory>,
}

impl StatementCompiler {
    /// A compiler producing plain transport-neutral statements.
    pub fn new() -> Self {
        Self::with_factory(Box::new(RowStatementFactory))
    }

    /// A compiler delegating statement construction to a custom factory.
    pub fn with_factory(factory: Box<dyn StatementFactory>) -> Self {
        Self { factory }
    }

    /// Compile the change set into its ordered statement list.
    ///
    /// No-op statements from empty categories are filtered out; an empty
    /// change set compiles to an empty list.
    pub fn compile(&self, changes: &ChangeSet) -> Result<Vec<Statement>, GramrError> {
        let factory = self.factory.as_ref();
        let mut statements = Vec::new();

        for group in group_by_labels(changes.created_nodes()).values() {
            push(&mut statements, CreatedNodeBuilder::new(group, factory).build()?);
        }
        for group in group_by_type(changes.created_relationships()).values() {
            push(&mut statements, CreatedRelationshipBuilder::new(group, factory).build()?);
        }
        for group in group_by_labels(changes.updated_nodes()).values() {
            push(&mut statements, UpdatedNodeBuilder::new(group, factory).build()?);
        }

        let updated_rels: Vec<&EdgeChange> = changes.updated_relationships().iter().collect();
        push(&mut statements, UpdatedRelationshipBuilder::new(&updated_rels, factory).build()?);

        let deleted_rels: Vec<&EdgeChange> = changes.deleted_relationships().iter().collect();
        push(&mut statements, DeletedRelationshipBuilder::new(&deleted_rels, factory).build()?);

        let deleted_nodes: Vec<&NodeChange> = changes.deleted_nodes().iter().collect();
        push(&mut statements, DeletedNodeBuilder::new(&deleted_nodes, factory).build()?);

        log::debug!(
            "compiled {} statements ({} created nodes, {} created rels, {} updated nodes, {} updated rels, {} deleted rels, {} deleted nodes)",
            statements.len(),
            changes.created_nodes().len(),
            changes.created_relationships().len(),
            changes.updated_nodes().len(),
            changes.updated_relationships().len(),
            changes.deleted_relationships().len(),
            changes.deleted_nodes().len(),
        );
        Ok(statements)
    }
}

impl Default for StatementCompiler {
    fn default() -> Self {
        Self::new()
    }
}

fn push(statements: &mut Vec<Statement>, statement: Statement) {
    if statement.is_noop() {
        return;
    }
    log::trace!("statement: {}", statement.query());
    statements.push(statement);
}

/// Group nodes by their exact label list. `BTreeMap` keeps group order
/// deterministic across compiles.
fn group_by_labels(nodes: &[NodeChange]) -> BTreeMap<Vec<String>, Vec<&NodeChange>> {
    let mut groups: BTreeMap<Vec<String>, Vec<&NodeChange>> = BTreeMap::new();
    for node in nodes {
        groups.entry(node.labels().to_vec()).or_default().push(node);
    }
    groups
}

/// Group edges by relationship type.
fn group_by_type(edges: &[EdgeChange]) -> BTreeMap<String, Vec<&EdgeChange>> {
    let mut groups: BTreeMap<String, Vec<&EdgeChange>> = BTreeMap::new();
    for edge in edges {
        groups.entry(edge.rel_type().to_owned()).or_default().push(edge);
    }
    groups
}
