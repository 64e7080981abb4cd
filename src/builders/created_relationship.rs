
//! Builder for newly created relationships.

use std::collections::HashMap;

use gramr_core::model::EdgeChange;
use gramr_core::value::{empty_row, put, row_value, rows_value, Value};
use gramr_core::{GramrError, RowKind, Statement, StatementFactory};

use super::{escaped, no_op, StatementBuilder};

/// Compiles newly created relationships of one type into one batched `MERGE`
/// statement.
///
/// Endpoints are matched by node reference id; references pointing at nodes
/// created in the same unit of work are temporary and must be resolved to
/// database ids by the executor before binding. Each row carries the edge's
/// temporary reference, projected back as `ref` alongside the assigned
/// database id. Creation is never version-checked.
///
/// Precondition: all edges share the same relationship type (the compiler
/// groups by type before invoking this builder, since the type is part of
/// the `MERGE` pattern).
pub struct CreatedRelationshipBuilder<'a> {
    edges: &'a [&'a EdgeChange],
    factory: &'a dyn StatementFactory,
}

impl<'a> CreatedRelationshipBuilder<'a> {
    pub fn new(edges: &'a [&'a EdgeChange], factory: &'a dyn StatementFactory) -> Self {
        Self { edges, factory }
    }
}

impl StatementBuilder for CreatedRelationshipBuilder<'_> {
    fn build(&self) -> Result<Statement, GramrError> {
        if self.edges.is_empty() {
            return Ok(no_op(self.factory));
        }

        let rel_type = escaped(self.edges[0].rel_type());
        let query = format!(
            "UNWIND $rows AS row \
             MATCH (startNode) WHERE ID(startNode) = row.startNodeId \
             MATCH (endNode) WHERE ID(endNode) = row.endNodeId \
             MERGE (startNode)-[rel:{rel_type}]->(endNode) SET rel += row.props \
             RETURN row.relRef AS ref, ID(rel) AS id, $type AS type"
        );

        let mut rows = Vec::with_capacity(self.edges.len());
        for edge in self.edges {
            let mut props = empty_row();
            for property in edge.properties() {
                put(&mut props, property.key(), property.value().clone());
            }
            if let Some(version) = edge.version() {
                put(&mut props, version.key(), version.value().clone());
            }
            let mut row = empty_row();
            put(&mut row, "startNodeId", Value::from(edge.start_node()));
            put(&mut row, "endNodeId", Value::from(edge.end_node()));
            put(&mut row, "relRef", Value::from(edge.reference()));
            put(&mut row, "props", row_value(props));
            rows.push(row_value(row));
        }

        let mut parameters = HashMap::new();
        parameters.insert("rows".to_owned(), rows_value(rows));
        parameters.insert("type".to_owned(), Value::from(RowKind::Rel.as_str()));

        Ok(self.factory.statement(query, parameters))
    }
}
