
//! Builder for newly created nodes.

use std::collections::HashMap;

use gramr_core::model::NodeChange;
use gramr_core::value::{empty_row, put, row_value, rows_value, Value};
use gramr_core::{GramrError, RowKind, Statement, StatementFactory};

use super::{label_fragment, no_op, StatementBuilder};

/// Compiles newly created nodes sharing one label set into one batched
/// `CREATE` statement.
///
/// No database id exists yet, so each row is keyed by the caller-supplied
/// temporary reference, and the result projection maps the newly assigned
/// database id back to that reference. Properties travel as the create
/// payload (`SET n = row.props`); a declared version property rides in the
/// payload with its initial value. Creation is never version-checked.
///
/// Precondition: all nodes share the same label set (the compiler groups by
/// label set before invoking this builder, since labels are part of the
/// query text).
pub struct CreatedNodeBuilder<'a> {
    nodes: &'a [&'a NodeChange],
    factory: &'a dyn StatementFactory,
}

impl<'a> CreatedNodeBuilder<'a> {
    pub fn new(nodes: &'a [&'a NodeChange], factory: &'a dyn StatementFactory) -> Self {
        Self { nodes, factory }
    }
}

impl StatementBuilder for CreatedNodeBuilder<'_> {
    fn build(&self) -> Result<Statement, GramrError> {
        if self.nodes.is_empty() {
            return Ok(no_op(self.factory));
        }

        let labels = label_fragment(self.nodes[0].labels());
        let query = format!(
            "UNWIND $rows AS row CREATE (n{labels}) SET n = row.props \
             RETURN row.nodeRef AS ref, ID(n) AS id, $type AS type"
        );

        let mut rows = Vec::with_capacity(self.nodes.len());
        for node in self.nodes {
            let mut props = empty_row();
            for property in node.properties() {
                put(&mut props, property.key(), property.value().clone());
            }
            if let Some(version) = node.version() {
                put(&mut props, version.key(), version.value().clone());
            }
            let mut row = empty_row();
            put(&mut row, "nodeRef", Value::from(node.reference()));
            put(&mut row, "props", row_value(props));
            rows.push(row_value(row));
        }

        let mut parameters = HashMap::new();
        parameters.insert("rows".to_owned(), rows_value(rows));
        parameters.insert("type".to_owned(), Value::from(RowKind::Node.as_str()));

        Ok(self.factory.statement(query, parameters))
    }
}
