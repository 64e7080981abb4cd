
//! Builder for deleted nodes.

use std::collections::HashMap;

use gramr_core::model::NodeChange;
use gramr_core::value::{empty_row, put, row_value, rows_value, Value};
use gramr_core::{GramrError, OptimisticLockingConfig, RowKind, Statement, StatementFactory};

use super::{batch_version_key, distinct_types, escaped, no_op, StatementBuilder};

/// Compiles all deleted nodes into one batched `DELETE` statement.
///
/// The node is matched by database identity, so label sets may vary within
/// the batch. Any remaining relationships are swept up with an
/// `OPTIONAL MATCH` so the node deletion cannot fail on dangling references
/// (relationship deletions compiled in the same unit of work run first; this
/// covers relationships the unit of work never loaded).
pub struct DeletedNodeBuilder<'a> {
    nodes: &'a [&'a NodeChange],
    factory: &'a dyn StatementFactory,
}

impl<'a> DeletedNodeBuilder<'a> {
    pub fn new(nodes: &'a [&'a NodeChange], factory: &'a dyn StatementFactory) -> Self {
        Self { nodes, factory }
    }
}

impl StatementBuilder for DeletedNodeBuilder<'_> {
    fn build(&self) -> Result<Statement, GramrError> {
        if self.nodes.is_empty() {
            return Ok(no_op(self.factory));
        }

        let version_key = batch_version_key(self.nodes.iter().map(|n| n.version()), "node")?;

        let mut query = String::from("UNWIND $rows AS row MATCH (n) WHERE ID(n) = row.nodeId ");
        if let Some(key) = version_key {
            query.push_str(&format!("AND n.{k} = row.{k} ", k = escaped(key)));
        }
        query.push_str(
            "OPTIONAL MATCH (n)-[r0]-() DELETE r0, n \
             RETURN ID(n) AS ref, ID(n) AS id, $type AS type",
        );

        let mut rows = Vec::with_capacity(self.nodes.len());
        for node in self.nodes {
            let id = node
                .id()
                .ok_or_else(|| GramrError::missing_identity("deleted node"))?;
            let mut row = empty_row();
            put(&mut row, "nodeId", Value::from(id));
            if let Some(version) = node.version() {
                put(&mut row, version.key(), version.value().clone());
            }
            rows.push(row_value(row));
        }

        let mut parameters = HashMap::new();
        parameters.insert("rows".to_owned(), rows_value(rows));
        parameters.insert("type".to_owned(), Value::from(RowKind::Node.as_str()));

        if let Some(key) = version_key {
            let labels = self
                .nodes
                .iter()
                .flat_map(|n| n.labels().iter().map(String::as_str));
            let config =
                OptimisticLockingConfig::new(self.nodes.len(), distinct_types(labels), key);
            return Ok(self.factory.versioned_statement(query, parameters, config));
        }
        Ok(self.factory.statement(query, parameters))
    }
}
