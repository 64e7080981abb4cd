
//! Builder for updated nodes.

use std::collections::HashMap;

use gramr_core::model::NodeChange;
use gramr_core::value::{empty_row, put, row_value, rows_value, Value};
use gramr_core::{GramrError, OptimisticLockingConfig, RowKind, Statement, StatementFactory};

use super::{batch_version_key, distinct_types, escaped, label_fragment, no_op, StatementBuilder};

/// Compiles updated nodes sharing one label set into one batched `SET`
/// statement.
///
/// The node is matched by database identity; the property delta is merged
/// (`SET n += row.props`) and the label set is re-asserted. A versioned
/// batch constrains the match on the current version value, bumps the stored
/// version by one, and attaches a locking config.
///
/// Precondition: all nodes share the same label set (the compiler groups by
/// label set before invoking this builder).
pub struct UpdatedNodeBuilder<'a> {
    nodes: &'a [&'a NodeChange],
    factory: &'a dyn StatementFactory,
}

impl<'a> UpdatedNodeBuilder<'a> {
    pub fn new(nodes: &'a [&'a NodeChange], factory: &'a dyn StatementFactory) -> Self {
        Self { nodes, factory }
    }
}

impl StatementBuilder for UpdatedNodeBuilder<'_> {
    fn build(&self) -> Result<Statement, GramrError> {
        if self.nodes.is_empty() {
            return Ok(no_op(self.factory));
        }

        let version_key = batch_version_key(self.nodes.iter().map(|n| n.version()), "node")?;
        let labels = self.nodes[0].labels();

        let mut query = String::from("UNWIND $rows AS row MATCH (n) WHERE ID(n) = row.nodeId ");
        if let Some(key) = version_key {
            query.push_str(&format!(
                "AND n.{k} = row.{k} SET n.{k} = row.{k} + 1 ",
                k = escaped(key)
            ));
        }
        if !labels.is_empty() {
            query.push_str(&format!("SET n{} ", label_fragment(labels)));
        }
        query.push_str("SET n += row.props RETURN row.nodeId AS ref, ID(n) AS id, $type AS type");

        let mut rows = Vec::with_capacity(self.nodes.len());
        for node in self.nodes {
            let id = node
                .id()
                .ok_or_else(|| GramrError::missing_identity("updated node"))?;
            let mut props = empty_row();
            for property in node.properties() {
                put(&mut props, property.key(), property.value().clone());
            }
            let mut row = empty_row();
            put(&mut row, "nodeId", Value::from(id));
            put(&mut row, "props", row_value(props));
            if let Some(version) = node.version() {
                put(&mut row, version.key(), version.value().clone());
            }
            rows.push(row_value(row));
        }

        let mut parameters = HashMap::new();
        parameters.insert("rows".to_owned(), rows_value(rows));
        parameters.insert("type".to_owned(), Value::from(RowKind::Node.as_str()));

        if let Some(key) = version_key {
            let config = OptimisticLockingConfig::new(
                self.nodes.len(),
                distinct_types(labels.iter().map(String::as_str)),
                key,
            );
            return Ok(self.factory.versioned_statement(query, parameters, config));
        }
        Ok(self.factory.statement(query, parameters))
    }
}
