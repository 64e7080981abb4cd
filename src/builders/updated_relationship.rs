
//! Builder for updated relationships.

use std::collections::HashMap;

use gramr_core::model::EdgeChange;
use gramr_core::value::{empty_row, put, row_value, rows_value, Value};
use gramr_core::{GramrError, OptimisticLockingConfig, RowKind, Statement, StatementFactory};

use super::{batch_version_key, distinct_types, escaped, no_op, StatementBuilder};

/// Compiles all updated relationships into one batched `SET` statement.
///
/// The relationship is matched purely by database identity, so types may vary
/// within the batch. A versioned batch constrains the match on the current
/// version value, bumps the stored version by one, and attaches a locking
/// config.
pub struct UpdatedRelationshipBuilder<'a> {
    edges: &'a [&'a EdgeChange],
    factory: &'a dyn StatementFactory,
}

impl<'a> UpdatedRelationshipBuilder<'a> {
    pub fn new(edges: &'a [&'a EdgeChange], factory: &'a dyn StatementFactory) -> Self {
        Self { edges, factory }
    }
}

impl StatementBuilder for UpdatedRelationshipBuilder<'_> {
    fn build(&self) -> Result<Statement, GramrError> {
        if self.edges.is_empty() {
            return Ok(no_op(self.factory));
        }

        let version_key =
            batch_version_key(self.edges.iter().map(|e| e.version()), "relationship")?;

        let mut query = String::from("UNWIND $rows AS row MATCH ()-[r]-() WHERE ID(r) = row.relId ");
        if let Some(key) = version_key {
            query.push_str(&format!(
                "AND r.{k} = row.{k} SET r.{k} = row.{k} + 1 ",
                k = escaped(key)
            ));
        }
        query.push_str("SET r += row.props RETURN row.relId AS ref, ID(r) AS id, $type AS type");

        let mut rows = Vec::with_capacity(self.edges.len());
        for edge in self.edges {
            let id = edge
                .id()
                .ok_or_else(|| GramrError::missing_identity("updated relationship"))?;
            let mut props = empty_row();
            for property in edge.properties() {
                put(&mut props, property.key(), property.value().clone());
            }
            let mut row = empty_row();
            put(&mut row, "relId", Value::from(id));
            put(&mut row, "props", row_value(props));
            if let Some(version) = edge.version() {
                put(&mut row, version.key(), version.value().clone());
            }
            rows.push(row_value(row));
        }

        let mut parameters = HashMap::new();
        parameters.insert("rows".to_owned(), rows_value(rows));
        parameters.insert("type".to_owned(), Value::from(RowKind::Rel.as_str()));

        if let Some(key) = version_key {
            let config = OptimisticLockingConfig::new(
                self.edges.len(),
                distinct_types(self.edges.iter().map(|e| e.rel_type())),
                key,
            );
            return Ok(self.factory.versioned_statement(query, parameters, config));
        }
        Ok(self.factory.statement(query, parameters))
    }
}
