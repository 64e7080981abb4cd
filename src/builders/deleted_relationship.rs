
//! Builder for deleted relationships.

use std::collections::HashMap;

use gramr_core::model::EdgeChange;
use gramr_core::value::{empty_row, put, row_value, rows_value, Value};
use gramr_core::{GramrError, OptimisticLockingConfig, RowKind, Statement, StatementFactory};

use super::{batch_version_key, distinct_types, escaped, no_op, StatementBuilder};

/// Compiles all deleted relationships into one batched `DELETE` statement.
///
/// The relationship is matched purely by its database identity — type and
/// endpoints are not part of the match predicate. If the batch is versioned,
/// the match is additionally constrained by an equality check on the current
/// version value, and a locking config carrying the batch size is attached.
pub struct DeletedRelationshipBuilder<'a> {
    edges: &'a [&'a EdgeChange],
    factory: &'a dyn StatementFactory,
}

impl<'a> DeletedRelationshipBuilder<'a> {
    pub fn new(edges: &'a [&'a EdgeChange], factory: &'a dyn StatementFactory) -> Self {
        Self { edges, factory }
    }
}

impl StatementBuilder for DeletedRelationshipBuilder<'_> {
    fn build(&self) -> Result<Statement, GramrError> {
        if self.edges.is_empty() {
            return Ok(no_op(self.factory));
        }

        let version_key =
            batch_version_key(self.edges.iter().map(|e| e.version()), "relationship")?;

        let mut query = String::from("UNWIND $rows AS row MATCH ()-[r]-() WHERE ID(r) = row.relId ");
        if let Some(key) = version_key {
            query.push_str(&format!("AND r.{k} = row.{k} ", k = escaped(key)));
        }
        query.push_str("DELETE r RETURN ID(r) AS ref, ID(r) AS id, $type AS type");

        let mut rows = Vec::with_capacity(self.edges.len());
        for edge in self.edges {
            let id = edge
                .id()
                .ok_or_else(|| GramrError::missing_identity("deleted relationship"))?;
            let mut row = empty_row();
            put(&mut row, "relId", Value::from(id));
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
