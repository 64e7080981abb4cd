
//! Compiled statements and the factory seam.
//!
//! A [`Statement`] is the unit handed to a Cypher-speaking executor: a query
//! template with `$named` placeholders, a parameter map whose `rows` entry
//! batches one row map per affected entity, and an optional
//! [`OptimisticLockingConfig`] the executor checks after execution.
//!
//! # Result-row projection contract
//!
//! Every statement that returns rows projects at least `ref` (a
//! caller-correlatable id) and `id` (the database id), plus the literal
//! discriminator `type` bound through the `$type` parameter. The
//! discriminator tags each row as [`RowKind::Node`] or [`RowKind::Rel`] so a
//! heterogeneous result stream from a multi-statement unit of work can be
//! demultiplexed without re-inspecting structure.

use std::collections::HashMap;

use crate::locking::OptimisticLockingConfig;
use crate::value::Value;

/// The result-row variant tag carried by every statement's `type` projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Node,
    Rel,
}

impl RowKind {
    /// The literal bound to the `$type` parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            RowKind::Node => "node",
            RowKind::Rel => "rel",
        }
    }
}

/// One parameterized, batched write statement.
#[derive(Debug)]
pub struct Statement {
    query: String,
    parameters: HashMap<String, Value>,
    optimistic_locking: Option<OptimisticLockingConfig>,
}

impl Statement {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn parameters(&self) -> &HashMap<String, Value> {
        &self.parameters
    }

    /// The locking expectation to verify against this statement's affected
    /// row count, if the batch was version-checked.
    pub fn optimistic_locking(&self) -> Option<&OptimisticLockingConfig> {
        self.optimistic_locking.as_ref()
    }

    /// True for the harmless empty statement produced from an empty change
    /// category. Callers skip no-op statements instead of executing them.
    pub fn is_noop(&self) -> bool {
        self.query.is_empty()
    }
}

/// Constructs [`Statement`] values, decoupled from transport.
///
/// Builders only call this construction contract; a transport can substitute
/// its own factory to wrap statements in protocol-specific envelopes.
pub trait StatementFactory {
    /// Construct a statement without a locking expectation.
    fn statement(&self, query: String, parameters: HashMap<String, Value>) -> Statement;

    /// Construct a statement carrying a locking expectation.
    fn versioned_statement(
        &self,
        query: String,
        parameters: HashMap<String, Value>,
        locking: OptimisticLockingConfig,
    ) -> Statement;
}

/// The default transport-neutral factory: pure construction, no validation
/// beyond what the types enforce.
#[derive(Debug, Default)]
pub struct RowStatementFactory;

impl StatementFactory for RowStatementFactory {
    fn statement(&self, query: String, parameters: HashMap<String, Value>) -> Statement {
        Statement {
            query,
            parameters,
            optimistic_locking: None,
        }
    }

    fn versioned_statement(
        &self,
        query: String,
        parameters: HashMap<String, Value>,
        locking: OptimisticLockingConfig,
    ) -> Statement {
        Statement {
            query,
            parameters,
            optimistic_locking: Some(locking),
        }
    }
}
