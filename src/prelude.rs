//! Convenience re-exports for common gramr usage.
//!
//! ```rust
//! use gramr::prelude::*;
//! ```
//!
//! This imports the compiler and change-set types, the schema registry with
//! its mapping declarations, the change descriptors, the statement and
//! locking types, and the error type.

pub use crate::builders::StatementBuilder;
pub use crate::changeset::ChangeSet;
pub use crate::compiler::StatementCompiler;
pub use crate::schema::{EntityMapping, FieldMapping, RelationshipMapping, SchemaRegistry};
pub use gramr_core::{
    DomainValue, EdgeChange, GramrError, NodeChange, OptimisticLockingConfig, Property, RowKind,
    RowStatementFactory, Statement, StatementFactory, Value,
};
