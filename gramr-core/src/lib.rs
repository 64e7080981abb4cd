
//! Core types for gramr: the change model, compiled statements, property
//! converters, and optimistic-locking expectations.
//!
//! This crate is not meant to be used directly — use the [`gramr`] facade
//! crate instead, which re-exports everything you need.
//!
//! [`gramr`]: https://docs.rs/gramr

pub mod convert;
pub mod error;
pub mod locking;
pub mod model;
pub mod statement;
pub mod value;

pub use convert::{ConverterRegistry, PropertyConverter};
pub use error::GramrError;
pub use locking::OptimisticLockingConfig;
pub use model::{EdgeChange, NodeChange, Property};
pub use statement::{RowKind, RowStatementFactory, Statement, StatementFactory};
pub use value::{DomainValue, Value};
