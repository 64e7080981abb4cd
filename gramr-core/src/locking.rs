
//! Optimistic-locking expectations for version-checked statements.

use crate::error::GramrError;

/// The expected outcome of executing one version-checked batched statement.
///
/// A version predicate in the query makes concurrently-modified entities
/// fall out of the `MATCH`, so the statement touches fewer rows than the
/// batch contributed. The compiler records the expectation; the executor
/// compares it against the actual affected-row count after execution.
///
/// Invariant: `expected()` equals the number of rows bound to the
/// statement's `$rows` parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimisticLockingConfig {
    expected: usize,
    types: Vec<String>,
    version_key: String,
}

impl OptimisticLockingConfig {
    pub fn new(expected: usize, types: Vec<String>, version_key: impl Into<String>) -> Self {
        Self {
            expected,
            types,
            version_key: version_key.into(),
        }
    }

    /// The number of rows the statement must touch.
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// The distinct relationship types (or node labels) in the batch.
    pub fn types(&self) -> &[String] {
        &self.types
    }

    /// The key of the version property the statement checked.
    pub fn version_key(&self) -> &str {
        &self.version_key
    }

    /// Verify the actual affected-row count reported by the executor.
    ///
    /// Fewer rows than expected means at least one entity in the batch was
    /// concurrently modified and its version predicate no longer matched.
    ///
    /// ```rust
    /// # use gramr_core::OptimisticLockingConfig;
    /// let config = OptimisticLockingConfig::new(2, vec!["KNOWS".into()], "version");
    /// assert!(config.check(2).is_ok());
    /// assert!(config.check(1).is_err());
    /// ```
    pub fn check(&self, actual: usize) -> Result<(), GramrError> {
        if actual < self.expected {
            return Err(GramrError::StaleWrite {
                expected: self.expected,
                actual,
                types: self.types.clone(),
                version_key: self.version_key.clone(),
            });
        }
        Ok(())
    }
}
