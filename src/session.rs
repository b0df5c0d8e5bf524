//! Driver session abstraction.
//!
//! The crate never talks to a database directly. Callers hand it anything
//! implementing [`Session`] — a thin capability set over one driver cursor —
//! and the script cursor drives it synchronously.

use serde::{Deserialize, Serialize};

use crate::{Col, Row};

/// Failure surfaced by a [`Session`] implementation.
///
/// The wrapper is transparent: the driver's own error is carried unmodified
/// and this crate adds no retry or translation on top of it.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct SessionError(Box<dyn std::error::Error + Send + Sync + 'static>);

impl SessionError {
    /// Wraps a driver error.
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>) -> Self {
        Self(source.into())
    }

    /// Wraps a plain message, for drivers without a structured error type.
    pub fn msg(message: impl Into<String>) -> Self {
        Self(message.into().into())
    }

    /// Borrows the underlying driver error.
    pub fn inner(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.0.as_ref()
    }
}

/// Autocommit setting applied once at activation, before any statement runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Autocommit {
    /// Leave the session's current setting untouched.
    #[default]
    Unset,
    On,
    Off,
}

/// Capability set consumed from the driver cursor.
///
/// One [`ScriptCursor`](crate::ScriptCursor) assumes exclusive use of the
/// session it was handed for its entire lifetime.
pub trait Session {
    /// Executes one statement, optionally binding a rectangular block of rows
    /// as positional parameters.
    fn execute(&mut self, sql: &str, rows: Option<&[Row]>) -> Result<(), SessionError>;

    /// Whether column metadata is available after the last execution, i.e. a
    /// pending result set exists.
    fn has_pending_columns(&self) -> bool;

    /// Column descriptors of the pending result set, in result order.
    /// Meaningful only when [`Session::has_pending_columns`] is true.
    fn column_descriptors(&self) -> Vec<Col>;

    /// Fetches up to `max_rows` rows of the pending result set. An empty
    /// page means the result set is drained.
    fn fetch_page(&mut self, max_rows: usize) -> Result<Vec<Row>, SessionError>;

    /// Affected or returned row count of the most recently executed statement.
    fn row_count(&self) -> u64;

    /// Toggles the driver's autocommit mode.
    fn set_autocommit(&mut self, enabled: bool) -> Result<(), SessionError>;

    /// Releases the underlying cursor. Must be idempotent.
    fn close(&mut self) -> Result<(), SessionError>;
}
