use crate::session::SessionError;

/// Error type returned by this crate.
///
/// Everything except `Session` is raised at activation time, before any
/// statement executes.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Zero statements remain after comment stripping and `;` splitting.
    #[error("no statements in script")]
    EmptyScript,
    /// A parameterized insert was found but the input batch queue is empty.
    #[error("insert statement '{statement}' requires at least {ordinal} input batches")]
    MissingBatch {
        /// 1-based count of parameterized statements seen so far, including
        /// the one that could not be bound.
        ordinal: usize,
        /// Identifying text of the statement that could not be bound.
        statement: String,
    },
    /// A supplied batch could not be converted to a rectangular 2-D row block.
    #[error("invalid input batch at position {index}: {reason}")]
    InvalidBatch { index: usize, reason: String },
    /// The configured fetch page size is zero.
    #[error("page size must be a positive integer")]
    InvalidPageSize,
    /// Failure surfaced by the underlying session, propagated unmodified.
    #[error(transparent)]
    Session(#[from] SessionError),
}
