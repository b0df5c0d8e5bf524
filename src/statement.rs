//! Classified script statements and their execution contract.

use crate::session::{Session, SessionError};
use crate::Row;

/// Signal produced by one execution or fetch step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecOutcome {
    /// The statement left no pending result set.
    NothingToFetch,
    /// A pending result set exists and can be paged.
    SomethingToFetch,
}

/// One classified unit of a script. Text is frozen at parse time.
#[derive(Clone, Debug, PartialEq)]
pub enum ScriptStatement {
    /// Driver-control escape command, e.g. `{fn teradata_nativesql}`.
    /// Never yields rows.
    Extension { text: String },
    /// Parameterized insert with exactly one bound input batch.
    /// Never yields rows, but its execution updates the shared row count.
    BoundInsert { text: String, rows: Vec<Row> },
    /// Any other statement: DDL, SELECT, CALL, whitespace the driver will
    /// reject on its own. Yields rows iff the session reports pending
    /// column metadata after execution.
    Plain { text: String },
}

impl ScriptStatement {
    /// The statement text as it appeared in the script (lower-cased,
    /// comments stripped).
    pub fn text(&self) -> &str {
        match self {
            Self::Extension { text } | Self::Plain { text } => text,
            Self::BoundInsert { text, .. } => text,
        }
    }

    /// Executes the statement against the session and reports whether a
    /// pending result set exists. Session errors propagate unmodified.
    pub fn execute<S: Session + ?Sized>(
        &self,
        session: &mut S,
    ) -> Result<ExecOutcome, SessionError> {
        match self {
            Self::Extension { text } => {
                session.execute(text, None)?;
                Ok(ExecOutcome::NothingToFetch)
            }
            Self::BoundInsert { text, rows } => {
                session.execute(text, Some(rows))?;
                Ok(ExecOutcome::NothingToFetch)
            }
            Self::Plain { text } => {
                session.execute(text, None)?;
                if session.has_pending_columns() {
                    Ok(ExecOutcome::SomethingToFetch)
                } else {
                    Ok(ExecOutcome::NothingToFetch)
                }
            }
        }
    }
}
