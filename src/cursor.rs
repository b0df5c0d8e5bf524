//! Script execution and lazy result iteration.
//!
//! [`Script`] carries the construction inputs; [`Script::run`] activates it
//! against a session (parse, apply autocommit) and returns a
//! [`ScriptCursor`], which yields one materialized [`RowBatch`] per fetched
//! page across all row-producing statements of the script.

use std::collections::{HashMap, HashSet};

use crate::batch::BatchInput;
use crate::classify::classify_script;
use crate::session::{Autocommit, Session};
use crate::statement::{ExecOutcome, ScriptStatement};
use crate::{Col, Result, RowBatch, ScriptError};

/// Default fetch page size when the caller does not configure one.
pub const DEFAULT_PAGE_SIZE: usize = 100_000;

/// A script plus everything needed to run it: input batches for its
/// parameterized inserts, fetch page size, and the autocommit setting.
///
/// Nothing executes until [`Script::run`] is called.
#[derive(Clone, Debug)]
pub struct Script {
    text: String,
    batches: Vec<BatchInput>,
    page_size: usize,
    autocommit: Autocommit,
}

impl Script {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            batches: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
            autocommit: Autocommit::Unset,
        }
    }

    /// Supplies the ordered input batches, one per parameterized insert in
    /// script order. Replaces any previously supplied batches.
    pub fn with_batches<I, B>(mut self, batches: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<BatchInput>,
    {
        self.batches = batches.into_iter().map(Into::into).collect();
        self
    }

    /// Appends one input batch to the queue.
    pub fn push_batch(&mut self, batch: impl Into<BatchInput>) {
        self.batches.push(batch.into());
    }

    /// Sets the fetch page size. Zero is rejected at activation.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the autocommit mode applied once at activation.
    pub fn with_autocommit(mut self, autocommit: Autocommit) -> Self {
        self.autocommit = autocommit;
        self
    }

    /// Activates the script: classifies its statements (fail-fast — nothing
    /// executes if classification fails), applies the autocommit setting,
    /// and hands the session to the returned cursor.
    ///
    /// The session is closed before returning an activation error, so the
    /// underlying cursor resource is released on every exit path.
    pub fn run<S: Session>(self, mut session: S) -> Result<ScriptCursor<S>> {
        match self.activate(&mut session) {
            Ok(statements) => Ok(ScriptCursor {
                session,
                statements,
                current: 0,
                fetched_everything: true,
                length: 0,
                page_size: self.page_size,
                current_cols: Vec::new(),
                closed: false,
            }),
            Err(err) => {
                if let Err(close_err) = session.close() {
                    tracing::warn!(error = %close_err, "failed to close session after activation error");
                }
                Err(err)
            }
        }
    }

    fn activate<S: Session>(&self, session: &mut S) -> Result<Vec<ScriptStatement>> {
        if self.page_size == 0 {
            return Err(ScriptError::InvalidPageSize);
        }

        let statements = classify_script(&self.text, self.batches.clone())?;

        match self.autocommit {
            Autocommit::Unset => {}
            Autocommit::On => session.set_autocommit(true)?,
            Autocommit::Off => session.set_autocommit(false)?,
        }

        tracing::debug!(
            statements = statements.len(),
            page_size = self.page_size,
            autocommit = ?self.autocommit,
            "activated script"
        );
        Ok(statements)
    }
}

/// Activated script: a lazy iterator over the materialized row batches of
/// every row-producing statement, in script order.
///
/// Statements execute and pages fetch only when the next item is requested.
/// Statements that yield no rows are skipped transparently; an empty batch
/// is never yielded. The cursor owns its session exclusively and releases it
/// exactly once, on [`ScriptCursor::close`] or on drop.
#[derive(Debug)]
pub struct ScriptCursor<S: Session> {
    session: S,
    statements: Vec<ScriptStatement>,
    /// Index of the next statement to execute.
    current: usize,
    /// True when no partial result set is in flight.
    fetched_everything: bool,
    /// Last observed affected/returned row count.
    length: u64,
    page_size: usize,
    /// De-duplicated columns of the result set currently being paged.
    current_cols: Vec<Col>,
    closed: bool,
}

impl<S: Session> ScriptCursor<S> {
    /// Number of classified statements in the script.
    pub fn statement_count(&self) -> usize {
        self.statements.len()
    }

    /// The classified statements, in script order.
    pub fn statements(&self) -> &[ScriptStatement] {
        &self.statements
    }

    /// Affected or returned row count of the most recently executed
    /// statement. Not cumulative across the pages of one result set.
    pub fn last_row_count(&self) -> u64 {
        self.length
    }

    /// Configured fetch page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Releases the session cursor. Surfaces the close error that a plain
    /// drop would only log. Dropping afterwards is a no-op.
    pub fn close(mut self) -> Result<()> {
        self.close_session().map_err(ScriptError::from)
    }

    fn close_session(&mut self) -> std::result::Result<(), crate::session::SessionError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.session.close()
    }

    /// Executes statements from the current index until one leaves a pending
    /// result set or the list is exhausted.
    fn advance(&mut self) -> Result<ExecOutcome> {
        while self.current < self.statements.len() {
            let statement = &self.statements[self.current];
            self.current += 1;

            tracing::trace!(statement = statement.text().trim(), "executing statement");
            let outcome = statement.execute(&mut self.session)?;
            self.length = self.session.row_count();

            if outcome == ExecOutcome::SomethingToFetch {
                self.current_cols = dedupe_columns(self.session.column_descriptors());
                self.fetched_everything = false;
                return Ok(ExecOutcome::SomethingToFetch);
            }
        }
        Ok(ExecOutcome::NothingToFetch)
    }

    /// Pulls one bounded page of the pending result set. `None` means the
    /// result set is drained.
    fn fetch(&mut self) -> Result<Option<RowBatch>> {
        let rows = self.session.fetch_page(self.page_size)?;
        if rows.is_empty() {
            self.fetched_everything = true;
            self.current_cols.clear();
            return Ok(None);
        }
        tracing::trace!(rows = rows.len(), "fetched page");
        Ok(Some(RowBatch::new(self.current_cols.clone(), rows)))
    }
}

impl<S: Session> Iterator for ScriptCursor<S> {
    type Item = Result<RowBatch>;

    fn next(&mut self) -> Option<Self::Item> {
        // One external step may pass through several internal states: an
        // empty page or a run of non-producing statements must not surface
        // as an item.
        loop {
            if !self.fetched_everything {
                match self.fetch() {
                    Ok(Some(batch)) => return Some(Ok(batch)),
                    Ok(None) => continue,
                    Err(err) => return Some(Err(err)),
                }
            }

            if self.current >= self.statements.len() {
                return None;
            }

            match self.advance() {
                Ok(ExecOutcome::SomethingToFetch) => continue,
                Ok(ExecOutcome::NothingToFetch) => return None,
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

impl<S: Session> Drop for ScriptCursor<S> {
    fn drop(&mut self) {
        if let Err(err) = self.close_session() {
            tracing::warn!(error = %err, "failed to close session cursor");
        }
    }
}

/// De-duplicates column names, preserving first-occurrence order.
///
/// Recurring base names get `_1`, `_2`, ... suffixes, one counter per base
/// name with no upper bound. A suffixed candidate that collides with an
/// already assigned name keeps counting up.
fn dedupe_columns(cols: Vec<Col>) -> Vec<Col> {
    let mut counters: HashMap<String, usize> = HashMap::new();
    let mut assigned: HashSet<String> = HashSet::new();

    cols.into_iter()
        .map(|col| {
            let mut n = counters.get(&col.name).copied().unwrap_or(0);
            let name = loop {
                let candidate = if n == 0 {
                    col.name.clone()
                } else {
                    format!("{}_{n}", col.name)
                };
                if !assigned.contains(&candidate) {
                    break candidate;
                }
                n += 1;
            };
            counters.insert(col.name.clone(), n + 1);
            assigned.insert(name.clone());
            Col {
                name,
                decltype: col.decltype,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::dedupe_columns;
    use crate::Col;

    fn names(cols: &[Col]) -> Vec<&str> {
        cols.iter().map(|col| col.name.as_str()).collect()
    }

    #[test]
    fn unique_names_pass_through() {
        let cols = dedupe_columns(vec![Col::new("a", None), Col::new("b", None)]);
        assert_eq!(names(&cols), vec!["a", "b"]);
    }

    #[test]
    fn duplicate_names_get_suffixes_in_order() {
        let cols = dedupe_columns(vec![
            Col::new("x", Some("integer".to_owned())),
            Col::new("x", Some("varchar".to_owned())),
            Col::new("x", None),
        ]);
        assert_eq!(names(&cols), vec!["x", "x_1", "x_2"]);
        assert_eq!(cols[1].decltype.as_deref(), Some("varchar"));
    }

    #[test]
    fn suffix_collision_with_real_column_keeps_counting() {
        let cols = dedupe_columns(vec![
            Col::new("x_1", None),
            Col::new("x", None),
            Col::new("x", None),
        ]);
        assert_eq!(names(&cols), vec!["x_1", "x", "x_2"]);
    }
}
