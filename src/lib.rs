//! `sqlscript` executes a multi-statement SQL script against a driver
//! session and exposes every result set it produces as one lazy sequence of
//! row batches.
//!
//! A script is a `;`-delimited sequence of SQL and driver-extension
//! statements. Parameterized `insert into t (?)` statements are bound to
//! caller-supplied row batches in script order. Key entry points:
//! - [`Script::new`] — construction inputs (text, batches, page size,
//!   autocommit)
//! - [`Script::run`] — activation against a [`Session`]
//! - [`ScriptCursor`] — the resulting iterator of [`RowBatch`] items
//!
//! The crate never connects to a database itself; callers implement
//! [`Session`] over their driver's cursor.

mod batch;
mod classify;
mod cursor;
mod error;
mod row_map;
mod session;
mod statement;
mod types;
mod value;

pub use batch::BatchInput;
pub use cursor::{Script, ScriptCursor, DEFAULT_PAGE_SIZE};
pub use error::ScriptError;
pub use row_map::RowRef;
pub use session::{Autocommit, Session, SessionError};
pub use statement::{ExecOutcome, ScriptStatement};
pub use types::{Col, Row, RowBatch};
pub use value::Value;

pub type Result<T> = std::result::Result<T, ScriptError>;
