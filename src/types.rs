use serde::{Deserialize, Serialize};

use crate::row_map::RowRef;
use crate::Value;

/// One row of a result set or an input batch.
pub type Row = Vec<Value>;

/// Column descriptor reported by the session after a statement executes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Col {
    /// Column name, de-duplicated within one result set.
    pub name: String,
    /// Driver-reported type, when the driver exposes one.
    pub decltype: Option<String>,
}

impl Col {
    pub fn new(name: impl Into<String>, decltype: Option<String>) -> Self {
        Self {
            name: name.into(),
            decltype,
        }
    }
}

/// One materialized page of a statement's result set.
///
/// Every page of the same result set carries the same column list, in the
/// same order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RowBatch {
    pub cols: Vec<Col>,
    pub rows: Vec<Row>,
}

impl RowBatch {
    pub fn new(cols: Vec<Col>, rows: Vec<Row>) -> Self {
        Self { cols, rows }
    }

    /// Number of rows in this batch.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names in result-set order.
    pub fn column_names(&self) -> Vec<&str> {
        self.cols.iter().map(|col| col.name.as_str()).collect()
    }

    /// Returns a name-addressable view of one row.
    pub fn row(&self, index: usize) -> Option<RowRef<'_>> {
        self.rows.get(index).map(|values| RowRef {
            cols: &self.cols,
            values,
        })
    }
}
