//! Caller-supplied input batches for parameterized insert statements.

use crate::{Row, RowBatch, ScriptError};

/// One input batch bound to one parameterized insert statement.
///
/// Either a raw 2-D block of rows or a tabular result convertible to one,
/// e.g. a [`RowBatch`] fetched from an earlier query.
#[derive(Clone, Debug, PartialEq)]
pub enum BatchInput {
    Rows(Vec<Row>),
    Table(RowBatch),
}

impl BatchInput {
    /// Converts to a rectangular row block, validating shape.
    ///
    /// `index` is the 0-based position of this batch in the supplied queue,
    /// used for diagnostics only.
    pub(crate) fn into_rows(self, index: usize) -> Result<Vec<Row>, ScriptError> {
        let (rows, width) = match self {
            Self::Rows(rows) => {
                let width = rows.first().map(Vec::len);
                (rows, width)
            }
            Self::Table(table) => {
                let width = Some(table.cols.len());
                (table.rows, width)
            }
        };

        if let Some(width) = width {
            for (row_index, row) in rows.iter().enumerate() {
                if row.len() != width {
                    return Err(ScriptError::InvalidBatch {
                        index,
                        reason: format!(
                            "row {row_index} has {} values, expected {width}",
                            row.len()
                        ),
                    });
                }
            }
        }

        Ok(rows)
    }
}

impl From<Vec<Row>> for BatchInput {
    fn from(rows: Vec<Row>) -> Self {
        Self::Rows(rows)
    }
}

impl From<RowBatch> for BatchInput {
    fn from(table: RowBatch) -> Self {
        Self::Table(table)
    }
}

#[cfg(test)]
mod tests {
    use super::BatchInput;
    use crate::{Col, RowBatch, ScriptError, Value};

    #[test]
    fn raw_rows_pass_through() {
        let input = BatchInput::from(vec![
            vec![Value::integer(1), Value::text("a")],
            vec![Value::integer(2), Value::text("b")],
        ]);
        let rows = input.into_rows(0).expect("rectangular rows must convert");
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn table_converts_to_rows() {
        let table = RowBatch::new(
            vec![Col::new("day_id", None)],
            vec![vec![Value::integer(1)], vec![Value::integer(2)]],
        );
        let rows = BatchInput::from(table)
            .into_rows(0)
            .expect("table must convert");
        assert_eq!(rows, vec![vec![Value::integer(1)], vec![Value::integer(2)]]);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let input = BatchInput::from(vec![
            vec![Value::integer(1), Value::integer(2)],
            vec![Value::integer(3)],
        ]);
        let err = input.into_rows(1).expect_err("ragged input must fail");
        match err {
            ScriptError::InvalidBatch { index, reason } => {
                assert_eq!(index, 1);
                assert!(reason.contains("row 1"));
            }
            other => panic!("expected InvalidBatch, got {other:?}"),
        }
    }

    #[test]
    fn table_wider_than_rows_is_rejected() {
        let table = RowBatch::new(
            vec![Col::new("a", None), Col::new("b", None)],
            vec![vec![Value::integer(1)]],
        );
        let err = BatchInput::from(table)
            .into_rows(0)
            .expect_err("mismatched width must fail");
        assert!(matches!(err, ScriptError::InvalidBatch { index: 0, .. }));
    }

    #[test]
    fn empty_batch_is_allowed() {
        let rows = BatchInput::from(Vec::new())
            .into_rows(0)
            .expect("empty batch is a valid no-op insert");
        assert!(rows.is_empty());
    }
}
