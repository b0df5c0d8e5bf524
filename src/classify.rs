//! Script text classification.
//!
//! Splits a raw script into `;`-terminated statements and classifies each
//! one, consuming caller-supplied input batches as parameterized inserts are
//! recognized.

use std::collections::VecDeque;
use std::sync::LazyLock;

use regex::Regex;

use crate::batch::BatchInput;
use crate::statement::ScriptStatement;
use crate::{Row, ScriptError};

static BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("block comment pattern must compile"));

static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)--.*$").expect("line comment pattern must compile"));

/// ODBC-style driver escape, e.g. `{fn teradata_autocommit_off}`.
static EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{fn [\w()]+\}").expect("extension pattern must compile"));

/// `insert into <identifier> [values] (<?-placeholder-list>)` and nothing
/// else. `INSERT ... SELECT` carries no placeholder list and must not match.
static BOUND_INSERT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*insert\s+into\s+[\w.]+\s+(?:values\s*)?\(\s*\?[?,\s]*\)\s*$")
        .expect("bound insert pattern must compile")
});

/// Strips block and line comments, then lower-cases the script.
fn normalize(script: &str) -> String {
    let without_block = BLOCK_COMMENT.replace_all(script, "");
    let without_line = LINE_COMMENT.replace_all(&without_block, "");
    without_line.to_lowercase()
}

/// Parses a script into an ordered statement list.
///
/// Batches are consumed left to right, one per parameterized insert, in the
/// order the inserts appear in the script. Classification is pure: the same
/// script and batch contents always produce the same statement sequence.
pub(crate) fn classify_script(
    script: &str,
    batches: Vec<BatchInput>,
) -> Result<Vec<ScriptStatement>, ScriptError> {
    let mut queue: VecDeque<Vec<Row>> = VecDeque::with_capacity(batches.len());
    for (index, batch) in batches.into_iter().enumerate() {
        queue.push_back(batch.into_rows(index)?);
    }

    let cleaned = normalize(script);

    // Split on literal ';', discarding the fragment after the final ';'.
    // A ';' inside a string literal or quoted identifier mis-splits here;
    // see the open-question test below.
    let fragments: Vec<&str> = cleaned.split(';').collect();

    let mut statements = Vec::new();
    let mut insert_count = 0usize;

    for fragment in &fragments[..fragments.len() - 1] {
        if EXTENSION.is_match(fragment) {
            statements.push(ScriptStatement::Extension {
                text: (*fragment).to_owned(),
            });
        } else if BOUND_INSERT.is_match(fragment) {
            insert_count += 1;
            match queue.pop_front() {
                Some(rows) => statements.push(ScriptStatement::BoundInsert {
                    text: (*fragment).to_owned(),
                    rows,
                }),
                None => {
                    return Err(ScriptError::MissingBatch {
                        ordinal: insert_count,
                        statement: fragment.trim().to_owned(),
                    })
                }
            }
        } else {
            statements.push(ScriptStatement::Plain {
                text: (*fragment).to_owned(),
            });
        }
    }

    if statements.is_empty() {
        return Err(ScriptError::EmptyScript);
    }

    tracing::debug!(
        statements = statements.len(),
        bound_inserts = insert_count,
        "classified script"
    );
    Ok(statements)
}

#[cfg(test)]
mod tests {
    use super::classify_script;
    use crate::statement::ScriptStatement;
    use crate::{ScriptError, Value};

    fn one_batch() -> Vec<crate::BatchInput> {
        vec![vec![vec![Value::integer(1)]].into()]
    }

    #[test]
    fn plain_select_classifies() {
        let statements = classify_script("select 1 as x;", Vec::new()).expect("must classify");
        assert_eq!(statements.len(), 1);
        assert!(matches!(&statements[0], ScriptStatement::Plain { text } if text == "select 1 as x"));
    }

    #[test]
    fn extension_takes_priority_over_plain() {
        let script = "{fn teradata_nativesql}{fn teradata_autocommit_on};";
        let statements = classify_script(script, Vec::new()).expect("must classify");
        assert!(matches!(&statements[0], ScriptStatement::Extension { .. }));
    }

    #[test]
    fn bound_insert_consumes_a_batch() {
        let batch = vec![vec![Value::integer(1), Value::integer(2)]];
        let statements =
            classify_script("insert into t (?,?);", vec![batch.into()]).expect("must classify");
        match &statements[0] {
            ScriptStatement::BoundInsert { rows, .. } => assert_eq!(rows.len(), 1),
            other => panic!("expected BoundInsert, got {other:?}"),
        }
    }

    #[test]
    fn insert_with_values_keyword_is_bound() {
        let statements =
            classify_script("insert into t values (?, ?, ?);", vec![Vec::new().into()])
                .expect("must classify");
        assert!(matches!(&statements[0], ScriptStatement::BoundInsert { .. }));
    }

    #[test]
    fn insert_select_is_plain_and_consumes_no_batch() {
        let statements = classify_script(
            "insert into t select * from s; insert into t (?);",
            one_batch(),
        )
        .expect("must classify");
        assert!(matches!(&statements[0], ScriptStatement::Plain { .. }));
        assert!(matches!(&statements[1], ScriptStatement::BoundInsert { .. }));
    }

    #[test]
    fn insert_with_literal_values_is_plain() {
        let statements =
            classify_script("insert into t values (1, 'a');", Vec::new()).expect("must classify");
        assert!(matches!(&statements[0], ScriptStatement::Plain { .. }));
    }

    #[test]
    fn missing_batch_reports_one_based_ordinal() {
        let err = classify_script("insert into t (?); insert into t (?);", one_batch())
            .expect_err("second insert has no batch");
        match err {
            ScriptError::MissingBatch { ordinal, statement } => {
                assert_eq!(ordinal, 2);
                assert_eq!(statement, "insert into t (?)");
            }
            other => panic!("expected MissingBatch, got {other:?}"),
        }
    }

    #[test]
    fn comments_are_stripped() {
        let script = "
            /* multi
               line */
            select 1; -- trailing comment
            -- whole line comment
            select 2;
        ";
        let statements = classify_script(script, Vec::new()).expect("must classify");
        assert_eq!(statements.len(), 2);
        assert!(statements[0].text().contains("select 1"));
        assert!(!statements[0].text().contains("line"));
        assert!(statements[1].text().contains("select 2"));
        assert!(!statements[1].text().contains("comment"));
    }

    #[test]
    fn block_comment_containing_semicolon_does_not_split() {
        let statements =
            classify_script("select 1 /* not ; a split */;", Vec::new()).expect("must classify");
        assert_eq!(statements.len(), 1);
    }

    #[test]
    fn comments_and_whitespace_only_is_empty() {
        let err = classify_script("  /* nothing */ -- here\n  ", Vec::new())
            .expect_err("must be empty");
        assert!(matches!(err, ScriptError::EmptyScript));
    }

    #[test]
    fn no_terminated_statement_is_empty() {
        let err = classify_script("select 1", Vec::new()).expect_err("missing ';'");
        assert!(matches!(err, ScriptError::EmptyScript));
    }

    #[test]
    fn classification_is_idempotent() {
        let script = "{fn teradata_autocommit_off}; insert into t (?); select * from t;";
        let first = classify_script(script, one_batch()).expect("must classify");
        let second = classify_script(script, one_batch()).expect("must classify");
        assert_eq!(first, second);
    }

    #[test]
    fn text_is_lowercased() {
        let statements = classify_script("SELECT A FROM B;", Vec::new()).expect("must classify");
        assert_eq!(statements[0].text(), "select a from b");
    }

    // Empty fragments between semicolons stay Plain statements and reach
    // the driver, which rejects them itself. Preserved behavior.
    #[test]
    fn empty_fragment_between_semicolons_stays_plain() {
        let statements = classify_script("select 1;;select 2;", Vec::new()).expect("must classify");
        assert_eq!(statements.len(), 3);
        assert!(matches!(&statements[1], ScriptStatement::Plain { text } if text.is_empty()));
        assert_eq!(statements[2].text(), "select 2");
    }

    // Open question: splitting on literal ';' mis-splits semicolons inside
    // string literals. Callers rely on the current semantics for working
    // scripts, so the behavior is pinned here rather than fixed.
    #[test]
    fn semicolon_inside_string_literal_splits_naively() {
        let statements = classify_script("select ';' as x;", Vec::new()).expect("must classify");
        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0].text(), "select '");
    }
}
