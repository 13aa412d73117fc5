//! INSERT / 批量 INSERT 的组装。列名只 Quote 一次，各行共享同一个列清单。

use crate::args::Args;
use crate::dialect::{Dialect, InsertParts, ReturningStyle, checked_identifier};
use crate::error::{BuildError, Result};
use crate::statement::BuiltStatement;
use crate::value::SqlValue;

/// INSERT 的输入：一个列清单加若干行值。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsertDescriptor {
    pub table: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<SqlValue>>,
    pub returning: Vec<String>,
}

impl InsertDescriptor {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    pub fn columns<T: Into<String>>(mut self, cols: impl IntoIterator<Item = T>) -> Self {
        self.columns.extend(cols.into_iter().map(Into::into));
        self
    }

    /// 追加一行。
    pub fn values<T: Into<SqlValue>>(mut self, row: impl IntoIterator<Item = T>) -> Self {
        self.rows.push(row.into_iter().map(Into::into).collect());
        self
    }

    pub fn returning<T: Into<String>>(mut self, cols: impl IntoIterator<Item = T>) -> Self {
        self.returning.extend(cols.into_iter().map(Into::into));
        self
    }
}

/// 单行 INSERT。`returning` 非空时按方言渲染 `RETURNING` / `OUTPUT INSERTED.`。
pub fn build_insert(
    dialect: &dyn Dialect,
    insert: &InsertDescriptor,
    verify: bool,
) -> Result<BuiltStatement> {
    let (table, cols, returning) = prepare(dialect, insert)?;
    let [values] = insert.rows.as_slice() else {
        return Err(BuildError::InvalidQuery(format!(
            "insert expects exactly one row, got {}",
            insert.rows.len()
        )));
    };
    check_width(cols.len(), values.len(), 0)?;

    let mut args = Args::new(dialect);
    let rows = [args.add_all(values.iter().cloned())];
    let sql = dialect.build_insert(&InsertParts {
        table: &table,
        columns: &cols,
        rows: &rows,
        returning: &returning,
    });
    args.finish(sql, verify)
}

/// 多行 INSERT：每行一个值元组，编号型占位符跨行连续递增。
pub fn build_batch_insert(
    dialect: &dyn Dialect,
    insert: &InsertDescriptor,
    verify: bool,
) -> Result<BuiltStatement> {
    let (table, cols, returning) = prepare(dialect, insert)?;
    if insert.rows.is_empty() {
        return Err(BuildError::InvalidQuery(
            "batch insert needs at least one row".to_string(),
        ));
    }

    let mut args = Args::new(dialect);
    let mut placeholders = Vec::with_capacity(insert.rows.len());
    for (i, row) in insert.rows.iter().enumerate() {
        check_width(cols.len(), row.len(), i)?;
        placeholders.push(args.add_all(row.iter().cloned()));
    }
    let sql = dialect.build_batch_insert(&InsertParts {
        table: &table,
        columns: &cols,
        rows: &placeholders,
        returning: &returning,
    });
    args.finish(sql, verify)
}

type Prepared = (String, Vec<String>, Vec<String>);

fn prepare(dialect: &dyn Dialect, insert: &InsertDescriptor) -> Result<Prepared> {
    if insert.columns.is_empty() {
        return Err(BuildError::InvalidQuery(
            "insert needs at least one column".to_string(),
        ));
    }
    if !insert.returning.is_empty() && dialect.returning_style() == ReturningStyle::Unsupported {
        return Err(BuildError::not_supported(dialect.name(), "RETURNING"));
    }
    let table = checked_identifier(dialect, &insert.table)?;
    let cols = quote_all(dialect, &insert.columns)?;
    let returning = quote_all(dialect, &insert.returning)?;
    Ok((table, cols, returning))
}

pub(crate) fn quote_all(dialect: &dyn Dialect, names: &[String]) -> Result<Vec<String>> {
    names
        .iter()
        .map(|n| checked_identifier(dialect, n))
        .collect()
}

fn check_width(columns: usize, values: usize, row: usize) -> Result<()> {
    if columns != values {
        return Err(BuildError::InvalidQuery(format!(
            "row {row} has {values} values for {columns} columns"
        )));
    }
    Ok(())
}
