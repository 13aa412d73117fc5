//! UPSERT：插入一行，冲突键已存在时改为更新。语法完全交给方言。

use crate::args::Args;
use crate::dialect::{Dialect, UpsertParts, checked_identifier};
use crate::error::{BuildError, Result};
use crate::insert::quote_all;
use crate::statement::BuiltStatement;
use crate::value::SqlValue;

/// 一次 UPSERT 的输入。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpsertDescriptor {
    pub table: String,
    pub columns: Vec<String>,
    pub values: Vec<SqlValue>,
    /// 唯一约束列；必须是 `columns` 的子集。
    pub conflict_keys: Vec<String>,
    /// `None` 表示更新全部非冲突键列；`Some(vec![])` 表示冲突时什么都不改。
    pub update_columns: Option<Vec<String>>,
}

impl UpsertDescriptor {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    pub fn value(mut self, column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.columns.push(column.into());
        self.values.push(value.into());
        self
    }

    pub fn conflict_keys<T: Into<String>>(mut self, keys: impl IntoIterator<Item = T>) -> Self {
        self.conflict_keys.extend(keys.into_iter().map(Into::into));
        self
    }

    pub fn update_columns<T: Into<String>>(mut self, cols: impl IntoIterator<Item = T>) -> Self {
        self.update_columns = Some(cols.into_iter().map(Into::into).collect());
        self
    }
}

pub fn build_upsert(
    dialect: &dyn Dialect,
    upsert: &UpsertDescriptor,
    verify: bool,
) -> Result<BuiltStatement> {
    if upsert.columns.is_empty() {
        return Err(BuildError::InvalidQuery(
            "upsert needs at least one column".to_string(),
        ));
    }
    if upsert.columns.len() != upsert.values.len() {
        return Err(BuildError::InvalidQuery(format!(
            "upsert has {} values for {} columns",
            upsert.values.len(),
            upsert.columns.len()
        )));
    }
    if upsert.conflict_keys.is_empty() {
        return Err(BuildError::InvalidQuery(
            "upsert needs at least one conflict key".to_string(),
        ));
    }
    if let Some(key) = upsert
        .conflict_keys
        .iter()
        .find(|k| !upsert.columns.contains(k))
    {
        return Err(BuildError::InvalidQuery(format!(
            "conflict key {key:?} is not an inserted column"
        )));
    }

    let update: Vec<String> = match &upsert.update_columns {
        Some(cols) => cols.clone(),
        None => upsert
            .columns
            .iter()
            .filter(|c| !upsert.conflict_keys.contains(c))
            .cloned()
            .collect(),
    };

    let table = checked_identifier(dialect, &upsert.table)?;
    let columns = quote_all(dialect, &upsert.columns)?;
    let keys = quote_all(dialect, &upsert.conflict_keys)?;
    let update = quote_all(dialect, &update)?;

    let mut args = Args::new(dialect);
    let placeholders = args.add_all(upsert.values.iter().cloned());

    let sql = dialect
        .build_upsert(&UpsertParts {
            table: &table,
            columns: &columns,
            placeholders: &placeholders,
            conflict_keys: &keys,
            update_columns: &update,
        })
        .ok_or_else(|| BuildError::not_supported(dialect.name(), "upsert"))?;
    args.finish(sql, verify)
}
