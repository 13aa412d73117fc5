//! Oracle：`:N` 占位符；12c 起用 OFFSET/FETCH，之前的版本用 ROWNUM 包裹。

use crate::dialect::{
    Dialect, InsertParts, PaginationStyle, PlaceholderStyle, UpsertParts, format_timestamp,
    merge_insert_values, merge_match, merge_update_set,
};
use crate::error::Result;
use crate::flavor::Flavor;
use time::OffsetDateTime;

const OFFSET_FETCH_SINCE: u32 = 12;

#[derive(Debug, Clone, Copy)]
pub struct OracleDialect {
    version: u32,
}

impl Default for OracleDialect {
    fn default() -> Self {
        Self {
            version: OFFSET_FETCH_SINCE,
        }
    }
}

impl OracleDialect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_version(major: u32) -> Self {
        Self { version: major }
    }

    /// 显式切换服务端主版本号，从而切换分页家族（OFFSET/FETCH ↔ ROWNUM）。
    pub fn set_version(&mut self, major: u32) -> &mut Self {
        self.version = major;
        self
    }

    pub fn version(&self) -> u32 {
        self.version
    }
}

impl Dialect for OracleDialect {
    fn name(&self) -> &str {
        "oracle"
    }

    fn flavor(&self) -> Option<Flavor> {
        Some(Flavor::Oracle)
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::ColonNumbered
    }

    fn pagination_style(&self) -> PaginationStyle {
        if self.version >= OFFSET_FETCH_SINCE {
            PaginationStyle::OffsetFetch
        } else {
            PaginationStyle::RowNum
        }
    }

    /// 多行写入：`INSERT ALL INTO ... VALUES (...) ... SELECT 1 FROM DUAL`。
    fn build_batch_insert(&self, parts: &InsertParts<'_>) -> String {
        if parts.rows.len() <= 1 {
            return self.build_insert(parts);
        }
        let cols = parts.columns.join(", ");
        let mut sql = String::from("INSERT ALL");
        for row in parts.rows {
            sql.push_str(&format!(
                " INTO {} ({}) VALUES ({})",
                parts.table,
                cols,
                row.join(", ")
            ));
        }
        sql.push_str(" SELECT 1 FROM DUAL");
        sql
    }

    fn build_upsert(&self, parts: &UpsertParts<'_>) -> Option<String> {
        let source: Vec<String> = parts
            .placeholders
            .iter()
            .zip(parts.columns)
            .map(|(p, c)| format!("{p} AS {c}"))
            .collect();
        let mut sql = format!(
            "MERGE INTO {} target USING (SELECT {} FROM DUAL) source ON ({})",
            parts.table,
            source.join(", "),
            merge_match(parts.conflict_keys)
        );
        if !parts.update_columns.is_empty() {
            sql.push_str(" WHEN MATCHED THEN UPDATE SET ");
            sql.push_str(&merge_update_set(parts.update_columns));
        }
        sql.push_str(&format!(
            " WHEN NOT MATCHED THEN INSERT ({}) VALUES ({})",
            parts.columns.join(", "),
            merge_insert_values(parts.columns)
        ));
        Some(sql)
    }

    fn boolean_value(&self, value: bool) -> &'static str {
        if value { "1" } else { "0" }
    }

    fn current_timestamp(&self) -> &'static str {
        "SYSTIMESTAMP"
    }

    fn current_date(&self) -> &'static str {
        "TRUNC(SYSDATE)"
    }

    fn format_date_time(&self, dt: &OffsetDateTime) -> Result<String> {
        Ok(format!(
            "TO_TIMESTAMP('{}', 'YYYY-MM-DD HH24:MI:SS')",
            format_timestamp(dt)?
        ))
    }
}
