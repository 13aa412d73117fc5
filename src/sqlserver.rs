//! SQL Server：`@pN` 占位符、`[name]` Quote、OFFSET/FETCH 分页（legacy 模式用 TOP）。

use crate::dialect::{
    Dialect, PaginationStyle, PlaceholderStyle, ReturningStyle, UpsertParts, format_timestamp,
    merge_insert_values, merge_match, merge_update_set,
};
use crate::error::Result;
use crate::flavor::Flavor;
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, Default)]
pub struct SqlServerDialect {
    legacy: bool,
}

impl SqlServerDialect {
    pub fn new() -> Self {
        Self::default()
    }

    /// 2012 之前的版本：没有 OFFSET/FETCH，只能用 `TOP (n)`。
    pub fn legacy() -> Self {
        Self { legacy: true }
    }

    pub fn is_legacy(&self) -> bool {
        self.legacy
    }
}

impl Dialect for SqlServerDialect {
    fn name(&self) -> &str {
        "sqlserver"
    }

    fn flavor(&self) -> Option<Flavor> {
        Some(Flavor::SQLServer)
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::AtNumbered
    }

    fn pagination_style(&self) -> PaginationStyle {
        if self.legacy {
            PaginationStyle::Top
        } else {
            PaginationStyle::OffsetFetch
        }
    }

    fn returning_style(&self) -> ReturningStyle {
        ReturningStyle::Output
    }

    fn quote_chars(&self) -> (char, char) {
        ('[', ']')
    }

    fn requires_order_for_offset(&self) -> bool {
        true
    }

    fn build_upsert(&self, parts: &UpsertParts<'_>) -> Option<String> {
        let mut sql = format!(
            "MERGE INTO {} AS target USING (VALUES ({})) AS source ({}) ON {}",
            parts.table,
            parts.placeholders.join(", "),
            parts.columns.join(", "),
            merge_match(parts.conflict_keys)
        );
        if !parts.update_columns.is_empty() {
            sql.push_str(" WHEN MATCHED THEN UPDATE SET ");
            sql.push_str(&merge_update_set(parts.update_columns));
        }
        sql.push_str(&format!(
            " WHEN NOT MATCHED THEN INSERT ({}) VALUES ({});",
            parts.columns.join(", "),
            merge_insert_values(parts.columns)
        ));
        Some(sql)
    }

    fn boolean_value(&self, value: bool) -> &'static str {
        if value { "1" } else { "0" }
    }

    fn current_timestamp(&self) -> &'static str {
        "GETDATE()"
    }

    fn current_date(&self) -> &'static str {
        "CAST(GETDATE() AS DATE)"
    }

    fn concat(&self, parts: &[&str]) -> String {
        format!("CONCAT({})", parts.join(", "))
    }

    /// SQL Server 的 LIKE 没有默认转义符，用字符类 `[x]` 转义通配符。
    fn escape_like(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len());
        for ch in value.chars() {
            match ch {
                '[' | '%' | '_' => {
                    out.push('[');
                    out.push(ch);
                    out.push(']');
                }
                _ => out.push(ch),
            }
        }
        out
    }

    fn format_date_time(&self, dt: &OffsetDateTime) -> Result<String> {
        Ok(format!("CAST('{}' AS DATETIME2)", format_timestamp(dt)?))
    }
}
