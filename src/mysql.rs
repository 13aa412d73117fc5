//! MySQL 协议家族（MySQL/MariaDB/TiDB/OceanBase/Doris 共用一个实例）。

use crate::dialect::{Dialect, PaginationStyle, PlaceholderStyle, UpsertParts};
use crate::flavor::Flavor;

#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDialect;

impl MySqlDialect {
    pub fn new() -> Self {
        Self
    }
}

impl Dialect for MySqlDialect {
    fn name(&self) -> &str {
        "mysql"
    }

    fn flavor(&self) -> Option<Flavor> {
        Some(Flavor::MySQL)
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::QuestionMark
    }

    fn pagination_style(&self) -> PaginationStyle {
        PaginationStyle::LimitComma
    }

    fn quote_chars(&self) -> (char, char) {
        ('`', '`')
    }

    fn build_upsert(&self, parts: &UpsertParts<'_>) -> Option<String> {
        let assignments: Vec<String> = if parts.update_columns.is_empty() {
            // 没有要更新的列：用一个自赋值让冲突行保持原样
            let k = parts.conflict_keys.first().or(parts.columns.first())?;
            vec![format!("{k} = {k}")]
        } else {
            parts
                .update_columns
                .iter()
                .map(|c| format!("{c} = VALUES({c})"))
                .collect()
        };
        Some(format!(
            "INSERT INTO {} ({}) VALUES ({}) ON DUPLICATE KEY UPDATE {}",
            parts.table,
            parts.columns.join(", "),
            parts.placeholders.join(", "),
            assignments.join(", ")
        ))
    }

    fn current_timestamp(&self) -> &'static str {
        "NOW()"
    }

    fn current_date(&self) -> &'static str {
        "CURDATE()"
    }

    fn concat(&self, parts: &[&str]) -> String {
        format!("CONCAT({})", parts.join(", "))
    }
}
