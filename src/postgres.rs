//! PostgreSQL（`postgres` / `postgresql` 两个别名共用一个实例）。

use crate::dialect::{
    Dialect, PaginationStyle, PlaceholderStyle, ReturningStyle, UpsertParts, format_timestamp,
};
use crate::error::Result;
use crate::flavor::Flavor;
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl PostgresDialect {
    pub fn new() -> Self {
        Self
    }
}

/// `ON CONFLICT (keys) DO UPDATE SET c = EXCLUDED.c`，PostgreSQL 与 SQLite 共用。
pub(crate) fn on_conflict_upsert(parts: &UpsertParts<'_>) -> String {
    let action = if parts.update_columns.is_empty() {
        "DO NOTHING".to_string()
    } else {
        let sets: Vec<String> = parts
            .update_columns
            .iter()
            .map(|c| format!("{c} = EXCLUDED.{c}"))
            .collect();
        format!("DO UPDATE SET {}", sets.join(", "))
    };
    format!(
        "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT ({}) {}",
        parts.table,
        parts.columns.join(", "),
        parts.placeholders.join(", "),
        parts.conflict_keys.join(", "),
        action
    )
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &str {
        "postgres"
    }

    fn flavor(&self) -> Option<Flavor> {
        Some(Flavor::PostgreSQL)
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::DollarNumbered
    }

    fn pagination_style(&self) -> PaginationStyle {
        PaginationStyle::LimitOffset
    }

    fn returning_style(&self) -> ReturningStyle {
        ReturningStyle::Returning
    }

    fn build_upsert(&self, parts: &UpsertParts<'_>) -> Option<String> {
        Some(on_conflict_upsert(parts))
    }

    fn format_date_time(&self, dt: &OffsetDateTime) -> Result<String> {
        Ok(format!("'{}'::timestamp", format_timestamp(dt)?))
    }
}
