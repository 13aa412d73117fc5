//! SQLite（基于文件的嵌入式引擎）。

use crate::dialect::{Dialect, PaginationStyle, PlaceholderStyle, ReturningStyle, UpsertParts};
use crate::flavor::Flavor;
use crate::postgres::on_conflict_upsert;

#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDialect;

impl SqliteDialect {
    pub fn new() -> Self {
        Self
    }
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn flavor(&self) -> Option<Flavor> {
        Some(Flavor::SQLite)
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::QuestionMark
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

    fn boolean_value(&self, value: bool) -> &'static str {
        if value { "1" } else { "0" }
    }
}
