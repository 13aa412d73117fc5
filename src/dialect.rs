//! Dialect：单个数据库引擎家族的语法规则（占位符、标识符 Quote、分页、语句骨架）。
//!
//! 每个方言都是不可变、无副作用的纯函数集合。trait 自带一套共享的默认实现，
//! 各引擎只覆盖与默认不同的部分。

use crate::error::{BuildError, Result};
use crate::flavor::Flavor;
use crate::validator::validate_identifier;
use crate::value::SqlValue;
use std::fmt;
use time::OffsetDateTime;
use time::macros::format_description;

/// 占位符风格。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// 每个位置都是同一个 `?`（MySQL/SQLite）。
    QuestionMark,
    /// `$1, $2, ...`（PostgreSQL）。
    DollarNumbered,
    /// `@p1, @p2, ...` 或 `@name`（SQL Server）。
    AtNumbered,
    /// `:1, :2, ...` 或 `:name`（Oracle）。
    ColonNumbered,
}

/// 分页语法家族。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationStyle {
    /// `LIMIT <count> OFFSET <offset>`，count 先绑定。
    LimitOffset,
    /// `LIMIT <offset>, <count>`，offset 先绑定。
    LimitComma,
    /// `OFFSET <offset> ROWS FETCH NEXT <count> ROWS ONLY`，需要 ORDER BY。
    OffsetFetch,
    /// 以 ROWNUM 把内层查询包裹为外层查询。
    RowNum,
    /// `TOP (<count>)`，紧跟在 SELECT 之后。
    Top,
}

/// RETURNING 子句的支持方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturningStyle {
    Unsupported,
    /// 语句末尾 `RETURNING cols`。
    Returning,
    /// 列清单之后 `OUTPUT INSERTED.col`。
    Output,
}

/// 分页渲染结果。三种形态决定了调用方如何拼接。
#[derive(Debug, Clone, PartialEq)]
pub enum Pagination {
    /// 追加在语句末尾。
    Suffix { sql: String, params: Vec<SqlValue> },
    /// 紧跟在 `SELECT` 关键字之后；其占位符在整条语句中最先编号。
    Leading { sql: String, params: Vec<SqlValue> },
    /// 把内层 SELECT 包裹成 `prefix + inner + suffix`；占位符全部位于 suffix。
    Wrap {
        prefix: String,
        suffix: String,
        params: Vec<SqlValue>,
    },
}

impl Pagination {
    pub fn params(&self) -> &[SqlValue] {
        match self {
            Self::Suffix { params, .. } | Self::Leading { params, .. } | Self::Wrap { params, .. } => {
                params
            }
        }
    }

    pub fn is_leading(&self) -> bool {
        matches!(self, Self::Leading { .. })
    }

    /// 把分页应用到一条已经渲染好的 SELECT 上。
    ///
    /// `select_sql` 必须以 `SELECT ` 开头（Leading 形态需要在关键字后插入）。
    pub fn apply(&self, select_sql: &str) -> String {
        match self {
            Self::Suffix { sql, .. } => format!("{select_sql} {sql}"),
            Self::Leading { sql, .. } => match select_sql.strip_prefix("SELECT ") {
                Some(rest) => format!("SELECT {sql} {rest}"),
                None => format!("{sql} {select_sql}"),
            },
            Self::Wrap { prefix, suffix, .. } => format!("{prefix}{select_sql}{suffix}"),
        }
    }
}

/// INSERT 骨架的输入：表名与列名已 Quote，占位符已编号。
#[derive(Debug, Clone, Copy)]
pub struct InsertParts<'a> {
    pub table: &'a str,
    pub columns: &'a [String],
    pub rows: &'a [Vec<String>],
    pub returning: &'a [String],
}

/// UPSERT 骨架的输入：名字已 Quote，占位符已编号。
#[derive(Debug, Clone, Copy)]
pub struct UpsertParts<'a> {
    pub table: &'a str,
    pub columns: &'a [String],
    pub placeholders: &'a [String],
    pub conflict_keys: &'a [String],
    pub update_columns: &'a [String],
}

/// 方言契约。除少数必需方法外都带默认实现。
pub trait Dialect: fmt::Debug + Send + Sync {
    /// 规范名（registry 的缓存键）。
    fn name(&self) -> &str;

    /// 内置家族；自定义方言返回 `None`。
    fn flavor(&self) -> Option<Flavor> {
        None
    }

    fn placeholder_style(&self) -> PlaceholderStyle;

    fn pagination_style(&self) -> PaginationStyle;

    fn returning_style(&self) -> ReturningStyle {
        ReturningStyle::Unsupported
    }

    /// 标识符的开/闭 Quote 字符。
    fn quote_chars(&self) -> (char, char) {
        ('"', '"')
    }

    /// OFFSET ... FETCH 是否必须搭配 ORDER BY。
    fn requires_order_for_offset(&self) -> bool {
        false
    }

    /// 第 `index`（从 1 开始）个占位符；命名风格下可传 `name`。
    fn placeholder(&self, index: usize, name: Option<&str>) -> String {
        render_placeholder(self.placeholder_style(), index, name)
    }

    fn quote_identifier(&self, name: &str) -> String {
        quote_identifier_with(self.quote_chars(), name)
    }

    /// `start_index` 是分页第一个占位符的序号。
    fn build_pagination(&self, offset: u64, count: u64, start_index: usize) -> Result<Pagination> {
        default_pagination(self, offset, count, start_index)
    }

    fn build_insert(&self, parts: &InsertParts<'_>) -> String {
        default_insert(self.returning_style(), parts)
    }

    fn build_batch_insert(&self, parts: &InsertParts<'_>) -> String {
        default_insert(self.returning_style(), parts)
    }

    fn build_update(&self, table: &str, set_clause: &str, where_clause: &str) -> String {
        format!("UPDATE {table} SET {set_clause} WHERE {where_clause}")
    }

    fn build_delete(&self, table: &str, where_clause: &str) -> String {
        format!("DELETE FROM {table} WHERE {where_clause}")
    }

    /// 原子 UPSERT；`None` 表示引擎没有原子 upsert。
    fn build_upsert(&self, _parts: &UpsertParts<'_>) -> Option<String> {
        None
    }

    fn boolean_value(&self, value: bool) -> &'static str {
        if value { "TRUE" } else { "FALSE" }
    }

    fn current_timestamp(&self) -> &'static str {
        "CURRENT_TIMESTAMP"
    }

    fn current_date(&self) -> &'static str {
        "CURRENT_DATE"
    }

    fn concat(&self, parts: &[&str]) -> String {
        parts.join(" || ")
    }

    fn coalesce(&self, exprs: &[&str]) -> String {
        format!("COALESCE({})", exprs.join(", "))
    }

    fn case_when(&self, branches: &[(&str, &str)], otherwise: Option<&str>) -> String {
        let mut out = String::from("CASE");
        for (when, then) in branches {
            out.push_str(" WHEN ");
            out.push_str(when);
            out.push_str(" THEN ");
            out.push_str(then);
        }
        if let Some(e) = otherwise {
            out.push_str(" ELSE ");
            out.push_str(e);
        }
        out.push_str(" END");
        out
    }

    /// 转义 LIKE 通配符，结果用于绑定，配合 `ESCAPE '\'` 使用。
    fn escape_like(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len());
        for ch in value.chars() {
            if matches!(ch, '\\' | '%' | '_') {
                out.push('\\');
            }
            out.push(ch);
        }
        out
    }

    /// 日期时间字面量表达式（秒级精度，按 UTC 输出）。
    fn format_date_time(&self, dt: &OffsetDateTime) -> Result<String> {
        Ok(format!("'{}'", format_timestamp(dt)?))
    }
}

/// `YYYY-MM-DD HH:MM:SS`，先换算到 UTC。
pub fn format_timestamp(dt: &OffsetDateTime) -> Result<String> {
    let fmt = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    Ok(dt.to_offset(time::UtcOffset::UTC).format(fmt)?)
}

pub fn render_placeholder(style: PlaceholderStyle, index: usize, name: Option<&str>) -> String {
    match style {
        PlaceholderStyle::QuestionMark => "?".to_string(),
        PlaceholderStyle::DollarNumbered => format!("${index}"),
        PlaceholderStyle::AtNumbered => match name {
            Some(n) => format!("@{n}"),
            None => format!("@p{index}"),
        },
        PlaceholderStyle::ColonNumbered => match name {
            Some(n) => format!(":{n}"),
            None => format!(":{index}"),
        },
    }
}

/// 逐段 Quote（按 `.` 切分，已 Quote 的段保持不变）。
///
/// `*` 与包含 `(` 的片段原样返回。
pub fn quote_identifier_with((open, close): (char, char), name: &str) -> String {
    if name == "*" || name.contains('(') {
        return name.to_string();
    }
    split_segments(name, open, close)
        .into_iter()
        .map(|seg| quote_segment(seg, open, close))
        .collect::<Vec<_>>()
        .join(".")
}

/// 校验后 Quote：调用方给出的表名、列名都经过这里。
pub fn checked_identifier(dialect: &dyn Dialect, name: &str) -> Result<String> {
    validate_identifier(name)?;
    Ok(dialect.quote_identifier(name))
}

fn split_segments(name: &str, open: char, close: char) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0usize;
    let mut in_quote = false;
    let mut chars = name.char_indices().peekable();
    while let Some((i, ch)) = chars.next() {
        if in_quote {
            if ch == close {
                if chars.peek().map(|&(_, c)| c) == Some(close) {
                    chars.next();
                } else {
                    in_quote = false;
                }
            }
        } else if ch == open {
            in_quote = true;
        } else if ch == '.' {
            out.push(&name[start..i]);
            start = i + 1;
        }
    }
    out.push(&name[start..]);
    out
}

fn is_quoted_segment(seg: &str, open: char, close: char) -> bool {
    let Some(inner) = seg
        .strip_prefix(open)
        .and_then(|s| s.strip_suffix(close))
    else {
        return false;
    };
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch == close && chars.next() != Some(close) {
            return false;
        }
    }
    true
}

fn quote_segment(seg: &str, open: char, close: char) -> String {
    if seg == "*" || is_quoted_segment(seg, open, close) {
        return seg.to_string();
    }
    let mut out = String::with_capacity(seg.len() + 2);
    out.push(open);
    for ch in seg.chars() {
        if ch == close {
            out.push(close);
        }
        out.push(ch);
    }
    out.push(close);
    out
}

fn default_pagination<D: Dialect + ?Sized>(
    dialect: &D,
    offset: u64,
    count: u64,
    start: usize,
) -> Result<Pagination> {
    let p1 = dialect.placeholder(start, None);
    let p2 = dialect.placeholder(start + 1, None);
    let page = match dialect.pagination_style() {
        PaginationStyle::LimitOffset => Pagination::Suffix {
            sql: format!("LIMIT {p1} OFFSET {p2}"),
            params: vec![count.into(), offset.into()],
        },
        PaginationStyle::LimitComma => Pagination::Suffix {
            sql: format!("LIMIT {p1}, {p2}"),
            params: vec![offset.into(), count.into()],
        },
        PaginationStyle::OffsetFetch => Pagination::Suffix {
            sql: format!("OFFSET {p1} ROWS FETCH NEXT {p2} ROWS ONLY"),
            params: vec![offset.into(), count.into()],
        },
        PaginationStyle::RowNum => Pagination::Wrap {
            prefix: "SELECT * FROM (SELECT row_.*, ROWNUM rownum_ FROM (".to_string(),
            suffix: format!(") row_ WHERE ROWNUM <= {p1}) WHERE rownum_ > {p2}"),
            params: vec![offset.saturating_add(count).into(), offset.into()],
        },
        PaginationStyle::Top => {
            if offset > 0 {
                return Err(BuildError::not_supported(
                    dialect.name(),
                    "TOP pagination with a non-zero offset",
                ));
            }
            Pagination::Leading {
                sql: format!("TOP ({p1})"),
                params: vec![count.into()],
            }
        }
    };
    Ok(page)
}

pub(crate) fn default_insert(returning: ReturningStyle, parts: &InsertParts<'_>) -> String {
    let mut sql = format!("INSERT INTO {} ({})", parts.table, parts.columns.join(", "));
    if returning == ReturningStyle::Output && !parts.returning.is_empty() {
        let cols: Vec<String> = parts
            .returning
            .iter()
            .map(|c| format!("INSERTED.{c}"))
            .collect();
        sql.push_str(" OUTPUT ");
        sql.push_str(&cols.join(", "));
    }
    sql.push_str(" VALUES ");
    let rows: Vec<String> = parts
        .rows
        .iter()
        .map(|r| format!("({})", r.join(", ")))
        .collect();
    sql.push_str(&rows.join(", "));
    if returning == ReturningStyle::Returning && !parts.returning.is_empty() {
        sql.push_str(" RETURNING ");
        sql.push_str(&parts.returning.join(", "));
    }
    sql
}

/// `target.a = source.a AND ...`：MERGE 类 upsert 共用。
pub(crate) fn merge_match(keys: &[String]) -> String {
    keys.iter()
        .map(|k| format!("target.{k} = source.{k}"))
        .collect::<Vec<_>>()
        .join(" AND ")
}

pub(crate) fn merge_update_set(columns: &[String]) -> String {
    columns
        .iter()
        .map(|c| format!("target.{c} = source.{c}"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn merge_insert_values(columns: &[String]) -> String {
    columns
        .iter()
        .map(|c| format!("source.{c}"))
        .collect::<Vec<_>>()
        .join(", ")
}
