//! 标识符与原始 SQL 片段校验：所有子句构建器拼接名字之前都要先过这里。

use crate::error::{BuildError, Result};
use regex::Regex;
use std::sync::OnceLock;

fn identifier_re() -> &'static Regex {
    static IDENT_RE: OnceLock<Regex> = OnceLock::new();
    IDENT_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z_*][A-Za-z0-9_.*]*$").expect("invalid built-in identifier regex")
    })
}

fn fragment_keyword_re() -> &'static Regex {
    static KEYWORD_RE: OnceLock<Regex> = OnceLock::new();
    KEYWORD_RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b(union|select|insert|update|delete|drop|alter|create|truncate|exec|execute|grant|revoke|merge|call|sleep|benchmark|waitfor|xp_\w*)\b",
        )
        .expect("invalid built-in keyword regex")
    })
}

/// 表名/列名校验：只接受 `[A-Za-z_*][A-Za-z0-9_.*]*`。
pub fn validate_identifier(name: &str) -> Result<()> {
    if identifier_re().is_match(name) {
        Ok(())
    } else {
        Err(BuildError::InvalidIdentifier(name.to_string()))
    }
}

/// 任一方言的占位符前缀，以及字符串/标识符的 Quote 字符。
const FRAGMENT_FORBIDDEN: [char; 9] = ['?', '$', '@', ':', '\'', '"', '`', '[', ']'];

/// 括号必须成对且不能先闭后开。
fn parens_balanced(expr: &str) -> bool {
    let mut depth = 0usize;
    for c in expr.chars() {
        match c {
            '(' => depth += 1,
            ')' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => {}
        }
    }
    depth == 0
}

/// 调用方提供的原始表达式片段（如 `COUNT(DISTINCT id)`）：
/// 拒绝语句终止符、注释、占位符、Quote 字符、不配对的括号，
/// 以及可拼出第二条语句或子查询的关键字。
pub fn validate_fragment(expr: &str) -> Result<()> {
    let trimmed = expr.trim();
    if trimmed.is_empty()
        || trimmed.contains(';')
        || trimmed.contains("--")
        || trimmed.contains("/*")
        || trimmed.contains("*/")
        || trimmed.contains('#')
        || trimmed.contains('\0')
        || trimmed.contains(FRAGMENT_FORBIDDEN)
        || !parens_balanced(trimmed)
        || fragment_keyword_re().is_match(trimmed)
    {
        return Err(BuildError::UnsafeFragment(expr.to_string()));
    }
    Ok(())
}

/// 选择列：含 `(` 的按原始片段处理，否则按标识符处理。
pub fn validate_select_item(item: &str) -> Result<()> {
    if item.contains('(') {
        validate_fragment(item)
    } else {
        validate_identifier(item)
    }
}

/// `IS` 运算符右侧只允许 `NULL` / `NOT NULL`（大小写与中间空白不敏感）。
pub fn null_test_literal(value: &str) -> Option<&'static str> {
    let words: Vec<&str> = value.split_whitespace().collect();
    match words.as_slice() {
        [w] if w.eq_ignore_ascii_case("null") => Some("NULL"),
        [n, w] if n.eq_ignore_ascii_case("not") && w.eq_ignore_ascii_case("null") => {
            Some("NOT NULL")
        }
        _ => None,
    }
}

/// 聚合函数白名单。
pub fn aggregate_function(name: &str) -> Result<&'static str> {
    const FUNCS: [&str; 5] = ["COUNT", "SUM", "AVG", "MIN", "MAX"];
    FUNCS
        .iter()
        .find(|f| f.eq_ignore_ascii_case(name.trim()))
        .copied()
        .ok_or_else(|| BuildError::InvalidQuery(format!("unsupported aggregate function {name:?}")))
}
