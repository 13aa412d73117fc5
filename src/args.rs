//! Args：收集绑定参数，并为每个参数分配当前方言的占位符。
//!
//! 一条语句只用一个 Args：WHERE 谓词、分页等所有占位符都从同一个递增序号里取号，
//! 保证编号严格按从左到右的出现顺序排列。

use crate::dialect::{Dialect, PlaceholderStyle};
use crate::error::{BuildError, Result};
use crate::statement::BuiltStatement;
use crate::value::SqlValue;

#[derive(Debug)]
pub struct Args<'d> {
    dialect: &'d dyn Dialect,
    values: Vec<SqlValue>,
}

impl<'d> Args<'d> {
    pub fn new(dialect: &'d dyn Dialect) -> Self {
        Self {
            dialect,
            values: Vec::new(),
        }
    }

    pub fn dialect(&self) -> &'d dyn Dialect {
        self.dialect
    }

    /// 下一个占位符的序号（从 1 开始）。
    pub fn next_index(&self) -> usize {
        self.values.len() + 1
    }

    /// 追加一个参数并返回它的占位符。
    pub fn add(&mut self, value: impl Into<SqlValue>) -> String {
        let ph = self.dialect.placeholder(self.next_index(), None);
        self.values.push(value.into());
        ph
    }

    /// 追加一组参数，返回 `p1, p2, ...`。
    pub fn add_all(&mut self, values: impl IntoIterator<Item = SqlValue>) -> Vec<String> {
        values.into_iter().map(|v| self.add(v)).collect()
    }

    /// 追加方言已经自行编号的参数（分页片段）；调用方须以 `next_index()` 作为起始序号渲染。
    pub fn extend_numbered(&mut self, values: &[SqlValue]) {
        self.values.extend(values.iter().cloned());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 以已绑定的参数作为前缀（如先于 WHERE 编号的 TOP）：之后添加的参数从其后继续编号。
    pub fn with_prefix(dialect: &'d dyn Dialect, prefix: Vec<SqlValue>) -> Self {
        Self {
            dialect,
            values: prefix,
        }
    }

    /// 结束收集：核对 SQL 中的占位符个数与参数个数。
    pub fn finish(self, sql: String, verify: bool) -> Result<BuiltStatement> {
        if verify {
            let (open, close) = self.dialect.quote_chars();
            let placeholders =
                count_placeholders(self.dialect.placeholder_style(), &sql, open, close);
            if placeholders != self.values.len() {
                return Err(BuildError::PlaceholderMismatch {
                    placeholders,
                    params: self.values.len(),
                });
            }
        }
        Ok(BuiltStatement::new(sql, self.values))
    }
}

/// 数出 `sql` 中属于 `style` 的占位符 token；字符串字面量与 Quote 的标识符内部跳过。
pub fn count_placeholders(style: PlaceholderStyle, sql: &str, open: char, close: char) -> usize {
    let mut count = 0usize;
    let mut quote: Option<char> = None;
    let mut chars = sql.chars().peekable();

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            if c == q {
                // 连续两个闭合字符是转义
                if chars.peek() == Some(&q) {
                    chars.next();
                } else {
                    quote = None;
                }
            }
            continue;
        }

        if c == '\'' {
            quote = Some('\'');
            continue;
        }
        if c == open {
            quote = Some(close);
            continue;
        }
        if c == '"' {
            quote = Some('"');
            continue;
        }

        match style {
            PlaceholderStyle::QuestionMark => {
                if c == '?' {
                    count += 1;
                }
            }
            PlaceholderStyle::DollarNumbered => {
                if c == '$' && chars.peek().is_some_and(|n| n.is_ascii_digit()) {
                    count += 1;
                    while chars.peek().is_some_and(|n| n.is_ascii_digit()) {
                        chars.next();
                    }
                }
            }
            PlaceholderStyle::AtNumbered => {
                if c == '@' && chars.peek().is_some_and(|n| n.is_ascii_alphabetic() || *n == '_') {
                    count += 1;
                    while chars
                        .peek()
                        .is_some_and(|n| n.is_ascii_alphanumeric() || *n == '_')
                    {
                        chars.next();
                    }
                }
            }
            PlaceholderStyle::ColonNumbered => {
                if c == ':' {
                    if chars.peek() == Some(&':') {
                        // `::` 类型转换
                        chars.next();
                    } else if chars
                        .peek()
                        .is_some_and(|n| n.is_ascii_alphanumeric() || *n == '_')
                    {
                        count += 1;
                        while chars
                            .peek()
                            .is_some_and(|n| n.is_ascii_alphanumeric() || *n == '_')
                        {
                            chars.next();
                        }
                    }
                }
            }
        }
    }

    count
}
