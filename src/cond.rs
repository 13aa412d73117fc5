//! Cond：把有序谓词编译为 WHERE 片段，参数写入共享的 [`Args`]。

use crate::args::Args;
use crate::condition::{Condition, ConditionValue, Operator};
use crate::error::{BuildError, Result};
use crate::validator::{null_test_literal, validate_identifier};
use crate::value::SqlValue;

/// 编译起点：不论最终保留几个谓词，结果都可以直接接在 `WHERE` 之后。
pub const BASE_CLAUSE: &str = "1=1";

/// 条件编译器；借用一条语句的 Args。
#[derive(Debug)]
pub struct Cond<'a, 'd> {
    args: &'a mut Args<'d>,
}

impl<'a, 'd> Cond<'a, 'd> {
    pub fn new(args: &'a mut Args<'d>) -> Self {
        Self { args }
    }

    /// 按输入顺序编译谓词，返回 `1=1 AND ...`。
    pub fn compile(&mut self, conditions: &[Condition]) -> Result<String> {
        let mut sql = String::from(BASE_CLAUSE);
        for c in conditions {
            if c.is_skipped() {
                continue;
            }
            validate_identifier(&c.field)?;
            let field = self.args.dialect().quote_identifier(&c.field);
            let expr = self.expr(&field, c)?;
            sql.push(' ');
            sql.push_str(c.logic.as_str());
            sql.push(' ');
            sql.push_str(&expr);
        }
        Ok(sql)
    }

    fn expr(&mut self, field: &str, c: &Condition) -> Result<String> {
        if let Some(symbol) = c.operator.comparison_symbol() {
            let value = single(c)?;
            return Ok(self.compare(field, symbol, value.clone()));
        }

        match c.operator {
            Operator::In => Ok(self.in_(field, "IN", &c.value)),
            Operator::NotIn => Ok(self.in_(field, "NOT IN", &c.value)),
            Operator::Contains | Operator::StartsWith | Operator::EndsWith => {
                let text = single(c)?
                    .as_text()
                    .ok_or_else(|| BuildError::predicate(&c.field, "pattern needs a text value"))?;
                let pattern = match c.operator {
                    Operator::Contains => format!("%{text}%"),
                    Operator::StartsWith => format!("{text}%"),
                    _ => format!("%{text}"),
                };
                Ok(self.like(field, pattern))
            }
            Operator::Is => {
                let literal = match single(c)? {
                    SqlValue::String(s) => null_test_literal(s),
                    _ => None,
                }
                .ok_or_else(|| BuildError::predicate(&c.field, "IS accepts only NULL or NOT NULL"))?;
                Ok(self.is(field, literal))
            }
            Operator::Between | Operator::NotBetween => {
                let (low, high) = match &c.value {
                    ConditionValue::List(v) if v.len() == 2 => (v[0].clone(), v[1].clone()),
                    _ => {
                        return Err(BuildError::predicate(
                            &c.field,
                            "BETWEEN expects a two-element list",
                        ));
                    }
                };
                let keyword = if c.operator == Operator::Between {
                    "BETWEEN"
                } else {
                    "NOT BETWEEN"
                };
                Ok(self.between(field, keyword, low, high))
            }
            // 比较运算符已在上面处理
            _ => Ok(self.compare(field, "=", single(c)?.clone())),
        }
    }

    /// `field <symbol> ?`
    pub fn compare(&mut self, field: &str, symbol: &str, value: SqlValue) -> String {
        let ph = self.args.add(value);
        format!("{field} {symbol} {ph}")
    }

    /// 非空列表展开为 `IN (?, ?)`；空列表或单值渲染字面量 `IN ()`，不绑定参数。
    pub fn in_(&mut self, field: &str, keyword: &str, value: &ConditionValue) -> String {
        match value {
            ConditionValue::List(values) if !values.is_empty() => {
                let phs = self.args.add_all(values.iter().cloned());
                format!("{field} {keyword} ({})", phs.join(", "))
            }
            _ => format!("{field} {keyword} ()"),
        }
    }

    /// 绑定已经拼好 `%` 的模式串。
    pub fn like(&mut self, field: &str, pattern: String) -> String {
        let ph = self.args.add(pattern);
        format!("{field} LIKE {ph}")
    }

    /// 唯一一个不绑定参数的分支：`literal` 只可能是 `NULL` / `NOT NULL`。
    pub fn is(&mut self, field: &str, literal: &'static str) -> String {
        format!("{field} IS {literal}")
    }

    pub fn between(&mut self, field: &str, keyword: &str, low: SqlValue, high: SqlValue) -> String {
        let l = self.args.add(low);
        let h = self.args.add(high);
        format!("{field} {keyword} {l} AND {h}")
    }
}

fn single(c: &Condition) -> Result<&SqlValue> {
    match &c.value {
        ConditionValue::Single(v) => Ok(v),
        ConditionValue::List(_) => Err(BuildError::predicate(
            &c.field,
            "operator expects a single value, got a list",
        )),
    }
}
