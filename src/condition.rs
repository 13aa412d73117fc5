//! 谓词描述与条件链。

use crate::value::SqlValue;

/// 条件运算符。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
    GreaterEqualThan,
    LessEqualThan,
    In,
    NotIn,
    /// `LIKE '%v%'`
    Contains,
    /// `LIKE 'v%'`
    StartsWith,
    /// `LIKE '%v'`
    EndsWith,
    /// `IS NULL` / `IS NOT NULL`
    Is,
    Between,
    NotBetween,
}

impl Operator {
    /// 从文本解析（大小写不敏感）；无法识别的运算符按相等处理。
    pub fn parse(s: &str) -> Self {
        let norm = s.split_whitespace().collect::<Vec<_>>().join(" ");
        match norm.to_ascii_lowercase().as_str() {
            "=" | "==" | "eq" => Self::Equal,
            "<>" | "!=" | "ne" | "neq" => Self::NotEqual,
            ">" | "gt" => Self::GreaterThan,
            "<" | "lt" => Self::LessThan,
            ">=" | "gte" | "ge" => Self::GreaterEqualThan,
            "<=" | "lte" | "le" => Self::LessEqualThan,
            "in" => Self::In,
            "not in" | "nin" | "notin" => Self::NotIn,
            "like" | "contains" => Self::Contains,
            "startswith" | "starts_with" => Self::StartsWith,
            "endswith" | "ends_with" => Self::EndsWith,
            "is" => Self::Is,
            "between" => Self::Between,
            "not between" | "notbetween" => Self::NotBetween,
            _ => Self::Equal,
        }
    }

    /// 比较运算符对应的 SQL 符号。
    pub fn comparison_symbol(self) -> Option<&'static str> {
        match self {
            Self::Equal => Some("="),
            Self::NotEqual => Some("<>"),
            Self::GreaterThan => Some(">"),
            Self::LessThan => Some("<"),
            Self::GreaterEqualThan => Some(">="),
            Self::LessEqualThan => Some("<="),
            _ => None,
        }
    }
}

impl From<&str> for Operator {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

/// 与前一个条件的连接词。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Logic {
    #[default]
    And,
    Or,
}

impl Logic {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// 条件值，支持单值或列表值。
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionValue {
    Single(SqlValue),
    List(Vec<SqlValue>),
}

impl ConditionValue {
    pub fn list(values: impl IntoIterator<Item = impl Into<SqlValue>>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }

    /// 单值为 Null 或空字符串：整条谓词跳过。
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Single(v) if v.is_blank())
    }
}

impl Default for ConditionValue {
    fn default() -> Self {
        Self::Single(SqlValue::Null)
    }
}

impl<T: Into<SqlValue>> From<T> for ConditionValue {
    fn from(v: T) -> Self {
        Self::Single(v.into())
    }
}

impl<T: Into<SqlValue>> From<Vec<T>> for ConditionValue {
    fn from(v: Vec<T>) -> Self {
        Self::list(v)
    }
}

impl<T: Into<SqlValue>, const N: usize> From<[T; N]> for ConditionValue {
    fn from(v: [T; N]) -> Self {
        Self::list(v)
    }
}

/// 一条过滤条件。
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field: String,
    pub operator: Operator,
    pub value: ConditionValue,
    pub logic: Logic,
}

impl Condition {
    pub fn new(
        field: impl Into<String>,
        operator: impl Into<Operator>,
        value: impl Into<ConditionValue>,
    ) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: value.into(),
            logic: Logic::And,
        }
    }

    /// 以 OR 连接到前一个条件。
    pub fn or(mut self) -> Self {
        self.logic = Logic::Or;
        self
    }

    /// 会被空值规则跳过的条件。
    pub fn is_skipped(&self) -> bool {
        self.value.is_blank()
    }
}

/// 条件链。
#[derive(Debug, Default, Clone)]
pub struct Chain {
    conditions: Vec<Condition>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    /// 修改当前链尾部的条件（若不存在条件则忽略）。
    fn map_last(mut self, f: impl FnOnce(&mut Condition)) -> Self {
        if let Some(last) = self.conditions.last_mut() {
            f(last);
        }
        self
    }

    fn add_chain(
        mut self,
        field: impl Into<String>,
        operator: Operator,
        value: impl Into<ConditionValue>,
    ) -> Self {
        self.conditions.push(Condition::new(field, operator, value));
        self
    }

    pub fn add_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// 把最近一次添加的条件改为 OR 连接。
    pub fn or(self) -> Self {
        self.map_last(|c| c.logic = Logic::Or)
    }

    pub fn equal(self, field: impl Into<String>, value: impl Into<ConditionValue>) -> Self {
        self.add_chain(field, Operator::Equal, value)
    }

    pub fn not_equal(self, field: impl Into<String>, value: impl Into<ConditionValue>) -> Self {
        self.add_chain(field, Operator::NotEqual, value)
    }

    pub fn greater_than(self, field: impl Into<String>, value: impl Into<ConditionValue>) -> Self {
        self.add_chain(field, Operator::GreaterThan, value)
    }

    pub fn less_than(self, field: impl Into<String>, value: impl Into<ConditionValue>) -> Self {
        self.add_chain(field, Operator::LessThan, value)
    }

    pub fn greater_equal_than(
        self,
        field: impl Into<String>,
        value: impl Into<ConditionValue>,
    ) -> Self {
        self.add_chain(field, Operator::GreaterEqualThan, value)
    }

    pub fn less_equal_than(
        self,
        field: impl Into<String>,
        value: impl Into<ConditionValue>,
    ) -> Self {
        self.add_chain(field, Operator::LessEqualThan, value)
    }

    pub fn in_(self, field: impl Into<String>, value: impl Into<ConditionValue>) -> Self {
        self.add_chain(field, Operator::In, value)
    }

    pub fn not_in(self, field: impl Into<String>, value: impl Into<ConditionValue>) -> Self {
        self.add_chain(field, Operator::NotIn, value)
    }

    pub fn contains(self, field: impl Into<String>, value: impl Into<ConditionValue>) -> Self {
        self.add_chain(field, Operator::Contains, value)
    }

    pub fn starts_with(self, field: impl Into<String>, value: impl Into<ConditionValue>) -> Self {
        self.add_chain(field, Operator::StartsWith, value)
    }

    pub fn ends_with(self, field: impl Into<String>, value: impl Into<ConditionValue>) -> Self {
        self.add_chain(field, Operator::EndsWith, value)
    }

    pub fn is_null(self, field: impl Into<String>) -> Self {
        self.add_chain(field, Operator::Is, "NULL")
    }

    pub fn is_not_null(self, field: impl Into<String>) -> Self {
        self.add_chain(field, Operator::Is, "NOT NULL")
    }

    pub fn between(
        self,
        field: impl Into<String>,
        low: impl Into<SqlValue>,
        high: impl Into<SqlValue>,
    ) -> Self {
        self.add_chain(
            field,
            Operator::Between,
            ConditionValue::List(vec![low.into(), high.into()]),
        )
    }

    pub fn not_between(
        self,
        field: impl Into<String>,
        low: impl Into<SqlValue>,
        high: impl Into<SqlValue>,
    ) -> Self {
        self.add_chain(
            field,
            Operator::NotBetween,
            ConditionValue::List(vec![low.into(), high.into()]),
        )
    }

    pub fn build(self) -> Vec<Condition> {
        self.conditions
    }
}
