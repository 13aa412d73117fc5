//! 查询/变更描述：一次调用的全部输入，构建一次后即被消费。

use crate::condition::{Chain, Condition, Logic};
use crate::error::BuildError;
use crate::mutation::{UpdateFieldChain, UpdateValue};
use std::fmt;
use std::str::FromStr;

/// 排序方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

impl Order {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for Order {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(BuildError::InvalidQuery(format!(
                "invalid order direction: {s:?}"
            ))),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 聚合投影：`FUNC(field) AS alias`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    pub function: String,
    pub field: String,
    pub alias: String,
}

impl Aggregate {
    pub fn new(
        function: impl Into<String>,
        field: impl Into<String>,
        alias: impl Into<String>,
    ) -> Self {
        Self {
            function: function.into(),
            field: field.into(),
            alias: alias.into(),
        }
    }
}

/// SELECT / COUNT / 聚合共用的描述。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryDescriptor {
    pub table: String,
    pub alias: Option<String>,
    /// 为空时投影 `*`（有别名时为 `alias.*`）。
    pub select: Vec<String>,
    pub conditions: Vec<Condition>,
    pub order_by: Vec<(String, Order)>,
    /// `(offset, count)`
    pub limit: Option<(u64, u64)>,
    pub group_by: Vec<String>,
    pub aggregates: Vec<Aggregate>,
}

impl QueryDescriptor {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn select<T: Into<String>>(mut self, cols: impl IntoIterator<Item = T>) -> Self {
        self.select.extend(cols.into_iter().map(Into::into));
        self
    }

    pub fn where_(mut self, chain: Chain) -> Self {
        self.conditions.extend(chain.build());
        self
    }

    pub fn conditions(mut self, conditions: impl IntoIterator<Item = Condition>) -> Self {
        self.conditions.extend(conditions);
        self
    }

    pub fn order_by(mut self, col: impl Into<String>, order: Order) -> Self {
        self.order_by.push((col.into(), order));
        self
    }

    /// `offset` 行之后取 `count` 行。
    pub fn limit(mut self, offset: u64, count: u64) -> Self {
        self.limit = Some((offset, count));
        self
    }

    /// 第 `page` 页（从 1 开始），每页 `size` 行。
    pub fn page(self, page: u64, size: u64) -> Self {
        let offset = page.saturating_sub(1).saturating_mul(size);
        self.limit(offset, size)
    }

    pub fn group_by<T: Into<String>>(mut self, cols: impl IntoIterator<Item = T>) -> Self {
        self.group_by.extend(cols.into_iter().map(Into::into));
        self
    }

    pub fn aggregate(mut self, aggregate: Aggregate) -> Self {
        self.aggregates.push(aggregate);
        self
    }
}

/// UPDATE 描述：SET 列表加谓词。DELETE 只使用 `conditions`。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MutationDescriptor {
    pub table: String,
    pub update: Vec<UpdateValue>,
    pub conditions: Vec<Condition>,
}

impl MutationDescriptor {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    pub fn set(mut self, fields: UpdateFieldChain) -> Self {
        self.update.extend(fields.build());
        self
    }

    pub fn where_(mut self, chain: Chain) -> Self {
        self.conditions.extend(chain.build());
        self
    }

    pub fn conditions(mut self, conditions: impl IntoIterator<Item = Condition>) -> Self {
        self.conditions.extend(conditions);
        self
    }

    /// 经过空值规则后仍会渲染的谓词个数。
    pub fn effective_conditions(&self) -> usize {
        self.conditions.iter().filter(|c| !c.is_skipped()).count()
    }

    /// 第一个有效谓词以 AND 接在 `1=1` 之后：渲染出的 WHERE 确实限定了行。
    ///
    /// 以 OR 开头会得到 `1=1 OR ...`，等同于没有条件。
    pub fn is_restricted(&self) -> bool {
        self.conditions
            .iter()
            .find(|c| !c.is_skipped())
            .is_some_and(|c| c.logic == Logic::And)
    }
}
