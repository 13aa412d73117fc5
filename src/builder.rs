//! SqlBuilder：绑定一个方言的门面，所有语句都从这里构建。
//!
//! 与底层组装函数相比多两件事：UPDATE/DELETE 的谓词保护，以及 tracing 日志
//! （只记录 SQL 与参数个数，不记录参数值）。

use crate::delete::build_delete;
use crate::dialect::Dialect;
use crate::error::{BuildError, Result};
use crate::insert::{InsertDescriptor, build_batch_insert, build_insert};
use crate::query::{MutationDescriptor, QueryDescriptor};
use crate::registry::DialectRegistry;
use crate::select::{build_aggregate, build_count, build_select};
use crate::statement::BuiltStatement;
use crate::update::build_update;
use crate::upsert::{UpsertDescriptor, build_upsert};
use std::sync::Arc;

/// 构建器配置。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderConfig {
    /// 方言名或别名（大小写不敏感）。
    pub dialect: String,
    /// 构建完成后核对占位符个数与参数个数。
    pub verify_placeholders: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            dialect: "mysql".to_string(),
            verify_placeholders: true,
        }
    }
}

impl BuilderConfig {
    pub fn new(dialect: impl Into<String>) -> Self {
        Self {
            dialect: dialect.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct SqlBuilder {
    registry: Arc<DialectRegistry>,
    dialect: Arc<dyn Dialect>,
    verify: bool,
}

impl SqlBuilder {
    /// 通过 registry 解析 `dialect`；未知名字返回 `UnsupportedDialect`。
    pub fn new(registry: Arc<DialectRegistry>, dialect: &str) -> Result<Self> {
        Self::from_config(registry, &BuilderConfig::new(dialect))
    }

    pub fn from_config(registry: Arc<DialectRegistry>, config: &BuilderConfig) -> Result<Self> {
        let dialect = registry.create(&config.dialect)?;
        Ok(Self {
            registry,
            dialect,
            verify: config.verify_placeholders,
        })
    }

    /// 直接使用给定的方言实例（使用一个新的空 registry）。
    pub fn with_dialect(dialect: Arc<dyn Dialect>) -> Self {
        Self {
            registry: Arc::new(DialectRegistry::new()),
            dialect,
            verify: true,
        }
    }

    /// 同一个 registry 下切换到另一个方言。
    pub fn switch(&self, dialect: &str) -> Result<Self> {
        Ok(Self {
            registry: Arc::clone(&self.registry),
            dialect: self.registry.create(dialect)?,
            verify: self.verify,
        })
    }

    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    pub fn registry(&self) -> &Arc<DialectRegistry> {
        &self.registry
    }

    pub fn select(&self, query: &QueryDescriptor) -> Result<BuiltStatement> {
        let stmt = build_select(self.dialect(), query, self.verify)?;
        self.trace("select", &stmt);
        Ok(stmt)
    }

    pub fn count(&self, query: &QueryDescriptor) -> Result<BuiltStatement> {
        let stmt = build_count(self.dialect(), query, self.verify)?;
        self.trace("count", &stmt);
        Ok(stmt)
    }

    /// 分页查询：同一个描述生成的数据 SELECT 与总数 COUNT。
    pub fn page(&self, query: &QueryDescriptor) -> Result<(BuiltStatement, BuiltStatement)> {
        Ok((self.select(query)?, self.count(query)?))
    }

    pub fn aggregate(&self, query: &QueryDescriptor) -> Result<BuiltStatement> {
        let stmt = build_aggregate(self.dialect(), query, self.verify)?;
        self.trace("aggregate", &stmt);
        Ok(stmt)
    }

    pub fn insert(&self, insert: &InsertDescriptor) -> Result<BuiltStatement> {
        let stmt = build_insert(self.dialect(), insert, self.verify)?;
        self.trace("insert", &stmt);
        Ok(stmt)
    }

    pub fn batch_insert(&self, insert: &InsertDescriptor) -> Result<BuiltStatement> {
        let stmt = build_batch_insert(self.dialect(), insert, self.verify)?;
        self.trace("batch_insert", &stmt);
        Ok(stmt)
    }

    /// 没有任何有效谓词（全部为空或被空值规则跳过），或第一个有效谓词以 OR 连接时拒绝构建。
    pub fn update(&self, mutation: &MutationDescriptor) -> Result<BuiltStatement> {
        self.guard("update", mutation)?;
        let stmt = build_update(self.dialect(), mutation, self.verify)?;
        self.trace("update", &stmt);
        Ok(stmt)
    }

    /// 同 [`update`](Self::update) 的保护规则。
    pub fn delete(&self, mutation: &MutationDescriptor) -> Result<BuiltStatement> {
        self.guard("delete", mutation)?;
        let stmt = build_delete(self.dialect(), mutation, self.verify)?;
        self.trace("delete", &stmt);
        Ok(stmt)
    }

    pub fn upsert(&self, upsert: &UpsertDescriptor) -> Result<BuiltStatement> {
        let stmt = build_upsert(self.dialect(), upsert, self.verify)?;
        self.trace("upsert", &stmt);
        Ok(stmt)
    }

    fn guard(&self, operation: &'static str, mutation: &MutationDescriptor) -> Result<()> {
        if mutation.is_restricted() {
            return Ok(());
        }
        tracing::warn!(
            dialect = self.dialect.name(),
            operation,
            table = %mutation.table,
            supplied = mutation.conditions.len(),
            effective = mutation.effective_conditions(),
            "rejected mutation without restricting predicate"
        );
        Err(BuildError::UnguardedMutation { operation })
    }

    fn trace(&self, kind: &'static str, stmt: &BuiltStatement) {
        tracing::debug!(
            dialect = self.dialect.name(),
            kind,
            sql = %stmt.sql,
            param_count = stmt.params.len(),
            "statement built"
        );
    }
}
