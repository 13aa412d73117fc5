//! halo-sql-dialect：方言感知的参数化 SQL 编译器。
//!
//! 把与数据库无关的查询/变更描述编译为 `{sql, params}`：值永远以占位符绑定，
//! 不会以字面量拼进 SQL。支持 MySQL 家族、PostgreSQL、SQLite、SQL Server、Oracle。

pub mod args;
#[cfg(test)]
mod args_tests;
pub mod builder;
pub mod cond;
pub mod condition;
pub mod delete;
pub mod dialect;
pub mod error;
pub mod flavor;
pub mod insert;
pub mod mutation;
pub mod mysql;
pub mod oracle;
pub mod postgres;
pub mod query;
pub mod registry;
#[cfg(test)]
mod registry_tests;
pub mod select;
#[cfg(test)]
mod select_tests;
pub mod sqlite;
pub mod sqlserver;
pub mod statement;
pub mod update;
#[cfg(test)]
mod update_delete_tests;
pub mod upsert;
pub mod validator;
pub mod value;

pub use crate::args::{Args, count_placeholders};
pub use crate::builder::{BuilderConfig, SqlBuilder};
pub use crate::cond::{BASE_CLAUSE, Cond};
pub use crate::condition::{Chain, Condition, ConditionValue, Logic, Operator};
pub use crate::delete::build_delete;
pub use crate::dialect::{
    Dialect, InsertParts, Pagination, PaginationStyle, PlaceholderStyle, ReturningStyle,
    UpsertParts, checked_identifier, quote_identifier_with,
};
pub use crate::error::{BuildError, ErrorKind, Result};
pub use crate::flavor::Flavor;
pub use crate::insert::{InsertDescriptor, build_batch_insert, build_insert};
pub use crate::mutation::{
    CaseBranch, CaseField, UpdateField, UpdateFieldChain, UpdateFieldOperator, UpdateValue,
    compile_set,
};
pub use crate::mysql::MySqlDialect;
pub use crate::oracle::OracleDialect;
pub use crate::postgres::PostgresDialect;
pub use crate::query::{Aggregate, MutationDescriptor, Order, QueryDescriptor};
pub use crate::registry::DialectRegistry;
pub use crate::select::{build_aggregate, build_count, build_select};
pub use crate::sqlite::SqliteDialect;
pub use crate::sqlserver::SqlServerDialect;
pub use crate::statement::BuiltStatement;
pub use crate::update::build_update;
pub use crate::upsert::{UpsertDescriptor, build_upsert};
pub use crate::value::SqlValue;
