//! Flavor：内置的引擎家族，以及各家族对外公开的别名。

use crate::dialect::Dialect;
use crate::mysql::MySqlDialect;
use crate::oracle::OracleDialect;
use crate::postgres::PostgresDialect;
use crate::sqlite::SqliteDialect;
use crate::sqlserver::SqlServerDialect;
use std::fmt;
use std::sync::Arc;

/// 内置方言家族。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Flavor {
    #[default]
    MySQL,
    PostgreSQL,
    SQLite,
    SQLServer,
    Oracle,
}

const ALIASES: &[(&str, Flavor)] = &[
    ("mysql", Flavor::MySQL),
    ("mariadb", Flavor::MySQL),
    ("tidb", Flavor::MySQL),
    ("oceanbase", Flavor::MySQL),
    ("doris", Flavor::MySQL),
    ("postgres", Flavor::PostgreSQL),
    ("postgresql", Flavor::PostgreSQL),
    ("sqlite", Flavor::SQLite),
    ("sqlite3", Flavor::SQLite),
    ("sqlserver", Flavor::SQLServer),
    ("mssql", Flavor::SQLServer),
    ("oracle", Flavor::Oracle),
];

impl Flavor {
    pub const ALL: [Flavor; 5] = [
        Flavor::MySQL,
        Flavor::PostgreSQL,
        Flavor::SQLite,
        Flavor::SQLServer,
        Flavor::Oracle,
    ];

    /// 大小写不敏感地解析名字或别名。
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        ALIASES
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
            .map(|&(_, f)| f)
    }

    /// 规范名：同一家族的所有别名共享这个缓存键。
    pub fn canonical_name(self) -> &'static str {
        match self {
            Self::MySQL => "mysql",
            Self::PostgreSQL => "postgres",
            Self::SQLite => "sqlite",
            Self::SQLServer => "sqlserver",
            Self::Oracle => "oracle",
        }
    }

    pub fn aliases(self) -> impl Iterator<Item = &'static str> {
        ALIASES
            .iter()
            .filter(move |(_, f)| *f == self)
            .map(|&(alias, _)| alias)
    }

    pub fn all_names() -> impl Iterator<Item = &'static str> {
        ALIASES.iter().map(|&(alias, _)| alias)
    }

    /// 以默认配置构造该家族的方言。
    pub fn dialect(self) -> Arc<dyn Dialect> {
        match self {
            Self::MySQL => Arc::new(MySqlDialect::new()),
            Self::PostgreSQL => Arc::new(PostgresDialect::new()),
            Self::SQLite => Arc::new(SqliteDialect::new()),
            Self::SQLServer => Arc::new(SqlServerDialect::new()),
            Self::Oracle => Arc::new(OracleDialect::new()),
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::MySQL => "MySQL",
            Self::PostgreSQL => "PostgreSQL",
            Self::SQLite => "SQLite",
            Self::SQLServer => "SQLServer",
            Self::Oracle => "Oracle",
        };
        f.write_str(s)
    }
}
