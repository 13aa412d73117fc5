//! 错误类型：配置、校验、安全、语句四类。

/// 错误大类。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 未知方言、方言不支持的操作。
    Config,
    /// 非法标识符、不安全的原始片段、结构不合法的谓词/赋值。
    Validation,
    /// 无条件的 UPDATE/DELETE。
    Security,
    /// 内部不变量被破坏（占位符与参数数量不一致等）。
    Statement,
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("unsupported dialect: {0}")]
    UnsupportedDialect(String),
    #[error("dialect {dialect} does not support {operation}")]
    NotSupported {
        dialect: String,
        operation: &'static str,
    },

    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),
    #[error("unsafe sql fragment: {0:?}")]
    UnsafeFragment(String),
    #[error("invalid predicate on {key:?}: {reason}")]
    InvalidPredicate { key: String, reason: String },
    #[error("invalid mutation on {key:?}: {reason}")]
    InvalidMutation { key: String, reason: String },
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("refusing {operation} without any effective predicate")]
    UnguardedMutation { operation: &'static str },

    #[error("statement has {placeholders} placeholders but {params} params")]
    PlaceholderMismatch { placeholders: usize, params: usize },
    #[error("{0}")]
    DateTimeFormat(#[from] time::error::Format),
}

impl BuildError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedDialect(_) | Self::NotSupported { .. } => ErrorKind::Config,
            Self::InvalidIdentifier(_)
            | Self::UnsafeFragment(_)
            | Self::InvalidPredicate { .. }
            | Self::InvalidMutation { .. }
            | Self::InvalidQuery(_) => ErrorKind::Validation,
            Self::UnguardedMutation { .. } => ErrorKind::Security,
            Self::PlaceholderMismatch { .. } | Self::DateTimeFormat(_) => ErrorKind::Statement,
        }
    }

    pub(crate) fn predicate(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPredicate {
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn mutation(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidMutation {
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn not_supported(dialect: &str, operation: &'static str) -> Self {
        Self::NotSupported {
            dialect: dialect.to_string(),
            operation,
        }
    }
}

pub type Result<T> = std::result::Result<T, BuildError>;
