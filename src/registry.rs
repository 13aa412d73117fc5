//! DialectRegistry：按名字/别名缓存方言单例，并允许注册自定义方言。
//!
//! registry 是一个显式的值，由 [`SqlBuilder`](crate::SqlBuilder) 在构造时持有；
//! 没有任何进程级的隐式全局表。

use crate::dialect::Dialect;
use crate::error::{BuildError, Result};
use crate::flavor::Flavor;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

type DialectMap = HashMap<String, Arc<dyn Dialect>>;

#[derive(Debug, Default)]
pub struct DialectRegistry {
    /// 内置家族的单例，键为规范名。
    cache: RwLock<DialectMap>,
    /// 自定义注册，键为小写名字；优先于内置工厂。
    custom: RwLock<DialectMap>,
}

fn read(lock: &RwLock<DialectMap>) -> RwLockReadGuard<'_, DialectMap> {
    lock.read().unwrap_or_else(|e| e.into_inner())
}

fn write(lock: &RwLock<DialectMap>) -> RwLockWriteGuard<'_, DialectMap> {
    lock.write().unwrap_or_else(|e| e.into_inner())
}

impl DialectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 大小写不敏感地查找方言；内置家族首次使用时构造并缓存。
    pub fn create(&self, name: &str) -> Result<Arc<dyn Dialect>> {
        let key = name.trim().to_ascii_lowercase();
        if let Some(d) = read(&self.custom).get(&key) {
            return Ok(d.clone());
        }

        let flavor =
            Flavor::from_name(&key).ok_or_else(|| BuildError::UnsupportedDialect(name.to_string()))?;
        let canonical = flavor.canonical_name();
        if let Some(d) = read(&self.cache).get(canonical) {
            return Ok(d.clone());
        }

        // 两个调用方可能同时构造同一个方言；先写入者胜出，实例之间没有差别。
        let built = flavor.dialect();
        let mut cache = write(&self.cache);
        let d = cache
            .entry(canonical.to_string())
            .or_insert_with(|| {
                tracing::debug!(dialect = canonical, requested = %key, "dialect constructed");
                built
            })
            .clone();
        Ok(d)
    }

    /// 安装/覆盖一个方言；之后对该名字的查找都返回这个实例。
    pub fn register(&self, name: &str, dialect: Arc<dyn Dialect>) {
        let key = name.trim().to_ascii_lowercase();
        tracing::debug!(name = %key, dialect = dialect.name(), "dialect registered");
        write(&self.custom).insert(key, dialect);
    }

    /// 清空缓存与自定义注册（测试用）。
    pub fn reset(&self) {
        write(&self.cache).clear();
        write(&self.custom).clear();
        tracing::debug!("dialect registry reset");
    }

    pub fn is_supported(&self, name: &str) -> bool {
        let key = name.trim().to_ascii_lowercase();
        read(&self.custom).contains_key(&key) || Flavor::from_name(&key).is_some()
    }

    /// 所有可用名字（内置别名 + 自定义注册），已排序去重。
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = Flavor::all_names().map(str::to_string).collect();
        names.extend(read(&self.custom).keys().cloned());
        names.sort();
        names.dedup();
        names
    }
}
