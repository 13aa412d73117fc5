#[cfg(test)]
mod tests {
    use crate::dialect::{Dialect, PaginationStyle};
    use crate::error::{BuildError, ErrorKind};
    use crate::oracle::OracleDialect;
    use crate::registry::DialectRegistry;
    use crate::sqlserver::SqlServerDialect;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn aliases_share_one_instance() {
        let reg = DialectRegistry::new();
        let a = reg.create("mysql").unwrap();
        let b = reg.create("MariaDB").unwrap();
        let c = reg.create("tidb").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(Arc::ptr_eq(&a, &c));

        let pg = reg.create("postgresql").unwrap();
        assert!(Arc::ptr_eq(&pg, &reg.create("Postgres").unwrap()));
        assert_eq!(pg.name(), "postgres");
    }

    #[test]
    fn unknown_dialect_is_config_error() {
        let reg = DialectRegistry::new();
        let err = reg.create("db2").unwrap_err();
        assert!(matches!(err, BuildError::UnsupportedDialect(ref n) if n == "db2"));
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(!reg.is_supported("db2"));
    }

    #[test]
    fn register_overrides_builtin() {
        let reg = DialectRegistry::new();
        reg.register("Oracle", Arc::new(OracleDialect::with_version(11)));
        let d = reg.create("oracle").unwrap();
        assert_eq!(d.pagination_style(), PaginationStyle::RowNum);

        reg.register("mssql2008", Arc::new(SqlServerDialect::legacy()));
        assert!(reg.is_supported("MSSQL2008"));
        assert_eq!(
            reg.create("mssql2008").unwrap().pagination_style(),
            PaginationStyle::Top
        );
        assert!(reg.names().contains(&"mssql2008".to_string()));
    }

    #[test]
    fn reset_drops_cache_and_registrations() {
        let reg = DialectRegistry::new();
        let before = reg.create("sqlite").unwrap();
        reg.register("legacy", Arc::new(SqlServerDialect::legacy()));

        reg.reset();

        let after = reg.create("sqlite").unwrap();
        assert!(!Arc::ptr_eq(&before, &after));
        assert!(reg.create("legacy").is_err());
    }

    #[test]
    fn names_are_sorted_and_unique() {
        let reg = DialectRegistry::new();
        reg.register("mysql", Arc::new(crate::mysql::MySqlDialect::new()));
        let names = reg.names();
        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(names, sorted);
        assert_eq!(names.iter().filter(|n| *n == "mysql").count(), 1);
    }

    #[test]
    fn concurrent_creation_converges() {
        let reg = Arc::new(DialectRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let reg = Arc::clone(&reg);
                thread::spawn(move || reg.create("postgres").unwrap())
            })
            .collect();
        let dialects: Vec<Arc<dyn Dialect>> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();
        let cached = reg.create("postgres").unwrap();
        for d in &dialects {
            assert!(Arc::ptr_eq(d, &cached));
        }
    }
}
