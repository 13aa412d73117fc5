#[cfg(test)]
mod tests {
    use crate::condition::Chain;
    use crate::dialect::Dialect;
    use crate::error::{BuildError, ErrorKind};
    use crate::mysql::MySqlDialect;
    use crate::oracle::OracleDialect;
    use crate::postgres::PostgresDialect;
    use crate::query::{Aggregate, Order, QueryDescriptor};
    use crate::select::{build_aggregate, build_count, build_select};
    use crate::sqlite::SqliteDialect;
    use crate::sqlserver::SqlServerDialect;
    use crate::value::SqlValue;
    use pretty_assertions::assert_eq;

    fn users() -> QueryDescriptor {
        QueryDescriptor::new("users")
    }

    #[test]
    fn select_defaults_to_star() {
        let stmt = build_select(&MySqlDialect::new(), &users(), true).unwrap();
        assert_eq!(stmt.sql, "SELECT * FROM `users` WHERE 1=1");
        assert!(stmt.params.is_empty());
    }

    #[test]
    fn select_with_alias_projects_alias_star() {
        let q = users().alias("u").where_(Chain::new().equal("u.id", 1_i64));
        let stmt = build_select(&PostgresDialect::new(), &q, true).unwrap();
        assert_eq!(
            stmt.sql,
            "SELECT \"u\".* FROM \"users\" \"u\" WHERE 1=1 AND \"u\".\"id\" = $1"
        );
    }

    #[test]
    fn select_columns_and_fragments() {
        let q = users().select(["id", "name", "COUNT(id) AS n"]);
        let stmt = build_select(&MySqlDialect::new(), &q, true).unwrap();
        assert_eq!(
            stmt.sql,
            "SELECT `id`, `name`, COUNT(id) AS n FROM `users` WHERE 1=1"
        );

        for item in [
            "(SELECT password FROM admins)",
            "COALESCE(name, ?)",
            "CONCAT(name, ')",
            "pwd) AS x FROM admins WHERE (1=1",
        ] {
            let bad = users()
                .select([item])
                .where_(Chain::new().equal("id", 1_i64));
            for verify in [true, false] {
                let err = build_select(&MySqlDialect::new(), &bad, verify).unwrap_err();
                assert!(matches!(err, BuildError::UnsafeFragment(_)), "{item}");
            }
        }

        let numbered = users().select(["COALESCE(name, $1)"]);
        let err = build_select(&PostgresDialect::new(), &numbered, true).unwrap_err();
        assert!(matches!(err, BuildError::UnsafeFragment(_)));
    }

    #[test]
    fn mysql_limit_binds_offset_then_count() {
        let q = users().limit(10, 20);
        let stmt = build_select(&MySqlDialect::new(), &q, true).unwrap();
        assert_eq!(stmt.sql, "SELECT * FROM `users` WHERE 1=1 LIMIT ?, ?");
        assert_eq!(stmt.params, vec![SqlValue::U64(10), SqlValue::U64(20)]);
    }

    #[test]
    fn postgres_limit_binds_count_then_offset() {
        let q = users()
            .where_(Chain::new().equal("status", 1_i64))
            .limit(10, 20);
        let stmt = build_select(&PostgresDialect::new(), &q, true).unwrap();
        assert_eq!(
            stmt.sql,
            "SELECT * FROM \"users\" WHERE 1=1 AND \"status\" = $1 LIMIT $2 OFFSET $3"
        );
        assert_eq!(
            stmt.params,
            vec![SqlValue::I64(1), SqlValue::U64(20), SqlValue::U64(10)]
        );
    }

    #[test]
    fn sqlite_limit_offset() {
        let stmt = build_select(&SqliteDialect::new(), &users().limit(0, 5), true).unwrap();
        assert_eq!(stmt.sql, "SELECT * FROM \"users\" WHERE 1=1 LIMIT ? OFFSET ?");
        assert_eq!(stmt.params, vec![SqlValue::U64(5), SqlValue::U64(0)]);
    }

    #[test]
    fn numbered_dialects_have_no_gaps() {
        let q = users()
            .where_(
                Chain::new()
                    .equal("a", 1_i64)
                    .in_("b", vec![2_i64, 3])
                    .greater_than("c", 4_i64),
            )
            .order_by("id", Order::Asc)
            .limit(40, 20);
        let cases: Vec<(Box<dyn Dialect>, &str)> = vec![
            (
                Box::new(PostgresDialect::new()),
                "SELECT * FROM \"users\" WHERE 1=1 AND \"a\" = $1 AND \"b\" IN ($2, $3) AND \"c\" > $4 ORDER BY \"id\" ASC LIMIT $5 OFFSET $6",
            ),
            (
                Box::new(SqlServerDialect::new()),
                "SELECT * FROM [users] WHERE 1=1 AND [a] = @p1 AND [b] IN (@p2, @p3) AND [c] > @p4 ORDER BY [id] ASC OFFSET @p5 ROWS FETCH NEXT @p6 ROWS ONLY",
            ),
            (
                Box::new(OracleDialect::new()),
                "SELECT * FROM \"users\" WHERE 1=1 AND \"a\" = :1 AND \"b\" IN (:2, :3) AND \"c\" > :4 ORDER BY \"id\" ASC OFFSET :5 ROWS FETCH NEXT :6 ROWS ONLY",
            ),
        ];
        for (dialect, expected) in cases {
            let stmt = build_select(dialect.as_ref(), &q, true).unwrap();
            assert_eq!(stmt.sql, expected, "{}", dialect.name());
            assert_eq!(stmt.params.len(), 4 + 2);
        }
    }

    #[test]
    fn sqlserver_offset_gets_default_order() {
        let stmt = build_select(&SqlServerDialect::new(), &users().limit(0, 10), true).unwrap();
        assert_eq!(
            stmt.sql,
            "SELECT * FROM [users] WHERE 1=1 ORDER BY (SELECT NULL) OFFSET @p1 ROWS FETCH NEXT @p2 ROWS ONLY"
        );
        assert_eq!(stmt.params, vec![SqlValue::U64(0), SqlValue::U64(10)]);
    }

    #[test]
    fn sqlserver_legacy_top_is_numbered_first() {
        let q = users()
            .where_(Chain::new().equal("status", 1_i64))
            .limit(0, 10);
        let stmt = build_select(&SqlServerDialect::legacy(), &q, true).unwrap();
        assert_eq!(
            stmt.sql,
            "SELECT TOP (@p1) * FROM [users] WHERE 1=1 AND [status] = @p2"
        );
        assert_eq!(stmt.params, vec![SqlValue::U64(10), SqlValue::I64(1)]);
    }

    #[test]
    fn top_with_offset_not_supported() {
        let err = build_select(&SqlServerDialect::legacy(), &users().limit(10, 10), true)
            .unwrap_err();
        assert!(matches!(err, BuildError::NotSupported { .. }));
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn oracle_legacy_wraps_with_rownum() {
        let q = users()
            .where_(Chain::new().equal("status", 1_i64))
            .order_by("id", Order::Desc)
            .limit(20, 10);
        let stmt = build_select(&OracleDialect::with_version(11), &q, true).unwrap();
        assert_eq!(
            stmt.sql,
            "SELECT * FROM (SELECT row_.*, ROWNUM rownum_ FROM (SELECT * FROM \"users\" WHERE 1=1 AND \"status\" = :1 ORDER BY \"id\" DESC) row_ WHERE ROWNUM <= :2) WHERE rownum_ > :3"
        );
        assert_eq!(
            stmt.params,
            vec![SqlValue::I64(1), SqlValue::U64(30), SqlValue::U64(20)]
        );
    }

    #[test]
    fn group_by_and_order() {
        let q = users()
            .select(["dept"])
            .group_by(["dept"])
            .order_by("dept", Order::Asc);
        let stmt = build_select(&MySqlDialect::new(), &q, true).unwrap();
        assert_eq!(
            stmt.sql,
            "SELECT `dept` FROM `users` WHERE 1=1 GROUP BY `dept` ORDER BY `dept` ASC"
        );
    }

    #[test]
    fn count_shares_where_and_ignores_paging() {
        let q = users()
            .where_(Chain::new().equal("status", 1_i64))
            .order_by("id", Order::Asc)
            .limit(10, 20);
        let stmt = build_count(&PostgresDialect::new(), &q, true).unwrap();
        assert_eq!(
            stmt.sql,
            "SELECT COUNT(*) FROM \"users\" WHERE 1=1 AND \"status\" = $1"
        );
        assert_eq!(stmt.params, vec![SqlValue::I64(1)]);
    }

    #[test]
    fn count_with_group_by_counts_groups() {
        let q = users().group_by(["dept"]);
        let stmt = build_count(&MySqlDialect::new(), &q, true).unwrap();
        assert_eq!(
            stmt.sql,
            "SELECT COUNT(*) FROM (SELECT `dept` FROM `users` WHERE 1=1 GROUP BY `dept`) count_"
        );
    }

    #[test]
    fn aggregate_projection() {
        let q = users()
            .group_by(["dept"])
            .aggregate(Aggregate::new("count", "*", "total"))
            .aggregate(Aggregate::new("AVG", "salary", "avg_salary"))
            .where_(Chain::new().equal("active", true))
            .limit(0, 5);
        let stmt = build_aggregate(&PostgresDialect::new(), &q, true).unwrap();
        assert_eq!(
            stmt.sql,
            "SELECT \"dept\", COUNT(*) AS \"total\", AVG(\"salary\") AS \"avg_salary\" FROM \"users\" WHERE 1=1 AND \"active\" = $1 GROUP BY \"dept\" LIMIT $2 OFFSET $3"
        );
        assert_eq!(stmt.params.len(), 3);
    }

    #[test]
    fn aggregate_rejections() {
        let my = MySqlDialect::new();
        let none = build_aggregate(&my, &users(), true).unwrap_err();
        assert!(matches!(none, BuildError::InvalidQuery(_)));

        let sum_star = users().aggregate(Aggregate::new("SUM", "*", "s"));
        assert!(matches!(
            build_aggregate(&my, &sum_star, true).unwrap_err(),
            BuildError::InvalidQuery(_)
        ));

        let unknown = users().aggregate(Aggregate::new("GROUP_CONCAT", "name", "s"));
        assert!(matches!(
            build_aggregate(&my, &unknown, true).unwrap_err(),
            BuildError::InvalidQuery(_)
        ));

        let bad_alias = users().aggregate(Aggregate::new("MAX", "age", "a.b"));
        assert!(matches!(
            build_aggregate(&my, &bad_alias, true).unwrap_err(),
            BuildError::InvalidIdentifier(_)
        ));
    }

    #[test]
    fn invalid_table_rejected() {
        let q = QueryDescriptor::new("users; DROP TABLE users");
        let err = build_select(&MySqlDialect::new(), &q, true).unwrap_err();
        assert!(matches!(err, BuildError::InvalidIdentifier(_)));
    }
}
