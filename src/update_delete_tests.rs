#[cfg(test)]
mod tests {
    use crate::condition::Chain;
    use crate::delete::build_delete;
    use crate::error::BuildError;
    use crate::mutation::{CaseBranch, UpdateFieldChain};
    use crate::mysql::MySqlDialect;
    use crate::oracle::OracleDialect;
    use crate::postgres::PostgresDialect;
    use crate::query::MutationDescriptor;
    use crate::sqlserver::SqlServerDialect;
    use crate::update::build_update;
    use crate::value::SqlValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn update_numbers_set_before_where() {
        let m = MutationDescriptor::new("users")
            .set(UpdateFieldChain::new().assign("level", 10_i64).incr("score", 5_i64))
            .where_(Chain::new().equal("id", 1234_i64));
        let stmt = build_update(&PostgresDialect::new(), &m, true).unwrap();
        assert_eq!(
            stmt.sql,
            "UPDATE \"users\" SET \"level\" = $1, \"score\" = \"score\" + $2 WHERE 1=1 AND \"id\" = $3"
        );
        assert_eq!(
            stmt.params,
            vec![SqlValue::I64(10), SqlValue::I64(5), SqlValue::I64(1234)]
        );
    }

    #[test]
    fn update_with_case_on_sqlserver() {
        let m = MutationDescriptor::new("products")
            .set(UpdateFieldChain::new().case(
                "price",
                "sku",
                [CaseBranch::new("A", 10_i64), CaseBranch::new("B", 20_i64)],
            ))
            .where_(Chain::new().in_("sku", vec!["A", "B"]));
        let stmt = build_update(&SqlServerDialect::new(), &m, true).unwrap();
        assert_eq!(
            stmt.sql,
            "UPDATE [products] SET [price] = (CASE [sku] WHEN @p1 THEN @p2 WHEN @p3 THEN @p4 END) WHERE 1=1 AND [sku] IN (@p5, @p6)"
        );
        assert_eq!(stmt.params.len(), 6);
    }

    #[test]
    fn update_with_nothing_to_set_rejected() {
        let m = MutationDescriptor::new("users")
            .set(UpdateFieldChain::new().assign("name", ""))
            .where_(Chain::new().equal("id", 1_i64));
        let err = build_update(&MySqlDialect::new(), &m, true).unwrap_err();
        assert!(matches!(err, BuildError::InvalidQuery(_)));
    }

    #[test]
    fn assembler_renders_base_clause_without_guard() {
        let m = MutationDescriptor::new("users");
        let stmt = build_delete(&MySqlDialect::new(), &m, true).unwrap();
        assert_eq!(stmt.sql, "DELETE FROM `users` WHERE 1=1");
    }

    #[test]
    fn delete_on_each_dialect() {
        let m = MutationDescriptor::new("users").where_(Chain::new().equal("id", 9_i64));
        let my = build_delete(&MySqlDialect::new(), &m, true).unwrap();
        assert_eq!(my.sql, "DELETE FROM `users` WHERE 1=1 AND `id` = ?");
        let ora = build_delete(&OracleDialect::new(), &m, true).unwrap();
        assert_eq!(ora.sql, "DELETE FROM \"users\" WHERE 1=1 AND \"id\" = :1");
        assert_eq!(ora.params, vec![SqlValue::I64(9)]);
    }
}
