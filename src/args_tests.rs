#[cfg(test)]
mod tests {
    use crate::args::{Args, count_placeholders};
    use crate::dialect::PlaceholderStyle;
    use crate::error::{BuildError, ErrorKind};
    use crate::mysql::MySqlDialect;
    use crate::oracle::OracleDialect;
    use crate::postgres::PostgresDialect;
    use crate::sqlserver::SqlServerDialect;
    use crate::value::SqlValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn add_numbers_sequentially() {
        let pg = PostgresDialect::new();
        let mut args = Args::new(&pg);
        assert_eq!(args.add(1_i64), "$1");
        assert_eq!(args.add("x"), "$2");
        assert_eq!(args.next_index(), 3);
        assert_eq!(args.add_all([SqlValue::Null, SqlValue::Bool(true)]), vec!["$3", "$4"]);
        assert_eq!(args.len(), 4);
    }

    #[test]
    fn question_mark_repeats() {
        let my = MySqlDialect::new();
        let mut args = Args::new(&my);
        assert_eq!(args.add(1_i64), "?");
        assert_eq!(args.add(2_i64), "?");
    }

    #[test]
    fn prefix_shifts_numbering() {
        let ss = SqlServerDialect::new();
        let mut args = Args::with_prefix(&ss, vec![SqlValue::U64(10)]);
        assert_eq!(args.add("a"), "@p2");
        args.extend_numbered(&[SqlValue::U64(5)]);
        assert_eq!(args.next_index(), 4);
    }

    #[test]
    fn finish_checks_counts() {
        let ora = OracleDialect::new();
        let mut args = Args::new(&ora);
        let ph = args.add(7_i64);
        let stmt = args.finish(format!("SELECT * FROM t WHERE id = {ph}"), true).unwrap();
        assert_eq!(stmt.sql, "SELECT * FROM t WHERE id = :1");
        assert_eq!(stmt.params, vec![SqlValue::I64(7)]);

        let mut args = Args::new(&ora);
        args.add(7_i64);
        let err = args.finish("SELECT 1 FROM DUAL".to_string(), true).unwrap_err();
        assert!(matches!(
            err,
            BuildError::PlaceholderMismatch {
                placeholders: 0,
                params: 1
            }
        ));
        assert_eq!(err.kind(), ErrorKind::Statement);
    }

    #[test]
    fn finish_without_verification_trusts_caller() {
        let my = MySqlDialect::new();
        let mut args = Args::new(&my);
        args.add(1_i64);
        assert!(args.finish("SELECT 1".to_string(), false).is_ok());
    }

    #[test]
    fn count_skips_literals_and_quoted_names() {
        let cases = [
            (PlaceholderStyle::QuestionMark, "SELECT '?' FROM `a?` WHERE x = ?", ('`', '`'), 1),
            (PlaceholderStyle::QuestionMark, "SELECT 'it''s ?' , ?", ('"', '"'), 1),
            (PlaceholderStyle::DollarNumbered, "a = $1 AND b = $12 AND c = '$3'", ('"', '"'), 2),
            (PlaceholderStyle::DollarNumbered, "SELECT $ FROM \"$1\"", ('"', '"'), 0),
            (PlaceholderStyle::AtNumbered, "a = @p1 AND [b@p2] = @name", ('[', ']'), 2),
            (PlaceholderStyle::ColonNumbered, "a = :1 AND b::int = :name", ('"', '"'), 2),
            (PlaceholderStyle::ColonNumbered, "TO_TIMESTAMP('12:30:00') = :1", ('"', '"'), 1),
        ];
        for (style, sql, (open, close), expected) in cases {
            assert_eq!(count_placeholders(style, sql, open, close), expected, "{sql}");
        }
    }
}
