//! UPDATE 的组装：先编译 SET（先编号），再编译 WHERE。
//!
//! 这里不检查“至少一个谓词”；该约束由 [`SqlBuilder`](crate::builder::SqlBuilder) 在构建之前判断。

use crate::args::Args;
use crate::cond::Cond;
use crate::dialect::{Dialect, checked_identifier};
use crate::error::{BuildError, Result};
use crate::mutation::compile_set;
use crate::query::MutationDescriptor;
use crate::statement::BuiltStatement;

pub fn build_update(
    dialect: &dyn Dialect,
    mutation: &MutationDescriptor,
    verify: bool,
) -> Result<BuiltStatement> {
    let table = checked_identifier(dialect, &mutation.table)?;
    let mut args = Args::new(dialect);

    let set_sql = compile_set(&mutation.update, &mut args)?;
    if set_sql.is_empty() {
        return Err(BuildError::InvalidQuery(
            "update has no assignment left to render".to_string(),
        ));
    }
    let where_sql = Cond::new(&mut args).compile(&mutation.conditions)?;

    let sql = dialect.build_update(&table, &set_sql, &where_sql);
    args.finish(sql, verify)
}
