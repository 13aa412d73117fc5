//! DELETE 的组装。与 UPDATE 一样，谓词数量的保护在上一层。

use crate::args::Args;
use crate::cond::Cond;
use crate::dialect::{Dialect, checked_identifier};
use crate::error::Result;
use crate::query::MutationDescriptor;
use crate::statement::BuiltStatement;

pub fn build_delete(
    dialect: &dyn Dialect,
    mutation: &MutationDescriptor,
    verify: bool,
) -> Result<BuiltStatement> {
    let table = checked_identifier(dialect, &mutation.table)?;
    let mut args = Args::new(dialect);
    let where_sql = Cond::new(&mut args).compile(&mutation.conditions)?;
    args.finish(dialect.build_delete(&table, &where_sql), verify)
}
