//! SELECT / COUNT / 聚合语句的组装。
//!
//! 三者共用同一条 WHERE 管线；占位符按出现顺序从同一个 [`Args`] 取号：
//! TOP 分页最先，其次是 WHERE 谓词，最后是追加或包裹在外层的分页。

use crate::args::Args;
use crate::cond::Cond;
use crate::dialect::{Dialect, Pagination, checked_identifier};
use crate::error::{BuildError, Result};
use crate::query::{Aggregate, QueryDescriptor};
use crate::statement::BuiltStatement;
use crate::validator::{aggregate_function, validate_select_item};

/// `SELECT <cols> FROM <table> [alias] WHERE ... [GROUP BY] [ORDER BY] [分页]`
pub fn build_select(
    dialect: &dyn Dialect,
    query: &QueryDescriptor,
    verify: bool,
) -> Result<BuiltStatement> {
    let mut cols = Vec::with_capacity(query.select.len());
    for item in &query.select {
        validate_select_item(item)?;
        cols.push(dialect.quote_identifier(item));
    }
    let projection = if cols.is_empty() {
        match &query.alias {
            Some(alias) => format!("{}.*", checked_identifier(dialect, alias)?),
            None => "*".to_string(),
        }
    } else {
        cols.join(", ")
    };
    assemble(dialect, query, &projection, verify)
}

/// 与 [`build_select`] 相同的 WHERE，投影改为 `COUNT(*)`；排序与分页被忽略。
///
/// 带 GROUP BY 时统计的是分组个数：`SELECT COUNT(*) FROM (... GROUP BY ...) count_`。
pub fn build_count(
    dialect: &dyn Dialect,
    query: &QueryDescriptor,
    verify: bool,
) -> Result<BuiltStatement> {
    let table = table_ref(dialect, query)?;
    let mut args = Args::new(dialect);
    let where_sql = Cond::new(&mut args).compile(&query.conditions)?;

    let sql = if query.group_by.is_empty() {
        format!("SELECT COUNT(*) FROM {table} WHERE {where_sql}")
    } else {
        let group = group_by_list(dialect, &query.group_by)?;
        format!(
            "SELECT COUNT(*) FROM (SELECT {group} FROM {table} WHERE {where_sql} GROUP BY {group}) count_"
        )
    };
    args.finish(sql, verify)
}

/// `SELECT [group cols,] FUNC(field) AS alias, ... FROM ...`，WHERE/排序/分页与 SELECT 相同。
pub fn build_aggregate(
    dialect: &dyn Dialect,
    query: &QueryDescriptor,
    verify: bool,
) -> Result<BuiltStatement> {
    if query.aggregates.is_empty() {
        return Err(BuildError::InvalidQuery(
            "aggregate query needs at least one aggregate".to_string(),
        ));
    }
    let mut items = Vec::with_capacity(query.group_by.len() + query.aggregates.len());
    for col in &query.group_by {
        items.push(checked_identifier(dialect, col)?);
    }
    for agg in &query.aggregates {
        items.push(aggregate_item(dialect, agg)?);
    }
    assemble(dialect, query, &items.join(", "), verify)
}

fn aggregate_item(dialect: &dyn Dialect, agg: &Aggregate) -> Result<String> {
    let function = aggregate_function(&agg.function)?;
    let field = if agg.field == "*" {
        if function != "COUNT" {
            return Err(BuildError::InvalidQuery(format!(
                "{function}(*) is not a valid aggregate"
            )));
        }
        "*".to_string()
    } else {
        checked_identifier(dialect, &agg.field)?
    };
    if agg.alias.contains(['*', '.']) {
        return Err(BuildError::InvalidIdentifier(agg.alias.clone()));
    }
    let alias = checked_identifier(dialect, &agg.alias)?;
    Ok(format!("{function}({field}) AS {alias}"))
}

fn table_ref(dialect: &dyn Dialect, query: &QueryDescriptor) -> Result<String> {
    let table = checked_identifier(dialect, &query.table)?;
    Ok(match &query.alias {
        Some(alias) => format!("{table} {}", checked_identifier(dialect, alias)?),
        None => table,
    })
}

fn group_by_list(dialect: &dyn Dialect, cols: &[String]) -> Result<String> {
    let quoted = cols
        .iter()
        .map(|c| checked_identifier(dialect, c))
        .collect::<Result<Vec<_>>>()?;
    Ok(quoted.join(", "))
}

fn assemble(
    dialect: &dyn Dialect,
    query: &QueryDescriptor,
    projection: &str,
    verify: bool,
) -> Result<BuiltStatement> {
    let table = table_ref(dialect, query)?;

    // TOP 的占位符位于 WHERE 之前，需要先编号
    let leading = match query.limit {
        Some((offset, count)) => match dialect.build_pagination(offset, count, 1)? {
            page @ Pagination::Leading { .. } => Some(page),
            _ => None,
        },
        None => None,
    };
    let mut args = match &leading {
        Some(page) => Args::with_prefix(dialect, page.params().to_vec()),
        None => Args::new(dialect),
    };

    let where_sql = Cond::new(&mut args).compile(&query.conditions)?;
    let mut sql = format!("SELECT {projection} FROM {table} WHERE {where_sql}");

    if !query.group_by.is_empty() {
        sql.push_str(" GROUP BY ");
        sql.push_str(&group_by_list(dialect, &query.group_by)?);
    }

    let mut order = Vec::with_capacity(query.order_by.len());
    for (col, dir) in &query.order_by {
        order.push(format!("{} {dir}", checked_identifier(dialect, col)?));
    }
    if !order.is_empty() {
        sql.push_str(" ORDER BY ");
        sql.push_str(&order.join(", "));
    }

    if let Some(page) = leading {
        return args.finish(page.apply(&sql), verify);
    }
    let Some((offset, count)) = query.limit else {
        return args.finish(sql, verify);
    };

    let page = dialect.build_pagination(offset, count, args.next_index())?;
    if order.is_empty()
        && dialect.requires_order_for_offset()
        && matches!(page, Pagination::Suffix { .. })
    {
        sql.push_str(" ORDER BY (SELECT NULL)");
    }
    args.extend_numbered(page.params());
    args.finish(page.apply(&sql), verify)
}
