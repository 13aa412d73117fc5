//! UPDATE 的 SET 列表：普通赋值、增减量，以及按另一列分支取值的 CASE 赋值。

use crate::args::Args;
use crate::error::{BuildError, Result};
use crate::validator::validate_identifier;
use crate::value::SqlValue;

/// 赋值方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateFieldOperator {
    /// `col = ?`
    #[default]
    Assign,
    /// `col = col + ?`
    Incr,
    /// `col = col - ?`
    Decr,
}

impl UpdateFieldOperator {
    fn sign(self) -> Option<char> {
        match self {
            Self::Assign => None,
            Self::Incr => Some('+'),
            Self::Decr => Some('-'),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateField {
    pub field: String,
    pub value: SqlValue,
    pub operator: UpdateFieldOperator,
}

/// CASE 赋值的一条分支：`WHEN match THEN then`。
#[derive(Debug, Clone, PartialEq)]
pub struct CaseBranch {
    pub when: SqlValue,
    pub then: SqlValue,
    pub operator: UpdateFieldOperator,
}

impl CaseBranch {
    pub fn new(when: impl Into<SqlValue>, then: impl Into<SqlValue>) -> Self {
        Self {
            when: when.into(),
            then: then.into(),
            operator: UpdateFieldOperator::Assign,
        }
    }

    pub fn incr(when: impl Into<SqlValue>, by: impl Into<SqlValue>) -> Self {
        Self {
            operator: UpdateFieldOperator::Incr,
            ..Self::new(when, by)
        }
    }

    pub fn decr(when: impl Into<SqlValue>, by: impl Into<SqlValue>) -> Self {
        Self {
            operator: UpdateFieldOperator::Decr,
            ..Self::new(when, by)
        }
    }
}

/// `field = (CASE case_field WHEN ? THEN ? ... END)`
#[derive(Debug, Clone, PartialEq)]
pub struct CaseField {
    pub field: String,
    pub case_field: String,
    pub branches: Vec<CaseBranch>,
}

/// 一项 SET 赋值。
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateValue {
    Field(UpdateField),
    Case(CaseField),
}

impl UpdateValue {
    pub fn field(&self) -> &str {
        match self {
            Self::Field(f) => &f.field,
            Self::Case(c) => &c.field,
        }
    }

    /// 空字符串赋值、没有分支的 CASE：不参与渲染。
    pub fn is_skipped(&self) -> bool {
        match self {
            Self::Field(f) => f.value.is_empty_string(),
            Self::Case(c) => c.branches.is_empty(),
        }
    }
}

/// UpdateField 链。
#[derive(Debug, Default, Clone)]
pub struct UpdateFieldChain {
    fields: Vec<UpdateValue>,
}

impl UpdateFieldChain {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, field: impl Into<String>, value: SqlValue, operator: UpdateFieldOperator) -> Self {
        self.fields.push(UpdateValue::Field(UpdateField {
            field: field.into(),
            value,
            operator,
        }));
        self
    }

    pub fn assign(self, field: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.push(field, value.into(), UpdateFieldOperator::Assign)
    }

    pub fn incr(self, field: impl Into<String>, by: impl Into<SqlValue>) -> Self {
        self.push(field, by.into(), UpdateFieldOperator::Incr)
    }

    pub fn decr(self, field: impl Into<String>, by: impl Into<SqlValue>) -> Self {
        self.push(field, by.into(), UpdateFieldOperator::Decr)
    }

    pub fn case(
        mut self,
        field: impl Into<String>,
        case_field: impl Into<String>,
        branches: impl IntoIterator<Item = CaseBranch>,
    ) -> Self {
        self.fields.push(UpdateValue::Case(CaseField {
            field: field.into(),
            case_field: case_field.into(),
            branches: branches.into_iter().collect(),
        }));
        self
    }

    pub fn build(self) -> Vec<UpdateValue> {
        self.fields
    }
}

/// 编译 SET 列表（不含 `SET` 关键字）。全部被跳过时返回空串。
pub fn compile_set(items: &[UpdateValue], args: &mut Args<'_>) -> Result<String> {
    let mut parts = Vec::with_capacity(items.len());
    for item in items {
        if item.is_skipped() {
            continue;
        }
        parts.push(match item {
            UpdateValue::Field(f) => assignment(f, args)?,
            UpdateValue::Case(c) => case_assignment(c, args)?,
        });
    }
    Ok(parts.join(", "))
}

fn assignment(f: &UpdateField, args: &mut Args<'_>) -> Result<String> {
    validate_identifier(&f.field).map_err(|e| BuildError::mutation(&f.field, e.to_string()))?;
    let col = args.dialect().quote_identifier(&f.field);
    let ph = args.add(f.value.clone());
    Ok(match f.operator.sign() {
        None => format!("{col} = {ph}"),
        Some(sign) => format!("{col} = {col} {sign} {ph}"),
    })
}

fn case_assignment(c: &CaseField, args: &mut Args<'_>) -> Result<String> {
    for name in [&c.field, &c.case_field] {
        validate_identifier(name).map_err(|e| BuildError::mutation(&c.field, e.to_string()))?;
    }
    let col = args.dialect().quote_identifier(&c.field);
    let case_col = args.dialect().quote_identifier(&c.case_field);

    let mut sql = format!("{col} = (CASE {case_col}");
    for b in &c.branches {
        let when = args.add(b.when.clone());
        let then = args.add(b.then.clone());
        match b.operator.sign() {
            None => sql.push_str(&format!(" WHEN {when} THEN {then}")),
            Some(sign) => sql.push_str(&format!(" WHEN {when} THEN {case_col} {sign} {then}")),
        }
    }
    sql.push_str(" END)");
    Ok(sql)
}
