use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use sqlx::{QueryBuilder, Sqlite};

use super::StoreError;

static FIELD_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("field name pattern is valid"));

/// Field names are spliced into JSON paths, so only plain identifiers pass.
pub(crate) fn check_field(field: &str) -> Result<(), StoreError> {
    if FIELD_NAME.is_match(field) {
        Ok(())
    } else {
        Err(StoreError::InvalidField(field.to_string()))
    }
}

pub(crate) fn json_path(field: &str) -> String {
    format!("json_extract(doc, '$.{field}')")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Eq,
    Gte,
}

impl Op {
    fn symbol(self) -> &'static str {
        match self {
            Op::Eq => " = ",
            Op::Gte => " >= ",
        }
    }
}

#[derive(Debug, Clone)]
struct Condition {
    field: &'static str,
    op: Op,
    value: Value,
}

/// Conjunction of predicates over top-level document fields.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    /// Matches every document.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &'static str, value: impl Into<Value>) -> Self {
        self.conditions.push(Condition {
            field,
            op: Op::Eq,
            value: value.into(),
        });
        self
    }

    /// `field >= value`. Timestamps compare correctly because they are
    /// stored in a fixed-width format.
    pub fn gte(mut self, field: &'static str, value: impl Into<Value>) -> Self {
        self.conditions.push(Condition {
            field,
            op: Op::Gte,
            value: value.into(),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub(crate) fn push_where(&self, builder: &mut QueryBuilder<'_, Sqlite>) -> Result<(), StoreError> {
        for (i, condition) in self.conditions.iter().enumerate() {
            check_field(condition.field)?;

            builder.push(if i == 0 { " WHERE " } else { " AND " });
            builder.push(json_path(condition.field));

            match (&condition.value, condition.op) {
                (Value::Null, Op::Eq) => {
                    builder.push(" IS NULL");
                }
                // json_extract yields 1/0 for JSON booleans
                (Value::Bool(b), op) => {
                    builder.push(op.symbol()).push_bind(i64::from(*b));
                }
                (Value::Number(n), op) => {
                    builder.push(op.symbol());
                    if let Some(i) = n.as_i64() {
                        builder.push_bind(i);
                    } else if let Some(f) = n.as_f64() {
                        builder.push_bind(f);
                    } else {
                        return Err(StoreError::UnsupportedValue(condition.field.to_string()));
                    }
                }
                (Value::String(s), op) => {
                    builder.push(op.symbol()).push_bind(s.clone());
                }
                _ => return Err(StoreError::UnsupportedValue(condition.field.to_string())),
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Ordering for `find_many`. Ties fall back to insertion order, in the
/// same direction as the sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: &'static str,
    pub direction: Direction,
}

impl Sort {
    pub fn asc(field: &'static str) -> Self {
        Self {
            field,
            direction: Direction::Ascending,
        }
    }

    pub fn desc(field: &'static str) -> Self {
        Self {
            field,
            direction: Direction::Descending,
        }
    }

    pub(crate) fn push_order_by(&self, builder: &mut QueryBuilder<'_, Sqlite>) -> Result<(), StoreError> {
        check_field(self.field)?;

        let keyword = match self.direction {
            Direction::Ascending => "ASC",
            Direction::Descending => "DESC",
        };
        builder.push(format!(" ORDER BY {} {keyword}, rowid {keyword}", json_path(self.field)));
        Ok(())
    }
}
