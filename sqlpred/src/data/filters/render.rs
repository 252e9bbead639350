//! SQL rendering for filters
//!
//! Each filter renders to a self-contained SQL boolean expression that can
//! be joined into a larger expression with AND/OR without re-grouping.
//!
//! Negation is owned by every node. SQL comparisons against NULL yield
//! UNKNOWN, which neither a predicate nor its plain `NOT` selects, so a
//! negated comparison also admits rows where the column is NULL. Forms that
//! already give a definite answer for NULL (`IS NULL`, `IS NOT NULL`, the
//! not-equal form) are negated with a plain `NOT`.

use crate::data::error::{FilterError, Result};
use crate::utils::sql::escape_like_pattern;

use super::types::{Filter, Operator, SqlParams, SqlValue};

/// Vacuously true condition (no columns to test)
const ALWAYS_TRUE: &str = "1=1";

/// Vacuously false condition (membership in an empty set)
const ALWAYS_FALSE: &str = "1=0";

/// How a positive fragment evaluates for rows where its column is NULL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NullBehavior {
    /// Always TRUE or FALSE
    Definite,
    /// UNKNOWN when the column is NULL
    Unknown,
}

/// Where literal values go while rendering
enum Literals<'a> {
    Inline,
    Bound(&'a mut SqlParams),
}

impl Literals<'_> {
    fn emit(&mut self, value: &SqlValue) -> Result<String> {
        match self {
            Literals::Inline => value.to_sql_literal(),
            Literals::Bound(params) => {
                if let SqlValue::Float(x) = value
                    && !x.is_finite()
                {
                    return Err(FilterError::NonFiniteNumber(*x));
                }
                params.values.push(value.clone());
                Ok("?".to_string())
            }
        }
    }

    fn emit_text(&mut self, value: String) -> Result<String> {
        self.emit(&SqlValue::Text(value))
    }
}

impl Filter {
    /// Generate SQL WHERE clause fragment with inline literals
    pub fn to_sql(&self) -> Result<String> {
        self.render(&mut Literals::Inline)
    }

    /// Generate SQL WHERE clause fragment
    /// Returns the SQL clause with ? placeholders and updates params
    pub fn to_sql_with_params(&self, params: &mut SqlParams) -> Result<String> {
        self.render(&mut Literals::Bound(params))
    }

    fn render(&self, lit: &mut Literals<'_>) -> Result<String> {
        match self {
            Self::Defined { columns, negate } => {
                let sql = if columns.is_empty() {
                    ALWAYS_TRUE.to_string()
                } else {
                    columns
                        .iter()
                        .map(|column| format!("{} IS NOT NULL", column))
                        .collect::<Vec<_>>()
                        .join(" AND ")
                };
                Ok(negated(sql, "", NullBehavior::Definite, *negate))
            }
            Self::SameValue {
                column,
                value,
                negate,
            } => {
                let (sql, nulls) = match value {
                    Some(value) => (
                        format!("{} = {}", column, lit.emit(value)?),
                        NullBehavior::Unknown,
                    ),
                    None => (format!("{} IS NULL", column), NullBehavior::Definite),
                };
                Ok(negated(sql, column, nulls, *negate))
            }
            Self::Group {
                conditions,
                conjunction,
                negate,
            } => render_group(conditions, *conjunction, *negate, lit),
            Self::Discrete {
                column,
                values,
                negate,
            } => {
                let (sql, nulls) = match values {
                    None => (format!("{} IS NOT NULL", column), NullBehavior::Definite),
                    Some(values) if values.is_empty() => {
                        (ALWAYS_FALSE.to_string(), NullBehavior::Definite)
                    }
                    Some(values) => {
                        let items = values
                            .iter()
                            .map(|value| lit.emit(value))
                            .collect::<Result<Vec<_>>>()?;
                        (
                            format!("{} IN ({})", column, items.join(", ")),
                            NullBehavior::Unknown,
                        )
                    }
                };
                Ok(negated(sql, column, nulls, *negate))
            }
            Self::Continuous {
                column,
                operator,
                reference,
                max,
                negate,
            } => {
                let (sql, nulls) =
                    render_continuous(column, *operator, reference.as_ref(), max.as_ref(), lit)?;
                Ok(negated(sql, column, nulls, *negate))
            }
            Self::String {
                column,
                operator,
                reference,
                max,
                case_sensitive,
                negate,
            } => {
                let (sql, nulls) = render_string(
                    column,
                    *operator,
                    reference.as_deref(),
                    max.as_deref(),
                    *case_sensitive,
                    lit,
                )?;
                Ok(negated(sql, column, nulls, *negate))
            }
            Self::StringList {
                column,
                values,
                case_sensitive,
                negate,
            } => {
                if values.is_empty() {
                    let sql = ALWAYS_FALSE.to_string();
                    return Ok(negated(sql, column, NullBehavior::Definite, *negate));
                }
                let field = fold_column(column, *case_sensitive);
                let items = values
                    .iter()
                    .map(|value| lit.emit_text(fold_value(value, *case_sensitive)))
                    .collect::<Result<Vec<_>>>()?;
                let sql = format!("{} in ({})", field, items.join(", "));
                Ok(negated(sql, column, NullBehavior::Unknown, *negate))
            }
            Self::Custom { sql, negate } => Ok(if *negate {
                format!("NOT ({})", sql)
            } else {
                format!("({})", sql)
            }),
        }
    }
}

/// Apply a node's negation flag to its positive fragment
fn negated(sql: String, column: &str, nulls: NullBehavior, negate: bool) -> String {
    match (negate, nulls) {
        (false, _) => sql,
        (true, NullBehavior::Definite) => format!("NOT ({})", sql),
        (true, NullBehavior::Unknown) => format!("(NOT ({}) OR {} IS NULL)", sql, column),
    }
}

fn render_group(
    conditions: &[Filter],
    conjunction: bool,
    negate: bool,
    lit: &mut Literals<'_>,
) -> Result<String> {
    if conditions.is_empty() {
        return Err(FilterError::EmptyGroup);
    }

    let join_op = if conjunction { " AND " } else { " OR " };
    let parts = conditions
        .iter()
        .map(|condition| condition.render(lit))
        .collect::<Result<Vec<_>>>()?;
    let sql = parts.join(join_op);

    Ok(if negate {
        format!("NOT ({})", sql)
    } else if conjunction {
        sql
    } else {
        format!("({})", sql)
    })
}

fn render_continuous(
    column: &str,
    operator: Operator,
    reference: Option<&SqlValue>,
    max: Option<&SqlValue>,
    lit: &mut Literals<'_>,
) -> Result<(String, NullBehavior)> {
    if operator.is_pattern() {
        return Err(FilterError::invalid_operator(operator, "continuous"));
    }
    if operator == Operator::IsDefined {
        return Ok((format!("{} IS NOT NULL", column), NullBehavior::Definite));
    }

    let reference =
        reference.ok_or_else(|| FilterError::missing_operand(operator, "reference"))?;
    let value = lit.emit(reference)?;
    let high = if operator.is_range() {
        let max = max.ok_or_else(|| FilterError::missing_operand(operator, "max"))?;
        lit.emit(max)?
    } else {
        String::new()
    };

    comparison(column, operator, &value, &high)
        .ok_or_else(|| FilterError::invalid_operator(operator, "continuous"))
}

fn render_string(
    column: &str,
    operator: Operator,
    reference: Option<&str>,
    max: Option<&str>,
    case_sensitive: bool,
    lit: &mut Literals<'_>,
) -> Result<(String, NullBehavior)> {
    if operator == Operator::IsDefined {
        return Ok((format!("{} IS NOT NULL", column), NullBehavior::Definite));
    }

    let field = fold_column(column, case_sensitive);
    let reference =
        reference.ok_or_else(|| FilterError::missing_operand(operator, "reference"))?;
    let value = fold_value(reference, case_sensitive);

    let sql = match operator {
        Operator::Contains => like(&field, "%", &value, "%", lit)?,
        Operator::StartsWith => like(&field, "", &value, "%", lit)?,
        Operator::EndsWith => like(&field, "%", &value, "", lit)?,
        _ => {
            let value = lit.emit_text(value)?;
            let high = if operator.is_range() {
                let max = max.ok_or_else(|| FilterError::missing_operand(operator, "max"))?;
                lit.emit_text(fold_value(max, case_sensitive))?
            } else {
                String::new()
            };
            return comparison(&field, operator, &value, &high)
                .ok_or_else(|| FilterError::invalid_operator(operator, "string"));
        }
    };

    Ok((sql, NullBehavior::Unknown))
}

/// Ordered comparison fragments shared by continuous and string filters
///
/// `value` and `high` are already rendered literals or placeholders.
/// Returns `None` for operators without an ordered form.
fn comparison(
    field: &str,
    operator: Operator,
    value: &str,
    high: &str,
) -> Option<(String, NullBehavior)> {
    let sql = match operator {
        Operator::Equal => format!("{} = {}", field, value),
        Operator::NotEqual => {
            let sql = format!("({} <> {} OR {} IS NULL)", field, value, field);
            return Some((sql, NullBehavior::Definite));
        }
        Operator::Less => format!("{} < {}", field, value),
        Operator::LessEqual => format!("{} <= {}", field, value),
        Operator::Greater => format!("{} > {}", field, value),
        Operator::GreaterEqual => format!("{} >= {}", field, value),
        Operator::Between => format!("{} >= {} AND {} <= {}", field, value, field, high),
        Operator::Outside => format!("({} < {} OR {} > {})", field, value, field, high),
        Operator::IsDefined => {
            return Some((format!("{} IS NOT NULL", field), NullBehavior::Definite));
        }
        Operator::Contains | Operator::StartsWith | Operator::EndsWith => return None,
    };
    Some((sql, NullBehavior::Unknown))
}

/// Build a LIKE test, escaping wildcards that occur in `value`
fn like(
    field: &str,
    prefix: &str,
    value: &str,
    suffix: &str,
    lit: &mut Literals<'_>,
) -> Result<String> {
    let escaped = escape_like_pattern(value);
    let needs_escape = escaped != value;
    let pattern = lit.emit_text(format!("{}{}{}", prefix, escaped, suffix))?;

    Ok(if needs_escape {
        format!("{} LIKE {} ESCAPE '\\'", field, pattern)
    } else {
        format!("{} LIKE {}", field, pattern)
    })
}

fn fold_column(column: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        column.to_string()
    } else {
        format!("LOWER({})", column)
    }
}

fn fold_value(value: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        value.to_string()
    } else {
        value.to_lowercase()
    }
}
