//! Filter type definitions
//!
//! Defines the predicate nodes, operators and literal values that render
//! into SQL `WHERE` fragments.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::error::{FilterError, Result};
use crate::utils::sql::quote_literal;

/// Predicate nodes
///
/// Every node carries a `negate` flag and renders to one self-contained SQL
/// boolean expression.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum Filter {
    /// All listed columns are non-null
    Defined {
        columns: Vec<String>,
        #[serde(default)]
        negate: bool,
    },
    /// Column equals a value, or is null when `value` is absent
    SameValue {
        column: String,
        #[serde(default)]
        value: Option<SqlValue>,
        #[serde(default)]
        negate: bool,
    },
    /// AND/OR combination of child filters
    Group {
        conditions: Vec<Filter>,
        #[serde(default = "default_true")]
        conjunction: bool,
        #[serde(default)]
        negate: bool,
    },
    /// Column is one of a set of values; no set means "is defined"
    Discrete {
        column: String,
        #[serde(default)]
        values: Option<Vec<SqlValue>>,
        #[serde(default)]
        negate: bool,
    },
    /// Ordered comparison against a numeric or ordinal reference
    Continuous {
        column: String,
        operator: Operator,
        #[serde(default)]
        reference: Option<SqlValue>,
        #[serde(default)]
        max: Option<SqlValue>,
        #[serde(default)]
        negate: bool,
    },
    /// Comparison or pattern match against a string reference
    String {
        column: String,
        operator: Operator,
        #[serde(default)]
        reference: Option<String>,
        #[serde(default)]
        max: Option<String>,
        #[serde(default = "default_true")]
        case_sensitive: bool,
        #[serde(default)]
        negate: bool,
    },
    /// Column is one of a list of strings
    StringList {
        column: String,
        values: Vec<String>,
        #[serde(default = "default_true")]
        case_sensitive: bool,
        #[serde(default)]
        negate: bool,
    },
    /// Caller-supplied SQL boolean expression, used verbatim
    Custom {
        sql: String,
        #[serde(default)]
        negate: bool,
    },
}

fn default_true() -> bool {
    true
}

impl Filter {
    /// Short name of the filter kind, as used in the JSON `type` tag
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Defined { .. } => "defined",
            Self::SameValue { .. } => "same_value",
            Self::Group { .. } => "group",
            Self::Discrete { .. } => "discrete",
            Self::Continuous { .. } => "continuous",
            Self::String { .. } => "string",
            Self::StringList { .. } => "string_list",
            Self::Custom { .. } => "custom",
        }
    }

    pub fn is_negated(&self) -> bool {
        match self {
            Self::Defined { negate, .. }
            | Self::SameValue { negate, .. }
            | Self::Group { negate, .. }
            | Self::Discrete { negate, .. }
            | Self::Continuous { negate, .. }
            | Self::String { negate, .. }
            | Self::StringList { negate, .. }
            | Self::Custom { negate, .. } => *negate,
        }
    }

    /// Nesting depth; atomic filters are depth 1
    pub fn depth(&self) -> usize {
        match self {
            Self::Group { conditions, .. } => {
                1 + conditions.iter().map(Filter::depth).max().unwrap_or(0)
            }
            _ => 1,
        }
    }
}

/// Comparison operators
///
/// One operator space is shared by all filters. Continuous filters accept
/// the ordered operators and `IsDefined`; string filters additionally accept
/// the pattern operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Between,
    Outside,
    IsDefined,
    Contains,
    StartsWith,
    EndsWith,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Equal => "equal",
            Operator::NotEqual => "not_equal",
            Operator::Less => "less",
            Operator::LessEqual => "less_equal",
            Operator::Greater => "greater",
            Operator::GreaterEqual => "greater_equal",
            Operator::Between => "between",
            Operator::Outside => "outside",
            Operator::IsDefined => "is_defined",
            Operator::Contains => "contains",
            Operator::StartsWith => "starts_with",
            Operator::EndsWith => "ends_with",
        }
    }

    /// Returns `true` for the LIKE-based operators
    pub fn is_pattern(self) -> bool {
        matches!(
            self,
            Operator::Contains | Operator::StartsWith | Operator::EndsWith
        )
    }

    /// Returns `true` if the operator compares against a `max` bound too
    pub fn is_range(self) -> bool {
        matches!(self, Operator::Between | Operator::Outside)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Scalar value compared against a column
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SqlValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl SqlValue {
    /// Format as an inline SQL literal
    ///
    /// Text is single-quoted with embedded quotes doubled; numbers and
    /// booleans are written bare.
    pub fn to_sql_literal(&self) -> Result<String> {
        match self {
            SqlValue::Bool(true) => Ok("TRUE".to_string()),
            SqlValue::Bool(false) => Ok("FALSE".to_string()),
            SqlValue::Int(n) => Ok(n.to_string()),
            SqlValue::Float(x) if x.is_finite() => Ok(x.to_string()),
            SqlValue::Float(x) => Err(FilterError::NonFiniteNumber(*x)),
            SqlValue::Text(s) => Ok(quote_literal(s)),
        }
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Bool(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Int(value.into())
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Float(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

/// Collects SQL parameters during rendering (maintains insertion order)
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SqlParams {
    pub values: Vec<SqlValue>,
}

impl SqlParams {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_formatting() {
        assert_eq!(SqlValue::from("abc").to_sql_literal().unwrap(), "'abc'");
        assert_eq!(SqlValue::from("it's").to_sql_literal().unwrap(), "'it''s'");
        assert_eq!(SqlValue::from(42).to_sql_literal().unwrap(), "42");
        assert_eq!(SqlValue::from(-7i64).to_sql_literal().unwrap(), "-7");
        assert_eq!(SqlValue::from(2.5).to_sql_literal().unwrap(), "2.5");
        assert_eq!(SqlValue::from(true).to_sql_literal().unwrap(), "TRUE");
        assert_eq!(SqlValue::from(false).to_sql_literal().unwrap(), "FALSE");
    }

    #[test]
    fn literal_rejects_non_finite() {
        let result = SqlValue::from(f64::INFINITY).to_sql_literal();
        assert!(matches!(result, Err(FilterError::NonFiniteNumber(_))));
        let result = SqlValue::from(f64::NAN).to_sql_literal();
        assert!(matches!(result, Err(FilterError::NonFiniteNumber(_))));
    }

    #[test]
    fn sql_value_untagged_json() {
        let values: Vec<SqlValue> = serde_json::from_str(r#"[true, 3, 2.5, "x"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                SqlValue::Bool(true),
                SqlValue::Int(3),
                SqlValue::Float(2.5),
                SqlValue::Text("x".to_string()),
            ]
        );
    }

    #[test]
    fn operator_names_round_trip_through_display() {
        let op: Operator = serde_json::from_str(r#""greater_equal""#).unwrap();
        assert_eq!(op, Operator::GreaterEqual);
        assert_eq!(op.to_string(), "greater_equal");
        assert_eq!(Operator::StartsWith.to_string(), "starts_with");
    }

    #[test]
    fn operator_classes() {
        assert!(Operator::Contains.is_pattern());
        assert!(!Operator::Equal.is_pattern());
        assert!(Operator::Outside.is_range());
        assert!(!Operator::Less.is_range());
    }

    #[test]
    fn filter_defaults_from_json() {
        let filter: Filter = serde_json::from_str(
            r#"{"type": "string", "column": "name", "operator": "contains", "reference": "a"}"#,
        )
        .unwrap();
        match filter {
            Filter::String {
                case_sensitive,
                negate,
                max,
                ..
            } => {
                assert!(case_sensitive);
                assert!(!negate);
                assert!(max.is_none());
            }
            other => panic!("unexpected filter: {:?}", other),
        }

        let group: Filter =
            serde_json::from_str(r#"{"type": "group", "conditions": []}"#).unwrap();
        assert!(matches!(
            group,
            Filter::Group {
                conjunction: true,
                ..
            }
        ));
    }

    #[test]
    fn same_value_null_marker_from_json() {
        let filter: Filter =
            serde_json::from_str(r#"{"type": "same_value", "column": "c", "value": null}"#)
                .unwrap();
        assert_eq!(
            filter,
            Filter::SameValue {
                column: "c".to_string(),
                value: None,
                negate: false,
            }
        );
    }

    #[test]
    fn unknown_fields_rejected() {
        let result: std::result::Result<Filter, _> = serde_json::from_str(
            r#"{"type": "custom", "sql": "a = 1", "negated": true}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn unknown_operator_rejected() {
        let result: std::result::Result<Filter, _> = serde_json::from_str(
            r#"{"type": "continuous", "column": "x", "operator": "regex", "reference": 1}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn depth_and_kind() {
        let leaf = Filter::Custom {
            sql: "a".to_string(),
            negate: true,
        };
        assert_eq!(leaf.depth(), 1);
        assert_eq!(leaf.kind(), "custom");
        assert!(leaf.is_negated());

        let nested = Filter::Group {
            conditions: vec![Filter::Group {
                conditions: vec![leaf.clone()],
                conjunction: false,
                negate: false,
            }],
            conjunction: true,
            negate: false,
        };
        assert_eq!(nested.depth(), 3);
        assert_eq!(nested.kind(), "group");
        assert!(!nested.is_negated());
    }
}
