//! SQL filter builder
//!
//! Convenience constructors for filters, and WHERE clause assembly from a
//! list of top-level filters.

use crate::data::error::Result;

use super::types::{Filter, Operator, SqlParams, SqlValue};

/// Join top-level filters with AND, inlining literals
///
/// Returns `None` when there is nothing to filter on.
pub fn build_where(filters: &[Filter]) -> Result<Option<String>> {
    if filters.is_empty() {
        return Ok(None);
    }
    let conditions = filters
        .iter()
        .map(Filter::to_sql)
        .collect::<Result<Vec<_>>>()?;
    Ok(Some(conditions.join(" AND ")))
}

/// Join top-level filters with AND, collecting bind values into `params`
pub fn build_where_with_params(
    filters: &[Filter],
    params: &mut SqlParams,
) -> Result<Option<String>> {
    if filters.is_empty() {
        return Ok(None);
    }
    let mut conditions = Vec::with_capacity(filters.len());
    for filter in filters {
        conditions.push(filter.to_sql_with_params(params)?);
    }
    Ok(Some(conditions.join(" AND ")))
}

impl Filter {
    pub fn defined<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Defined {
            columns: columns.into_iter().map(Into::into).collect(),
            negate: false,
        }
    }

    pub fn same_value(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::SameValue {
            column: column.into(),
            value: Some(value.into()),
            negate: false,
        }
    }

    pub fn is_null(column: impl Into<String>) -> Self {
        Self::SameValue {
            column: column.into(),
            value: None,
            negate: false,
        }
    }

    /// All conditions must hold
    pub fn all(conditions: Vec<Filter>) -> Self {
        Self::Group {
            conditions,
            conjunction: true,
            negate: false,
        }
    }

    /// At least one condition must hold
    pub fn any(conditions: Vec<Filter>) -> Self {
        Self::Group {
            conditions,
            conjunction: false,
            negate: false,
        }
    }

    pub fn discrete<I, V>(column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<SqlValue>,
    {
        Self::Discrete {
            column: column.into(),
            values: Some(values.into_iter().map(Into::into).collect()),
            negate: false,
        }
    }

    pub fn continuous(
        column: impl Into<String>,
        operator: Operator,
        reference: impl Into<SqlValue>,
    ) -> Self {
        Self::Continuous {
            column: column.into(),
            operator,
            reference: Some(reference.into()),
            max: None,
            negate: false,
        }
    }

    pub fn between(
        column: impl Into<String>,
        min: impl Into<SqlValue>,
        max: impl Into<SqlValue>,
    ) -> Self {
        Self::Continuous {
            column: column.into(),
            operator: Operator::Between,
            reference: Some(min.into()),
            max: Some(max.into()),
            negate: false,
        }
    }

    pub fn string(
        column: impl Into<String>,
        operator: Operator,
        reference: impl Into<String>,
    ) -> Self {
        Self::String {
            column: column.into(),
            operator,
            reference: Some(reference.into()),
            max: None,
            case_sensitive: true,
            negate: false,
        }
    }

    pub fn string_list<I, S>(column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::StringList {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
            case_sensitive: true,
            negate: false,
        }
    }

    pub fn custom(sql: impl Into<String>) -> Self {
        Self::Custom {
            sql: sql.into(),
            negate: false,
        }
    }

    /// Flip the negation flag
    pub fn negated(mut self) -> Self {
        match &mut self {
            Self::Defined { negate, .. }
            | Self::SameValue { negate, .. }
            | Self::Group { negate, .. }
            | Self::Discrete { negate, .. }
            | Self::Continuous { negate, .. }
            | Self::String { negate, .. }
            | Self::StringList { negate, .. }
            | Self::Custom { negate, .. } => *negate = !*negate,
        }
        self
    }

    /// Compare case-insensitively; no effect on non-string filters
    pub fn case_insensitive(mut self) -> Self {
        if let Self::String { case_sensitive, .. } | Self::StringList { case_sensitive, .. } =
            &mut self
        {
            *case_sensitive = false;
        }
        self
    }

    /// Set the upper bound used by `Between` and `Outside`
    ///
    /// String filters take the bound's text form.
    pub fn with_max(mut self, bound: impl Into<SqlValue>) -> Self {
        match &mut self {
            Self::Continuous { max, .. } => *max = Some(bound.into()),
            Self::String { max, .. } => *max = Some(text_form(bound.into())),
            _ => {}
        }
        self
    }
}

fn text_form(value: SqlValue) -> String {
    match value {
        SqlValue::Bool(b) => b.to_string(),
        SqlValue::Int(n) => n.to_string(),
        SqlValue::Float(x) => x.to_string(),
        SqlValue::Text(s) => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_where_empty() {
        assert_eq!(build_where(&[]).unwrap(), None);

        let mut params = SqlParams::default();
        assert_eq!(build_where_with_params(&[], &mut params).unwrap(), None);
        assert!(params.is_empty());
    }

    #[test]
    fn build_where_joins_with_and() {
        let filters = vec![
            Filter::defined(["a"]),
            Filter::any(vec![
                Filter::same_value("b", 1),
                Filter::same_value("b", 2),
            ]),
        ];
        assert_eq!(
            build_where(&filters).unwrap().as_deref(),
            Some("a IS NOT NULL AND (b = 1 OR b = 2)")
        );
    }

    #[test]
    fn build_where_with_params_shares_params() {
        let filters = vec![
            Filter::same_value("a", "x"),
            Filter::between("n", 1, 5),
        ];
        let mut params = SqlParams::default();
        let sql = build_where_with_params(&filters, &mut params).unwrap();

        assert_eq!(sql.as_deref(), Some("a = ? AND n >= ? AND n <= ?"));
        assert_eq!(
            params.values,
            vec![SqlValue::from("x"), SqlValue::Int(1), SqlValue::Int(5)]
        );
    }

    #[test]
    fn build_where_stops_at_first_error() {
        let filters = vec![Filter::defined(["a"]), Filter::all(vec![])];
        assert!(build_where(&filters).is_err());
    }

    #[test]
    fn constructors_match_struct_literals() {
        assert_eq!(
            Filter::string("name", Operator::Contains, "Foo").case_insensitive(),
            Filter::String {
                column: "name".to_string(),
                operator: Operator::Contains,
                reference: Some("Foo".to_string()),
                max: None,
                case_sensitive: false,
                negate: false,
            }
        );
        assert_eq!(
            Filter::is_null("c").negated(),
            Filter::SameValue {
                column: "c".to_string(),
                value: None,
                negate: true,
            }
        );
    }

    #[test]
    fn negated_twice_is_identity() {
        let filter = Filter::custom("a = 1");
        assert_eq!(filter.clone().negated().negated(), filter);
    }

    #[test]
    fn with_max_sets_bounds() {
        let filter = Filter::continuous("x", Operator::Outside, 1).with_max(9);
        assert_eq!(filter.to_sql().unwrap(), "(x < 1 OR x > 9)");

        let filter = Filter::string("s", Operator::Between, "a").with_max("f");
        assert_eq!(filter.to_sql().unwrap(), "s >= 'a' AND s <= 'f'");

        let filter = Filter::string("s", Operator::Between, "1").with_max(7);
        assert_eq!(filter.to_sql().unwrap(), "s >= '1' AND s <= '7'");
    }

    #[test]
    fn case_insensitive_ignores_other_filters() {
        let filter = Filter::same_value("a", 1);
        assert_eq!(filter.clone().case_insensitive(), filter);
    }
}
