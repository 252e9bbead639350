//! Query filter system
//!
//! Provides filter types and SQL generation for WHERE clauses. Filters cover
//! existence, equality, discrete and continuous comparison, string matching,
//! AND/OR groups and verbatim SQL.
//!
//! ## Usage
//!
//! ```
//! use sqlpred::data::filters::{Filter, Operator, SqlParams, parse_filters, ParseLimits};
//!
//! let json_str = r#"[{"type": "continuous", "column": "x", "operator": "between", "reference": 2, "max": 8}]"#;
//! let filters = parse_filters(json_str, &ParseLimits::default()).unwrap();
//! assert_eq!(filters[0].to_sql().unwrap(), "x >= 2 AND x <= 8");
//!
//! let mut params = SqlParams::default();
//! let filter = Filter::string("name", Operator::Contains, "Foo").case_insensitive();
//! assert_eq!(filter.to_sql_with_params(&mut params).unwrap(), "LOWER(name) LIKE ?");
//! ```

mod builder;
mod parser;
mod render;
mod types;

pub use builder::{build_where, build_where_with_params};
pub use parser::{MAX_FILTER_DEPTH, MAX_FILTER_JSON_SIZE, MAX_FILTERS, ParseLimits, parse_filters};
pub use types::{Filter, Operator, SqlParams, SqlValue};
