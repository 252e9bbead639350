//! Predicate-to-SQL compiler
//!
//! Filters describe tests over named columns (existence, equality, set
//! membership, ordered comparison, string matching) and AND/OR groups of
//! them. Each filter renders to a SQL boolean expression that can be placed
//! after `WHERE` or inside a larger expression. Literals are either inlined
//! with quoting, or emitted as `?` placeholders with the values collected in
//! order for the database driver to bind.
//!
//! ```
//! use sqlpred::{Filter, Operator};
//!
//! let filter = Filter::all(vec![
//!     Filter::between("x", 2, 8),
//!     Filter::string("name", Operator::Contains, "Foo").case_insensitive(),
//! ]);
//! assert_eq!(
//!     filter.to_sql().unwrap(),
//!     "x >= 2 AND x <= 8 AND LOWER(name) LIKE '%foo%'"
//! );
//! ```

pub mod app;
pub mod core;
pub mod data;
pub mod utils;

pub use data::error::{FilterError, Result};
pub use data::filters::{
    Filter, Operator, ParseLimits, SqlParams, SqlValue, build_where, build_where_with_params,
    parse_filters,
};
