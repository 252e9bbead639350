//! Error type for filter parsing and SQL rendering

use thiserror::Error;

use super::filters::Operator;

/// Errors raised while parsing or rendering filters
///
/// Rendering errors indicate a malformed filter tree built upstream; they are
/// never recovered locally and abort the render of the enclosing tree.
#[derive(Error, Debug)]
pub enum FilterError {
    /// Operator has no SQL form for this kind of filter
    #[error("Invalid operator '{operator}' for {filter} filter")]
    InvalidOperator {
        operator: Operator,
        filter: &'static str,
    },

    /// Operator needs an operand the filter does not carry
    #[error("Operator '{operator}' requires a {operand} value")]
    MissingOperand {
        operator: Operator,
        operand: &'static str,
    },

    /// AND/OR group without any conditions
    #[error("Filter group has no conditions")]
    EmptyGroup,

    /// NaN or infinite number cannot be written as a SQL literal
    #[error("Number {0} has no SQL literal form")]
    NonFiniteNumber(f64),

    /// Filter JSON failed to parse
    #[error("Invalid filter JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Filter JSON exceeds the configured size
    #[error("Filter JSON is {size} bytes, maximum is {max}")]
    JsonTooLarge { size: usize, max: usize },

    /// More top-level filters than allowed
    #[error("Got {count} filters, maximum is {max}")]
    TooManyFilters { count: usize, max: usize },

    /// Groups nested deeper than allowed
    #[error("Filter nesting depth {depth} exceeds maximum of {max}")]
    TooDeep { depth: usize, max: usize },
}

impl FilterError {
    pub fn invalid_operator(operator: Operator, filter: &'static str) -> Self {
        Self::InvalidOperator { operator, filter }
    }

    pub fn missing_operand(operator: Operator, operand: &'static str) -> Self {
        Self::MissingOperand { operator, operand }
    }

    /// Check if the error comes from the input document rather than the tree
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidJson(_)
                | Self::JsonTooLarge { .. }
                | Self::TooManyFilters { .. }
                | Self::TooDeep { .. }
        )
    }
}

/// Result type for filter operations
pub type Result<T> = std::result::Result<T, FilterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_operator_display() {
        let err = FilterError::invalid_operator(Operator::Contains, "continuous");
        assert_eq!(
            err.to_string(),
            "Invalid operator 'contains' for continuous filter"
        );
    }

    #[test]
    fn test_missing_operand_display() {
        let err = FilterError::missing_operand(Operator::Between, "max");
        assert_eq!(err.to_string(), "Operator 'between' requires a max value");
    }

    #[test]
    fn test_limit_errors_display() {
        assert_eq!(
            FilterError::JsonTooLarge { size: 10, max: 5 }.to_string(),
            "Filter JSON is 10 bytes, maximum is 5"
        );
        assert_eq!(
            FilterError::TooDeep { depth: 40, max: 32 }.to_string(),
            "Filter nesting depth 40 exceeds maximum of 32"
        );
    }

    #[test]
    fn test_is_input_error() {
        assert!(FilterError::TooManyFilters { count: 51, max: 50 }.is_input_error());
        assert!(!FilterError::EmptyGroup.is_input_error());
        assert!(!FilterError::NonFiniteNumber(f64::NAN).is_input_error());
    }
}
