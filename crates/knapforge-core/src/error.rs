//! Error types for knapforge

use thiserror::Error;

use crate::domain::ProjectId;

/// Main error type for knapforge operations.
///
/// Every variant except [`KnapforgeError::InvalidSolution`] is an input
/// validation failure raised before any search starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KnapforgeError {
    /// A project declared a negative cost.
    #[error("project '{id}': cost must be non-negative, got {cost}")]
    NegativeCost { id: ProjectId, cost: f64 },

    /// A project declared a negative impact.
    #[error("project '{id}': impact must be non-negative, got {impact}")]
    NegativeImpact { id: ProjectId, impact: f64 },

    /// A project declared a NaN or infinite cost or impact.
    #[error("project '{id}': {field} must be finite, got {value}")]
    NonFiniteValue {
        id: ProjectId,
        field: &'static str,
        value: f64,
    },

    /// Two projects share an identifier.
    #[error("duplicate project identifier '{0}'")]
    DuplicateProjectId(ProjectId),

    /// A project has an empty identifier.
    #[error("project at position {0} has an empty identifier")]
    EmptyProjectId(usize),

    /// The budget is negative, NaN or infinite.
    #[error("budget must be a non-negative finite number, got {0}")]
    InvalidBudget(f64),

    /// A budget range cannot be expanded.
    #[error("invalid budget range: {0}")]
    InvalidRange(String),

    /// A solution does not agree with the catalog it claims to come from.
    #[error("invalid solution: {0}")]
    InvalidSolution(String),
}

impl KnapforgeError {
    /// Returns true for errors caused by caller-supplied input.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, KnapforgeError::InvalidSolution(_))
    }
}

/// Result type alias for knapforge operations
pub type Result<T> = std::result::Result<T, KnapforgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_project() {
        let err = KnapforgeError::NegativeCost {
            id: ProjectId::from("mentoring"),
            cost: -3.0,
        };
        assert_eq!(
            err.to_string(),
            "project 'mentoring': cost must be non-negative, got -3"
        );
    }

    #[test]
    fn test_invalid_input_classification() {
        assert!(KnapforgeError::InvalidBudget(-1.0).is_invalid_input());
        assert!(KnapforgeError::DuplicateProjectId(ProjectId::from("a")).is_invalid_input());
        assert!(!KnapforgeError::InvalidSolution("over budget".into()).is_invalid_input());
    }
}
