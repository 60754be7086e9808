//! Error types.

/// Errors raised while building or solving a routing instance.
///
/// Infeasibility is normally reported as data through
/// [`SolveOutcome`](crate::models::SolveOutcome); the `Infeasible` and
/// `BudgetExceededWithoutSolution` variants exist for callers that prefer
/// `?` propagation via [`SolveOutcome::into_result`](crate::models::SolveOutcome::into_result).
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    /// Malformed or insufficient stop data.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No assignment respects capacity and single-visit constraints.
    #[error("infeasible: {unrouted} customer(s) could not be routed")]
    Infeasible {
        /// Customers left without a route when the fleet ran out.
        unrouted: usize,
    },

    /// The construction phase could not produce any solution.
    #[error("construction could not complete (no usable vehicles)")]
    BudgetExceededWithoutSolution,

    /// A solution failed the final consistency check.
    #[error("solution invariant violated: {0}")]
    InvariantViolated(String),

    #[error(transparent)]
    Config(#[from] serde_json::Error),
}

impl RoutingError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

pub type Result<T> = core::result::Result<T, RoutingError>;
