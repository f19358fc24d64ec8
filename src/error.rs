use crate::search::SearchStats;

/// Every way constructing or running a solver can fail.
///
/// Search outcomes other than a solution carry the statistics gathered up to
/// the point the search stopped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolverError {
    #[error("invalid board: {reason}")]
    InvalidBoard { reason: String },

    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("the initial board cannot reach the goal (tile permutation parities differ)")]
    Unsolvable,

    #[error("node limit of {limit} reached after expanding {} nodes", .stats.nodes_expanded)]
    NodeLimitReached { limit: usize, stats: SearchStats },

    #[error("frontier exhausted after expanding {} nodes without reaching the goal", .stats.nodes_expanded)]
    Exhausted { stats: SearchStats },

    #[error("search cancelled after expanding {} nodes", .stats.nodes_expanded)]
    Cancelled { stats: SearchStats },
}

impl SolverError {
    pub(crate) fn invalid_board(reason: impl Into<String>) -> Self {
        SolverError::InvalidBoard {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_configuration(reason: impl Into<String>) -> Self {
        SolverError::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    /// Statistics of the search that produced this error, if one ran.
    pub fn stats(&self) -> Option<&SearchStats> {
        match self {
            SolverError::NodeLimitReached { stats, .. }
            | SolverError::Exhausted { stats }
            | SolverError::Cancelled { stats } => Some(stats),
            _ => None,
        }
    }
}

pub type Result<T, E = SolverError> = std::result::Result<T, E>;
