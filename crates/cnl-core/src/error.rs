//! Error types for the simulation core.

/// Convenience result type for simulation operations.
pub type CnlResult<T> = Result<T, CnlError>;

/// A reason a link table was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardIssue {
    /// A link endpoint lies outside the board.
    #[error("link {from} -> {to} leaves the board (0-{max})")]
    OutOfRange {
        /// The link source.
        from: u8,
        /// The link destination.
        to: u8,
        /// The final position of the board.
        max: u8,
    },

    /// A link starts on the start or the final square.
    #[error("link cannot start on square {0}")]
    ReservedSource(u8),

    /// A link leads back to its own source.
    #[error("link on square {0} points to itself")]
    SelfLink(u8),

    /// Two links share the same source.
    #[error("duplicate link source {0}")]
    DuplicateSource(u8),

    /// A link lands on the source of another link.
    #[error("link {from} -> {to} chains into link {to} -> {next}")]
    Chained {
        /// The first link source.
        from: u8,
        /// Shared square: destination of the first link and source of the second.
        to: u8,
        /// The second link destination.
        next: u8,
    },
}

/// Errors that can occur in the simulation core.
#[derive(Debug, thiserror::Error)]
pub enum CnlError {
    /// A batch was requested with a non-positive game count.
    #[error("game count must be positive, got {0}")]
    InvalidCount(usize),

    /// A board configuration is malformed.
    #[error("invalid board: {0}")]
    InvalidBoard(#[from] BoardIssue),

    /// A configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A batch was cancelled or ran past its deadline.
    #[error("batch cancelled after {completed} games")]
    Cancelled {
        /// Number of games finished before the batch stopped.
        completed: usize,
    },
}

impl CnlError {
    /// Whether this error rejects the caller's input rather than reporting
    /// an interrupted run.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidCount(_) | Self::InvalidBoard(_) | Self::InvalidConfig(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_invalid_arguments() {
        assert!(CnlError::InvalidCount(0).is_invalid_argument());
        assert!(CnlError::InvalidBoard(BoardIssue::SelfLink(5)).is_invalid_argument());
        assert!(CnlError::InvalidConfig("turn cap".into()).is_invalid_argument());
        assert!(!CnlError::Cancelled { completed: 3 }.is_invalid_argument());
    }

    #[test]
    fn messages() {
        assert_eq!(
            CnlError::InvalidCount(0).to_string(),
            "game count must be positive, got 0"
        );
        let chained = BoardIssue::Chained {
            from: 1,
            to: 38,
            next: 4,
        };
        assert_eq!(
            CnlError::from(chained).to_string(),
            "invalid board: link 1 -> 38 chains into link 38 -> 4"
        );
    }
}
