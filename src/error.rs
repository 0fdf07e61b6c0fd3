//! Error taxonomy
//!
//! Two families: rejected operations (recoverable, the caller drops the
//! action) and configuration defects (the round is unplayable until the
//! configuration is fixed).

use thiserror::Error;

/// Errors returned by the game core
#[derive(Debug, Error)]
pub enum GameError {
    /// Throw attempted while another is open, with no throws left, in the
    /// wrong phase, or resolved with a stale token
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// No wheel sector contains the angle
    #[error("no wheel sector contains angle {angle}")]
    UnmappedAngle { angle: f32 },

    /// Prize is not playable (unknown label or item outside the required set)
    #[error("unplayable prize: {0}")]
    UnknownPrize(String),

    /// Sector table has gaps, overlaps or empty sectors
    #[error("invalid wheel layout: {0}")]
    InvalidLayout(String),

    /// Configuration values out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration JSON could not be parsed
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl GameError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        GameError::InvalidOperation(reason.into())
    }

    /// True for rejected operations the caller can simply drop
    pub fn is_invalid_operation(&self) -> bool {
        matches!(self, GameError::InvalidOperation(_))
    }

    /// True for configuration defects that make the round unplayable
    pub fn is_configuration(&self) -> bool {
        !self.is_invalid_operation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_families() {
        let e = GameError::invalid("throw already in flight");
        assert!(e.is_invalid_operation());
        assert_eq!(e.to_string(), "invalid operation: throw already in flight");

        let e = GameError::UnmappedAngle { angle: 12.5 };
        assert!(e.is_configuration());
        assert_eq!(e.to_string(), "no wheel sector contains angle 12.5");
    }

    #[test]
    fn test_parse_error_converts() {
        let parse: Result<u32, _> = serde_json::from_str("not json");
        let e: GameError = parse.unwrap_err().into();
        assert!(matches!(e, GameError::ConfigParse(_)));
        assert!(e.is_configuration());
    }
}
