use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors raised while assembling a `SlotIDConfig`
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SlotIDConfigError {
    /// The epoch was left at the zero instant (1970-01-01T00:00:00Z)
    #[error("Epoch must not be the zero instant")]
    ZeroEpoch,
    /// The epoch lies after the current wall-clock time
    #[error("Epoch {epoch} is in the future (now is {now})")]
    EpochInFuture {
        epoch: DateTime<Utc>,
        now: DateTime<Utc>,
    },
    /// The epoch is further in the past than the slot field can represent
    #[error("Epoch {epoch} is too old. Oldest representable epoch is {oldest}")]
    EpochTooOld {
        epoch: DateTime<Utc>,
        oldest: DateTime<Utc>,
    },
    #[error("No epoch was configured")]
    MissingEpoch,
    #[error("No sequence resolver was configured")]
    MissingSequenceResolver,
    #[error("No node ID provider was configured")]
    MissingNodeIdProvider,
}

/// Broad classes of `SlotIDError`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid or incomplete settings, raised once at setup
    Configuration,
    /// The node-identity provider failed, raised once at setup
    Provider,
    /// The current slot cannot be represented, raised per call
    Range,
    /// A custom sequence resolver failed, raised per call
    Sequence,
    /// The caller's deadline passed while waiting for a fresh slot
    Deadline,
}

/// Represents errors that can occur during SlotID operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SlotIDError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] SlotIDConfigError),
    /// The node ID provider could not produce an identity for this process
    #[error("Node ID provider failed: {reason}")]
    NodeId { reason: String },
    /// The clock reads earlier than the epoch
    #[error("Current time is {millis} milliseconds before the epoch")]
    SlotBeforeEpoch { millis: i64 },
    /// The slot count since the epoch no longer fits in 39 bits
    #[error("Slot {slot} exceeds the maximum representable slot {max}")]
    SlotOverflow { slot: u64, max: u64 },
    /// A custom sequence resolver reported a failure
    #[error("Sequence resolver failed: {reason}")]
    Sequence { reason: String },
    #[error("Deadline exceeded while waiting for a slot after {slot}")]
    DeadlineExceeded { slot: u64 },
}

impl SlotIDError {
    /// Classify this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            SlotIDError::Config(_) => ErrorKind::Configuration,
            SlotIDError::NodeId { .. } => ErrorKind::Provider,
            SlotIDError::SlotBeforeEpoch { .. } | SlotIDError::SlotOverflow { .. } => {
                ErrorKind::Range
            }
            SlotIDError::Sequence { .. } => ErrorKind::Sequence,
            SlotIDError::DeadlineExceeded { .. } => ErrorKind::Deadline,
        }
    }

    /// Build a provider error from anything displayable
    pub fn node_id(reason: impl ToString) -> Self {
        SlotIDError::NodeId {
            reason: reason.to_string(),
        }
    }

    /// Build a sequence resolver error from anything displayable
    pub fn sequence(reason: impl ToString) -> Self {
        SlotIDError::Sequence {
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let overflow = SlotIDError::SlotOverflow {
            slot: 1 << 39,
            max: (1 << 39) - 1,
        };
        assert_eq!(
            overflow.to_string(),
            "Slot 549755813888 exceeds the maximum representable slot 549755813887"
        );

        let before = SlotIDError::SlotBeforeEpoch { millis: 120 };
        assert_eq!(
            before.to_string(),
            "Current time is 120 milliseconds before the epoch"
        );

        let config: SlotIDError = SlotIDConfigError::MissingNodeIdProvider.into();
        assert_eq!(
            config.to_string(),
            "Invalid configuration: No node ID provider was configured"
        );
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(
            SlotIDError::from(SlotIDConfigError::ZeroEpoch).kind(),
            ErrorKind::Configuration
        );
        assert_eq!(SlotIDError::node_id("no iface").kind(), ErrorKind::Provider);
        assert_eq!(
            SlotIDError::SlotBeforeEpoch { millis: 1 }.kind(),
            ErrorKind::Range
        );
        assert_eq!(
            SlotIDError::SlotOverflow { slot: 0, max: 0 }.kind(),
            ErrorKind::Range
        );
        assert_eq!(SlotIDError::sequence("boom").kind(), ErrorKind::Sequence);
        assert_eq!(
            SlotIDError::DeadlineExceeded { slot: 3 }.kind(),
            ErrorKind::Deadline
        );
    }

    #[test]
    fn test_error_clone() {
        let original = SlotIDError::node_id("no private IPv4 address");
        let cloned = original.clone();
        assert_eq!(original, cloned);
        assert!(format!("{:?}", cloned).contains("NodeId"));
    }
}
