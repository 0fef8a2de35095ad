//! Configuration for SlotID generator

mod builder;

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};

pub use builder::SlotIDConfigBuilder;
use builder::{DEFAULT_EPOCH_MS, DEFAULT_SPIN_ENABLED, DEFAULT_SPIN_LOOPS, DEFAULT_SPIN_YIELD_EVERY};

use crate::error::SlotIDConfigError;
use crate::generator::max_span_millis;
use crate::node::{NodeIdProvider, PrivateIpv4};
use crate::sequence::SequenceStrategy;

/// Immutable configuration for a SlotID generator
///
/// Assembled and validated by [`SlotIDConfigBuilder`]; a generator built from
/// it can never be reconfigured.
#[derive(Clone)]
pub struct SlotIDConfig {
    epoch: DateTime<Utc>,
    sequence: SequenceStrategy,
    node_id_provider: Arc<dyn NodeIdProvider>,
    spin_enabled: bool,
    spin_loops: u32,
    spin_yield_every: u32,
}

impl SlotIDConfig {
    /// Create a new configuration builder
    pub fn builder() -> SlotIDConfigBuilder {
        SlotIDConfigBuilder::new()
    }

    pub(crate) fn from_parts(
        epoch: DateTime<Utc>,
        sequence: SequenceStrategy,
        node_id_provider: Arc<dyn NodeIdProvider>,
    ) -> Self {
        Self {
            epoch,
            sequence,
            node_id_provider,
            spin_enabled: DEFAULT_SPIN_ENABLED,
            spin_loops: DEFAULT_SPIN_LOOPS,
            spin_yield_every: DEFAULT_SPIN_YIELD_EVERY,
        }
    }

    /// Check an epoch against the wall-clock time `now`
    pub(crate) fn validate_epoch(
        epoch: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<(), SlotIDConfigError> {
        if epoch.timestamp() == 0 && epoch.timestamp_subsec_nanos() == 0 {
            return Err(SlotIDConfigError::ZeroEpoch);
        }
        if epoch > now {
            return Err(SlotIDConfigError::EpochInFuture { epoch, now });
        }
        let oldest = now - TimeDelta::milliseconds(max_span_millis());
        if epoch <= oldest {
            return Err(SlotIDConfigError::EpochTooOld { epoch, oldest });
        }
        Ok(())
    }

    #[inline(always)]
    pub const fn epoch(&self) -> DateTime<Utc> {
        self.epoch
    }

    #[inline(always)]
    pub fn sequence_strategy(&self) -> &SequenceStrategy {
        &self.sequence
    }

    #[inline(always)]
    pub fn node_id_provider(&self) -> &Arc<dyn NodeIdProvider> {
        &self.node_id_provider
    }

    #[inline(always)]
    pub const fn spin_enabled(&self) -> bool {
        self.spin_enabled
    }

    #[inline(always)]
    pub const fn spin_loops(&self) -> u32 {
        self.spin_loops
    }

    #[inline(always)]
    pub const fn spin_yield_every(&self) -> u32 {
        self.spin_yield_every
    }
}

/// Epoch used by [`SlotIDConfig::default`], 2020-01-01T00:00:00Z
pub(crate) fn default_epoch() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(DEFAULT_EPOCH_MS).unwrap_or_default()
}

impl Default for SlotIDConfig {
    /// 2020-01-01T00:00:00Z epoch, lock-free sequences, node ID from the private IPv4 address
    fn default() -> Self {
        Self::from_parts(
            default_epoch(),
            SequenceStrategy::Atomic,
            Arc::new(PrivateIpv4),
        )
    }
}

impl fmt::Debug for SlotIDConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotIDConfig")
            .field("epoch", &self.epoch)
            .field("sequence", &self.sequence)
            .field("spin_enabled", &self.spin_enabled)
            .field("spin_loops", &self.spin_loops)
            .field("spin_yield_every", &self.spin_yield_every)
            .finish_non_exhaustive()
    }
}
