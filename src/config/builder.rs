//! SlotIDConfig builder for constructing configuration

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::SlotIDConfig;
use crate::error::SlotIDConfigError;
use crate::node::{NodeIdProvider, StaticNodeId};
use crate::sequence::{SequenceResolver, SequenceStrategy};

/// Default configuration values
pub(super) const DEFAULT_EPOCH_MS: i64 = 1577836800000; // January 1, 2020 UTC
pub(super) const DEFAULT_SPIN_ENABLED: bool = true;
pub(super) const DEFAULT_SPIN_LOOPS: u32 = 64;
pub(super) const DEFAULT_SPIN_YIELD_EVERY: u32 = 16;

/// Builder for SlotIDConfig
///
/// Epoch, sequence resolver and node ID provider are all required; `build`
/// refuses a partial configuration. Setting a value twice keeps the latest.
#[derive(Default)]
pub struct SlotIDConfigBuilder {
    epoch: Option<DateTime<Utc>>,
    sequence: Option<SequenceStrategy>,
    node_id_provider: Option<Arc<dyn NodeIdProvider>>,
    spin_enabled: Option<bool>,
    spin_loops: Option<u32>,
    spin_yield_every: Option<u32>,
}

impl SlotIDConfigBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the epoch slots are counted from
    ///
    /// Rejects the zero instant, epochs in the future, and epochs older than
    /// the ~174 years the slot field can span.
    pub fn epoch(mut self, epoch: DateTime<Utc>) -> Result<Self, SlotIDConfigError> {
        SlotIDConfig::validate_epoch(epoch, Utc::now())?;
        self.epoch = Some(epoch);
        Ok(self)
    }

    /// Use a built-in resolver; each generator gets its own counters
    pub fn sequence_strategy(mut self, strategy: SequenceStrategy) -> Self {
        self.sequence = Some(strategy);
        self
    }

    /// Use a custom resolver, shared by every generator built from this config
    pub fn sequence_resolver<R>(self, resolver: R) -> Self
    where
        R: SequenceResolver + 'static,
    {
        self.sequence_strategy(SequenceStrategy::Custom(Arc::new(resolver)))
    }

    pub fn node_id_provider<P>(mut self, provider: P) -> Self
    where
        P: NodeIdProvider + 'static,
    {
        self.node_id_provider = Some(Arc::new(provider));
        self
    }

    /// Shorthand for a fixed node ID
    pub fn node_id(self, node_id: u16) -> Self {
        self.node_id_provider(StaticNodeId(node_id))
    }

    /// Enable or disable the spin phase before sleeping on slot exhaustion
    pub fn enable_spin(mut self, enable: bool) -> Self {
        self.spin_enabled = Some(enable);
        self
    }

    /// Number of clock polls attempted before falling back to sleep
    pub fn spin_loops(mut self, loops: u32) -> Self {
        self.spin_loops = Some(loops);
        self
    }

    /// Yield every N spin iterations; 0 disables yielding
    pub fn spin_yield_every(mut self, n: u32) -> Self {
        self.spin_yield_every = Some(n);
        self
    }

    /// Build the final SlotIDConfig
    pub fn build(self) -> Result<SlotIDConfig, SlotIDConfigError> {
        let epoch = self.epoch.ok_or(SlotIDConfigError::MissingEpoch)?;
        let sequence = self
            .sequence
            .ok_or(SlotIDConfigError::MissingSequenceResolver)?;
        let node_id_provider = self
            .node_id_provider
            .ok_or(SlotIDConfigError::MissingNodeIdProvider)?;

        let mut cfg = SlotIDConfig::from_parts(epoch, sequence, node_id_provider);
        cfg.spin_enabled = self.spin_enabled.unwrap_or(DEFAULT_SPIN_ENABLED);
        cfg.spin_loops = self.spin_loops.unwrap_or(DEFAULT_SPIN_LOOPS);
        cfg.spin_yield_every = self.spin_yield_every.unwrap_or(DEFAULT_SPIN_YIELD_EVERY);
        Ok(cfg)
    }
}
