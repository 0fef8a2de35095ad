//! Core SlotID generator implementation
//!
//! Split into modules for testability:
//! - `time` - Clock to slot conversion
//! - `wait` - Spin and backoff strategies
//! - `generate` - ID minting and the slot exhaustion protocol

mod generate;
mod time;
mod wait;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::config::SlotIDConfig;
use crate::error::SlotIDError;
use crate::extractor::{DecomposedID, SlotIDExtractor};
use crate::sequence::SequenceResolver;

pub(crate) use time::max_span_millis;

/// Main ID generator
///
/// Identifiers are laid out most-significant-first as
/// `[39 bits slot][16 bits node][9 bits sequence]`, where a slot is 10ms
/// since the configured epoch.
pub struct SlotID<C: Clock = SystemClock> {
    // === Hot path fields ===
    resolver: Arc<dyn SequenceResolver>,
    node_prefix: u64,
    epoch_ms: i64,
    clock: C,

    // === Cold path fields ===
    node_id: u16,
    pub config: SlotIDConfig,
    pub extract: SlotIDExtractor,
}

impl SlotID {
    pub const SLOT_BITS: u32 = 39;
    pub const NODE_BITS: u32 = 16;
    pub const SEQUENCE_BITS: u32 = 9;
    /// Width of one slot
    pub const SLOT_MILLIS: i64 = 10;
    pub const MAX_SLOT: u64 = (1 << Self::SLOT_BITS) - 1;
    pub const MAX_NODE_ID: u16 = u16::MAX;
    /// Highest sequence that can appear in an issued identifier
    pub const MAX_SEQUENCE: u16 = (1 << Self::SEQUENCE_BITS) - 2;
    /// Returned by a resolver when the requested slot has no sequences left
    pub const SEQUENCE_EXHAUSTED: u16 = (1 << Self::SEQUENCE_BITS) - 1;

    pub(crate) const NODE_SHIFT: u32 = Self::SEQUENCE_BITS;
    pub(crate) const SLOT_SHIFT: u32 = Self::NODE_BITS + Self::SEQUENCE_BITS;
    pub(crate) const SEQUENCE_MASK: u64 = (1 << Self::SEQUENCE_BITS) - 1;

    /// Create a generator reading the system clock
    pub fn new(config: SlotIDConfig) -> Result<Self, SlotIDError> {
        Self::with_clock(config, SystemClock)
    }

    /// Pack a (slot, node, sequence) triple into an identifier
    #[inline(always)]
    pub const fn compose(slot: u64, node_id: u16, sequence: u16) -> u64 {
        ((slot & Self::MAX_SLOT) << Self::SLOT_SHIFT)
            | ((node_id as u64) << Self::NODE_SHIFT)
            | (sequence as u64 & Self::SEQUENCE_MASK)
    }
}

impl<C: Clock> SlotID<C> {
    /// Create a generator reading time from `clock`
    ///
    /// The node ID provider is consulted here, once; its failure is returned
    /// as [`SlotIDError::NodeId`].
    pub fn with_clock(config: SlotIDConfig, clock: C) -> Result<Self, SlotIDError> {
        let node_id = config
            .node_id_provider()
            .node_id()
            .map_err(|e| match e {
                SlotIDError::NodeId { .. } => e,
                other => SlotIDError::node_id(other),
            })?;
        let resolver = config.sequence_strategy().instantiate();

        debug!(
            node_id,
            epoch = %config.epoch(),
            sequence = ?config.sequence_strategy(),
            "slot id generator ready"
        );

        Ok(Self {
            resolver,
            node_prefix: (node_id as u64) << SlotID::NODE_SHIFT,
            epoch_ms: config.epoch().timestamp_millis(),
            clock,
            node_id,
            extract: SlotIDExtractor::new(config.epoch()),
            config,
        })
    }

    #[inline(always)]
    pub const fn node_id(&self) -> u16 {
        self.node_id
    }

    #[inline(always)]
    pub fn epoch(&self) -> DateTime<Utc> {
        self.config.epoch()
    }

    /// Slot index of the clock's current time
    #[inline(always)]
    pub fn current_slot(&self) -> Result<u64, SlotIDError> {
        time::slot_at(self.epoch_ms, self.clock.now())
    }

    /// Split an identifier into its components
    #[inline]
    pub fn decompose(&self, id: u64) -> DecomposedID {
        self.extract.decompose(id)
    }

    #[inline(always)]
    pub(crate) fn assemble_id(&self, slot: u64, sequence: u16) -> u64 {
        (slot << SlotID::SLOT_SHIFT) | self.node_prefix | (sequence as u64)
    }
}

impl<C: Clock> std::fmt::Debug for SlotID<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotID")
            .field("node_id", &self.node_id)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
