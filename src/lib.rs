//! # SlotID
//!
//! A Rust implementation of a Snowflake-like ID generator with 10ms slots.
//!
//! Generate 64-bit unique identifiers that are:
//! - ⏱️ Time-bucketed (39-bit slot count since a custom epoch)
//! - 🌐 Coordination-free (16-bit node ID per process)
//! - 🔒 Lock-free under contention (slot and sequence swap as one word)
//! - 📈 Strictly increasing per calling thread
//!
//! ```no_run
//! use slotid::{SequenceStrategy, SlotID, SlotIDConfig};
//!
//! let epoch = chrono::DateTime::from_timestamp_millis(1577836800000).unwrap();
//! let config = SlotIDConfig::builder()
//!     .epoch(epoch)?
//!     .sequence_strategy(SequenceStrategy::Atomic)
//!     .node_id(5)
//!     .build()?;
//!
//! let generator = SlotID::new(config)?;
//! let id = generator.next_id()?;
//! assert_eq!(generator.decompose(id).node_id, 5);
//! # Ok::<(), slotid::SlotIDError>(())
//! ```

#![forbid(unsafe_code)]

mod clock;
mod config;
mod default;
mod error;
mod extractor;
mod generator;
mod node;
mod sequence;

#[cfg(test)]
pub mod tests;

// Re-export main types
pub use clock::{Clock, SystemClock};
pub use config::{SlotIDConfig, SlotIDConfigBuilder};
pub use error::{ErrorKind, SlotIDConfigError, SlotIDError};
pub use extractor::{DecomposedID, SlotIDExtractor};
pub use generator::SlotID;
pub use node::{NodeIdProvider, PrivateIpv4, StaticNodeId};
pub use sequence::{
    AtomicSequenceResolver, LockSequenceResolver, SequenceResolver, SequenceStrategy,
};

// Default generator entry points
pub use default::{decompose, default_generator, new_id, next_id};
