//! Process-wide default generator
//!
//! Built lazily on first use from [`SlotIDConfig::default`]. Nobody is
//! around to receive a construction error, so any failure here terminates
//! the process with exit status 1 after logging the cause. [`new_id`] does
//! the same for per-call errors. Use [`SlotID::new`] directly when failures
//! must be handled.

use once_cell::sync::Lazy;
use tracing::error;

use crate::config::{default_epoch, SlotIDConfig};
use crate::error::SlotIDError;
use crate::extractor::{DecomposedID, SlotIDExtractor};
use crate::SlotID;

static DEFAULT: Lazy<SlotID> = Lazy::new(|| match SlotID::new(SlotIDConfig::default()) {
    Ok(generator) => generator,
    Err(e) => terminate("failed to build the default slot id generator", &e),
});

static DEFAULT_EXTRACTOR: Lazy<SlotIDExtractor> = Lazy::new(|| SlotIDExtractor::new(default_epoch()));

pub(crate) fn terminate(context: &str, e: &SlotIDError) -> ! {
    error!(error = %e, "{context}");
    eprintln!("slotid: {context}: {e}");
    std::process::exit(1)
}

/// The lazily-built default generator
pub fn default_generator() -> &'static SlotID {
    &DEFAULT
}

/// Mint an identifier from the default generator, terminating the process on failure
pub fn new_id() -> u64 {
    match DEFAULT.next_id() {
        Ok(id) => id,
        Err(e) => terminate("failed to mint an identifier", &e),
    }
}

/// Mint an identifier from the default generator
pub fn next_id() -> Result<u64, SlotIDError> {
    DEFAULT.next_id()
}

/// Decompose an identifier minted by the default generator
///
/// Only needs the default epoch, so it never builds the generator.
pub fn decompose(id: u64) -> DecomposedID {
    DEFAULT_EXTRACTOR.decompose(id)
}
