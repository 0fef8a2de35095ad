//! Sequence resolvers
//!
//! A resolver hands out a sequence number unique within one slot, or
//! [`SlotID::SEQUENCE_EXHAUSTED`] when the slot has nothing left to give.
//!
//! - `state` - Packed (slot, sequence) word
//! - `atomic` - Lock-free resolver over a single `AtomicU64`
//! - `lock` - Mutex-guarded resolver with the same decision table

mod atomic;
mod lock;
mod state;

use std::fmt;
use std::sync::Arc;

use crate::error::SlotIDError;
use crate::SlotID;

pub use atomic::AtomicSequenceResolver;
pub use lock::LockSequenceResolver;
pub(crate) use state::State;

/// Produces a sequence number for a slot
///
/// Implementations must never hand out the same value twice for one slot and
/// must return [`SlotID::SEQUENCE_EXHAUSTED`] instead of a value above
/// [`SlotID::MAX_SEQUENCE`].
pub trait SequenceResolver: Send + Sync {
    fn resolve(&self, slot: u64) -> Result<u16, SlotIDError>;
}

impl<F> SequenceResolver for F
where
    F: Fn(u64) -> Result<u16, SlotIDError> + Send + Sync,
{
    #[inline]
    fn resolve(&self, slot: u64) -> Result<u16, SlotIDError> {
        self(slot)
    }
}

/// How a generator obtains its sequence resolver
///
/// `Atomic` and `Locked` allocate fresh counters for every generator built
/// from the config, so clones of one config never share state. `Custom`
/// uses the given resolver as-is.
#[derive(Clone, Default)]
pub enum SequenceStrategy {
    #[default]
    Atomic,
    Locked,
    Custom(Arc<dyn SequenceResolver>),
}

impl SequenceStrategy {
    /// Instantiate the resolver a new generator will own
    pub(crate) fn instantiate(&self) -> Arc<dyn SequenceResolver> {
        match self {
            SequenceStrategy::Atomic => Arc::new(AtomicSequenceResolver::new()),
            SequenceStrategy::Locked => Arc::new(LockSequenceResolver::new()),
            SequenceStrategy::Custom(resolver) => Arc::clone(resolver),
        }
    }

    pub(crate) const fn name(&self) -> &'static str {
        match self {
            SequenceStrategy::Atomic => "atomic",
            SequenceStrategy::Locked => "locked",
            SequenceStrategy::Custom(_) => "custom",
        }
    }
}

impl fmt::Debug for SequenceStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decide the sequence following `last` for a request in `slot`
///
/// `None` means the slot is exhausted or already superseded.
#[inline(always)]
pub(crate) const fn next_sequence(last: State, slot: u64) -> Option<u16> {
    if last.is_unset() || last.slot() < slot {
        return Some(0);
    }
    if last.slot() > slot {
        return None;
    }
    let candidate = last.sequence() + 1;
    if candidate > SlotID::MAX_SEQUENCE {
        return None;
    }
    Some(candidate)
}
