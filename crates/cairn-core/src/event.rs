//! The cancellable merge-event protocol.
//!
//! Before committing a merge, the sweep raises a [`MergeEvent`] carrying
//! the fully-computed proposed outcome. Observers inspect it in
//! registration order; each may allow it, amend the proposed result, or
//! veto it. [`dispatch`] folds those responses into a single
//! [`MergeVerdict`] that the caller branches on — approval resolves
//! synchronously, before the dispatch call returns, and a vetoed merge
//! is a normal outcome rather than an error.

use crate::id::EntityId;
use crate::item::ItemStack;

/// A proposed merge between two item entities.
///
/// The `result` is concrete, not hypothetical: the sweep computes it
/// eagerly via the stacking rule before raising the event, so observers
/// see exactly the stack that will be committed if nobody objects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeEvent {
    /// The scanning entity; absorbs the candidate on approval.
    pub initiator: EntityId,
    /// The candidate; removed from the world on approval.
    pub absorbed: EntityId,
    /// The stack the initiator will carry on approval.
    pub result: ItemStack,
}

/// One observer's response to a proposed merge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MergeDecision {
    /// Let the merge proceed with the current result.
    Allow,
    /// Let the merge proceed, but with this result instead.
    ///
    /// Observers registered after this one see the amended event.
    Amend(ItemStack),
    /// Cancel the merge, with a reason for telemetry.
    Veto(String),
}

/// The outcome of dispatching a [`MergeEvent`] to all observers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MergeVerdict {
    /// No observer objected; commit this (possibly amended) stack.
    Approved(ItemStack),
    /// An observer cancelled the merge; nothing may be mutated.
    Vetoed {
        /// The vetoing observer's stated reason.
        reason: String,
    },
}

impl MergeVerdict {
    /// Returns `true` for [`MergeVerdict::Approved`].
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved(_))
    }
}

/// An external party with veto power over proposed merges.
///
/// `Send` is required so a world holding observers can be moved between
/// threads, matching the ownership model of the engine.
pub trait MergeObserver: Send {
    /// Inspect a proposed merge and respond.
    fn observe(&mut self, event: &MergeEvent) -> MergeDecision;
}

/// Dispatch an event to observers in registration order.
///
/// The first [`MergeDecision::Veto`] short-circuits: later observers are
/// not consulted and the verdict is [`MergeVerdict::Vetoed`]. Each
/// [`MergeDecision::Amend`] replaces the proposed result for the
/// observers that follow. With no observers registered the event is
/// approved as proposed.
pub fn dispatch(observers: &mut [Box<dyn MergeObserver>], mut event: MergeEvent) -> MergeVerdict {
    for observer in observers {
        match observer.observe(&event) {
            MergeDecision::Allow => {}
            MergeDecision::Amend(stack) => event.result = stack,
            MergeDecision::Veto(reason) => return MergeVerdict::Vetoed { reason },
        }
    }
    MergeVerdict::Approved(event.result)
}
