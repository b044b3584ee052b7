//! Scripted merge observers for tests.
//!
//! Observers are boxed into the world, so tests that need to inspect
//! what an observer saw share an [`EventLog`] handle with it, the same
//! way an external action source shares a buffer with a running
//! simulation.

use std::sync::{Arc, Mutex};

use cairn_core::{ItemKind, ItemStack, MergeDecision, MergeEvent, MergeObserver};

/// Shared log of the merge events an observer has seen.
pub type EventLog = Arc<Mutex<Vec<MergeEvent>>>;

/// Creates a new empty event log.
pub fn new_event_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Records every proposed merge into a shared log and allows it.
pub struct Recording {
    log: EventLog,
}

impl Recording {
    pub fn new(log: EventLog) -> Self {
        Self { log }
    }
}

impl MergeObserver for Recording {
    fn observe(&mut self, event: &MergeEvent) -> MergeDecision {
        self.log
            .lock()
            .expect("event log lock poisoned")
            .push(event.clone());
        MergeDecision::Allow
    }
}

/// Vetoes every proposed merge.
pub struct VetoAll {
    pub reason: String,
}

impl VetoAll {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl MergeObserver for VetoAll {
    fn observe(&mut self, _event: &MergeEvent) -> MergeDecision {
        MergeDecision::Veto(self.reason.clone())
    }
}

/// Vetoes merges whose proposed result is of one kind, allows the rest.
pub struct VetoKind {
    pub kind: ItemKind,
    pub reason: String,
}

impl VetoKind {
    pub fn new(kind: ItemKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }
}

impl MergeObserver for VetoKind {
    fn observe(&mut self, event: &MergeEvent) -> MergeDecision {
        if event.result.kind == self.kind {
            MergeDecision::Veto(self.reason.clone())
        } else {
            MergeDecision::Allow
        }
    }
}

/// Amends every proposed merge to a fixed result.
pub struct AmendTo {
    pub result: ItemStack,
}

impl AmendTo {
    pub fn new(result: ItemStack) -> Self {
        Self { result }
    }
}

impl MergeObserver for AmendTo {
    fn observe(&mut self, _event: &MergeEvent) -> MergeDecision {
        MergeDecision::Amend(self.result)
    }
}
