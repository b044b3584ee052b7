//! Item kinds and item stacks.

use std::fmt;

/// Identifies an item kind within a simulation world.
///
/// Kinds are registry-assigned; `ItemKind(n)` corresponds to the n-th
/// registered kind. Two stacks are candidates for merging only when
/// their kinds are equal (the [`StackingRule`](crate::StackingRule)
/// decides the rest).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKind(pub u32);

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ItemKind {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// A (kind, quantity) pair: some amount of a single item kind.
///
/// Stacks are immutable value types. An entity's stack is replaced
/// wholesale when a merge commits; nothing mutates a stack in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemStack {
    /// The kind of item held.
    pub kind: ItemKind,
    /// How many items the stack holds.
    pub amount: u32,
}

impl ItemStack {
    /// Create a new stack.
    pub fn new(kind: ItemKind, amount: u32) -> Self {
        Self { kind, amount }
    }

    /// Returns `true` if the stack holds nothing.
    ///
    /// An empty stack is never a valid payload for an active item
    /// entity; entity constructors reject it.
    pub fn is_empty(&self) -> bool {
        self.amount == 0
    }
}

impl fmt::Display for ItemStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.amount, self.kind)
    }
}
