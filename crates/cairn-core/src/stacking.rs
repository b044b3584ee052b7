//! The [`StackingRule`] contract and its vanilla implementation.
//!
//! A stacking rule decides whether two stacks are the same "kind" for
//! merging purposes, whether a combined quantity fits in one stack, and
//! what the merged stack looks like. The merge sweep consumes this as a
//! pure capability: all methods are deterministic and side-effect-free.

use crate::item::ItemStack;

/// Pairwise stacking capability consumed by the merge sweep.
///
/// Implementations must be pure: the same inputs always produce the
/// same outputs, and no method observes or mutates external state.
/// `Send + Sync` lets a rule be shared by reference wherever the world
/// is moved.
pub trait StackingRule: Send + Sync {
    /// Whether `a` and `b` are compatible for stacking at all.
    fn can_be_stacked(&self, a: &ItemStack, b: &ItemStack) -> bool;

    /// The countable quantity of `stack` under this rule.
    fn amount(&self, stack: &ItemStack) -> u32;

    /// Whether a stack like `stack` can legally hold `total` items.
    ///
    /// This is the overflow/cap gate: a merge whose combined amount
    /// fails this check is rejected entirely, never truncated.
    fn can_apply(&self, stack: &ItemStack, total: u32) -> bool;

    /// Produce the stack that results from resizing `stack` to `total`.
    ///
    /// Callers must only invoke this after [`can_apply`](Self::can_apply)
    /// returned `true` for the same arguments.
    fn apply(&self, stack: &ItemStack, total: u32) -> ItemStack;
}

/// Default stacking rule: same kind stacks, up to a fixed cap.
#[derive(Clone, Copy, Debug)]
pub struct VanillaStackingRule {
    max_size: u32,
}

impl VanillaStackingRule {
    /// Create a rule with the given per-stack cap.
    ///
    /// # Panics
    ///
    /// Panics if `max_size` is zero — a cap of zero would make every
    /// stack unrepresentable.
    pub fn new(max_size: u32) -> Self {
        assert!(max_size > 0, "stack cap must be at least 1");
        Self { max_size }
    }

    /// The per-stack cap.
    pub fn max_size(&self) -> u32 {
        self.max_size
    }
}

impl Default for VanillaStackingRule {
    /// The conventional 64-item cap.
    fn default() -> Self {
        Self::new(64)
    }
}

impl StackingRule for VanillaStackingRule {
    fn can_be_stacked(&self, a: &ItemStack, b: &ItemStack) -> bool {
        a.kind == b.kind
    }

    fn amount(&self, stack: &ItemStack) -> u32 {
        stack.amount
    }

    fn can_apply(&self, _stack: &ItemStack, total: u32) -> bool {
        total <= self.max_size
    }

    fn apply(&self, stack: &ItemStack, total: u32) -> ItemStack {
        debug_assert!(self.can_apply(stack, total));
        ItemStack::new(stack.kind, total)
    }
}
