//! Parent bookkeeping for scoped nesting.
//!
//! A [`ScopeStack`] records the containers whose scopes are open, in
//! nesting order. Closing a scope only flips its flag; the closed tail is
//! trimmed lazily by the next container that asks for its parent. That
//! lets a new container jump back any number of levels in one step.
//!
//! The stack is a cheap, clonable handle to shared state. It is `!Send`:
//! a tree is built on one thread, sequentially.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{FrameError, Result};
use crate::tree::WidgetId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeEntry {
    pub container: WidgetId,
    pub open: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ScopeStack {
    entries: Rc<RefCell<Vec<ScopeEntry>>>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Snapshot of the entries, outermost first.
    pub fn entries(&self) -> Vec<ScopeEntry> {
        self.entries.borrow().clone()
    }

    /// The innermost open scope.
    pub fn current(&self) -> Option<WidgetId> {
        self.entries
            .borrow()
            .iter()
            .rev()
            .find(|entry| entry.open)
            .map(|entry| entry.container)
    }

    /// True if at least one scope closed since the last push.
    pub fn is_level_up(&self) -> bool {
        self.entries
            .borrow()
            .last()
            .map(|entry| !entry.open)
            .unwrap_or(false)
    }

    /// Drop the closed scopes at the tail and return the open scope just
    /// before them, which is where the next container belongs.
    pub fn resolve_current_parent(&self) -> Result<WidgetId> {
        let mut entries = self.entries.borrow_mut();
        let closed = entries.iter().rev().take_while(|entry| !entry.open).count();
        if closed == entries.len() {
            return Err(FrameError::ScopeImbalance);
        }

        let keep = entries.len() - closed;
        let parent = entries[keep - 1].container;
        entries.truncate(keep);
        log::trace!(
            "scope stack: dropped {} closed level(s), parent is #{}",
            closed,
            parent.as_u64()
        );
        Ok(parent)
    }

    /// Open a scope for `container`. On an empty stack, `parent` is
    /// registered first as the root scope, which is never reclaimed.
    pub fn push(&self, parent: WidgetId, container: WidgetId) {
        let mut entries = self.entries.borrow_mut();
        if entries.is_empty() {
            entries.push(ScopeEntry {
                container: parent,
                open: true,
            });
        }
        entries.push(ScopeEntry {
            container,
            open: true,
        });
    }

    /// Mark the innermost open scope of `container` as closed.
    ///
    /// Closing a container with no open scope, or the root, is an imbalance.
    pub fn close(&self, container: WidgetId) -> Result<()> {
        let mut entries = self.entries.borrow_mut();
        let position = entries
            .iter()
            .rposition(|entry| entry.open && entry.container == container);
        match position {
            Some(index) if index > 0 => {
                entries[index].open = false;
                log::trace!("scope stack: closed #{}", container.as_u64());
                Ok(())
            }
            _ => Err(FrameError::ScopeImbalance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Tree;
    use crate::widgets::Frame;

    fn ids(n: usize) -> Vec<WidgetId> {
        let mut tree = Tree::new();
        let root = tree.create_root(Box::new(Frame::default()));
        let mut out = vec![root];
        for _ in 1..n {
            out.push(tree.create(root, Box::new(Frame::default())));
        }
        out
    }

    #[test]
    fn test_first_push_registers_root() {
        let w = ids(2);
        let stack = ScopeStack::new();
        stack.push(w[0], w[1]);

        let entries = stack.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].container, w[0]);
        assert!(entries.iter().all(|e| e.open));
        assert!(!stack.is_level_up());
        assert_eq!(stack.current(), Some(w[1]));
    }

    #[test]
    fn test_level_up_after_close() {
        let w = ids(2);
        let stack = ScopeStack::new();
        assert!(!stack.is_level_up());

        stack.push(w[0], w[1]);
        stack.close(w[1]).unwrap();
        assert!(stack.is_level_up());
        // Closing is lazy: nothing is removed yet.
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_resolve_jumps_back_two_levels() {
        let w = ids(4);
        let stack = ScopeStack::new();
        stack.push(w[0], w[1]);
        stack.push(w[1], w[2]);
        stack.push(w[2], w[3]);
        stack.close(w[3]).unwrap();
        stack.close(w[2]).unwrap();

        assert_eq!(stack.resolve_current_parent(), Ok(w[1]));
        assert_eq!(stack.len(), 2);
        assert!(!stack.is_level_up());
    }

    #[test]
    fn test_resolve_removes_only_trailing_closed() {
        let w = ids(4);
        let stack = ScopeStack::new();
        stack.push(w[0], w[1]);
        stack.push(w[1], w[2]);
        stack.push(w[2], w[3]);
        stack.close(w[3]).unwrap();

        assert_eq!(stack.resolve_current_parent(), Ok(w[2]));
        let remaining: Vec<_> = stack.entries().iter().map(|e| e.container).collect();
        assert_eq!(remaining, vec![w[0], w[1], w[2]]);
    }

    #[test]
    fn test_close_without_open_scope_is_imbalance() {
        let w = ids(3);
        let stack = ScopeStack::new();
        assert_eq!(stack.close(w[1]), Err(FrameError::ScopeImbalance));

        stack.push(w[0], w[1]);
        stack.close(w[1]).unwrap();
        assert_eq!(stack.close(w[1]), Err(FrameError::ScopeImbalance));
        assert_eq!(stack.close(w[2]), Err(FrameError::ScopeImbalance));
        // The root is never closed.
        assert_eq!(stack.close(w[0]), Err(FrameError::ScopeImbalance));
    }

    #[test]
    fn test_resolve_with_everything_closed_is_imbalance() {
        let w = ids(2);
        let stack = ScopeStack::new();
        stack.push(w[0], w[1]);
        stack.close(w[1]).unwrap();
        // Simulate a corrupted stack where the root was closed too.
        stack.entries.borrow_mut()[0].open = false;

        assert_eq!(stack.resolve_current_parent(), Err(FrameError::ScopeImbalance));
    }

    #[test]
    fn test_resolve_on_empty_stack_is_imbalance() {
        assert_eq!(
            ScopeStack::new().resolve_current_parent(),
            Err(FrameError::ScopeImbalance)
        );
    }

    #[test]
    fn test_clones_share_state() {
        let w = ids(2);
        let stack = ScopeStack::new();
        let handle = stack.clone();
        handle.push(w[0], w[1]);
        assert_eq!(stack.len(), 2);
    }
}
