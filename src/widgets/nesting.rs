//! Nesting container: a frame that finds its real parent through a shared
//! [`ScopeStack`], so a tree can be built with lexical scopes instead of
//! hand-tracked parent references.
//!
//! ```
//! use framekit::prelude::*;
//!
//! # fn main() -> framekit::Result<()> {
//! let mut tree = Tree::new();
//! let root = tree.create_root(Box::new(Frame::default()));
//! let scopes = ScopeStack::new();
//!
//! let mut frm = root;
//! NestingContainer::new(&mut tree, frm, Some(&scopes), FrameConfig::default())?
//!     .with_scope(&mut tree, |tree, outer| {
//!         frm = outer.id();
//!         NestingContainer::new(tree, frm, Some(&scopes), FrameConfig::default())?
//!             .with_scope(tree, |_, inner| {
//!                 frm = inner.id();
//!                 Ok(())
//!             })
//!     })?;
//!
//! // Both scopes are closed: the next container lands back under `root`.
//! let next = NestingContainer::new(&mut tree, frm, Some(&scopes), FrameConfig::default())?;
//! assert_eq!(next.parent(), root);
//! # Ok(())
//! # }
//! ```

use crate::error::Result;
use crate::layout::{GridOptions, PackOptions, PlaceOptions, Size};
use crate::scope::ScopeStack;
use crate::tree::{Tree, WidgetId};

use super::widget::{Color, Frame, Widget};

/// Options for the frame a container creates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameConfig {
    pub background: Option<Color>,
    pub border_width: i32,
    /// Requested width; the natural width when unset
    pub width: Option<i32>,
    /// Requested height; the natural height when unset
    pub height: Option<i32>,
}

impl FrameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn border_width(mut self, width: i32) -> Self {
        self.border_width = width;
        self
    }

    pub fn width(mut self, width: i32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: i32) -> Self {
        self.height = Some(height);
        self
    }

    pub(crate) fn frame(&self) -> Frame {
        Frame {
            background: self.background,
            border_width: self.border_width,
        }
    }

    pub(crate) fn apply_size(&self, tree: &mut Tree, id: WidgetId) {
        if self.width.is_some() || self.height.is_some() {
            tree.set_requested_size(
                id,
                Size::new(self.width.unwrap_or(0), self.height.unwrap_or(0)),
            );
        }
    }
}

/// Find where a new container really belongs: the requested parent, unless
/// scopes closed since the last container was opened.
pub(crate) fn resolve_parent(
    tree: &Tree,
    requested: WidgetId,
    scopes: Option<&ScopeStack>,
) -> Result<WidgetId> {
    tree.ensure(requested)?;
    match scopes {
        Some(scopes) if scopes.is_level_up() => scopes.resolve_current_parent(),
        _ => Ok(requested),
    }
}

pub struct NestingContainer {
    id: WidgetId,
    parent: WidgetId,
    scopes: Option<ScopeStack>,
}

impl NestingContainer {
    /// Create a frame under `parent` (or under the parent the scope stack
    /// resolves) and open a scope for it.
    pub fn new(
        tree: &mut Tree,
        parent: WidgetId,
        scopes: Option<&ScopeStack>,
        config: FrameConfig,
    ) -> Result<Self> {
        let parent = resolve_parent(tree, parent, scopes)?;
        let container = Self::attach(tree, parent, parent, scopes, Box::new(config.frame()));
        config.apply_size(tree, container.id);
        Ok(container)
    }

    /// Create `widget` under `master` and open its scope. `parent` is the
    /// resolved logical parent; composites create their frame inside a
    /// helper widget, so the two can differ.
    pub(crate) fn attach(
        tree: &mut Tree,
        master: WidgetId,
        parent: WidgetId,
        scopes: Option<&ScopeStack>,
        widget: Box<dyn Widget>,
    ) -> Self {
        let id = tree.create(master, widget);
        if let Some(scopes) = scopes {
            scopes.push(parent, id);
        }
        Self {
            id,
            parent,
            scopes: scopes.cloned(),
        }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// The parent resolved at construction.
    pub fn parent(&self) -> WidgetId {
        self.parent
    }

    pub fn scopes(&self) -> Option<&ScopeStack> {
        self.scopes.as_ref()
    }
}

/// Closes a scope when dropped, unless closed explicitly first.
struct ScopeGuard {
    scopes: Option<ScopeStack>,
    container: WidgetId,
    armed: bool,
}

impl ScopeGuard {
    fn new(nesting: &NestingContainer) -> Self {
        Self {
            scopes: nesting.scopes.clone(),
            container: nesting.id,
            armed: true,
        }
    }

    fn close(mut self) -> Result<()> {
        self.armed = false;
        match &self.scopes {
            Some(scopes) => scopes.close(self.container),
            None => Ok(()),
        }
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Some(scopes) = &self.scopes {
            if let Err(err) = scopes.close(self.container) {
                log::warn!("closing scope of #{} while unwinding: {}", self.container.as_u64(), err);
            }
        }
    }
}

/// Behaviour shared by every container built on [`NestingContainer`].
pub trait Container {
    fn nesting(&self) -> &NestingContainer;

    /// The widget children are created in.
    fn id(&self) -> WidgetId {
        self.nesting().id()
    }

    /// The widget the caller positions in the parent.
    fn outer(&self) -> WidgetId {
        self.nesting().id()
    }

    fn parent(&self) -> WidgetId {
        self.nesting().parent()
    }

    fn pack(&self, tree: &mut Tree, options: PackOptions) -> Result<()> {
        tree.pack(self.outer(), options)
    }

    fn grid(&self, tree: &mut Tree, options: GridOptions) -> Result<()> {
        tree.grid(self.outer(), options)
    }

    fn place(&self, tree: &mut Tree, options: PlaceOptions) -> Result<()> {
        tree.place(self.outer(), options)
    }

    /// Leave this container's nesting level. A no-op without a scope stack.
    fn close(&self) -> Result<()> {
        let nesting = self.nesting();
        match nesting.scopes() {
            Some(scopes) => scopes.close(nesting.id()),
            None => Ok(()),
        }
    }

    /// Run `body` inside this container's scope. The scope is closed on
    /// every way out of `body`; an error from `body` is returned unchanged.
    fn with_scope<R>(
        &self,
        tree: &mut Tree,
        body: impl FnOnce(&mut Tree, &Self) -> Result<R>,
    ) -> Result<R>
    where
        Self: Sized,
    {
        let guard = ScopeGuard::new(self.nesting());
        let result = body(tree, self);
        let container = self.nesting().id();
        match (result, guard.close()) {
            (Ok(value), closed) => closed.map(|()| value),
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(close_err)) => {
                log::warn!(
                    "closing scope of #{} after a failed body: {}",
                    container.as_u64(),
                    close_err
                );
                Err(err)
            }
        }
    }
}

impl Container for NestingContainer {
    fn nesting(&self) -> &NestingContainer {
        self
    }
}
