//! Arena-based widget storage.
//!
//! The Tree is the retained host model the containers are built on: it owns
//! every widget, the parent/child structure, each widget's geometry and
//! placement, and the event bindings. It uses a sparse-set layout with
//! generational indices.
//!
//! ## Key Features
//!
//! - **Generational Indices**: WidgetId contains index + generation so a
//!   stale id never aliases a widget later allocated in the same slot.
//!
//! - **Dense Storage**: Nodes are stored contiguously; removal is a
//!   swap-remove with sparse-entry fixup.
//!
//! - **Geometry Propagation**: When a widget's placement, mapping or
//!   requested size changes, the nearest ancestor with fixed geometry
//!   re-arranges its subtree. Size changes are reported to the widget
//!   itself as [`Event::Configure`].
//!
//! - **Bindings**: Each node carries a list of (mask, handler) bindings.
//!   [`Tree::dispatch`] routes an event to the handler bound on the target
//!   node; there is no bubbling to ancestors.

use crate::error::{FrameError, Result};
use crate::event::{Event, EventMask, EventResponse};
use crate::layout::{
    self, Axis, GridOptions, GridWeights, PackOptions, PlaceOptions, Placement, PlacementKind,
    Rect, Size,
};
use crate::widgets::Widget;

/// Unique identifier for a widget in the tree.
///
/// Uses a generational index design:
/// - `index`: Position in the sparse array (reusable after removal)
/// - `generation`: Version counter that increments when a slot is reused
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct WidgetId {
    index: u32,
    generation: u32,
}

impl WidgetId {
    fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Convert to a u64 for external use (e.g. logging).
    /// Combines generation (high bits) with index (low bits).
    pub fn as_u64(self) -> u64 {
        ((self.generation as u64) << 32) | (self.index as u64)
    }
}

/// An event handler attached to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub mask: EventMask,
    /// Widget whose `event` method receives the event.
    pub handler: WidgetId,
}

/// Entry in the sparse map, pointing to a dense array slot.
struct SparseEntry {
    dense_index: usize,
    generation: u32,
}

/// A node in the tree, containing a widget and its metadata.
struct Node {
    widget: Box<dyn Widget>,
    parent: Option<WidgetId>,
    children: Vec<WidgetId>,
    /// Explicitly requested size (width/height options)
    requested: Size,
    /// Current geometry, relative to the parent
    rect: Rect,
    placement: Option<Placement>,
    /// False once the widget was removed from its master's layout
    mapped: bool,
    grid_weights: GridWeights,
    bindings: Vec<Binding>,
    /// Back-pointer to sparse array index (for swap-remove fixup)
    sparse_index: u32,
}

pub struct Tree {
    dense: Vec<Node>,
    sparse: Vec<Option<SparseEntry>>,
    free_indices: Vec<u32>,
}

impl Tree {
    pub fn new() -> Self {
        Self {
            dense: Vec::new(),
            sparse: Vec::new(),
            free_indices: Vec::new(),
        }
    }

    fn register(&mut self, widget: Box<dyn Widget>, parent: Option<WidgetId>) -> WidgetId {
        let (sparse_index, generation) = if let Some(idx) = self.free_indices.pop() {
            let old_gen = self.sparse[idx as usize]
                .as_ref()
                .map(|e| e.generation)
                .unwrap_or(0);
            (idx, old_gen.wrapping_add(1))
        } else {
            let idx = self.sparse.len() as u32;
            self.sparse.push(None);
            (idx, 0)
        };

        let dense_index = self.dense.len();
        let id = WidgetId::new(sparse_index, generation);

        self.dense.push(Node {
            widget,
            parent,
            children: Vec::new(),
            requested: Size::zero(),
            rect: Rect::default(),
            placement: None,
            mapped: true,
            grid_weights: GridWeights::default(),
            bindings: Vec::new(),
            sparse_index,
        });
        self.sparse[sparse_index as usize] = Some(SparseEntry {
            dense_index,
            generation,
        });

        if let Some(parent_dense) = parent.and_then(|p| self.get_dense_index(p)) {
            self.dense[parent_dense].children.push(id);
        }

        id
    }

    /// Register a top-level widget (a window).
    pub fn create_root(&mut self, widget: Box<dyn Widget>) -> WidgetId {
        self.register(widget, None)
    }

    /// Create a widget under `parent`. It is not managed by any geometry
    /// manager until packed, gridded or placed.
    pub fn create(&mut self, parent: WidgetId, widget: Box<dyn Widget>) -> WidgetId {
        let id = self.register(widget, Some(parent));
        log::trace!(
            "created {} #{} under #{}",
            self.widget_name(id),
            id.as_u64(),
            parent.as_u64()
        );
        id
    }

    /// Remove a widget and its whole subtree.
    pub fn destroy(&mut self, id: WidgetId) {
        if !self.contains(id) {
            return;
        }
        let parent = self.get_parent(id);
        if let Some(parent_dense) = parent.and_then(|p| self.get_dense_index(p)) {
            self.dense[parent_dense].children.retain(|&c| c != id);
        }

        let mut doomed = self.descendants(id);
        doomed.push(id);
        for victim in doomed {
            self.unregister(victim);
        }

        if let Some(parent) = parent {
            self.propagate(parent);
        }
    }

    fn unregister(&mut self, id: WidgetId) {
        let dense_index = match self.get_dense_index(id) {
            Some(idx) => idx,
            None => return,
        };

        let last_dense_index = self.dense.len() - 1;
        let removed_node = self.dense.swap_remove(dense_index);

        if dense_index != last_dense_index && !self.dense.is_empty() {
            let moved_sparse_idx = self.dense[dense_index].sparse_index;
            if let Some(ref mut entry) = self.sparse[moved_sparse_idx as usize] {
                entry.dense_index = dense_index;
            }
        }

        // Keep the generation around for the next allocation of this slot.
        self.sparse[id.index as usize] = Some(SparseEntry {
            dense_index: usize::MAX,
            generation: id.generation,
        });
        self.free_indices.push(id.index);

        drop(removed_node);
    }

    fn get_dense_index(&self, id: WidgetId) -> Option<usize> {
        self.sparse
            .get(id.index as usize)
            .and_then(|e| e.as_ref())
            .filter(|e| e.generation == id.generation && e.dense_index != usize::MAX)
            .map(|e| e.dense_index)
    }

    fn node(&self, id: WidgetId) -> Option<&Node> {
        self.get_dense_index(id).map(|idx| &self.dense[idx])
    }

    fn node_mut(&mut self, id: WidgetId) -> Option<&mut Node> {
        self.get_dense_index(id).map(move |idx| &mut self.dense[idx])
    }

    /// Access a widget via a closure.
    pub fn with_widget<R>(&self, id: WidgetId, f: impl FnOnce(&dyn Widget) -> R) -> Option<R> {
        self.node(id).map(|node| f(&*node.widget))
    }

    /// Mutate a widget via a closure.
    ///
    /// The widget is temporarily extracted from the tree during the closure
    /// execution, so the closure may freely mutate the tree (including
    /// dispatching events to other widgets).
    /// Returns `None` if the widget is not found (invalid or stale ID).
    pub fn with_widget_mut<R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut dyn Widget, &mut Tree) -> R,
    ) -> Option<R> {
        let dense_index = self.get_dense_index(id)?;

        struct Placeholder;
        impl Widget for Placeholder {
            fn name(&self) -> &'static str {
                "placeholder"
            }
            crate::widgets::impl_as_any!();
        }

        let mut widget = std::mem::replace(&mut self.dense[dense_index].widget, Box::new(Placeholder));
        let result = f(&mut *widget, self);

        // The closure may have destroyed the widget; then it is simply dropped.
        if let Some(idx) = self.get_dense_index(id) {
            self.dense[idx].widget = widget;
        }

        Some(result)
    }

    /// Typed read access.
    pub fn widget_as<T: Widget>(&self, id: WidgetId) -> Option<&T> {
        self.node(id)
            .and_then(|node| node.widget.as_any().downcast_ref::<T>())
    }

    /// Typed mutable access with the tree available to the closure.
    pub fn with_widget_as<T: Widget, R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut T, &mut Tree) -> R,
    ) -> Option<R> {
        self.with_widget_mut(id, |widget, tree| {
            widget.as_any_mut().downcast_mut::<T>().map(|w| f(w, tree))
        })
        .flatten()
    }

    pub fn widget_name(&self, id: WidgetId) -> &'static str {
        self.with_widget(id, |w| w.name()).unwrap_or("<gone>")
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.get_dense_index(id).is_some()
    }

    pub(crate) fn ensure(&self, id: WidgetId) -> Result<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(FrameError::UnknownWidget(id))
        }
    }

    pub fn get_parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.node(id).and_then(|node| node.parent)
    }

    pub fn get_children(&self, id: WidgetId) -> Vec<WidgetId> {
        self.node(id)
            .map(|node| node.children.clone())
            .unwrap_or_default()
    }

    /// All descendants of `id` in pre-order, not including `id` itself.
    pub fn descendants(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut out = Vec::new();
        let mut stack: Vec<WidgetId> = self.get_children(id).into_iter().rev().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.get_children(current).into_iter().rev());
        }
        out
    }

    // ------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------

    pub fn rect(&self, id: WidgetId) -> Rect {
        self.node(id).map(|node| node.rect).unwrap_or_default()
    }

    /// Rectangle of `id` in the coordinates of its ancestor `ancestor`.
    pub fn rect_in(&self, id: WidgetId, ancestor: WidgetId) -> Rect {
        let mut rect = self.rect(id);
        let mut current = self.get_parent(id);
        while let Some(parent) = current {
            if parent == ancestor {
                break;
            }
            let offset = self.rect(parent);
            rect = rect.offset(offset.x, offset.y);
            current = self.get_parent(parent);
        }
        rect
    }

    /// Bounding box of `id` and all its mapped descendants, in the
    /// coordinates of `id`'s parent.
    pub fn bbox(&self, id: WidgetId) -> Rect {
        let own = self.rect(id);
        let mut bbox = own;
        for descendant in self.descendants(id) {
            if !self.is_visible_within(descendant, id) {
                continue;
            }
            let inner = self.rect_in(descendant, id);
            bbox = bbox.union(&inner.offset(own.x, own.y));
        }
        bbox
    }

    fn is_visible_within(&self, id: WidgetId, ancestor: WidgetId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            if node_id == ancestor {
                return true;
            }
            match self.node(node_id) {
                Some(node) if node.mapped && node.placement.is_some() => current = node.parent,
                _ => return false,
            }
        }
        true
    }

    pub fn requested_size(&self, id: WidgetId) -> Size {
        self.node(id).map(|node| node.requested).unwrap_or_default()
    }

    /// Set the explicitly requested size and let the masters re-arrange.
    pub fn set_requested_size(&mut self, id: WidgetId, size: Size) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        if node.requested == size {
            return;
        }
        node.requested = size;
        self.propagate(id);
    }

    pub fn natural_size(&self, id: WidgetId) -> Size {
        layout::natural_size(self, id)
    }

    /// Give `id` a new rectangle and re-arrange its managed children. A
    /// size change is then reported to the widget as a Configure event.
    pub fn set_geometry(&mut self, id: WidgetId, rect: Rect) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        let old = node.rect;
        node.rect = rect;
        layout::arrange(self, id);

        if old.size() != rect.size() {
            log::trace!(
                "configure {} #{}: {}x{}",
                self.widget_name(id),
                id.as_u64(),
                rect.width,
                rect.height
            );
            self.dispatch(
                id,
                &Event::Configure {
                    width: rect.width,
                    height: rect.height,
                },
            );
        }
    }

    /// Resize in place, as the window manager does for a top-level window.
    pub fn resize(&mut self, id: WidgetId, width: i32, height: i32) {
        let rect = self.rect(id);
        self.set_geometry(id, Rect::new(rect.x, rect.y, width, height));
    }

    // ------------------------------------------------------------------
    // Placement
    // ------------------------------------------------------------------

    pub fn placement(&self, id: WidgetId) -> Option<Placement> {
        self.node(id).and_then(|node| node.placement)
    }

    pub fn is_mapped(&self, id: WidgetId) -> bool {
        self.node(id)
            .map(|node| node.mapped && node.placement.is_some())
            .unwrap_or(false)
    }

    fn set_placement(&mut self, id: WidgetId, placement: Placement) -> Result<()> {
        let kind = placement.kind();
        let supported = self
            .with_widget(id, |w| w.supports(kind))
            .ok_or(FrameError::UnknownWidget(id))?;
        if !supported {
            return Err(FrameError::UnsupportedPlacement {
                widget: self.widget_name(id),
                placement: kind,
            });
        }
        if let Some(node) = self.node_mut(id) {
            node.placement = Some(placement);
            node.mapped = true;
        }
        self.propagate(id);
        Ok(())
    }

    pub fn pack(&mut self, id: WidgetId, options: PackOptions) -> Result<()> {
        self.set_placement(id, Placement::Pack(options))
    }

    pub fn grid(&mut self, id: WidgetId, options: GridOptions) -> Result<()> {
        self.set_placement(id, Placement::Grid(options))
    }

    pub fn place(&mut self, id: WidgetId, options: PlaceOptions) -> Result<()> {
        self.set_placement(id, Placement::Place(options))
    }

    /// Make `id` a window item of its parent viewport at `(x, y)`.
    pub fn embed(&mut self, id: WidgetId, x: i32, y: i32) -> Result<()> {
        self.set_placement(id, Placement::Embedded { x, y })
    }

    /// Move an embedded window item without changing its size.
    pub(crate) fn move_embedded(&mut self, id: WidgetId, x: i32, y: i32) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        if !matches!(node.placement, Some(Placement::Embedded { .. })) {
            return;
        }
        node.placement = Some(Placement::Embedded { x, y });
        let rect = node.rect;
        self.set_geometry(id, Rect::new(x, y, rect.width, rect.height));
    }

    /// Take a gridded widget out of its master's layout, remembering its cell.
    pub fn grid_remove(&mut self, id: WidgetId) {
        self.set_mapped(id, false);
    }

    /// Put a widget removed with [`Tree::grid_remove`] back into its cell.
    pub fn grid_restore(&mut self, id: WidgetId) {
        self.set_mapped(id, true);
    }

    fn set_mapped(&mut self, id: WidgetId, mapped: bool) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        if node.mapped == mapped {
            return;
        }
        node.mapped = mapped;
        let parent = node.parent;
        if let Some(parent) = parent {
            self.propagate(parent);
        }
    }

    pub fn grid_weight(&mut self, master: WidgetId, axis: Axis, index: usize, weight: u32) {
        if let Some(node) = self.node_mut(master) {
            node.grid_weights.set(axis, index, weight);
            layout::arrange(self, master);
        }
    }

    pub fn grid_weights(&self, master: WidgetId) -> GridWeights {
        self.node(master)
            .map(|node| node.grid_weights.clone())
            .unwrap_or_default()
    }

    /// Mapped children with a placement, in creation order.
    pub(crate) fn managed_children(&self, id: WidgetId) -> Vec<(WidgetId, Placement)> {
        self.get_children(id)
            .into_iter()
            .filter_map(|child| {
                let node = self.node(child)?;
                match node.placement {
                    Some(placement) if node.mapped => Some((child, placement)),
                    _ => None,
                }
            })
            .collect()
    }

    /// The natural size of `id` may have changed: climb through the
    /// masters that size their children and re-arrange from the first
    /// widget whose own geometry does not depend on its master.
    fn propagate(&mut self, id: WidgetId) {
        let mut current = id;
        loop {
            let Some(node) = self.node(current) else {
                return;
            };
            let placement = if node.mapped { node.placement } else { None };
            match (placement, node.parent) {
                (Some(p), Some(parent)) if p.follows_master() => current = parent,
                (Some(Placement::Place(options)), _) => {
                    let rect = options.resolve(self.natural_size(current));
                    self.set_geometry(current, rect);
                    return;
                }
                (Some(Placement::Embedded { x, y }), _) => {
                    let natural = self.natural_size(current);
                    self.set_geometry(current, Rect::new(x, y, natural.width, natural.height));
                    return;
                }
                _ => {
                    layout::arrange(self, current);
                    return;
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Bindings
    // ------------------------------------------------------------------

    /// Bind `handler` to events matching `mask` on `id`, replacing any
    /// binding with the same mask.
    pub fn bind(&mut self, id: WidgetId, mask: EventMask, handler: WidgetId) {
        if let Some(node) = self.node_mut(id) {
            match node.bindings.iter_mut().find(|b| b.mask == mask) {
                Some(binding) => binding.handler = handler,
                None => node.bindings.push(Binding { mask, handler }),
            }
        }
    }

    pub fn unbind(&mut self, id: WidgetId, mask: EventMask) {
        if let Some(node) = self.node_mut(id) {
            node.bindings.retain(|b| b.mask != mask);
        }
    }

    pub fn bindings(&self, id: WidgetId) -> Vec<Binding> {
        self.node(id)
            .map(|node| node.bindings.clone())
            .unwrap_or_default()
    }

    pub fn is_bound(&self, id: WidgetId, mask: EventMask) -> bool {
        self.node(id)
            .map(|node| node.bindings.iter().any(|b| b.mask == mask))
            .unwrap_or(false)
    }

    fn binding_for(&self, id: WidgetId, mask: EventMask) -> Option<WidgetId> {
        let node = self.node(id)?;
        let find = |mask: EventMask| {
            node.bindings
                .iter()
                .find(|b| b.mask == mask)
                .map(|b| b.handler)
        };
        find(mask).or_else(|| {
            if mask.contains(EventMask::SHIFT) {
                find(mask - EventMask::SHIFT)
            } else {
                None
            }
        })
    }

    /// Deliver `event` to whatever is bound for it on `target`.
    pub fn dispatch(&mut self, target: WidgetId, event: &Event) -> EventResponse {
        let mask = event.mask();
        if mask.is_empty() {
            return EventResponse::Ignored;
        }
        let Some(handler) = self.binding_for(target, mask) else {
            return EventResponse::Ignored;
        };
        self.with_widget_mut(handler, |widget, tree| widget.event(tree, handler, event))
            .unwrap_or(EventResponse::Ignored)
    }

    pub fn clear(&mut self) {
        self.dense.clear();
        self.sparse.clear();
        self.free_indices.clear();
    }

    pub fn widget_count(&self) -> usize {
        self.dense.len()
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{impl_as_any, Frame};

    /// Counts the Configure events it receives.
    #[derive(Default)]
    struct Recorder {
        configures: Vec<(i32, i32)>,
    }

    impl Widget for Recorder {
        fn name(&self) -> &'static str {
            "recorder"
        }

        fn event(&mut self, _tree: &mut Tree, _id: WidgetId, event: &Event) -> EventResponse {
            if let Event::Configure { width, height } = event {
                self.configures.push((*width, *height));
                return EventResponse::Handled;
            }
            EventResponse::Ignored
        }

        impl_as_any!();
    }

    fn frame() -> Box<dyn Widget> {
        Box::new(Frame::default())
    }

    #[test]
    fn test_tree_create_destroy() {
        let mut tree = Tree::new();
        let root = tree.create_root(frame());
        let child = tree.create(root, frame());
        let grandchild = tree.create(child, frame());
        assert_eq!(tree.widget_count(), 3);

        tree.destroy(child);
        assert!(tree.contains(root));
        assert!(!tree.contains(child));
        assert!(!tree.contains(grandchild));
        assert!(tree.get_children(root).is_empty());
    }

    #[test]
    fn test_tree_generational_index() {
        let mut tree = Tree::new();
        let root = tree.create_root(frame());
        let id1 = tree.create(root, frame());
        tree.destroy(id1);

        let id2 = tree.create(root, frame());
        assert!(!tree.contains(id1));
        assert!(tree.contains(id2));
        assert_eq!(id1.index, id2.index);
        assert_ne!(id1.generation, id2.generation);
    }

    #[test]
    fn test_tree_swap_remove_fixup() {
        let mut tree = Tree::new();
        let root = tree.create_root(frame());
        let a = tree.create(root, frame());
        let b = tree.create(root, frame());
        let c = tree.create(root, frame());

        tree.destroy(a);
        assert!(tree.contains(b));
        assert!(tree.contains(c));
        assert_eq!(tree.widget_name(c), "frame");
        assert_eq!(tree.get_children(root), vec![b, c]);
    }

    #[test]
    fn test_descendants_pre_order() {
        let mut tree = Tree::new();
        let root = tree.create_root(frame());
        let a = tree.create(root, frame());
        let a1 = tree.create(a, frame());
        let b = tree.create(root, frame());
        let a2 = tree.create(a, frame());

        assert_eq!(tree.descendants(root), vec![a, a1, a2, b]);
        assert!(tree.descendants(b).is_empty());
    }

    #[test]
    fn test_configure_only_on_size_change() {
        let mut tree = Tree::new();
        let root = tree.create_root(frame());
        let recorder = tree.create(root, Box::new(Recorder::default()));
        tree.bind(recorder, EventMask::CONFIGURE, recorder);

        tree.place(recorder, PlaceOptions::at(0, 0).size(10, 20)).unwrap();
        tree.place(recorder, PlaceOptions::at(5, 5).size(10, 20)).unwrap();
        tree.place(recorder, PlaceOptions::at(5, 5).size(30, 20)).unwrap();

        let seen = tree.widget_as::<Recorder>(recorder).unwrap();
        assert_eq!(seen.configures, vec![(10, 20), (30, 20)]);
        assert_eq!(tree.rect(recorder), Rect::new(5, 5, 30, 20));
    }

    #[test]
    fn test_unbound_events_are_ignored() {
        let mut tree = Tree::new();
        let root = tree.create_root(frame());
        let recorder = tree.create(root, Box::new(Recorder::default()));

        tree.place(recorder, PlaceOptions::at(0, 0).size(10, 20)).unwrap();
        assert!(tree
            .widget_as::<Recorder>(recorder)
            .unwrap()
            .configures
            .is_empty());

        tree.bind(recorder, EventMask::CONFIGURE, recorder);
        tree.unbind(recorder, EventMask::CONFIGURE);
        tree.resize(recorder, 40, 40);
        assert!(tree
            .widget_as::<Recorder>(recorder)
            .unwrap()
            .configures
            .is_empty());
    }

    #[test]
    fn test_bind_replaces_same_mask() {
        let mut tree = Tree::new();
        let root = tree.create_root(frame());
        let a = tree.create(root, frame());
        let b = tree.create(root, frame());

        tree.bind(root, EventMask::MOUSE_WHEEL, a);
        tree.bind(root, EventMask::MOUSE_WHEEL, b);
        tree.bind(root, EventMask::CONFIGURE, a);

        let bindings = tree.bindings(root);
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings[0].handler, b);
    }

    #[test]
    fn test_shifted_event_falls_back_to_plain_binding() {
        let mut tree = Tree::new();
        let root = tree.create_root(frame());
        let handler = tree.create(root, frame());
        tree.bind(root, EventMask::MOUSE_WHEEL, handler);

        assert_eq!(
            tree.binding_for(root, EventMask::MOUSE_WHEEL | EventMask::SHIFT),
            Some(handler)
        );
        assert_eq!(tree.binding_for(root, EventMask::BUTTON_4), None);
    }

    #[test]
    fn test_grid_remove_rearranges_master() {
        let mut tree = Tree::new();
        let root = tree.create_root(frame());
        let a = tree.create(root, frame());
        let b = tree.create(root, frame());
        tree.set_requested_size(a, Size::new(10, 10));
        tree.set_requested_size(b, Size::new(10, 10));
        tree.grid(a, GridOptions::cell(0, 0)).unwrap();
        tree.grid(b, GridOptions::cell(0, 1)).unwrap();
        assert_eq!(tree.natural_size(root), Size::new(20, 10));

        tree.grid_remove(b);
        assert!(!tree.is_mapped(b));
        assert_eq!(tree.natural_size(root), Size::new(10, 10));

        tree.grid_restore(b);
        assert!(tree.is_mapped(b));
        assert_eq!(tree.placement(b), Some(Placement::Grid(GridOptions::cell(0, 1))));
    }

    #[test]
    fn test_embedded_item_tracks_natural_size() {
        let mut tree = Tree::new();
        let root = tree.create_root(frame());
        let item = tree.create(root, frame());
        tree.embed(item, 0, 0).unwrap();

        let leaf = tree.create(item, frame());
        tree.set_requested_size(leaf, Size::new(40, 15));
        tree.pack(leaf, PackOptions::new()).unwrap();

        assert_eq!(tree.rect(item), Rect::new(0, 0, 40, 15));
    }

    #[test]
    fn test_bbox_includes_descendants() {
        let mut tree = Tree::new();
        let root = tree.create_root(frame());
        let outer = tree.create(root, frame());
        tree.place(outer, PlaceOptions::at(10, 10).size(20, 20)).unwrap();
        let inner = tree.create(outer, frame());
        tree.place(inner, PlaceOptions::at(15, 15).size(30, 5)).unwrap();

        assert_eq!(tree.rect_in(inner, root), Rect::new(25, 25, 30, 5));
        assert_eq!(tree.bbox(outer), Rect::new(10, 10, 45, 20));
    }

    #[test]
    fn test_unknown_widget_placement_errors() {
        let mut tree = Tree::new();
        let root = tree.create_root(frame());
        let child = tree.create(root, frame());
        tree.destroy(child);

        assert_eq!(
            tree.pack(child, PackOptions::new()),
            Err(FrameError::UnknownWidget(child))
        );
    }
}
