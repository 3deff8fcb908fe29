//! Auto-hiding scrollbar and the clipped viewport it controls.

use crate::error::{FrameError, Result};
use crate::event::{Event, EventMask, EventResponse};
use crate::layout::{Axis, PlacementKind, Rect, Size};
use crate::tree::{Tree, WidgetId};

use super::widget::Widget;

pub const DEFAULT_SCROLLBAR_THICKNESS: i32 = 16;

/// Guard against a viewport and its scrollbars trading space forever.
const MAX_REFRESH_PASSES: usize = 4;

/// A scrollbar that takes itself out of the grid while the whole content
/// is visible, and puts itself back as soon as it is not.
///
/// Only grid placement is supported: hiding relies on the grid keeping the
/// scrollbar's cell so it can come back without disturbing its siblings.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoHideScrollbar {
    axis: Axis,
    thickness: i32,
    lo: f64,
    hi: f64,
    active: bool,
}

impl AutoHideScrollbar {
    pub fn new(axis: Axis) -> Self {
        Self::with_thickness(axis, DEFAULT_SCROLLBAR_THICKNESS)
    }

    pub fn with_thickness(axis: Axis, thickness: i32) -> Self {
        Self {
            axis,
            thickness,
            lo: 0.0,
            hi: 1.0,
            active: false,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Size the scrollbar asks its grid cell for.
    pub fn natural_size(&self) -> Size {
        match self.axis {
            Axis::Vertical => Size::new(self.thickness, 0),
            Axis::Horizontal => Size::new(0, self.thickness),
        }
    }

    /// Visible window onto the content, as fractions of its extent.
    pub fn visible_range(&self) -> (f64, f64) {
        (self.lo, self.hi)
    }

    /// Whether there is anything to scroll.
    pub fn active(&self) -> bool {
        self.active
    }

    /// Store the visible range and recompute the active state: inactive
    /// exactly when the range covers the whole content.
    pub fn set_visible_range(&mut self, lo: f64, hi: f64) -> bool {
        self.lo = lo;
        self.hi = hi;
        self.active = !(lo <= 0.0 && hi >= 1.0);
        self.active
    }

    /// Update the scrollbar `id` in the tree, showing or hiding it.
    pub fn set(tree: &mut Tree, id: WidgetId, lo: f64, hi: f64) -> Result<bool> {
        let active = tree
            .with_widget_as::<AutoHideScrollbar, _>(id, |scrollbar, _| {
                scrollbar.set_visible_range(lo, hi)
            })
            .ok_or(FrameError::UnknownWidget(id))?;

        if active {
            tree.grid_restore(id);
        } else {
            tree.grid_remove(id);
        }
        Ok(active)
    }
}

impl Widget for AutoHideScrollbar {
    fn name(&self) -> &'static str {
        "scrollbar"
    }

    fn supports(&self, placement: PlacementKind) -> bool {
        placement == PlacementKind::Grid
    }

    super::impl_as_any!();
}

/// A clipped area showing a window onto a larger scroll region.
///
/// The view origin is the region coordinate shown at the viewport's
/// top-left corner. It stays inside the scroll region.
#[derive(Debug, Clone, Default)]
pub struct Viewport {
    scroll_region: Rect,
    origin_x: i32,
    origin_y: i32,
    window: Option<(WidgetId, i32, i32)>,
    x_scrollbar: Option<WidgetId>,
    y_scrollbar: Option<WidgetId>,
}

impl Viewport {
    /// Create a viewport under `parent`. It tracks its own size changes.
    pub fn create(tree: &mut Tree, parent: WidgetId) -> WidgetId {
        let id = tree.create(parent, Box::new(Viewport::default()));
        tree.bind(id, EventMask::CONFIGURE, id);
        id
    }

    pub fn scroll_region(&self) -> Rect {
        self.scroll_region
    }

    pub fn origin(&self) -> (i32, i32) {
        (self.origin_x, self.origin_y)
    }

    /// Visible fractions `(lo, hi)` along `axis` for a view of `view` size.
    pub fn fractions(&self, axis: Axis, view: Size) -> (f64, f64) {
        let (start, length, origin) = match axis {
            Axis::Horizontal => (self.scroll_region.x, self.scroll_region.width, self.origin_x),
            Axis::Vertical => (self.scroll_region.y, self.scroll_region.height, self.origin_y),
        };
        if length <= 0 {
            return (0.0, 1.0);
        }
        let length = length as f64;
        let lo = (origin - start) as f64 / length;
        let hi = (origin - start + axis.of_size(view)) as f64 / length;
        (lo.clamp(0.0, 1.0), hi.clamp(0.0, 1.0))
    }

    fn clamp(&mut self, view: Size) {
        let region = self.scroll_region;
        let max_x = (region.right() - view.width).max(region.x);
        let max_y = (region.bottom() - view.height).max(region.y);
        self.origin_x = self.origin_x.clamp(region.x, max_x);
        self.origin_y = self.origin_y.clamp(region.y, max_y);
    }

    /// Distance one scroll unit moves along `axis`: a tenth of the view.
    pub fn scroll_increment(axis: Axis, view: Size) -> i32 {
        (axis.of_size(view) / 10).max(1)
    }

    /// Clamp the view, move the window item and report the visible
    /// fractions to the scrollbars. Repeats while showing or hiding a
    /// scrollbar changes the viewport's size.
    fn refresh(&mut self, tree: &mut Tree, id: WidgetId) {
        for _ in 0..MAX_REFRESH_PASSES {
            let view = tree.rect(id).size();
            self.clamp(view);

            if let Some((window, x, y)) = self.window {
                tree.move_embedded(window, x - self.origin_x, y - self.origin_y);
            }
            for (axis, scrollbar) in [
                (Axis::Horizontal, self.x_scrollbar),
                (Axis::Vertical, self.y_scrollbar),
            ] {
                if let Some(scrollbar) = scrollbar {
                    let (lo, hi) = self.fractions(axis, view);
                    if let Err(err) = AutoHideScrollbar::set(tree, scrollbar, lo, hi) {
                        log::warn!("viewport #{}: {}", id.as_u64(), err);
                    }
                }
            }

            if tree.rect(id).size() == view {
                return;
            }
        }
        log::debug!("viewport #{}: size still settling after refresh", id.as_u64());
    }

    fn with_viewport<R>(
        tree: &mut Tree,
        id: WidgetId,
        f: impl FnOnce(&mut Viewport, &mut Tree) -> R,
    ) -> Result<R> {
        tree.with_widget_as::<Viewport, _>(id, f)
            .ok_or(FrameError::UnknownWidget(id))
    }

    /// Attach `scrollbar` as the viewport's scrollbar for `axis`.
    pub fn connect(tree: &mut Tree, id: WidgetId, axis: Axis, scrollbar: WidgetId) -> Result<()> {
        Self::with_viewport(tree, id, |viewport, tree| {
            match axis {
                Axis::Horizontal => viewport.x_scrollbar = Some(scrollbar),
                Axis::Vertical => viewport.y_scrollbar = Some(scrollbar),
            }
            viewport.refresh(tree, id);
        })
    }

    /// Show `window` (a child of the viewport) at region coordinates `(x, y)`.
    pub fn set_window(tree: &mut Tree, id: WidgetId, window: WidgetId, x: i32, y: i32) -> Result<()> {
        tree.embed(window, x, y)?;
        Self::with_viewport(tree, id, |viewport, tree| {
            viewport.window = Some((window, x, y));
            viewport.refresh(tree, id);
        })
    }

    pub fn set_scroll_region(tree: &mut Tree, id: WidgetId, region: Rect) -> Result<()> {
        Self::with_viewport(tree, id, |viewport, tree| {
            if viewport.scroll_region != region {
                log::debug!(
                    "viewport #{}: scroll region {}x{} at ({}, {})",
                    id.as_u64(),
                    region.width,
                    region.height,
                    region.x,
                    region.y
                );
            }
            viewport.scroll_region = region;
            viewport.refresh(tree, id);
        })
    }

    /// Scroll by `units` increments along `axis`; positive moves the view
    /// towards the end of the region.
    pub fn scroll(tree: &mut Tree, id: WidgetId, axis: Axis, units: i32) -> Result<()> {
        Self::with_viewport(tree, id, |viewport, tree| {
            let view = tree.rect(id).size();
            let step = units.saturating_mul(Self::scroll_increment(axis, view));
            match axis {
                Axis::Horizontal => viewport.origin_x = viewport.origin_x.saturating_add(step),
                Axis::Vertical => viewport.origin_y = viewport.origin_y.saturating_add(step),
            }
            viewport.refresh(tree, id);
        })
    }
}

impl Widget for Viewport {
    fn name(&self) -> &'static str {
        "canvas"
    }

    fn event(&mut self, tree: &mut Tree, id: WidgetId, event: &Event) -> EventResponse {
        match event {
            Event::Configure { .. } => {
                self.refresh(tree, id);
                EventResponse::Handled
            }
            _ => EventResponse::Ignored,
        }
    }

    super::impl_as_any!();
}
