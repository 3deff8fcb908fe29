//! Scroll frame: a nesting container shown through a viewport with
//! scrollbars that only appear when the content does not fit.
//!
//! Layout of the helper widgets inside the base frame:
//!
//! ```text
//! +----------------+---+
//! |    viewport    | v |   row 0, weight 1
//! +----------------+---+
//! |   horizontal   |       row 1
//! +----------------+
//!   column 0, weight 1
//! ```
//!
//! Children are created in the content frame, which is a window item of
//! the viewport. The caller positions the base frame.

use crate::error::Result;
use crate::event::{Event, EventMask, EventResponse, WHEEL_NOTCH};
use crate::layout::{Axis, GridOptions, Rect, Size, Sticky};
use crate::scope::ScopeStack;
use crate::tree::{Tree, WidgetId};

use super::nesting::{resolve_parent, Container, FrameConfig, NestingContainer};
use super::scroll::{AutoHideScrollbar, Viewport, DEFAULT_SCROLLBAR_THICKNESS};
use super::widget::{Frame, Widget};

#[derive(Debug, Clone, PartialEq)]
pub struct ScrollConfig {
    /// Upper bound for the viewport's requested width
    pub max_width: Option<i32>,
    /// Upper bound for the viewport's requested height
    pub max_height: Option<i32>,
    /// When false the container is a plain nesting frame
    pub scroll: bool,
    /// Wheel delta of one notch
    pub wheel_notch: i32,
    pub scrollbar_thickness: i32,
    pub frame: FrameConfig,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            max_width: None,
            max_height: None,
            scroll: true,
            wheel_notch: WHEEL_NOTCH,
            scrollbar_thickness: DEFAULT_SCROLLBAR_THICKNESS,
            frame: FrameConfig::default(),
        }
    }
}

impl ScrollConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_width(mut self, width: i32) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn max_height(mut self, height: i32) -> Self {
        self.max_height = Some(height);
        self
    }

    pub fn scroll(mut self, scroll: bool) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn wheel_notch(mut self, notch: i32) -> Self {
        self.wheel_notch = notch;
        self
    }

    pub fn scrollbar_thickness(mut self, thickness: i32) -> Self {
        self.scrollbar_thickness = thickness;
        self
    }

    pub fn frame(mut self, frame: FrameConfig) -> Self {
        self.frame = frame;
        self
    }
}

/// The helper widgets of an enabled scroll frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollParts {
    pub base: WidgetId,
    pub viewport: WidgetId,
    pub horizontal_scrollbar: WidgetId,
    pub vertical_scrollbar: WidgetId,
}

/// The content frame. Reacts to its own size changes and to wheel events
/// anywhere inside the viewport.
struct ScrollContent {
    frame: Frame,
    parts: ScrollParts,
    max_width: Option<i32>,
    max_height: Option<i32>,
    wheel_notch: i32,
}

impl ScrollContent {
    fn clamp_to(natural: i32, max: Option<i32>) -> i32 {
        max.map_or(natural, |max| natural.min(max))
    }

    /// Recompute the scroll region from the content's extent, resize the
    /// viewport towards the content's natural size and rebind the wheel.
    fn reset_scroll_region(&self, tree: &mut Tree, id: WidgetId) {
        let viewport = self.parts.viewport;
        let (origin_x, origin_y) = tree
            .widget_as::<Viewport>(viewport)
            .map(|v| v.origin())
            .unwrap_or_default();
        let region = tree.bbox(id).offset(origin_x, origin_y);
        if let Err(err) = Viewport::set_scroll_region(tree, viewport, region) {
            log::warn!("scroll frame #{}: {}", id.as_u64(), err);
            return;
        }

        let natural = tree.natural_size(id);
        let current = tree.rect(viewport).size();
        let mut request = tree.requested_size(viewport);
        if natural.width != current.width {
            request.width = Self::clamp_to(natural.width, self.max_width);
        }
        if natural.height != current.height {
            request.height = Self::clamp_to(natural.height, self.max_height);
        }
        if request != tree.requested_size(viewport) {
            log::debug!(
                "scroll frame #{}: content {}x{}, viewport request {}x{}",
                id.as_u64(),
                natural.width,
                natural.height,
                request.width,
                request.height
            );
            tree.set_requested_size(viewport, request);
        }

        self.bind_wheel(tree, id);
    }

    /// Route wheel events on the viewport and everything inside it here.
    /// Widgets added since the last pass pick the binding up now.
    fn bind_wheel(&self, tree: &mut Tree, id: WidgetId) {
        let viewport = self.parts.viewport;
        let mut targets = vec![viewport];
        targets.extend(tree.descendants(viewport));
        for target in targets {
            for mask in EventMask::wheel_bindings() {
                tree.bind(target, mask, id);
            }
        }
    }

    fn on_wheel(&self, tree: &mut Tree, event: &Event) -> EventResponse {
        let (axis, scrollbar) = if event.modifiers().shift {
            (Axis::Horizontal, self.parts.horizontal_scrollbar)
        } else {
            (Axis::Vertical, self.parts.vertical_scrollbar)
        };
        let active = tree
            .widget_as::<AutoHideScrollbar>(scrollbar)
            .map(|s| s.active())
            .unwrap_or(false);
        if !active {
            return EventResponse::Ignored;
        }
        let Some(units) = event.wheel_units(self.wheel_notch) else {
            return EventResponse::Ignored;
        };

        log::trace!("scroll frame: {:?} wheel, {} unit(s)", axis, units);
        match Viewport::scroll(tree, self.parts.viewport, axis, units) {
            Ok(()) => EventResponse::Handled,
            Err(err) => {
                log::warn!("scroll frame: {}", err);
                EventResponse::Ignored
            }
        }
    }
}

impl Widget for ScrollContent {
    fn name(&self) -> &'static str {
        "frame"
    }

    fn event(&mut self, tree: &mut Tree, id: WidgetId, event: &Event) -> EventResponse {
        match event {
            Event::Configure { .. } => {
                self.reset_scroll_region(tree, id);
                EventResponse::Handled
            }
            Event::MouseWheel { .. } | Event::Button { .. } => self.on_wheel(tree, event),
        }
    }

    super::impl_as_any!();
}

pub struct ScrollableContainer {
    nesting: NestingContainer,
    parts: Option<ScrollParts>,
}

impl ScrollableContainer {
    pub fn new(
        tree: &mut Tree,
        parent: WidgetId,
        scopes: Option<&ScopeStack>,
        config: ScrollConfig,
    ) -> Result<Self> {
        let parent = resolve_parent(tree, parent, scopes)?;

        if !config.scroll {
            let nesting =
                NestingContainer::attach(tree, parent, parent, scopes, Box::new(config.frame.frame()));
            config.frame.apply_size(tree, nesting.id());
            return Ok(Self {
                nesting,
                parts: None,
            });
        }

        let base = tree.create(parent, Box::new(Frame::default()));

        let vertical = AutoHideScrollbar::with_thickness(Axis::Vertical, config.scrollbar_thickness);
        let vertical_size = vertical.natural_size();
        let vertical_scrollbar = tree.create(base, Box::new(vertical));
        tree.set_requested_size(vertical_scrollbar, vertical_size);
        tree.grid(vertical_scrollbar, GridOptions::cell(0, 1).sticky(Sticky::NS))?;

        let horizontal =
            AutoHideScrollbar::with_thickness(Axis::Horizontal, config.scrollbar_thickness);
        let horizontal_size = horizontal.natural_size();
        let horizontal_scrollbar = tree.create(base, Box::new(horizontal));
        tree.set_requested_size(horizontal_scrollbar, horizontal_size);
        tree.grid(horizontal_scrollbar, GridOptions::cell(1, 0).sticky(Sticky::EW))?;

        let viewport = Viewport::create(tree, base);
        tree.grid(viewport, GridOptions::cell(0, 0).sticky(Sticky::NSEW))?;
        tree.grid_weight(base, Axis::Vertical, 0, 1);
        tree.grid_weight(base, Axis::Horizontal, 0, 1);
        Viewport::connect(tree, viewport, Axis::Horizontal, horizontal_scrollbar)?;
        Viewport::connect(tree, viewport, Axis::Vertical, vertical_scrollbar)?;

        let parts = ScrollParts {
            base,
            viewport,
            horizontal_scrollbar,
            vertical_scrollbar,
        };
        let content = ScrollContent {
            frame: config.frame.frame(),
            parts,
            max_width: config.max_width,
            max_height: config.max_height,
            wheel_notch: config.wheel_notch,
        };
        let nesting = NestingContainer::attach(tree, viewport, parent, scopes, Box::new(content));
        let id = nesting.id();
        tree.bind(id, EventMask::CONFIGURE, id);
        Viewport::set_window(tree, viewport, id, 0, 0)?;
        config.frame.apply_size(tree, id);

        log::debug!(
            "scroll frame #{} in #{} (viewport #{})",
            id.as_u64(),
            parent.as_u64(),
            viewport.as_u64()
        );

        let container = Self {
            nesting,
            parts: Some(parts),
        };
        container.update(tree);
        Ok(container)
    }

    /// Recompute the scroll region and viewport size now, instead of
    /// waiting for the content to change size. Also binds the wheel on
    /// widgets added since the last recomputation.
    pub fn update(&self, tree: &mut Tree) {
        if self.parts.is_none() {
            return;
        }
        let id = self.nesting.id();
        tree.with_widget_as::<ScrollContent, _>(id, |content, tree| {
            content.reset_scroll_region(tree, id)
        });
    }

    /// False when built with scrolling disabled.
    pub fn is_scrollable(&self) -> bool {
        self.parts.is_some()
    }

    pub fn parts(&self) -> Option<ScrollParts> {
        self.parts
    }

    pub fn base(&self) -> Option<WidgetId> {
        self.parts.map(|p| p.base)
    }

    pub fn viewport(&self) -> Option<WidgetId> {
        self.parts.map(|p| p.viewport)
    }

    pub fn horizontal_scrollbar(&self) -> Option<WidgetId> {
        self.parts.map(|p| p.horizontal_scrollbar)
    }

    pub fn vertical_scrollbar(&self) -> Option<WidgetId> {
        self.parts.map(|p| p.vertical_scrollbar)
    }

    /// The scroll region currently shown by the viewport.
    pub fn scroll_region(&self, tree: &Tree) -> Option<Rect> {
        let viewport = self.viewport()?;
        tree.widget_as::<Viewport>(viewport).map(|v| v.scroll_region())
    }

    /// Background and border of the content frame.
    pub fn content_frame<'a>(&self, tree: &'a Tree) -> Option<&'a Frame> {
        let id = self.nesting.id();
        match self.parts {
            Some(_) => tree.widget_as::<ScrollContent>(id).map(|c| &c.frame),
            None => tree.widget_as::<Frame>(id),
        }
    }

    /// Requested size of the viewport, which follows the content.
    pub fn viewport_request(&self, tree: &Tree) -> Option<Size> {
        self.viewport().map(|v| tree.requested_size(v))
    }
}

impl Container for ScrollableContainer {
    fn nesting(&self) -> &NestingContainer {
        &self.nesting
    }

    fn outer(&self) -> WidgetId {
        self.base().unwrap_or_else(|| self.nesting.id())
    }
}
