//! Aspect-ratio container: keeps its content at a fixed width/height ratio
//! inside whatever space the caller gives it, letterboxing the rest.

use crate::error::{FrameError, Result};
use crate::event::{Event, EventMask, EventResponse};
use crate::layout::{Anchor, Fill, PackOptions, PlaceOptions, Rect, Size};
use crate::scope::ScopeStack;
use crate::tree::{Tree, WidgetId};

use super::nesting::{resolve_parent, Container, FrameConfig, NestingContainer};
use super::widget::{Frame, Widget};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AspectConfig {
    /// Width / height to keep; unset means the content simply fills
    pub aspect_ratio: Option<f64>,
    pub anchor: Anchor,
    pub frame: FrameConfig,
}

impl AspectConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn aspect_ratio(mut self, ratio: f64) -> Self {
        self.aspect_ratio = Some(ratio);
        self
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn frame(mut self, frame: FrameConfig) -> Self {
        self.frame = frame;
        self
    }
}

/// The ratio to lay out with. Zero, negative and non-finite ratios count
/// as unset.
fn usable_ratio(ratio: Option<f64>) -> Option<f64> {
    ratio.filter(|ratio| ratio.is_finite() && *ratio > 0.0)
}

/// Largest size with the given ratio that fits in `width` x `height`.
/// Without a usable ratio the outer size is returned unchanged.
pub fn desired_size(ratio: Option<f64>, width: i32, height: i32) -> Size {
    let Some(ratio) = usable_ratio(ratio) else {
        return Size::new(width, height);
    };
    // A zero height gives an infinite or NaN ratio; both end in a 0 x 0 box.
    let outer = width as f64 / height as f64;
    if outer > ratio {
        Size::new((height as f64 * ratio).floor() as i32, height)
    } else {
        Size::new(width, (width as f64 / ratio).floor() as i32)
    }
}

/// Where the content goes inside an `outer` box: the anchor point of the
/// content lands on the same anchor point of the box.
pub fn content_rect(ratio: Option<f64>, anchor: Anchor, outer: Size) -> Rect {
    let size = desired_size(ratio, outer.width, outer.height);
    let (x, y) = anchor.point_in(outer.width, outer.height);
    anchor.rect_at(x, y, size)
}

/// The outer frame. Owns the ratio and anchor and re-places the content
/// each time it is resized.
struct AspectBase {
    content: WidgetId,
    aspect_ratio: Option<f64>,
    anchor: Anchor,
}

impl AspectBase {
    fn place_content(&self, tree: &mut Tree, outer: Size) -> Result<()> {
        let size = desired_size(self.aspect_ratio, outer.width, outer.height);
        let (x, y) = self.anchor.point_in(outer.width, outer.height);
        log::debug!(
            "aspect frame #{}: {}x{} in {}x{} at {}",
            self.content.as_u64(),
            size.width,
            size.height,
            outer.width,
            outer.height,
            self.anchor
        );
        tree.place(
            self.content,
            PlaceOptions::at(x, y)
                .anchor(self.anchor)
                .size(size.width, size.height),
        )
    }

    /// Bind the resize handler when a usable ratio is set; otherwise let
    /// the content fill the frame. Either way the content is laid out again.
    fn apply(&self, tree: &mut Tree, id: WidgetId) -> Result<()> {
        match usable_ratio(self.aspect_ratio) {
            Some(_) => {
                tree.bind(id, EventMask::CONFIGURE, id);
                let outer = tree.rect(id).size();
                self.place_content(tree, outer)
            }
            None => {
                tree.unbind(id, EventMask::CONFIGURE);
                tree.pack(
                    self.content,
                    PackOptions::new().expand(true).fill(Fill::Both),
                )
            }
        }
    }
}

impl Widget for AspectBase {
    fn name(&self) -> &'static str {
        "frame"
    }

    fn event(&mut self, tree: &mut Tree, id: WidgetId, event: &Event) -> EventResponse {
        let Event::Configure { width, height } = *event else {
            return EventResponse::Ignored;
        };
        if let Err(err) = self.place_content(tree, Size::new(width, height)) {
            log::warn!("aspect frame #{}: {}", id.as_u64(), err);
            return EventResponse::Ignored;
        }
        EventResponse::Handled
    }

    super::impl_as_any!();
}

pub struct AspectRatioContainer {
    nesting: NestingContainer,
    base: WidgetId,
}

impl AspectRatioContainer {
    pub fn new(
        tree: &mut Tree,
        parent: WidgetId,
        scopes: Option<&ScopeStack>,
        config: AspectConfig,
    ) -> Result<Self> {
        let parent = resolve_parent(tree, parent, scopes)?;

        // The content id is only known once it exists under the base.
        let base = tree.create(
            parent,
            Box::new(AspectBase {
                content: parent,
                aspect_ratio: None,
                anchor: config.anchor,
            }),
        );
        let nesting =
            NestingContainer::attach(tree, base, parent, scopes, Box::new(config.frame.frame()));
        config.frame.apply_size(tree, nesting.id());

        let content = nesting.id();
        let container = Self { nesting, base };
        container.update_base(tree, |base| {
            base.content = content;
            base.aspect_ratio = config.aspect_ratio;
        })?;
        Ok(container)
    }

    fn update_base(&self, tree: &mut Tree, change: impl FnOnce(&mut AspectBase)) -> Result<()> {
        let id = self.base;
        tree.with_widget_as::<AspectBase, _>(id, |base, tree| {
            change(base);
            base.apply(tree, id)
        })
        .ok_or(FrameError::UnknownWidget(id))?
    }

    /// The frame the caller positions; the content lives inside it.
    pub fn base(&self) -> WidgetId {
        self.base
    }

    pub fn aspect_ratio(&self, tree: &Tree) -> Option<f64> {
        tree.widget_as::<AspectBase>(self.base)
            .and_then(|base| base.aspect_ratio)
    }

    pub fn anchor(&self, tree: &Tree) -> Anchor {
        tree.widget_as::<AspectBase>(self.base)
            .map(|base| base.anchor)
            .unwrap_or_default()
    }

    /// Change the ratio and lay the content out again. `None`, or a ratio
    /// that is not a positive finite number, turns the container into a
    /// plain filling frame.
    pub fn set_aspect_ratio(&self, tree: &mut Tree, ratio: Option<f64>) -> Result<()> {
        self.update_base(tree, |base| base.aspect_ratio = ratio)
    }

    /// Change the anchor, given as an [`Anchor`] or its name (`"n"`,
    /// `"se"`, `"center"`, ...). An unknown name leaves everything as is.
    pub fn set_anchor<A>(&self, tree: &mut Tree, anchor: A) -> Result<()>
    where
        A: TryInto<Anchor>,
        FrameError: From<A::Error>,
    {
        let anchor = anchor.try_into()?;
        self.update_base(tree, |base| base.anchor = anchor)
    }

    /// Background and border of the content frame.
    pub fn content_frame<'a>(&self, tree: &'a Tree) -> Option<&'a Frame> {
        tree.widget_as::<Frame>(self.nesting.id())
    }
}

impl Container for AspectRatioContainer {
    fn nesting(&self) -> &NestingContainer {
        &self.nesting
    }

    fn outer(&self) -> WidgetId {
        self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Placement;

    fn setup(width: i32, height: i32, config: AspectConfig) -> (Tree, AspectRatioContainer) {
        let mut tree = Tree::new();
        let root = tree.create_root(Box::new(Frame::default()));
        tree.resize(root, width, height);
        let frame = AspectRatioContainer::new(&mut tree, root, None, config).unwrap();
        frame
            .pack(&mut tree, PackOptions::new().expand(true).fill(Fill::Both))
            .unwrap();
        (tree, frame)
    }

    #[test]
    fn test_desired_size_wide_outer() {
        assert_eq!(desired_size(Some(2.0), 600, 400), Size::new(600, 300));
        assert_eq!(desired_size(Some(2.0), 400, 400), Size::new(400, 200));
        assert_eq!(desired_size(Some(1.0), 900, 300), Size::new(300, 300));
    }

    #[test]
    fn test_desired_size_without_ratio_is_identity() {
        assert_eq!(desired_size(None, 640, 480), Size::new(640, 480));
    }

    #[test]
    fn test_desired_size_floors() {
        assert_eq!(desired_size(Some(1.5), 100, 100), Size::new(100, 66));
        assert_eq!(desired_size(Some(0.3), 100, 100), Size::new(30, 100));
    }

    #[test]
    fn test_desired_size_ignores_unusable_ratio() {
        assert_eq!(desired_size(Some(0.0), 600, 400), Size::new(600, 400));
        assert_eq!(desired_size(Some(-2.0), 600, 400), Size::new(600, 400));
        assert_eq!(desired_size(Some(f64::NAN), 600, 400), Size::new(600, 400));
        assert_eq!(desired_size(Some(f64::INFINITY), 600, 400), Size::new(600, 400));
    }

    #[test]
    fn test_desired_size_degenerate_outer() {
        assert_eq!(desired_size(Some(2.0), 0, 0), Size::new(0, 0));
        assert_eq!(desired_size(Some(2.0), 50, 0), Size::new(0, 0));
    }

    #[test]
    fn test_content_rect_by_anchor() {
        let outer = Size::new(600, 400);
        assert_eq!(
            content_rect(Some(2.0), Anchor::Center, outer),
            Rect::new(0, 50, 600, 300)
        );
        assert_eq!(
            content_rect(Some(2.0), Anchor::NW, outer),
            Rect::new(0, 0, 600, 300)
        );
        assert_eq!(
            content_rect(Some(2.0), Anchor::SE, outer),
            Rect::new(0, 100, 600, 300)
        );
        assert_eq!(
            content_rect(Some(1.0), Anchor::E, outer),
            Rect::new(200, 0, 400, 400)
        );
    }

    #[test]
    fn test_resize_letterboxes_content() {
        let config = AspectConfig::new().aspect_ratio(2.0);
        let (mut tree, frame) = setup(600, 400, config);
        assert_eq!(tree.rect(frame.id()), Rect::new(0, 50, 600, 300));

        let root = frame.parent();
        tree.resize(root, 400, 400);
        assert_eq!(tree.rect(frame.id()), Rect::new(0, 100, 400, 200));
    }

    #[test]
    fn test_anchor_change_moves_content() {
        let config = AspectConfig::new().aspect_ratio(1.0).anchor(Anchor::SE);
        let (mut tree, frame) = setup(600, 400, config);
        assert_eq!(tree.rect(frame.id()), Rect::new(200, 0, 400, 400));

        frame.set_anchor(&mut tree, "w").unwrap();
        assert_eq!(frame.anchor(&tree), Anchor::W);
        assert_eq!(tree.rect(frame.id()), Rect::new(0, 0, 400, 400));

        frame.set_anchor(&mut tree, Anchor::Center).unwrap();
        assert_eq!(tree.rect(frame.id()), Rect::new(100, 0, 400, 400));
    }

    #[test]
    fn test_invalid_anchor_leaves_state_unchanged() {
        let config = AspectConfig::new().aspect_ratio(2.0).anchor(Anchor::NW);
        let (mut tree, frame) = setup(600, 400, config);
        let before = tree.rect(frame.id());

        let err = frame.set_anchor(&mut tree, "middle").unwrap_err();
        assert_eq!(err, FrameError::InvalidAnchor("middle".into()));
        assert_eq!(frame.anchor(&tree), Anchor::NW);
        assert_eq!(tree.rect(frame.id()), before);
    }

    #[test]
    fn test_no_ratio_fills_without_handler() {
        let (mut tree, frame) = setup(600, 400, AspectConfig::default());

        assert!(!tree.is_bound(frame.base(), EventMask::CONFIGURE));
        assert!(matches!(tree.placement(frame.id()), Some(Placement::Pack(_))));
        assert_eq!(tree.rect(frame.id()), Rect::new(0, 0, 600, 400));

        frame.set_aspect_ratio(&mut tree, Some(3.0)).unwrap();
        assert!(tree.is_bound(frame.base(), EventMask::CONFIGURE));
        assert_eq!(frame.aspect_ratio(&tree), Some(3.0));
        assert_eq!(tree.rect(frame.id()), Rect::new(0, 100, 600, 200));

        frame.set_aspect_ratio(&mut tree, None).unwrap();
        assert!(!tree.is_bound(frame.base(), EventMask::CONFIGURE));
        assert_eq!(tree.rect(frame.id()), Rect::new(0, 0, 600, 400));
    }

    #[test]
    fn test_unusable_ratio_fills() {
        let config = AspectConfig::new().aspect_ratio(-2.0);
        let (mut tree, frame) = setup(600, 400, config);
        assert!(!tree.is_bound(frame.base(), EventMask::CONFIGURE));
        assert!(matches!(tree.placement(frame.id()), Some(Placement::Pack(_))));
        assert_eq!(tree.rect(frame.id()), Rect::new(0, 0, 600, 400));

        frame.set_aspect_ratio(&mut tree, Some(2.0)).unwrap();
        assert_eq!(tree.rect(frame.id()), Rect::new(0, 50, 600, 300));

        frame.set_aspect_ratio(&mut tree, Some(0.0)).unwrap();
        assert!(!tree.is_bound(frame.base(), EventMask::CONFIGURE));
        assert_eq!(tree.rect(frame.id()), Rect::new(0, 0, 600, 400));
    }

    #[test]
    fn test_scoped_aspect_frame_nests_content() {
        let mut tree = Tree::new();
        let root = tree.create_root(Box::new(Frame::default()));
        let scopes = ScopeStack::new();
        let frame = AspectRatioContainer::new(&mut tree, root, Some(&scopes), AspectConfig::default())
            .unwrap();

        assert_eq!(tree.get_parent(frame.base()), Some(root));
        assert_eq!(tree.get_parent(frame.id()), Some(frame.base()));
        assert_eq!(scopes.current(), Some(frame.id()));
        assert!(frame.content_frame(&tree).is_some());
    }
}
