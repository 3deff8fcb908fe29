use framekit::prelude::*;

const ROW_HEIGHT: i32 = 30;

struct Fixture {
    tree: Tree,
    root: WidgetId,
    frame: ScrollableContainer,
}

fn fixture(config: ScrollConfig) -> Fixture {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut tree = Tree::new();
    let root = tree.create_root(Box::new(Frame::default()));
    tree.resize(root, 300, 200);
    let frame = ScrollableContainer::new(&mut tree, root, None, config).unwrap();
    frame
        .pack(&mut tree, PackOptions::new().expand(true).fill(Fill::Both))
        .unwrap();
    Fixture { tree, root, frame }
}

impl Fixture {
    fn add_row(&mut self, width: i32) -> WidgetId {
        let row = self.tree.create(self.frame.id(), Box::new(Label::new("row")));
        self.tree.set_requested_size(row, Size::new(width, ROW_HEIGHT));
        self.tree.pack(row, PackOptions::new().side(Side::Top)).unwrap();
        row
    }

    fn parts(&self) -> ScrollParts {
        self.frame.parts().unwrap()
    }

    fn origin(&self) -> (i32, i32) {
        self.tree
            .widget_as::<Viewport>(self.parts().viewport)
            .unwrap()
            .origin()
    }

    fn wheel(&mut self, target: WidgetId, delta: i32, shift: bool) -> EventResponse {
        let modifiers = if shift { Modifiers::SHIFT } else { Modifiers::NONE };
        self.tree.dispatch(target, &Event::MouseWheel { delta, modifiers })
    }
}

#[test]
fn test_scrollbars_follow_content() {
    let mut fx = fixture(ScrollConfig::default());
    for _ in 0..5 {
        fx.add_row(100);
    }
    let parts = fx.parts();
    assert!(!fx.tree.is_mapped(parts.vertical_scrollbar));

    let extra: Vec<WidgetId> = (0..10).map(|_| fx.add_row(100)).collect();
    assert!(fx.tree.is_mapped(parts.vertical_scrollbar));
    assert!(!fx.tree.is_mapped(parts.horizontal_scrollbar));
    let vertical = fx
        .tree
        .widget_as::<AutoHideScrollbar>(parts.vertical_scrollbar)
        .unwrap();
    assert!(vertical.active());
    assert_eq!(vertical.visible_range().0, 0.0);

    for row in extra {
        fx.tree.destroy(row);
    }
    assert!(!fx.tree.is_mapped(parts.vertical_scrollbar));
    assert_eq!(fx.tree.rect(parts.viewport).size(), Size::new(300, 200));
    assert_eq!(
        fx.frame.scroll_region(&fx.tree),
        Some(Rect::new(0, 0, 100, 5 * ROW_HEIGHT))
    );
}

#[test]
fn test_shift_wheel_scrolls_horizontally() {
    let mut fx = fixture(ScrollConfig::default());
    let row = fx.add_row(600);
    let parts = fx.parts();
    assert!(fx.tree.is_mapped(parts.horizontal_scrollbar));
    assert!(!fx.tree.is_mapped(parts.vertical_scrollbar));

    // Nothing to scroll vertically.
    assert_eq!(fx.wheel(row, -WHEEL_NOTCH, false), EventResponse::Ignored);
    assert_eq!(fx.origin(), (0, 0));

    assert_eq!(fx.wheel(row, -WHEEL_NOTCH, true), EventResponse::Handled);
    assert_eq!(fx.origin(), (30, 0));
    assert_eq!(fx.tree.rect(fx.frame.id()).x, -30);

    let down = Event::Button {
        number: 5,
        modifiers: Modifiers::SHIFT,
    };
    assert_eq!(fx.tree.dispatch(parts.viewport, &down), EventResponse::Handled);
    assert_eq!(fx.origin(), (60, 0));

    let up = Event::Button {
        number: 4,
        modifiers: Modifiers::SHIFT,
    };
    assert_eq!(fx.tree.dispatch(row, &up), EventResponse::Handled);
    assert_eq!(fx.origin(), (30, 0));
}

#[test]
fn test_scrolling_clamps_to_region() {
    let mut fx = fixture(ScrollConfig::default());
    let rows: Vec<WidgetId> = (0..20).map(|_| fx.add_row(100)).collect();
    let last = rows[rows.len() - 1];

    assert_eq!(fx.wheel(last, -100 * WHEEL_NOTCH, false), EventResponse::Handled);
    // 600 high content in a 200 high viewport
    assert_eq!(fx.origin(), (0, 400));
    assert_eq!(fx.tree.rect(fx.frame.id()).y, -400);
    let parts = fx.parts();
    let vertical = fx
        .tree
        .widget_as::<AutoHideScrollbar>(parts.vertical_scrollbar)
        .unwrap();
    assert_eq!(vertical.visible_range(), (400.0 / 600.0, 1.0));
    assert!(vertical.active());

    assert_eq!(fx.wheel(last, 100 * WHEEL_NOTCH, false), EventResponse::Handled);
    assert_eq!(fx.origin(), (0, 0));
}

#[test]
fn test_extreme_wheel_deltas_saturate() {
    let mut fx = fixture(ScrollConfig::default());
    let rows: Vec<WidgetId> = (0..20).map(|_| fx.add_row(100)).collect();

    assert_eq!(fx.wheel(rows[0], i32::MIN, false), EventResponse::Handled);
    assert_eq!(fx.origin(), (0, 400));
    assert_eq!(fx.wheel(rows[0], i32::MAX, false), EventResponse::Handled);
    assert_eq!(fx.origin(), (0, 0));

    let mut fx = fixture(ScrollConfig::new().wheel_notch(1));
    let rows: Vec<WidgetId> = (0..20).map(|_| fx.add_row(100)).collect();
    assert_eq!(fx.wheel(rows[0], i32::MIN, false), EventResponse::Handled);
    assert_eq!(fx.origin(), (0, 400));
}

#[test]
fn test_custom_wheel_notch() {
    let mut fx = fixture(ScrollConfig::new().wheel_notch(1));
    let rows: Vec<WidgetId> = (0..20).map(|_| fx.add_row(100)).collect();

    assert_eq!(fx.wheel(rows[0], -3, false), EventResponse::Handled);
    assert_eq!(fx.origin(), (0, 60));
}

#[test]
fn test_new_rows_are_wheel_bound() {
    let mut fx = fixture(ScrollConfig::default());
    let row = fx.add_row(100);
    for mask in EventMask::wheel_bindings() {
        assert!(fx.tree.is_bound(row, mask), "{mask:?}");
    }
    assert!(fx.tree.is_bound(fx.parts().viewport, EventMask::MOUSE_WHEEL));
    assert!(!fx.tree.is_bound(fx.root, EventMask::MOUSE_WHEEL));
}

#[test]
fn test_viewport_tracks_capped_content_size() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut tree = Tree::new();
    let root = tree.create_root(Box::new(Frame::default()));
    tree.resize(root, 800, 600);
    let config = ScrollConfig::new().max_width(500).max_height(150);
    let frame = ScrollableContainer::new(&mut tree, root, None, config).unwrap();
    frame.pack(&mut tree, PackOptions::new()).unwrap();

    for _ in 0..20 {
        let row = tree.create(frame.id(), Box::new(Label::new("wide")));
        tree.set_requested_size(row, Size::new(364, ROW_HEIGHT));
        tree.pack(row, PackOptions::new().side(Side::Top)).unwrap();
    }

    let parts = frame.parts().unwrap();
    assert_eq!(frame.viewport_request(&tree), Some(Size::new(364, 150)));
    assert_eq!(tree.rect(parts.viewport).size(), Size::new(364, 150));
    assert!(tree.is_mapped(parts.vertical_scrollbar));
    assert!(!tree.is_mapped(parts.horizontal_scrollbar));
}

#[test]
fn test_disabled_scroll_never_builds_helpers() {
    let mut fx = fixture(ScrollConfig::new().scroll(false));
    let row = fx.add_row(1000);

    assert!(fx.frame.parts().is_none());
    assert_eq!(fx.tree.get_parent(fx.frame.id()), Some(fx.root));
    for id in fx.tree.descendants(fx.root) {
        assert!(fx.tree.bindings(id).is_empty());
        assert_ne!(fx.tree.widget_name(id), "scrollbar");
        assert_ne!(fx.tree.widget_name(id), "canvas");
    }
    assert_eq!(fx.wheel(row, -WHEEL_NOTCH, false), EventResponse::Ignored);
}
