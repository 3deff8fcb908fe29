pub mod error;
pub mod event;
pub mod layout;
pub mod scope;
pub mod tree;
pub mod widgets;

pub use error::{FrameError, Result};

pub mod prelude {
    pub use crate::error::{FrameError, Result};
    pub use crate::event::{Event, EventMask, EventResponse, Modifiers, WHEEL_NOTCH};
    pub use crate::layout::{
        Anchor, Axis, Fill, GridOptions, PackOptions, PlaceOptions, Placement, PlacementKind,
        Rect, Side, Size, Sticky,
    };
    pub use crate::scope::ScopeStack;
    pub use crate::tree::{Tree, WidgetId};
    pub use crate::widgets::{
        AspectConfig, AspectRatioContainer, AutoHideScrollbar, Color, Container, FrameConfig,
        Frame, Label, NestingContainer, ScrollConfig, ScrollParts, ScrollableContainer, Viewport,
        Widget,
    };
}
