pub mod aspect_ratio;
pub mod nesting;
pub mod scroll;
pub mod scrollable;
pub mod widget;

/// Implements the `Any` accessors every widget needs for typed access
/// through the tree.
macro_rules! impl_as_any {
    () => {
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
    };
}
pub(crate) use impl_as_any;

pub use aspect_ratio::{AspectConfig, AspectRatioContainer};
pub use nesting::{Container, FrameConfig, NestingContainer};
pub use scroll::{AutoHideScrollbar, Viewport};
pub use scrollable::{ScrollConfig, ScrollParts, ScrollableContainer};
pub use widget::{Color, Frame, Label, Widget};
