use std::any::Any;

use crate::event::{Event, EventResponse};
use crate::layout::PlacementKind;
use crate::tree::{Tree, WidgetId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

pub trait Widget: Any {
    /// Short widget class name, used in errors and logs.
    fn name(&self) -> &'static str;

    /// Whether this widget may be managed with the given placement.
    fn supports(&self, placement: PlacementKind) -> bool {
        let _ = placement;
        true
    }

    /// Handle an event routed here by a binding. `id` is this widget's id.
    fn event(&mut self, tree: &mut Tree, id: WidgetId, event: &Event) -> EventResponse {
        let _ = (tree, id, event);
        EventResponse::Ignored
    }

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Plain rectangular frame.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub background: Option<Color>,
    pub border_width: i32,
}

impl Widget for Frame {
    fn name(&self) -> &'static str {
        "frame"
    }

    super::impl_as_any!();
}

/// Static text. Its natural size is the caller's requested size.
#[derive(Debug, Clone, Default)]
pub struct Label {
    pub text: String,
    pub background: Option<Color>,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            background: None,
        }
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }
}

impl Widget for Label {
    fn name(&self) -> &'static str {
        "label"
    }

    super::impl_as_any!();
}
