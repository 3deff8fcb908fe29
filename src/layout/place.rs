//! Place geometry manager and the nine-point [`Anchor`].

use std::fmt;
use std::str::FromStr;

use super::{natural_size, Placement, Rect, Size};
use crate::error::FrameError;
use crate::tree::{Tree, WidgetId};

/// Reference point of a rectangle: a corner, an edge midpoint or the center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Anchor {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
    #[default]
    Center,
}

impl Anchor {
    pub const ALL: [Anchor; 9] = [
        Anchor::N,
        Anchor::NE,
        Anchor::E,
        Anchor::SE,
        Anchor::S,
        Anchor::SW,
        Anchor::W,
        Anchor::NW,
        Anchor::Center,
    ];

    /// Position of this anchor inside a `width` x `height` box whose
    /// top-left corner is the origin. Halves are floored.
    pub fn point_in(self, width: i32, height: i32) -> (i32, i32) {
        let half_w = width.div_euclid(2);
        let half_h = height.div_euclid(2);
        match self {
            Anchor::N => (half_w, 0),
            Anchor::NE => (width, 0),
            Anchor::E => (width, half_h),
            Anchor::SE => (width, height),
            Anchor::S => (half_w, height),
            Anchor::SW => (0, height),
            Anchor::W => (0, half_h),
            Anchor::NW => (0, 0),
            Anchor::Center => (half_w, half_h),
        }
    }

    /// Rectangle of `size` whose anchor point lands on `(x, y)`.
    pub fn rect_at(self, x: i32, y: i32, size: Size) -> Rect {
        let (dx, dy) = self.point_in(size.width, size.height);
        Rect::new(x - dx, y - dy, size.width, size.height)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Anchor::N => "n",
            Anchor::NE => "ne",
            Anchor::E => "e",
            Anchor::SE => "se",
            Anchor::S => "s",
            Anchor::SW => "sw",
            Anchor::W => "w",
            Anchor::NW => "nw",
            Anchor::Center => "center",
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Anchor {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Anchor::ALL
            .into_iter()
            .find(|anchor| anchor.as_str() == s)
            .ok_or_else(|| FrameError::InvalidAnchor(s.to_string()))
    }
}

impl TryFrom<&str> for Anchor {
    type Error = FrameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Absolute placement: `(x, y)` is where the widget's `anchor` point goes.
/// A missing width or height means "use the natural size".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaceOptions {
    pub x: i32,
    pub y: i32,
    pub anchor: Anchor,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl PlaceOptions {
    pub fn at(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            anchor: Anchor::NW,
            width: None,
            height: None,
        }
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn size(mut self, width: i32, height: i32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub(crate) fn resolve(&self, natural: Size) -> Rect {
        let size = Size::new(
            self.width.unwrap_or(natural.width),
            self.height.unwrap_or(natural.height),
        );
        self.anchor.rect_at(self.x, self.y, size)
    }
}

pub(crate) fn arrange(tree: &Tree, children: &[(WidgetId, Placement)]) -> Vec<(WidgetId, Rect)> {
    children
        .iter()
        .filter_map(|(child, placement)| match placement {
            Placement::Place(options) => Some((*child, options.resolve(natural_size(tree, *child)))),
            _ => None,
        })
        .collect()
}
