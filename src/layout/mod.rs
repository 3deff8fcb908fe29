//! Geometry types and the pack / grid / place geometry managers.
//!
//! Geometry is integer pixels, relative to the parent widget. A node's
//! *natural* size is what it asks for: its explicit requested size, or what
//! its managed children need. Masters hand out rectangles to their managed
//! children via [`arrange`].

pub mod grid;
pub mod pack;
pub mod place;

pub use grid::{GridOptions, GridWeights, Sticky};
pub use pack::{Fill, PackOptions, Side};
pub use place::{Anchor, PlaceOptions};

use crate::tree::{Tree, WidgetId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub const fn zero() -> Self {
        Self {
            width: 0,
            height: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Component-wise maximum.
    pub fn max(self, other: Size) -> Size {
        Size::new(self.width.max(other.width), self.height.max(other.height))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }
}

/// Layout axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn of_size(self, size: Size) -> i32 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }
}

/// How a widget is managed by its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    Pack(PackOptions),
    Grid(GridOptions),
    Place(PlaceOptions),
    /// A window item inside a viewport. Positioned by the viewport,
    /// sized to its natural size.
    Embedded { x: i32, y: i32 },
}

/// Placement families, used to report which one a widget refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementKind {
    Pack,
    Grid,
    Place,
    Embedded,
}

impl Placement {
    pub fn kind(&self) -> PlacementKind {
        match self {
            Placement::Pack(_) => PlacementKind::Pack,
            Placement::Grid(_) => PlacementKind::Grid,
            Placement::Place(_) => PlacementKind::Place,
            Placement::Embedded { .. } => PlacementKind::Embedded,
        }
    }

    /// Whether the parent's geometry manager decides this widget's rectangle.
    pub(crate) fn follows_master(&self) -> bool {
        matches!(self, Placement::Pack(_) | Placement::Grid(_))
    }
}

impl std::fmt::Display for PlacementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PlacementKind::Pack => "pack",
            PlacementKind::Grid => "grid",
            PlacementKind::Place => "place",
            PlacementKind::Embedded => "embed",
        };
        f.write_str(name)
    }
}

/// Natural size of `id`: the explicit request, grown to fit what the
/// pack- and grid-managed children need.
pub fn natural_size(tree: &Tree, id: WidgetId) -> Size {
    let requested = tree.requested_size(id);
    let children = tree.managed_children(id);
    if children.is_empty() {
        return requested;
    }

    let packed = pack::natural_size(tree, &children);
    let gridded = grid::natural_size(tree, id, &children);
    requested.max(packed).max(gridded)
}

/// Hand out rectangles to the managed children of `id`, using its current size.
pub fn arrange(tree: &mut Tree, id: WidgetId) {
    let children = tree.managed_children(id);
    if children.is_empty() {
        return;
    }
    let cavity = tree.rect(id).size();

    let mut assigned = pack::arrange(tree, cavity, &children);
    assigned.extend(grid::arrange(tree, id, cavity, &children));
    assigned.extend(place::arrange(tree, &children));

    for (child, rect) in assigned {
        tree.set_geometry(child, rect);
    }
}
