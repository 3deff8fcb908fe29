//! Pack geometry manager: children are stacked against the sides of the
//! remaining cavity, in the order they were packed.

use super::{natural_size as child_natural, Placement, Rect, Size};
use crate::tree::{Tree, WidgetId};

/// Side of the cavity a packed widget is stacked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    fn is_vertical(self) -> bool {
        matches!(self, Side::Top | Side::Bottom)
    }
}

/// Which directions a packed widget stretches into its parcel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fill {
    #[default]
    None,
    X,
    Y,
    Both,
}

impl Fill {
    fn x(self) -> bool {
        matches!(self, Fill::X | Fill::Both)
    }

    fn y(self) -> bool {
        matches!(self, Fill::Y | Fill::Both)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PackOptions {
    pub side: Side,
    pub fill: Fill,
    pub expand: bool,
    pub padx: i32,
    pub pady: i32,
}

impl PackOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    pub fn fill(mut self, fill: Fill) -> Self {
        self.fill = fill;
        self
    }

    pub fn expand(mut self, expand: bool) -> Self {
        self.expand = expand;
        self
    }

    pub fn padx(mut self, padx: i32) -> Self {
        self.padx = padx;
        self
    }

    pub fn pady(mut self, pady: i32) -> Self {
        self.pady = pady;
        self
    }
}

fn packed(children: &[(WidgetId, Placement)]) -> impl Iterator<Item = (WidgetId, PackOptions)> + '_ {
    children.iter().filter_map(|(id, placement)| match placement {
        Placement::Pack(options) => Some((*id, *options)),
        _ => None,
    })
}

/// Size a master needs to hold its packed children.
pub(crate) fn natural_size(tree: &Tree, children: &[(WidgetId, Placement)]) -> Size {
    let mut max_width = 0;
    let mut max_height = 0;
    let mut width = 0;
    let mut height = 0;

    for (child, options) in packed(children) {
        let natural = child_natural(tree, child);
        let w = natural.width + 2 * options.padx;
        let h = natural.height + 2 * options.pady;
        if options.side.is_vertical() {
            max_width = max_width.max(w + width);
            height += h;
        } else {
            max_height = max_height.max(h + height);
            width += w;
        }
    }

    Size::new(max_width.max(width), max_height.max(height))
}

/// Parcels for the packed children inside a cavity of the given size.
pub(crate) fn arrange(
    tree: &Tree,
    cavity: Size,
    children: &[(WidgetId, Placement)],
) -> Vec<(WidgetId, Rect)> {
    let entries: Vec<(WidgetId, PackOptions, Size)> = packed(children)
        .map(|(child, options)| (child, options, child_natural(tree, child)))
        .collect();

    // Leftover space per direction, shared among the expanding children.
    let wanted_y: i32 = entries
        .iter()
        .filter(|(_, o, _)| o.side.is_vertical())
        .map(|(_, o, s)| s.height + 2 * o.pady)
        .sum();
    let wanted_x: i32 = entries
        .iter()
        .filter(|(_, o, _)| !o.side.is_vertical())
        .map(|(_, o, s)| s.width + 2 * o.padx)
        .sum();
    let expanders_y = entries
        .iter()
        .filter(|(_, o, _)| o.expand && o.side.is_vertical())
        .count() as i32;
    let expanders_x = entries
        .iter()
        .filter(|(_, o, _)| o.expand && !o.side.is_vertical())
        .count() as i32;
    let extra_y = if expanders_y > 0 {
        (cavity.height - wanted_y).max(0) / expanders_y
    } else {
        0
    };
    let extra_x = if expanders_x > 0 {
        (cavity.width - wanted_x).max(0) / expanders_x
    } else {
        0
    };

    let mut free = Rect::from_size(cavity);
    let mut parcels = Vec::with_capacity(entries.len());

    for (child, options, natural) in entries {
        let frame = if options.side.is_vertical() {
            let mut h = natural.height + 2 * options.pady;
            if options.expand {
                h += extra_y;
            }
            let h = h.min(free.height).max(0);
            let y = match options.side {
                Side::Top => free.y,
                _ => free.bottom() - h,
            };
            if options.side == Side::Top {
                free.y += h;
            }
            free.height -= h;
            Rect::new(free.x, y, free.width, h)
        } else {
            let mut w = natural.width + 2 * options.padx;
            if options.expand {
                w += extra_x;
            }
            let w = w.min(free.width).max(0);
            let x = match options.side {
                Side::Left => free.x,
                _ => free.right() - w,
            };
            if options.side == Side::Left {
                free.x += w;
            }
            free.width -= w;
            Rect::new(x, free.y, w, free.height)
        };

        let room_w = (frame.width - 2 * options.padx).max(0);
        let room_h = (frame.height - 2 * options.pady).max(0);
        let width = if options.fill.x() { room_w } else { natural.width.min(room_w) };
        let height = if options.fill.y() { room_h } else { natural.height.min(room_h) };

        // Centered inside the parcel
        let x = frame.x + (frame.width - width) / 2;
        let y = frame.y + (frame.height - height) / 2;
        parcels.push((child, Rect::new(x, y, width, height)));
    }

    parcels
}
