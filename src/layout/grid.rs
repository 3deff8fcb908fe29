//! Grid geometry manager: children occupy row/column cells; rows and
//! columns with a weight absorb the space the master has beyond its
//! natural size.

use bitflags::bitflags;

use super::{natural_size as child_natural, Axis, Placement, Rect, Size};
use crate::tree::{Tree, WidgetId};

bitflags! {
    /// Which cell edges a gridded widget sticks to
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Sticky: u8 {
        const N = 1 << 0;
        const S = 1 << 1;
        const E = 1 << 2;
        const W = 1 << 3;
        const NS = Self::N.bits() | Self::S.bits();
        const EW = Self::E.bits() | Self::W.bits();
        const NSEW = Self::NS.bits() | Self::EW.bits();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridOptions {
    pub row: usize,
    pub column: usize,
    pub sticky: Sticky,
    pub padx: i32,
    pub pady: i32,
}

impl GridOptions {
    pub fn cell(row: usize, column: usize) -> Self {
        Self {
            row,
            column,
            ..Default::default()
        }
    }

    pub fn sticky(mut self, sticky: Sticky) -> Self {
        self.sticky = sticky;
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

/// Row and column weights of a grid master.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridWeights {
    pub rows: Vec<u32>,
    pub columns: Vec<u32>,
}

impl GridWeights {
    pub fn set(&mut self, axis: Axis, index: usize, weight: u32) {
        let weights = match axis {
            Axis::Horizontal => &mut self.columns,
            Axis::Vertical => &mut self.rows,
        };
        if weights.len() <= index {
            weights.resize(index + 1, 0);
        }
        weights[index] = weight;
    }

    fn get(&self, axis: Axis, index: usize) -> u32 {
        let weights = match axis {
            Axis::Horizontal => &self.columns,
            Axis::Vertical => &self.rows,
        };
        weights.get(index).copied().unwrap_or(0)
    }
}

fn gridded(children: &[(WidgetId, Placement)]) -> impl Iterator<Item = (WidgetId, GridOptions)> + '_ {
    children.iter().filter_map(|(id, placement)| match placement {
        Placement::Grid(options) => Some((*id, *options)),
        _ => None,
    })
}

/// Natural column widths and row heights.
fn tracks(tree: &Tree, children: &[(WidgetId, Placement)]) -> (Vec<i32>, Vec<i32>) {
    let mut columns: Vec<i32> = Vec::new();
    let mut rows: Vec<i32> = Vec::new();

    for (child, options) in gridded(children) {
        let natural = child_natural(tree, child);
        if columns.len() <= options.column {
            columns.resize(options.column + 1, 0);
        }
        if rows.len() <= options.row {
            rows.resize(options.row + 1, 0);
        }
        columns[options.column] = columns[options.column].max(natural.width + 2 * options.padx);
        rows[options.row] = rows[options.row].max(natural.height + 2 * options.pady);
    }

    (columns, rows)
}

/// Spread `extra` (possibly negative) over the weighted tracks.
fn distribute(tracks: &mut [i32], weights: &GridWeights, axis: Axis, extra: i32) {
    let total: u32 = (0..tracks.len()).map(|i| weights.get(axis, i)).sum();
    if total == 0 || extra == 0 {
        return;
    }

    let mut given = 0;
    let mut last_weighted = None;
    for (index, track) in tracks.iter_mut().enumerate() {
        let weight = weights.get(axis, index);
        if weight == 0 {
            continue;
        }
        let share = extra * weight as i32 / total as i32;
        *track += share;
        given += share;
        last_weighted = Some(index);
    }
    if let Some(index) = last_weighted {
        tracks[index] += extra - given;
    }
    for track in tracks.iter_mut() {
        *track = (*track).max(0);
    }
}

pub(crate) fn natural_size(
    tree: &Tree,
    _master: WidgetId,
    children: &[(WidgetId, Placement)],
) -> Size {
    let (columns, rows) = tracks(tree, children);
    Size::new(columns.iter().sum(), rows.iter().sum())
}

pub(crate) fn arrange(
    tree: &Tree,
    master: WidgetId,
    cavity: Size,
    children: &[(WidgetId, Placement)],
) -> Vec<(WidgetId, Rect)> {
    let (mut columns, mut rows) = tracks(tree, children);
    if columns.is_empty() {
        return Vec::new();
    }

    let weights = tree.grid_weights(master);
    let extra_x = cavity.width - columns.iter().sum::<i32>();
    let extra_y = cavity.height - rows.iter().sum::<i32>();
    distribute(&mut columns, &weights, Axis::Horizontal, extra_x);
    distribute(&mut rows, &weights, Axis::Vertical, extra_y);

    gridded(children)
        .map(|(child, options)| {
            let cell_x: i32 = columns[..options.column].iter().sum();
            let cell_y: i32 = rows[..options.row].iter().sum();
            let cell = Rect::new(
                cell_x + options.padx,
                cell_y + options.pady,
                (columns[options.column] - 2 * options.padx).max(0),
                (rows[options.row] - 2 * options.pady).max(0),
            );
            let natural = child_natural(tree, child);
            (child, stick(cell, natural, options.sticky))
        })
        .collect()
}

fn stick(cell: Rect, natural: Size, sticky: Sticky) -> Rect {
    let (x, width) = span(
        cell.x,
        cell.width,
        natural.width,
        sticky.contains(Sticky::W),
        sticky.contains(Sticky::E),
    );
    let (y, height) = span(
        cell.y,
        cell.height,
        natural.height,
        sticky.contains(Sticky::N),
        sticky.contains(Sticky::S),
    );
    Rect::new(x, y, width, height)
}

fn span(start: i32, room: i32, natural: i32, lead: bool, trail: bool) -> (i32, i32) {
    let length = natural.min(room);
    match (lead, trail) {
        (true, true) => (start, room),
        (true, false) => (start, length),
        (false, true) => (start + room - length, length),
        (false, false) => (start + (room - length) / 2, length),
    }
}
