//! Error types for container construction and placement.

use thiserror::Error;

use crate::layout::PlacementKind;
use crate::tree::WidgetId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrameError {
    /// More scopes were closed than opened.
    #[error("scope imbalance: more scopes closed than opened")]
    ScopeImbalance,
    #[error("{widget} does not support {placement} placement")]
    UnsupportedPlacement {
        widget: &'static str,
        placement: PlacementKind,
    },
    #[error("invalid anchor {0:?}, expected one of n, ne, e, se, s, sw, w, nw, center")]
    InvalidAnchor(String),
    #[error("unknown widget {0:?}")]
    UnknownWidget(WidgetId),
}

pub type Result<T> = std::result::Result<T, FrameError>;

impl From<std::convert::Infallible> for FrameError {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}
