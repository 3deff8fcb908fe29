//! Events delivered by the host event loop, and the masks handlers bind to.

use bitflags::bitflags;

/// Magnitude of one wheel notch in the delta convention where discrete
/// button 4/5 events stand in for the wheel.
pub const WHEEL_NOTCH: i32 = 120;

/// Keyboard modifier state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub logo: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: false,
        logo: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: true,
        logo: false,
    };
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The widget's size changed.
    Configure { width: i32, height: i32 },
    /// Continuous wheel motion. Positive delta scrolls up / left.
    MouseWheel { delta: i32, modifiers: Modifiers },
    /// Pointer button press. Buttons 4 and 5 are wheel up / down on
    /// platforms that report the wheel as buttons.
    Button { number: u8, modifiers: Modifiers },
}

bitflags! {
    /// Event kinds a binding matches.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EventMask: u8 {
        const CONFIGURE = 1 << 0;
        const MOUSE_WHEEL = 1 << 1;
        const BUTTON_4 = 1 << 2;
        const BUTTON_5 = 1 << 3;
        const SHIFT = 1 << 7;

        const WHEEL = Self::MOUSE_WHEEL.bits() | Self::BUTTON_4.bits() | Self::BUTTON_5.bits();
    }
}

impl EventMask {
    /// The individual wheel masks handlers bind to, unmodified and shifted.
    pub fn wheel_bindings() -> [EventMask; 6] {
        [
            EventMask::MOUSE_WHEEL,
            EventMask::BUTTON_4,
            EventMask::BUTTON_5,
            EventMask::MOUSE_WHEEL | EventMask::SHIFT,
            EventMask::BUTTON_4 | EventMask::SHIFT,
            EventMask::BUTTON_5 | EventMask::SHIFT,
        ]
    }
}

impl Event {
    pub fn modifiers(&self) -> Modifiers {
        match self {
            Event::Configure { .. } => Modifiers::NONE,
            Event::MouseWheel { modifiers, .. } | Event::Button { modifiers, .. } => *modifiers,
        }
    }

    /// The binding mask this event is dispatched under.
    pub fn mask(&self) -> EventMask {
        let base = match self {
            Event::Configure { .. } => return EventMask::CONFIGURE,
            Event::MouseWheel { .. } => EventMask::MOUSE_WHEEL,
            Event::Button { number: 4, .. } => EventMask::BUTTON_4,
            Event::Button { number: 5, .. } => EventMask::BUTTON_5,
            Event::Button { .. } => EventMask::empty(),
        };
        if self.modifiers().shift && !base.is_empty() {
            base | EventMask::SHIFT
        } else {
            base
        }
    }

    /// Scroll units for a wheel event: button 4/5 count as one notch up
    /// or down, continuous deltas scroll `round(-delta / notch)` units.
    /// `None` for events that are not wheel motion.
    pub fn wheel_units(&self, notch: i32) -> Option<i32> {
        let delta = match self {
            Event::MouseWheel { delta, .. } => *delta,
            Event::Button { number: 4, .. } => notch,
            Event::Button { number: 5, .. } => -notch,
            _ => return None,
        };
        if notch == 0 {
            return None;
        }
        Some((-(delta as f64) / notch as f64).round() as i32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    Ignored,
    Handled,
}
