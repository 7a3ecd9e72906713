// Logical input codes shared by every controller variant

use std::fmt;

/// Logical buttons, named after the Xbox face layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    // Face buttons
    A,
    B,
    X,
    Y,

    // Shoulders
    LeftBumper,
    RightBumper,

    // Meta
    Back,
    Start,
    Guide,

    // Stick clicks
    LeftStickClick,
    RightStickClick,

    // D-pad
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
}

impl Button {
    /// Every logical button, in declaration order
    pub const ALL: [Button; 15] = [
        Button::A,
        Button::B,
        Button::X,
        Button::Y,
        Button::LeftBumper,
        Button::RightBumper,
        Button::Back,
        Button::Start,
        Button::Guide,
        Button::LeftStickClick,
        Button::RightStickClick,
        Button::DPadUp,
        Button::DPadDown,
        Button::DPadLeft,
        Button::DPadRight,
    ];
}

/// Logical analog axes. Positive is right / up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    LeftStickX,
    LeftStickY,
    RightStickX,
    RightStickY,
    DPadX,
    DPadY,
}

impl Axis {
    /// Every logical axis, in declaration order
    pub const ALL: [Axis; 6] = [
        Axis::LeftStickX,
        Axis::LeftStickY,
        Axis::RightStickX,
        Axis::RightStickY,
        Axis::DPadX,
        Axis::DPadY,
    ];

    /// Position in fixed-size per-axis arrays
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    pub(crate) const COUNT: usize = 6;
}

/// Logical analog triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Left,
    Right,
}

impl Trigger {
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    pub(crate) const COUNT: usize = 2;
}

/// A pair of axes read together as a 2D vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stick {
    Left,
    Right,
    DPad,
}

impl Stick {
    /// The (horizontal, vertical) axes making up this stick
    pub fn axes(self) -> (Axis, Axis) {
        match self {
            Stick::Left => (Axis::LeftStickX, Axis::LeftStickY),
            Stick::Right => (Axis::RightStickX, Axis::RightStickY),
            Stick::DPad => (Axis::DPadX, Axis::DPadY),
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_equality() {
        assert_eq!(Button::Start, Button::Start);
        assert_ne!(Button::Start, Button::Back);
    }

    #[test]
    fn test_all_buttons_unique() {
        let mut seen = std::collections::HashSet::new();
        for button in Button::ALL {
            assert!(seen.insert(button), "Duplicate button in Button::ALL");
        }
    }

    #[test]
    fn test_axis_indices_fit_count() {
        for axis in Axis::ALL {
            assert!(axis.index() < Axis::COUNT);
        }
        assert!(Trigger::Right.index() < Trigger::COUNT);
    }

    #[test]
    fn test_stick_axes() {
        assert_eq!(Stick::Left.axes(), (Axis::LeftStickX, Axis::LeftStickY));
        assert_eq!(Stick::DPad.axes(), (Axis::DPadX, Axis::DPadY));
    }
}
