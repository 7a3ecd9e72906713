// Vendor-specific gamepad layouts
//
// Each profile translates logical codes into raw joystick indices. Xbox pads
// use the XInput numbering from `backend::raw`; the PS4 and Logitech profiles
// follow their DirectInput layouts.
//
// Drivers that already normalise every pad (gilrs) report logical state; a
// `PadSnapshot` of that state is written back into the classified family's
// raw layout so the profiles read it like a native DirectInput/XInput sample.

use super::backend::{raw, JoystickState};
use super::codes::{Axis, Button, Trigger};

/// Gamepad families the classifier can tell apart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadKind {
    Ps4,
    Logitech,
    Xbox360,
    XboxOne,
}

/// Where a logical button is read from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ButtonSource {
    /// A raw joystick button
    Button(u8),
    /// A raw axis pushed past the half-way point in the given direction
    AxisDirection { axis: u8, positive: bool },
}

/// Where a logical trigger is read from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriggerSource {
    /// Axis reporting 0.0 released .. 1.0 pressed
    UnitAxis(u8),
    /// Axis reporting -1.0 released .. 1.0 pressed
    BipolarAxis(u8),
    /// Digital button, reads as 0.0 or 1.0
    Button(u8),
}

/// Axis deflection at which a d-pad axis counts as a button press
pub const DPAD_PRESS_THRESHOLD: f32 = 0.5;

/// Trigger pull at which a digital trigger button counts as held
pub const TRIGGER_PRESS_THRESHOLD: f32 = 0.5;

/// Logical pad state from a layout-normalising driver.
///
/// D-pad directions travel on the `DPadX`/`DPadY` axes; d-pad entries in
/// `held` are ignored when written out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PadSnapshot {
    pub held: Vec<Button>,
    pub axes: [f32; Axis::COUNT],
    pub triggers: [f32; Trigger::COUNT],
}

impl PadSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, button: Button) {
        if !self.held.contains(&button) {
            self.held.push(button);
        }
    }

    pub fn set_axis(&mut self, axis: Axis, value: f32) {
        self.axes[axis.index()] = value.clamp(-1.0, 1.0);
    }

    /// Set a trigger pull in 0.0..=1.0
    pub fn set_trigger(&mut self, trigger: Trigger, value: f32) {
        self.triggers[trigger.index()] = value.clamp(0.0, 1.0);
    }
}

impl GamepadKind {
    pub fn button_source(self, button: Button) -> Option<ButtonSource> {
        match self {
            GamepadKind::Xbox360 | GamepadKind::XboxOne => xbox_button(button),
            GamepadKind::Ps4 => ps4_button(button),
            GamepadKind::Logitech => logitech_button(button),
        }
    }

    pub fn axis_source(self, axis: Axis) -> Option<u8> {
        let index = match (self, axis) {
            (GamepadKind::Xbox360 | GamepadKind::XboxOne, axis) => match axis {
                Axis::LeftStickX => raw::AXIS_LX,
                Axis::LeftStickY => raw::AXIS_LY,
                Axis::RightStickX => raw::AXIS_RX,
                Axis::RightStickY => raw::AXIS_RY,
                Axis::DPadX => raw::AXIS_DPAD_X,
                Axis::DPadY => raw::AXIS_DPAD_Y,
            },
            (GamepadKind::Ps4, axis) => match axis {
                Axis::LeftStickX => 0,
                Axis::LeftStickY => 1,
                Axis::RightStickX => 2,
                Axis::RightStickY => 5,
                Axis::DPadX => 6,
                Axis::DPadY => 7,
            },
            (GamepadKind::Logitech, axis) => match axis {
                Axis::LeftStickX => 0,
                Axis::LeftStickY => 1,
                Axis::RightStickX => 2,
                Axis::RightStickY => 3,
                Axis::DPadX => 4,
                Axis::DPadY => 5,
            },
        };
        Some(index)
    }

    pub fn trigger_source(self, trigger: Trigger) -> Option<TriggerSource> {
        let source = match (self, trigger) {
            (GamepadKind::Xbox360 | GamepadKind::XboxOne, Trigger::Left) => {
                TriggerSource::UnitAxis(raw::AXIS_LT)
            }
            (GamepadKind::Xbox360 | GamepadKind::XboxOne, Trigger::Right) => {
                TriggerSource::UnitAxis(raw::AXIS_RT)
            }
            (GamepadKind::Ps4, Trigger::Left) => TriggerSource::BipolarAxis(3),
            (GamepadKind::Ps4, Trigger::Right) => TriggerSource::BipolarAxis(4),
            // D-mode Logitech pads have digital triggers
            (GamepadKind::Logitech, Trigger::Left) => TriggerSource::Button(6),
            (GamepadKind::Logitech, Trigger::Right) => TriggerSource::Button(7),
        };
        Some(source)
    }

    /// Overwrite a joystick's raw buttons and axes with `pad`, laid out the
    /// way this family reports them
    pub fn write_raw(self, pad: &PadSnapshot, state: &mut JoystickState) {
        let mut held: Vec<u8> = pad
            .held
            .iter()
            .filter_map(|&button| match self.button_source(button) {
                Some(ButtonSource::Button(index)) => Some(index),
                _ => None,
            })
            .collect();

        state.clear_axes();
        for axis in Axis::ALL {
            if let Some(index) = self.axis_source(axis) {
                state.set_axis(index, pad.axes[axis.index()]);
            }
        }

        for trigger in [Trigger::Left, Trigger::Right] {
            let value = pad.triggers[trigger.index()];
            match self.trigger_source(trigger) {
                Some(TriggerSource::UnitAxis(index)) => state.set_axis(index, value),
                Some(TriggerSource::BipolarAxis(index)) => state.set_axis(index, value * 2.0 - 1.0),
                Some(TriggerSource::Button(index)) => {
                    if value >= TRIGGER_PRESS_THRESHOLD {
                        held.push(index);
                    }
                }
                None => {}
            }
        }

        state.buttons_mut().replace_held(held);
    }
}

fn dpad(axis: u8, positive: bool) -> Option<ButtonSource> {
    Some(ButtonSource::AxisDirection { axis, positive })
}

fn xbox_button(button: Button) -> Option<ButtonSource> {
    let index = match button {
        Button::A => raw::BUTTON_A,
        Button::B => raw::BUTTON_B,
        Button::X => raw::BUTTON_X,
        Button::Y => raw::BUTTON_Y,
        Button::LeftBumper => raw::BUTTON_LB,
        Button::RightBumper => raw::BUTTON_RB,
        Button::Back => raw::BUTTON_BACK,
        Button::Start => raw::BUTTON_START,
        Button::Guide => raw::BUTTON_GUIDE,
        Button::LeftStickClick => raw::BUTTON_LS,
        Button::RightStickClick => raw::BUTTON_RS,
        Button::DPadUp => return dpad(raw::AXIS_DPAD_Y, true),
        Button::DPadDown => return dpad(raw::AXIS_DPAD_Y, false),
        Button::DPadLeft => return dpad(raw::AXIS_DPAD_X, false),
        Button::DPadRight => return dpad(raw::AXIS_DPAD_X, true),
    };
    Some(ButtonSource::Button(index))
}

// Square 0, Cross 1, Circle 2, Triangle 3, L1 4, R1 5, L2 6, R2 7,
// Share 8, Options 9, L3 10, R3 11, PS 12, Touchpad 13
fn ps4_button(button: Button) -> Option<ButtonSource> {
    let index = match button {
        Button::A => 1,
        Button::B => 2,
        Button::X => 0,
        Button::Y => 3,
        Button::LeftBumper => 4,
        Button::RightBumper => 5,
        Button::Back => 8,
        Button::Start => 9,
        Button::LeftStickClick => 10,
        Button::RightStickClick => 11,
        Button::Guide => 12,
        Button::DPadUp => return dpad(7, true),
        Button::DPadDown => return dpad(7, false),
        Button::DPadLeft => return dpad(6, false),
        Button::DPadRight => return dpad(6, true),
    };
    Some(ButtonSource::Button(index))
}

// X 0, A 1, B 2, Y 3, LB 4, RB 5, LT 6, RT 7, Back 8, Start 9, LS 10, RS 11
fn logitech_button(button: Button) -> Option<ButtonSource> {
    let index = match button {
        Button::A => 1,
        Button::B => 2,
        Button::X => 0,
        Button::Y => 3,
        Button::LeftBumper => 4,
        Button::RightBumper => 5,
        Button::Back => 8,
        Button::Start => 9,
        Button::LeftStickClick => 10,
        Button::RightStickClick => 11,
        // No guide button in DirectInput mode
        Button::Guide => return None,
        Button::DPadUp => return dpad(5, true),
        Button::DPadDown => return dpad(5, false),
        Button::DPadLeft => return dpad(4, false),
        Button::DPadRight => return dpad(4, true),
    };
    Some(ButtonSource::Button(index))
}
