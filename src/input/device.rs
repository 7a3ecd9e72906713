// Controller wrappers: one query surface over gamepads, keyboard and AI

use super::ai::AiBrain;
use super::backend::InputBackend;
use super::codes::{Axis, Button, Stick, Trigger};
use super::config::KeyboardLayout;
use super::profile::{ButtonSource, GamepadKind, TriggerSource, DPAD_PRESS_THRESHOLD};
use crate::core::math::{apply_deadzone, bipolar_to_unit, digital_axis};
use glam::Vec2;
use std::fmt;

/// Analog magnitude at or below which sticks and triggers read as rest
pub const DEADZONE: f32 = 0.15;

/// Device index reserved for the keyboard
pub const KEYBOARD_INDEX: i32 = -1;

/// Device index shared by every AI controller
pub const AI_INDEX: i32 = -2;

/// Which family of input source a controller wraps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    Gamepad(GamepadKind),
    Keyboard,
    Ai,
}

/// Coarse controller family for UI (button glyphs, prompts)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ControlType {
    #[default]
    None,
    Xbox,
    Ps4,
    Keyboard,
}

impl DeviceKind {
    pub fn control_type(self) -> ControlType {
        match self {
            DeviceKind::Gamepad(GamepadKind::Xbox360 | GamepadKind::XboxOne) => ControlType::Xbox,
            DeviceKind::Gamepad(GamepadKind::Ps4) => ControlType::Ps4,
            DeviceKind::Keyboard => ControlType::Keyboard,
            DeviceKind::Gamepad(GamepadKind::Logitech) | DeviceKind::Ai => ControlType::None,
        }
    }
}

/// Identity of an input source: two controllers are the same device iff
/// kind and index both match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceId {
    pub kind: DeviceKind,
    pub index: i32,
}

impl DeviceId {
    pub fn keyboard() -> Self {
        Self {
            kind: DeviceKind::Keyboard,
            index: KEYBOARD_INDEX,
        }
    }

    pub fn ai() -> Self {
        Self {
            kind: DeviceKind::Ai,
            index: AI_INDEX,
        }
    }

    pub fn gamepad(kind: GamepadKind, joystick: usize) -> Self {
        Self {
            kind: DeviceKind::Gamepad(kind),
            index: i32::try_from(joystick).unwrap_or(i32::MAX),
        }
    }
}

/// Which transition a button query asks about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Held,
    Pressed,
    Released,
}

/// A single input source bound (or about to be bound) to a player
#[derive(Debug, Clone)]
pub enum Controller {
    /// Physical pad at a joystick enumeration index
    Gamepad { kind: GamepadKind, joystick: usize },
    Keyboard(KeyboardLayout),
    Ai(AiBrain),
}

impl Controller {
    pub fn gamepad(kind: GamepadKind, joystick: usize) -> Self {
        Self::Gamepad { kind, joystick }
    }

    pub fn keyboard(layout: KeyboardLayout) -> Self {
        Self::Keyboard(layout)
    }

    pub fn ai() -> Self {
        Self::Ai(AiBrain::new())
    }

    /// Identity used for slot bookkeeping
    pub fn id(&self) -> DeviceId {
        match self {
            Controller::Gamepad { kind, joystick } => DeviceId::gamepad(*kind, *joystick),
            Controller::Keyboard(_) => DeviceId::keyboard(),
            Controller::Ai(_) => DeviceId::ai(),
        }
    }

    pub fn kind(&self) -> DeviceKind {
        self.id().kind
    }

    pub fn control_type(&self) -> ControlType {
        self.kind().control_type()
    }

    pub fn is_ai(&self) -> bool {
        matches!(self, Controller::Ai(_))
    }

    /// Decision state, for AI controllers only
    pub fn ai_brain_mut(&mut self) -> Option<&mut AiBrain> {
        match self {
            Controller::Ai(brain) => Some(brain),
            _ => None,
        }
    }

    /// Check if a button is held
    pub fn get_button(&self, backend: &dyn InputBackend, button: Button) -> bool {
        self.read_button(backend, button, Edge::Held)
    }

    /// Check if a button went from released to held this frame
    pub fn get_button_down(&self, backend: &dyn InputBackend, button: Button) -> bool {
        self.read_button(backend, button, Edge::Pressed)
    }

    /// Check if a button went from held to released this frame
    pub fn get_button_up(&self, backend: &dyn InputBackend, button: Button) -> bool {
        self.read_button(backend, button, Edge::Released)
    }

    /// Axis value in -1.0..=1.0. Unless `raw`, the deadzone is applied to
    /// every variant except the (digital) keyboard.
    pub fn get_axis(&self, backend: &dyn InputBackend, axis: Axis, raw: bool) -> f32 {
        let value = match self {
            Controller::Keyboard(layout) => {
                return layout
                    .axis_keys(axis)
                    .map(|(neg, pos)| digital_axis(backend.key_held(neg), backend.key_held(pos)))
                    .unwrap_or(0.0);
            }
            Controller::Gamepad { kind, joystick } => kind
                .axis_source(axis)
                .map(|index| backend.joystick_axis(*joystick, index))
                .unwrap_or(0.0),
            Controller::Ai(brain) => brain.axis(axis),
        };
        let value = value.clamp(-1.0, 1.0);
        if raw {
            value
        } else {
            apply_deadzone(value, DEADZONE)
        }
    }

    /// Trigger pull in 0.0..=1.0, deadzone applied unless `raw`
    pub fn get_trigger(&self, backend: &dyn InputBackend, trigger: Trigger, raw: bool) -> f32 {
        let value = match self {
            Controller::Keyboard(layout) => {
                let held = layout
                    .trigger_key(trigger)
                    .is_some_and(|key| backend.key_held(key));
                return if held { 1.0 } else { 0.0 };
            }
            Controller::Gamepad { kind, joystick } => match kind.trigger_source(trigger) {
                Some(TriggerSource::UnitAxis(index)) => backend.joystick_axis(*joystick, index),
                Some(TriggerSource::BipolarAxis(index)) => {
                    bipolar_to_unit(backend.joystick_axis(*joystick, index))
                }
                Some(TriggerSource::Button(index)) => {
                    if backend.joystick_button(*joystick, index) {
                        1.0
                    } else {
                        0.0
                    }
                }
                None => 0.0,
            },
            Controller::Ai(brain) => brain.trigger(trigger),
        };
        let value = value.clamp(0.0, 1.0);
        if raw {
            value
        } else {
            apply_deadzone(value, DEADZONE)
        }
    }

    /// Both axes of a stick as a vector, each normalized like [`Self::get_axis`]
    pub fn get_stick(&self, backend: &dyn InputBackend, stick: Stick, raw: bool) -> Vec2 {
        let (x, y) = stick.axes();
        Vec2::new(
            self.get_axis(backend, x, raw),
            self.get_axis(backend, y, raw),
        )
    }

    /// Advance per-frame state owned by the controller itself
    pub(crate) fn end_frame(&mut self) {
        if let Controller::Ai(brain) = self {
            brain.end_frame();
        }
    }

    fn read_button(&self, backend: &dyn InputBackend, button: Button, edge: Edge) -> bool {
        match self {
            Controller::Keyboard(layout) => layout.button_key(button).is_some_and(|key| match edge {
                Edge::Held => backend.key_held(key),
                Edge::Pressed => backend.key_pressed(key),
                Edge::Released => backend.key_released(key),
            }),
            Controller::Gamepad { kind, joystick } => match kind.button_source(button) {
                Some(ButtonSource::Button(index)) => match edge {
                    Edge::Held => backend.joystick_button(*joystick, index),
                    Edge::Pressed => backend.joystick_button_pressed(*joystick, index),
                    Edge::Released => backend.joystick_button_released(*joystick, index),
                },
                Some(ButtonSource::AxisDirection { axis, positive }) => {
                    let pushed = |value: f32| {
                        if positive {
                            value >= DPAD_PRESS_THRESHOLD
                        } else {
                            value <= -DPAD_PRESS_THRESHOLD
                        }
                    };
                    let now = pushed(backend.joystick_axis(*joystick, axis));
                    let before = pushed(backend.joystick_axis_previous(*joystick, axis));
                    match edge {
                        Edge::Held => now,
                        Edge::Pressed => now && !before,
                        Edge::Released => !now && before,
                    }
                }
                None => false,
            },
            Controller::Ai(brain) => match edge {
                Edge::Held => brain.is_held(button),
                Edge::Pressed => brain.just_pressed(button),
                Edge::Released => brain.just_released(button),
            },
        }
    }
}

impl PartialEq for Controller {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Controller {}

impl fmt::Display for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Controller::Gamepad { kind, joystick } => write!(f, "{:?} #{}", kind, joystick),
            Controller::Keyboard(_) => write!(f, "Keyboard"),
            Controller::Ai(_) => write!(f, "AI"),
        }
    }
}
