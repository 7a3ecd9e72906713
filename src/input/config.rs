// Keyboard layout and controller manager configuration

use super::codes::{Axis, Button, Trigger};
use std::collections::HashMap;
use winit::keyboard::KeyCode;

/// Remappable keyboard layout for the keyboard controller.
///
/// Buttons and triggers map to a single key, axes to a
/// (negative, positive) key pair.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyboardLayout {
    buttons: HashMap<Button, KeyCode>,
    axes: HashMap<Axis, (KeyCode, KeyCode)>,
    triggers: HashMap<Trigger, KeyCode>,
}

impl KeyboardLayout {
    /// Create a layout with no bindings
    pub fn empty() -> Self {
        Self {
            buttons: HashMap::new(),
            axes: HashMap::new(),
            triggers: HashMap::new(),
        }
    }

    /// Create a layout from a list of button bindings
    pub fn from_bindings(bindings: Vec<(Button, KeyCode)>) -> Self {
        let mut layout = Self::empty();
        for (button, key) in bindings {
            layout.bind_button(button, key);
        }
        layout
    }

    /// Bind a key to a button, replacing any previous key for it
    pub fn bind_button(&mut self, button: Button, key: KeyCode) {
        self.buttons.insert(button, key);
    }

    /// Bind a (negative, positive) key pair to an axis
    pub fn bind_axis(&mut self, axis: Axis, negative: KeyCode, positive: KeyCode) {
        self.axes.insert(axis, (negative, positive));
    }

    pub fn bind_trigger(&mut self, trigger: Trigger, key: KeyCode) {
        self.triggers.insert(trigger, key);
    }

    pub fn unbind_button(&mut self, button: Button) {
        self.buttons.remove(&button);
    }

    pub fn button_key(&self, button: Button) -> Option<KeyCode> {
        self.buttons.get(&button).copied()
    }

    pub fn axis_keys(&self, axis: Axis) -> Option<(KeyCode, KeyCode)> {
        self.axes.get(&axis).copied()
    }

    pub fn trigger_key(&self, trigger: Trigger) -> Option<KeyCode> {
        self.triggers.get(&trigger).copied()
    }

    /// Check if a button has a key bound
    pub fn has_binding(&self, button: Button) -> bool {
        self.buttons.contains_key(&button)
    }

    /// Clear all bindings
    pub fn clear(&mut self) {
        self.buttons.clear();
        self.axes.clear();
        self.triggers.clear();
    }

    /// Reset to the default WASD layout
    pub fn reset_to_defaults(&mut self) {
        self.clear();
        for (button, key) in default_button_bindings() {
            self.bind_button(button, key);
        }

        // Movement (WASD), aiming (IJKL), d-pad (arrows)
        self.bind_axis(Axis::LeftStickX, KeyCode::KeyA, KeyCode::KeyD);
        self.bind_axis(Axis::LeftStickY, KeyCode::KeyS, KeyCode::KeyW);
        self.bind_axis(Axis::RightStickX, KeyCode::KeyJ, KeyCode::KeyL);
        self.bind_axis(Axis::RightStickY, KeyCode::KeyK, KeyCode::KeyI);
        self.bind_axis(Axis::DPadX, KeyCode::ArrowLeft, KeyCode::ArrowRight);
        self.bind_axis(Axis::DPadY, KeyCode::ArrowDown, KeyCode::ArrowUp);

        self.bind_trigger(Trigger::Left, KeyCode::KeyZ);
        self.bind_trigger(Trigger::Right, KeyCode::KeyC);
    }
}

impl Default for KeyboardLayout {
    fn default() -> Self {
        let mut layout = Self::empty();
        layout.reset_to_defaults();
        layout
    }
}

/// Default keyboard bindings for logical buttons
pub fn default_button_bindings() -> Vec<(Button, KeyCode)> {
    vec![
        (Button::A, KeyCode::Space),
        (Button::B, KeyCode::ShiftLeft),
        (Button::X, KeyCode::KeyF),
        (Button::Y, KeyCode::KeyR),
        (Button::LeftBumper, KeyCode::KeyQ),
        (Button::RightBumper, KeyCode::KeyE),
        (Button::Back, KeyCode::Backspace),
        (Button::Start, KeyCode::Enter),
        (Button::Guide, KeyCode::Escape),
        (Button::LeftStickClick, KeyCode::KeyV),
        (Button::RightStickClick, KeyCode::KeyB),
        (Button::DPadUp, KeyCode::ArrowUp),
        (Button::DPadDown, KeyCode::ArrowDown),
        (Button::DPadLeft, KeyCode::ArrowLeft),
        (Button::DPadRight, KeyCode::ArrowRight),
    ]
}

/// Settings for a [`ControllerManager`](super::ControllerManager)
#[derive(Debug, Clone, Default)]
pub struct ControllerSettings {
    /// Layout used by the keyboard controller
    pub keyboard: KeyboardLayout,
}
