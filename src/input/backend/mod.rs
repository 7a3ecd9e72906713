// Raw input backends
//
// A backend is the only place the crate touches hardware. It answers two
// questions: which joysticks are connected (by display name, in enumeration
// order), and what their raw buttons/axes and the keyboard keys read right now.
//
// Joystick buttons and axes are addressed by raw index in the layout of the
// pad's family. The Xbox numbering below is what XInput-class pads report;
// vendor profiles translate logical codes into raw indices.

pub mod desktop;
pub mod scripted;

pub use desktop::DesktopBackend;
pub use scripted::ScriptedBackend;

use super::state::EdgeState;
use std::collections::HashMap;
use winit::keyboard::KeyCode;

/// Raw button indices in the Xbox/XInput numbering
pub mod raw {
    pub const BUTTON_A: u8 = 0;
    pub const BUTTON_B: u8 = 1;
    pub const BUTTON_X: u8 = 2;
    pub const BUTTON_Y: u8 = 3;
    pub const BUTTON_LB: u8 = 4;
    pub const BUTTON_RB: u8 = 5;
    pub const BUTTON_BACK: u8 = 6;
    pub const BUTTON_START: u8 = 7;
    pub const BUTTON_LS: u8 = 8;
    pub const BUTTON_RS: u8 = 9;
    pub const BUTTON_GUIDE: u8 = 10;
    pub const BUTTON_COUNT: u8 = 11;

    pub const AXIS_LX: u8 = 0;
    pub const AXIS_LY: u8 = 1;
    pub const AXIS_RX: u8 = 3;
    pub const AXIS_RY: u8 = 4;
    pub const AXIS_DPAD_X: u8 = 5;
    pub const AXIS_DPAD_Y: u8 = 6;
    pub const AXIS_LT: u8 = 8;
    pub const AXIS_RT: u8 = 9;
}

/// Errors raised while setting up a backend
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Failed to initialize gamepad support: {0}")]
    GamepadInit(String),
}

/// Source of raw device state, sampled once per frame
pub trait InputBackend {
    /// Display names of connected joysticks, in enumeration order
    fn joystick_names(&self) -> Vec<String>;

    /// Check if a keyboard key is held
    fn key_held(&self, key: KeyCode) -> bool;

    /// Check if a keyboard key went down this frame
    fn key_pressed(&self, key: KeyCode) -> bool;

    /// Check if a keyboard key went up this frame
    fn key_released(&self, key: KeyCode) -> bool;

    /// Check if a raw joystick button is held
    fn joystick_button(&self, joystick: usize, button: u8) -> bool;

    /// Check if a raw joystick button went down this frame
    fn joystick_button_pressed(&self, joystick: usize, button: u8) -> bool;

    /// Check if a raw joystick button went up this frame
    fn joystick_button_released(&self, joystick: usize, button: u8) -> bool;

    /// Raw axis value in -1.0..=1.0, 0.0 for unknown joysticks or axes
    fn joystick_axis(&self, joystick: usize, axis: u8) -> f32;

    /// Raw axis value as it stood at the end of the previous frame
    fn joystick_axis_previous(&self, joystick: usize, axis: u8) -> f32;

    /// Refresh device state at the start of a frame
    fn begin_frame(&mut self) {}

    /// Roll edge state at the end of a frame
    fn end_frame(&mut self);
}

/// Per-joystick raw state kept by backends
#[derive(Debug, Clone)]
pub struct JoystickState {
    name: String,
    buttons: EdgeState<u8>,
    axes: HashMap<u8, f32>,
    previous_axes: HashMap<u8, f32>,
}

impl JoystickState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            buttons: EdgeState::new(),
            axes: HashMap::new(),
            previous_axes: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn buttons(&self) -> &EdgeState<u8> {
        &self.buttons
    }

    pub fn buttons_mut(&mut self) -> &mut EdgeState<u8> {
        &mut self.buttons
    }

    pub fn axis(&self, axis: u8) -> f32 {
        self.axes.get(&axis).copied().unwrap_or(0.0)
    }

    pub fn set_axis(&mut self, axis: u8, value: f32) {
        self.axes.insert(axis, value.clamp(-1.0, 1.0));
    }

    pub fn previous_axis(&self, axis: u8) -> f32 {
        self.previous_axes.get(&axis).copied().unwrap_or(0.0)
    }

    pub fn clear_axes(&mut self) {
        self.axes.clear();
    }

    /// Roll buttons and axes into the previous-frame snapshot
    pub fn end_frame(&mut self) {
        self.buttons.end_frame();
        self.previous_axes.clone_from(&self.axes);
    }
}
