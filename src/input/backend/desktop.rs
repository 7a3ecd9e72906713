// Desktop backend: gilrs gamepads plus winit keyboard events

use super::{BackendError, InputBackend, JoystickState};
use crate::input::classifier::classify_name;
use crate::input::codes::{Axis, Button, Trigger};
use crate::input::profile::PadSnapshot;
use crate::input::state::EdgeState;
use gilrs::{Axis as PadAxis, Button as PadButton, EventType, Gamepad, GamepadId, Gilrs};
use log::{debug, info};
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Backend for native desktop builds.
///
/// gilrs normalises every pad to an Xbox-style layout. Each sample is written
/// back into the raw layout of the family the pad's name classifies as, so
/// the vendor profiles read it as they would a native driver.
pub struct DesktopBackend {
    gilrs: Gilrs,

    /// Keyboard state, fed from window events
    keyboard: EdgeState<KeyCode>,

    /// Connected pads in enumeration order
    pads: Vec<(GamepadId, JoystickState)>,
}

impl DesktopBackend {
    pub fn new() -> Result<Self, BackendError> {
        let gilrs = Gilrs::new().map_err(|e| BackendError::GamepadInit(e.to_string()))?;
        info!("Gamepad support initialized");

        let mut backend = Self {
            gilrs,
            keyboard: EdgeState::new(),
            pads: Vec::new(),
        };
        backend.sample_pads();
        for (index, (_, pad)) in backend.pads.iter().enumerate() {
            info!("  [{}] {}", index, pad.name());
        }
        Ok(backend)
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Only process physical key presses
        if let PhysicalKey::Code(key_code) = event.physical_key {
            match event.state {
                ElementState::Pressed => {
                    if !event.repeat {
                        self.keyboard.press(key_code);
                    }
                }
                ElementState::Released => {
                    self.keyboard.release_after_frame(key_code);
                }
            }
        }
    }

    /// Drop all held keys, e.g. when the window loses focus
    pub fn release_keyboard(&mut self) {
        self.keyboard.replace_held([]);
    }

    fn pump_events(&mut self) {
        while let Some(event) = self.gilrs.next_event() {
            match event.event {
                EventType::Connected => {
                    let name = self.gilrs.gamepad(event.id).name().to_owned();
                    info!("Gamepad connected: {} ({})", name, event.id);
                }
                EventType::Disconnected => {
                    info!("Gamepad disconnected: {}", event.id);
                }
                _ => {}
            }
        }
    }

    /// Rebuild pad state from gilrs, keeping edge history for pads that stay connected
    fn sample_pads(&mut self) {
        let mut previous = std::mem::take(&mut self.pads);
        for (id, gamepad) in self.gilrs.gamepads() {
            let mut state = match previous.iter().position(|(old, _)| *old == id) {
                Some(pos) => previous.swap_remove(pos).1,
                None => {
                    debug!("Tracking gamepad {} as {:?}", id, gamepad.name());
                    JoystickState::new(gamepad.name())
                }
            };

            classify_name(gamepad.name()).write_raw(&snapshot(&gamepad), &mut state);
            self.pads.push((id, state));
        }
    }
}

/// gilrs button for a logical button
fn pad_button(button: Button) -> PadButton {
    match button {
        Button::A => PadButton::South,
        Button::B => PadButton::East,
        Button::X => PadButton::West,
        Button::Y => PadButton::North,
        Button::LeftBumper => PadButton::LeftTrigger,
        Button::RightBumper => PadButton::RightTrigger,
        Button::Back => PadButton::Select,
        Button::Start => PadButton::Start,
        Button::Guide => PadButton::Mode,
        Button::LeftStickClick => PadButton::LeftThumb,
        Button::RightStickClick => PadButton::RightThumb,
        Button::DPadUp => PadButton::DPadUp,
        Button::DPadDown => PadButton::DPadDown,
        Button::DPadLeft => PadButton::DPadLeft,
        Button::DPadRight => PadButton::DPadRight,
    }
}

/// gilrs stick axis for a logical axis; d-pad axes come from buttons
fn pad_axis(axis: Axis) -> Option<PadAxis> {
    match axis {
        Axis::LeftStickX => Some(PadAxis::LeftStickX),
        Axis::LeftStickY => Some(PadAxis::LeftStickY),
        Axis::RightStickX => Some(PadAxis::RightStickX),
        Axis::RightStickY => Some(PadAxis::RightStickY),
        Axis::DPadX | Axis::DPadY => None,
    }
}

fn pad_trigger(trigger: Trigger) -> PadButton {
    match trigger {
        Trigger::Left => PadButton::LeftTrigger2,
        Trigger::Right => PadButton::RightTrigger2,
    }
}

/// -1.0, 0.0 or 1.0 from a pair of opposing d-pad buttons
fn dpad_axis(negative: bool, positive: bool) -> f32 {
    match (negative, positive) {
        (false, true) => 1.0,
        (true, false) => -1.0,
        _ => 0.0,
    }
}

/// Logical state of a gilrs pad
fn snapshot(gamepad: &Gamepad<'_>) -> PadSnapshot {
    let mut pad = PadSnapshot::new();
    for button in Button::ALL {
        if gamepad.is_pressed(pad_button(button)) {
            pad.press(button);
        }
    }

    for axis in Axis::ALL {
        if let Some(source) = pad_axis(axis) {
            pad.set_axis(axis, gamepad.value(source));
        }
    }
    let held = |button: Button| pad.held.contains(&button);
    let dpad_x = dpad_axis(held(Button::DPadLeft), held(Button::DPadRight));
    let dpad_y = dpad_axis(held(Button::DPadDown), held(Button::DPadUp));
    pad.set_axis(Axis::DPadX, dpad_x);
    pad.set_axis(Axis::DPadY, dpad_y);

    for trigger in [Trigger::Left, Trigger::Right] {
        let value = gamepad
            .button_data(pad_trigger(trigger))
            .map(|data| data.value())
            .unwrap_or(0.0);
        pad.set_trigger(trigger, value);
    }
    pad
}

impl InputBackend for DesktopBackend {
    fn joystick_names(&self) -> Vec<String> {
        self.pads.iter().map(|(_, pad)| pad.name().to_owned()).collect()
    }

    fn key_held(&self, key: KeyCode) -> bool {
        self.keyboard.is_held(key)
    }

    fn key_pressed(&self, key: KeyCode) -> bool {
        self.keyboard.just_pressed(key)
    }

    fn key_released(&self, key: KeyCode) -> bool {
        self.keyboard.just_released(key)
    }

    fn joystick_button(&self, joystick: usize, button: u8) -> bool {
        self.pads
            .get(joystick)
            .is_some_and(|(_, pad)| pad.buttons().is_held(button))
    }

    fn joystick_button_pressed(&self, joystick: usize, button: u8) -> bool {
        self.pads
            .get(joystick)
            .is_some_and(|(_, pad)| pad.buttons().just_pressed(button))
    }

    fn joystick_button_released(&self, joystick: usize, button: u8) -> bool {
        self.pads
            .get(joystick)
            .is_some_and(|(_, pad)| pad.buttons().just_released(button))
    }

    fn joystick_axis(&self, joystick: usize, axis: u8) -> f32 {
        self.pads
            .get(joystick)
            .map(|(_, pad)| pad.axis(axis))
            .unwrap_or(0.0)
    }

    fn joystick_axis_previous(&self, joystick: usize, axis: u8) -> f32 {
        self.pads
            .get(joystick)
            .map(|(_, pad)| pad.previous_axis(axis))
            .unwrap_or(0.0)
    }

    fn begin_frame(&mut self) {
        self.pump_events();
        self.sample_pads();
    }

    fn end_frame(&mut self) {
        self.keyboard.end_frame();
        for (_, pad) in &mut self.pads {
            pad.end_frame();
        }
    }
}
