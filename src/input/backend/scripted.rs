// In-memory backend driven by code (headless hosts, replays, tests)

use super::{InputBackend, JoystickState};
use crate::input::state::EdgeState;
use winit::keyboard::KeyCode;

/// Backend whose device state is set explicitly by the caller
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    keyboard: EdgeState<KeyCode>,
    joysticks: Vec<JoystickState>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect a joystick and return its enumeration index
    pub fn plug(&mut self, name: impl Into<String>) -> usize {
        self.joysticks.push(JoystickState::new(name));
        self.joysticks.len() - 1
    }

    /// Disconnect a joystick; later joysticks shift down one index
    pub fn unplug(&mut self, joystick: usize) {
        if joystick < self.joysticks.len() {
            self.joysticks.remove(joystick);
        }
    }

    pub fn press_key(&mut self, key: KeyCode) {
        self.keyboard.press(key);
    }

    pub fn release_key(&mut self, key: KeyCode) {
        self.keyboard.release(key);
    }

    pub fn press_button(&mut self, joystick: usize, button: u8) {
        if let Some(state) = self.joysticks.get_mut(joystick) {
            state.buttons_mut().press(button);
        }
    }

    pub fn release_button(&mut self, joystick: usize, button: u8) {
        if let Some(state) = self.joysticks.get_mut(joystick) {
            state.buttons_mut().release(button);
        }
    }

    pub fn set_axis(&mut self, joystick: usize, axis: u8, value: f32) {
        if let Some(state) = self.joysticks.get_mut(joystick) {
            state.set_axis(axis, value);
        }
    }

    /// Raw state of a connected joystick, for writing whole samples
    pub fn joystick_mut(&mut self, joystick: usize) -> Option<&mut JoystickState> {
        self.joysticks.get_mut(joystick)
    }

    /// Release every key and button and zero every axis
    pub fn release_all(&mut self) {
        self.keyboard.replace_held([]);
        for joystick in &mut self.joysticks {
            joystick.buttons_mut().replace_held([]);
            joystick.clear_axes();
        }
    }
}

impl InputBackend for ScriptedBackend {
    fn joystick_names(&self) -> Vec<String> {
        self.joysticks.iter().map(|j| j.name().to_owned()).collect()
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
        self.joysticks
            .get(joystick)
            .is_some_and(|j| j.buttons().is_held(button))
    }

    fn joystick_button_pressed(&self, joystick: usize, button: u8) -> bool {
        self.joysticks
            .get(joystick)
            .is_some_and(|j| j.buttons().just_pressed(button))
    }

    fn joystick_button_released(&self, joystick: usize, button: u8) -> bool {
        self.joysticks
            .get(joystick)
            .is_some_and(|j| j.buttons().just_released(button))
    }

    fn joystick_axis(&self, joystick: usize, axis: u8) -> f32 {
        self.joysticks
            .get(joystick)
            .map(|j| j.axis(axis))
            .unwrap_or(0.0)
    }

    fn joystick_axis_previous(&self, joystick: usize, axis: u8) -> f32 {
        self.joysticks
            .get(joystick)
            .map(|j| j.previous_axis(axis))
            .unwrap_or(0.0)
    }

    fn end_frame(&mut self) {
        self.keyboard.end_frame();
        for joystick in &mut self.joysticks {
            joystick.end_frame();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::backend::raw;

    #[test]
    fn test_plug_and_names() {
        let mut backend = ScriptedBackend::new();
        assert_eq!(backend.plug("Xbox 360 Controller"), 0);
        assert_eq!(backend.plug("Wireless Controller"), 1);
        assert_eq!(
            backend.joystick_names(),
            vec!["Xbox 360 Controller", "Wireless Controller"]
        );
    }

    #[test]
    fn test_unplug_shifts_indices() {
        let mut backend = ScriptedBackend::new();
        backend.plug("first");
        backend.plug("second");
        backend.unplug(0);
        assert_eq!(backend.joystick_names(), vec!["second"]);

        // Out of range is ignored
        backend.unplug(5);
        assert_eq!(backend.joystick_names().len(), 1);
    }

    #[test]
    fn test_button_edges() {
        let mut backend = ScriptedBackend::new();
        let pad = backend.plug("pad");
        backend.press_button(pad, raw::BUTTON_START);

        assert!(backend.joystick_button(pad, raw::BUTTON_START));
        assert!(backend.joystick_button_pressed(pad, raw::BUTTON_START));

        backend.end_frame();
        assert!(backend.joystick_button(pad, raw::BUTTON_START));
        assert!(!backend.joystick_button_pressed(pad, raw::BUTTON_START));

        backend.release_button(pad, raw::BUTTON_START);
        assert!(backend.joystick_button_released(pad, raw::BUTTON_START));
    }

    #[test]
    fn test_unknown_joystick_is_neutral() {
        let backend = ScriptedBackend::new();
        assert!(!backend.joystick_button(3, raw::BUTTON_A));
        assert_eq!(backend.joystick_axis(3, raw::AXIS_LX), 0.0);
    }

    #[test]
    fn test_axis_is_clamped() {
        let mut backend = ScriptedBackend::new();
        let pad = backend.plug("pad");
        backend.set_axis(pad, raw::AXIS_LX, 3.0);
        assert_eq!(backend.joystick_axis(pad, raw::AXIS_LX), 1.0);
    }

    #[test]
    fn test_keyboard_edges() {
        let mut backend = ScriptedBackend::new();
        backend.press_key(KeyCode::Enter);
        assert!(backend.key_held(KeyCode::Enter));
        assert!(backend.key_pressed(KeyCode::Enter));

        backend.end_frame();
        backend.release_key(KeyCode::Enter);
        assert!(backend.key_released(KeyCode::Enter));
    }

    #[test]
    fn test_release_all() {
        let mut backend = ScriptedBackend::new();
        let pad = backend.plug("pad");
        backend.press_key(KeyCode::Space);
        backend.press_button(pad, raw::BUTTON_A);
        backend.set_axis(pad, raw::AXIS_LY, 0.8);
        backend.end_frame();

        backend.release_all();
        assert!(!backend.key_held(KeyCode::Space));
        assert!(backend.key_released(KeyCode::Space));
        assert!(backend.joystick_button_released(pad, raw::BUTTON_A));
        assert_eq!(backend.joystick_axis(pad, raw::AXIS_LY), 0.0);
        assert_eq!(backend.joystick_names(), vec!["pad"]);
    }
}
