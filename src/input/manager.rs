// Controller manager - binds input devices to players and answers per-player queries

use super::ai::AiBrain;
use super::backend::InputBackend;
use super::classifier::classify;
use super::codes::{Axis, Button, Stick, Trigger};
use super::config::{ControllerSettings, KeyboardLayout};
use super::device::{ControlType, Controller, DeviceId};
use super::platform::Platform;
use super::player::{PlayerId, PlayerSlots};
use glam::Vec2;
use log::{debug, info};
use std::fmt;

/// Coordinates device classification, join/leave scans and per-player queries.
///
/// Every query keyed by [`PlayerId`] answers with a neutral value (0.0 or
/// `false`) for players with no controller, so UI code can poll all four
/// slots each frame regardless of how many are filled.
pub struct ControllerManager<B: InputBackend> {
    /// Raw device state source
    backend: B,

    settings: ControllerSettings,

    /// Controller bound to each player
    slots: PlayerSlots,

    /// Host OS, fixed at construction
    platform: Platform,
}

impl<B: InputBackend> ControllerManager<B> {
    /// Create a manager with default settings
    pub fn new(backend: B) -> Self {
        Self::with_settings(backend, ControllerSettings::default())
    }

    pub fn with_settings(backend: B, settings: ControllerSettings) -> Self {
        let platform = Platform::detect();
        info!("Controller manager started on {}", platform);
        Self {
            backend,
            settings,
            slots: PlayerSlots::new(),
            platform,
        }
    }

    /// Host OS the manager was created on
    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Raw device source, e.g. to forward window events
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    /// Replace the keyboard layout, including for a keyboard already playing
    pub fn set_keyboard_layout(&mut self, layout: KeyboardLayout) {
        for (_, controller) in self.slots.iter_mut() {
            if let Controller::Keyboard(bound) = controller {
                bound.clone_from(&layout);
            }
        }
        self.settings.keyboard = layout;
    }

    /// Refresh device state. Call once at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.backend.begin_frame();
    }

    /// Roll edge state. Call once per frame after all queries.
    pub fn end_frame(&mut self) {
        self.backend.end_frame();
        for (_, controller) in self.slots.iter_mut() {
            controller.end_frame();
        }
    }

    /// Remove every player
    pub fn clear_players(&mut self) {
        self.slots.clear();
        info!("All players cleared");
    }

    /// Forget all bindings for a fresh game
    pub fn reset_inputs(&mut self) {
        self.slots.clear();
        info!("Inputs reset");
    }

    /// Number of players with a controller
    pub fn num_players(&self) -> usize {
        self.slots.len()
    }

    /// Filled slots in player order
    pub fn players(&self) -> impl Iterator<Item = (PlayerId, &Controller)> {
        self.slots.iter()
    }

    /// Controller bound to a player
    pub fn controller(&self, player: PlayerId) -> Option<&Controller> {
        self.slots.get(player)
    }

    /// Decision state of an AI player, for AI logic to drive
    pub fn ai_brain_mut(&mut self, player: PlayerId) -> Option<&mut AiBrain> {
        self.slots.get_mut(player)?.ai_brain_mut()
    }

    /// Controller family of a player, `ControlType::None` when unassigned
    pub fn player_control_type(&self, player: PlayerId) -> ControlType {
        self.slots
            .get(player)
            .map(Controller::control_type)
            .unwrap_or(ControlType::None)
    }

    /// Check if a player is driven by AI
    pub fn is_ai_controller(&self, player: PlayerId) -> bool {
        self.slots.get(player).is_some_and(Controller::is_ai)
    }

    /// Player controlled by a device, or `PlayerId::None`
    pub fn player_for_device(&self, device: DeviceId) -> PlayerId {
        self.slots.player_of(device)
    }

    /// Classify the joystick at `index` of the current enumeration
    pub fn controller_type(&self, index: usize) -> Option<Controller> {
        classify(&self.backend.joystick_names(), index)
    }

    fn keyboard_controller(&self) -> Controller {
        Controller::keyboard(self.settings.keyboard.clone())
    }

    /// Join scan: bind the first unassigned device holding `connect` to the
    /// lowest free player. The keyboard is checked before joysticks.
    /// At most one player joins per call.
    pub fn add_player(&mut self, connect: Button) -> bool {
        let keyboard = self.keyboard_controller();
        if !self.slots.contains(keyboard.id()) && keyboard.get_button(&self.backend, connect) {
            if let Some(player) = self.slots.assign(keyboard) {
                info!("{}: Keyboard added", player);
                return true;
            }
        }

        if !self.slots.is_full() {
            let names = self.backend.joystick_names();
            for index in 0..names.len() {
                let Some(controller) = classify(&names, index) else {
                    continue;
                };
                if self.slots.contains(controller.id())
                    || !controller.get_button(&self.backend, connect)
                {
                    continue;
                }
                let label = controller.to_string();
                if let Some(player) = self.slots.assign(controller) {
                    info!("{}: {} added", player, label);
                    return true;
                }
            }
        }

        false
    }

    /// Add a CPU player. Any device holding `connect` (assigned or not)
    /// authorizes the add; the slot is always bound to a fresh AI controller.
    pub fn add_ai(&mut self, connect: Button) -> bool {
        if self.slots.is_full() {
            return false;
        }

        let names = self.backend.joystick_names();
        let mut candidates = vec![self.keyboard_controller()];
        candidates.extend((0..names.len()).filter_map(|index| classify(&names, index)));

        let Some(source) = candidates
            .iter()
            .find(|controller| controller.get_button(&self.backend, connect))
        else {
            return false;
        };
        let source = source.to_string();

        match self.slots.assign(Controller::ai()) {
            Some(player) => {
                info!("{}: AI added (requested from {})", player, source);
                true
            }
            None => false,
        }
    }

    /// Removal scan: evict the first player, in slot order, whose controller
    /// holds `removal`. At most one player leaves per call.
    pub fn allow_player_removal(&mut self, removal: Button) -> Option<PlayerId> {
        let player = self
            .slots
            .iter()
            .find(|(_, controller)| controller.get_button(&self.backend, removal))
            .map(|(player, _)| player)?;

        let controller = self.slots.remove(player)?;
        info!("{}: {} removed", player, controller);
        Some(player)
    }

    /// Axis value for a player in -1.0..=1.0, 0.0 when unassigned
    pub fn get_axis(&self, axis: Axis, player: PlayerId, raw: bool) -> f32 {
        self.slots
            .get(player)
            .map(|c| c.get_axis(&self.backend, axis, raw))
            .unwrap_or(0.0)
    }

    /// Trigger pull for a player in 0.0..=1.0, 0.0 when unassigned
    pub fn get_trigger(&self, trigger: Trigger, player: PlayerId, raw: bool) -> f32 {
        self.slots
            .get(player)
            .map(|c| c.get_trigger(&self.backend, trigger, raw))
            .unwrap_or(0.0)
    }

    /// Stick vector for a player, zero when unassigned
    pub fn get_stick(&self, stick: Stick, player: PlayerId, raw: bool) -> Vec2 {
        self.slots
            .get(player)
            .map(|c| c.get_stick(&self.backend, stick, raw))
            .unwrap_or(Vec2::ZERO)
    }

    /// Check if a player holds a button
    pub fn get_button(&self, button: Button, player: PlayerId) -> bool {
        self.slots
            .get(player)
            .is_some_and(|c| c.get_button(&self.backend, button))
    }

    /// Check if a player pressed a button this frame
    pub fn get_button_down(&self, button: Button, player: PlayerId) -> bool {
        self.slots
            .get(player)
            .is_some_and(|c| c.get_button_down(&self.backend, button))
    }

    /// Check if a player released a button this frame
    pub fn get_button_up(&self, button: Button, player: PlayerId) -> bool {
        self.slots
            .get(player)
            .is_some_and(|c| c.get_button_up(&self.backend, button))
    }

    /// Check if every assigned player holds `button` (or pressed it this
    /// frame when `down`). False with no players.
    pub fn get_button_all(&self, button: Button, down: bool) -> bool {
        if self.slots.is_empty() {
            return false;
        }
        let result = self.slots.iter().all(|(_, c)| {
            if down {
                c.get_button_down(&self.backend, button)
            } else {
                c.get_button(&self.backend, button)
            }
        });
        debug!("All players {:?} {}: {}", button, if down { "down" } else { "held" }, result);
        result
    }
}

impl<B: InputBackend> fmt::Display for ControllerManager<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.platform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::backend::{raw, ScriptedBackend};
    use crate::input::profile::GamepadKind;
    use approx::assert_relative_eq;
    use winit::keyboard::KeyCode;

    fn manager() -> ControllerManager<ScriptedBackend> {
        ControllerManager::new(ScriptedBackend::new())
    }

    /// Plug a pad and hold its Start button
    fn plug_pressing_start(m: &mut ControllerManager<ScriptedBackend>, name: &str) -> usize {
        let pad = m.backend_mut().plug(name);
        m.backend_mut().press_button(pad, raw::BUTTON_START);
        pad
    }

    #[test]
    fn test_manager_creation() {
        let m = manager();
        assert_eq!(m.num_players(), 0);
        assert_eq!(m.platform(), Platform::detect());
        assert_eq!(m.to_string(), Platform::detect().to_string());
    }

    #[test]
    fn test_unassigned_players_are_neutral() {
        let mut m = manager();
        let pad = plug_pressing_start(&mut m, "Xbox 360 Controller");
        m.backend_mut().set_axis(pad, raw::AXIS_LX, 1.0);
        m.backend_mut().set_axis(pad, raw::AXIS_LT, 1.0);

        for player in [PlayerId::None, PlayerId::One, PlayerId::Two, PlayerId::Three, PlayerId::Four] {
            assert!(!m.get_button(Button::Start, player));
            assert!(!m.get_button_down(Button::Start, player));
            assert!(!m.get_button_up(Button::Start, player));
            assert_eq!(m.get_axis(Axis::LeftStickX, player, false), 0.0);
            assert_eq!(m.get_axis(Axis::LeftStickX, player, true), 0.0);
            assert_eq!(m.get_trigger(Trigger::Left, player, false), 0.0);
            assert_eq!(m.get_stick(Stick::Left, player, false), Vec2::ZERO);
            assert_eq!(m.player_control_type(player), ControlType::None);
            assert!(!m.is_ai_controller(player));
        }
    }

    #[test]
    fn test_keyboard_then_pad_join() {
        let mut m = manager();
        m.backend_mut().press_key(KeyCode::Enter);
        assert!(m.add_player(Button::Start));
        assert_eq!(m.player_control_type(PlayerId::One), ControlType::Keyboard);

        plug_pressing_start(&mut m, "Xbox 360 Controller");
        assert!(m.add_player(Button::Start));
        assert_eq!(m.player_control_type(PlayerId::Two), ControlType::Xbox);
        assert_eq!(m.num_players(), 2);
    }

    #[test]
    fn test_one_join_per_scan() {
        let mut m = manager();
        plug_pressing_start(&mut m, "Xbox 360 Controller");
        plug_pressing_start(&mut m, "Wireless Controller");
        // PS4 layout: Options (9) is Start
        m.backend_mut().press_button(1, 9);

        assert!(m.add_player(Button::Start));
        assert_eq!(m.num_players(), 1);
        assert!(m.add_player(Button::Start));
        assert_eq!(m.num_players(), 2);
        assert_eq!(m.player_control_type(PlayerId::Two), ControlType::Ps4);
    }

    #[test]
    fn test_already_assigned_device_cannot_rejoin() {
        let mut m = manager();
        plug_pressing_start(&mut m, "Xbox One Controller");
        assert!(m.add_player(Button::Start));

        // Still holding start on the same pad
        assert!(!m.add_player(Button::Start));
        assert_eq!(m.num_players(), 1);
        assert_eq!(
            m.controller(PlayerId::One).map(Controller::id),
            Some(DeviceId::gamepad(GamepadKind::XboxOne, 0))
        );
    }

    #[test]
    fn test_no_join_without_connect_button() {
        let mut m = manager();
        m.backend_mut().plug("Xbox One Controller");
        m.backend_mut().press_key(KeyCode::Space);
        assert!(!m.add_player(Button::Start));
        assert_eq!(m.num_players(), 0);
    }

    #[test]
    fn test_join_fills_lowest_free_slot() {
        let mut m = manager();
        for name in ["pad a", "pad b", "pad c"] {
            plug_pressing_start(&mut m, name);
            assert!(m.add_player(Button::Start));
        }

        // Player Two leaves with Back
        m.backend_mut().press_button(1, raw::BUTTON_BACK);
        assert_eq!(m.allow_player_removal(Button::Back), Some(PlayerId::Two));
        m.backend_mut().release_button(1, raw::BUTTON_BACK);

        // The departed pad joins again and takes Two, not Four
        assert!(m.add_player(Button::Start));
        assert_eq!(m.player_for_device(DeviceId::gamepad(GamepadKind::XboxOne, 1)), PlayerId::Two);
        assert!(m.controller(PlayerId::Four).is_none());
    }

    #[test]
    fn test_fifth_join_fails() {
        let mut m = manager();
        for i in 0..5 {
            plug_pressing_start(&mut m, &format!("pad {i}"));
        }
        for _ in 0..4 {
            assert!(m.add_player(Button::Start));
        }
        assert!(!m.add_player(Button::Start));

        // The keyboard cannot sneak in either
        m.backend_mut().press_key(KeyCode::Enter);
        assert!(!m.add_player(Button::Start));
        assert_eq!(m.num_players(), 4);
    }

    #[test]
    fn test_add_ai_binds_ai_not_source() {
        let mut m = manager();
        m.backend_mut().press_key(KeyCode::KeyR); // keyboard Y
        assert!(m.add_ai(Button::Y));

        assert!(m.is_ai_controller(PlayerId::One));
        assert_eq!(m.player_control_type(PlayerId::One), ControlType::None);
        assert_eq!(m.player_for_device(DeviceId::keyboard()), PlayerId::None);
    }

    #[test]
    fn test_add_ai_authorized_by_assigned_device() {
        let mut m = manager();
        let pad = plug_pressing_start(&mut m, "Xbox 360 Controller");
        assert!(m.add_player(Button::Start));

        m.backend_mut().press_button(pad, raw::BUTTON_Y);
        assert!(m.add_ai(Button::Y));
        assert!(m.add_ai(Button::Y));
        assert_eq!(m.num_players(), 3);
        assert!(m.is_ai_controller(PlayerId::Two));
        assert!(m.is_ai_controller(PlayerId::Three));
    }

    #[test]
    fn test_add_ai_requires_button() {
        let mut m = manager();
        m.backend_mut().plug("Xbox 360 Controller");
        assert!(!m.add_ai(Button::Y));
        assert_eq!(m.num_players(), 0);
    }

    #[test]
    fn test_add_ai_at_capacity() {
        let mut m = manager();
        m.backend_mut().press_key(KeyCode::KeyR);
        for _ in 0..4 {
            assert!(m.add_ai(Button::Y));
        }
        assert!(!m.add_ai(Button::Y));
        assert_eq!(m.num_players(), 4);
    }

    #[test]
    fn test_removal_affects_only_one_slot() {
        let mut m = manager();
        for name in ["pad a", "pad b", "pad c"] {
            plug_pressing_start(&mut m, name);
            assert!(m.add_player(Button::Start));
        }
        m.backend_mut().press_button(0, raw::BUTTON_BACK);
        m.backend_mut().press_button(2, raw::BUTTON_BACK);

        // Table order: One goes first, Three stays this scan
        assert_eq!(m.allow_player_removal(Button::Back), Some(PlayerId::One));
        assert_eq!(m.num_players(), 2);
        assert!(m.controller(PlayerId::Two).is_some());
        assert!(m.controller(PlayerId::Three).is_some());

        assert_eq!(m.allow_player_removal(Button::Back), Some(PlayerId::Three));
        assert_eq!(m.allow_player_removal(Button::Back), None);
        assert_eq!(m.num_players(), 1);
    }

    #[test]
    fn test_ai_removal_from_brain() {
        let mut m = manager();
        m.backend_mut().press_key(KeyCode::KeyR);
        assert!(m.add_ai(Button::Y));

        if let Some(brain) = m.ai_brain_mut(PlayerId::One) {
            brain.press(Button::Back);
        }
        assert_eq!(m.allow_player_removal(Button::Back), Some(PlayerId::One));
        assert_eq!(m.num_players(), 0);
    }

    #[test]
    fn test_queries_forward_to_bound_controller() {
        let mut m = manager();
        let pad = plug_pressing_start(&mut m, "Xbox 360 Controller");
        assert!(m.add_player(Button::Start));

        m.backend_mut().set_axis(pad, raw::AXIS_LX, 1.0);
        m.backend_mut().set_axis(pad, raw::AXIS_LY, 0.1);
        m.backend_mut().set_axis(pad, raw::AXIS_RT, 0.5);

        assert!(m.get_button(Button::Start, PlayerId::One));
        assert_relative_eq!(m.get_axis(Axis::LeftStickX, PlayerId::One, false), 1.0);
        assert_eq!(m.get_axis(Axis::LeftStickY, PlayerId::One, false), 0.0);
        assert_relative_eq!(m.get_axis(Axis::LeftStickY, PlayerId::One, true), 0.1);
        assert!(m.get_trigger(Trigger::Right, PlayerId::One, false) > 0.0);
        assert_relative_eq!(m.get_stick(Stick::Left, PlayerId::One, false).x, 1.0);
    }

    #[test]
    fn test_button_down_lasts_one_frame() {
        let mut m = manager();
        m.backend_mut().press_key(KeyCode::Enter);
        assert!(m.add_player(Button::Start));
        assert!(m.get_button_down(Button::Start, PlayerId::One));

        m.end_frame();
        assert!(m.get_button(Button::Start, PlayerId::One));
        assert!(!m.get_button_down(Button::Start, PlayerId::One));

        m.backend_mut().release_key(KeyCode::Enter);
        assert!(m.get_button_up(Button::Start, PlayerId::One));
    }

    #[test]
    fn test_ai_edges_roll_with_frames() {
        let mut m = manager();
        m.backend_mut().press_key(KeyCode::KeyR);
        assert!(m.add_ai(Button::Y));

        if let Some(brain) = m.ai_brain_mut(PlayerId::One) {
            brain.press(Button::A);
        }
        assert!(m.get_button_down(Button::A, PlayerId::One));
        m.end_frame();
        assert!(!m.get_button_down(Button::A, PlayerId::One));
        assert!(m.get_button(Button::A, PlayerId::One));
    }

    #[test]
    fn test_get_button_all() {
        let mut m = manager();
        assert!(!m.get_button_all(Button::A, false));

        m.backend_mut().press_key(KeyCode::Enter);
        assert!(m.add_player(Button::Start));
        let pad = plug_pressing_start(&mut m, "Xbox 360 Controller");
        assert!(m.add_player(Button::Start));

        m.backend_mut().press_key(KeyCode::Space);
        assert!(!m.get_button_all(Button::A, false));

        m.backend_mut().press_button(pad, raw::BUTTON_A);
        assert!(m.get_button_all(Button::A, false));
        assert!(m.get_button_all(Button::A, true));

        m.end_frame();
        assert!(!m.get_button_all(Button::A, true));
    }

    #[test]
    fn test_clear_and_reset() {
        let mut m = manager();
        m.backend_mut().press_key(KeyCode::Enter);
        assert!(m.add_player(Button::Start));
        m.clear_players();
        assert_eq!(m.num_players(), 0);

        assert!(m.add_player(Button::Start));
        m.reset_inputs();
        assert_eq!(m.num_players(), 0);
        assert!(!m.get_button(Button::Start, PlayerId::One));
    }

    #[test]
    fn test_controller_type_lookup() {
        let mut m = manager();
        m.backend_mut().plug("Logitech Dual Action");
        assert_eq!(
            m.controller_type(0).map(|c| c.id()),
            Some(DeviceId::gamepad(GamepadKind::Logitech, 0))
        );
        assert!(m.controller_type(1).is_none());
    }

    #[test]
    fn test_hot_unplug_reresolves() {
        let mut m = manager();
        m.backend_mut().plug("Xbox 360 Controller");
        m.backend_mut().plug("Wireless Controller");
        m.backend_mut().unplug(0);
        assert_eq!(
            m.controller_type(0).map(|c| c.id()),
            Some(DeviceId::gamepad(GamepadKind::Ps4, 0))
        );
    }

    #[test]
    fn test_set_keyboard_layout_updates_bound_keyboard() {
        let mut m = manager();
        m.backend_mut().press_key(KeyCode::Enter);
        assert!(m.add_player(Button::Start));

        let mut layout = KeyboardLayout::default();
        layout.bind_button(Button::Start, KeyCode::KeyP);
        m.set_keyboard_layout(layout);

        assert!(!m.get_button(Button::Start, PlayerId::One));
        m.backend_mut().press_key(KeyCode::KeyP);
        assert!(m.get_button(Button::Start, PlayerId::One));
        assert_eq!(
            m.settings().keyboard.button_key(Button::Start),
            Some(KeyCode::KeyP)
        );
    }
}
