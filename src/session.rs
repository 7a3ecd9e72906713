// Game session - owns the controller manager for the lifetime of a game

use crate::input::{Button, ControllerManager, InputBackend, PlayerId};
use log::info;

/// Buttons used by the join/leave lobby
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    /// Held on an unassigned device to join
    pub connect_button: Button,

    /// Held by a player to leave
    pub removal_button: Button,

    /// Held on any device to add a CPU player
    pub ai_button: Button,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            connect_button: Button::Start,
            removal_button: Button::Back,
            ai_button: Button::Y,
        }
    }
}

/// What changed in the roster during one lobby frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LobbyEvents {
    pub joined: bool,
    pub ai_added: bool,
    pub removed: Option<PlayerId>,
}

impl LobbyEvents {
    pub fn changed(&self) -> bool {
        self.joined || self.ai_added || self.removed.is_some()
    }
}

/// Single owner of the controller manager.
///
/// Gameplay code borrows the manager through the session rather than
/// reaching for a global.
pub struct GameSession<B: InputBackend> {
    controllers: ControllerManager<B>,
    settings: SessionSettings,

    /// Whether players may currently join and leave
    lobby_open: bool,
}

impl<B: InputBackend> GameSession<B> {
    pub fn new(controllers: ControllerManager<B>, settings: SessionSettings) -> Self {
        Self {
            controllers,
            settings,
            lobby_open: true,
        }
    }

    /// Manager for gameplay queries
    pub fn controllers(&self) -> &ControllerManager<B> {
        &self.controllers
    }

    pub fn controllers_mut(&mut self) -> &mut ControllerManager<B> {
        &mut self.controllers
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn is_lobby_open(&self) -> bool {
        self.lobby_open
    }

    /// Stop accepting joins and leaves, e.g. when a match starts
    pub fn close_lobby(&mut self) {
        if self.lobby_open {
            self.lobby_open = false;
            info!("Lobby closed with {} player(s)", self.controllers.num_players());
        }
    }

    pub fn open_lobby(&mut self) {
        if !self.lobby_open {
            self.lobby_open = true;
            info!("Lobby opened");
        }
    }

    /// Start over: drop every player and reopen the lobby
    pub fn new_game(&mut self) {
        self.controllers.reset_inputs();
        self.open_lobby();
    }

    /// Sample devices and, while the lobby is open, run one join, AI and
    /// removal scan. Call at the start of each frame.
    pub fn begin_frame(&mut self) -> LobbyEvents {
        self.controllers.begin_frame();
        if !self.lobby_open {
            return LobbyEvents::default();
        }

        LobbyEvents {
            joined: self.controllers.add_player(self.settings.connect_button),
            ai_added: self.controllers.add_ai(self.settings.ai_button),
            removed: self
                .controllers
                .allow_player_removal(self.settings.removal_button),
        }
    }

    /// Call once per frame after gameplay has read its input
    pub fn end_frame(&mut self) {
        self.controllers.end_frame();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::backend::raw;
    use crate::input::{ControlType, ScriptedBackend};
    use winit::keyboard::KeyCode;

    fn session() -> GameSession<ScriptedBackend> {
        GameSession::new(
            ControllerManager::new(ScriptedBackend::new()),
            SessionSettings::default(),
        )
    }

    #[test]
    fn test_session_starts_with_open_lobby() {
        let session = session();
        assert!(session.is_lobby_open());
        assert_eq!(session.controllers().num_players(), 0);
        assert_eq!(session.settings().connect_button, Button::Start);
    }

    #[test]
    fn test_lobby_join_and_leave() {
        let mut session = session();
        let pad = session.controllers_mut().backend_mut().plug("Wireless Controller");
        // PS4 Options
        session.controllers_mut().backend_mut().press_button(pad, 9);

        let events = session.begin_frame();
        assert!(events.joined);
        assert!(events.changed());
        assert_eq!(
            session.controllers().player_control_type(PlayerId::One),
            ControlType::Ps4
        );
        session.end_frame();

        // Release Options, hold Share
        let backend = session.controllers_mut().backend_mut();
        backend.release_button(pad, 9);
        backend.press_button(pad, 8);

        let events = session.begin_frame();
        assert_eq!(events.removed, Some(PlayerId::One));
        assert_eq!(session.controllers().num_players(), 0);
    }

    #[test]
    fn test_lobby_adds_ai() {
        let mut session = session();
        session.controllers_mut().backend_mut().press_key(KeyCode::KeyR);

        let events = session.begin_frame();
        assert!(events.ai_added);
        assert!(!events.joined);
        assert!(session.controllers().is_ai_controller(PlayerId::One));
    }

    #[test]
    fn test_closed_lobby_ignores_scans() {
        let mut session = session();
        session.close_lobby();
        let pad = session.controllers_mut().backend_mut().plug("Xbox 360 Controller");
        session
            .controllers_mut()
            .backend_mut()
            .press_button(pad, raw::BUTTON_START);

        let events = session.begin_frame();
        assert!(!events.changed());
        assert_eq!(session.controllers().num_players(), 0);
    }

    #[test]
    fn test_new_game_resets_players() {
        let mut session = session();
        session.controllers_mut().backend_mut().press_key(KeyCode::Enter);
        assert!(session.begin_frame().joined);
        session.end_frame();
        session.close_lobby();

        session.new_game();
        assert!(session.is_lobby_open());
        assert_eq!(session.controllers().num_players(), 0);
    }
}
