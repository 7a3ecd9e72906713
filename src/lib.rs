// pad-roster: local multiplayer controller management
//
// Gamepads, keyboard and AI controllers behind one query API, bound to up to
// four players through join/leave scans.

pub mod core;
pub mod input;
pub mod session;

pub use input::{Axis, Button, ControllerManager, PlayerId, Stick, Trigger};
pub use session::{GameSession, LobbyEvents, SessionSettings};
