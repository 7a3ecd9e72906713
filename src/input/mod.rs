// Controller input system
//
// This module puts gamepads of different vendors, the keyboard and AI-driven
// virtual controllers behind one query interface, and binds them to up to
// four local players.
//
// ## Architecture
//
// - `codes`: Logical buttons, axes and triggers
// - `backend`: Raw device state (gilrs + winit on desktop, scripted for headless use)
// - `profile`: Vendor layouts mapping logical codes to raw indices
// - `device`: The `Controller` wrapper and device identity
// - `classifier`: Picks a gamepad family from its enumeration name
// - `player`: Player IDs and the four-slot table
// - `manager`: Join/leave scans and per-player queries
//
// ## Usage Example
//
// ```rust
// use pad_roster::input::{Button, Axis, ControllerManager, PlayerId, ScriptedBackend};
//
// let mut controllers = ControllerManager::new(ScriptedBackend::new());
//
// // Once per frame
// controllers.begin_frame();
// controllers.add_player(Button::Start);
// controllers.allow_player_removal(Button::Back);
//
// for player in PlayerId::ALL {
//     let x = controllers.get_axis(Axis::LeftStickX, player, false);
//     if controllers.get_button_down(Button::A, player) {
//         // Player just pressed A
//     }
// }
// controllers.end_frame();
// ```

pub mod ai;
pub mod backend;
pub mod classifier;
pub mod codes;
pub mod config;
pub mod device;
pub mod manager;
pub mod platform;
pub mod player;
pub mod profile;
pub mod state;

// Re-export commonly used types
pub use ai::AiBrain;
pub use backend::{BackendError, DesktopBackend, InputBackend, ScriptedBackend};
pub use codes::{Axis, Button, Stick, Trigger};
pub use config::{ControllerSettings, KeyboardLayout};
pub use device::{ControlType, Controller, DeviceId, DeviceKind, DEADZONE};
pub use manager::ControllerManager;
pub use platform::Platform;
pub use player::{PlayerId, PlayerSlots, MAX_PLAYERS};
pub use profile::GamepadKind;
