// Device classification from platform enumeration names
//
// Only the display name is available, so this is string sniffing: the first
// matching rule wins and anything unrecognised is treated as an Xbox One pad.

use super::device::Controller;
use super::profile::GamepadKind;
use log::debug;

/// Pick the gamepad family for a device name.
///
/// Rules are case-sensitive and checked in priority order:
/// "Wireless" (DualShock 4), "Logitech", "360", then Xbox One as the fallback.
pub fn classify_name(name: &str) -> GamepadKind {
    if name.contains("Wireless") {
        GamepadKind::Ps4
    } else if name.contains("Logitech") {
        GamepadKind::Logitech
    } else if name.contains("360") {
        GamepadKind::Xbox360
    } else {
        GamepadKind::XboxOne
    }
}

/// Build the controller for joystick `index` of the enumeration `names`.
/// Returns `None` when the index is out of range.
pub fn classify(names: &[String], index: usize) -> Option<Controller> {
    let name = names.get(index)?;
    let kind = classify_name(name);
    debug!("Joystick {} ({:?}) classified as {:?}", index, name, kind);
    Some(Controller::gamepad(kind, index))
}
