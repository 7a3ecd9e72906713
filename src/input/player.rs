// Player identities and the four-slot controller table

use super::device::{Controller, DeviceId};
use std::fmt;

/// Maximum number of local players
pub const MAX_PLAYERS: usize = 4;

/// Player identity. `None` means "unassigned" and never names a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum PlayerId {
    #[default]
    None,
    One,
    Two,
    Three,
    Four,
}

impl PlayerId {
    /// Every assignable player, in slot order
    pub const ALL: [PlayerId; MAX_PLAYERS] =
        [PlayerId::One, PlayerId::Two, PlayerId::Three, PlayerId::Four];

    /// Zero-based slot for this player, `None` for the sentinel
    pub fn slot_index(self) -> Option<usize> {
        match self {
            PlayerId::None => None,
            PlayerId::One => Some(0),
            PlayerId::Two => Some(1),
            PlayerId::Three => Some(2),
            PlayerId::Four => Some(3),
        }
    }

    pub fn from_slot_index(index: usize) -> PlayerId {
        Self::ALL.get(index).copied().unwrap_or(PlayerId::None)
    }

    pub fn is_none(self) -> bool {
        self == PlayerId::None
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Controllers bound to players, indexed by `PlayerId` minus one.
///
/// A physical device or the keyboard can hold at most one slot. AI
/// controllers share one identity and may fill several.
#[derive(Debug, Clone, Default)]
pub struct PlayerSlots {
    slots: [Option<Controller>; MAX_PLAYERS],
}

impl PlayerSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of filled slots
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() == MAX_PLAYERS
    }

    pub fn get(&self, player: PlayerId) -> Option<&Controller> {
        self.slots.get(player.slot_index()?)?.as_ref()
    }

    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut Controller> {
        self.slots.get_mut(player.slot_index()?)?.as_mut()
    }

    /// Check if a device already controls some player
    pub fn contains(&self, device: DeviceId) -> bool {
        !self.player_of(device).is_none()
    }

    /// First player controlled by `device`, or `PlayerId::None`
    pub fn player_of(&self, device: DeviceId) -> PlayerId {
        self.iter()
            .find(|(_, controller)| controller.id() == device)
            .map(|(player, _)| player)
            .unwrap_or(PlayerId::None)
    }

    /// Lowest-numbered empty slot
    pub fn first_free(&self) -> Option<PlayerId> {
        self.slots
            .iter()
            .position(|slot| slot.is_none())
            .map(PlayerId::from_slot_index)
    }

    /// Bind a controller to the lowest free player.
    ///
    /// Returns `None` when the table is full, or when a non-AI device is
    /// already bound to another player.
    pub fn assign(&mut self, controller: Controller) -> Option<PlayerId> {
        if !controller.is_ai() && self.contains(controller.id()) {
            return None;
        }
        let player = self.first_free()?;
        let index = player.slot_index()?;
        self.slots[index] = Some(controller);
        Some(player)
    }

    /// Unbind a player, returning its controller
    pub fn remove(&mut self, player: PlayerId) -> Option<Controller> {
        self.slots.get_mut(player.slot_index()?)?.take()
    }

    pub fn clear(&mut self) {
        self.slots = Default::default();
    }

    /// Filled slots in player order
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &Controller)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|c| (PlayerId::from_slot_index(i), c)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut Controller)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_mut().map(|c| (PlayerId::from_slot_index(i), c)))
    }
}
