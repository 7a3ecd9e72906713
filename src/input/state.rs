// Held / previous-frame state for edge-triggered queries

use std::collections::HashSet;
use std::hash::Hash;

/// Tracks which inputs are held now and which were held last frame.
///
/// Level queries read `held`; edge queries compare against the snapshot
/// taken at the last [`EdgeState::end_frame`].
#[derive(Debug, Clone)]
pub struct EdgeState<T: Copy + Eq + Hash> {
    /// Inputs that are currently held
    held: HashSet<T>,

    /// Inputs that were held at the end of the previous frame
    previous: HashSet<T>,

    /// Releases deferred until the press has been seen for one frame
    pending_release: HashSet<T>,
}

impl<T: Copy + Eq + Hash> EdgeState<T> {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            previous: HashSet::new(),
            pending_release: HashSet::new(),
        }
    }

    /// Check if an input is currently held
    pub fn is_held(&self, input: T) -> bool {
        self.held.contains(&input)
    }

    /// Check if an input went from released to held this frame
    pub fn just_pressed(&self, input: T) -> bool {
        self.held.contains(&input) && !self.previous.contains(&input)
    }

    /// Check if an input went from held to released this frame
    pub fn just_released(&self, input: T) -> bool {
        !self.held.contains(&input) && self.previous.contains(&input)
    }

    /// Mark an input as held
    pub fn press(&mut self, input: T) {
        self.pending_release.remove(&input);
        self.held.insert(input);
    }

    /// Mark an input as released immediately
    pub fn release(&mut self, input: T) {
        self.pending_release.remove(&input);
        self.held.remove(&input);
    }

    /// Release an input, but if it was pressed this frame keep it held until
    /// [`EdgeState::end_frame`] so a tap between two frames still registers
    pub fn release_after_frame(&mut self, input: T) {
        if self.just_pressed(input) {
            self.pending_release.insert(input);
        } else {
            self.release(input);
        }
    }

    /// Replace the held set wholesale, e.g. from a fresh hardware sample
    pub fn replace_held(&mut self, held: impl IntoIterator<Item = T>) {
        self.pending_release.clear();
        self.held.clear();
        self.held.extend(held);
    }

    /// Roll the held set into the previous-frame snapshot and apply deferred
    /// releases. Call this once per frame after all queries.
    pub fn end_frame(&mut self) {
        self.previous.clone_from(&self.held);
        for input in self.pending_release.drain() {
            self.held.remove(&input);
        }
    }

    /// Forget everything, including the previous-frame snapshot
    pub fn reset(&mut self) {
        self.pending_release.clear();
        self.held.clear();
        self.previous.clear();
    }

    /// All currently held inputs
    pub fn held(&self) -> impl Iterator<Item = T> + '_ {
        self.held.iter().copied()
    }
}

impl<T: Copy + Eq + Hash> Default for EdgeState<T> {
    fn default() -> Self {
        Self::new()
    }
}
