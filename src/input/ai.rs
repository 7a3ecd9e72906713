// Decision state for AI-driven virtual controllers

use super::codes::{Axis, Button, Trigger};
use super::state::EdgeState;

/// What an AI player is "holding" this frame.
///
/// AI logic writes intents here; the owning controller reads them back through
/// the same queries a physical pad answers. Nothing is polled from hardware.
#[derive(Debug, Clone, Default)]
pub struct AiBrain {
    buttons: EdgeState<Button>,
    axes: [f32; Axis::COUNT],
    triggers: [f32; Trigger::COUNT],
}

impl AiBrain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, button: Button) {
        self.buttons.press(button);
    }

    pub fn release(&mut self, button: Button) {
        self.buttons.release(button);
    }

    /// Set a stick deflection, clamped to -1.0..=1.0
    pub fn set_axis(&mut self, axis: Axis, value: f32) {
        self.axes[axis.index()] = value.clamp(-1.0, 1.0);
    }

    /// Set a trigger pull, clamped to 0.0..=1.0
    pub fn set_trigger(&mut self, trigger: Trigger, value: f32) {
        self.triggers[trigger.index()] = value.clamp(0.0, 1.0);
    }

    /// Let go of everything
    pub fn release_all(&mut self) {
        self.buttons.replace_held([]);
        self.axes = [0.0; Axis::COUNT];
        self.triggers = [0.0; Trigger::COUNT];
    }

    pub fn is_held(&self, button: Button) -> bool {
        self.buttons.is_held(button)
    }

    pub fn just_pressed(&self, button: Button) -> bool {
        self.buttons.just_pressed(button)
    }

    pub fn just_released(&self, button: Button) -> bool {
        self.buttons.just_released(button)
    }

    pub fn axis(&self, axis: Axis) -> f32 {
        self.axes[axis.index()]
    }

    pub fn trigger(&self, trigger: Trigger) -> f32 {
        self.triggers[trigger.index()]
    }

    pub(crate) fn end_frame(&mut self) {
        self.buttons.end_frame();
    }
}
