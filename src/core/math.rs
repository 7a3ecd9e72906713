// Math utilities for analog input normalization

/// Clamp a value between min and max
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Zero out values inside the deadzone and rescale the rest linearly,
/// so the deadzone boundary maps to 0.0 and full deflection stays at ±1.0.
pub fn apply_deadzone(value: f32, deadzone: f32) -> f32 {
    let value = clamp(value, -1.0, 1.0);
    let magnitude = value.abs();
    if magnitude <= deadzone {
        return 0.0;
    }
    value.signum() * clamp((magnitude - deadzone) / (1.0 - deadzone), 0.0, 1.0)
}

/// Map a bipolar axis reading (-1.0 released, 1.0 fully pressed) to 0.0..=1.0
pub fn bipolar_to_unit(value: f32) -> f32 {
    clamp((value + 1.0) / 2.0, 0.0, 1.0)
}

/// Digital axis from a pair of opposing inputs
pub fn digital_axis(negative: bool, positive: bool) -> f32 {
    let mut value = 0.0;
    if negative {
        value -= 1.0;
    }
    if positive {
        value += 1.0;
    }
    value
}
