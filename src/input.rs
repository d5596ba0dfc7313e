//! Per-frame input intent.
//!
//! The core never reads devices. The window layer maps whatever it polls
//! into an [`InputIntent`] once per frame.

/// Signed movement and rotation amounts plus one-shot commands.
///
/// Amounts are usually -1, 0 or 1 for keys but any signed magnitude is
/// accepted, for analog input.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputIntent {
    /// Positive moves along the view direction.
    pub forward: f32,
    /// Positive strafes right.
    pub right: f32,
    /// Positive moves toward +Y, which is down.
    pub up: f32,
    /// Positive turns left.
    pub yaw: f32,
    /// Positive looks down.
    pub pitch: f32,
    pub reset_rotation: bool,
    pub reset_position: bool,
    pub quit: bool,
}

impl InputIntent {
    /// Intent with no movement and no commands.
    pub const IDLE: Self = Self {
        forward: 0.0,
        right: 0.0,
        up: 0.0,
        yaw: 0.0,
        pitch: 0.0,
        reset_rotation: false,
        reset_position: false,
        quit: false,
    };

    /// `1.0` if only `positive` is held, `-1.0` if only `negative`, else `0.0`.
    #[inline]
    pub fn axis(positive: bool, negative: bool) -> f32 {
        positive as i32 as f32 - negative as i32 as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_cancels_opposing_keys() {
        assert_eq!(InputIntent::axis(true, false), 1.0);
        assert_eq!(InputIntent::axis(false, true), -1.0);
        assert_eq!(InputIntent::axis(true, true), 0.0);
        assert_eq!(InputIntent::axis(false, false), 0.0);
    }

    #[test]
    fn idle_is_default() {
        assert_eq!(InputIntent::IDLE, InputIntent::default());
    }
}
