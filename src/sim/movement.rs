//! Player movement driver
//!
//! Each physics step the two input axes become a planar force request for
//! the player body. Integration, friction, and collision response belong
//! to the host physics engine.

use glam::Vec3;

/// Input axes sampled for one physics step, each in [-1, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoveInput {
    /// Left/right axis, mapped to world X
    pub horizontal: f32,
    /// Forward/back axis, mapped to world Z
    pub vertical: f32,
}

/// Force to apply to the player body for this step: the axes span the
/// ground plane (Y stays zero) and scale by the configured speed.
pub fn drive_force(input: MoveInput, speed: f32) -> Vec3 {
    Vec3::new(input.horizontal, 0.0, input.vertical) * speed
}
