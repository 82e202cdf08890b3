//! Directional light state.

use crate::vector::Vector3;

/// A directional light, described only by the direction it shines in.
///
/// The direction is handed to the rendering collaborator as a 3-float
/// uniform payload alongside the camera's matrices.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Light {
    /// Direction the light travels, in world space.
    pub direction: Vector3,
}

impl Light {
    /// Creates a light shining in `direction`.
    pub const fn new(direction: Vector3) -> Self {
        Self { direction }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_payload_round_trips() {
        let light = Light::new(Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(light.direction.to_array(), [0.0, 0.0, -1.0]);
    }
}
