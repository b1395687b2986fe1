//! Seams between the transition core and whatever physics engine hosts it.

use engine_core::Vec3;
use rapier3d::prelude::RigidBodyHandle;

/// Owner of the process-wide gravity parameter.
pub trait GravityBackend {
    fn gravity(&self) -> Vec3;
    fn set_gravity(&mut self, gravity: Vec3);
}

/// Per-body operations the fallback integrator needs from full physics.
pub trait BodyDriver {
    /// Accelerate `body` by `acceleration` for the next simulation step only.
    fn apply_acceleration(&mut self, body: RigidBodyHandle, acceleration: Vec3);

    /// Current world translation of `body`, if it still exists.
    fn body_translation(&self, body: RigidBodyHandle) -> Option<Vec3>;
}

/// Bare gravity parameter with no simulation behind it.
///
/// Handy for hosts that only run fallback integration, and for tests.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GravityCell(pub Vec3);

impl GravityBackend for GravityCell {
    fn gravity(&self) -> Vec3 {
        self.0
    }

    fn set_gravity(&mut self, gravity: Vec3) {
        self.0 = gravity;
    }
}
