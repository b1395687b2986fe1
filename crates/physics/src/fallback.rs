//! Fallback gravity for entities that full physics does not own.
//!
//! Each [`FallbackGravity`] reads the global gravity vector once per step. Entities
//! with a [`PhysicsBody`] are accelerated through the [`BodyDriver`]; everything else
//! is integrated here by hand. Either way, crossing the ground height lands the
//! entity and emits a single [`Impact`].

use crate::backend::BodyDriver;
use crate::collision::PhysicsBody;
use engine_core::{Transform, Vec3, UP};
use hecs::{Entity, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallPhase {
    /// Not explicitly started; still integrates until it lands.
    #[default]
    Idle,
    Falling,
    /// Crossed the ground; the impact has been reported.
    Landed,
    /// Halted by `stop_falling`; no impact is reported.
    Stopped,
}

/// Landing event emitted exactly once per fall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    /// Fall speed at the moment of landing.
    pub speed: f32,
    pub position: Vec3,
}

/// Per-entity fallback gravity settings and motion state.
#[derive(Debug, Clone)]
pub struct FallbackGravity {
    pub apply_gravity: bool,
    /// Multiplier on the global gravity vector for this entity.
    pub gravity_scale: f32,
    /// Fixed fall direction. `None` follows the global gravity vector.
    pub direction: Option<Vec3>,
    /// Vertical coordinate at or below which the entity counts as landed.
    pub ground_height: f32,
    fall_speed: f32,
    phase: FallPhase,
}

impl Default for FallbackGravity {
    fn default() -> Self {
        Self {
            apply_gravity: true,
            gravity_scale: 1.0,
            direction: None,
            ground_height: 0.0,
            fall_speed: 0.0,
            phase: FallPhase::Idle,
        }
    }
}

impl FallbackGravity {
    pub fn new(ground_height: f32) -> Self {
        Self {
            ground_height,
            ..Default::default()
        }
    }

    pub fn fall_speed(&self) -> f32 {
        self.fall_speed
    }

    pub fn phase(&self) -> FallPhase {
        self.phase
    }

    pub fn is_falling(&self) -> bool {
        self.phase == FallPhase::Falling
    }

    pub fn has_landed(&self) -> bool {
        matches!(self.phase, FallPhase::Landed | FallPhase::Stopped)
    }

    /// Begin a fresh fall (jump, drop after a teleport).
    pub fn start_falling(&mut self) {
        self.fall_speed = 0.0;
        self.phase = FallPhase::Falling;
    }

    /// Halt integration without reporting an impact.
    pub fn stop_falling(&mut self) {
        self.fall_speed = 0.0;
        self.phase = FallPhase::Stopped;
    }

    pub fn set_gravity_scale(&mut self, scale: f32) {
        self.gravity_scale = scale;
    }

    fn fall_direction(&self, gravity: Vec3) -> Vec3 {
        self.direction
            .unwrap_or_else(|| gravity.try_normalize().unwrap_or(-UP))
    }

    /// Hand-integrate one frame for an entity without a rigid body.
    pub fn step(&mut self, transform: &mut Transform, gravity: Vec3, dt: f32) -> Option<Impact> {
        if !self.apply_gravity || self.has_landed() {
            return None;
        }
        self.fall_speed += gravity.length() * self.gravity_scale * dt;
        transform.position += self.fall_direction(gravity) * self.fall_speed * dt;
        self.check_landing(transform.position)
    }

    /// Request one frame of acceleration from full physics for `body`.
    pub fn step_body(
        &mut self,
        body: &PhysicsBody,
        driver: &mut dyn BodyDriver,
        transform: &mut Transform,
        gravity: Vec3,
    ) -> Option<Impact> {
        if !self.apply_gravity || self.has_landed() {
            return None;
        }
        driver.apply_acceleration(body.rigid_body, gravity * self.gravity_scale);
        if let Some(position) = driver.body_translation(body.rigid_body) {
            transform.position = position;
        }
        self.check_landing(transform.position)
    }

    fn check_landing(&mut self, position: Vec3) -> Option<Impact> {
        if position.y <= self.ground_height && !self.has_landed() {
            self.phase = FallPhase::Landed;
            return Some(Impact {
                speed: self.fall_speed,
                position,
            });
        }
        None
    }
}

/// Run fallback gravity for every entity in `world` that has a [`FallbackGravity`].
///
/// Returns the entities that landed this frame.
pub fn integrate_fallback_gravity(
    world: &mut World,
    driver: &mut dyn BodyDriver,
    gravity: Vec3,
    dt: f32,
) -> Vec<(Entity, Impact)> {
    let mut impacts = Vec::new();
    for (entity, (transform, fallback, body)) in world
        .query_mut::<(&mut Transform, &mut FallbackGravity, Option<&PhysicsBody>)>()
    {
        let impact = match body {
            Some(body) => fallback.step_body(body, driver, transform, gravity),
            None => fallback.step(transform, gravity, dt),
        };
        if let Some(impact) = impact {
            log::info!(
                "Entity {:?} landed at {:.2} m/s ({:?})",
                entity,
                impact.speed,
                impact.position
            );
            impacts.push((entity, impact));
        }
    }
    impacts
}
