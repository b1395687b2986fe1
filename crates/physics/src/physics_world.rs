//! Physics world management with Rapier3D.

use crate::backend::{BodyDriver, GravityBackend};
use crate::collision::{CollisionGroup, PhysicsBody};
use engine_core::{Vec3, UP};
use rapier3d::prelude::*;

/// Standard Earth surface gravity in m/s².
pub const EARTH_GRAVITY: f32 = 9.81;

fn to_vector(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

fn to_vec3(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

/// Main physics world containing all simulation state.
pub struct PhysicsWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub gravity: Vector<Real>,
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
    pub query_pipeline: QueryPipeline,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(-UP * EARTH_GRAVITY)
    }
}

impl PhysicsWorld {
    /// Create a new physics world with the given starting gravity.
    pub fn new(gravity: Vec3) -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            gravity: to_vector(gravity),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Set the simulation timestep (seconds). Call once per frame with the frame delta.
    pub fn set_timestep(&mut self, dt: f32) {
        if dt > 0.0 {
            self.integration_parameters.dt = dt;
        }
    }

    /// Step the physics simulation.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Add a dynamic body that ignores world gravity; only accelerations requested
    /// through [`BodyDriver::apply_acceleration`] move it.
    pub fn add_driven_body(&mut self, position: Vec3, radius: f32) -> PhysicsBody {
        let rigid_body = RigidBodyBuilder::dynamic()
            .translation(to_vector(position))
            .gravity_scale(0.0)
            .build();
        let handle = self.rigid_body_set.insert(rigid_body);
        let collider = ColliderBuilder::ball(radius)
            .collision_groups(CollisionGroup::driven())
            .build();
        let collider = self
            .collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);
        PhysicsBody::with_collider(handle, collider)
    }

    /// Add a flat ground half-space at the given height.
    pub fn add_ground_plane(&mut self, height: f32) -> ColliderHandle {
        let collider = ColliderBuilder::halfspace(Vector::y_axis())
            .translation(vector![0.0, height, 0.0])
            .collision_groups(CollisionGroup::environment())
            .build();
        self.collider_set.insert(collider)
    }

    /// Remove a collider by its handle.
    pub fn remove_collider(&mut self, handle: ColliderHandle) {
        self.collider_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.rigid_body_set,
            true,
        );
    }

    /// Linear velocity of a body.
    pub fn body_velocity(&self, handle: RigidBodyHandle) -> Option<Vec3> {
        self.rigid_body_set.get(handle).map(|body| to_vec3(body.linvel()))
    }

    /// Move a body and drop its velocity.
    pub fn teleport_body(&mut self, handle: RigidBodyHandle, position: Vec3) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_translation(to_vector(position), true);
            body.set_linvel(vector![0.0, 0.0, 0.0], true);
            body.set_angvel(vector![0.0, 0.0, 0.0], true);
        }
    }
}

impl GravityBackend for PhysicsWorld {
    fn gravity(&self) -> Vec3 {
        to_vec3(&self.gravity)
    }

    fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = to_vector(gravity);
    }
}

impl BodyDriver for PhysicsWorld {
    fn apply_acceleration(&mut self, body: RigidBodyHandle, acceleration: Vec3) {
        let dt = self.integration_parameters.dt;
        if let Some(rb) = self.rigid_body_set.get_mut(body) {
            let linvel = *rb.linvel() + to_vector(acceleration * dt);
            rb.set_linvel(linvel, true);
        }
    }

    fn body_translation(&self, body: RigidBodyHandle) -> Option<Vec3> {
        self.rigid_body_set.get(body).map(|rb| to_vec3(rb.translation()))
    }
}
