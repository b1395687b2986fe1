//! Collision groups and the ECS link to rigid bodies.

use rapier3d::prelude::*;

/// Collision groups for different entity types.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroup {
    /// Static environment (ground planes, landscape colliders)
    Environment = 1 << 0,
    /// Bodies moved only by fallback gravity requests
    Driven = 1 << 1,
}

impl CollisionGroup {
    /// Environment collides with everything.
    pub fn environment() -> InteractionGroups {
        InteractionGroups::new(Group::from_bits_retain(Self::Environment as u32), Group::ALL)
    }

    /// Driven bodies rest on the environment and pass through each other.
    pub fn driven() -> InteractionGroups {
        InteractionGroups::new(
            Group::from_bits_retain(Self::Driven as u32),
            Group::from_bits_retain(Self::Environment as u32),
        )
    }
}

/// Component linking an ECS entity to its physics handles.
///
/// Entities carrying this are "physically simulated": the fallback integrator asks
/// the physics backend to accelerate them instead of moving them by hand.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsBody {
    pub rigid_body: RigidBodyHandle,
    pub collider: Option<ColliderHandle>,
}

impl PhysicsBody {
    pub fn with_collider(rigid_body: RigidBodyHandle, collider: ColliderHandle) -> Self {
        Self {
            rigid_body,
            collider: Some(collider),
        }
    }
}
