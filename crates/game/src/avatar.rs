//! The player rig: a transform in the actor world that transitions teleport.

use crate::collaborators::AvatarTarget;
use engine_core::{Avatar, Name, Pose, Transform, Vec3};
use hecs::{Entity, World};
use physics::FallbackGravity;

/// Spawn the rig at `position`, falling under fallback gravity toward `ground_height`.
pub fn spawn_avatar(world: &mut World, position: Vec3, ground_height: f32) -> Entity {
    world.spawn((
        Name::new("Avatar"),
        Avatar,
        Transform::from_position(position),
        FallbackGravity::new(ground_height),
    ))
}

/// Borrowed view of the rig, lent to the orchestrator for one selection.
pub struct AvatarRig<'w> {
    world: &'w mut World,
    entity: Entity,
}

impl<'w> AvatarRig<'w> {
    pub fn new(world: &'w mut World, entity: Entity) -> Self {
        Self { world, entity }
    }
}

impl AvatarTarget for AvatarRig<'_> {
    fn pose(&self) -> Pose {
        self.world
            .get::<&Transform>(self.entity)
            .map(|t| t.pose())
            .unwrap_or_default()
    }

    fn set_pose(&mut self, pose: Pose) {
        match self.world.get::<&mut Transform>(self.entity) {
            Ok(mut transform) => transform.set_pose(pose),
            Err(e) => log::warn!("Avatar {:?} cannot be moved: {}", self.entity, e),
        }
    }
}
