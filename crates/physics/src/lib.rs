//! Physics for Cosmic Leap: the Rapier3D world, the eased global gravity
//! parameter, and fallback gravity for entities without a rigid body.

pub mod backend;
pub mod collision;
pub mod fallback;
pub mod gravity;
pub mod physics_world;

pub use backend::*;
pub use collision::*;
pub use fallback::*;
pub use gravity::*;
pub use physics_world::*;

// Re-export Rapier for downstream crates
pub use rapier3d;

// Re-export common Rapier types
pub use rapier3d::prelude::{ColliderHandle, RigidBodyHandle};
