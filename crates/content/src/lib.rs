//! Environment content for Cosmic Leap.
//!
//! Two ways to make a planet real, one per deployment:
//! - instantiate a landscape template into the [`SceneWorld`] node hierarchy;
//! - load a named region through the [`RegionManager`].

pub mod error;
pub mod host;
pub mod region;
pub mod scene;

pub use error::*;
pub use host::*;
pub use region::*;
pub use scene::*;
