//! Content-provider seams the transition orchestrator talks to.

use crate::ContentError;
use engine_core::{Entity, Transform};

/// Instantiate-and-parent content strategy.
pub trait SceneHost {
    /// Instantiate `template` under `parent` (world root when `None`).
    fn instantiate(&mut self, template: &str, parent: Option<Entity>) -> Result<Entity, ContentError>;
    fn set_name(&mut self, node: Entity, name: &str) -> Result<(), ContentError>;
    /// Destroy `node` and everything below it.
    fn destroy(&mut self, node: Entity) -> Result<(), ContentError>;
    /// First root-level node with exactly this name.
    fn find_root(&self, name: &str) -> Option<Entity>;
    /// Immediate child of `node` with exactly this name.
    fn find_child(&self, node: Entity, name: &str) -> Option<Entity>;
    fn world_transform(&self, node: Entity) -> Option<Transform>;
}

/// Load-region-by-name content strategy.
///
/// Both calls are fire-and-forget: the host owns completion and logs failures.
pub trait RegionHost {
    fn begin_load(&mut self, region: &str);
    fn begin_unload(&mut self, region: &str);
}
