//! Everything the transition orchestrator drives but does not own.
//!
//! The composition root lends these to the orchestrator for the duration of one
//! call through [`Collaborators`]; nothing is looked up globally.

use crate::config::ContentMode;
use content::{RegionHost, SceneHost};
use engine_core::Pose;
use physics::GravityBackend;

/// Sky backdrop and ambient audio.
pub trait Presentation {
    fn set_backdrop(&mut self, backdrop: &str);
    /// Bind `clip` to the single ambient output and start playback.
    fn play_ambient(&mut self, clip: &str) -> anyhow::Result<()>;
    fn stop_ambient(&mut self);
}

/// The player rig the orchestrator repositions on arrival.
pub trait AvatarTarget {
    fn pose(&self) -> Pose;
    fn set_pose(&mut self, pose: Pose);
}

/// The deployment's content strategy.
pub enum ContentHost<'a> {
    Scene(&'a mut dyn SceneHost),
    Regions(&'a mut dyn RegionHost),
}

impl ContentHost<'_> {
    pub fn mode(&self) -> ContentMode {
        match self {
            ContentHost::Scene(_) => ContentMode::Instantiate,
            ContentHost::Regions(_) => ContentMode::Region,
        }
    }
}

pub struct Collaborators<'a> {
    pub content: ContentHost<'a>,
    pub presentation: &'a mut dyn Presentation,
    /// `None` when no rig is bound; repositioning is then skipped.
    pub avatar: Option<&'a mut dyn AvatarTarget>,
    pub gravity: &'a mut dyn GravityBackend,
}
