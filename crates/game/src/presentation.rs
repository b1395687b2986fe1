//! Sky backdrop and ambience: the presentation half of a transition.

use crate::collaborators::Presentation;
use audio::AmbientSink;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sky colours for one destination. Laid out like the sky shader's uniform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Backdrop {
    pub key: String,
    #[serde(default = "default_zenith")]
    pub zenith: [f32; 4],
    #[serde(default = "default_horizon")]
    pub horizon: [f32; 4],
    /// rgb = ground, w = haze amount
    #[serde(default = "default_ground")]
    pub ground: [f32; 4],
    /// 0 = none, 1 = dense starfield
    #[serde(default)]
    pub star_density: f32,
}

fn default_zenith() -> [f32; 4] {
    [0.2, 0.4, 0.7, 1.0]
}
fn default_horizon() -> [f32; 4] {
    [0.6, 0.65, 0.75, 1.0]
}
fn default_ground() -> [f32; 4] {
    [0.4, 0.35, 0.3, 0.3]
}

impl Backdrop {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            zenith: default_zenith(),
            horizon: default_horizon(),
            ground: default_ground(),
            star_density: 0.0,
        }
    }

    pub fn with_colors(mut self, zenith: [f32; 4], horizon: [f32; 4]) -> Self {
        self.zenith = zenith;
        self.horizon = horizon;
        self
    }

    pub fn with_stars(mut self, density: f32) -> Self {
        self.star_density = density.clamp(0.0, 1.0);
        self
    }
}

/// Owns the backdrop library and the ambient output.
pub struct Stage {
    backdrops: HashMap<String, Backdrop>,
    active_backdrop: Option<String>,
    ambient: Box<dyn AmbientSink>,
}

impl Stage {
    pub fn new(backdrops: impl IntoIterator<Item = Backdrop>, ambient: Box<dyn AmbientSink>) -> Self {
        Self {
            backdrops: backdrops.into_iter().map(|b| (b.key.clone(), b)).collect(),
            active_backdrop: None,
            ambient,
        }
    }

    /// Sky currently shown, if any was ever applied.
    pub fn backdrop(&self) -> Option<&Backdrop> {
        self.active_backdrop.as_ref().and_then(|k| self.backdrops.get(k))
    }

    pub fn ambient_clip(&self) -> Option<&str> {
        self.ambient.current_clip()
    }
}

impl Presentation for Stage {
    fn set_backdrop(&mut self, backdrop: &str) {
        if !self.backdrops.contains_key(backdrop) {
            log::warn!("Unknown backdrop {:?}, sky unchanged", backdrop);
            return;
        }
        log::debug!("Backdrop -> {}", backdrop);
        self.active_backdrop = Some(backdrop.to_string());
    }

    /// A clip that fails to start still silences the previous ambience.
    fn play_ambient(&mut self, clip: &str) -> anyhow::Result<()> {
        if let Err(e) = self.ambient.play(clip) {
            self.ambient.stop();
            return Err(e);
        }
        Ok(())
    }

    fn stop_ambient(&mut self) {
        self.ambient.stop();
    }
}
