//! Environment profiles: everything needed to travel to one destination.
//!
//! A profile is immutable for the duration of a selection. Gravity is authored
//! relative to Earth, so `gravity_scale = 1.0` is Earth and `0.16` is the Moon.
//! Zero and negative scales are valid (zero-g habitats, inverted test rooms).

use engine_core::{Pose, Quat, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentProfile {
    /// Stable identifier, unique within a [`crate::ProfileSet`].
    pub key: String,
    /// Display name. Empty falls back to the key.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Multiplier on baseline gravity. No range is enforced.
    #[serde(default = "default_gravity_scale")]
    pub gravity_scale: f32,
    /// Content handle: template key or region name, depending on the content mode.
    #[serde(default)]
    pub environment: Option<String>,
    /// Sky backdrop handle. Absent leaves the current backdrop alone.
    #[serde(default)]
    pub backdrop: Option<String>,
    /// Ambient clip handle. What absence means is a configured policy.
    #[serde(default)]
    pub ambient_audio: Option<String>,
    /// Authored spawn pose; overrides any anchor found in the landscape.
    #[serde(default)]
    pub spawn_anchor: Option<Pose>,
    /// Ground reference for fallback gravity on this world.
    #[serde(default)]
    pub ground_height: f32,
    /// Accent colour for selection UI.
    #[serde(default = "default_accent")]
    pub ui_accent: [f32; 3],
}

fn default_gravity_scale() -> f32 {
    1.0
}
fn default_accent() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl EnvironmentProfile {
    /// Minimal profile: key, gravity, nothing else bound.
    pub fn new(key: impl Into<String>, gravity_scale: f32) -> Self {
        Self {
            key: key.into(),
            name: String::new(),
            description: String::new(),
            gravity_scale,
            environment: None,
            backdrop: None,
            ambient_audio: None,
            spawn_anchor: None,
            ground_height: 0.0,
            ui_accent: default_accent(),
        }
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.key
        } else {
            &self.name
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    pub fn with_backdrop(mut self, backdrop: impl Into<String>) -> Self {
        self.backdrop = Some(backdrop.into());
        self
    }

    pub fn with_ambient_audio(mut self, clip: impl Into<String>) -> Self {
        self.ambient_audio = Some(clip.into());
        self
    }

    pub fn with_spawn_anchor(mut self, anchor: Pose) -> Self {
        self.spawn_anchor = Some(anchor);
        self
    }

    pub fn with_ground_height(mut self, height: f32) -> Self {
        self.ground_height = height;
        self
    }

    /// Earth: the reference world.
    pub fn earth() -> Self {
        Self::new("earth", 1.0)
            .with_name("Earth")
            .with_environment("earth_landscape")
            .with_backdrop("blue_sky")
            .with_ambient_audio("earth_wind")
    }

    /// Luna: low gravity, black sky, no air to carry sound.
    pub fn moon() -> Self {
        let mut moon = Self::new("moon", 0.16)
            .with_name("Moon")
            .with_environment("moon_landscape")
            .with_backdrop("starfield");
        moon.ui_accent = [0.8, 0.8, 0.85];
        moon
    }

    pub fn mars() -> Self {
        let mut mars = Self::new("mars", 0.38)
            .with_name("Mars")
            .with_environment("mars_landscape")
            .with_backdrop("dusty_sky")
            .with_ambient_audio("mars_wind");
        mars.ui_accent = [0.9, 0.45, 0.25];
        mars
    }

    /// Jupiter's cloud tops: crushing gravity, spawn on a fixed platform.
    pub fn jupiter() -> Self {
        let mut jupiter = Self::new("jupiter", 2.53)
            .with_name("Jupiter")
            .with_environment("gas_platform")
            .with_backdrop("banded_clouds")
            .with_ambient_audio("storm_roar")
            .with_spawn_anchor(Pose::new(
                Vec3::new(0.0, 3.0, 0.0),
                Quat::from_rotation_y(std::f32::consts::PI),
            ))
            .with_ground_height(2.0);
        jupiter.ui_accent = [0.85, 0.7, 0.5];
        jupiter
    }

    /// Orbital station: zero-g, keeps the current sky.
    pub fn orbital_station() -> Self {
        Self::new("station", 0.0)
            .with_name("Orbital Station")
            .with_environment("station_interior")
            .with_ambient_audio("station_hum")
    }
}
