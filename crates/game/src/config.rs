//! Game configuration (gravity easing, content strategy, policies). Loaded from config.ron at startup.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// How a destination's content becomes real. One per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContentMode {
    /// Instantiate the profile's landscape template under the environment parent.
    #[default]
    Instantiate,
    /// Load the profile's named region; unload the previous one.
    Region,
}

impl ContentMode {
    pub fn label(self) -> &'static str {
        match self {
            ContentMode::Instantiate => "instanced",
            ContentMode::Region => "region",
        }
    }
}

/// What a profile without an ambient clip does to the current ambience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MissingAudioPolicy {
    #[default]
    Stop,
    Keep,
}

/// What re-selecting the active profile does to the gravity ease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RepeatPolicy {
    /// Restart the ease from the current vector toward the same target.
    #[default]
    Restart,
    /// Leave gravity alone if it is already settled at the target.
    IgnoreIfSettled,
}

/// Settings for the environment transition orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionConfig {
    /// Earth gravity magnitude that profile scales multiply (m/s²).
    #[serde(default = "default_baseline_gravity")]
    pub baseline_gravity: f32,
    /// Seconds to ease gravity toward a new target. `<= 0` snaps immediately.
    #[serde(default = "default_gravity_lerp_duration")]
    pub gravity_lerp_duration: f32,
    #[serde(default)]
    pub content_mode: ContentMode,
    #[serde(default)]
    pub missing_audio: MissingAudioPolicy,
    #[serde(default)]
    pub repeat_selection: RepeatPolicy,
    /// Root node new landscapes are parented under. `None` or not found: world root.
    #[serde(default = "default_environment_parent")]
    pub environment_parent: Option<String>,
    /// Child name searched in a fresh landscape when the profile has no spawn anchor.
    #[serde(default = "default_spawn_anchor_name")]
    pub spawn_anchor_name: String,
}

fn default_baseline_gravity() -> f32 {
    9.81
}
fn default_gravity_lerp_duration() -> f32 {
    0.5
}
fn default_environment_parent() -> Option<String> {
    Some("Environments".to_string())
}
fn default_spawn_anchor_name() -> String {
    "PlayerSpawn".to_string()
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            baseline_gravity: default_baseline_gravity(),
            gravity_lerp_duration: default_gravity_lerp_duration(),
            content_mode: ContentMode::default(),
            missing_audio: MissingAudioPolicy::default(),
            repeat_selection: RepeatPolicy::default(),
            environment_parent: default_environment_parent(),
            spawn_anchor_name: default_spawn_anchor_name(),
        }
    }
}

/// Persistent game settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub transition: TransitionConfig,
    /// Asset catalog with profiles, backdrops, landscapes and regions.
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,
    /// Open the audio device. When false (or no device), ambience is silent.
    #[serde(default = "default_true")]
    pub audio_enabled: bool,
    /// Fade when ambience is replaced or stopped (seconds).
    #[serde(default = "default_ambient_crossfade")]
    pub ambient_crossfade: f32,
    /// Region loads/unloads completed per frame.
    #[serde(default = "default_region_ops_per_tick")]
    pub region_ops_per_tick: usize,
    /// Simulation rate of the headless frame loop (Hz).
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f64,
    /// Simulated seconds spent on each destination in the demo run.
    #[serde(default = "default_seconds_per_selection")]
    pub demo_seconds_per_selection: f32,
    /// Where the avatar rig starts before the first selection.
    #[serde(default = "default_avatar_start")]
    pub avatar_start: [f32; 3],
}

fn default_catalog_path() -> String {
    "assets/catalog.ron".to_string()
}
fn default_true() -> bool {
    true
}
fn default_ambient_crossfade() -> f32 {
    0.4
}
fn default_region_ops_per_tick() -> usize {
    1
}
fn default_frame_rate() -> f64 {
    90.0
}
fn default_seconds_per_selection() -> f32 {
    2.0
}
fn default_avatar_start() -> [f32; 3] {
    [0.0, 1.8, 0.0]
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            transition: TransitionConfig::default(),
            catalog_path: default_catalog_path(),
            audio_enabled: default_true(),
            ambient_crossfade: default_ambient_crossfade(),
            region_ops_per_tick: default_region_ops_per_tick(),
            frame_rate: default_frame_rate(),
            demo_seconds_per_selection: default_seconds_per_selection(),
            avatar_start: default_avatar_start(),
        }
    }
}

impl GameConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    /// Save current config to `config.ron`. Logs on error.
    pub fn save(&self) {
        let path = config_path();
        if let Ok(s) = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            if let Err(e) = std::fs::write(&path, s) {
                log::warn!("Could not write config to {:?}: {}", path, e);
            }
        }
    }
}

fn config_path() -> std::path::PathBuf {
    std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from(".")).join("config.ron")
}
