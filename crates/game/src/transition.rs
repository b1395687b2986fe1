//! Environment transition orchestrator: travel from one planet to another.
//!
//! A selection runs four best-effort steps in order; a failure in one is logged and
//! the rest still run:
//! 1. swap the environment content (instantiate a landscape or load a region);
//! 2. retarget global gravity through the eased [`GravityTransition`];
//! 3. apply the sky backdrop and ambient audio;
//! 4. reposition the avatar at the destination anchor.
//!
//! Gravity keeps easing across frames through [`TransitionOrchestrator::tick`].

use crate::collaborators::{Collaborators, ContentHost};
use crate::config::{MissingAudioPolicy, RepeatPolicy, TransitionConfig};
use content::{RegionHost, SceneHost};
use engine_core::{Entity, Vec3, UP};
use physics::{GravityBackend, GravityTransition, TransitionStart};
use planets::{EnvironmentProfile, ProfileSet};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no profile at index {index} ({count} available)")]
    IndexOutOfRange { index: i32, count: usize },
    #[error("no profile with key {0:?}")]
    UnknownKey(String),
}

/// What the orchestrator currently has loaded or instantiated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActiveEnvironment {
    #[default]
    Empty,
    /// Landscape instance owned by the orchestrator; destroyed when superseded.
    Instance { key: String, node: Entity },
    /// Region owned by the region host; the orchestrator owes it an unload.
    Region { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapOutcome {
    /// Destination already active; nothing loaded or unloaded.
    Unchanged,
    Instantiated(Entity),
    RegionRequested { load: String, unload: Option<String> },
    /// Profile has no content; the previous environment was released.
    Cleared,
    /// Content host refused; the previous environment is gone regardless.
    Failed,
    /// Host does not match the configured content mode.
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarOutcome {
    /// Moved to the profile's authored spawn anchor.
    AuthoredAnchor,
    /// Moved to the conventionally named anchor inside the fresh landscape.
    LandscapeAnchor,
    /// Left where it was.
    Untouched,
    NoAvatar,
}

impl AvatarOutcome {
    pub fn moved(self) -> bool {
        matches!(self, AvatarOutcome::AuthoredAnchor | AvatarOutcome::LandscapeAnchor)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionReport {
    pub key: String,
    pub environment: SwapOutcome,
    pub gravity_target: Vec3,
    /// `None` when the repeat policy left a settled gravity alone.
    pub gravity: Option<TransitionStart>,
    pub avatar: AvatarOutcome,
}

/// Coordinates planet transitions. Owned by the composition root.
pub struct TransitionOrchestrator {
    profiles: ProfileSet,
    config: TransitionConfig,
    gravity: GravityTransition,
    active: ActiveEnvironment,
    active_key: Option<String>,
}

impl TransitionOrchestrator {
    /// Gravity starts settled at `baseline * -UP`.
    pub fn new(profiles: ProfileSet, config: TransitionConfig) -> Self {
        let initial = -UP * config.baseline_gravity;
        Self {
            profiles,
            config,
            gravity: GravityTransition::new(initial),
            active: ActiveEnvironment::Empty,
            active_key: None,
        }
    }

    pub fn profiles(&self) -> &ProfileSet {
        &self.profiles
    }

    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }

    pub fn active(&self) -> &ActiveEnvironment {
        &self.active
    }

    pub fn active_key(&self) -> Option<&str> {
        self.active_key.as_deref()
    }

    /// Current global gravity vector.
    pub fn gravity(&self) -> Vec3 {
        self.gravity.current()
    }

    pub fn gravity_transition(&self) -> &GravityTransition {
        &self.gravity
    }

    /// Linear scan, first exact (case-sensitive) match.
    pub fn find_profile_by_key(&self, key: &str) -> Option<&EnvironmentProfile> {
        self.profiles.find_by_key(key)
    }

    /// Gravity a profile asks for.
    pub fn gravity_target(&self, profile: &EnvironmentProfile) -> Vec3 {
        -UP * (self.config.baseline_gravity * profile.gravity_scale)
    }

    /// Push the current vector into a backend, e.g. right after construction.
    pub fn sync_gravity(&self, backend: &mut dyn GravityBackend) {
        backend.set_gravity(self.gravity.current());
    }

    /// Advance the gravity ease by one frame and publish the result.
    pub fn tick(&mut self, dt: f32, backend: &mut dyn GravityBackend) -> Vec3 {
        let gravity = self.gravity.tick(dt);
        backend.set_gravity(gravity);
        gravity
    }

    /// Select by position in the profile set. Negative or out-of-range indices change nothing.
    pub fn select_by_index(
        &mut self,
        index: i32,
        cx: &mut Collaborators<'_>,
    ) -> Result<SelectionReport, SelectionError> {
        let profile = usize::try_from(index)
            .ok()
            .and_then(|i| self.profiles.get(i))
            .cloned()
            .ok_or(SelectionError::IndexOutOfRange {
                index,
                count: self.profiles.len(),
            })
            .inspect_err(|e| log::debug!("Ignoring selection: {}", e))?;
        Ok(self.select_profile(&profile, cx))
    }

    pub fn select_by_key(
        &mut self,
        key: &str,
        cx: &mut Collaborators<'_>,
    ) -> Result<SelectionReport, SelectionError> {
        let profile = self
            .find_profile_by_key(key)
            .cloned()
            .ok_or_else(|| SelectionError::UnknownKey(key.to_string()))
            .inspect_err(|e| log::debug!("Ignoring selection: {}", e))?;
        Ok(self.select_profile(&profile, cx))
    }

    /// Travel to `profile`. Every step is best-effort.
    pub fn select_profile(
        &mut self,
        profile: &EnvironmentProfile,
        cx: &mut Collaborators<'_>,
    ) -> SelectionReport {
        log::info!(
            "Selecting {} ({}x gravity)",
            profile.display_name(),
            profile.gravity_scale
        );
        let repeat = self.active_key.as_deref() == Some(profile.key.as_str());

        let environment = self.swap_environment(profile, &mut cx.content);
        self.active_key = Some(profile.key.clone());

        let gravity_target = self.gravity_target(profile);
        let gravity = self.retarget_gravity(gravity_target, repeat, cx.gravity);

        self.apply_presentation(profile, cx);

        let avatar = self.reposition_avatar(profile, &environment, cx);

        SelectionReport {
            key: profile.key.clone(),
            environment,
            gravity_target,
            gravity,
            avatar,
        }
    }

    fn swap_environment(
        &mut self,
        profile: &EnvironmentProfile,
        content: &mut ContentHost<'_>,
    ) -> SwapOutcome {
        if content.mode() != self.config.content_mode {
            log::warn!(
                "Content host is {:?} but deployment is configured for {:?}; environment left as is",
                content.mode(),
                self.config.content_mode
            );
            return SwapOutcome::Skipped;
        }
        match content {
            ContentHost::Scene(scene) => self.swap_instance(profile, &mut **scene),
            ContentHost::Regions(regions) => self.swap_region(profile, &mut **regions),
        }
    }

    fn swap_instance(&mut self, profile: &EnvironmentProfile, scene: &mut dyn SceneHost) -> SwapOutcome {
        let already_active = match &self.active {
            ActiveEnvironment::Instance { key, .. } => *key == profile.key,
            ActiveEnvironment::Empty => {
                profile.environment.is_none() && self.active_key.as_deref() == Some(profile.key.as_str())
            }
            ActiveEnvironment::Region { .. } => false,
        };
        if already_active {
            log::debug!("{} already instantiated", profile.key);
            return SwapOutcome::Unchanged;
        }

        if let ActiveEnvironment::Instance { key, node } = std::mem::take(&mut self.active) {
            if let Err(e) = scene.destroy(node) {
                log::warn!("Could not destroy {} landscape: {}", key, e);
            }
        }

        let Some(template) = profile.environment.as_deref() else {
            log::debug!("{} has no landscape", profile.key);
            return SwapOutcome::Cleared;
        };
        let parent = self
            .config
            .environment_parent
            .as_deref()
            .and_then(|name| scene.find_root(name));
        match scene.instantiate(template, parent) {
            Ok(node) => {
                let name = format!("{}_Environment", profile.key);
                if let Err(e) = scene.set_name(node, &name) {
                    log::warn!("Could not name landscape {}: {}", name, e);
                }
                self.active = ActiveEnvironment::Instance {
                    key: profile.key.clone(),
                    node,
                };
                SwapOutcome::Instantiated(node)
            }
            Err(e) => {
                log::warn!("Landscape for {} not instantiated: {}", profile.key, e);
                SwapOutcome::Failed
            }
        }
    }

    fn swap_region(&mut self, profile: &EnvironmentProfile, regions: &mut dyn RegionHost) -> SwapOutcome {
        let previous = match &self.active {
            ActiveEnvironment::Region { name } => Some(name.clone()),
            _ => None,
        };
        let requested = profile.environment.clone();
        if requested.is_some() && requested == previous {
            log::debug!("Region {:?} already active", previous);
            return SwapOutcome::Unchanged;
        }
        if let Some(prev) = &previous {
            regions.begin_unload(prev);
        }
        match requested {
            Some(name) => {
                regions.begin_load(&name);
                self.active = ActiveEnvironment::Region { name: name.clone() };
                SwapOutcome::RegionRequested {
                    load: name,
                    unload: previous,
                }
            }
            None => {
                self.active = ActiveEnvironment::Empty;
                SwapOutcome::Cleared
            }
        }
    }

    fn retarget_gravity(
        &mut self,
        target: Vec3,
        repeat: bool,
        backend: &mut dyn GravityBackend,
    ) -> Option<TransitionStart> {
        if repeat
            && self.config.repeat_selection == RepeatPolicy::IgnoreIfSettled
            && self.gravity.is_settled_at(target)
        {
            log::debug!("Gravity already settled at {:?}", target);
            return None;
        }
        let start = self.gravity.begin(target, self.config.gravity_lerp_duration);
        backend.set_gravity(self.gravity.current());
        Some(start)
    }

    fn apply_presentation(&self, profile: &EnvironmentProfile, cx: &mut Collaborators<'_>) {
        if let Some(backdrop) = &profile.backdrop {
            cx.presentation.set_backdrop(backdrop);
        }
        match (&profile.ambient_audio, self.config.missing_audio) {
            (Some(clip), _) => {
                if let Err(e) = cx.presentation.play_ambient(clip) {
                    log::warn!("Ambient {:?} for {} not played: {}", clip, profile.key, e);
                }
            }
            (None, MissingAudioPolicy::Stop) => cx.presentation.stop_ambient(),
            (None, MissingAudioPolicy::Keep) => {}
        }
    }

    fn reposition_avatar(
        &self,
        profile: &EnvironmentProfile,
        environment: &SwapOutcome,
        cx: &mut Collaborators<'_>,
    ) -> AvatarOutcome {
        let Some(avatar) = cx.avatar.as_deref_mut() else {
            return AvatarOutcome::NoAvatar;
        };
        if let Some(anchor) = profile.spawn_anchor {
            avatar.set_pose(anchor);
            return AvatarOutcome::AuthoredAnchor;
        }
        if let (SwapOutcome::Instantiated(root), ContentHost::Scene(scene)) = (environment, &cx.content) {
            let anchor = scene
                .find_child(*root, &self.config.spawn_anchor_name)
                .and_then(|node| scene.world_transform(node));
            if let Some(anchor) = anchor {
                avatar.set_pose(anchor.pose());
                return AvatarOutcome::LandscapeAnchor;
            }
        }
        log::debug!("{} has no anchor, avatar stays put", profile.key);
        AvatarOutcome::Untouched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{AvatarTarget, Presentation};
    use crate::config::ContentMode;
    use content::{SceneWorld, TemplateNode};
    use engine_core::{Pose, Quat, Transform};
    use physics::GravityCell;

    const DT: f32 = 1.0 / 64.0;

    #[derive(Default)]
    struct RecordingStage {
        backdrop: Option<String>,
        ambient: Option<String>,
        plays: usize,
        stops: usize,
    }

    impl Presentation for RecordingStage {
        fn set_backdrop(&mut self, backdrop: &str) {
            self.backdrop = Some(backdrop.to_string());
        }

        fn play_ambient(&mut self, clip: &str) -> anyhow::Result<()> {
            if clip == "broken" {
                anyhow::bail!("decoder exploded");
            }
            self.ambient = Some(clip.to_string());
            self.plays += 1;
            Ok(())
        }

        fn stop_ambient(&mut self) {
            self.ambient = None;
            self.stops += 1;
        }
    }

    struct Rig(Pose);

    impl AvatarTarget for Rig {
        fn pose(&self) -> Pose {
            self.0
        }

        fn set_pose(&mut self, pose: Pose) {
            self.0 = pose;
        }
    }

    #[derive(Default)]
    struct RecordingRegions {
        calls: Vec<String>,
    }

    impl RegionHost for RecordingRegions {
        fn begin_load(&mut self, region: &str) {
            self.calls.push(format!("load {}", region));
        }

        fn begin_unload(&mut self, region: &str) {
            self.calls.push(format!("unload {}", region));
        }
    }

    struct Harness {
        scene: SceneWorld,
        regions: RecordingRegions,
        stage: RecordingStage,
        rig: Rig,
        gravity: GravityCell,
    }

    impl Harness {
        fn new() -> Self {
            let mut scene = SceneWorld::new();
            scene.spawn_node(
                "Environments",
                Transform::from_position(Vec3::new(0.0, 0.0, 50.0)),
                None,
            );
            scene.register_template(
                "moon_landscape",
                TemplateNode::new("Landscape", Transform::default()).with_child(TemplateNode::new(
                    "PlayerSpawn",
                    Transform::from_position(Vec3::new(1.0, 2.0, 3.0)),
                )),
            );
            scene.register_template(
                "earth_landscape",
                TemplateNode::new("Landscape", Transform::default()),
            );
            Self {
                scene,
                regions: RecordingRegions::default(),
                stage: RecordingStage::default(),
                rig: Rig(Pose::from_position(Vec3::new(7.0, 7.0, 7.0))),
                gravity: GravityCell::default(),
            }
        }

        fn scene_cx(&mut self) -> Collaborators<'_> {
            Collaborators {
                content: ContentHost::Scene(&mut self.scene),
                presentation: &mut self.stage,
                avatar: Some(&mut self.rig),
                gravity: &mut self.gravity,
            }
        }

        fn region_cx(&mut self) -> Collaborators<'_> {
            Collaborators {
                content: ContentHost::Regions(&mut self.regions),
                presentation: &mut self.stage,
                avatar: Some(&mut self.rig),
                gravity: &mut self.gravity,
            }
        }
    }

    fn earth() -> EnvironmentProfile {
        EnvironmentProfile::new("earth", 1.0)
            .with_environment("earth_landscape")
            .with_backdrop("blue_sky")
            .with_ambient_audio("wind")
    }

    fn moon() -> EnvironmentProfile {
        EnvironmentProfile::new("moon", 0.16)
            .with_environment("moon_landscape")
            .with_backdrop("starfield")
    }

    fn orchestrator(config: TransitionConfig) -> TransitionOrchestrator {
        TransitionOrchestrator::new(ProfileSet::new(vec![earth(), moon()]).unwrap(), config)
    }

    fn region_config() -> TransitionConfig {
        TransitionConfig {
            content_mode: ContentMode::Region,
            ..Default::default()
        }
    }

    fn settle(orch: &mut TransitionOrchestrator, gravity: &mut GravityCell) {
        for _ in 0..1000 {
            if !orch.gravity_transition().is_in_flight() {
                return;
            }
            orch.tick(DT, gravity);
        }
    }

    #[test]
    fn starts_at_baseline_gravity() {
        let orch = orchestrator(TransitionConfig::default());
        assert_eq!(orch.gravity(), Vec3::new(0.0, -9.81, 0.0));
        assert_eq!(orch.active(), &ActiveEnvironment::Empty);
    }

    #[test]
    fn moon_then_back_to_earth_mid_transition() {
        let mut h = Harness::new();
        let mut orch = orchestrator(TransitionConfig::default());
        let moon_target = Vec3::new(0.0, -(9.81 * 0.16), 0.0);
        let earth_target = Vec3::new(0.0, -9.81, 0.0);

        orch.select_by_index(1, &mut h.scene_cx()).unwrap();
        for _ in 0..32 {
            orch.tick(DT, &mut h.gravity);
        }
        assert_eq!(orch.gravity(), moon_target);
        assert!((orch.gravity().y - -1.5696).abs() < 1e-5);
        assert_eq!(h.gravity.0, moon_target);

        // Earth, then Moon again, then back to Earth 0.1s into the ease.
        orch.select_by_index(0, &mut h.scene_cx()).unwrap();
        settle(&mut orch, &mut h.gravity);
        orch.select_by_index(1, &mut h.scene_cx()).unwrap();
        let partway = orch.tick(0.1, &mut h.gravity);
        assert!(partway.y > earth_target.y && partway.y < moon_target.y);
        assert!(orch.gravity_transition().is_in_flight());

        orch.select_by_index(0, &mut h.scene_cx()).unwrap();
        assert_eq!(orch.gravity_transition().target(), earth_target);
        // 0.125s steps sum to the 0.5s duration exactly.
        for _ in 0..3 {
            let g = orch.tick(0.125, &mut h.gravity);
            assert_ne!(g, moon_target);
            assert!(orch.gravity_transition().is_in_flight());
        }
        orch.tick(0.125, &mut h.gravity);
        assert!(!orch.gravity_transition().is_in_flight());
        assert_eq!(orch.gravity(), earth_target);
        assert_eq!(h.gravity.0, earth_target);
    }

    #[test]
    fn out_of_range_index_changes_nothing() {
        let mut h = Harness::new();
        let mut orch = orchestrator(TransitionConfig::default());
        orch.select_by_index(1, &mut h.scene_cx()).unwrap();
        let active = orch.active().clone();
        let target = orch.gravity_transition().target();
        let pose = h.rig.0;
        let nodes = h.scene.node_count();

        for index in [-1, 2, i32::MAX, i32::MIN] {
            let err = orch.select_by_index(index, &mut h.scene_cx()).unwrap_err();
            assert_eq!(err, SelectionError::IndexOutOfRange { index, count: 2 });
        }
        assert_eq!(orch.active(), &active);
        assert_eq!(orch.gravity_transition().target(), target);
        assert_eq!(h.rig.0, pose);
        assert_eq!(h.scene.node_count(), nodes);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let mut h = Harness::new();
        let mut orch = orchestrator(TransitionConfig::default());
        assert_eq!(
            orch.select_by_key("Moon", &mut h.scene_cx()).unwrap_err(),
            SelectionError::UnknownKey("Moon".to_string())
        );
        assert!(orch.active_key().is_none());
    }

    #[test]
    fn instantiates_under_parent_and_uses_landscape_anchor() {
        let mut h = Harness::new();
        let mut orch = orchestrator(TransitionConfig::default());
        let report = orch.select_by_key("moon", &mut h.scene_cx()).unwrap();
        let SwapOutcome::Instantiated(node) = report.environment else {
            panic!("expected an instance, got {:?}", report.environment);
        };
        assert_eq!(h.scene.name(node).as_deref(), Some("moon_Environment"));
        let parent = h.scene.find_root("Environments").unwrap();
        assert_eq!(h.scene.parent(node), Some(parent));
        assert_eq!(report.avatar, AvatarOutcome::LandscapeAnchor);
        assert_eq!(h.rig.0.position, Vec3::new(1.0, 2.0, 53.0));
    }

    #[test]
    fn missing_parent_falls_back_to_world_root() {
        let mut h = Harness::new();
        let mut orch = orchestrator(TransitionConfig {
            environment_parent: Some("Nowhere".to_string()),
            ..Default::default()
        });
        let report = orch.select_by_key("moon", &mut h.scene_cx()).unwrap();
        let SwapOutcome::Instantiated(node) = report.environment else {
            panic!("expected an instance");
        };
        assert!(h.scene.parent(node).is_none());
        assert_eq!(h.rig.0.position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn switching_destroys_previous_instance() {
        let mut h = Harness::new();
        let mut orch = orchestrator(TransitionConfig::default());
        let first = orch.select_by_key("moon", &mut h.scene_cx()).unwrap();
        let SwapOutcome::Instantiated(moon_node) = first.environment else {
            panic!("expected an instance");
        };
        orch.select_by_key("earth", &mut h.scene_cx()).unwrap();
        assert!(!h.scene.contains(moon_node));
        let parent = h.scene.find_root("Environments").unwrap();
        assert!(h.scene.find_child(parent, "earth_Environment").is_some());
    }

    #[test]
    fn landscape_without_anchor_leaves_avatar_in_place() {
        let mut h = Harness::new();
        let mut orch = orchestrator(TransitionConfig::default());
        let report = orch.select_by_key("earth", &mut h.scene_cx()).unwrap();
        assert_eq!(report.avatar, AvatarOutcome::Untouched);
        assert_eq!(h.rig.0.position, Vec3::new(7.0, 7.0, 7.0));
    }

    #[test]
    fn authored_anchor_wins_over_landscape_anchor() {
        let mut h = Harness::new();
        let mut orch = orchestrator(TransitionConfig::default());
        let anchor = Pose::new(Vec3::new(-4.0, 0.5, 9.0), Quat::from_rotation_y(1.0));
        let profile = moon().with_spawn_anchor(anchor);
        let report = orch.select_profile(&profile, &mut h.scene_cx());
        assert_eq!(report.avatar, AvatarOutcome::AuthoredAnchor);
        assert_eq!(h.rig.0, anchor);
    }

    #[test]
    fn reselecting_same_profile_keeps_instance_but_restarts_gravity() {
        let mut h = Harness::new();
        let mut orch = orchestrator(TransitionConfig::default());
        let first = orch.select_by_key("moon", &mut h.scene_cx()).unwrap();
        settle(&mut orch, &mut h.gravity);
        let nodes = h.scene.node_count();
        let second = orch.select_by_key("moon", &mut h.scene_cx()).unwrap();
        assert_eq!(second.environment, SwapOutcome::Unchanged);
        assert_eq!(second.gravity, Some(TransitionStart::Easing));
        assert!(orch.gravity_transition().is_in_flight());
        assert_eq!(h.scene.node_count(), nodes);
        assert_eq!(orch.active(), &ActiveEnvironment::Instance {
            key: "moon".into(),
            node: match first.environment {
                SwapOutcome::Instantiated(n) => n,
                other => panic!("unexpected {:?}", other),
            },
        });
        // No fresh instance, so no landscape anchor search.
        assert_eq!(second.avatar, AvatarOutcome::Untouched);
    }

    #[test]
    fn ignore_if_settled_policy_skips_repeat_ease() {
        let mut h = Harness::new();
        let mut orch = orchestrator(TransitionConfig {
            repeat_selection: RepeatPolicy::IgnoreIfSettled,
            ..Default::default()
        });
        orch.select_by_key("moon", &mut h.scene_cx()).unwrap();
        // Still easing: a repeat restarts.
        let mid = orch.select_by_key("moon", &mut h.scene_cx()).unwrap();
        assert_eq!(mid.gravity, Some(TransitionStart::Easing));
        settle(&mut orch, &mut h.gravity);
        let settled = orch.select_by_key("moon", &mut h.scene_cx()).unwrap();
        assert_eq!(settled.gravity, None);
        assert!(!orch.gravity_transition().is_in_flight());
    }

    #[test]
    fn zero_duration_applies_gravity_synchronously() {
        let mut h = Harness::new();
        let mut orch = orchestrator(TransitionConfig {
            gravity_lerp_duration: 0.0,
            ..Default::default()
        });
        let report = orch.select_by_key("moon", &mut h.scene_cx()).unwrap();
        assert_eq!(report.gravity, Some(TransitionStart::Completed));
        assert_eq!(orch.gravity(), report.gravity_target);
        assert_eq!(h.gravity.0, report.gravity_target);
    }

    #[test]
    fn negative_and_zero_scales_are_plain_targets() {
        let mut h = Harness::new();
        let mut orch = orchestrator(TransitionConfig::default());
        let zero_g = EnvironmentProfile::new("station", 0.0);
        assert_eq!(orch.select_profile(&zero_g, &mut h.scene_cx()).gravity_target, Vec3::ZERO);
        let inverted = EnvironmentProfile::new("inverted", -1.0);
        let report = orch.select_profile(&inverted, &mut h.scene_cx());
        assert_eq!(report.gravity_target, Vec3::new(0.0, 9.81, 0.0));
    }

    #[test]
    fn presentation_follows_profile() {
        let mut h = Harness::new();
        let mut orch = orchestrator(TransitionConfig::default());
        orch.select_by_key("earth", &mut h.scene_cx()).unwrap();
        assert_eq!(h.stage.backdrop.as_deref(), Some("blue_sky"));
        assert_eq!(h.stage.ambient.as_deref(), Some("wind"));

        // Moon has no ambience: stop it.
        orch.select_by_key("moon", &mut h.scene_cx()).unwrap();
        assert_eq!(h.stage.backdrop.as_deref(), Some("starfield"));
        assert!(h.stage.ambient.is_none());
        assert_eq!(h.stage.stops, 1);
    }

    #[test]
    fn absent_backdrop_leaves_sky_alone() {
        let mut h = Harness::new();
        let mut orch = orchestrator(TransitionConfig::default());
        orch.select_by_key("earth", &mut h.scene_cx()).unwrap();
        orch.select_profile(&EnvironmentProfile::new("void", 0.0), &mut h.scene_cx());
        assert_eq!(h.stage.backdrop.as_deref(), Some("blue_sky"));
    }

    #[test]
    fn keep_policy_leaves_ambience_playing() {
        let mut h = Harness::new();
        let mut orch = orchestrator(TransitionConfig {
            missing_audio: MissingAudioPolicy::Keep,
            ..Default::default()
        });
        orch.select_by_key("earth", &mut h.scene_cx()).unwrap();
        orch.select_by_key("moon", &mut h.scene_cx()).unwrap();
        assert_eq!(h.stage.ambient.as_deref(), Some("wind"));
        assert_eq!(h.stage.stops, 0);
    }

    #[test]
    fn failing_steps_do_not_abort_the_rest() {
        let mut h = Harness::new();
        let mut orch = orchestrator(TransitionConfig::default());
        let anchor = Pose::from_position(Vec3::new(0.0, 10.0, 0.0));
        let profile = EnvironmentProfile::new("ghost", 0.5)
            .with_environment("missing_template")
            .with_ambient_audio("broken")
            .with_backdrop("fog")
            .with_spawn_anchor(anchor);
        let report = orch.select_profile(&profile, &mut h.scene_cx());
        assert_eq!(report.environment, SwapOutcome::Failed);
        assert_eq!(report.gravity, Some(TransitionStart::Easing));
        assert_eq!(h.stage.backdrop.as_deref(), Some("fog"));
        assert_eq!(report.avatar, AvatarOutcome::AuthoredAnchor);
        assert_eq!(h.rig.0, anchor);
        assert_eq!(orch.active(), &ActiveEnvironment::Empty);
    }

    #[test]
    fn no_avatar_bound_is_skipped() {
        let mut h = Harness::new();
        let mut orch = orchestrator(TransitionConfig::default());
        let mut cx = Collaborators {
            content: ContentHost::Scene(&mut h.scene),
            presentation: &mut h.stage,
            avatar: None,
            gravity: &mut h.gravity,
        };
        let report = orch.select_by_key("moon", &mut cx).unwrap();
        assert_eq!(report.avatar, AvatarOutcome::NoAvatar);
        assert!(matches!(report.environment, SwapOutcome::Instantiated(_)));
    }

    #[test]
    fn mismatched_content_host_skips_swap() {
        let mut h = Harness::new();
        let mut orch = orchestrator(TransitionConfig::default());
        let report = orch.select_by_key("moon", &mut h.region_cx()).unwrap();
        assert_eq!(report.environment, SwapOutcome::Skipped);
        assert!(h.regions.calls.is_empty());
        assert_eq!(report.gravity, Some(TransitionStart::Easing));
    }

    #[test]
    fn regions_unload_previous_and_load_next() {
        let mut h = Harness::new();
        let mut orch = orchestrator(region_config());
        let first = orch.select_by_key("earth", &mut h.region_cx()).unwrap();
        assert_eq!(
            first.environment,
            SwapOutcome::RegionRequested { load: "earth_landscape".into(), unload: None }
        );
        orch.select_by_key("moon", &mut h.region_cx()).unwrap();
        assert_eq!(
            h.regions.calls,
            vec!["load earth_landscape", "unload earth_landscape", "load moon_landscape"]
        );
        assert_eq!(orch.active(), &ActiveEnvironment::Region { name: "moon_landscape".into() });
    }

    #[test]
    fn reselecting_active_region_issues_no_load_or_unload() {
        let mut h = Harness::new();
        let mut orch = orchestrator(region_config());
        orch.select_by_key("moon", &mut h.region_cx()).unwrap();
        settle(&mut orch, &mut h.gravity);
        let settled = orch.gravity();
        let again = orch.select_by_key("moon", &mut h.region_cx()).unwrap();
        assert_eq!(again.environment, SwapOutcome::Unchanged);
        assert_eq!(h.regions.calls, vec!["load moon_landscape"]);
        // Gravity eases again from where it is toward the same target.
        assert!(orch.gravity_transition().is_in_flight());
        assert_eq!(orch.gravity(), settled);
        assert_eq!(orch.gravity_transition().target(), again.gravity_target);
    }

    #[test]
    fn region_mode_never_searches_for_landscape_anchor() {
        let mut h = Harness::new();
        let mut orch = orchestrator(region_config());
        let report = orch.select_by_key("moon", &mut h.region_cx()).unwrap();
        assert_eq!(report.avatar, AvatarOutcome::Untouched);
        assert_eq!(h.rig.0.position, Vec3::new(7.0, 7.0, 7.0));
    }

    #[test]
    fn contentless_profile_clears_region() {
        let mut h = Harness::new();
        let mut orch = orchestrator(region_config());
        orch.select_by_key("moon", &mut h.region_cx()).unwrap();
        let report = orch.select_profile(&EnvironmentProfile::new("void", 0.0), &mut h.region_cx());
        assert_eq!(report.environment, SwapOutcome::Cleared);
        assert_eq!(h.regions.calls, vec!["load moon_landscape", "unload moon_landscape"]);
        assert_eq!(orch.active(), &ActiveEnvironment::Empty);
    }
}
