//! Composition root: owns every collaborator and lends them to the orchestrator.

use crate::assets::AssetCatalog;
use crate::avatar::{spawn_avatar, AvatarRig};
use crate::collaborators::{Collaborators, ContentHost};
use crate::config::{ContentMode, GameConfig};
use crate::presentation::Stage;
use crate::transition::{SelectionError, SelectionReport, TransitionOrchestrator};
use audio::AmbientSink;
use content::{RegionManager, SceneWorld};
use engine_core::{FrameClock, Name, Pose, Transform, Vec3};
use hecs::{Entity, World};
use physics::{
    integrate_fallback_gravity, ColliderHandle, FallbackGravity, Impact, PhysicsBody, PhysicsWorld,
};
use std::path::Path;
use std::time::Duration;

/// Radius of the physics ballast dropped on every arrival.
pub const BALLAST_RADIUS: f32 = 0.25;
/// Height above the ground the ballast is released from.
const BALLAST_DROP_HEIGHT: f32 = 10.0;
/// Resting contact is allowed to sit this far above the geometric ground.
const CONTACT_SLOP: f32 = 0.05;

pub struct App {
    config: GameConfig,
    clock: FrameClock,
    orchestrator: TransitionOrchestrator,
    scene: SceneWorld,
    regions: RegionManager,
    stage: Stage,
    /// Avatar rig and ballast; separate from the environment scene graph.
    actors: World,
    physics: PhysicsWorld,
    ground: ColliderHandle,
    avatar: Entity,
    ballast: Entity,
}

impl App {
    pub fn new(config: GameConfig, catalog: AssetCatalog, ambient: Box<dyn AmbientSink>) -> Self {
        let mut scene = SceneWorld::new();
        scene.register_all(catalog.landscapes);
        if let Some(parent) = &config.transition.environment_parent {
            scene.spawn_node(parent, Transform::default(), None);
        }

        let orchestrator = TransitionOrchestrator::new(catalog.profiles, config.transition.clone());
        let mut physics = PhysicsWorld::default();
        orchestrator.sync_gravity(&mut physics);
        let ground = physics.add_ground_plane(0.0);

        let mut actors = World::new();
        let avatar = spawn_avatar(&mut actors, Vec3::from(config.avatar_start), 0.0);
        let ballast_start = ballast_drop_point(0.0);
        let body = physics.add_driven_body(ballast_start, BALLAST_RADIUS);
        let ballast = actors.spawn((
            Name::new("Ballast"),
            Transform::from_position(ballast_start),
            FallbackGravity::new(BALLAST_RADIUS + CONTACT_SLOP),
            body,
        ));

        log::info!(
            "Cosmic Leap ready: {} destinations, {} content, {:.1} m/s² baseline",
            orchestrator.profiles().len(),
            config.transition.content_mode.label(),
            config.transition.baseline_gravity
        );

        Self {
            clock: FrameClock::fixed_rate(config.frame_rate),
            regions: RegionManager::new(catalog.regions).with_ops_per_tick(config.region_ops_per_tick),
            stage: Stage::new(catalog.backdrops, ambient),
            config,
            orchestrator,
            scene,
            actors,
            physics,
            ground,
            avatar,
            ballast,
        }
    }

    /// Load the catalog named in `config` and open the audio device.
    pub fn from_config(config: GameConfig) -> Self {
        let catalog = AssetCatalog::load_or_builtin(Path::new(&config.catalog_path));
        let crossfade =
            Duration::try_from_secs_f32(config.ambient_crossfade).unwrap_or(Duration::ZERO);
        let ambient = audio::open_ambient(config.audio_enabled, &catalog.ambient_clips, crossfade);
        Self::new(config, catalog, ambient)
    }

    pub fn select_key(&mut self, key: &str) -> Result<SelectionReport, SelectionError> {
        self.select_with(|orchestrator, cx| orchestrator.select_by_key(key, cx))
    }

    pub fn select_index(&mut self, index: i32) -> Result<SelectionReport, SelectionError> {
        self.select_with(|orchestrator, cx| orchestrator.select_by_index(index, cx))
    }

    fn select_with<F>(&mut self, select: F) -> Result<SelectionReport, SelectionError>
    where
        F: FnOnce(&mut TransitionOrchestrator, &mut Collaborators<'_>) -> Result<SelectionReport, SelectionError>,
    {
        let content = match self.config.transition.content_mode {
            ContentMode::Instantiate => ContentHost::Scene(&mut self.scene),
            ContentMode::Region => ContentHost::Regions(&mut self.regions),
        };
        let mut rig = AvatarRig::new(&mut self.actors, self.avatar);
        let mut cx = Collaborators {
            content,
            presentation: &mut self.stage,
            avatar: Some(&mut rig),
            gravity: &mut self.physics,
        };
        let report = select(&mut self.orchestrator, &mut cx)?;
        self.after_selection(&report);
        Ok(report)
    }

    /// Re-arm fallback gravity for the new world.
    fn after_selection(&mut self, report: &SelectionReport) {
        let ground = self
            .orchestrator
            .find_profile_by_key(&report.key)
            .map(|p| p.ground_height)
            .unwrap_or(0.0);

        if let Ok(fallback) = self.actors.query_one_mut::<&mut FallbackGravity>(self.avatar) {
            fallback.ground_height = ground;
            if report.avatar.moved() {
                fallback.start_falling();
            }
        }

        self.physics.remove_collider(self.ground);
        self.ground = self.physics.add_ground_plane(ground);

        let drop = ballast_drop_point(ground);
        if let Ok((transform, fallback, body)) = self
            .actors
            .query_one_mut::<(&mut Transform, &mut FallbackGravity, &PhysicsBody)>(self.ballast)
        {
            self.physics.teleport_body(body.rigid_body, drop);
            transform.position = drop;
            fallback.ground_height = ground + BALLAST_RADIUS + CONTACT_SLOP;
            fallback.start_falling();
        }
    }

    /// Advance one frame. Returns the entities that landed.
    pub fn update(&mut self) -> Vec<(Entity, Impact)> {
        let dt = self.clock.advance();
        let gravity = self.orchestrator.tick(dt, &mut self.physics);
        self.physics.set_timestep(dt);
        let impacts = integrate_fallback_gravity(&mut self.actors, &mut self.physics, gravity, dt);
        self.physics.step();
        let events = self.regions.tick();
        if !events.is_empty() {
            log::debug!("Frame {}: {:?}", self.clock.frame_count(), events);
        }
        impacts
    }

    /// Run whole frames covering `seconds` of simulated time.
    pub fn run_for(&mut self, seconds: f32) -> Vec<(Entity, Impact)> {
        let frames = (f64::from(seconds.max(0.0)) * self.config.frame_rate.max(1.0)).ceil() as u64;
        let mut impacts = Vec::new();
        for _ in 0..frames {
            impacts.extend(self.update());
        }
        impacts
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn orchestrator(&self) -> &TransitionOrchestrator {
        &self.orchestrator
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn scene(&self) -> &SceneWorld {
        &self.scene
    }

    pub fn regions(&self) -> &RegionManager {
        &self.regions
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub fn avatar(&self) -> Entity {
        self.avatar
    }

    pub fn ballast(&self) -> Entity {
        self.ballast
    }

    pub fn avatar_pose(&self) -> Pose {
        self.actors
            .get::<&Transform>(self.avatar)
            .map(|t| t.pose())
            .unwrap_or_default()
    }

    pub fn fallback(&self, entity: Entity) -> Option<FallbackGravity> {
        self.actors.get::<&FallbackGravity>(entity).ok().map(|f| (*f).clone())
    }
}

fn ballast_drop_point(ground: f32) -> Vec3 {
    Vec3::new(2.0, ground + BALLAST_DROP_HEIGHT, 0.0)
}
