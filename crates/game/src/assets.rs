//! Asset catalog: profiles plus the content they refer to, loaded from one RON file.

use crate::presentation::Backdrop;
use content::{LandscapeTemplate, TemplateNode};
use engine_core::{Transform, Vec3};
use planets::{CatalogError, EnvironmentProfile, ProfileSet};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("could not read asset catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid asset catalog: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error(transparent)]
    Profiles(#[from] CatalogError),
}

#[derive(Deserialize)]
struct CatalogFile {
    profiles: Vec<EnvironmentProfile>,
    #[serde(default)]
    backdrops: Vec<Backdrop>,
    #[serde(default)]
    landscapes: Vec<LandscapeTemplate>,
    #[serde(default)]
    regions: Vec<String>,
    /// clip name -> audio file path
    #[serde(default)]
    ambient_clips: BTreeMap<String, PathBuf>,
}

pub struct AssetCatalog {
    pub profiles: ProfileSet,
    pub backdrops: Vec<Backdrop>,
    pub landscapes: Vec<LandscapeTemplate>,
    pub regions: Vec<String>,
    pub ambient_clips: Vec<(String, PathBuf)>,
}

impl AssetCatalog {
    pub fn from_ron_str(src: &str) -> Result<Self, AssetError> {
        let file: CatalogFile = ron::from_str(src)?;
        Ok(Self {
            profiles: ProfileSet::new(file.profiles)?,
            backdrops: file.backdrops,
            landscapes: file.landscapes,
            regions: file.regions,
            ambient_clips: file.ambient_clips.into_iter().collect(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let src = std::fs::read_to_string(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_ron_str(&src)?;
        log::info!(
            "Loaded {} profiles, {} landscapes, {} regions from {:?}",
            catalog.profiles.len(),
            catalog.landscapes.len(),
            catalog.regions.len(),
            path
        );
        Ok(catalog)
    }

    /// Load the catalog at `path`; fall back to the built-in worlds if that fails.
    pub fn load_or_builtin(path: &Path) -> Self {
        match Self::load(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                log::warn!("{}, using built-in worlds", e);
                Self::builtin()
            }
        }
    }

    /// Built-in worlds with simple landscapes and skies. No audio files.
    pub fn builtin() -> Self {
        let profiles = ProfileSet::builtin();
        let landscapes = profiles
            .iter()
            .filter_map(|p| p.environment.clone())
            .map(|key| LandscapeTemplate {
                root: landscape_with_spawn(&key, Vec3::new(0.0, 1.8, 0.0)),
                key,
            })
            .collect();
        let regions = profiles.iter().filter_map(|p| p.environment.clone()).collect();
        Self {
            profiles,
            backdrops: vec![
                Backdrop::new("blue_sky"),
                Backdrop::new("starfield")
                    .with_colors([0.0, 0.0, 0.005, 1.0], [0.01, 0.01, 0.02, 1.0])
                    .with_stars(1.0),
                Backdrop::new("dusty_sky")
                    .with_colors([0.45, 0.3, 0.22, 1.0], [0.78, 0.55, 0.38, 1.0])
                    .with_stars(0.05),
                Backdrop::new("banded_clouds")
                    .with_colors([0.55, 0.42, 0.3, 1.0], [0.85, 0.72, 0.55, 1.0]),
            ],
            landscapes,
            regions,
            ambient_clips: Vec::new(),
        }
    }
}

fn landscape_with_spawn(name: &str, spawn: Vec3) -> TemplateNode {
    TemplateNode::new(name, Transform::default())
        .with_child(TemplateNode::new("Terrain", Transform::default()))
        .with_child(TemplateNode::new("PlayerSpawn", Transform::from_position(spawn)))
}
