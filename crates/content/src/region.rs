//! Named regions loaded and unloaded over several frames.
//!
//! Requests only enqueue work; [`RegionManager::tick`] completes a bounded number of
//! operations per frame. Requests for the same region are serialized against each
//! other: a queued unload is cancelled by a later load of that region and vice versa,
//! so a stale unload can never land after a fresh load.

use crate::{ContentError, RegionHost};
use std::collections::{HashMap, HashSet, VecDeque};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionState {
    #[default]
    Unloaded,
    Loading,
    Loaded,
    Unloading,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum RegionOp {
    Load(String),
    Unload(String),
}

impl RegionOp {
    fn region(&self) -> &str {
        match self {
            RegionOp::Load(name) | RegionOp::Unload(name) => name,
        }
    }
}

/// Completed operation reported by [`RegionManager::tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionEvent {
    Loaded(String),
    Unloaded(String),
}

pub struct RegionManager {
    known: HashSet<String>,
    states: HashMap<String, RegionState>,
    queue: VecDeque<RegionOp>,
    ops_per_tick: usize,
}

impl RegionManager {
    pub fn new(regions: impl IntoIterator<Item = String>) -> Self {
        Self {
            known: regions.into_iter().collect(),
            states: HashMap::new(),
            queue: VecDeque::new(),
            ops_per_tick: 1,
        }
    }

    /// Operations completed per tick (minimum 1).
    pub fn with_ops_per_tick(mut self, ops: usize) -> Self {
        self.ops_per_tick = ops.max(1);
        self
    }

    pub fn state(&self, region: &str) -> RegionState {
        self.states.get(region).copied().unwrap_or_default()
    }

    pub fn is_loaded(&self, region: &str) -> bool {
        self.state(region) == RegionState::Loaded
    }

    pub fn loaded_regions(&self) -> Vec<&str> {
        let mut loaded: Vec<&str> = self
            .states
            .iter()
            .filter(|(_, s)| **s == RegionState::Loaded)
            .map(|(name, _)| name.as_str())
            .collect();
        loaded.sort_unstable();
        loaded
    }

    /// Operations still waiting for a tick.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    fn cancel_queued(&mut self, op: &RegionOp) -> bool {
        let before = self.queue.len();
        self.queue.retain(|queued| queued != op);
        before != self.queue.len()
    }

    fn check_known(&self, region: &str) -> Result<(), ContentError> {
        if self.known.contains(region) {
            Ok(())
        } else {
            Err(ContentError::UnknownRegion(region.to_string()))
        }
    }

    /// Complete up to `ops_per_tick` queued operations.
    pub fn tick(&mut self) -> Vec<RegionEvent> {
        let mut events = Vec::new();
        for _ in 0..self.ops_per_tick {
            let Some(op) = self.queue.pop_front() else {
                break;
            };
            let name = op.region().to_string();
            match op {
                RegionOp::Load(_) => {
                    log::info!("Region {:?} loaded", name);
                    self.states.insert(name.clone(), RegionState::Loaded);
                    events.push(RegionEvent::Loaded(name));
                }
                RegionOp::Unload(_) => {
                    log::info!("Region {:?} unloaded", name);
                    self.states.insert(name.clone(), RegionState::Unloaded);
                    events.push(RegionEvent::Unloaded(name));
                }
            }
        }
        events
    }
}

impl RegionHost for RegionManager {
    fn begin_load(&mut self, region: &str) {
        if let Err(e) = self.check_known(region) {
            log::warn!("Region load failed: {}", e);
            return;
        }
        if self.cancel_queued(&RegionOp::Unload(region.to_string())) {
            log::debug!("Region {:?}: pending unload cancelled by load", region);
            self.states.insert(region.to_string(), RegionState::Loaded);
            return;
        }
        match self.state(region) {
            RegionState::Loaded | RegionState::Loading => {
                log::debug!("Region {:?} already loaded or loading", region);
            }
            RegionState::Unloaded | RegionState::Unloading => {
                self.queue.push_back(RegionOp::Load(region.to_string()));
                self.states.insert(region.to_string(), RegionState::Loading);
            }
        }
    }

    fn begin_unload(&mut self, region: &str) {
        if let Err(e) = self.check_known(region) {
            log::warn!("Region unload failed: {}", e);
            return;
        }
        if self.cancel_queued(&RegionOp::Load(region.to_string())) {
            log::debug!("Region {:?}: pending load cancelled by unload", region);
            self.states.insert(region.to_string(), RegionState::Unloaded);
            return;
        }
        match self.state(region) {
            RegionState::Unloaded | RegionState::Unloading => {
                log::debug!("Region {:?} already unloaded or unloading", region);
            }
            RegionState::Loaded | RegionState::Loading => {
                self.queue.push_back(RegionOp::Unload(region.to_string()));
                self.states.insert(region.to_string(), RegionState::Unloading);
            }
        }
    }
}
