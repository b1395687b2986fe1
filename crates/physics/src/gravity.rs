//! Smooth retargeting of the global gravity vector.
//!
//! A [`GravityTransition`] is plain state plus a step function: the host loop calls
//! [`GravityTransition::tick`] once per frame and pushes [`GravityTransition::current`]
//! into the physics backend. Only one retarget is ever in flight; `begin` replaces it.

use engine_core::{smooth_lerp, Vec3};

/// Outcome of [`GravityTransition::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStart {
    /// Non-positive duration: the target was applied synchronously.
    Completed,
    /// The vector will ease toward the target over the following ticks.
    Easing,
}

#[derive(Debug, Clone)]
pub struct GravityTransition {
    current: Vec3,
    start: Vec3,
    target: Vec3,
    elapsed: f32,
    duration: f32,
    in_flight: bool,
}

impl GravityTransition {
    /// Settled at `initial` with nothing in flight.
    pub fn new(initial: Vec3) -> Self {
        Self {
            current: initial,
            start: initial,
            target: initial,
            elapsed: 0.0,
            duration: 0.0,
            in_flight: false,
        }
    }

    /// Retarget toward `target`, discarding whatever transition was in flight.
    pub fn begin(&mut self, target: Vec3, duration: f32) -> TransitionStart {
        if self.in_flight {
            log::debug!(
                "Gravity retarget {:?} superseded at {:.0}% by {:?}",
                self.target,
                self.progress() * 100.0,
                target
            );
        }
        self.start = self.current;
        self.target = target;
        self.elapsed = 0.0;
        // NaN duration falls through to the immediate branch as well.
        if !(duration > 0.0) {
            self.current = target;
            self.duration = 0.0;
            self.in_flight = false;
            return TransitionStart::Completed;
        }
        self.duration = duration;
        self.in_flight = true;
        TransitionStart::Easing
    }

    /// Advance by `dt` seconds and return the new current vector.
    pub fn tick(&mut self, dt: f32) -> Vec3 {
        if !self.in_flight {
            return self.current;
        }
        self.elapsed += dt.max(0.0);
        if self.elapsed >= self.duration {
            self.current = self.target;
            self.in_flight = false;
        } else {
            self.current = smooth_lerp(self.start, self.target, self.elapsed / self.duration);
        }
        self.current
    }

    pub fn current(&self) -> Vec3 {
        self.current
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Settled exactly at `target`.
    pub fn is_settled_at(&self, target: Vec3) -> bool {
        !self.in_flight && self.current == target
    }

    /// Linear progress of the in-flight transition, 1.0 when settled.
    pub fn progress(&self) -> f32 {
        if self.in_flight {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}
