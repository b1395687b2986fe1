//! Core engine types and utilities for Cosmic Leap.
//!
//! This crate provides the foundational types used across all engine systems:
//! - Transform, pose and hierarchy components
//! - Frame timing
//! - Easing helpers shared by the transition code

pub mod components;
pub mod math;
pub mod time;
pub mod transform;

pub use components::*;
pub use math::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Quat, Vec3};
pub use hecs::{Entity, World};
