//! Cosmic Leap: planet-hopping environment transitions.
//!
//! [`TransitionOrchestrator`] swaps a destination's content, eases global gravity,
//! applies its sky and ambience and drops the avatar at the destination anchor.
//! [`App`] wires it to the reference collaborators and runs the frame loop.

pub mod app;
pub mod assets;
pub mod avatar;
pub mod collaborators;
pub mod config;
pub mod presentation;
pub mod transition;

pub use app::App;
pub use assets::{AssetCatalog, AssetError};
pub use collaborators::{AvatarTarget, Collaborators, ContentHost, Presentation};
pub use config::{ContentMode, GameConfig, MissingAudioPolicy, RepeatPolicy, TransitionConfig};
pub use transition::{
    ActiveEnvironment, AvatarOutcome, SelectionError, SelectionReport, SwapOutcome,
    TransitionOrchestrator,
};
