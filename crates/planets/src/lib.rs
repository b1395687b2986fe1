//! Selectable destination environments ("planets") and the profile catalog.

pub mod catalog;
pub mod profile;

pub use catalog::*;
pub use profile::*;
