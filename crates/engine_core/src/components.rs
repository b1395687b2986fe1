//! Common ECS components shared by the scene graph and actor worlds.

/// Human-readable node name. Used for anchor lookup and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Parent link in a node hierarchy. Absent on root nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parent(pub hecs::Entity);

/// Ordered child links in a node hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Children(pub Vec<hecs::Entity>);

/// Tag component for the player avatar rig.
#[derive(Debug, Clone, Copy, Default)]
pub struct Avatar;
