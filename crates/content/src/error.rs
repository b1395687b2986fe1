use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("no landscape template named {0:?}")]
    UnknownTemplate(String),
    #[error("scene node {0:?} no longer exists")]
    MissingNode(hecs::Entity),
    #[error("no region named {0:?}")]
    UnknownRegion(String),
}
