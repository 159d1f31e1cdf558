use skyfall_core::enums::{FontId, TextureId};
use thiserror::Error;

use crate::scene::NodeId;

/// Errors surfaced by scene graph operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("node {child:?} is not a direct child of {parent:?}")]
    NotAChild { parent: NodeId, child: NodeId },

    #[error("node {0:?} does not exist")]
    UnknownNode(NodeId),

    #[error("no texture registered for {0:?}")]
    MissingTexture(TextureId),

    #[error("no font registered for {0:?}")]
    MissingFont(FontId),
}
