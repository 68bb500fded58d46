use thiserror::Error;

use crate::scene::NodeId;

/// Failures raised while reconfiguring render objects.
///
/// These never escape an event handler: the binding layer logs them and
/// reports the event as failed.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("scene node {0} is not in the scene")]
    MissingNode(NodeId),
    #[error("scene node {0} is not a mesh")]
    NotAMesh(NodeId),
    #[error("scene node {0} is not a light")]
    NotALight(NodeId),
}
