use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("accel supports only a single mesh")]
    MultipleMeshes,

    #[error("accel has no mesh to build the octree for")]
    MissingMesh,

    #[error("invalid mesh: {0}")]
    InvalidMesh(String),
}
