use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DriverError>;

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("No package name provided; pass one with -p/--package or APIREF_PACKAGE")]
    Configuration,

    #[error("Unknown package '{0}': no category configuration")]
    UnknownPackage(String),

    #[error("Reference document not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Invalid category configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Graph error: {0}")]
    Graph(#[from] apiref_graph::GraphError),

    #[error("Failed to persist {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
