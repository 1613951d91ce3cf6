use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Invalid reference document: {0}")]
    InvalidDocument(String),

    #[error("Node has no usable id: {0}")]
    InvalidNodeId(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
