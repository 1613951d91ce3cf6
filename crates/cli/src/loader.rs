use crate::error::{DriverError, Result};
use apiref_graph::ReferenceDocument;
use log::debug;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Default directory holding one checkout per package, relative to the working directory
pub const DEFAULT_REFERENCES_ROOT: &str = "..";

/// Reads `<root>/<package>/docs/reference.json`
#[derive(Debug, Clone)]
pub struct ReferenceLoader {
    root: PathBuf,
}

impl ReferenceLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn reference_path(&self, package: &str) -> PathBuf {
        self.root.join(package).join("docs").join("reference.json")
    }

    /// Load the reference document of `package`
    pub async fn load(
        &self,
        package: &str,
        root_package: Option<&str>,
    ) -> Result<ReferenceDocument> {
        load_document(&self.reference_path(package), root_package).await
    }
}

impl Default for ReferenceLoader {
    fn default() -> Self {
        Self::new(DEFAULT_REFERENCES_ROOT)
    }
}

/// Load a reference document from an explicit path
pub async fn load_document(
    path: &Path,
    root_package: Option<&str>,
) -> Result<ReferenceDocument> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(DriverError::NotFound(path.to_path_buf()));
        }
        Err(err) => return Err(err.into()),
    };

    let document = ReferenceDocument::from_slice(&bytes, root_package)?;
    debug!(
        "Loaded {}: {} nodes, {} categories",
        path.display(),
        document.nodes().len(),
        document.categories().len()
    );
    Ok(document)
}
