use crate::error::{DriverError, Result};
use apiref_graph::Closure;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Default output directory, relative to the working directory
pub const DEFAULT_OUT_DIR: &str = "src/directory/apiReferences";

/// Persists closures as `<out_dir>/<package>.json`
#[derive(Debug, Clone)]
pub struct ClosureWriter {
    out_dir: PathBuf,
}

impl ClosureWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn output_path(&self, package: &str) -> PathBuf {
        self.out_dir.join(format!("{package}.json"))
    }

    /// Write `closure` for `package` and return the path written
    pub async fn write(&self, package: &str, closure: &Closure<'_>) -> Result<PathBuf> {
        let path = self.output_path(package);
        let bytes = render(closure)?;
        write_atomic(&path, &bytes).await?;
        Ok(path)
    }
}

impl Default for ClosureWriter {
    fn default() -> Self {
        Self::new(DEFAULT_OUT_DIR)
    }
}

/// Pretty JSON (2-space indent) with a trailing newline
pub fn render(closure: &Closure<'_>) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(closure).map_err(apiref_graph::GraphError::from)?;
    bytes.push(b'\n');
    Ok(bytes)
}

async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let persistence = |source: std::io::Error| DriverError::Persistence {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.map_err(persistence)?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, bytes).await.map_err(persistence)?;
    if let Err(err) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(persistence(err));
    }
    Ok(())
}
