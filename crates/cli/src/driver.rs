use crate::config::CategoryConfig;
use crate::error::{DriverError, Result};
use crate::loader::{load_document, ReferenceLoader, DEFAULT_REFERENCES_ROOT};
use crate::writer::{render, ClosureWriter, DEFAULT_OUT_DIR};
use apiref_graph::compute_closure;
use log::{error, info, warn};
use std::io::{self, Write};
use std::path::PathBuf;

/// Where an extraction reads from and writes to
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub package: Option<String>,

    /// Directory holding `<package>/docs/reference.json`
    pub references_root: PathBuf,

    /// Explicit reference document, overriding `references_root`
    pub reference_file: Option<PathBuf>,

    pub out_dir: PathBuf,

    /// Category configuration file; the bundled one is used when absent
    pub categories: Option<PathBuf>,

    /// Print the closure instead of writing it
    pub to_stdout: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            package: None,
            references_root: PathBuf::from(DEFAULT_REFERENCES_ROOT),
            reference_file: None,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            categories: None,
            to_stdout: false,
        }
    }
}

/// Outcome of one extraction
#[derive(Debug, Clone, Default)]
pub struct ExtractReport {
    pub package: String,

    /// Id-keyed entries in the closure
    pub nodes: usize,

    /// Seeds found in the document's category listing
    pub seeds: usize,

    /// Configured seed names the document has no category for
    pub missing_categories: Vec<String>,

    pub dangling_references: usize,

    /// File written, `None` when printing to stdout or when persisting failed
    pub output: Option<PathBuf>,
}

/// Load the package's reference document, compute the closure of its
/// configured categories and persist it.
///
/// Configuration and loading problems are returned. A failure to persist the
/// result is logged and reflected in [`ExtractReport::output`] only.
pub async fn extract(options: &ExtractOptions) -> Result<ExtractReport> {
    let package = options
        .package
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(DriverError::Configuration)?;

    let config = match &options.categories {
        Some(path) => CategoryConfig::from_file(path)?,
        None => CategoryConfig::builtin()?,
    };
    let entry = config.package(package)?;
    let root_package = entry.root_package.as_deref();

    let document = match &options.reference_file {
        Some(path) => load_document(path, root_package).await?,
        None => {
            ReferenceLoader::new(&options.references_root)
                .load(package, root_package)
                .await?
        }
    };

    let names = entry.seed_names();
    let missing_categories: Vec<String> = names
        .iter()
        .filter(|name| document.category(name).is_none())
        .map(|name| (*name).to_string())
        .collect();
    if !missing_categories.is_empty() {
        info!(
            "{} of {} categories not present in {package}: {}",
            missing_categories.len(),
            names.len(),
            missing_categories.join(", ")
        );
    }

    let seeds = document.seeds_for(&names);
    let closure = compute_closure(document.nodes(), &seeds);

    let mut report = ExtractReport {
        package: package.to_string(),
        nodes: closure.len(),
        seeds: seeds.len(),
        missing_categories,
        dangling_references: closure.stats().dangling.len(),
        output: None,
    };

    if options.to_stdout {
        let bytes = render(&closure)?;
        print_stdout(&bytes)?;
        return Ok(report);
    }

    match ClosureWriter::new(&options.out_dir).write(package, &closure).await {
        Ok(path) => {
            info!("Saved {} nodes to {}", report.nodes, path.display());
            report.output = Some(path);
        }
        Err(err) => error!("An error has occurred while saving {package}: {err}"),
    }

    Ok(report)
}

fn print_stdout(bytes: &[u8]) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout.write_all(bytes).and_then(|()| stdout.flush()) {
        if err.kind() == io::ErrorKind::BrokenPipe {
            warn!("stdout closed before the closure was fully written");
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}
