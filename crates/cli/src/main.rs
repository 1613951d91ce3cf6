use anyhow::{Context, Result};
use apiref_cli::{extract, ExtractOptions, DEFAULT_OUT_DIR, DEFAULT_REFERENCES_ROOT};
use clap::Parser;
use std::env;
use std::path::PathBuf;

const PACKAGE_ENV: &str = "APIREF_PACKAGE";

#[derive(Parser)]
#[command(name = "apiref")]
#[command(about = "Extract the self-contained part of an API reference document", long_about = None)]
#[command(version)]
struct Cli {
    /// Package to process (falls back to APIREF_PACKAGE)
    #[arg(short = 'p', long)]
    package: Option<String>,

    /// Directory holding <package>/docs/reference.json
    #[arg(long, default_value = DEFAULT_REFERENCES_ROOT)]
    references_root: PathBuf,

    /// Read this reference document instead of the one under --references-root
    #[arg(long)]
    reference_file: Option<PathBuf>,

    /// Directory the closure is written to as <package>.json
    #[arg(long, default_value = DEFAULT_OUT_DIR)]
    out_dir: PathBuf,

    /// Category configuration (TOML or JSON); defaults to the bundled one
    #[arg(long)]
    categories: Option<PathBuf>,

    /// Print the closure to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let options = ExtractOptions {
        package: cli.package.or_else(|| env::var(PACKAGE_ENV).ok()),
        references_root: cli.references_root,
        reference_file: cli.reference_file,
        out_dir: cli.out_dir,
        categories: cli.categories,
        to_stdout: cli.stdout,
    };

    let report = extract(&options)
        .await
        .context("Failed to extract API references")?;
    log::debug!("{report:?}");

    Ok(())
}
