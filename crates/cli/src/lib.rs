//! # apiref CLI
//!
//! Driver around [`apiref_graph`]: selects a package's seed categories, loads
//! its reference document, computes the closure and writes it out.
//!
//! ## Pipeline
//!
//! ```text
//! -p <package>
//!     │
//!     ├──> CategoryConfig (bundled or --categories)
//!     │      └─> seed names: categories, then sub_categories
//!     │
//!     ├──> ReferenceLoader
//!     │      └─> <references-root>/<package>/docs/reference.json
//!     │
//!     ├──> compute_closure (apiref-graph)
//!     │
//!     └──> ClosureWriter
//!            └─> <out-dir>/<package>.json
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod loader;
pub mod writer;

pub use config::{CategoryConfig, PackageCategories};
pub use driver::{extract, ExtractOptions, ExtractReport};
pub use error::{DriverError, Result};
pub use loader::{load_document, ReferenceLoader, DEFAULT_REFERENCES_ROOT};
pub use writer::{render, ClosureWriter, DEFAULT_OUT_DIR};
