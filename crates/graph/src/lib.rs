//! # API Reference Graph
//!
//! Extracts the self-contained part of a symbol-reference document that a set
//! of seed categories actually needs.
//!
//! ## Architecture
//!
//! ```text
//! reference.json
//!     │
//!     ├──> ReferenceDocument
//!     │      ├─ NodeCollection (id -> node)
//!     │      └─ categories listing (seed lookup by name)
//!     │
//!     ├──> Edge table
//!     │      ├─ target, type, typeArguments, types
//!     │      ├─ declaration.children, elementType.target
//!     │      └─ children, signatures, parameters
//!     │
//!     └──> Closure engine
//!            ├─ Depth-first walk from each seed
//!            ├─ Memoize by id (cycles, shared nodes)
//!            └─ Closure { id -> node, "categories": seeds }
//! ```
//!
//! ## Example
//!
//! ```
//! use apiref_graph::{compute_closure, NodeId, ReferenceDocument};
//! use serde_json::json;
//!
//! let doc = ReferenceDocument::from_value(
//!     json!({
//!         "1": {"id": 1, "name": "signIn", "type": 2},
//!         "2": {"id": 2, "name": "SignInOutput"},
//!         "3": {"id": 3, "name": "Unused"},
//!         "categories": [{"name": "Auth", "children": [1]}],
//!     }),
//!     None,
//! )?;
//!
//! let seeds = doc.seeds_for(&["Auth"]);
//! let closure = compute_closure(doc.nodes(), &seeds);
//!
//! assert!(closure.contains(NodeId(2)));
//! assert!(!closure.contains(NodeId(3)));
//! # Ok::<(), apiref_graph::GraphError>(())
//! ```

mod closure;
mod document;
mod error;
mod graph;
mod types;

pub use closure::{compute_closure, Closure, ClosureStats, CATEGORIES_KEY};
pub use document::ReferenceDocument;
pub use error::{GraphError, Result};
pub use graph::NodeCollection;
pub use types::{EdgeKind, EdgeRule, EdgeShape, EdgeTarget, Node, NodeId, EDGE_KINDS};
