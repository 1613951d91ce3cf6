use crate::closure::CATEGORIES_KEY;
use crate::error::{GraphError, Result};
use crate::graph::NodeCollection;
use crate::types::{Node, NodeId};
use serde_json::{Map, Value};

/// A loaded reference document: addressable nodes plus the category listing
/// seeds are selected from.
#[derive(Debug, Clone, Default)]
pub struct ReferenceDocument {
    nodes: NodeCollection,
    categories: Vec<Node>,
}

impl ReferenceDocument {
    pub fn new(nodes: NodeCollection, categories: Vec<Node>) -> Self {
        Self { nodes, categories }
    }

    /// Parse a document from raw JSON bytes
    pub fn from_slice(bytes: &[u8], root_package: Option<&str>) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_value(value, root_package)
    }

    /// Normalize a parsed document.
    ///
    /// Two layouts are understood:
    /// - flat: numeric-string keys map to nodes, `categories` holds the listing;
    /// - tree: a TypeDoc project where id-bearing nodes are nested at any
    ///   depth. Every one of them is indexed, and the listing comes from the
    ///   top-level child named `root_package` when there is one.
    pub fn from_value(value: Value, root_package: Option<&str>) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(GraphError::InvalidDocument(format!(
                "expected a JSON object at the root, found {}",
                kind_of(&value)
            )));
        };

        if map.keys().any(|key| key.parse::<NodeId>().is_ok()) {
            Ok(Self::from_flat(map))
        } else {
            Ok(Self::from_tree(map, root_package))
        }
    }

    fn from_flat(mut map: Map<String, Value>) -> Self {
        let categories = take_categories(map.remove(CATEGORIES_KEY));
        let mut nodes = NodeCollection::new();

        for (key, node) in map {
            match key.parse::<NodeId>() {
                Ok(id) => {
                    nodes.insert(id, node);
                }
                Err(_) => log::debug!("Ignoring non-node key {key:?} in reference document"),
            }
        }

        Self { nodes, categories }
    }

    fn from_tree(map: Map<String, Value>, root_package: Option<&str>) -> Self {
        let root = Value::Object(map);
        let nodes = index_tree(&root);

        let package = root_package.and_then(|name| {
            root.get("children")?
                .as_array()?
                .iter()
                .find(|child| child.get("name").and_then(Value::as_str) == Some(name))
        });
        let listing = match package {
            Some(child) if child.get(CATEGORIES_KEY).is_some() => child.get(CATEGORIES_KEY),
            _ => {
                if let Some(name) = root_package {
                    log::debug!(
                        "Root package {name:?} has no categories; using the project listing"
                    );
                }
                root.get(CATEGORIES_KEY)
            }
        };

        Self {
            nodes,
            categories: take_categories(listing.cloned()),
        }
    }

    pub fn nodes(&self) -> &NodeCollection {
        &self.nodes
    }

    pub fn categories(&self) -> &[Node] {
        &self.categories
    }

    /// Resolve seed names to category nodes, in the order given.
    ///
    /// Each name picks the first category whose `name` (or, for TypeDoc
    /// category groups, `title`) equals it. Names with no match are skipped.
    pub fn seeds_for<S: AsRef<str>>(&self, names: &[S]) -> Vec<&Node> {
        names
            .iter()
            .filter_map(|name| {
                let found = self.category(name.as_ref());
                if found.is_none() {
                    log::debug!("No category named {:?} in reference document", name.as_ref());
                }
                found
            })
            .collect()
    }

    /// First category whose `name` (or `title`) equals `name`
    pub fn category(&self, name: &str) -> Option<&Node> {
        self.categories
            .iter()
            .find(|category| category_name(category) == Some(name))
    }
}

fn category_name(category: &Node) -> Option<&str> {
    category
        .get("name")
        .or_else(|| category.get("title"))
        .and_then(Value::as_str)
}

fn take_categories(listing: Option<Value>) -> Vec<Node> {
    match listing {
        Some(Value::Array(items)) => items,
        Some(other) => {
            log::warn!(
                "Ignoring categories listing: expected an array, found {}",
                kind_of(&other)
            );
            Vec::new()
        }
        None => Vec::new(),
    }
}

/// Index every id-bearing object in `root`; the first one reached keeps its id
fn index_tree(root: &Value) -> NodeCollection {
    let mut nodes = NodeCollection::new();
    let mut stack = vec![root];

    while let Some(value) = stack.pop() {
        match value {
            Value::Object(map) => {
                if let Some(id) = NodeId::of(value) {
                    if !nodes.insert_if_absent(id, value.clone()) {
                        log::warn!(
                            "Duplicate node id {id} in reference document; keeping the first"
                        );
                    }
                }
                stack.extend(map.values().rev());
            }
            Value::Array(items) => stack.extend(items.iter().rev()),
            _ => {}
        }
    }

    nodes
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_flat_document() {
        let doc = ReferenceDocument::from_value(
            json!({
                "1": {"id": 1, "name": "Auth", "children": [2]},
                "2": {"id": 2, "name": "signIn"},
                "categories": [{"name": "Auth", "children": [1]}],
            }),
            None,
        )
        .unwrap();

        assert_eq!(doc.nodes().len(), 2);
        assert_eq!(doc.nodes().get(NodeId(2)).unwrap()["name"], "signIn");
        assert_eq!(doc.categories().len(), 1);
    }

    #[test]
    fn test_tree_document_indexes_nested_nodes() {
        let doc = ReferenceDocument::from_value(
            json!({
                "id": 0,
                "name": "aws-amplify",
                "children": [{
                    "id": 1,
                    "name": "signIn",
                    "signatures": [{"id": 2, "parameters": [{"id": 3, "name": "input"}]}]
                }],
                "categories": [{"title": "Auth", "children": [1]}]
            }),
            None,
        )
        .unwrap();

        let mut ids: Vec<u64> = doc.nodes().iter().map(|(id, _)| id.0).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(doc.seeds_for(&["Auth"]).len(), 1);
    }

    #[test]
    fn test_tree_document_prefers_root_package_listing() {
        let doc = ReferenceDocument::from_value(
            json!({
                "children": [
                    {"id": 1, "name": "other", "categories": [{"name": "Other"}]},
                    {"id": 2, "name": "aws-amplify", "categories": [{"name": "Auth"}]},
                ],
                "categories": [{"name": "Project"}]
            }),
            Some("aws-amplify"),
        )
        .unwrap();
        assert_eq!(doc.categories(), &[json!({"name": "Auth"})]);

        let fallback = ReferenceDocument::from_value(
            json!({"children": [], "categories": [{"name": "Project"}]}),
            Some("aws-amplify"),
        )
        .unwrap();
        assert_eq!(fallback.categories(), &[json!({"name": "Project"})]);
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let doc = ReferenceDocument::from_value(
            json!({"children": [{"id": 4, "name": "first"}, {"id": 4, "name": "second"}]}),
            None,
        )
        .unwrap();
        assert_eq!(doc.nodes().get(NodeId(4)).unwrap()["name"], "first");
    }

    #[test]
    fn test_non_object_root_is_rejected() {
        let err = ReferenceDocument::from_value(json!([1, 2]), None).unwrap_err();
        assert!(matches!(err, GraphError::InvalidDocument(_)));

        let err = ReferenceDocument::from_slice(b"{not json", None).unwrap_err();
        assert!(matches!(err, GraphError::Json(_)));
    }

    #[test]
    fn test_seeds_follow_requested_order_and_skip_unknown() {
        let doc = ReferenceDocument::new(
            NodeCollection::new(),
            vec![
                json!({"name": "Auth"}),
                json!({"name": "Storage"}),
                json!({"name": "Auth", "duplicate": true}),
            ],
        );

        let seeds = doc.seeds_for(&["Storage", "Missing", "Auth", "Storage"]);
        assert_eq!(
            seeds,
            vec![
                &json!({"name": "Storage"}),
                &json!({"name": "Auth"}),
                &json!({"name": "Storage"}),
            ]
        );
    }

    #[test]
    fn test_non_array_categories_are_ignored() {
        let doc = ReferenceDocument::from_value(json!({"1": {"id": 1}, "categories": "Auth"}), None)
            .unwrap();
        assert!(doc.categories().is_empty());
    }
}
