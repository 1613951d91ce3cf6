use crate::error::{GraphError, Result};
use crate::types::{EdgeTarget, Node, NodeId, EDGE_KINDS};
use std::collections::HashMap;

/// Every addressable node of one reference document, keyed by id
#[derive(Debug, Clone, Default)]
pub struct NodeCollection {
    nodes: HashMap<NodeId, Node>,
}

impl NodeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from nodes that carry their own `id`
    pub fn from_nodes<I>(nodes: I) -> Result<Self>
    where
        I: IntoIterator<Item = Node>,
    {
        let mut collection = Self::new();
        for node in nodes {
            collection.insert_node(node)?;
        }
        Ok(collection)
    }

    /// Insert `node` under `id`, returning the node it replaced
    pub fn insert(&mut self, id: NodeId, node: Node) -> Option<Node> {
        self.nodes.insert(id, node)
    }

    /// Insert `node` under its own `id`
    pub fn insert_node(&mut self, node: Node) -> Result<NodeId> {
        let id = NodeId::of(&node).ok_or_else(|| GraphError::InvalidNodeId(truncated(&node)))?;
        self.nodes.insert(id, node);
        Ok(id)
    }

    /// Insert unless the id is already taken. Returns whether the node was stored.
    pub fn insert_if_absent(&mut self, id: NodeId, node: Node) -> bool {
        match self.nodes.entry(id) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(node);
                true
            }
        }
    }

    /// Get node by id
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Turn an edge target into a concrete node. Dangling ids resolve to `None`.
    pub fn resolve<'a>(&'a self, target: EdgeTarget<'a>) -> Option<&'a Node> {
        match target {
            EdgeTarget::Unresolved(id) => self.get(id),
            EdgeTarget::Inline(node) => Some(node),
        }
    }

    /// All outgoing edge targets of `node`, in edge-kind order
    pub fn edges<'a>(&self, node: &'a Node) -> Vec<EdgeTarget<'a>> {
        EDGE_KINDS
            .iter()
            .flat_map(|kind| kind.targets(node))
            .collect()
    }

    /// Ids `node` references directly (inline nodes are looked through)
    pub fn referenced_ids(&self, node: &Node) -> Vec<NodeId> {
        let mut ids = Vec::new();
        let mut queue = vec![node];

        while let Some(current) = queue.pop() {
            for target in self.edges(current) {
                match target {
                    EdgeTarget::Unresolved(id) => ids.push(id),
                    EdgeTarget::Inline(inline) => match NodeId::of(inline) {
                        Some(id) => ids.push(id),
                        None => queue.push(inline),
                    },
                }
            }
        }

        ids
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    /// Get node count
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl FromIterator<(NodeId, Node)> for NodeCollection {
    fn from_iter<T: IntoIterator<Item = (NodeId, Node)>>(iter: T) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

fn truncated(node: &Node) -> String {
    let mut text = node.to_string();
    if text.len() > 80 {
        let mut cut = 80;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
        text.push_str("...");
    }
    text
}
