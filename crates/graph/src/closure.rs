use crate::graph::NodeCollection;
use crate::types::{EdgeTarget, Node, NodeId};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Reserved key holding the seed list in the serialized closure
pub const CATEGORIES_KEY: &str = "categories";

/// Every node reachable from a set of seeds, keyed by id, plus the seeds.
///
/// Entries borrow the nodes of the [`NodeCollection`] (or the seeds) they were
/// reached through; nothing is copied until the closure is serialized.
#[derive(Debug, Clone)]
pub struct Closure<'a> {
    nodes: BTreeMap<NodeId, &'a Node>,
    categories: Vec<&'a Node>,
    stats: ClosureStats,
}

/// Counters collected during one traversal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClosureStats {
    /// Anonymous nodes walked through
    pub anonymous_visits: usize,

    /// Id-bearing nodes reached again after their first visit
    pub revisits: usize,

    /// Integer references with no node in the collection
    pub dangling: BTreeSet<NodeId>,
}

impl<'a> Closure<'a> {
    pub fn get(&self, id: NodeId) -> Option<&'a Node> {
        self.nodes.get(&id).copied()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Ids in ascending order
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &'a Node)> + '_ {
        self.nodes.iter().map(|(id, node)| (*id, *node))
    }

    /// Seeds in the order they were passed
    pub fn categories(&self) -> &[&'a Node] {
        &self.categories
    }

    pub fn stats(&self) -> &ClosureStats {
        &self.stats
    }

    /// Number of id-keyed entries (the category list is not counted)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Owned JSON rendering, identical to what [`Serialize`] produces
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        for (id, node) in &self.nodes {
            map.insert(id.to_string(), (*node).clone());
        }
        map.insert(
            CATEGORIES_KEY.to_string(),
            Value::Array(self.categories.iter().map(|node| (*node).clone()).collect()),
        );
        Value::Object(map)
    }
}

impl Serialize for Closure<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.nodes.len() + 1))?;
        for (id, node) in &self.nodes {
            map.serialize_entry(&id.to_string(), node)?;
        }
        map.serialize_entry(CATEGORIES_KEY, &self.categories)?;
        map.end()
    }
}

/// Compute the closure of `seeds` over `nodes`.
///
/// Seeds are walked in order; each id is inserted before its edges are
/// followed, so cycles and shared descendants are traversed once. Dangling
/// ids are skipped and recorded in [`ClosureStats::dangling`].
pub fn compute_closure<'a>(nodes: &'a NodeCollection, seeds: &[&'a Node]) -> Closure<'a> {
    let mut builder = ClosureBuilder::new(nodes);
    for &seed in seeds {
        builder.visit(seed);
        builder.categories.push(seed);
    }
    let closure = builder.finish();

    log::info!(
        "Built reference closure: {} nodes from {} seeds ({} dangling references)",
        closure.len(),
        closure.categories.len(),
        closure.stats.dangling.len()
    );
    if !closure.stats.dangling.is_empty() {
        log::debug!("Dangling reference ids: {:?}", closure.stats.dangling);
    }

    closure
}

struct ClosureBuilder<'a> {
    source: &'a NodeCollection,
    nodes: BTreeMap<NodeId, &'a Node>,
    categories: Vec<&'a Node>,
    stats: ClosureStats,
    stack: Vec<&'a Node>,
}

impl<'a> ClosureBuilder<'a> {
    fn new(source: &'a NodeCollection) -> Self {
        Self {
            source,
            nodes: BTreeMap::new(),
            categories: Vec::new(),
            stats: ClosureStats::default(),
            stack: Vec::new(),
        }
    }

    /// Depth-first walk from `root`, on an explicit stack. Targets are pushed
    /// in reverse so they pop in field order.
    fn visit(&mut self, root: &'a Node) {
        self.stack.push(root);

        while let Some(node) = self.stack.pop() {
            match NodeId::of(node) {
                Some(id) => {
                    if self.nodes.contains_key(&id) {
                        self.stats.revisits += 1;
                        continue;
                    }
                    self.nodes.insert(id, node);
                }
                None => self.stats.anonymous_visits += 1,
            }

            for target in self.source.edges(node).into_iter().rev() {
                match self.source.resolve(target) {
                    Some(next) => self.stack.push(next),
                    None => {
                        if let EdgeTarget::Unresolved(id) = target {
                            self.stats.dangling.insert(id);
                        }
                    }
                }
            }
        }
    }

    fn finish(self) -> Closure<'a> {
        Closure {
            nodes: self.nodes,
            categories: self.categories,
            stats: self.stats,
        }
    }
}
