use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// A record of the reference document. Only the edge fields listed in
/// [`EDGE_KINDS`] and `id` are interpreted; everything else passes through.
pub type Node = Value;

/// Identity of an addressable node (the numeric `id` field)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Interpret a JSON value as an id. Only non-negative whole numbers qualify.
    pub fn from_value(value: &Value) -> Option<Self> {
        if let Some(id) = value.as_u64() {
            return Some(Self(id));
        }
        let float = value.as_f64()?;
        if float >= 0.0 && float.fract() == 0.0 && float < u64::MAX as f64 {
            Some(Self(float as u64))
        } else {
            None
        }
    }

    /// Id carried by `node`, or `None` for anonymous (inline) nodes
    pub fn of(node: &Node) -> Option<Self> {
        node.get("id").and_then(Self::from_value)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NodeId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// One value found in an edge field, before resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeTarget<'a> {
    /// Integer reference into the node collection
    Unresolved(NodeId),

    /// Embedded node, usually anonymous
    Inline(&'a Node),
}

impl<'a> EdgeTarget<'a> {
    /// Classify a raw edge value. Values the rule does not accept yield `None`.
    pub fn classify(value: &'a Value, rule: EdgeRule) -> Option<Self> {
        if let Some(id) = NodeId::from_value(value) {
            return Some(Self::Unresolved(id));
        }
        match rule {
            EdgeRule::IdOrInline if value.is_object() => Some(Self::Inline(value)),
            _ => None,
        }
    }
}

/// Whether an edge field holds one value or an ordered sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeShape {
    Single,
    Sequence,
}

/// Which value forms an edge field accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeRule {
    /// Integer references only; embedded objects are ignored
    IdOnly,

    /// Integer references or embedded objects
    IdOrInline,
}

/// A named field through which one node references others
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeKind {
    /// Dotted name, e.g. `declaration.children`
    pub name: &'static str,

    /// Field path from the node; every intermediate step must be an object
    pub path: &'static [&'static str],

    pub shape: EdgeShape,
    pub rule: EdgeRule,
}

impl EdgeKind {
    const fn new(
        name: &'static str,
        path: &'static [&'static str],
        shape: EdgeShape,
        rule: EdgeRule,
    ) -> Self {
        Self {
            name,
            path,
            shape,
            rule,
        }
    }

    /// Raw value of this edge field on `node`, if every step of the path exists
    pub fn field<'a>(&self, node: &'a Node) -> Option<&'a Value> {
        self.path
            .iter()
            .try_fold(node, |current, key| current.get(*key))
            .filter(|value| !value.is_null())
    }

    /// Edge targets this field contributes, in field order
    pub fn targets<'a>(&self, node: &'a Node) -> Vec<EdgeTarget<'a>> {
        let Some(value) = self.field(node) else {
            return Vec::new();
        };

        match self.shape {
            EdgeShape::Single => EdgeTarget::classify(value, self.rule).into_iter().collect(),
            EdgeShape::Sequence => value
                .as_array()
                .map(|items| {
                    items
                        .iter()
                        .filter_map(|item| EdgeTarget::classify(item, self.rule))
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

/// Every recognized edge kind, in the order they are followed
pub const EDGE_KINDS: &[EdgeKind] = &[
    EdgeKind::new("target", &["target"], EdgeShape::Single, EdgeRule::IdOnly),
    EdgeKind::new("type", &["type"], EdgeShape::Single, EdgeRule::IdOrInline),
    EdgeKind::new(
        "typeArguments",
        &["typeArguments"],
        EdgeShape::Sequence,
        EdgeRule::IdOrInline,
    ),
    EdgeKind::new("types", &["types"], EdgeShape::Sequence, EdgeRule::IdOrInline),
    EdgeKind::new(
        "declaration.children",
        &["declaration", "children"],
        EdgeShape::Sequence,
        EdgeRule::IdOrInline,
    ),
    EdgeKind::new(
        "elementType.target",
        &["elementType", "target"],
        EdgeShape::Single,
        EdgeRule::IdOnly,
    ),
    EdgeKind::new("children", &["children"], EdgeShape::Sequence, EdgeRule::IdOrInline),
    EdgeKind::new(
        "signatures",
        &["signatures"],
        EdgeShape::Sequence,
        EdgeRule::IdOrInline,
    ),
    EdgeKind::new(
        "parameters",
        &["parameters"],
        EdgeShape::Sequence,
        EdgeRule::IdOrInline,
    ),
];
