//! Node/link graph feeding the radial view

use serde::{Deserialize, Serialize};

/// Which side of the radial diagram a node belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeGroup {
    /// A survey theme (right hemisphere)
    Theme,
    /// A school (left hemisphere)
    School,
    /// Any other group; not placed on the diagram
    #[serde(other)]
    Other,
}

/// A graph node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Node id, also used as its label
    pub id: String,
    /// Node group
    pub group: NodeGroup,
    /// Net sentiment of the node (schools only)
    #[serde(default, alias = "score")]
    pub net_sentiment: f64,
}

/// A school → theme link
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    /// Source node id (a school)
    pub source: String,
    /// Target node id (a theme)
    pub target: String,
    /// Number of comments behind the link
    #[serde(default)]
    pub value: f64,
    /// Mean sentiment of those comments
    #[serde(default)]
    pub sentiment: f64,
}

/// The radial graph section of the dataset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RadialGraph {
    /// Theme and school nodes
    #[serde(default)]
    pub nodes: Vec<Node>,
    /// School → theme links
    #[serde(default)]
    pub links: Vec<Link>,
}

impl RadialGraph {
    /// Find a node by id
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }
}
