//! The unified, render-ready graph of metabolites and reactions
use serde::{Deserialize, Serialize};

/// Where a node was drawn from
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A compound entry of a pathway diagram
    Compound,
    /// A metabolite of a reaction model
    Metabolite,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Compound => "compound",
            NodeKind::Metabolite => "metabolite",
        }
    }
}

/// Position of a node on the canvas
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }
}

/// A drawn metabolite
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Node {
    /// Unique within a document
    pub id: String,
    /// Display name, cropped
    pub label: String,
    /// Full display name
    pub name: String,
    pub x: f64,
    pub y: f64,
    /// Integer-truncated sum of `abs(flux)` over every incident edge
    pub cumulative_flux: u64,
    pub kind: NodeKind,
    /// Model metabolite the node stands for, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metabolite: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Node {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Display class of the node, e.g. `compound flux`
    pub fn class(&self) -> String {
        let activity = if self.cumulative_flux > 0 {
            "flux"
        } else {
            "no-flux"
        };
        format!("{} {}", self.kind.as_str(), activity)
    }
}

/// Direction of flux through an edge
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FluxSign {
    Neg,
    Pos,
    Zero,
}

impl FluxSign {
    /// Sign of a flux value, NaN counts as zero
    pub fn from_flux(flux: f64) -> Self {
        if flux < 0f64 {
            FluxSign::Neg
        } else if flux > 0f64 {
            FluxSign::Pos
        } else {
            FluxSign::Zero
        }
    }
}

/// A drawn reaction step between two metabolites
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Edge {
    /// Unique within a document
    pub id: String,
    pub source: String,
    pub target: String,
    /// Signed flux of the reaction
    pub flux: f64,
    pub reversible: bool,
    pub sign: FluxSign,
    /// Stroke weight, 1 for no flux up to 10 for the largest absolute flux in the document
    pub weight: f64,
    /// Identifier of the reaction as the graph source names it
    pub reaction: String,
    /// Model reaction the flux was read from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_reaction: Option<String>,
    /// Whether the reaction was matched to a model reaction
    pub matched: bool,
}

/// The unified graph, nodes and edges in insertion order
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GraphDocument {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    /// Smallest signed flux over all edges, None without edges
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flux_min: Option<f64>,
    /// Largest signed flux over all edges, None without edges
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flux_max: Option<f64>,
}

impl GraphDocument {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

/// Crop a name to `length` characters, marking the cut with `...`
pub fn crop_label(name: &str, length: usize) -> String {
    if name.chars().count() > length {
        let mut cropped: String = name.chars().take(length).collect();
        cropped.push_str("...");
        cropped
    } else {
        name.to_string()
    }
}
