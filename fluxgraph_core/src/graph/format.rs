//! Output shapes of a graph document for the supported renderers
use serde::Serialize;

use crate::configuration::{Backend, ConfigurationError};
use crate::graph::document::{Edge, GraphDocument, Node, Position};

/// Arrow drawn on an edge end which the reaction runs into
const ARROW: &str = "triangle";
/// No arrow on an edge end
const NO_ARROW: &str = "none";

/// A graph document shaped for one renderer
///
/// Serializes to an object with top-level `nodes` and `edges` whatever the shape, plus the
/// `flux_min` and `flux_max` of the document when it has any
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FormattedGraph {
    Flat(FlatGraph),
    Nested(NestedGraph),
}

impl FormattedGraph {
    pub fn backend(&self) -> Backend {
        match self {
            FormattedGraph::Flat(_) => Backend::Flat,
            FormattedGraph::Nested(_) => Backend::Nested,
        }
    }

    pub fn to_json_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

// region Flat
/// One attribute record per node and per edge
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FlatGraph {
    pub nodes: Vec<FlatNode>,
    pub edges: Vec<Edge>,
    /// Smallest and largest drawn flux, absent for a graph without edges
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flux_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flux_max: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FlatNode {
    #[serde(flatten)]
    pub node: Node,
    /// Drawn size, the node's cumulative flux with a floor of 1
    pub size: u64,
}

impl From<&Node> for FlatNode {
    fn from(node: &Node) -> Self {
        FlatNode {
            size: node.cumulative_flux.max(1),
            node: node.clone(),
        }
    }
}
// endregion Flat

// region Nested
/// `{data, position}` envelopes, nodes carry a display class
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NestedGraph {
    pub nodes: Vec<NestedNode>,
    pub edges: Vec<NestedEdge>,
    /// Smallest and largest drawn flux, absent for a graph without edges
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flux_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flux_max: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NestedNode {
    pub data: Node,
    pub position: Position,
    pub classes: String,
    pub grabbable: bool,
}

impl From<&Node> for NestedNode {
    fn from(node: &Node) -> Self {
        NestedNode {
            data: node.clone(),
            position: node.position(),
            classes: node.class(),
            grabbable: true,
        }
    }
}

/// Edges are placed by their endpoints and carry no position of their own
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NestedEdge {
    pub data: NestedEdgeData,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NestedEdgeData {
    #[serde(flatten)]
    pub edge: Edge,
    #[serde(rename = "sourceArrowShape")]
    pub source_arrow_shape: &'static str,
    #[serde(rename = "targetArrowShape")]
    pub target_arrow_shape: &'static str,
}

impl From<&Edge> for NestedEdge {
    fn from(edge: &Edge) -> Self {
        NestedEdge {
            data: NestedEdgeData {
                edge: edge.clone(),
                source_arrow_shape: if edge.reversible { ARROW } else { NO_ARROW },
                target_arrow_shape: ARROW,
            },
        }
    }
}
// endregion Nested

/// Shape a graph document for `backend`
pub fn format(doc: &GraphDocument, backend: Backend) -> FormattedGraph {
    match backend {
        Backend::Flat => FormattedGraph::Flat(FlatGraph {
            nodes: doc.nodes.iter().map(FlatNode::from).collect(),
            edges: doc.edges.clone(),
            flux_min: doc.flux_min,
            flux_max: doc.flux_max,
        }),
        Backend::Nested => FormattedGraph::Nested(NestedGraph {
            nodes: doc.nodes.iter().map(NestedNode::from).collect(),
            edges: doc.edges.iter().map(NestedEdge::from).collect(),
            flux_min: doc.flux_min,
            flux_max: doc.flux_max,
        }),
    }
}

/// Shape a graph document for the backend named `backend_name` (`flat` or `nested`)
///
/// # Errors
/// [`ConfigurationError::UnknownBackend`] for any other name, nothing is formatted
pub fn format_document(
    doc: &GraphDocument,
    backend_name: &str,
) -> Result<FormattedGraph, ConfigurationError> {
    let backend = backend_name.parse::<Backend>()?;
    Ok(format(doc, backend))
}
