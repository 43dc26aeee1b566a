//! Core rust implementation of Fluxgraph, a crate for drawing flux solutions of metabolic models
//! onto pathway diagrams.
//!
//! A graph build reads a parsed [`PathwayDiagram`], a [`Model`] and a [`FluxSolution`], resolves
//! diagram identifiers to model identifiers, and produces a [`GraphDocument`] of metabolites
//! (nodes) and reactions (edges) annotated with flux. The document is then shaped for a renderer
//! by [`format`](graph::format::format).
use indexmap::IndexMap;

pub mod configuration;
pub mod graph;
pub mod io;
pub mod metabolic_model;
pub mod optimize;
pub mod pathway;

use crate::configuration::{Backend, GraphConfiguration};
use crate::graph::builder::{build_from_model, build_from_pathway};
use crate::graph::document::{GraphDocument, Position};
use crate::graph::format::{format, FormattedGraph};
use crate::graph::xref::CrossReferenceIndex;
use crate::graph::GraphError;
use crate::metabolic_model::model::Model;
use crate::optimize::FluxSolution;
use crate::pathway::diagram::PathwayDiagram;

pub use crate::graph::format::format_document;

/// Draw a flux solution onto a pathway diagram, shaped for the configured backend
///
/// Entries the diagram does not place are put at `positions` (keyed by entry id) when given.
///
/// # Errors
/// [`GraphError::Diagram`] when the diagram references entries it does not contain
pub fn render_pathway(
    diagram: &PathwayDiagram,
    model: &Model,
    solution: &FluxSolution,
    config: &GraphConfiguration,
    positions: Option<&IndexMap<String, Position>>,
) -> Result<FormattedGraph, GraphError> {
    let doc = pathway_document(diagram, model, solution, config, positions)?;
    Ok(format(&doc, config.backend))
}

/// Same as [`render_pathway`], with the backend chosen by name
///
/// # Errors
/// [`GraphError::Configuration`] for an unknown backend name, checked before anything is built
pub fn render_pathway_as(
    diagram: &PathwayDiagram,
    model: &Model,
    solution: &FluxSolution,
    config: &GraphConfiguration,
    positions: Option<&IndexMap<String, Position>>,
    backend_name: &str,
) -> Result<FormattedGraph, GraphError> {
    let backend = backend_name.parse::<Backend>()?;
    let doc = pathway_document(diagram, model, solution, config, positions)?;
    Ok(format(&doc, backend))
}

/// Draw a flux solution over the model's own reaction network, for when there is no diagram
pub fn render_model(
    model: &Model,
    solution: &FluxSolution,
    config: &GraphConfiguration,
    positions: Option<&IndexMap<String, Position>>,
) -> FormattedGraph {
    let doc = build_from_model(model, solution, config, positions);
    format(&doc, config.backend)
}

fn pathway_document(
    diagram: &PathwayDiagram,
    model: &Model,
    solution: &FluxSolution,
    config: &GraphConfiguration,
    positions: Option<&IndexMap<String, Position>>,
) -> Result<GraphDocument, GraphError> {
    diagram.validate()?;
    let xref = CrossReferenceIndex::build(model, config);
    Ok(build_from_pathway(
        diagram, model, &xref, solution, config, positions,
    )?)
}
