//! Module providing the unified graph of metabolites and reactions, and its construction
use thiserror::Error;

use crate::configuration::ConfigurationError;
use crate::pathway::diagram::DiagramError;

pub mod builder;
pub mod document;
pub mod format;
pub mod hub;
pub mod xref;

/// Fatal errors of a graph build, no partial graph is returned
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("Invalid diagram: {0}")]
    Diagram(#[from] DiagramError),
}
