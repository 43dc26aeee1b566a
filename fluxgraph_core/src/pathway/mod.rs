//! Module providing the PathwayDiagram struct for representing a laid-out pathway map.

pub mod diagram;
pub mod entry;
