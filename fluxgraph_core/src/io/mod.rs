//! Module for reading and writing Models, pathway diagrams and flux solutions
pub mod json;
pub mod kgml;
