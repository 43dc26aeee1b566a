//! This module provides the entries (drawn elements) of a pathway diagram
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::pathway::diagram::DiagramError;

/// Kind of element an entry draws
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Compound,
    Gene,
    Enzyme,
    /// Ortholog groups, which stand in for a reaction step rather than a concrete enzyme
    Ortholog,
    /// Link to another pathway map
    Map,
    Group,
    /// A reaction drawn as a node
    Reaction,
    /// Link to a BRITE hierarchy
    Brite,
    Other,
}

impl EntryType {
    /// Whether reactions attached to this entry are concrete biochemistry
    pub fn is_concrete(&self) -> bool {
        !matches!(self, EntryType::Ortholog)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Compound => "compound",
            EntryType::Gene => "gene",
            EntryType::Enzyme => "enzyme",
            EntryType::Ortholog => "ortholog",
            EntryType::Map => "map",
            EntryType::Group => "group",
            EntryType::Reaction => "reaction",
            EntryType::Brite => "brite",
            EntryType::Other => "other",
        }
    }
}

impl Display for EntryType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compound" => Ok(EntryType::Compound),
            "gene" => Ok(EntryType::Gene),
            "enzyme" => Ok(EntryType::Enzyme),
            "ortholog" => Ok(EntryType::Ortholog),
            "map" => Ok(EntryType::Map),
            "group" => Ok(EntryType::Group),
            "reaction" => Ok(EntryType::Reaction),
            "brite" => Ok(EntryType::Brite),
            "other" => Ok(EntryType::Other),
            other => Err(DiagramError::UnknownEntryType(other.to_string())),
        }
    }
}

/// Layout and styling of an entry
#[derive(Builder, Clone, Debug, PartialEq)]
pub struct Graphics {
    /// Label drawn on the diagram
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Horizontal position of the entry's centre
    pub x: f64,
    /// Vertical position of the entry's centre
    pub y: f64,
    #[builder(default = "None")]
    pub width: Option<f64>,
    #[builder(default = "None")]
    pub height: Option<f64>,
    /// Shape as declared by the diagram (e.g. `circle`, `rectangle`)
    #[builder(default = "None")]
    pub shape: Option<String>,
    /// Background colour, as a hex string
    #[builder(default = "None")]
    pub bgcolor: Option<String>,
    /// Foreground colour, as a hex string
    #[builder(default = "None")]
    pub fgcolor: Option<String>,
}

impl Graphics {
    /// Shape name understood by graph renderers
    ///
    /// # Note:
    /// `circle` is drawn as `ellipse`, unrecognised shapes fall back to `ellipse`
    pub fn renderer_shape(&self) -> &'static str {
        match self.shape.as_deref() {
            Some("rectangle") => "rectangle",
            Some("roundrectangle") => "roundrectangle",
            _ => "ellipse",
        }
    }
}

/// An element drawn on a pathway diagram
#[derive(Builder, Clone, Debug, PartialEq)]
pub struct Entry {
    /// Used to identify the entry (unique within a diagram)
    pub id: String,
    /// Namespaced identifiers of what the entry stands for (e.g. `cpd:C00031`)
    pub name: String,
    /// Kind of element
    pub entry_type: EntryType,
    /// Layout of the entry, None when the diagram does not place it
    #[builder(default = "None")]
    pub graphics: Option<Graphics>,
}

impl Entry {
    /// Label of the entry on the diagram, falling back to its namespaced name
    pub fn label(&self) -> &str {
        match self.graphics.as_ref().and_then(|g| g.name.as_deref()) {
            Some(name) if !name.is_empty() => name,
            _ => &self.name,
        }
    }
}
