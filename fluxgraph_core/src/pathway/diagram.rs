//! This module provides the PathwayDiagram struct, a laid-out pathway map
use std::str::FromStr;

use derive_builder::Builder;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pathway::entry::{Entry, EntryType};

/// Whether a diagram reaction is drawn as reversible
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionType {
    Irreversible,
    Reversible,
}

impl FromStr for ReactionType {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "irreversible" => Ok(ReactionType::Irreversible),
            "reversible" => Ok(ReactionType::Reversible),
            other => Err(DiagramError::UnknownReactionType(other.to_string())),
        }
    }
}

/// Substrate or product of a diagram reaction
#[derive(Clone, Debug, PartialEq)]
pub struct ReactionEndpoint {
    /// Id of the entry drawing this compound
    pub id: String,
    /// Namespaced compound identifier (e.g. `cpd:C00031`)
    pub name: String,
}

impl ReactionEndpoint {
    pub fn new<S: Into<String>, T: Into<String>>(id: S, name: T) -> Self {
        ReactionEndpoint {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A reaction step drawn on the diagram
#[derive(Builder, Clone, Debug, PartialEq)]
pub struct DiagramReaction {
    /// Id of the entry (gene, enzyme or ortholog) catalysing the step
    pub id: String,
    /// Namespaced reaction identifiers, whitespace separated (e.g. `rn:R00299 rn:R00300`)
    pub name: String,
    /// Drawn direction of the reaction
    #[builder(default = "ReactionType::Irreversible")]
    pub reaction_type: ReactionType,
    /// Consumed compounds, in declaration order
    #[builder(default = "Vec::new()")]
    pub substrates: Vec<ReactionEndpoint>,
    /// Produced compounds, in declaration order
    #[builder(default = "Vec::new()")]
    pub products: Vec<ReactionEndpoint>,
}

/// A static, laid-out pathway map
#[derive(Clone, Debug, PartialEq)]
pub struct PathwayDiagram {
    /// Namespaced pathway id (e.g. `path:eco00010`)
    pub name: Option<String>,
    /// Human-readable pathway title
    pub title: Option<String>,
    /// Map of entry ids to entries
    pub entries: IndexMap<String, Entry>,
    /// Reactions of the pathway, in declaration order
    pub reactions: Vec<DiagramReaction>,
}

impl PathwayDiagram {
    pub fn new_empty() -> Self {
        PathwayDiagram {
            name: None,
            title: None,
            entries: IndexMap::new(),
            reactions: Vec::new(),
        }
    }

    /// Add an entry to the diagram, replacing any entry with the same id
    pub fn add_entry(&mut self, entry: Entry) {
        let id = entry.id.clone();
        self.entries.insert(id, entry);
    }

    /// Add a reaction to the diagram
    pub fn add_reaction(&mut self, reaction: DiagramReaction) {
        self.reactions.push(reaction);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.reactions.is_empty()
    }

    /// Type of the entry catalysing a reaction, None when the entry is missing
    pub fn reaction_entry_type(&self, reaction: &DiagramReaction) -> Option<EntryType> {
        self.entries.get(&reaction.id).map(|e| e.entry_type)
    }

    /// Check that every reaction references only entries present in the diagram
    pub fn validate(&self) -> Result<(), DiagramError> {
        for reaction in &self.reactions {
            let referenced = std::iter::once(reaction.id.as_str()).chain(
                reaction
                    .substrates
                    .iter()
                    .chain(reaction.products.iter())
                    .map(|endpoint| endpoint.id.as_str()),
            );
            for entry_id in referenced {
                if !self.entries.contains_key(entry_id) {
                    return Err(DiagramError::UnknownEntry {
                        reaction: reaction.name.clone(),
                        entry: entry_id.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiagramError {
    #[error("Reaction {reaction} references entry {entry} which is not in the diagram")]
    UnknownEntry { reaction: String, entry: String },
    #[error("Unknown entry type {0}")]
    UnknownEntryType(String),
    #[error("Unknown reaction type {0}")]
    UnknownReactionType(String),
    #[error("Unable to read diagram due to {0}")]
    UnableToRead(String),
    #[error("Unable to parse diagram due to {0}")]
    UnableToParse(String),
}
