//! This module provides the Model struct for representing an entire metabolic model
use crate::metabolic_model::metabolite::Metabolite;
use crate::metabolic_model::reaction::Reaction;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Represents a Genome Scale Metabolic Model
#[derive(Clone, Debug)]
pub struct Model {
    /// Map of reaction ids to Reaction Objects
    pub reactions: IndexMap<String, Reaction>,
    /// Map of metabolite ids to Metabolite Objects
    pub metabolites: IndexMap<String, Metabolite>,
    /// Map of reaction ids to objective function coefficients
    pub objective: IndexMap<String, f64>,
    /// Id associated with the Model
    pub id: Option<String>,
    /// Compartments in the model
    ///
    /// An IndexMap<String, String> of {short name: long name}
    pub compartments: Option<IndexMap<String, String>>,
    /// A version identifier for the Model, stored as a string
    pub version: Option<String>,
}

/// Bound change requested for a single reaction, identified by name
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BoundOverride {
    /// Reaction name (or id) the bounds apply to
    pub name: String,
    /// New lower flux bound
    pub lower_bound: f64,
    /// New upper flux bound
    pub upper_bound: f64,
}

/// Summary of a reaction, used by clients to pick objectives and bounds
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ReactionSummary {
    pub name: String,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub reversibility: bool,
}

impl Model {
    pub fn new_empty() -> Self {
        Model {
            reactions: IndexMap::new(),
            metabolites: IndexMap::new(),
            objective: IndexMap::new(),
            id: None,
            compartments: None,
            version: None,
        }
    }

    /// Add a reaction to the model
    ///
    /// # Parameters
    /// - reaction: Reaction to add
    ///
    /// # Examples
    /// ```rust
    /// use fluxgraph_core::metabolic_model::model::Model;
    /// use fluxgraph_core::metabolic_model::reaction::{Reaction, ReactionBuilder};
    /// let mut model = Model::new_empty();
    /// let new_reaction = ReactionBuilder::default().id("new_reaction".to_string()).build().unwrap();
    /// model.add_reaction(new_reaction);
    /// ```
    pub fn add_reaction(&mut self, reaction: Reaction) {
        let id = reaction.id.clone();
        self.reactions.insert(id, reaction);
    }

    /// Add a metabolite to the model
    ///
    /// # Parameters
    /// - metabolite: Metabolite to add
    ///
    /// # Examples
    /// ```rust
    /// use fluxgraph_core::metabolic_model::metabolite::MetaboliteBuilder;
    /// use fluxgraph_core::metabolic_model::model::Model;
    /// let mut model = Model::new_empty();
    /// let new_metabolite = MetaboliteBuilder::default().id("glc__D_e".to_string()).build().unwrap();
    /// model.add_metabolite(new_metabolite);
    /// ```
    pub fn add_metabolite(&mut self, metabolite: Metabolite) {
        let id = metabolite.id.clone();
        self.metabolites.insert(id, metabolite);
    }

    /// Whether the model holds no reactions and no metabolites
    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty() && self.metabolites.is_empty()
    }

    /// Find a reaction by its human-readable name, falling back to its id
    pub fn find_reaction_by_name(&self, name: &str) -> Option<&Reaction> {
        self.reactions
            .values()
            .find(|r| r.name.as_deref() == Some(name))
            .or_else(|| self.reactions.get(name))
    }

    fn find_reaction_id_by_name(&self, name: &str) -> Option<String> {
        self.find_reaction_by_name(name).map(|r| r.id.clone())
    }

    /// Prepare the model for an optimization run
    ///
    /// Every reaction named in `objectives` receives an objective coefficient of 1.0, and
    /// every override replaces the bounds of the reaction it names. Names which match no
    /// reaction are logged and skipped.
    pub fn apply_objectives_and_bounds(
        &mut self,
        objectives: &[String],
        bound_overrides: &[BoundOverride],
    ) {
        for objective in objectives {
            match self.find_reaction_id_by_name(objective) {
                Some(id) => {
                    self.objective.insert(id, 1.0);
                }
                None => warn!(reaction = %objective, "objective reaction not found in model"),
            }
        }
        for bounds in bound_overrides {
            let reaction = self
                .find_reaction_id_by_name(&bounds.name)
                .and_then(|id| self.reactions.get_mut(&id));
            match reaction {
                Some(reaction) => {
                    reaction.lower_bound = bounds.lower_bound;
                    reaction.upper_bound = bounds.upper_bound;
                }
                None => warn!(reaction = %bounds.name, "bound override targets unknown reaction"),
            }
        }
    }

    /// Summaries of every reaction, in model order
    pub fn reaction_summaries(&self) -> Vec<ReactionSummary> {
        self.reactions
            .values()
            .map(|r| ReactionSummary {
                name: r.display_name().to_string(),
                lower_bound: r.lower_bound,
                upper_bound: r.upper_bound,
                reversibility: r.reversibility(),
            })
            .collect()
    }
}
