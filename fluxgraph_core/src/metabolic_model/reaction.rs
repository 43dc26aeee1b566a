//! This module provides a struct for representing reactions
use derive_builder::Builder;
use indexmap::IndexMap;

/// Default lower flux bound for reactions without an explicit bound
pub const DEFAULT_LOWER_BOUND: f64 = -1000.;
/// Default upper flux bound for reactions without an explicit bound
pub const DEFAULT_UPPER_BOUND: f64 = 1000.;

/// Represents a reaction in the metabolic model
#[derive(Builder, Debug, Clone)]
pub struct Reaction {
    /// Used to identify the reaction
    pub id: String,
    /// Metabolite stoichiometry of the reaction
    ///
    /// Negative coefficients are reactants, positive coefficients are products
    #[builder(default = "IndexMap::new()")]
    pub metabolites: IndexMap<String, f64>,
    /// Human-readable reaction name
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Lower flux bound
    #[builder(default = "DEFAULT_LOWER_BOUND")]
    pub lower_bound: f64,
    /// Upper flux bound
    #[builder(default = "DEFAULT_UPPER_BOUND")]
    pub upper_bound: f64,
    /// Explicit reversibility flag, if the model source declared one
    #[builder(default = "None")]
    pub reversible: Option<bool>,
    /// Reaction subsystem
    #[builder(default = "None")]
    pub subsystem: Option<String>,
    /// Notes about the reaction, stored as a raw JSON string
    #[builder(default = "None")]
    pub notes: Option<String>,
    /// Reaction Annotations, stored as a raw JSON string
    #[builder(default = "None")]
    pub annotation: Option<String>,
}

impl Reaction {
    /// Ids of the metabolites consumed by the reaction, in declaration order
    pub fn reactants(&self) -> impl Iterator<Item = &str> {
        self.metabolites
            .iter()
            .filter(|(_, coef)| **coef < 0f64)
            .map(|(id, _)| id.as_str())
    }

    /// Ids of the metabolites produced by the reaction, in declaration order
    pub fn products(&self) -> impl Iterator<Item = &str> {
        self.metabolites
            .iter()
            .filter(|(_, coef)| **coef > 0f64)
            .map(|(id, _)| id.as_str())
    }

    /// Whether the reaction can carry flux in both directions
    ///
    /// # Note:
    /// An explicit reversibility flag wins, otherwise the reaction is reversible when
    /// its bounds straddle zero
    pub fn reversibility(&self) -> bool {
        match self.reversible {
            Some(flag) => flag,
            None => self.lower_bound < 0f64 && self.upper_bound > 0f64,
        }
    }

    /// Name of the reaction, falling back to the id
    pub fn display_name(&self) -> &str {
        match self.name {
            Some(ref name) if !name.is_empty() => name,
            _ => &self.id,
        }
    }
}
