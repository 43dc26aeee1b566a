//! Module providing JSON IO for Models and flux solutions
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::metabolic_model::metabolite::Metabolite;
use crate::metabolic_model::model::Model;
use crate::metabolic_model::reaction::{
    Reaction, ReactionBuilder, ReactionBuilderError, DEFAULT_LOWER_BOUND, DEFAULT_UPPER_BOUND,
};
use crate::optimize::FluxSolution;

// region JSON Model
/// Represents a JSON serialized model, used for reading and writing models in json format
///
/// Genes are part of the format but play no part in drawing, they are ignored.
#[derive(Serialize, Deserialize)]
struct JsonModel {
    metabolites: Vec<JsonMetabolite>,
    reactions: Vec<JsonReaction>,
    id: Option<String>,
    compartments: Option<IndexMap<String, String>>,
    version: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct JsonMetabolite {
    id: String,
    name: Option<String>,
    compartment: Option<String>,
    charge: Option<i32>,
    formula: Option<String>,
    notes: Option<Value>,
    annotation: Option<Value>,
}

#[derive(Serialize, Deserialize)]
struct JsonReaction {
    id: String,
    name: Option<String>,
    metabolites: IndexMap<String, f64>,
    lower_bound: Option<f64>,
    upper_bound: Option<f64>,
    reversibility: Option<bool>,
    objective_coefficient: Option<f64>,
    subsystem: Option<String>,
    notes: Option<Value>,
    annotation: Option<Value>,
}
// endregion JSON Model

// region Conversions
impl From<JsonMetabolite> for Metabolite {
    fn from(m: JsonMetabolite) -> Self {
        /* Notes and annotations are kept as JSON strings, they are only interpreted when a
        cross-reference index is built from the model
        */
        Self {
            id: m.id,
            name: m.name,
            compartment: m.compartment,
            charge: m.charge.unwrap_or_default(),
            formula: m.formula,
            notes: m.notes.map(|v| v.to_string()),
            annotation: m.annotation.map(|v| v.to_string()),
        }
    }
}

impl From<Metabolite> for JsonMetabolite {
    fn from(m: Metabolite) -> Self {
        Self {
            id: m.id,
            name: m.name,
            compartment: m.compartment,
            charge: Some(m.charge),
            formula: m.formula,
            notes: m
                .notes
                .map(|n| serde_json::from_str(&n).unwrap_or(Value::String(n))),
            annotation: m
                .annotation
                .map(|a| serde_json::from_str(&a).unwrap_or(Value::String(a))),
        }
    }
}

impl Model {
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Model, JsonError> {
        let model_str = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => return Err(JsonError::UnableToRead(format!("{:?}", err))),
        };
        Model::from_json_str(&model_str)
    }

    pub fn from_json_str(model_str: &str) -> Result<Model, JsonError> {
        let json_model = match serde_json::from_str::<JsonModel>(model_str) {
            Ok(model) => model,
            Err(err) => return Err(JsonError::UnableToParse(format!("{:?}", err))),
        };
        Model::from_json(json_model)
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), JsonError> {
        let json_model = self.to_json();
        let model_string = serde_json::to_string(&json_model)?;
        fs::write(path, model_string)?;
        Ok(())
    }

    fn from_json(json_model: JsonModel) -> Result<Self, JsonError> {
        let mut reactions: IndexMap<String, Reaction> = IndexMap::new();
        let mut metabolites: IndexMap<String, Metabolite> = IndexMap::new();
        let mut objective: IndexMap<String, f64> = IndexMap::new();
        json_model.metabolites.into_iter().for_each(|m| {
            metabolites.insert(m.id.clone(), Metabolite::from(m));
        });
        // Now, iterate through the reactions, adding to the objective along the way
        for rxn in json_model.reactions {
            let new_reaction = ReactionBuilder::default()
                .id(rxn.id.clone())
                .metabolites(rxn.metabolites)
                .name(rxn.name)
                .lower_bound(rxn.lower_bound.unwrap_or(DEFAULT_LOWER_BOUND))
                .upper_bound(rxn.upper_bound.unwrap_or(DEFAULT_UPPER_BOUND))
                .reversible(rxn.reversibility)
                .subsystem(rxn.subsystem)
                .notes(rxn.notes.map(|v| v.to_string()))
                .annotation(rxn.annotation.map(|v| v.to_string()))
                .build()?;
            reactions.insert(rxn.id.clone(), new_reaction);
            // Add the reaction to the objective function if desired
            if let Some(coef) = rxn.objective_coefficient {
                if coef != 0f64 {
                    objective.insert(rxn.id, coef);
                }
            }
        }
        Ok(Model {
            reactions,
            metabolites,
            objective,
            id: json_model.id,
            compartments: json_model.compartments,
            version: json_model.version,
        })
    }

    fn to_json(&self) -> JsonModel {
        let json_metabolites: Vec<JsonMetabolite> = self
            .metabolites
            .iter()
            .map(|(_, m)| m.clone().into())
            .collect();
        let json_reactions: Vec<JsonReaction> = self
            .reactions
            .iter()
            .map(|(_, r)| JsonReaction {
                id: r.id.clone(),
                name: r.name.clone(),
                metabolites: r.metabolites.clone(),
                lower_bound: Some(r.lower_bound),
                upper_bound: Some(r.upper_bound),
                reversibility: r.reversible,
                objective_coefficient: self.objective.get(&r.id).copied(),
                subsystem: r.subsystem.clone(),
                notes: r
                    .notes
                    .clone()
                    .map(|n| serde_json::from_str(&n).unwrap_or(Value::String(n))),
                annotation: r
                    .annotation
                    .clone()
                    .map(|a| serde_json::from_str(&a).unwrap_or(Value::String(a))),
            })
            .collect();

        JsonModel {
            metabolites: json_metabolites,
            reactions: json_reactions,
            id: self.id.clone(),
            compartments: self.compartments.clone(),
            version: self.version.clone(),
        }
    }
}

impl FluxSolution {
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<FluxSolution, JsonError> {
        let solution_str = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => return Err(JsonError::UnableToRead(format!("{:?}", err))),
        };
        FluxSolution::from_json_str(&solution_str)
    }

    pub fn from_json_str(solution_str: &str) -> Result<FluxSolution, JsonError> {
        serde_json::from_str(solution_str)
            .map_err(|err| JsonError::UnableToParse(format!("{:?}", err)))
    }
}

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("Unable to read file due to {0}")]
    UnableToRead(String),
    #[error("Unable to parse json due to {0}")]
    UnableToParse(String),
    #[error("Unable to build reaction")]
    UnableToBuildReaction(#[from] ReactionBuilderError),
    #[error("Serde json parse error")]
    SerdeJsonParseError(#[from] serde_json::Error),
    #[error("Unable to write to file")]
    UnableToWrite(#[from] std::io::Error),
}

// endregion Conversions
