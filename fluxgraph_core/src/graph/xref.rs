//! Cross-references between pathway identifiers and model identifiers
//!
//! Resolution is a two step pipeline: an [`IdNormalizer`] turns a raw identifier into its bare
//! form (first token, namespace prefix stripped), then the bare form is looked up in a
//! [`XrefTable`]. Both the annotations of the model and the names found in a diagram go
//! through the same normalizer.
use std::collections::HashMap;

use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::configuration::GraphConfiguration;
use crate::metabolic_model::model::Model;

/// Strips namespace prefixes from external identifiers
#[derive(Clone, Debug, PartialEq)]
pub struct IdNormalizer {
    prefixes: Vec<String>,
}

impl IdNormalizer {
    pub fn new(prefixes: Vec<String>) -> Self {
        IdNormalizer { prefixes }
    }

    /// Bare form of an identifier
    ///
    /// Takes the first whitespace separated token and strips the first matching namespace
    /// prefix (ASCII case-insensitive). Returns None when nothing is left.
    ///
    /// # Examples
    /// ```rust
    /// use fluxgraph_core::graph::xref::IdNormalizer;
    /// let normalizer = IdNormalizer::new(vec!["rn:".to_string()]);
    /// assert_eq!(normalizer.normalize("rn:R00299 rn:R00300"), Some("R00299".to_string()));
    /// ```
    pub fn normalize(&self, raw: &str) -> Option<String> {
        let token = raw.split_whitespace().next()?;
        let stripped = self
            .prefixes
            .iter()
            .find_map(|prefix| {
                token
                    .get(..prefix.len())
                    .filter(|head| head.eq_ignore_ascii_case(prefix))
                    .and_then(|_| token.get(prefix.len()..))
            })
            .unwrap_or(token);
        if stripped.is_empty() {
            None
        } else {
            Some(stripped.to_string())
        }
    }
}

/// Which payload of a model entity the identifiers are read from
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AnnotationShape {
    /// Free-form notes, each key holds a list of values which may themselves list several ids
    Notes,
    /// Structured annotation, each key holds one identifier (or a list of them)
    Structured,
}

#[derive(Error, Debug)]
pub enum AnnotationError {
    #[error("Annotation is not valid JSON")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Annotation is not a JSON object")]
    NotAnObject,
    #[error("Annotation key {0} does not hold identifiers")]
    UnexpectedValue(String),
}

/// Extract the identifiers found under `keys` in a JSON annotation payload
pub fn extract_external_ids(
    payload: &str,
    keys: &[String],
    shape: AnnotationShape,
) -> Result<Vec<String>, AnnotationError> {
    let value: Value = serde_json::from_str(payload)?;
    let object = match value {
        Value::Object(object) => object,
        // An empty annotation is serialized as an empty list by some tools
        Value::Array(ref items) if items.is_empty() => return Ok(Vec::new()),
        _ => return Err(AnnotationError::NotAnObject),
    };
    let mut ids = Vec::new();
    for key in keys {
        let Some(value) = object.get(key) else {
            continue;
        };
        let values: Vec<&str> = match value {
            Value::String(s) => vec![s.as_str()],
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str())
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| AnnotationError::UnexpectedValue(key.clone()))?,
            _ => return Err(AnnotationError::UnexpectedValue(key.clone())),
        };
        for raw in values {
            match shape {
                AnnotationShape::Notes => ids.extend(
                    raw.split(|c: char| c == ',' || c.is_whitespace())
                        .filter(|id| !id.is_empty())
                        .map(str::to_string),
                ),
                AnnotationShape::Structured => {
                    let trimmed = raw.trim();
                    if !trimmed.is_empty() {
                        ids.push(trimmed.to_string())
                    }
                }
            }
        }
    }
    Ok(ids)
}

/// Lookup table between bare external ids and model ids
#[derive(Clone, Debug, Default, PartialEq)]
pub struct XrefTable {
    to_model: HashMap<String, String>,
    to_external: IndexMap<String, Vec<String>>,
}

impl XrefTable {
    /// Register an external id for a model id, a later registration of the same external id wins
    pub fn insert(&mut self, external_id: String, model_id: &str) {
        if let Some(previous) = self.to_model.insert(external_id.clone(), model_id.to_string()) {
            if previous != model_id {
                debug!(external = %external_id, previous = %previous, current = %model_id, "external id aliased");
            }
        }
        let externals = self.to_external.entry(model_id.to_string()).or_default();
        if !externals.contains(&external_id) {
            externals.push(external_id);
        }
    }

    /// Model id registered for a bare external id
    pub fn model_id(&self, external_id: &str) -> Option<&str> {
        self.to_model.get(external_id).map(String::as_str)
    }

    /// Bare external ids registered for a model id
    pub fn external_ids(&self, model_id: &str) -> &[String] {
        self.to_external
            .get(model_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.to_model.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_model.is_empty()
    }
}

/// Mapping between pathway identifiers and the reactions and metabolites of a model
///
/// Built once per (diagram, model) pair, read-only afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct CrossReferenceIndex {
    normalizer: IdNormalizer,
    reactions: XrefTable,
    metabolites: XrefTable,
}

impl CrossReferenceIndex {
    /// An index which resolves nothing
    pub fn empty(normalizer: IdNormalizer) -> Self {
        CrossReferenceIndex {
            normalizer,
            reactions: XrefTable::default(),
            metabolites: XrefTable::default(),
        }
    }

    /// Build the index from the notes and annotations of every reaction and metabolite
    ///
    /// Entities without cross-references are logged and left out, entities with a payload
    /// which can not be parsed are logged and skipped.
    pub fn build(model: &Model, config: &GraphConfiguration) -> Self {
        let mut index =
            CrossReferenceIndex::empty(IdNormalizer::new(config.namespace_prefixes.clone()));
        for reaction in model.reactions.values() {
            let found = index.register(
                Entity::Reaction,
                &reaction.id,
                reaction.notes.as_deref(),
                reaction.annotation.as_deref(),
                &config.reaction_xref_keys,
            );
            if !found {
                debug!(reaction = %reaction.id, "reaction has no cross-reference");
            }
        }
        for metabolite in model.metabolites.values() {
            let found = index.register(
                Entity::Metabolite,
                &metabolite.id,
                metabolite.notes.as_deref(),
                metabolite.annotation.as_deref(),
                &config.metabolite_xref_keys,
            );
            if !found {
                debug!(metabolite = %metabolite.id, "metabolite has no cross-reference");
            }
        }
        index
    }

    fn register(
        &mut self,
        entity: Entity,
        model_id: &str,
        notes: Option<&str>,
        annotation: Option<&str>,
        keys: &[String],
    ) -> bool {
        let mut found = false;
        let payloads = [
            (notes, AnnotationShape::Notes),
            (annotation, AnnotationShape::Structured),
        ];
        for (payload, shape) in payloads {
            let Some(payload) = payload else {
                continue;
            };
            let raw_ids = match extract_external_ids(payload, keys, shape) {
                Ok(ids) => ids,
                Err(err) => {
                    warn!(id = %model_id, ?shape, error = %err, "skipping malformed annotation");
                    continue;
                }
            };
            for raw in raw_ids {
                if let Some(external) = self.normalizer.normalize(&raw) {
                    match entity {
                        Entity::Reaction => self.reactions.insert(external, model_id),
                        Entity::Metabolite => self.metabolites.insert(external, model_id),
                    }
                    found = true;
                }
            }
        }
        found
    }

    /// Bare form of a raw identifier, see [`IdNormalizer::normalize`]
    pub fn normalize(&self, raw: &str) -> Option<String> {
        self.normalizer.normalize(raw)
    }

    /// Model reaction id for a raw pathway reaction identifier (e.g. `rn:R00299`)
    pub fn resolve_reaction(&self, raw: &str) -> Option<&str> {
        let external = self.normalize(raw)?;
        self.reactions.model_id(&external)
    }

    /// Model metabolite id for a raw pathway compound identifier (e.g. `cpd:C00031`)
    pub fn resolve_metabolite(&self, raw: &str) -> Option<&str> {
        let external = self.normalize(raw)?;
        self.metabolites.model_id(&external)
    }

    pub fn reactions(&self) -> &XrefTable {
        &self.reactions
    }

    pub fn metabolites(&self) -> &XrefTable {
        &self.metabolites
    }
}

#[derive(Copy, Clone)]
enum Entity {
    Reaction,
    Metabolite,
}
