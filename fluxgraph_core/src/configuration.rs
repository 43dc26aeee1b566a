//! Configuration threaded through every graph build
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graph::hub::HubFilter;

/// Settings for a single graph build
///
/// A configuration is an explicit value, so builds for different organisms can run side by
/// side with different denylists.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GraphConfiguration {
    /// Metabolite names excluded from the drawn graph
    pub hub_metabolites: HubFilter,
    /// Output shape produced by the formatter
    pub backend: Backend,
    /// Maximum number of characters in a node label before it is cropped
    pub label_length: usize,
    /// Namespace prefixes stripped from external identifiers (e.g. `rn:`, `cpd:`)
    pub namespace_prefixes: Vec<String>,
    /// Annotation and notes keys holding external reaction identifiers
    pub reaction_xref_keys: Vec<String>,
    /// Annotation and notes keys holding external compound identifiers
    pub metabolite_xref_keys: Vec<String>,
    /// Placement of nodes without a diagram position
    pub layout: LayoutConfiguration,
}

impl Default for GraphConfiguration {
    fn default() -> Self {
        GraphConfiguration {
            hub_metabolites: HubFilter::default(),
            backend: Backend::Nested,
            label_length: 20,
            namespace_prefixes: ["rn:", "cpd:", "gl:", "dr:", "ko:", "ec:", "path:", "kegg:"]
                .iter()
                .map(|p| p.to_string())
                .collect(),
            reaction_xref_keys: ["kegg.reaction", "KEGG ID", "KEGG_ID", "KEGG_REACTION"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
            metabolite_xref_keys: ["kegg.compound", "KEGG ID", "KEGG_ID", "KEGG_COMPOUND"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
            layout: LayoutConfiguration::default(),
        }
    }
}

impl GraphConfiguration {
    /// Read a configuration from a JSON file, missing fields take their default values
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Self, ConfigurationError> {
        let config_str = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => return Err(ConfigurationError::UnableToRead(format!("{:?}", err))),
        };
        Self::from_json_str(&config_str)
    }

    /// Parse a configuration from a JSON string, missing fields take their default values
    pub fn from_json_str(config_str: &str) -> Result<Self, ConfigurationError> {
        let value: serde_json::Value = match serde_json::from_str(config_str) {
            Ok(value) => value,
            Err(err) => return Err(ConfigurationError::UnableToParse(format!("{:?}", err))),
        };
        // Reject an unknown backend by name before anything else is interpreted
        if let Some(name) = value.get("backend").and_then(serde_json::Value::as_str) {
            name.parse::<Backend>()?;
        }
        serde_json::from_value(value)
            .map_err(|err| ConfigurationError::UnableToParse(format!("{:?}", err)))
    }
}

/// Placement of nodes which have no diagram position
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfiguration {
    /// Width of the canvas random positions are drawn from
    pub width: f64,
    /// Height of the canvas random positions are drawn from
    pub height: f64,
    /// Seed for reproducible random layouts, a fresh layout is drawn every build when None
    pub seed: Option<u64>,
}

impl Default for LayoutConfiguration {
    fn default() -> Self {
        LayoutConfiguration {
            width: 1000.,
            height: 1000.,
            seed: None,
        }
    }
}

/// Output shape of a formatted graph
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Backend {
    /// One flat attribute record per node/edge, for force-directed renderers
    Flat,
    /// `{data, position}` envelopes with node classes, for constraint-based renderers
    Nested,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Flat => "flat",
            Backend::Nested => "nested",
        }
    }
}

impl Display for Backend {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Backend {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flat" => Ok(Backend::Flat),
            "nested" => Ok(Backend::Nested),
            other => Err(ConfigurationError::UnknownBackend(other.to_string())),
        }
    }
}

impl TryFrom<String> for Backend {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Backend> for String {
    fn from(value: Backend) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Unknown backend {0}, expected flat or nested")]
    UnknownBackend(String),
    #[error("Unable to read configuration due to {0}")]
    UnableToRead(String),
    #[error("Unable to parse configuration due to {0}")]
    UnableToParse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_names() {
        assert_eq!("flat".parse::<Backend>().unwrap(), Backend::Flat);
        assert_eq!("nested".parse::<Backend>().unwrap(), Backend::Nested);
        assert_eq!(
            "turtle".parse::<Backend>(),
            Err(ConfigurationError::UnknownBackend("turtle".to_string()))
        );
        // Names are matched exactly
        assert!("Flat".parse::<Backend>().is_err());
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config = GraphConfiguration::from_json_str(
            r#"{"backend": "flat", "hub_metabolites": ["H2O"], "layout": {"seed": 7}}"#,
        )
        .unwrap();
        assert_eq!(config.backend, Backend::Flat);
        assert!(config.hub_metabolites.is_hub("H2O"));
        assert!(!config.hub_metabolites.is_hub("ATP"));
        assert_eq!(config.layout.seed, Some(7));
        assert!((config.layout.width - 1000.).abs() < 1e-25);
        assert_eq!(config.label_length, 20);
        assert!(config.namespace_prefixes.contains(&"rn:".to_string()));
    }

    #[test]
    fn unknown_backend_in_json() {
        let err = GraphConfiguration::from_json_str(r#"{"backend": "turtle"}"#).unwrap_err();
        assert_eq!(err, ConfigurationError::UnknownBackend("turtle".to_string()));
    }

    #[test]
    fn malformed_json() {
        let err = GraphConfiguration::from_json_str("{backend").unwrap_err();
        assert!(matches!(err, ConfigurationError::UnableToParse(_)));
    }

    #[test]
    fn missing_file() {
        let err = GraphConfiguration::read_json("does/not/exist.json").unwrap_err();
        assert!(matches!(err, ConfigurationError::UnableToRead(_)));
    }

    #[test]
    fn serialize_backend() {
        let config = GraphConfiguration::default();
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["backend"], "nested");
    }
}
