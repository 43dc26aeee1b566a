//! Denylist of ubiquitous metabolites left out of drawn graphs
//!
//! Cofactors and ions take part in most reactions, drawing them would connect nearly every
//! node and hide the structure of the pathway.
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Names excluded from the graph when no denylist is configured
const DEFAULT_HUB_METABOLITES: &[&str] = &[
    "H2O",
    "Water",
    "H+",
    "H",
    "Proton",
    "ATP",
    "ADP",
    "AMP",
    "Adenosine triphosphate",
    "Adenosine diphosphate",
    "Adenosine monophosphate",
    "NAD+",
    "NADH",
    "NADP+",
    "NADPH",
    "Nicotinamide adenine dinucleotide",
    "Nicotinamide adenine dinucleotide - reduced",
    "Nicotinamide adenine dinucleotide phosphate",
    "Nicotinamide adenine dinucleotide phosphate - reduced",
    "FAD",
    "FADH2",
    "CoA",
    "Coenzyme A",
    "Phosphate",
    "Orthophosphate",
    "Diphosphate",
    "Pyrophosphate",
    "CO2",
    "Carbon dioxide",
    "O2",
    "Oxygen",
    "NH3",
    "NH4+",
    "Ammonia",
    "Ammonium",
    "Na+",
    "Sodium",
    "K+",
    "Potassium",
    "Cl-",
    "Chloride",
    "Fe2+",
    "Fe3+",
    "Mg2+",
    "Ca2+",
];

/// Exact-match denylist of metabolite display names
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct HubFilter {
    names: IndexSet<String>,
}

impl Default for HubFilter {
    fn default() -> Self {
        HubFilter::new(DEFAULT_HUB_METABOLITES.iter().copied())
    }
}

impl HubFilter {
    /// Create a filter from a list of names
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        HubFilter {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// A filter which lets every metabolite through
    pub fn empty() -> Self {
        HubFilter {
            names: IndexSet::new(),
        }
    }

    /// Whether `name` is on the denylist
    pub fn is_hub(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Add a name to the denylist
    pub fn insert<S: Into<String>>(&mut self, name: S) -> bool {
        self.names.insert(name.into())
    }

    /// Remove a name from the denylist
    pub fn remove(&mut self, name: &str) -> bool {
        self.names.shift_remove(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
