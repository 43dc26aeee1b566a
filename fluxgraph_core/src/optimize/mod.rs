//! Module holding the results of flux optimization
//!
//! The optimization itself is run by an external solver, see [`FluxOptimizer`]. Graph builds
//! only ever read a finished [`FluxSolution`].

use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::metabolic_model::model::Model;

/// Contract of an external solver: optimize a model for its objective within its bounds
///
/// The model passed in already carries its objective coefficients and any bound overrides
/// (see [`Model::apply_objectives_and_bounds`]).
pub trait FluxOptimizer {
    fn optimize(&self, model: &Model) -> FluxSolution;
}

/// Struct representing the solution to a flux optimization
///
/// Deserializes from the saved solution layout `{status, objective_value, x_dict, y_dict}`
/// as well as from its own field names.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FluxSolution {
    /// The status of the optimization, representing if the optimization was
    /// completed successfully
    pub status: OptimizationStatus,
    /// Optimized value of the objective
    ///
    /// Some(f64) if the optimization was completed successfully, None otherwise
    #[serde(default, alias = "f")]
    pub objective_value: Option<f64>,
    /// Flux through each reaction at the optimum, keyed by model reaction id
    #[serde(default, alias = "x_dict", deserialize_with = "null_as_empty")]
    pub fluxes: IndexMap<String, f64>,
    /// Shadow prices at the optimum, keyed by model metabolite id
    #[serde(default, alias = "y_dict", deserialize_with = "null_as_empty")]
    pub shadow_prices: IndexMap<String, f64>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<IndexMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<IndexMap<String, f64>>::deserialize(deserializer)?.unwrap_or_default())
}

impl FluxSolution {
    /// Solution of a successful optimization
    pub fn new(objective_value: f64, fluxes: IndexMap<String, f64>) -> Self {
        FluxSolution {
            status: OptimizationStatus::Optimal,
            objective_value: Some(objective_value),
            fluxes,
            shadow_prices: IndexMap::new(),
        }
    }

    /// Solution carrying no fluxes, used when no optimization has been run
    pub fn empty() -> Self {
        FluxSolution {
            status: OptimizationStatus::Unoptimized,
            objective_value: None,
            fluxes: IndexMap::new(),
            shadow_prices: IndexMap::new(),
        }
    }

    /// Signed flux through a model reaction
    ///
    /// Reactions missing from the solution carry no flux. A solution whose status does not
    /// report fluxes (see [`OptimizationStatus::has_fluxes`]) reports zero for every reaction.
    pub fn flux_of(&self, reaction_id: &str) -> f64 {
        if !self.status.has_fluxes() {
            return 0f64;
        }
        self.fluxes.get(reaction_id).copied().unwrap_or(0f64)
    }
}

/// Status of an optimization problem
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OptimizationStatus {
    /// Problem has not yet attempted to be optimized
    Unoptimized,
    /// Problem has been optimized
    Optimal,
    /// Problem can't be optimized because objective value is not bounded
    Unbounded,
    /// Problem can't be solved because it is infeasible (conflicting constraints)
    Infeasible,
    /// An approximate solution has been found
    AlmostOptimal,
    /// A numerical error occurred during solving
    NumericalError,
    /// The solver hit the maximum allowed iterations, or max time, or made insufficient progress
    SolverHalted,
    /// The solver reported a status with no known meaning
    Unknown,
}

impl OptimizationStatus {
    /// Whether a solution with this status carries usable flux values
    pub fn has_fluxes(&self) -> bool {
        matches!(
            self,
            OptimizationStatus::Optimal | OptimizationStatus::AlmostOptimal
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OptimizationStatus::Unoptimized => "unoptimized",
            OptimizationStatus::Optimal => "optimal",
            OptimizationStatus::Unbounded => "unbounded",
            OptimizationStatus::Infeasible => "infeasible",
            OptimizationStatus::AlmostOptimal => "almost_optimal",
            OptimizationStatus::NumericalError => "numerical_error",
            OptimizationStatus::SolverHalted => "solver_halted",
            OptimizationStatus::Unknown => "unknown",
        }
    }
}

impl From<&str> for OptimizationStatus {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "unoptimized" => OptimizationStatus::Unoptimized,
            "optimal" => OptimizationStatus::Optimal,
            "unbounded" => OptimizationStatus::Unbounded,
            "infeasible" | "infeasible_or_unbounded" => OptimizationStatus::Infeasible,
            "almost_optimal" | "near_optimal" | "suboptimal" => OptimizationStatus::AlmostOptimal,
            "numerical_error" | "numeric" => OptimizationStatus::NumericalError,
            "solver_halted" | "time_limit" | "iteration_limit" | "interrupted" => {
                OptimizationStatus::SolverHalted
            }
            _ => OptimizationStatus::Unknown,
        }
    }
}

impl From<String> for OptimizationStatus {
    fn from(value: String) -> Self {
        OptimizationStatus::from(value.as_str())
    }
}

impl From<OptimizationStatus> for String {
    fn from(value: OptimizationStatus) -> Self {
        value.as_str().to_string()
    }
}

impl Display for OptimizationStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
