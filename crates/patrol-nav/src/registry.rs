//! Closed strategy registry.
//!
//! Configuration selects a strategy by tagged variant (or plain name), and
//! [`StrategySpec::build`] produces the boxed instance.  The set of
//! strategies is closed at compile time: there is no name→class reflection,
//! and ACO parameters always travel inside the variant rather than through
//! process-wide defaults.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::aco::{AcoHeuristic, AcoNav, DEFAULT_ALPHA, DEFAULT_BETA};
use crate::cycle::{CycleNav, CycleTour};
use crate::lni::{GreedyLni, IndividualLni, InterUavLni};
use crate::lookahead::Lookahead;
use crate::path_plan::{PathPlanNav, PathScoring};
use crate::random::RandomNav;
use crate::strategy::NavStrategy;
use crate::{NavError, NavResult};

fn default_alpha() -> f64 {
    DEFAULT_ALPHA
}

fn default_beta() -> f64 {
    DEFAULT_BETA
}

/// Strategy selection, as it appears in configuration files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum StrategySpec {
    /// Precomputed postman tour in fixed order.
    Cycle,
    /// Central-server greedy LNI, dispatch-deaf.
    GreedyLni,
    /// Central-server greedy LNI that serves dispatcher detours.
    CoordinatedLni,
    /// Private staleness map + peer broadcasts.
    InterUavLni,
    /// Private staleness map, no communication.
    IndividualLni,
    /// Greedy LNI with far-side chain lookahead.
    Lookahead,
    /// Lookahead with square-root-damped scores.
    RootedLookahead,
    /// Pheromone-weighted probabilistic choice.
    Aco {
        #[serde(default = "default_alpha")]
        alpha: f64,
        #[serde(default = "default_beta")]
        beta: f64,
        heuristic: AcoHeuristic,
    },
    /// Battery-budgeted multi-hop path planning.
    PathPlan { scoring: PathScoring },
    /// Uniform random walk baseline.
    Random,
}

impl StrategySpec {
    /// `true` if building this spec needs a precomputed [`CycleTour`].
    pub fn needs_tour(&self) -> bool {
        matches!(self, StrategySpec::Cycle)
    }

    /// Construct a strategy instance for one agent.
    ///
    /// `tour` must be present for the cycle strategy; `start_index` staggers
    /// cycle agents along the tour and is ignored by everything else.
    pub fn build(
        &self,
        tour: Option<&CycleTour>,
        start_index: usize,
    ) -> NavResult<Box<dyn NavStrategy>> {
        Ok(match *self {
            StrategySpec::Cycle => {
                let tour = tour.ok_or(NavError::MissingTour)?;
                Box::new(CycleNav::new(tour.clone(), start_index)?)
            }
            StrategySpec::GreedyLni => Box::new(GreedyLni::new(false)),
            StrategySpec::CoordinatedLni => Box::new(GreedyLni::new(true)),
            StrategySpec::InterUavLni => Box::new(InterUavLni::new()),
            StrategySpec::IndividualLni => Box::new(IndividualLni::new()),
            StrategySpec::Lookahead => Box::new(Lookahead::new(false)),
            StrategySpec::RootedLookahead => Box::new(Lookahead::new(true)),
            StrategySpec::Aco { alpha, beta, heuristic } => {
                Box::new(AcoNav::new(alpha, beta, heuristic))
            }
            StrategySpec::PathPlan { scoring } => Box::new(PathPlanNav::new(scoring)),
            StrategySpec::Random => Box::new(RandomNav),
        })
    }
}

impl FromStr for StrategySpec {
    type Err = NavError;

    /// Plain-name lookup with default parameters, for CLI-style selection.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "cycle" => StrategySpec::Cycle,
            "greedy_lni" => StrategySpec::GreedyLni,
            "coordinated_lni" => StrategySpec::CoordinatedLni,
            "inter_uav_lni" => StrategySpec::InterUavLni,
            "individual_lni" => StrategySpec::IndividualLni,
            "lookahead" => StrategySpec::Lookahead,
            "rooted_lookahead" => StrategySpec::RootedLookahead,
            "aco" => StrategySpec::Aco {
                alpha: DEFAULT_ALPHA,
                beta: DEFAULT_BETA,
                heuristic: AcoHeuristic::Lni,
            },
            "aco_neighbour" => StrategySpec::Aco {
                alpha: DEFAULT_ALPHA,
                beta: DEFAULT_BETA,
                heuristic: AcoHeuristic::LniNeighbour,
            },
            "path_plan" => StrategySpec::PathPlan {
                scoring: PathScoring::MinStale,
            },
            "path_plan_squares" => StrategySpec::PathPlan {
                scoring: PathScoring::SumSquares,
            },
            "path_plan_strict" => StrategySpec::PathPlan {
                scoring: PathScoring::MinStaleStrict,
            },
            "random" => StrategySpec::Random,
            other => return Err(NavError::UnknownStrategy(other.to_string())),
        })
    }
}
