//! Search configuration, statistics, result and error types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::context::SearchContext;
use crate::cost::move_cost;
use crate::state::{Limb, State};
use crate::wall::HoldId;

/// Search budget and logging cadence.
#[derive(Clone, Copy, Debug)]
pub struct SearchCfg {
    /// Stop after this many expansions (`None` = unbounded).
    pub max_expansions: Option<usize>,
    /// Stop once the frontier holds more entries than this (`None` = unbounded).
    pub max_frontier: Option<usize>,
    /// Emit a progress event every this many expansions (0 disables).
    pub progress_every: usize,
}

impl Default for SearchCfg {
    fn default() -> Self {
        Self {
            max_expansions: Some(2_000_000),
            max_frontier: Some(4_000_000),
            progress_every: 500,
        }
    }
}

impl SearchCfg {
    /// No bounds at all.
    pub fn unbounded() -> Self {
        Self {
            max_expansions: None,
            max_frontier: None,
            ..Self::default()
        }
    }
}

/// Counters collected during one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// States popped and expanded.
    pub expanded: usize,
    /// Successors produced by the move generator.
    pub generated: usize,
    /// Outdated frontier entries discarded on pop.
    pub stale: usize,
    /// States with a recorded best cost.
    pub visited: usize,
    /// Largest frontier size observed.
    pub max_frontier: usize,
}

/// Which bound stopped the search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Budget {
    Expansions(usize),
    Frontier(usize),
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Budget::Expansions(n) => write!(f, "{n} expansions"),
            Budget::Frontier(n) => write!(f, "{n} frontier entries"),
        }
    }
}

/// Search failures. Infeasibility and budget exhaustion are ordinary outcomes.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchError {
    /// The start state references a hold missing from the wall.
    UnknownHold { limb: Limb, hold: HoldId },
    /// The frontier emptied without reaching the goal.
    NoPath { stats: SearchStats },
    /// A configured bound was hit first.
    BudgetExhausted { budget: Budget, stats: SearchStats },
}

impl SearchError {
    pub fn stats(&self) -> Option<&SearchStats> {
        match self {
            SearchError::UnknownHold { .. } => None,
            SearchError::NoPath { stats } | SearchError::BudgetExhausted { stats, .. } => {
                Some(stats)
            }
        }
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::UnknownHold { limb, hold } => {
                write!(f, "start {limb} references unknown hold {hold}")
            }
            SearchError::NoPath { stats } => write!(
                f,
                "no feasible path to the finish hold ({} states expanded)",
                stats.expanded
            ),
            SearchError::BudgetExhausted { budget, stats } => write!(
                f,
                "search budget of {budget} exhausted ({} states expanded)",
                stats.expanded
            ),
        }
    }
}

impl std::error::Error for SearchError {}

/// A solved beta: states from start to goal plus bookkeeping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Beta {
    pub states: Vec<State>,
    pub cost: f64,
    pub stats: SearchStats,
}

/// One row of a beta: the state reached and the move that reached it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    pub index: usize,
    pub state: State,
    /// `None` for the start state.
    pub limb: Option<Limb>,
    pub cost: f64,
    pub total: f64,
}

impl Beta {
    /// Number of moves (one fewer than states).
    #[inline]
    pub fn moves(&self) -> usize {
        self.states.len().saturating_sub(1)
    }

    #[inline]
    pub fn start(&self) -> Option<&State> {
        self.states.first()
    }

    #[inline]
    pub fn last(&self) -> Option<&State> {
        self.states.last()
    }

    /// Per-move breakdown with running totals.
    pub fn steps(&self, ctx: &SearchContext) -> Vec<Step> {
        let mut total = 0.0;
        let mut prev: Option<State> = None;
        self.states
            .iter()
            .enumerate()
            .map(|(index, &state)| {
                let (limb, cost) = match prev {
                    Some(p) => (p.moved_limb(&state), move_cost(ctx, &p, &state)),
                    None => (None, 0.0),
                };
                total += cost;
                prev = Some(state);
                Step {
                    index,
                    state,
                    limb,
                    cost,
                    total,
                }
            })
            .collect()
    }
}
