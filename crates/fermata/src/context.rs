//! Immutable search context threaded through every evaluator.
//!
//! Bundles the wall, the scaled climber model, the finish hold, the cost
//! weights and the numeric tolerances. Built once per search; nothing in the
//! crate keeps shared mutable state.

use std::fmt;

use crate::cost::CostModel;
use crate::model::AnthropometricModel;
use crate::wall::{HoldId, Wall};

/// Numeric tolerances for the feasibility predicates.
#[derive(Clone, Copy, Debug)]
pub struct FeasibilityCfg {
    /// Slack added to the maximum reach (frame units).
    pub reach_eps: f64,
    /// Cross-product threshold for "center of mass on a hull edge".
    pub collinear_eps: f64,
}

impl Default for FeasibilityCfg {
    fn default() -> Self {
        Self {
            reach_eps: 1e-6,
            collinear_eps: 1e-9,
        }
    }
}

/// Errors raised while assembling a context.
#[derive(Debug, Clone, PartialEq)]
pub enum ContextError {
    EmptyWall,
    UnknownFinish(HoldId),
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextError::EmptyWall => write!(f, "wall has no holds"),
            ContextError::UnknownFinish(id) => write!(f, "finish hold {id} is not on the wall"),
        }
    }
}

impl std::error::Error for ContextError {}

/// Everything the evaluators need, read-only.
#[derive(Clone, Debug)]
pub struct SearchContext {
    pub wall: Wall,
    /// Scaled to the wall's frame.
    pub model: AnthropometricModel,
    pub finish: HoldId,
    pub cost: CostModel,
    pub feas: FeasibilityCfg,
}

impl SearchContext {
    /// Context with default cost weights and tolerances.
    pub fn new(
        wall: Wall,
        model: AnthropometricModel,
        finish: HoldId,
    ) -> Result<Self, ContextError> {
        if wall.is_empty() {
            return Err(ContextError::EmptyWall);
        }
        if !wall.contains(finish) {
            return Err(ContextError::UnknownFinish(finish));
        }
        Ok(Self {
            wall,
            model,
            finish,
            cost: CostModel::default(),
            feas: FeasibilityCfg::default(),
        })
    }

    pub fn with_cost(mut self, cost: CostModel) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_feasibility(mut self, feas: FeasibilityCfg) -> Self {
        self.feas = feas;
        self
    }
}
