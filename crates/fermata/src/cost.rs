//! Edge cost and remaining-cost estimate, both in normalized wall units.
//!
//! Move cost = `base + strain_weight·max(0, d − strain_free) + loss` where `d`
//! is the distance the moved limb travels and `loss` applies when the new hold
//! is lower (larger y) than the old one.
//!
//! The heuristic divides the remaining vertical gap of the highest hand by
//! `gain_per_move`. With the default weights every move costs at least
//! `0.5 + 5·d ≥ d / 0.2`, so the estimate never drops by more than the cost of
//! the move that caused the drop.

use crate::context::SearchContext;
use crate::state::{Limb, State};

/// Cost weights and heuristic assumptions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CostModel {
    /// Charged for every move.
    pub base: f64,
    /// Moves up to this length are strain-free.
    pub strain_free: f64,
    /// Penalty per unit of length beyond `strain_free`.
    pub strain_weight: f64,
    /// Flat penalty for ending lower than the starting hold.
    pub height_loss: f64,
    /// Assumed best vertical gain per move (heuristic).
    pub gain_per_move: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            base: 1.0,
            strain_free: 0.10,
            strain_weight: 5.0,
            height_loss: 0.5,
            gain_per_move: 0.20,
        }
    }
}

/// Cost of the transition `from → to`.
///
/// Pre: the states differ in exactly one slot. Identical states cost 0.
pub fn move_cost(ctx: &SearchContext, from: &State, to: &State) -> f64 {
    debug_assert!(
        from.changed_limbs(to).len() <= 1,
        "a move relocates exactly one limb: {from} -> {to}"
    );
    let Some(limb) = Limb::ALL.into_iter().find(|&l| from.get(l) != to.get(l)) else {
        return 0.0;
    };
    let old = ctx.wall.norm(from.get(limb));
    let new = ctx.wall.norm(to.get(limb));
    let w = &ctx.cost;
    let dist = (new - old).norm();
    let mut cost = w.base + (dist - w.strain_free).max(0.0) * w.strain_weight;
    if new.y > old.y {
        cost += w.height_loss;
    }
    cost
}

/// Estimated remaining cost from `state` to a goal state.
pub fn heuristic(ctx: &SearchContext, state: &State) -> f64 {
    let finish = ctx.finish;
    let rh = state.get(Limb::RightHand);
    let lh = state.get(Limb::LeftHand);
    if rh == finish && lh == finish {
        return 0.0;
    }
    if rh == finish || lh == finish {
        // matching the other hand is the last move
        return 1.0;
    }
    let finish_y = ctx.wall.norm(finish).y;
    let highest_hand_y = ctx.wall.norm(rh).y.min(ctx.wall.norm(lh).y);
    (highest_hand_y - finish_y).max(0.0) / ctx.cost.gain_per_move
}

/// Sum of edge costs along a path.
pub fn path_cost(ctx: &SearchContext, path: &[State]) -> f64 {
    path.windows(2).map(|w| move_cost(ctx, &w[0], &w[1])).sum()
}
