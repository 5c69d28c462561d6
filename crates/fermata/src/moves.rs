//! Successor generation: relocate one limb at a time.
//!
//! For each limb (RH, LH, RF, LF) the climber must first be able to hang on
//! the other three contacts; if not, the limb is skipped. Every other hold on
//! the wall is then a candidate, accepted when the limb can reach it from the
//! current body position and the resulting four-contact stance is stable.

use crate::context::SearchContext;
use crate::feasibility::{is_reachable, is_stable};
use crate::state::{Limb, State};

/// All feasible successors of `state`, in limb order then wall order.
pub fn successors(ctx: &SearchContext, state: &State) -> Vec<State> {
    let mut out = Vec::new();
    for limb in Limb::ALL {
        out.extend(limb_moves(ctx, state, limb));
    }
    out
}

/// Feasible relocations of a single limb.
pub fn limb_moves(ctx: &SearchContext, state: &State, limb: Limb) -> Vec<State> {
    if !is_stable(ctx, &state.lifted(limb)) {
        return Vec::new();
    }
    let current = state.get(limb);
    ctx.wall
        .ids()
        .filter(|&id| id != current)
        .filter(|&id| is_reachable(ctx, limb, id, state))
        .map(|id| state.with(limb, id))
        .filter(|next| is_stable(ctx, next))
        .collect()
}
