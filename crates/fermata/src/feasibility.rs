//! Feasibility predicates: anthropometric reach and static stability.
//!
//! Both work in frame coordinates (the space the model was scaled into) and
//! are pure functions of their explicit inputs.
//!
//! Body estimate
//! - core: mean of the distinct contact points, raised by half the torso height;
//! - shoulders: core ± half the torso width, at core height;
//! - hips: same x offsets, one torso height below the core.

use nalgebra::Vector2;

use crate::context::SearchContext;
use crate::hull::{convex_hull, distinct, on_boundary, point_in_polygon};
use crate::model::AnthropometricModel;
use crate::state::{Limb, Stance, State};
use crate::wall::{HoldId, Wall};

/// Distinct frame positions of the occupied slots.
pub fn contact_points(wall: &Wall, stance: &impl Stance) -> Vec<Vector2<f64>> {
    distinct(stance.slots().into_iter().flatten().map(|id| wall.pos(id)))
}

/// Arithmetic mean; `None` for an empty slice.
#[inline]
pub fn centroid(points: &[Vector2<f64>]) -> Option<Vector2<f64>> {
    if points.is_empty() {
        return None;
    }
    let sum = points.iter().fold(Vector2::zeros(), |acc, p| acc + p);
    Some(sum / points.len() as f64)
}

/// Torso center estimated from a mean contact point.
#[inline]
pub fn core_from_mean(mean: Vector2<f64>, model: &AnthropometricModel) -> Vector2<f64> {
    Vector2::new(mean.x, mean.y - model.torso_height / 2.0)
}

/// Shoulder (hands) or hip (feet) of `limb` for a given core.
#[inline]
pub fn anchor(core: Vector2<f64>, limb: Limb, model: &AnthropometricModel) -> Vector2<f64> {
    let x = core.x + limb.side() * model.torso_width / 2.0;
    if limb.is_hand() {
        Vector2::new(x, core.y)
    } else {
        Vector2::new(x, core.y + model.torso_height)
    }
}

/// Maximum reach of `limb` from its anchor.
#[inline]
pub fn max_reach(limb: Limb, model: &AnthropometricModel) -> f64 {
    if limb.is_hand() {
        model.arm_reach()
    } else {
        model.leg_reach()
    }
}

/// Can `limb` reach `target` with the body positioned by `state` (before the move)?
pub fn is_reachable(ctx: &SearchContext, limb: Limb, target: HoldId, state: &State) -> bool {
    is_reachable_eps(ctx, limb, target, state, ctx.feas.reach_eps)
}

/// [`is_reachable`] with an explicit tolerance.
pub fn is_reachable_eps(
    ctx: &SearchContext,
    limb: Limb,
    target: HoldId,
    state: &State,
    eps: f64,
) -> bool {
    let contacts = contact_points(&ctx.wall, state);
    let Some(mean) = centroid(&contacts) else {
        return false;
    };
    let core = core_from_mean(mean, &ctx.model);
    let a = anchor(core, limb, &ctx.model);
    let dist = (ctx.wall.pos(target) - a).norm();
    dist <= max_reach(limb, &ctx.model) + eps
}

/// Is the center of mass of the stance inside (or on) its support polygon?
///
/// Fewer than three distinct contact points is always unstable.
pub fn is_stable(ctx: &SearchContext, stance: &impl Stance) -> bool {
    let contacts = contact_points(&ctx.wall, stance);
    if contacts.len() < 3 {
        return false;
    }
    let Some(com) = centroid(&contacts) else {
        return false;
    };
    let hull = convex_hull(&contacts);
    point_in_polygon(com, &hull) || on_boundary(com, &hull, ctx.feas.collinear_eps)
}
