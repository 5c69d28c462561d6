//! Beta planning for climbing walls.
//!
//! A climber is four limbs on discrete holds. The search walks one limb at a
//! time from a start stance to both hands on the finish hold, keeping every
//! stance reachable and statically stable, and returns a minimum-cost beta.
//!
//! Layout
//! - `wall`, `route`: hold tables and the route files that describe them.
//! - `state`, `model`: search nodes and the scaled body model.
//! - `hull`, `feasibility`, `moves`: geometry and the move generator.
//! - `cost`, `search`: edge weights, heuristic and the A* engine.
//! - `pose`: skeleton poses for rendering a solved beta.

pub mod api;
pub mod context;
pub mod cost;
pub mod feasibility;
pub mod hull;
pub mod model;
pub mod moves;
pub mod pose;
pub mod route;
pub mod search;
pub mod state;
pub mod wall;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::context::{FeasibilityCfg, SearchContext};
    pub use crate::cost::CostModel;
    pub use crate::model::AnthropometricModel;
    pub use crate::route::RouteSpec;
    pub use crate::search::{solve, solve_with_defaults, Beta, SearchCfg, SearchError};
    pub use crate::state::{Limb, Stance, State};
    pub use crate::wall::{Frame, HoldId, Wall};
    pub use nalgebra::Vector2 as Vec2;
}
