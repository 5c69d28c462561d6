//! Curated surface for the CLI and benches.
//!
//! Groups the entry points a caller needs to go from a route file to a
//! solved, posed beta without reaching into individual modules.

// Routes and walls
pub use crate::route::{check_structure, HoldSpec, RouteError, RouteSpec, ROUTE_KEYS};
pub use crate::wall::rand::{
    ladder, scatter, LadderCfg, ReplayToken as WallReplay, ScatterCfg, WallGenError,
};
pub use crate::wall::{Frame, Hold, HoldId, Wall};
// Climber
pub use crate::model::AnthropometricModel;
pub use crate::state::{Lifted, Limb, Stance, State};
// Feasibility and moves
pub use crate::context::{ContextError, FeasibilityCfg, SearchContext};
pub use crate::feasibility::{is_reachable, is_stable};
pub use crate::moves::{limb_moves, successors};
// Costs and search
pub use crate::cost::{heuristic, move_cost, path_cost, CostModel};
pub use crate::search::{
    solve, solve_with_defaults, Beta, Budget, SearchCfg, SearchError, SearchStats, Step,
};
// Poses
pub use crate::pose::{full_body_pose, solve_two_segment, Joint, Point, Pose, IK_ITERATIONS};
