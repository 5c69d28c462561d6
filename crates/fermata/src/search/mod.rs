//! A* search over climber states.
//!
//! Purpose
//! - Find a minimum-cost beta from a start state to a state with both hands on
//!   the finish hold, expanding states through the move generator and
//!   ordering the frontier by `(f, g, state)`.
//!
//! Notes
//! - The frontier is a binary heap without decrease-key. Improved states are
//!   pushed again and outdated entries are dropped when popped (lazy deletion).
//! - Expansions and frontier size are bounded by `SearchCfg`; running out of
//!   budget is reported separately from "no path".
//!
//! Layout: `types.rs` (config, stats, result, errors) and `astar.rs` (engine).

mod astar;
mod types;

pub use astar::{solve, solve_with_defaults};
pub use types::{Beta, Budget, SearchCfg, SearchError, SearchStats, Step};
