//! A* engine with lazy deletion and bounded budgets.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::context::SearchContext;
use crate::cost::{heuristic, move_cost};
use crate::moves::successors;
use crate::state::{Limb, State};

use super::types::{Beta, Budget, SearchCfg, SearchError, SearchStats};

/// Find a minimum-cost beta from `start` to a state with both hands on the finish.
///
/// Fails fast with `UnknownHold` if `start` references a hold missing from the
/// wall; otherwise returns the path, `NoPath`, or `BudgetExhausted`.
pub fn solve(ctx: &SearchContext, start: State, cfg: SearchCfg) -> Result<Beta, SearchError> {
    for limb in Limb::ALL {
        let hold = start.get(limb);
        if !ctx.wall.contains(hold) {
            return Err(SearchError::UnknownHold { limb, hold });
        }
    }
    AStarRunner::new(ctx, cfg).run(start)
}

/// Convenience: default budget.
pub fn solve_with_defaults(ctx: &SearchContext, start: State) -> Result<Beta, SearchError> {
    solve(ctx, start, SearchCfg::default())
}

/// Frontier entry; the heap pops the smallest `(f, g, state)` first.
#[derive(Clone, Copy, Debug)]
struct Entry {
    f: f64,
    g: f64,
    state: State,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed: BinaryHeap is a max-heap
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.g.total_cmp(&self.g))
            .then_with(|| other.state.cmp(&self.state))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

/// Search bookkeeping for one call; dropped when the call returns.
pub(super) struct AStarRunner<'a> {
    ctx: &'a SearchContext,
    cfg: SearchCfg,
    frontier: BinaryHeap<Entry>,
    pub(super) best: HashMap<State, f64>,
    pub(super) came_from: HashMap<State, State>,
    stats: SearchStats,
}

impl<'a> AStarRunner<'a> {
    pub(super) fn new(ctx: &'a SearchContext, cfg: SearchCfg) -> Self {
        Self {
            ctx,
            cfg,
            frontier: BinaryHeap::new(),
            best: HashMap::new(),
            came_from: HashMap::new(),
            stats: SearchStats::default(),
        }
    }

    fn push(&mut self, state: State, g: f64) {
        let f = g + heuristic(self.ctx, &state);
        self.frontier.push(Entry { f, g, state });
        self.stats.max_frontier = self.stats.max_frontier.max(self.frontier.len());
    }

    fn snapshot(&self) -> SearchStats {
        SearchStats {
            visited: self.best.len(),
            ..self.stats
        }
    }

    pub(super) fn run(&mut self, start: State) -> Result<Beta, SearchError> {
        let finish = self.ctx.finish;
        tracing::info!(
            start = %start,
            finish = %finish,
            holds = self.ctx.wall.len(),
            "search_start"
        );
        self.best.insert(start, 0.0);
        self.push(start, 0.0);

        while let Some(Entry { g, state, .. }) = self.frontier.pop() {
            let known = self.best.get(&state).copied().unwrap_or(f64::INFINITY);
            if g > known {
                self.stats.stale += 1;
                continue;
            }
            if state.is_goal(finish) {
                let beta = self.reconstruct(state, g);
                tracing::info!(
                    moves = beta.moves(),
                    cost = beta.cost,
                    expanded = beta.stats.expanded,
                    "goal_reached"
                );
                return Ok(beta);
            }
            if let Some(limit) = self.cfg.max_expansions {
                if self.stats.expanded >= limit {
                    return Err(self.exhausted(Budget::Expansions(limit)));
                }
            }
            self.stats.expanded += 1;
            if self.cfg.progress_every > 0 && self.stats.expanded % self.cfg.progress_every == 0 {
                tracing::debug!(
                    expanded = self.stats.expanded,
                    frontier = self.frontier.len(),
                    visited = self.best.len(),
                    "search_progress"
                );
            }

            for next in successors(self.ctx, &state) {
                self.stats.generated += 1;
                let cand = g + move_cost(self.ctx, &state, &next);
                let prev = self.best.get(&next).copied().unwrap_or(f64::INFINITY);
                if cand < prev {
                    self.best.insert(next, cand);
                    self.came_from.insert(next, state);
                    self.push(next, cand);
                }
            }

            if let Some(limit) = self.cfg.max_frontier {
                if self.frontier.len() > limit {
                    return Err(self.exhausted(Budget::Frontier(limit)));
                }
            }
        }

        let stats = self.snapshot();
        tracing::info!(expanded = stats.expanded, visited = stats.visited, "no_path");
        Err(SearchError::NoPath { stats })
    }

    fn exhausted(&self, budget: Budget) -> SearchError {
        let stats = self.snapshot();
        tracing::warn!(%budget, expanded = stats.expanded, "search_budget_exhausted");
        SearchError::BudgetExhausted { budget, stats }
    }

    fn reconstruct(&self, goal: State, cost: f64) -> Beta {
        let mut states = vec![goal];
        let mut cur = goal;
        while let Some(&prev) = self.came_from.get(&cur) {
            states.push(prev);
            cur = prev;
        }
        states.reverse();
        Beta {
            states,
            cost,
            stats: self.snapshot(),
        }
    }
}
