//! Property-based tests for the feasibility predicates, costs and search.
//!
//! Run with: cargo test -p fermata --test properties

use fermata::cost::{heuristic, move_cost};
use fermata::feasibility::{is_reachable_eps, is_stable};
use fermata::moves::successors;
use fermata::prelude::*;
use fermata::wall::rand::{scatter, ReplayToken, ScatterCfg};
use proptest::prelude::*;

fn frame() -> Frame {
    Frame::new(1000.0, 1000.0)
}

fn context(holds: &[(f64, f64)], finish: u32) -> SearchContext {
    let wall = Wall::new(
        frame(),
        holds
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| (HoldId(i as u32), x, y)),
    );
    let model = AnthropometricModel::default().scale(1000.0, 1.7);
    SearchContext::new(wall, model, HoldId(finish)).unwrap()
}

fn arb_norm() -> impl Strategy<Value = (f64, f64)> {
    (0.05..0.95f64, 0.05..0.95f64)
}

/// Five holds and a state over them.
fn arb_wall_and_state() -> impl Strategy<Value = (Vec<(f64, f64)>, [u32; 4])> {
    (
        prop::collection::vec(arb_norm(), 5),
        prop::array::uniform4(0u32..5),
    )
}

fn state_of(ids: [u32; 4]) -> State {
    State::new(HoldId(ids[0]), HoldId(ids[1]), HoldId(ids[2]), HoldId(ids[3]))
}

proptest! {
    #[test]
    fn two_distinct_contacts_are_never_stable(
        a in arb_norm(),
        b in arb_norm(),
        picks in prop::array::uniform4(0u32..2),
    ) {
        let ctx = context(&[a, b], 0);
        let s = state_of(picks);
        prop_assert!(!is_stable(&ctx, &s));
        for limb in Limb::ALL {
            prop_assert!(!is_stable(&ctx, &s.lifted(limb)));
        }
    }

    #[test]
    fn rectangle_of_contacts_is_stable(
        x0 in 0.05..0.45f64,
        y0 in 0.05..0.45f64,
        w in 0.02..0.45f64,
        h in 0.02..0.45f64,
    ) {
        let holds = [(x0, y0), (x0 + w, y0), (x0 + w, y0 + h), (x0, y0 + h)];
        let ctx = context(&holds, 0);
        prop_assert!(is_stable(&ctx, &state_of([1, 0, 2, 3])));
    }

    #[test]
    fn reach_is_monotone_in_tolerance(
        (holds, ids) in arb_wall_and_state(),
        target in 0u32..5,
        e1 in 0.0..50.0f64,
        extra in 0.0..50.0f64,
    ) {
        let ctx = context(&holds, 0);
        let s = state_of(ids);
        for limb in Limb::ALL {
            if is_reachable_eps(&ctx, limb, HoldId(target), &s, e1) {
                prop_assert!(is_reachable_eps(&ctx, limb, HoldId(target), &s, e1 + extra));
            }
        }
    }

    #[test]
    fn every_move_costs_at_least_one(
        (holds, ids) in arb_wall_and_state(),
        limb_ix in 0usize..4,
        target in 0u32..5,
    ) {
        let ctx = context(&holds, 0);
        let s = state_of(ids);
        let limb = Limb::ALL[limb_ix];
        prop_assume!(s.get(limb) != HoldId(target));
        let next = s.with(limb, HoldId(target));
        prop_assert!(move_cost(&ctx, &s, &next) >= 1.0);
    }

    #[test]
    fn heuristic_vanishes_exactly_at_goal(
        (holds, ids) in arb_wall_and_state(),
        finish in 0u32..5,
    ) {
        let ctx = context(&holds, finish);
        let s = state_of(ids);
        let h = heuristic(&ctx, &s);
        prop_assert!(h >= 0.0);
        let goal = s.with(Limb::RightHand, HoldId(finish)).with(Limb::LeftHand, HoldId(finish));
        prop_assert_eq!(heuristic(&ctx, &goal), 0.0);
        let on_finish = [Limb::RightHand, Limb::LeftHand]
            .into_iter()
            .filter(|&l| s.get(l) == HoldId(finish))
            .count();
        if on_finish == 1 {
            prop_assert_eq!(h, 1.0);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn successors_on_scattered_walls_move_one_stable_limb(seed in 0u64..1_000, index in 0u64..8) {
        let route = scatter(ScatterCfg::default(), ReplayToken { seed, index }).unwrap();
        let model = AnthropometricModel::default().scale(1000.0, 1.7);
        let ctx = SearchContext::new(route.wall(frame()), model, route.finish).unwrap();
        for next in successors(&ctx, &route.start) {
            prop_assert!(route.start.moved_limb(&next).is_some());
            prop_assert!(is_stable(&ctx, &next));
        }
    }

    #[test]
    fn search_on_scattered_walls_is_deterministic(seed in 0u64..1_000) {
        let route = scatter(ScatterCfg::default(), ReplayToken { seed, index: 0 }).unwrap();
        let model = AnthropometricModel::default().scale(1000.0, 1.7);
        let ctx = SearchContext::new(route.wall(frame()), model, route.finish).unwrap();
        let cfg = SearchCfg { max_expansions: Some(5_000), ..SearchCfg::default() };
        let a = solve(&ctx, route.start, cfg);
        let b = solve(&ctx, route.start, cfg);
        prop_assert_eq!(&a, &b);
        if let Ok(beta) = a {
            for w in beta.states.windows(2) {
                prop_assert!(w[0].moved_limb(&w[1]).is_some());
            }
        }
    }
}
