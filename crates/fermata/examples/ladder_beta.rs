//! Solve the default 4×4 ladder and print the beta move by move.
//!
//! Usage:
//!   cargo run -p fermata --example ladder_beta -- [rows]

use fermata::prelude::*;
use fermata::wall::rand::{ladder, LadderCfg};

fn main() {
    let rows: usize = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(4);
    let cfg = LadderCfg {
        rows,
        y_top: (0.9 - 0.15 * rows.saturating_sub(1) as f64).max(0.0),
        ..LadderCfg::default()
    };
    let route = match ladder(cfg) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };
    let frame = Frame::new(1000.0, 1000.0);
    let model = AnthropometricModel::default().scale(frame.height, 1.7);
    let ctx = match SearchContext::new(route.wall(frame), model, route.finish) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };
    match solve_with_defaults(&ctx, route.start) {
        Ok(beta) => {
            for step in beta.steps(&ctx) {
                let limb = step.limb.map(|l| l.code()).unwrap_or("--");
                println!(
                    "{:>3} {limb} {} cost={:.3} total={:.3}",
                    step.index, step.state, step.cost, step.total
                );
            }
            println!("expanded={} visited={}", beta.stats.expanded, beta.stats.visited);
        }
        Err(e) => eprintln!("{e}"),
    }
}
