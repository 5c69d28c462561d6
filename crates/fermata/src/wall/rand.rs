//! Seeded walls (ladders and jittered scatters) for benches and property tests.
//!
//! Model
//! - A ladder is a `rows × columns` grid of holds, rows evenly spaced from
//!   `y_bottom` up to `y_top`. The start puts the feet on the bottom row's
//!   outer holds and the hands on the next row's inner holds; the finish is
//!   the top row's second hold.
//! - A scatter jitters every ladder hold and sprinkles extra holds over the
//!   same box. Determinism comes from a replay token `(seed, index)`.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::route::{HoldSpec, RouteSpec};
use crate::state::State;
use crate::wall::HoldId;

/// Error for inconsistent generator parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum WallGenError {
    InvalidParams { reason: String },
}

impl WallGenError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for WallGenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParams { reason } => write!(f, "invalid wall params: {reason}"),
        }
    }
}

impl std::error::Error for WallGenError {}

/// Regular ladder layout.
#[derive(Clone, Copy, Debug)]
pub struct LadderCfg {
    pub rows: usize,
    pub columns: usize,
    pub x_min: f64,
    pub x_max: f64,
    /// y of the bottom row (largest y).
    pub y_bottom: f64,
    /// y of the top row.
    pub y_top: f64,
}

impl Default for LadderCfg {
    fn default() -> Self {
        Self {
            rows: 4,
            columns: 4,
            x_min: 0.35,
            x_max: 0.65,
            y_bottom: 0.9,
            y_top: 0.45,
        }
    }
}

impl LadderCfg {
    fn validate(&self) -> Result<(), WallGenError> {
        if self.rows < 2 {
            return Err(WallGenError::invalid("need at least two rows"));
        }
        if self.columns < 4 {
            return Err(WallGenError::invalid("need at least four columns"));
        }
        let unit = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
        if !(unit(self.x_min) && unit(self.x_max) && unit(self.y_bottom) && unit(self.y_top)) {
            return Err(WallGenError::invalid("coordinates must lie in [0, 1]"));
        }
        if self.x_min >= self.x_max {
            return Err(WallGenError::invalid("x_min < x_max required"));
        }
        if self.y_top >= self.y_bottom {
            return Err(WallGenError::invalid("y_top < y_bottom required"));
        }
        Ok(())
    }

    /// Hold id at `(row, column)`; row 0 is the bottom.
    #[inline]
    pub fn id(&self, row: usize, column: usize) -> HoldId {
        HoldId((row * self.columns + column) as u32)
    }

    /// Vertical distance between neighbouring rows.
    #[inline]
    pub fn row_spacing(&self) -> f64 {
        (self.y_bottom - self.y_top) / (self.rows - 1) as f64
    }
}

/// Build the ladder route described by `cfg`.
pub fn ladder(cfg: LadderCfg) -> Result<RouteSpec, WallGenError> {
    cfg.validate()?;
    let mut holds = Vec::with_capacity(cfg.rows * cfg.columns);
    let dx = (cfg.x_max - cfg.x_min) / (cfg.columns - 1) as f64;
    for row in 0..cfg.rows {
        let y = cfg.y_bottom - cfg.row_spacing() * row as f64;
        for column in 0..cfg.columns {
            holds.push(HoldSpec {
                id: cfg.id(row, column),
                x_norm: cfg.x_min + dx * column as f64,
                y_norm: y,
            });
        }
    }
    let last = cfg.columns - 1;
    let start = State::new(cfg.id(1, last - 1), cfg.id(1, 1), cfg.id(0, last), cfg.id(0, 0));
    Ok(RouteSpec {
        holds,
        start,
        finish: cfg.id(cfg.rows - 1, 1),
    })
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Jittered ladder plus extra random holds.
#[derive(Clone, Copy, Debug)]
pub struct ScatterCfg {
    pub ladder: LadderCfg,
    /// Max absolute jitter per coordinate (normalized units).
    pub jitter: f64,
    /// Holds added uniformly over the ladder's bounding box.
    pub extra_holds: usize,
}

impl Default for ScatterCfg {
    fn default() -> Self {
        Self {
            ladder: LadderCfg::default(),
            jitter: 0.02,
            extra_holds: 4,
        }
    }
}

/// Draw a scattered wall. Same config and token give the same route.
pub fn scatter(cfg: ScatterCfg, tok: ReplayToken) -> Result<RouteSpec, WallGenError> {
    if !(cfg.jitter.is_finite() && cfg.jitter >= 0.0) {
        return Err(WallGenError::invalid("jitter must be finite and >= 0"));
    }
    let mut route = ladder(cfg.ladder)?;
    let mut rng = tok.to_std_rng();
    let j = cfg.jitter;
    for h in &mut route.holds {
        if j > 0.0 {
            h.x_norm = (h.x_norm + rng.gen_range(-j..=j)).clamp(0.0, 1.0);
            h.y_norm = (h.y_norm + rng.gen_range(-j..=j)).clamp(0.0, 1.0);
        }
    }
    let l = cfg.ladder;
    let mut next_id = (l.rows * l.columns) as u32;
    for _ in 0..cfg.extra_holds {
        route.holds.push(HoldSpec {
            id: HoldId(next_id),
            x_norm: rng.gen_range(l.x_min..=l.x_max),
            y_norm: rng.gen_range(l.y_top..=l.y_bottom),
        });
        next_id += 1;
    }
    Ok(route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Limb;

    #[test]
    fn ladder_layout() {
        let cfg = LadderCfg::default();
        let route = ladder(cfg).unwrap();
        assert_eq!(route.holds.len(), 16);
        route.validate().unwrap();
        assert_eq!(route.start.get(Limb::LeftFoot), HoldId(0));
        assert_eq!(route.start.get(Limb::RightFoot), HoldId(3));
        assert_eq!(route.start.get(Limb::LeftHand), HoldId(5));
        assert_eq!(route.start.get(Limb::RightHand), HoldId(6));
        assert_eq!(route.finish, HoldId(13));
        let top = route.holds.iter().find(|h| h.id == HoldId(13)).unwrap();
        assert!((top.y_norm - 0.45).abs() < 1e-12);
        assert!((top.x_norm - 0.45).abs() < 1e-12);
    }

    #[test]
    fn ladder_rejects_bad_params() {
        let narrow = LadderCfg {
            columns: 3,
            ..LadderCfg::default()
        };
        assert!(ladder(narrow).is_err());
        let flipped = LadderCfg {
            y_top: 0.95,
            ..LadderCfg::default()
        };
        assert!(ladder(flipped).is_err());
    }

    #[test]
    fn scatter_is_reproducible_and_valid() {
        let cfg = ScatterCfg::default();
        let tok = ReplayToken { seed: 7, index: 3 };
        let a = scatter(cfg, tok).unwrap();
        let b = scatter(cfg, tok).unwrap();
        assert_eq!(a, b);
        a.validate().unwrap();
        assert_eq!(a.holds.len(), 16 + cfg.extra_holds);
        let c = scatter(cfg, ReplayToken { seed: 7, index: 4 }).unwrap();
        assert_ne!(a, c);
    }
}
