//! Holds and the wall they live on.
//!
//! - `HoldId`: route-unique identifier.
//! - `Frame`: target coordinate space (image width/height in pixels).
//! - `Wall`: ordered hold table carrying normalized and frame coordinates.
//!
//! Conventions
//! - Normalized coordinates lie in [0,1]² with y growing downward, so a
//!   smaller y is higher on the wall.
//! - Iteration order is the route order; the move generator relies on it
//!   for deterministic successor order.

pub mod rand;

use std::collections::HashMap;
use std::fmt;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Identifier of a hold within one route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HoldId(pub u32);

impl fmt::Display for HoldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Target coordinate space the wall is scaled into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 1000.0,
        }
    }
}

impl Frame {
    #[inline]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
    /// Map a normalized point into this frame.
    #[inline]
    pub fn project(&self, norm: Vector2<f64>) -> Vector2<f64> {
        Vector2::new(norm.x * self.width, norm.y * self.height)
    }
}

/// A single hold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hold {
    pub id: HoldId,
    /// Normalized position in [0,1]².
    pub norm: Vector2<f64>,
    /// Position in the wall's frame.
    pub pos: Vector2<f64>,
}

/// Immutable hold table with an id index.
#[derive(Clone, Debug)]
pub struct Wall {
    frame: Frame,
    holds: Vec<Hold>,
    index: HashMap<HoldId, usize>,
}

impl Wall {
    /// Build a wall from `(id, x_norm, y_norm)` triples.
    ///
    /// Duplicate ids keep the first occurrence; routes are validated for
    /// uniqueness before they get here.
    pub fn new<I>(frame: Frame, holds: I) -> Self
    where
        I: IntoIterator<Item = (HoldId, f64, f64)>,
    {
        let mut out = Vec::new();
        let mut index = HashMap::new();
        for (id, x, y) in holds {
            if index.contains_key(&id) {
                continue;
            }
            let norm = Vector2::new(x, y);
            index.insert(id, out.len());
            out.push(Hold {
                id,
                norm,
                pos: frame.project(norm),
            });
        }
        Self {
            frame,
            holds: out,
            index,
        }
    }

    #[inline]
    pub fn frame(&self) -> Frame {
        self.frame
    }

    #[inline]
    pub fn holds(&self) -> &[Hold] {
        &self.holds
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.holds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.holds.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: HoldId) -> bool {
        self.index.contains_key(&id)
    }

    #[inline]
    pub fn get(&self, id: HoldId) -> Option<&Hold> {
        self.index.get(&id).map(|&i| &self.holds[i])
    }

    /// Frame position of a known hold.
    ///
    /// Panics if `id` is not on this wall; states are validated against the
    /// wall before any evaluator sees them.
    #[inline]
    pub fn pos(&self, id: HoldId) -> Vector2<f64> {
        self.holds[self.index[&id]].pos
    }

    /// Normalized position of a known hold. Panics like [`Wall::pos`].
    #[inline]
    pub fn norm(&self, id: HoldId) -> Vector2<f64> {
        self.holds[self.index[&id]].norm
    }

    /// Hold ids in route order.
    pub fn ids(&self) -> impl Iterator<Item = HoldId> + '_ {
        self.holds.iter().map(|h| h.id)
    }
}
