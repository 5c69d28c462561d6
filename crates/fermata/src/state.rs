//! Climber states.
//!
//! - `Limb`: the four limb roles in fixed order RH, LH, RF, LF.
//! - `State`: one hold per limb; the node type of the search graph.
//! - `Lifted`: a state with one limb off the wall. Only used to test whether
//!   the remaining three contacts can hold the climber; never a graph node.
//! - `Stance`: slot view shared by both, consumed by the stability evaluator.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::wall::HoldId;

/// Limb role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Limb {
    RightHand,
    LeftHand,
    RightFoot,
    LeftFoot,
}

impl Limb {
    /// Slot order used everywhere (generation order, serialization order).
    pub const ALL: [Limb; 4] = [
        Limb::RightHand,
        Limb::LeftHand,
        Limb::RightFoot,
        Limb::LeftFoot,
    ];

    #[inline]
    pub fn slot(self) -> usize {
        match self {
            Limb::RightHand => 0,
            Limb::LeftHand => 1,
            Limb::RightFoot => 2,
            Limb::LeftFoot => 3,
        }
    }

    #[inline]
    pub fn is_hand(self) -> bool {
        matches!(self, Limb::RightHand | Limb::LeftHand)
    }

    /// +1 for right limbs, -1 for left limbs (x grows to the climber's right).
    #[inline]
    pub fn side(self) -> f64 {
        match self {
            Limb::RightHand | Limb::RightFoot => 1.0,
            Limb::LeftHand | Limb::LeftFoot => -1.0,
        }
    }

    /// Two-letter code used by route files and logs.
    pub fn code(self) -> &'static str {
        match self {
            Limb::RightHand => "RH",
            Limb::LeftHand => "LH",
            Limb::RightFoot => "RF",
            Limb::LeftFoot => "LF",
        }
    }
}

impl fmt::Display for Limb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Read-only view of limb slots; `None` means the limb is off the wall.
pub trait Stance {
    fn slots(&self) -> [Option<HoldId>; 4];
}

/// Four-limb assignment. Equality and hashing are by value.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct State {
    #[serde(rename = "RH")]
    rh: HoldId,
    #[serde(rename = "LH")]
    lh: HoldId,
    #[serde(rename = "RF")]
    rf: HoldId,
    #[serde(rename = "LF")]
    lf: HoldId,
}

impl State {
    #[inline]
    pub fn new(rh: HoldId, lh: HoldId, rf: HoldId, lf: HoldId) -> Self {
        Self { rh, lh, rf, lf }
    }

    #[inline]
    pub fn get(&self, limb: Limb) -> HoldId {
        match limb {
            Limb::RightHand => self.rh,
            Limb::LeftHand => self.lh,
            Limb::RightFoot => self.rf,
            Limb::LeftFoot => self.lf,
        }
    }

    /// Copy with one limb relocated.
    #[inline]
    pub fn with(&self, limb: Limb, hold: HoldId) -> Self {
        let mut out = *self;
        match limb {
            Limb::RightHand => out.rh = hold,
            Limb::LeftHand => out.lh = hold,
            Limb::RightFoot => out.rf = hold,
            Limb::LeftFoot => out.lf = hold,
        }
        out
    }

    /// Transient three-contact stance with `limb` off the wall.
    #[inline]
    pub fn lifted(&self, limb: Limb) -> Lifted {
        Lifted {
            base: *self,
            free: limb,
        }
    }

    #[inline]
    pub fn holds(&self) -> [HoldId; 4] {
        [self.rh, self.lh, self.rf, self.lf]
    }

    /// Both hands on `finish`.
    #[inline]
    pub fn is_goal(&self, finish: HoldId) -> bool {
        self.rh == finish && self.lh == finish
    }

    /// Limbs whose hold differs between `self` and `other`.
    pub fn changed_limbs(&self, other: &State) -> Vec<Limb> {
        Limb::ALL
            .into_iter()
            .filter(|&l| self.get(l) != other.get(l))
            .collect()
    }

    /// The single limb that moved from `self` to `next`, if exactly one did.
    pub fn moved_limb(&self, next: &State) -> Option<Limb> {
        match self.changed_limbs(next).as_slice() {
            [limb] => Some(*limb),
            _ => None,
        }
    }
}

impl Stance for State {
    #[inline]
    fn slots(&self) -> [Option<HoldId>; 4] {
        self.holds().map(Some)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(RH={}, LH={}, RF={}, LF={})",
            self.rh, self.lh, self.rf, self.lf
        )
    }
}

/// A state with one limb lifted off its hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lifted {
    pub base: State,
    pub free: Limb,
}

impl Stance for Lifted {
    #[inline]
    fn slots(&self) -> [Option<HoldId>; 4] {
        let mut s = self.base.slots();
        s[self.free.slot()] = None;
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn st(a: u32, b: u32, c: u32, d: u32) -> State {
        State::new(HoldId(a), HoldId(b), HoldId(c), HoldId(d))
    }

    #[test]
    fn value_equality_and_hashing() {
        let mut seen = HashSet::new();
        seen.insert(st(1, 2, 3, 4));
        assert!(seen.contains(&st(1, 2, 3, 4)));
        assert!(!seen.contains(&st(2, 1, 3, 4)));
    }

    #[test]
    fn with_changes_one_slot() {
        let s = st(1, 2, 3, 4);
        let t = s.with(Limb::RightFoot, HoldId(9));
        assert_eq!(t.get(Limb::RightFoot), HoldId(9));
        assert_eq!(s.moved_limb(&t), Some(Limb::RightFoot));
        assert_eq!(s.moved_limb(&s), None);
        let u = t.with(Limb::LeftHand, HoldId(8));
        assert_eq!(s.moved_limb(&u), None);
        assert_eq!(s.changed_limbs(&u), vec![Limb::LeftHand, Limb::RightFoot]);
    }

    #[test]
    fn lifted_clears_exactly_one_slot() {
        let s = st(1, 2, 3, 4);
        let l = s.lifted(Limb::LeftHand);
        assert_eq!(
            l.slots(),
            [Some(HoldId(1)), None, Some(HoldId(3)), Some(HoldId(4))]
        );
    }

    #[test]
    fn goal_needs_both_hands() {
        assert!(st(5, 5, 1, 2).is_goal(HoldId(5)));
        assert!(!st(5, 4, 1, 2).is_goal(HoldId(5)));
    }

    #[test]
    fn serializes_with_limb_codes() {
        let json = serde_json::to_value(st(1, 2, 3, 4)).unwrap();
        assert_eq!(json, serde_json::json!({"RH": 1, "LH": 2, "RF": 3, "LF": 4}));
        let back: State = serde_json::from_value(json).unwrap();
        assert_eq!(back, st(1, 2, 3, 4));
        assert_eq!(st(1, 2, 3, 4).to_string(), "(RH=1, LH=2, RF=3, LF=4)");
    }
}
