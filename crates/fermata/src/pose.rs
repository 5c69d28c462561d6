//! Skeleton poses for rendering a beta.
//!
//! Each limb is a two-segment chain (upper arm + forearm, thigh + shin)
//! hanging from the shoulder or hip estimated for the stance. Elbows and
//! knees come from a few FABRIK sweeps; out-of-reach targets get a straight,
//! fully extended limb pointing at the hold.

use std::collections::BTreeMap;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::feasibility::{anchor, centroid, core_from_mean};
use crate::model::AnthropometricModel;
use crate::state::{Limb, Stance};
use crate::wall::Wall;

/// FABRIK sweeps used by [`full_body_pose`].
pub const IK_ITERATIONS: usize = 10;

const MIN_NORM: f64 = 1e-6;

/// Named skeleton joints. Serialized names match the frontend's skeleton keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Joint {
    #[serde(rename = "core")]
    Core,
    #[serde(rename = "shoulderR")]
    ShoulderR,
    #[serde(rename = "shoulderL")]
    ShoulderL,
    #[serde(rename = "hipR")]
    HipR,
    #[serde(rename = "hipL")]
    HipL,
    #[serde(rename = "elbowR")]
    ElbowR,
    #[serde(rename = "handR")]
    HandR,
    #[serde(rename = "elbowL")]
    ElbowL,
    #[serde(rename = "handL")]
    HandL,
    #[serde(rename = "kneeR")]
    KneeR,
    #[serde(rename = "footR")]
    FootR,
    #[serde(rename = "kneeL")]
    KneeL,
    #[serde(rename = "footL")]
    FootL,
}

impl Joint {
    /// `(anchor, middle, end)` joints of a limb chain.
    pub fn chain(limb: Limb) -> (Joint, Joint, Joint) {
        match limb {
            Limb::RightHand => (Joint::ShoulderR, Joint::ElbowR, Joint::HandR),
            Limb::LeftHand => (Joint::ShoulderL, Joint::ElbowL, Joint::HandL),
            Limb::RightFoot => (Joint::HipR, Joint::KneeR, Joint::FootR),
            Limb::LeftFoot => (Joint::HipL, Joint::KneeL, Joint::FootL),
        }
    }
}

/// 2-D joint position in frame coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl From<Vector2<f64>> for Point {
    fn from(v: Vector2<f64>) -> Self {
        Point { x: v.x, y: v.y }
    }
}

/// Joint positions of one stance.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pose {
    pub joints: BTreeMap<Joint, Point>,
}

impl Pose {
    #[inline]
    pub fn get(&self, joint: Joint) -> Option<Vector2<f64>> {
        self.joints.get(&joint).map(|p| Vector2::new(p.x, p.y))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    fn set(&mut self, joint: Joint, at: Vector2<f64>) {
        self.joints.insert(joint, at.into());
    }
}

/// Two-segment inverse kinematics. Returns `(middle joint, end effector)`.
///
/// If the target lies beyond `l1 + l2` the chain is stretched straight toward
/// it and the end effector stops at full extension. Otherwise the middle
/// joint is seeded at `base + (0, l1)` and refined by `iterations` FABRIK
/// sweeps; the end effector sits on the target.
pub fn solve_two_segment(
    base: Vector2<f64>,
    target: Vector2<f64>,
    l1: f64,
    l2: f64,
    iterations: usize,
) -> (Vector2<f64>, Vector2<f64>) {
    let to_target = target - base;
    let dist = to_target.norm();
    if dist > l1 + l2 {
        let dir = to_target / dist;
        return (base + dir * l1, base + dir * (l1 + l2));
    }

    let mut mid = base + Vector2::new(0.0, l1);
    for _ in 0..iterations {
        // forward: end on target, mid at l2 from it
        let d = (mid - target).norm();
        if d > MIN_NORM {
            mid = target + (mid - target) / d * l2;
        }
        // backward: base fixed, mid at l1 from it
        let d = (mid - base).norm();
        if d > MIN_NORM {
            mid = base + (mid - base) / d * l1;
        }
    }
    (mid, target)
}

fn segments(limb: Limb, model: &AnthropometricModel) -> (f64, f64) {
    if limb.is_hand() {
        (model.upper_arm, model.forearm)
    } else {
        (model.thigh, model.shin)
    }
}

/// Full skeleton for a stance on `wall`.
///
/// The core uses every occupied slot, so a matched hold weighs twice. With no
/// contacts at all the core sits at the frame centre. Limbs off the wall get
/// no middle or end joint.
pub fn full_body_pose(wall: &Wall, model: &AnthropometricModel, stance: &impl Stance) -> Pose {
    let slots = stance.slots();
    let contacts: Vec<(Limb, Vector2<f64>)> = Limb::ALL
        .into_iter()
        .filter_map(|limb| slots[limb.slot()].map(|id| (limb, wall.pos(id))))
        .collect();
    let points: Vec<Vector2<f64>> = contacts.iter().map(|&(_, p)| p).collect();
    let core = match centroid(&points) {
        Some(mean) => core_from_mean(mean, model),
        None => {
            let frame = wall.frame();
            Vector2::new(frame.width / 2.0, frame.height / 2.0)
        }
    };

    let mut pose = Pose::default();
    pose.set(Joint::Core, core);
    for limb in Limb::ALL {
        let (base, _, _) = Joint::chain(limb);
        pose.set(base, anchor(core, limb, model));
    }
    for (limb, target) in contacts {
        let (_, mid_joint, end_joint) = Joint::chain(limb);
        let (l1, l2) = segments(limb, model);
        let base = anchor(core, limb, model);
        let (mid, end) = solve_two_segment(base, target, l1, l2, IK_ITERATIONS);
        pose.set(mid_joint, mid);
        pose.set(end_joint, end);
    }
    pose
}
