//! Anthropometric model of the climber.
//!
//! Segment lengths start out as fractions of body height (unitless) and are
//! scaled once into the coordinate space of the wall. `scale` returns a new
//! model; callers keep the scaled copy and drop the unitless one.

/// Segment lengths of a climber.
///
/// Invariants:
/// - All lengths are finite and non-negative.
/// - A scaled model and the hold table it is used with share one coordinate space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnthropometricModel {
    pub upper_arm: f64,
    pub forearm: f64,
    pub thigh: f64,
    pub shin: f64,
    pub torso_width: f64,
    pub torso_height: f64,
}

impl Default for AnthropometricModel {
    /// Proportions as fractions of total body height.
    fn default() -> Self {
        Self {
            upper_arm: 0.15,
            forearm: 0.15,
            thigh: 0.25,
            shin: 0.20,
            torso_width: 0.15,
            torso_height: 0.25,
        }
    }
}

impl AnthropometricModel {
    /// Multiply every length by `target_dimension / reference_height`.
    ///
    /// Example: a 1.7 m climber on an image 1000 px tall gives ≈588 px per unit.
    /// `reference_height` must be positive.
    pub fn scale(&self, target_dimension: f64, reference_height: f64) -> Self {
        debug_assert!(reference_height > 0.0, "reference height must be positive");
        let k = target_dimension / reference_height;
        Self {
            upper_arm: self.upper_arm * k,
            forearm: self.forearm * k,
            thigh: self.thigh * k,
            shin: self.shin * k,
            torso_width: self.torso_width * k,
            torso_height: self.torso_height * k,
        }
    }

    /// Upper arm plus forearm.
    #[inline]
    pub fn arm_reach(&self) -> f64 {
        self.upper_arm + self.forearm
    }

    /// Thigh plus shin.
    #[inline]
    pub fn leg_reach(&self) -> f64 {
        self.thigh + self.shin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_multiplies_every_length() {
        let m = AnthropometricModel::default().scale(1000.0, 1.7);
        let k = 1000.0 / 1.7;
        assert!((m.upper_arm - 0.15 * k).abs() < 1e-9);
        assert!((m.shin - 0.20 * k).abs() < 1e-9);
        assert!((m.torso_height - 0.25 * k).abs() < 1e-9);
        assert!((m.arm_reach() - 0.30 * k).abs() < 1e-9);
        assert!((m.leg_reach() - 0.45 * k).abs() < 1e-9);
    }

    #[test]
    fn scale_leaves_source_untouched() {
        let unit = AnthropometricModel::default();
        let _scaled = unit.scale(500.0, 2.0);
        assert_eq!(unit, AnthropometricModel::default());
    }
}
