use serde::{Deserialize, Serialize};

use crate::domain::{AngleCandidate, EfficiencyEstimate, Latitude};

/// Linear efficiency model for a fixed-tilt panel.
///
/// The reference angle is an affine function of latitude rather than the
/// latitude itself; every degree of deviation from it costs a fixed amount
/// of efficiency, on top of a constant system loss and the condition loss.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyModel {
    /// Multiplier applied to latitude when deriving the reference angle
    pub latitude_gain: f64,
    /// Offset in degrees added to the scaled latitude
    pub latitude_offset_deg: f64,
    /// Efficiency points lost per degree away from the reference angle
    pub deviation_penalty_per_deg: f64,
    /// Irreducible wiring/inverter loss in percentage points
    pub base_loss: f64,
}

impl Default for EfficiencyModel {
    fn default() -> Self {
        Self {
            latitude_gain: 0.76,
            latitude_offset_deg: 3.1,
            deviation_penalty_per_deg: 0.4,
            base_loss: 2.0,
        }
    }
}

impl EfficiencyModel {
    /// Reference tilt the deviation penalty is measured against
    pub fn target_optimal_angle(&self, latitude: Latitude) -> f64 {
        latitude.degrees() * self.latitude_gain + self.latitude_offset_deg
    }

    /// Unclamped efficiency before the [0, 99] bound is applied
    pub fn raw_efficiency(&self, angle: AngleCandidate, latitude: Latitude, condition_loss: f64) -> f64 {
        let deviation = (self.target_optimal_angle(latitude) - angle.as_f64()).abs();
        let deviation_loss = self.deviation_penalty_per_deg * deviation;
        (100.0 - self.base_loss) - condition_loss - deviation_loss
    }

    pub fn efficiency(
        &self,
        angle: AngleCandidate,
        latitude: Latitude,
        condition_loss: f64,
    ) -> EfficiencyEstimate {
        EfficiencyEstimate::clamped(self.raw_efficiency(angle, latitude, condition_loss))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn angle(deg: u8) -> AngleCandidate {
        AngleCandidate::new(deg).unwrap()
    }

    #[test]
    fn test_target_is_not_latitude() {
        let model = EfficiencyModel::default();
        assert!((model.target_optimal_angle(Latitude(0.0)) - 3.1).abs() < 1e-9);
        assert!((model.target_optimal_angle(Latitude(28.0)) - 24.38).abs() < 1e-9);
    }

    #[test]
    fn test_equator_clean() {
        let model = EfficiencyModel::default();
        let eff = model.efficiency(angle(3), Latitude(0.0), 0.0);
        assert!((eff.percent() - 97.96).abs() < 1e-9);
    }

    #[test]
    fn test_condition_loss_applied() {
        let model = EfficiencyModel::default();
        let eff = model.efficiency(angle(24), Latitude(28.0), 30.0);
        assert!((eff.percent() - 67.848).abs() < 1e-9);
    }

    #[test]
    fn test_floor_at_zero() {
        let model = EfficiencyModel::default();
        let eff = model.efficiency(angle(90), Latitude(-500.0), 60.0);
        assert_eq!(eff.percent(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_clean_efficiency_never_exceeds_base(lat in -1000.0f64..1000.0, deg in 0u8..=90) {
            let model = EfficiencyModel::default();
            let a = angle(deg);
            let eff = model.efficiency(a, Latitude(lat), 0.0).percent();
            let target = model.target_optimal_angle(Latitude(lat));
            let expected = (98.0 - 0.4 * (target - a.as_f64()).abs()).max(0.0);
            prop_assert!(eff <= 98.0);
            prop_assert!((eff - expected).abs() < 1e-9);
        }

        #[test]
        fn prop_condition_loss_is_offset(lat in -90.0f64..90.0, deg in 0u8..=90, loss in prop::sample::select(vec![0.0, 20.0, 30.0, 40.0, 50.0, 60.0])) {
            let model = EfficiencyModel::default();
            let a = angle(deg);
            let clean = model.raw_efficiency(a, Latitude(lat), 0.0);
            let lossy = model.efficiency(a, Latitude(lat), loss).percent();
            prop_assert!((lossy - (clean - loss).clamp(0.0, 99.0)).abs() < 1e-9);
        }

        #[test]
        fn prop_non_increasing_in_deviation(lat in -90.0f64..90.0, a in 0u8..=90, b in 0u8..=90) {
            let model = EfficiencyModel::default();
            let target = model.target_optimal_angle(Latitude(lat));
            let (near, far) = if (target - f64::from(a)).abs() <= (target - f64::from(b)).abs() {
                (a, b)
            } else {
                (b, a)
            };
            let e_near = model.efficiency(angle(near), Latitude(lat), 0.0);
            let e_far = model.efficiency(angle(far), Latitude(lat), 0.0);
            prop_assert!(e_near >= e_far);
        }
    }
}
