use crate::domain::{
    AngleCandidate, ConditionLabel, DefectLossTable, EfficiencyEstimate, Latitude, OptimizationResult,
};

use super::EfficiencyModel;

/// Exhaustive search over the 0..=90 degree tilt domain.
///
/// Angles are visited in ascending order and the best-so-far is only replaced
/// on strict improvement, so ties resolve to the lowest angle.
#[derive(Debug, Clone)]
pub struct TiltOptimizer {
    pub model: EfficiencyModel,
    table: &'static DefectLossTable,
}

impl Default for TiltOptimizer {
    fn default() -> Self {
        Self::new(EfficiencyModel::default())
    }
}

impl TiltOptimizer {
    pub fn new(model: EfficiencyModel) -> Self {
        Self {
            model,
            table: DefectLossTable::standard(),
        }
    }

    pub fn optimize(&self, latitude: Latitude, condition: ConditionLabel) -> OptimizationResult {
        let condition_loss = self.table.loss(condition);

        let mut best: Option<(AngleCandidate, EfficiencyEstimate)> = None;
        for angle in AngleCandidate::all() {
            let efficiency = self.model.efficiency(angle, latitude, condition_loss);
            match best {
                Some((_, best_eff)) if efficiency.percent() <= best_eff.percent() => {}
                _ => best = Some((angle, efficiency)),
            }
        }

        // The domain is never empty; MIN at the floor is the degenerate fallback.
        let (angle, efficiency) =
            best.unwrap_or((AngleCandidate::MIN, EfficiencyEstimate::clamped(0.0)));

        OptimizationResult {
            angle,
            efficiency,
            condition,
        }
    }
}
