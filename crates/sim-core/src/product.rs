//! Product model and its lifecycle state machine.

use crate::config::GameConfig;
use crate::dice::Dice;
use crate::Money;
use serde::{Deserialize, Serialize};

/// The four lifecycle stages, in their fixed forward order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStage {
    Introduction,
    Growth,
    Maturity,
    Decline,
}

/// Ordered stage-to-successor table. Decline is terminal for automatic
/// advancement; the only way out of it is the probabilistic revival in
/// [`Product::improve`].
const NEXT_STAGE: [(LifecycleStage, Option<LifecycleStage>); 4] = [
    (LifecycleStage::Introduction, Some(LifecycleStage::Growth)),
    (LifecycleStage::Growth, Some(LifecycleStage::Maturity)),
    (LifecycleStage::Maturity, Some(LifecycleStage::Decline)),
    (LifecycleStage::Decline, None),
];

impl LifecycleStage {
    pub fn next(self) -> Option<LifecycleStage> {
        NEXT_STAGE
            .iter()
            .find(|(stage, _)| *stage == self)
            .and_then(|(_, next)| *next)
    }
}

/// A shipped product earning revenue each turn.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    /// 0-100, same ceiling as employee abilities.
    pub quality: u32,
    pub sales: u64,
    pub lifecycle: LifecycleStage,
    /// Turns spent in the current stage.
    pub lifecycle_turn: u32,
    pub current_revenue: Money,
    pub total_revenue: Money,
}

impl Product {
    pub fn new(id: u64, name: String, quality: u32) -> Self {
        Self {
            id,
            name,
            quality,
            sales: 0,
            lifecycle: LifecycleStage::Introduction,
            lifecycle_turn: 0,
            current_revenue: 0,
            total_revenue: 0,
        }
    }

    /// Advance the per-stage turn counter and move to the next stage once
    /// the configured duration is used up. Decline has no duration and
    /// therefore never advances.
    pub fn advance_lifecycle(&mut self, config: &GameConfig) {
        self.lifecycle_turn += 1;
        let def = config.stage_def(self.lifecycle);
        if let (Some(duration), Some(next)) = (def.duration, self.lifecycle.next()) {
            if self.lifecycle_turn >= duration {
                self.lifecycle = next;
                self.lifecycle_turn = 0;
            }
        }
    }

    /// Revenue for the current turn: quality x yen unit x stage multiplier.
    /// Pure in everything but the running totals it updates.
    pub fn calculate_revenue(&mut self, config: &GameConfig) -> Money {
        let def = config.stage_def(self.lifecycle);
        let base = self.quality as f64 * config.yen_unit as f64;
        self.current_revenue = (base * def.revenue_multiplier) as Money;
        self.total_revenue += self.current_revenue;
        self.current_revenue
    }

    /// Player-triggered improvement: quality rises by the configured step
    /// (clamped), and a declining product gets one revival roll back to
    /// maturity. Returns whether the product revived.
    pub fn improve(&mut self, config: &GameConfig, dice: &mut Dice) -> bool {
        self.quality =
            (self.quality + config.rates.product_quality_improvement).min(config.limits.max_ability);

        if self.lifecycle == LifecycleStage::Decline
            && dice.chance(config.probabilities.product_revival_from_decline)
        {
            self.lifecycle = LifecycleStage::Maturity;
            self.lifecycle_turn = 0;
            return true;
        }
        false
    }
}
