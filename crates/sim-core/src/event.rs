//! Active random events and their turn bookkeeping.

use crate::config::{EventDef, EventEffectsDef, MarketTrend};
use serde::{Deserialize, Serialize};

/// Normalized multipliers an event contributes to the monthly rollup.
/// Missing effect keys default to the neutral 1.0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EventEffects {
    pub revenue_multiplier: f64,
    pub salary_multiplier: f64,
    /// Trend override for the orchestrator to apply; events never touch
    /// game state themselves.
    pub market_trend: Option<MarketTrend>,
}

/// A random event currently in effect (or recently expired, in history).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActiveEvent {
    pub id: String,
    pub name: String,
    pub description: String,
    pub effects: EventEffectsDef,
    pub remaining_turns: u32,
    pub triggered_turn: u32,
}

impl ActiveEvent {
    pub fn from_def(def: &EventDef, turn: u32) -> Self {
        Self {
            id: def.id.to_string(),
            name: def.name.to_string(),
            description: def.description.to_string(),
            effects: def.effects.clone(),
            remaining_turns: def.duration,
            triggered_turn: turn,
        }
    }

    pub fn is_active(&self) -> bool {
        self.remaining_turns > 0
    }

    /// Normalize the raw effect payload into rollup multipliers.
    pub fn apply_effects(&self) -> EventEffects {
        EventEffects {
            revenue_multiplier: self.effects.revenue_multiplier.unwrap_or(1.0),
            salary_multiplier: self.effects.tech_salary_multiplier.unwrap_or(1.0),
            market_trend: self.effects.market_trend,
        }
    }

    /// Burn one turn; returns whether the event is still active. The caller
    /// removes expired events from the active set.
    pub fn advance_turn(&mut self) -> bool {
        self.remaining_turns = self.remaining_turns.saturating_sub(1);
        self.remaining_turns > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn effects_default_to_neutral() {
        let cfg = GameConfig::standard();
        let contract = cfg.events.iter().find(|e| e.id == "big_contract").unwrap();
        let ev = ActiveEvent::from_def(contract, 5);
        let fx = ev.apply_effects();
        assert_eq!(fx.revenue_multiplier, 1.0);
        assert_eq!(fx.salary_multiplier, 1.0);
        assert_eq!(fx.market_trend, None);
    }

    #[test]
    fn recession_carries_trend_and_revenue_hit() {
        let cfg = GameConfig::standard();
        let def = cfg
            .events
            .iter()
            .find(|e| e.id == "economic_recession")
            .unwrap();
        let fx = ActiveEvent::from_def(def, 1).apply_effects();
        assert_eq!(fx.revenue_multiplier, 0.8);
        assert_eq!(fx.market_trend, Some(MarketTrend::Recession));
    }

    #[test]
    fn remaining_turns_strictly_decrease_to_expiry() {
        let cfg = GameConfig::standard();
        let def = cfg.events.iter().find(|e| e.id == "tech_boom").unwrap();
        let mut ev = ActiveEvent::from_def(def, 1);
        assert_eq!(ev.remaining_turns, 3);
        assert!(ev.advance_turn());
        assert!(ev.advance_turn());
        assert!(!ev.advance_turn());
        assert!(!ev.is_active());
        // expired events stay at zero
        assert!(!ev.advance_turn());
        assert_eq!(ev.remaining_turns, 0);
    }
}
