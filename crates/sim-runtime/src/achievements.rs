//! Achievement predicates and reward application.
//!
//! Each predicate is a pure function of the current state (plus the month's
//! net result) and the set of ids already granted; the config table only
//! supplies names and rewards.

use sim_core::config::AchievementReward;
use sim_core::{LifecycleStage, Money};
use tracing::info;

use crate::game::Game;

impl Game {
    fn achievement_met(&self, id: &str, monthly_net: Money) -> bool {
        match id {
            "first_profit" => monthly_net > 0,
            "big_company" => self.employees.len() >= 10,
            "market_leader" => self.market_share >= 15.0,
            "debt_free" => self.debt == 0 && self.money >= 15_000_000,
            "innovation_master" => self.products.len() >= 5,
            "trait_collector" => {
                self.employees.iter().filter(|e| !e.traits.is_empty()).count() >= 5
            }
            "product_lifecycle_master" => self.products.iter().any(|p| {
                matches!(p.lifecycle, LifecycleStage::Maturity | LifecycleStage::Decline)
            }),
            _ => false,
        }
    }

    /// Grant every newly earned achievement. Brand and reputation rewards
    /// clamp at their configured ceilings; each id is granted at most once.
    pub(crate) fn check_achievements(&mut self, monthly_net: Money) {
        let earned: Vec<(&'static str, AchievementReward)> = self
            .config
            .achievements
            .iter()
            .filter(|def| {
                !self.achievements.contains(def.id) && self.achievement_met(def.id, monthly_net)
            })
            .map(|def| (def.id, def.reward))
            .collect();
        for (id, reward) in earned {
            info!(id, "achievement earned");
            self.achievements.insert(id.to_string());
            self.money += reward.money;
            self.brand_power =
                (self.brand_power + reward.brand_power).min(self.config.limits.max_brand_power);
            self.reputation =
                (self.reputation + reward.reputation).min(self.config.limits.max_reputation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::config::Difficulty;
    use sim_core::Product;

    fn game() -> Game {
        Game::new(1, Difficulty::Normal).unwrap()
    }

    #[test]
    fn first_profit_granted_once_with_reward() {
        let mut g = game();
        let before = g.money;
        g.check_achievements(100_000);
        assert!(g.achievements.contains("first_profit"));
        assert_eq!(g.money, before + 500_000);
        let after_first = g.money;
        g.check_achievements(100_000);
        assert_eq!(g.money, after_first); // no double grant
    }

    #[test]
    fn losing_months_earn_nothing() {
        let mut g = game();
        g.check_achievements(-50_000);
        assert!(!g.achievements.contains("first_profit"));
    }

    #[test]
    fn market_leader_needs_fifteen_percent() {
        let mut g = game();
        g.market_share = 14.9;
        g.check_achievements(0);
        assert!(!g.achievements.contains("market_leader"));
        g.market_share = 15.0;
        g.check_achievements(0);
        assert!(g.achievements.contains("market_leader"));
    }

    #[test]
    fn lifecycle_master_waits_for_maturity() {
        let mut g = game();
        g.products.push(Product::new(1, "CloudPlatform Pro".into(), 60));
        g.check_achievements(0);
        assert!(!g.achievements.contains("product_lifecycle_master"));
        g.products[0].lifecycle = LifecycleStage::Maturity;
        g.check_achievements(0);
        assert!(g.achievements.contains("product_lifecycle_master"));
    }

    #[test]
    fn reward_brand_power_clamps_at_ceiling() {
        let mut g = game();
        g.brand_power = 5;
        g.check_achievements(100_000); // first_profit rewards +1 brand
        assert_eq!(g.brand_power, 5);
    }
}
