#![deny(warnings)]

//! AI competitor behavior.
//!
//! Each competitor runs four stochastic behaviors per turn, called in a
//! fixed order by the orchestrator: alert update, reaction to the player's
//! last action, an autonomous move, and market-share drift.

use serde::{Deserialize, Serialize};
use sim_core::config::{CompetitorSeed, CompetitorStrategy};
use sim_core::Dice;
use tracing::debug;

/// Player actions a competitor can notice and answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerAction {
    Hiring,
    Marketing,
    ProductDevelopment,
}

/// Two-state alert with a deliberate hysteresis band between the raise and
/// lower thresholds, so competitors do not flap on small share movements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    #[default]
    Normal,
    /// Reserved middle state; the threshold update only ever assigns the
    /// outer two, leaving whatever level is current inside the band.
    Cautious,
    Aggressive,
}

/// What a competitor did, for the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitorMove {
    CounterHiring { narration: String },
    CounterMarketing { narration: String },
    CounterDevelopment { narration: String },
    Innovation { narration: String },
    Expansion { narration: String },
    Acquisition { narration: String },
}

impl CompetitorMove {
    pub fn narration(&self) -> &str {
        match self {
            CompetitorMove::CounterHiring { narration }
            | CompetitorMove::CounterMarketing { narration }
            | CompetitorMove::CounterDevelopment { narration }
            | CompetitorMove::Innovation { narration }
            | CompetitorMove::Expansion { narration }
            | CompetitorMove::Acquisition { narration } => narration,
        }
    }
}

/// An AI-controlled rival company.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Competitor {
    pub name: String,
    pub ceo: String,
    pub market_share: f64,
    pub strategy: CompetitorStrategy,
    /// Abstract product/tech strength; grows through autonomous moves.
    pub power: f64,
    /// 0.2..=1.0 once clamping has had a chance to act.
    pub aggressiveness: f64,
    pub alert: AlertLevel,
    pub last_move: Option<CompetitorMove>,
}

impl Competitor {
    pub fn from_seed(seed: &CompetitorSeed) -> Self {
        Self {
            name: seed.name.to_string(),
            ceo: seed.ceo.to_string(),
            market_share: seed.share,
            strategy: seed.strategy,
            power: seed.power,
            aggressiveness: seed.aggressiveness,
            alert: AlertLevel::Normal,
            last_move: None,
        }
    }

    /// Build the full starting roster.
    pub fn roster(seeds: &[CompetitorSeed]) -> Vec<Competitor> {
        seeds.iter().map(Competitor::from_seed).collect()
    }

    /// Raise or lower the alert based on how close the player's share is to
    /// this competitor's. The band between the two thresholds changes
    /// nothing, which keeps the state sticky.
    pub fn update_alert_level(&mut self, player_share: f64) {
        if player_share > self.market_share * 0.3 {
            self.alert = AlertLevel::Aggressive;
            self.aggressiveness = (self.aggressiveness + 0.1).min(1.0);
        } else if player_share < self.market_share * 0.1 {
            self.alert = AlertLevel::Normal;
            self.aggressiveness = (self.aggressiveness - 0.05).max(0.2);
        }
    }

    /// Maybe answer the player's last action. A single gate roll against
    /// `aggressiveness * 0.6` decides whether the competitor reacts at all;
    /// the per-action branch then has its own probability.
    pub fn react_to_player_action(
        &mut self,
        action: PlayerAction,
        dice: &mut Dice,
    ) -> Option<CompetitorMove> {
        if dice.roll() > self.aggressiveness * 0.6 {
            return None;
        }
        let reaction = match action {
            PlayerAction::Hiring => {
                if self.strategy == CompetitorStrategy::Aggressive && dice.chance(0.4) {
                    Some(CompetitorMove::CounterHiring {
                        narration: format!("{} launched a hiring drive of its own", self.name),
                    })
                } else {
                    None
                }
            }
            PlayerAction::Marketing => {
                if dice.chance(self.aggressiveness * 0.6) {
                    self.market_share += 0.5;
                    Some(CompetitorMove::CounterMarketing {
                        narration: format!("{} answered with a marketing blitz", self.name),
                    })
                } else {
                    None
                }
            }
            PlayerAction::ProductDevelopment => {
                if self.strategy != CompetitorStrategy::Defensive && dice.chance(0.3) {
                    Some(CompetitorMove::CounterDevelopment {
                        narration: format!("{} fast-tracked a competing product", self.name),
                    })
                } else {
                    None
                }
            }
        };
        if let Some(mv) = &reaction {
            debug!(competitor = %self.name, action = ?action, "competitor reacted");
            self.last_move = Some(mv.clone());
        }
        reaction
    }

    /// Unprompted move, gated at `aggressiveness * 0.3` per turn.
    pub fn perform_autonomous_action(&mut self, dice: &mut Dice) -> Option<CompetitorMove> {
        if !dice.chance(self.aggressiveness * 0.3) {
            return None;
        }
        let mv = match dice.index(3) {
            0 => {
                self.power += 5.0;
                CompetitorMove::Innovation {
                    narration: format!("{} unveiled a technical breakthrough", self.name),
                }
            }
            1 => {
                self.market_share += 1.0;
                CompetitorMove::Expansion {
                    narration: format!("{} expanded into a new segment", self.name),
                }
            }
            _ => {
                self.power += 10.0;
                self.market_share += 2.0;
                CompetitorMove::Acquisition {
                    narration: format!("{} acquired a smaller rival", self.name),
                }
            }
        };
        self.last_move = Some(mv.clone());
        Some(mv)
    }

    /// Random walk on market share, scaled by aggressiveness and amplified
    /// while on aggressive alert. The result is clamped to [5, 60] so no
    /// competitor ever vanishes or takes over the market.
    pub fn update_market_share(&mut self, dice: &mut Dice) {
        let mut change = (dice.roll() - 0.5) * self.aggressiveness * 3.0;
        if self.alert == AlertLevel::Aggressive {
            change *= 1.5;
        }
        self.market_share = (self.market_share + change).clamp(5.0, 60.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use sim_core::config::GameConfig;

    fn roster() -> Vec<Competitor> {
        Competitor::roster(&GameConfig::standard().competitors)
    }

    #[test]
    fn roster_comes_from_the_seed_table() {
        let comps = roster();
        assert_eq!(comps.len(), 3);
        assert_eq!(comps[0].name, "TechCorp");
        assert_eq!(comps[0].market_share, 35.0);
        assert_eq!(comps[0].strategy, CompetitorStrategy::Aggressive);
        assert_eq!(comps[2].aggressiveness, 0.3);
        assert!(comps.iter().all(|c| c.alert == AlertLevel::Normal));
    }

    #[test]
    fn alert_raises_past_the_upper_threshold() {
        let mut c = roster().remove(0); // share 35, aggressiveness 0.8
        c.update_alert_level(11.0); // > 35 * 0.3
        assert_eq!(c.alert, AlertLevel::Aggressive);
        assert!((c.aggressiveness - 0.9).abs() < 1e-9);
        // ceiling
        c.update_alert_level(11.0);
        c.update_alert_level(11.0);
        assert_eq!(c.aggressiveness, 1.0);
    }

    #[test]
    fn alert_lowers_below_the_lower_threshold() {
        let mut c = roster().remove(0);
        c.alert = AlertLevel::Aggressive;
        c.update_alert_level(3.0); // < 35 * 0.1
        assert_eq!(c.alert, AlertLevel::Normal);
        assert!((c.aggressiveness - 0.75).abs() < 1e-9);
    }

    #[test]
    fn middle_band_changes_nothing() {
        let mut c = roster().remove(0);
        c.alert = AlertLevel::Aggressive;
        let before = c.aggressiveness;
        c.update_alert_level(7.0); // between 3.5 and 10.5
        assert_eq!(c.alert, AlertLevel::Aggressive);
        assert_eq!(c.aggressiveness, before);
    }

    #[test]
    fn aggressiveness_floor_holds() {
        let mut c = roster().remove(2); // aggressiveness 0.3
        for _ in 0..10 {
            c.update_alert_level(0.5);
        }
        assert!((c.aggressiveness - 0.2).abs() < 1e-9);
    }

    #[test]
    fn defensive_competitor_never_counters_development() {
        let mut c = roster().remove(2);
        c.aggressiveness = 1.0; // open the gate as wide as possible
        let mut dice = Dice::from_seed(5);
        for _ in 0..1_000 {
            let mv = c.react_to_player_action(PlayerAction::ProductDevelopment, &mut dice);
            assert!(mv.is_none());
        }
    }

    #[test]
    fn marketing_reaction_adds_half_a_point() {
        let mut dice = Dice::from_seed(0);
        let mut c = roster().remove(0);
        c.aggressiveness = 1.0;
        let before = c.market_share;
        // run until a reaction fires; with gate 0.6 and branch 0.6 this is quick
        let mut fired = false;
        for _ in 0..100 {
            if let Some(mv) = c.react_to_player_action(PlayerAction::Marketing, &mut dice) {
                assert!(matches!(mv, CompetitorMove::CounterMarketing { .. }));
                fired = true;
                break;
            }
        }
        assert!(fired);
        assert!((c.market_share - before - 0.5).abs() < 1e-9);
        assert!(c.last_move.is_some());
    }

    #[test]
    fn autonomous_actions_move_power_or_share() {
        let mut dice = Dice::from_seed(9);
        let mut c = roster().remove(0);
        c.aggressiveness = 1.0;
        let mut seen = 0;
        for _ in 0..200 {
            let (power, share) = (c.power, c.market_share);
            if let Some(mv) = c.perform_autonomous_action(&mut dice) {
                seen += 1;
                match mv {
                    CompetitorMove::Innovation { .. } => {
                        assert_eq!(c.power, power + 5.0);
                    }
                    CompetitorMove::Expansion { .. } => {
                        assert_eq!(c.market_share, share + 1.0);
                    }
                    CompetitorMove::Acquisition { .. } => {
                        assert_eq!(c.power, power + 10.0);
                        assert_eq!(c.market_share, share + 2.0);
                    }
                    _ => panic!("reaction move from autonomous action"),
                }
            }
        }
        assert!(seen > 30); // gate is 0.3 with aggressiveness 1.0
    }

    proptest! {
        #[test]
        fn drift_keeps_share_in_bounds(seed in 0u64..500, start in 5.0f64..60.0,
                                       aggr in 0.2f64..=1.0, steps in 1usize..100) {
            let mut dice = Dice::from_seed(seed);
            let mut c = Competitor::from_seed(&GameConfig::standard().competitors[0]);
            c.market_share = start;
            c.aggressiveness = aggr;
            for _ in 0..steps {
                c.update_market_share(&mut dice);
                prop_assert!((5.0..=60.0).contains(&c.market_share));
            }
        }

        #[test]
        fn aggressiveness_stays_clamped(player in 0.0f64..80.0, rounds in 1usize..50) {
            let mut c = Competitor::from_seed(&GameConfig::standard().competitors[1]);
            for _ in 0..rounds {
                c.update_alert_level(player);
                prop_assert!((0.2..=1.0).contains(&c.aggressiveness));
            }
        }
    }
}
