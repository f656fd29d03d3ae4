//! Employee model: abilities, motivation, traits.

use crate::config::{Department, GameConfig, Personality, TraitKey};
use crate::Money;
use serde::{Deserialize, Serialize};

/// The four ability dimensions every employee has.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abilities {
    pub technical: u32,
    pub sales: u32,
    pub planning: u32,
    pub management: u32,
}

impl Abilities {
    pub fn total(&self) -> u32 {
        self.technical + self.sales + self.planning + self.management
    }

    fn raise_all(&mut self, step: u32, ceiling: u32) {
        self.technical = (self.technical + step).min(ceiling);
        self.sales = (self.sales + step).min(ceiling);
        self.planning = (self.planning + step).min(ceiling);
        self.management = (self.management + step).min(ceiling);
    }
}

/// Accumulated formula modifiers from an employee's trait set.
///
/// Bonuses start neutral (1 for the productivity factor and salary
/// multiplier, 0 for the additive fields); each held trait contributes
/// additively, except salary multipliers which chain multiplicatively.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraitEffects {
    pub productivity_bonus: f64,
    pub salary_multiplier: f64,
    pub loyalty_bonus: f64,
    pub burnout_resistance: f64,
}

impl Default for TraitEffects {
    fn default() -> Self {
        Self {
            productivity_bonus: 1.0,
            salary_multiplier: 1.0,
            loyalty_bonus: 0.0,
            burnout_resistance: 0.0,
        }
    }
}

/// A single employee.
///
/// Trait keys are stored as strings so that saves written by newer builds
/// (or hand-edited ones) load cleanly; keys that fail to parse are simply
/// ignored wherever effects are computed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Employee {
    pub id: u64,
    pub name: String,
    pub personality: Personality,
    pub abilities: Abilities,
    /// 0-100 nominally; the productivity formula tolerates overshoot.
    pub motivation: i32,
    pub salary: Money,
    pub department: Department,
    pub traits: Vec<String>,
    pub experience: u32,
    pub burnout_level: f64,
}

impl Employee {
    /// Sum of all ability dimensions; used for rankings.
    pub fn total_ability(&self) -> u32 {
        self.abilities.total()
    }

    /// Linear motivation-to-output mapping. May exceed 1.0 when motivation
    /// has been pushed past 100; callers clamp if they care.
    pub fn productivity(&self) -> f64 {
        f64::from(self.motivation) / 100.0
    }

    /// One round of training: every ability rises by the configured step,
    /// clamped at the ceiling, and experience ticks up.
    pub fn train(&mut self, config: &GameConfig) {
        self.abilities.raise_all(
            config.rates.training_ability_increase,
            config.limits.max_ability,
        );
        self.experience += 1;
    }

    /// Fold the trait set into one effect accumulator. Keys the config does
    /// not know are skipped.
    pub fn trait_effects(&self, config: &GameConfig) -> TraitEffects {
        let mut effects = TraitEffects::default();
        for key in self.traits.iter().filter_map(|k| TraitKey::parse(k)) {
            if let Some(def) = config.trait_def(key) {
                effects.productivity_bonus += def.productivity_bonus;
                effects.salary_multiplier *= def.salary_multiplier;
                effects.loyalty_bonus += def.loyalty_bonus;
                effects.burnout_resistance += def.burnout_resistance;
            }
        }
        effects
    }

    pub fn has_trait(&self, key: TraitKey) -> bool {
        self.traits.iter().any(|k| TraitKey::parse(k) == Some(key))
    }

    /// Adjust motivation, clamped to the [10, 100] band the desk system
    /// uses everywhere.
    pub fn adjust_motivation(&mut self, delta: i32) {
        self.motivation = (self.motivation + delta).clamp(10, 100);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_employee() -> Employee {
        Employee {
            id: 1,
            name: "Taro Yamada".into(),
            personality: Personality::Diligent,
            abilities: Abilities {
                technical: 65,
                sales: 45,
                planning: 55,
                management: 50,
            },
            motivation: 75,
            salary: 400_000,
            department: Department::Development,
            traits: vec![],
            experience: 0,
            burnout_level: 0.0,
        }
    }

    #[test]
    fn total_ability_sums_dimensions() {
        assert_eq!(sample_employee().total_ability(), 215);
    }

    #[test]
    fn productivity_is_linear_in_motivation() {
        let mut e = sample_employee();
        assert!((e.productivity() - 0.75).abs() < f64::EPSILON);
        e.motivation = 120;
        assert!(e.productivity() > 1.0);
    }

    #[test]
    fn train_raises_and_clamps() {
        let cfg = GameConfig::standard();
        let mut e = sample_employee();
        e.abilities.technical = 95;
        e.train(&cfg);
        assert_eq!(e.abilities.technical, 100);
        assert_eq!(e.abilities.sales, 55);
        assert_eq!(e.experience, 1);
    }

    #[test]
    fn trait_effects_fold_known_and_skip_unknown() {
        let cfg = GameConfig::standard();
        let mut e = sample_employee();
        e.traits = vec![
            "efficient".into(),
            "leadership".into(),
            "time_traveler".into(), // not a real trait; must be ignored
        ];
        let fx = e.trait_effects(&cfg);
        assert!((fx.productivity_bonus - 1.4).abs() < 1e-9); // 1 + 0.25 + 0.15
        assert!((fx.salary_multiplier - 1.3).abs() < 1e-9);
    }

    #[test]
    fn neutral_effects_without_traits() {
        let cfg = GameConfig::standard();
        let fx = sample_employee().trait_effects(&cfg);
        assert_eq!(fx, TraitEffects::default());
    }

    #[test]
    fn motivation_clamps_to_band() {
        let mut e = sample_employee();
        e.adjust_motivation(-200);
        assert_eq!(e.motivation, 10);
        e.adjust_motivation(500);
        assert_eq!(e.motivation, 100);
    }

    proptest! {
        #[test]
        fn training_never_lowers_abilities(t in 0u32..=100, s in 0u32..=100,
                                           p in 0u32..=100, m in 0u32..=100,
                                           rounds in 1usize..20) {
            let cfg = GameConfig::standard();
            let mut e = sample_employee();
            e.abilities = Abilities { technical: t, sales: s, planning: p, management: m };
            for _ in 0..rounds {
                let before = e.abilities;
                e.train(&cfg);
                prop_assert!(e.abilities.technical >= before.technical);
                prop_assert!(e.abilities.sales >= before.sales);
                prop_assert!(e.abilities.planning >= before.planning);
                prop_assert!(e.abilities.management >= before.management);
                prop_assert!(e.abilities.technical <= cfg.limits.max_ability);
                prop_assert!(e.abilities.sales <= cfg.limits.max_ability);
                prop_assert!(e.abilities.planning <= cfg.limits.max_ability);
                prop_assert!(e.abilities.management <= cfg.limits.max_ability);
            }
        }
    }
}
