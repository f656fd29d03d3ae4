//! Static tuning tables for the simulation.
//!
//! Everything numeric the engine consumes (costs, limits, probabilities,
//! trait and lifecycle definitions, the competitor roster, name word lists)
//! lives here as plain data. [`GameConfig::standard`] builds the shipped
//! balance; [`GameConfig::validate`] is run once at load and fails fast on
//! malformed tables, so lookups during play can stay graceful.

use crate::product::LifecycleStage;
use crate::Money;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Game difficulty, which currently only scales the desk trap rate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Departments an employee can belong to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    Development,
    Sales,
    Planning,
    Management,
}

impl Department {
    pub const ALL: [Department; 4] = [
        Department::Development,
        Department::Sales,
        Department::Planning,
        Department::Management,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Department::Development => "Development",
            Department::Sales => "Sales",
            Department::Planning => "Planning",
            Department::Management => "Management",
        }
    }
}

/// Employee personality flavor. Cosmetic today, but persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Personality {
    Earnest,
    Diligent,
    Cheerful,
    Ambitious,
    Cooperative,
}

impl Personality {
    pub const ALL: [Personality; 5] = [
        Personality::Earnest,
        Personality::Diligent,
        Personality::Cheerful,
        Personality::Ambitious,
        Personality::Cooperative,
    ];
}

/// Overall market mood, shifted by active random events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketTrend {
    Boom,
    Recession,
    #[default]
    Stable,
}

/// Closed set of employee trait keys.
///
/// Trait keys arriving from outside (old saves) are parsed with
/// [`TraitKey::parse`]; unknown strings are ignored rather than rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitKey {
    Innovative,
    Leadership,
    Efficient,
    Loyal,
    BurnoutProne,
    Perfectionist,
    Social,
}

impl TraitKey {
    pub fn parse(key: &str) -> Option<TraitKey> {
        match key {
            "innovative" => Some(TraitKey::Innovative),
            "leadership" => Some(TraitKey::Leadership),
            "efficient" => Some(TraitKey::Efficient),
            "loyal" => Some(TraitKey::Loyal),
            "burnout_prone" => Some(TraitKey::BurnoutProne),
            "perfectionist" => Some(TraitKey::Perfectionist),
            "social" => Some(TraitKey::Social),
            _ => None,
        }
    }
}

/// Company strategy keys selectable at the start of a month.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKey {
    Niche,
    Scale,
    TechFocus,
    Balanced,
}

/// Behavioral archetype of an AI competitor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitorStrategy {
    Aggressive,
    Balanced,
    Defensive,
}

/// Fixed action costs, in yen.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Costs {
    pub hiring_base: Money,
    pub hiring_salary_multiplier: i64,
    pub training_per_employee: Money,
    pub product_development: Money,
    pub marketing: Money,
    pub product_improvement: Money,
    pub loan_amount: Money,
    pub loan_with_interest: Money,
}

/// Hard caps on player-visible gauges.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Limits {
    pub max_brand_power: i32,
    pub max_market_share: f64,
    pub max_reputation: i32,
    pub max_ability: u32,
    pub min_employees_for_development: usize,
    pub weeks_per_month: u32,
}

/// Starting state of a new company.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InitialValues {
    pub money: Money,
    pub market_share: f64,
    pub brand_power: i32,
    pub reputation: i32,
    pub employee_motivation: i32,
    pub year: i32,
    pub month: u32,
    pub week: u32,
}

/// Per-action growth increments.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Rates {
    pub marketing_share_increase: f64,
    pub marketing_brand_increase: i32,
    pub training_ability_increase: u32,
    pub product_quality_improvement: u32,
    pub research_points_per_product: u32,
}

/// Core probability knobs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Probabilities {
    pub product_development_success: f64,
    pub product_revival_from_decline: f64,
}

/// Inclusive range for generated values.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: i64,
    pub max: i64,
}

/// One employee trait: draw probability plus its formula contributions.
///
/// The four effect fields map onto the accumulator folded by
/// `Employee::trait_effects`; neutral values (0 for bonuses, 1 for the
/// salary multiplier) make a trait invisible to that formula.
#[derive(Clone, Debug, Serialize)]
pub struct TraitDef {
    pub key: TraitKey,
    pub name: &'static str,
    pub description: &'static str,
    pub probability: f64,
    pub productivity_bonus: f64,
    pub salary_multiplier: f64,
    pub loyalty_bonus: f64,
    pub burnout_resistance: f64,
}

/// One product lifecycle stage: how long it lasts and how it sells.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LifecycleStageDef {
    pub stage: LifecycleStage,
    /// Turns spent in this stage before advancing; `None` means the stage
    /// never expires on its own (decline).
    pub duration: Option<u32>,
    pub revenue_multiplier: f64,
}

/// Multipliers a company strategy applies to the monthly rollup.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StrategyEffects {
    pub profit_margin: f64,
    pub hiring_cost_multiplier: f64,
    pub market_expansion: f64,
    pub salary_multiplier: f64,
    pub development_success: f64,
    pub innovation_bonus: f64,
}

impl Default for StrategyEffects {
    fn default() -> Self {
        Self {
            profit_margin: 1.0,
            hiring_cost_multiplier: 1.0,
            market_expansion: 1.0,
            salary_multiplier: 1.0,
            development_success: 1.0,
            innovation_bonus: 0.0,
        }
    }
}

/// A selectable company strategy.
#[derive(Clone, Debug, Serialize)]
pub struct StrategyDef {
    pub key: StrategyKey,
    pub name: &'static str,
    pub description: &'static str,
    pub effects: StrategyEffects,
}

/// Effect payload of a random event template. Events without multipliers
/// still trigger, narrate, and expire; they just leave the books alone.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventEffectsDef {
    pub revenue_multiplier: Option<f64>,
    pub tech_salary_multiplier: Option<f64>,
    pub market_trend: Option<MarketTrend>,
}

/// A random event template with its trigger probability per turn.
#[derive(Clone, Debug, Serialize)]
pub struct EventDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub probability: f64,
    pub duration: u32,
    pub effects: EventEffectsDef,
}

/// Reward granted when an achievement is earned.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct AchievementReward {
    pub money: Money,
    pub brand_power: i32,
    pub reputation: i32,
}

/// One achievement. The predicate lives in the orchestrator keyed by `id`.
#[derive(Clone, Debug, Serialize)]
pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub reward: AchievementReward,
}

/// Starting state of one AI competitor.
#[derive(Clone, Debug, Serialize)]
pub struct CompetitorSeed {
    pub name: &'static str,
    pub ceo: &'static str,
    pub share: f64,
    pub strategy: CompetitorStrategy,
    pub power: f64,
    pub aggressiveness: f64,
}

/// Word lists for the name generators.
#[derive(Clone, Debug, Serialize)]
pub struct NameLists {
    pub family: Vec<&'static str>,
    pub given: Vec<&'static str>,
    pub product_prefixes: Vec<&'static str>,
    pub product_bases: Vec<&'static str>,
    pub product_versions: Vec<&'static str>,
}

/// Validation errors for the static tables. These are load-time failures;
/// once a config validates, runtime lookups degrade gracefully instead.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("table must not be empty: {0}")]
    EmptyTable(&'static str),
    #[error("probability out of [0,1] in {0}")]
    InvalidProbability(&'static str),
    #[error("range has min > max: {0}")]
    InvalidRange(&'static str),
    #[error("lifecycle table must list the four stages in order")]
    UnorderedLifecycle,
    #[error("competitor seed out of bounds: {0}")]
    InvalidCompetitorSeed(&'static str),
}

/// All static tuning data, bundled.
#[derive(Clone, Debug, Serialize)]
pub struct GameConfig {
    pub costs: Costs,
    pub limits: Limits,
    pub initial: InitialValues,
    pub rates: Rates,
    pub probabilities: Probabilities,
    pub salary_range: ValueRange,
    pub ability_range: ValueRange,
    /// Revenue earned per quality point per turn, before stage multipliers.
    pub yen_unit: Money,
    pub traits: Vec<TraitDef>,
    pub lifecycle: Vec<LifecycleStageDef>,
    pub strategies: Vec<StrategyDef>,
    pub events: Vec<EventDef>,
    pub achievements: Vec<AchievementDef>,
    pub competitors: Vec<CompetitorSeed>,
    pub names: NameLists,
}

impl GameConfig {
    /// The shipped balance.
    pub fn standard() -> Self {
        Self {
            costs: Costs {
                hiring_base: 200_000,
                hiring_salary_multiplier: 3,
                training_per_employee: 300_000,
                product_development: 2_000_000,
                marketing: 1_000_000,
                product_improvement: 1_000_000,
                loan_amount: 5_000_000,
                loan_with_interest: 5_500_000,
            },
            limits: Limits {
                max_brand_power: 5,
                max_market_share: 50.0,
                max_reputation: 100,
                max_ability: 100,
                min_employees_for_development: 2,
                weeks_per_month: 4,
            },
            initial: InitialValues {
                money: 10_000_000,
                market_share: 0.1,
                brand_power: 1,
                reputation: 50,
                employee_motivation: 70,
                year: 2025,
                month: 1,
                week: 1,
            },
            rates: Rates {
                marketing_share_increase: 0.3,
                marketing_brand_increase: 1,
                training_ability_increase: 10,
                product_quality_improvement: 15,
                research_points_per_product: 10,
            },
            probabilities: Probabilities {
                product_development_success: 0.8,
                product_revival_from_decline: 0.3,
            },
            salary_range: ValueRange {
                min: 300_000,
                max: 500_000,
            },
            ability_range: ValueRange { min: 30, max: 80 },
            yen_unit: 10_000,
            traits: vec![
                TraitDef {
                    key: TraitKey::Innovative,
                    name: "Innovative",
                    description: "Creative thinker; boosts new product development",
                    probability: 0.15,
                    productivity_bonus: 0.0,
                    salary_multiplier: 1.0,
                    loyalty_bonus: 0.0,
                    burnout_resistance: 0.0,
                },
                TraitDef {
                    key: TraitKey::Leadership,
                    name: "Leadership",
                    description: "Lifts the whole team, but commands a premium salary",
                    probability: 0.1,
                    productivity_bonus: 0.15,
                    salary_multiplier: 1.3,
                    loyalty_bonus: 0.0,
                    burnout_resistance: 0.0,
                },
                TraitDef {
                    key: TraitKey::Efficient,
                    name: "Efficient",
                    description: "Gets more done in less time",
                    probability: 0.2,
                    productivity_bonus: 0.25,
                    salary_multiplier: 1.0,
                    loyalty_bonus: 0.0,
                    burnout_resistance: 0.2,
                },
                TraitDef {
                    key: TraitKey::Loyal,
                    name: "Loyal",
                    description: "Half the resignation risk, steady motivation",
                    probability: 0.25,
                    productivity_bonus: 0.0,
                    salary_multiplier: 1.0,
                    loyalty_bonus: 0.5,
                    burnout_resistance: 0.3,
                },
                TraitDef {
                    key: TraitKey::BurnoutProne,
                    name: "Burnout-prone",
                    description: "Motivation and output suffer under pressure",
                    probability: 0.1,
                    productivity_bonus: -0.3,
                    salary_multiplier: 1.0,
                    loyalty_bonus: 0.0,
                    burnout_resistance: -0.2,
                },
                TraitDef {
                    key: TraitKey::Perfectionist,
                    name: "Perfectionist",
                    description: "Higher quality at the cost of speed",
                    probability: 0.15,
                    productivity_bonus: -0.2,
                    salary_multiplier: 1.0,
                    loyalty_bonus: 0.0,
                    burnout_resistance: 0.0,
                },
                TraitDef {
                    key: TraitKey::Social,
                    name: "Social",
                    description: "Great for morale, easily distracted",
                    probability: 0.2,
                    productivity_bonus: -0.1,
                    salary_multiplier: 1.0,
                    loyalty_bonus: 0.1,
                    burnout_resistance: 0.0,
                },
            ],
            lifecycle: vec![
                LifecycleStageDef {
                    stage: LifecycleStage::Introduction,
                    duration: Some(3),
                    revenue_multiplier: 0.5,
                },
                LifecycleStageDef {
                    stage: LifecycleStage::Growth,
                    duration: Some(4),
                    revenue_multiplier: 1.5,
                },
                LifecycleStageDef {
                    stage: LifecycleStage::Maturity,
                    duration: Some(6),
                    revenue_multiplier: 1.0,
                },
                LifecycleStageDef {
                    stage: LifecycleStage::Decline,
                    duration: None,
                    revenue_multiplier: 0.3,
                },
            ],
            strategies: vec![
                StrategyDef {
                    key: StrategyKey::Niche,
                    name: "Niche focus",
                    description: "Specialize hard: fatter margins, slower expansion",
                    effects: StrategyEffects {
                        profit_margin: 1.5,
                        market_expansion: 0.7,
                        salary_multiplier: 1.2,
                        ..StrategyEffects::default()
                    },
                },
                StrategyDef {
                    key: StrategyKey::Scale,
                    name: "Scale up",
                    description: "Hire in bulk and chase share at thin margins",
                    effects: StrategyEffects {
                        hiring_cost_multiplier: 0.8,
                        profit_margin: 0.9,
                        market_expansion: 1.4,
                        ..StrategyEffects::default()
                    },
                },
                StrategyDef {
                    key: StrategyKey::TechFocus,
                    name: "Tech focus",
                    description: "R&D first: better launches, pricier engineers",
                    effects: StrategyEffects {
                        development_success: 1.3,
                        salary_multiplier: 1.2,
                        innovation_bonus: 0.3,
                        ..StrategyEffects::default()
                    },
                },
                StrategyDef {
                    key: StrategyKey::Balanced,
                    name: "Balanced",
                    description: "No bets, no surprises",
                    effects: StrategyEffects::default(),
                },
            ],
            events: vec![
                EventDef {
                    id: "tech_boom",
                    name: "AI boom",
                    description: "Generative AI demand explodes; engineers get expensive",
                    probability: 0.15,
                    duration: 3,
                    effects: EventEffectsDef {
                        market_trend: Some(MarketTrend::Boom),
                        tech_salary_multiplier: Some(1.3),
                        ..EventEffectsDef::default()
                    },
                },
                EventDef {
                    id: "economic_recession",
                    name: "Recession warning",
                    description: "IT budgets tighten across the industry",
                    probability: 0.1,
                    duration: 4,
                    effects: EventEffectsDef {
                        market_trend: Some(MarketTrend::Recession),
                        revenue_multiplier: Some(0.8),
                        ..EventEffectsDef::default()
                    },
                },
                EventDef {
                    id: "talent_war",
                    name: "Talent war",
                    description: "Big firms are poaching with inflated offers",
                    probability: 0.2,
                    duration: 2,
                    effects: EventEffectsDef::default(),
                },
                EventDef {
                    id: "big_contract",
                    name: "Big contract tender",
                    description: "A government project opens for bids",
                    probability: 0.12,
                    duration: 1,
                    effects: EventEffectsDef::default(),
                },
                EventDef {
                    id: "tech_revolution",
                    name: "Breakthrough tech",
                    description: "A new platform energizes the whole market",
                    probability: 0.08,
                    duration: 2,
                    effects: EventEffectsDef::default(),
                },
            ],
            achievements: vec![
                AchievementDef {
                    id: "first_profit",
                    name: "In the black",
                    description: "Post a profitable month for the first time",
                    reward: AchievementReward {
                        money: 500_000,
                        brand_power: 1,
                        reputation: 0,
                    },
                },
                AchievementDef {
                    id: "big_company",
                    name: "Growing up",
                    description: "Reach ten employees",
                    reward: AchievementReward {
                        money: 0,
                        brand_power: 1,
                        reputation: 20,
                    },
                },
                AchievementDef {
                    id: "market_leader",
                    name: "Market leader",
                    description: "Hold 15% market share or more",
                    reward: AchievementReward {
                        money: 2_000_000,
                        brand_power: 0,
                        reputation: 30,
                    },
                },
                AchievementDef {
                    id: "debt_free",
                    name: "Debt free",
                    description: "Clear all debt with healthy reserves",
                    reward: AchievementReward {
                        money: 0,
                        brand_power: 2,
                        reputation: 25,
                    },
                },
                AchievementDef {
                    id: "innovation_master",
                    name: "Innovator",
                    description: "Ship five products",
                    reward: AchievementReward {
                        money: 1_000_000,
                        brand_power: 0,
                        reputation: 15,
                    },
                },
                AchievementDef {
                    id: "trait_collector",
                    name: "Talent scout",
                    description: "Employ five people with notable traits",
                    reward: AchievementReward {
                        money: 800_000,
                        brand_power: 0,
                        reputation: 10,
                    },
                },
                AchievementDef {
                    id: "product_lifecycle_master",
                    name: "Lifecycle master",
                    description: "Grow a product all the way to maturity",
                    reward: AchievementReward {
                        money: 0,
                        brand_power: 2,
                        reputation: 15,
                    },
                },
            ],
            competitors: vec![
                CompetitorSeed {
                    name: "TechCorp",
                    ceo: "Tsuyoshi Tanaka",
                    share: 35.0,
                    strategy: CompetitorStrategy::Aggressive,
                    power: 100.0,
                    aggressiveness: 0.8,
                },
                CompetitorSeed {
                    name: "DigitalWorks",
                    ceo: "Tomoko Suzuki",
                    share: 29.0,
                    strategy: CompetitorStrategy::Balanced,
                    power: 85.0,
                    aggressiveness: 0.5,
                },
                CompetitorSeed {
                    name: "CyberSoft",
                    ceo: "Takashi Yamada",
                    share: 22.0,
                    strategy: CompetitorStrategy::Defensive,
                    power: 70.0,
                    aggressiveness: 0.3,
                },
            ],
            names: NameLists {
                family: vec![
                    "Sato", "Suzuki", "Takahashi", "Tanaka", "Ito", "Watanabe", "Nakamura",
                    "Kobayashi", "Yamada", "Matsumoto",
                ],
                given: vec![
                    "Taro", "Hanako", "Ichiro", "Misaki", "Kenta", "Ai", "Sho", "Yui", "Daisuke",
                    "Yuko",
                ],
                product_prefixes: vec![
                    "Smart", "Digital", "AI ", "Cloud", "Mobile", "Ultra", "Pro", "Express",
                ],
                product_bases: vec![
                    "Manager", "System", "Tool", "Platform", "Solution", "App", "Service",
                ],
                product_versions: vec!["X", "Pro", "2025", "Plus", "Max", "One", "Go"],
            },
        }
    }

    /// Fail-fast structural validation, run once when a game is created.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.traits.is_empty() {
            return Err(ConfigError::EmptyTable("traits"));
        }
        if self.events.is_empty() {
            return Err(ConfigError::EmptyTable("events"));
        }
        if self.achievements.is_empty() {
            return Err(ConfigError::EmptyTable("achievements"));
        }
        if self.competitors.is_empty() {
            return Err(ConfigError::EmptyTable("competitors"));
        }
        if self.names.family.is_empty()
            || self.names.given.is_empty()
            || self.names.product_prefixes.is_empty()
            || self.names.product_bases.is_empty()
            || self.names.product_versions.is_empty()
        {
            return Err(ConfigError::EmptyTable("names"));
        }
        for t in &self.traits {
            if !(0.0..=1.0).contains(&t.probability) {
                return Err(ConfigError::InvalidProbability("traits"));
            }
        }
        for e in &self.events {
            if !(0.0..=1.0).contains(&e.probability) {
                return Err(ConfigError::InvalidProbability("events"));
            }
        }
        if self.salary_range.min > self.salary_range.max {
            return Err(ConfigError::InvalidRange("salary_range"));
        }
        if self.ability_range.min > self.ability_range.max {
            return Err(ConfigError::InvalidRange("ability_range"));
        }
        let expected = [
            LifecycleStage::Introduction,
            LifecycleStage::Growth,
            LifecycleStage::Maturity,
            LifecycleStage::Decline,
        ];
        if self.lifecycle.len() != expected.len()
            || self
                .lifecycle
                .iter()
                .zip(expected)
                .any(|(def, stage)| def.stage != stage)
        {
            return Err(ConfigError::UnorderedLifecycle);
        }
        for c in &self.competitors {
            if !(0.0..=1.0).contains(&c.aggressiveness) {
                return Err(ConfigError::InvalidCompetitorSeed("aggressiveness"));
            }
            if !(5.0..=60.0).contains(&c.share) {
                return Err(ConfigError::InvalidCompetitorSeed("share"));
            }
        }
        Ok(())
    }

    /// Lookup a trait definition; unknown keys return `None` and are ignored
    /// by callers.
    pub fn trait_def(&self, key: TraitKey) -> Option<&TraitDef> {
        self.traits.iter().find(|t| t.key == key)
    }

    /// Lifecycle parameters for a stage. Falls back to a neutral definition
    /// if the table is somehow short, so play never panics on stale data.
    pub fn stage_def(&self, stage: LifecycleStage) -> LifecycleStageDef {
        self.lifecycle
            .iter()
            .find(|d| d.stage == stage)
            .cloned()
            .unwrap_or(LifecycleStageDef {
                stage,
                duration: None,
                revenue_multiplier: 1.0,
            })
    }

    pub fn strategy_def(&self, key: StrategyKey) -> Option<&StrategyDef> {
        self.strategies.iter().find(|s| s.key == key)
    }

    /// Effects of the chosen strategy; `None` (or an unknown key from an old
    /// save) yields the neutral effect set.
    pub fn strategy_effects(&self, key: Option<StrategyKey>) -> StrategyEffects {
        key.and_then(|k| self.strategy_def(k))
            .map(|s| s.effects.clone())
            .unwrap_or_default()
    }
}
