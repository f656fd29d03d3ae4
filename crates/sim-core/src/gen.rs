//! Deterministic-shape generators for names, abilities, and salaries.
//!
//! All draws go through the injected [`Dice`] so candidate generation is
//! reproducible under a fixed seed.

use crate::config::GameConfig;
use crate::dice::Dice;
use crate::Money;

/// "Family Given" employee name from the config word lists.
pub fn generate_employee_name(config: &GameConfig, dice: &mut Dice) -> String {
    let family = dice.pick(&config.names.family).copied().unwrap_or("Sato");
    let given = dice.pick(&config.names.given).copied().unwrap_or("Taro");
    format!("{family} {given}")
}

/// Prefix + base + version product name, e.g. "CloudPlatform Pro".
pub fn generate_product_name(config: &GameConfig, dice: &mut Dice) -> String {
    let prefix = dice
        .pick(&config.names.product_prefixes)
        .copied()
        .unwrap_or("Smart");
    let base = dice
        .pick(&config.names.product_bases)
        .copied()
        .unwrap_or("Tool");
    let version = dice
        .pick(&config.names.product_versions)
        .copied()
        .unwrap_or("X");
    format!("{prefix}{base} {version}")
}

/// One ability value, uniform over the configured range.
pub fn generate_ability(config: &GameConfig, dice: &mut Dice) -> u32 {
    dice.between(config.ability_range.min, config.ability_range.max) as u32
}

/// A base salary, uniform over the configured range.
pub fn generate_salary(config: &GameConfig, dice: &mut Dice) -> Money {
    dice.between(config.salary_range.min, config.salary_range.max)
}
