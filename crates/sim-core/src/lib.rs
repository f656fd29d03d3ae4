#![deny(warnings)]

//! Core domain models and invariants for Startup Tycoon.
//!
//! This crate defines the serializable entity types used across the
//! simulation (employees, products, random events), the static tuning
//! tables they are parameterized by, and the seedable random source that
//! every stochastic operation draws from.

pub mod config;
pub mod dice;
pub mod employee;
pub mod event;
pub mod gen;
pub mod product;

pub use config::{
    AchievementDef, CompetitorSeed, CompetitorStrategy, ConfigError, Department, Difficulty,
    EventDef, GameConfig, LifecycleStageDef, MarketTrend, Personality, StrategyDef, StrategyKey,
    TraitDef, TraitKey,
};
pub use dice::Dice;
pub use employee::{Employee, TraitEffects};
pub use event::{ActiveEvent, EventEffects};
pub use gen::{generate_ability, generate_employee_name, generate_product_name, generate_salary};
pub use product::{LifecycleStage, Product};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Money is whole yen. The original game never deals in sub-yen amounts.
pub type Money = i64;

/// Errors raised by entity-level operations and the orchestrator.
#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    /// A spend was attempted that exceeds the current balance.
    #[error("insufficient funds: {reason} requires {required} yen, {available} available")]
    InsufficientFunds {
        required: Money,
        available: Money,
        reason: String,
    },
    /// An operation was applied to an entity in a state that forbids it.
    #[error("invalid state transition: {0}")]
    InvalidTransition(String),
    /// A lookup key that should have been validated at load time was missing.
    #[error("unknown key: {0}")]
    UnknownKey(String),
    /// The company went bankrupt; the game is over.
    #[error("game over: {0}")]
    GameOver(String),
}

/// Result record returned by every player-facing action entry point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

impl From<Result<(), SimError>> for ActionOutcome {
    fn from(res: Result<(), SimError>) -> Self {
        match res {
            Ok(()) => ActionOutcome::ok(),
            Err(e) => ActionOutcome::fail(e.to_string()),
        }
    }
}
