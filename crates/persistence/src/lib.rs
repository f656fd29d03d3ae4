#![deny(warnings)]

//! Save/load of the complete game state.
//!
//! Saves carry the hidden document fields intact; the projection boundary
//! is the snapshot, not the save file. Two encodings are supported: JSON
//! for anything a human might inspect, bincode for compact saves.

use serde::{Deserialize, Serialize};
use sim_runtime::Game;
use thiserror::Error;

/// Bump when the save layout changes incompatibly.
pub const SAVE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("unsupported save format version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("bincode: {0}")]
    Bincode(#[from] bincode::Error),
}

/// Versioned wrapper around the full game state.
#[derive(Serialize, Deserialize)]
pub struct SaveGame {
    pub version: u32,
    pub game: Game,
}

impl SaveGame {
    pub fn wrap(game: Game) -> Self {
        Self {
            version: SAVE_FORMAT_VERSION,
            game,
        }
    }

    fn check_version(self) -> Result<Game, SaveError> {
        if self.version != SAVE_FORMAT_VERSION {
            return Err(SaveError::UnsupportedVersion {
                found: self.version,
                supported: SAVE_FORMAT_VERSION,
            });
        }
        Ok(self.game)
    }
}

pub fn to_json(game: &Game) -> Result<String, SaveError> {
    let save = SaveGame {
        version: SAVE_FORMAT_VERSION,
        game: game.clone(),
    };
    Ok(serde_json::to_string_pretty(&save)?)
}

pub fn from_json(data: &str) -> Result<Game, SaveError> {
    let save: SaveGame = serde_json::from_str(data)?;
    save.check_version()
}

pub fn to_bincode(game: &Game) -> Result<Vec<u8>, SaveError> {
    let save = SaveGame {
        version: SAVE_FORMAT_VERSION,
        game: game.clone(),
    };
    Ok(bincode::serialize(&save)?)
}

pub fn from_bincode(data: &[u8]) -> Result<Game, SaveError> {
    let save: SaveGame = bincode::deserialize(data)?;
    save.check_version()
}
