//! Local score store and leaderboard
//!
//! Embodies the score-store contract the simulation hands its final score to:
//! player records keyed by a unique address, unique nicknames reserved at
//! creation, and best-score-only updates. Persisted to LocalStorage on web,
//! kept in memory on native. Every operation is best-effort from the
//! simulation's point of view; nothing here can stall or fail a run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default number of leaderboard rows
pub const DEFAULT_TOP_LIMIT: usize = 10;

/// A stored player record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Unique display name, reserved at creation
    pub nickname: String,
    /// Best score achieved; only ever replaced by a strictly greater one
    pub score: u32,
}

/// A leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub address: String,
    pub nickname: String,
    pub score: u32,
}

/// Outcome of a player-creation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    /// Fresh record created and nickname reserved
    Created,
    /// The address already has a record; nothing changed
    AlreadyExists,
    /// The nickname is reserved by a different address; nothing created
    NicknameTaken,
}

/// Player records and the leaderboard over them
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreBoard {
    /// Records keyed by address (BTreeMap for stable iteration)
    players: BTreeMap<String, PlayerRecord>,
    /// Nickname reservations: nickname -> owning address
    nicknames: BTreeMap<String, String>,
}

impl ScoreBoard {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "moon_dash_scores";

    /// Create an empty score board
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a player if it does not exist.
    ///
    /// The nickname is reserved before the record is written, so two addresses
    /// can never share a nickname even if creation is retried.
    pub fn create_player(&mut self, address: &str, nickname: &str) -> CreateOutcome {
        if self.players.contains_key(address) {
            return CreateOutcome::AlreadyExists;
        }
        if self.nicknames.contains_key(nickname) {
            return CreateOutcome::NicknameTaken;
        }

        self.nicknames
            .insert(nickname.to_string(), address.to_string());
        self.players.insert(
            address.to_string(),
            PlayerRecord {
                nickname: nickname.to_string(),
                score: 0,
            },
        );
        log::info!("created player {nickname} ({address})");
        CreateOutcome::Created
    }

    /// Look up a player by address
    pub fn get_player(&self, address: &str) -> Option<&PlayerRecord> {
        self.players.get(address)
    }

    /// Record a run's final score for a player.
    ///
    /// Stores only if strictly greater than the current best; returns whether
    /// anything was written. Unknown addresses are ignored (the handoff is
    /// fire-and-forget, so there is nothing to report back to the simulation).
    pub fn save_score(&mut self, address: &str, score: u32) -> bool {
        match self.players.get_mut(address) {
            Some(record) if score > record.score => {
                record.score = score;
                log::info!("score for {address} updated to {score}");
                true
            }
            Some(record) => {
                log::debug!(
                    "score {score} for {address} not stored (best is {})",
                    record.score
                );
                false
            }
            None => {
                log::warn!("score for unknown address {address} dropped");
                false
            }
        }
    }

    /// Top `limit` players, descending by score
    pub fn top_scores(&self, limit: usize) -> Vec<ScoreEntry> {
        let mut entries: Vec<ScoreEntry> = self
            .players
            .iter()
            .map(|(address, record)| ScoreEntry {
                address: address.clone(),
                nickname: record.nickname.clone(),
                score: record.score,
            })
            .collect();
        // Stable sort keeps address order among ties
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(limit);
        entries
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Load the board from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(board) = serde_json::from_str::<ScoreBoard>(&json) {
                    log::info!("loaded {} player records", board.players.len());
                    return board;
                }
            }
        }

        log::info!("no stored scores found, starting fresh");
        Self::new()
    }

    /// Save the board to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("scores saved ({} players)", self.players.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // In-memory only on native
    }
}
