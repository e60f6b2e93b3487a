use super::session::{Game, NullHandPolicy};
use serde::{Deserialize, Serialize};

/// Round-boundary snapshot of a game: enough to rebuild an undealt game
/// with the same seed, null-hand policy, and standings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameSnapshot {
    pub seed: u64,
    pub wins: [u32; 4],
    pub hands_played: usize,
    pub null_hands: Vec<usize>,
}

impl GameSnapshot {
    pub fn capture(game: &Game) -> Self {
        GameSnapshot {
            seed: game.seed(),
            wins: *game.tally().standings(),
            hands_played: game.hands_played(),
            null_hands: game.null_hands().indices().to_vec(),
        }
    }

    /// Rebuilds a game at a round boundary: fresh undealt deck, seed
    /// re-applied, standings restored.
    pub fn restore(self) -> Game {
        let mut game =
            Game::with_seed_and_policy(self.seed, NullHandPolicy::at_indices(&self.null_hands));
        game.tally_mut().set_standings(self.wins);
        game
    }

    pub fn to_json(game: &Game) -> serde_json::Result<String> {
        let snapshot = Self::capture(game);
        serde_json::to_string_pretty(&snapshot)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
