use crate::model::seat::Seat;

/// Per-hand win counts, indexed by seat. Full-round scoring lives with
/// the embedding driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinTally {
    wins: [u32; 4],
}

impl WinTally {
    pub const fn new() -> Self {
        Self { wins: [0; 4] }
    }

    pub fn record_win(&mut self, seat: Seat) {
        self.wins[seat.index()] += 1;
    }

    pub fn wins_for(&self, seat: Seat) -> u32 {
        self.wins[seat.index()]
    }

    pub fn standings(&self) -> &[u32; 4] {
        &self.wins
    }

    pub fn set_standings(&mut self, wins: [u32; 4]) {
        self.wins = wins;
    }

    pub fn total(&self) -> u32 {
        self.wins.iter().sum()
    }

    pub fn leading_seat(&self) -> Seat {
        Seat::LOOP
            .iter()
            .copied()
            .max_by_key(|seat| self.wins_for(*seat))
            .unwrap_or(Seat::South)
    }
}

impl Default for WinTally {
    fn default() -> Self {
        Self::new()
    }
}
