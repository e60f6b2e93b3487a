use crate::model::deck::{Deck, DeckError};
use crate::model::outcome::{HandOutcome, Throw};
use crate::model::player::{Player, PlayerError};
use crate::model::seat::Seat;
use crate::model::tally::WinTally;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rung_cards::{Card, House, Number, strongest_card};
use std::fmt;
use std::sync::Arc;

pub const HANDS_PER_ROUND: usize = 13;

/// Which trick indices resolve without counting toward the tally.
/// Supplied at game construction; the observed convention leaves the
/// penultimate trick of a 13-trick round uncounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NullHandPolicy {
    indices: Vec<usize>,
}

impl NullHandPolicy {
    pub fn at_indices(indices: &[usize]) -> Self {
        Self {
            indices: indices.to_vec(),
        }
    }

    pub fn none() -> Self {
        Self {
            indices: Vec::new(),
        }
    }

    pub fn is_null(&self, hand_index: usize) -> bool {
        self.indices.contains(&hand_index)
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

impl Default for NullHandPolicy {
    fn default() -> Self {
        Self { indices: vec![11] }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    Deck(DeckError),
    Player(PlayerError),
    IncompleteHand { thrown: usize },
    MissingTwoOfClubs,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Deck(err) => write!(f, "deck: {err}"),
            GameError::Player(err) => write!(f, "player: {err}"),
            GameError::IncompleteHand { thrown } => {
                write!(f, "only {thrown} of 4 cards thrown for this hand")
            }
            GameError::MissingTwoOfClubs => {
                write!(f, "first hand must include the two of clubs")
            }
        }
    }
}

impl std::error::Error for GameError {}

impl From<DeckError> for GameError {
    fn from(err: DeckError) -> Self {
        GameError::Deck(err)
    }
}

impl From<PlayerError> for GameError {
    fn from(err: PlayerError) -> Self {
        GameError::Player(err)
    }
}

/// One table of Rung: a deck, four seated players, and the running
/// win tally. Trick-by-trick play is serialized by the caller; the
/// players themselves tolerate concurrent access.
#[derive(Debug)]
pub struct Game {
    deck: Deck,
    players: [Arc<Player>; 4],
    tally: WinTally,
    history: Vec<HandOutcome>,
    null_hands: NullHandPolicy,
    rng: StdRng,
    seed: u64,
}

impl Game {
    pub fn new() -> Self {
        let seed: u64 = rand::random();
        Self::with_seed(seed)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_seed_and_policy(seed, NullHandPolicy::default())
    }

    pub fn with_seed_and_policy(seed: u64, null_hands: NullHandPolicy) -> Self {
        Self {
            deck: Deck::new(),
            players: Seat::LOOP.map(|seat| Arc::new(Player::new(seat))),
            tally: WinTally::new(),
            history: Vec::new(),
            null_hands,
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn players(&self) -> &[Arc<Player>; 4] {
        &self.players
    }

    pub fn player(&self, seat: Seat) -> &Arc<Player> {
        &self.players[seat.index()]
    }

    pub fn tally(&self) -> &WinTally {
        &self.tally
    }

    pub fn tally_mut(&mut self) -> &mut WinTally {
        &mut self.tally
    }

    pub fn null_hands(&self) -> &NullHandPolicy {
        &self.null_hands
    }

    pub fn history(&self) -> &[HandOutcome] {
        &self.history
    }

    pub fn hands_played(&self) -> usize {
        self.history.len()
    }

    /// Optional pre-deal shuffle; omitting it deals in deterministic
    /// deck order.
    pub fn shuffle_deck(&mut self, iterations: usize) -> Result<(), GameError> {
        self.deck.shuffle(&mut self.rng, iterations)?;
        Ok(())
    }

    /// Deals 13 cards to each player round-robin in seating order,
    /// draining the deck completely. Requires the full 52-card deck.
    pub fn distribute_cards(&mut self) -> Result<(), GameError> {
        if !self.deck.is_full() {
            return Err(GameError::Deck(DeckError::Incomplete {
                len: self.deck.len(),
            }));
        }
        for _ in 0..HANDS_PER_ROUND {
            let batch = self.deck.draw_range(0, 3)?;
            for (card, player) in batch.into_iter().zip(self.players.iter()) {
                player.receive_card(card)?;
            }
        }
        Ok(())
    }

    /// Resolves one trick from the four committed table cards.
    ///
    /// Collection starts at the leader and proceeds in seating order; the
    /// lead house is the house of the first collected card. With `trump` set
    /// and at least one trump card thrown, the strongest trump card wins;
    /// otherwise the strongest card of the lead house wins. When both
    /// `trump` and `leader` are unset on hand 0, the trick must include the
    /// two of clubs and its thrower is taken as the leader. Suit-following
    /// legality of the throws themselves is the driver's concern.
    pub fn play_hand(
        &mut self,
        hand_index: usize,
        trump: Option<House>,
        leader: Option<Seat>,
    ) -> Result<HandOutcome, GameError> {
        let mut table: [Option<Card>; 4] = [None; 4];
        let mut thrown = 0;
        for player in &self.players {
            let card = player.card_on_table();
            if card.is_some() {
                thrown += 1;
            }
            table[player.seat().index()] = card;
        }
        if thrown < 4 {
            return Err(GameError::IncompleteHand { thrown });
        }

        let two_of_clubs = Card::new(House::Club, Number::Two);
        let leader = match leader {
            Some(seat) => seat,
            None if hand_index == 0 && trump.is_none() => Seat::LOOP
                .iter()
                .copied()
                .find(|seat| table[seat.index()] == Some(two_of_clubs))
                .ok_or(GameError::MissingTwoOfClubs)?,
            None => Seat::LOOP[0],
        };

        let mut throws = [Throw {
            seat: leader,
            card: two_of_clubs,
        }; 4];
        for (slot, seat) in throws.iter_mut().zip(Seat::order_from(leader)) {
            match table[seat.index()] {
                Some(card) => *slot = Throw { seat, card },
                None => return Err(GameError::IncompleteHand { thrown }),
            }
        }

        let cards = throws.map(|throw| throw.card);
        let lead_house = throws[0].card.house;
        let best = trump
            .and_then(|house| strongest_card(&cards, house))
            .or_else(|| strongest_card(&cards, lead_house))
            .expect("lead house always matches the first throw");
        let head = throws
            .iter()
            .find(|throw| throw.card == best)
            .map(|throw| throw.seat)
            .expect("winning card comes from a throw");

        if !self.null_hands.is_null(hand_index) {
            self.tally.record_win(head);
        }
        for player in &self.players {
            let _ = player.take_from_table();
        }

        let outcome = HandOutcome::new(throws, head);
        self.history.push(outcome.clone());
        Ok(outcome)
    }

    /// Count of thrown-but-unresolved cards across all players.
    pub fn hands_on_ground(&self) -> usize {
        self.players
            .iter()
            .filter(|player| player.card_on_table().is_some())
            .count()
    }

    /// Counted (non-null) tricks won by `seat` so far.
    pub fn hands_won_by(&self, seat: Seat) -> u32 {
        self.tally.wins_for(seat)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
