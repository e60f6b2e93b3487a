use crate::model::seat::Seat;
use parking_lot::RwLock;
use rung_cards::{Card, House};
use std::fmt;

/// One player's private state: a hand in receipt order and a single table
/// slot for the pending thrown card. Guarded by one lock per player so any
/// number of callers may operate concurrently without contending with other
/// players.
#[derive(Debug)]
pub struct Player {
    seat: Seat,
    state: RwLock<PlayerState>,
}

#[derive(Debug, Default)]
struct PlayerState {
    hand: Vec<Card>,
    table: Option<Card>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerError {
    Duplicate(Card),
    OutOfRange { index: usize, len: usize },
    NoneOfHouse(House),
}

impl fmt::Display for PlayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerError::Duplicate(card) => write!(f, "{card} is already at hand"),
            PlayerError::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for hand of {len} cards")
            }
            PlayerError::NoneOfHouse(house) => {
                write!(f, "no card of house {house} at hand")
            }
        }
    }
}

impl std::error::Error for PlayerError {}

impl Player {
    pub fn new(seat: Seat) -> Self {
        Self {
            seat,
            state: RwLock::new(PlayerState::default()),
        }
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    /// Snapshot of the hand in receipt order.
    pub fn cards_at_hand(&self) -> Vec<Card> {
        self.state.read().hand.clone()
    }

    pub fn hand_len(&self) -> usize {
        self.state.read().hand.len()
    }

    pub fn receive_card(&self, card: Card) -> Result<(), PlayerError> {
        let mut state = self.state.write();
        if state.hand.contains(&card) {
            return Err(PlayerError::Duplicate(card));
        }
        state.hand.push(card);
        Ok(())
    }

    /// Removes and returns the hand card at `index`.
    pub fn draw_card(&self, index: usize) -> Result<Card, PlayerError> {
        let mut state = self.state.write();
        if index >= state.hand.len() {
            return Err(PlayerError::OutOfRange {
                index,
                len: state.hand.len(),
            });
        }
        Ok(state.hand.remove(index))
    }

    /// Moves the hand card at `index` into the table slot. A card already on
    /// the table returns to the hand, so no card is ever lost.
    pub fn throw_card(&self, index: usize) -> Result<(), PlayerError> {
        let mut state = self.state.write();
        if index >= state.hand.len() {
            return Err(PlayerError::OutOfRange {
                index,
                len: state.hand.len(),
            });
        }
        let card = state.hand.remove(index);
        if let Some(previous) = state.table.replace(card) {
            state.hand.push(previous);
        }
        Ok(())
    }

    /// The pending thrown card, without removing it.
    pub fn card_on_table(&self) -> Option<Card> {
        self.state.read().table
    }

    /// Empties the table slot. The game collects resolved tricks with this.
    pub(crate) fn take_from_table(&self) -> Option<Card> {
        self.state.write().table.take()
    }

    pub fn has_house(&self, house: House) -> bool {
        self.state.read().hand.iter().any(|c| c.house == house)
    }

    /// First hand card of `house` and its index, in hand order.
    pub fn any_of_house(&self, house: House) -> Result<(Card, usize), PlayerError> {
        let state = self.state.read();
        state
            .hand
            .iter()
            .position(|c| c.house == house)
            .map(|i| (state.hand[i], i))
            .ok_or(PlayerError::NoneOfHouse(house))
    }

    pub fn any_spade(&self) -> Result<(Card, usize), PlayerError> {
        self.any_of_house(House::Spade)
    }

    pub fn any_heart(&self) -> Result<(Card, usize), PlayerError> {
        self.any_of_house(House::Heart)
    }

    pub fn any_club(&self) -> Result<(Card, usize), PlayerError> {
        self.any_of_house(House::Club)
    }

    pub fn any_diamond(&self) -> Result<(Card, usize), PlayerError> {
        self.any_of_house(House::Diamond)
    }
}

#[cfg(test)]
mod tests {
    use super::{Player, PlayerError};
    use crate::model::seat::Seat;
    use rung_cards::{Card, House, Number};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn new_player_has_identity_and_empty_hand() {
        let player = Player::new(Seat::South);
        assert_eq!(player.seat(), Seat::South);
        assert!(player.cards_at_hand().is_empty());
        assert_eq!(player.card_on_table(), None);
    }

    #[test]
    fn receive_rejects_duplicate() {
        let player = Player::new(Seat::South);
        let card = Card::new(House::Spade, Number::Ace);
        player.receive_card(card).unwrap();
        assert!(matches!(
            player.receive_card(card),
            Err(PlayerError::Duplicate(c)) if c == card
        ));
        assert_eq!(player.hand_len(), 1);
    }

    #[test]
    fn draw_out_of_range_fails() {
        let player = Player::new(Seat::South);
        assert!(matches!(
            player.draw_card(15),
            Err(PlayerError::OutOfRange { index: 15, len: 0 })
        ));
    }

    #[test]
    fn throw_moves_card_to_table() {
        let player = Player::new(Seat::West);
        let card = Card::new(House::Club, Number::Two);
        player.receive_card(card).unwrap();
        player.throw_card(0).unwrap();
        assert_eq!(player.card_on_table(), Some(card));
        assert_eq!(player.hand_len(), 0);
    }

    #[test]
    fn rethrow_returns_prior_table_card_to_hand() {
        let player = Player::new(Seat::West);
        let first = Card::new(House::Club, Number::Two);
        let second = Card::new(House::Club, Number::Three);
        player.receive_card(first).unwrap();
        player.receive_card(second).unwrap();
        player.throw_card(0).unwrap();
        player.throw_card(0).unwrap();
        assert_eq!(player.card_on_table(), Some(second));
        assert_eq!(player.cards_at_hand(), vec![first]);
    }

    #[test]
    fn has_house_checks_hand() {
        let player = Player::new(Seat::North);
        player
            .receive_card(Card::new(House::Spade, Number::Ace))
            .unwrap();
        player
            .receive_card(Card::new(House::Club, Number::Ace))
            .unwrap();
        player
            .receive_card(Card::new(House::Diamond, Number::Ace))
            .unwrap();
        assert!(player.has_house(House::Spade));
        assert!(player.has_house(House::Club));
        assert!(player.has_house(House::Diamond));
        assert!(!player.has_house(House::Heart));
    }

    #[test]
    fn any_of_house_returns_first_in_hand_order() {
        let player = Player::new(Seat::East);
        player
            .receive_card(Card::new(House::Heart, Number::King))
            .unwrap();
        player
            .receive_card(Card::new(House::Spade, Number::Two))
            .unwrap();
        player
            .receive_card(Card::new(House::Spade, Number::Ace))
            .unwrap();
        let (card, index) = player.any_spade().unwrap();
        assert_eq!(card, Card::new(House::Spade, Number::Two));
        assert_eq!(index, 1);
        assert!(matches!(
            player.any_diamond(),
            Err(PlayerError::NoneOfHouse(House::Diamond))
        ));
    }

    #[test]
    fn concurrent_throws_and_reads_stay_consistent() {
        let p1 = Arc::new(Player::new(Seat::South));
        let p2 = Arc::new(Player::new(Seat::West));
        for number in Number::ORDERED {
            p1.receive_card(Card::new(House::Spade, number)).unwrap();
            p2.receive_card(Card::new(House::Heart, number)).unwrap();
        }

        let mut handles = Vec::new();
        for _ in 0..10 {
            let a = Arc::clone(&p1);
            let b = Arc::clone(&p2);
            handles.push(thread::spawn(move || {
                a.throw_card(0).unwrap();
                let _ = b.card_on_table();
                b.throw_card(0).unwrap();
                let _ = a.cards_at_hand();
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        for player in [&p1, &p2] {
            assert!(player.card_on_table().is_some());
            assert_eq!(player.hand_len(), 12);
        }
    }
}
