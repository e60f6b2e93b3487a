use rand::seq::SliceRandom;
use rung_cards::{Card, House, Number};
use std::fmt;

pub const FULL_DECK: usize = 52;

/// Ordered pool of unique cards. A fresh deck holds all 52 combinations
/// in deterministic order (houses in `House::ALL`, numbers ascending).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckError {
    OutOfRange { index: usize, len: usize },
    InvalidRange { start: usize, end: usize, len: usize },
    Duplicate(Card),
    Incomplete { len: usize },
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckError::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for deck of {len} cards")
            }
            DeckError::InvalidRange { start, end, len } => {
                write!(f, "range {start}..={end} invalid for deck of {len} cards")
            }
            DeckError::Duplicate(card) => write!(f, "{card} is already in the deck"),
            DeckError::Incomplete { len } => {
                write!(f, "deck holds {len} of {FULL_DECK} cards")
            }
        }
    }
}

impl std::error::Error for DeckError {}

impl Deck {
    pub fn new() -> Self {
        let mut cards = Vec::with_capacity(FULL_DECK);
        for house in House::ALL.iter().copied() {
            for number in Number::ORDERED.iter().copied() {
                cards.push(Card::new(house, number));
            }
        }
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.cards.len() == FULL_DECK
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Removes and returns the card at `index` in the current ordering.
    pub fn draw(&mut self, index: usize) -> Result<Card, DeckError> {
        if index >= self.cards.len() {
            return Err(DeckError::OutOfRange {
                index,
                len: self.cards.len(),
            });
        }
        Ok(self.cards.remove(index))
    }

    /// Removes and returns the inclusive range `start..=end`, in order.
    /// Validated before any mutation; a failed call leaves the deck untouched.
    pub fn draw_range(&mut self, start: usize, end: usize) -> Result<Vec<Card>, DeckError> {
        if start > end || end >= self.cards.len() {
            return Err(DeckError::InvalidRange {
                start,
                end,
                len: self.cards.len(),
            });
        }
        Ok(self.cards.drain(start..=end).collect())
    }

    pub fn put(&mut self, card: Card) -> Result<(), DeckError> {
        if self.contains(card) {
            return Err(DeckError::Duplicate(card));
        }
        self.cards.push(card);
        Ok(())
    }

    /// All-or-nothing bulk reinsert: if any card is already present (or the
    /// batch itself repeats a card), nothing is inserted.
    pub fn put_all(&mut self, cards: &[Card]) -> Result<(), DeckError> {
        for (i, card) in cards.iter().enumerate() {
            if self.contains(*card) || cards[..i].contains(card) {
                return Err(DeckError::Duplicate(*card));
            }
        }
        self.cards.extend_from_slice(cards);
        Ok(())
    }

    /// Randomly permutes the deck, repeating the pass `iterations` times.
    /// Only a full 52-card deck may be shuffled; a partially drawn deck
    /// would bias subsequent dealing.
    pub fn shuffle<R: rand::Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        iterations: usize,
    ) -> Result<(), DeckError> {
        if !self.is_full() {
            return Err(DeckError::Incomplete {
                len: self.cards.len(),
            });
        }
        for _ in 0..iterations {
            self.cards.shuffle(rng);
        }
        Ok(())
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
