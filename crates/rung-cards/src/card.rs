use crate::house::House;
use crate::number::Number;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub house: House,
    pub number: Number,
}

impl Card {
    pub const fn new(house: House, number: Number) -> Self {
        Self { house, number }
    }

    pub const fn is_of_house(self, house: House) -> bool {
        self.house as u8 == house as u8
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.number, self.house)
    }
}

/// Highest-numbered card of `house` among the candidates, if any.
pub fn strongest_card(cards: &[Card], house: House) -> Option<Card> {
    cards
        .iter()
        .copied()
        .filter(|card| card.house == house)
        .max_by(|a, b| a.number.cmp(&b.number))
}
