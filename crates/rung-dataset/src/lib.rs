//! Query helpers over a dealt game: locate the player holding a specific
//! card. Driver and test convenience only; the engine never depends on
//! these at runtime.
#![deny(warnings)]

use rung_cards::{Card, House, Number};
use rung_core::game::session::Game;
use rung_core::model::player::Player;
use std::sync::Arc;

/// The player holding `card` and the card's index in their hand.
pub fn holder_of(game: &Game, card: Card) -> Option<(Arc<Player>, usize)> {
    game.players().iter().find_map(|player| {
        player
            .cards_at_hand()
            .iter()
            .position(|c| *c == card)
            .map(|index| (Arc::clone(player), index))
    })
}

/// Every player not holding `card`, in seating order.
pub fn players_without(game: &Game, card: Card) -> Vec<Arc<Player>> {
    game.players()
        .iter()
        .filter(|player| !player.cards_at_hand().contains(&card))
        .map(Arc::clone)
        .collect()
}

pub fn two_of_clubs_holder(game: &Game) -> Option<(Arc<Player>, usize)> {
    holder_of(game, Card::new(House::Club, Number::Two))
}

pub fn without_two_of_clubs(game: &Game) -> Vec<Arc<Player>> {
    players_without(game, Card::new(House::Club, Number::Two))
}

pub fn ace_of_spades_holder(game: &Game) -> Option<(Arc<Player>, usize)> {
    holder_of(game, Card::new(House::Spade, Number::Ace))
}

pub fn without_ace_of_spades(game: &Game) -> Vec<Arc<Player>> {
    players_without(game, Card::new(House::Spade, Number::Ace))
}
