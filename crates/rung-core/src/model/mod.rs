pub mod deck;
pub mod outcome;
pub mod player;
pub mod seat;
pub mod tally;
