#![deny(warnings)]
pub mod card;
pub mod house;
pub mod number;

pub use card::{Card, strongest_card};
pub use house::House;
pub use number::Number;
