use crate::model::seat::Seat;
use rung_cards::Card;
use std::fmt;

/// One committed throw: which seat played which card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throw {
    pub seat: Seat,
    pub card: Card,
}

/// Immutable result of one resolved trick: the four throws in
/// seating-throw order and the winning seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandOutcome {
    throws: [Throw; 4],
    head: Option<Seat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeError {
    Unresolved,
}

impl fmt::Display for OutcomeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeError::Unresolved => write!(f, "hand outcome queried before resolution"),
        }
    }
}

impl std::error::Error for OutcomeError {}

impl HandOutcome {
    pub(crate) fn new(throws: [Throw; 4], head: Seat) -> Self {
        Self {
            throws,
            head: Some(head),
        }
    }

    #[cfg(test)]
    pub(crate) fn unresolved(throws: [Throw; 4]) -> Self {
        Self { throws, head: None }
    }

    /// The four cards in throw order.
    pub fn cards(&self) -> [Card; 4] {
        self.throws.map(|throw| throw.card)
    }

    pub fn throws(&self) -> &[Throw; 4] {
        &self.throws
    }

    pub fn head(&self) -> Result<Seat, OutcomeError> {
        self.head.ok_or(OutcomeError::Unresolved)
    }

    pub fn has_card(&self, card: Card) -> bool {
        self.throws.iter().any(|throw| throw.card == card)
    }

    pub fn is_resolved(&self) -> bool {
        self.head.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{HandOutcome, OutcomeError, Throw};
    use crate::model::seat::Seat;
    use rung_cards::{Card, House, Number};

    fn sample_throws() -> [Throw; 4] {
        let mut throws = [Throw {
            seat: Seat::South,
            card: Card::new(House::Club, Number::Two),
        }; 4];
        for (i, seat) in Seat::order_from(Seat::South).iter().enumerate() {
            throws[i] = Throw {
                seat: *seat,
                card: Card::new(House::Club, Number::ORDERED[i]),
            };
        }
        throws
    }

    #[test]
    fn cards_preserve_throw_order() {
        let outcome = HandOutcome::new(sample_throws(), Seat::East);
        let cards = outcome.cards();
        assert_eq!(cards[0], Card::new(House::Club, Number::Two));
        assert_eq!(cards[3], Card::new(House::Club, Number::Five));
    }

    #[test]
    fn head_of_resolved_outcome() {
        let outcome = HandOutcome::new(sample_throws(), Seat::East);
        assert!(outcome.is_resolved());
        assert_eq!(outcome.head().unwrap(), Seat::East);
    }

    #[test]
    fn head_before_resolution_fails() {
        let outcome = HandOutcome::unresolved(sample_throws());
        assert!(!outcome.is_resolved());
        assert_eq!(outcome.head(), Err(OutcomeError::Unresolved));
    }

    #[test]
    fn has_card_checks_all_four() {
        let outcome = HandOutcome::new(sample_throws(), Seat::East);
        assert!(outcome.has_card(Card::new(House::Club, Number::Three)));
        assert!(!outcome.has_card(Card::new(House::Spade, Number::Three)));
    }
}
