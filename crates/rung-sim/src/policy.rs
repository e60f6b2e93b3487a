use rung_cards::{Card, House, strongest_card};

/// Driver-side throw chooser. The engine only evaluates committed throws;
/// suit following is the driver's job, and this policy follows the lead
/// house whenever the hand allows it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThrowPolicy;

impl ThrowPolicy {
    /// Index to lead with: the strongest card of the preferred house when
    /// held, otherwise the strongest card overall.
    pub fn lead_index(&self, hand: &[Card], preferred: Option<House>) -> usize {
        if let Some(house) = preferred {
            if let Some(best) = strongest_card(hand, house) {
                return hand
                    .iter()
                    .position(|card| *card == best)
                    .unwrap_or(0);
            }
        }
        hand.iter()
            .enumerate()
            .max_by_key(|(_, card)| card.number)
            .map(|(index, _)| index)
            .unwrap_or(0)
    }

    /// Index to follow with: the first card of the lead house, or the first
    /// card in hand as a discard when void.
    pub fn follow_index(&self, hand: &[Card], lead: House) -> usize {
        hand.iter()
            .position(|card| card.house == lead)
            .unwrap_or(0)
    }
}
