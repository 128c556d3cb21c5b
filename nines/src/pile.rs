use crate::{Card, RulesError};

/// An ordered stack of cards. The end of the backing vector is the top.
///
/// The same type serves as the face-down draw pile (consumed with
/// [`Pile::draw`], which reveals the card to its taker) and the face-up
/// discard pile (consumed with [`Pile::take`], pushed with [`Pile::push`]).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Pile {
    cards: Vec<Card>,
}

impl Pile {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Pops the top card and turns it face-up.
    ///
    /// An empty pile is an engine bug, not a game event: play assumes
    /// both piles stay non-empty for the whole run.
    pub fn draw(&mut self) -> Result<Card, RulesError> {
        let mut card = self.cards.pop().ok_or(RulesError::PileExhausted)?;
        card.turn_face_up();
        Ok(card)
    }

    /// Pops the top card as-is. Discard-pile cards are already face-up.
    pub fn take(&mut self) -> Result<Card, RulesError> {
        self.cards.pop().ok_or(RulesError::PileExhausted)
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn top(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card;

    #[test]
    fn draw_reveals_the_top_card() {
        let mut pile = Pile::from_cards(vec![card!("2♦"), card!("K♠")]);
        let card = pile.draw().unwrap();
        assert!(card.is_face_up());
        assert_eq!(card.rank, crate::Rank::King);
        assert_eq!(pile.len(), 1);
    }

    #[test]
    fn take_preserves_facing() {
        let mut pile = Pile::new();
        pile.push(card!("7♥").revealed());
        pile.push(card!("3♣"));
        assert!(!pile.take().unwrap().is_face_up());
        assert!(pile.take().unwrap().is_face_up());
    }

    #[test]
    fn exhaustion_is_an_error() {
        let mut pile = Pile::new();
        assert_eq!(pile.draw(), Err(RulesError::PileExhausted));
        assert_eq!(pile.take(), Err(RulesError::PileExhausted));
    }
}
