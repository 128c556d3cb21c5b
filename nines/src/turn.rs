use serde::{Deserialize, Serialize};

use crate::{Card, DrawChoice, Hand, KeepChoice, Pile, Policy, RulesError, Slot, TableView};

/// What the active player did with the card they picked up.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TurnAction {
    TookDiscard { card: Card, slot: Slot },
    DrewAndKept { card: Card, slot: Slot },
    DrewAndDiscarded { card: Card },
}

/// Everything that happened in one turn, for announcements and
/// transcripts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub action: TurnAction,
    /// The card pushed onto the discard pile by a swap, if any.
    pub displaced: Option<Card>,
    /// Cards that left the grid as completed columns this turn.
    pub eliminated: Vec<Card>,
}

/// Flips one face-down card of the player's choosing during setup.
pub fn execute_reveal(
    hand: &mut Hand,
    policy: &mut dyn Policy,
    discard_top: Option<Card>,
    opponent_visible_scores: &[i32],
) -> Result<Slot, RulesError> {
    let slot = {
        let view = TableView {
            hand: &*hand,
            discard_top,
            opponent_visible_scores,
            someone_is_out: false,
        };
        policy.choose_reveal(&view)
    };
    hand.reveal_at(slot)?;
    Ok(slot)
}

/// Runs one complete turn for a single hand: pile choice, the keep
/// decision where it applies, the swap, and the elimination scan.
///
/// Cards from eliminated columns go onto the discard pile, so the total
/// card count across piles and hands never changes.
pub fn execute_turn(
    hand: &mut Hand,
    draw_pile: &mut Pile,
    discard_pile: &mut Pile,
    policy: &mut dyn Policy,
    opponent_visible_scores: &[i32],
    someone_is_out: bool,
) -> Result<TurnRecord, RulesError> {
    let choice = {
        let view = TableView {
            hand: &*hand,
            discard_top: discard_pile.top(),
            opponent_visible_scores,
            someone_is_out,
        };
        policy.choose_draw(&view)
    };
    let card = match choice {
        DrawChoice::FromDrawPile => draw_pile.draw()?,
        DrawChoice::FromDiscard => discard_pile.take()?,
    };

    // A discard take was made in the open; only a hidden draw leaves
    // the choice of throwing the card back.
    let keep = match choice {
        DrawChoice::FromDiscard => KeepChoice::Keep,
        DrawChoice::FromDrawPile => {
            let view = TableView {
                hand: &*hand,
                discard_top: discard_pile.top(),
                opponent_visible_scores,
                someone_is_out,
            };
            policy.keep_or_discard(card, &view)
        }
    };

    let (action, displaced) = match keep {
        KeepChoice::Discard => {
            discard_pile.push(card);
            (TurnAction::DrewAndDiscarded { card }, None)
        }
        KeepChoice::Keep => {
            let mut slot = {
                let view = TableView {
                    hand: &*hand,
                    discard_top: discard_pile.top(),
                    opponent_visible_scores,
                    someone_is_out,
                };
                policy.choose_placement(card, &view)
            };
            if hand.num_columns() == 1 {
                slot.col = 0;
            }
            let displaced = hand.swap_at(slot, card)?;
            discard_pile.push(displaced);
            let action = match choice {
                DrawChoice::FromDiscard => TurnAction::TookDiscard { card, slot },
                DrawChoice::FromDrawPile => TurnAction::DrewAndKept { card, slot },
            };
            (action, Some(displaced))
        }
    };

    let eliminated = hand.remove_completed_columns();
    for card in &eliminated {
        discard_pile.push(*card);
    }

    Ok(TurnRecord {
        action,
        displaced,
        eliminated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card;

    /// Plays back a fixed script of answers.
    struct ScriptedPolicy {
        draw: DrawChoice,
        keep: KeepChoice,
        slot: Slot,
    }

    impl Policy for ScriptedPolicy {
        fn choose_reveal(&mut self, _view: &TableView) -> Slot {
            self.slot
        }
        fn choose_draw(&mut self, _view: &TableView) -> DrawChoice {
            self.draw
        }
        fn keep_or_discard(&mut self, _card: Card, _view: &TableView) -> KeepChoice {
            self.keep
        }
        fn choose_placement(&mut self, _card: Card, _view: &TableView) -> Slot {
            self.slot
        }
    }

    fn starting_hand() -> Hand {
        Hand::from_columns(vec![
            [card!("2♦"), card!("9♥"), card!("K♠")],
            [card!("3♦"), card!("4♥"), card!("5♠")],
        ])
    }

    fn card_total(hand: &Hand, draw_pile: &Pile, discard_pile: &Pile) -> usize {
        hand.card_count() + draw_pile.len() + discard_pile.len()
    }

    #[test]
    fn taken_discard_is_swapped_and_the_displaced_card_surfaces() {
        let mut hand = starting_hand();
        let mut draw_pile = Pile::from_cards(vec![card!("6♦")]);
        let mut discard_pile = Pile::new();
        discard_pile.push(card!("A♣").revealed());
        let slot = Slot { col: 0, row: 1 };
        let mut policy = ScriptedPolicy {
            draw: DrawChoice::FromDiscard,
            keep: KeepChoice::Discard, // must be ignored for discard takes
            slot,
        };
        let before = card_total(&hand, &draw_pile, &discard_pile);

        let record = execute_turn(&mut hand, &mut draw_pile, &mut discard_pile, &mut policy, &[0], false)
            .unwrap();

        assert_eq!(
            record.action,
            TurnAction::TookDiscard { card: card!("A♣").revealed(), slot }
        );
        // The kept card sits in the requested cell, face-up.
        let placed = hand.get(slot).unwrap();
        assert_eq!(placed.rank, crate::Rank::Ace);
        assert!(placed.is_face_up());
        // The displaced card is on top of the discard pile, face-up.
        let top = discard_pile.top().unwrap();
        assert_eq!(top.rank, crate::Rank::Nine);
        assert!(top.is_face_up());
        assert_eq!(record.displaced, Some(top));
        assert_eq!(card_total(&hand, &draw_pile, &discard_pile), before);
    }

    #[test]
    fn rejected_draw_goes_straight_to_the_discard_pile() {
        let mut hand = starting_hand();
        let mut draw_pile = Pile::from_cards(vec![card!("Q♦")]);
        let mut discard_pile = Pile::new();
        discard_pile.push(card!("A♣").revealed());
        let mut policy = ScriptedPolicy {
            draw: DrawChoice::FromDrawPile,
            keep: KeepChoice::Discard,
            slot: Slot { col: 0, row: 0 },
        };

        let record = execute_turn(&mut hand, &mut draw_pile, &mut discard_pile, &mut policy, &[0], false)
            .unwrap();

        assert!(matches!(record.action, TurnAction::DrewAndDiscarded { .. }));
        assert_eq!(record.displaced, None);
        let top = discard_pile.top().unwrap();
        assert_eq!(top.rank, crate::Rank::Queen);
        assert!(top.is_face_up());
        assert_eq!(hand, starting_hand());
    }

    #[test]
    fn completing_a_column_clears_it_onto_the_discard_pile() {
        let mut hand = Hand::from_columns(vec![
            [
                card!("7♦").revealed(),
                card!("7♣").revealed(),
                card!("2♠").revealed(),
            ],
            [card!("3♦"), card!("4♥"), card!("5♠")],
        ]);
        let mut draw_pile = Pile::from_cards(vec![card!("7♥")]);
        let mut discard_pile = Pile::new();
        discard_pile.push(card!("A♣").revealed());
        let mut policy = ScriptedPolicy {
            draw: DrawChoice::FromDrawPile,
            keep: KeepChoice::Keep,
            slot: Slot { col: 0, row: 2 },
        };
        let before = card_total(&hand, &draw_pile, &discard_pile);

        let record = execute_turn(&mut hand, &mut draw_pile, &mut discard_pile, &mut policy, &[0], false)
            .unwrap();

        assert_eq!(record.eliminated.len(), 3);
        assert!(record.eliminated.iter().all(|c| c.rank == crate::Rank::Seven));
        assert_eq!(hand.num_columns(), 1);
        assert_eq!(card_total(&hand, &draw_pile, &discard_pile), before);
    }

    #[test]
    fn single_column_placement_is_forced_into_that_column() {
        let mut hand = Hand::from_columns(vec![[card!("2♦"), card!("9♥"), card!("K♠")]]);
        let mut draw_pile = Pile::from_cards(vec![card!("A♦")]);
        let mut discard_pile = Pile::new();
        discard_pile.push(card!("4♣").revealed());
        let mut policy = ScriptedPolicy {
            draw: DrawChoice::FromDrawPile,
            keep: KeepChoice::Keep,
            // A stale column index; the engine must clamp it.
            slot: Slot { col: 2, row: 1 },
        };

        let record = execute_turn(&mut hand, &mut draw_pile, &mut discard_pile, &mut policy, &[0], false)
            .unwrap();

        assert!(matches!(
            record.action,
            TurnAction::DrewAndKept { slot: Slot { col: 0, row: 1 }, .. }
        ));
        assert_eq!(hand.get(Slot { col: 0, row: 1 }).unwrap().rank, crate::Rank::Ace);
    }

    #[test]
    fn drawing_from_an_empty_pile_is_fatal() {
        let mut hand = starting_hand();
        let mut draw_pile = Pile::new();
        let mut discard_pile = Pile::new();
        discard_pile.push(card!("A♣").revealed());
        let mut policy = ScriptedPolicy {
            draw: DrawChoice::FromDrawPile,
            keep: KeepChoice::Discard,
            slot: Slot { col: 0, row: 0 },
        };
        let err = execute_turn(&mut hand, &mut draw_pile, &mut discard_pile, &mut policy, &[0], false)
            .unwrap_err();
        assert_eq!(err, RulesError::PileExhausted);
    }
}
