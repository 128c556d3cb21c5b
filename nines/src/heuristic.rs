use tracing::debug;

use crate::{
    mean_point_value, Card, DrawChoice, Hand, KeepChoice, Policy, Rank, Slot, TableView, ROWS,
};

/// The built-in computer player.
///
/// Value estimates treat every face-down card, own or drawn, as being
/// worth the mean point value across the thirteen ranks. Decisions
/// weigh that estimate against what the opponents already show face-up.
pub struct HeuristicPolicy {
    mean_value: f64,
}

/// What taking a candidate card would accomplish.
enum Assessment {
    /// The card does not improve the hand.
    Unwanted,
    /// A column already shows a pair of the card's rank; taking the card
    /// finishes the three-of-a-kind and clears the column.
    CompletesTriple,
    /// The card is cheaper than what sits in these slots.
    Replaces(Vec<Slot>),
}

impl HeuristicPolicy {
    pub fn new() -> Self {
        Self {
            mean_value: mean_point_value(),
        }
    }

    fn expected_value(&self, card: Card) -> f64 {
        if card.is_face_up() {
            f64::from(card.point_value())
        } else {
            self.mean_value
        }
    }

    fn column_expected_sum(&self, column: &[Card; ROWS]) -> f64 {
        column.iter().map(|&c| self.expected_value(c)).sum()
    }

    fn assess(&self, card: Card, from_discard: bool, view: &TableView) -> Assessment {
        let hand = view.hand;
        let value = card.point_value();
        let rival_score = view
            .opponent_visible_scores
            .iter()
            .copied()
            .min()
            .unwrap_or(i32::MAX);

        let pair_columns: Vec<&[Card; ROWS]> = hand
            .columns()
            .filter(|column| face_up_count_of_rank(column, card.rank) >= 2)
            .collect();
        if !pair_columns.is_empty() {
            let wanted = hand.face_down_count() < 2
                || view.someone_is_out
                || pair_columns
                    .iter()
                    .any(|column| column.iter().all(|c| c.is_face_up()))
                || hand.visible_score() - 2 * value < rival_score;
            return if wanted {
                Assessment::CompletesTriple
            } else {
                Assessment::Unwanted
            };
        }

        // A visible high card is never worth taking off the discard
        // pile: the unseen draw card is cheaper in expectation.
        if from_discard && f64::from(value) > self.mean_value {
            return Assessment::Unwanted;
        }

        let mut slots = Vec::new();
        for slot in hand.slots() {
            let Some(existing) = hand.get(slot) else {
                continue;
            };
            if self.expected_value(existing) <= f64::from(value) {
                continue;
            }
            // Swapping out an unseen card burns information, so it is
            // only considered while enough of the hand is still hidden,
            // or once the endgame has started, or when doing so keeps
            // this hand ahead of the best-looking opponent.
            let replaceable = existing.is_face_up()
                || hand.face_down_count() >= 2
                || view.someone_is_out
                || hand.visible_score() + value < rival_score;
            if replaceable {
                slots.push(slot);
            }
        }
        if slots.is_empty() {
            Assessment::Unwanted
        } else {
            Assessment::Replaces(slots)
        }
    }

    fn eligible_slots(&self, card: Card, view: &TableView) -> Vec<Slot> {
        let hand = view.hand;
        match self.assess(card, false, view) {
            Assessment::CompletesTriple => hand
                .slots()
                .filter(|&slot| {
                    let in_pair_column = hand
                        .column(slot.col)
                        .map(|column| face_up_count_of_rank(column, card.rank) >= 2)
                        .unwrap_or(false);
                    let is_pair_member = hand
                        .get(slot)
                        .map(|c| c.is_face_up() && c.rank == card.rank)
                        .unwrap_or(false);
                    in_pair_column && !is_pair_member
                })
                .collect(),
            Assessment::Replaces(slots) => slots,
            // The engine only asks for a placement after the card was
            // wanted; if that assumption ever breaks, fall back to the
            // whole grid rather than crash.
            Assessment::Unwanted => hand.slots().collect(),
        }
    }

    /// Picks the best column among `candidates` by expected point sum,
    /// breaking ties toward the column showing the fewest face-up cards
    /// so the placement does not telegraph which triple is being chased.
    fn best_column<'a>(
        &self,
        candidates: impl Iterator<Item = (usize, &'a [Card; ROWS])>,
    ) -> Option<usize> {
        let mut best: Option<(usize, f64, usize)> = None;
        for (idx, column) in candidates {
            let sum = self.column_expected_sum(column);
            let face_up = column.iter().filter(|c| c.is_face_up()).count();
            let better = match best {
                None => true,
                Some((_, best_sum, best_face_up)) => {
                    sum > best_sum || (sum == best_sum && face_up < best_face_up)
                }
            };
            if better {
                best = Some((idx, sum, face_up));
            }
        }
        best.map(|(idx, _, _)| idx)
    }

    fn pick_pair_column(&self, card: Card, hand: &Hand, eligible: &[Slot]) -> Option<usize> {
        self.best_column(hand.columns().enumerate().filter(|(idx, column)| {
            face_up_count_of_rank(column, card.rank) >= 2
                && eligible.iter().any(|slot| slot.col == *idx)
        }))
    }

    fn pick_single_match_column(&self, card: Card, hand: &Hand, eligible: &[Slot]) -> Option<usize> {
        self.best_column(hand.columns().enumerate().filter(|(idx, column)| {
            face_up_count_of_rank(column, card.rank) == 1
                && !has_cheaper_pair(column, card.rank)
                && eligible.iter().any(|slot| slot.col == *idx)
        }))
    }

    /// No rank affinity anywhere: replace the single most expensive
    /// eligible card, with the same anti-tell tie-break between columns.
    fn pick_fallback_column(&self, hand: &Hand, eligible: &[Slot]) -> Option<usize> {
        let mut best: Option<(usize, f64, usize)> = None;
        for &slot in eligible {
            let Some(existing) = hand.get(slot) else {
                continue;
            };
            let ev = self.expected_value(existing);
            let face_up = hand
                .column(slot.col)
                .map(|column| column.iter().filter(|c| c.is_face_up()).count())
                .unwrap_or(ROWS);
            let better = match best {
                None => true,
                Some((_, best_ev, best_face_up)) => {
                    ev > best_ev || (ev == best_ev && face_up < best_face_up)
                }
            };
            if better {
                best = Some((slot.col, ev, face_up));
            }
        }
        best.map(|(col, _, _)| col)
    }

    /// Within the chosen column, replace the most expensive eligible
    /// card that is not itself of the kept card's rank.
    fn pick_row(&self, card: Card, hand: &Hand, eligible: &[Slot], col: usize) -> Slot {
        let mut fallback = None;
        let mut best: Option<(Slot, f64)> = None;
        for &slot in eligible.iter().filter(|slot| slot.col == col) {
            let Some(existing) = hand.get(slot) else {
                continue;
            };
            if fallback.is_none() {
                fallback = Some(slot);
            }
            if existing.is_face_up() && existing.rank == card.rank {
                continue;
            }
            let ev = self.expected_value(existing);
            if best.map_or(true, |(_, best_ev)| ev > best_ev) {
                best = Some((slot, ev));
            }
        }
        best.map(|(slot, _)| slot)
            .or(fallback)
            .unwrap_or(Slot { col, row: 0 })
    }
}

impl Default for HeuristicPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for HeuristicPolicy {
    /// Always the first face-down position in column-major order.
    /// Deliberately naive: a pattern in reveals gives nothing away,
    /// because the player has no say in what gets flipped.
    fn choose_reveal(&mut self, view: &TableView) -> Slot {
        view.hand
            .first_face_down_slot()
            .unwrap_or(Slot { col: 0, row: 0 })
    }

    fn choose_draw(&mut self, view: &TableView) -> DrawChoice {
        let Some(top) = view.discard_top else {
            return DrawChoice::FromDrawPile;
        };
        let wanted = !matches!(self.assess(top, true, view), Assessment::Unwanted);
        debug!(card = %top, wanted, "weighed the discard top");
        if wanted {
            DrawChoice::FromDiscard
        } else {
            DrawChoice::FromDrawPile
        }
    }

    fn keep_or_discard(&mut self, card: Card, view: &TableView) -> KeepChoice {
        let wanted = !matches!(self.assess(card, false, view), Assessment::Unwanted);
        debug!(card = %card, wanted, "judged the drawn card");
        if wanted {
            KeepChoice::Keep
        } else {
            KeepChoice::Discard
        }
    }

    fn choose_placement(&mut self, card: Card, view: &TableView) -> Slot {
        let hand = view.hand;
        let eligible = self.eligible_slots(card, view);
        let col = self
            .pick_pair_column(card, hand, &eligible)
            .or_else(|| self.pick_single_match_column(card, hand, &eligible))
            .or_else(|| self.pick_fallback_column(hand, &eligible));
        match col {
            Some(col) => self.pick_row(card, hand, &eligible, col),
            None => eligible.first().copied().unwrap_or(Slot { col: 0, row: 0 }),
        }
    }
}

fn face_up_count_of_rank(column: &[Card; ROWS], rank: Rank) -> usize {
    column
        .iter()
        .filter(|c| c.is_face_up() && c.rank == rank)
        .count()
}

/// Whether the column already shows a pair of some other rank that is
/// cheaper to finish than the candidate's, in which case the candidate
/// should not disturb it.
fn has_cheaper_pair(column: &[Card; ROWS], rank: Rank) -> bool {
    crate::ALL_RANKS.iter().any(|&other| {
        other != rank
            && other.point_value() < rank.point_value()
            && face_up_count_of_rank(column, other) >= 2
    })
}
