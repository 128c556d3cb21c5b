use serde::{Deserialize, Serialize};

use crate::{Card, RulesError};

/// Rows per column. Fixed by the rules.
pub const ROWS: usize = 3;

/// Columns dealt to each player at the start of a game.
pub const INITIAL_COLUMNS: usize = 3;

/// A position in a hand's grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub col: usize,
    pub row: usize,
}

/// One player's grid of cards: up to three columns of three rows.
///
/// Columns only ever leave the grid as whole units, when all three of
/// their cards are face-up and share a rank. The column count therefore
/// never grows past its dealt value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hand {
    columns: Vec<[Card; ROWS]>,
}

impl Hand {
    /// Deals three columns of three face-down cards from the top of the
    /// given stack (the end of the vector).
    pub fn deal_from(cards: &mut Vec<Card>) -> Result<Self, RulesError> {
        let mut columns = Vec::with_capacity(INITIAL_COLUMNS);
        for _ in 0..INITIAL_COLUMNS {
            let top = cards.pop().ok_or(RulesError::PileExhausted)?;
            let middle = cards.pop().ok_or(RulesError::PileExhausted)?;
            let bottom = cards.pop().ok_or(RulesError::PileExhausted)?;
            columns.push([top, middle, bottom]);
        }
        Ok(Self { columns })
    }

    /// Builds a hand from explicit columns. Meant for setting up
    /// positions in tests and tools.
    pub fn from_columns(columns: Vec<[Card; ROWS]>) -> Self {
        Self { columns }
    }

    pub fn get(&self, slot: Slot) -> Option<Card> {
        self.columns
            .get(slot.col)
            .and_then(|column| column.get(slot.row))
            .copied()
    }

    pub fn column(&self, col: usize) -> Option<&[Card; ROWS]> {
        self.columns.get(col)
    }

    pub fn columns(&self) -> std::slice::Iter<'_, [Card; ROWS]> {
        self.columns.iter()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn card_count(&self) -> usize {
        self.columns.len() * ROWS
    }

    /// Flips the card at `slot` face-up.
    pub fn reveal_at(&mut self, slot: Slot) -> Result<(), RulesError> {
        let card = self.cell_mut(slot)?;
        if card.is_face_up() {
            return Err(RulesError::RevealOnFaceUp {
                col: slot.col,
                row: slot.row,
            });
        }
        card.turn_face_up();
        Ok(())
    }

    /// Swaps `new` into `slot` and returns the displaced card, forced
    /// face-up so it can go straight onto the discard pile.
    pub fn swap_at(&mut self, slot: Slot, new: Card) -> Result<Card, RulesError> {
        let cell = self.cell_mut(slot)?;
        let mut displaced = std::mem::replace(cell, new);
        displaced.turn_face_up();
        Ok(displaced)
    }

    /// Removes every column whose three cards are all face-up and share
    /// one rank, and returns the removed cards.
    ///
    /// Which columns qualify is decided over a snapshot taken up front,
    /// so removing one column cannot skip the evaluation of another.
    pub fn remove_completed_columns(&mut self) -> Vec<Card> {
        let completed: Vec<bool> = self
            .columns
            .iter()
            .map(|column| {
                column.iter().all(|c| c.is_face_up())
                    && column.iter().all(|c| c.rank == column[0].rank)
            })
            .collect();
        let mut removed = Vec::new();
        let mut idx = 0;
        self.columns.retain(|column| {
            let keep = !completed[idx];
            if !keep {
                removed.extend_from_slice(column);
            }
            idx += 1;
            keep
        });
        removed
    }

    pub fn face_down_count(&self) -> usize {
        self.columns
            .iter()
            .flatten()
            .filter(|c| !c.is_face_up())
            .count()
    }

    pub fn is_all_face_up(&self) -> bool {
        self.columns.iter().flatten().all(|c| c.is_face_up())
    }

    pub fn reveal_all(&mut self) {
        for card in self.columns.iter_mut().flatten() {
            card.turn_face_up();
        }
    }

    /// Sum of the true point values of every held card.
    pub fn score(&self) -> i32 {
        self.columns.iter().flatten().map(|c| c.point_value()).sum()
    }

    /// Sum of the point values of the face-up cards only. This is the
    /// part of a hand that opponents can see and compare against.
    pub fn visible_score(&self) -> i32 {
        self.columns
            .iter()
            .flatten()
            .filter(|c| c.is_face_up())
            .map(|c| c.point_value())
            .sum()
    }

    /// All grid positions in column-major order.
    pub fn slots(&self) -> impl Iterator<Item = Slot> {
        let num_columns = self.columns.len();
        (0..num_columns).flat_map(|col| (0..ROWS).map(move |row| Slot { col, row }))
    }

    pub fn first_face_down_slot(&self) -> Option<Slot> {
        self.slots().find(|&slot| {
            self.get(slot)
                .map(|card| !card.is_face_up())
                .unwrap_or(false)
        })
    }

    fn cell_mut(&mut self, slot: Slot) -> Result<&mut Card, RulesError> {
        self.columns
            .get_mut(slot.col)
            .and_then(|column| column.get_mut(slot.row))
            .ok_or(RulesError::SlotOutOfRange {
                col: slot.col,
                row: slot.row,
            })
    }
}
