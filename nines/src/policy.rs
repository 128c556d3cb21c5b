use serde::{Deserialize, Serialize};

use crate::{Card, Hand, Slot};

/// Which pile to take the turn's card from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawChoice {
    FromDrawPile,
    FromDiscard,
}

/// Whether to swap a drawn card into the grid or throw it away.
///
/// Only asked for draw-pile acquisitions: a card taken off the discard
/// pile was chosen in the open, so keeping it is implied.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeepChoice {
    Keep,
    Discard,
}

/// Everything a policy may look at when asked for a move.
///
/// The hand exposes true ranks even for face-down cards; fair policies
/// ignore those and estimate hidden cards instead. Masking happens at
/// the render boundary, not here.
#[derive(Copy, Clone, Debug)]
pub struct TableView<'a> {
    /// The deciding player's own hand.
    pub hand: &'a Hand,
    /// Top of the discard pile, if any card is on it.
    pub discard_top: Option<Card>,
    /// Face-up point totals of every other player, in seat order.
    pub opponent_visible_scores: &'a [i32],
    /// Whether some player has already gone out.
    pub someone_is_out: bool,
}

/// A source of moves for one seat.
///
/// The engine calls exactly one method per cue and applies the result;
/// implementations must always return a move and handle their own
/// recoverable problems (the interactive variant re-prompts forever,
/// the heuristic variant always has a fallback).
pub trait Policy {
    /// Pick a face-down grid position to turn over during setup.
    /// Only called while such a position exists.
    fn choose_reveal(&mut self, view: &TableView) -> Slot;

    /// Pick which pile to take from at the start of a turn.
    fn choose_draw(&mut self, view: &TableView) -> DrawChoice;

    /// Decide the fate of a card drawn from the draw pile.
    fn keep_or_discard(&mut self, card: Card, view: &TableView) -> KeepChoice;

    /// Pick the grid position a kept card is swapped into. When the hand
    /// is down to one column, the engine forces the column to 0.
    fn choose_placement(&mut self, card: Card, view: &TableView) -> Slot;
}
