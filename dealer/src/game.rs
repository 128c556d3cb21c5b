use nines::{
    execute_reveal, execute_turn, two_decks, Card, Hand, Pile, Policy, RulesError, TurnAction,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::recording::{RecordedEvent, Recorder};
use crate::results::{Standing, Standings};

/// Cards in play for the whole game: two 52-card decks.
pub const TOTAL_CARDS: usize = 104;

/// Face-down cards each player flips before the first turn.
const REVEALS_PER_PLAYER: usize = 2;

/// One player at the table.
pub struct Seat {
    pub name: String,
    pub hand: Hand,
    pub policy: Box<dyn Policy>,
}

/// The complete game state.
///
/// `out_player` is set at most once, for the first seat whose hand is
/// entirely face-up, and is never cleared or reassigned.
pub struct Table {
    pub draw_pile: Pile,
    pub discard_pile: Pile,
    pub seats: Vec<Seat>,
    pub out_player: Option<usize>,
}

/// The phases of a game, in order. `Reveal` and the turn phases loop
/// internally; reaching `Scoring` ends play.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    Reveal,
    Play,
    Closing,
    Scoring,
}

impl Table {
    /// Deals from an already-ordered double deck (the end of the vector
    /// is the top): three columns of three face-down cards per seat,
    /// then one face-up card to seed the discard pile.
    pub fn with_cards(
        players: Vec<(String, Box<dyn Policy>)>,
        mut cards: Vec<Card>,
    ) -> Result<Self, RulesError> {
        let mut seats = Vec::with_capacity(players.len());
        for (name, policy) in players {
            seats.push(Seat {
                name,
                hand: Hand::deal_from(&mut cards)?,
                policy,
            });
        }
        let mut draw_pile = Pile::from_cards(cards);
        let mut discard_pile = Pile::new();
        discard_pile.push(draw_pile.draw()?);
        Ok(Self {
            draw_pile,
            discard_pile,
            seats,
            out_player: None,
        })
    }

    /// Shuffles two decks and deals them out.
    pub fn deal(
        players: Vec<(String, Box<dyn Policy>)>,
        rng: &mut StdRng,
    ) -> Result<Self, RulesError> {
        let mut cards = two_decks();
        cards.shuffle(rng);
        Self::with_cards(players, cards)
    }

    /// Cards across both piles and every hand. Always [`TOTAL_CARDS`].
    pub fn total_cards(&self) -> usize {
        self.draw_pile.len()
            + self.discard_pile.len()
            + self.seats.iter().map(|s| s.hand.card_count()).sum::<usize>()
    }
}

/// Plays one game to completion and returns the standings, ranked by
/// ascending score.
pub fn play_game(table: &mut Table, recorder: &mut Option<Recorder>) -> anyhow::Result<Standings> {
    let num_seats = table.seats.len();
    anyhow::ensure!(num_seats >= 2, "a game needs at least two seats");

    let mut phase = Phase::Reveal;
    let mut idx = 0;
    while phase != Phase::Scoring {
        phase = match phase {
            Phase::Reveal => {
                for seat_idx in 0..num_seats {
                    for _ in 0..REVEALS_PER_PLAYER {
                        reveal_one(table, seat_idx, recorder)?;
                    }
                }
                Phase::Play
            }
            Phase::Play | Phase::Closing => {
                if table.out_player == Some(idx) {
                    // Control came back around to the out-player.
                    Phase::Scoring
                } else {
                    take_turn(table, idx, recorder)?;
                    idx = (idx + 1) % num_seats;
                    if table.out_player.is_some() {
                        Phase::Closing
                    } else {
                        Phase::Play
                    }
                }
            }
            Phase::Scoring => Phase::Scoring,
        };
    }

    let standings = score_table(table);
    info!("game over");
    for (position, standing) in standings.0.iter().enumerate() {
        info!(
            position = position + 1,
            seat = %standing.name,
            score = standing.score
        );
    }
    if let Some(rec) = recorder {
        rec.write_game_recording()?;
    }
    Ok(standings)
}

fn reveal_one(
    table: &mut Table,
    idx: usize,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<()> {
    let scores = opponent_visible_scores(table, idx);
    let discard_top = table.discard_pile.top();
    let seat = &mut table.seats[idx];
    let slot = execute_reveal(&mut seat.hand, seat.policy.as_mut(), discard_top, &scores)?;
    debug!(seat = %seat.name, col = slot.col, row = slot.row, "revealed a card");
    if let Some(rec) = recorder {
        rec.record(RecordedEvent::Reveal {
            seat: seat.name.clone(),
            col: slot.col,
            row: slot.row,
        });
    }
    Ok(())
}

fn take_turn(table: &mut Table, idx: usize, recorder: &mut Option<Recorder>) -> anyhow::Result<()> {
    let scores = opponent_visible_scores(table, idx);
    let someone_is_out = table.out_player.is_some();
    let seat = &mut table.seats[idx];
    info!(seat = %seat.name, "turn begins");

    let record = execute_turn(
        &mut seat.hand,
        &mut table.draw_pile,
        &mut table.discard_pile,
        seat.policy.as_mut(),
        &scores,
        someone_is_out,
    )?;

    match record.action {
        TurnAction::TookDiscard { card, slot } => {
            info!(seat = %seat.name, card = %card, col = slot.col, row = slot.row, "took the discard")
        }
        TurnAction::DrewAndKept { card, slot } => {
            info!(seat = %seat.name, card = %card, col = slot.col, row = slot.row, "kept the drawn card")
        }
        TurnAction::DrewAndDiscarded { card } => {
            info!(seat = %seat.name, card = %card, "discarded the drawn card")
        }
    }
    if let Some(card) = record.displaced {
        debug!(seat = %seat.name, card = %card, "discarded from the grid");
    }
    if !record.eliminated.is_empty() {
        info!(seat = %seat.name, cards = record.eliminated.len(), "cleared completed columns");
    }

    if table.out_player.is_none() {
        if seat.hand.is_all_face_up() {
            table.out_player = Some(idx);
            info!(seat = %seat.name, "is out, the final round begins");
            if let Some(rec) = recorder {
                rec.record(RecordedEvent::Out {
                    seat: seat.name.clone(),
                });
            }
        }
    } else if table.out_player != Some(idx) {
        // The final round: a move after someone went out ends with the
        // whole hand turned over.
        seat.hand.reveal_all();
    }

    if let Some(rec) = recorder {
        rec.record(RecordedEvent::Turn {
            seat: seat.name.clone(),
            record,
        });
    }
    Ok(())
}

fn opponent_visible_scores(table: &Table, idx: usize) -> Vec<i32> {
    table
        .seats
        .iter()
        .enumerate()
        .filter(|&(other, _)| other != idx)
        .map(|(_, seat)| seat.hand.visible_score())
        .collect()
}

fn score_table(table: &Table) -> Standings {
    let mut entries: Vec<Standing> = table
        .seats
        .iter()
        .map(|seat| Standing {
            name: seat.name.clone(),
            score: seat.hand.score(),
        })
        .collect();
    // Stable, so equal scores keep seat order.
    entries.sort_by_key(|entry| entry.score);
    Standings(entries)
}
