use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A playing card from a standard 52-card deck, together with its
/// table-side visibility.
///
/// The suit and rank never change. The visibility flag starts out
/// face-down and is flipped at most once, via [`Card::turn_face_up`].
/// Rules and policy code may read the true rank at any time; anything
/// shown to a player goes through [`Card::visible_rank`] instead.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
    face_up: bool,
}

/// The suit of a [card](Card).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    #[serde(rename = "♦")]
    Diamond,
    #[serde(rename = "♥")]
    Heart,
    #[serde(rename = "♠")]
    Spade,
    #[serde(rename = "♣")]
    Club,
}

/// The rank of a [card](Card).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
    #[serde(rename = "A")]
    Ace,
}

pub const ALL_SUITS: [Suit; 4] = [Suit::Diamond, Suit::Heart, Suit::Spade, Suit::Club];

pub const ALL_RANKS: [Rank; 13] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank.abbreviation(), self.suit.symbol())
    }
}

impl Suit {
    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Diamond => "♦",
            Suit::Heart => "♥",
            Suit::Spade => "♠",
            Suit::Club => "♣",
        }
    }
}

impl Rank {
    /// The score a card of this rank adds to a hand.
    ///
    /// Kings are free, aces cost one, the ten and both face cards below
    /// the king cost the full ten.
    pub fn point_value(self) -> i32 {
        match self {
            Rank::Ace => 1,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen => 10,
            Rank::King => 0,
        }
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

impl Card {
    /// Creates a face-down card.
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Self {
            suit,
            rank,
            face_up: false,
        }
    }

    pub fn is_face_up(self) -> bool {
        self.face_up
    }

    pub fn turn_face_up(&mut self) {
        self.face_up = true;
    }

    /// Returns the same card turned face-up. Handy for setting up positions.
    #[must_use]
    pub fn revealed(mut self) -> Self {
        self.face_up = true;
        self
    }

    pub fn point_value(self) -> i32 {
        self.rank.point_value()
    }

    /// The rank as a player may see it: present only once the card is
    /// face-up. Rendering must go through this accessor.
    pub fn visible_rank(self) -> Option<Rank> {
        self.face_up.then_some(self.rank)
    }
}

/// The mean point value across the thirteen ranks.
///
/// Policies use it as the expected value of any card they cannot see.
pub fn mean_point_value() -> f64 {
    let total: i32 = ALL_RANKS.iter().map(|r| r.point_value()).sum();
    f64::from(total) / ALL_RANKS.len() as f64
}

/// Two full 52-card decks, all face-down, in a fixed order. The end of
/// the vector is the top of the stack.
pub fn two_decks() -> Vec<Card> {
    let mut cards = Vec::with_capacity(2 * ALL_SUITS.len() * ALL_RANKS.len());
    for _ in 0..2 {
        for &suit in &ALL_SUITS {
            for &rank in &ALL_RANKS {
                cards.push(Card::new(suit, rank));
            }
        }
    }
    cards
}

/// The error type for the [`FromStr`] instance of [`Card`].
#[derive(Clone, Copy, Debug)]
pub enum CardFromStrErr {
    LessThanTwoChars,
    MoreThanTwoChars,
    InvalidRank,
    InvalidSuit,
}

impl FromStr for Card {
    type Err = CardFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let rank_char = chars.next().ok_or(CardFromStrErr::LessThanTwoChars)?;
        let suit_char = chars.next().ok_or(CardFromStrErr::LessThanTwoChars)?;
        if chars.next().is_some() {
            return Err(CardFromStrErr::MoreThanTwoChars);
        }
        let rank = match rank_char {
            '2' => Rank::Two,
            '3' => Rank::Three,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' => Rank::Ten,
            'J' => Rank::Jack,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            'A' => Rank::Ace,
            _ => return Err(CardFromStrErr::InvalidRank),
        };
        let suit = match suit_char {
            '♦' => Suit::Diamond,
            '♥' => Suit::Heart,
            '♠' => Suit::Spade,
            '♣' => Suit::Club,
            _ => return Err(CardFromStrErr::InvalidSuit),
        };
        Ok(Card::new(suit, rank))
    }
}

/// Shorthand for creating a face-down card from a two-character string.
///
/// The first character is the [rank](Rank) (note: 10 is `T`), the second is
/// the [suit](Suit) as a unicode character (♦, ♥, ♠, or ♣).
///
/// This macro is just calling the [`FromStr`] instance of [`Card`].
/// ```
/// # use nines::{card, Card, Rank, Suit};
/// assert_eq!(card!("T♥"), Card::new(Suit::Heart, Rank::Ten));
/// ```
#[macro_export]
macro_rules! card {
    ($rs:literal) => {
        <$crate::Card as std::str::FromStr>::from_str($rs)
            .expect("Invalid card code given to card! macro")
    };
}
// The import is for using the macro in other modules, see https://stackoverflow.com/a/31749071/1726797
#[allow(unused_imports)]
pub(crate) use card;

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn point_values() {
        assert_eq!(Rank::Ace.point_value(), 1);
        assert_eq!(Rank::King.point_value(), 0);
        assert_eq!(Rank::Ten.point_value(), 10);
        assert_eq!(Rank::Jack.point_value(), 10);
        assert_eq!(Rank::Queen.point_value(), 10);
        assert_eq!(Rank::Five.point_value(), 5);
    }

    #[test]
    fn mean_value_is_between_five_and_six() {
        // The exact figure matters less than which integer card values
        // fall on either side of it: 5 and below are cheaper than an
        // unseen card, 6 and above are not.
        let mean = mean_point_value();
        assert!(mean > 5.0 && mean < 6.0, "mean was {mean}");
        assert_eq!(mean, 75.0 / 13.0);
    }

    #[test]
    fn two_decks_has_every_card_twice() {
        let cards = two_decks();
        assert_eq!(cards.len(), 104);
        let mut counts = BTreeMap::new();
        for card in cards {
            *counts.entry((card.suit, card.rank)).or_insert(0) += 1;
        }
        assert_eq!(counts.len(), 52);
        assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn visibility_is_masked_until_revealed() {
        let mut card = card!("Q♥");
        assert_eq!(card.visible_rank(), None);
        card.turn_face_up();
        assert_eq!(card.visible_rank(), Some(Rank::Queen));
        // The true rank was readable the whole time.
        assert_eq!(card.rank, Rank::Queen);
    }

    #[test]
    fn display_uses_abbreviation_and_suit() {
        assert_eq!(card!("T♠").to_string(), "10♠");
        assert_eq!(card!("A♦").to_string(), "A♦");
    }
}
