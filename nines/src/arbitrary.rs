use crate::{Card, Hand, Rank, Suit, INITIAL_COLUMNS, ROWS};

#[cfg(test)]
impl quickcheck::Arbitrary for Suit {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&crate::ALL_SUITS).unwrap()
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Rank {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&crate::ALL_RANKS).unwrap()
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Card {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let card = Card::new(Suit::arbitrary(g), Rank::arbitrary(g));
        if bool::arbitrary(g) {
            card.revealed()
        } else {
            card
        }
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Hand {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let num_columns = usize::arbitrary(g) % (INITIAL_COLUMNS + 1);
        let mut columns = Vec::with_capacity(num_columns);
        for _ in 0..num_columns {
            let mut column = [Card::arbitrary(g); ROWS];
            for cell in column.iter_mut() {
                *cell = Card::arbitrary(g);
            }
            columns.push(column);
        }
        Hand::from_columns(columns)
    }
}
