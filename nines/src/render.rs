use crate::{Hand, ROWS};

/// Renders a hand as a text grid, one cell per card:
///
/// ```text
/// +--+ +--+
/// |A | |  |
/// +--+ +--+
/// ```
///
/// The rank abbreviation is centered in the cell and blank while the
/// card is face-down; only [`Card::visible_rank`](crate::Card::visible_rank)
/// is consulted, so nothing hidden can leak through here.
pub fn render_hand(hand: &Hand) -> String {
    let mut out = String::new();
    for row in 0..ROWS {
        for line in 0..3 {
            let mut text = String::new();
            for column in hand.columns() {
                if !text.is_empty() {
                    text.push(' ');
                }
                if line == 1 {
                    match column[row].visible_rank() {
                        Some(rank) => text.push_str(&format!("|{:^2}|", rank.abbreviation())),
                        None => text.push_str("|  |"),
                    }
                } else {
                    text.push_str("+--+");
                }
            }
            out.push_str(&text);
            out.push('\n');
        }
    }
    out
}
