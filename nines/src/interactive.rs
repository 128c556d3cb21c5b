use std::io::{BufRead, Write};

use crate::{
    render_hand, Card, DrawChoice, InputError, KeepChoice, Policy, Slot, TableView, ROWS,
};

/// A seat played by a person over a line-based terminal.
///
/// Every prompt re-asks until the answer parses and is in range, so no
/// input problem ever reaches the engine. Indices are 1-based on the
/// wire and 0-based in the returned moves.
pub struct InteractivePolicy<R, W> {
    input: R,
    output: W,
}

impl InteractivePolicy<std::io::StdinLock<'static>, std::io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> InteractivePolicy<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn say(&mut self, text: impl std::fmt::Display) {
        writeln!(self.output, "{}", text).expect("could not write to the terminal");
    }

    fn read_token(&mut self, prompt: &str) -> String {
        write!(self.output, "{}", prompt).expect("could not write to the terminal");
        self.output.flush().expect("could not flush the terminal");
        let mut line = String::new();
        let num_bytes_read = self
            .input
            .read_line(&mut line)
            .expect("could not read input");
        assert!(
            num_bytes_read != 0,
            "input stream closed while waiting for a move"
        );
        line.trim().to_string()
    }

    fn ask_index(&mut self, what: &str, limit: usize) -> usize {
        loop {
            let token = self.read_token(&format!("{} (1-{}): ", what, limit));
            match parse_index(&token, limit) {
                Ok(idx) => return idx,
                Err(err) => self.say(err),
            }
        }
    }

    fn ask_slot(&mut self, view: &TableView) -> Slot {
        let num_columns = view.hand.num_columns();
        // With a single column left there is nothing to choose.
        let col = if num_columns == 1 {
            0
        } else {
            self.ask_index("column", num_columns)
        };
        let row = self.ask_index("row", ROWS);
        Slot { col, row }
    }

    fn show_hand(&mut self, view: &TableView) {
        let grid = render_hand(view.hand);
        self.say(&grid);
    }
}

impl<R: BufRead, W: Write> Policy for InteractivePolicy<R, W> {
    fn choose_reveal(&mut self, view: &TableView) -> Slot {
        self.show_hand(view);
        self.say("Choose a card to turn over.");
        loop {
            let slot = self.ask_slot(view);
            match view.hand.get(slot) {
                Some(card) if !card.is_face_up() => return slot,
                _ => self.say(InputError::AlreadyFaceUp),
            }
        }
    }

    fn choose_draw(&mut self, view: &TableView) -> DrawChoice {
        self.show_hand(view);
        if let Some(top) = view.discard_top {
            self.say(format_args!("The discard pile shows {}.", top));
        }
        loop {
            let token = self.read_token("draw or discard? ");
            match parse_draw_choice(&token) {
                Ok(choice) => return choice,
                Err(err) => self.say(err),
            }
        }
    }

    fn keep_or_discard(&mut self, card: Card, _view: &TableView) -> KeepChoice {
        self.say(format_args!("You drew {}.", card));
        loop {
            let token = self.read_token("keep or discard? ");
            match parse_keep_choice(&token) {
                Ok(choice) => return choice,
                Err(err) => self.say(err),
            }
        }
    }

    fn choose_placement(&mut self, card: Card, view: &TableView) -> Slot {
        self.show_hand(view);
        self.say(format_args!("Where does {} go?", card));
        self.ask_slot(view)
    }
}

/// Parses a 1-based index and converts it to 0-based.
fn parse_index(token: &str, limit: usize) -> Result<usize, InputError> {
    let index: usize = token.parse().map_err(|_| InputError::NotANumber {
        token: token.to_string(),
    })?;
    if index < 1 || index > limit {
        return Err(InputError::OutOfRange { index, limit });
    }
    Ok(index - 1)
}

fn parse_draw_choice(token: &str) -> Result<DrawChoice, InputError> {
    match token.to_ascii_lowercase().as_str() {
        "draw" => Ok(DrawChoice::FromDrawPile),
        "discard" => Ok(DrawChoice::FromDiscard),
        _ => Err(InputError::UnknownKeyword {
            token: token.to_string(),
        }),
    }
}

fn parse_keep_choice(token: &str) -> Result<KeepChoice, InputError> {
    match token.to_ascii_lowercase().as_str() {
        "keep" => Ok(KeepChoice::Keep),
        "discard" => Ok(KeepChoice::Discard),
        _ => Err(InputError::UnknownKeyword {
            token: token.to_string(),
        }),
    }
}
