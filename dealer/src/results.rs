use std::fmt::Write;

/// One seat's final score.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Standing {
    pub name: String,
    pub score: i32,
}

/// Final standings, ranked by ascending score. Ties keep seat order.
pub struct Standings(pub Vec<Standing>);

impl Standings {
    /// The winner, i.e. the seat with the lowest score.
    pub fn winner(&self) -> Option<&Standing> {
        self.0.first()
    }
}

/// Renders the standings as a small table, best score first.
pub fn format_standings(standings: &Standings) -> String {
    let width = standings
        .0
        .iter()
        .map(|standing| standing.name.len())
        .max()
        .unwrap_or(0)
        .max(4);
    let mut out = String::new();
    for (position, standing) in standings.0.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {:<width$} {}",
            position + 1,
            standing.name,
            standing.score,
            width = width
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standing(name: &str, score: i32) -> Standing {
        Standing {
            name: name.to_string(),
            score,
        }
    }

    #[test]
    fn winner_is_the_lowest_score() {
        let standings = Standings(vec![standing("bo", 3), standing("alexandra", 17)]);
        assert_eq!(standings.winner(), Some(&standing("bo", 3)));
        assert!(Standings(Vec::new()).winner().is_none());
    }

    #[test]
    fn names_line_up_with_the_longest() {
        let standings = Standings(vec![standing("bo", 3), standing("alexandra", 17)]);
        assert_eq!(
            format_standings(&standings),
            "1. bo        3\n2. alexandra 17\n"
        );
    }

    #[test]
    fn short_names_still_get_four_columns() {
        let standings = Standings(vec![standing("a", 0), standing("b", 1)]);
        assert_eq!(format_standings(&standings), "1. a    0\n2. b    1\n");
    }
}
