/// The error type for rule-level operations.
///
/// None of these are recoverable: each one means the engine or a policy
/// broke a rule the game guarantees, so the run must abort instead of
/// retrying.
#[derive(Debug, PartialEq, Eq)]
pub enum RulesError {
    PileExhausted,
    SlotOutOfRange { col: usize, row: usize },
    RevealOnFaceUp { col: usize, row: usize },
}

impl std::error::Error for RulesError {}

impl std::fmt::Display for RulesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RulesError::PileExhausted => {
                write!(f, "Tried to take a card from an empty pile")
            }
            RulesError::SlotOutOfRange { col, row } => {
                write!(f, "Grid position ({}, {}) does not exist in this hand", col, row)
            }
            RulesError::RevealOnFaceUp { col, row } => {
                write!(f, "The card at ({}, {}) is already face-up", col, row)
            }
        }
    }
}

/// The error type for a single line of interactive input.
///
/// These never cross the policy boundary: the interactive policy reports
/// the problem to the player and prompts again.
#[derive(Debug, PartialEq, Eq)]
pub enum InputError {
    NotANumber { token: String },
    OutOfRange { index: usize, limit: usize },
    AlreadyFaceUp,
    UnknownKeyword { token: String },
}

impl std::error::Error for InputError {}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::NotANumber { token } => {
                write!(f, "'{}' is not a number", token)
            }
            InputError::OutOfRange { index, limit } => {
                write!(f, "{} is out of range, expected 1 to {}", index, limit)
            }
            InputError::AlreadyFaceUp => {
                write!(f, "That card is already face-up, pick another")
            }
            InputError::UnknownKeyword { token } => {
                write!(f, "'{}' is not one of the choices", token)
            }
        }
    }
}
