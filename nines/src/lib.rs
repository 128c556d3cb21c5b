pub use cards::*;
pub use errors::*;
pub use hand::*;
pub use heuristic::*;
pub use interactive::*;
pub use pile::*;
pub use policy::*;
pub use render::*;
pub use turn::*;

#[cfg(test)]
mod arbitrary;
mod cards;
mod errors;
mod hand;
mod heuristic;
mod interactive;
mod pile;
mod policy;
mod render;
mod turn;
