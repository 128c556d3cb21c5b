mod game;
mod recording;
mod results;
pub use game::*;
pub use recording::*;
pub use results::*;
