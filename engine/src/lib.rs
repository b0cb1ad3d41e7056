pub mod game_state;
pub mod generator;
pub mod grid;
pub mod hint;
pub mod logger;
pub mod pairs;
pub mod path;
pub mod rng;
pub mod settings;
pub mod types;

pub use types::*;
