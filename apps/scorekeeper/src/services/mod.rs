//! Application services over the domain and a `GameStore`.

pub mod scorekeeper;

pub use scorekeeper::{LoadedGame, NewGame, Scorekeeper};
