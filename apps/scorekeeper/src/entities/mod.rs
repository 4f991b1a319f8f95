pub mod games;
pub mod rounds;

pub use games::Entity as Games;
pub use games::Model as GameRow;
pub use rounds::Entity as Rounds;
pub use rounds::Model as RoundRow;
