//! SeaORM adapters behind the `GameStore` contract.

pub mod games_sea;
pub mod rounds_sea;
pub mod sea_store;

pub use sea_store::SeaStore;
