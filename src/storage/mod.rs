//! SQLite persistence for events, fighters, bouts and ratings.

pub mod repository;
pub mod schema;

pub use repository::FightRepository;
