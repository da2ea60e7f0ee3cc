pub mod store;
pub mod memory;
pub mod postgres;

pub use store::{MatchStore, StoreError};
pub use memory::InMemoryMatchStore;
pub use postgres::PgMatchStore;
