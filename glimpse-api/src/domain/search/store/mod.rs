//! Search-record store implementations.

mod memory;
mod postgres;

pub use memory::InMemorySearchRecordStore;
pub use postgres::PgSearchRecordStore;
