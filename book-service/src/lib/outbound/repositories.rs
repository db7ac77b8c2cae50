mod memory;
mod postgres;

pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
