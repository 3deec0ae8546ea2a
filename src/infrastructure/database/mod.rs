//! SQLite persistence adapters.

pub mod connection;
pub mod migrations;
pub mod session_store;

pub use connection::{create_pool, create_test_pool, ConnectionError, PoolConfig};
pub use migrations::{initial_schema_migration, Migration, MigrationError, Migrator};
pub use session_store::SqliteSessionStore;
