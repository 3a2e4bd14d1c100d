//! Database access: pool, migrations, and the two durable stores

pub mod db;
pub mod migrations;
pub mod plans;
pub mod users;

// Re-exports for convenience
pub use db::{create_pool, get_connection, DbConnection, DbPool};
