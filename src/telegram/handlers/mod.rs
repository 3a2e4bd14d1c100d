pub mod alerts;
pub mod commands;
pub mod github;
pub mod plans;
pub mod schema;
pub mod types;
pub mod weather;

pub use schema::schema;
pub use types::{HandlerDeps, HandlerError, HandlerResult};
