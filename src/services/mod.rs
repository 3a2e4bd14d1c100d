//! Clients for the external services the bot talks to

pub mod alerts;
pub mod github;
pub mod regions;
pub mod weather;
