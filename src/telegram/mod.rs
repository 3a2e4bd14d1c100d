//! Telegram surface: bot setup, keyboards, dialogue state and handlers.

pub mod bot;
pub mod handlers;
pub mod menu;
pub mod state;

pub type Bot = teloxide::Bot;

pub use bot::{create_bot, setup_bot_commands, Command};
pub use handlers::{schema, HandlerDeps};
pub use state::{BotDialogue, State};
