//! Handler types and shared dependencies

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::Message;

use crate::core::error::AppError;
use crate::services::alerts::AlertsClient;
use crate::services::github::CommitsClient;
use crate::services::regions::RegionsClient;
use crate::services::weather::WeatherClient;
use crate::storage::db::DbPool;
use crate::telegram::Bot;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for handler endpoints
pub type HandlerResult = Result<(), HandlerError>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub db_pool: Arc<DbPool>,
    pub regions: Arc<RegionsClient>,
    pub alerts: Arc<AlertsClient>,
    pub weather: Arc<WeatherClient>,
    pub github: Arc<CommitsClient>,
}

impl HandlerDeps {
    pub fn new(
        db_pool: Arc<DbPool>,
        regions: Arc<RegionsClient>,
        alerts: Arc<AlertsClient>,
        weather: Arc<WeatherClient>,
        github: Arc<CommitsClient>,
    ) -> Self {
        Self {
            db_pool,
            regions,
            alerts,
            weather,
            github,
        }
    }
}

/// Sender id of a message, falling back to the chat id for private chats
/// where they coincide.
pub fn user_id_of(msg: &Message) -> i64 {
    msg.from
        .as_ref()
        .and_then(|u| i64::try_from(u.id.0).ok())
        .unwrap_or(msg.chat.id.0)
}

/// The single boundary where an [`AppError`] becomes a chat reply.
///
/// Logs the full error, sends the user-facing rendering, and swallows the
/// send failure (nothing useful left to do with it).
pub async fn report_error(bot: &Bot, chat_id: ChatId, context: &str, err: &AppError) {
    log::error!("{} failed for chat {}: {:?}", context, chat_id, err);
    if let Err(send_err) = bot.send_message(chat_id, err.user_message()).await {
        log::error!("Failed to deliver error reply to chat {}: {}", chat_id, send_err);
    }
}
