//! Alerts flow: region selection wizard, preference reset and "check now".
//!
//! The wizard itself lives in [`crate::wizard`]; this module only wires its
//! outcomes to chat replies, dialogue state and the preference store. The
//! tree is refreshed from the network on flow entry and on reset; every
//! in-flow step matches against the persisted snapshot.

use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::utils::html;

use crate::core::error::AppResult;
use crate::services::alerts::{scan, AlertStatus};
use crate::storage::db::get_connection;
use crate::storage::users::{self, UserRegionPreference};
use crate::telegram::handlers::types::{report_error, user_id_of, HandlerDeps, HandlerResult};
use crate::telegram::menu;
use crate::telegram::state::{BotDialogue, State};
use crate::telegram::Bot;
use crate::wizard::{self, WizardOutcome, WizardStage};

/// Region names are rendered as `<code>` lines so users can tap-to-copy
/// and send an exact match back.
fn format_options(options: &[String]) -> String {
    options
        .iter()
        .map(|name| format!("<code>{}</code>", html::escape(name)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_status(region_name: &str, status: &AlertStatus) -> String {
    match status {
        AlertStatus::NoRegion => {
            "Сначала выберите регион: нажмите «✏️ Изменить регион».".to_string()
        }
        AlertStatus::Quiet => format!("✅ {}: тревог нет, всё спокойно.", region_name),
        AlertStatus::Active(kinds) => {
            format!("🚨 {}: объявлена тревога!\nТипы: {}", region_name, kinds.join(", "))
        }
    }
}

fn stored_region(deps: &HandlerDeps, user_id: i64) -> AppResult<Option<UserRegionPreference>> {
    let conn = get_connection(&deps.db_pool)?;
    users::get_region(&conn, user_id)
}

fn save_region(deps: &HandlerDeps, user_id: i64, region_name: &str, region_id: &str) -> AppResult<()> {
    let conn = get_connection(&deps.db_pool)?;
    users::upsert_region(&conn, user_id, region_name, region_id)
}

fn clear_stored_region(deps: &HandlerDeps, user_id: i64) -> AppResult<()> {
    let conn = get_connection(&deps.db_pool)?;
    users::clear_region(&conn, user_id)
}

/// Flow entry: a user with a stored region goes straight to the alert menu,
/// everyone else starts the selection wizard.
pub async fn open_alerts(bot: &Bot, dialogue: &BotDialogue, deps: &HandlerDeps, msg: &Message) -> HandlerResult {
    let chat_id = msg.chat.id;
    match stored_region(deps, user_id_of(msg)) {
        Ok(Some(pref)) => {
            bot.send_message(chat_id, format!("Ваш регион: {}", pref.region_name))
                .reply_markup(menu::alert_menu())
                .await?;
        }
        Ok(None) => start_selection(bot, dialogue, deps, chat_id).await?,
        Err(err) => report_error(bot, chat_id, "read region preference", &err).await,
    }
    Ok(())
}

/// Refreshes the tree and presents the top level. On refresh failure the
/// dialogue state is left untouched so the user can simply retry.
async fn start_selection(bot: &Bot, dialogue: &BotDialogue, deps: &HandlerDeps, chat_id: ChatId) -> HandlerResult {
    match deps.regions.refresh().await {
        Ok(tree) => {
            let options = wizard::oblast_names(&tree);
            bot.send_message(
                chat_id,
                format!(
                    "Выберите область (нажмите на название, чтобы скопировать, и отправьте его):\n{}",
                    format_options(&options)
                ),
            )
            .parse_mode(ParseMode::Html)
            .await?;
            dialogue.update(State::Region(WizardStage::AwaitingOblast)).await?;
        }
        Err(err) => report_error(bot, chat_id, "refresh region tree", &err).await,
    }
    Ok(())
}

/// «✏️ Изменить регион»: drop the stored preference and restart the wizard.
pub async fn change_region(bot: &Bot, dialogue: &BotDialogue, deps: &HandlerDeps, msg: &Message) -> HandlerResult {
    let chat_id = msg.chat.id;
    if let Err(err) = clear_stored_region(deps, user_id_of(msg)) {
        report_error(bot, chat_id, "clear region preference", &err).await;
        return Ok(());
    }
    start_selection(bot, dialogue, deps, chat_id).await
}

/// «🔔 Проверить сейчас»: fetch the feed and scan it for the user's region.
pub async fn check_now(bot: &Bot, deps: &HandlerDeps, msg: &Message) -> HandlerResult {
    let chat_id = msg.chat.id;
    let pref = match stored_region(deps, user_id_of(msg)) {
        Ok(Some(pref)) => pref,
        Ok(None) => {
            bot.send_message(chat_id, format_status("", &AlertStatus::NoRegion))
                .reply_markup(menu::alert_menu())
                .await?;
            return Ok(());
        }
        Err(err) => {
            report_error(bot, chat_id, "read region preference", &err).await;
            return Ok(());
        }
    };

    match deps.alerts.fetch().await {
        Ok(feed) => {
            let status = scan(&feed, &pref.region_id);
            bot.send_message(chat_id, format_status(&pref.region_name, &status))
                .reply_markup(menu::alert_menu())
                .await?;
        }
        Err(err) => report_error(bot, chat_id, "alert feed fetch", &err).await,
    }
    Ok(())
}

/// One wizard step: match the message against the current level of the
/// persisted tree and act on the outcome.
pub async fn receive_region_step(
    bot: Bot,
    dialogue: BotDialogue,
    deps: HandlerDeps,
    stage: WizardStage,
    msg: Message,
) -> HandlerResult {
    let chat_id = msg.chat.id;
    let input = msg.text().unwrap_or_default();

    let tree = match deps.regions.load() {
        Ok(tree) => tree,
        Err(err) => {
            report_error(&bot, chat_id, "load region snapshot", &err).await;
            return Ok(());
        }
    };

    match wizard::advance(&tree, &stage, input) {
        Ok(WizardOutcome::Descend { options, next }) => {
            let prompt = match &next {
                WizardStage::AwaitingDistrict { .. } => "Выберите район:",
                WizardStage::AwaitingCity { .. } => "Выберите город:",
                WizardStage::AwaitingOblast => "Выберите область:",
            };
            bot.send_message(chat_id, format!("{}\n{}", prompt, format_options(&options)))
                .parse_mode(ParseMode::Html)
                .await?;
            dialogue.update(State::Region(next)).await?;
        }
        Ok(WizardOutcome::Complete { region_name, region_id }) => {
            match save_region(&deps, user_id_of(&msg), &region_name, &region_id) {
                Ok(()) => {
                    bot.send_message(chat_id, format!("✅ Регион сохранён: {}", region_name))
                        .reply_markup(menu::alert_menu())
                        .await?;
                    dialogue.exit().await?;
                }
                // Save failed: stay at the stage, the user can resend.
                Err(err) => report_error(&bot, chat_id, "save region preference", &err).await,
            }
        }
        Ok(WizardOutcome::NoMatch) => {
            bot.send_message(
                chat_id,
                "Не нашёл такого названия. Скопируйте вариант из списка выше и отправьте ещё раз.",
            )
            .await?;
        }
        Ok(WizardOutcome::Malformed { region_name, next }) => {
            bot.send_message(
                chat_id,
                format!("«{}» не является конечным пунктом. Отправьте название города ещё раз.", region_name),
            )
            .await?;
            dialogue.update(State::Region(next)).await?;
        }
        Err(err) => report_error(&bot, chat_id, "region selection step", &err).await,
    }
    Ok(())
}
