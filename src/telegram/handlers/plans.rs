//! Plans flow: add, list, edit and delete free-text plans.
//!
//! Edit and delete are two-step dialogues (ask for the plan number, then
//! act); every storage call is scoped by the sender's user id.

use teloxide::prelude::*;

use crate::core::error::{AppError, AppResult};
use crate::storage::db::get_connection;
use crate::storage::plans::{self, PlanEntry};
use crate::telegram::handlers::types::{report_error, user_id_of, HandlerDeps, HandlerResult};
use crate::telegram::menu;
use crate::telegram::state::{BotDialogue, State};
use crate::telegram::Bot;

fn format_plan_list(entries: &[PlanEntry]) -> String {
    entries
        .iter()
        .map(|p| format!("{}. {}", p.id, p.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parses the plan number a user typed.
fn parse_plan_id(input: &str) -> AppResult<i64> {
    input
        .trim()
        .parse()
        .map_err(|_| AppError::Validation("Номер плана должен быть числом. Попробуйте ещё раз.".to_string()))
}

fn list(deps: &HandlerDeps, user_id: i64) -> AppResult<Vec<PlanEntry>> {
    let conn = get_connection(&deps.db_pool)?;
    plans::list_plans(&conn, user_id)
}

pub async fn open_plans(bot: &Bot, msg: &Message) -> HandlerResult {
    bot.send_message(msg.chat.id, "Что делаем с планами?")
        .reply_markup(menu::plan_menu())
        .await?;
    Ok(())
}

pub async fn show_list(bot: &Bot, deps: &HandlerDeps, msg: &Message) -> HandlerResult {
    let chat_id = msg.chat.id;
    match list(deps, user_id_of(msg)) {
        Ok(entries) if entries.is_empty() => {
            bot.send_message(chat_id, "У вас пока нет планов.")
                .reply_markup(menu::plan_menu())
                .await?;
        }
        Ok(entries) => {
            bot.send_message(chat_id, format!("📋 Ваши планы:\n{}", format_plan_list(&entries)))
                .reply_markup(menu::plan_menu())
                .await?;
        }
        Err(err) => report_error(bot, chat_id, "list plans", &err).await,
    }
    Ok(())
}

pub async fn prompt_add(bot: &Bot, dialogue: &BotDialogue, msg: &Message) -> HandlerResult {
    bot.send_message(msg.chat.id, "✏️ Введите текст нового плана:").await?;
    dialogue.update(State::AwaitingPlanText).await?;
    Ok(())
}

pub async fn receive_plan_text(bot: Bot, dialogue: BotDialogue, deps: HandlerDeps, msg: Message) -> HandlerResult {
    let chat_id = msg.chat.id;
    let text = msg.text().map(str::trim).unwrap_or_default();
    if text.is_empty() {
        bot.send_message(chat_id, "План не может быть пустым. Введите текст плана:").await?;
        return Ok(());
    }

    let added = get_connection(&deps.db_pool)
        .map_err(AppError::from)
        .and_then(|conn| plans::add_plan(&conn, user_id_of(&msg), text));
    match added {
        Ok(id) => {
            bot.send_message(chat_id, format!("✅ План №{} сохранён.", id))
                .reply_markup(menu::plan_menu())
                .await?;
            dialogue.exit().await?;
        }
        Err(err) => report_error(&bot, chat_id, "add plan", &err).await,
    }
    Ok(())
}

pub async fn prompt_edit(bot: &Bot, dialogue: &BotDialogue, deps: &HandlerDeps, msg: &Message) -> HandlerResult {
    let chat_id = msg.chat.id;
    match list(deps, user_id_of(msg)) {
        Ok(entries) if entries.is_empty() => {
            bot.send_message(chat_id, "У вас пока нет планов, изменять нечего.")
                .reply_markup(menu::plan_menu())
                .await?;
        }
        Ok(entries) => {
            bot.send_message(
                chat_id,
                format!(
                    "📋 Ваши планы:\n{}\n\nВведите номер плана, который хотите изменить:",
                    format_plan_list(&entries)
                ),
            )
            .await?;
            dialogue.update(State::AwaitingPlanEditId).await?;
        }
        Err(err) => report_error(bot, chat_id, "list plans for edit", &err).await,
    }
    Ok(())
}

pub async fn receive_edit_id(bot: Bot, dialogue: BotDialogue, deps: HandlerDeps, msg: Message) -> HandlerResult {
    let chat_id = msg.chat.id;
    let input = msg.text().unwrap_or_default();

    let found = parse_plan_id(input).and_then(|id| {
        let conn = get_connection(&deps.db_pool)?;
        Ok((id, plans::get_plan(&conn, id, user_id_of(&msg))?))
    });
    match found {
        Ok((id, Some(plan))) => {
            bot.send_message(
                chat_id,
                format!("Текущий текст:\n{}\n\nВведите новый текст плана:", plan.text),
            )
            .await?;
            dialogue.update(State::AwaitingPlanNewText { plan_id: id }).await?;
        }
        Ok((id, None)) => {
            bot.send_message(chat_id, format!("План №{} не найден. Введите номер из списка:", id))
                .await?;
        }
        Err(err) => report_error(&bot, chat_id, "resolve plan for edit", &err).await,
    }
    Ok(())
}

pub async fn receive_new_text(
    bot: Bot,
    dialogue: BotDialogue,
    deps: HandlerDeps,
    plan_id: i64,
    msg: Message,
) -> HandlerResult {
    let chat_id = msg.chat.id;
    let text = msg.text().map(str::trim).unwrap_or_default();
    if text.is_empty() {
        bot.send_message(chat_id, "План не может быть пустым. Введите новый текст плана:").await?;
        return Ok(());
    }

    let updated = get_connection(&deps.db_pool)
        .map_err(AppError::from)
        .and_then(|conn| plans::update_plan(&conn, plan_id, user_id_of(&msg), text));
    match updated {
        Ok(true) => {
            bot.send_message(chat_id, format!("✅ План №{} обновлён.", plan_id))
                .reply_markup(menu::plan_menu())
                .await?;
            dialogue.exit().await?;
        }
        // Deleted between the two steps of the dialogue.
        Ok(false) => {
            bot.send_message(chat_id, format!("План №{} уже не существует.", plan_id))
                .reply_markup(menu::plan_menu())
                .await?;
            dialogue.exit().await?;
        }
        Err(err) => report_error(&bot, chat_id, "update plan", &err).await,
    }
    Ok(())
}

pub async fn prompt_delete(bot: &Bot, dialogue: &BotDialogue, deps: &HandlerDeps, msg: &Message) -> HandlerResult {
    let chat_id = msg.chat.id;
    match list(deps, user_id_of(msg)) {
        Ok(entries) if entries.is_empty() => {
            bot.send_message(chat_id, "У вас пока нет планов, удалять нечего.")
                .reply_markup(menu::plan_menu())
                .await?;
        }
        Ok(entries) => {
            bot.send_message(
                chat_id,
                format!(
                    "📋 Ваши планы:\n{}\n\nВведите номер плана, который хотите удалить:",
                    format_plan_list(&entries)
                ),
            )
            .await?;
            dialogue.update(State::AwaitingPlanDeleteId).await?;
        }
        Err(err) => report_error(bot, chat_id, "list plans for delete", &err).await,
    }
    Ok(())
}

pub async fn receive_delete_id(bot: Bot, dialogue: BotDialogue, deps: HandlerDeps, msg: Message) -> HandlerResult {
    let chat_id = msg.chat.id;
    let input = msg.text().unwrap_or_default();

    let deleted = parse_plan_id(input).and_then(|id| {
        let conn = get_connection(&deps.db_pool)?;
        Ok((id, plans::delete_plan(&conn, id, user_id_of(&msg))?))
    });
    match deleted {
        Ok((id, true)) => {
            bot.send_message(chat_id, format!("🗑️ План №{} удалён.", id))
                .reply_markup(menu::plan_menu())
                .await?;
            dialogue.exit().await?;
        }
        Ok((id, false)) => {
            bot.send_message(chat_id, format!("План №{} не найден. Введите номер из списка:", id))
                .await?;
        }
        Err(err) => report_error(&bot, chat_id, "delete plan", &err).await,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_plan_list_numbers_by_id() {
        let entries = vec![
            PlanEntry {
                id: 3,
                user_id: 1,
                text: "купить хлеб".to_string(),
            },
            PlanEntry {
                id: 7,
                user_id: 1,
                text: "позвонить маме".to_string(),
            },
        ];
        assert_eq!(format_plan_list(&entries), "3. купить хлеб\n7. позвонить маме");
    }

    #[test]
    fn test_parse_plan_id() {
        assert_eq!(parse_plan_id(" 12 ").unwrap(), 12);
        assert!(matches!(parse_plan_id("abc"), Err(AppError::Validation(_))));
        assert!(matches!(parse_plan_id(""), Err(AppError::Validation(_))));
    }
}
