//! GitHub flow: ask for owner and repository, reply with recent commits.

use teloxide::prelude::*;

use crate::services::github::format_commits;
use crate::telegram::handlers::types::{report_error, HandlerDeps, HandlerResult};
use crate::telegram::menu;
use crate::telegram::state::{BotDialogue, State};
use crate::telegram::Bot;

pub async fn open_github(bot: &Bot, dialogue: &BotDialogue, msg: &Message) -> HandlerResult {
    bot.send_message(msg.chat.id, "Введите имя владельца репозитория:").await?;
    dialogue.update(State::AwaitingGithubOwner).await?;
    Ok(())
}

pub async fn receive_owner(bot: Bot, dialogue: BotDialogue, msg: Message) -> HandlerResult {
    let chat_id = msg.chat.id;
    let owner = msg.text().map(str::trim).unwrap_or_default();
    if owner.is_empty() {
        bot.send_message(chat_id, "Имя владельца не может быть пустым. Введите имя владельца:").await?;
        return Ok(());
    }

    bot.send_message(chat_id, "Введите название репозитория:").await?;
    dialogue
        .update(State::AwaitingGithubRepo {
            owner: owner.to_string(),
        })
        .await?;
    Ok(())
}

pub async fn receive_repo(
    bot: Bot,
    dialogue: BotDialogue,
    deps: HandlerDeps,
    owner: String,
    msg: Message,
) -> HandlerResult {
    let chat_id = msg.chat.id;
    let repo = msg.text().map(str::trim).unwrap_or_default();
    if repo.is_empty() {
        bot.send_message(chat_id, "Название репозитория не может быть пустым. Введите название:").await?;
        return Ok(());
    }

    match deps.github.recent_commits(&owner, repo).await {
        Ok(commits) if commits.is_empty() => {
            bot.send_message(chat_id, format!("В репозитории {}/{} пока нет коммитов.", owner, repo))
                .reply_markup(menu::main_menu())
                .await?;
            dialogue.exit().await?;
        }
        Ok(commits) => {
            bot.send_message(
                chat_id,
                format!("Последние коммиты {}/{}:\n{}", owner, repo, format_commits(&commits)),
            )
            .reply_markup(menu::main_menu())
            .await?;
            dialogue.exit().await?;
        }
        Err(err) => report_error(&bot, chat_id, "github commits fetch", &err).await,
    }
    Ok(())
}
