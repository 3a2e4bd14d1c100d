//! /start, /help and the fallback for unrecognized free text.

use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::telegram::bot::Command;
use crate::telegram::handlers::types::HandlerResult;
use crate::telegram::menu;
use crate::telegram::state::BotDialogue;
use crate::telegram::Bot;

pub async fn start(bot: Bot, dialogue: BotDialogue, msg: Message) -> HandlerResult {
    // /start always lands the user in a clean main menu, whatever flow
    // they abandoned.
    dialogue.exit().await?;
    bot.send_message(
        msg.chat.id,
        "Привет! Я помогу вести планы, узнавать погоду, смотреть коммиты GitHub \
         и следить за тревогами в вашем регионе.\n\nВыберите раздел 👇",
    )
    .reply_markup(menu::main_menu())
    .await?;
    Ok(())
}

pub async fn help(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, Command::descriptions().to_string()).await?;
    Ok(())
}

/// Free text outside of any flow.
pub async fn unrecognized(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, "Я вас не понял. Воспользуйтесь меню 👇")
        .reply_markup(menu::main_menu())
        .await?;
    Ok(())
}
