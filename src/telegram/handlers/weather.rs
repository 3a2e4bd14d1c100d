//! Weather flow: ask for a city, reply with current conditions and forecast.

use teloxide::prelude::*;

use crate::services::weather::{format_current, format_forecast, validate_city};
use crate::telegram::handlers::types::{report_error, HandlerDeps, HandlerResult};
use crate::telegram::menu;
use crate::telegram::state::{BotDialogue, State};
use crate::telegram::Bot;

pub async fn open_weather(bot: &Bot, dialogue: &BotDialogue, msg: &Message) -> HandlerResult {
    bot.send_message(msg.chat.id, "Введите название города:").await?;
    dialogue.update(State::AwaitingWeatherCity).await?;
    Ok(())
}

pub async fn receive_city(bot: Bot, dialogue: BotDialogue, deps: HandlerDeps, msg: Message) -> HandlerResult {
    let chat_id = msg.chat.id;
    let city = match validate_city(msg.text().unwrap_or_default()) {
        Ok(city) => city,
        // Bad input keeps the dialogue at this step.
        Err(err) => {
            bot.send_message(chat_id, err.user_message()).await?;
            return Ok(());
        }
    };

    match deps.weather.fetch(city).await {
        Ok(response) => {
            // The forecast message is skipped when the response carries
            // nothing beyond today; the menu rides on the last message.
            match format_forecast(&response) {
                Some(forecast) => {
                    bot.send_message(chat_id, format_current(&response)).await?;
                    bot.send_message(chat_id, forecast)
                        .reply_markup(menu::main_menu())
                        .await?;
                }
                None => {
                    bot.send_message(chat_id, format_current(&response))
                        .reply_markup(menu::main_menu())
                        .await?;
                }
            }
            dialogue.exit().await?;
        }
        Err(err) => report_error(&bot, chat_id, "weather fetch", &err).await,
    }
    Ok(())
}
