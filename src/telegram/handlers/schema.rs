//! Update routing.
//!
//! Order matters: commands first, then exact menu-button text, then the
//! dialogue state branches. Buttons therefore work from inside any flow
//! («🔙Назад» escapes a half-finished wizard), and free text only ever
//! reaches the state branch it belongs to.

use teloxide::dispatching::dialogue::{self, InMemStorage};
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;

use crate::telegram::bot::Command;
use crate::telegram::handlers::types::{HandlerDeps, HandlerError, HandlerResult};
use crate::telegram::handlers::{alerts, commands, github, plans, weather};
use crate::telegram::menu::{self, buttons};
use crate::telegram::state::{BotDialogue, State};
use crate::telegram::Bot;

pub fn schema() -> UpdateHandler<HandlerError> {
    use dptree::case;

    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Start].endpoint(commands::start))
        .branch(case![Command::Help].endpoint(commands::help));

    let menu_handler = Message::filter_text()
        .filter(|text: String| menu::is_menu_button(&text))
        .endpoint(dispatch_menu_button);

    let state_handler = dptree::entry()
        .branch(case![State::AwaitingWeatherCity].endpoint(weather::receive_city))
        .branch(case![State::AwaitingPlanText].endpoint(plans::receive_plan_text))
        .branch(case![State::AwaitingPlanEditId].endpoint(plans::receive_edit_id))
        .branch(case![State::AwaitingPlanNewText { plan_id }].endpoint(plans::receive_new_text))
        .branch(case![State::AwaitingPlanDeleteId].endpoint(plans::receive_delete_id))
        .branch(case![State::AwaitingGithubOwner].endpoint(github::receive_owner))
        .branch(case![State::AwaitingGithubRepo { owner }].endpoint(github::receive_repo))
        .branch(case![State::Region(stage)].endpoint(alerts::receive_region_step))
        .branch(case![State::Idle].endpoint(commands::unrecognized));

    let message_handler = Update::filter_message()
        .branch(command_handler)
        .branch(menu_handler)
        .branch(state_handler);

    dialogue::enter::<Update, InMemStorage<State>, State, _>().branch(message_handler)
}

/// Every button press is a clean flow (re-)entry, so any half-finished
/// dialogue is dropped before dispatching.
async fn dispatch_menu_button(
    bot: Bot,
    dialogue: BotDialogue,
    deps: HandlerDeps,
    text: String,
    msg: Message,
) -> HandlerResult {
    dialogue.exit().await?;
    match text.as_str() {
        buttons::PLANS => plans::open_plans(&bot, &msg).await,
        buttons::WEATHER => weather::open_weather(&bot, &dialogue, &msg).await,
        buttons::GITHUB => github::open_github(&bot, &dialogue, &msg).await,
        buttons::ALERTS => alerts::open_alerts(&bot, &dialogue, &deps, &msg).await,
        buttons::PLAN_ADD => plans::prompt_add(&bot, &dialogue, &msg).await,
        buttons::PLAN_EDIT => plans::prompt_edit(&bot, &dialogue, &deps, &msg).await,
        buttons::PLAN_DELETE => plans::prompt_delete(&bot, &dialogue, &deps, &msg).await,
        buttons::PLAN_LIST => plans::show_list(&bot, &deps, &msg).await,
        buttons::ALERT_CHECK_NOW => alerts::check_now(&bot, &deps, &msg).await,
        buttons::ALERT_CHANGE_REGION => alerts::change_region(&bot, &dialogue, &deps, &msg).await,
        buttons::BACK | buttons::BACK_SPACED => back_to_main(&bot, &msg).await,
        _ => Ok(()),
    }
}

async fn back_to_main(bot: &Bot, msg: &Message) -> HandlerResult {
    bot.send_message(msg.chat.id, "Главное меню:")
        .reply_markup(menu::main_menu())
        .await?;
    Ok(())
}
