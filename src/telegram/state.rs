//! Per-user dialogue state
//!
//! One `State` value per chat, kept in teloxide's `InMemStorage`: created
//! when a flow starts, replaced on every step, removed (back to `Idle`) on
//! termination or an explicit «Назад». Abandoned dialogues simply stay at
//! their stage; there is no expiry.

use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::Dialogue;

use crate::wizard::WizardStage;

pub type BotDialogue = Dialogue<State, InMemStorage<State>>;

#[derive(Clone, Default)]
pub enum State {
    #[default]
    Idle,
    /// Weather flow: waiting for a city name.
    AwaitingWeatherCity,
    /// Plans flow.
    AwaitingPlanText,
    AwaitingPlanEditId,
    AwaitingPlanNewText {
        plan_id: i64,
    },
    AwaitingPlanDeleteId,
    /// GitHub flow.
    AwaitingGithubOwner,
    AwaitingGithubRepo {
        owner: String,
    },
    /// Region selection wizard; the stage carries its own session data.
    Region(WizardStage),
}
