use std::sync::Arc;

use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;

use vartabot::core::{config, init_logger, log_token_configuration};
use vartabot::services::alerts::AlertsClient;
use vartabot::services::github::CommitsClient;
use vartabot::services::regions::RegionsClient;
use vartabot::services::weather::WeatherClient;
use vartabot::storage::create_pool;
use vartabot::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps, State};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logger(&config::LOG_FILE_PATH)?;
    log_token_configuration();

    // A panic in one handler must not take the dispatcher down silently.
    std::panic::set_hook(Box::new(|info| {
        log::error!("Panic: {}", info);
    }));

    let db_pool = Arc::new(create_pool(&config::DATABASE_PATH)?);
    log::info!("Database ready at {}", *config::DATABASE_PATH);

    let deps = HandlerDeps::new(
        db_pool,
        Arc::new(RegionsClient::from_env()?),
        Arc::new(AlertsClient::from_env()?),
        Arc::new(WeatherClient::from_env()?),
        Arc::new(CommitsClient::from_env()?),
    );

    let bot = create_bot()?;
    setup_bot_commands(&bot).await?;
    log::info!("Starting dispatcher");

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![InMemStorage::<State>::new(), deps])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    log::info!("Dispatcher stopped");
    Ok(())
}
