use dotenvy::dotenv;
use poise::serenity_prelude::UserId;
use serenity::all::GatewayIntents;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};
use vpsload::commands::{self, Data};
use vpsload::config::Config;
use vpsload::error::BotError;
use vpsload::handlers::on_error;
use vpsload::services::system::MetricsCollector;

#[tokio::main]
async fn main() -> Result<(), BotError> {
    dotenv().ok();
    vpsload::logging::init();

    info!("Starting vpsload bot...");

    let config = Config::from_env()?;

    let intents = GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILDS;

    let mut owners = HashSet::new();
    match config.owner_id {
        Some(id) if id != 0 => {
            owners.insert(UserId::new(id));
        }
        _ => warn!("[WARN] CLIENT_ID not configured, no bot owners set"),
    }

    let collector = Arc::new(MetricsCollector::new(config.collector.clone()));
    info!(
        "[OK] Collector ready (disk path {}, timeout {:?})",
        config.collector.disk_path.display(),
        config.collector.query_timeout
    );

    let data = Data {
        collector,
        theme: Arc::new(config.theme.clone()),
        thresholds: config.thresholds,
    };

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![commands::ping::ping(), commands::vpsload::vpsload()],
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some("!".into()),
                ..Default::default()
            },
            owners,
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("[OK] Logged in as {}", ready.user.name);

                // Register slash commands globally
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!("[OK] Slash commands registered globally");

                Ok(data)
            })
        })
        .build();

    let mut client = serenity::Client::builder(&config.token, intents)
        .framework(framework)
        .await
        .map_err(|e| BotError::Client(format!("Failed to create client: {}", e)))?;

    client
        .start()
        .await
        .map_err(|e| BotError::Client(format!("Failed to initialize client: {}", e)))?;

    Ok(())
}
