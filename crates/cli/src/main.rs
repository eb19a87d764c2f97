use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod config;
mod output;

use bitmix_sdk::{Currency, MixClient};
use cli::{Cli, Command};
use config::EnvSettings;
use output::Rendered;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let env = EnvSettings::from_env()?;
    let rendered = run(cli, &env).await?;

    if let Some(text) = &rendered.text {
        println!("{}", text);
    }
    Ok(rendered.exit_code())
}

async fn run(cli: Cli, env: &EnvSettings) -> Result<Rendered> {
    let config = config::client_config(env, &cli.connection)?;
    info!(
        "endpoint: {} (proxy: {}, socks: {})",
        config.endpoint, config.network.proxy_mode, config.network.socks_addr
    );

    match cli.command {
        Command::Mix(args) => {
            let currency: Currency = args.currency.parse()?;
            let client = MixClient::new(config::apply_mix_args(config, &args))?;
            let order = client.mix(currency.as_str(), &args.output_address).await?;
            let letter = client.letter_of_guarantee(&order.id).await?;
            Ok(output::render_order(currency, &order, &letter))
        }
        Command::Check { id } => {
            let client = MixClient::new(config)?;
            let payload = client.check(&id).await?;
            Ok(output::render_payload(&payload))
        }
        Command::Letter { id } => {
            let client = MixClient::new(config)?;
            let letter = client.letter_of_guarantee(&id).await?;
            Ok(output::render_text(letter))
        }
    }
}
