use clap::Parser;

use hooklog::cmdargs::{Args, SubCommand};
use hooklog::config::{Config, ConfigError};
use hooklog::http::start_server;
use hooklog::logging::TracingSetup;
use hooklog::service::ServiceHandler;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> color_eyre::Result<()> {
    dotenv::dotenv().ok();
    color_eyre::install().ok();

    let args = Args::parse();
    let config = build_configuration(&args)?;

    TracingSetup::with_setup(config, |config| async move {
        let services = ServiceHandler::from_config(&config)?;

        match args.command {
            SubCommand::Serve => start_server(config, services).await?,
            SubCommand::Latest(latest_args) => {
                let events = services.store().latest(latest_args.count).await?;
                println!("{}", serde_json::to_string_pretty(&events)?);
            }
        }

        Ok(())
    })
    .await
}

fn build_configuration(args: &Args) -> Result<Config, ConfigError> {
    let mut config = Config::from_env();

    if let Some(t) = &args.telemetry_url {
        config.set_telemetry_url(t.clone());
    }

    if let Some(s) = &args.webhook_secret {
        config.set_webhook_secret(s);
    }

    if let Some(d) = &args.database_path {
        config.set_database_path(d);
    }

    if let Some(b) = &args.bind_ip {
        config.set_bind_ip(b);
    }

    config.validate_configuration()?;

    if let SubCommand::Latest(_) = args.command {
        config.require_database_path()?;
    }

    Ok(config)
}
