use std::process;

use display::Display;
use elspeth::{start, Config, Gateway};
use telemetry::Client;

use log::{error, info};
use tokio::signal::unix::{signal, SignalKind};
use tokio_util::sync::CancellationToken;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    pretty_env_logger::init_timed();

    info!("elspeth version {VERSION}");

    let config = Config::from_env().unwrap_or_else(|err| {
        error!("{err}");
        process::exit(1);
    });

    let client = Client::new(
        &config.api_base_url,
        config.credentials.clone(),
        config.api_timeout,
    )
    .unwrap_or_else(|err| {
        error!("invalid API_BASE_URL: {err}");
        process::exit(1);
    });

    let connect = || async {
        let context =
            display::connect(&config.display_address, config.display_port, config.unit_id)
                .await?;
        Ok::<_, display::Error>(Display::new(context, config.layout))
    };

    let (display, rooms) = start(&client, connect).await.unwrap_or_else(|err| {
        error!("unable to start: {err}");
        process::exit(1);
    });

    let shutdown = CancellationToken::new();
    tokio::spawn(wait_for_signal(shutdown.clone()));

    let mut gateway = Gateway::new(client, display, rooms, config.timing);
    gateway.run(shutdown).await;
    gateway.close().await;

    info!("stopped");
}

async fn wait_for_signal(shutdown: CancellationToken) {
    match signal(SignalKind::terminate()) {
        Ok(mut terminate) => {
            tokio::select! {
                _ = terminate.recv() => info!("got SIGTERM, exiting..."),
                _ = tokio::signal::ctrl_c() => info!("got SIGINT, exiting..."),
            }
        }
        Err(err) => {
            error!("unable to listen for SIGTERM: {err}");

            if let Err(err) = tokio::signal::ctrl_c().await {
                error!("unable to listen for SIGINT: {err}");
                return;
            }

            info!("got SIGINT, exiting...");
        }
    }

    shutdown.cancel();
}
