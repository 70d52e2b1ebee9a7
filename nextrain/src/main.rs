use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use nextrain::credentials::{CredentialStore, load_or_bootstrap, prompt_for_credentials};
use nextrain::domain::StationCode;
use nextrain::format::format_board;
use nextrain::transport_api::{ApiError, TransportApiClient, TransportApiConfig};

/// Overrides the Transport API origin, e.g. to point at a local stub.
const API_URL_ENV: &str = "NEXTRAIN_API_URL";

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "nextrain=warn";

/// Show live departures from one station that call at another.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Station to depart from, e.g. KGX
    from: Option<String>,
    /// Station the service must call at, e.g. EDB
    to: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let (Some(from), Some(to)) = (cli.from, cli.to) else {
        println!("usage: nextrain FROM TO");
        return ExitCode::SUCCESS;
    };
    let from = StationCode::normalize(&from);
    let to = StationCode::normalize(&to);

    let store = match CredentialStore::user_default() {
        Ok(store) => Some(store),
        Err(e) => {
            warn!(error = %e, "credentials will not be saved");
            None
        }
    };

    let credential = match load_or_bootstrap(store.as_ref(), || {
        prompt_for_credentials(&mut io::stdin().lock(), &mut io::stdout())
    }) {
        Ok(credential) => credential,
        Err(e) => {
            error!(error = %e, "failed to read API credentials");
            return ExitCode::FAILURE;
        }
    };

    let mut config = TransportApiConfig::new();
    if let Ok(url) = std::env::var(API_URL_ENV) {
        config = config.with_base_url(url);
    }

    let client = match TransportApiClient::new(config, credential) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to create API client");
            return ExitCode::FAILURE;
        }
    };

    let board = match client.fetch_live_departures(&from, &to).await {
        Ok(board) => board,
        Err(e) => {
            error!(error = %e, "failed to get live departures");
            if let ApiError::Unauthorized { .. } = e
                && let Some(store) = &store
            {
                error!(
                    path = %store.path().display(),
                    "check the saved App ID and Key, or delete the file to enter new ones"
                );
            }
            return ExitCode::FAILURE;
        }
    };

    for line in format_board(&board) {
        println!("{line}");
    }

    ExitCode::SUCCESS
}
