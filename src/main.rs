use crate::{
    backend::AvailabilityBackend, configuration::Configuration,
    configuration_handler::ConfigurationHandler, file_availability::FileAvailability,
    http::{create_app, create_error_app},
    local_availability::LocalAvailability,
    roster::bootstrap,
};
use axum::Router;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod aggregate;
mod availability;
mod backend;
mod codec;
mod configuration;
mod configuration_handler;
mod file_availability;
mod http;
mod local_availability;
mod roster;
#[cfg(test)]
mod testutils;
mod types;

fn build_app<T: AvailabilityBackend>(backend: T, configuration: &impl Configuration) -> Router {
    match bootstrap(&configuration.config_dir(), &backend) {
        Ok(roster) => {
            info!(players = ?roster.players(), "Roster ready");
            create_app(backend, roster)
        }
        Err(err) => {
            error!(?err, "Failed to set up the roster. Serving the error page only.");
            create_error_app()
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("######################");
    println!("# Survivor Scheduler #");
    println!("######################");

    let configuration = ConfigurationHandler::parse_arguments();

    let address = format!("0.0.0.0:{}", configuration.port());
    println!("Listening on:\n{address}");
    let listener = match tokio::net::TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(?err, "Failed to bind {address}");
            return ExitCode::FAILURE;
        }
    };

    let app = if let Some(data_dir) = configuration.data_dir() {
        match FileAvailability::new(data_dir) {
            Ok(backend) => build_app(backend, &configuration),
            Err(err) => {
                error!(?err, "Failed to open the data directory");
                return ExitCode::FAILURE;
            }
        }
    } else {
        warn!("No data directory configured. Availability is kept in memory only.");
        build_app(LocalAvailability::default(), &configuration)
    };

    if let Err(err) = axum::serve(listener, app).await {
        error!(?err, "Server stopped");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
