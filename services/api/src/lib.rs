mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use theme_metrics::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
