mod batch;
mod cli;
mod infra;
mod routes;
mod server;

use school_match::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
