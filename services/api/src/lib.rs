mod cli;
mod infra;
mod inspect;
mod routes;
mod server;

use privilege_portal::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
