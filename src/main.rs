use std::process::ExitCode;

use dotenvy::dotenv;
use tracing::{error, info};

use notely::logging::init_tracing;
use notely::metrics::{init_metrics, metrics_router};
use notely::router::init_router;
use notely::state::init_app_state;
use notely_config::ServerConfig;
use notely_db::run_migrations;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    let guards = match init_tracing() {
        Ok(guards) => guards,
        Err(e) => {
            eprintln!("Failed to initialize tracing: {e}");
            return ExitCode::FAILURE;
        }
    };

    let code = match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = ?e, "Server failed");
            ExitCode::FAILURE
        }
    };

    // Flushes the non-blocking file writers
    drop(guards);
    code
}

async fn run() -> anyhow::Result<()> {
    let state = init_app_state().await?;
    run_migrations(&state.db).await?;

    let mut app = init_router(state);
    if let Some(handle) = init_metrics()? {
        app = app.merge(metrics_router(handle));
    }

    let server_config = ServerConfig::from_env();
    let addr = server_config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(addr = %addr, "Server listening");
    info!("Swagger UI available at http://{addr}/swagger-ui");
    info!("Scalar UI available at http://{addr}/scalar");

    axum::serve(listener, app).await?;

    Ok(())
}
