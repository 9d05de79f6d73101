use log::{error, info, warn};
use skibidict_api::{build_router, AppState, ServerConfig};
use skibidict_core::{init_logging, Store};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging(&config.core.log_level, config.core.log_dir.as_deref()) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=server_exit module=api status=error error={}", err);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: ServerConfig) -> Result<(), String> {
    let store = Store::open(&config.core.db_path).map_err(|err| {
        format!(
            "failed to open database `{}`: {err}",
            config.core.db_path.display()
        )
    })?;

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|err| format!("failed to bind {}: {err}", config.bind))?;
    info!(
        "event=server_start module=api status=ok bind={} db_path={}",
        config.bind,
        config.core.db_path.display()
    );

    axum::serve(listener, build_router(AppState::new(store)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| format!("server error: {err}"))?;

    info!("event=server_stop module=api status=ok");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!("event=signal_install module=api status=error signal=ctrl_c error={}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!("event=signal_install module=api status=error signal=sigterm error={}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("event=server_shutdown module=api status=start");
}
