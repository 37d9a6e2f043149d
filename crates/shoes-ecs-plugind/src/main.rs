mod handshake;

use std::{io::Write, sync::Arc};

use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tracing::{error, info};

use shoes_ecs_api::{EcsTaskAdapter, HealthServer, HealthService, ShoesServer, ShoesService};
use shoes_ecs_core::{ecs::AwsConnector, launcher::TaskLauncher};
use shoes_ecs_model::AppConfig;
use shoes_ecs_observe::{LoggerConfig, init_logger};

use crate::handshake::{HandshakeLine, MAGIC_COOKIE_KEY, cookie_matches};

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    // 1) refuse to run outside a plugin host
    if !cookie_matches(std::env::var(MAGIC_COOKIE_KEY).ok().as_deref()) {
        eprintln!(
            "This binary is a plugin. These are not meant to be executed directly.\n\
             Please execute the program that consumes these plugins, which will\n\
             load any plugins automatically."
        );
        std::process::exit(1);
    }

    // 2) logger (stderr)
    init_logger(&LoggerConfig::from_env()?)?;

    // 3) configuration, fatal before the handshake
    let config = match AppConfig::from_env() {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return Err(e.into());
        }
    };
    info!(
        cluster = config.cluster(),
        task_definition = config.task_definition(),
        subnet = config.subnet_id(),
        region = config.region(),
        no_wait = config.no_wait().is_enabled(),
        "configuration loaded"
    );

    // 4) services
    let adapter = EcsTaskAdapter::new(config, TaskLauncher::new(AwsConnector::new()));
    let shoes = ShoesService::new(Arc::new(adapter));

    // 5) listen and announce
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", HandshakeLine { addr })?;
        stdout.flush()?;
    }
    info!(%addr, "serving shoes plugin");

    Server::builder()
        .add_service(HealthServer::new(HealthService))
        .add_service(ShoesServer::new(shoes))
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown_signal())
        .await?;

    info!("plugin stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = term.recv() => {}
                }
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    info!("shutdown requested");
}
