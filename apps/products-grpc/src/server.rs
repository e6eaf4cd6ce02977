//! gRPC server initialization and lifecycle management
//!
//! - Tracing initialization
//! - Database connection (with retry) and migrations
//! - Domain wiring: dao → service → policy → gRPC handlers
//! - Health service (grpc.health.v1.Health) tracking database reachability
//! - Graceful shutdown on Ctrl-C / SIGTERM

use std::time::Duration;

use core_config::server::GrpcServerConfig;
use core_config::{Environment, FromEnv, env_parse};
use database::common::RetryConfig;
use database::postgres::{self, DatabaseConnection, PostgresConfig};
use domain_products::{PgProductDao, ProductPolicy, ProductService};
use eyre::{Result, WrapErr};
use migration::Migrator;
use rpc::products::v1::product_service_server::{ProductServiceServer, SERVICE_NAME};
use tonic::codec::CompressionEncoding;
use tonic::transport::Server;
use tonic_health::ServingStatus;
use tonic_health::server::{HealthReporter, health_reporter};
use tracing::{info, warn};

use crate::service::ProductServiceImpl;

const HEALTH_PROBE_INTERVAL: Duration = Duration::from_secs(10);

/// Run the gRPC server until a shutdown signal arrives.
///
/// Environment:
/// - `DATABASE_URL` and `DB_*` pool settings (see [`PostgresConfig`])
/// - `DB_CONNECT_RETRIES`, `DB_RETRY_*` (see [`RetryConfig`])
/// - `GRPC_HOST`, `GRPC_PORT`, `GRPC_REQUEST_TIMEOUT_SECS` (see [`GrpcServerConfig`])
/// - `RUN_MIGRATIONS` (default: true)
pub async fn run() -> Result<()> {
    let environment = Environment::from_env();
    core_config::tracing::init_tracing(&environment);

    let db_config = PostgresConfig::from_env().wrap_err("Failed to load database configuration")?;
    let retry = RetryConfig::from_env().wrap_err("Failed to load retry configuration")?;
    let server_config = GrpcServerConfig::from_env().wrap_err("Failed to load server configuration")?;
    let run_migrations = env_parse("RUN_MIGRATIONS", true).wrap_err("Invalid RUN_MIGRATIONS")?;

    info!("Connecting to database...");
    let db = postgres::connect_from_config_with_retry(db_config, Some(retry))
        .await
        .wrap_err("Failed to connect to database")?;

    if run_migrations {
        postgres::run_migrations::<Migrator>(&db, "products")
            .await
            .wrap_err("Failed to apply migrations")?;
    }

    let policy = ProductPolicy::new(ProductService::new(PgProductDao::new(db.clone())));
    let products = ProductServiceImpl::new(policy);

    let addr = server_config
        .socket_addr()
        .wrap_err_with(|| format!("Invalid listen address {}", server_config.address()))?;

    let (reporter, health_service) = health_reporter();
    set_status(&reporter, ServingStatus::Serving).await;
    tokio::spawn(watch_database(db, reporter));

    info!(
        %addr,
        request_timeout_secs = server_config.request_timeout.as_secs(),
        "ProductService listening"
    );

    Server::builder()
        .timeout(server_config.request_timeout)
        .add_service(health_service)
        .add_service(
            ProductServiceServer::new(products)
                .accept_compressed(CompressionEncoding::Zstd)
                .send_compressed(CompressionEncoding::Zstd),
        )
        .serve_with_shutdown(addr, shutdown_signal())
        .await
        .wrap_err("gRPC server failed")?;

    info!("ProductService stopped");
    Ok(())
}

/// Report both the named service and the empty name, which generic probes query.
async fn set_status(reporter: &HealthReporter, status: ServingStatus) {
    reporter.set_service_status(SERVICE_NAME, status).await;
    reporter.set_service_status("", status).await;
}

/// Flip the health status whenever database reachability changes.
async fn watch_database(db: DatabaseConnection, reporter: HealthReporter) {
    let mut serving = true;
    let mut interval = tokio::time::interval(HEALTH_PROBE_INTERVAL);

    loop {
        interval.tick().await;
        let healthy = match postgres::check_health(&db).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Database health probe failed");
                false
            }
        };

        if healthy != serving {
            serving = healthy;
            let status = if healthy {
                ServingStatus::Serving
            } else {
                ServingStatus::NotServing
            };
            info!(?status, "Health status changed");
            set_status(&reporter, status).await;
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
