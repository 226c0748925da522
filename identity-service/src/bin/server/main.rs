use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::PasswordHasher;
use identity_service::account::hashing::HashingPool;
use identity_service::account::ports::AccountServicePort;
use identity_service::account::service::AccountService;
use identity_service::config::Config;
use identity_service::inbound::http::router::create_router;
use identity_service::repositories::InMemoryCredentialStore;
use identity_service::repositories::PostgresCredentialStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "identity_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "identity-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        persistence = if config.database.is_some() { "postgresql" } else { "memory" },
        token_ttl_seconds = config.jwt.ttl_seconds,
        hashing_memory_kib = config.hashing.memory_kib,
        hashing_iterations = config.hashing.iterations,
        "Configuration loaded"
    );

    // Secret and ttl are validated here, once, before anything listens.
    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        config.jwt.token_ttl()?,
    )?);

    let workers = config
        .hashing
        .workers
        .unwrap_or_else(HashingPool::default_workers);
    let hashing = Arc::new(HashingPool::new(
        PasswordHasher::with_params(config.hashing.params())?,
        workers,
        Duration::from_millis(config.hashing.timeout_ms),
    )?);
    tracing::info!(workers, "Password hashing pool ready");

    let account_service: Arc<dyn AccountServicePort> = match &config.database {
        Some(database) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(database.max_connections)
                .connect(&database.url)
                .await?;
            tracing::info!(
                max_connections = database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            Arc::new(AccountService::new(
                Arc::new(PostgresCredentialStore::new(pg_pool)),
                hashing,
                Arc::clone(&authenticator),
            ))
        }
        None => {
            tracing::warn!("No database configured, credentials are kept in memory");
            Arc::new(AccountService::new(
                Arc::new(InMemoryCredentialStore::new()),
                hashing,
                Arc::clone(&authenticator),
            ))
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(account_service, authenticator);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}
