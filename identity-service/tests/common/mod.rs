use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::HashingParams;
use auth::ManualClock;
use auth::PasswordHasher;
use chrono::Utc;
use identity_service::account::hashing::HashingPool;
use identity_service::account::service::AccountService;
use identity_service::inbound::http::router::create_router;
use identity_service::repositories::InMemoryCredentialStore;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TOKEN_TTL_SECONDS: i64 = 60;

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: Arc<InMemoryCredentialStore>,
    pub clock: Arc<ManualClock>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(InMemoryCredentialStore::new());
        let clock = Arc::new(ManualClock::new(Utc::now()));

        // Minimal Argon2 cost keeps the suite fast; the format is unchanged.
        let hasher = PasswordHasher::with_params(HashingParams {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        })
        .expect("Failed to build password hasher");
        let hashing = Arc::new(
            HashingPool::new(hasher, 4, Duration::from_secs(10))
                .expect("Failed to build hashing pool"),
        );

        let authenticator = Arc::new(
            Authenticator::with_clock(
                JWT_SECRET,
                chrono::Duration::seconds(TOKEN_TTL_SECONDS),
                clock.clone(),
            )
            .expect("Failed to build authenticator"),
        );

        let account_service = Arc::new(AccountService::new(
            Arc::clone(&store),
            hashing,
            Arc::clone(&authenticator),
        ));

        let router = create_router(account_service, authenticator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            store,
            clock,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Register an account, returning the response
    pub async fn register(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/register")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in, returning the response
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/login")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register and log in, returning the issued token
    pub async fn register_and_login(&self, email: &str, password: &str) -> String {
        self.register(email, password).await;
        let body: serde_json::Value = self
            .login(email, password)
            .await
            .json()
            .await
            .expect("Failed to parse response");
        body["token"]
            .as_str()
            .expect("Login response carries a token")
            .to_string()
    }
}

/// Throwaway Postgres database with migrations applied.
///
/// Needs `DATABASE__URL` pointing at a server where the user may create
/// databases; without it `new` returns `None` and the caller skips.
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
    server_url: String,
}

impl TestDb {
    /// Create a new test database with a unique name
    pub async fn new() -> Option<Self> {
        let Ok(server_url) = std::env::var("DATABASE__URL") else {
            eprintln!("DATABASE__URL not set, skipping Postgres test");
            return None;
        };

        let db_name = format!(
            "test_identity_service_{}",
            uuid::Uuid::new_v4().to_string().replace('-', "_")
        );

        let mut conn = PgConnection::connect(&server_url)
            .await
            .expect("Failed to connect to Postgres");

        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = server_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse DATABASE__URL")
            .database(&db_name);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Some(Self {
            pool,
            db_name,
            server_url,
        })
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        // Database cleanup happens asynchronously
        let db_name = self.db_name.clone();
        let server_url = self.server_url.clone();
        tokio::spawn(async move {
            if let Ok(mut conn) = PgConnection::connect(&server_url).await {
                let _ = conn
                    .execute(
                        format!(
                            r#"SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}';"#,
                            db_name
                        )
                        .as_str(),
                    )
                    .await;

                let _ = conn
                    .execute(format!(r#"DROP DATABASE IF EXISTS "{}";"#, db_name).as_str())
                    .await;
            }
        });
    }
}
