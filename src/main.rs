use costume_rental::{
    adapters::memory::InMemoryBookingStore,
    adapters::mock::AccountDirectory as MockAccountDirectory,
    adapters::postgres::PostgresBookingStore,
    api::{handlers::AppState, router::create_router},
    application::ServiceDependencies,
    config::AppConfig,
    domain::Costume,
    ports::BookingStore,
};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// JSONの衣装カタログを読み込む（インメモリストア用）
async fn load_catalog(path: &Path) -> Result<Vec<Costume>, Box<dyn std::error::Error>> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}

#[tokio::main]
async fn main() {
    // Load configuration (.env is read here)
    let config = AppConfig::from_env().expect("Invalid configuration");

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Select the booking store
    let booking_store: Arc<dyn BookingStore> = match &config.database_url {
        Some(database_url) => {
            tracing::info!(max_connections = config.max_connections, "Using PostgreSQL store");

            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(database_url)
                .await
                .expect("Failed to connect to database");

            if config.run_migrations {
                sqlx::migrate!("./migrations")
                    .run(&pool)
                    .await
                    .expect("Failed to run migrations");
                tracing::info!("Migrations applied");
            }

            Arc::new(PostgresBookingStore::new(pool))
        }
        None => {
            let costumes = match &config.costume_catalog {
                Some(path) => load_catalog(path)
                    .await
                    .expect("Failed to load costume catalog"),
                None => Vec::new(),
            };

            tracing::warn!(
                costumes = costumes.len(),
                "DATABASE_URL not set, using in-memory store"
            );

            Arc::new(InMemoryBookingStore::with_costumes(costumes))
        }
    };

    // Accounts are managed elsewhere; any user_id is accepted
    let account_directory = Arc::new(MockAccountDirectory::permissive());

    // Create service dependencies
    let service_deps = ServiceDependencies {
        booking_store,
        account_directory,
    };

    // Create application state
    let app_state = Arc::new(AppState { service_deps });

    // Create router
    let app = create_router(app_state);

    // Server configuration
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    // Start server
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
