//! Biblios Server - Library Catalog
//!
//! A server-rendered web application for browsing and managing a book
//! catalog behind session-based access control.

use axum::{
    middleware,
    response::Redirect,
    routing::{get, post},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use biblios_server::{
    config::AppConfig,
    repository::Repository,
    services::{sessions::SessionService, Services},
    web, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("biblios_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Biblios Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Initialize the session store
    let sessions = SessionService::new(&config.redis.url, config.session.clone())
        .await
        .expect("Failed to connect to Redis");

    tracing::info!("Connected to session store");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, sessions);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(server_host.parse().expect("Invalid host address"), server_port);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/books") }))
        // Authentication
        .route("/auth/login", get(web::auth::login_page))
        .route(
            "/auth/registration",
            get(web::auth::registration_page).post(web::auth::register),
        )
        .route("/process_login", post(web::auth::process_login))
        .route("/logout", post(web::auth::logout))
        // Books
        .route("/books", get(web::books::index).post(web::books::create))
        .route("/books/new", get(web::books::new_form))
        .route(
            "/books/:id",
            get(web::books::show)
                .patch(web::books::update)
                .post(web::books::update),
        )
        .route("/books/:id/edit", get(web::books::edit_form))
        .route("/books/:id/delete", post(web::books::destroy))
        // Public JSON API
        .route("/api/health", get(web::api::health_check))
        .route("/api/ready", get(web::api::readiness_check))
        .route("/api/books", get(web::api::books_between))
        // Error page and static assets
        .route("/error", get(web::generic_error))
        .nest_service("/css", ServeDir::new("static/css"))
        .nest_service("/js", ServeDir::new("static/js"))
        .route_service("/favicon.ico", ServeFile::new("static/favicon.ico"))
        // Every request passes the access-policy gate before its handler.
        .layer(middleware::from_fn_with_state(
            state.clone(),
            web::policy::enforce,
        ))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new()),
        )
}
