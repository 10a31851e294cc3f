#[tokio::main]
async fn main() {
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tower_http::cors::CorsLayer;
    use tower_http::trace::TraceLayer;
    use tradepost::core::auth::{
        ApiState, AuthenticationService, JwtService, LoginRateLimiter, RegistrationService,
        auth_router,
    };
    use tradepost::core::config::Config;
    use tradepost::core::db::{AccountRepository, DbConfig, create_pool_with_migrations};

    // Load .env file (if exists)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load application config from environment variables
    let config = Config::from_env();

    // Log config status (without revealing secrets)
    tracing::info!(
        "Config loaded: database={}, jwt_secret={}",
        config.has_database(),
        config.has_jwt_secret()
    );

    // Connect to PostgreSQL and apply pending migrations
    let db_config = DbConfig::from_env().expect("DATABASE_URL must be set");
    let pool = create_pool_with_migrations(&db_config)
        .await
        .expect("failed to connect to database");

    // Token signing service
    let tokens = JwtService::from_env().expect("JWT_SECRET must be set");

    // Wire the services with explicitly-owned collaborators
    let accounts = AccountRepository::new(pool);
    let limiter = Arc::new(LoginRateLimiter::default());
    let state = ApiState {
        registration: RegistrationService::new(accounts.clone(), tokens.clone()),
        authentication: AuthenticationService::new(accounts, tokens, limiter),
    };

    let app = auth_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = config
        .listen_addr()
        .parse()
        .expect("LISTEN_ADDR must be a valid host:port");

    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(
        listener,
        // ConnectInfo feeds the peer address to the login rate limiter
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}
