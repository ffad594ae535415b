//! JobGrid Platform Server
//!
//! Production server for the job-board REST APIs:
//! - User APIs: register, login, logout, profile update
//! - Company APIs: register, get, update
//! - Job APIs: post, browse with search/filter, admin listing
//! - Application APIs: apply, applied jobs, applicants, status update
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `JG_API_PORT` | `8080` | HTTP API port |
//! | `JG_MONGO_URL` | `mongodb://localhost:27017` | MongoDB connection URL |
//! | `JG_MONGO_DB` | `jobgrid` | MongoDB database name |
//! | `JG_JWT_SECRET` | - | Shared HMAC secret for access tokens (required) |
//! | `JG_JWT_ISSUER` | `jobgrid` | JWT issuer claim |
//! | `JG_TOKEN_TTL_SECS` | `86400` | Access token lifetime |
//! | `JG_MEDIA_UPLOAD_URL` | `http://localhost:9000/upload` | Media host upload endpoint |
//! | `JG_MEDIA_API_KEY` | - | Bearer credential for the media host |
//! | `RUST_LOG` | `info` | Log level |

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{Extension, Router};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use jg_media::{HttpMediaStore, MediaConfig, MediaStore};
use jg_platform::api::{
    applications_router, companies_router, jobs_router, monitoring_router, users_router, AppState,
    ApplicationsState, CompaniesState, JobsState, PlatformApiDoc, UsersState,
};
use jg_platform::repository::{
    ensure_indexes, ApplicationRepository, CompanyRepository, JobRepository, UserRepository,
};
use jg_platform::service::{ApplicationService, AuthConfig, AuthService, PasswordService};

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_or_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    info!("Starting JobGrid Platform Server");

    // Configuration from environment
    let api_port: u16 = env_or_parse("JG_API_PORT", 8080);
    let mongo_url = env_or("JG_MONGO_URL", "mongodb://localhost:27017");
    let mongo_db = env_or("JG_MONGO_DB", "jobgrid");
    let jwt_secret =
        std::env::var("JG_JWT_SECRET").context("JG_JWT_SECRET must be set")?;
    let jwt_issuer = env_or("JG_JWT_ISSUER", "jobgrid");
    let token_ttl_secs: i64 = env_or_parse("JG_TOKEN_TTL_SECS", 86_400);
    let media_upload_url = env_or("JG_MEDIA_UPLOAD_URL", "http://localhost:9000/upload");
    let media_api_key = std::env::var("JG_MEDIA_API_KEY").ok();

    // Connect to MongoDB; the handle is opened here and passed into every
    // repository explicitly.
    info!("Connecting to MongoDB: {}/{}", mongo_url, mongo_db);
    let mongo_client = mongodb::Client::with_uri_str(&mongo_url).await?;
    let db = mongo_client.database(&mongo_db);

    // Unique indexes are the arbiter of the apply-once and unique-name
    // invariants.
    ensure_indexes(&db).await?;
    info!("Storage indexes ensured");

    // Initialize repositories
    let user_repo = Arc::new(UserRepository::new(&db));
    let company_repo = Arc::new(CompanyRepository::new(&db));
    let job_repo = Arc::new(JobRepository::new(&db));
    let application_repo = Arc::new(ApplicationRepository::new(&db));
    info!("Repositories initialized");

    // Initialize services
    let auth_service = Arc::new(AuthService::new(AuthConfig {
        secret_key: jwt_secret,
        issuer: jwt_issuer,
        token_ttl_secs,
    }));
    let password_service = Arc::new(PasswordService::default());
    let media_store: Arc<dyn MediaStore> = Arc::new(HttpMediaStore::new(MediaConfig {
        upload_url: media_upload_url,
        api_key: media_api_key,
    }));
    let application_service = Arc::new(ApplicationService::new(
        application_repo,
        job_repo.clone(),
        company_repo.clone(),
        user_repo.clone(),
    ));
    info!("Services initialized");

    // Create AppState for the auth extractor
    let app_state = AppState {
        auth_service: auth_service.clone(),
    };

    // Build API states
    let users_state = UsersState {
        user_repo,
        auth_service,
        password_service,
        media_store: media_store.clone(),
    };
    let companies_state = CompaniesState {
        company_repo: company_repo.clone(),
        media_store,
    };
    let jobs_state = JobsState {
        job_repo,
        company_repo,
    };
    let applications_state = ApplicationsState {
        application_service,
    };

    // Build the API router
    let app = Router::new()
        .nest("/api/v1/user", users_router(users_state))
        .nest("/api/v1/company", companies_router(companies_state))
        .nest("/api/v1/job", jobs_router(jobs_state))
        .nest("/api/v1/application", applications_router(applications_state))
        .merge(monitoring_router())
        // OpenAPI / Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/q/openapi", PlatformApiDoc::openapi()))
        // Auth middleware state
        .layer(Extension(app_state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any));

    // Start API server
    let api_addr = format!("0.0.0.0:{}", api_port);
    info!("API server listening on http://{}", api_addr);

    let api_listener = TcpListener::bind(&api_addr).await?;
    axum::serve(api_listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("JobGrid Platform Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
