use std::sync::Arc;

use config::Config;
use repositories::{
    comments_repo::CommentsRepository, memory_repo::MemoryRepo, posts_repo::PostsRepository,
    PostgresRepo,
};
use routes::create_routes;
use services::{comments::CommentsService, posts::PostsService};
use sqlx::postgres::PgPoolOptions;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use self::errors::{Error, Result};

mod config;
mod errors;
mod handlers;
mod models;
mod repositories;
mod routes;
mod services;

#[derive(Clone)]
pub struct AppState {
    pub posts_service: PostsService,
    pub comments_service: CommentsService,
}

impl AppState {
    pub fn new<R>(repo: Arc<R>) -> Self
    where
        R: PostsRepository + CommentsRepository + 'static,
    {
        let posts_service = PostsService::new(repo.clone(), repo.clone());
        let comments_service = CommentsService::new(posts_service.clone(), repo);

        Self {
            posts_service,
            comments_service,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "social_feed=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::init() {
        Ok(config) => config,
        Err(err) => {
            error!("🔥 {}", err);
            std::process::exit(1);
        }
    };

    let app_state = match build_state(&config).await {
        Ok(app_state) => app_state,
        Err(err) => {
            error!("🔥 Failed to prepare the store: {}", err);
            std::process::exit(1);
        }
    };

    let app = create_routes(Arc::new(app_state));

    let address = config.bind_address();
    let listener = match tokio::net::TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("🔥 Failed to bind {}: {}", address, err);
            std::process::exit(1);
        }
    };

    info!("🚀 Listening on {}", address);
    if let Err(err) = axum::serve(listener, app).await {
        error!("🔥 Server error: {}", err);
        std::process::exit(1);
    }
}

async fn build_state(config: &Config) -> Result<AppState> {
    let Some(database_url) = config.database_url.as_deref() else {
        warn!("DATABASE_URL is not set, keeping data in memory");
        return Ok(AppState::new(Arc::new(MemoryRepo::new())));
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(database_url)
        .await?;
    info!("✅ Connection to the database is successful!");

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("✅ Migrations applied");

    Ok(AppState::new(Arc::new(PostgresRepo::new(pool))))
}
