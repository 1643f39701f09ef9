use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sea_orm::{Database, DatabaseConnection};
use tracing::info;

use newsroom_auth_types::token::SessionIssuer;
use newsroom_core::tracing::init_tracing;
use newsroom_news::config::NewsConfig;
use newsroom_news::infra::db::{DbArticleRepository, DbCategoryRepository, DbUserRepository};
use newsroom_news::infra::mailer::SmtpMailer;
use newsroom_news::infra::password::BcryptHasher;
use newsroom_news::infra::storage::LocalThumbnailStore;
use newsroom_news::router::build_router;
use newsroom_news::state::AppState;
use newsroom_news::usecase::seed::{SeedOutcome, SeedUseCase};
use newsroom_news_migration::{Migrator, MigratorTrait};

#[derive(Parser)]
#[command(about = "News platform API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API (default)
    Serve,
    /// Fill an empty database with demo categories, users and articles
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real environment variables win.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    let config = NewsConfig::from_env()?;

    let db = Database::connect(&config.database_url)
        .await
        .context("connect to database")?;
    Migrator::up(&db, None).await.context("run migrations")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config, db).await,
        Command::Seed => seed(&config, db).await,
    }
}

async fn seed(config: &NewsConfig, db: DatabaseConnection) -> anyhow::Result<()> {
    let usecase = SeedUseCase {
        users: DbUserRepository { db: db.clone() },
        categories: DbCategoryRepository { db: db.clone() },
        articles: DbArticleRepository { db },
        hasher: BcryptHasher {
            cost: config.bcrypt_cost,
        },
    };
    match usecase.execute().await.context("seed database")? {
        SeedOutcome::Skipped => info!("database already contains data, seeder not executed"),
        SeedOutcome::Seeded {
            categories,
            users,
            articles,
        } => info!(categories, users, articles, "database seeded"),
    }
    Ok(())
}

async fn serve(config: NewsConfig, db: DatabaseConnection) -> anyhow::Result<()> {
    let mailer = SmtpMailer::new(&config.mail)?;
    if config.mail.host.is_none() {
        tracing::warn!("MAIL_HOST not set, outgoing email is disabled");
    }

    let state = AppState {
        db,
        session: Arc::new(SessionIssuer::new(&config.jwt_secret)),
        mailer,
        thumbnails: LocalThumbnailStore {
            dir: config.upload_dir.clone(),
        },
        hasher: BcryptHasher {
            cost: config.bcrypt_cost,
        },
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.news_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind {addr}"))?;

    info!("news service listening on {addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
