use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(newsroom_news_migration::Migrator).await;
}
