//! Demo content for an empty database.

use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{
    ArticleRepository, CategoryRepository, PasswordHasher, UserRepository,
};
use crate::domain::types::{Article, ArticleStatus, Category, User};
use crate::error::NewsServiceError;

/// Password shared by every seeded account.
pub const SEED_PASSWORD: &str = "password123";

/// (name, description)
pub const SEED_CATEGORIES: &[(&str, &str)] = &[
    ("Education", "Related to education, school, and college"),
    ("Entertainment", "Related to entertainment, movies, and series"),
    ("Health", "Related to health, medical, and fitness"),
    ("Music", "Related to music, songs, and albums"),
    ("Technology", "Related to technology, programming, and computing"),
];

/// (name, email). Seeded accounts are already verified.
pub const SEED_USERS: &[(&str, &str)] = &[
    ("Gojo Satoru", "gojo@gmail.com"),
    ("Ryomen Sukuna", "sukuna@gmail.com"),
];

pub struct SeedArticle {
    pub title: &'static str,
    pub slug: &'static str,
    pub thumbnail: &'static str,
    pub content: &'static str,
    /// Index into [`SEED_CATEGORIES`].
    pub category: usize,
    /// Index into [`SEED_USERS`].
    pub author: usize,
    pub tags: &'static [&'static str],
}

pub const SEED_ARTICLES: &[SeedArticle] = &[
    SeedArticle {
        title: "The Future of AI in Education",
        slug: "future-of-ai-in-education",
        thumbnail: "https://example.com/images/ai-education.jpg",
        content: "Artificial Intelligence is revolutionizing the education sector...",
        category: 0,
        author: 0,
        tags: &["ai", "education"],
    },
    SeedArticle {
        title: "Top 10 Movies of 2024",
        slug: "top-10-movies-2024",
        thumbnail: "https://example.com/images/movies-2024.jpg",
        content: "2024 has been an exceptional year for cinema. Here are our top picks...",
        category: 1,
        author: 1,
        tags: &["movies"],
    },
    SeedArticle {
        title: "Breakthrough in Cancer Research",
        slug: "breakthrough-cancer-research",
        thumbnail: "https://example.com/images/cancer-research.jpg",
        content: "Scientists have made a groundbreaking discovery in cancer treatment...",
        category: 2,
        author: 0,
        tags: &["research", "medicine"],
    },
    SeedArticle {
        title: "The Rise of K-Pop Globally",
        slug: "rise-of-kpop-globally",
        thumbnail: "https://example.com/images/kpop.jpg",
        content: "K-Pop has taken the world by storm. We explore its global impact...",
        category: 3,
        author: 1,
        tags: &["k-pop"],
    },
    SeedArticle {
        title: "Quantum Computing: A New Era",
        slug: "quantum-computing-new-era",
        thumbnail: "https://example.com/images/quantum-computing.jpg",
        content: "Quantum computing is set to revolutionize technology as we know it...",
        category: 4,
        author: 0,
        tags: &["research", "computing"],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Users, categories or articles already existed; nothing was written.
    Skipped,
    Seeded {
        categories: usize,
        users: usize,
        articles: usize,
    },
}

pub struct SeedUseCase<U, C, A, H>
where
    U: UserRepository,
    C: CategoryRepository,
    A: ArticleRepository,
    H: PasswordHasher,
{
    pub users: U,
    pub categories: C,
    pub articles: A,
    pub hasher: H,
}

impl<U, C, A, H> SeedUseCase<U, C, A, H>
where
    U: UserRepository,
    C: CategoryRepository,
    A: ArticleRepository,
    H: PasswordHasher,
{
    /// Insert the demo set once. Any existing user, category or article makes
    /// this a no-op, so running it twice never duplicates rows.
    pub async fn execute(&self) -> Result<SeedOutcome, NewsServiceError> {
        if self.users.count().await? > 0
            || !self.categories.list().await?.is_empty()
            || !self.articles.list().await?.is_empty()
        {
            tracing::info!("database already has data, seeding skipped");
            return Ok(SeedOutcome::Skipped);
        }

        let mut category_ids = Vec::with_capacity(SEED_CATEGORIES.len());
        for (name, description) in SEED_CATEGORIES {
            let category = Category {
                id: Uuid::now_v7(),
                name: (*name).to_owned(),
                description: (*description).to_owned(),
            };
            self.categories.create(&category).await?;
            tracing::info!(name, "seeded category");
            category_ids.push(category.id);
        }

        let password_hash = self.hasher.hash(SEED_PASSWORD).await?;
        let mut user_ids = Vec::with_capacity(SEED_USERS.len());
        for (name, email) in SEED_USERS {
            let now = Utc::now();
            let user = User {
                id: Uuid::now_v7(),
                name: (*name).to_owned(),
                email: (*email).to_owned(),
                password_hash: password_hash.clone(),
                is_verified: true,
                created_at: now,
                updated_at: now,
            };
            self.users.create(&user).await?;
            tracing::info!(email, "seeded user");
            user_ids.push(user.id);
        }

        for seed in SEED_ARTICLES {
            let now = Utc::now();
            let article = Article {
                id: Uuid::now_v7(),
                title: seed.title.to_owned(),
                slug: seed.slug.to_owned(),
                thumbnail: seed.thumbnail.to_owned(),
                content: seed.content.to_owned(),
                category_id: category_ids[seed.category],
                author_id: user_ids[seed.author],
                status: ArticleStatus::Published,
                created_at: now,
                updated_at: now,
            };
            let tags: Vec<String> = seed.tags.iter().map(|t| (*t).to_owned()).collect();
            self.articles.create_with_tags(&article, &tags).await?;
            tracing::info!(slug = seed.slug, "seeded article");
        }

        Ok(SeedOutcome::Seeded {
            categories: category_ids.len(),
            users: user_ids.len(),
            articles: SEED_ARTICLES.len(),
        })
    }
}
