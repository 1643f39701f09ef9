use newsroom_news::domain::repository::PasswordHasher;
use newsroom_news::infra::password::BcryptHasher;
use newsroom_news::usecase::seed::{
    SEED_ARTICLES, SEED_CATEGORIES, SEED_PASSWORD, SEED_USERS, SeedOutcome, SeedUseCase,
};

use crate::helpers::{
    MockArticleRepo, MockCategoryRepo, MockUserRepo, test_category, test_hasher, test_user,
};

fn seeder(
    users: &MockUserRepo,
    categories: &MockCategoryRepo,
    articles: &MockArticleRepo,
) -> SeedUseCase<MockUserRepo, MockCategoryRepo, MockArticleRepo, BcryptHasher> {
    SeedUseCase {
        users: users.clone(),
        categories: categories.clone(),
        articles: articles.clone(),
        hasher: test_hasher(),
    }
}

#[tokio::test]
async fn should_seed_empty_database_once() {
    let users = MockUserRepo::empty();
    let categories = MockCategoryRepo::empty();
    let articles = MockArticleRepo::empty();

    let first = seeder(&users, &categories, &articles).execute().await.unwrap();
    assert_eq!(
        first,
        SeedOutcome::Seeded {
            categories: 5,
            users: 2,
            articles: 5,
        }
    );

    let second = seeder(&users, &categories, &articles).execute().await.unwrap();
    assert_eq!(second, SeedOutcome::Skipped);

    assert_eq!(
        categories.categories_handle().lock().unwrap().len(),
        SEED_CATEGORIES.len()
    );
    assert_eq!(users.users_handle().lock().unwrap().len(), SEED_USERS.len());
    assert_eq!(articles.articles_handle().lock().unwrap().len(), SEED_ARTICLES.len());
}

#[tokio::test]
async fn should_seed_verified_users_with_hashed_password() {
    let users = MockUserRepo::empty();
    seeder(&users, &MockCategoryRepo::empty(), &MockArticleRepo::empty())
        .execute()
        .await
        .unwrap();

    let seeded = users.users_handle().lock().unwrap().clone();
    for user in &seeded {
        assert!(user.is_verified, "{} should be verified", user.email);
        assert_ne!(user.password_hash, SEED_PASSWORD);
        assert!(
            test_hasher()
                .verify(SEED_PASSWORD, &user.password_hash)
                .await
                .unwrap()
        );
    }
}

#[tokio::test]
async fn should_link_articles_to_seeded_categories_authors_and_tags() {
    let users = MockUserRepo::empty();
    let categories = MockCategoryRepo::empty();
    let articles = MockArticleRepo::empty();
    seeder(&users, &categories, &articles).execute().await.unwrap();

    let category_ids: Vec<_> = categories
        .categories_handle()
        .lock()
        .unwrap()
        .iter()
        .map(|c| c.id)
        .collect();
    let user_ids: Vec<_> = users.users_handle().lock().unwrap().iter().map(|u| u.id).collect();

    let stored = articles.articles_handle().lock().unwrap().clone();
    for article in &stored {
        assert!(category_ids.contains(&article.category_id));
        assert!(user_ids.contains(&article.author_id));
    }

    let quantum = stored
        .iter()
        .find(|a| a.slug == "quantum-computing-new-era")
        .unwrap();
    assert_eq!(articles.tag_names_of(quantum.id), vec!["computing", "research"]);
    // "research" is shared by two articles but stored once.
    let research = articles
        .tags_handle()
        .lock()
        .unwrap()
        .iter()
        .filter(|t| t.name == "research")
        .count();
    assert_eq!(research, 1);
}

#[tokio::test]
async fn should_skip_when_any_data_exists() {
    let reader = test_user("reader@example.com", "password123").await;
    let users = MockUserRepo::new(vec![reader]);
    let categories = MockCategoryRepo::empty();
    let by_user = seeder(&users, &categories, &MockArticleRepo::empty())
        .execute()
        .await
        .unwrap();

    assert_eq!(by_user, SeedOutcome::Skipped);
    assert_eq!(users.users_handle().lock().unwrap().len(), 1);
    assert!(categories.categories_handle().lock().unwrap().is_empty());

    let users = MockUserRepo::empty();
    let by_category = seeder(
        &users,
        &MockCategoryRepo::new(vec![test_category()]),
        &MockArticleRepo::empty(),
    )
    .execute()
    .await
    .unwrap();

    assert_eq!(by_category, SeedOutcome::Skipped);
    assert!(users.users_handle().lock().unwrap().is_empty());
}
