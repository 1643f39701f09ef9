use uuid::Uuid;

use newsroom_news::domain::types::Tag;
use newsroom_news::error::NewsServiceError;
use newsroom_news::usecase::category::{
    CategoryInput, CreateCategoryUseCase, DeleteCategoryUseCase, GetCategoryUseCase,
    UpdateCategoryUseCase,
};
use newsroom_news::usecase::tag::{
    CreateTagUseCase, DeleteTagUseCase, GetTagUseCase, UpdateTagUseCase,
};

use crate::helpers::{MockCategoryRepo, MockTagRepo, test_category};

fn category_input(name: &str) -> CategoryInput {
    CategoryInput {
        name: name.to_owned(),
        description: "Stories about it".to_owned(),
    }
}

#[tokio::test]
async fn should_create_trimmed_tag() {
    let repo = MockTagRepo::new(vec![]);
    let handle = repo.tags_handle();

    let tag = CreateTagUseCase { repo }
        .execute("  rust ".to_owned())
        .await
        .unwrap();

    assert_eq!(tag.name, "rust");
    assert_eq!(*handle.lock().unwrap(), [tag]);
}

#[tokio::test]
async fn should_reject_duplicate_tag_name() {
    let existing = Tag {
        id: Uuid::now_v7(),
        name: "rust".to_owned(),
    };
    let repo = MockTagRepo::new(vec![existing]);

    let result = CreateTagUseCase { repo }.execute("rust".to_owned()).await;
    assert!(
        matches!(result, Err(NewsServiceError::TagAlreadyExists)),
        "expected TagAlreadyExists, got {result:?}"
    );
}

#[tokio::test]
async fn should_return_tag_not_found_for_unknown_id() {
    let repo = MockTagRepo::new(vec![]);

    let get = GetTagUseCase { repo: repo.clone() }.execute(Uuid::now_v7()).await;
    let update = UpdateTagUseCase { repo: repo.clone() }
        .execute(Uuid::now_v7(), "go".to_owned())
        .await;
    let delete = DeleteTagUseCase { repo }.execute(Uuid::now_v7()).await;

    assert!(matches!(get, Err(NewsServiceError::TagNotFound)), "got {get:?}");
    assert!(matches!(update, Err(NewsServiceError::TagNotFound)), "got {update:?}");
    assert!(matches!(delete, Err(NewsServiceError::TagNotFound)), "got {delete:?}");
}

#[tokio::test]
async fn should_rename_tag() {
    let tag = Tag {
        id: Uuid::now_v7(),
        name: "rust".to_owned(),
    };
    let repo = MockTagRepo::new(vec![tag.clone()]);
    let handle = repo.tags_handle();

    let renamed = UpdateTagUseCase { repo }
        .execute(tag.id, "rustlang".to_owned())
        .await
        .unwrap();

    assert_eq!(renamed.id, tag.id);
    assert_eq!(handle.lock().unwrap()[0].name, "rustlang");
}

#[tokio::test]
async fn should_manage_category_lifecycle() {
    let repo = MockCategoryRepo::empty();
    let handle = repo.categories_handle();

    let created = CreateCategoryUseCase { repo: repo.clone() }
        .execute(category_input("Science"))
        .await
        .unwrap();
    let fetched = GetCategoryUseCase { repo: repo.clone() }
        .execute(created.id)
        .await
        .unwrap();
    assert_eq!(fetched.name, "Science");

    let updated = UpdateCategoryUseCase { repo: repo.clone() }
        .execute(created.id, category_input("Space"))
        .await
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(handle.lock().unwrap()[0].name, "Space");

    DeleteCategoryUseCase { repo }
        .execute(created.id)
        .await
        .unwrap();
    assert!(handle.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_return_category_not_found_for_unknown_id() {
    let repo = MockCategoryRepo::new(vec![test_category()]);

    let get = GetCategoryUseCase { repo: repo.clone() }
        .execute(Uuid::now_v7())
        .await;
    let update = UpdateCategoryUseCase { repo: repo.clone() }
        .execute(Uuid::now_v7(), category_input("Space"))
        .await;
    let delete = DeleteCategoryUseCase { repo: repo.clone() }
        .execute(Uuid::now_v7())
        .await;

    for result in [get.map(|_| ()), update.map(|_| ()), delete] {
        assert!(
            matches!(result, Err(NewsServiceError::CategoryNotFound)),
            "expected CategoryNotFound, got {result:?}"
        );
    }
    assert_eq!(repo.categories_handle().lock().unwrap().len(), 1);
}
