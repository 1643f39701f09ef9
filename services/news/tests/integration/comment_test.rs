use uuid::Uuid;

use newsroom_news::error::NewsServiceError;
use newsroom_news::usecase::comment::{
    CreateCommentUseCase, DeleteCommentUseCase, ListCommentsUseCase, UpdateCommentUseCase,
};

use crate::helpers::{MockArticleRepo, MockCommentRepo, test_article, test_comment};

#[tokio::test]
async fn should_attach_comment_to_article_by_slug() {
    let article = test_article(Uuid::now_v7(), Uuid::now_v7(), "launch-day");
    let articles = MockArticleRepo::new(vec![article.clone()]);
    let comments = MockCommentRepo::empty();
    let commenter = Uuid::now_v7();

    let created = CreateCommentUseCase {
        articles: articles.clone(),
        comments: comments.clone(),
    }
    .execute(commenter, "launch-day", "Nice work".to_owned())
    .await
    .unwrap();

    assert_eq!(created.article_id, article.id);
    assert_eq!(created.user_id, commenter);

    let listed = ListCommentsUseCase {
        articles,
        comments,
    }
    .execute("launch-day")
    .await
    .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].content, "Nice work");
}

#[tokio::test]
async fn should_return_not_found_for_unknown_article() {
    let create = CreateCommentUseCase {
        articles: MockArticleRepo::empty(),
        comments: MockCommentRepo::empty(),
    }
    .execute(Uuid::now_v7(), "missing", "Hello".to_owned())
    .await;
    let list = ListCommentsUseCase {
        articles: MockArticleRepo::empty(),
        comments: MockCommentRepo::empty(),
    }
    .execute("missing")
    .await;

    assert!(
        matches!(create, Err(NewsServiceError::ArticleNotFound)),
        "expected ArticleNotFound, got {create:?}"
    );
    assert!(
        matches!(list, Err(NewsServiceError::ArticleNotFound)),
        "expected ArticleNotFound, got {list:?}"
    );
}

#[tokio::test]
async fn should_let_only_the_author_edit_a_comment() {
    let owner = Uuid::now_v7();
    let comment = test_comment(owner, Uuid::now_v7());
    let repo = MockCommentRepo::new(vec![comment.clone()]);
    let handle = repo.comments_handle();
    let uc = UpdateCommentUseCase { comments: repo };

    let result = uc
        .execute(Uuid::now_v7(), comment.id, "Defaced".to_owned())
        .await;
    assert!(
        matches!(result, Err(NewsServiceError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
    assert_eq!(handle.lock().unwrap()[0].content, comment.content);

    let updated = uc
        .execute(owner, comment.id, "Edited".to_owned())
        .await
        .unwrap();
    assert_eq!(updated.content, "Edited");
    assert!(updated.updated_at >= comment.updated_at);
    assert_eq!(handle.lock().unwrap()[0].content, "Edited");
}

#[tokio::test]
async fn should_let_only_the_author_delete_a_comment() {
    let owner = Uuid::now_v7();
    let comment = test_comment(owner, Uuid::now_v7());
    let repo = MockCommentRepo::new(vec![comment.clone()]);
    let handle = repo.comments_handle();
    let uc = DeleteCommentUseCase { comments: repo };

    let result = uc.execute(Uuid::now_v7(), comment.id).await;
    assert!(
        matches!(result, Err(NewsServiceError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
    assert_eq!(handle.lock().unwrap().len(), 1);

    uc.execute(owner, comment.id).await.unwrap();
    assert!(handle.lock().unwrap().is_empty());

    let again = uc.execute(owner, comment.id).await;
    assert!(
        matches!(again, Err(NewsServiceError::CommentNotFound)),
        "expected CommentNotFound, got {again:?}"
    );
}
