use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{ArticleRepository, CommentRepository};
use crate::domain::types::Comment;
use crate::error::NewsServiceError;

async fn load_owned<C: CommentRepository>(
    comments: &C,
    id: Uuid,
    user_id: Uuid,
) -> Result<Comment, NewsServiceError> {
    let comment = comments
        .find_by_id(id)
        .await?
        .ok_or(NewsServiceError::CommentNotFound)?;
    if comment.user_id != user_id {
        return Err(NewsServiceError::Forbidden);
    }
    Ok(comment)
}

// ── ListComments ─────────────────────────────────────────────────────────────

pub struct ListCommentsUseCase<A, C>
where
    A: ArticleRepository,
    C: CommentRepository,
{
    pub articles: A,
    pub comments: C,
}

impl<A, C> ListCommentsUseCase<A, C>
where
    A: ArticleRepository,
    C: CommentRepository,
{
    pub async fn execute(&self, slug: &str) -> Result<Vec<Comment>, NewsServiceError> {
        let view = self
            .articles
            .find_by_slug(slug)
            .await?
            .ok_or(NewsServiceError::ArticleNotFound)?;
        self.comments.list_by_article(view.article.id).await
    }
}

// ── CreateComment ────────────────────────────────────────────────────────────

pub struct CreateCommentUseCase<A, C>
where
    A: ArticleRepository,
    C: CommentRepository,
{
    pub articles: A,
    pub comments: C,
}

impl<A, C> CreateCommentUseCase<A, C>
where
    A: ArticleRepository,
    C: CommentRepository,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        slug: &str,
        content: String,
    ) -> Result<Comment, NewsServiceError> {
        let view = self
            .articles
            .find_by_slug(slug)
            .await?
            .ok_or(NewsServiceError::ArticleNotFound)?;

        let now = Utc::now();
        let comment = Comment {
            id: Uuid::now_v7(),
            content,
            user_id,
            article_id: view.article.id,
            created_at: now,
            updated_at: now,
        };
        self.comments.create(&comment).await?;
        Ok(comment)
    }
}

// ── UpdateComment ────────────────────────────────────────────────────────────

pub struct UpdateCommentUseCase<C: CommentRepository> {
    pub comments: C,
}

impl<C: CommentRepository> UpdateCommentUseCase<C> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        id: Uuid,
        content: String,
    ) -> Result<Comment, NewsServiceError> {
        let mut comment = load_owned(&self.comments, id, user_id).await?;
        comment.content = content;
        comment.updated_at = Utc::now();
        self.comments.update(&comment).await?;
        Ok(comment)
    }
}

// ── DeleteComment ────────────────────────────────────────────────────────────

pub struct DeleteCommentUseCase<C: CommentRepository> {
    pub comments: C,
}

impl<C: CommentRepository> DeleteCommentUseCase<C> {
    pub async fn execute(&self, user_id: Uuid, id: Uuid) -> Result<(), NewsServiceError> {
        let comment = load_owned(&self.comments, id, user_id).await?;
        self.comments.delete(comment.id).await
    }
}
