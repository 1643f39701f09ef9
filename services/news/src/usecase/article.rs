use bytes::Bytes;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{
    ArticleRepository, CategoryRepository, CommentRepository, ThumbnailStore,
};
use crate::domain::types::{
    Article, ArticleStatus, ArticleView, Comment, Tag, normalize_tag_names, thumbnail_extension,
};
use crate::error::NewsServiceError;

/// Uploaded thumbnail as received from the client.
pub struct ThumbnailUpload {
    pub file_name: String,
    pub bytes: Bytes,
}

/// Article row plus its tag set after a write.
#[derive(Debug)]
pub struct SavedArticle {
    pub article: Article,
    pub tags: Vec<Tag>,
}

async fn store_thumbnail<T: ThumbnailStore>(
    store: &T,
    upload: ThumbnailUpload,
) -> Result<String, NewsServiceError> {
    let ext = thumbnail_extension(&upload.file_name).ok_or(NewsServiceError::InvalidThumbnail)?;
    store.save(&ext, upload.bytes).await
}

async fn discard_thumbnail<T: ThumbnailStore>(store: &T, path: &str) {
    if let Err(e) = store.remove(path).await {
        tracing::warn!(path, error = ?e, "failed to remove thumbnail");
    }
}

async fn load_owned<A: ArticleRepository>(
    articles: &A,
    slug: &str,
    user_id: Uuid,
) -> Result<ArticleView, NewsServiceError> {
    let view = articles
        .find_by_slug(slug)
        .await?
        .ok_or(NewsServiceError::ArticleNotFound)?;
    if view.article.author_id != user_id {
        return Err(NewsServiceError::Forbidden);
    }
    Ok(view)
}

// ── ListArticles ─────────────────────────────────────────────────────────────

pub struct ListArticlesUseCase<A: ArticleRepository> {
    pub articles: A,
}

impl<A: ArticleRepository> ListArticlesUseCase<A> {
    pub async fn execute(&self) -> Result<Vec<ArticleView>, NewsServiceError> {
        self.articles.list().await
    }
}

// ── GetArticle ───────────────────────────────────────────────────────────────

pub struct GetArticleUseCase<A, C>
where
    A: ArticleRepository,
    C: CommentRepository,
{
    pub articles: A,
    pub comments: C,
}

impl<A, C> GetArticleUseCase<A, C>
where
    A: ArticleRepository,
    C: CommentRepository,
{
    pub async fn execute(
        &self,
        slug: &str,
    ) -> Result<(ArticleView, Vec<Comment>), NewsServiceError> {
        let view = self
            .articles
            .find_by_slug(slug)
            .await?
            .ok_or(NewsServiceError::ArticleNotFound)?;
        let comments = self.comments.list_by_article(view.article.id).await?;
        Ok((view, comments))
    }
}

// ── CreateArticle ────────────────────────────────────────────────────────────

pub struct CreateArticleInput {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub category_id: Uuid,
    pub status: ArticleStatus,
    pub tags: Vec<String>,
    pub thumbnail: ThumbnailUpload,
}

pub struct CreateArticleUseCase<A, C, T>
where
    A: ArticleRepository,
    C: CategoryRepository,
    T: ThumbnailStore,
{
    pub articles: A,
    pub categories: C,
    pub thumbnails: T,
}

impl<A, C, T> CreateArticleUseCase<A, C, T>
where
    A: ArticleRepository,
    C: CategoryRepository,
    T: ThumbnailStore,
{
    /// The stored thumbnail is removed again if the article cannot be persisted.
    pub async fn execute(
        &self,
        author_id: Uuid,
        input: CreateArticleInput,
    ) -> Result<SavedArticle, NewsServiceError> {
        if self.categories.find_by_id(input.category_id).await?.is_none() {
            return Err(NewsServiceError::CategoryNotFound);
        }
        let thumbnail = store_thumbnail(&self.thumbnails, input.thumbnail).await?;

        let now = Utc::now();
        let article = Article {
            id: Uuid::now_v7(),
            title: input.title,
            slug: input.slug,
            thumbnail,
            content: input.content,
            category_id: input.category_id,
            author_id,
            status: input.status,
            created_at: now,
            updated_at: now,
        };
        let names = normalize_tag_names(&input.tags);

        match self.articles.create_with_tags(&article, &names).await {
            Ok(tags) => {
                tracing::info!(article_id = %article.id, tags = tags.len(), "article created");
                Ok(SavedArticle { article, tags })
            }
            Err(e) => {
                discard_thumbnail(&self.thumbnails, &article.thumbnail).await;
                Err(e)
            }
        }
    }
}

// ── UpdateArticle ────────────────────────────────────────────────────────────

/// Absent fields keep their current value. `tags: None` leaves associations
/// untouched; `Some` (even empty) replaces them.
#[derive(Default)]
pub struct UpdateArticleInput {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub category_id: Option<Uuid>,
    pub status: Option<ArticleStatus>,
    pub tags: Option<Vec<String>>,
    pub thumbnail: Option<ThumbnailUpload>,
}

pub struct UpdateArticleUseCase<A, C, T>
where
    A: ArticleRepository,
    C: CategoryRepository,
    T: ThumbnailStore,
{
    pub articles: A,
    pub categories: C,
    pub thumbnails: T,
}

impl<A, C, T> UpdateArticleUseCase<A, C, T>
where
    A: ArticleRepository,
    C: CategoryRepository,
    T: ThumbnailStore,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        slug: &str,
        input: UpdateArticleInput,
    ) -> Result<SavedArticle, NewsServiceError> {
        let mut article = load_owned(&self.articles, slug, user_id).await?.article;

        if let Some(category_id) = input.category_id {
            if self.categories.find_by_id(category_id).await?.is_none() {
                return Err(NewsServiceError::CategoryNotFound);
            }
            article.category_id = category_id;
        }

        let replaced = match input.thumbnail {
            Some(upload) => {
                let path = store_thumbnail(&self.thumbnails, upload).await?;
                Some(std::mem::replace(&mut article.thumbnail, path))
            }
            None => None,
        };

        if let Some(title) = input.title {
            article.title = title;
        }
        if let Some(slug) = input.slug {
            article.slug = slug;
        }
        if let Some(content) = input.content {
            article.content = content;
        }
        if let Some(status) = input.status {
            article.status = status;
        }
        article.updated_at = Utc::now();

        let names = input.tags.as_deref().map(normalize_tag_names);
        match self.articles.update_with_tags(&article, names.as_deref()).await {
            Ok(tags) => {
                if let Some(old) = replaced {
                    discard_thumbnail(&self.thumbnails, &old).await;
                }
                tracing::info!(article_id = %article.id, "article updated");
                Ok(SavedArticle { article, tags })
            }
            Err(e) => {
                if replaced.is_some() {
                    discard_thumbnail(&self.thumbnails, &article.thumbnail).await;
                }
                Err(e)
            }
        }
    }
}

// ── ReplaceArticleTags ───────────────────────────────────────────────────────

pub struct ReplaceArticleTagsUseCase<A: ArticleRepository> {
    pub articles: A,
}

impl<A: ArticleRepository> ReplaceArticleTagsUseCase<A> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        slug: &str,
        tags: &[String],
    ) -> Result<Vec<Tag>, NewsServiceError> {
        let article = load_owned(&self.articles, slug, user_id).await?.article;
        let names = normalize_tag_names(tags);
        let tags = self.articles.reconcile_tags(article.id, &names).await?;
        tracing::info!(article_id = %article.id, tags = tags.len(), "tags reconciled");
        Ok(tags)
    }
}

// ── DeleteArticle ────────────────────────────────────────────────────────────

pub struct DeleteArticleUseCase<A, T>
where
    A: ArticleRepository,
    T: ThumbnailStore,
{
    pub articles: A,
    pub thumbnails: T,
}

impl<A, T> DeleteArticleUseCase<A, T>
where
    A: ArticleRepository,
    T: ThumbnailStore,
{
    pub async fn execute(&self, user_id: Uuid, slug: &str) -> Result<(), NewsServiceError> {
        let article = load_owned(&self.articles, slug, user_id).await?.article;
        self.articles.delete(article.id).await?;
        discard_thumbnail(&self.thumbnails, &article.thumbnail).await;
        tracing::info!(article_id = %article.id, "article deleted");
        Ok(())
    }
}
