//! JSON response bodies shared across handlers.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::types::{ArticleView, Author, Category, Comment, Tag, User};
use crate::usecase::article::SavedArticle;

#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub is_verified: bool,
    #[serde(serialize_with = "newsroom_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "newsroom_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
            is_verified: user.is_verified,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct TagResponse {
    pub id: String,
    pub name: String,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id.to_string(),
            name: tag.name,
        }
    }
}

#[derive(Serialize)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name,
            description: category.description,
        }
    }
}

#[derive(Serialize)]
pub struct AuthorResponse {
    pub id: String,
    pub name: String,
}

impl From<Author> for AuthorResponse {
    fn from(author: Author) -> Self {
        Self {
            id: author.id.to_string(),
            name: author.name,
        }
    }
}

#[derive(Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub content: String,
    pub user_id: String,
    pub article_id: String,
    #[serde(serialize_with = "newsroom_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "newsroom_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            content: comment.content,
            user_id: comment.user_id.to_string(),
            article_id: comment.article_id.to_string(),
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

/// Article body. Joined fields are present on reads and omitted after writes.
#[derive(Serialize)]
pub struct ArticleResponse {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub thumbnail: String,
    pub content: String,
    pub status: &'static str,
    pub category_id: String,
    pub author_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryResponse>,
    pub tags: Vec<TagResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<CommentResponse>>,
    #[serde(serialize_with = "newsroom_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "newsroom_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<ArticleView> for ArticleResponse {
    fn from(view: ArticleView) -> Self {
        let mut response = Self::from(SavedArticle {
            article: view.article,
            tags: view.tags,
        });
        response.author = Some(view.author.into());
        response.category = Some(view.category.into());
        response
    }
}

impl From<SavedArticle> for ArticleResponse {
    fn from(saved: SavedArticle) -> Self {
        let article = saved.article;
        Self {
            id: article.id.to_string(),
            title: article.title,
            slug: article.slug,
            thumbnail: article.thumbnail,
            content: article.content,
            status: article.status.as_str(),
            category_id: article.category_id.to_string(),
            author_id: article.author_id.to_string(),
            author: None,
            category: None,
            tags: saved.tags.into_iter().map(TagResponse::from).collect(),
            comments: None,
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}
