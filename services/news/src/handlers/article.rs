use std::borrow::Cow;

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use newsroom_auth_types::identity::BearerIdentity;

use crate::domain::types::{ArticleStatus, TAG_NAME_MAX_CHARS, TAGS_PER_ARTICLE_MAX};
use crate::error::NewsServiceError;
use crate::handlers::dto::{ArticleResponse, CommentResponse, TagResponse};
use crate::handlers::extract::ValidatedJson;
use crate::state::AppState;
use crate::usecase::article::{
    CreateArticleInput, CreateArticleUseCase, DeleteArticleUseCase, GetArticleUseCase,
    ListArticlesUseCase, ReplaceArticleTagsUseCase, ThumbnailUpload, UpdateArticleInput,
    UpdateArticleUseCase,
};

// ── Multipart form ───────────────────────────────────────────────────────────

/// Raw multipart fields. `tags` may repeat (`tags` or `tags[]`).
#[derive(Default)]
struct ArticleForm {
    title: Option<String>,
    slug: Option<String>,
    content: Option<String>,
    category_id: Option<String>,
    status: Option<String>,
    tags: Option<Vec<String>>,
    thumbnail: Option<ThumbnailUpload>,
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> NewsServiceError {
    NewsServiceError::InvalidForm(err.body_text())
}

async fn read_form(mut multipart: Multipart) -> Result<ArticleForm, NewsServiceError> {
    let mut form = ArticleForm::default();
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            "thumbnail" => {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                if !bytes.is_empty() {
                    form.thumbnail = Some(ThumbnailUpload { file_name, bytes });
                }
            }
            "tags" | "tags[]" => {
                let tag = field.text().await.map_err(multipart_error)?;
                form.tags.get_or_insert_with(Vec::new).push(tag);
            }
            "title" | "slug" | "content" | "category_id" | "status" => {
                let value = Some(field.text().await.map_err(multipart_error)?);
                match name.as_str() {
                    "title" => form.title = value,
                    "slug" => form.slug = value,
                    "content" => form.content = value,
                    "category_id" => form.category_id = value,
                    _ => form.status = value,
                }
            }
            _ => {}
        }
    }
    Ok(form)
}

fn invalid(code: &'static str, message: String) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Owned(message))
}

fn validate_category_id(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(invalid("required", "category_id is required".to_owned()));
    }
    value
        .parse::<Uuid>()
        .map(|_| ())
        .map_err(|_| invalid("uuid", "category_id must be a valid id".to_owned()))
}

fn validate_status(value: &str) -> Result<(), ValidationError> {
    match ArticleStatus::parse(value) {
        Some(_) => Ok(()),
        None => Err(invalid(
            "status",
            "status must be one of draft, published, archived".to_owned(),
        )),
    }
}

/// Every name, once trimmed, is 1..=50 characters; at most 50 names.
fn validate_tag_names(names: &[String]) -> Result<(), ValidationError> {
    if names.len() > TAGS_PER_ARTICLE_MAX {
        return Err(invalid(
            "count",
            format!("tags must list at most {TAGS_PER_ARTICLE_MAX} names"),
        ));
    }
    let fits = |name: &String| (1..=TAG_NAME_MAX_CHARS).contains(&name.trim().chars().count());
    if names.iter().all(fits) {
        Ok(())
    } else {
        Err(invalid(
            "length",
            format!("each tag must be between 1 and {TAG_NAME_MAX_CHARS} characters long"),
        ))
    }
}

#[derive(Validate)]
struct CreateArticleFields {
    #[validate(length(min = 3, max = 100))]
    title: String,
    #[validate(length(min = 3, max = 100))]
    slug: String,
    #[validate(length(min = 1))]
    content: String,
    #[validate(custom(function = "validate_category_id"))]
    category_id: String,
    #[validate(custom(function = "validate_status"))]
    status: Option<String>,
    #[validate(custom(function = "validate_tag_names"))]
    tags: Option<Vec<String>>,
}

#[derive(Validate)]
struct UpdateArticleFields {
    #[validate(length(min = 3, max = 100))]
    title: Option<String>,
    #[validate(length(min = 3, max = 100))]
    slug: Option<String>,
    #[validate(length(min = 1))]
    content: Option<String>,
    #[validate(custom(function = "validate_category_id"))]
    category_id: Option<String>,
    #[validate(custom(function = "validate_status"))]
    status: Option<String>,
    #[validate(custom(function = "validate_tag_names"))]
    tags: Option<Vec<String>>,
}

fn parse_status(value: Option<&str>) -> Option<ArticleStatus> {
    value.and_then(ArticleStatus::parse)
}

fn parse_id(value: Option<&str>) -> Option<Uuid> {
    value.and_then(|v| v.parse().ok())
}

// ── GET /articles ────────────────────────────────────────────────────────────

pub async fn list_articles(
    State(state): State<AppState>,
) -> Result<Json<Vec<ArticleResponse>>, NewsServiceError> {
    let usecase = ListArticlesUseCase {
        articles: state.article_repo(),
    };
    let views = usecase.execute().await?;
    Ok(Json(views.into_iter().map(ArticleResponse::from).collect()))
}

// ── GET /articles/{slug} ─────────────────────────────────────────────────────

pub async fn get_article(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ArticleResponse>, NewsServiceError> {
    let usecase = GetArticleUseCase {
        articles: state.article_repo(),
        comments: state.comment_repo(),
    };
    let (view, comments) = usecase.execute(&slug).await?;
    let mut response = ArticleResponse::from(view);
    response.comments = Some(comments.into_iter().map(CommentResponse::from).collect());
    Ok(Json(response))
}

// ── POST /articles ───────────────────────────────────────────────────────────

pub async fn create_article(
    identity: BearerIdentity,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ArticleResponse>), NewsServiceError> {
    let form = read_form(multipart).await?;
    let fields = CreateArticleFields {
        title: form.title.unwrap_or_default(),
        slug: form.slug.unwrap_or_default(),
        content: form.content.unwrap_or_default(),
        category_id: form.category_id.unwrap_or_default(),
        status: form.status,
        tags: form.tags,
    };
    fields.validate().map_err(NewsServiceError::Validation)?;
    let thumbnail = form.thumbnail.ok_or(NewsServiceError::InvalidThumbnail)?;
    let category_id =
        parse_id(Some(&fields.category_id)).ok_or(NewsServiceError::CategoryNotFound)?;

    let usecase = CreateArticleUseCase {
        articles: state.article_repo(),
        categories: state.category_repo(),
        thumbnails: state.thumbnails.clone(),
    };
    let saved = usecase
        .execute(
            identity.user_id,
            CreateArticleInput {
                title: fields.title,
                slug: fields.slug,
                content: fields.content,
                category_id,
                status: parse_status(fields.status.as_deref()).unwrap_or_default(),
                tags: fields.tags.unwrap_or_default(),
                thumbnail,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(saved.into())))
}

// ── PUT /articles/{slug} ─────────────────────────────────────────────────────

pub async fn update_article(
    identity: BearerIdentity,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    multipart: Multipart,
) -> Result<Json<ArticleResponse>, NewsServiceError> {
    let form = read_form(multipart).await?;
    let fields = UpdateArticleFields {
        title: form.title,
        slug: form.slug,
        content: form.content,
        category_id: form.category_id,
        status: form.status,
        tags: form.tags,
    };
    fields.validate().map_err(NewsServiceError::Validation)?;

    let usecase = UpdateArticleUseCase {
        articles: state.article_repo(),
        categories: state.category_repo(),
        thumbnails: state.thumbnails.clone(),
    };
    let saved = usecase
        .execute(
            identity.user_id,
            &slug,
            UpdateArticleInput {
                category_id: parse_id(fields.category_id.as_deref()),
                status: parse_status(fields.status.as_deref()),
                title: fields.title,
                slug: fields.slug,
                content: fields.content,
                tags: fields.tags,
                thumbnail: form.thumbnail,
            },
        )
        .await?;
    Ok(Json(saved.into()))
}

// ── PUT /articles/{slug}/tags ────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct ReplaceTagsRequest {
    #[validate(custom(function = "validate_tag_names"))]
    pub tags: Vec<String>,
}

pub async fn replace_article_tags(
    identity: BearerIdentity,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    ValidatedJson(body): ValidatedJson<ReplaceTagsRequest>,
) -> Result<Json<Vec<TagResponse>>, NewsServiceError> {
    let usecase = ReplaceArticleTagsUseCase {
        articles: state.article_repo(),
    };
    let tags = usecase.execute(identity.user_id, &slug, &body.tags).await?;
    Ok(Json(tags.into_iter().map(TagResponse::from).collect()))
}

// ── DELETE /articles/{slug} ──────────────────────────────────────────────────

pub async fn delete_article(
    identity: BearerIdentity,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<StatusCode, NewsServiceError> {
    let usecase = DeleteArticleUseCase {
        articles: state.article_repo(),
        thumbnails: state.thumbnails.clone(),
    };
    usecase.execute(identity.user_id, &slug).await?;
    Ok(StatusCode::NO_CONTENT)
}
