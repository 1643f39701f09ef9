use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use newsroom_auth_types::identity::BearerIdentity;

use crate::error::NewsServiceError;
use crate::handlers::dto::CommentResponse;
use crate::handlers::extract::ValidatedJson;
use crate::state::AppState;
use crate::usecase::comment::{
    CreateCommentUseCase, DeleteCommentUseCase, ListCommentsUseCase, UpdateCommentUseCase,
};

#[derive(Deserialize, Validate, Default)]
#[serde(default)]
pub struct CommentRequest {
    #[validate(length(min = 1))]
    pub content: String,
}

// ── GET /articles/{slug}/comments ────────────────────────────────────────────

pub async fn list_comments(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<CommentResponse>>, NewsServiceError> {
    let usecase = ListCommentsUseCase {
        articles: state.article_repo(),
        comments: state.comment_repo(),
    };
    let comments = usecase.execute(&slug).await?;
    Ok(Json(comments.into_iter().map(CommentResponse::from).collect()))
}

// ── POST /articles/{slug}/comments ───────────────────────────────────────────

pub async fn create_comment(
    identity: BearerIdentity,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    ValidatedJson(body): ValidatedJson<CommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), NewsServiceError> {
    let usecase = CreateCommentUseCase {
        articles: state.article_repo(),
        comments: state.comment_repo(),
    };
    let comment = usecase
        .execute(identity.user_id, &slug, body.content)
        .await?;
    Ok((StatusCode::CREATED, Json(comment.into())))
}

// ── PUT /comments/{id} ───────────────────────────────────────────────────────

pub async fn update_comment(
    identity: BearerIdentity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<CommentRequest>,
) -> Result<Json<CommentResponse>, NewsServiceError> {
    let usecase = UpdateCommentUseCase {
        comments: state.comment_repo(),
    };
    let comment = usecase.execute(identity.user_id, id, body.content).await?;
    Ok(Json(comment.into()))
}

// ── DELETE /comments/{id} ────────────────────────────────────────────────────

pub async fn delete_comment(
    identity: BearerIdentity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, NewsServiceError> {
    let usecase = DeleteCommentUseCase {
        comments: state.comment_repo(),
    };
    usecase.execute(identity.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
