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
use crate::handlers::dto::TagResponse;
use crate::handlers::extract::ValidatedJson;
use crate::state::AppState;
use crate::usecase::tag::{
    CreateTagUseCase, DeleteTagUseCase, GetTagUseCase, ListTagsUseCase, UpdateTagUseCase,
};

#[derive(Deserialize, Validate, Default)]
#[serde(default)]
pub struct TagRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
}

pub async fn list_tags(
    State(state): State<AppState>,
) -> Result<Json<Vec<TagResponse>>, NewsServiceError> {
    let usecase = ListTagsUseCase {
        repo: state.tag_repo(),
    };
    let tags = usecase.execute().await?;
    Ok(Json(tags.into_iter().map(TagResponse::from).collect()))
}

pub async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TagResponse>, NewsServiceError> {
    let usecase = GetTagUseCase {
        repo: state.tag_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

pub async fn create_tag(
    _identity: BearerIdentity,
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<TagRequest>,
) -> Result<(StatusCode, Json<TagResponse>), NewsServiceError> {
    let usecase = CreateTagUseCase {
        repo: state.tag_repo(),
    };
    let tag = usecase.execute(body.name).await?;
    Ok((StatusCode::CREATED, Json(tag.into())))
}

pub async fn update_tag(
    _identity: BearerIdentity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<TagRequest>,
) -> Result<Json<TagResponse>, NewsServiceError> {
    let usecase = UpdateTagUseCase {
        repo: state.tag_repo(),
    };
    Ok(Json(usecase.execute(id, body.name).await?.into()))
}

pub async fn delete_tag(
    _identity: BearerIdentity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, NewsServiceError> {
    let usecase = DeleteTagUseCase {
        repo: state.tag_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
