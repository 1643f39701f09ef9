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
use crate::handlers::dto::CategoryResponse;
use crate::handlers::extract::ValidatedJson;
use crate::state::AppState;
use crate::usecase::category::{
    CategoryInput, CreateCategoryUseCase, DeleteCategoryUseCase, GetCategoryUseCase,
    ListCategoriesUseCase, UpdateCategoryUseCase,
};

#[derive(Deserialize, Validate, Default)]
#[serde(default)]
pub struct CategoryRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
}

impl From<CategoryRequest> for CategoryInput {
    fn from(body: CategoryRequest) -> Self {
        Self {
            name: body.name,
            description: body.description,
        }
    }
}

// ── GET /categories ──────────────────────────────────────────────────────────

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, NewsServiceError> {
    let usecase = ListCategoriesUseCase {
        repo: state.category_repo(),
    };
    let categories = usecase.execute().await?;
    Ok(Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

// ── GET /categories/{id} ─────────────────────────────────────────────────────

pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CategoryResponse>, NewsServiceError> {
    let usecase = GetCategoryUseCase {
        repo: state.category_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── POST /categories ─────────────────────────────────────────────────────────

pub async fn create_category(
    _identity: BearerIdentity,
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), NewsServiceError> {
    let usecase = CreateCategoryUseCase {
        repo: state.category_repo(),
    };
    let category = usecase.execute(body.into()).await?;
    Ok((StatusCode::CREATED, Json(category.into())))
}

// ── PUT /categories/{id} ─────────────────────────────────────────────────────

pub async fn update_category(
    _identity: BearerIdentity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<CategoryRequest>,
) -> Result<Json<CategoryResponse>, NewsServiceError> {
    let usecase = UpdateCategoryUseCase {
        repo: state.category_repo(),
    };
    Ok(Json(usecase.execute(id, body.into()).await?.into()))
}

// ── DELETE /categories/{id} ──────────────────────────────────────────────────

pub async fn delete_category(
    _identity: BearerIdentity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, NewsServiceError> {
    let usecase = DeleteCategoryUseCase {
        repo: state.category_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
