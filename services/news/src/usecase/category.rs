use uuid::Uuid;

use crate::domain::repository::CategoryRepository;
use crate::domain::types::Category;
use crate::error::NewsServiceError;

// ── ListCategories ───────────────────────────────────────────────────────────

pub struct ListCategoriesUseCase<R: CategoryRepository> {
    pub repo: R,
}

impl<R: CategoryRepository> ListCategoriesUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Category>, NewsServiceError> {
        self.repo.list().await
    }
}

// ── GetCategory ──────────────────────────────────────────────────────────────

pub struct GetCategoryUseCase<R: CategoryRepository> {
    pub repo: R,
}

impl<R: CategoryRepository> GetCategoryUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<Category, NewsServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(NewsServiceError::CategoryNotFound)
    }
}

// ── CreateCategory ───────────────────────────────────────────────────────────

pub struct CategoryInput {
    pub name: String,
    pub description: String,
}

pub struct CreateCategoryUseCase<R: CategoryRepository> {
    pub repo: R,
}

impl<R: CategoryRepository> CreateCategoryUseCase<R> {
    pub async fn execute(&self, input: CategoryInput) -> Result<Category, NewsServiceError> {
        let category = Category {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
        };
        self.repo.create(&category).await?;
        Ok(category)
    }
}

// ── UpdateCategory ───────────────────────────────────────────────────────────

pub struct UpdateCategoryUseCase<R: CategoryRepository> {
    pub repo: R,
}

impl<R: CategoryRepository> UpdateCategoryUseCase<R> {
    pub async fn execute(
        &self,
        id: Uuid,
        input: CategoryInput,
    ) -> Result<Category, NewsServiceError> {
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(NewsServiceError::CategoryNotFound);
        }
        let category = Category {
            id,
            name: input.name,
            description: input.description,
        };
        self.repo.update(&category).await?;
        Ok(category)
    }
}

// ── DeleteCategory ───────────────────────────────────────────────────────────

pub struct DeleteCategoryUseCase<R: CategoryRepository> {
    pub repo: R,
}

impl<R: CategoryRepository> DeleteCategoryUseCase<R> {
    /// Articles in the category are removed by the database cascade.
    pub async fn execute(&self, id: Uuid) -> Result<(), NewsServiceError> {
        if !self.repo.delete(id).await? {
            return Err(NewsServiceError::CategoryNotFound);
        }
        Ok(())
    }
}
