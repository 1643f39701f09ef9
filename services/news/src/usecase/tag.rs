use uuid::Uuid;

use crate::domain::repository::TagRepository;
use crate::domain::types::Tag;
use crate::error::NewsServiceError;

pub struct ListTagsUseCase<R: TagRepository> {
    pub repo: R,
}

impl<R: TagRepository> ListTagsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Tag>, NewsServiceError> {
        self.repo.list().await
    }
}

pub struct GetTagUseCase<R: TagRepository> {
    pub repo: R,
}

impl<R: TagRepository> GetTagUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<Tag, NewsServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(NewsServiceError::TagNotFound)
    }
}

pub struct CreateTagUseCase<R: TagRepository> {
    pub repo: R,
}

impl<R: TagRepository> CreateTagUseCase<R> {
    pub async fn execute(&self, name: String) -> Result<Tag, NewsServiceError> {
        let tag = Tag {
            id: Uuid::now_v7(),
            name: name.trim().to_owned(),
        };
        self.repo.create(&tag).await?;
        Ok(tag)
    }
}

pub struct UpdateTagUseCase<R: TagRepository> {
    pub repo: R,
}

impl<R: TagRepository> UpdateTagUseCase<R> {
    pub async fn execute(&self, id: Uuid, name: String) -> Result<Tag, NewsServiceError> {
        let mut tag = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(NewsServiceError::TagNotFound)?;
        tag.name = name.trim().to_owned();
        self.repo.update(&tag).await?;
        Ok(tag)
    }
}

pub struct DeleteTagUseCase<R: TagRepository> {
    pub repo: R,
}

impl<R: TagRepository> DeleteTagUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), NewsServiceError> {
        if !self.repo.delete(id).await? {
            return Err(NewsServiceError::TagNotFound);
        }
        Ok(())
    }
}
