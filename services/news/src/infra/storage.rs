use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::Context as _;
use bytes::Bytes;
use uuid::Uuid;

use crate::domain::repository::ThumbnailStore;
use crate::error::NewsServiceError;

/// Thumbnails stored as files under one directory, named `<uuid>.<ext>`.
#[derive(Debug, Clone)]
pub struct LocalThumbnailStore {
    pub dir: PathBuf,
}

impl ThumbnailStore for LocalThumbnailStore {
    async fn save(&self, extension: &str, bytes: Bytes) -> Result<String, NewsServiceError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("create upload dir {}", self.dir.display()))?;

        let path = self.dir.join(format!("{}.{extension}", Uuid::now_v7()));
        tokio::fs::write(&path, &bytes)
            .await
            .with_context(|| format!("write thumbnail {}", path.display()))?;
        Ok(path.to_string_lossy().into_owned())
    }

    async fn remove(&self, path: &str) -> Result<(), NewsServiceError> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("remove thumbnail {path}"))
                .into()),
        }
    }
}
