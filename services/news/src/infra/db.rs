use std::collections::HashMap;

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, SqlErr, TransactionError, TransactionTrait,
};
use uuid::Uuid;

use newsroom_news_schema::{article_tags, articles, categories, comments, otp_codes, tags, users};

use crate::domain::repository::{
    ArticleRepository, CategoryRepository, CommentRepository, OtpRepository, TagRepository,
    UserRepository,
};
use crate::domain::types::{
    Article, ArticleStatus, ArticleView, Author, Category, Comment, OtpCode, OtpPurpose, Tag,
    User,
};
use crate::error::NewsServiceError;

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Map a write failure: unique violations become `conflict`, the rest `Internal`.
fn write_error(err: DbErr, conflict: NewsServiceError, context: &'static str) -> NewsServiceError {
    if is_unique_violation(&err) {
        conflict
    } else {
        NewsServiceError::Internal(anyhow::Error::new(err).context(context))
    }
}

// ── User repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, NewsServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, NewsServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn count(&self) -> Result<u64, NewsServiceError> {
        let count = users::Entity::find()
            .count(&self.db)
            .await
            .context("count users")?;
        Ok(count)
    }

    async fn create(&self, user: &User) -> Result<(), NewsServiceError> {
        users::ActiveModel {
            id: Set(user.id),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            is_verified: Set(user.is_verified),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| write_error(e, NewsServiceError::EmailTaken, "create user"))?;
        Ok(())
    }

    async fn mark_verified(&self, id: Uuid) -> Result<(), NewsServiceError> {
        users::ActiveModel {
            id: Set(id),
            is_verified: Set(true),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("mark user verified")?;
        Ok(())
    }

    async fn update_password(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), NewsServiceError> {
        users::ActiveModel {
            id: Set(id),
            password_hash: Set(password_hash.to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update user password")?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        is_verified: model.is_verified,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── OTP repository ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOtpRepository {
    pub db: DatabaseConnection,
}

impl OtpRepository for DbOtpRepository {
    async fn find(
        &self,
        user_id: Uuid,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpCode>, NewsServiceError> {
        let model = otp_codes::Entity::find()
            .filter(otp_codes::Column::UserId.eq(user_id))
            .filter(otp_codes::Column::Purpose.eq(purpose.as_str()))
            .one(&self.db)
            .await
            .context("find otp")?;
        Ok(model.map(otp_from_model).transpose()?)
    }

    async fn insert(&self, otp: &OtpCode) -> Result<(), NewsServiceError> {
        otp_codes::ActiveModel {
            id: Set(otp.id),
            user_id: Set(otp.user_id),
            purpose: Set(otp.purpose.as_str().to_owned()),
            otp: Set(otp.otp.clone()),
            expires_at: Set(otp.expires_at),
            is_verified: Set(otp.is_verified),
        }
        .insert(&self.db)
        .await
        .context("insert otp")?;
        Ok(())
    }

    async fn update(&self, otp: &OtpCode) -> Result<(), NewsServiceError> {
        otp_codes::ActiveModel {
            id: Set(otp.id),
            otp: Set(otp.otp.clone()),
            expires_at: Set(otp.expires_at),
            is_verified: Set(otp.is_verified),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update otp")?;
        Ok(())
    }

    async fn mark_verified(&self, id: Uuid) -> Result<(), NewsServiceError> {
        otp_codes::ActiveModel {
            id: Set(id),
            is_verified: Set(true),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("mark otp verified")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), NewsServiceError> {
        otp_codes::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete otp")?;
        Ok(())
    }
}

fn otp_from_model(model: otp_codes::Model) -> anyhow::Result<OtpCode> {
    let purpose = OtpPurpose::parse(&model.purpose)
        .with_context(|| format!("unknown otp purpose {:?}", model.purpose))?;
    Ok(OtpCode {
        id: model.id,
        user_id: model.user_id,
        purpose,
        otp: model.otp,
        expires_at: model.expires_at,
        is_verified: model.is_verified,
    })
}

// ── Article repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbArticleRepository {
    pub db: DatabaseConnection,
}

impl ArticleRepository for DbArticleRepository {
    async fn list(&self) -> Result<Vec<ArticleView>, NewsServiceError> {
        let models = articles::Entity::find()
            .order_by_desc(articles::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list articles")?;
        let views = load_views(&self.db, models)
            .await
            .context("load article relations")?;
        Ok(views)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<ArticleView>, NewsServiceError> {
        let Some(model) = articles::Entity::find()
            .filter(articles::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .context("find article by slug")?
        else {
            return Ok(None);
        };
        let views = load_views(&self.db, vec![model])
            .await
            .context("load article relations")?;
        Ok(views.into_iter().next())
    }

    async fn create_with_tags(
        &self,
        article: &Article,
        tag_names: &[String],
    ) -> Result<Vec<Tag>, NewsServiceError> {
        let article = article.clone();
        let names = tag_names.to_vec();
        let tags = self
            .db
            .transaction::<_, Vec<tags::Model>, DbErr>(|txn| {
                Box::pin(async move {
                    article_active_model(&article).insert(txn).await?;
                    reconcile_in(txn, article.id, &names).await
                })
            })
            .await
            .map_err(|e| article_txn_error(e, "create article with tags"))?;
        Ok(tags.into_iter().map(tag_from_model).collect())
    }

    async fn update_with_tags(
        &self,
        article: &Article,
        tag_names: Option<&[String]>,
    ) -> Result<Vec<Tag>, NewsServiceError> {
        let article = article.clone();
        let names = tag_names.map(<[String]>::to_vec);
        let tags = self
            .db
            .transaction::<_, Vec<tags::Model>, DbErr>(|txn| {
                Box::pin(async move {
                    article_active_model(&article)
                        .update(txn)
                        .await
                        .map_err(|e| match e {
                            DbErr::RecordNotUpdated => DbErr::RecordNotFound("article".into()),
                            other => other,
                        })?;
                    match names {
                        Some(names) => reconcile_in(txn, article.id, &names).await,
                        None => tags_of(txn, article.id).await,
                    }
                })
            })
            .await
            .map_err(|e| article_txn_error(e, "update article with tags"))?;
        Ok(tags.into_iter().map(tag_from_model).collect())
    }

    async fn reconcile_tags(
        &self,
        article_id: Uuid,
        tag_names: &[String],
    ) -> Result<Vec<Tag>, NewsServiceError> {
        let names = tag_names.to_vec();
        let tags = self
            .db
            .transaction::<_, Vec<tags::Model>, DbErr>(|txn| {
                Box::pin(async move { reconcile_in(txn, article_id, &names).await })
            })
            .await
            .map_err(|e| article_txn_error(e, "reconcile article tags"))?;
        Ok(tags.into_iter().map(tag_from_model).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), NewsServiceError> {
        let result = articles::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete article")?;
        if result.rows_affected == 0 {
            return Err(NewsServiceError::ArticleNotFound);
        }
        Ok(())
    }
}

fn article_txn_error(err: TransactionError<DbErr>, context: &'static str) -> NewsServiceError {
    match err {
        TransactionError::Transaction(DbErr::RecordNotFound(_)) => {
            NewsServiceError::ArticleNotFound
        }
        TransactionError::Transaction(e) => write_error(e, NewsServiceError::SlugTaken, context),
        TransactionError::Connection(e) => {
            NewsServiceError::Internal(anyhow::Error::new(e).context(context))
        }
    }
}

/// Make the tag set of `article_id` exactly `names` inside `txn`.
///
/// The article row is locked first, so reconciliations of one article run one
/// after another and the last committed call wins. Tags are created with
/// `ON CONFLICT (name) DO NOTHING` in sorted name order and then read back;
/// callers racing on the same new names share one row and take the unique-index
/// locks in the same order. The result keeps the order of `names`.
async fn reconcile_in(
    txn: &DatabaseTransaction,
    article_id: Uuid,
    names: &[String],
) -> Result<Vec<tags::Model>, DbErr> {
    articles::Entity::find_by_id(article_id)
        .lock_exclusive()
        .one(txn)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("article {article_id}")))?;

    let mut ordered = Vec::with_capacity(names.len());
    if !names.is_empty() {
        let mut sorted = names.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        let rows = sorted.iter().map(|name| tags::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(name.clone()),
        });
        tags::Entity::insert_many(rows)
            .on_conflict(
                OnConflict::column(tags::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(txn)
            .await?;

        let mut by_name: HashMap<String, tags::Model> = tags::Entity::find()
            .filter(tags::Column::Name.is_in(sorted))
            .all(txn)
            .await?
            .into_iter()
            .map(|t| (t.name.clone(), t))
            .collect();
        for name in names {
            if let Some(tag) = by_name.remove(name) {
                ordered.push(tag);
            }
        }
    }

    article_tags::Entity::delete_many()
        .filter(article_tags::Column::ArticleId.eq(article_id))
        .exec(txn)
        .await?;
    if !ordered.is_empty() {
        let links = ordered.iter().map(|tag| article_tags::ActiveModel {
            article_id: Set(article_id),
            tag_id: Set(tag.id),
        });
        article_tags::Entity::insert_many(links)
            .exec_without_returning(txn)
            .await?;
    }

    tracing::debug!(%article_id, tags = ordered.len(), "article tags reconciled");
    Ok(ordered)
}

async fn tags_of<C: ConnectionTrait>(
    db: &C,
    article_id: Uuid,
) -> Result<Vec<tags::Model>, DbErr> {
    let tag_ids: Vec<Uuid> = article_tags::Entity::find()
        .filter(article_tags::Column::ArticleId.eq(article_id))
        .all(db)
        .await?
        .into_iter()
        .map(|link| link.tag_id)
        .collect();
    if tag_ids.is_empty() {
        return Ok(Vec::new());
    }
    tags::Entity::find()
        .filter(tags::Column::Id.is_in(tag_ids))
        .order_by_asc(tags::Column::Name)
        .all(db)
        .await
}

/// Attach author, category and tags to each article with one query per relation.
async fn load_views<C: ConnectionTrait>(
    db: &C,
    models: Vec<articles::Model>,
) -> Result<Vec<ArticleView>, DbErr> {
    if models.is_empty() {
        return Ok(Vec::new());
    }
    let article_ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
    let author_ids: Vec<Uuid> = models.iter().map(|m| m.author_id).collect();
    let category_ids: Vec<Uuid> = models.iter().map(|m| m.category_id).collect();

    let authors: HashMap<Uuid, users::Model> = users::Entity::find()
        .filter(users::Column::Id.is_in(author_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();
    let categories: HashMap<Uuid, categories::Model> = categories::Entity::find()
        .filter(categories::Column::Id.is_in(category_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    let links = article_tags::Entity::find()
        .filter(article_tags::Column::ArticleId.is_in(article_ids))
        .all(db)
        .await?;
    let tag_ids: Vec<Uuid> = links.iter().map(|l| l.tag_id).collect();
    let tags_by_id: HashMap<Uuid, tags::Model> = if tag_ids.is_empty() {
        HashMap::new()
    } else {
        tags::Entity::find()
            .filter(tags::Column::Id.is_in(tag_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|t| (t.id, t))
            .collect()
    };
    let mut tags_by_article: HashMap<Uuid, Vec<Tag>> = HashMap::new();
    for link in links {
        if let Some(tag) = tags_by_id.get(&link.tag_id) {
            tags_by_article
                .entry(link.article_id)
                .or_default()
                .push(tag_from_model(tag.clone()));
        }
    }

    let mut views = Vec::with_capacity(models.len());
    for model in models {
        // Foreign keys guarantee both rows; a miss means the row vanished mid-read.
        let (Some(author), Some(category)) = (
            authors.get(&model.author_id),
            categories.get(&model.category_id),
        ) else {
            continue;
        };
        let mut tags = tags_by_article.remove(&model.id).unwrap_or_default();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        views.push(ArticleView {
            author: Author {
                id: author.id,
                name: author.name.clone(),
            },
            category: category_from_model(category.clone()),
            tags,
            article: article_from_model(model),
        });
    }
    Ok(views)
}

fn article_active_model(article: &Article) -> articles::ActiveModel {
    articles::ActiveModel {
        id: Set(article.id),
        title: Set(article.title.clone()),
        slug: Set(article.slug.clone()),
        thumbnail: Set(article.thumbnail.clone()),
        content: Set(article.content.clone()),
        category_id: Set(article.category_id),
        author_id: Set(article.author_id),
        status: Set(article.status.as_str().to_owned()),
        created_at: Set(article.created_at),
        updated_at: Set(article.updated_at),
    }
}

fn article_from_model(model: articles::Model) -> Article {
    Article {
        id: model.id,
        title: model.title,
        slug: model.slug,
        thumbnail: model.thumbnail,
        content: model.content,
        category_id: model.category_id,
        author_id: model.author_id,
        status: ArticleStatus::parse(&model.status).unwrap_or_default(),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Tag repository ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTagRepository {
    pub db: DatabaseConnection,
}

impl TagRepository for DbTagRepository {
    async fn list(&self) -> Result<Vec<Tag>, NewsServiceError> {
        let models = tags::Entity::find()
            .order_by_asc(tags::Column::Name)
            .all(&self.db)
            .await
            .context("list tags")?;
        Ok(models.into_iter().map(tag_from_model).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tag>, NewsServiceError> {
        let model = tags::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find tag by id")?;
        Ok(model.map(tag_from_model))
    }

    async fn create(&self, tag: &Tag) -> Result<(), NewsServiceError> {
        tags::ActiveModel {
            id: Set(tag.id),
            name: Set(tag.name.clone()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| write_error(e, NewsServiceError::TagAlreadyExists, "create tag"))?;
        Ok(())
    }

    async fn update(&self, tag: &Tag) -> Result<(), NewsServiceError> {
        tags::ActiveModel {
            id: Set(tag.id),
            name: Set(tag.name.clone()),
        }
        .update(&self.db)
        .await
        .map_err(|e| write_error(e, NewsServiceError::TagAlreadyExists, "update tag"))?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, NewsServiceError> {
        let result = tags::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete tag")?;
        Ok(result.rows_affected > 0)
    }
}

fn tag_from_model(model: tags::Model) -> Tag {
    Tag {
        id: model.id,
        name: model.name,
    }
}

// ── Category repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCategoryRepository {
    pub db: DatabaseConnection,
}

impl CategoryRepository for DbCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, NewsServiceError> {
        let models = categories::Entity::find()
            .order_by_asc(categories::Column::Name)
            .all(&self.db)
            .await
            .context("list categories")?;
        Ok(models.into_iter().map(category_from_model).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, NewsServiceError> {
        let model = categories::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find category by id")?;
        Ok(model.map(category_from_model))
    }

    async fn create(&self, category: &Category) -> Result<(), NewsServiceError> {
        category_active_model(category)
            .insert(&self.db)
            .await
            .context("create category")?;
        Ok(())
    }

    async fn update(&self, category: &Category) -> Result<(), NewsServiceError> {
        category_active_model(category)
            .update(&self.db)
            .await
            .context("update category")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, NewsServiceError> {
        let result = categories::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete category")?;
        Ok(result.rows_affected > 0)
    }
}

fn category_active_model(category: &Category) -> categories::ActiveModel {
    categories::ActiveModel {
        id: Set(category.id),
        name: Set(category.name.clone()),
        description: Set(category.description.clone()),
    }
}

fn category_from_model(model: categories::Model) -> Category {
    Category {
        id: model.id,
        name: model.name,
        description: model.description,
    }
}

// ── Comment repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCommentRepository {
    pub db: DatabaseConnection,
}

impl CommentRepository for DbCommentRepository {
    async fn list_by_article(&self, article_id: Uuid) -> Result<Vec<Comment>, NewsServiceError> {
        let models = comments::Entity::find()
            .filter(comments::Column::ArticleId.eq(article_id))
            .order_by_asc(comments::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list comments by article")?;
        Ok(models.into_iter().map(comment_from_model).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, NewsServiceError> {
        let model = comments::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find comment by id")?;
        Ok(model.map(comment_from_model))
    }

    async fn create(&self, comment: &Comment) -> Result<(), NewsServiceError> {
        comments::ActiveModel {
            id: Set(comment.id),
            content: Set(comment.content.clone()),
            user_id: Set(comment.user_id),
            article_id: Set(comment.article_id),
            created_at: Set(comment.created_at),
            updated_at: Set(comment.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create comment")?;
        Ok(())
    }

    async fn update(&self, comment: &Comment) -> Result<(), NewsServiceError> {
        comments::ActiveModel {
            id: Set(comment.id),
            content: Set(comment.content.clone()),
            updated_at: Set(comment.updated_at),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update comment")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), NewsServiceError> {
        comments::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete comment")?;
        Ok(())
    }
}

fn comment_from_model(model: comments::Model) -> Comment {
    Comment {
        id: model.id,
        content: model.content,
        user_id: model.user_id,
        article_id: model.article_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
