//! Post repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait, QueryOrder,
    QuerySelect, Set,
};

use super::entities::post::{self, ActiveModel, Entity as PostEntity};
use super::entities::user::Entity as UserEntity;
use crate::domain::{AuthorResponse, Post, PostDetail};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Post repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Page through posts newest first (ties broken by id, descending).
    ///
    /// Returns the requested slice together with the total post count.
    async fn page(&self, offset: u64, limit: u64) -> AppResult<(Vec<PostDetail>, u64)>;

    /// Find post by ID
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Post>>;

    /// Find post by ID together with its author
    async fn find_detail(&self, id: i64) -> AppResult<Option<PostDetail>>;

    /// Create a new post owned by `user_id`
    async fn create(&self, user_id: i64, title: String, content: String) -> AppResult<Post>;

    /// Apply the supplied fields, leaving the others untouched
    async fn update(
        &self,
        id: i64,
        title: Option<String>,
        content: Option<String>,
    ) -> AppResult<Post>;

    /// Delete post by ID
    async fn delete(&self, id: i64) -> AppResult<()>;
}

/// Concrete implementation of PostRepository
pub struct PostStore {
    db: DatabaseConnection,
}

impl PostStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Join a post row with its (required) author row.
fn into_detail(
    (post, author): (post::Model, Option<super::entities::user::Model>),
) -> AppResult<PostDetail> {
    let author = author.ok_or_else(|| {
        AppError::internal(format!("Post {} references a missing user", post.id))
    })?;
    Ok(PostDetail::new(Post::from(post), AuthorResponse::from(author)))
}

#[async_trait]
impl PostRepository for PostStore {
    async fn page(&self, offset: u64, limit: u64) -> AppResult<(Vec<PostDetail>, u64)> {
        let total = PostEntity::find().count(&self.db).await?;
        if offset >= total {
            return Ok((Vec::new(), total));
        }

        let rows = PostEntity::find()
            .find_also_related(UserEntity)
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        let data = rows
            .into_iter()
            .map(into_detail)
            .collect::<AppResult<Vec<_>>>()?;

        Ok((data, total))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Post>> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Post::from))
    }

    async fn find_detail(&self, id: i64) -> AppResult<Option<PostDetail>> {
        let result = PostEntity::find_by_id(id)
            .find_also_related(UserEntity)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        result.map(into_detail).transpose()
    }

    async fn create(&self, user_id: i64, title: String, content: String) -> AppResult<Post> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: NotSet,
            title: Set(title),
            content: Set(content),
            user_id: Set(user_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Post::from(model))
    }

    async fn update(
        &self,
        id: i64,
        title: Option<String>,
        content: Option<String>,
    ) -> AppResult<Post> {
        let post = PostEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = post.into();

        if let Some(title) = title {
            active.title = Set(title);
        }
        if let Some(content) = content {
            active.content = Set(content);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Post::from(model))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
