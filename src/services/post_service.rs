//! Post service - Post CRUD with ownership enforcement.
//!
//! Protected operations take the caller identity explicitly. A missing
//! identity is rejected before any repository access; ownership is checked
//! after the lookup, so an existing post is never reported as missing to a
//! non-owner.

use async_trait::async_trait;
use std::sync::Arc;
use validator::Validate;

use crate::config::{MAX_QUERY_OFFSET, POSTS_PER_PAGE};
use crate::domain::{CurrentUser, NewPost, Post, PostChanges, PostDetail, PostSummary};
use crate::errors::{AppError, AppResult, FieldErrors, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::Paginated;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Post service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PostService: Send + Sync {
    /// List posts newest first, `POSTS_PER_PAGE` per page (1-based)
    async fn list(&self, page: u64) -> AppResult<Paginated<PostSummary>>;

    /// Create a post owned by the caller
    async fn create(&self, actor: Option<CurrentUser>, input: NewPost) -> AppResult<Post>;

    /// Get a post with its author
    async fn show(&self, id: i64) -> AppResult<PostDetail>;

    /// Apply a partial update; owner only
    async fn update(
        &self,
        actor: Option<CurrentUser>,
        id: i64,
        changes: PostChanges,
    ) -> AppResult<Post>;

    /// Delete a post; owner only
    async fn destroy(&self, actor: Option<CurrentUser>, id: i64) -> AppResult<()>;
}

/// Concrete implementation of PostService using Unit of Work.
pub struct PostManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> PostManager<U> {
    /// Create new post service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Load a post the caller is allowed to modify.
    async fn owned_post(&self, actor: &CurrentUser, id: i64) -> AppResult<Post> {
        let post = self.uow.posts().find_by_id(id).await?.ok_or_not_found()?;

        if !actor.owns(&post) {
            tracing::warn!(
                post_id = post.id,
                owner_id = post.user_id,
                actor_id = actor.id,
                "Rejected modification by non-owner"
            );
            return Err(AppError::Forbidden);
        }

        Ok(post)
    }
}

fn require_actor(actor: Option<CurrentUser>) -> AppResult<CurrentUser> {
    actor.ok_or(AppError::Unauthorized)
}

fn validate<T: Validate>(input: &T) -> AppResult<()> {
    input
        .validate()
        .map_err(|e| AppError::Validation(FieldErrors::from(e)))
}

#[async_trait]
impl<U: UnitOfWork> PostService for PostManager<U> {
    async fn list(&self, page: u64) -> AppResult<Paginated<PostSummary>> {
        let page = page.max(1);
        let offset = (page - 1)
            .saturating_mul(POSTS_PER_PAGE)
            .min(MAX_QUERY_OFFSET);

        let (posts, total) = self.uow.posts().page(offset, POSTS_PER_PAGE).await?;
        let data = posts.into_iter().map(PostSummary::from).collect();

        Ok(Paginated::new(data, total, POSTS_PER_PAGE))
    }

    async fn create(&self, actor: Option<CurrentUser>, input: NewPost) -> AppResult<Post> {
        let actor = require_actor(actor)?;
        validate(&input)?;

        let post = self
            .uow
            .posts()
            .create(actor.id, input.title, input.content)
            .await?;

        tracing::info!(post_id = post.id, user_id = actor.id, "Post created");
        Ok(post)
    }

    async fn show(&self, id: i64) -> AppResult<PostDetail> {
        self.uow.posts().find_detail(id).await?.ok_or_not_found()
    }

    async fn update(
        &self,
        actor: Option<CurrentUser>,
        id: i64,
        changes: PostChanges,
    ) -> AppResult<Post> {
        let actor = require_actor(actor)?;
        let post = self.owned_post(&actor, id).await?;
        validate(&changes)?;

        if changes.is_empty() {
            return Ok(post);
        }

        let post = self
            .uow
            .posts()
            .update(post.id, changes.title, changes.content)
            .await?;

        tracing::info!(post_id = post.id, "Post updated");
        Ok(post)
    }

    async fn destroy(&self, actor: Option<CurrentUser>, id: i64) -> AppResult<()> {
        let actor = require_actor(actor)?;
        let post = self.owned_post(&actor, id).await?;

        self.uow.posts().delete(post.id).await?;

        tracing::info!(post_id = post.id, "Post deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{MockPostRepository, MockUserRepository, PostRepository, UserRepository};
    use chrono::Utc;
    use mockall::predicate::eq;

    struct MockUow {
        users: Arc<MockUserRepository>,
        posts: Arc<MockPostRepository>,
    }

    impl UnitOfWork for MockUow {
        fn users(&self) -> Arc<dyn UserRepository> {
            self.users.clone()
        }

        fn posts(&self) -> Arc<dyn PostRepository> {
            self.posts.clone()
        }
    }

    fn service(posts: MockPostRepository) -> PostManager<MockUow> {
        PostManager::new(Arc::new(MockUow {
            users: Arc::new(MockUserRepository::new()),
            posts: Arc::new(posts),
        }))
    }

    fn actor(id: i64) -> Option<CurrentUser> {
        Some(CurrentUser {
            id,
            email: format!("user{}@example.com", id),
        })
    }

    fn post(id: i64, user_id: i64) -> Post {
        let now = Utc::now();
        Post {
            id,
            title: "Original".to_string(),
            content: "Original content".to_string(),
            user_id,
            created_at: now,
            updated_at: now,
        }
    }

    fn with_post(owner: i64) -> MockPostRepository {
        let mut posts = MockPostRepository::new();
        let stored = post(5, owner);
        posts
            .expect_find_by_id()
            .with(eq(5))
            .returning(move |_| Ok(Some(stored.clone())));
        posts
    }

    #[tokio::test]
    async fn test_anonymous_writes_never_reach_repository() {
        // No expectations: any repository call panics
        let service = service(MockPostRepository::new());

        let created = service
            .create(
                None,
                NewPost {
                    title: String::new(),
                    content: String::new(),
                },
            )
            .await;
        let updated = service.update(None, 404, PostChanges::default()).await;
        let destroyed = service.destroy(None, 404).await;

        assert!(matches!(created, Err(AppError::Unauthorized)));
        assert!(matches!(updated, Err(AppError::Unauthorized)));
        assert!(matches!(destroyed, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_list_requests_offset_for_page() {
        let mut posts = MockPostRepository::new();
        posts
            .expect_page()
            .with(eq(20), eq(POSTS_PER_PAGE))
            .times(1)
            .returning(|_, _| Ok((vec![], 25)));

        let page = service(posts).list(3).await.unwrap();

        assert!(page.data.is_empty());
        assert_eq!(page.total, 25);
        assert_eq!(page.per_page, 10);
    }

    #[tokio::test]
    async fn test_list_clamps_offset_for_huge_page() {
        let mut posts = MockPostRepository::new();
        posts
            .expect_page()
            .with(eq(MAX_QUERY_OFFSET), eq(POSTS_PER_PAGE))
            .times(1)
            .returning(|_, _| Ok((vec![], 3)));

        let page = service(posts).list(i64::MAX as u64).await.unwrap();

        assert!(page.data.is_empty());
        assert_eq!(page.total, 3);
    }

    #[tokio::test]
    async fn test_list_treats_page_zero_as_first() {
        let mut posts = MockPostRepository::new();
        posts
            .expect_page()
            .with(eq(0), eq(POSTS_PER_PAGE))
            .times(1)
            .returning(|_, _| Ok((vec![], 0)));

        assert!(service(posts).list(0).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_by_non_owner_is_forbidden() {
        let service = service(with_post(1));

        let result = service
            .update(
                actor(2),
                5,
                PostChanges {
                    title: Some("Hijacked".to_string()),
                    content: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn test_ownership_is_checked_before_validation() {
        let service = service(with_post(1));

        let result = service
            .update(
                actor(2),
                5,
                PostChanges {
                    title: Some(String::new()),
                    content: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn test_update_missing_post_is_not_found() {
        let mut posts = MockPostRepository::new();
        posts.expect_find_by_id().returning(|_| Ok(None));

        let result = service(posts)
            .update(actor(1), 99, PostChanges::default())
            .await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_owner_update_with_empty_title_is_rejected() {
        let service = service(with_post(1));

        let result = service
            .update(
                actor(1),
                5,
                PostChanges {
                    title: Some(String::new()),
                    content: Some("still fine".to_string()),
                },
            )
            .await;

        let err = result.unwrap_err();
        let fields = err.field_errors().unwrap();
        assert!(fields.contains("title"));
        assert!(!fields.contains("content"));
    }

    #[tokio::test]
    async fn test_update_without_fields_returns_post_unchanged() {
        let service = service(with_post(1));

        let result = service
            .update(actor(1), 5, PostChanges::default())
            .await
            .unwrap();

        assert_eq!(result.title, "Original");
        assert_eq!(result.content, "Original content");
    }

    #[tokio::test]
    async fn test_owner_update_passes_only_supplied_fields() {
        let mut posts = with_post(1);
        posts
            .expect_update()
            .with(eq(5), eq(None), eq(Some("New content".to_string())))
            .times(1)
            .returning(|id, _, content| {
                let mut updated = post(id, 1);
                updated.content = content.unwrap_or_default();
                Ok(updated)
            });

        let result = service(posts)
            .update(
                actor(1),
                5,
                PostChanges {
                    title: None,
                    content: Some("New content".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(result.title, "Original");
        assert_eq!(result.content, "New content");
    }

    #[tokio::test]
    async fn test_destroy_by_non_owner_keeps_post() {
        // No delete expectation: a delete call would panic
        let result = service(with_post(1)).destroy(actor(2), 5).await;

        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn test_owner_destroy_deletes_post() {
        let mut posts = with_post(1);
        posts
            .expect_delete()
            .with(eq(5))
            .times(1)
            .returning(|_| Ok(()));

        assert!(service(posts).destroy(actor(1), 5).await.is_ok());
    }
}
