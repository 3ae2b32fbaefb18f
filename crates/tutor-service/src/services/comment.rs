//! Comment service
//!
//! Nested comment threads on content resources: creation with the depth
//! cap, soft deletion, and moderation.

use chrono::Utc;
use tracing::{info, instrument};
use tutor_core::entities::{Comment, MAX_COMMENT_DEPTH};
use tutor_core::value_objects::Principal;
use tutor_core::{DomainError, Snowflake};

use crate::dto::{CommentResponse, PostCommentRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Maximum comment content length in characters
const MAX_CONTENT_LEN: usize = 2000;

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Post a comment, replying under a parent when one is given
    #[instrument(skip(self, request))]
    pub async fn post_comment(
        &self,
        resource_id: Snowflake,
        author_id: Snowflake,
        request: PostCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let content = request.content.trim().to_string();
        if content.is_empty() {
            return Err(ServiceError::validation("Comment content cannot be empty"));
        }
        if content.chars().count() > MAX_CONTENT_LEN {
            return Err(DomainError::ContentTooLong { max: MAX_CONTENT_LEN }.into());
        }

        let comment = match request.parent_comment_id {
            Some(ref raw) => {
                let parent_id = Snowflake::parse(raw)
                    .map_err(|_| ServiceError::validation("Invalid parent_comment_id format"))?;
                let parent = self
                    .ctx
                    .comment_repo()
                    .find_by_id(parent_id)
                    .await?
                    .ok_or(DomainError::CommentNotFound(parent_id))?;

                if parent.resource_id != resource_id {
                    return Err(ServiceError::validation(
                        "Parent comment belongs to a different resource",
                    ));
                }
                if parent.is_deleted {
                    return Err(DomainError::ParentDeleted.into());
                }

                Comment::reply_to(&parent, self.ctx.generate_id(), author_id, content)
                    .ok_or(DomainError::MaxDepthExceeded { max: MAX_COMMENT_DEPTH })?
            }
            None => Comment::new(self.ctx.generate_id(), resource_id, author_id, content),
        };

        self.ctx.comment_repo().create(&comment).await?;

        info!(comment_id = %comment.id, resource_id = %resource_id, depth = comment.depth, "Comment created");

        Ok(CommentResponse::from_comment(&comment, 0))
    }

    /// List all comments on a resource, oldest first, with derived reply
    /// counts
    #[instrument(skip(self))]
    pub async fn list_comments(&self, resource_id: Snowflake) -> ServiceResult<Vec<CommentResponse>> {
        let comments = self.ctx.comment_repo().find_by_resource(resource_id).await?;
        let counts = self.ctx.comment_repo().reply_counts(resource_id).await?;

        Ok(comments
            .iter()
            .map(|comment| {
                let reply_count = counts
                    .iter()
                    .find(|(id, _)| *id == comment.id)
                    .map_or(0, |(_, n)| *n);
                CommentResponse::from_comment(comment, reply_count)
            })
            .collect())
    }

    /// Soft delete a comment
    ///
    /// Allowed for the author and for moderators. The row stays queryable
    /// so the thread keeps its shape.
    #[instrument(skip(self, actor))]
    pub async fn delete_comment(&self, comment_id: Snowflake, actor: &Principal) -> ServiceResult<()> {
        let comment = self
            .ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or(DomainError::CommentNotFound(comment_id))?;

        if comment.author_id != actor.id && !actor.is_moderator() {
            return Err(DomainError::Forbidden(
                "Only the author or a moderator may delete a comment".to_string(),
            )
            .into());
        }

        self.ctx.comment_repo().soft_delete(comment_id, Utc::now()).await?;

        info!(comment_id = %comment_id, actor_id = %actor.id, "Comment soft-deleted");

        Ok(())
    }

    /// Approve a comment; moderator only
    #[instrument(skip(self, actor))]
    pub async fn approve_comment(&self, comment_id: Snowflake, actor: &Principal) -> ServiceResult<()> {
        self.set_approval(comment_id, actor, true).await
    }

    /// Withdraw approval from a comment; moderator only
    #[instrument(skip(self, actor))]
    pub async fn disapprove_comment(&self, comment_id: Snowflake, actor: &Principal) -> ServiceResult<()> {
        self.set_approval(comment_id, actor, false).await
    }

    async fn set_approval(
        &self,
        comment_id: Snowflake,
        actor: &Principal,
        approved: bool,
    ) -> ServiceResult<()> {
        if !actor.is_moderator() {
            return Err(
                DomainError::Forbidden("Moderation requires a moderator role".to_string()).into(),
            );
        }

        self.ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or(DomainError::CommentNotFound(comment_id))?;

        self.ctx.comment_repo().set_approved(comment_id, approved).await?;

        info!(comment_id = %comment_id, approved, "Comment moderation updated");

        Ok(())
    }
}
