//! Comment entity <-> model mapper

use tutor_core::entities::Comment;
use tutor_core::value_objects::Snowflake;

use crate::models::CommentModel;

/// Convert CommentModel to Comment entity
impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: Snowflake::new(model.id),
            resource_id: Snowflake::new(model.resource_id),
            author_id: Snowflake::new(model.author_id),
            content: model.content,
            parent_comment_id: model.parent_comment_id.map(Snowflake::new),
            depth: model.depth,
            is_deleted: model.is_deleted,
            is_approved: model.is_approved,
            created_at: model.created_at,
            deleted_at: model.deleted_at,
        }
    }
}
