//! Post mutations

use async_graphql::{Context, InputObject, Object, Result};
use uuid::Uuid;

use crate::error::{to_graphql_error, ApiError, ApiResult};
use crate::graphql::types::Post;
use crate::models::{NewPost, PostChanges};
use crate::repositories::SharedStore;

use super::require_text;

/// Input for creating a post
#[derive(Debug, Clone, InputObject)]
pub struct CreatePostInput {
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
}

impl CreatePostInput {
    fn validate(self) -> ApiResult<NewPost> {
        Ok(NewPost {
            title: require_text("title", &self.title)?,
            content: self.content,
            author_id: self.author_id,
        })
    }
}

/// Input for changing a post
#[derive(Debug, Clone, Default, InputObject)]
pub struct ChangePostInput {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl ChangePostInput {
    fn validate(self) -> ApiResult<PostChanges> {
        Ok(PostChanges {
            title: self
                .title
                .map(|title| require_text("title", &title))
                .transpose()?,
            content: self.content,
        })
    }
}

#[derive(Default)]
pub struct PostMutation;

#[Object]
impl PostMutation {
    /// Create a post; fails with INVALID_REFERENCE for an unknown author
    async fn create_post(&self, ctx: &Context<'_>, dto: CreatePostInput) -> Result<Post> {
        let input = dto.validate().map_err(to_graphql_error)?;
        let store = ctx.data::<SharedStore>()?;

        let post = store.create_post(input).await.map_err(to_graphql_error)?;
        tracing::info!(post_id = %post.id, author_id = %post.author_id, "Post created");
        Ok(Post::from(post))
    }

    /// Change an existing post
    async fn change_post(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        dto: ChangePostInput,
    ) -> Result<Post> {
        let changes = dto.validate().map_err(to_graphql_error)?;
        let store = ctx.data::<SharedStore>()?;

        let post = store
            .update_post(id, changes)
            .await
            .map_err(to_graphql_error)?
            .ok_or_else(|| to_graphql_error(ApiError::not_found("post", id)))?;
        Ok(Post::from(post))
    }

    /// Delete a post
    async fn delete_post(&self, ctx: &Context<'_>, id: Uuid) -> Result<bool> {
        let store = ctx.data::<SharedStore>()?;

        if !store.delete_post(id).await.map_err(to_graphql_error)? {
            return Err(to_graphql_error(ApiError::not_found("post", id)));
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_title_rejected() {
        let input = CreatePostInput {
            title: " ".to_string(),
            content: "body".to_string(),
            author_id: Uuid::nil(),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_empty_content_allowed() {
        let changes = ChangePostInput {
            content: Some(String::new()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(changes.content.as_deref(), Some(""));
    }
}
