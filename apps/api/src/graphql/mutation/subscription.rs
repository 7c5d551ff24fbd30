//! Subscription edge mutations
//!
//! - subscribeTo: Make a user follow an author
//! - unsubscribeFrom: Remove that edge

use async_graphql::dataloader::Loader;
use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::error::{to_graphql_error, ApiError, ApiResult};
use crate::graphql::loaders::{BatchLoader, Loaders};
use crate::graphql::types::{loaders, User};
use crate::models::{Subscription, User as DbUser};
use crate::repositories::SharedStore;

/// Look up both ends of an edge, failing with NOT_FOUND for a missing user
async fn edge_users(store: &SharedStore, edge: Subscription) -> ApiResult<(DbUser, DbUser)> {
    let mut found = store
        .find_users_by_ids(&[edge.subscriber_id, edge.author_id])
        .await?;

    let mut take = |id: Uuid| {
        found
            .iter()
            .position(|u| u.id == id)
            .map(|i| found.swap_remove(i))
            .ok_or_else(|| ApiError::not_found("user", id))
    };
    let subscriber = take(edge.subscriber_id)?;
    let author = take(edge.author_id)?;
    Ok((subscriber, author))
}

/// Apply `patch` to the edge list cached under `key`, if this request has
/// already loaded it. Lists not loaded yet are fetched fresh later.
async fn patch_cached<L>(
    loader: &BatchLoader<L>,
    key: Uuid,
    patch: impl FnOnce(&mut Vec<DbUser>),
) where
    L: Loader<Uuid, Value = Vec<DbUser>>,
{
    if let Some(mut list) = loader.get_cached_values::<Uuid>().remove(&key) {
        patch(&mut list);
        loader.feed_one(key, list).await;
    }
}

/// Keep `userSubscribedTo` / `subscribedToUser` lists already resolved in
/// this request consistent with a new or removed edge
async fn sync_edge_caches(loaders: &Loaders, subscriber: &DbUser, author: &DbUser, linked: bool) {
    patch_cached(&loaders.following, subscriber.id, |authors| {
        authors.retain(|u| u.id != author.id);
        if linked {
            authors.push(author.clone());
        }
    })
    .await;
    patch_cached(&loaders.followers, author.id, |subscribers| {
        subscribers.retain(|u| u.id != subscriber.id);
        if linked {
            subscribers.push(subscriber.clone());
        }
    })
    .await;
}

#[derive(Default)]
pub struct SubscriptionMutation;

#[Object]
impl SubscriptionMutation {
    /// Subscribe `userId` to `authorId` and return the subscriber
    ///
    /// Subscribing twice is a no-op. A user cannot subscribe to themselves.
    async fn subscribe_to(
        &self,
        ctx: &Context<'_>,
        user_id: Uuid,
        author_id: Uuid,
    ) -> Result<User> {
        if user_id == author_id {
            return Err(to_graphql_error(ApiError::validation(
                "a user cannot subscribe to themselves",
            )));
        }

        let store = ctx.data::<SharedStore>()?;
        let edge = Subscription::new(user_id, author_id);
        let (subscriber, author) = edge_users(store, edge).await.map_err(to_graphql_error)?;

        store.subscribe(edge).await.map_err(to_graphql_error)?;
        tracing::info!(subscriber_id = %user_id, author_id = %author_id, "Subscribed");

        let loaders = loaders(ctx)?;
        sync_edge_caches(loaders, &subscriber, &author, true).await;
        loaders.users.feed_one(author.id, Some(author)).await;
        loaders.users.feed_one(subscriber.id, Some(subscriber.clone())).await;
        Ok(User::from(subscriber))
    }

    /// Remove the edge; false when `userId` was not subscribed to `authorId`
    async fn unsubscribe_from(
        &self,
        ctx: &Context<'_>,
        user_id: Uuid,
        author_id: Uuid,
    ) -> Result<bool> {
        let store = ctx.data::<SharedStore>()?;
        let edge = Subscription::new(user_id, author_id);
        let (subscriber, author) = edge_users(store, edge).await.map_err(to_graphql_error)?;

        let removed = store.unsubscribe(edge).await.map_err(to_graphql_error)?;
        if removed {
            tracing::info!(subscriber_id = %user_id, author_id = %author_id, "Unsubscribed");
            sync_edge_caches(loaders(ctx)?, &subscriber, &author, false).await;
        }
        Ok(removed)
    }
}
