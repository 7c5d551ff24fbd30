//! Integration tests for the request-scoped batched loaders
//!
//! Exercises the loaders directly against a `MemoryStore` and counts the
//! bulk calls in the store's operation log.

mod common;

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use uuid::Uuid;

use common::*;
use quill_api::graphql::loaders::load_ordered;
use quill_api::models::MemberTypeId;
use quill_api::repositories::UserStore;
use quill_api::{LoaderSettings, Loaders, MemoryStore, StoreError};

fn loaders(seeded: &Seeded) -> Loaders {
    Loaders::new(seeded.store.clone(), LoaderSettings::default())
}

#[test_log::test(tokio::test)]
async fn test_sibling_loads_coalesce_into_one_call() {
    let seeded = seed().users(5).posts_per_user(3).build().await;
    let loaders = loaders(&seeded);

    let results = join_all(
        seeded
            .users
            .iter()
            .map(|u| loaders.posts_by_author.load_one(u.id)),
    )
    .await;

    assert_eq!(seeded.store.operation_count("find_posts_by_author_ids"), 1);
    for (user, posts) in seeded.users.iter().zip(results) {
        let posts = posts.unwrap().unwrap();
        assert_eq!(posts.len(), 3);
        assert!(posts.iter().all(|p| p.author_id == user.id));
    }
}

#[tokio::test]
async fn test_duplicate_keys_dispatched_once() {
    let seeded = seed().users(2).build().await;
    let loaders = loaders(&seeded);
    let id = seeded.users[0].id;

    let (a, b) = tokio::join!(loaders.users.load_one(id), loaders.users.load_one(id));

    assert_eq!(a.unwrap(), b.unwrap());
    let ops = seeded.store.operations();
    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].keys, vec![id.to_string()]);
}

#[tokio::test]
async fn test_load_ordered_follows_key_order() {
    let seeded = seed().users(3).build().await;
    let loaders = loaders(&seeded);
    let [u0, u1, u2] = [0, 1, 2].map(|i| seeded.users[i].id);
    let missing = Uuid::new_v4();

    let users = load_ordered(&loaders.users, &[u2, u0, missing, u1, u2])
        .await
        .unwrap();

    let ids: Vec<_> = users.iter().map(|u| u.as_ref().map(|u| u.id)).collect();
    assert_eq!(ids, vec![Some(u2), Some(u0), None, Some(u1), Some(u2)]);
    assert_eq!(seeded.store.operation_count("find_users_by_ids"), 1);
}

#[tokio::test]
async fn test_repeated_load_served_from_cache() {
    let seeded = seed().users(1).build().await;
    let loaders = loaders(&seeded);
    let id = seeded.users[0].id;

    let first = loaders.users.load_one(id).await.unwrap();
    let second = loaders.users.load_one(id).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(seeded.store.operation_count("find_users_by_ids"), 1);
}

#[tokio::test]
async fn test_user_miss_cached() {
    let seeded = seed().users(1).build().await;
    let loaders = loaders(&seeded);
    let missing = Uuid::new_v4();

    let first = loaders.users.load_one(missing).await.unwrap();
    let second = loaders.users.load_one(missing).await.unwrap();

    assert_eq!(first, Some(None));
    assert_eq!(second, Some(None));
    assert_eq!(seeded.store.operation_count("find_users_by_ids"), 1);
}

#[tokio::test]
async fn test_profile_miss_cached() {
    let seeded = seed().users(1).profiles(0).build().await;
    let loaders = loaders(&seeded);
    let id = seeded.users[0].id;

    let first = loaders.profile_by_user.load_one(id).await.unwrap();
    let second = loaders.profile_by_user.load_one(id).await.unwrap();

    assert!(matches!(first, Some(None)));
    assert!(matches!(second, Some(None)));
    assert_eq!(seeded.store.operation_count("find_profiles_by_user_ids"), 1);
}

#[tokio::test]
async fn test_member_type_miss_cached() {
    let store = Arc::new(MemoryStore::with_member_types(Vec::new()));
    let loaders = Loaders::new(store.clone(), LoaderSettings::default());

    let first = loaders.member_types.load_one(MemberTypeId::Basic).await.unwrap();
    let second = loaders.member_types.load_one(MemberTypeId::Basic).await.unwrap();

    assert!(matches!(first, Some(None)));
    assert!(matches!(second, Some(None)));
    assert_eq!(store.operation_count("find_member_types_by_ids"), 1);
}

#[tokio::test]
async fn test_miss_in_mixed_batch_cached() {
    let seeded = seed().users(2).build().await;
    let loaders = loaders(&seeded);
    let missing = Uuid::new_v4();
    let keys = [seeded.users[0].id, missing, seeded.users[1].id];

    let first = load_ordered(&loaders.users, &keys).await.unwrap();
    let again = load_ordered(&loaders.users, &[missing]).await.unwrap();

    assert!(first[1].is_none());
    assert!(again[0].is_none());
    assert_eq!(seeded.store.operation_count("find_users_by_ids"), 1);
}

#[tokio::test]
async fn test_registries_do_not_share_caches() {
    let seeded = seed().users(1).build().await;
    let id = seeded.users[0].id;

    let first_request = loaders(&seeded);
    let before = first_request.users.load_one(id).await.unwrap().flatten().unwrap();

    seeded
        .store
        .update_user(
            id,
            quill_api::models::UserChanges {
                name: Some("renamed".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let second_request = loaders(&seeded);
    let after = second_request.users.load_one(id).await.unwrap().flatten().unwrap();

    assert_eq!(before.name, "user-0");
    assert_eq!(after.name, "renamed");
    assert_eq!(seeded.store.operation_count("find_users_by_ids"), 2);

    // the first registry still answers from its own cache
    let cached = first_request.users.load_one(id).await.unwrap().flatten().unwrap();
    assert_eq!(cached.name, "user-0");
    assert_eq!(seeded.store.operation_count("find_users_by_ids"), 2);
}

#[tokio::test]
async fn test_subscription_directions() {
    let seeded = seed().users(3).build().await;
    // user-0 follows user-1
    seeded.follow(0, 1).await;
    let loaders = loaders(&seeded);
    let (a, b) = (seeded.users[0].id, seeded.users[1].id);

    let followers_of_b = loaders.followers.load_one(b).await.unwrap().unwrap();
    let following_of_a = loaders.following.load_one(a).await.unwrap().unwrap();
    let followers_of_a = loaders.followers.load_one(a).await.unwrap().unwrap();
    let following_of_b = loaders.following.load_one(b).await.unwrap().unwrap();

    assert_eq!(followers_of_b.iter().map(|u| u.id).collect::<Vec<_>>(), vec![a]);
    assert_eq!(following_of_a.iter().map(|u| u.id).collect::<Vec<_>>(), vec![b]);
    assert!(followers_of_a.is_empty());
    assert!(following_of_b.is_empty());
}

#[tokio::test]
async fn test_scalar_miss_is_none_collection_miss_is_empty() {
    let seeded = seed().users(1).posts_per_user(0).build().await;
    let loaders = loaders(&seeded);
    let id = seeded.users[0].id;

    let profile = loaders.profile_by_user.load_one(id).await.unwrap();
    let posts = loaders.posts_by_author.load_one(id).await.unwrap();
    let profiles = loaders
        .profiles_by_member_type
        .load_one(MemberTypeId::Business)
        .await
        .unwrap();

    assert!(matches!(profile, Some(None)));
    assert_eq!(posts, Some(Vec::new()));
    assert_eq!(profiles, Some(Vec::new()));
}

#[tokio::test]
async fn test_batch_failure_reaches_every_caller() {
    let seeded = seed().users(2).build().await;
    let loaders = loaders(&seeded);
    seeded.store.set_available(false);

    let (a, b) = tokio::join!(
        loaders.users.load_one(seeded.users[0].id),
        loaders.users.load_one(seeded.users[1].id),
    );

    let (a, b) = (a.unwrap_err(), b.unwrap_err());
    assert!(Arc::ptr_eq(&a, &b));
    assert!(matches!(*a, StoreError::Unavailable(_)));
    assert_eq!(seeded.store.operation_count("find_users_by_ids"), 1);
}

#[tokio::test]
async fn test_primed_value_skips_store() {
    let seeded = seed().users(1).build().await;
    let loaders = loaders(&seeded);
    let user = seeded.users[0].clone();

    loaders.users.feed_one(user.id, Some(user.clone())).await;
    let loaded = loaders.users.load_one(user.id).await.unwrap();

    assert_eq!(loaded, Some(Some(user)));
    assert!(seeded.store.operations().is_empty());
}

#[tokio::test]
async fn test_max_batch_size_splits_batches() {
    let seeded = seed().users(5).build().await;
    let loaders = Loaders::new(
        seeded.store.clone(),
        LoaderSettings {
            delay: Duration::from_millis(5),
            max_batch_size: 2,
        },
    );

    let results = join_all(seeded.users.iter().map(|u| loaders.users.load_one(u.id))).await;

    assert!(results.iter().all(|r| matches!(r, Ok(Some(Some(_))))));
    let ops = seeded.store.operations();
    assert!(ops.len() >= 3);
    assert!(ops.iter().all(|op| op.keys.len() <= 2));
    assert_eq!(ops.iter().map(|op| op.keys.len()).sum::<usize>(), 5);
}

#[tokio::test]
async fn test_member_type_loader() {
    let seeded = seed().users(0).build().await;
    let loaders = loaders(&seeded);

    let (basic, business) = tokio::join!(
        loaders.member_types.load_one(MemberTypeId::Basic),
        loaders.member_types.load_one(MemberTypeId::Business),
    );

    assert_eq!(basic.unwrap().flatten().unwrap().posts_limit_per_month, 20);
    assert_eq!(business.unwrap().flatten().unwrap().discount, 7.7);
    assert_eq!(seeded.store.operation_count("find_member_types_by_ids"), 1);
}
