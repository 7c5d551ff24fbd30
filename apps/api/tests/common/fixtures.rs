//! Test fixtures for API integration tests
//!
//! Provides a seeded in-memory store to run requests against.

#![allow(dead_code)]

use std::sync::Arc;

use quill_api::models::{
    MemberTypeId, NewPost, NewProfile, NewUser, Post, Profile, Subscription, User,
};
use quill_api::repositories::{PostStore, ProfileStore, SubscriptionStore, UserStore};
use quill_api::MemoryStore;

/// A store populated with users, their posts and (for some) profiles
pub struct Seeded {
    pub store: Arc<MemoryStore>,
    pub users: Vec<User>,
    pub posts: Vec<Post>,
    pub profiles: Vec<Profile>,
}

impl Seeded {
    /// Add the edge `subscriber` follows `author`
    pub async fn follow(&self, subscriber: usize, author: usize) {
        self.store
            .subscribe(Subscription::new(
                self.users[subscriber].id,
                self.users[author].id,
            ))
            .await
            .unwrap();
    }
}

/// Builder for seeded stores
#[derive(Debug, Clone)]
pub struct SeedBuilder {
    users: usize,
    posts_per_user: usize,
    profiles: usize,
}

impl Default for SeedBuilder {
    fn default() -> Self {
        Self {
            users: 3,
            posts_per_user: 2,
            profiles: 0,
        }
    }
}

impl SeedBuilder {
    pub fn users(mut self, count: usize) -> Self {
        self.users = count;
        self
    }

    pub fn posts_per_user(mut self, count: usize) -> Self {
        self.posts_per_user = count;
        self
    }

    /// Give the first `count` users a profile; even ones are basic,
    /// odd ones business
    pub fn profiles(mut self, count: usize) -> Self {
        self.profiles = count;
        self
    }

    pub async fn build(self) -> Seeded {
        let store = Arc::new(MemoryStore::new());
        let mut users = Vec::new();
        let mut posts = Vec::new();
        let mut profiles = Vec::new();

        for i in 0..self.users {
            let user = store
                .create_user(NewUser {
                    name: format!("user-{}", i),
                    balance: 10.0 * i as f64,
                })
                .await
                .unwrap();

            for p in 0..self.posts_per_user {
                posts.push(
                    store
                        .create_post(NewPost {
                            title: format!("post {} by user-{}", p, i),
                            content: "lorem ipsum".to_string(),
                            author_id: user.id,
                        })
                        .await
                        .unwrap(),
                );
            }

            if i < self.profiles {
                profiles.push(
                    store
                        .create_profile(NewProfile {
                            is_male: i % 2 == 0,
                            year_of_birth: 1980 + i as i32,
                            user_id: user.id,
                            member_type_id: if i % 2 == 0 {
                                MemberTypeId::Basic
                            } else {
                                MemberTypeId::Business
                            },
                        })
                        .await
                        .unwrap(),
                );
            }

            users.push(user);
        }

        store.clear_log();
        Seeded {
            store,
            users,
            posts,
            profiles,
        }
    }
}

pub fn seed() -> SeedBuilder {
    SeedBuilder::default()
}
