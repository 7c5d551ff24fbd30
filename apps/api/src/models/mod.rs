//! Database models for Quill
//!
//! Row types for the users, profiles, posts, member types and the
//! subscription edge table, plus the input structs the store accepts for
//! creating and changing them.

pub mod member_type;
pub mod post;
pub mod profile;
pub mod subscription;
pub mod user;

pub use member_type::{MemberType, MemberTypeId};
pub use post::{NewPost, Post, PostChanges};
pub use profile::{NewProfile, Profile, ProfileChanges};
pub use subscription::Subscription;
pub use user::{NewUser, User, UserChanges};
