//! User model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User record from the users table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Account balance
    pub balance: f64,
}

/// User creation input
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub balance: f64,
}

/// Partial user update; `None` leaves the column unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserChanges {
    pub name: Option<String>,
    pub balance: Option<f64>,
}

impl UserChanges {
    /// True when no column would change
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.balance.is_none()
    }

    /// Apply the changes to an in-memory record
    pub fn apply(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(balance) = self.balance {
            user.balance = balance;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_partial_changes() {
        let mut user = User {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            balance: 10.0,
        };
        let changes = UserChanges {
            balance: Some(42.5),
            ..Default::default()
        };

        changes.apply(&mut user);

        assert_eq!(user.name, "Ada");
        assert_eq!(user.balance, 42.5);
        assert!(!changes.is_empty());
        assert!(UserChanges::default().is_empty());
    }
}
