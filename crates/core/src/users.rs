//! User accounts and the user directory.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{Email, UserId};

/// A storefront account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Absent in stored documents means "not an administrator".
    #[serde(default)]
    pub is_admin: bool,
    /// Join date, stored as `YYYY-MM-DD`.
    pub joined_at: NaiveDate,
}

impl User {
    /// First word of the display name, used for the navbar greeting.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }

    /// Badge shown on the profile page.
    #[must_use]
    pub const fn membership_label(&self) -> &'static str {
        if self.is_admin {
            "Curator"
        } else {
            "Privileged Member"
        }
    }

    /// Role column label in the admin console.
    #[must_use]
    pub const fn role_label(&self) -> &'static str {
        if self.is_admin {
            "Administrator"
        } else {
            "Customer"
        }
    }
}

/// Error for a stored directory with two accounts under one email.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("more than one account uses {0}")]
pub struct DuplicateEmail(pub Email);

/// All known accounts. Email is the natural key: no two accounts share one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<User>", into = "Vec<User>")]
pub struct UserDirectory(Vec<User>);

impl TryFrom<Vec<User>> for UserDirectory {
    type Error = DuplicateEmail;

    fn try_from(users: Vec<User>) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(users.len());
        if let Some(dup) = users.iter().find(|u| !seen.insert(&u.email)) {
            return Err(DuplicateEmail(dup.email.clone()));
        }
        Ok(Self(users))
    }
}

impl From<UserDirectory> for Vec<User> {
    fn from(directory: UserDirectory) -> Self {
        directory.0
    }
}

impl UserDirectory {
    #[must_use]
    pub const fn new(users: Vec<User>) -> Self {
        Self(users)
    }

    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn find_by_email(&self, email: &Email) -> Option<&User> {
        self.0.iter().find(|u| &u.email == email)
    }

    /// The directory with `user` appended unless its email is already taken.
    #[must_use]
    pub fn with_account(&self, user: User) -> Self {
        if self.find_by_email(&user.email).is_some() {
            return self.clone();
        }
        let mut users = self.0.clone();
        users.push(user);
        Self(users)
    }

    /// The directory with the administrator flag of `email` flipped.
    #[must_use]
    pub fn with_admin_toggled(&self, email: &Email) -> Self {
        Self(
            self.0
                .iter()
                .map(|u| {
                    if &u.email == email {
                        User {
                            is_admin: !u.is_admin,
                            ..u.clone()
                        }
                    } else {
                        u.clone()
                    }
                })
                .collect(),
        )
    }
}
