use serde::{Deserialize, Serialize};

/// Users are keyed by small integers assigned at seed time.
pub type UserId = i64;

/// User entity - a selectable author/commenter profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}

/// The fixed set of users inserted into an empty `users` collection.
pub fn sample_users() -> Vec<User> {
    vec![
        User::new(1, "John Doe", "john@example.com"),
        User::new(2, "Jane Smith", "jane@example.com"),
        User::new(3, "Bob Johnson", "bob@example.com"),
        User::new(4, "Alice Williams", "alice@example.com"),
        User::new(5, "Charlie Brown", "charlie@example.com"),
    ]
}
