//! Signed-in user stub. There is no identity backend.

/// The user shown in the UI header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub name: String,
}

/// Returns the constant local user.
pub fn current_user() -> User {
    User {
        name: "John Doe".to_string(),
    }
}
