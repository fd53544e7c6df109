//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{validate_user_id, validate_username, UserValidationError};

/// User identifier - alphanumeric + hyphens, max 50 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Create a new UserId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        validate_user_id(&id)?;
        Ok(Self(id))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User account entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    id: UserId,
    /// Username for login
    username: String,
    /// Contact email address
    email: String,
    /// Argon2 password hash - never exposed in serialization
    #[serde(skip_serializing)]
    password_hash: String,
    /// Whether the account may log in at all
    is_active: bool,
    /// Whether the account may access the admin interface
    is_staff: bool,
    /// Whether the account holds all permissions
    is_superuser: bool,
    /// Account creation timestamp
    date_joined: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
    /// Last login timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new regular user
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let username = username.into();
        validate_username(&username)?;
        let now = Utc::now();

        Ok(Self {
            id,
            username,
            email: email.into(),
            password_hash: password_hash.into(),
            is_active: true,
            is_staff: false,
            is_superuser: false,
            date_joined: now,
            updated_at: now,
            last_login_at: None,
        })
    }

    /// Create a superuser with all flags set
    pub fn new_superuser(
        id: UserId,
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let mut user = Self::new(id, username, email, password_hash)?;
        user.is_staff = true;
        user.is_superuser = true;
        Ok(user)
    }

    /// Rebuild a user from stored values
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: UserId,
        username: String,
        email: String,
        password_hash: String,
        is_active: bool,
        is_staff: bool,
        is_superuser: bool,
        date_joined: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        last_login_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            username,
            email,
            password_hash,
            is_active,
            is_staff,
            is_superuser,
            date_joined,
            updated_at,
            last_login_at,
        }
    }

    // Getters

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn is_staff(&self) -> bool {
        self.is_staff
    }

    pub fn is_superuser(&self) -> bool {
        self.is_superuser
    }

    pub fn date_joined(&self) -> DateTime<Utc> {
        self.date_joined
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn last_login_at(&self) -> Option<DateTime<Utc>> {
        self.last_login_at
    }

    // Mutators

    /// Update the username
    pub fn set_username(&mut self, username: impl Into<String>) -> Result<(), UserValidationError> {
        let username = username.into();
        validate_username(&username)?;
        self.username = username;
        self.touch();
        Ok(())
    }

    /// Update the email address
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        self.touch();
    }

    /// Update the password hash
    pub fn set_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password_hash = password_hash.into();
        self.touch();
    }

    /// Enable or disable the account
    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
        self.touch();
    }

    /// Grant or revoke admin interface access
    pub fn set_staff(&mut self, staff: bool) {
        self.is_staff = staff;
        self.touch();
    }

    /// Grant or revoke all permissions
    pub fn set_superuser(&mut self, superuser: bool) {
        self.is_superuser = superuser;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Listing row pairing a user with whether a team exists for them
#[derive(Debug, Clone, Serialize)]
pub struct UserWithTeam {
    #[serde(flatten)]
    pub user: User,
    /// Whether a team record is registered for this account
    pub has_team: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_user(id: &str, username: &str) -> User {
        let user_id = UserId::new(id).unwrap();
        User::new(user_id, username, "user@example.com", "hashed_password").unwrap()
    }

    #[test]
    fn test_user_id_valid() {
        let id = UserId::new("admin").unwrap();
        assert_eq!(id.as_str(), "admin");
    }

    #[test]
    fn test_user_id_invalid() {
        assert!(UserId::new("").is_err());
        assert!(UserId::new("-user").is_err());
        assert!(UserId::new("user-").is_err());
    }

    #[test]
    fn test_user_creation() {
        let user = create_test_user("user-1", "testuser");

        assert_eq!(user.username(), "testuser");
        assert_eq!(user.email(), "user@example.com");
        assert!(user.is_active());
        assert!(!user.is_staff());
        assert!(!user.is_superuser());
        assert!(user.last_login_at().is_none());
    }

    #[test]
    fn test_superuser_creation() {
        let id = UserId::new("admin").unwrap();
        let user = User::new_superuser(id, "admin", "admin@example.com", "hash").unwrap();

        assert!(user.is_active());
        assert!(user.is_staff());
        assert!(user.is_superuser());
    }

    #[test]
    fn test_user_invalid_username() {
        let id = UserId::new("user-1").unwrap();
        assert!(User::new(id, "bad name", "user@example.com", "hash").is_err());
    }

    #[test]
    fn test_user_deactivation() {
        let mut user = create_test_user("user-1", "testuser");

        user.set_active(false);
        assert!(!user.is_active());

        user.set_active(true);
        assert!(user.is_active());
    }

    #[test]
    fn test_user_update_password() {
        let mut user = create_test_user("user-1", "testuser");
        let original_updated = user.updated_at();

        // Small delay to ensure timestamp differs
        std::thread::sleep(std::time::Duration::from_millis(10));

        user.set_password_hash("new_hash");
        assert_eq!(user.password_hash(), "new_hash");
        assert!(user.updated_at() > original_updated);
    }

    #[test]
    fn test_user_serialization_excludes_password() {
        let user = create_test_user("user-1", "testuser");

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("hashed_password"));
        assert!(!json.contains("password_hash"));
    }

    #[test]
    fn test_user_with_team_serialization() {
        let user = create_test_user("user-1", "testuser");
        let row = UserWithTeam {
            user,
            has_team: true,
        };

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["has_team"], true);
        assert_eq!(json["username"], "testuser");
    }
}
