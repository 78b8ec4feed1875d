//! User data model.
//!
//! A [`User`] is created only by a successful store insert; the store assigns
//! its [`UserId`]. [`NewUser`] is the validated candidate submitted for
//! insertion.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors raised when building user value types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The name is absent or empty.
    #[error("name must not be empty")]
    EmptyName,
    /// The email address is absent or empty.
    #[error("email must not be empty")]
    EmptyEmail,
}

/// Store-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a raw identifier returned by the store.
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Access the raw identifier.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-empty user name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`].
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Non-empty email address. Uniqueness is enforced by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        if email.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validated candidate record awaiting insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    name: UserName,
    email: EmailAddress,
}

impl NewUser {
    /// Build a candidate from already validated parts.
    pub fn new(name: UserName, email: EmailAddress) -> Self {
        Self { name, email }
    }

    /// Build a candidate from optional raw strings.
    ///
    /// # Examples
    /// ```
    /// use users_api::domain::{NewUser, UserValidationError};
    ///
    /// assert!(NewUser::try_from_parts(Some("Ada"), Some("ada@example.com")).is_ok());
    /// assert_eq!(
    ///     NewUser::try_from_parts(None, Some("ada@example.com")),
    ///     Err(UserValidationError::EmptyName)
    /// );
    /// ```
    pub fn try_from_parts(
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<Self, UserValidationError> {
        let name = UserName::new(name.unwrap_or_default())?;
        let email = EmailAddress::new(email.unwrap_or_default())?;
        Ok(Self::new(name, email))
    }

    /// Candidate name.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Candidate email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
}

/// Persisted user record.
///
/// Serialises as `{"id": 1, "name": "Ada", "email": "ada@example.com"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: UserName,
    email: EmailAddress,
}

impl User {
    /// Build a user from its stored parts.
    pub fn new(id: UserId, name: UserName, email: EmailAddress) -> Self {
        Self { id, name, email }
    }

    /// Promote a candidate once the store has assigned an identifier.
    pub fn from_new(id: UserId, new_user: NewUser) -> Self {
        let NewUser { name, email } = new_user;
        Self { id, name, email }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// User name.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Unique email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
}
