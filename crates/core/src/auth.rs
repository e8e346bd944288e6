use std::fmt::{Debug, Formatter};

use serde::{Deserialize, Serialize};

use crate::{AppError, AppResult};

/// Authenticated user as reported by the API for the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    user_id: String,
    display_name: String,
    email: Option<String>,
    role_names: Vec<String>,
    is_super_admin: bool,
}

impl SessionUser {
    /// Creates a session user from identity and role data.
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        display_name: impl Into<String>,
        email: Option<String>,
        role_names: Vec<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
            email,
            role_names,
            is_super_admin: false,
        }
    }

    /// Marks the user as admin-equivalent independently of role names.
    #[must_use]
    pub fn with_super_admin_flag(mut self, is_super_admin: bool) -> Self {
        self.is_super_admin = is_super_admin;
        self
    }

    /// Returns the stable user identifier.
    #[must_use]
    pub fn user_id(&self) -> &str {
        self.user_id.as_str()
    }

    /// Returns the display name for the current user.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the email, if the API returned one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the role names held by the user.
    #[must_use]
    pub fn role_names(&self) -> &[String] {
        self.role_names.as_slice()
    }

    /// Returns whether the user holds a role with the given name.
    #[must_use]
    pub fn has_role(&self, role_name: &str) -> bool {
        self.role_names.iter().any(|value| value == role_name)
    }

    /// Returns the server-side admin-equivalent flag.
    #[must_use]
    pub fn is_flagged_super_admin(&self) -> bool {
        self.is_super_admin
    }
}

/// Bearer token attached to API requests.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a token from a non-empty value.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "access token must not be empty".to_owned(),
            ));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the raw token value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the value of an `Authorization` header.
    #[must_use]
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl Debug for AccessToken {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("AccessToken(<redacted>)")
    }
}

/// Authenticated session: the user plus the token that proves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user: SessionUser,
    access_token: AccessToken,
}

impl Session {
    /// Creates a session.
    #[must_use]
    pub fn new(user: SessionUser, access_token: AccessToken) -> Self {
        Self { user, access_token }
    }

    /// Returns the authenticated user.
    #[must_use]
    pub fn user(&self) -> &SessionUser {
        &self.user
    }

    /// Returns the bearer token.
    #[must_use]
    pub fn access_token(&self) -> &AccessToken {
        &self.access_token
    }
}

#[cfg(test)]
mod tests {
    use super::{AccessToken, SessionUser};

    #[test]
    fn access_token_debug_is_redacted() {
        let token = AccessToken::new("secret-value");
        assert!(token.is_ok());
        let rendered = format!("{:?}", token.ok());
        assert!(!rendered.contains("secret-value"));
    }

    #[test]
    fn access_token_rejects_blank_value() {
        assert!(AccessToken::new("  ").is_err());
    }

    #[test]
    fn session_user_roundtrips_through_json() {
        let user = SessionUser::new("u1", "Ada", None, vec!["admin".to_owned()]);
        let encoded = serde_json::to_string(&user).unwrap_or_default();
        let decoded = serde_json::from_str::<SessionUser>(encoded.as_str()).ok();
        assert_eq!(decoded, Some(user));
    }
}
