//! Explicit session capability passed into the engine at construction.
//!
//! The source of the token and role string (the login handshake) is an
//! external collaborator; the engine never reads ambient storage.

use std::fmt;

use zeroize::Zeroizing;

/// Opaque bearer token for the remote directory.
///
/// Redacted from `Debug` output and zeroized on drop.
#[derive(Clone)]
pub struct SessionToken(Zeroizing<String>);

impl SessionToken {
    /// Wrap a raw token string.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(Zeroizing::new(raw.into()))
    }

    /// Borrow the raw token for the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(redacted)")
    }
}

/// Privilege the auth provider granted this session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRole {
    /// May open the add-record flow and submit new records.
    Admin,
    /// Read-only session.
    Member,
}

impl SessionRole {
    /// Map the provider's role string: exactly `"Admin"` grants admin,
    /// anything else is a read-only member.
    #[must_use]
    pub fn from_role_str(raw: &str) -> Self {
        if raw == "Admin" { Self::Admin } else { Self::Member }
    }

    /// Whether this session may create records.
    #[must_use]
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// Session capability handed to the controller and mutation gateway.
#[derive(Debug, Clone)]
pub struct AuthContext {
    token: SessionToken,
    role: SessionRole,
}

impl AuthContext {
    /// Build a context from the auth provider's outputs.
    #[must_use]
    pub fn new(token: SessionToken, role: SessionRole) -> Self {
        Self { token, role }
    }

    /// The bearer token for outbound requests.
    #[must_use]
    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    /// The granted privilege.
    #[must_use]
    pub fn role(&self) -> SessionRole {
        self.role
    }
}
