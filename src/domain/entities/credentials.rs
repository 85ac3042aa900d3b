//! Username/password credentials.

use std::fmt;

use base64::{Engine as _, engine::general_purpose};
use zeroize::Zeroizing;

/// Resource owner credentials. The password is scrubbed from memory on drop.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Creates credentials from a username and password.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Creates credentials only when both parts are present and non-empty.
    #[must_use]
    pub fn from_parts(username: Option<&str>, password: Option<&str>) -> Option<Self> {
        match (username, password) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => {
                Some(Self::new(user, pass))
            }
            _ => None,
        }
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns `base64(username:password)` for HTTP basic authentication.
    #[must_use]
    pub fn basic_encoded(&self) -> Zeroizing<String> {
        let plain = Zeroizing::new(format!("{}:{}", self.username, self.password.as_str()));
        Zeroizing::new(general_purpose::STANDARD.encode(plain.as_bytes()))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_requires_both() {
        assert!(Credentials::from_parts(Some("alice"), Some("secret")).is_some());
        assert!(Credentials::from_parts(Some("alice"), None).is_none());
        assert!(Credentials::from_parts(None, Some("secret")).is_none());
        assert!(Credentials::from_parts(Some(""), Some("secret")).is_none());
        assert!(Credentials::from_parts(Some("alice"), Some("")).is_none());
    }

    #[test]
    fn test_basic_encoding_round_trips() {
        let credentials = Credentials::new("alice", "p@ss:word");
        let encoded = credentials.basic_encoded();

        let decoded = general_purpose::STANDARD.decode(encoded.as_bytes()).unwrap();
        assert_eq!(decoded, b"alice:p@ss:word");
    }

    #[test]
    fn test_debug_redacts_password() {
        let credentials = Credentials::new("alice", "hunter2");
        let debug_output = format!("{credentials:?}");

        assert!(debug_output.contains("alice"));
        assert!(!debug_output.contains("hunter2"));
    }
}
