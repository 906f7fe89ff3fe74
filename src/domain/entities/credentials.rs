use serde::{Deserialize, Serialize};

/// Authentication record for one remote URL
///
/// `password` holds either a plain secret or a personal access token
/// (`ghp_...`). The URL is used verbatim as the identity key: trailing slashes
/// or scheme differences yield distinct records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub url: String,
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// All three fields are non-empty
    pub fn is_complete(&self) -> bool {
        !self.url.is_empty() && !self.username.is_empty() && !self.password.is_empty()
    }
}
