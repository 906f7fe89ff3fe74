/// Prefix identifying a GitHub personal access token
pub const TOKEN_PREFIX: &str = "ghp_";

/// Username substituted when a bare token is supplied
pub const TOKEN_USERNAME: &str = "oauth2";

/// Username/password pair handed to the transport layer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

impl BasicAuth {
    /// Decide the effective credentials from raw caller input.
    ///
    /// A non-empty username always wins. Otherwise a password carrying the
    /// token prefix gets the `oauth2` placeholder username, since the server
    /// ignores the name but basic auth still needs one. The password is never
    /// altered.
    pub fn select(username: &str, password: &str) -> Self {
        let username = if !username.is_empty() {
            username.to_string()
        } else if password.starts_with(TOKEN_PREFIX) {
            TOKEN_USERNAME.to_string()
        } else {
            String::new()
        };

        Self {
            username,
            password: password.to_string(),
        }
    }

    pub fn is_token(&self) -> bool {
        self.password.starts_with(TOKEN_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_without_username_uses_placeholder() {
        let auth = BasicAuth::select("", "ghp_abcdef123456");
        assert_eq!(auth.username, "oauth2");
        assert_eq!(auth.password, "ghp_abcdef123456");
        assert!(auth.is_token());
    }

    #[test]
    fn test_bare_prefix_is_a_token() {
        assert_eq!(BasicAuth::select("", "ghp_").username, "oauth2");
    }

    #[test]
    fn test_explicit_username_wins() {
        let auth = BasicAuth::select("bob", "ghp_x");
        assert_eq!(auth.username, "bob");
        assert_eq!(auth.password, "ghp_x");
    }

    #[test]
    fn test_near_miss_prefixes_are_not_tokens() {
        for password in ["gh_x", "ghp", "gh", "", "GHP_x", "xghp_x", "secret"] {
            let auth = BasicAuth::select("", password);
            assert_eq!(auth.username, "", "password {:?}", password);
            assert_eq!(auth.password, password);
        }
    }
}
