use std::sync::atomic::{AtomicBool, Ordering};

use git2::{Cred, CredentialType, ErrorClass, ErrorCode, RemoteCallbacks};

use crate::domain::value_objects::basic_auth::BasicAuth;

/// libgit2 re-asks for credentials after every rejection; stop after this many
const MAX_AUTH_ATTEMPTS: u32 = 3;

/// Callbacks shared by clone, fetch and push.
///
/// Plain-text credentials are offered when a password is present, otherwise
/// the platform default (e.g. NTLM) when the transport allows it. Transfers
/// abort as soon as `interrupt` is set.
pub fn remote_callbacks<'a>(
    auth: &'a BasicAuth,
    interrupt: &'a AtomicBool,
) -> RemoteCallbacks<'a> {
    let mut callbacks = RemoteCallbacks::new();
    let mut attempts = 0u32;

    callbacks.credentials(move |url, username_from_url, allowed_types| {
        attempts += 1;
        if attempts > MAX_AUTH_ATTEMPTS {
            return Err(git2::Error::new(
                ErrorCode::Auth,
                ErrorClass::Http,
                format!(
                    "authentication failed for {} after {} attempts",
                    url, MAX_AUTH_ATTEMPTS
                ),
            ));
        }

        if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) && !auth.password.is_empty()
        {
            let username = if auth.username.is_empty() {
                username_from_url.unwrap_or_default()
            } else {
                auth.username.as_str()
            };
            tracing::debug!(
                url,
                username,
                token = auth.is_token(),
                attempt = attempts,
                "offering plaintext credentials"
            );
            return Cred::userpass_plaintext(username, &auth.password);
        }

        if allowed_types.contains(CredentialType::DEFAULT) {
            return Cred::default();
        }

        Err(git2::Error::new(
            ErrorCode::Auth,
            ErrorClass::Http,
            format!(
                "authentication required for {} but no usable credentials were supplied",
                url
            ),
        ))
    });

    callbacks.transfer_progress(move |progress| {
        if interrupt.load(Ordering::SeqCst) {
            tracing::debug!(
                received = progress.received_objects(),
                total = progress.total_objects(),
                "transfer interrupted"
            );
            return false;
        }
        true
    });

    callbacks
}
