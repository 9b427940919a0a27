//! Committer identity resolution
//!
//! Pure function, no I/O. Derives the name and email used for local git
//! configuration from a platform user profile, synthesizing the noreply
//! address when the profile withholds the email.

use crate::types::{CommitterIdentity, UserProfile};

/// Resolve a committer identity from a user profile.
///
/// - name: the profile's display name when present and non-empty, else the
///   login.
/// - email: the profile's public email when present and non-empty, else
///   `{login}@users.noreply.{host}`.
///
/// The resulting email is never empty.
pub fn resolve(profile: &UserProfile, login: &str, host: &str) -> CommitterIdentity {
    let name = profile
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .unwrap_or(login)
        .to_string();

    let email = profile
        .email
        .as_deref()
        .filter(|e| !e.is_empty())
        .map_or_else(|| format!("{login}@users.noreply.{host}"), str::to_string);

    CommitterIdentity { name, email }
}
