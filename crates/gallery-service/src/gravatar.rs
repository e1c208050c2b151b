//! Gravatar avatar URLs.

use gallery_core::Email;
use sha2::{Digest, Sha256};

const GRAVATAR_BASE: &str = "https://gravatar.com/avatar";

/// Builds the avatar URL for `email`: 200px, identicon fallback, G rating.
///
/// The hash is taken over the trimmed, lower-cased address, so differently
/// typed forms of one address share an avatar.
#[must_use]
pub fn gravatar_url(email: &str) -> String {
    let hash = hex::encode(Sha256::digest(Email::normalize(email).as_bytes()));
    format!("{GRAVATAR_BASE}/{hash}?s=200&d=identicon&r=g")
}
