//! HTTP Basic credentials (RFC 7617)

use std::fmt;

use axum::http::{header, HeaderMap};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Realm advertised in `WWW-Authenticate` challenges
pub const REALM: &str = "coursedir";

/// Email/password pair sent with a request
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Parse `Authorization: Basic <base64(email:password)>`.
    ///
    /// Returns `None` for a missing header, another scheme, or a payload that
    /// isn't valid base64/UTF-8 or has no `:`. The password may itself
    /// contain colons.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
        let (scheme, encoded) = value.trim().split_once(' ')?;

        if !scheme.eq_ignore_ascii_case("basic") {
            return None;
        }

        let decoded = STANDARD.decode(encoded.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (email, password) = decoded.split_once(':')?;

        Some(Self {
            email: email.to_owned(),
            password: password.to_owned(),
        })
    }

    /// Encode as an `Authorization` header value.
    pub fn to_header_value(&self) -> String {
        let raw = format!("{}:{}", self.email, self.password);
        format!("Basic {}", STANDARD.encode(raw))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Value for the `WWW-Authenticate` response header.
pub fn challenge() -> String {
    format!("Basic realm=\"{}\"", REALM)
}
