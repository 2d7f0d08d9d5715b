//! Authentication primitives - Basic credentials and password hashing
//!
//! HTTP-agnostic apart from header parsing; the request-facing pieces live in
//! `http::extractors`.

pub mod basic;
pub mod password;

pub use basic::Credentials;
pub use password::{HashingConfig, PasswordError, PasswordHasher};
