//! Request middleware and extractors.
//!
//! - [`auth`]: the `AuthUser` extractor, covering bearer token verification
//!   and credential-store resolution of the caller
//! - [`role`]: the declarative capability table consulted by every handler

pub mod auth;
pub mod role;
