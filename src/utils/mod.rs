//! Shared utilities:
//!
//! - [`errors`]: Application error type and HTTP mapping
//! - [`jwt`]: Session token creation and verification
//! - [`password`]: Password hashing and verification
//! - [`storage`]: Local profile-photo storage

pub mod errors;
pub mod jwt;
pub mod password;
pub mod storage;
