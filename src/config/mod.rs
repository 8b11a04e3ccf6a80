//! Application configuration, one submodule per concern, each loaded
//! from environment variables with development defaults.
//!
//! - [`cors`]: allowed origins for the SPA
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`jwt`]: session token secret and lifetime
//! - [`uploads`]: profile photo storage location and size ceiling

pub mod cors;
pub mod database;
pub mod jwt;
pub mod uploads;
