//! Daycare administration REST API: JWT-authenticated, role-gated CRUD
//! over students, classrooms, staff and parent-facing records, with
//! profile photo uploads served statically.

pub mod cli;
pub mod config;
pub mod db;
pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;
