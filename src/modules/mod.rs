pub mod auth;
pub mod authorizations;
pub mod classrooms;
pub mod documents;
pub mod follow_ups;
pub mod menus;
pub mod newsletters;
pub mod notifications;
pub mod parents;
pub mod students;
pub mod teachers;
pub mod users;
