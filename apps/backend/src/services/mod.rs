//! Services layered between routes and the database.

pub mod sessions;
pub mod study;
