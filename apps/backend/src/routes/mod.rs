//! HTTP route handlers

pub mod pages;
pub mod session;
pub mod study;
pub mod words;
