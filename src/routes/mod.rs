//! HTTP route modules

pub mod debug;
pub mod documents;
pub mod health;
pub mod search;
