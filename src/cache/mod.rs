//! Process-scoped caches.
//!
//! Both caches are created once in `main` and shared through [`crate::state::AppState`]
//! rather than living in globals, so tests can build their own instances.

pub mod catalog;
pub mod user;
