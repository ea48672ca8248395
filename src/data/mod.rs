//! Database repository layer.
//!
//! Repositories use SeaORM entity models internally and return domain models so the
//! service layer never handles rows directly.

pub mod guild_settings;
pub mod user;

#[cfg(test)]
mod test;
