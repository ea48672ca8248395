//! Domain models and operation-specific types.
//!
//! Domain models are converted from entity models at the repository boundary and from
//! upstream API payloads at the client boundary. Services and bot handlers only ever see
//! these types.

pub mod cosmetic;
pub mod guild_settings;
pub mod interaction;
pub mod user;
