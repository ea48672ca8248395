//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with a `Factory` struct for customization and a
//! `create_*` convenience function for quick default creation.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let user = factory::user::UserFactory::new(&db)
//!     .epic_account_id("abc123")
//!     .wishlist(["CID_001", "CID_002"])
//!     .build()
//!     .await?;
//!
//! let settings = factory::guild_settings::create_guild_settings(&db).await?;
//! ```

pub mod guild_settings;
pub mod helpers;
pub mod user;
