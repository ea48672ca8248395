//! Discord side of the bot.
//!
//! The serenity [`handler`] converts gateway events into platform-neutral requests and hands
//! them to the [`dispatch::Dispatcher`], which routes them to the handlers in [`command`].
//! Handlers talk back to the user only through a [`responder::Responder`], so everything
//! below the handler can be tested without a gateway connection.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Channel deletions, used to clear stale channel bindings
//! - `GUILD_MEMBERS` - Member lists for wishlist notifications (privileged intent)

pub mod command;
pub mod dispatch;
pub mod handler;
pub mod responder;
pub mod start;

#[cfg(test)]
pub mod testing;
