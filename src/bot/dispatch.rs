//! Routing of inbound interactions to exactly one handler.
//!
//! Each interaction moves through `Received → Routed → Executing → Completed | Failed`, or
//! `Received → Unroutable` when no handler is registered for it. Handler errors never reach
//! the user verbatim: they are logged with the interaction's context and answered with a
//! generic message.

use std::{collections::HashMap, sync::Arc, time::Duration};

use serenity::async_trait;

use crate::{
    bot::responder::Responder,
    error::AppError,
    model::interaction::{AutocompleteRequest, CommandRequest, InteractionKind, Suggestion},
    state::AppState,
    util::discord::is_expired_interaction,
};

/// Discord drops autocomplete responses after three seconds.
pub const AUTOCOMPLETE_DEADLINE: Duration = Duration::from_millis(2500);

pub const GENERIC_ERROR: &str = "Something went wrong while running this command.";
pub const UPSTREAM_UNAVAILABLE: &str =
    "Fortnite data is temporarily unavailable. Please try again later.";
pub const NOT_FOUND: &str = "That command was not found.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Received,
    Routed,
    Executing,
    Completed,
    Failed,
    Unroutable,
}

impl InteractionState {
    pub fn can_advance_to(self, next: Self) -> bool {
        use InteractionState::*;

        matches!(
            (self, next),
            (Received, Routed)
                | (Received, Unroutable)
                | (Routed, Executing)
                | (Executing, Completed)
                | (Executing, Failed)
        )
    }
}

struct Lifecycle {
    state: InteractionState,
}

impl Lifecycle {
    fn new() -> Self {
        Self {
            state: InteractionState::Received,
        }
    }

    fn advance(&mut self, next: InteractionState) {
        if self.state.can_advance_to(next) {
            self.state = next;
        } else {
            tracing::error!(
                "Rejected interaction transition {:?} -> {:?}",
                self.state,
                next
            );
        }
    }
}

#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn execute(
        &self,
        state: &AppState,
        request: &CommandRequest,
        responder: &dyn Responder,
    ) -> Result<(), AppError>;
}

#[async_trait]
pub trait AutocompleteHandler: Send + Sync {
    async fn suggest(
        &self,
        state: &AppState,
        request: &AutocompleteRequest,
    ) -> Result<Vec<Suggestion>, AppError>;
}

#[derive(Clone)]
enum Route {
    Command(Arc<dyn CommandHandler>),
    Autocomplete(Arc<dyn AutocompleteHandler>),
}

/// Handlers keyed by interaction kind and name.
///
/// Commands are keyed by command name, autocomplete handlers by the name of the focused
/// option, so one handler can serve the same field across several commands.
#[derive(Default, Clone)]
pub struct Registry {
    routes: HashMap<(InteractionKind, String), Route>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn command(mut self, name: &str, handler: impl CommandHandler + 'static) -> Self {
        self.routes.insert(
            (InteractionKind::Command, name.to_string()),
            Route::Command(Arc::new(handler)),
        );
        self
    }

    pub fn autocomplete(mut self, field: &str, handler: impl AutocompleteHandler + 'static) -> Self {
        self.routes.insert(
            (InteractionKind::Autocomplete, field.to_string()),
            Route::Autocomplete(Arc::new(handler)),
        );
        self
    }

    fn route(&self, kind: InteractionKind, name: &str) -> Option<&Route> {
        self.routes.get(&(kind, name.to_string()))
    }
}

pub struct Dispatcher {
    registry: Registry,
    state: AppState,
}

impl Dispatcher {
    pub fn new(registry: Registry, state: AppState) -> Self {
        Self { registry, state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Runs the handler registered for a slash command.
    ///
    /// # Returns
    /// - `InteractionState` - Terminal state of the interaction
    pub async fn dispatch_command(
        &self,
        request: &CommandRequest,
        responder: &dyn Responder,
    ) -> InteractionState {
        let mut lifecycle = Lifecycle::new();

        let Some(Route::Command(handler)) =
            self.registry.route(InteractionKind::Command, &request.command)
        else {
            lifecycle.advance(InteractionState::Unroutable);
            tracing::warn!("No handler registered for /{}", request.display_name());
            send_reply(responder, NOT_FOUND).await;
            return lifecycle.state;
        };

        lifecycle.advance(InteractionState::Routed);
        lifecycle.advance(InteractionState::Executing);

        match handler.execute(&self.state, request, responder).await {
            Ok(()) => lifecycle.advance(InteractionState::Completed),
            Err(e) => {
                tracing::error!(
                    guild_id = ?request.guild_id,
                    channel_id = request.channel_id,
                    user_id = request.user_id,
                    command = %request.display_name(),
                    error = %e,
                    "Command failed"
                );
                send_reply(responder, user_message(&e)).await;
                lifecycle.advance(InteractionState::Failed);
            }
        }

        lifecycle.state
    }

    /// Runs the autocomplete handler registered for the focused option.
    ///
    /// Unroutable fields and handler errors answer with an empty choice list. A handler
    /// that misses [`AUTOCOMPLETE_DEADLINE`] gets no response at all, since Discord has
    /// already discarded the interaction.
    pub async fn dispatch_autocomplete(
        &self,
        request: &AutocompleteRequest,
        responder: &dyn Responder,
    ) -> InteractionState {
        let mut lifecycle = Lifecycle::new();

        let Some(Route::Autocomplete(handler)) =
            self.registry.route(InteractionKind::Autocomplete, &request.field)
        else {
            lifecycle.advance(InteractionState::Unroutable);
            tracing::warn!(
                "No autocomplete handler for field '{}' of /{}",
                request.field,
                request.command
            );
            send_choices(responder, Vec::new()).await;
            return lifecycle.state;
        };

        lifecycle.advance(InteractionState::Routed);
        lifecycle.advance(InteractionState::Executing);

        match tokio::time::timeout(AUTOCOMPLETE_DEADLINE, handler.suggest(&self.state, request))
            .await
        {
            Ok(Ok(choices)) => {
                send_choices(responder, choices).await;
                lifecycle.advance(InteractionState::Completed);
            }
            Ok(Err(e)) => {
                tracing::error!(
                    guild_id = ?request.guild_id,
                    user_id = request.user_id,
                    command = %request.command,
                    field = %request.field,
                    error = %e,
                    "Autocomplete failed"
                );
                send_choices(responder, Vec::new()).await;
                lifecycle.advance(InteractionState::Failed);
            }
            Err(_) => {
                tracing::debug!(
                    "Autocomplete for field '{}' of /{} missed its deadline",
                    request.field,
                    request.command
                );
                lifecycle.advance(InteractionState::Failed);
            }
        }

        lifecycle.state
    }
}

/// Message shown to the user for a failed command.
pub fn user_message(err: &AppError) -> &'static str {
    match err {
        AppError::Upstream(upstream) if upstream.is_transient() => UPSTREAM_UNAVAILABLE,
        _ => GENERIC_ERROR,
    }
}

async fn send_reply(responder: &dyn Responder, content: &str) {
    if let Err(e) = responder.reply(content).await {
        log_response_error(e);
    }
}

async fn send_choices(responder: &dyn Responder, choices: Vec<Suggestion>) {
    if let Err(e) = responder.autocomplete(choices).await {
        log_response_error(e);
    }
}

fn log_response_error(err: AppError) {
    match &err {
        AppError::DiscordErr(discord) if is_expired_interaction(discord) => {
            tracing::debug!("Interaction expired before the response was sent");
        }
        _ => tracing::error!("Failed to respond to interaction: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bot::testing::{test_state, FakeResponder},
        error::upstream::{UpstreamError, UpstreamFaultKind},
    };

    struct Echo;

    #[async_trait]
    impl CommandHandler for Echo {
        async fn execute(
            &self,
            _state: &AppState,
            request: &CommandRequest,
            responder: &dyn Responder,
        ) -> Result<(), AppError> {
            responder.reply(&request.command).await
        }
    }

    struct RepliesThenFails;

    #[async_trait]
    impl CommandHandler for RepliesThenFails {
        async fn execute(
            &self,
            _state: &AppState,
            _request: &CommandRequest,
            responder: &dyn Responder,
        ) -> Result<(), AppError> {
            responder.reply("working on it").await?;
            Err(AppError::NotFound("secret detail".to_string()))
        }
    }

    struct Unavailable;

    #[async_trait]
    impl CommandHandler for Unavailable {
        async fn execute(
            &self,
            _state: &AppState,
            _request: &CommandRequest,
            _responder: &dyn Responder,
        ) -> Result<(), AppError> {
            Err(AppError::Upstream(UpstreamError {
                kind: UpstreamFaultKind::RateLimited,
                status: Some(429),
                endpoint: "/v2/shop".to_string(),
                message: String::new(),
            }))
        }
    }

    struct Slow;

    #[async_trait]
    impl AutocompleteHandler for Slow {
        async fn suggest(
            &self,
            _state: &AppState,
            _request: &AutocompleteRequest,
        ) -> Result<Vec<Suggestion>, AppError> {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok(Vec::new())
        }
    }

    fn command(name: &str) -> CommandRequest {
        CommandRequest {
            command: name.to_string(),
            ..Default::default()
        }
    }

    fn autocomplete(field: &str) -> AutocompleteRequest {
        AutocompleteRequest {
            command: "wishlist".to_string(),
            field: field.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn transitions_only_move_forward() {
        use InteractionState::*;

        assert!(Received.can_advance_to(Routed));
        assert!(Executing.can_advance_to(Failed));
        assert!(!Completed.can_advance_to(Executing));
        assert!(!Failed.can_advance_to(Completed));
        assert!(!Routed.can_advance_to(Completed));
        assert!(!Unroutable.can_advance_to(Routed));
    }

    #[tokio::test]
    async fn routes_command_to_registered_handler() {
        let dispatcher = Dispatcher::new(Registry::new().command("ping", Echo), test_state().await);
        let responder = FakeResponder::default();

        let state = dispatcher.dispatch_command(&command("ping"), &responder).await;

        assert_eq!(state, InteractionState::Completed);
        assert_eq!(responder.replies(), ["ping"]);
    }

    #[tokio::test]
    async fn unknown_command_gets_not_found() {
        let dispatcher = Dispatcher::new(Registry::new(), test_state().await);
        let responder = FakeResponder::default();

        let state = dispatcher.dispatch_command(&command("nope"), &responder).await;

        assert_eq!(state, InteractionState::Unroutable);
        assert_eq!(responder.replies(), [NOT_FOUND]);
    }

    /// Expected: the error is reported as a follow-up with a generic message, and the
    /// internal detail is not leaked
    #[tokio::test]
    async fn failure_after_reply_uses_follow_up() {
        let dispatcher = Dispatcher::new(
            Registry::new().command("clear", RepliesThenFails),
            test_state().await,
        );
        let responder = FakeResponder::default();

        let state = dispatcher.dispatch_command(&command("clear"), &responder).await;

        assert_eq!(state, InteractionState::Failed);
        assert_eq!(responder.replies(), ["working on it"]);
        assert_eq!(responder.follow_ups(), [GENERIC_ERROR]);
        assert_eq!(responder.initial_responses(), 1);
    }

    #[tokio::test]
    async fn transient_upstream_fault_asks_to_retry() {
        let dispatcher = Dispatcher::new(
            Registry::new().command("shop", Unavailable),
            test_state().await,
        );
        let responder = FakeResponder::default();

        dispatcher.dispatch_command(&command("shop"), &responder).await;

        assert_eq!(responder.replies(), [UPSTREAM_UNAVAILABLE]);
    }

    /// Expected: an empty choice list, sent once, and no reply afterwards
    #[tokio::test]
    async fn unknown_autocomplete_field_gets_empty_choices() {
        let dispatcher = Dispatcher::new(Registry::new(), test_state().await);
        let responder = FakeResponder::default();

        let state = dispatcher
            .dispatch_autocomplete(&autocomplete("unknown"), &responder)
            .await;

        assert_eq!(state, InteractionState::Unroutable);
        assert_eq!(responder.choices(), Some(Vec::new()));
        assert_eq!(responder.initial_responses(), 1);
        assert!(responder.follow_ups().is_empty());
    }

    #[tokio::test]
    async fn slow_autocomplete_is_abandoned() {
        let dispatcher = Dispatcher::new(
            Registry::new().autocomplete("cosmetic", Slow),
            test_state().await,
        );
        let responder = FakeResponder::default();

        let state = dispatcher
            .dispatch_autocomplete(&autocomplete("cosmetic"), &responder)
            .await;

        assert_eq!(state, InteractionState::Failed);
        assert_eq!(responder.choices(), None);
    }
}
