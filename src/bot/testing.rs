//! In-memory doubles for exercising handlers without a gateway connection.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use serenity::async_trait;
use test_utils::builder::TestBuilder;

use crate::{
    bot::responder::Responder,
    cache::{catalog::CatalogCache, user::UserCache},
    error::{
        upstream::{UpstreamError, UpstreamFaultKind},
        AppError,
    },
    model::{
        cosmetic::EpicAccount,
        interaction::{CommandRequest, Confirmation, OptionValue, Suggestion},
    },
    service::fortnite::AccountLookup,
    state::AppState,
};

/// Records every response instead of sending it.
#[derive(Default)]
pub struct FakeResponder {
    replied: AtomicBool,
    initial: Mutex<usize>,
    replies: Mutex<Vec<String>>,
    follow_ups: Mutex<Vec<String>>,
    edits: Mutex<Vec<String>>,
    choices: Mutex<Option<Vec<Suggestion>>>,
    /// Button the user "clicks" on a confirmation prompt; `None` lets it expire.
    pub confirmation: Option<Confirmation>,
}

impl FakeResponder {
    pub fn confirming(confirmation: Confirmation) -> Self {
        Self {
            confirmation: Some(confirmation),
            ..Default::default()
        }
    }

    pub fn replies(&self) -> Vec<String> {
        self.replies.lock().unwrap().clone()
    }

    pub fn follow_ups(&self) -> Vec<String> {
        self.follow_ups.lock().unwrap().clone()
    }

    pub fn edits(&self) -> Vec<String> {
        self.edits.lock().unwrap().clone()
    }

    pub fn choices(&self) -> Option<Vec<Suggestion>> {
        self.choices.lock().unwrap().clone()
    }

    /// Number of initial responses sent, which must never exceed one.
    pub fn initial_responses(&self) -> usize {
        *self.initial.lock().unwrap()
    }

    /// Every message shown to the user, in order.
    pub fn all_messages(&self) -> Vec<String> {
        let mut messages = self.replies();
        messages.extend(self.follow_ups());
        messages.extend(self.edits());
        messages
    }

    fn claim_initial(&self) -> bool {
        let first = !self.replied.swap(true, Ordering::SeqCst);
        if first {
            *self.initial.lock().unwrap() += 1;
        }
        first
    }
}

#[async_trait]
impl Responder for FakeResponder {
    async fn reply(&self, content: &str) -> Result<(), AppError> {
        if !self.claim_initial() {
            return self.follow_up(content).await;
        }
        self.replies.lock().unwrap().push(content.to_string());
        Ok(())
    }

    async fn follow_up(&self, content: &str) -> Result<(), AppError> {
        self.follow_ups.lock().unwrap().push(content.to_string());
        Ok(())
    }

    async fn edit(&self, content: &str) -> Result<(), AppError> {
        self.edits.lock().unwrap().push(content.to_string());
        Ok(())
    }

    async fn autocomplete(&self, choices: Vec<Suggestion>) -> Result<(), AppError> {
        if self.claim_initial() {
            *self.choices.lock().unwrap() = Some(choices);
        }
        Ok(())
    }

    async fn confirm(&self, prompt: &str, _timeout: Duration) -> Result<Confirmation, AppError> {
        self.claim_initial();
        self.replies.lock().unwrap().push(prompt.to_string());
        Ok(self.confirmation.unwrap_or(Confirmation::Expired))
    }
}

/// Account lookup over a fixed set of display names.
pub struct FakeAccounts {
    accounts: Vec<EpicAccount>,
    unavailable: bool,
}

impl FakeAccounts {
    pub fn new(accounts: Vec<EpicAccount>) -> Self {
        Self {
            accounts,
            unavailable: false,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            accounts: Vec::new(),
            unavailable: true,
        }
    }
}

#[async_trait]
impl AccountLookup for FakeAccounts {
    async fn lookup_account(&self, name: &str) -> Result<Option<EpicAccount>, UpstreamError> {
        if self.unavailable {
            return Err(UpstreamError {
                kind: UpstreamFaultKind::Unavailable,
                status: Some(503),
                endpoint: "/v2/stats/br/v2".to_string(),
                message: "maintenance".to_string(),
            });
        }
        Ok(self
            .accounts
            .iter()
            .find(|account| account.display_name.eq_ignore_ascii_case(name))
            .cloned())
    }
}

/// State over a fresh in-memory database with one known Epic account, `Ninja`.
pub async fn test_state() -> AppState {
    test_state_with(FakeAccounts::new(vec![EpicAccount {
        id: "epic-ninja".to_string(),
        display_name: "Ninja".to_string(),
    }]))
    .await
}

pub async fn test_state_with(accounts: impl AccountLookup + 'static) -> AppState {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.unwrap();

    AppState::new(
        db.clone(),
        Arc::new(UserCache::new(db)),
        Arc::new(CatalogCache::new()),
        Arc::new(accounts),
    )
}

/// A command invoked by user 1 in channel 100 of guild 10, with Manage Server.
pub fn command_request(
    command: &str,
    subcommand: Option<&str>,
    options: Vec<(&str, OptionValue)>,
) -> CommandRequest {
    CommandRequest {
        command: command.to_string(),
        subcommand: subcommand.map(str::to_string),
        options: options
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect(),
        user_id: 1,
        guild_id: Some(10),
        channel_id: 100,
        can_manage_guild: true,
    }
}

pub fn text(value: &str) -> OptionValue {
    OptionValue::String(value.to_string())
}
