use crate::{
    data::guild_settings::GuildSettingsRepository, error::AppError,
    model::guild_settings::ChannelBinding,
};
use test_utils::{builder::TestBuilder, factory::guild_settings::GuildSettingsFactory};

mod get_all_bound;
mod set_channel;
mod unbind_channel;
mod unbind_deleted_channel;
