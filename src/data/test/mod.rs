mod guild_settings;
mod user;
