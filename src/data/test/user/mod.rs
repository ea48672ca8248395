use crate::{data::user::UserRepository, error::AppError};
use test_utils::{builder::TestBuilder, factory::user::UserFactory};

mod add_wishlist_item;
mod clear_wishlist;
mod get_all;
mod remove_wishlist_item;
mod set_epic_account;
