use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserWishlistItem::Table)
                    .if_not_exists()
                    .col(string(UserWishlistItem::UserId))
                    .col(string(UserWishlistItem::CosmeticId))
                    .primary_key(
                        Index::create()
                            .col(UserWishlistItem::UserId)
                            .col(UserWishlistItem::CosmeticId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_wishlist_item_user_id")
                            .from(UserWishlistItem::Table, UserWishlistItem::UserId)
                            .to(User::Table, User::DiscordId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserWishlistItem::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserWishlistItem {
    Table,
    UserId,
    CosmeticId,
}
