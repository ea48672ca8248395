use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub discord_id: String,
    pub epic_account_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_wishlist_item::Entity")]
    UserWishlistItem,
}

impl Related<super::user_wishlist_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserWishlistItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
