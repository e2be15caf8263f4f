//! Repository for name to stable ID mappings.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use crate::server::model::db::PlayerIdentityModel;

/// Persistent name to stable ID mappings.
///
/// Rows are append-only; a rename or a rebind adds a new row and the newest row wins.
pub struct IdentityRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> IdentityRepository<'a> {
    /// Creates a new instance of [`IdentityRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Newest mapping for a name, matched case-insensitively
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<PlayerIdentityModel>, DbErr> {
        entity::prelude::PlayerIdentity::find()
            .filter(entity::player_identity::Column::UsernameKey.eq(username.to_lowercase()))
            .order_by_desc(entity::player_identity::Column::Id)
            .one(self.db)
            .await
    }

    /// Newest mapping for a stable ID
    pub async fn find_by_stable_id(&self, id: Uuid) -> Result<Option<PlayerIdentityModel>, DbErr> {
        entity::prelude::PlayerIdentity::find()
            .filter(entity::player_identity::Column::StableId.eq(id.hyphenated().to_string()))
            .order_by_desc(entity::player_identity::Column::Id)
            .one(self.db)
            .await
    }

    /// Records a newly discovered mapping
    pub async fn create(&self, id: Uuid, username: &str) -> Result<PlayerIdentityModel, DbErr> {
        let identity = entity::player_identity::ActiveModel {
            stable_id: ActiveValue::Set(id.hyphenated().to_string()),
            username: ActiveValue::Set(username.to_string()),
            username_key: ActiveValue::Set(username.to_lowercase()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        identity.insert(self.db).await
    }
}
