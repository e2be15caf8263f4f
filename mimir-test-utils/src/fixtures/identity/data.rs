use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{error::TestError, fixtures::identity::IdentityFixtures};

impl<'a> IdentityFixtures<'a> {
    /// Insert a name to stable ID mapping.
    ///
    /// # Returns
    /// - `Ok(entity::player_identity::Model)` - The inserted row
    /// - `Err(TestError::DbErr)` - Insert failed
    pub async fn insert_identity(
        &self,
        id: Uuid,
        name: &str,
    ) -> Result<entity::player_identity::Model, TestError> {
        Ok(entity::player_identity::ActiveModel {
            stable_id: ActiveValue::Set(id.hyphenated().to_string()),
            username: ActiveValue::Set(name.to_string()),
            username_key: ActiveValue::Set(name.to_lowercase()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&self.setup.db)
        .await?)
    }

    /// All mapping rows recorded for a stable ID, oldest first.
    pub async fn find_identities(
        &self,
        id: Uuid,
    ) -> Result<Vec<entity::player_identity::Model>, TestError> {
        Ok(entity::prelude::PlayerIdentity::find()
            .filter(entity::player_identity::Column::StableId.eq(id.hyphenated().to_string()))
            .order_by_asc(entity::player_identity::Column::Id)
            .all(&self.setup.db)
            .await?)
    }
}
