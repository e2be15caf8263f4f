//! Persisted reply rows.
//!
//! Rows are written directly through the entity crate, bypassing the repositories under
//! test. `retrieved_at` is explicit so tests can place a row inside or outside the
//! freshness window.

use chrono::{NaiveDateTime, Utc};
use sea_orm::{ActiveValue, EntityTrait};
use serde_json::Value;
use uuid::Uuid;

use crate::{error::TestError, fixtures::game::GameFixtures};

impl<'a> GameFixtures<'a> {
    /// Insert a player reply row keyed by the hyphenated stable ID.
    ///
    /// # Returns
    /// - `Ok(())` - Row inserted
    /// - `Err(TestError::DbErr)` - Insert failed, e.g. the table was not created
    pub async fn insert_player_reply(
        &self,
        id: Uuid,
        body: &Value,
        retrieved_at: NaiveDateTime,
    ) -> Result<(), TestError> {
        self.insert_player_reply_raw(id, body.to_string(), retrieved_at)
            .await
    }

    /// Insert a player reply row with arbitrary data, e.g. a corrupted document.
    pub async fn insert_player_reply_raw(
        &self,
        id: Uuid,
        data: String,
        retrieved_at: NaiveDateTime,
    ) -> Result<(), TestError> {
        entity::prelude::PlayerReply::insert(entity::player_reply::ActiveModel {
            stable_id: ActiveValue::Set(id.hyphenated().to_string()),
            data: ActiveValue::Set(data),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            retrieved_at: ActiveValue::Set(retrieved_at),
        })
        .exec_without_returning(&self.setup.db)
        .await?;

        Ok(())
    }

    pub async fn insert_profile_reply(
        &self,
        profile_id: &str,
        body: &Value,
        retrieved_at: NaiveDateTime,
    ) -> Result<(), TestError> {
        entity::prelude::ProfileReply::insert(entity::profile_reply::ActiveModel {
            profile_id: ActiveValue::Set(profile_id.to_string()),
            data: ActiveValue::Set(body.to_string()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            retrieved_at: ActiveValue::Set(retrieved_at),
        })
        .exec_without_returning(&self.setup.db)
        .await?;

        Ok(())
    }

    /// Insert a guild reply row.
    ///
    /// # Arguments
    /// - `name_key` - Trimmed, lower-cased guild name
    pub async fn insert_guild_reply(
        &self,
        name_key: &str,
        body: &Value,
        retrieved_at: NaiveDateTime,
    ) -> Result<(), TestError> {
        entity::prelude::GuildReply::insert(entity::guild_reply::ActiveModel {
            name_key: ActiveValue::Set(name_key.to_string()),
            data: ActiveValue::Set(body.to_string()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            retrieved_at: ActiveValue::Set(retrieved_at),
        })
        .exec_without_returning(&self.setup.db)
        .await?;

        Ok(())
    }

    /// Read back the raw data and retrieval time of a player reply row.
    pub async fn find_player_reply(
        &self,
        id: Uuid,
    ) -> Result<Option<entity::player_reply::Model>, TestError> {
        Ok(
            entity::prelude::PlayerReply::find_by_id(id.hyphenated().to_string())
                .one(&self.setup.db)
                .await?,
        )
    }

    pub async fn find_profile_reply(
        &self,
        profile_id: &str,
    ) -> Result<Option<entity::profile_reply::Model>, TestError> {
        Ok(entity::prelude::ProfileReply::find_by_id(profile_id.to_string())
            .one(&self.setup.db)
            .await?)
    }

    pub async fn find_guild_reply(
        &self,
        name_key: &str,
    ) -> Result<Option<entity::guild_reply::Model>, TestError> {
        Ok(entity::prelude::GuildReply::find_by_id(name_key.to_string())
            .one(&self.setup.db)
            .await?)
    }
}
