//! Persistent tier of the reply cache.
//!
//! One table per reply kind, each keyed by the cache key ID and holding the reply JSON with
//! the time it was fetched.

use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
};

use crate::server::model::{
    db::{GuildReplyModel, PlayerReplyModel, ProfileReplyModel},
    reply::{CacheKey, ReplyKind},
};

/// A persisted reply as read back from the database, still encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredReply {
    /// Reply JSON
    pub data: String,
    /// When the reply was fetched from the game API
    pub retrieved_at: NaiveDateTime,
}

impl From<PlayerReplyModel> for StoredReply {
    fn from(model: PlayerReplyModel) -> Self {
        Self {
            data: model.data,
            retrieved_at: model.retrieved_at,
        }
    }
}

impl From<ProfileReplyModel> for StoredReply {
    fn from(model: ProfileReplyModel) -> Self {
        Self {
            data: model.data,
            retrieved_at: model.retrieved_at,
        }
    }
}

impl From<GuildReplyModel> for StoredReply {
    fn from(model: GuildReplyModel) -> Self {
        Self {
            data: model.data,
            retrieved_at: model.retrieved_at,
        }
    }
}

/// Persistent tier of the reply cache.
///
/// One table per [`ReplyKind`], each keyed by the [`CacheKey`] ID. Writes are single
/// statements; concurrent writers for the same key settle on last-write-wins.
pub struct ReplyRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReplyRepository<'a> {
    /// Creates a new instance of [`ReplyRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the stored reply for a key.
    ///
    /// # Returns
    /// - `Ok(Some(StoredReply))` - A row exists, regardless of its age
    /// - `Ok(None)` - No row for this key
    /// - `Err(DbErr)` - The query failed
    pub async fn find(&self, key: &CacheKey) -> Result<Option<StoredReply>, DbErr> {
        let id = key.id().to_string();

        let stored = match key.kind() {
            ReplyKind::Player => entity::prelude::PlayerReply::find_by_id(id)
                .one(self.db)
                .await?
                .map(StoredReply::from),
            ReplyKind::Profile => entity::prelude::ProfileReply::find_by_id(id)
                .one(self.db)
                .await?
                .map(StoredReply::from),
            ReplyKind::Guild => entity::prelude::GuildReply::find_by_id(id)
                .one(self.db)
                .await?
                .map(StoredReply::from),
        };

        Ok(stored)
    }

    /// Whether a row exists for a key.
    pub async fn exists(&self, key: &CacheKey) -> Result<bool, DbErr> {
        Ok(self.find(key).await?.is_some())
    }

    /// Inserts a new row for a key.
    ///
    /// Fails with a unique constraint violation if a row already exists; use [`Self::update`]
    /// when a row is known to exist.
    pub async fn insert(
        &self,
        key: &CacheKey,
        data: String,
        retrieved_at: NaiveDateTime,
    ) -> Result<(), DbErr> {
        let id = key.id().to_string();
        let now = Utc::now().naive_utc();

        match key.kind() {
            ReplyKind::Player => {
                let reply = entity::player_reply::ActiveModel {
                    stable_id: ActiveValue::Set(id),
                    data: ActiveValue::Set(data),
                    created_at: ActiveValue::Set(now),
                    retrieved_at: ActiveValue::Set(retrieved_at),
                };

                entity::prelude::PlayerReply::insert(reply)
                    .exec_without_returning(self.db)
                    .await?;
            }
            ReplyKind::Profile => {
                let reply = entity::profile_reply::ActiveModel {
                    profile_id: ActiveValue::Set(id),
                    data: ActiveValue::Set(data),
                    created_at: ActiveValue::Set(now),
                    retrieved_at: ActiveValue::Set(retrieved_at),
                };

                entity::prelude::ProfileReply::insert(reply)
                    .exec_without_returning(self.db)
                    .await?;
            }
            ReplyKind::Guild => {
                let reply = entity::guild_reply::ActiveModel {
                    name_key: ActiveValue::Set(id),
                    data: ActiveValue::Set(data),
                    created_at: ActiveValue::Set(now),
                    retrieved_at: ActiveValue::Set(retrieved_at),
                };

                entity::prelude::GuildReply::insert(reply)
                    .exec_without_returning(self.db)
                    .await?;
            }
        }

        Ok(())
    }

    /// Replaces the data and retrieval time of an existing row.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of rows updated, `0` when no row exists for the key
    /// - `Err(DbErr)` - The statement failed
    pub async fn update(
        &self,
        key: &CacheKey,
        data: String,
        retrieved_at: NaiveDateTime,
    ) -> Result<u64, DbErr> {
        let id = key.id().to_string();

        let result = match key.kind() {
            ReplyKind::Player => {
                entity::prelude::PlayerReply::update_many()
                    .col_expr(entity::player_reply::Column::Data, Expr::value(data))
                    .col_expr(
                        entity::player_reply::Column::RetrievedAt,
                        Expr::value(retrieved_at),
                    )
                    .filter(entity::player_reply::Column::StableId.eq(id))
                    .exec(self.db)
                    .await?
            }
            ReplyKind::Profile => {
                entity::prelude::ProfileReply::update_many()
                    .col_expr(entity::profile_reply::Column::Data, Expr::value(data))
                    .col_expr(
                        entity::profile_reply::Column::RetrievedAt,
                        Expr::value(retrieved_at),
                    )
                    .filter(entity::profile_reply::Column::ProfileId.eq(id))
                    .exec(self.db)
                    .await?
            }
            ReplyKind::Guild => {
                entity::prelude::GuildReply::update_many()
                    .col_expr(entity::guild_reply::Column::Data, Expr::value(data))
                    .col_expr(
                        entity::guild_reply::Column::RetrievedAt,
                        Expr::value(retrieved_at),
                    )
                    .filter(entity::guild_reply::Column::NameKey.eq(id))
                    .exec(self.db)
                    .await?
            }
        };

        Ok(result.rows_affected)
    }
}
