//! PostgreSQL-backed social-graph sink.
//!
//! This adapter implements the `SocialGraphSink` port. Every stage runs in
//! its own transaction and inserts rows in batches, so a rejected batch
//! rolls back that stage only.

use std::collections::HashMap;

use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use social_graph::{
    Block, LikeEdge, Message, Notification, Photo, Report, TagId, UserProfile, UserTag,
};
use tracing::debug;

use crate::domain::ports::{SocialGraphSink, SocialGraphSinkError};

use super::batched_insert_macros::impl_batched_insert_methods;
use super::models::{
    NewBlockRow, NewChatRow, NewLikeRow, NewNotificationRow, NewPhotoRow, NewProfileRow,
    NewReportRow, NewTagRow, NewUserTagRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{
    blocks, chats, likes, notifications, photos, profiles, reports, tags, users_preferences,
};

/// Rows per `INSERT` statement; keeps the widest table under PostgreSQL's
/// bind-parameter limit.
const INSERT_BATCH_ROWS: usize = 1_000;

/// Clears every seeded table. Profiles and tags cascade to the rest.
const RESET_SQL: &str = "TRUNCATE profiles, tags RESTART IDENTITY CASCADE";

/// Diesel-backed implementation of the social-graph sink.
#[derive(Clone)]
pub struct DieselSocialGraphSink {
    pool: DbPool,
}

impl DieselSocialGraphSink {
    /// Create a new sink with the given connection pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use backend::outbound::persistence::{DbPool, DieselSocialGraphSink, PoolConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost")).await?;
    /// let sink = DieselSocialGraphSink::new(pool);
    /// # let _ = sink;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain persistence errors.
fn map_pool_error(error: PoolError) -> SocialGraphSinkError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            SocialGraphSinkError::connection(message)
        }
    }
}

/// Map Diesel errors to domain persistence errors.
fn map_diesel_error(error: diesel::result::Error) -> SocialGraphSinkError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    let error_message = error.to_string();
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                table = info.table_name(),
                error = %error_message,
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            error = %error_message,
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            SocialGraphSinkError::connection(info.message().to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            SocialGraphSinkError::unique_violation(info.message().to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            SocialGraphSinkError::foreign_key_violation(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => {
            SocialGraphSinkError::query(info.message().to_owned())
        }
        _ => SocialGraphSinkError::query(error_message),
    }
}

impl_batched_insert_methods! {
    impl SocialGraphSink for DieselSocialGraphSink {
        error: SocialGraphSinkError,
        map_pool_error: map_pool_error,
        map_diesel_error: map_diesel_error,
        pool: pool,
        batch: INSERT_BATCH_ROWS,
        methods: [
            (insert_users, UserProfile, NewProfileRow<'_>, profiles),
            (insert_user_tags, UserTag, NewUserTagRow, users_preferences),
            (insert_photos, Photo, NewPhotoRow<'_>, photos),
            (insert_likes, LikeEdge, NewLikeRow, likes),
            (insert_messages, Message, NewChatRow<'_>, chats),
            (insert_notifications, Notification, NewNotificationRow, notifications),
            (insert_blocks, Block, NewBlockRow, blocks),
            (insert_reports, Report, NewReportRow, reports),
        ],
        keep: {
            async fn reset(&self) -> Result<(), SocialGraphSinkError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                conn.transaction(|conn| {
                    async move {
                        diesel::sql_query(RESET_SQL).execute(conn).await?;
                        Ok::<(), diesel::result::Error>(())
                    }
                    .scope_boxed()
                })
                .await
                .map_err(map_diesel_error)
            }

            async fn insert_tags(
                &self,
                slugs: &[String],
            ) -> Result<Vec<TagId>, SocialGraphSinkError> {
                if slugs.is_empty() {
                    return Ok(Vec::new());
                }
                let rows: Vec<NewTagRow<'_>> = slugs
                    .iter()
                    .map(|slug| NewTagRow {
                        slug: slug.as_str(),
                    })
                    .collect();
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let inserted: Vec<(i32, String)> = conn
                    .transaction(|conn| {
                        async move {
                            diesel::insert_into(tags::table)
                                .values(&rows)
                                .returning((tags::id, tags::slug))
                                .get_results(conn)
                                .await
                        }
                        .scope_boxed()
                    })
                    .await
                    .map_err(map_diesel_error)?;

                let ids: HashMap<String, i32> =
                    inserted.into_iter().map(|(id, slug)| (slug, id)).collect();
                slugs
                    .iter()
                    .map(|slug| {
                        ids.get(slug).copied().map(TagId::new).ok_or_else(|| {
                            SocialGraphSinkError::query(format!(
                                "no identifier returned for tag {slug}"
                            ))
                        })
                    })
                    .collect()
            }
        }
    }
}
