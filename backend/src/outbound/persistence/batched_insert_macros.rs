//! Shared macro for stage-at-a-time batched inserts.

/// Generate batched insert trait methods for sink adapters.
///
/// The generated methods:
/// - short-circuit on empty input
/// - acquire a pooled connection
/// - convert domain records to Diesel insert rows via `From`
/// - insert the rows in chunks of `$batch` inside a single transaction
macro_rules! impl_batched_insert_methods {
    (
        impl $trait:ident for $sink:ty {
            error: $error_ty:ty,
            map_pool_error: $map_pool_error:path,
            map_diesel_error: $map_diesel_error:path,
            pool: $pool_field:ident,
            batch: $batch:expr,
            methods: [
                $((
                    $method_name:ident,
                    $record_type:ty,
                    $row_type:ty,
                    $table:ident
                )),+ $(,)?
            ],
            keep: { $($keep:tt)* }
        }
    ) => {
        #[async_trait::async_trait]
        impl $trait for $sink {
            $(
                async fn $method_name(
                    &self,
                    records: &[$record_type],
                ) -> Result<(), $error_ty> {
                    if records.is_empty() {
                        return Ok(());
                    }
                    let rows: Vec<$row_type> = records.iter().map(<$row_type>::from).collect();
                    let mut conn = self.$pool_field.get().await.map_err($map_pool_error)?;
                    conn.transaction(|conn| {
                        async move {
                            for chunk in rows.chunks($batch) {
                                diesel::insert_into($table::table)
                                    .values(chunk)
                                    .execute(conn)
                                    .await?;
                            }
                            Ok::<(), diesel::result::Error>(())
                        }
                        .scope_boxed()
                    })
                    .await
                    .map_err($map_diesel_error)
                }
            )+

            $($keep)*
        }
    };
}

pub(crate) use impl_batched_insert_methods;
