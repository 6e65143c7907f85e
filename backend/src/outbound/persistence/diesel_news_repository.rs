//! PostgreSQL-backed `NewsRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{NewsRecord, NewsRepository, NewsRepositoryError};
use crate::domain::{News, NewsId};

use super::diesel_basic_error_mapping::{
    limit_to_i64, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewNewsRow, NewsRow};
use super::pool::{DbPool, PoolError};
use super::schema::news;

/// Diesel-backed implementation of the [`NewsRepository`] port.
#[derive(Clone)]
pub struct DieselNewsRepository {
    pool: DbPool,
}

impl DieselNewsRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> NewsRepositoryError {
    map_basic_pool_error(error, NewsRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> NewsRepositoryError {
    map_basic_diesel_error(
        error,
        NewsRepositoryError::query,
        NewsRepositoryError::connection,
    )
}

impl From<NewsRow> for News {
    fn from(row: NewsRow) -> Self {
        Self {
            id: NewsId::new(row.id),
            title: row.title,
            text: row.text,
            date: row.date,
        }
    }
}

fn new_row(record: &NewsRecord) -> NewNewsRow<'_> {
    NewNewsRow {
        title: &record.title,
        text: &record.text,
        date: record.date,
    }
}

#[async_trait]
impl NewsRepository for DieselNewsRepository {
    async fn insert(&self, record: &NewsRecord) -> Result<News, NewsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(news::table)
            .values(&new_row(record))
            .returning(NewsRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(News::from)
            .map_err(map_diesel_error)
    }

    async fn bulk_insert(&self, records: &[NewsRecord]) -> Result<usize, NewsRepositoryError> {
        if records.is_empty() {
            return Ok(0);
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<NewNewsRow<'_>> = records.iter().map(new_row).collect();
        diesel::insert_into(news::table)
            .values(&rows)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn latest(&self, limit: usize) -> Result<Vec<News>, NewsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = news::table
            .order((news::date.desc(), news::id.desc()))
            .limit(limit_to_i64(limit))
            .select(NewsRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(News::from).collect())
    }

    async fn find_by_id(&self, id: NewsId) -> Result<Option<News>, NewsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = news::table
            .find(id.get())
            .select(NewsRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(News::from))
    }
}
