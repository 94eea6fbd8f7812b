use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{MapJobRepository, RepositoryError};
use crate::domain::{JobId, JobStatus, MapJob};

pub struct PgMapJobRepository {
    pool: PgPool,
}

impl PgMapJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct MapJobRow {
    id: Uuid,
    name: String,
    bbox: String,
    status: String,
    error: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MapJobRow> for MapJob {
    type Error = RepositoryError;

    fn try_from(r: MapJobRow) -> Result<Self, Self::Error> {
        let status = r
            .status
            .parse::<JobStatus>()
            .map_err(RepositoryError::QueryFailed)?;

        Ok(MapJob {
            id: JobId::from_uuid(r.id),
            name: r.name,
            bbox: r.bbox,
            status,
            error: r.error,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

#[async_trait]
impl MapJobRepository for PgMapJobRepository {
    #[instrument(skip(self, job), fields(job_id = %job.id))]
    async fn create(&self, job: &MapJob) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO maps (id, name, bbox, status, error, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(job.id.as_uuid())
        .bind(&job.name)
        .bind(&job.bbox)
        .bind(job.status.as_str())
        .bind(&job.error)
        .bind(job.created_at)
        .bind(job.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    #[instrument(skip(self), fields(job_id = %id))]
    async fn get_by_id(&self, id: JobId) -> Result<Option<MapJob>, RepositoryError> {
        let row = sqlx::query_as::<_, MapJobRow>(
            r#"
            SELECT id, name, bbox, status, error, created_at, updated_at
            FROM maps
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        row.map(MapJob::try_from).transpose()
    }

    #[instrument(skip(self, error), fields(job_id = %id, status = %status))]
    async fn update_status(
        &self,
        id: JobId,
        status: JobStatus,
        error: Option<&str>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE maps
            SET status = $1, error = $2, updated_at = $3
            WHERE id = $4
            "#,
        )
        .bind(status.as_str())
        .bind(error)
        .bind(Utc::now())
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id.to_string()));
        }

        Ok(())
    }

    #[instrument(skip(self), fields(job_id = %id))]
    async fn delete(&self, id: JobId) -> Result<Option<MapJob>, RepositoryError> {
        let row = sqlx::query_as::<_, MapJobRow>(
            r#"
            DELETE FROM maps
            WHERE id = $1
            RETURNING id, name, bbox, status, error, created_at, updated_at
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        row.map(MapJob::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<MapJob>, RepositoryError> {
        let rows = sqlx::query_as::<_, MapJobRow>(
            r#"
            SELECT id, name, bbox, status, error, created_at, updated_at
            FROM maps
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        rows.into_iter().map(MapJob::try_from).collect()
    }
}
