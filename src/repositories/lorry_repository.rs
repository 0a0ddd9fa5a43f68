use sqlx::PgPool;

use crate::models::lorry::Lorry;
use crate::utils::errors::AppError;

pub struct LorryRepository {
    pool: PgPool,
}

impl LorryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Lorry>, AppError> {
        let lorry = sqlx::query_as::<_, Lorry>(
            "SELECT id, name, owner_id, created_at FROM lorries WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(lorry)
    }

    /// The lorry linked to an identity, if any. The link is 1:1 so at most
    /// one row matches.
    pub async fn find_by_owner(&self, owner_id: i64) -> Result<Option<Lorry>, AppError> {
        let lorry = sqlx::query_as::<_, Lorry>(
            "SELECT id, name, owner_id, created_at FROM lorries WHERE owner_id = $1",
        )
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(lorry)
    }

    pub async fn list_all(&self) -> Result<Vec<Lorry>, AppError> {
        let lorries = sqlx::query_as::<_, Lorry>(
            "SELECT id, name, owner_id, created_at FROM lorries ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(lorries)
    }

    pub async fn create(&self, name: &str) -> Result<Lorry, AppError> {
        let lorry = sqlx::query_as::<_, Lorry>(
            r#"
            INSERT INTO lorries (name)
            VALUES ($1)
            RETURNING id, name, owner_id, created_at
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(lorry)
    }

    /// Locations and routes go with the lorry (ON DELETE CASCADE).
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM lorries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Conditional owner assignment. The WHERE clause makes the claim atomic:
    /// under two concurrent first-use calls exactly one update wins and the
    /// other affects zero rows.
    pub async fn claim(&self, lorry_id: i64, owner_id: i64) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE lorries SET owner_id = $1 WHERE id = $2 AND owner_id IS NULL")
                .bind(owner_id)
                .bind(lorry_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() == 1)
    }
}
