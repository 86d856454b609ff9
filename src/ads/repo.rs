use sqlx::{FromRow, PgConnection, PgPool};
use time::OffsetDateTime;

/// Advertisement record. `user_id` always references an existing user; the
/// constraint has no cascade, so owners with ads cannot be deleted.
#[derive(Debug, Clone, FromRow)]
pub struct Ad {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub registration_time: OffsetDateTime,
    pub user_id: i64,
}

impl Ad {
    pub async fn find_by_id(db: &PgPool, id: i64) -> Result<Option<Ad>, sqlx::Error> {
        sqlx::query_as::<_, Ad>(
            r#"
            SELECT id, title, description, registration_time, user_id
            FROM advertisements
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn create(
        conn: &mut PgConnection,
        title: &str,
        description: &str,
        user_id: i64,
    ) -> Result<Ad, sqlx::Error> {
        sqlx::query_as::<_, Ad>(
            r#"
            INSERT INTO advertisements (title, description, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, registration_time, user_id
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(user_id)
        .fetch_one(conn)
        .await
    }

    pub async fn update(
        conn: &mut PgConnection,
        id: i64,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<Ad, sqlx::Error> {
        sqlx::query_as::<_, Ad>(
            r#"
            UPDATE advertisements
            SET title = COALESCE($2, title),
                description = COALESCE($3, description)
            WHERE id = $1
            RETURNING id, title, description, registration_time, user_id
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .fetch_one(conn)
        .await
    }

    pub async fn delete(conn: &mut PgConnection, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM advertisements WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }
}
