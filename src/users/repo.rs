use sqlx::{FromRow, PgConnection, PgPool};
use time::OffsetDateTime;

/// User record in the database. The password column only ever holds an
/// argon2 hash.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub second_name: String,
    pub mail: String,
    pub password_hash: String,
    pub registration_time: OffsetDateTime,
}

/// Present fields overwrite the stored row; absent fields keep it.
#[derive(Debug, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub second_name: Option<String>,
    pub mail: Option<String>,
    pub password_hash: Option<String>,
}

impl User {
    pub async fn find_by_id(db: &PgPool, id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, second_name, mail, password_hash, registration_time
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn create(
        conn: &mut PgConnection,
        name: &str,
        second_name: &str,
        mail: &str,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, second_name, mail, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, second_name, mail, password_hash, registration_time
            "#,
        )
        .bind(name)
        .bind(second_name)
        .bind(mail)
        .bind(password_hash)
        .fetch_one(conn)
        .await
    }

    pub async fn update(
        conn: &mut PgConnection,
        id: i64,
        changes: &UserChanges,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                second_name = COALESCE($3, second_name),
                mail = COALESCE($4, mail),
                password_hash = COALESCE($5, password_hash)
            WHERE id = $1
            RETURNING id, name, second_name, mail, password_hash, registration_time
            "#,
        )
        .bind(id)
        .bind(changes.name.as_deref())
        .bind(changes.second_name.as_deref())
        .bind(changes.mail.as_deref())
        .bind(changes.password_hash.as_deref())
        .fetch_one(conn)
        .await
    }

    pub async fn delete(conn: &mut PgConnection, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }
}
