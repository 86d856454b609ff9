use sqlx::PgPool;
use tracing::warn;

// Advertisements reference users without a cascade, so the tables are
// dropped children-first and created parents-first.
const SCHEMA_STATEMENTS: &[&str] = &[
    "DROP TABLE IF EXISTS advertisements",
    "DROP TABLE IF EXISTS users",
    r#"
    CREATE TABLE users (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        second_name TEXT NOT NULL,
        mail TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        registration_time TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE advertisements (
        id BIGSERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        registration_time TIMESTAMPTZ NOT NULL DEFAULT now(),
        user_id BIGINT NOT NULL REFERENCES users(id)
    )
    "#,
];

/// Drop and recreate both tables. Destroys all stored rows on every
/// process start; development-mode behavior only.
pub async fn reset_schema(db: &PgPool) -> anyhow::Result<()> {
    warn!("resetting database schema, all existing rows are dropped");
    for statement in SCHEMA_STATEMENTS {
        sqlx::query(statement).execute(db).await?;
    }
    Ok(())
}
