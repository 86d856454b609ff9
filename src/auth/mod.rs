use sqlx::PgPool;
use tracing::warn;

use crate::error::ApiError;
use crate::users::repo::User;

pub mod extractors;
pub mod password;

pub use extractors::Credentials;

/// Resolve header credentials to the acting user: load the claimed id and
/// verify the password against the stored hash. An unknown claimed id is
/// NotFound; a wrong password is an authorization failure with a message
/// distinct from the missing-header case.
pub async fn authorize(db: &PgPool, creds: &Credentials) -> Result<User, ApiError> {
    let user = User::find_by_id(db, creds.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User with id {} not found", creds.user_id)))?;

    if !password::verify_password(&creds.password, &user.password_hash)? {
        warn!(user_id = creds.user_id, "password verification failed");
        return Err(ApiError::Unauthorized(
            "incorrect user_id or password".into(),
        ));
    }

    Ok(user)
}
