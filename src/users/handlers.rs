use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use tracing::{info, instrument};

use crate::{
    auth::{self, password, Credentials},
    error::ApiError,
    state::AppState,
    users::{
        dto::{CreateUser, PublicUser, UpdateUser, UserId},
        repo::{User, UserChanges},
    },
};

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PublicUser>, ApiError> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User with id {id} not found")))?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<UserId>, ApiError> {
    let req = CreateUser::parse(&payload)?;
    let hash = password::hash_password(&req.password)?;

    let mut tx = state.db.begin().await?;
    let user = User::create(&mut tx, &req.name, &req.second_name, &req.mail, &hash)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                ApiError::Conflict(format!("User with mail {} already exists", req.mail))
            }
            _ => e.into(),
        })?;
    tx.commit().await?;

    info!(user_id = user.id, "user created");
    Ok(Json(UserId { id: user.id }))
}

#[instrument(skip(state, creds, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    creds: Credentials,
    Path(id): Path<i64>,
    Json(payload): Json<Value>,
) -> Result<Json<UserId>, ApiError> {
    let patch = UpdateUser::parse(&payload)?;
    let actor = auth::authorize(&state.db, &creds).await?;
    if actor.id != id {
        return Err(ApiError::Unauthorized(
            "only the account owner can modify it".into(),
        ));
    }

    // Plaintext from the payload is re-hashed before it touches the row.
    let password_hash = match patch.password {
        Some(plain) => Some(password::hash_password(&plain)?),
        None => None,
    };
    let changes = UserChanges {
        name: patch.name,
        second_name: patch.second_name,
        mail: patch.mail,
        password_hash,
    };

    let mut tx = state.db.begin().await?;
    let user = User::update(&mut tx, id, &changes)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                ApiError::Conflict("User with this mail already exists".into())
            }
            _ => e.into(),
        })?;
    tx.commit().await?;

    info!(user_id = user.id, "user updated");
    Ok(Json(UserId { id: user.id }))
}

#[instrument(skip(state, creds))]
pub async fn delete_user(
    State(state): State<AppState>,
    creds: Credentials,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let actor = auth::authorize(&state.db, &creds).await?;
    if actor.id != id {
        return Err(ApiError::Unauthorized(
            "only the account owner can delete it".into(),
        ));
    }

    let mut tx = state.db.begin().await?;
    let deleted = User::delete(&mut tx, id).await.map_err(|e| match &e {
        // The advertisements FK has no cascade: a user that still owns ads
        // cannot be removed.
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => ApiError::Conflict(format!(
            "User with id {id} still owns advertisements and cannot be deleted"
        )),
        _ => e.into(),
    })?;
    if deleted == 0 {
        return Err(ApiError::NotFound(format!("User with id {id} not found")));
    }
    tx.commit().await?;

    info!(user_id = id, "user deleted");
    Ok(Json(json!({ "status": "deleted" })))
}
