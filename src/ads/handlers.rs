use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use crate::{
    ads::{
        dto::{AdDetails, AdId, CreateAd, CreatedAd, UpdateAd},
        repo::Ad,
    },
    auth::{self, Credentials},
    error::ApiError,
    state::AppState,
};

#[instrument(skip(state))]
pub async fn get_ad(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AdDetails>, ApiError> {
    let ad = Ad::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Ad with id {id} not found")))?;
    Ok(Json(ad.into()))
}

#[instrument(skip(state, creds, payload))]
pub async fn create_ad(
    State(state): State<AppState>,
    creds: Credentials,
    Json(payload): Json<Value>,
) -> Result<Json<CreatedAd>, ApiError> {
    let req = CreateAd::parse(&payload)?;
    let actor = auth::authorize(&state.db, &creds).await?;

    // The stored owner is always the authenticated caller; a payload that
    // names someone else is rejected instead of silently rewritten.
    if req.user_id != actor.id {
        warn!(
            claimed = req.user_id,
            actor = actor.id,
            "payload user_id does not match the authenticated user"
        );
        return Err(ApiError::Unauthorized(
            "user_id must match the authenticated user".into(),
        ));
    }

    let mut tx = state.db.begin().await?;
    let ad = Ad::create(&mut tx, &req.title, &req.description, actor.id).await?;
    tx.commit().await?;

    info!(ad_id = ad.id, user_id = ad.user_id, "ad created");
    Ok(Json(CreatedAd {
        id: ad.id,
        title: ad.title,
        user_id: ad.user_id,
    }))
}

#[instrument(skip(state, creds, payload))]
pub async fn update_ad(
    State(state): State<AppState>,
    creds: Credentials,
    Path(id): Path<i64>,
    Json(payload): Json<Value>,
) -> Result<Json<AdId>, ApiError> {
    let patch = UpdateAd::parse(&payload)?;
    let actor = auth::authorize(&state.db, &creds).await?;
    if patch.user_id != actor.id {
        return Err(ApiError::Unauthorized(
            "user_id must match the authenticated user".into(),
        ));
    }

    let ad = Ad::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Ad with id {id} not found")))?;
    if ad.user_id != actor.id {
        return Err(ApiError::Unauthorized(
            "only the owner can modify this advertisement".into(),
        ));
    }

    let mut tx = state.db.begin().await?;
    let ad = Ad::update(&mut tx, id, patch.title.as_deref(), patch.description.as_deref()).await?;
    tx.commit().await?;

    info!(ad_id = ad.id, "ad updated");
    Ok(Json(AdId { id: ad.id }))
}

#[instrument(skip(state, creds))]
pub async fn delete_ad(
    State(state): State<AppState>,
    creds: Credentials,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let actor = auth::authorize(&state.db, &creds).await?;

    let ad = Ad::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Ad with id {id} not found")))?;
    if ad.user_id != actor.id {
        return Err(ApiError::Unauthorized(
            "only the owner can delete this advertisement".into(),
        ));
    }

    let mut tx = state.db.begin().await?;
    Ad::delete(&mut tx, id).await?;
    tx.commit().await?;

    info!(ad_id = id, user_id = actor.id, "ad deleted");
    Ok(Json(json!({ "status": "deleted" })))
}
