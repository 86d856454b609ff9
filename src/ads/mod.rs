pub mod dto;
pub mod handlers;
pub mod repo;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ad", post(handlers::create_ad))
        .route(
            "/ad/:id",
            get(handlers::get_ad)
                .patch(handlers::update_ad)
                .delete(handlers::delete_ad),
        )
}
