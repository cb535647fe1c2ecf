//! Member API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Routes relative to the /mailchimp/lists prefix
pub fn routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/{list_id}/members",
            post(handler::create).get(handler::list),
        )
        .route(
            "/{list_id}/members/{member_id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
