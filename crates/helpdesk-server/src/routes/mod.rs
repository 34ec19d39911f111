//! Route table.

mod assist;
mod auth;
mod tickets;
mod users;

use axum::Router;
use axum::routing::{get, post};
use surrealdb::Connection;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app<C: Connection>(state: AppState<C>) -> Router {
    Router::new()
        .route("/auth/signup", post(auth::signup::<C>))
        .route("/auth/signin", post(auth::signin::<C>))
        .route(
            "/tickets",
            get(tickets::list::<C>)
                .post(tickets::create::<C>)
                .patch(tickets::patch::<C>),
        )
        .route(
            "/tickets/{id}",
            get(tickets::get_one::<C>)
                .put(tickets::put::<C>)
                .delete(tickets::delete::<C>),
        )
        .route("/tickets/{id}/self-assign", post(tickets::self_assign::<C>))
        .route("/users", get(users::list::<C>))
        .route("/user", get(users::get_one::<C>))
        .route("/assist/sentiment", post(assist::sentiment::<C>))
        .route("/assist/stress", post(assist::stress::<C>))
        .route("/assist/voice-clarity", post(assist::voice_clarity::<C>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
