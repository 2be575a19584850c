use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use storage::Database;

use super::handlers::{
    create_player_match, create_team_match, delete_player_match, delete_team_match,
    get_player_match, get_team_match, list_player_matches, list_team_matches,
    update_player_match, update_team_match,
};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn player_routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_player_match))
        .route("/:id", put(update_player_match))
        .route("/:id", delete(delete_player_match))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_player_matches))
        .route("/:id", get(get_player_match))
        .merge(protected)
}

pub fn team_routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_team_match))
        .route("/:id", put(update_team_match))
        .route("/:id", delete(delete_team_match))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_team_matches))
        .route("/:id", get(get_team_match))
        .merge(protected)
}
