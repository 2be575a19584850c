use axum::Router;
use storage::Database;

use crate::features;
use crate::middleware::auth::ApiKeys;

/// Every `/api` route, still waiting for its `Database` state.
pub fn api_routes(api_keys: ApiKeys) -> Router<Database> {
    Router::new()
        .nest("/api/players", features::players::routes::routes(api_keys.clone()))
        .nest("/api/teams", features::teams::routes::routes(api_keys.clone()))
        .nest(
            "/api/matches",
            features::matches::routes::player_routes(api_keys.clone()),
        )
        .nest(
            "/api/team-matches",
            features::matches::routes::team_routes(api_keys),
        )
        .nest("/api/standings", features::standings::routes::routes())
}
