use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{
    get_player_months, get_player_overview, get_player_standings, get_team_months,
    get_team_overview, get_team_standings,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/players", get(get_player_standings))
        .route("/players/months", get(get_player_months))
        .route("/players/overview", get(get_player_overview))
        .route("/teams", get(get_team_standings))
        .route("/teams/months", get(get_team_months))
        .route("/teams/overview", get(get_team_overview))
}
