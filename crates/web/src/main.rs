use std::time::Duration;

use anyhow::Context;
use axum::http::HeaderValue;
use storage::Database;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;
mod routes;

use config::Config;
use middleware::auth::ApiKeys;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::players::handlers::list_players,
        features::players::handlers::get_player,
        features::players::handlers::create_player,
        features::players::handlers::update_player,
        features::players::handlers::delete_player,
        features::teams::handlers::list_teams,
        features::teams::handlers::get_team,
        features::teams::handlers::create_team,
        features::teams::handlers::update_team,
        features::teams::handlers::delete_team,
        features::matches::handlers::list_player_matches,
        features::matches::handlers::get_player_match,
        features::matches::handlers::create_player_match,
        features::matches::handlers::update_player_match,
        features::matches::handlers::delete_player_match,
        features::matches::handlers::list_team_matches,
        features::matches::handlers::get_team_match,
        features::matches::handlers::create_team_match,
        features::matches::handlers::update_team_match,
        features::matches::handlers::delete_team_match,
        features::standings::handlers::get_player_standings,
        features::standings::handlers::get_player_months,
        features::standings::handlers::get_player_overview,
        features::standings::handlers::get_team_standings,
        features::standings::handlers::get_team_months,
        features::standings::handlers::get_team_overview,
    ),
    components(
        schemas(
            storage::dto::player::CreatePlayerRequest,
            storage::dto::player::UpdatePlayerRequest,
            storage::dto::player::PlayerResponse,
            storage::dto::team::CreateTeamRequest,
            storage::dto::team::UpdateTeamRequest,
            storage::dto::team::TeamResponse,
            storage::dto::matches::CreateMatchRequest,
            storage::dto::matches::UpdateMatchRequest,
            storage::dto::matches::MatchResponse,
            storage::dto::matches::ParticipantSummary,
            storage::dto::standings::MonthOption,
            storage::dto::standings::StandingsRow,
            storage::dto::standings::Standings,
            storage::dto::standings::StandingsOverview,
            storage::models::Participant,
            storage::models::ParticipantKind,
            storage::models::TeamMembers,
        )
    ),
    tags(
        (name = "players", description = "Player roster endpoints"),
        (name = "teams", description = "Team roster endpoints"),
        (name = "matches", description = "Recorded player and team matches"),
        (name = "standings", description = "Standings derived from the match log"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

fn cors_layer(origins: Option<&str>) -> anyhow::Result<CorsLayer> {
    let allow_origin = match origins {
        Some(origins) => {
            let origins = origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(HeaderValue::from_str)
                .collect::<Result<Vec<_>, _>>()
                .context("CORS_ORIGINS contains an invalid origin")?;
            AllowOrigin::list(origins)
        }
        None => AllowOrigin::from(Any),
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600)))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting foosball league API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);
    if api_keys.is_empty() {
        tracing::warn!("API_KEYS is empty, every mutation will be rejected");
    }

    let cors = cors_layer(config.cors_origins.as_deref())?;

    let app = routes::api_routes(api_keys)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(db);

    let bind_address = config.bind_address();
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_feature() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/players",
            "/api/teams/{id}",
            "/api/matches",
            "/api/team-matches/{id}",
            "/api/standings/players/overview",
            "/api/standings/teams/months",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn test_cors_rejects_malformed_origin() {
        assert!(cors_layer(None).is_ok());
        assert!(cors_layer(Some("https://foosball.example, http://localhost:5173")).is_ok());
        assert!(cors_layer(Some("https://bad\norigin")).is_err());
    }
}
