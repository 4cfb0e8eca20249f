use anyhow::Result;
use std::path::PathBuf;

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::Response,
    routing::{any, get},
    Router,
};
use serde_json::json;
use tower_http::services::ServeDir;
use tracing::info;

use super::catalog_routes::{
    dispatch_album, dispatch_artist, dispatch_genre, dispatch_group, dispatch_link,
};
use super::forms::dispatch_forms;
use super::join_routes::{artist_join_group, join_all, music_join_link};
use super::music_routes::{dispatch_music, dispatch_music_id, search_music, view_links};
use super::outcome::{self, message_response, view_response};
use super::state::{GuardedCatalogStore, GuardedViewRenderer, ServerState};
use super::{log_requests, redirect_trailing_slash, RequestsLoggingLevel, ServerConfig};

async fn home(State(state): State<ServerState>) -> Response {
    let message = "Benvenuto su MusicService!";
    info!("Returned: {}", message);
    view_response(
        state.renderer.as_ref(),
        StatusCode::OK,
        "home",
        json!({ "welcometext": message }),
    )
}

async fn handle_not_found(State(state): State<ServerState>) -> Response {
    message_response(state.renderer.as_ref(), outcome::not_found())
}

pub fn make_app(
    config: ServerConfig,
    store: GuardedCatalogStore,
    renderer: GuardedViewRenderer,
) -> Router {
    let state = ServerState {
        config: config.clone(),
        store,
        renderer,
    };

    // Entity resources take any transport verb: the domain operation is
    // picked by the `method` override parameter, defaulting to the verb.
    let mut app: Router = Router::new()
        .route("/", get(home))
        .route("/music", any(dispatch_music))
        .route("/music/{id}", any(dispatch_music_id))
        .route("/album", any(dispatch_album))
        .route("/artist", any(dispatch_artist))
        .route("/group", any(dispatch_group))
        .route("/genre", any(dispatch_genre))
        .route("/link", any(dispatch_link))
        .route("/search", get(search_music))
        .route("/mjoinl", get(music_join_link))
        .route("/arjoing", get(artist_join_group))
        .route("/joinall", get(join_all))
        .route("/viewlinks", get(view_links))
        .route("/{form}", get(dispatch_forms))
        .fallback(handle_not_found)
        .method_not_allowed_fallback(handle_not_found)
        .with_state(state.clone());

    if let Some(static_dir) = &config.static_dir {
        app = app.nest_service("/public", ServeDir::new(static_dir));
    }

    app.layer(middleware::from_fn(redirect_trailing_slash))
        .layer(middleware::from_fn_with_state(state, log_requests))
}

pub async fn run_server(
    store: GuardedCatalogStore,
    renderer: GuardedViewRenderer,
    requests_logging_level: RequestsLoggingLevel,
    port: u16,
    static_dir: Option<PathBuf>,
) -> Result<()> {
    let config = ServerConfig {
        port,
        requests_logging_level,
        static_dir,
    };
    let app = make_app(config, store, renderer);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    info!("Listening on {}", listener.local_addr()?);

    Ok(axum::serve(listener, app).await?)
}
