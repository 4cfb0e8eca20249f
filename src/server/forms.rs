//! Form views reachable at `GET /{form}`.
//!
//! The route matches any leftover single-segment path; unknown view names
//! fall through to Not Found. A few forms pre-fill their model from query
//! parameters, invalid values are silently ignored like in the plain forms.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use serde_json::{Map, Value};

use super::outcome::{self, message_response, view_response};
use super::params::ParamMap;
use super::state::ServerState;

fn prefill_id(params: &ParamMap, name: &str) -> Option<i64> {
    params
        .get(name)
        .and_then(|raw| raw.parse::<i64>().ok())
        .filter(|id| *id >= 0)
}

pub async fn dispatch_forms(
    State(state): State<ServerState>,
    Path(form): Path<String>,
    Query(params): Query<ParamMap>,
) -> Response {
    let renderer = state.renderer.as_ref();
    if !renderer.has_view(&form) {
        return message_response(renderer, outcome::not_found());
    }

    let mut model = Map::new();
    match form.as_str() {
        "upmusic" => {
            if let Some(music_id) = prefill_id(&params, "musicToEdit") {
                let musics = match state.store.list_music_by_id(music_id) {
                    Ok(musics) => musics,
                    Err(err) => return outcome::backend_failure(renderer, err),
                };
                let Some(music) = musics.first() else {
                    return message_response(renderer, outcome::not_found());
                };
                model.insert("musicToEdit".to_string(), outcome::to_model_value(music));
            }
        }
        "delmusic" => {
            if let Some(music_id) = prefill_id(&params, "musicToDel") {
                model.insert("musicToDel".to_string(), music_id.into());
            }
        }
        "delalbum" => {
            if let Some(album_id) = prefill_id(&params, "albumToDel") {
                model.insert("albumToDel".to_string(), album_id.into());
            }
        }
        _ => {}
    }

    view_response(renderer, StatusCode::OK, &form, Value::Object(model))
}
