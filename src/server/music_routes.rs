//! Dispatch and query handlers for `/music`, `/music/{id}`, `/search` and
//! `/viewlinks`.
//!
//! Collection GET on `/music` branches on the mutually exclusive
//! `albumid` / `genreid` / `groupid` filters; the first one present wins and
//! its display name is resolved through the single-row lookup before the
//! music query runs.

use axum::extract::{Path, Query, State};
use axum::http::{Method, StatusCode};
use axum::response::Response;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::catalog_store::Music;

use super::outcome::{self, message_response, view_response, Entity};
use super::params::{self, ParamMap, ParseFailure, RequestedMethod};
use super::state::ServerState;

pub async fn dispatch_music(
    State(state): State<ServerState>,
    method: Method,
    Query(params): Query<ParamMap>,
) -> Response {
    match params::requested_method(&params, &method) {
        RequestedMethod::Get => get_music(&state, &params),
        RequestedMethod::Put => update_music(&state, &params),
        RequestedMethod::Post => insert_music(&state, &params),
        RequestedMethod::Delete => delete_music(&state, &params),
        RequestedMethod::Unsupported => {
            message_response(state.renderer.as_ref(), outcome::method_not_supported())
        }
    }
}

pub async fn dispatch_music_id(
    State(state): State<ServerState>,
    method: Method,
    Path(id): Path<String>,
    Query(params): Query<ParamMap>,
) -> Response {
    match params::requested_method(&params, &method) {
        RequestedMethod::Get => get_music_by_id(&state, &id),
        _ => message_response(state.renderer.as_ref(), outcome::method_not_supported()),
    }
}

fn get_music(state: &ServerState, params: &ParamMap) -> Response {
    let renderer = state.renderer.as_ref();
    let Ok(page) = params::page(params) else {
        return message_response(renderer, outcome::parse_error());
    };

    let mut model = Map::new();

    let music_list = if params.contains_key("albumid") {
        let Ok(album_id) = params::non_negative_i64(params, "albumid") else {
            return message_response(renderer, outcome::parse_error());
        };
        let albums = match state.store.list_album_by_id(album_id) {
            Ok(albums) => albums,
            Err(err) => return outcome::backend_failure(renderer, err),
        };
        let Some(album) = albums.first() else {
            return message_response(renderer, outcome::not_found());
        };
        model.insert("albumId".to_string(), album_id.into());
        model.insert("albumName".to_string(), album.title.clone().into());
        state.store.list_music_by_album(album_id, page)
    } else if params.contains_key("genreid") {
        let Ok(genre_id) = params::non_negative_i64(params, "genreid") else {
            return message_response(renderer, outcome::parse_error());
        };
        let genres = match state.store.list_genre_by_id(genre_id) {
            Ok(genres) => genres,
            Err(err) => return outcome::backend_failure(renderer, err),
        };
        let Some(genre) = genres.first() else {
            return message_response(renderer, outcome::not_found());
        };
        model.insert("genreId".to_string(), genre_id.into());
        model.insert("genreName".to_string(), genre.name.clone().into());
        state.store.list_music_by_genre(genre_id, page)
    } else if params.contains_key("groupid") {
        let Ok(group_id) = params::non_negative_i64(params, "groupid") else {
            return message_response(renderer, outcome::parse_error());
        };
        let groups = match state.store.list_group_by_id(group_id) {
            Ok(groups) => groups,
            Err(err) => return outcome::backend_failure(renderer, err),
        };
        let Some(group) = groups.first() else {
            return message_response(renderer, outcome::not_found());
        };
        model.insert("groupId".to_string(), group_id.into());
        model.insert("groupName".to_string(), group.name.clone().into());
        state.store.list_music_by_group(group_id, page)
    } else {
        state.store.list_music(page)
    };

    match music_list {
        Err(err) => outcome::backend_failure(renderer, err),
        Ok(list) if list.is_empty() => message_response(renderer, outcome::not_found()),
        Ok(list) => {
            info!("Returned: {} music rows (page {})", list.len(), page);
            model.insert("musicList".to_string(), outcome::to_model_value(&list));
            model.insert("page".to_string(), page.into());
            view_response(renderer, StatusCode::OK, "musicList", Value::Object(model))
        }
    }
}

fn get_music_by_id(state: &ServerState, raw_id: &str) -> Response {
    let renderer = state.renderer.as_ref();
    let Ok(music_id) = raw_id.parse::<i64>() else {
        warn!("Failed to parse music id '{}'", raw_id);
        return message_response(renderer, outcome::parse_error());
    };

    match state.store.list_music_by_id(music_id) {
        Err(err) => outcome::backend_failure(renderer, err),
        Ok(list) if list.is_empty() => message_response(renderer, outcome::not_found()),
        Ok(list) => {
            let mut model = Map::new();
            model.insert("musicList".to_string(), outcome::to_model_value(&list));
            view_response(renderer, StatusCode::OK, "musicList", Value::Object(model))
        }
    }
}

fn parse_music(params: &ParamMap) -> Result<Music, ParseFailure> {
    let music_id = params::required_i64(params, "musicid")?;
    let title = params::decoded_text(params, "title")?;
    let author_id = params::required_i64(params, "authorid")?;
    let album_id = params::optional_i64(params, "albumid")?;
    let year = params::required_i64(params, "year")?;
    let genre_id = params::required_i64(params, "genreid")?;
    Music::new(music_id, title, author_id, album_id, year, genre_id).map_err(|err| {
        warn!("Rejected music record: {}", err);
        ParseFailure
    })
}

fn insert_music(state: &ServerState, params: &ParamMap) -> Response {
    let renderer = state.renderer.as_ref();
    let Ok(music) = parse_music(params) else {
        warn!("Failed to deserialize the music to insert");
        return message_response(renderer, outcome::parse_error());
    };

    let result = state.store.insert_music(&music);
    message_response(
        renderer,
        outcome::insert_outcome(Entity::Music, music.music_id, result),
    )
}

fn update_music(state: &ServerState, params: &ParamMap) -> Response {
    let renderer = state.renderer.as_ref();
    let Ok(music) = parse_music(params) else {
        warn!("Failed to deserialize the music to update");
        return message_response(renderer, outcome::parse_error());
    };

    let result = state.store.update_music(&music);
    message_response(
        renderer,
        outcome::update_outcome(Entity::Music, music.music_id, result),
    )
}

fn delete_music(state: &ServerState, params: &ParamMap) -> Response {
    let renderer = state.renderer.as_ref();
    let Ok(music_id) = params::non_negative_i64(params, "musicid") else {
        return message_response(renderer, outcome::malformed_id());
    };

    let result = state.store.delete_music(music_id);
    message_response(
        renderer,
        outcome::delete_outcome(Entity::Music, music_id, result),
    )
}

pub async fn search_music(
    State(state): State<ServerState>,
    Query(params): Query<ParamMap>,
) -> Response {
    let renderer = state.renderer.as_ref();
    let Ok(page) = params::page(&params) else {
        return message_response(renderer, outcome::parse_error());
    };

    let text = match params::decoded_text(&params, "string") {
        Ok(text) if !text.is_empty() => text,
        _ => return message_response(renderer, outcome::missing_search_string()),
    };

    match state.store.search_music(&text, page) {
        Err(err) => outcome::backend_failure(renderer, err),
        Ok(list) if list.is_empty() => message_response(renderer, outcome::not_found()),
        Ok(list) => {
            let mut model = Map::new();
            model.insert("musicList".to_string(), outcome::to_model_value(&list));
            model.insert("page".to_string(), page.into());
            model.insert("string".to_string(), text.into());
            view_response(renderer, StatusCode::OK, "search", Value::Object(model))
        }
    }
}

pub async fn view_links(
    State(state): State<ServerState>,
    Query(params): Query<ParamMap>,
) -> Response {
    let renderer = state.renderer.as_ref();
    let Ok(music_id) = params::required_i64(&params, "musicid") else {
        warn!("Failed to parse the music id for viewlinks");
        return message_response(renderer, outcome::parse_error());
    };

    let musics = match state.store.list_music_by_id(music_id) {
        Ok(musics) => musics,
        Err(err) => return outcome::backend_failure(renderer, err),
    };
    let Some(music) = musics.first() else {
        return message_response(renderer, outcome::not_found());
    };

    match state.store.links_for_music(music_id) {
        Err(err) => outcome::backend_failure(renderer, err),
        Ok(links) if links.is_empty() => message_response(renderer, outcome::not_found()),
        Ok(links) => {
            let mut model = Map::new();
            model.insert("linkList".to_string(), outcome::to_model_value(&links));
            model.insert("music".to_string(), outcome::to_model_value(music));
            view_response(
                renderer,
                StatusCode::OK,
                "linksformusic",
                Value::Object(model),
            )
        }
    }
}
