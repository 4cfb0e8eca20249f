//! Dispatch and query handlers for `/album`, `/artist`, `/group`, `/genre`
//! and `/link`. Every dispatcher resolves the `method` override parameter to
//! the operations its resource supports; anything else is rejected before
//! parameters are even looked at.

use axum::extract::{Query, State};
use axum::http::Method;
use axum::response::Response;
use tracing::warn;

use crate::catalog_store::{Album, Artist, Genre, Group, Link};

use super::outcome::{self, message_response, paged_list_response, Entity};
use super::params::{self, ParamMap, ParseFailure, RequestedMethod};
use super::state::ServerState;

// =============================================================================
// Album
// =============================================================================

pub async fn dispatch_album(
    State(state): State<ServerState>,
    method: Method,
    Query(params): Query<ParamMap>,
) -> Response {
    match params::requested_method(&params, &method) {
        RequestedMethod::Get => get_albums(&state, &params),
        RequestedMethod::Post => insert_album(&state, &params),
        RequestedMethod::Delete => delete_album(&state, &params),
        _ => message_response(state.renderer.as_ref(), outcome::method_not_supported()),
    }
}

fn get_albums(state: &ServerState, params: &ParamMap) -> Response {
    paged_list_response(state.renderer.as_ref(), params, "albumList", "albumList", |page| {
        state.store.list_albums(page)
    })
}

fn parse_album(params: &ParamMap) -> Result<Album, ParseFailure> {
    let album_id = params::required_i64(params, "albumid")?;
    let title = params::decoded_text(params, "title")?;
    let year = params::required_i64(params, "year")?;
    let group_id = params::required_i64(params, "groupid")?;
    Album::new(album_id, title, year, group_id).map_err(|err| {
        warn!("Rejected album record: {}", err);
        ParseFailure
    })
}

fn insert_album(state: &ServerState, params: &ParamMap) -> Response {
    let renderer = state.renderer.as_ref();
    let Ok(album) = parse_album(params) else {
        warn!("Failed to deserialize the album to insert");
        return message_response(renderer, outcome::parse_error());
    };

    let result = state.store.insert_album(&album);
    message_response(
        renderer,
        outcome::insert_outcome(Entity::Album, album.album_id, result),
    )
}

fn delete_album(state: &ServerState, params: &ParamMap) -> Response {
    let renderer = state.renderer.as_ref();
    let Ok(album_id) = params::non_negative_i64(params, "albumid") else {
        return message_response(renderer, outcome::malformed_id());
    };

    let result = state.store.delete_album(album_id);
    message_response(
        renderer,
        outcome::delete_outcome(Entity::Album, album_id, result),
    )
}

// =============================================================================
// Artist
// =============================================================================

pub async fn dispatch_artist(
    State(state): State<ServerState>,
    method: Method,
    Query(params): Query<ParamMap>,
) -> Response {
    match params::requested_method(&params, &method) {
        RequestedMethod::Get => get_artists(&state, &params),
        RequestedMethod::Post => insert_artist(&state, &params),
        RequestedMethod::Put => update_artist(&state, &params),
        _ => message_response(state.renderer.as_ref(), outcome::method_not_supported()),
    }
}

fn get_artists(state: &ServerState, params: &ParamMap) -> Response {
    paged_list_response(
        state.renderer.as_ref(),
        params,
        "artistList",
        "artistList",
        |page| state.store.list_artists(page),
    )
}

fn parse_artist(params: &ParamMap) -> Result<Artist, ParseFailure> {
    let artist_id = params::required_i64(params, "artistid")?;
    let name = params::decoded_text(params, "name")?;
    let group_id = params::required_i64(params, "groupid")?;
    Artist::new(artist_id, name, group_id).map_err(|err| {
        warn!("Rejected artist record: {}", err);
        ParseFailure
    })
}

fn insert_artist(state: &ServerState, params: &ParamMap) -> Response {
    let renderer = state.renderer.as_ref();
    let Ok(artist) = parse_artist(params) else {
        warn!("Failed to deserialize the artist to insert");
        return message_response(renderer, outcome::parse_error());
    };

    let result = state.store.insert_artist(&artist);
    message_response(
        renderer,
        outcome::insert_outcome(Entity::Artist, artist.artist_id, result),
    )
}

fn update_artist(state: &ServerState, params: &ParamMap) -> Response {
    let renderer = state.renderer.as_ref();
    let Ok(artist) = parse_artist(params) else {
        warn!("Failed to deserialize the artist to update");
        return message_response(renderer, outcome::parse_error());
    };

    let result = state.store.update_artist(&artist);
    message_response(
        renderer,
        outcome::update_outcome(Entity::Artist, artist.artist_id, result),
    )
}

// =============================================================================
// Group
// =============================================================================

pub async fn dispatch_group(
    State(state): State<ServerState>,
    method: Method,
    Query(params): Query<ParamMap>,
) -> Response {
    match params::requested_method(&params, &method) {
        RequestedMethod::Get => get_groups(&state, &params),
        RequestedMethod::Post => insert_group(&state, &params),
        _ => message_response(state.renderer.as_ref(), outcome::method_not_supported()),
    }
}

fn get_groups(state: &ServerState, params: &ParamMap) -> Response {
    paged_list_response(state.renderer.as_ref(), params, "groupList", "groupList", |page| {
        state.store.list_groups(page)
    })
}

fn insert_group(state: &ServerState, params: &ParamMap) -> Response {
    let renderer = state.renderer.as_ref();
    let group = match parse_group(params) {
        Ok(group) => group,
        Err(_) => {
            warn!("Failed to deserialize the group to insert");
            return message_response(renderer, outcome::parse_error());
        }
    };

    let result = state.store.insert_group(&group);
    message_response(
        renderer,
        outcome::insert_outcome(Entity::Group, group.group_id, result),
    )
}

fn parse_group(params: &ParamMap) -> Result<Group, ParseFailure> {
    let group_id = params::required_i64(params, "groupid")?;
    let name = params::decoded_text(params, "name")?;
    Group::new(group_id, name).map_err(|err| {
        warn!("Rejected group record: {}", err);
        ParseFailure
    })
}

// =============================================================================
// Genre
// =============================================================================

pub async fn dispatch_genre(
    State(state): State<ServerState>,
    method: Method,
    Query(params): Query<ParamMap>,
) -> Response {
    match params::requested_method(&params, &method) {
        RequestedMethod::Get => get_genres(&state, &params),
        RequestedMethod::Post => insert_genre(&state, &params),
        _ => message_response(state.renderer.as_ref(), outcome::method_not_supported()),
    }
}

fn get_genres(state: &ServerState, params: &ParamMap) -> Response {
    paged_list_response(state.renderer.as_ref(), params, "genreList", "genreList", |page| {
        state.store.list_genres(page)
    })
}

fn parse_genre(params: &ParamMap) -> Result<Genre, ParseFailure> {
    let genre_id = params::required_i64(params, "genreid")?;
    let name = params::decoded_text(params, "name")?;
    Genre::new(genre_id, name).map_err(|err| {
        warn!("Rejected genre record: {}", err);
        ParseFailure
    })
}

fn insert_genre(state: &ServerState, params: &ParamMap) -> Response {
    let renderer = state.renderer.as_ref();
    let Ok(genre) = parse_genre(params) else {
        warn!("Failed to deserialize the genre to insert");
        return message_response(renderer, outcome::parse_error());
    };

    let result = state.store.insert_genre(&genre);
    message_response(
        renderer,
        outcome::insert_outcome(Entity::Genre, genre.genre_id, result),
    )
}

// =============================================================================
// Link
// =============================================================================

pub async fn dispatch_link(
    State(state): State<ServerState>,
    method: Method,
    Query(params): Query<ParamMap>,
) -> Response {
    match params::requested_method(&params, &method) {
        RequestedMethod::Get => get_links(&state, &params),
        RequestedMethod::Post => insert_link(&state, &params),
        _ => message_response(state.renderer.as_ref(), outcome::method_not_supported()),
    }
}

fn get_links(state: &ServerState, params: &ParamMap) -> Response {
    paged_list_response(state.renderer.as_ref(), params, "linkList", "linkList", |page| {
        state.store.list_links(page)
    })
}

fn parse_link(params: &ParamMap) -> Result<Link, ParseFailure> {
    let music_id = params::required_i64(params, "musicid")?;
    let link = params::decoded_text(params, "link")?;
    Link::new(music_id, Some(link)).map_err(|err| {
        warn!("Rejected link record: {}", err);
        ParseFailure
    })
}

fn insert_link(state: &ServerState, params: &ParamMap) -> Response {
    let renderer = state.renderer.as_ref();
    let Ok(link) = parse_link(params) else {
        warn!("Failed to deserialize the link to insert");
        return message_response(renderer, outcome::parse_error());
    };

    let result = state.store.insert_link(&link);
    message_response(renderer, outcome::link_insert_outcome(link.music_id, result))
}
