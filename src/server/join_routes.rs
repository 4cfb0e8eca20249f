//! Paged join-projection endpoints: `/mjoinl`, `/arjoing`, `/joinall`.

use axum::extract::{Query, State};
use axum::response::Response;

use super::outcome::paged_list_response;
use super::params::ParamMap;
use super::state::ServerState;

pub async fn music_join_link(
    State(state): State<ServerState>,
    Query(params): Query<ParamMap>,
) -> Response {
    paged_list_response(
        state.renderer.as_ref(),
        &params,
        "musicJoinLinkList",
        "musicJoinLink",
        |page| state.store.music_join_link(page),
    )
}

pub async fn artist_join_group(
    State(state): State<ServerState>,
    Query(params): Query<ParamMap>,
) -> Response {
    paged_list_response(
        state.renderer.as_ref(),
        &params,
        "artistJoinGroupList",
        "artistJoinGroup",
        |page| state.store.artist_join_group(page),
    )
}

pub async fn join_all(
    State(state): State<ServerState>,
    Query(params): Query<ParamMap>,
) -> Response {
    paged_list_response(
        state.renderer.as_ref(),
        &params,
        "joinAllList",
        "joinAll",
        |page| state.store.join_all(page),
    )
}
