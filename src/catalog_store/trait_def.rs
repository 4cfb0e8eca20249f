//! CatalogStore trait definition.
//!
//! The only doorway between request handling and the storage engine. The
//! dispatcher never issues queries directly; everything goes through this
//! contract, so a different backend only has to implement this trait.

use super::models::*;
use anyhow::Result;

/// Outcome of a write operation.
///
/// Three-way discrimination the dispatcher depends on: a request naming a
/// duplicate or missing row (`Conflict` / `NotExists`) is the client's
/// mistake, while `BackendFailure` means the storage layer itself broke.
/// The store assigns the outcome once; nothing downstream re-interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Rows affected.
    Success(usize),
    /// Insert target already exists.
    Conflict,
    /// Update/delete target does not exist.
    NotExists,
    /// Unexpected storage failure, already logged by the store.
    BackendFailure,
}

/// Trait for catalog storage backends.
///
/// Read methods return `Err` only on a transport/storage failure, never for
/// empty results: a page past the end of the table and a lookup miss are
/// both `Ok` with an empty `Vec`. All list queries are paged by
/// [`super::PAGE_SIZE`] rows, ordered by primary key ascending.
pub trait CatalogStore: Send + Sync {
    // =========================================================================
    // Music
    // =========================================================================

    fn list_music(&self, page: u32) -> Result<Vec<Music>>;

    /// At most one row; empty when absent.
    fn list_music_by_id(&self, id: i64) -> Result<Vec<Music>>;

    fn list_music_by_album(&self, album_id: i64, page: u32) -> Result<Vec<Music>>;

    fn list_music_by_genre(&self, genre_id: i64, page: u32) -> Result<Vec<Music>>;

    fn list_music_by_group(&self, group_id: i64, page: u32) -> Result<Vec<Music>>;

    /// Case-insensitive substring match over the track title and the related
    /// artist/album/genre names, denormalized into [`MusicStrings`] rows.
    fn search_music(&self, text: &str, page: u32) -> Result<Vec<MusicStrings>>;

    fn insert_music(&self, music: &Music) -> WriteOutcome;

    fn update_music(&self, music: &Music) -> WriteOutcome;

    fn delete_music(&self, id: i64) -> WriteOutcome;

    // =========================================================================
    // Album
    // =========================================================================

    fn list_albums(&self, page: u32) -> Result<Vec<Album>>;

    fn list_album_by_id(&self, id: i64) -> Result<Vec<Album>>;

    fn insert_album(&self, album: &Album) -> WriteOutcome;

    fn delete_album(&self, id: i64) -> WriteOutcome;

    // =========================================================================
    // Artist
    // =========================================================================

    fn list_artists(&self, page: u32) -> Result<Vec<Artist>>;

    fn list_artist_by_id(&self, id: i64) -> Result<Vec<Artist>>;

    fn insert_artist(&self, artist: &Artist) -> WriteOutcome;

    fn update_artist(&self, artist: &Artist) -> WriteOutcome;

    // =========================================================================
    // Group
    // =========================================================================

    fn list_groups(&self, page: u32) -> Result<Vec<Group>>;

    fn list_group_by_id(&self, id: i64) -> Result<Vec<Group>>;

    fn insert_group(&self, group: &Group) -> WriteOutcome;

    // =========================================================================
    // Genre
    // =========================================================================

    fn list_genres(&self, page: u32) -> Result<Vec<Genre>>;

    fn list_genre_by_id(&self, id: i64) -> Result<Vec<Genre>>;

    fn insert_genre(&self, genre: &Genre) -> WriteOutcome;

    // =========================================================================
    // Link
    // =========================================================================

    fn list_links(&self, page: u32) -> Result<Vec<Link>>;

    /// All links of one track, unpaged.
    fn links_for_music(&self, music_id: i64) -> Result<Vec<Link>>;

    /// `Conflict` is unreachable here: links have no unique key.
    fn insert_link(&self, link: &Link) -> WriteOutcome;

    // =========================================================================
    // Join projections
    // =========================================================================

    fn music_join_link(&self, page: u32) -> Result<Vec<MusicJoinLink>>;

    fn artist_join_group(&self, page: u32) -> Result<Vec<ArtistJoinGroup>>;

    fn join_all(&self, page: u32) -> Result<Vec<JoinAll>>;
}
