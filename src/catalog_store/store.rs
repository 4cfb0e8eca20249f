//! SQLite-backed catalog store implementation.

use super::models::*;
use super::schema::CATALOG_SCHEMA;
use super::trait_def::{CatalogStore, WriteOutcome};
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{error, info};

/// Rows per page for every list query.
pub const PAGE_SIZE: u32 = 10;

/// SQLite-backed catalog store. One connection per process, shared behind a
/// mutex; every call is a single atomic statement (plus at most one
/// existence probe) from the dispatcher's point of view.
#[derive(Clone)]
pub struct SqliteCatalogStore {
    conn: Arc<Mutex<Connection>>,
}

fn init_schema(conn: &Connection) -> Result<()> {
    let table_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
            [],
            |r| r.get(0),
        )
        .unwrap_or(0);

    if table_count == 0 {
        info!(
            "Creating catalog db schema at version {}",
            CATALOG_SCHEMA.version
        );
        CATALOG_SCHEMA.create(conn)?;
    } else {
        CATALOG_SCHEMA.validate(conn)?;
    }
    Ok(())
}

fn page_bounds(page: u32) -> (i64, i64) {
    (PAGE_SIZE as i64, page as i64 * PAGE_SIZE as i64)
}

fn row_exists(conn: &Connection, sql: &str, id: i64) -> rusqlite::Result<bool> {
    Ok(conn
        .query_row(sql, params![id], |_| Ok(()))
        .optional()?
        .is_some())
}

fn query_rows<T>(
    conn: &Connection,
    sql: &str,
    query_params: &[&dyn rusqlite::ToSql],
    map: fn(&rusqlite::Row) -> rusqlite::Result<T>,
) -> rusqlite::Result<Vec<T>> {
    let mut stmt = conn.prepare_cached(sql)?;
    let rows = stmt.query_map(query_params, map)?.collect();
    rows
}

// =============================================================================
// Row mappers
// =============================================================================

fn music_from_row(row: &rusqlite::Row) -> rusqlite::Result<Music> {
    Ok(Music {
        music_id: row.get(0)?,
        title: row.get(1)?,
        author_id: row.get(2)?,
        album_id: row.get(3)?,
        year: row.get(4)?,
        genre_id: row.get(5)?,
    })
}

fn album_from_row(row: &rusqlite::Row) -> rusqlite::Result<Album> {
    Ok(Album {
        album_id: row.get(0)?,
        title: row.get(1)?,
        year: row.get(2)?,
        group_id: row.get(3)?,
    })
}

fn artist_from_row(row: &rusqlite::Row) -> rusqlite::Result<Artist> {
    Ok(Artist {
        artist_id: row.get(0)?,
        name: row.get(1)?,
        group_id: row.get(2)?,
    })
}

fn group_from_row(row: &rusqlite::Row) -> rusqlite::Result<Group> {
    Ok(Group {
        group_id: row.get(0)?,
        name: row.get(1)?,
    })
}

fn genre_from_row(row: &rusqlite::Row) -> rusqlite::Result<Genre> {
    Ok(Genre {
        genre_id: row.get(0)?,
        name: row.get(1)?,
    })
}

fn link_from_row(row: &rusqlite::Row) -> rusqlite::Result<Link> {
    Ok(Link {
        music_id: row.get(0)?,
        link: row.get(1)?,
    })
}

fn music_strings_from_row(row: &rusqlite::Row) -> rusqlite::Result<MusicStrings> {
    Ok(MusicStrings {
        music_id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        album: row.get(3)?,
        year: row.get(4)?,
        genre: row.get(5)?,
    })
}

fn music_join_link_from_row(row: &rusqlite::Row) -> rusqlite::Result<MusicJoinLink> {
    Ok(MusicJoinLink {
        music_id: row.get(0)?,
        title: row.get(1)?,
        link: row.get(2)?,
    })
}

fn artist_join_group_from_row(row: &rusqlite::Row) -> rusqlite::Result<ArtistJoinGroup> {
    Ok(ArtistJoinGroup {
        artist_id: row.get(0)?,
        artist_name: row.get(1)?,
        group_id: row.get(2)?,
        group_name: row.get(3)?,
    })
}

fn join_all_from_row(row: &rusqlite::Row) -> rusqlite::Result<JoinAll> {
    Ok(JoinAll {
        music_id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        album: row.get(3)?,
        year: row.get(4)?,
        genre: row.get(5)?,
        link: row.get(6)?,
    })
}

// =============================================================================
// Join SQL
// =============================================================================

const SEARCH_SQL: &str = "\
    SELECT m.music_id, m.title, a.name, al.title, m.year, g.name \
    FROM musics m \
    JOIN artists a ON a.artist_id = m.author_id \
    JOIN genres g ON g.genre_id = m.genre_id \
    LEFT JOIN albums al ON al.album_id = m.album_id \
    WHERE lower(m.title) LIKE lower('%' || ?1 || '%') \
       OR lower(a.name) LIKE lower('%' || ?1 || '%') \
       OR lower(al.title) LIKE lower('%' || ?1 || '%') \
       OR lower(g.name) LIKE lower('%' || ?1 || '%') \
    ORDER BY m.music_id LIMIT ?2 OFFSET ?3";

const MUSIC_JOIN_LINK_SQL: &str = "\
    SELECT m.music_id, m.title, l.link \
    FROM musics m \
    JOIN links l ON l.music_id = m.music_id \
    ORDER BY m.music_id LIMIT ?1 OFFSET ?2";

const ARTIST_JOIN_GROUP_SQL: &str = "\
    SELECT a.artist_id, a.name, g.group_id, g.name \
    FROM artists a \
    JOIN groups g ON g.group_id = a.group_id \
    ORDER BY a.artist_id LIMIT ?1 OFFSET ?2";

const JOIN_ALL_SQL: &str = "\
    SELECT m.music_id, m.title, a.name, al.title, m.year, g.name, l.link \
    FROM musics m \
    JOIN artists a ON a.artist_id = m.author_id \
    JOIN genres g ON g.genre_id = m.genre_id \
    LEFT JOIN albums al ON al.album_id = m.album_id \
    LEFT JOIN links l ON l.music_id = m.music_id \
    ORDER BY m.music_id LIMIT ?1 OFFSET ?2";

impl SqliteCatalogStore {
    /// Opens (or creates) the catalog database at `db_path`. A brand new file
    /// gets the full schema; an existing one is validated against it.
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open_with_flags(
            db_path.as_ref(),
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI
                | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .context("Failed to open catalog database")?;

        init_schema(&conn)?;

        conn.pragma_update(None, "journal_mode", "WAL")?;

        let music_count: i64 = conn
            .query_row("SELECT COUNT(*) FROM musics", [], |r| r.get(0))
            .unwrap_or(0);
        let album_count: i64 = conn
            .query_row("SELECT COUNT(*) FROM albums", [], |r| r.get(0))
            .unwrap_or(0);
        let artist_count: i64 = conn
            .query_row("SELECT COUNT(*) FROM artists", [], |r| r.get(0))
            .unwrap_or(0);

        info!(
            "Opened music catalog: {} musics, {} albums, {} artists",
            music_count, album_count, artist_count
        );

        Ok(SqliteCatalogStore {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// In-memory store, for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        init_schema(&conn)?;
        Ok(SqliteCatalogStore {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn read<T>(
        &self,
        what: &'static str,
        sql: &str,
        query_params: &[&dyn rusqlite::ToSql],
        map: fn(&rusqlite::Row) -> rusqlite::Result<T>,
    ) -> Result<Vec<T>> {
        let conn = self.conn.lock().unwrap();
        query_rows(&conn, sql, query_params, map).context(what)
    }

    fn write<F>(&self, what: &str, f: F) -> WriteOutcome
    where
        F: FnOnce(&Connection) -> rusqlite::Result<WriteOutcome>,
    {
        let conn = self.conn.lock().unwrap();
        match f(&conn) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("{} failed: {}", what, e);
                WriteOutcome::BackendFailure
            }
        }
    }
}

impl CatalogStore for SqliteCatalogStore {
    // =========================================================================
    // Music
    // =========================================================================

    fn list_music(&self, page: u32) -> Result<Vec<Music>> {
        let (limit, offset) = page_bounds(page);
        self.read(
            "Failed to list music",
            "SELECT music_id, title, author_id, album_id, year, genre_id FROM musics \
             ORDER BY music_id LIMIT ?1 OFFSET ?2",
            &[&limit, &offset],
            music_from_row,
        )
    }

    fn list_music_by_id(&self, id: i64) -> Result<Vec<Music>> {
        self.read(
            "Failed to get music by id",
            "SELECT music_id, title, author_id, album_id, year, genre_id FROM musics \
             WHERE music_id = ?1",
            &[&id],
            music_from_row,
        )
    }

    fn list_music_by_album(&self, album_id: i64, page: u32) -> Result<Vec<Music>> {
        let (limit, offset) = page_bounds(page);
        self.read(
            "Failed to list music by album",
            "SELECT music_id, title, author_id, album_id, year, genre_id FROM musics \
             WHERE album_id = ?1 ORDER BY music_id LIMIT ?2 OFFSET ?3",
            &[&album_id, &limit, &offset],
            music_from_row,
        )
    }

    fn list_music_by_genre(&self, genre_id: i64, page: u32) -> Result<Vec<Music>> {
        let (limit, offset) = page_bounds(page);
        self.read(
            "Failed to list music by genre",
            "SELECT music_id, title, author_id, album_id, year, genre_id FROM musics \
             WHERE genre_id = ?1 ORDER BY music_id LIMIT ?2 OFFSET ?3",
            &[&genre_id, &limit, &offset],
            music_from_row,
        )
    }

    fn list_music_by_group(&self, group_id: i64, page: u32) -> Result<Vec<Music>> {
        let (limit, offset) = page_bounds(page);
        self.read(
            "Failed to list music by group",
            "SELECT m.music_id, m.title, m.author_id, m.album_id, m.year, m.genre_id \
             FROM musics m JOIN artists a ON a.artist_id = m.author_id \
             WHERE a.group_id = ?1 ORDER BY m.music_id LIMIT ?2 OFFSET ?3",
            &[&group_id, &limit, &offset],
            music_from_row,
        )
    }

    fn search_music(&self, text: &str, page: u32) -> Result<Vec<MusicStrings>> {
        let (limit, offset) = page_bounds(page);
        self.read(
            "Failed to search music",
            SEARCH_SQL,
            &[&text, &limit, &offset],
            music_strings_from_row,
        )
    }

    fn insert_music(&self, music: &Music) -> WriteOutcome {
        self.write("Insert music", |conn| {
            if row_exists(conn, "SELECT 1 FROM musics WHERE music_id = ?1", music.music_id)? {
                return Ok(WriteOutcome::Conflict);
            }
            conn.execute(
                "INSERT INTO musics (music_id, title, author_id, album_id, year, genre_id) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    music.music_id,
                    music.title,
                    music.author_id,
                    music.album_id,
                    music.year,
                    music.genre_id
                ],
            )?;
            Ok(WriteOutcome::Success(1))
        })
    }

    fn update_music(&self, music: &Music) -> WriteOutcome {
        self.write("Update music", |conn| {
            let affected = conn.execute(
                "UPDATE musics SET title = ?2, author_id = ?3, album_id = ?4, year = ?5, \
                 genre_id = ?6 WHERE music_id = ?1",
                params![
                    music.music_id,
                    music.title,
                    music.author_id,
                    music.album_id,
                    music.year,
                    music.genre_id
                ],
            )?;
            if affected == 0 {
                return Ok(WriteOutcome::NotExists);
            }
            Ok(WriteOutcome::Success(affected))
        })
    }

    fn delete_music(&self, id: i64) -> WriteOutcome {
        self.write("Delete music", |conn| {
            let affected = conn.execute("DELETE FROM musics WHERE music_id = ?1", params![id])?;
            if affected == 0 {
                return Ok(WriteOutcome::NotExists);
            }
            Ok(WriteOutcome::Success(affected))
        })
    }

    // =========================================================================
    // Album
    // =========================================================================

    fn list_albums(&self, page: u32) -> Result<Vec<Album>> {
        let (limit, offset) = page_bounds(page);
        self.read(
            "Failed to list albums",
            "SELECT album_id, title, year, group_id FROM albums \
             ORDER BY album_id LIMIT ?1 OFFSET ?2",
            &[&limit, &offset],
            album_from_row,
        )
    }

    fn list_album_by_id(&self, id: i64) -> Result<Vec<Album>> {
        self.read(
            "Failed to get album by id",
            "SELECT album_id, title, year, group_id FROM albums WHERE album_id = ?1",
            &[&id],
            album_from_row,
        )
    }

    fn insert_album(&self, album: &Album) -> WriteOutcome {
        self.write("Insert album", |conn| {
            if row_exists(conn, "SELECT 1 FROM albums WHERE album_id = ?1", album.album_id)? {
                return Ok(WriteOutcome::Conflict);
            }
            conn.execute(
                "INSERT INTO albums (album_id, title, year, group_id) VALUES (?1, ?2, ?3, ?4)",
                params![album.album_id, album.title, album.year, album.group_id],
            )?;
            Ok(WriteOutcome::Success(1))
        })
    }

    fn delete_album(&self, id: i64) -> WriteOutcome {
        self.write("Delete album", |conn| {
            let affected = conn.execute("DELETE FROM albums WHERE album_id = ?1", params![id])?;
            if affected == 0 {
                return Ok(WriteOutcome::NotExists);
            }
            Ok(WriteOutcome::Success(affected))
        })
    }

    // =========================================================================
    // Artist
    // =========================================================================

    fn list_artists(&self, page: u32) -> Result<Vec<Artist>> {
        let (limit, offset) = page_bounds(page);
        self.read(
            "Failed to list artists",
            "SELECT artist_id, name, group_id FROM artists \
             ORDER BY artist_id LIMIT ?1 OFFSET ?2",
            &[&limit, &offset],
            artist_from_row,
        )
    }

    fn list_artist_by_id(&self, id: i64) -> Result<Vec<Artist>> {
        self.read(
            "Failed to get artist by id",
            "SELECT artist_id, name, group_id FROM artists WHERE artist_id = ?1",
            &[&id],
            artist_from_row,
        )
    }

    fn insert_artist(&self, artist: &Artist) -> WriteOutcome {
        self.write("Insert artist", |conn| {
            if row_exists(
                conn,
                "SELECT 1 FROM artists WHERE artist_id = ?1",
                artist.artist_id,
            )? {
                return Ok(WriteOutcome::Conflict);
            }
            conn.execute(
                "INSERT INTO artists (artist_id, name, group_id) VALUES (?1, ?2, ?3)",
                params![artist.artist_id, artist.name, artist.group_id],
            )?;
            Ok(WriteOutcome::Success(1))
        })
    }

    fn update_artist(&self, artist: &Artist) -> WriteOutcome {
        self.write("Update artist", |conn| {
            let affected = conn.execute(
                "UPDATE artists SET name = ?2, group_id = ?3 WHERE artist_id = ?1",
                params![artist.artist_id, artist.name, artist.group_id],
            )?;
            if affected == 0 {
                return Ok(WriteOutcome::NotExists);
            }
            Ok(WriteOutcome::Success(affected))
        })
    }

    // =========================================================================
    // Group
    // =========================================================================

    fn list_groups(&self, page: u32) -> Result<Vec<Group>> {
        let (limit, offset) = page_bounds(page);
        self.read(
            "Failed to list groups",
            "SELECT group_id, name FROM groups ORDER BY group_id LIMIT ?1 OFFSET ?2",
            &[&limit, &offset],
            group_from_row,
        )
    }

    fn list_group_by_id(&self, id: i64) -> Result<Vec<Group>> {
        self.read(
            "Failed to get group by id",
            "SELECT group_id, name FROM groups WHERE group_id = ?1",
            &[&id],
            group_from_row,
        )
    }

    fn insert_group(&self, group: &Group) -> WriteOutcome {
        self.write("Insert group", |conn| {
            if row_exists(conn, "SELECT 1 FROM groups WHERE group_id = ?1", group.group_id)? {
                return Ok(WriteOutcome::Conflict);
            }
            conn.execute(
                "INSERT INTO groups (group_id, name) VALUES (?1, ?2)",
                params![group.group_id, group.name],
            )?;
            Ok(WriteOutcome::Success(1))
        })
    }

    // =========================================================================
    // Genre
    // =========================================================================

    fn list_genres(&self, page: u32) -> Result<Vec<Genre>> {
        let (limit, offset) = page_bounds(page);
        self.read(
            "Failed to list genres",
            "SELECT genre_id, name FROM genres ORDER BY genre_id LIMIT ?1 OFFSET ?2",
            &[&limit, &offset],
            genre_from_row,
        )
    }

    fn list_genre_by_id(&self, id: i64) -> Result<Vec<Genre>> {
        self.read(
            "Failed to get genre by id",
            "SELECT genre_id, name FROM genres WHERE genre_id = ?1",
            &[&id],
            genre_from_row,
        )
    }

    fn insert_genre(&self, genre: &Genre) -> WriteOutcome {
        self.write("Insert genre", |conn| {
            if row_exists(conn, "SELECT 1 FROM genres WHERE genre_id = ?1", genre.genre_id)? {
                return Ok(WriteOutcome::Conflict);
            }
            conn.execute(
                "INSERT INTO genres (genre_id, name) VALUES (?1, ?2)",
                params![genre.genre_id, genre.name],
            )?;
            Ok(WriteOutcome::Success(1))
        })
    }

    // =========================================================================
    // Link
    // =========================================================================

    fn list_links(&self, page: u32) -> Result<Vec<Link>> {
        let (limit, offset) = page_bounds(page);
        self.read(
            "Failed to list links",
            "SELECT music_id, link FROM links ORDER BY music_id LIMIT ?1 OFFSET ?2",
            &[&limit, &offset],
            link_from_row,
        )
    }

    fn links_for_music(&self, music_id: i64) -> Result<Vec<Link>> {
        self.read(
            "Failed to get links for music",
            "SELECT music_id, link FROM links WHERE music_id = ?1 ORDER BY link",
            &[&music_id],
            link_from_row,
        )
    }

    fn insert_link(&self, link: &Link) -> WriteOutcome {
        self.write("Insert link", |conn| {
            conn.execute(
                "INSERT INTO links (music_id, link) VALUES (?1, ?2)",
                params![link.music_id, link.link],
            )?;
            Ok(WriteOutcome::Success(1))
        })
    }

    // =========================================================================
    // Join projections
    // =========================================================================

    fn music_join_link(&self, page: u32) -> Result<Vec<MusicJoinLink>> {
        let (limit, offset) = page_bounds(page);
        self.read(
            "Failed to join music with links",
            MUSIC_JOIN_LINK_SQL,
            &[&limit, &offset],
            music_join_link_from_row,
        )
    }

    fn artist_join_group(&self, page: u32) -> Result<Vec<ArtistJoinGroup>> {
        let (limit, offset) = page_bounds(page);
        self.read(
            "Failed to join artists with groups",
            ARTIST_JOIN_GROUP_SQL,
            &[&limit, &offset],
            artist_join_group_from_row,
        )
    }

    fn join_all(&self, page: u32) -> Result<Vec<JoinAll>> {
        let (limit, offset) = page_bounds(page);
        self.read(
            "Failed to run full catalog join",
            JOIN_ALL_SQL,
            &[&limit, &offset],
            join_all_from_row,
        )
    }
}
