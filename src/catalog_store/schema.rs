//! SQLite schema for the music catalog database.
//!
//! Relationships between tables are plain integer columns resolved by the
//! store's queries; referential integrity is not delegated to the engine,
//! matching the validation-at-construction model.

use crate::sqlite_column;
use crate::sqlite_persistence::{Column, SqlType, Table, VersionedSchema};

const MUSICS_TABLE: Table = Table {
    name: "musics",
    columns: &[
        sqlite_column!("music_id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("author_id", &SqlType::Integer, non_null = true),
        sqlite_column!("album_id", &SqlType::Integer), // nullable: singles have no album
        sqlite_column!("year", &SqlType::Integer, non_null = true),
        sqlite_column!("genre_id", &SqlType::Integer, non_null = true),
    ],
    indices: &[
        ("idx_musics_author", "author_id"),
        ("idx_musics_album", "album_id"),
        ("idx_musics_genre", "genre_id"),
    ],
};

const ALBUMS_TABLE: Table = Table {
    name: "albums",
    columns: &[
        sqlite_column!("album_id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("year", &SqlType::Integer, non_null = true),
        sqlite_column!("group_id", &SqlType::Integer, non_null = true),
    ],
    indices: &[("idx_albums_group", "group_id")],
};

const ARTISTS_TABLE: Table = Table {
    name: "artists",
    columns: &[
        sqlite_column!("artist_id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("group_id", &SqlType::Integer, non_null = true),
    ],
    indices: &[("idx_artists_group", "group_id")],
};

const GROUPS_TABLE: Table = Table {
    name: "groups",
    columns: &[
        sqlite_column!("group_id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
    ],
    indices: &[],
};

const GENRES_TABLE: Table = Table {
    name: "genres",
    columns: &[
        sqlite_column!("genre_id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
    ],
    indices: &[],
};

/// No primary key: a track may carry any number of links.
const LINKS_TABLE: Table = Table {
    name: "links",
    columns: &[
        sqlite_column!("music_id", &SqlType::Integer, non_null = true),
        sqlite_column!("link", &SqlType::Text),
    ],
    indices: &[("idx_links_music", "music_id")],
};

pub const CATALOG_SCHEMA: VersionedSchema = VersionedSchema {
    version: 1,
    tables: &[
        MUSICS_TABLE,
        ALBUMS_TABLE,
        ARTISTS_TABLE,
        GROUPS_TABLE,
        GENRES_TABLE,
        LINKS_TABLE,
    ],
};
