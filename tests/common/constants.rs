//! Shared constants for end-to-end tests
//!
//! When the seeded catalog changes, update only this file.

pub const GROUP_1_ID: i64 = 1;
pub const GROUP_1_NAME: &str = "I Test";
pub const GROUP_2_ID: i64 = 2;
pub const GROUP_2_NAME: &str = "Gruppo Due";

pub const GENRE_1_ID: i64 = 1;
pub const GENRE_1_NAME: &str = "Rock";
pub const GENRE_2_ID: i64 = 2;
pub const GENRE_2_NAME: &str = "Jazz";

pub const ARTIST_1_ID: i64 = 1;
pub const ARTIST_1_NAME: &str = "Artista Uno";
pub const ARTIST_2_ID: i64 = 2;
pub const ARTIST_2_NAME: &str = "Artista Due";

pub const ALBUM_1_ID: i64 = 1;
pub const ALBUM_1_TITLE: &str = "Album Uno";
pub const ALBUM_2_ID: i64 = 2;
pub const ALBUM_2_TITLE: &str = "Album Due";

pub const MUSIC_1_ID: i64 = 1;
pub const MUSIC_1_TITLE: &str = "Canzone Alpha";
pub const MUSIC_2_ID: i64 = 2;
pub const MUSIC_2_TITLE: &str = "Canzone Beta";
/// Music 3 has no album and no links.
pub const MUSIC_3_ID: i64 = 3;
pub const MUSIC_3_TITLE: &str = "Canzone Gamma";

pub const MUSIC_1_LINK: &str = "http://example.com/alpha";
