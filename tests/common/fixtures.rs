//! Seed data for the end-to-end catalog.

use super::constants::*;
use music_catalog_server::catalog_store::{Album, Artist, Genre, Group, Link, Music};
use music_catalog_server::{CatalogStore, SqliteCatalogStore, WriteOutcome};

fn must_insert(outcome: WriteOutcome, what: &str) {
    assert_eq!(outcome, WriteOutcome::Success(1), "Failed to seed {}", what);
}

/// Two groups, two genres, two artists, two albums, three musics (one
/// without an album), three links (two on the first music).
pub fn seed_catalog(store: &SqliteCatalogStore) {
    must_insert(
        store.insert_group(&Group::new(GROUP_1_ID, GROUP_1_NAME.into()).unwrap()),
        "group 1",
    );
    must_insert(
        store.insert_group(&Group::new(GROUP_2_ID, GROUP_2_NAME.into()).unwrap()),
        "group 2",
    );
    must_insert(
        store.insert_genre(&Genre::new(GENRE_1_ID, GENRE_1_NAME.into()).unwrap()),
        "genre 1",
    );
    must_insert(
        store.insert_genre(&Genre::new(GENRE_2_ID, GENRE_2_NAME.into()).unwrap()),
        "genre 2",
    );
    must_insert(
        store.insert_artist(&Artist::new(ARTIST_1_ID, ARTIST_1_NAME.into(), GROUP_1_ID).unwrap()),
        "artist 1",
    );
    must_insert(
        store.insert_artist(&Artist::new(ARTIST_2_ID, ARTIST_2_NAME.into(), GROUP_2_ID).unwrap()),
        "artist 2",
    );
    must_insert(
        store.insert_album(&Album::new(ALBUM_1_ID, ALBUM_1_TITLE.into(), 1999, GROUP_1_ID).unwrap()),
        "album 1",
    );
    must_insert(
        store.insert_album(&Album::new(ALBUM_2_ID, ALBUM_2_TITLE.into(), 2005, GROUP_2_ID).unwrap()),
        "album 2",
    );
    must_insert(
        store.insert_music(
            &Music::new(
                MUSIC_1_ID,
                MUSIC_1_TITLE.into(),
                ARTIST_1_ID,
                Some(ALBUM_1_ID),
                1999,
                GENRE_1_ID,
            )
            .unwrap(),
        ),
        "music 1",
    );
    must_insert(
        store.insert_music(
            &Music::new(
                MUSIC_2_ID,
                MUSIC_2_TITLE.into(),
                ARTIST_2_ID,
                Some(ALBUM_2_ID),
                2005,
                GENRE_2_ID,
            )
            .unwrap(),
        ),
        "music 2",
    );
    must_insert(
        store.insert_music(
            &Music::new(MUSIC_3_ID, MUSIC_3_TITLE.into(), ARTIST_1_ID, None, 2010, GENRE_1_ID)
                .unwrap(),
        ),
        "music 3",
    );
    must_insert(
        store.insert_link(&Link::new(MUSIC_1_ID, Some(MUSIC_1_LINK.into())).unwrap()),
        "link 1",
    );
    must_insert(
        store.insert_link(&Link::new(MUSIC_1_ID, Some(format!("{}2", MUSIC_1_LINK))).unwrap()),
        "link 2",
    );
    must_insert(
        store.insert_link(&Link::new(MUSIC_2_ID, Some("http://example.com/beta".into())).unwrap()),
        "link 3",
    );
}
