//! Catalog domain records.
//!
//! Records are constructed transiently per request: from parsed query
//! parameters on writes, from database rows on reads. Constructors enforce
//! the field invariants (see [`super::validation`]); the serialized
//! camelCase field names are the contract with the rendering collaborator.

use super::validation::{self, ValidationResult};
use serde::{Deserialize, Serialize};

/// A single track. `album_id` is the only logically optional foreign key in
/// the model and is kept as an explicit `Option`, never coerced to zero.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Music {
    pub music_id: i64,
    pub title: String,
    pub author_id: i64,
    pub album_id: Option<i64>,
    pub year: i64,
    pub genre_id: i64,
}

impl Music {
    pub fn new(
        music_id: i64,
        title: String,
        author_id: i64,
        album_id: Option<i64>,
        year: i64,
        genre_id: i64,
    ) -> ValidationResult<Self> {
        Ok(Music {
            music_id: validation::positive("musicId", music_id)?,
            title: validation::required_text("title", title)?,
            author_id: validation::positive("authorId", author_id)?,
            album_id: album_id
                .map(|id| validation::positive("albumId", id))
                .transpose()?,
            year,
            genre_id: validation::positive("genreId", genre_id)?,
        })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub album_id: i64,
    pub title: String,
    pub year: i64,
    pub group_id: i64,
}

impl Album {
    pub fn new(album_id: i64, title: String, year: i64, group_id: i64) -> ValidationResult<Self> {
        Ok(Album {
            album_id: validation::positive("albumId", album_id)?,
            title: validation::required_text("title", title)?,
            year,
            group_id: validation::positive("groupId", group_id)?,
        })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub artist_id: i64,
    pub name: String,
    pub group_id: i64,
}

impl Artist {
    pub fn new(artist_id: i64, name: String, group_id: i64) -> ValidationResult<Self> {
        Ok(Artist {
            artist_id: validation::positive("artistId", artist_id)?,
            name: validation::required_text("name", name)?,
            group_id: validation::positive("groupId", group_id)?,
        })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub group_id: i64,
    pub name: String,
}

impl Group {
    pub fn new(group_id: i64, name: String) -> ValidationResult<Self> {
        Ok(Group {
            group_id: validation::positive("groupId", group_id)?,
            name: validation::required_text("name", name)?,
        })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Genre {
    pub genre_id: i64,
    pub name: String,
}

impl Genre {
    pub fn new(genre_id: i64, name: String) -> ValidationResult<Self> {
        Ok(Genre {
            genre_id: validation::positive("genreId", genre_id)?,
            name: validation::required_text("name", name)?,
        })
    }
}

/// A streaming/download link for a track. `music_id` is a plain foreign key,
/// not unique: a track can carry any number of links.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub music_id: i64,
    pub link: Option<String>,
}

impl Link {
    pub fn new(music_id: i64, link: Option<String>) -> ValidationResult<Self> {
        Ok(Link {
            music_id: validation::non_negative("musicId", music_id)?,
            link: validation::optional_text("link", link)?,
        })
    }
}

// =============================================================================
// Read-only projections
// =============================================================================
//
// Flattened views over two or more base tables, produced only by the join
// queries and never persisted on their own.

/// Search result row: the track with every related name denormalized.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MusicStrings {
    pub music_id: i64,
    pub title: String,
    pub author: String,
    pub album: Option<String>,
    pub year: i64,
    pub genre: String,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MusicJoinLink {
    pub music_id: i64,
    pub title: String,
    pub link: Option<String>,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ArtistJoinGroup {
    pub artist_id: i64,
    pub artist_name: String,
    pub group_id: i64,
    pub group_name: String,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JoinAll {
    pub music_id: i64,
    pub title: String,
    pub author: String,
    pub album: Option<String>,
    pub year: i64,
    pub genre: String,
    pub link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog_store::validation::{ValidationError, MAX_TEXT_LEN};

    #[test]
    fn music_constructor_validates_ids() {
        assert!(Music::new(1, "Song".into(), 1, None, 2000, 1).is_ok());
        assert!(Music::new(0, "Song".into(), 1, None, 2000, 1).is_err());
        assert!(Music::new(1, "Song".into(), -1, None, 2000, 1).is_err());
        assert!(Music::new(1, "Song".into(), 1, Some(0), 2000, 1).is_err());
        assert!(Music::new(1, "Song".into(), 1, None, 2000, 0).is_err());
    }

    #[test]
    fn music_album_is_optional() {
        let music = Music::new(1, "Song".into(), 1, None, 2000, 1).unwrap();
        assert_eq!(music.album_id, None);

        let music = Music::new(1, "Song".into(), 1, Some(3), 2000, 1).unwrap();
        assert_eq!(music.album_id, Some(3));
    }

    #[test]
    fn music_year_is_unchecked() {
        // The original applies no range check to the year
        assert!(Music::new(1, "Song".into(), 1, None, -500, 1).is_ok());
    }

    #[test]
    fn music_title_bounds() {
        assert_eq!(
            Music::new(1, String::new(), 1, None, 2000, 1),
            Err(ValidationError::EmptyField { field: "title" })
        );
        assert_eq!(
            Music::new(1, "x".repeat(MAX_TEXT_LEN + 1), 1, None, 2000, 1),
            Err(ValidationError::TooLong { field: "title" })
        );
    }

    #[test]
    fn link_music_id_may_be_zero_but_not_negative() {
        assert!(Link::new(0, Some("http://x".into())).is_ok());
        assert!(Link::new(-1, Some("http://x".into())).is_err());
    }

    #[test]
    fn link_text_is_optional_but_bounded() {
        assert!(Link::new(1, None).is_ok());
        assert!(Link::new(1, Some("x".repeat(MAX_TEXT_LEN + 1))).is_err());
    }

    #[test]
    fn music_serializes_with_camel_case_keys() {
        let music = Music::new(5, "Foo".into(), 1, None, 2000, 1).unwrap();
        let json = serde_json::to_value(&music).unwrap();
        assert_eq!(json["musicId"], 5);
        assert_eq!(json["albumId"], serde_json::Value::Null);
        assert_eq!(json["genreId"], 1);
    }

    #[test]
    fn group_and_genre_validate_names() {
        assert!(Group::new(1, "Band".into()).is_ok());
        assert!(Group::new(1, String::new()).is_err());
        assert!(Genre::new(2, "Rock".into()).is_ok());
        assert!(Genre::new(-2, "Rock".into()).is_err());
    }
}
