use derive_more::{AsRef, Display, From};
use getset::Getters;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use url::Url;

/// Separator between chord tokens in the stored `chords` column.
pub const CHORD_DELIMITER: char = ';';

#[derive(Clone, PartialEq, Eq, Debug, From, AsRef, Display, Serialize, Deserialize)]
#[as_ref(forward)]
pub struct SongName(String);

/// Musical key as printed on the song page, e.g. `Bb` or `F#m`.
#[derive(Clone, PartialEq, Eq, Debug, From, AsRef, Display, Serialize, Deserialize)]
#[as_ref(forward)]
pub struct MusicalKey(String);

#[derive(Clone, PartialEq, Eq, Debug, From, AsRef, Display, Serialize, Deserialize)]
#[as_ref(forward)]
pub struct Chord(String);

impl From<&str> for SongName {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}
impl From<&str> for MusicalKey {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}
impl From<&str> for Chord {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// One entry of the listing page: where the song page lives and how it is titled.
#[derive(Clone, PartialEq, Eq, Debug, TypedBuilder, Getters)]
#[getset(get = "pub")]
pub struct SongLink {
    url: Url,
    #[builder(setter(into))]
    name: SongName,
}

/// What a song page yields before deciding whether the song is kept.
#[derive(Clone, PartialEq, Eq, Debug, TypedBuilder, Getters)]
#[getset(get = "pub")]
pub struct SongPage {
    #[builder(setter(into))]
    key: MusicalKey,
    chords: Vec<Chord>,
}

#[derive(Clone, PartialEq, Eq, Debug, Getters)]
#[getset(get = "pub")]
pub struct SongRecord {
    name: SongName,
    key: MusicalKey,
    chords: Vec<Chord>,
}

impl SongRecord {
    /// Combines a listing entry with its page.
    /// Returns `None` when the title, the key or the chord sequence is empty.
    ///
    /// The parsers trim every field, so a title or key made only of whitespace
    /// arrives here empty and the song is dropped. Kept titles and keys are
    /// stored trimmed, not as the page spells them.
    pub fn accept(name: SongName, page: SongPage) -> Option<Self> {
        let SongPage { key, chords } = page;
        if name.0.is_empty() || key.0.is_empty() || chords.is_empty() {
            return None;
        }
        Some(Self { name, key, chords })
    }

    pub fn chords_field(&self) -> String {
        join_chords(&self.chords)
    }
}

pub fn join_chords(chords: &[Chord]) -> String {
    chords.iter().map(|chord| &chord.0).join(&CHORD_DELIMITER.to_string())
}

#[cfg(test)]
pub(crate) fn split_chords(field: &str) -> Vec<Chord> {
    if field.is_empty() {
        return vec![];
    }
    field.split(CHORD_DELIMITER).map(Chord::from).collect()
}
