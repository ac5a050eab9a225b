use echords_scraping_utils::selector;
use scraper::Html;

use crate::schema::{Chord, SongPage};

use super::element_text;

pub const ACTUAL_KEY: &str = "span.actualkey";
pub const CHORD_CONTAINER: &str = "pre#core";

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SongPageError {
    #[error("Key element `span.actualkey` not found")]
    MissingKey,
    #[error("Chord container `pre#core` not found")]
    MissingChordContainer,
}

/// Extracts the key and the chord tokens from a rendered song page.
///
/// Chord anchors without visible text are left out.
/// An element that is present but empty is not an error here;
/// whether such a song is kept is decided by [`crate::schema::SongRecord::accept`].
pub fn parse(html: &Html) -> Result<SongPage, SongPageError> {
    let key = html
        .select(selector!(ACTUAL_KEY))
        .next()
        .ok_or(SongPageError::MissingKey)?;
    let container = html
        .select(selector!(CHORD_CONTAINER))
        .next()
        .ok_or(SongPageError::MissingChordContainer)?;
    let chords = container
        .select(selector!("a"))
        .map(element_text)
        .filter(|text| !text.is_empty())
        .map(Chord::from)
        .collect();
    Ok(SongPage::builder()
        .key(element_text(key))
        .chords(chords)
        .build())
}
