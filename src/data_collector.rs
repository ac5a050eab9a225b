use std::{ops::RangeInclusive, time::Duration};

use log::{debug, info, warn};
use rand::Rng;
use scraper::Html;
use tokio::time::sleep;

use crate::{
    page_source::PageSource,
    parser::song_page,
    schema::{SongLink, SongRecord},
};

/// Pause after every song page, drawn uniformly in whole seconds.
#[derive(Clone, Debug)]
pub struct PolitenessDelay {
    secs: RangeInclusive<u64>,
}

impl PolitenessDelay {
    pub fn new(secs: RangeInclusive<u64>) -> Self {
        Self { secs }
    }

    pub fn none() -> Self {
        Self::new(0..=0)
    }

    fn pick(&self) -> Duration {
        if self.secs.is_empty() {
            return Duration::ZERO;
        }
        Duration::from_secs(rand::thread_rng().gen_range(self.secs.clone()))
    }

    async fn wait(&self) {
        let duration = self.pick();
        if !duration.is_zero() {
            sleep(duration).await;
        }
    }
}

/// Visits every linked song page in order and keeps the songs that have
/// a title, a key and at least one chord.
///
/// A page without the key or the chord sheet is skipped with a warning.
/// Failing to load a page aborts the collection.
pub async fn collect_records<S: PageSource>(
    source: &mut S,
    links: &[SongLink],
    delay: &PolitenessDelay,
) -> anyhow::Result<Vec<SongRecord>> {
    let mut records = vec![];
    for (i, link) in links.iter().enumerate() {
        info!("[{}/{}] Fetching {}", i + 1, links.len(), link.name());
        let html = source.page_source(link.url()).await?;
        match song_page::parse(&Html::parse_document(&html)) {
            Ok(page) => match SongRecord::accept(link.name().clone(), page) {
                Some(record) => {
                    info!(
                        "  Key {}, {} chords",
                        record.key(),
                        record.chords().len()
                    );
                    records.push(record);
                }
                None => debug!("  Skipped {}: empty title, key or chords", link.url()),
            },
            Err(e) => warn!("  Skipped {}: {e}", link.url()),
        }
        delay.wait().await;
    }
    info!("Collected {} of {} songs", records.len(), links.len());
    Ok(records)
}
